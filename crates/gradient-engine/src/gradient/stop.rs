use std::sync::atomic::{AtomicU64, Ordering};

use super::Rgba;

/// Process-unique identity of a stop.
///
/// Identity lets an editor track a stop through moves and recolors; it never
/// participates in equality.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct StopId(u64);

impl StopId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A color anchored at a location along the gradient axis.
///
/// `location` is expected in [0, 1] but is not clamped here; the renderer
/// pads and sorts stops at render time.
#[derive(Debug, Copy, Clone)]
pub struct GradientStop {
    id: StopId,
    pub location: f32,
    pub color: Rgba,
}

impl GradientStop {
    /// Creates a stop with a fresh identity.
    pub fn new(location: f32, color: Rgba) -> Self {
        Self {
            id: StopId::next(),
            location,
            color,
        }
    }

    #[inline]
    pub fn id(&self) -> StopId {
        self.id
    }
}

impl PartialEq for GradientStop {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location && self.color == other.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = GradientStop::new(0.0, Rgba::WHITE);
        let b = GradientStop::new(0.0, Rgba::WHITE);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn equality_ignores_identity() {
        let a = GradientStop::new(0.3, Rgba::BLACK);
        let b = GradientStop::new(0.3, Rgba::BLACK);
        assert_eq!(a, b);
    }

    #[test]
    fn equality_compares_location_and_color() {
        let a = GradientStop::new(0.3, Rgba::BLACK);
        assert_ne!(a, GradientStop::new(0.4, Rgba::BLACK));
        assert_ne!(a, GradientStop::new(0.3, Rgba::WHITE));
    }
}
