//! Stop normalization: the ramp pass needs stops sorted by location with
//! boundary stops at exactly 0 and 1.

use crate::gradient::{GradientStop, Rgba};

use super::RenderError;

/// A stop reduced to what the ramp pass consumes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RampStop {
    pub location: f32,
    pub color: Rgba,
}

impl RampStop {
    #[inline]
    pub const fn new(location: f32, color: Rgba) -> Self {
        Self { location, color }
    }
}

impl From<&GradientStop> for RampStop {
    fn from(stop: &GradientStop) -> Self {
        Self::new(stop.location, stop.color)
    }
}

/// Stops sorted ascending by location, first at 0 and last at 1.
///
/// Always holds at least two stops.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedStops {
    stops: Vec<RampStop>,
}

impl NormalizedStops {
    #[inline]
    pub fn as_slice(&self) -> &[RampStop] {
        &self.stops
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn locations(&self) -> impl Iterator<Item = f32> + '_ {
        self.stops.iter().map(|s| s.location)
    }

    pub fn colors(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.stops.iter().map(|s| s.color)
    }

    /// CPU reference of the ramp: the color the ramp pass produces at `t`.
    ///
    /// `t` is clamped to [0, 1]. At a location shared by several stops the
    /// last of them wins, matching a zero-length line segment.
    pub fn sample(&self, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let upper = self.stops.partition_point(|s| s.location <= t);

        match (upper.checked_sub(1).map(|i| self.stops[i]), self.stops.get(upper)) {
            (Some(a), Some(b)) => {
                let span = b.location - a.location;
                if span <= 0.0 {
                    b.color
                } else {
                    a.color.lerp(b.color, (t - a.location) / span)
                }
            }
            (Some(a), None) => a.color,
            (None, Some(b)) => b.color,
            (None, None) => Rgba::TRANSPARENT,
        }
    }
}

/// Copies, stable-sorts and pads `stops` for the ramp pass.
///
/// Equal locations keep their original relative order. A stop is prepended at
/// location 0 (first color) and appended at location 1 (last color) when
/// missing. Normalizing an already normalized list is the identity.
pub fn normalize_stops<'a, I>(stops: I) -> Result<NormalizedStops, RenderError>
where
    I: IntoIterator<Item = &'a GradientStop>,
{
    let mut sorted: Vec<RampStop> = Vec::new();
    for (index, stop) in stops.into_iter().enumerate() {
        if !stop.location.is_finite() {
            return Err(RenderError::NonFiniteLocation {
                index,
                location: stop.location,
            });
        }
        if !stop.color.is_finite() {
            return Err(RenderError::NonFiniteColor { index });
        }
        sorted.push(stop.into());
    }

    sorted.sort_by(|a, b| a.location.total_cmp(&b.location));

    let (Some(&first), Some(&last)) = (sorted.first(), sorted.last()) else {
        return Err(RenderError::NoStops);
    };

    if first.location != 0.0 {
        sorted.insert(0, RampStop::new(0.0, first.color));
    }
    if last.location != 1.0 {
        sorted.push(RampStop::new(1.0, last.color));
    }

    debug_assert!(sorted.len() >= 2);
    Ok(NormalizedStops { stops: sorted })
}
