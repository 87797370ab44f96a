use super::{GradientStop, Rgba, RotationMatrix, StopId};

/// How the 1-D ramp is expanded over the plane.
///
/// The discriminant is the selector uploaded to the field shader.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
#[repr(u32)]
pub enum GradientKind {
    #[default]
    Linear = 0,
    Radial = 1,
    Angular = 2,
}

impl GradientKind {
    pub const ALL: [GradientKind; 3] = [Self::Linear, Self::Radial, Self::Angular];

    #[inline]
    pub const fn selector(self) -> u32 {
        self as u32
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::Radial => "Radial",
            Self::Angular => "Angular",
        }
    }
}

/// Editable gradient description.
///
/// Stops are kept in insertion order; sorting and boundary padding happen at
/// render time. `rotation_angle` is in degrees and unconstrained.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub kind: GradientKind,
    pub stops: Vec<GradientStop>,
    pub rotation_angle: f32,
}

impl Default for Gradient {
    /// Two-stop white → black linear gradient.
    fn default() -> Self {
        Self {
            kind: GradientKind::Linear,
            stops: vec![
                GradientStop::new(0.0, Rgba::WHITE),
                GradientStop::new(1.0, Rgba::BLACK),
            ],
            rotation_angle: 0.0,
        }
    }
}

impl Gradient {
    pub fn new(kind: GradientKind, stops: Vec<GradientStop>, rotation_angle: f32) -> Self {
        Self {
            kind,
            stops,
            rotation_angle,
        }
    }

    #[inline]
    pub fn rotation_matrix(&self) -> RotationMatrix {
        RotationMatrix::from_degrees(self.rotation_angle)
    }

    pub fn set_kind(&mut self, kind: GradientKind) {
        self.kind = kind;
    }

    pub fn set_rotation(&mut self, angle: f32) {
        self.rotation_angle = angle;
    }

    pub fn stop(&self, id: StopId) -> Option<&GradientStop> {
        self.stops.iter().find(|s| s.id() == id)
    }

    fn stop_mut(&mut self, id: StopId) -> Option<&mut GradientStop> {
        self.stops.iter_mut().find(|s| s.id() == id)
    }

    /// Inserts a stop halfway between the last two stops (in list order),
    /// colored with their average, just before the last stop.
    ///
    /// With a single stop the "pair" is that stop alone, so the new stop gets
    /// half its location and half its color.
    pub fn insert_stop(&mut self) -> StopId {
        let Some(last_index) = self.stops.len().checked_sub(1) else {
            let stop = GradientStop::new(0.0, Rgba::TRANSPARENT);
            self.stops.push(stop);
            return stop.id();
        };

        let tail = &self.stops[self.stops.len().saturating_sub(2)..];
        let location = tail.iter().map(|s| s.location).sum::<f32>() / 2.0;
        let sum = tail.iter().fold([0.0f32; 4], |acc, s| {
            let c = s.color.to_array();
            [acc[0] + c[0], acc[1] + c[1], acc[2] + c[2], acc[3] + c[3]]
        });
        let color = Rgba::from_array(sum.map(|c| c / 2.0));

        let stop = GradientStop::new(location, color);
        self.stops.insert(last_index, stop);
        stop.id()
    }

    /// Removes a stop. A gradient never drops below two stops; returns
    /// `false` when the removal is refused or the id is unknown.
    pub fn remove_stop(&mut self, id: StopId) -> bool {
        if self.stops.len() <= 2 {
            return false;
        }
        let before = self.stops.len();
        self.stops.retain(|s| s.id() != id);
        self.stops.len() != before
    }

    /// Moves a stop to `location` clamped to [0, 1], then re-sorts stops by
    /// location (stable).
    pub fn move_stop(&mut self, id: StopId, location: f32) -> bool {
        let Some(stop) = self.stop_mut(id) else { return false };
        stop.location = location.clamp(0.0, 1.0);
        self.stops.sort_by(|a, b| a.location.total_cmp(&b.location));
        true
    }

    pub fn set_stop_color(&mut self, id: StopId, color: Rgba) -> bool {
        let Some(stop) = self.stop_mut(id) else { return false };
        stop.color = color;
        true
    }
}
