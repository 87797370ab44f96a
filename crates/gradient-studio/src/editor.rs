use gradient_engine::gradient::{Gradient, GradientKind, Rgba, StopId};

/// Rotation applied per arrow key press, in degrees.
pub const ROTATION_STEP: f32 = 15.0;
/// Stop movement per bracket key press.
pub const MOVE_STEP: f32 = 0.05;
/// Channel increment per R/G/B key press; wraps past 1.
pub const CHANNEL_STEP: f32 = 0.25;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

/// An editing action bound to a key.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Command {
    SetKind(GradientKind),
    Rotate(f32),
    InsertStop,
    SelectNext,
    RemoveSelected,
    MoveSelected(f32),
    CycleChannel(Channel),
}

/// The studio's editing state: the gradient and the selected stop.
pub struct Editor {
    gradient: Gradient,
    selected: Option<StopId>,
}

impl Editor {
    pub fn new(gradient: Gradient) -> Self {
        let selected = gradient.stops.first().map(|s| s.id());
        Self { gradient, selected }
    }

    pub fn gradient(&self) -> &Gradient {
        &self.gradient
    }

    pub fn selected(&self) -> Option<StopId> {
        self.selected
    }

    /// Applies `command`; returns whether the gradient changed.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::SetKind(kind) => {
                if self.gradient.kind == kind {
                    return false;
                }
                self.gradient.set_kind(kind);
                true
            }
            Command::Rotate(delta) => {
                let angle = (self.gradient.rotation_angle + delta).rem_euclid(360.0);
                self.gradient.set_rotation(angle);
                true
            }
            Command::InsertStop => {
                self.selected = Some(self.gradient.insert_stop());
                true
            }
            Command::SelectNext => {
                self.select_next();
                false
            }
            Command::RemoveSelected => {
                let Some(id) = self.selected else { return false };
                let index = self.selected_index();
                if !self.gradient.remove_stop(id) {
                    log::info!("a gradient keeps at least two stops");
                    return false;
                }
                let next = index.unwrap_or(0).min(self.gradient.stops.len() - 1);
                self.selected = self.gradient.stops.get(next).map(|s| s.id());
                true
            }
            Command::MoveSelected(delta) => {
                let Some(id) = self.selected else { return false };
                let Some(stop) = self.gradient.stop(id) else { return false };
                let location = stop.location + delta;
                self.gradient.move_stop(id, location)
            }
            Command::CycleChannel(channel) => {
                let Some(id) = self.selected else { return false };
                let Some(stop) = self.gradient.stop(id) else { return false };
                let color = cycle_channel(stop.color, channel);
                self.gradient.set_stop_color(id, color)
            }
        }
    }

    /// Window title summarizing the gradient and the selected stop.
    pub fn title(&self) -> String {
        let g = &self.gradient;
        let mut title = format!(
            "Gradient · {} · {:.0}° · {} stops",
            g.kind.title(),
            g.rotation_angle,
            g.stops.len()
        );

        if let Some(stop) = self.selected.and_then(|id| g.stop(id)) {
            let [r, gr, b, a] = stop.color.channel_bytes();
            title.push_str(&format!(
                " · selected {:.2} rgba({r}, {gr}, {b}, {a})",
                stop.location
            ));
        }
        title
    }

    fn selected_index(&self) -> Option<usize> {
        let id = self.selected?;
        self.gradient.stops.iter().position(|s| s.id() == id)
    }

    fn select_next(&mut self) {
        let len = self.gradient.stops.len();
        if len == 0 {
            self.selected = None;
            return;
        }
        let next = self.selected_index().map_or(0, |i| (i + 1) % len);
        self.selected = Some(self.gradient.stops[next].id());
    }
}

fn cycle_channel(color: Rgba, channel: Channel) -> Rgba {
    let step = |v: f32| {
        let next = v + CHANNEL_STEP;
        if next > 1.0 + f32::EPSILON { 0.0 } else { next.min(1.0) }
    };

    let mut color = color;
    match channel {
        Channel::Red => color.r = step(color.r),
        Channel::Green => color.g = step(color.g),
        Channel::Blue => color.b = step(color.b),
    }
    color
}
