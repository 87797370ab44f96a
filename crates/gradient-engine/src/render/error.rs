use std::fmt;

/// Why a gradient could not be turned into a frame job.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The gradient has no stops; there is no color to pad from.
    NoStops,
    /// A stop location is NaN or infinite and cannot be ordered.
    NonFiniteLocation { index: usize, location: f32 },
    /// A stop color has a NaN or infinite channel.
    NonFiniteColor { index: usize },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoStops => write!(f, "gradient has no stops"),
            Self::NonFiniteLocation { index, location } => {
                write!(f, "stop {index} has non-finite location {location}")
            }
            Self::NonFiniteColor { index } => write!(f, "stop {index} has a non-finite color"),
        }
    }
}

impl std::error::Error for RenderError {}
