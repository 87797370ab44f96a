//! Gradient model shared between editors and the renderer.
//!
//! Scope:
//! - straight-alpha color and platform color extraction
//! - stops with identity, gradient kind, rotation
//! - pure editing operations
//!
//! Nothing here touches the GPU.

mod color;
mod model;
mod rotation;
mod stop;

pub use color::{extract_rgba, rgba_from_components, ColorComponents, Rgba};
pub use model::{Gradient, GradientKind};
pub use rotation::RotationMatrix;
pub use stop::{GradientStop, StopId};
