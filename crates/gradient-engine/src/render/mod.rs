//! GPU rendering subsystem.
//!
//! A frame is three passes recorded into one encoder:
//! - [`RampPass`]: normalized stops → 1×W ramp texture
//! - [`FieldPass`]: ramp → W×W field texture, by gradient kind and rotation
//! - [`PresentPass`]: field → presentable target
//!
//! [`Renderer`] owns the passes and publishes [`FrameJob`]s; [`GradientView`]
//! consumes them on display refresh.

mod common;
mod ctx;
mod error;
mod field;
mod job;
mod normalize;
mod present;
mod ramp;
mod readback;
mod renderer;
mod textures;
mod view;

pub use ctx::RenderCtx;
pub use error::RenderError;
pub use field::{field_coordinate, pixel_center, FieldPass};
pub use job::{FrameJob, JobChannel, Subscription};
pub use normalize::{normalize_stops, NormalizedStops, RampStop};
pub use present::PresentPass;
pub use ramp::RampPass;
pub use readback::read_texture_rgba8;
pub use renderer::{FrameOutcome, Renderer};
pub use textures::{GradientTextures, RendererConfig};
pub use view::{GradientView, RefreshOutcome};
