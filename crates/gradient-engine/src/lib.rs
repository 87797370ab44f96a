//! Gradient engine crate.
//!
//! Turns an editable color gradient into pixels: a ramp texture, a field
//! texture shaped by the gradient kind, and a blit to the window. Also owns
//! the winit runtime that drives it.

pub mod core;
pub mod device;
pub mod gradient;
pub mod logging;
pub mod render;
pub mod window;
