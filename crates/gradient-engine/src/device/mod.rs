//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the window Surface (swapchain)
//! - the [`PresentSurface`] seam the renderer draws through, with a window
//!   implementation ([`Gpu`]) and a texture-backed one ([`OffscreenSurface`])

mod context;
mod error;
mod frame;
mod gpu;
mod init;
mod offscreen;
mod surface;

pub use context::HeadlessGpu;
pub use error::SurfaceErrorAction;
pub use frame::{PresentSurface, SurfaceFrame};
pub use gpu::Gpu;
pub use init::GpuInit;
pub use offscreen::OffscreenSurface;
