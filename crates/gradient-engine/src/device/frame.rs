use super::SurfaceErrorAction;

/// A presentable target acquired for one refresh.
///
/// This object is short-lived and must be finalized promptly. Holding a
/// swapchain texture prevents acquisition of subsequent frames.
pub struct SurfaceFrame {
    pub view: wgpu::TextureView,
    pub format: wgpu::TextureFormat,
    /// Physical size in pixels.
    pub size: (u32, u32),
    pub(crate) surface_texture: Option<wgpu::SurfaceTexture>,
}

impl SurfaceFrame {
    /// Wraps an offscreen texture view; presenting it is a no-op.
    pub fn offscreen(
        view: wgpu::TextureView,
        format: wgpu::TextureFormat,
        size: (u32, u32),
    ) -> Self {
        Self {
            view,
            format,
            size,
            surface_texture: None,
        }
    }
}

/// What the renderer needs from a display surface.
///
/// `acquire` may fail for a single refresh (no drawable, surface lost); the
/// renderer then drops that frame. `present` is called once the frame's
/// commands have been submitted.
pub trait PresentSurface {
    fn acquire(&mut self) -> Result<SurfaceFrame, SurfaceErrorAction>;

    fn present(&mut self, frame: SurfaceFrame);
}
