use anyhow::Result;

use super::{PresentSurface, SurfaceErrorAction, SurfaceFrame};

/// A [`PresentSurface`] backed by a plain texture.
///
/// Availability can be toggled to simulate refreshes where no drawable is
/// obtainable. Presented frames are counted.
pub struct OffscreenSurface {
    texture: wgpu::Texture,
    format: wgpu::TextureFormat,
    size: (u32, u32),
    available: bool,
    presented: u64,
}

impl OffscreenSurface {
    pub fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("offscreen surface texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });

        Self {
            texture,
            format,
            size: (width.max(1), height.max(1)),
            available: true,
            presented: 0,
        }
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    pub fn presented_frames(&self) -> u64 {
        self.presented
    }

    /// Reads back the last presented contents as RGBA8, row-major.
    pub fn read_pixels(&self, device: &wgpu::Device, queue: &wgpu::Queue) -> Result<Vec<[u8; 4]>> {
        crate::render::read_texture_rgba8(device, queue, &self.texture)
    }
}

impl PresentSurface for OffscreenSurface {
    fn acquire(&mut self) -> Result<SurfaceFrame, SurfaceErrorAction> {
        if !self.available {
            return Err(SurfaceErrorAction::SkipFrame);
        }

        let view = self
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        Ok(SurfaceFrame::offscreen(view, self.format, self.size))
    }

    fn present(&mut self, _frame: SurfaceFrame) {
        self.presented += 1;
    }
}
