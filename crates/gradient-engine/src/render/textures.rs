use anyhow::{ensure, Result};

/// Renderer configuration.
///
/// Keep this small; every field maps to a resource decided once at
/// construction.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Ramp width W; the field texture is W×W.
    pub resolution: u32,

    /// Format of the ramp and field textures.
    ///
    /// Must be a filterable, renderable color format.
    pub texture_format: wgpu::TextureFormat,

    /// Field pass clear color. Any pixel showing it was never drawn.
    pub sentinel: wgpu::Color,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            resolution: 1024,
            texture_format: wgpu::TextureFormat::Rgba8Unorm,
            sentinel: wgpu::Color::RED,
        }
    }
}

/// The two persistent textures: 1×W ramp (stored as W wide, 1 tall) and
/// W×W field. Allocated once and overwritten every frame.
pub struct GradientTextures {
    resolution: u32,
    format: wgpu::TextureFormat,

    ramp: wgpu::Texture,
    ramp_view: wgpu::TextureView,

    field: wgpu::Texture,
    field_view: wgpu::TextureView,

    /// Clamp-to-edge, linear. Shared by the field and present passes.
    sampler: wgpu::Sampler,
}

impl GradientTextures {
    pub fn new(device: &wgpu::Device, config: &RendererConfig) -> Result<Self> {
        let resolution = config.resolution;
        let max = device.limits().max_texture_dimension_2d;
        ensure!(resolution >= 2, "gradient resolution {resolution} is below 2");
        ensure!(
            resolution <= max,
            "gradient resolution {resolution} exceeds device limit {max}"
        );

        let usage = wgpu::TextureUsages::RENDER_ATTACHMENT
            | wgpu::TextureUsages::TEXTURE_BINDING
            | wgpu::TextureUsages::COPY_SRC;

        let create = |label: &str, height: u32| {
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width: resolution,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: config.texture_format,
                usage,
                view_formats: &[],
            })
        };

        let ramp = create("gradient ramp texture", 1);
        let field = create("gradient field texture", resolution);

        let ramp_view = ramp.create_view(&wgpu::TextureViewDescriptor::default());
        let field_view = field.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("gradient sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        log::debug!(
            "allocated gradient textures: ramp {resolution}x1, field {r}x{r}, {:?}",
            config.texture_format,
            r = resolution
        );

        Ok(Self {
            resolution,
            format: config.texture_format,
            ramp,
            ramp_view,
            field,
            field_view,
            sampler,
        })
    }

    #[inline]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    pub fn ramp(&self) -> &wgpu::Texture {
        &self.ramp
    }

    pub fn ramp_view(&self) -> &wgpu::TextureView {
        &self.ramp_view
    }

    pub fn field(&self) -> &wgpu::Texture {
        &self.field
    }

    pub fn field_view(&self) -> &wgpu::TextureView {
        &self.field_view
    }

    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }
}
