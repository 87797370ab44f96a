use super::common::{
    begin_clear_pass, create_pipeline, filtering_sampler_entry, load_shader, quad_vbo,
    sampled_texture_entry, PipelineSpec, QuadVertex,
};
use super::{GradientTextures, RenderCtx};

/// Blits the field texture onto a presentable target.
///
/// The field is square; it is drawn into the largest centered square of the
/// target and the remainder is cleared to black.
pub struct PresentPass {
    shader: wgpu::ShaderModule,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    quad_vbo: wgpu::Buffer,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
}

impl PresentPass {
    pub fn new(
        device: &wgpu::Device,
        textures: &GradientTextures,
        format: wgpu::TextureFormat,
    ) -> Self {
        let shader = load_shader(
            device,
            "gradient present shader",
            include_str!("shaders/present.wgsl"),
        );

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("gradient present bgl"),
            entries: &[sampled_texture_entry(0), filtering_sampler_entry(1)],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("gradient present bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(textures.field_view()),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(textures.sampler()),
                },
            ],
        });

        let mut pass = Self {
            shader,
            bind_group_layout,
            bind_group,
            quad_vbo: quad_vbo(device, "gradient present quad vbo"),
            pipeline_format: None,
            pipeline: None,
        };
        pass.ensure_pipeline(device, format);
        pass
    }

    /// Records the blit into `target`, whose size is `(width, height)` in
    /// physical pixels.
    pub fn encode(
        &mut self,
        ctx: &RenderCtx<'_>,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        format: wgpu::TextureFormat,
        (width, height): (u32, u32),
    ) {
        self.ensure_pipeline(ctx.device, format);
        let Some(pipeline) = self.pipeline.as_ref() else { return };

        let mut rpass =
            begin_clear_pass(encoder, "gradient present pass", target, wgpu::Color::BLACK);

        let Some((x, y, side)) = centered_square(width, height) else { return };
        rpass.set_viewport(x as f32, y as f32, side as f32, side as f32, 0.0, 1.0);

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad_vbo.slice(..));
        rpass.draw(0..4, 0..1);
    }

    fn ensure_pipeline(&mut self, device: &wgpu::Device, format: wgpu::TextureFormat) {
        if self.pipeline_format == Some(format) && self.pipeline.is_some() {
            return;
        }

        if let Some(previous) = self.pipeline_format {
            log::debug!(
                "present target format changed {previous:?} -> {format:?}; rebuilding pipeline"
            );
        }

        self.pipeline = Some(create_pipeline(
            device,
            PipelineSpec {
                label: "gradient present pipeline",
                shader: &self.shader,
                bind_group_layouts: &[&self.bind_group_layout],
                vertex_buffers: &[QuadVertex::layout()],
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                format,
            },
        ));
        self.pipeline_format = Some(format);
    }
}

/// Largest square centered in a `width`×`height` target as `(x, y, side)`.
///
/// Returns `None` for a zero-area target.
pub(crate) fn centered_square(width: u32, height: u32) -> Option<(u32, u32, u32)> {
    let side = width.min(height);
    if side == 0 {
        return None;
    }
    Some(((width - side) / 2, (height - side) / 2, side))
}
