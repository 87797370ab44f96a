use bytemuck::{Pod, Zeroable};

use super::common::{begin_clear_pass, create_pipeline, load_shader, PipelineSpec};
use super::{NormalizedStops, RenderCtx};

/// Draws normalized stops into the 1-texel-tall ramp texture.
///
/// The stops become a line strip across the texture; the rasterizer's
/// linear interpolation between adjacent vertices produces every
/// intermediate texel.
pub struct RampPass {
    pipeline: wgpu::RenderPipeline,

    vbo: Option<wgpu::Buffer>,
    vertex_capacity: usize,
}

impl RampPass {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = load_shader(device, "gradient ramp shader", include_str!("shaders/ramp.wgsl"));

        let pipeline = create_pipeline(
            device,
            PipelineSpec {
                label: "gradient ramp pipeline",
                shader: &shader,
                bind_group_layouts: &[],
                vertex_buffers: &[RampVertex::layout()],
                topology: wgpu::PrimitiveTopology::LineStrip,
                format,
            },
        );

        Self {
            pipeline,
            vbo: None,
            vertex_capacity: 0,
        }
    }

    /// Records the ramp draw into `encoder`, overwriting `target`.
    pub fn encode(
        &mut self,
        ctx: &RenderCtx<'_>,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        stops: &NormalizedStops,
    ) {
        debug_assert!(stops.len() >= 2, "ramp needs padded stops");

        let vertices: Vec<RampVertex> = stops
            .as_slice()
            .iter()
            .map(|s| RampVertex {
                location: s.location,
                color: s.color.to_array(),
            })
            .collect();

        self.ensure_vertex_capacity(ctx, vertices.len());
        let Some(vbo) = self.vbo.as_ref() else { return };
        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&vertices));

        let mut rpass = begin_clear_pass(
            encoder,
            "gradient ramp pass",
            target,
            wgpu::Color::TRANSPARENT,
        );
        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(0..vertices.len() as u32, 0..1);
    }

    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.vertex_capacity && self.vbo.is_some() {
            return;
        }

        let new_cap = required.next_power_of_two().max(64);
        log::debug!("growing ramp vertex buffer to {new_cap} stops");

        self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gradient ramp vbo"),
            size: (new_cap * std::mem::size_of::<RampVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vertex_capacity = new_cap;
    }

    /// Number of stops the vertex buffer holds without reallocating.
    pub fn vertex_capacity(&self) -> usize {
        self.vertex_capacity
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct RampVertex {
    location: f32,
    color: [f32; 4],
}

impl RampVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32,   // location
        1 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RampVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}
