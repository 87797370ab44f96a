use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};

use crate::gradient::{GradientKind, RotationMatrix};

use super::common::{
    begin_clear_pass, create_pipeline, filtering_sampler_entry, load_shader, quad_vbo,
    sampled_texture_entry, PipelineSpec, QuadVertex,
};
use super::{GradientTextures, RenderCtx};

/// Expands the ramp texture into the W×W field texture.
///
/// Each pixel computes a ramp coordinate `t` from its centered position
/// according to the gradient kind (see [`field_coordinate`]) and samples the
/// ramp there with clamped addressing.
pub struct FieldPass {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    params_ubo: wgpu::Buffer,
    quad_vbo: wgpu::Buffer,
}

impl FieldPass {
    pub fn new(device: &wgpu::Device, textures: &GradientTextures) -> Self {
        let shader = load_shader(
            device,
            "gradient field shader",
            include_str!("shaders/field.wgsl"),
        );

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("gradient field bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<FieldParams>() as u64,
                        ),
                    },
                    count: None,
                },
                sampled_texture_entry(1),
                filtering_sampler_entry(2),
            ],
        });

        let pipeline = create_pipeline(
            device,
            PipelineSpec {
                label: "gradient field pipeline",
                shader: &shader,
                bind_group_layouts: &[&bind_group_layout],
                vertex_buffers: &[QuadVertex::layout()],
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                format: textures.format(),
            },
        );

        let params_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gradient field params ubo"),
            size: std::mem::size_of::<FieldParams>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Textures are never reallocated, so the bind group lives as long as the pass.
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("gradient field bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: params_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(textures.ramp_view()),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(textures.sampler()),
                },
            ],
        });

        Self {
            pipeline,
            bind_group,
            params_ubo,
            quad_vbo: quad_vbo(device, "gradient field quad vbo"),
        }
    }

    /// Records the field draw, overwriting the field texture.
    ///
    /// The target is first cleared to `sentinel` so anything left undrawn is
    /// visible.
    pub fn encode(
        &self,
        ctx: &RenderCtx<'_>,
        encoder: &mut wgpu::CommandEncoder,
        textures: &GradientTextures,
        rotation: RotationMatrix,
        kind: GradientKind,
        sentinel: wgpu::Color,
    ) {
        let params = FieldParams {
            rotation: rotation.to_cols_array(),
            kind: kind.selector(),
            _pad: [0; 3],
        };
        ctx.queue.write_buffer(&self.params_ubo, 0, bytemuck::bytes_of(&params));

        let mut rpass = begin_clear_pass(
            encoder,
            "gradient field pass",
            textures.field_view(),
            sentinel,
        );
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad_vbo.slice(..));
        rpass.draw(0..4, 0..1);
    }
}

/// Uniform block mirrored by `FieldParams` in `field.wgsl`.
///
/// `rotation` is a column-major 2×2 matrix declared as a `vec4<f32>` in WGSL;
/// `kind` sits at byte 16 and the block is padded to 32 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct FieldParams {
    rotation: [f32; 4],
    kind: u32,
    _pad: [u32; 3],
}

/// CPU mirror of the field shader's ramp coordinate.
///
/// `p` is the pixel's centered position in [-1, 1]² with +Y up.
/// - linear: projection onto the rotated x axis, mapped to [0, 1]
/// - radial: distance from the center; rotation has no effect
/// - angular: angle of the rotated position, one turn mapped to [0, 1)
pub fn field_coordinate(kind: GradientKind, rotation: RotationMatrix, p: [f32; 2]) -> f32 {
    match kind {
        GradientKind::Linear => 0.5 + 0.5 * rotation.apply(p)[0],
        GradientKind::Radial => p[0].hypot(p[1]),
        GradientKind::Angular => {
            let [x, y] = rotation.apply(p);
            let t = y.atan2(x) / TAU;
            t - t.floor()
        }
    }
}

/// Centered coordinate of pixel `(x, y)` in a `size`×`size` target, sampled at
/// the pixel center. Row 0 is the top row.
pub fn pixel_center(x: u32, y: u32, size: u32) -> [f32; 2] {
    let s = size as f32;
    [
        (x as f32 + 0.5) / s * 2.0 - 1.0,
        1.0 - (y as f32 + 0.5) / s * 2.0,
    ]
}
