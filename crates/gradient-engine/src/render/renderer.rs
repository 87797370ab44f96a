use std::sync::Arc;

use anyhow::Result;

use crate::device::{PresentSurface, SurfaceErrorAction};
use crate::gradient::Gradient;

use super::{
    normalize_stops, read_texture_rgba8, FieldPass, FrameJob, GradientTextures, JobChannel,
    PresentPass, RampPass, RenderCtx, RenderError, RendererConfig, Subscription,
};

/// Result of drawing one frame job.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// Commands were submitted and the target presented.
    Presented,
    /// No target was available; nothing was drawn.
    Dropped(SurfaceErrorAction),
}

/// Owns the GPU resources of the gradient pipeline and the job channel.
///
/// `render` turns a [`Gradient`] into a published [`FrameJob`]; the display
/// side pulls jobs through a [`Subscription`] and hands them back to
/// [`Renderer::draw_frame`] on its own refresh cadence.
pub struct Renderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: RendererConfig,

    textures: GradientTextures,
    ramp: RampPass,
    field: FieldPass,
    present: PresentPass,

    channel: JobChannel,
}

impl Renderer {
    /// Allocates textures and builds the three pipelines.
    ///
    /// `surface_format` is the format the present pass initially targets.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        config: RendererConfig,
    ) -> Result<Self> {
        let textures = GradientTextures::new(device, &config)?;
        let ramp = RampPass::new(device, textures.format());
        let field = FieldPass::new(device, &textures);
        let present = PresentPass::new(device, &textures, surface_format);

        log::info!(
            "gradient renderer ready: {}x{} field, presenting to {surface_format:?}",
            config.resolution,
            config.resolution
        );

        Ok(Self {
            device: device.clone(),
            queue: queue.clone(),
            config,
            textures,
            ramp,
            field,
            present,
            channel: JobChannel::new(),
        })
    }

    /// Normalizes the gradient's stops and publishes a frame job.
    ///
    /// Nothing is drawn here; any unconsumed job is superseded.
    pub fn render(&self, gradient: &Gradient) -> Result<(), RenderError> {
        let stops = normalize_stops(&gradient.stops)?;
        let job = FrameJob::new(stops, gradient.rotation_matrix(), gradient.kind);
        let job = self.channel.publish(job);

        log::debug!(
            "published frame job #{} ({:?}, {} stops)",
            job.generation(),
            job.kind(),
            job.stops().len()
        );
        Ok(())
    }

    pub fn subscribe(&self) -> Subscription {
        self.channel.subscribe()
    }

    pub fn channel(&self) -> &JobChannel {
        &self.channel
    }

    /// Runs ramp → field → present for `job` into one encoder and submits it.
    ///
    /// If the surface has no target this refresh the frame is dropped and the
    /// textures are left untouched.
    pub fn draw_frame<S>(&mut self, job: &FrameJob, surface: &mut S) -> FrameOutcome
    where
        S: PresentSurface + ?Sized,
    {
        let frame = match surface.acquire() {
            Ok(frame) => frame,
            Err(action) => {
                log::debug!("dropping frame job #{}: {action:?}", job.generation());
                return FrameOutcome::Dropped(action);
            }
        };

        let ctx = RenderCtx::new(&self.device, &self.queue);
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("gradient frame encoder"),
            });

        self.ramp
            .encode(&ctx, &mut encoder, self.textures.ramp_view(), job.stops());
        self.field.encode(
            &ctx,
            &mut encoder,
            &self.textures,
            job.rotation(),
            job.kind(),
            self.config.sentinel,
        );
        self.present
            .encode(&ctx, &mut encoder, &frame.view, frame.format, frame.size);

        self.queue.submit(std::iter::once(encoder.finish()));
        surface.present(frame);

        log::trace!("presented frame job #{}", job.generation());
        FrameOutcome::Presented
    }

    /// Convenience for headless use: takes a job from `subscription` and draws it.
    ///
    /// Returns `None` when nothing was pending.
    pub fn draw_pending<S>(
        &mut self,
        subscription: &Subscription,
        surface: &mut S,
    ) -> Option<(Arc<FrameJob>, FrameOutcome)>
    where
        S: PresentSurface + ?Sized,
    {
        let job = subscription.take()?;
        let outcome = self.draw_frame(&job, surface);
        Some((job, outcome))
    }

    /// Reads the ramp texture back as W RGBA8 texels.
    pub fn read_ramp(&self) -> Result<Vec<[u8; 4]>> {
        read_texture_rgba8(&self.device, &self.queue, self.textures.ramp())
    }

    /// Reads the field texture back as W×W RGBA8 texels, top row first.
    pub fn read_field(&self) -> Result<Vec<[u8; 4]>> {
        read_texture_rgba8(&self.device, &self.queue, self.textures.field())
    }

    /// Stops the ramp vertex buffer holds before it has to grow.
    pub fn ramp_vertex_capacity(&self) -> usize {
        self.ramp.vertex_capacity()
    }

    #[inline]
    pub fn resolution(&self) -> u32 {
        self.textures.resolution()
    }
}
