use anyhow::{Context, Result};

use super::GpuInit;

pub(crate) fn create_instance() -> wgpu::Instance {
    wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    })
}

pub(crate) async fn request_device(
    adapter: &wgpu::Adapter,
    init: &GpuInit,
) -> Result<(wgpu::Device, wgpu::Queue)> {
    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("gradient-engine device"),
            required_features: init.required_features,
            required_limits: init.required_limits.clone(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        })
        .await
        .context("failed to create wgpu device/queue")?;

    let info = adapter.get_info();
    log::info!("using adapter {} ({:?})", info.name, info.backend);

    Ok((device, queue))
}

/// A device and queue with no window attached.
///
/// Used for offscreen rendering and GPU tests.
pub struct HeadlessGpu {
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl HeadlessGpu {
    /// Acquires any adapter, falling back to a software one if needed.
    pub async fn new(init: &GpuInit) -> Result<Self> {
        let instance = create_instance();

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(err) => {
                log::debug!("no hardware adapter ({err}); trying fallback");
                instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: init.power_preference,
                        compatible_surface: None,
                        force_fallback_adapter: true,
                    })
                    .await
                    .context("failed to find any GPU adapter")?
            }
        };

        let (device, queue) = request_device(&adapter, init).await?;
        Ok(Self { device, queue })
    }

    /// Blocking variant of [`HeadlessGpu::new`].
    pub fn new_blocking(init: &GpuInit) -> Result<Self> {
        pollster::block_on(Self::new(init))
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }
}
