//! Blocking GPU → CPU texture readback for diagnostics and tests.

use anyhow::{bail, Context, Result};

/// Copies `texture` into host memory as RGBA8 pixels, row-major, top row first.
///
/// Supports 4-byte-per-texel 8-bit formats; BGRA layouts are swizzled to RGBA.
/// Blocks until the GPU has finished all prior work on the queue.
pub fn read_texture_rgba8(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
) -> Result<Vec<[u8; 4]>> {
    let format = texture.format();
    let swizzle = match format {
        wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb => false,
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => true,
        other => bail!("readback does not support texture format {other:?}"),
    };

    let size = texture.size();
    let (width, height) = (size.width, size.height);
    let row_bytes = width * 4;
    let padded_row_bytes = row_bytes.next_multiple_of(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT);

    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("gradient readback buffer"),
        size: u64::from(padded_row_bytes) * u64::from(height),
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("gradient readback encoder"),
    });
    encoder.copy_texture_to_buffer(
        texture.as_image_copy(),
        wgpu::TexelCopyBufferInfo {
            buffer: &buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_row_bytes),
                rows_per_image: None,
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    queue.submit(std::iter::once(encoder.finish()));

    let (sender, receiver) = std::sync::mpsc::channel();
    let slice = buffer.slice(..);
    slice.map_async(wgpu::MapMode::Read, move |result| {
        // The receiver is alive until after the poll below.
        let _ = sender.send(result);
    });
    device
        .poll(wgpu::PollType::wait_indefinitely())
        .context("failed to wait for readback")?;
    receiver
        .recv()
        .context("readback map callback never ran")?
        .context("failed to map readback buffer")?;

    let mut pixels = Vec::with_capacity((width * height) as usize);
    {
        let data = slice.get_mapped_range();
        for row in data.chunks_exact(padded_row_bytes as usize) {
            for texel in row[..row_bytes as usize].chunks_exact(4) {
                let [a, b, c, d] = [texel[0], texel[1], texel[2], texel[3]];
                pixels.push(if swizzle { [c, b, a, d] } else { [a, b, c, d] });
            }
        }
    }
    buffer.unmap();

    Ok(pixels)
}
