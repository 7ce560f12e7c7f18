//! GPU buffer management.

use wgpu::util::DeviceExt;

/// Creates a vertex buffer from data.
pub fn create_vertex_buffer<T: bytemuck::Pod>(
    device: &wgpu::Device,
    data: &[T],
    label: Option<&str>,
) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label,
        contents: bytemuck::cast_slice(data),
        usage: wgpu::BufferUsages::VERTEX,
    })
}

/// Creates a uniform buffer from data.
pub fn create_uniform_buffer<T: bytemuck::Pod>(
    device: &wgpu::Device,
    data: &T,
    label: Option<&str>,
) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label,
        contents: bytemuck::bytes_of(data),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

/// Rounds `size` up to the next multiple of `alignment`.
#[must_use]
pub fn align_to(size: u64, alignment: u64) -> u64 {
    size.div_ceil(alignment) * alignment
}

/// Packs one `T` per slot into a byte array with the given slot stride.
///
/// Used for uniform arrays read through dynamic offsets, where every offset
/// has to honour the device's uniform offset alignment.
pub fn pack_strided<T: bytemuck::Pod>(items: &[T], stride: usize) -> Vec<u8> {
    let size = std::mem::size_of::<T>();
    debug_assert!(stride >= size);
    let mut bytes = vec![0u8; stride * items.len().max(1)];
    for (slot, item) in bytes.chunks_exact_mut(stride).zip(items) {
        slot[..size].copy_from_slice(bytemuck::bytes_of(item));
    }
    bytes
}

/// Creates a uniform buffer initialised with already packed bytes.
pub fn create_uniform_buffer_from_bytes(
    device: &wgpu::Device,
    bytes: &[u8],
    label: Option<&str>,
) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label,
        contents: bytes,
        usage: wgpu::BufferUsages::UNIFORM,
    })
}

/// Updates a buffer with new data.
pub fn update_buffer<T: bytemuck::Pod>(queue: &wgpu::Queue, buffer: &wgpu::Buffer, data: &T) {
    queue.write_buffer(buffer, 0, bytemuck::bytes_of(data));
}
