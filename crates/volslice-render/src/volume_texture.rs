//! The 3D texture holding the RGBA-expanded volume.

use volslice_core::texels::CHANNELS;
use volslice_core::VolumeDims;

use crate::error::{RenderError, RenderResult};

/// Texel format of the uploaded volume.
pub const VOLUME_TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// GPU copy of the volume plus the sampler used to read it.
pub struct VolumeTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub dims: VolumeDims,
}

impl VolumeTexture {
    /// Uploads RGBA texels (see [`volslice_core::expand_to_rgba`]) as a 3D texture.
    ///
    /// Sampling is linear in all directions. Outside the unit cube the sampler
    /// returns transparent black when `clamp_to_border` is available, and clamps
    /// to the edge otherwise.
    pub async fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        dims: VolumeDims,
        rgba: &[u8],
        clamp_to_border: bool,
    ) -> RenderResult<Self> {
        let expected = dims.voxel_count() * CHANNELS as u64;
        if rgba.len() as u64 != expected {
            return Err(RenderError::TextureCreationFailed(format!(
                "texel buffer holds {} bytes, volume needs {expected}",
                rgba.len()
            )));
        }

        let size = wgpu::Extent3d {
            width: dims.width,
            height: dims.height,
            depth_or_array_layers: dims.depth,
        };

        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("volume texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D3,
            format: VOLUME_TEXTURE_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(dims.width * CHANNELS as u32),
                rows_per_image: Some(dims.height),
            },
            size,
        );

        let validation = device.pop_error_scope().await;
        let out_of_memory = device.pop_error_scope().await;
        if out_of_memory.is_some() {
            return Err(RenderError::OutOfMemory("volume texture"));
        }
        if let Some(err) = validation {
            return Err(RenderError::TextureCreationFailed(err.to_string()));
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            dimension: Some(wgpu::TextureViewDimension::D3),
            ..Default::default()
        });

        let (address_mode, border_color) = if clamp_to_border {
            (
                wgpu::AddressMode::ClampToBorder,
                Some(wgpu::SamplerBorderColor::TransparentBlack),
            )
        } else {
            (wgpu::AddressMode::ClampToEdge, None)
        };

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("volume sampler"),
            address_mode_u: address_mode,
            address_mode_v: address_mode,
            address_mode_w: address_mode,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            border_color,
            ..Default::default()
        });

        log::info!("3D texture created successfully.");

        Ok(Self {
            texture,
            view,
            sampler,
            dims,
        })
    }
}
