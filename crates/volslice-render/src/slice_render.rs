//! Slice stack rendering.
//!
//! Every frame draws the same unit quad once per slice, back to front, each draw
//! selecting that slice's model matrix and texture depth through a dynamic
//! uniform offset. Blending is src-alpha / one-minus-src-alpha with no depth
//! test, so the draw order alone decides the composite.

use std::num::NonZeroU64;

use glam::Vec3;
use volslice_core::{SliceStack, ViewState, QUAD_VERTICES};

use crate::buffer;
use crate::error::{RenderError, RenderResult};
use crate::shader::ShaderModules;
use crate::volume_texture::VolumeTexture;

#[allow(clippy::cast_possible_truncation)]
const QUAD_VERTEX_COUNT: u32 = QUAD_VERTICES.len() as u32;

const QUAD_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

/// Per-frame uniforms.
/// Layout must match WGSL `FrameUniforms` exactly.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    /// Fixed look-at matrix.
    pub view: [[f32; 4]; 4],
    /// Orthographic projection with the current near plane.
    pub projection: [[f32; 4]; 4],
    /// Texture-space rotation.
    pub ttex: [[f32; 4]; 4],
}

impl FrameUniforms {
    #[must_use]
    pub fn from_view(view: &ViewState) -> Self {
        Self {
            view: ViewState::view_matrix().to_cols_array_2d(),
            projection: view.projection_matrix().to_cols_array_2d(),
            ttex: view.texture_transform().to_cols_array_2d(),
        }
    }
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self::from_view(&ViewState::default())
    }
}

/// Per-slice uniforms, one slot per slice.
/// Layout must match WGSL `SliceUniforms` exactly.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[allow(clippy::pub_underscore_fields)]
pub struct SliceUniforms {
    /// Places the unit quad at the slice's Z.
    pub model: [[f32; 4]; 4],
    /// Normalized texture depth sampled by the slice.
    pub profundidad: f32,
    /// Padding to 16-byte alignment.
    pub _pad: [f32; 3],
}

/// The compiled slice shader program.
pub struct SlicePipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl SlicePipeline {
    /// Links the shader stages into the slice pipeline.
    ///
    /// A mismatch between the WGSL bindings and the layout below surfaces here as
    /// [`RenderError::PipelineCreationFailed`].
    pub async fn new(
        device: &wgpu::Device,
        shaders: &ShaderModules,
        color_format: wgpu::TextureFormat,
    ) -> RenderResult<Self> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("slice bind group layout"),
            entries: &[
                // Frame uniforms
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(
                            std::mem::size_of::<FrameUniforms>() as u64
                        ),
                    },
                    count: None,
                },
                // Slice uniforms, selected per draw
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: NonZeroU64::new(
                            std::mem::size_of::<SliceUniforms>() as u64
                        ),
                    },
                    count: None,
                },
                // Volume texture
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D3,
                        multisampled: false,
                    },
                    count: None,
                },
                // Volume sampler
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("slice pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("slice pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shaders.vertex,
                entry_point: Some(shaders.vertex_entry.as_str()),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<volslice_core::QuadVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &QUAD_ATTRIBUTES,
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shaders.fragment,
                entry_point: Some(shaders.fragment_entry.as_str()),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::SrcAlpha,
                            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                            operation: wgpu::BlendOperation::Add,
                        },
                        alpha: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::SrcAlpha,
                            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                            operation: wgpu::BlendOperation::Add,
                        },
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None, // Draw both sides
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            // No depth test: draw order composites the slices.
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        if let Some(err) = device.pop_error_scope().await {
            return Err(RenderError::PipelineCreationFailed(err.to_string()));
        }

        Ok(Self {
            pipeline,
            bind_group_layout,
        })
    }
}

/// GPU resources for drawing the slice stack.
pub struct SliceRenderData {
    /// The unit quad (6 vertices).
    pub vertex_buffer: wgpu::Buffer,
    /// Per-frame uniform buffer.
    pub frame_buffer: wgpu::Buffer,
    /// Per-slice uniforms, one aligned slot per slice.
    pub slice_buffer: wgpu::Buffer,
    /// Bind group (Group 0).
    pub bind_group: wgpu::BindGroup,
    slice_count: u32,
    slice_stride: u32,
}

impl SliceRenderData {
    /// Creates the quad, uniform buffers and bind group.
    ///
    /// Slice uniforms depend only on the stack, so they are written once here.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        pipeline: &SlicePipeline,
        volume: &VolumeTexture,
        stack: SliceStack,
    ) -> Self {
        let vertex_buffer =
            buffer::create_vertex_buffer(device, &QUAD_VERTICES, Some("slice quad vertices"));

        let frame_buffer = buffer::create_uniform_buffer(
            device,
            &FrameUniforms::default(),
            Some("slice frame uniforms"),
        );

        let slice_stride = slice_stride(device.limits().min_uniform_buffer_offset_alignment);
        let slices: Vec<SliceUniforms> = stack
            .iter()
            .map(|slice| SliceUniforms {
                model: slice.model_matrix().to_cols_array_2d(),
                profundidad: slice.depth,
                _pad: [0.0; 3],
            })
            .collect();
        let slice_bytes = buffer::pack_strided(&slices, slice_stride as usize);
        let slice_buffer = buffer::create_uniform_buffer_from_bytes(
            device,
            &slice_bytes,
            Some("slice uniforms"),
        );

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("slice bind group"),
            layout: &pipeline.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: frame_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &slice_buffer,
                        offset: 0,
                        size: NonZeroU64::new(std::mem::size_of::<SliceUniforms>() as u64),
                    }),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&volume.view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&volume.sampler),
                },
            ],
        });

        Self {
            vertex_buffer,
            frame_buffer,
            slice_buffer,
            bind_group,
            slice_count: stack.len(),
            slice_stride,
        }
    }

    /// Writes this frame's view, projection and texture rotation.
    pub fn update_frame(&self, queue: &wgpu::Queue, view: &ViewState) {
        buffer::update_buffer(queue, &self.frame_buffer, &FrameUniforms::from_view(view));
    }

    /// Number of slices drawn per frame.
    #[must_use]
    pub fn slice_count(&self) -> u32 {
        self.slice_count
    }

    /// Issues one draw per slice, in stack order.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        for i in 0..self.slice_count {
            render_pass.set_bind_group(0, &self.bind_group, &[i * self.slice_stride]);
            render_pass.draw(0..QUAD_VERTEX_COUNT, 0..1);
        }
    }

    /// Clears `target` and composites the whole stack into it.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        pipeline: &SlicePipeline,
        target: &wgpu::TextureView,
        background: Vec3,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Slice Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: f64::from(background.x),
                        g: f64::from(background.y),
                        b: f64::from(background.z),
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            ..Default::default()
        });

        render_pass.set_pipeline(&pipeline.pipeline);
        self.draw(&mut render_pass);
    }
}

/// Stride between slice uniform slots for a given offset alignment.
#[allow(clippy::cast_possible_truncation)]
fn slice_stride(alignment: u32) -> u32 {
    buffer::align_to(
        std::mem::size_of::<SliceUniforms>() as u64,
        u64::from(alignment.max(1)),
    ) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;

    #[test]
    fn test_frame_uniforms_size() {
        let size = std::mem::size_of::<FrameUniforms>();
        assert_eq!(size % 16, 0, "FrameUniforms size ({size} bytes) must be 16-byte aligned");
        // view(64) + projection(64) + ttex(64) = 192
        assert_eq!(size, 192, "FrameUniforms should be 192 bytes, got {size}");
    }

    #[test]
    fn test_slice_uniforms_size() {
        let size = std::mem::size_of::<SliceUniforms>();
        assert_eq!(size % 16, 0, "SliceUniforms size ({size} bytes) must be 16-byte aligned");
        // model(64) + profundidad(4) + pad(12) = 80
        assert_eq!(size, 80, "SliceUniforms should be 80 bytes, got {size}");
    }

    #[test]
    fn test_slice_stride_honours_alignment() {
        assert_eq!(slice_stride(256), 256);
        assert_eq!(slice_stride(64), 128);
        assert_eq!(slice_stride(16), 80);
    }

    #[test]
    fn test_default_frame_uniforms() {
        let uniforms = FrameUniforms::default();
        let ttex = Mat4::from_cols_array_2d(&uniforms.ttex);
        assert!(ttex.abs_diff_eq(Mat4::IDENTITY, 1e-6));
        let view = Mat4::from_cols_array_2d(&uniforms.view);
        assert!(view.abs_diff_eq(ViewState::view_matrix(), 0.0));
    }

    #[test]
    fn test_frame_uniforms_follow_near_plane() {
        let near = ViewState {
            near_plane: 1.2,
            ..ViewState::default()
        };
        let a = FrameUniforms::from_view(&ViewState::default());
        let b = FrameUniforms::from_view(&near);
        assert_ne!(a.projection, b.projection);
        assert_eq!(a.view, b.view);
        assert_eq!(a.ttex, b.ttex);
    }
}
