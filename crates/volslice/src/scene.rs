//! GPU resources for one slice-stack scene, shared by the window and headless paths.

use pollster::FutureExt;
use volslice_core::{expand_to_rgba, Options, SliceStack, Vec3, ViewState, Volume};
use volslice_render::{RenderEngine, ShaderBuilder, SlicePipeline, SliceRenderData, VolumeTexture};

use crate::Result;

/// Reads, compiles and links the slice shaders.
pub(crate) fn compile_pipeline(engine: &RenderEngine, options: &Options) -> Result<SlicePipeline> {
    let shaders =
        ShaderBuilder::from_files(&options.vertex_shader_path, &options.fragment_shader_path)?
            .with_label("slice")
            .build(&engine.device)
            .block_on()?;
    let pipeline = SlicePipeline::new(&engine.device, &shaders, engine.color_format()).block_on()?;
    Ok(pipeline)
}

/// Everything drawn each frame.
///
/// Fields drop in declaration order: slice buffers, then the volume texture,
/// then the pipeline.
pub(crate) struct Scene {
    pub(crate) slices: SliceRenderData,
    pub(crate) volume_texture: VolumeTexture,
    pub(crate) pipeline: SlicePipeline,
}

impl Scene {
    /// Uploads `volume` and lays out `slice_count` slices for `pipeline`.
    pub(crate) fn new(
        engine: &RenderEngine,
        pipeline: SlicePipeline,
        volume: &Volume,
        slice_count: u32,
    ) -> Result<Self> {
        let volume_texture = {
            // The expanded host copy only lives until the upload is queued.
            let rgba = expand_to_rgba(volume.as_bytes())?;
            VolumeTexture::new(
                &engine.device,
                &engine.queue,
                volume.dims(),
                &rgba,
                engine.clamp_to_border,
            )
            .block_on()?
        };

        let slices = SliceRenderData::new(
            &engine.device,
            &pipeline,
            &volume_texture,
            SliceStack::new(slice_count),
        );

        Ok(Self {
            slices,
            volume_texture,
            pipeline,
        })
    }

    /// Clears `target` to `background` and composites the slice stack for `view`.
    pub(crate) fn render(
        &self,
        engine: &RenderEngine,
        view: &ViewState,
        target: &wgpu::TextureView,
        background: Vec3,
    ) {
        self.slices.update_frame(&engine.queue, view);

        let mut encoder = engine
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("slice frame encoder"),
            });
        self.slices
            .render(&mut encoder, &self.pipeline, target, background);
        engine.queue.submit(std::iter::once(encoder.finish()));
    }
}
