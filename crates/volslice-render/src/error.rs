//! Rendering error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while setting up or driving the GPU.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Failed to create wgpu adapter.
    #[error("failed to create graphics adapter")]
    AdapterCreationFailed,

    /// Failed to create wgpu device.
    #[error("failed to create graphics device: {0}")]
    DeviceCreationFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create surface.
    #[error("failed to create surface: {0}")]
    SurfaceCreationFailed(#[from] wgpu::CreateSurfaceError),

    /// The surface reports no usable format.
    #[error("surface is not compatible with the graphics adapter")]
    SurfaceIncompatible,

    /// A shader source file could not be read.
    #[error("failed to read shader file '{}': {source}", path.display())]
    ShaderReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A shader stage failed to compile. Carries the validation log.
    #[error("{stage} shader compilation failed:\n{log}")]
    ShaderCompilationFailed { stage: &'static str, log: String },

    /// The shader stages could not be linked into a pipeline.
    #[error("shader program linking failed:\n{0}")]
    PipelineCreationFailed(String),

    /// Texture creation or upload failed.
    #[error("texture creation failed: {0}")]
    TextureCreationFailed(String),

    /// The device ran out of memory.
    #[error("out of GPU memory while creating {0}")]
    OutOfMemory(&'static str),

    /// Mapping a readback buffer failed.
    #[error("failed to map readback buffer")]
    BufferMapFailed,
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
