//! Rendering backend for volslice.
//!
//! This crate provides the wgpu side of the viewer:
//! - Device, queue and surface management ([`RenderEngine`])
//! - WGSL shader loading and compilation with captured logs
//! - The RGBA 3D volume texture
//! - The slice pipeline and per-frame slice drawing

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]

pub mod buffer;
pub mod engine;
pub mod error;
pub mod shader;
pub mod slice_render;
pub mod volume_texture;

pub use engine::{OffscreenTarget, RenderEngine};
pub use error::{RenderError, RenderResult};
pub use shader::{ShaderBuilder, ShaderModules};
pub use slice_render::{FrameUniforms, SlicePipeline, SliceRenderData, SliceUniforms};
pub use volume_texture::VolumeTexture;
