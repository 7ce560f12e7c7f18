//! Error types for the viewer application.

use thiserror::Error;
use volslice_core::VolumeError;
use volslice_render::RenderError;

/// Any failure that aborts viewer startup.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// The event loop could not be created or run.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// The window could not be created.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    /// GPU setup, shader or texture failure.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The volume file could not be loaded or expanded.
    #[error(transparent)]
    Volume(#[from] VolumeError),
}

/// A specialized Result type for viewer operations.
pub type Result<T> = std::result::Result<T, ViewerError>;
