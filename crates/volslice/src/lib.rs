//! volslice: an MRI raw-volume viewer.
//!
//! The viewer loads a flat 8-bit intensity volume, uploads it as an RGBA 3D
//! texture and draws it as a stack of alpha-blended slices, back to front,
//! through an orthographic camera. The keyboard rotates the texture sampling
//! coordinates and moves the near plane.
//!
//! # Quick Start
//!
//! ```no_run
//! fn main() -> volslice::Result<()> {
//!     volslice::run_app(volslice::Options::default())
//! }
//! ```
//!
//! The same scene can be rendered offscreen with [`render_to_image`].

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod app;
mod error;
mod headless;
mod scene;

pub use app::{run_app, App};
pub use error::{Result, ViewerError};
pub use headless::render_to_image;

// Re-export core types
pub use volslice_core::{
    expand_to_rgba, Options, SliceStack, Vec3, ViewCommand, ViewState, Volume, VolumeDims,
    VolumeError,
};

// Re-export render types
pub use volslice_render::{RenderEngine, RenderError};
