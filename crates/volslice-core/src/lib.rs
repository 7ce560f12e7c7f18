//! Core types for volslice.
//!
//! This crate holds everything that does not touch the GPU:
//! - [`Volume`] loading from a flat raw intensity file
//! - [`expand_to_rgba`] texel expansion for the 3D texture upload
//! - [`ViewState`] and the [`ViewCommand`] key table
//! - Slice stack geometry ([`SliceStack`], [`QUAD_VERTICES`])
//! - Compile-time [`Options`]

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod options;
pub mod slices;
pub mod texels;
pub mod view;
pub mod volume;

pub use error::{Result, VolumeError};
pub use options::Options;
pub use slices::{QuadVertex, Slice, SliceStack, QUAD_VERTICES};
pub use texels::expand_to_rgba;
pub use view::{ViewCommand, ViewState};
pub use volume::{Volume, VolumeDims};

// Re-export glam types for convenience
pub use glam::{Mat4, Vec3};
