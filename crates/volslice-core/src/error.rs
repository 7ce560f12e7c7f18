//! Error types for volume loading and texel expansion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a raw volume or preparing its texels.
#[derive(Error, Debug)]
pub enum VolumeError {
    /// The volume file could not be opened or read in full.
    #[error("cannot read volume file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file length does not match the expected voxel count.
    #[error("file size {actual} does not match expected size {expected}")]
    SizeMismatch { expected: u64, actual: u64 },

    /// A host buffer of the requested size could not be reserved.
    #[error("failed to allocate {bytes} bytes for {what}")]
    Allocation { what: &'static str, bytes: usize },
}

/// A specialized Result type for volume operations.
pub type Result<T> = std::result::Result<T, VolumeError>;
