//! Texel expansion for the volume texture.

use crate::error::{Result, VolumeError};

/// Channels per texel in the uploaded texture (RGBA).
pub const CHANNELS: usize = 4;

/// Replicates each intensity into all four RGBA channels.
///
/// Intensity drives both the gray level and the blending opacity of a voxel, so
/// byte `i` of the input lands at `4i..4i+4` of the output.
pub fn expand_to_rgba(intensities: &[u8]) -> Result<Vec<u8>> {
    let bytes = intensities
        .len()
        .checked_mul(CHANNELS)
        .ok_or(VolumeError::Allocation {
            what: "RGBA texel buffer",
            bytes: usize::MAX,
        })?;

    let mut rgba = Vec::new();
    rgba.try_reserve_exact(bytes)
        .map_err(|_| VolumeError::Allocation {
            what: "RGBA texel buffer",
            bytes,
        })?;
    rgba.extend(intensities.iter().flat_map(|&v| [v; CHANNELS]));

    Ok(rgba)
}
