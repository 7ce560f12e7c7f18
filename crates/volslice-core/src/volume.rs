//! Raw intensity volume loading.
//!
//! The on-disk format is a flat run of unsigned bytes, one per voxel, with x
//! varying fastest, then y, then z. There is no header; the dimensions are known
//! ahead of time and the file length must match them exactly.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, VolumeError};

/// Dimensions of a voxel grid, in voxels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeDims {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl VolumeDims {
    /// The MRI head dataset shipped with the viewer.
    pub const HEAD: Self = Self::new(256, 256, 109);

    #[must_use]
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Number of voxels, which is also the expected file length in bytes.
    #[must_use]
    pub const fn voxel_count(self) -> u64 {
        self.width as u64 * self.height as u64 * self.depth as u64
    }

    /// Linear offset of voxel `(x, y, z)` in the flat buffer.
    #[must_use]
    pub const fn index(self, x: u32, y: u32, z: u32) -> u64 {
        (z as u64 * self.height as u64 + y as u64) * self.width as u64 + x as u64
    }
}

impl Default for VolumeDims {
    fn default() -> Self {
        Self::HEAD
    }
}

/// An 8-bit intensity volume held in memory.
///
/// Invariant: `data.len() == dims.voxel_count()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    dims: VolumeDims,
    data: Vec<u8>,
}

impl Volume {
    /// Reads a raw volume of the given dimensions from `path`.
    ///
    /// Fails with [`VolumeError::SizeMismatch`] before reading anything when the
    /// file length differs from the voxel count, and with [`VolumeError::Io`] when
    /// the file cannot be opened or comes up short.
    pub fn load(path: impl AsRef<Path>, dims: VolumeDims) -> Result<Self> {
        let path = path.as_ref();
        let io_error = |source| VolumeError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_error)?;
        let actual = file.metadata().map_err(io_error)?.len();
        let expected = dims.voxel_count();
        if actual != expected {
            return Err(VolumeError::SizeMismatch { expected, actual });
        }

        let len = usize::try_from(expected).map_err(|_| VolumeError::Allocation {
            what: "raw volume buffer",
            bytes: usize::MAX,
        })?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| VolumeError::Allocation {
                what: "raw volume buffer",
                bytes: len,
            })?;
        data.resize(len, 0);
        file.read_exact(&mut data).map_err(io_error)?;

        log::info!(
            "Volume data '{}' loaded successfully. Size: {} bytes.",
            path.display(),
            data.len()
        );

        Ok(Self { dims, data })
    }

    /// Wraps an in-memory buffer, checking it against `dims`.
    pub fn from_bytes(dims: VolumeDims, data: Vec<u8>) -> Result<Self> {
        let expected = dims.voxel_count();
        let actual = data.len() as u64;
        if actual != expected {
            return Err(VolumeError::SizeMismatch { expected, actual });
        }
        Ok(Self { dims, data })
    }

    #[must_use]
    pub fn dims(&self) -> VolumeDims {
        self.dims
    }

    /// The voxel intensities in file order.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Intensity at `(x, y, z)`, or `None` outside the grid.
    #[must_use]
    pub fn voxel(&self, x: u32, y: u32, z: u32) -> Option<u8> {
        if x >= self.dims.width || y >= self.dims.height || z >= self.dims.depth {
            return None;
        }
        let index = usize::try_from(self.dims.index(x, y, z)).ok()?;
        self.data.get(index).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_dims_voxel_count() {
        // 256 * 256 * 109
        assert_eq!(VolumeDims::HEAD.voxel_count(), 7_143_424);
        assert_eq!(VolumeDims::default(), VolumeDims::HEAD);
    }

    #[test]
    fn test_index_is_x_fastest() {
        let dims = VolumeDims::new(4, 3, 2);
        assert_eq!(dims.index(0, 0, 0), 0);
        assert_eq!(dims.index(1, 0, 0), 1);
        assert_eq!(dims.index(0, 1, 0), 4);
        assert_eq!(dims.index(0, 0, 1), 12);
        assert_eq!(dims.index(3, 2, 1), 23);
    }

    #[test]
    fn test_from_bytes_checks_length() {
        let dims = VolumeDims::new(2, 2, 2);
        assert!(Volume::from_bytes(dims, vec![0; 8]).is_ok());

        let err = Volume::from_bytes(dims, vec![0; 7]).unwrap_err();
        assert!(matches!(
            err,
            VolumeError::SizeMismatch {
                expected: 8,
                actual: 7
            }
        ));
    }

    #[test]
    fn test_voxel_lookup() {
        let dims = VolumeDims::new(2, 2, 2);
        let volume = Volume::from_bytes(dims, (0..8).collect()).unwrap();
        assert_eq!(volume.voxel(1, 0, 0), Some(1));
        assert_eq!(volume.voxel(0, 1, 0), Some(2));
        assert_eq!(volume.voxel(1, 1, 1), Some(7));
        assert_eq!(volume.voxel(2, 0, 0), None);
        assert_eq!(volume.len(), 8);
        assert!(!volume.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("volslice_definitely_missing_volume.raw");
        let err = Volume::load(&path, VolumeDims::new(1, 1, 1)).unwrap_err();
        assert!(matches!(err, VolumeError::Io { .. }));
    }
}
