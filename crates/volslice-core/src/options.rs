//! Configuration options for the viewer.
//!
//! Everything here is fixed at compile time; the viewer takes no arguments and
//! reads no configuration file. The struct exists so the startup sequence and the
//! headless renderer can be pointed at other inputs in tests.

use std::path::PathBuf;

use glam::Vec3;

use crate::slices::SLICE_COUNT;
use crate::volume::VolumeDims;

/// File name of the bundled MRI head dataset.
pub const DATA_FILENAME: &str = "head256x256x109";

/// Viewer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Window title.
    pub window_title: String,

    /// Initial window width in logical pixels.
    pub window_width: u32,

    /// Initial window height in logical pixels.
    pub window_height: u32,

    /// Path of the raw intensity volume.
    pub data_path: PathBuf,

    /// Expected volume dimensions.
    pub dims: VolumeDims,

    /// Path of the vertex stage WGSL source.
    pub vertex_shader_path: PathBuf,

    /// Path of the fragment stage WGSL source.
    pub fragment_shader_path: PathBuf,

    /// Clear color.
    pub background_color: Vec3,

    /// Number of slices drawn per frame.
    pub slice_count: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            window_title: "MRI Volume Viewer".to_string(),
            window_width: 800,
            window_height: 600,
            data_path: PathBuf::from(DATA_FILENAME),
            dims: VolumeDims::HEAD,
            vertex_shader_path: PathBuf::from("shaders/slice.vert.wgsl"),
            fragment_shader_path: PathBuf::from("shaders/slice.frag.wgsl"),
            background_color: Vec3::new(0.1, 0.1, 0.1),
            slice_count: SLICE_COUNT,
        }
    }
}
