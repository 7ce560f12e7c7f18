//! Headless rendering API.
//!
//! Renders the slice stack to an RGBA pixel buffer without opening a window.
//! Useful for integration tests and for inspecting a view programmatically.

use pollster::FutureExt;
use volslice_core::{Options, ViewState, Volume};
use volslice_render::RenderEngine;

use crate::scene::{self, Scene};
use crate::Result;

/// Renders one frame of `volume` seen through `view` to a raw RGBA pixel buffer.
///
/// Creates a headless GPU context, compiles the shaders named in `options`,
/// uploads the volume and composites `options.slice_count` slices over
/// `options.background_color`. The returned buffer holds `width * height * 4`
/// bytes, ordered row by row from the top-left pixel.
///
/// # Example
/// ```no_run
/// use volslice::{render_to_image, Options, ViewState, Volume};
///
/// let options = Options::default();
/// let volume = Volume::load(&options.data_path, options.dims).unwrap();
/// let pixels = render_to_image(&options, &volume, &ViewState::default(), 256, 256).unwrap();
/// assert_eq!(pixels.len(), 256 * 256 * 4);
/// ```
pub fn render_to_image(
    options: &Options,
    volume: &Volume,
    view: &ViewState,
    width: u32,
    height: u32,
) -> Result<Vec<u8>> {
    let engine = RenderEngine::new_headless(width, height).block_on()?;
    let pipeline = scene::compile_pipeline(&engine, options)?;
    let scene = Scene::new(&engine, pipeline, volume, options.slice_count)?;

    let target = engine.create_offscreen_target();
    scene.render(&engine, view, &target.view, options.background_color);
    let pixels = engine.read_offscreen_target(&target)?;
    Ok(pixels)
}
