use std::sync::Arc;

use pollster::FutureExt;
use winit::{dpi::LogicalSize, event_loop::ActiveEventLoop, window::Window};

use volslice_core::Volume;
use volslice_render::RenderEngine;

use super::App;
use crate::scene::{self, Scene};
use crate::Result;

const CONTROLS_BANNER: &str = "\
Controls:
  S / A       move the near plane in / out
  Arrow keys  rotate the volume
  R           reset the view
  Esc         exit";

impl App {
    /// Creates the window and every GPU resource, in dependency order.
    ///
    /// Each stage is stored on `self` as soon as it exists, so a failure in a
    /// later stage still releases the earlier ones through `Drop`.
    pub(super) fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title(self.options.window_title.as_str())
            .with_inner_size(LogicalSize::new(
                self.options.window_width,
                self.options.window_height,
            ));
        let window = Arc::new(event_loop.create_window(window_attributes)?);
        self.window = Some(window.clone());

        let engine = RenderEngine::new_windowed(window).block_on()?;
        let engine = self.engine.insert(engine);

        let pipeline = scene::compile_pipeline(engine, &self.options)?;
        let volume = Volume::load(&self.options.data_path, self.options.dims)?;
        let scene = Scene::new(engine, pipeline, &volume, self.options.slice_count)?;
        log::debug!(
            "Slice stack ready: {} slices through a {}x{}x{} texture",
            scene.slices.slice_count(),
            scene.volume_texture.dims.width,
            scene.volume_texture.dims.height,
            scene.volume_texture.dims.depth,
        );
        self.scene = Some(scene);

        println!("{CONTROLS_BANNER}");
        Ok(())
    }
}
