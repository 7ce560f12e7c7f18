use super::App;

impl App {
    /// Draws one frame into the window surface.
    ///
    /// Returns `false` when the surface can no longer be used and the viewer
    /// should exit.
    pub(super) fn render(&mut self) -> bool {
        let (Some(engine), Some(scene)) = (&mut self.engine, &self.scene) else {
            return true;
        };
        let Some(surface) = engine.surface.as_ref() else {
            return true;
        };

        let output = match surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                engine.reconfigure();
                return true;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory");
                return false;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timeout");
                return true;
            }
            Err(wgpu::SurfaceError::Other) => {
                log::warn!("Surface error: other");
                return true;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        scene.render(engine, &self.view, &view, self.options.background_color);
        output.present();
        true
    }
}
