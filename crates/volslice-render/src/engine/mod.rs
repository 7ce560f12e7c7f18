//! The wgpu device, queue and presentation surface.

mod readback;

use std::sync::Arc;

use crate::error::{RenderError, RenderResult};

pub use readback::OffscreenTarget;

/// Owns the wgpu objects shared by every other render resource.
pub struct RenderEngine {
    /// The render surface (None for headless).
    pub surface: Option<wgpu::Surface<'static>>,
    /// The wgpu device.
    pub device: wgpu::Device,
    /// The wgpu queue.
    pub queue: wgpu::Queue,
    /// The wgpu adapter.
    pub adapter: wgpu::Adapter,
    /// The wgpu instance.
    pub instance: wgpu::Instance,
    /// Surface configuration. Headless engines keep one too, describing the offscreen target.
    pub surface_config: wgpu::SurfaceConfiguration,
    /// Whether samplers may use `ClampToBorder`.
    pub clamp_to_border: bool,
    /// Current viewport width.
    pub width: u32,
    /// Current viewport height.
    pub height: u32,
}

impl RenderEngine {
    /// Creates a new windowed render engine.
    pub async fn new_windowed(window: Arc<winit::window::Window>) -> RenderResult<Self> {
        let instance = Self::create_instance();
        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| RenderError::AdapterCreationFailed)?;

        let (device, queue, clamp_to_border) =
            Self::open_device(&adapter, "volslice device").await?;

        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        let surface_caps = surface.get_capabilities(&adapter);
        // Slices blend in display space, as on a plain framebuffer, so prefer a
        // non-sRGB target.
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderError::SurfaceIncompatible)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        Ok(Self {
            surface: Some(surface),
            device,
            queue,
            adapter,
            instance,
            surface_config,
            clamp_to_border,
            width,
            height,
        })
    }

    /// Creates a new headless render engine rendering into `width` x `height` targets.
    pub async fn new_headless(width: u32, height: u32) -> RenderResult<Self> {
        let instance = Self::create_instance();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| RenderError::AdapterCreationFailed)?;

        let (device, queue, clamp_to_border) =
            Self::open_device(&adapter, "volslice device (headless)").await?;

        let width = width.max(1);
        let height = height.max(1);
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            format: wgpu::TextureFormat::Rgba8Unorm,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        Ok(Self {
            surface: None,
            device,
            queue,
            adapter,
            instance,
            surface_config,
            clamp_to_border,
            width,
            height,
        })
    }

    fn create_instance() -> wgpu::Instance {
        wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..wgpu::InstanceDescriptor::default()
        })
    }

    async fn open_device(
        adapter: &wgpu::Adapter,
        label: &str,
    ) -> RenderResult<(wgpu::Device, wgpu::Queue, bool)> {
        let info = adapter.get_info();
        log::info!("Graphics adapter: {} ({:?})", info.name, info.backend);

        let clamp_to_border = adapter
            .features()
            .contains(wgpu::Features::ADDRESS_MODE_CLAMP_TO_BORDER);
        let required_features = if clamp_to_border {
            wgpu::Features::ADDRESS_MODE_CLAMP_TO_BORDER
        } else {
            log::warn!("Adapter lacks clamp-to-border sampling; border is handled in the shader");
            wgpu::Features::empty()
        };

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some(label),
                required_features,
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
            })
            .await?;

        Ok((device, queue, clamp_to_border))
    }

    /// Color format of the presentation (or offscreen) target.
    #[must_use]
    pub fn color_format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }

    /// Resizes the render target.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.width = width;
        self.height = height;
        self.surface_config.width = width;
        self.surface_config.height = height;

        if let Some(ref surface) = self.surface {
            surface.configure(&self.device, &self.surface_config);
        }
    }

    /// Reconfigures the surface at its current size, after it was lost or outdated.
    pub fn reconfigure(&mut self) {
        self.resize(self.width, self.height);
    }
}
