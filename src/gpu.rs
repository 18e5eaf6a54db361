use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::config::GpuConfig;

/// High-level response after a failed frame acquisition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering resumes next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Out of memory; shut down.
    Fatal,
}

pub fn surface_error_action(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        _ => SurfaceErrorAction::SkipFrame,
    }
}

/// One acquired frame. Dropping the surface texture after submission presents it.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// Window-bound graphics context: surface, device and queue.
///
/// The window must outlive this value.
pub struct GpuContext {
    surface: wgpu::Surface,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
}

impl GpuContext {
    pub async fn new(window: &Window, settings: &GpuConfig) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: settings.backends,
            ..Default::default()
        });

        let surface = unsafe { instance.create_surface(window) }
            .context("failed to create window surface")?;

        let adapter = select_adapter(&instance, &surface, settings)
            .context("no graphics adapter can present to this window")?;
        let info = adapter.get_info();
        log::info!(
            "using adapter {:?} ({:?} backend, {:?})",
            info.name,
            info.backend,
            info.device_type
        );

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("triangle device"),
                    features: wgpu::Features::empty(),
                    limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                },
                None,
            )
            .await
            .context("failed to create graphics device")?;

        install_error_callback(&device);

        let caps = surface.get_capabilities(&adapter);
        let format = choose_surface_format(&caps.formats, settings.prefer_srgb)
            .context("surface reports no supported formats")?;
        let present_mode = if caps.present_modes.contains(&settings.present_mode) {
            settings.present_mode
        } else {
            wgpu::PresentMode::Fifo
        };
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
        };
        if size.width > 0 && size.height > 0 {
            surface.configure(&device, &config);
        }
        log::info!(
            "surface {}x{} {:?} {:?}",
            config.width,
            config.height,
            format,
            present_mode
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Reconfigures the surface. A zero-sized extent is recorded but not applied.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn begin_frame(&self) -> Result<GpuFrame, wgpu::SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the frame's commands and presents it.
    pub fn present(&self, frame: GpuFrame) {
        self.queue.submit(std::iter::once(frame.encoder.finish()));
        drop(frame.view);
        frame.surface_texture.present();
    }

    pub fn handle_surface_error(&mut self, err: wgpu::SurfaceError) -> SurfaceErrorAction {
        let action = surface_error_action(&err);
        match action {
            SurfaceErrorAction::Reconfigured => {
                log::warn!("surface {:?}, reconfiguring", err);
                self.resize(self.size);
            }
            SurfaceErrorAction::SkipFrame => log::warn!("skipping frame: {}", err),
            SurfaceErrorAction::Fatal => log::error!("surface error: {}", err),
        }
        action
    }
}

/// Routes GPU errors nobody captured to stderr through the logger.
pub fn install_error_callback(device: &wgpu::Device) {
    device.on_uncaptured_error(Box::new(|error| {
        log::error!("Error: {}", error);
    }));
}

fn select_adapter(
    instance: &wgpu::Instance,
    surface: &wgpu::Surface,
    settings: &GpuConfig,
) -> Option<wgpu::Adapter> {
    let mut candidates: Vec<wgpu::Adapter> = instance
        .enumerate_adapters(settings.backends)
        .filter(|adapter| adapter.is_surface_supported(surface))
        .collect();

    for adapter in &candidates {
        log::debug!("candidate adapter: {:?}", adapter.get_info());
    }

    let preferred = candidates
        .iter()
        .position(|adapter| settings.prefer_gl && adapter.get_info().backend == wgpu::Backend::Gl);

    match preferred {
        Some(index) => Some(candidates.swap_remove(index)),
        None => {
            if settings.prefer_gl {
                log::warn!("no OpenGL adapter available, falling back");
            }
            if candidates.is_empty() {
                None
            } else {
                Some(candidates.swap_remove(0))
            }
        }
    }
}

fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|format| format.is_srgb() == prefer_srgb)
        .or_else(|| formats.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_format_preferred_by_default() {
        let formats = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Bgra8Unorm,
        ];
        assert_eq!(
            choose_surface_format(&formats, false),
            Some(wgpu::TextureFormat::Bgra8Unorm)
        );
        assert_eq!(
            choose_surface_format(&formats, true),
            Some(wgpu::TextureFormat::Bgra8UnormSrgb)
        );
    }

    #[test]
    fn falls_back_to_first_format() {
        let formats = [wgpu::TextureFormat::Rgba8UnormSrgb];
        assert_eq!(
            choose_surface_format(&formats, false),
            Some(wgpu::TextureFormat::Rgba8UnormSrgb)
        );
        assert_eq!(choose_surface_format(&[], false), None);
    }

    #[test]
    fn surface_errors_map_to_actions() {
        assert_eq!(
            surface_error_action(&wgpu::SurfaceError::Lost),
            SurfaceErrorAction::Reconfigured
        );
        assert_eq!(
            surface_error_action(&wgpu::SurfaceError::Outdated),
            SurfaceErrorAction::Reconfigured
        );
        assert_eq!(
            surface_error_action(&wgpu::SurfaceError::Timeout),
            SurfaceErrorAction::SkipFrame
        );
        assert_eq!(
            surface_error_action(&wgpu::SurfaceError::OutOfMemory),
            SurfaceErrorAction::Fatal
        );
    }
}
