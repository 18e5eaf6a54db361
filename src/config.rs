use crate::logging::LoggingConfig;

pub const WINDOW_TITLE: &str = "MMO-Engine-TestBuild v.Init";
pub const WINDOW_WIDTH: u32 = 1920;
pub const WINDOW_HEIGHT: u32 = 1080;

/// RGBA clear color applied at the start of every frame.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.2,
    g: 0.3,
    b: 0.3,
    a: 1.0,
};

/// Parameters for the graphics context.
#[derive(Debug, Clone)]
pub struct GpuConfig {
    /// Backends considered during adapter selection.
    pub backends: wgpu::Backends,

    /// Pick an OpenGL adapter whenever one can present to the window.
    pub prefer_gl: bool,

    /// Prefer an sRGB surface format when available.
    ///
    /// Off by default: the clear color is given in raw framebuffer values.
    pub prefer_srgb: bool,

    pub present_mode: wgpu::PresentMode,
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            prefer_gl: true,
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
        }
    }
}

impl GpuConfig {
    /// Default settings, with the backend set narrowed by `WGPU_BACKEND` if present.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(backends) = wgpu::util::backend_bits_from_env() {
            config.backends = backends;
        }
        config
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub clear_color: wgpu::Color,
    pub gpu: GpuConfig,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: WINDOW_TITLE.to_string(),
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            clear_color: CLEAR_COLOR,
            gpu: GpuConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            gpu: GpuConfig::from_env(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_window() {
        let config = AppConfig::default();
        assert_eq!(config.title, "MMO-Engine-TestBuild v.Init");
        assert_eq!((config.width, config.height), (1920, 1080));
        assert_eq!(config.clear_color, CLEAR_COLOR);
        assert!(config.gpu.prefer_gl);
        assert!(!config.gpu.prefer_srgb);
    }
}
