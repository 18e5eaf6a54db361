//! Opens a window and draws one hardcoded triangle with a fixed GLSL shader
//! pair until the window is closed or escape is pressed.
//!
//! The OpenGL backend is preferred whenever the platform offers it.

pub mod app;
pub mod config;
pub mod frame_loop;
pub mod geometry;
pub mod gpu;
pub mod logging;
pub mod renderer;
pub mod shader;
pub mod vertex_data;

pub use app::{run, EXIT_FAILURE};
pub use config::{AppConfig, GpuConfig, CLEAR_COLOR};
pub use frame_loop::{FrameLoop, LoopState, Viewport, WindowAction};
pub use geometry::{AllocationCounters, TriangleGeometry};
pub use renderer::Renderer;
pub use shader::{compile_shader, CompileStatus, ShaderError, ShaderProgram, ShaderStage};
