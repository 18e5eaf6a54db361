//! GLSL shader compilation and program linking.
//!
//! GLSL is parsed up front so syntax errors become an info log instead of a
//! panic inside wgpu. The parsed module is then handed to the device inside a
//! validation error scope: an empty scope means success, otherwise the captured
//! error text is the info log. Linking is checked the same way.

use std::borrow::Cow;
use std::fmt;

// The GLSL front end only accepts 440, 450 and 460.
pub const VERTEX_SHADER_SOURCE: &str = "#version 450 core
layout (location = 0) in vec3 aPos;
void main()
{
   gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
";

pub const FRAGMENT_SHADER_SOURCE: &str = "#version 450 core
layout (location = 0) out vec4 FragColor;

void main()
{
    FragColor = vec4(1.0, 0.5, 0.2, 1.0);
}
";

/// Size of the info log buffer, terminator included.
pub const INFO_LOG_CAPACITY: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn naga_stage(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }

    fn label(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "Vertex Shader",
            ShaderStage::Fragment => "Fragment Shader",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    Compile { stage: ShaderStage, info_log: String },
    Link { info_log: String },
}

impl ShaderError {
    pub fn info_log(&self) -> &str {
        match self {
            ShaderError::Compile { info_log, .. } | ShaderError::Link { info_log } => info_log,
        }
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { stage, info_log } => {
                write!(f, "GLSL: {} shader compilation failed!\n{}", stage, info_log)
            }
            ShaderError::Link { info_log } => {
                write!(f, "Shader program: linking failed!\n{}", info_log)
            }
        }
    }
}

impl std::error::Error for ShaderError {}

/// Clips a diagnostic to what fits in the info log buffer.
pub fn truncate_info_log(log: &str) -> String {
    let max = INFO_LOG_CAPACITY - 1;
    if log.len() <= max {
        return log.to_string();
    }
    let mut end = max;
    while !log.is_char_boundary(end) {
        end -= 1;
    }
    log[..end].to_string()
}

fn scope_result(error: Option<wgpu::Error>) -> (bool, String) {
    match error {
        None => (true, String::new()),
        Some(error) => {
            let text = error.to_string();
            let text = if text.trim().is_empty() {
                format!("{:?}", error)
            } else {
                text
            };
            (false, truncate_info_log(&text))
        }
    }
}

/// Result of compiling one shader stage.
///
/// `module` is absent when the source did not parse, and unusable when
/// `success` is false.
pub struct CompileStatus {
    pub stage: ShaderStage,
    pub success: bool,
    pub info_log: String,
    module: Option<wgpu::ShaderModule>,
}

impl CompileStatus {
    pub fn module(&self) -> Option<&wgpu::ShaderModule> {
        self.module.as_ref()
    }

    /// Hands out the module of a successful compile.
    pub fn into_result(self) -> Result<wgpu::ShaderModule, ShaderError> {
        match self.module {
            Some(module) if self.success => Ok(module),
            _ => Err(ShaderError::Compile {
                stage: self.stage,
                info_log: self.info_log,
            }),
        }
    }
}

/// Runs the GLSL front end over `source`, joining every error into one log.
pub fn parse_glsl(stage: ShaderStage, source: &str) -> Result<naga::Module, String> {
    let options = naga::front::glsl::Options {
        stage: stage.naga_stage(),
        defines: Default::default(),
    };
    naga::front::glsl::Frontend::default()
        .parse(&options, source)
        .map_err(|errors| {
            let log = errors
                .iter()
                .map(|error| format!("ERROR: {}", error.kind))
                .collect::<Vec<_>>()
                .join("\n");
            if log.is_empty() {
                format!("{} shader failed to parse", stage)
            } else {
                truncate_info_log(&log)
            }
        })
}

pub fn compile_shader(device: &wgpu::Device, stage: ShaderStage, source: &str) -> CompileStatus {
    let (success, info_log, module) = match parse_glsl(stage, source) {
        Ok(parsed) => {
            device.push_error_scope(wgpu::ErrorFilter::Validation);
            let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(stage.label()),
                source: wgpu::ShaderSource::Naga(Cow::Owned(parsed)),
            });
            let (success, info_log) = scope_result(pollster::block_on(device.pop_error_scope()));
            (success, info_log, Some(module))
        }
        Err(info_log) => (false, info_log, None),
    };

    if success {
        log::debug!("{} shader compiled", stage);
    } else {
        log::debug!("{} shader failed to compile: {}", stage, info_log);
    }

    CompileStatus {
        stage,
        success,
        info_log,
        module,
    }
}

/// The linked vertex + fragment pair, drawn as a triangle list.
pub struct ShaderProgram {
    pipeline: wgpu::RenderPipeline,
}

impl ShaderProgram {
    /// Compiles and links the built-in triangle shaders.
    pub fn new(
        device: &wgpu::Device,
        vertex_layout: &wgpu::VertexBufferLayout<'_>,
        format: wgpu::TextureFormat,
    ) -> Result<Self, ShaderError> {
        Self::from_sources(
            device,
            VERTEX_SHADER_SOURCE,
            FRAGMENT_SHADER_SOURCE,
            vertex_layout,
            format,
        )
    }

    pub fn from_sources(
        device: &wgpu::Device,
        vertex_source: &str,
        fragment_source: &str,
        vertex_layout: &wgpu::VertexBufferLayout<'_>,
        format: wgpu::TextureFormat,
    ) -> Result<Self, ShaderError> {
        let vertex = compile_shader(device, ShaderStage::Vertex, vertex_source);
        let fragment = compile_shader(device, ShaderStage::Fragment, fragment_source);
        Self::link(device, vertex, fragment, vertex_layout, format)
    }

    /// Links two compiled stages. Both shader modules are dropped once the
    /// pipeline exists.
    pub fn link(
        device: &wgpu::Device,
        vertex: CompileStatus,
        fragment: CompileStatus,
        vertex_layout: &wgpu::VertexBufferLayout<'_>,
        format: wgpu::TextureFormat,
    ) -> Result<Self, ShaderError> {
        let vertex = vertex.into_result()?;
        let fragment = fragment.into_result()?;

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shader Program Layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Shader Program"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex,
                entry_point: "main",
                buffers: std::slice::from_ref(vertex_layout),
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment,
                entry_point: "main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let (success, info_log) = scope_result(pollster::block_on(device.pop_error_scope()));
        if !success {
            return Err(ShaderError::Link { info_log });
        }

        log::info!("shader program linked for {:?}", format);
        Ok(Self { pipeline })
    }

    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }
}
