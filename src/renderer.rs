use crate::frame_loop::Viewport;
use crate::geometry::{AllocationCounters, TriangleGeometry};
use crate::shader::{ShaderError, ShaderProgram};

/// Everything a frame needs: the linked program, the uploaded triangle and
/// the clear color. Built once, then borrowed by every frame.
pub struct Renderer {
    program: ShaderProgram,
    geometry: TriangleGeometry,
    clear_color: wgpu::Color,
}

impl Renderer {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        clear_color: wgpu::Color,
    ) -> Result<Self, ShaderError> {
        let geometry = TriangleGeometry::upload(device);
        let program = ShaderProgram::new(device, geometry.layout(), format)?;

        Ok(Self {
            program,
            geometry,
            clear_color,
        })
    }

    pub fn counters(&self) -> AllocationCounters {
        self.geometry.counters()
    }

    fn begin_pass<'a>(
        &self,
        encoder: &'a mut wgpu::CommandEncoder,
        view: &'a wgpu::TextureView,
    ) -> wgpu::RenderPass<'a> {
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Triangle Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: true,
                },
            })],
            depth_stencil_attachment: None,
        })
    }

    /// Records a pass that only clears `view`.
    pub fn clear(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let _pass = self.begin_pass(encoder, view);
    }

    /// Records clear + one draw of the triangle into `view`.
    pub fn draw<'a>(
        &'a self,
        encoder: &'a mut wgpu::CommandEncoder,
        view: &'a wgpu::TextureView,
        viewport: Viewport,
    ) {
        let mut render_pass = self.begin_pass(encoder, view);
        if viewport.is_empty() {
            return;
        }

        render_pass.set_viewport(
            viewport.x as f32,
            viewport.y as f32,
            viewport.width as f32,
            viewport.height as f32,
            0.0,
            1.0,
        );
        render_pass.set_pipeline(self.program.pipeline());
        render_pass.set_vertex_buffer(0, self.geometry.vertex_buffer().slice(..));
        render_pass.draw(0..self.geometry.vertex_count(), 0..1);
    }
}
