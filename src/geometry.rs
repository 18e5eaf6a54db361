use bytemuck::cast_slice;
use wgpu::util::DeviceExt;

use crate::vertex_data::{Vertex, TRIANGLE_VERTICES};

/// Counts of GPU objects allocated for geometry over the program's lifetime.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AllocationCounters {
    pub vertex_arrays: u32,
    pub vertex_buffers: u32,
}

/// The triangle's vertex buffer and its layout, uploaded once at setup.
pub struct TriangleGeometry {
    vertex_buffer: wgpu::Buffer,
    layout: wgpu::VertexBufferLayout<'static>,
    vertex_count: u32,
    counters: AllocationCounters,
}

impl TriangleGeometry {
    pub fn upload(device: &wgpu::Device) -> Self {
        let mut counters = AllocationCounters::default();

        let layout = Vertex::layout();
        counters.vertex_arrays += 1;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Triangle Vertex Buffer"),
            contents: cast_slice(&TRIANGLE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        counters.vertex_buffers += 1;

        log::debug!(
            "uploaded {} vertices ({} bytes)",
            TRIANGLE_VERTICES.len(),
            vertex_buffer.size()
        );

        Self {
            vertex_buffer,
            layout,
            vertex_count: TRIANGLE_VERTICES.len() as u32,
            counters,
        }
    }

    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    pub fn layout(&self) -> &wgpu::VertexBufferLayout<'static> {
        &self.layout
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn counters(&self) -> AllocationCounters {
        self.counters
    }
}
