//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    /// Charge gauge stroke (#fae8e8)
    pub const GAUGE: [f32; 4] = [
        0xfa as f32 / 255.0,
        0xe8 as f32 / 255.0,
        0xe8 as f32 / 255.0,
        1.0,
    ];
    /// Title and game-over text (#000050)
    pub const TEXT: [f32; 4] = [0.0, 0.0, 0x50 as f32 / 255.0, 1.0];
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_matches_struct() {
        let layout = Vertex::desc();
        assert_eq!(layout.array_stride as usize, 24);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(bytemuck::bytes_of(&Vertex::new(1.0, 2.0, colors::WHITE)).len(), 24);
    }

    #[test]
    fn test_gauge_geometry_uploads_whole_vertices() {
        let verts = crate::renderer::shapes::stroke_arc(
            glam::Vec2::new(170.0, 340.0),
            80.0,
            0.0,
            1.0,
            5.0,
            colors::GAUGE,
        );
        let bytes: &[u8] = bytemuck::cast_slice(&verts[..]);
        let stride = Vertex::desc().array_stride as usize;
        assert_eq!(bytes.len() % stride, 0);
        assert_eq!(bytes.len() / stride, verts.len());
        // Colour follows the position, matching the second attribute's offset
        let offset = Vertex::desc().attributes[1].offset as usize;
        let color: &[f32] = bytemuck::cast_slice(&bytes[offset..offset + 16]);
        assert_eq!(color, &colors::GAUGE);
    }
}
