use bytemuck::{Pod, Zeroable};

/// Interleaved vertex as uploaded to the GPU: position then color, 6 floats.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// The one shape this program draws.
pub const TRIANGLE: [Vertex; 3] = [
    Vertex { pos: [-0.20, -0.20, 0.00], color: [1.0, 0.0, 0.0] },
    Vertex { pos: [0.20, -0.20, 0.00], color: [0.0, 1.0, 0.0] },
    Vertex { pos: [0.00, 0.25, 0.00], color: [0.0, 0.0, 1.0] },
];

/// Largest distance from the origin to any vertex, measured in the XY plane.
pub fn max_extent(vertices: &[Vertex]) -> f32 {
    vertices
        .iter()
        .map(|v| v.pos[0].hypot(v.pos[1]))
        .fold(0.0, f32::max)
}

/// How far the origin may travel from the center before the shape could leave the unit square.
pub fn margin(vertices: &[Vertex]) -> f32 {
    1.0 - max_extent(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_of_triangle() {
        // base corners sit at sqrt(0.08), farther out than the apex at 0.25
        let extent = max_extent(&TRIANGLE);
        let corner = 0.20f32.hypot(0.20);
        assert!((extent - corner).abs() < 1e-6);
        assert!((margin(&TRIANGLE) - (1.0 - corner)).abs() < 1e-6);
    }

    #[test]
    fn test_stride_is_six_floats() {
        assert_eq!(std::mem::size_of::<Vertex>(), 6 * std::mem::size_of::<f32>());
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[1].shader_location, 1);
    }

    #[test]
    fn test_empty_geometry_has_full_margin() {
        assert_eq!(margin(&[]), 1.0);
    }
}
