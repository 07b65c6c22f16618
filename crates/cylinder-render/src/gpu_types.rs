//! GPU-compatible data types

use bytemuck::{Pod, Zeroable};

/// Cylinder vertex: object-space position and radial unit normal
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const SIZE: usize = std::mem::size_of::<Self>();

    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::SIZE as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Per-frame uniforms consumed by `phong.wgsl`.
///
/// Field order and padding mirror the WGSL `Phong` struct; every vec3 is
/// widened to a vec4 so the host layout matches uniform address space rules.
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct PhongUniforms {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    /// World-space light position, w = 1
    pub light_position: [f32; 4],
    pub light_color: [f32; 4],
    pub material_color: [f32; 4],
    pub ambient_factor: f32,
    pub shininess: f32,
    /// `LightingFlags` bits
    pub flags: u32,
    pub _pad: u32,
}

impl PhongUniforms {
    pub const SIZE: usize = std::mem::size_of::<Self>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struct_sizes() {
        // Verify struct sizes for GPU alignment
        assert_eq!(Vertex::SIZE, 24);
        assert_eq!(PhongUniforms::SIZE, 256);
        assert_eq!(PhongUniforms::SIZE % 16, 0);
    }

    #[test]
    fn test_vertex_layout() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[1].shader_location, 1);
    }
}
