//! Procedural open-cylinder strip generation.

use glam::Vec3;

use crate::error::{RenderError, RenderResult};
use crate::gpu_types::Vertex;

/// Angular divisions used when none are requested.
pub const DEFAULT_SECTIONS: u32 = 10;

/// Fewer sections than this no longer encloses any volume.
pub const MIN_SECTIONS: u32 = 3;

/// Upper bound on angular divisions; keeps every vertex index well inside `u32`.
pub const MAX_SECTIONS: u32 = 1 << 16;

/// Open cylinder laid out as a triangle strip.
///
/// Vertices come in (top, bottom) pairs for `i in 0..=num_sections`, so even
/// indices are on the `y = +scale` rim and odd indices on `y = -scale`. The
/// last pair repeats the 0° sample, closing the strip without a seam. There
/// are no caps, so every normal is radial.
#[derive(Clone, Debug)]
pub struct CylinderMesh {
    scale: f32,
    num_sections: u32,
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
}

impl CylinderMesh {
    /// Build a cylinder of radius and half-height `scale` with the default section count.
    pub fn new(scale: f32) -> RenderResult<Self> {
        Self::with_sections(scale, DEFAULT_SECTIONS)
    }

    pub fn with_sections(scale: f32, num_sections: u32) -> RenderResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(RenderError::InvalidScale(scale));
        }
        if num_sections < MIN_SECTIONS {
            return Err(RenderError::TooFewSections(num_sections));
        }
        if num_sections > MAX_SECTIONS {
            return Err(RenderError::TooManySections(num_sections));
        }

        let count = Self::vertex_count_for(num_sections) as usize;
        let mut positions = Vec::with_capacity(count);
        let mut normals = Vec::with_capacity(count);

        for i in 0..=num_sections {
            // i == num_sections lands on 360°, which is sampled as 0° so the
            // closing pair is bit-identical to the first one.
            let degrees = 360.0 * (i % num_sections) as f32 / num_sections as f32;
            let (sin_theta, cos_theta) = degrees.to_radians().sin_cos();

            let x = scale * cos_theta;
            let z = scale * sin_theta;
            let normal = Vec3::new(cos_theta, 0.0, sin_theta).normalize().to_array();

            positions.push([x, scale, z]);
            normals.push(normal);

            positions.push([x, -scale, z]);
            normals.push(normal);
        }

        Ok(Self {
            scale,
            num_sections,
            positions,
            normals,
        })
    }

    /// `2 * (num_sections + 1)`, saturating at `u32::MAX`
    pub const fn vertex_count_for(num_sections: u32) -> u32 {
        num_sections.saturating_add(1).saturating_mul(2)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn num_sections(&self) -> u32 {
        self.num_sections
    }

    pub fn vertex_count(&self) -> u32 {
        self.positions.len() as u32
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    /// Interleave positions and normals for upload.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .map(|(&position, &normal)| Vertex { position, normal })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_count() {
        for n in [3, 4, 10, 64] {
            let mesh = CylinderMesh::with_sections(1.0, n).unwrap();
            assert_eq!(mesh.vertex_count(), 2 * n + 2);
            assert_eq!(mesh.positions().len(), mesh.normals().len());
            assert_eq!(mesh.vertices().len(), (2 * n + 2) as usize);
        }
    }

    #[test]
    fn test_default_scenario() {
        let mesh = CylinderMesh::new(1.0).unwrap();
        let p = mesh.positions();

        assert_eq!(mesh.num_sections(), 10);
        assert_eq!(p[0], [1.0, 1.0, 0.0]);
        assert_eq!(p[1], [1.0, -1.0, 0.0]);
        // Closing pair repeats the first one exactly
        assert_eq!(p[20], p[0]);
        assert_eq!(p[21], p[1]);
    }

    #[test]
    fn test_top_bottom_alternate() {
        let s = 2.5;
        let mesh = CylinderMesh::new(s).unwrap();

        for pair in mesh.positions().chunks_exact(2) {
            let (top, bottom) = (pair[0], pair[1]);
            assert_eq!(top[1], s);
            assert_eq!(bottom[1], -s);
            assert_eq!(top[0], bottom[0]);
            assert_eq!(top[2], bottom[2]);
        }
    }

    #[test]
    fn test_normals_radial_unit() {
        let mesh = CylinderMesh::with_sections(3.0, 17).unwrap();

        for (p, n) in mesh.positions().iter().zip(mesh.normals()) {
            assert_eq!(n[1], 0.0);
            let len = (n[0] * n[0] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-6);

            // Points outward along the rim radius
            let radial = Vec3::new(p[0], 0.0, p[2]).normalize();
            assert!(radial.dot(Vec3::from_array(*n)) > 0.9999);
        }
    }

    #[test]
    fn test_scaling() {
        let unit = CylinderMesh::new(1.0).unwrap();
        let scaled = CylinderMesh::new(4.0).unwrap();

        for (a, b) in unit.positions().iter().zip(scaled.positions()) {
            for k in 0..3 {
                assert!((a[k] * 4.0 - b[k]).abs() < 1e-5);
            }
        }
        assert_eq!(unit.normals(), scaled.normals());
    }

    #[test]
    fn test_quarter_turn() {
        let mesh = CylinderMesh::with_sections(1.0, 4).unwrap();
        let top = mesh.positions()[2];
        assert!(top[0].abs() < 1e-6);
        assert!((top[2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(CylinderMesh::new(0.0), Err(RenderError::InvalidScale(_))));
        assert!(matches!(CylinderMesh::new(-1.0), Err(RenderError::InvalidScale(_))));
        assert!(matches!(CylinderMesh::new(f32::NAN), Err(RenderError::InvalidScale(_))));
        assert!(matches!(
            CylinderMesh::with_sections(1.0, 2),
            Err(RenderError::TooFewSections(2))
        ));
        assert!(matches!(
            CylinderMesh::with_sections(1.0, MAX_SECTIONS + 1),
            Err(RenderError::TooManySections(_))
        ));
        assert!(matches!(
            CylinderMesh::with_sections(1.0, u32::MAX),
            Err(RenderError::TooManySections(u32::MAX))
        ));
    }

    #[test]
    fn test_largest_section_count() {
        let mesh = CylinderMesh::with_sections(1.0, MAX_SECTIONS).unwrap();
        assert_eq!(mesh.vertex_count(), 2 * MAX_SECTIONS + 2);
        assert_eq!(mesh.positions()[2 * MAX_SECTIONS as usize], mesh.positions()[0]);
        assert_eq!(CylinderMesh::vertex_count_for(u32::MAX), u32::MAX);
    }
}
