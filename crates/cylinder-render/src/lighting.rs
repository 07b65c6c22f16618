//! Lighting configuration, component toggles, and a CPU mirror of the
//! per-vertex Phong equation in `phong.wgsl`.

use std::ops::{BitOr, BitOrAssign};
use std::path::Path;

use glam::{Mat4, Vec3, Vec4Swizzles};
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// Light and material constants applied to every draw.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub light_color: [f32; 3],
    /// Fraction of the material color lit by ambient light
    pub ambient_factor: f32,
    pub material_color: [f32; 3],
    /// Specular exponent
    pub shininess: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            light_color: [1.0, 1.0, 1.0],
            ambient_factor: 0.3,
            // semi-shiny red
            material_color: [1.0, 0.0, 0.0],
            shininess: 50.0,
        }
    }
}

impl LightingConfig {
    /// Parse a JSON object; missing fields keep their defaults.
    pub fn from_json(json: &str) -> RenderResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Every term must be finite and non-negative.
    pub fn validate(&self) -> RenderResult<()> {
        let [lr, lg, lb] = self.light_color;
        let [mr, mg, mb] = self.material_color;
        let fields = [
            ("light_color", lr),
            ("light_color", lg),
            ("light_color", lb),
            ("ambient_factor", self.ambient_factor),
            ("material_color", mr),
            ("material_color", mg),
            ("material_color", mb),
            ("shininess", self.shininess),
        ];

        match fields.into_iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            Some((field, value)) => Err(RenderError::InvalidLighting { field, value }),
            None => Ok(()),
        }
    }

    pub fn load(path: &Path) -> RenderResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// Which Phong terms contribute to the final color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LightingFlags(u32);

impl LightingFlags {
    pub const NONE: Self = Self(0);
    pub const AMBIENT: Self = Self(1 << 0);
    pub const DIFFUSE: Self = Self(1 << 1);
    pub const SPECULAR: Self = Self(1 << 2);
    pub const ALL: Self = Self(Self::AMBIENT.0 | Self::DIFFUSE.0 | Self::SPECULAR.0);

    pub fn from_toggles(ambient_on: bool, diffuse_on: bool, specular_on: bool) -> Self {
        let mut flags = Self::NONE;
        if ambient_on {
            flags |= Self::AMBIENT;
        }
        if diffuse_on {
            flags |= Self::DIFFUSE;
        }
        if specular_on {
            flags |= Self::SPECULAR;
        }
        flags
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for LightingFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for LightingFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Everything the vertex stage reads besides the vertex itself.
#[derive(Clone, Copy, Debug)]
pub struct ShadingInputs {
    pub view: Mat4,
    pub model: Mat4,
    pub light_position: Vec3,
    pub config: LightingConfig,
    pub flags: LightingFlags,
}

/// Gouraud color of one vertex, following the vertex shader's equation.
///
/// Lighting happens in view coordinates, so the eye sits at the origin. The
/// only divergence is a degenerate direction (a vertex exactly at the eye or
/// the light): here it normalizes to zero and the term drops out, while the
/// shader's `normalize` has no defined result.
pub fn shade_vertex(position: Vec3, normal: Vec3, inputs: &ShadingInputs) -> Vec3 {
    let model_view = inputs.view * inputs.model;

    let pos_vc = (model_view * position.extend(1.0)).xyz();
    // w = 0: normals ignore translation
    let n = (model_view * normal.extend(0.0)).xyz().normalize_or_zero();
    let light_vc = (inputs.view * inputs.light_position.extend(1.0)).xyz();

    let l = (light_vc - pos_vc).normalize_or_zero();
    let e = (-pos_vc).normalize_or_zero();
    let r = reflect(-l, n);

    let light = Vec3::from_array(inputs.config.light_color);
    let material = Vec3::from_array(inputs.config.material_color);

    let mut color = Vec3::ZERO;

    if inputs.flags.contains(LightingFlags::AMBIENT) {
        color += inputs.config.ambient_factor * material * light;
    }

    let n_dot_l = l.dot(n);
    if inputs.flags.contains(LightingFlags::DIFFUSE) {
        color += n_dot_l.max(0.0) * material * light;
    }

    if inputs.flags.contains(LightingFlags::SPECULAR) && n_dot_l >= 0.0 {
        color += r.dot(e).max(0.0).powf(inputs.config.shininess) * light;
    }

    color
}

/// GLSL/WGSL `reflect`: incident `i` about normal `n`.
fn reflect(i: Vec3, n: Vec3) -> Vec3 {
    i - 2.0 * n.dot(i) * n
}
