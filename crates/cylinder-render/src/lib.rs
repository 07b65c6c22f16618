//! Open cylinder mesh with per-vertex Phong lighting (wgpu).
//!
//! [`CylinderMesh`] builds the closed triangle strip once, and
//! [`CylinderRenderer`] uploads it and records either the filled strip or a
//! wireframe outline into a caller-owned render pass.

pub mod draw;
pub mod error;
pub mod gpu_types;
pub mod lighting;
pub mod mesh;
pub mod renderer;

pub use draw::{DrawCall, DrawPlan, PlanKind, Topology, WireframeStyle};
pub use error::{RenderError, RenderResult};
pub use gpu_types::{PhongUniforms, Vertex};
pub use lighting::{shade_vertex, LightingConfig, LightingFlags, ShadingInputs};
pub use mesh::CylinderMesh;
pub use renderer::{CylinderRenderer, FrameParams};
