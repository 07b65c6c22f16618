//! Draw plans for the cylinder strip
//!
//! The renderer never decides draw ranges inline: it asks for a plan and
//! replays it. Keeping the plan as plain data lets the draw-count contract be
//! checked without a device.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::mesh::CylinderMesh;

/// How `show_edges` outlines the strip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireframeStyle {
    /// Four line loops per section: triangle loops at `2i` and `2(i+1)`,
    /// followed by two identical 2-vertex loops between them.
    #[default]
    Legacy,
    /// One line list holding every strip edge once.
    Edges,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    TriangleStrip,
    /// Closed polyline, stored as an indexed line strip ending on its first vertex
    LineLoop,
    LineList,
}

/// One draw call. `Vertices` ranges index the vertex buffer directly,
/// `Indices` ranges index the plan's index buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawCall {
    Vertices { topology: Topology, range: Range<u32> },
    Indices { topology: Topology, range: Range<u32> },
}

impl DrawCall {
    pub fn topology(&self) -> Topology {
        match self {
            DrawCall::Vertices { topology, .. } | DrawCall::Indices { topology, .. } => *topology,
        }
    }
}

/// Ordered draw calls plus the index data they reference.
#[derive(Clone, Debug, Default)]
pub struct DrawPlan {
    pub calls: Vec<DrawCall>,
    pub indices: Vec<u32>,
}

/// Which precomputed plan a frame replays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanKind {
    Filled,
    LegacyLoops,
    EdgeList,
}

impl PlanKind {
    pub fn select(show_edges: bool, style: WireframeStyle) -> Self {
        match (show_edges, style) {
            (false, _) => PlanKind::Filled,
            (true, WireframeStyle::Legacy) => PlanKind::LegacyLoops,
            (true, WireframeStyle::Edges) => PlanKind::EdgeList,
        }
    }
}

impl DrawPlan {
    /// Single strip over every vertex.
    pub fn filled(mesh: &CylinderMesh) -> Self {
        Self {
            calls: vec![DrawCall::Vertices {
                topology: Topology::TriangleStrip,
                range: 0..mesh.vertex_count(),
            }],
            indices: Vec::new(),
        }
    }

    pub fn wireframe(mesh: &CylinderMesh, style: WireframeStyle) -> Self {
        match style {
            WireframeStyle::Legacy => Self::legacy_loops(mesh.num_sections()),
            WireframeStyle::Edges => Self::edge_list(mesh.num_sections()),
        }
    }

    pub fn build(mesh: &CylinderMesh, kind: PlanKind) -> Self {
        match kind {
            PlanKind::Filled => Self::filled(mesh),
            PlanKind::LegacyLoops => Self::wireframe(mesh, WireframeStyle::Legacy),
            PlanKind::EdgeList => Self::wireframe(mesh, WireframeStyle::Edges),
        }
    }

    pub fn for_frame(mesh: &CylinderMesh, show_edges: bool, style: WireframeStyle) -> Self {
        Self::build(mesh, PlanKind::select(show_edges, style))
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    fn legacy_loops(num_sections: u32) -> Self {
        let mut plan = Self::default();
        let wrap = 2 * num_sections;

        for i in 0..num_sections {
            let start = 2 * i;
            let next = 2 * (i + 1);

            plan.push_loop((start..start + 3).map(|v| v % wrap));
            plan.push_loop((next..next + 3).map(|v| v % wrap));
            plan.push_loop([start, next].map(|v| v % wrap));
            plan.push_loop([start, next].map(|v| v % wrap));
        }
        plan
    }

    fn edge_list(num_sections: u32) -> Self {
        let mut indices = Vec::with_capacity(num_sections as usize * 6);

        for i in 0..num_sections {
            let top = 2 * i;
            let bottom = top + 1;
            let next_top = top + 2;
            let next_bottom = top + 3;

            // vertical rung, top rim, diagonal, bottom rim
            indices.extend_from_slice(&[top, bottom]);
            indices.extend_from_slice(&[top, next_top]);
            indices.extend_from_slice(&[bottom, next_top]);
            indices.extend_from_slice(&[bottom, next_bottom]);
        }
        // closing rung; geometrically the same as rung 0
        let last = 2 * num_sections;
        indices.extend_from_slice(&[last, last + 1]);

        let count = indices.len() as u32;
        Self {
            calls: vec![DrawCall::Indices {
                topology: Topology::LineList,
                range: 0..count,
            }],
            indices,
        }
    }

    fn push_loop(&mut self, vertices: impl IntoIterator<Item = u32>) {
        let first = self.indices.len() as u32;
        let mut iter = vertices.into_iter();
        let Some(head) = iter.next() else { return };

        self.indices.push(head);
        self.indices.extend(iter);
        self.indices.push(head);

        self.calls.push(DrawCall::Indices {
            topology: Topology::LineLoop,
            range: first..self.indices.len() as u32,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn mesh(n: u32) -> CylinderMesh {
        CylinderMesh::with_sections(1.0, n).unwrap()
    }

    fn loop_vertices(plan: &DrawPlan, call: usize) -> &[u32] {
        match &plan.calls[call] {
            DrawCall::Indices { range, .. } => &plan.indices[range.start as usize..range.end as usize],
            other => panic!("expected indexed call, got {other:?}"),
        }
    }

    #[test]
    fn test_filled_single_strip() {
        let plan = DrawPlan::for_frame(&mesh(10), false, WireframeStyle::Legacy);
        assert_eq!(plan.len(), 1);
        assert_eq!(
            plan.calls[0],
            DrawCall::Vertices { topology: Topology::TriangleStrip, range: 0..22 }
        );
        assert!(plan.indices.is_empty());
    }

    #[test]
    fn test_legacy_wireframe_call_count() {
        for n in [3, 10, 32] {
            let plan = DrawPlan::for_frame(&mesh(n), true, WireframeStyle::Legacy);
            assert_eq!(plan.len(), 4 * n as usize);
            assert!(plan.calls.iter().all(|c| c.topology() == Topology::LineLoop));
        }
    }

    #[test]
    fn test_legacy_loop_contents() {
        let plan = DrawPlan::wireframe(&mesh(10), WireframeStyle::Legacy);

        // Section 0: start = 0, next = 2
        assert_eq!(loop_vertices(&plan, 0), &[0, 1, 2, 0]);
        assert_eq!(loop_vertices(&plan, 1), &[2, 3, 4, 2]);
        assert_eq!(loop_vertices(&plan, 2), &[0, 2, 0]);
        assert_eq!(loop_vertices(&plan, 3), &[0, 2, 0]);
    }

    #[test]
    fn test_legacy_loops_stay_in_bounds() {
        let n = 10;
        let plan = DrawPlan::wireframe(&mesh(n), WireframeStyle::Legacy);
        let vertex_count = 2 * n + 2;
        assert!(plan.indices.iter().all(|&i| i < vertex_count));

        // Last section wraps through the seam: next = 20 is vertex 0
        let last = 4 * (n as usize - 1);
        assert_eq!(loop_vertices(&plan, last), &[18, 19, 0, 18]);
        assert_eq!(loop_vertices(&plan, last + 1), &[0, 1, 2, 0]);
    }

    #[test]
    fn test_edges_cover_every_strip_edge_once() {
        let n = 10;
        let plan = DrawPlan::wireframe(&mesh(n), WireframeStyle::Edges);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.calls[0].topology(), Topology::LineList);
        assert_eq!(plan.indices.len() % 2, 0);

        let mut seen = HashSet::new();
        for e in plan.indices.chunks_exact(2) {
            let key = (e[0].min(e[1]), e[0].max(e[1]));
            assert!(seen.insert(key), "duplicate edge {key:?}");
        }

        // Every edge of every strip triangle is present
        for t in 0..(2 * n) {
            let tri = [t, t + 1, t + 2];
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[0], tri[2])] {
                assert!(seen.contains(&(a.min(b), a.max(b))), "missing edge {a}-{b}");
            }
        }
    }

    #[test]
    fn test_plan_selection() {
        assert_eq!(PlanKind::select(false, WireframeStyle::Legacy), PlanKind::Filled);
        assert_eq!(PlanKind::select(false, WireframeStyle::Edges), PlanKind::Filled);
        assert_eq!(PlanKind::select(true, WireframeStyle::Legacy), PlanKind::LegacyLoops);
        assert_eq!(PlanKind::select(true, WireframeStyle::Edges), PlanKind::EdgeList);
    }

    #[test]
    fn test_built_plan_matches_kind() {
        let m = mesh(10);
        assert_eq!(DrawPlan::build(&m, PlanKind::Filled).len(), 1);
        assert_eq!(DrawPlan::build(&m, PlanKind::LegacyLoops).len(), 40);

        let edges = DrawPlan::build(&m, PlanKind::EdgeList);
        assert_eq!(edges.calls[0].topology(), Topology::LineList);
        assert_eq!(edges.indices, DrawPlan::wireframe(&m, WireframeStyle::Edges).indices);
    }

    #[test]
    fn test_largest_mesh_plans_stay_in_range() {
        let m = mesh(crate::mesh::MAX_SECTIONS);
        let legacy = DrawPlan::wireframe(&m, WireframeStyle::Legacy);
        assert_eq!(legacy.len(), 4 * crate::mesh::MAX_SECTIONS as usize);
        assert!(legacy.indices.iter().all(|&i| i < m.vertex_count()));
    }
}
