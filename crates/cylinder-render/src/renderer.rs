//! Cylinder renderer: owns the mesh buffers and replays a draw plan each frame

use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::draw::{DrawCall, DrawPlan, PlanKind, Topology, WireframeStyle};
use crate::error::RenderResult;
use crate::gpu_types::{PhongUniforms, Vertex};
use crate::lighting::{LightingConfig, LightingFlags};
use crate::mesh::CylinderMesh;

/// Per-draw inputs supplied by the host each frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameParams {
    pub projection: Mat4,
    pub view: Mat4,
    pub model: Mat4,
    /// World-space point light
    pub light_position: Vec3,
    pub show_edges: bool,
    pub ambient_on: bool,
    pub diffuse_on: bool,
    pub specular_on: bool,
}

impl FrameParams {
    pub fn flags(&self) -> LightingFlags {
        LightingFlags::from_toggles(self.ambient_on, self.diffuse_on, self.specular_on)
    }

    pub fn uniforms(&self, lighting: &LightingConfig) -> PhongUniforms {
        let [lr, lg, lb] = lighting.light_color;
        let [mr, mg, mb] = lighting.material_color;

        PhongUniforms {
            projection: self.projection.to_cols_array_2d(),
            view: self.view.to_cols_array_2d(),
            model: self.model.to_cols_array_2d(),
            light_position: self.light_position.extend(1.0).to_array(),
            light_color: [lr, lg, lb, 1.0],
            material_color: [mr, mg, mb, 1.0],
            ambient_factor: lighting.ambient_factor,
            shininess: lighting.shininess,
            flags: self.flags().bits(),
            _pad: 0,
        }
    }
}

/// A draw plan together with the GPU copy of its indices.
struct UploadedPlan {
    plan: DrawPlan,
    index_buffer: Option<wgpu::Buffer>,
}

impl UploadedPlan {
    fn new(device: &wgpu::Device, plan: DrawPlan, label: &str) -> Self {
        let index_buffer = (!plan.indices.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(&plan.indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });
        Self { plan, index_buffer }
    }
}

pub struct CylinderRenderer {
    mesh: CylinderMesh,
    lighting: LightingConfig,
    wireframe_style: WireframeStyle,

    vertex_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    strip_pipeline: wgpu::RenderPipeline,
    loop_pipeline: wgpu::RenderPipeline,
    list_pipeline: wgpu::RenderPipeline,

    filled: UploadedPlan,
    legacy_edges: UploadedPlan,
    edge_list: UploadedPlan,
}

impl CylinderRenderer {
    /// Build a default-section cylinder of the given scale and upload it.
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        depth_format: Option<wgpu::TextureFormat>,
        scale: f32,
        lighting: LightingConfig,
    ) -> RenderResult<Self> {
        let mesh = CylinderMesh::new(scale)?;
        lighting.validate()?;
        Ok(Self::from_mesh(device, color_format, depth_format, mesh, lighting))
    }

    pub fn from_mesh(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        depth_format: Option<wgpu::TextureFormat>,
        mesh: CylinderMesh,
        lighting: LightingConfig,
    ) -> Self {
        tracing::info!(
            "Building cylinder: scale {}, {} sections, {} vertices",
            mesh.scale(),
            mesh.num_sections(),
            mesh.vertex_count()
        );

        let vertices = mesh.vertices();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cylinder Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Phong Uniform Buffer"),
            size: PhongUniforms::SIZE as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Phong BindGroupLayout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(PhongUniforms::SIZE as u64),
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Phong BindGroup"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::include_wgsl!("shaders/phong.wgsl"));

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Phong Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let targets = PipelineTargets {
            layout: &pipeline_layout,
            shader: &shader,
            color_format,
            depth_format,
        };
        let strip_pipeline = targets.build(device, "Cylinder Strip Pipeline", wgpu::PrimitiveTopology::TriangleStrip, None);
        let loop_pipeline = targets.build(
            device,
            "Cylinder Loop Pipeline",
            wgpu::PrimitiveTopology::LineStrip,
            Some(wgpu::IndexFormat::Uint32),
        );
        let list_pipeline = targets.build(device, "Cylinder Edge Pipeline", wgpu::PrimitiveTopology::LineList, None);

        let filled = UploadedPlan::new(device, DrawPlan::build(&mesh, PlanKind::Filled), "Filled Indices");
        let legacy_edges = UploadedPlan::new(device, DrawPlan::build(&mesh, PlanKind::LegacyLoops), "Loop Indices");
        let edge_list = UploadedPlan::new(device, DrawPlan::build(&mesh, PlanKind::EdgeList), "Edge Indices");

        tracing::debug!(
            "Draw plans: filled {}, legacy wireframe {}, edge list {}",
            filled.plan.len(),
            legacy_edges.plan.len(),
            edge_list.plan.len()
        );

        Self {
            mesh,
            lighting,
            wireframe_style: WireframeStyle::default(),
            vertex_buffer,
            uniform_buffer,
            bind_group,
            strip_pipeline,
            loop_pipeline,
            list_pipeline,
            filled,
            legacy_edges,
            edge_list,
        }
    }

    pub fn mesh(&self) -> &CylinderMesh {
        &self.mesh
    }

    pub fn lighting(&self) -> &LightingConfig {
        &self.lighting
    }

    pub fn set_lighting(&mut self, lighting: LightingConfig) -> RenderResult<()> {
        lighting.validate()?;
        self.lighting = lighting;
        Ok(())
    }

    pub fn wireframe_style(&self) -> WireframeStyle {
        self.wireframe_style
    }

    pub fn set_wireframe_style(&mut self, style: WireframeStyle) {
        if style != self.wireframe_style {
            tracing::info!("Wireframe style: {:?}", style);
        }
        self.wireframe_style = style;
    }

    /// Upload this frame's uniforms and record the cylinder into `pass`.
    pub fn render(&self, queue: &wgpu::Queue, pass: &mut wgpu::RenderPass<'_>, frame: &FrameParams) {
        let uniforms = frame.uniforms(&self.lighting);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let uploaded = self.plan_for(frame.show_edges);

        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        if let Some(indices) = &uploaded.index_buffer {
            pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
        }

        let mut bound: Option<Topology> = None;
        for call in &uploaded.plan.calls {
            let topology = call.topology();
            if bound != Some(topology) {
                pass.set_pipeline(self.pipeline_for(topology));
                bound = Some(topology);
            }

            match call {
                DrawCall::Vertices { range, .. } => pass.draw(range.clone(), 0..1),
                DrawCall::Indices { range, .. } => pass.draw_indexed(range.clone(), 0, 0..1),
            }
        }

        tracing::trace!("Cylinder issued {} draw calls", uploaded.plan.len());
    }

    fn plan_for(&self, show_edges: bool) -> &UploadedPlan {
        match PlanKind::select(show_edges, self.wireframe_style) {
            PlanKind::Filled => &self.filled,
            PlanKind::LegacyLoops => &self.legacy_edges,
            PlanKind::EdgeList => &self.edge_list,
        }
    }

    fn pipeline_for(&self, topology: Topology) -> &wgpu::RenderPipeline {
        match topology {
            Topology::TriangleStrip => &self.strip_pipeline,
            Topology::LineLoop => &self.loop_pipeline,
            Topology::LineList => &self.list_pipeline,
        }
    }
}

/// Shared state for the three topology pipelines.
struct PipelineTargets<'a> {
    layout: &'a wgpu::PipelineLayout,
    shader: &'a wgpu::ShaderModule,
    color_format: wgpu::TextureFormat,
    depth_format: Option<wgpu::TextureFormat>,
}

impl PipelineTargets<'_> {
    fn build(
        &self,
        device: &wgpu::Device,
        label: &str,
        topology: wgpu::PrimitiveTopology,
        strip_index_format: Option<wgpu::IndexFormat>,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(self.layout),
            vertex: wgpu::VertexState {
                module: self.shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: self.shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.color_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format,
                front_face: wgpu::FrontFace::Ccw,
                // open tube: the inside is visible through the ends
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: self.depth_format.map(|format| wgpu::DepthStencilState {
                format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }
}
