//! Lit geometry pass: the merged static city mesh plus instanced marker parts.

use super::helpers;
use glam::Mat4;
use map_core::geometry::{self, MeshData, Vertex};
use map_core::constants::*;
use map_core::{PartInstance, PartKind};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneGlobals {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) camera_pos: [f32; 4],
    pub(crate) fog_color: [f32; 4],
    pub(crate) fog_params: [f32; 4],
    pub(crate) ambient: [f32; 4],
    pub(crate) hemi_sky: [f32; 4],
    pub(crate) hemi_ground: [f32; 4],
    pub(crate) sun_dir: [f32; 4],
    pub(crate) sun_color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct InstanceRaw {
    model: [[f32; 4]; 4],
    tint: [f32; 4],
    params: [f32; 4],
}

impl InstanceRaw {
    pub(crate) fn identity() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            tint: [1.0; 4],
            params: [0.0; 4],
        }
    }

    pub(crate) fn from_part(part: &PartInstance) -> Self {
        Self {
            model: part.model.to_cols_array_2d(),
            tint: part.color,
            params: [part.emissive, 0.0, 0.0, 0.0],
        }
    }
}

const VERTEX_ATTRS: [wgpu::VertexAttribute; 4] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x4, 3 => Float32x2];
const INSTANCE_ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
    4 => Float32x4, 5 => Float32x4, 6 => Float32x4, 7 => Float32x4,
    8 => Float32x4, 9 => Float32x4
];

fn vertex_layouts() -> [wgpu::VertexBufferLayout<'static>; 2] {
    [
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRS,
        },
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &INSTANCE_ATTRS,
        },
    ]
}

pub(crate) struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    pub(crate) fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }

    pub(crate) fn draw(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        instances: &wgpu::Buffer,
        range: std::ops::Range<u32>,
    ) {
        if self.index_count == 0 || range.is_empty() {
            return;
        }
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, instances.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, range);
    }
}

/// Unit-scale white mesh for one marker part kind; color comes per instance.
pub(crate) fn part_mesh(kind: PartKind) -> MeshData {
    const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
    match kind {
        PartKind::Body => geometry::sphere(MARKER_BODY_RADIUS, 20, 14, WHITE),
        PartKind::Pointer => geometry::cylinder(
            MARKER_POINTER_RADIUS,
            0.0,
            MARKER_POINTER_HEIGHT,
            16,
            WHITE,
        ),
        PartKind::GroundRing => {
            geometry::ring(MARKER_RING_INNER, MARKER_RING_OUTER, 40, WHITE, 1.0)
        }
        PartKind::PulseRing => {
            geometry::ring(MARKER_PULSE_INNER, MARKER_PULSE_OUTER, 40, WHITE, 1.0)
        }
    }
}

pub(crate) struct ScenePipelines {
    pub(crate) bgl: wgpu::BindGroupLayout,
    pub(crate) opaque: wgpu::RenderPipeline,
    pub(crate) transparent: wgpu::RenderPipeline,
}

pub(crate) fn create_scene_pipelines(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
) -> ScenePipelines {
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_bgl"),
        entries: &[
            helpers::uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ),
            helpers::texture_entry(1),
            helpers::sampler_entry(2),
        ],
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let make = |label: &str, blend: Option<wgpu::BlendState>, depth_write: bool| {
        let buffers = vertex_layouts();
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(wgpu::DepthStencilState {
                format: helpers::DEPTH_FORMAT,
                depth_write_enabled: depth_write,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: helpers::HDR_FORMAT,
                    blend,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        })
    };
    ScenePipelines {
        opaque: make("scene_opaque", None, true),
        transparent: make("scene_transparent", Some(wgpu::BlendState::ALPHA_BLENDING), false),
        bgl,
    }
}

/// Marker part instances grouped by kind in [`PartKind::ALL`] order.
pub(crate) struct PartBatches {
    pub(crate) data: Vec<InstanceRaw>,
    pub(crate) ranges: [std::ops::Range<u32>; 4],
}

pub(crate) fn batch_parts(parts: &[PartInstance]) -> PartBatches {
    let mut data = Vec::with_capacity(parts.len());
    let mut ranges: [std::ops::Range<u32>; 4] = Default::default();
    for (slot, kind) in PartKind::ALL.iter().enumerate() {
        let start = data.len() as u32;
        data.extend(
            parts
                .iter()
                .filter(|p| p.kind == *kind)
                .map(InstanceRaw::from_part),
        );
        ranges[slot] = start..data.len() as u32;
    }
    PartBatches { data, ranges }
}
