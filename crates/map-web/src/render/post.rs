use super::helpers;
use super::targets::RenderTargets;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    pub(crate) resolution: [f32; 2],
    pub(crate) blur_dir: [f32; 2],
    pub(crate) bloom_strength: f32,
    pub(crate) threshold: f32,
    pub(crate) exposure: f32,
    pub(crate) _pad: f32,
}

pub(crate) struct PostResources {
    pub(crate) bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    pub(crate) bgl1: wgpu::BindGroupLayout, // tex+sampler
    pub(crate) sampler: wgpu::Sampler,
    // one uniform buffer per pass; queue writes land before submit
    pub(crate) bright_uniforms: wgpu::Buffer,
    pub(crate) blur_h_uniforms: wgpu::Buffer,
    pub(crate) blur_v_uniforms: wgpu::Buffer,
    pub(crate) composite_uniforms: wgpu::Buffer,
    pub(crate) bright_pipeline: wgpu::RenderPipeline,
    pub(crate) blur_pipeline: wgpu::RenderPipeline,
    pub(crate) composite_pipeline: wgpu::RenderPipeline,
}

/// Bind groups that reference the size-dependent targets.
pub(crate) struct PostBindGroups {
    pub(crate) bright_from_hdr: wgpu::BindGroup,
    pub(crate) blur_h_from_a: wgpu::BindGroup,
    pub(crate) blur_v_from_b: wgpu::BindGroup,
    pub(crate) composite_hdr: wgpu::BindGroup,
    pub(crate) composite_bloom: wgpu::BindGroup,
}

pub(crate) fn create_post_resources(
    device: &wgpu::Device,
    post_shader: &wgpu::ShaderModule,
    swap_format: wgpu::TextureFormat,
) -> PostResources {
    let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl0"),
        entries: &[
            helpers::texture_entry(0),
            helpers::sampler_entry(1),
            helpers::uniform_entry(2, wgpu::ShaderStages::FRAGMENT),
        ],
    });
    let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl1"),
        entries: &[helpers::texture_entry(0), helpers::sampler_entry(1)],
    });
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("post_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    });
    let zero = PostUniforms {
        resolution: [1.0, 1.0],
        blur_dir: [0.0, 0.0],
        bloom_strength: 0.0,
        threshold: 1.0,
        exposure: 1.0,
        _pad: 0.0,
    };
    let pl_single = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_0"),
        bind_group_layouts: &[&bgl0],
        push_constant_ranges: &[],
    });
    let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_comp"),
        bind_group_layouts: &[&bgl0, &bgl1],
        push_constant_ranges: &[],
    });
    let bright_pipeline = helpers::make_post_pipeline(
        device,
        &pl_single,
        post_shader,
        "fs_bright",
        helpers::HDR_FORMAT,
        None,
    );
    let blur_pipeline = helpers::make_post_pipeline(
        device,
        &pl_single,
        post_shader,
        "fs_blur",
        helpers::HDR_FORMAT,
        None,
    );
    let composite_pipeline = helpers::make_post_pipeline(
        device,
        &pl_composite,
        post_shader,
        "fs_composite",
        swap_format,
        Some(wgpu::BlendState::REPLACE),
    );

    PostResources {
        bright_uniforms: helpers::uniform_buffer(device, "post_bright", &zero),
        blur_h_uniforms: helpers::uniform_buffer(device, "post_blur_h", &zero),
        blur_v_uniforms: helpers::uniform_buffer(device, "post_blur_v", &zero),
        composite_uniforms: helpers::uniform_buffer(device, "post_composite", &zero),
        bgl0,
        bgl1,
        sampler,
        bright_pipeline,
        blur_pipeline,
        composite_pipeline,
    }
}

impl PostResources {
    fn group0(
        &self,
        device: &wgpu::Device,
        label: &str,
        view: &wgpu::TextureView,
        uniforms: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.bgl0,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniforms.as_entire_binding(),
                },
            ],
        })
    }

    pub(crate) fn bind_groups(&self, device: &wgpu::Device, targets: &RenderTargets) -> PostBindGroups {
        PostBindGroups {
            bright_from_hdr: self.group0(device, "bg_bright", &targets.hdr_view, &self.bright_uniforms),
            blur_h_from_a: self.group0(device, "bg_blur_h", &targets.bloom_a_view, &self.blur_h_uniforms),
            blur_v_from_b: self.group0(device, "bg_blur_v", &targets.bloom_b_view, &self.blur_v_uniforms),
            composite_hdr: self.group0(
                device,
                "bg_composite",
                &targets.hdr_view,
                &self.composite_uniforms,
            ),
            composite_bloom: device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("bg_bloom_a_only"),
                layout: &self.bgl1,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&targets.bloom_a_view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&self.sampler),
                    },
                ],
            }),
        }
    }

    /// Upload per-pass parameters for a frame.
    pub(crate) fn write_uniforms(
        &self,
        queue: &wgpu::Queue,
        width: u32,
        height: u32,
        bloom_strength: f32,
        threshold: f32,
    ) {
        let half = [(width / 2).max(1) as f32, (height / 2).max(1) as f32];
        let base = PostUniforms {
            resolution: half,
            blur_dir: [0.0, 0.0],
            bloom_strength,
            threshold,
            exposure: 1.0,
            _pad: 0.0,
        };
        queue.write_buffer(&self.bright_uniforms, 0, bytemuck::bytes_of(&base));
        let h = PostUniforms {
            blur_dir: [1.0, 0.0],
            ..base
        };
        queue.write_buffer(&self.blur_h_uniforms, 0, bytemuck::bytes_of(&h));
        let v = PostUniforms {
            blur_dir: [0.0, 1.0],
            ..base
        };
        queue.write_buffer(&self.blur_v_uniforms, 0, bytemuck::bytes_of(&v));
        let c = PostUniforms {
            resolution: [width.max(1) as f32, height.max(1) as f32],
            ..base
        };
        queue.write_buffer(&self.composite_uniforms, 0, bytemuck::bytes_of(&c));
    }
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    clear: wgpu::Color,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
}
