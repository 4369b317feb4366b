mod ground;
mod helpers;
mod post;
mod scene;
mod targets;

use glam::{Mat4, Vec3};
use map_core::theme::{ThemePreset, AMBIENT_COLOR, BLOOM_THRESHOLD, HEMISPHERE_GROUND, HEMISPHERE_SKY, SUN_DIRECTION};
use map_core::{PartInstance, PartKind, Scene};
use web_sys as web;

use ground::GroundTexture;
use post::{PostBindGroups, PostResources};
use scene::{GpuMesh, InstanceRaw, SceneGlobals, ScenePipelines};
use targets::RenderTargets;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    targets: RenderTargets,
    post: PostResources,
    post_groups: PostBindGroups,

    pipelines: ScenePipelines,
    globals: SceneGlobals,
    globals_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    ground: GroundTexture,

    city: GpuMesh,
    city_instance: wgpu::Buffer,
    part_meshes: [GpuMesh; 4],
    part_instances: wgpu::Buffer,
    part_capacity: usize,

    bloom_strength: f32,
    clear_color: wgpu::Color,
    width: u32,
    height: u32,
}

fn instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("part_instances"),
        size: (capacity.max(1) * std::mem::size_of::<InstanceRaw>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, city: &Scene) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height);

        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(POST_WGSL.into()),
        });
        let post = post::create_post_resources(&device, &post_shader, format);
        let post_groups = post.bind_groups(&device, &targets);

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let pipelines = scene::create_scene_pipelines(&device, &scene_shader);
        let globals = SceneGlobals {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            camera_pos: [0.0; 4],
            fog_color: [0.0; 4],
            fog_params: [1.0, 0.0, 0.0, 0.0],
            ambient: [0.0; 4],
            hemi_sky: [0.0; 4],
            hemi_ground: [0.0; 4],
            sun_dir: [0.0, -1.0, 0.0, 0.0],
            sun_color: [0.0; 4],
        };
        let globals_buffer = helpers::uniform_buffer(&device, "scene_globals", &globals);
        let ground = GroundTexture::placeholder(&device, &queue);
        let scene_bind_group =
            Self::make_scene_bind_group(&device, &pipelines, &globals_buffer, &ground);

        let city_mesh = GpuMesh::upload(&device, "city_mesh", &city.mesh);
        let city_instance = {
            use wgpu::util::DeviceExt;
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("city_instance"),
                contents: bytemuck::bytes_of(&InstanceRaw::identity()),
                usage: wgpu::BufferUsages::VERTEX,
            })
        };
        let part_meshes =
            PartKind::ALL.map(|k| GpuMesh::upload(&device, "marker_part", &scene::part_mesh(k)));
        let part_capacity = 64;
        let part_instances = instance_buffer(&device, part_capacity);

        log::info!(
            "[gpu] ready {}x{} format={:?} city_triangles={}",
            width,
            height,
            format,
            city.stats.triangles
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            post,
            post_groups,
            pipelines,
            globals,
            globals_buffer,
            scene_bind_group,
            ground,
            city: city_mesh,
            city_instance,
            part_meshes,
            part_instances,
            part_capacity,
            bloom_strength: 0.0,
            clear_color: wgpu::Color::BLACK,
            width,
            height,
        })
    }

    fn make_scene_bind_group(
        device: &wgpu::Device,
        pipelines: &ScenePipelines,
        globals_buffer: &wgpu::Buffer,
        ground: &GroundTexture,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &pipelines.bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&ground.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&ground.sampler),
                },
            ],
        })
    }

    /// Replace every theme-managed render parameter at once.
    pub fn apply_theme(&mut self, preset: &ThemePreset) {
        let [r, g, b] = preset.background;
        self.clear_color = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        };
        let rgbw = |c: [f32; 3], w: f32| [c[0], c[1], c[2], w];
        self.globals.fog_color = rgbw(preset.fog_color, preset.fog_near);
        self.globals.fog_params[0] = preset.fog_far;
        self.globals.ambient = rgbw(AMBIENT_COLOR, preset.ambient_intensity);
        self.globals.hemi_sky = rgbw(HEMISPHERE_SKY, preset.hemisphere_intensity);
        self.globals.hemi_ground = rgbw(HEMISPHERE_GROUND, 0.0);
        self.globals.sun_dir = rgbw(SUN_DIRECTION, 0.0);
        self.globals.sun_color = rgbw(preset.sun_color, preset.sun_intensity);
        self.bloom_strength = preset.bloom_strength;
    }

    pub fn set_camera(&mut self, view_proj: Mat4, eye: Vec3, time_sec: f32) {
        self.globals.view_proj = view_proj.to_cols_array_2d();
        self.globals.camera_pos = [eye.x, eye.y, eye.z, time_sec];
    }

    pub fn set_ground_texture(&mut self, bitmap: web::ImageBitmap) {
        self.ground = GroundTexture::from_bitmap(&self.device, &self.queue, bitmap);
        self.scene_bind_group = Self::make_scene_bind_group(
            &self.device,
            &self.pipelines,
            &self.globals_buffer,
            &self.ground,
        );
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate(&self.device, width, height);
            self.post_groups = self.post.bind_groups(&self.device, &self.targets);
            log::debug!("[gpu] resized to {}x{}", width, height);
        }
    }

    /// Reconfigure the surface after it was lost or went stale.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, parts: &[PartInstance]) -> Result<(), wgpu::SurfaceError> {
        self.globals.fog_params[1] = if self.ground.enabled { 1.0 } else { 0.0 };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&self.globals));

        let batches = scene::batch_parts(parts);
        if batches.data.len() > self.part_capacity {
            self.part_capacity = batches.data.len().next_power_of_two();
            self.part_instances = instance_buffer(&self.device, self.part_capacity);
        }
        if !batches.data.is_empty() {
            self.queue.write_buffer(
                &self.part_instances,
                0,
                bytemuck::cast_slice(&batches.data),
            );
        }
        self.post.write_uniforms(
            &self.queue,
            self.width,
            self.height,
            self.bloom_strength,
            BLOOM_THRESHOLD,
        );

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        // Pass 1: lit scene -> HDR
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);
            rpass.set_pipeline(&self.pipelines.opaque);
            self.city.draw(&mut rpass, &self.city_instance, 0..1);
            for (slot, kind) in PartKind::ALL.iter().enumerate() {
                if *kind != PartKind::PulseRing {
                    self.part_meshes[slot].draw(
                        &mut rpass,
                        &self.part_instances,
                        batches.ranges[slot].clone(),
                    );
                }
            }
            // fading pulse rings last, without depth writes
            rpass.set_pipeline(&self.pipelines.transparent);
            let pulse = PartKind::ALL.len() - 1;
            self.part_meshes[pulse].draw(
                &mut rpass,
                &self.part_instances,
                batches.ranges[pulse].clone(),
            );
        }

        // Pass 2: bright pass -> bloom_a
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &self.post_groups.bright_from_hdr,
            None,
        );
        // Pass 3: blur horizontal bloom_a -> bloom_b
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.blur_h_from_a,
            None,
        );
        // Pass 4: blur vertical bloom_b -> bloom_a
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.blur_v_from_b,
            None,
        );
        // Pass 5: composite to swapchain
        post::blit(
            &mut encoder,
            "composite",
            &view,
            self.clear_color,
            &self.post.composite_pipeline,
            &self.post_groups.composite_hdr,
            Some(&self.post_groups.composite_bloom),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
