//! Application state: GPU resources, the current generation, and the
//! per-frame loop that applies the animation core's instructions.

use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use glam::{Mat4, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wgpu::util::DeviceExt;

use flower_core::{
    build_flower, fit_scale, ribbon_width, AnimationState, BlendMode, Camera, Flower,
    FlowerParams, ParamUpdate, SimplexField, FLOWER_WGSL, LINE_WIDTH,
};

use crate::export::save_texture_png;
use crate::orbit::OrbitController;
use crate::ribbon::{build_ribbon, RibbonVertex};

const EXPORT_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

// Dynamic-offset stride for the shared strand uniform buffer.
const STRAND_UNIFORM_STRIDE: u64 = 256;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    group: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct StrandUniform {
    color: [f32; 4],
    visibility: f32,
    _pad: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct StemData {
    rotation_z: f32,
}

/// GPU-side remnants of one strand: geometry plus one instance per stem
/// replica. All replicas share the strand's uniform slot, so per-frame
/// animation writes stay O(lines), not O(lines x stems).
struct StrandGpu {
    vertex_buf: wgpu::Buffer,
    index_buf: wgpu::Buffer,
    index_count: u32,
    instance_buf: wgpu::Buffer,
    instance_count: u32,
    uniform_offset: u32,
    color: [f32; 3],
}

// Logs frame rate once per second.
struct FpsCounter {
    frames: u32,
    last_report: Instant,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            frames: 0,
            last_report: Instant::now(),
        }
    }

    fn tick(&mut self) -> Option<f32> {
        self.frames += 1;
        let elapsed = self.last_report.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            let fps = self.frames as f32 / elapsed;
            self.frames = 0;
            self.last_report = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}

pub struct App<'w> {
    pub window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    additive_pipeline: wgpu::RenderPipeline,
    normal_pipeline: wgpu::RenderPipeline,
    export_additive_pipeline: wgpu::RenderPipeline,
    export_normal_pipeline: wgpu::RenderPipeline,

    globals_buf: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    strand_bgl: wgpu::BindGroupLayout,
    strand_uniform_buf: wgpu::Buffer,
    strand_bind_group: wgpu::BindGroup,

    strands: Vec<StrandGpu>,
    background: wgpu::Color,
    blend: BlendMode,
    edge: f32,

    params: FlowerParams,
    rng: StdRng,
    anim: AnimationState,
    orbit: OrbitController,
    scale_target: f32,
    // Fit is deferred to the next frame so the projection reflects the
    // latest viewport.
    needs_fit: bool,

    start: Instant,
    last_frame: Instant,
    fps: FpsCounter,
}

impl<'w> App<'w> {
    pub async fn new(window: &'w winit::window::Window) -> Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        log::info!("GPU adapter: {}", adapter.get_info().name);

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
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("flower_shader"),
            source: wgpu::ShaderSource::Wgsl(FLOWER_WGSL.into()),
        });

        let globals_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buf.as_entire_binding(),
            }],
        });

        let strand_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("strand_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<StrandUniform>() as u64
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("flower_pl"),
            bind_group_layouts: &[&globals_bgl, &strand_bgl],
            push_constant_ranges: &[],
        });

        let additive = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        };
        let normal = wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING;

        let additive_pipeline =
            build_pipeline(&device, &pipeline_layout, &shader, format, additive);
        let normal_pipeline = build_pipeline(&device, &pipeline_layout, &shader, format, normal);
        let export_additive_pipeline =
            build_pipeline(&device, &pipeline_layout, &shader, EXPORT_FORMAT, additive);
        let export_normal_pipeline =
            build_pipeline(&device, &pipeline_layout, &shader, EXPORT_FORMAT, normal);

        // Placeholder slot; replaced on the first generation.
        let strand_uniform_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("strand_uniforms"),
            size: STRAND_UNIFORM_STRIDE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let strand_bind_group =
            make_strand_bind_group(&device, &strand_bgl, &strand_uniform_buf);

        let mut app = Self {
            window,
            surface,
            device,
            queue,
            config,
            additive_pipeline,
            normal_pipeline,
            export_additive_pipeline,
            export_normal_pipeline,
            globals_buf,
            globals_bind_group,
            strand_bgl,
            strand_uniform_buf,
            strand_bind_group,
            strands: Vec::new(),
            background: wgpu::Color::BLACK,
            blend: BlendMode::Additive,
            edge: 0.0,
            params: FlowerParams::default(),
            rng: StdRng::from_entropy(),
            anim: AnimationState::default(),
            orbit: OrbitController::new(),
            scale_target: 1.0,
            needs_fit: false,
            start: Instant::now(),
            last_frame: Instant::now(),
            fps: FpsCounter::new(),
        };
        app.regenerate();
        Ok(app)
    }

    pub fn params(&self) -> &FlowerParams {
        &self.params
    }

    pub fn orbit_mut(&mut self) -> &mut OrbitController {
        &mut self.orbit
    }

    /// Tear down the current generation and rebuild from the current
    /// parameters with a fresh noise seed.
    pub fn regenerate(&mut self) {
        let noise = SimplexField::from_rng(&mut self.rng);
        let flower = build_flower(&self.params, &noise, &mut self.rng);
        log::info!(
            "generated flower: {} lines x {} stems = {} ribbons, edge {:.3}",
            flower.strands.len(),
            self.params.stems,
            flower.instance_count(),
            flower.edge
        );
        self.upload_flower(&flower);
        self.anim.reset();
        self.scale_target = 1.0;
        self.needs_fit = true;
    }

    /// Merge a partial update and regenerate.
    pub fn update_params(&mut self, update: &ParamUpdate) {
        self.params = self.params.merged(update);
        self.regenerate();
    }

    /// Replace the whole parameter set (randomize) and regenerate.
    pub fn set_params(&mut self, params: FlowerParams) {
        self.params = params;
        self.regenerate();
    }

    fn upload_flower(&mut self, flower: &Flower) {
        self.strands.clear();
        self.edge = flower.edge;
        self.blend = flower.blend;
        self.background = wgpu::Color {
            r: flower.background[0] as f64,
            g: flower.background[1] as f64,
            b: flower.background[2] as f64,
            a: 1.0,
        };

        let slots = flower.strands.len().max(1) as u64;
        self.strand_uniform_buf = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("strand_uniforms"),
            size: slots * STRAND_UNIFORM_STRIDE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        self.strand_bind_group =
            make_strand_bind_group(&self.device, &self.strand_bgl, &self.strand_uniform_buf);

        for (i, strand) in flower.strands.iter().enumerate() {
            let (vertices, indices) = build_ribbon(&strand.path, ribbon_width, LINE_WIDTH);
            if indices.is_empty() {
                continue;
            }
            let vertex_buf = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("strand_vb"),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
            let index_buf = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("strand_ib"),
                    contents: bytemuck::cast_slice(&indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
            let stem_data: Vec<StemData> = strand
                .stems
                .iter()
                .map(|s| StemData {
                    rotation_z: s.rotation_z,
                })
                .collect();
            let instance_buf = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("strand_instances"),
                    contents: bytemuck::cast_slice(&stem_data),
                    usage: wgpu::BufferUsages::VERTEX,
                });
            self.strands.push(StrandGpu {
                vertex_buf,
                index_buf,
                index_count: indices.len() as u32,
                instance_buf,
                instance_count: stem_data.len() as u32,
                uniform_offset: (i as u64 * STRAND_UNIFORM_STRIDE) as u32,
                color: strand.color,
            });
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn reconfigure(&mut self) {
        let size = self.window.inner_size();
        self.resize(size.width, size.height);
    }

    fn camera(&self) -> Camera {
        let aspect = self.config.width as f32 / self.config.height.max(1) as f32;
        let mut camera = Camera::new(aspect);
        camera.eye = self.orbit.eye();
        camera
    }

    /// One full frame: advance animation, write uniforms, draw.
    pub fn render(&mut self) -> std::result::Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let elapsed_ms = (now - self.last_frame).as_secs_f32() * 1000.0;
        self.last_frame = now;

        self.orbit.update();
        let camera = self.camera();

        if self.needs_fit {
            let viewport = Vec2::new(self.config.width as f32, self.config.height as f32);
            // Fit against the unorbited framing so the answer is stable
            // regardless of where the user left the camera.
            self.scale_target = fit_scale(self.edge, &Camera::new(camera.aspect), viewport);
            log::debug!(
                "auto-fit: edge {:.3} -> scale {:.2}",
                self.edge,
                self.scale_target
            );
            self.needs_fit = false;
        }

        let now_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        let visuals = self.anim.advance(elapsed_ms, now_ms, self.scale_target);
        self.write_uniforms(&camera, &visuals);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("flower_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.background),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            let pipeline = match self.blend {
                BlendMode::Additive => &self.additive_pipeline,
                BlendMode::Normal => &self.normal_pipeline,
            };
            self.record_strands(&mut rpass, pipeline);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();

        if let Some(fps) = self.fps.tick() {
            log::debug!("FPS: {:.1}  scale: {:.2}", fps, self.scale_target);
        }
        Ok(())
    }

    fn write_uniforms(&self, camera: &Camera, visuals: &flower_core::FrameVisuals) {
        let group = Mat4::from_rotation_x(visuals.rotation_x)
            * Mat4::from_rotation_y(visuals.rotation_y)
            * Mat4::from_scale(Vec3::splat(visuals.scale));
        self.queue.write_buffer(
            &self.globals_buf,
            0,
            bytemuck::bytes_of(&Globals {
                view_proj: (camera.projection_matrix() * camera.view_matrix()).to_cols_array_2d(),
                group: group.to_cols_array_2d(),
            }),
        );
        for strand in &self.strands {
            let uniform = StrandUniform {
                color: [
                    strand.color[0],
                    strand.color[1],
                    strand.color[2],
                    visuals.opacity,
                ],
                visibility: visuals.visibility,
                _pad: [0.0; 3],
            };
            self.queue.write_buffer(
                &self.strand_uniform_buf,
                strand.uniform_offset as u64,
                bytemuck::bytes_of(&uniform),
            );
        }
    }

    fn record_strands(&self, rpass: &mut wgpu::RenderPass<'_>, pipeline: &wgpu::RenderPipeline) {
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &self.globals_bind_group, &[]);
        for strand in &self.strands {
            rpass.set_bind_group(1, &self.strand_bind_group, &[strand.uniform_offset]);
            rpass.set_vertex_buffer(0, strand.vertex_buf.slice(..));
            rpass.set_vertex_buffer(1, strand.instance_buf.slice(..));
            rpass.set_index_buffer(strand.index_buf.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..strand.index_count, 0, 0..strand.instance_count);
        }
    }

    /// Render the current frame into an offscreen texture and save it as a
    /// PNG next to the working directory.
    pub fn export_image(&mut self) -> Result<PathBuf> {
        let width = self.config.width;
        let height = self.config.height;
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("export_target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: EXPORT_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("export_render"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("export_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.background),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            let pipeline = match self.blend {
                BlendMode::Additive => &self.export_additive_pipeline,
                BlendMode::Normal => &self.export_normal_pipeline,
            };
            self.record_strands(&mut rpass, pipeline);
        }
        self.queue.submit(Some(encoder.finish()));

        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let path = PathBuf::from(format!("flower-{stamp}.png"));
        save_texture_png(&self.device, &self.queue, &texture, width, height, &path)?;
        Ok(path)
    }
}

fn make_strand_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("strand_bg"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer,
                offset: 0,
                size: wgpu::BufferSize::new(std::mem::size_of::<StrandUniform>() as u64),
            }),
        }],
    })
}

fn build_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    blend: wgpu::BlendState,
) -> wgpu::RenderPipeline {
    let vertex_buffers = [
        // slot 0: ribbon vertices
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RibbonVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        },
        // slot 1: per-stem rotation
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<StemData>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32,
                offset: 0,
                shader_location: 2,
            }],
        },
    ];
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("flower_pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &vertex_buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}
