use crate::assets::DecodedImage;
use anyhow::anyhow;
use gallery_core::constants::SHADOW_MAP_SIZE;
use gallery_core::mesh::{unit_cube, unit_plane};
use gallery_core::scene::{Primitive, RenderQuality, Shape, SpotLight, TextureSlot};
use gallery_core::uniforms::{Globals, ModelUniform};
use gallery_core::{CameraState, SceneDesc};
use wgpu::util::DeviceExt;
use web_sys as web;

mod helpers;
mod targets;
use helpers::{GpuMesh, DEPTH_FORMAT};
use targets::RenderTargets;

/// One primitive on the GPU: its model uniform and the material it samples.
struct DrawItem {
    shape: MeshKind,
    double_sided: bool,
    cast_shadow: bool,
    model_bg: wgpu::BindGroup,
    // None samples the shared white texture
    material_bg: Option<wgpu::BindGroup>,
    _model_buf: wgpu::Buffer,
    _texture: Option<wgpu::Texture>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum MeshKind {
    Cube,
    Plane,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    view_format: wgpu::TextureFormat,
    targets: RenderTargets,

    scene_pipeline: wgpu::RenderPipeline,
    double_sided_pipeline: wgpu::RenderPipeline,
    shadow_pipeline: Option<wgpu::RenderPipeline>,

    globals: Globals,
    globals_buf: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,
    shadow_globals_bg: wgpu::BindGroup,
    shadow_view: wgpu::TextureView,
    shadow_dirty: bool,

    model_bgl: wgpu::BindGroupLayout,
    material_bgl: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    white_bg: wgpu::BindGroup,

    cube: GpuMesh,
    plane: GpuMesh,
    draws: Vec<DrawItem>,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    /// Create the device for `canvas` and upload every static primitive.
    /// `sign` fills primitives that use the welcome-sign texture.
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        scene: &SceneDesc,
        sign: Option<&DecodedImage>,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);
        let quality = scene.quality;

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: power_preference(&quality),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow!("No WebGPU adapter"))?;
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
            .map_err(|e| anyhow!(format!("request_device error: {:?}", e)))?;

        // WebGPU canvases usually only offer non-sRGB formats; render through
        // an sRGB view of the same texture instead.
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow!("surface reports no formats"))?;
        let view_format = format.add_srgb_suffix();
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
            view_formats: if view_format != format {
                vec![view_format]
            } else {
                vec![]
            },
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let samples = quality.msaa_samples.max(1);
        let targets = RenderTargets::new(&device, width, height, view_format, samples);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(gallery_core::SCENE_WGSL.into()),
        });

        // Bind group layouts: 0 globals (+ shadow map), 1 model, 2 material
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[
                helpers::uniform_entry(0),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Depth,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
        });
        // The shadow pass writes the shadow map, so it must not also bind it.
        let shadow_globals_bgl =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("shadow_globals_bgl"),
                entries: &[helpers::uniform_entry(0)],
            });
        let model_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("model_bgl"),
            entries: &[helpers::uniform_entry(0)],
        });
        let material_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let scene_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_layout"),
            bind_group_layouts: &[&globals_bgl, &model_bgl, &material_bgl],
            push_constant_ranges: &[],
        });
        let scene_pipeline = helpers::make_scene_pipeline(
            &device,
            &scene_layout,
            &shader,
            view_format,
            samples,
            Some(wgpu::Face::Back),
        );
        let double_sided_pipeline = helpers::make_scene_pipeline(
            &device,
            &scene_layout,
            &shader,
            view_format,
            samples,
            None,
        );
        let shadow_pipeline = quality.shadows.then(|| {
            let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("shadow_layout"),
                bind_group_layouts: &[&shadow_globals_bgl, &model_bgl],
                push_constant_ranges: &[],
            });
            helpers::make_shadow_pipeline(&device, &layout, &shader)
        });

        // Without shadows a 1x1 map keeps the bind group valid.
        let shadow_size = if quality.shadows { SHADOW_MAP_SIZE } else { 1 };
        let (_, shadow_view) = helpers::create_attachment(
            &device,
            "shadow_map",
            shadow_size,
            shadow_size,
            DEPTH_FORMAT,
            1,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        let shadow_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("shadow_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });

        let globals = Globals::from_scene(scene);
        let globals_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals"),
            contents: bytemuck::bytes_of(&globals),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buf.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&shadow_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&shadow_sampler),
                },
            ],
        });
        let shadow_globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("shadow_globals_bg"),
            layout: &shadow_globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buf.as_entire_binding(),
            }],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let white = DecodedImage {
            width: 1,
            height: 1,
            rgba: vec![255; 4],
        };
        let (_, white_view) = helpers::upload_rgba(&device, &queue, "white", &white);
        let white_bg = material_bind_group(&device, &material_bgl, &white_view, &sampler);

        let cube = GpuMesh::new(&device, "unit_cube", &unit_cube());
        let plane = GpuMesh::new(&device, "unit_plane", &unit_plane());

        let [r, g, b] = scene.background;
        let mut gpu = Self {
            surface,
            device,
            queue,
            config,
            view_format,
            targets,
            scene_pipeline,
            double_sided_pipeline,
            shadow_pipeline,
            globals,
            globals_buf,
            globals_bg,
            shadow_globals_bg,
            shadow_view,
            shadow_dirty: true,
            model_bgl,
            material_bgl,
            sampler,
            white_bg,
            cube,
            plane,
            draws: Vec::new(),
            width,
            height,
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
        };
        for prim in &scene.primitives {
            let image = match prim.texture {
                TextureSlot::WelcomeSign => sign,
                _ => None,
            };
            gpu.add_primitive(prim, image);
        }
        log::info!(
            "[render] ready {}x{} format={:?} msaa={} shadows={} primitives={}",
            width,
            height,
            view_format,
            samples,
            quality.shadows,
            gpu.draws.len()
        );
        Ok(gpu)
    }

    /// Upload one primitive. A textured primitive without an image falls
    /// back to its flat colour.
    pub fn add_primitive(&mut self, prim: &Primitive, image: Option<&DecodedImage>) {
        let model = ModelUniform::from_primitive(prim);
        let model_buf = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(prim.label.as_str()),
                contents: bytemuck::bytes_of(&model),
                usage: wgpu::BufferUsages::UNIFORM,
            });
        let model_bg = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(prim.label.as_str()),
            layout: &self.model_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: model_buf.as_entire_binding(),
            }],
        });
        let (texture, material_bg) = match image {
            Some(image) => {
                let (tex, view) =
                    helpers::upload_rgba(&self.device, &self.queue, &prim.label, image);
                let bg =
                    material_bind_group(&self.device, &self.material_bgl, &view, &self.sampler);
                (Some(tex), Some(bg))
            }
            None => (None, None),
        };
        if prim.cast_shadow {
            self.shadow_dirty = true;
        }
        log::debug!("[render] + {}", prim.label);
        self.draws.push(DrawItem {
            shape: match prim.shape {
                Shape::Cuboid { .. } => MeshKind::Cube,
                Shape::Plane { .. } => MeshKind::Plane,
            },
            double_sided: prim.double_sided,
            cast_shadow: prim.cast_shadow,
            model_bg,
            material_bg,
            _model_buf: model_buf,
            _texture: texture,
        });
    }

    /// Returns false when every spotlight slot is taken.
    pub fn add_spot_light(&mut self, light: &SpotLight) -> bool {
        self.globals.push_spot(light)
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        let (width, height) = (width.max(1), height.max(1));
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.targets.recreate(&self.device, width, height);
    }

    pub fn render(&mut self, camera: &CameraState) {
        self.globals.set_camera(camera);
        self.queue
            .write_buffer(&self.globals_buf, 0, bytemuck::bytes_of(&self.globals));

        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => return,
            Err(e) => {
                log::error!("[render] surface error: {:?}", e);
                return;
            }
        };
        let frame_view = frame.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.view_format),
            ..Default::default()
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame"),
            });
        if self.shadow_dirty {
            self.encode_shadow_pass(&mut encoder);
            self.shadow_dirty = false;
        }
        {
            let (view, resolve_target) = match &self.targets.msaa_view {
                Some(msaa) => (msaa, Some(&frame_view)),
                None => (&frame_view, None),
            };
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_bind_group(0, &self.globals_bg, &[]);
            for double_sided in [false, true] {
                pass.set_pipeline(if double_sided {
                    &self.double_sided_pipeline
                } else {
                    &self.scene_pipeline
                });
                for item in self.draws.iter().filter(|d| d.double_sided == double_sided) {
                    pass.set_bind_group(1, &item.model_bg, &[]);
                    let material = item.material_bg.as_ref().unwrap_or(&self.white_bg);
                    pass.set_bind_group(2, material, &[]);
                    let mesh = self.mesh(item.shape);
                    pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                    pass.draw_indexed(0..mesh.index_count, 0, 0..1);
                }
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
    }

    fn encode_shadow_pass(&self, encoder: &mut wgpu::CommandEncoder) {
        let Some(pipeline) = &self.shadow_pipeline else {
            return;
        };
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("shadow_pass"),
            color_attachments: &[],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.shadow_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, &self.shadow_globals_bg, &[]);
        for item in self.draws.iter().filter(|d| d.cast_shadow) {
            pass.set_bind_group(1, &item.model_bg, &[]);
            let mesh = self.mesh(item.shape);
            pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }

    fn mesh(&self, kind: MeshKind) -> &GpuMesh {
        match kind {
            MeshKind::Cube => &self.cube,
            MeshKind::Plane => &self.plane,
        }
    }
}

fn power_preference(quality: &RenderQuality) -> wgpu::PowerPreference {
    if quality.high_performance {
        wgpu::PowerPreference::HighPerformance
    } else {
        wgpu::PowerPreference::LowPower
    }
}

fn material_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("material_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
