// Renderer module for dunescape

use winit::{
    event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};
use wgpu::{Adapter, Buffer, Instance, RenderPipeline};
use std::sync::Arc;
use glam::Mat4;
use std::time::Instant;

use crate::camera::OrbitCamera;
use crate::math;
use crate::mesh::Vertex;
use crate::scene::SceneNode;
use crate::world;

const FOV_Y_DEG: f32 = 45.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;

pub struct Renderer {
    instance: Instance,
    adapter: Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    window: Arc<winit::window::Window>,
    pipeline: RenderPipeline,
    globals_buffer: Buffer,
    globals_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
    scene: SceneNode,
    camera: OrbitCamera,
    start_time: Instant,
    keys_pressed: KeyboardState,
}

#[derive(Default)]
struct KeyboardState {
    w: bool,
    a: bool,
    s: bool,
    d: bool,
}

// Frame-wide shader uniforms (group 0).
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
}

impl Renderer {
    pub async fn new(event_loop: &EventLoop<()>) -> Self {
        // Create window with Arc for shared ownership
        let window = Arc::new(WindowBuilder::new()
            .with_title("dunescape")
            .build(event_loop)
            .unwrap());

        // Initialize wgpu
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        // Get surface from window
        let surface = instance.create_surface(window.clone()).expect("Failed to create surface");

        // Request adapter
        let adapter = instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }).await.unwrap();
        log::info!("rendering on {}", adapter.get_info().name);

        let (device, queue) = adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Renderer Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::default(),
            },
            None, // Trace path
        ).await.unwrap();

        // Get surface capabilities
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps.formats.iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        // Configure surface
        let size = window.inner_size();
        surface.configure(&device, &wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        });
        let depth_view = create_depth_view(&device, size.width, size.height);

        // Load shader
        let shader_code = include_str!("shader.wgsl");
        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shader"),
            source: wgpu::ShaderSource::Wgsl(shader_code.into()),
        });

        // Define vertex buffer layout
        let vertex_buffer_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        };

        // Group 0: frame globals. Group 1: per-node matrix and opacity.
        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Globals Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });
        let node_layout = SceneNode::bind_group_layout(&device);

        // Create render pipeline
        let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[&globals_layout, &node_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: "vs_main",
                buffers: &[vertex_buffer_layout],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Wings, fins and the sky dome are viewed from both sides.
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        use wgpu::util::DeviceExt;
        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Globals Buffer"),
            contents: bytemuck::cast_slice(&[Globals {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Globals Bind Group"),
            layout: &globals_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                },
            ],
        });

        // Build the scene and upload every node's buffers.
        let mut scene = world::build();
        scene.setup(&device, &node_layout);
        log::info!("scene ready: {} vertices", scene.vertex_count());

        let mut camera = OrbitCamera::new(20.0);
        camera.set_surface_size(size.width as f32, size.height as f32);

        Self {
            instance,
            adapter,
            device,
            queue,
            surface,
            window,
            pipeline,
            globals_buffer,
            globals_bind_group,
            depth_view,
            surface_format,
            scene,
            camera,
            start_time: Instant::now(),
            keys_pressed: KeyboardState::default(),
        }
    }

    pub fn run(mut self, event_loop: EventLoop<()>) {
        let _ = event_loop.run(move |event, target| {
            target.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent {
                    window_id,
                    event: WindowEvent::CloseRequested,
                } if window_id == self.window.id() => {
                    target.exit();
                }
                Event::WindowEvent {
                    event: WindowEvent::Resized(physical_size),
                    window_id,
                } if window_id == self.window.id() => {
                    self.resize(physical_size);
                }
                Event::AboutToWait => {
                    self.window.request_redraw();
                }
                Event::WindowEvent {
                    event: WindowEvent::RedrawRequested,
                    window_id,
                } if window_id == self.window.id() => {
                    self.update_and_render();
                }
                Event::WindowEvent {
                    event: WindowEvent::KeyboardInput { event, .. },
                    window_id,
                } if window_id == self.window.id() => {
                    self.handle_keyboard_input(event);
                }
                Event::WindowEvent {
                    event: WindowEvent::MouseInput { state, button, .. },
                    window_id,
                } if window_id == self.window.id() => {
                    match (state, button) {
                        (ElementState::Pressed, MouseButton::Left) => {
                            self.camera.begin_drag(false);
                        }
                        (ElementState::Pressed, MouseButton::Right) => {
                            self.camera.begin_drag(true);
                        }
                        (ElementState::Released, _) => self.camera.end_drag(),
                        _ => {}
                    }
                }
                Event::WindowEvent {
                    event: WindowEvent::CursorMoved { position, .. },
                    window_id,
                } if window_id == self.window.id() => {
                    self.camera.cursor_moved(position.x as f32, position.y as f32);
                }
                Event::WindowEvent {
                    event: WindowEvent::MouseWheel { delta, .. },
                    window_id,
                } if window_id == self.window.id() => {
                    let lines = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y * 20.0,
                        MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                    };
                    self.camera.zoom(lines);
                }
                _ => {}
            }
        });
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        let surface_caps = self.surface.get_capabilities(&self.adapter);

        self.surface.configure(&self.device, &wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: self.surface_format,
            width: new_size.width,
            height: new_size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        });
        self.depth_view = create_depth_view(&self.device, new_size.width, new_size.height);
        self.camera.set_surface_size(new_size.width as f32, new_size.height as f32);
    }

    fn handle_keyboard_input(&mut self, event: KeyEvent) {
        if let PhysicalKey::Code(keycode) = event.physical_key {
            let is_pressed = event.state == ElementState::Pressed;
            match keycode {
                KeyCode::KeyW => self.keys_pressed.w = is_pressed,
                KeyCode::KeyA => self.keys_pressed.a = is_pressed,
                KeyCode::KeyS => self.keys_pressed.s = is_pressed,
                KeyCode::KeyD => self.keys_pressed.d = is_pressed,
                _ => {}
            }
        }
    }

    fn update_and_render(&mut self) {
        // WASD nudges the creature spin the same way a drag does.
        if self.keys_pressed.w {
            self.camera.key_spin(0.0, -1.0);
        }
        if self.keys_pressed.s {
            self.camera.key_spin(0.0, 1.0);
        }
        if self.keys_pressed.a {
            self.camera.key_spin(-1.0, 0.0);
        }
        if self.keys_pressed.d {
            self.camera.key_spin(1.0, 0.0);
        }
        self.camera.update();

        // Pose the creatures for this frame.
        let elapsed = self.start_time.elapsed().as_secs_f32();
        world::animate(&mut self.scene, elapsed, &self.camera.view());

        let size = self.window.inner_size();
        let aspect_ratio = size.width as f32 / size.height.max(1) as f32;
        let projection = math::perspective(FOV_Y_DEG, aspect_ratio, Z_NEAR, Z_FAR);
        let view_proj = projection * self.camera.view_matrix();

        self.queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::cast_slice(&[Globals {
                view_proj: view_proj.to_cols_array_2d(),
            }]),
        );

        self.render();
    }

    fn render(&mut self) {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(_) => {
                self.resize(self.window.inner_size());
                return;
            }
        };

        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        // Dusk haze behind the sky dome's open rim.
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.93,
                            g: 0.61,
                            b: 0.32,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.globals_bind_group, &[]);
            self.scene.render(&mut render_pass, &self.queue, Mat4::IDENTITY);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth32Float,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
