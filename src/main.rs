use std::sync::Arc;

use anyhow::{Context as _, Result};
use glam::Vec3;
use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window},
};

use strider::config::AppConfig;
use strider::controller::{
    AvatarConfig, AvatarController, FrameContext, InputEvent, OrbitConfig, PhysicsWorld,
};
use strider::model::{Camera, Scene};
use strider::view::{render, GpuContext};
use strider::{logging, ui};

const AVATAR_HALF_EXTENTS: Vec3 = Vec3::new(0.5, 1.0, 0.5);
const AVATAR_MASS: f32 = 70.0;
const AVATAR_SPAWN: Vec3 = Vec3::new(0.0, 4.0, 0.0);
const SUN_DIR: [f32; 3] = [0.4, -1.0, 0.3];

struct App {
    // Core GPU resources
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    window: Arc<Window>,

    // Rendering state
    pipeline: wgpu::RenderPipeline,
    depth_view: wgpu::TextureView,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,

    // egui
    egui_renderer: egui_wgpu::Renderer,
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,

    // Game state
    camera: Camera,
    scene: Scene,
    frame: FrameContext,
    captured: bool,

    // Frame timing
    fps: f32,
    frame_count: u32,
    fps_timer: f32,
}

impl App {
    async fn new(window: Arc<Window>, app_config: &AppConfig) -> Result<Self> {
        let size = window.inner_size();

        let gpu = GpuContext::new(window.clone(), size.width.max(1), size.height.max(1)).await?;
        let device = gpu.device.clone();
        let queue = gpu.queue.clone();
        let config = gpu.config.clone();

        let depth_format = wgpu::TextureFormat::Depth32Float;
        let (_, depth_view) = render::create_depth_texture(&device, config.width, config.height);

        let camera = Camera::new(
            config.width,
            config.height,
            app_config.camera.fov_deg.to_radians(),
        );

        let camera_resources = render::create_camera_resources(&device);
        let camera_buffer = camera_resources.camera_buffer;
        let lighting_buffer = camera_resources.lighting_buffer;
        let camera_bgl = camera_resources.bind_group_layout;
        let camera_bind_group = camera_resources.camera_bind_group;

        let cam_uniform = render::CameraUniform {
            view_proj: camera.view_proj().to_cols_array_2d(),
        };
        queue.write_buffer(&camera_buffer, 0, bytemuck::bytes_of(&cam_uniform));

        // The sun never moves; one upload is enough.
        let lighting = render::LightingUniform {
            sun_dir: SUN_DIR,
            sun_intensity: 1.0,
            ambient: 0.35,
            _pad1: 0.0,
            _pad2: 0.0,
            _pad3: 0.0,
        };
        queue.write_buffer(&lighting_buffer, 0, bytemuck::bytes_of(&lighting));

        let model_bgl = render::create_model_bind_group_layout(&device);
        let pipeline =
            render::create_scene_pipeline(&device, config.format, &camera_bgl, &model_bgl, depth_format);

        // Initialize egui
        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );
        let egui_renderer =
            egui_wgpu::Renderer::new(&device, config.format, egui_wgpu::RendererOptions::default());

        // Scene and simulation
        let scene = Scene::new(&device, &model_bgl, AVATAR_HALF_EXTENTS, AVATAR_SPAWN);

        let sim = &app_config.sim;
        let mut physics = PhysicsWorld::new(
            Vec3::new(0.0, sim.gravity_y, 0.0),
            sim.fixed_dt(),
            sim.max_substeps,
        );
        physics.spawn_ground();
        let avatar_body = physics.spawn_avatar(AVATAR_SPAWN, AVATAR_HALF_EXTENTS, AVATAR_MASS);

        let controls = &app_config.controls;
        let avatar_controller = AvatarController::new(AvatarConfig {
            move_speed: controls.move_speed,
            jump_speed: controls.jump_speed,
            rest_height: AVATAR_HALF_EXTENTS.y,
            ..AvatarConfig::default()
        });
        let orbit_config = OrbitConfig {
            sensitivity: controls.mouse_sensitivity,
            invert_y: controls.invert_y,
            radius: app_config.camera.orbit_radius,
            target_offset: app_config.camera.target_offset,
        };

        let frame = FrameContext::new(physics, avatar_body, avatar_controller, orbit_config);

        tracing::info!(
            width = config.width,
            height = config.height,
            "scene ready, starting frame loop"
        );

        Ok(Self {
            surface: gpu.surface,
            device,
            queue,
            config,
            size,
            window,
            pipeline,
            depth_view,
            camera_buffer,
            camera_bind_group,
            egui_renderer,
            egui_state,
            egui_ctx,
            camera,
            scene,
            frame,
            captured: false,
            fps: 0.0,
            frame_count: 0,
            fps_timer: 0.0,
        })
    }

    fn input(&mut self, event: &WindowEvent) -> bool {
        // First let egui process the event
        let egui_captured = self
            .egui_state
            .on_window_event(self.window.as_ref(), event)
            .consumed;
        if egui_captured {
            return true;
        }

        match event {
            WindowEvent::KeyboardInput {
                event: KeyEvent { state, physical_key, .. },
                ..
            } => {
                if let PhysicalKey::Code(code) = physical_key {
                    let pressed = *state == ElementState::Pressed;
                    self.frame.input.push(InputEvent::Key { code: *code, pressed });

                    // Release the pointer on Escape
                    if pressed && *code == KeyCode::Escape {
                        self.set_capture(false);
                    }
                }
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if *state == ElementState::Pressed && *button == MouseButton::Left {
                    self.set_capture(true);
                }
                true
            }
            WindowEvent::Focused(false) => {
                self.frame.input.push(InputEvent::FocusLost);
                self.set_capture(false);
                true
            }
            _ => false,
        }
    }

    fn set_capture(&mut self, want: bool) {
        if want == self.captured {
            return;
        }
        if want {
            let grabbed = self
                .window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined))
                .is_ok();
            if grabbed {
                self.window.set_cursor_visible(false);
                self.captured = true;
                self.frame.input.push(InputEvent::CaptureChanged(true));
            }
        } else {
            let _ = self.window.set_cursor_grab(CursorGrabMode::None);
            self.window.set_cursor_visible(true);
            self.captured = false;
            self.frame.input.push(InputEvent::CaptureChanged(false));
        }
    }

    fn handle_mouse_motion(&mut self, dx: f64, dy: f64) {
        // Capture gating happens when the input queue is drained.
        self.frame.input.push(InputEvent::MouseMotion {
            dx: dx as f32,
            dy: dy as f32,
        });
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);

            let (_, depth_view) =
                render::create_depth_texture(&self.device, new_size.width, new_size.height);
            self.depth_view = depth_view;
            self.camera.set_aspect(new_size.width, new_size.height);
        }
    }

    fn update(&mut self) {
        let dt = self.frame.update(&mut self.scene, &mut self.camera);

        // Update FPS
        self.frame_count += 1;
        self.fps_timer += dt;
        if self.fps_timer >= 1.0 {
            self.fps = self.frame_count as f32 / self.fps_timer;
            self.frame_count = 0;
            self.fps_timer = 0.0;
        }

        // Upload frame uniforms
        let view_proj = self.camera.view_proj();
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(view_proj.as_ref()));
        self.scene.write_transforms(&self.queue);
    }

    fn render_ui(&mut self) -> (Vec<egui::epaint::ClippedShape>, egui::TexturesDelta) {
        let info = ui::DebugInfo {
            fps: self.fps,
            avatar_pos: self.frame.physics.position(self.frame.avatar_body).unwrap_or(Vec3::ZERO),
            avatar_vel: self.frame.physics.linvel(self.frame.avatar_body).unwrap_or(Vec3::ZERO),
            orbit: self.frame.orbit,
            captured: self.captured,
        };

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let output = self.egui_ctx.run(raw_input, |ctx| {
            ui::draw_overlay(ctx, &info);
        });

        self.egui_state
            .handle_platform_output(&self.window, output.platform_output);
        (output.shapes, output.textures_delta)
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let (shapes, textures_delta) = self.render_ui();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: self.window.scale_factor() as f32,
        };
        let primitives = self
            .egui_ctx
            .tessellate(shapes, self.window.scale_factor() as f32);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        // Upload egui textures
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &primitives,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.5,
                            g: 0.8,
                            b: 1.0,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

            for renderable in [&self.scene.ground, &self.scene.avatar] {
                render_pass.set_bind_group(1, &renderable.bind_group, &[]);
                render_pass.set_vertex_buffer(0, renderable.mesh.vertex_buffer.slice(..));
                render_pass
                    .set_index_buffer(renderable.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..renderable.mesh.index_count, 0, 0..1);
            }
        }

        // Render egui on top
        {
            let egui_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.egui_renderer
                .render(&mut egui_pass.forget_lifetime(), &primitives, &screen_descriptor);
        }

        // Cleanup egui textures
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn main() -> Result<()> {
    logging::init();

    let app_config = AppConfig::load_or_default("strider.json");

    let event_loop = EventLoop::new().context("creating event loop")?;
    let window_attributes = Window::default_attributes()
        .with_title(app_config.window.title.clone())
        .with_inner_size(LogicalSize::new(
            app_config.window.width,
            app_config.window.height,
        ));
    let window = Arc::new(
        event_loop
            .create_window(window_attributes)
            .context("creating window")?,
    );

    let mut app = pollster::block_on(App::new(window.clone(), &app_config))?;

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { ref event, window_id } if window_id == app.window.id() => {
                if !app.input(event) {
                    match event {
                        WindowEvent::CloseRequested => elwt.exit(),
                        WindowEvent::Resized(physical_size) => {
                            app.resize(*physical_size);
                        }
                        WindowEvent::RedrawRequested => {
                            app.update();

                            match app.render() {
                                Ok(_) => {}
                                Err(wgpu::SurfaceError::Lost) => app.resize(app.size),
                                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                                Err(e) => tracing::warn!("surface error: {e:?}"),
                            }
                        }
                        _ => {}
                    }
                }
            }
            Event::DeviceEvent {
                event: winit::event::DeviceEvent::MouseMotion { delta },
                ..
            } => {
                app.handle_mouse_motion(delta.0, delta.1);
            }
            Event::AboutToWait => {
                app.window.request_redraw();
            }
            _ => {}
        })
        .context("running event loop")?;

    Ok(())
}
