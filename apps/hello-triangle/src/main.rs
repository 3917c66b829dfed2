use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glam::Mat4;
use learngl_camera::{Camera, CameraConfig, CameraMovement};
use learngl_input::{Action, CursorTracker, InputState, apply_action};
use learngl_render::{BufferMode, PolygonMode, TriangleScene};
use learngl_render_wgpu::{WgpuRenderer, wireframe_features};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

const SCR_WIDTH: u32 = 800;
const SCR_HEIGHT: u32 = 600;
const NEAR: f32 = 0.1;
const FAR: f32 = 100.0;
/// Touchpad pixels per scroll-wheel line.
const PIXELS_PER_LINE: f32 = 20.0;

#[derive(Parser)]
#[command(name = "hello-triangle", about = "Draw a triangle (or an indexed quad)")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// How vertices reach the GPU
    #[arg(long, value_enum)]
    buffer: BufferArg,

    /// Draw polygon edges only
    #[arg(long)]
    line: bool,

    /// Fly around the scene with WASD, mouse and scroll wheel
    #[arg(long)]
    camera: bool,

    /// YAML camera settings (implies --camera)
    #[arg(long)]
    camera_config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum BufferArg {
    /// Vertex buffer only, one triangle
    Vertex,
    /// Vertex + index buffer, two triangles
    Indexed,
}

impl From<BufferArg> for BufferMode {
    fn from(arg: BufferArg) -> Self {
        match arg {
            BufferArg::Vertex => BufferMode::Vertex,
            BufferArg::Indexed => BufferMode::Indexed,
        }
    }
}

fn map_key(key: KeyCode) -> Action {
    match key {
        KeyCode::KeyW => Action::Move(CameraMovement::Forward),
        KeyCode::KeyS => Action::Move(CameraMovement::Backward),
        KeyCode::KeyA => Action::Move(CameraMovement::Left),
        KeyCode::KeyD => Action::Move(CameraMovement::Right),
        KeyCode::Tab => Action::ToggleWireframe,
        KeyCode::Escape => Action::Quit,
        _ => Action::Noop,
    }
}

/// Scroll amount in wheel lines, positive zooms in.
fn scroll_offset(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
    }
}

/// Prefer an sRGB surface format, else whatever the surface lists first.
fn pick_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .find(|f| f.is_srgb())
        .copied()
        .or_else(|| formats.first().copied())
}

/// Application state.
struct AppState {
    scene: TriangleScene,
    camera: Option<Camera>,
    input: InputState,
    cursor: CursorTracker,
    /// Look from raw device motion instead of cursor positions.
    raw_mouse_look: bool,
    aspect: f32,
    last_frame: Instant,
}

impl AppState {
    fn new(scene: TriangleScene, camera: Option<Camera>) -> Self {
        Self {
            scene,
            camera,
            input: InputState::new(),
            cursor: CursorTracker::new(),
            raw_mouse_look: false,
            aspect: SCR_WIDTH as f32 / SCR_HEIGHT as f32,
            last_frame: Instant::now(),
        }
    }

    fn update(&mut self, dt: f32) {
        self.scene.transform = match &mut self.camera {
            Some(camera) => {
                self.input.update(camera, dt);
                camera.view_projection(self.aspect, NEAR, FAR)
            }
            None => Mat4::IDENTITY,
        };
    }

    /// Relative mouse motion; keeps working while the cursor is pinned.
    fn mouse_motion(&mut self, dx: f64, dy: f64) -> Option<Action> {
        if !self.raw_mouse_look {
            return None;
        }
        self.handle_action(
            Action::Look {
                dx: dx as f32,
                dy: -dy as f32,
            },
            true,
        )
    }

    /// Absolute cursor position, used for look only when raw motion is unavailable.
    fn cursor_moved(&mut self, x: f32, y: f32) -> Option<Action> {
        if self.raw_mouse_look {
            return None;
        }
        let (dx, dy) = self.cursor.offset(x, y)?;
        self.handle_action(Action::Look { dx, dy }, true)
    }

    /// Route an action to the camera. Returns the action if the app must handle it.
    fn handle_action(&mut self, action: Action, pressed: bool) -> Option<Action> {
        match action {
            Action::Move(direction) => {
                self.input.set_held(direction, pressed);
                None
            }
            Action::Look { .. } | Action::Zoom(_) => {
                if let Some(camera) = &mut self.camera {
                    apply_action(camera, &action);
                }
                None
            }
            Action::ToggleWireframe | Action::Quit if pressed => Some(action),
            _ => None,
        }
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<WgpuRenderer>,
}

impl GpuApp {
    fn new(state: AppState) -> Self {
        Self {
            state,
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
        }
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("LearnOpenGL")
            .with_inner_size(PhysicalSize::new(SCR_WIDTH, SCR_HEIGHT));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        if self.state.camera.is_some() {
            match window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
            {
                Ok(()) => self.state.raw_mouse_look = true,
                Err(e) => tracing::warn!("cursor grab unavailable, using cursor position: {e}"),
            }
            window.set_cursor_visible(false);
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no suitable GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("learngl_device"),
                required_features: wireframe_features(adapter.features()),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("failed to create device")?;

        device.on_uncaptured_error(Box::new(|e: wgpu::Error| {
            tracing::error!("wgpu error: {e}");
        }));

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format =
            pick_surface_format(&surface_caps.formats).context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        self.state.aspect = config.width as f32 / config.height as f32;

        let renderer = WgpuRenderer::new(
            &device,
            surface_format,
            self.state.scene.buffer_mode,
            self.state.scene.polygon_mode,
        );
        self.state.scene.polygon_mode = renderer.polygon_mode();

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn dispatch(&mut self, event_loop: &ActiveEventLoop, action: Action, pressed: bool) {
        let action = self.state.handle_action(action, pressed);
        self.respond(event_loop, action);
    }

    /// Handle what the app state passed back.
    fn respond(&mut self, event_loop: &ActiveEventLoop, action: Option<Action>) {
        match action {
            Some(Action::Quit) => event_loop.exit(),
            Some(Action::ToggleWireframe) => {
                if let (Some(renderer), Some(device)) = (&mut self.renderer, &self.device) {
                    renderer.set_polygon_mode(device, self.state.scene.polygon_mode.toggled());
                    self.state.scene.polygon_mode = renderer.polygon_mode();
                    tracing::info!("polygon mode {:?}", self.state.scene.polygon_mode);
                }
            }
            _ => {}
        }
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let dt = (now - self.state.last_frame).as_secs_f32().min(0.1);
        self.state.last_frame = now;
        self.state.update(dt);

        let (Some(surface), Some(device), Some(queue)) = (&self.surface, &self.device, &self.queue)
        else {
            return;
        };

        let output = match surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let Some(config) = &self.config {
                    surface.configure(device, config);
                }
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        if let Some(renderer) = &self.renderer {
            renderer.render(device, queue, &view, &self.state.scene);
        }

        output.present();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_gpu(event_loop) {
            tracing::error!("{e:#}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    self.state.aspect = config.width as f32 / config.height as f32;
                }
            }
            WindowEvent::Focused(false) => {
                self.state.input.clear();
                self.state.cursor.reset();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.dispatch(event_loop, map_key(key), key_state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let action = self
                    .state
                    .cursor_moved(position.x as f32, position.y as f32);
                self.respond(event_loop, action);
            }
            WindowEvent::CursorLeft { .. } => {
                self.state.cursor.reset();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.dispatch(event_loop, Action::Zoom(scroll_offset(delta)), true);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            let action = self.state.mouse_motion(delta.0, delta.1);
            self.respond(event_loop, action);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let polygon_mode = if cli.line {
        PolygonMode::Line
    } else {
        PolygonMode::Fill
    };
    let scene = TriangleScene::new(cli.buffer.into(), polygon_mode);

    let camera = match &cli.camera_config {
        Some(path) => Some(Camera::from_config(&CameraConfig::load(path)?)),
        None if cli.camera => Some(Camera::from_config(&CameraConfig {
            position: glam::Vec3::new(0.0, 0.0, 3.0),
            ..CameraConfig::default()
        })),
        None => None,
    };

    tracing::info!(
        "hello-triangle starting: buffer={} polygon={:?} camera={}",
        scene.buffer_mode.label(),
        scene.polygon_mode,
        camera.is_some()
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(AppState::new(scene, camera));
    event_loop.run_app(&mut app)?;

    Ok(())
}
