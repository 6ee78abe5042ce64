use anyhow::Result;
use clap::{Parser, ValueEnum};
use egui::Context as EguiContext;
use glam::Vec2;
use skirmish_camera::CameraMode;
use skirmish_input::{Action, InputState, Key};
use skirmish_kernel::{Battle, BattleConfig};
use skirmish_render::{Projection, ViewParams};
use skirmish_render_wgpu::WgpuRenderer;
use skirmish_tools::BattleInspector;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{
    DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent,
};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Battle events kept for the HUD.
const EVENT_HISTORY: usize = 8;

/// Pixels of touchpad scroll per wheel notch.
const PIXELS_PER_LINE: f32 = 40.0;

#[derive(Parser)]
#[command(name = "skirmish-desktop", about = "Turn-based tactical battlefield")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Terrain seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Starting camera
    #[arg(long, value_enum, default_value_t = CameraArg::ThirdPerson)]
    camera: CameraArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum CameraArg {
    FirstPerson,
    ThirdPerson,
    FreeFly,
}

impl From<CameraArg> for CameraMode {
    fn from(arg: CameraArg) -> Self {
        match arg {
            CameraArg::FirstPerson => CameraMode::FirstPerson,
            CameraArg::ThirdPerson => CameraMode::ThirdPerson,
            CameraArg::FreeFly => CameraMode::FreeFly,
        }
    }
}

fn key_from_code(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyH => Key::H,
        KeyCode::Space => Key::Space,
        KeyCode::Escape => Key::Escape,
        _ => return None,
    };
    Some(key)
}

/// Application state.
struct AppState {
    battle: Battle,
    input: InputState,
    projection: Projection,
    show_hud: bool,
    quit_requested: bool,
    window_size: Vec2,
    recent_events: VecDeque<String>,
}

impl AppState {
    fn new(config: &BattleConfig) -> Result<Self> {
        Ok(Self {
            battle: Battle::new(config)?,
            input: InputState::new(),
            projection: Projection::default(),
            show_hud: true,
            quit_requested: false,
            window_size: Vec2::ONE,
            recent_events: VecDeque::with_capacity(EVENT_HISTORY),
        })
    }

    fn handle_key(&mut self, code: KeyCode, pressed: bool) {
        let Some(key) = key_from_code(code) else {
            return;
        };
        if let Some(action) = self.input.key(key, pressed) {
            self.apply(action);
        }
    }

    fn apply(&mut self, action: Action) {
        if self.battle.handle_action(action) {
            return;
        }
        match action {
            Action::Perspective => self.projection = Projection::Perspective,
            Action::Orthographic => self.projection = Projection::Orthographic,
            Action::ToggleHud => self.show_hud = !self.show_hud,
            Action::Quit => self.quit_requested = true,
            _ => {}
        }
        tracing::debug!(?action, projection = self.projection.label(), "front-end action");
    }

    /// One frame of simulation.
    fn tick(&mut self) {
        self.battle.tick(&self.input);
        self.input.end_tick();
        for event in self.battle.drain_events() {
            if self.recent_events.len() == EVENT_HISTORY {
                self.recent_events.pop_front();
            }
            self.recent_events.push_back(event.to_string());
        }
    }

    fn view(&self) -> ViewParams {
        ViewParams::from_battle(&self.battle, self.projection)
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_hud {
            return;
        }

        let summary = BattleInspector::summary(&self.battle);

        egui::SidePanel::left("hud")
            .default_width(300.0)
            .show(ctx, |ui| {
                ui.heading("Skirmish");
                ui.separator();
                ui.label(format!(
                    "Round: {}  Tick: {}",
                    summary.round + 1,
                    summary.tick
                ));
                if let Some(seed) = summary.seed {
                    ui.label(format!("Seed: {seed}"));
                }
                ui.label(format!(
                    "Camera: {}  ({})",
                    self.battle.camera_mode(),
                    self.projection.label()
                ));
                ui.label(format!(
                    "Standing: team 1 {} / team 2 {}",
                    summary.team_one_standing, summary.team_two_standing
                ));
                ui.separator();

                ui.heading("Units");
                for unit in BattleInspector::list_units(&self.battle) {
                    ui.monospace(unit.to_string());
                }

                ui.separator();
                ui.heading("Commands");
                ui.horizontal(|ui| {
                    if ui.button("Attack (E)").clicked() {
                        self.battle.handle_action(Action::Attack);
                    }
                    if ui.button("Pass turn (Space)").clicked() {
                        self.battle.handle_action(Action::PassTurn);
                    }
                });
                ui.horizontal(|ui| {
                    if ui.button("1st / 3rd person (F)").clicked() {
                        self.battle.handle_action(Action::TogglePerson);
                    }
                    if ui.button("Free fly (L)").clicked() {
                        self.battle.handle_action(Action::FreeFly);
                    }
                });

                ui.separator();
                ui.heading("Log");
                for line in &self.recent_events {
                    ui.small(line);
                }

                ui.separator();
                ui.small("WASD: Move | LMB drag: Look | Wheel: Zoom | P/O: Projection | H: HUD");
            });
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
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
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
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }

    fn redraw(&mut self) {
        self.state.tick();

        let (Some(window), Some(surface), Some(device), Some(queue), Some(config)) = (
            &self.window,
            &self.surface,
            &self.device,
            &self.queue,
            &self.config,
        ) else {
            return;
        };
        let (Some(egui_winit), Some(egui_renderer)) =
            (&mut self.egui_winit, &mut self.egui_renderer)
        else {
            return;
        };

        let output = match surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                surface.configure(device, config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let target = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        if let Some(renderer) = &self.renderer {
            let aspect = config.width as f32 / config.height.max(1) as f32;
            renderer.render(
                device,
                queue,
                &target,
                &self.state.battle,
                &self.state.view(),
                aspect,
            );
        }

        let raw_input = egui_winit.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            self.state.draw_ui(ctx);
        });
        egui_winit.handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [config.width, config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui_encoder"),
        });
        egui_renderer.update_buffers(device, queue, &mut encoder, &paint_jobs, &screen_descriptor);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        output.present();
        window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Skirmish")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("skirmish_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        self.state.window_size = Vec2::new(config.width as f32, config.height as f32);

        let renderer = WgpuRenderer::new(&device, surface_format, size.width, size.height);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

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
                    self.state.window_size =
                        Vec2::new(config.width as f32, config.height as f32);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::Focused(false) => {
                self.state.input.release_all();
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
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: btn_state,
                ..
            } => {
                self.state
                    .input
                    .set_dragging(btn_state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let cursor = Vec2::new(position.x as f32, position.y as f32);
                self.state.input.cursor_at(cursor, self.state.window_size);
            }
            WindowEvent::CursorLeft { .. } => {
                self.state.input.cursor_left();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
                };
                self.state.input.scrolled(amount);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                if self.state.quit_requested {
                    tracing::info!("quit requested");
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.state
                .input
                .pointer_moved(delta.0 as f32, delta.1 as f32);
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

    tracing::info!("skirmish-desktop starting");

    let config = BattleConfig {
        seed: cli.seed,
        camera: cli.camera.into(),
        ..BattleConfig::default()
    };
    let state = AppState::new(&config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(&BattleConfig {
            seed: Some(4),
            ..BattleConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn front_end_keys_stay_in_the_app() {
        let mut s = state();
        s.handle_key(KeyCode::KeyO, true);
        assert_eq!(s.projection, Projection::Orthographic);
        s.handle_key(KeyCode::KeyH, true);
        assert!(!s.show_hud);
        s.handle_key(KeyCode::Escape, true);
        assert!(s.quit_requested);
    }

    #[test]
    fn pass_turn_reaches_the_log() {
        let mut s = state();
        s.handle_key(KeyCode::Space, true);
        s.tick();
        assert_eq!(s.battle.active_index(), 1);
        assert_eq!(s.recent_events.len(), 1);
        assert!(s.battle.events().is_empty());
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        let mut s = state();
        s.handle_key(KeyCode::KeyQ, true);
        assert!(!s.input.forward);
        assert_eq!(s.battle.tick_count(), 0);
    }
}
