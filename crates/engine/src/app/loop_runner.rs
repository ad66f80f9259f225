use std::env;
use std::num::ParseIntError;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, KeyEvent, MouseButton, Touch, TouchPhase, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

use super::metrics::MetricsAccumulator;
use super::notify::ModalBanner;
use super::touch::TouchTracker;
use super::{
    DrawList, InputAction, InputSampler, InputSnapshot, KeyName, OverlayData, RawInputEvent,
    RenderError, Renderer, Scene, SceneCommand, TouchButton, TouchLayout, Vec2, Viewport,
};

pub const FPS_CAP_ENV_VAR: &str = "QUESTRUN_FPS_CAP";

const MOUSE_POINTER_ID: u64 = u64::MAX;

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub viewport: Viewport,
    pub window_scale: f64,
    pub max_render_fps: Option<u32>,
    pub metrics_log_interval: Duration,
    pub overlay_visible: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Questrun".to_string(),
            viewport: Viewport::default(),
            window_scale: 1.0,
            max_render_fps: Some(60),
            metrics_log_interval: Duration::from_secs(1),
            overlay_visible: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] RenderError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

/// Opens the window and drives `scene` once per presented frame until the
/// window closes or the scene asks to quit.
pub fn run_app(config: LoopConfig, scene: Box<dyn Scene>) -> Result<(), AppError> {
    let viewport = config.viewport;
    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                viewport.width as f64 * config.window_scale,
                viewport.height as f64 * config.window_scale,
            ))
            .with_min_inner_size(LogicalSize::new(viewport.width as f64, viewport.height as f64))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let mut renderer =
        Renderer::new(Arc::clone(&window), viewport).map_err(AppError::CreateRenderer)?;

    event_loop.set_control_flow(ControlFlow::Poll);

    let render_frame_target = target_frame_duration(resolve_fps_cap(config.max_render_fps));
    let metrics_log_interval = if config.metrics_log_interval.is_zero() {
        Duration::from_secs(1)
    } else {
        config.metrics_log_interval
    };

    let mut driver = FrameDriver::new(scene);
    driver.load(viewport);
    info!(
        viewport_width = viewport.width,
        viewport_height = viewport.height,
        fps_cap = %format_frame_target(render_frame_target),
        "loop_started"
    );

    let mut collector = InputCollector::new(TouchLayout::for_viewport(viewport));
    let mut overlay_visible = config.overlay_visible;
    let mut last_frame_instant = Instant::now();
    let mut last_present_instant = Instant::now();
    let mut metrics = MetricsAccumulator::new(metrics_log_interval, Instant::now());
    let mut last_applied_title: Option<String> = None;

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if let Err(error) = renderer.resize(new_size.width, new_size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::Focused(false) => collector.release_all(),
                WindowEvent::KeyboardInput { event, .. } => {
                    collector.handle_keyboard_input(&event);
                }
                WindowEvent::CursorMoved { position, .. } => {
                    collector.cursor = viewport_point(&renderer, position);
                }
                WindowEvent::MouseInput {
                    state,
                    button: MouseButton::Left,
                    ..
                } => {
                    let cursor = collector.cursor;
                    collector.handle_pointer(
                        MOUSE_POINTER_ID,
                        cursor,
                        state == ElementState::Pressed,
                        driver.banner_open(),
                    );
                }
                WindowEvent::Touch(Touch {
                    id, phase, location, ..
                }) => {
                    let point = viewport_point(&renderer, location);
                    match phase {
                        TouchPhase::Started => {
                            collector.handle_pointer(id, point, true, driver.banner_open())
                        }
                        TouchPhase::Ended | TouchPhase::Cancelled => {
                            collector.handle_pointer(id, point, false, driver.banner_open())
                        }
                        TouchPhase::Moved => {}
                    }
                }
                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    let frame_dt = now.saturating_duration_since(last_frame_instant);
                    last_frame_instant = now;

                    if collector.take_overlay_toggle_pressed() {
                        overlay_visible = !overlay_visible;
                        info!(overlay_visible, "overlay_toggled");
                    }
                    if collector.take_dismiss_pressed() {
                        driver.dismiss_banner();
                    }

                    let input = collector.sampler.snapshot_for_frame();
                    match driver.run_frame(&input) {
                        FrameStep::Stepped => metrics.record_step(),
                        FrameStep::HeldByBanner => {}
                        FrameStep::Quit => {
                            info!(reason = "scene_quit", "shutdown_requested");
                            window_target.exit();
                            return;
                        }
                    }

                    let elapsed_since_last_present =
                        Instant::now().saturating_duration_since(last_present_instant);
                    let cap_sleep =
                        compute_cap_sleep(elapsed_since_last_present, render_frame_target);
                    if cap_sleep > Duration::ZERO {
                        thread::sleep(cap_sleep);
                    }

                    let overlay = OverlayData {
                        status: driver.scene.status_text(),
                        metrics: overlay_visible.then(|| metrics.last_snapshot()),
                        touch_layout: collector.touch_layout,
                        held_touch_buttons: collector.held_touch_buttons(),
                        banner: driver.banner.current().map(ToString::to_string),
                    };
                    if let Err(error) = renderer.render(&driver.draw_list, &overlay) {
                        warn!(error = %error, "renderer_draw_failed");
                        window_target.exit();
                    }
                    last_present_instant = Instant::now();

                    let next_title = driver.scene.debug_title();
                    if next_title != last_applied_title {
                        window.set_title(next_title.as_deref().unwrap_or(&config.window_title));
                        last_applied_title = next_title;
                    }

                    metrics.record_frame(frame_dt);
                    if let Some(snapshot) = metrics.maybe_snapshot(now) {
                        info!(
                            fps = snapshot.fps,
                            steps_per_second = snapshot.steps_per_second,
                            frame_time_ms = snapshot.frame_time_ms,
                            banner_open = driver.banner_open(),
                            "loop_metrics"
                        );
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                driver.scene.unload();
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameStep {
    Stepped,
    HeldByBanner,
    Quit,
}

/// Per-frame orchestration that does not need a window: banner gating, one
/// scene update, then a fresh draw list.
struct FrameDriver {
    scene: Box<dyn Scene>,
    banner: ModalBanner,
    draw_list: DrawList,
}

impl FrameDriver {
    fn new(scene: Box<dyn Scene>) -> Self {
        Self {
            scene,
            banner: ModalBanner::default(),
            draw_list: DrawList::default(),
        }
    }

    fn load(&mut self, viewport: Viewport) {
        self.scene.load(viewport);
        self.redraw();
    }

    fn banner_open(&self) -> bool {
        self.banner.is_open()
    }

    fn dismiss_banner(&mut self) {
        self.banner.dismiss();
    }

    fn run_frame(&mut self, input: &InputSnapshot) -> FrameStep {
        if self.banner.is_open() {
            return if input.is_down(InputAction::Quit) {
                FrameStep::Quit
            } else {
                FrameStep::HeldByBanner
            };
        }

        let command = self.scene.update(input, &mut self.banner);
        self.redraw();
        match command {
            SceneCommand::None => FrameStep::Stepped,
            SceneCommand::Quit => FrameStep::Quit,
        }
    }

    fn redraw(&mut self) {
        self.draw_list.clear();
        self.scene.render(&mut self.draw_list);
    }
}

#[derive(Debug)]
struct InputCollector {
    sampler: InputSampler,
    touches: TouchTracker,
    touch_layout: TouchLayout,
    cursor: Option<Vec2>,
    overlay_toggle_is_down: bool,
    overlay_toggle_pressed_edge: bool,
    dismiss_is_down: bool,
    dismiss_pressed_edge: bool,
}

impl InputCollector {
    fn new(touch_layout: TouchLayout) -> Self {
        Self {
            sampler: InputSampler::new(),
            touches: TouchTracker::default(),
            touch_layout,
            cursor: None,
            overlay_toggle_is_down: false,
            overlay_toggle_pressed_edge: false,
            dismiss_is_down: false,
            dismiss_pressed_edge: false,
        }
    }

    fn handle_keyboard_input(&mut self, key_event: &KeyEvent) {
        let pressed = key_event.state == ElementState::Pressed;
        if matches!(key_event.logical_key, Key::Named(NamedKey::F3)) {
            self.handle_overlay_toggle_key(pressed);
            return;
        }
        self.handle_key(key_name_from_winit(&key_event.logical_key), pressed);
    }

    fn handle_key(&mut self, key: KeyName, pressed: bool) {
        if key == KeyName::Enter {
            self.handle_dismiss_key(pressed);
        }
        self.sampler.push(RawInputEvent::Key { key, pressed });
    }

    fn handle_overlay_toggle_key(&mut self, pressed: bool) {
        if pressed && !self.overlay_toggle_is_down {
            self.overlay_toggle_pressed_edge = true;
        }
        self.overlay_toggle_is_down = pressed;
    }

    fn handle_dismiss_key(&mut self, pressed: bool) {
        if pressed && !self.dismiss_is_down {
            self.dismiss_pressed_edge = true;
        }
        self.dismiss_is_down = pressed;
    }

    fn handle_pointer(
        &mut self,
        pointer_id: u64,
        point: Option<Vec2>,
        pressed: bool,
        banner_open: bool,
    ) {
        if !pressed {
            if let Some(event) = self.touches.release(pointer_id) {
                self.sampler.push(event);
            }
            return;
        }
        if banner_open {
            self.dismiss_pressed_edge = true;
            return;
        }
        let Some(point) = point else {
            return;
        };
        for event in self.touches.press(pointer_id, point, &self.touch_layout) {
            self.sampler.push(event);
        }
    }

    fn release_all(&mut self) {
        self.sampler.release_all();
        self.touches.clear();
        self.overlay_toggle_is_down = false;
        self.dismiss_is_down = false;
    }

    fn held_touch_buttons(&self) -> Vec<TouchButton> {
        TouchButton::ALL
            .into_iter()
            .filter(|button| self.touches.is_held(*button))
            .collect()
    }

    fn take_overlay_toggle_pressed(&mut self) -> bool {
        std::mem::take(&mut self.overlay_toggle_pressed_edge)
    }

    fn take_dismiss_pressed(&mut self) -> bool {
        std::mem::take(&mut self.dismiss_pressed_edge)
    }
}

fn key_name_from_winit(key: &Key) -> KeyName {
    match key {
        Key::Named(NamedKey::ArrowLeft) => KeyName::ArrowLeft,
        Key::Named(NamedKey::ArrowRight) => KeyName::ArrowRight,
        Key::Named(NamedKey::ArrowUp) => KeyName::ArrowUp,
        Key::Named(NamedKey::Space) => KeyName::Space,
        Key::Named(NamedKey::Escape) => KeyName::Escape,
        Key::Named(NamedKey::Enter) => KeyName::Enter,
        Key::Character(text) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                // Lowercased so a shift change between press and release still matches.
                (Some(ch), None) => KeyName::Character(ch.to_ascii_lowercase()),
                _ => KeyName::Other,
            }
        }
        _ => KeyName::Other,
    }
}

fn viewport_point(renderer: &Renderer, position: PhysicalPosition<f64>) -> Option<Vec2> {
    renderer
        .window_to_viewport(position.x, position.y)
        .map(|(x, y)| Vec2 {
            x: x as f32,
            y: y as f32,
        })
}

fn parse_fps_cap(raw: &str) -> Result<Option<u32>, ParseIntError> {
    let value = raw.trim().parse::<u32>()?;
    Ok((value > 0).then_some(value))
}

fn resolve_fps_cap(config_cap: Option<u32>) -> Option<u32> {
    let config_cap = config_cap.filter(|value| *value > 0);
    match env::var(FPS_CAP_ENV_VAR) {
        Ok(value) => match parse_fps_cap(&value) {
            Ok(cap) => cap,
            Err(error) => {
                warn!(
                    env_var = FPS_CAP_ENV_VAR,
                    value = value.as_str(),
                    error = %error,
                    "invalid fps cap env var value; falling back to config"
                );
                config_cap
            }
        },
        Err(env::VarError::NotPresent) => config_cap,
        Err(error) => {
            warn!(
                env_var = FPS_CAP_ENV_VAR,
                error = %error,
                "unable to read fps cap env var; falling back to config"
            );
            config_cap
        }
    }
}

fn target_frame_duration(max_render_fps: Option<u32>) -> Option<Duration> {
    max_render_fps.map(|fps| Duration::from_secs_f64(1.0 / fps as f64))
}

fn compute_cap_sleep(elapsed: Duration, target: Option<Duration>) -> Duration {
    match target {
        Some(frame_target) if elapsed < frame_target => frame_target - elapsed,
        _ => Duration::ZERO,
    }
}

fn format_frame_target(target: Option<Duration>) -> String {
    match target {
        Some(duration) => format!("{:.0}", 1.0 / duration.as_secs_f64()),
        None => "off".to_string(),
    }
}
