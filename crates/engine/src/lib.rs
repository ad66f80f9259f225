//! Host runtime for the side-scroller: window, frame loop, input sampling,
//! software rasterization and the HUD surfaces a [`Scene`] reports into.

pub mod app;

pub use app::{
    action_for_key, rasterize, run_app, world_rect_to_screen, world_to_screen_x, Announcer,
    AppError, Camera2D, DrawCommand, DrawList, DrawSpace, InputAction, InputSampler,
    InputSnapshot, KeyName, LoopConfig, LoopMetricsSnapshot, ModalBanner, RawInputEvent, Rect,
    RenderError, Renderer, Rgba, Scene, SceneCommand, ScreenRectPx, StatusText, TouchButton,
    TouchLayout, Vec2, Viewport, FPS_CAP_ENV_VAR,
};
