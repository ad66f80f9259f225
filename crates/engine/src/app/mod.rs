mod input;
mod loop_runner;
mod metrics;
mod notify;
mod rendering;
mod scene;
mod tools;
mod touch;

pub use input::{action_for_key, InputAction, InputSampler, KeyName, RawInputEvent, TouchButton};
pub use loop_runner::{run_app, AppError, LoopConfig, FPS_CAP_ENV_VAR};
pub use metrics::LoopMetricsSnapshot;
pub use notify::ModalBanner;
pub use rendering::{
    rasterize, world_rect_to_screen, world_to_screen_x, DrawCommand, DrawList, DrawSpace,
    RenderError, Renderer, Rgba, ScreenRectPx,
};
pub use scene::{
    Announcer, Camera2D, InputSnapshot, Rect, Scene, SceneCommand, StatusText, Vec2, Viewport,
};
pub use touch::TouchLayout;
pub(crate) use tools::OverlayData;
