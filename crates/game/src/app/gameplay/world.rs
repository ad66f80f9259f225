use engine::Camera2D;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum CameraMode {
    /// Keep the player horizontally centered, even past the world edges.
    #[default]
    Follow,
    /// Center on the player but never show space outside `[0, world_width]`.
    ClampToWorld,
}

/// Horizontal offset of the parallax background strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WorldScroll {
    world_width: f32,
    scroll_speed: f32,
    background_offset: f32,
}

impl WorldScroll {
    pub(crate) fn new(world_width: f32, scroll_speed: f32) -> Self {
        Self {
            world_width,
            scroll_speed,
            background_offset: 0.0,
        }
    }

    pub(crate) fn world_width(&self) -> f32 {
        self.world_width
    }

    pub(crate) fn background_offset(&self) -> f32 {
        self.background_offset
    }

    /// Moves the strip one frame left, wrapping to 0 once a full world width
    /// has scrolled by.
    pub(crate) fn advance(&mut self) {
        self.background_offset -= self.scroll_speed;
        if self.background_offset <= -self.world_width {
            self.background_offset = 0.0;
        }
    }
}

pub(crate) fn follow_camera(
    player_x: f32,
    viewport_width: f32,
    world_width: f32,
    mode: CameraMode,
) -> Camera2D {
    let centered = player_x - viewport_width / 2.0;
    let x = match mode {
        CameraMode::Follow => centered,
        CameraMode::ClampToWorld => centered.clamp(0.0, (world_width - viewport_width).max(0.0)),
    };
    Camera2D { x }
}
