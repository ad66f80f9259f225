use engine::Rect;
use serde::{Deserialize, Serialize};

/// Size, speed and jump constants for the player body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    pub spawn_x: f32,
    pub horizontal_speed: f32,
    pub gravity_accel: f32,
    /// Negative: y grows downward, so a jump moves toward smaller y.
    pub jump_impulse: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 50.0,
            height: 50.0,
            spawn_x: 50.0,
            horizontal_speed: 5.0,
            gravity_accel: 0.8,
            jump_impulse: -12.0,
        }
    }
}

impl PlayerTuning {
    /// Height a standing jump rises before falling, stepped the same way as
    /// the integrator: move by `vy`, then add gravity.
    pub(crate) fn jump_apex_height(&self) -> f32 {
        if self.gravity_accel.is_nan() || self.gravity_accel <= 0.0 {
            return f32::INFINITY;
        }
        let mut vy = self.jump_impulse;
        let mut rise = 0.0;
        for _ in 0..MAX_APEX_FRAMES {
            if vy >= 0.0 {
                return rise;
            }
            rise -= vy;
            vy += self.gravity_accel;
        }
        rise
    }
}

const MAX_APEX_FRAMES: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PlayerBody {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub grounded: bool,
    pub tuning: PlayerTuning,
}

impl PlayerBody {
    /// Places the body standing on `ground` at the tuning's spawn x.
    pub(crate) fn spawn(tuning: PlayerTuning, ground: &Ground) -> Self {
        Self {
            x: tuning.spawn_x,
            y: ground.surface_y() - tuning.height,
            vx: 0.0,
            vy: 0.0,
            grounded: true,
            tuning,
        }
    }

    pub(crate) fn width(&self) -> f32 {
        self.tuning.width
    }

    pub(crate) fn height(&self) -> f32 {
        self.tuning.height
    }

    pub(crate) fn bottom(&self) -> f32 {
        self.y + self.tuning.height
    }

    pub(crate) fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width(), self.height())
    }
}

/// Static floor plane spanning the whole world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Ground {
    surface_y: f32,
    thickness: f32,
    width: f32,
}

impl Ground {
    pub(crate) fn new(viewport_height: f32, thickness: f32, world_width: f32) -> Self {
        Self {
            surface_y: viewport_height - thickness,
            thickness,
            width: world_width,
        }
    }

    pub(crate) fn surface_y(&self) -> f32 {
        self.surface_y
    }

    /// The one ground test shared by gravity and collision: the body's lower
    /// edge is on or below the surface.
    pub(crate) fn supports(&self, body: &PlayerBody) -> bool {
        body.bottom() >= self.surface_y
    }

    pub(crate) fn rect(&self) -> Rect {
        Rect::new(0.0, self.surface_y, self.width, self.thickness)
    }
}
