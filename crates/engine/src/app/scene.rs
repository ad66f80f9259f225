use serde::{Deserialize, Serialize};

use super::input::{ActionStates, InputAction};
use super::rendering::DrawList;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    Quit,
}

/// Intent set for one frame. Immutable once built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    actions: ActionStates,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_actions(actions: ActionStates) -> Self {
        Self { actions }
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// Axis-aligned rectangle, y grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// Horizontal view offset into the world.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera2D {
    pub x: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusText {
    pub title: String,
    pub detail: String,
}

/// Surface that tells the player something happened, e.g. a reward.
pub trait Announcer {
    fn announce(&mut self, message: &str);
}

pub trait Scene {
    fn load(&mut self, viewport: Viewport);
    fn update(&mut self, input: &InputSnapshot, announcer: &mut dyn Announcer) -> SceneCommand;
    fn render(&self, draw_list: &mut DrawList);
    fn status_text(&self) -> StatusText;
    fn unload(&mut self) {}
    fn debug_title(&self) -> Option<String> {
        None
    }
}
