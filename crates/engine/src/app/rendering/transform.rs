use crate::app::{Camera2D, Rect};

use super::DrawSpace;

/// Integer pixel rectangle, right/bottom exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRectPx {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ScreenRectPx {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }
}

pub fn world_to_screen_x(world_x: f32, camera: &Camera2D) -> f32 {
    world_x - camera.x
}

pub fn world_rect_to_screen(rect: Rect, camera: &Camera2D, space: DrawSpace) -> ScreenRectPx {
    let x = match space {
        DrawSpace::World => world_to_screen_x(rect.x, camera),
        DrawSpace::Screen => rect.x,
    };
    ScreenRectPx {
        left: x.round() as i32,
        top: rect.y.round() as i32,
        right: (x + rect.width).round() as i32,
        bottom: (rect.y + rect.height).round() as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_space_subtracts_camera_offset() {
        let camera = Camera2D { x: 250.0 };
        let screen = world_rect_to_screen(
            Rect::new(300.0, 300.0, 50.0, 50.0),
            &camera,
            DrawSpace::World,
        );
        assert_eq!(
            screen,
            ScreenRectPx {
                left: 50,
                top: 300,
                right: 100,
                bottom: 350,
            }
        );
    }

    #[test]
    fn screen_space_ignores_camera() {
        let camera = Camera2D { x: -400.0 };
        let screen = world_rect_to_screen(
            Rect::new(10.0, 20.0, 30.0, 40.0),
            &camera,
            DrawSpace::Screen,
        );
        assert_eq!(screen.left, 10);
        assert_eq!(screen.right, 40);
    }

    #[test]
    fn negative_camera_moves_world_right() {
        let camera = Camera2D { x: -350.0 };
        assert_eq!(world_to_screen_x(50.0, &camera), 400.0);
    }

    #[test]
    fn zero_width_rect_is_empty() {
        let screen = world_rect_to_screen(
            Rect::new(0.0, 0.0, 0.0, 10.0),
            &Camera2D::default(),
            DrawSpace::World,
        );
        assert!(screen.is_empty());
    }
}
