use crate::app::{Camera2D, Rect, Viewport};

use super::{fill_rect_clipped, world_rect_to_screen};

pub type Rgba = [u8; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawSpace {
    /// Offset by the camera before drawing.
    World,
    /// Drawn at viewport coordinates.
    Screen,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    FillRect {
        color: Rgba,
        rect: Rect,
        space: DrawSpace,
    },
}

/// Ordered draw commands for one frame, plus the camera they are drawn against.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    camera: Camera2D,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.commands.clear();
        self.camera = Camera2D::default();
    }

    pub fn set_camera(&mut self, camera: Camera2D) {
        self.camera = camera;
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn fill_rect(&mut self, color: Rgba, rect: Rect) {
        self.commands.push(DrawCommand::FillRect {
            color,
            rect,
            space: DrawSpace::World,
        });
    }

    pub fn fill_screen_rect(&mut self, color: Rgba, rect: Rect) {
        self.commands.push(DrawCommand::FillRect {
            color,
            rect,
            space: DrawSpace::Screen,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

pub fn rasterize(frame: &mut [u8], viewport: Viewport, draw_list: &DrawList, clear_color: Rgba) {
    for chunk in frame.chunks_exact_mut(4) {
        chunk.copy_from_slice(&clear_color);
    }
    if viewport.width == 0 || viewport.height == 0 {
        return;
    }

    for command in draw_list.commands() {
        match *command {
            DrawCommand::FillRect { color, rect, space } => {
                let screen_rect = world_rect_to_screen(rect, draw_list.camera(), space);
                if screen_rect.is_empty() {
                    continue;
                }
                fill_rect_clipped(frame, viewport, screen_rect, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAR: Rgba = [1, 2, 3, 255];
    const RED: Rgba = [255, 0, 0, 255];
    const GREEN: Rgba = [0, 255, 0, 255];

    fn viewport() -> Viewport {
        Viewport {
            width: 10,
            height: 10,
        }
    }

    fn pixel(frame: &[u8], x: usize, y: usize) -> Rgba {
        let offset = (y * 10 + x) * 4;
        [
            frame[offset],
            frame[offset + 1],
            frame[offset + 2],
            frame[offset + 3],
        ]
    }

    #[test]
    fn rasterize_clears_before_drawing() {
        let mut frame = vec![9u8; 10 * 10 * 4];
        rasterize(&mut frame, viewport(), &DrawList::default(), CLEAR);
        assert!(frame.chunks_exact(4).all(|px| px == CLEAR));
    }

    #[test]
    fn later_commands_paint_over_earlier_ones() {
        let mut list = DrawList::default();
        list.fill_rect(RED, Rect::new(0.0, 0.0, 10.0, 10.0));
        list.fill_rect(GREEN, Rect::new(0.0, 0.0, 5.0, 5.0));
        let mut frame = vec![0u8; 10 * 10 * 4];

        rasterize(&mut frame, viewport(), &list, CLEAR);

        assert_eq!(pixel(&frame, 1, 1), GREEN);
        assert_eq!(pixel(&frame, 7, 7), RED);
    }

    #[test]
    fn world_rects_follow_camera_but_screen_rects_do_not() {
        let mut list = DrawList::default();
        list.set_camera(Camera2D { x: 5.0 });
        list.fill_rect(RED, Rect::new(5.0, 0.0, 2.0, 2.0));
        list.fill_screen_rect(GREEN, Rect::new(5.0, 5.0, 2.0, 2.0));
        let mut frame = vec![0u8; 10 * 10 * 4];

        rasterize(&mut frame, viewport(), &list, CLEAR);

        assert_eq!(pixel(&frame, 0, 0), RED);
        assert_eq!(pixel(&frame, 5, 0), CLEAR);
        assert_eq!(pixel(&frame, 5, 5), GREEN);
    }

    #[test]
    fn clear_resets_commands_and_camera() {
        let mut list = DrawList::default();
        list.set_camera(Camera2D { x: 12.0 });
        list.fill_rect(RED, Rect::new(0.0, 0.0, 1.0, 1.0));
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.camera().x, 0.0);
    }

    #[test]
    fn zero_sized_viewport_is_safe() {
        let mut list = DrawList::default();
        list.fill_rect(RED, Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut frame = Vec::new();
        rasterize(
            &mut frame,
            Viewport {
                width: 0,
                height: 0,
            },
            &list,
            CLEAR,
        );
        assert!(frame.is_empty());
    }
}
