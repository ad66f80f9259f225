use std::collections::HashMap;

use super::{RawInputEvent, Rect, TouchButton, Vec2, Viewport};

const TOUCH_BUTTON_SIZE_PX: f32 = 48.0;
const TOUCH_BUTTON_MARGIN_PX: f32 = 12.0;

/// On-screen placement of the three virtual buttons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchLayout {
    buttons: [(TouchButton, Rect); 3],
}

impl TouchLayout {
    pub fn for_viewport(viewport: Viewport) -> Self {
        let size = TOUCH_BUTTON_SIZE_PX;
        let margin = TOUCH_BUTTON_MARGIN_PX;
        let top = viewport.height as f32 - margin - size;
        let jump_left = viewport.width as f32 - margin - size;
        Self {
            buttons: [
                (TouchButton::Left, Rect::new(margin, top, size, size)),
                (
                    TouchButton::Right,
                    Rect::new(margin * 2.0 + size, top, size, size),
                ),
                (TouchButton::Jump, Rect::new(jump_left, top, size, size)),
            ],
        }
    }

    pub fn buttons(&self) -> &[(TouchButton, Rect)] {
        &self.buttons
    }

    pub fn hit_test(&self, point: Vec2) -> Option<TouchButton> {
        self.buttons
            .iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|(button, _)| *button)
    }
}

/// Remembers which virtual button each pointer pressed, so the matching release
/// is reported even if the pointer drifted off the button.
#[derive(Debug, Default)]
pub(crate) struct TouchTracker {
    pressed_by_pointer: HashMap<u64, TouchButton>,
}

impl TouchTracker {
    /// Returns the events the press produces, in order. A pointer that was
    /// already holding a button releases it first.
    pub(crate) fn press(
        &mut self,
        pointer_id: u64,
        point: Vec2,
        layout: &TouchLayout,
    ) -> Vec<RawInputEvent> {
        let mut events: Vec<RawInputEvent> = self.release(pointer_id).into_iter().collect();
        let Some(button) = layout.hit_test(point) else {
            return events;
        };
        if !self.is_held(button) {
            events.push(RawInputEvent::Touch {
                button,
                pressed: true,
            });
        }
        self.pressed_by_pointer.insert(pointer_id, button);
        events
    }

    pub(crate) fn release(&mut self, pointer_id: u64) -> Option<RawInputEvent> {
        let button = self.pressed_by_pointer.remove(&pointer_id)?;
        (!self.is_held(button)).then_some(RawInputEvent::Touch {
            button,
            pressed: false,
        })
    }

    pub(crate) fn clear(&mut self) {
        self.pressed_by_pointer.clear();
    }

    pub(crate) fn is_held(&self, button: TouchButton) -> bool {
        self.pressed_by_pointer.values().any(|held| *held == button)
    }
}
