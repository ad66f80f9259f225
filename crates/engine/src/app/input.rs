use std::collections::{HashSet, VecDeque};

use super::InputSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    Jump,
    Quit,
}

const ACTION_COUNT: usize = 4;

/// Symbolic key identity, independent of keyboard layout codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyName {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    Space,
    Escape,
    Enter,
    Character(char),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchButton {
    Left,
    Right,
    Jump,
}

const TOUCH_BUTTON_COUNT: usize = 3;

impl TouchButton {
    pub const ALL: [TouchButton; TOUCH_BUTTON_COUNT] =
        [TouchButton::Left, TouchButton::Right, TouchButton::Jump];

    pub fn action(self) -> InputAction {
        match self {
            TouchButton::Left => InputAction::MoveLeft,
            TouchButton::Right => InputAction::MoveRight,
            TouchButton::Jump => InputAction::Jump,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TouchButton::Left => "<",
            TouchButton::Right => ">",
            TouchButton::Jump => "^",
        }
    }

    const fn index(self) -> usize {
        match self {
            TouchButton::Left => 0,
            TouchButton::Right => 1,
            TouchButton::Jump => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInputEvent {
    Key { key: KeyName, pressed: bool },
    Touch { button: TouchButton, pressed: bool },
}

pub fn action_for_key(key: KeyName) -> Option<InputAction> {
    match key {
        KeyName::ArrowLeft | KeyName::Character('a' | 'A') => Some(InputAction::MoveLeft),
        KeyName::ArrowRight | KeyName::Character('d' | 'D') => Some(InputAction::MoveRight),
        KeyName::ArrowUp | KeyName::Space | KeyName::Character('w' | 'W') => {
            Some(InputAction::Jump)
        }
        KeyName::Escape => Some(InputAction::Quit),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }
}

impl InputAction {
    #[cfg(test)]
    const ALL: [InputAction; ACTION_COUNT] = [
        InputAction::MoveLeft,
        InputAction::MoveRight,
        InputAction::Jump,
        InputAction::Quit,
    ];

    const fn index(self) -> usize {
        match self {
            InputAction::MoveLeft => 0,
            InputAction::MoveRight => 1,
            InputAction::Jump => 2,
            InputAction::Quit => 3,
        }
    }
}

/// Collects raw key and touch events and folds them into one intent set per frame.
///
/// Events are queued as they arrive and only applied by
/// [`InputSampler::snapshot_for_frame`], so a frame always sees the state as
/// it stood when the frame began.
#[derive(Debug, Default)]
pub struct InputSampler {
    pending: VecDeque<RawInputEvent>,
    held_keys: HashSet<KeyName>,
    touch_down: [bool; TOUCH_BUTTON_COUNT],
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: RawInputEvent) {
        self.pending.push_back(event);
    }

    #[cfg(test)]
    fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn snapshot_for_frame(&mut self) -> InputSnapshot {
        while let Some(event) = self.pending.pop_front() {
            self.apply(event);
        }
        InputSnapshot::from_actions(self.current_actions())
    }

    /// Clears every held key and touch, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.pending.clear();
        self.held_keys.clear();
        self.touch_down = [false; TOUCH_BUTTON_COUNT];
    }

    fn apply(&mut self, event: RawInputEvent) {
        match event {
            RawInputEvent::Key { key, pressed } => {
                if action_for_key(key).is_none() {
                    return;
                }
                if pressed {
                    self.held_keys.insert(key);
                } else {
                    self.held_keys.remove(&key);
                }
            }
            RawInputEvent::Touch { button, pressed } => {
                self.touch_down[button.index()] = pressed;
            }
        }
    }

    fn current_actions(&self) -> ActionStates {
        let mut actions = ActionStates::default();
        for key in &self.held_keys {
            if let Some(action) = action_for_key(*key) {
                actions.set(action, true);
            }
        }
        for button in TouchButton::ALL {
            if self.touch_down[button.index()] {
                actions.set(button.action(), true);
            }
        }
        actions
    }
}
