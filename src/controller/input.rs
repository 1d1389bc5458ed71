// Keyboard polling for the frame loop
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Everything the user can ask the triangle to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Counter-clockwise, increases the angle.
    RotatePositive,
    /// Clockwise, decreases the angle.
    RotateNegative,
    Exit,
}

/// Key mapping configuration
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub left: KeyCode,
    pub right: KeyCode,
    pub up: KeyCode,
    pub down: KeyCode,
    pub rotate_positive: KeyCode,
    pub rotate_negative: KeyCode,
    pub exit: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: KeyCode::ArrowLeft,
            right: KeyCode::ArrowRight,
            up: KeyCode::ArrowUp,
            down: KeyCode::ArrowDown,
            rotate_positive: KeyCode::KeyA,
            rotate_negative: KeyCode::KeyD,
            exit: KeyCode::Escape,
        }
    }
}

impl KeyBindings {
    pub fn key_for(&self, action: Action) -> KeyCode {
        match action {
            Action::MoveLeft => self.left,
            Action::MoveRight => self.right,
            Action::MoveUp => self.up,
            Action::MoveDown => self.down,
            Action::RotatePositive => self.rotate_positive,
            Action::RotateNegative => self.rotate_negative,
            Action::Exit => self.exit,
        }
    }
}

/// Anything the frame loop can ask "is this action held right now?".
pub trait ActionSource {
    fn is_held(&self, action: Action) -> bool;
}

/// Discrete pressed/released state of the physical keyboard.
#[derive(Debug, Default)]
pub struct InputState {
    pub pressed_keys: HashSet<KeyCode>,
    pub bindings: KeyBindings,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            pressed_keys: HashSet::new(),
            bindings,
        }
    }

    /// Feed a winit keyboard event. Returns `true` if held state changed.
    pub fn process_key_event(&mut self, event: &KeyEvent) -> bool {
        let PhysicalKey::Code(code) = event.physical_key else {
            return false;
        };
        if event.repeat {
            return false;
        }
        self.set_key(code, event.state)
    }

    pub fn set_key(&mut self, code: KeyCode, state: ElementState) -> bool {
        match state {
            ElementState::Pressed => self.pressed_keys.insert(code),
            ElementState::Released => self.pressed_keys.remove(&code),
        }
    }

    pub fn is_key_pressed(&self, code: KeyCode) -> bool {
        self.pressed_keys.contains(&code)
    }

    /// Focus loss: no release events will arrive for keys held at that moment.
    pub fn clear_keys(&mut self) {
        self.pressed_keys.clear();
    }
}

impl ActionSource for InputState {
    fn is_held(&self, action: Action) -> bool {
        self.is_key_pressed(self.bindings.key_for(action))
    }
}
