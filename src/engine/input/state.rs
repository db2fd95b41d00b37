// Held-key input state

use super::action::{default_bindings, Action};
use std::collections::{HashMap, HashSet};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Tracks which actions are currently held, fed from winit keyboard events.
///
/// The game queries this once per tick; there is no edge detection because
/// the client only cares about keys being down.
#[derive(Debug)]
pub struct InputState {
    /// Key to action binding table
    bindings: HashMap<KeyCode, Action>,

    /// Actions whose keys are currently held
    pressed: HashSet<Action>,
}

impl InputState {
    /// Create an input state with the default bindings
    pub fn new() -> Self {
        Self::from_bindings(default_bindings())
    }

    /// Create an input state from an explicit binding table
    pub fn from_bindings(bindings: Vec<(KeyCode, Action)>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
            pressed: HashSet::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return;
        };
        let Some(&action) = self.bindings.get(&key_code) else {
            return;
        };

        match event.state {
            ElementState::Pressed => {
                self.pressed.insert(action);
            }
            ElementState::Released => {
                self.pressed.remove(&action);
            }
        }
    }

    /// Check if an action's key is currently held
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if any movement key is held
    pub fn any_movement_pressed(&self) -> bool {
        Action::movement_order()
            .iter()
            .any(|action| self.is_pressed(*action))
    }

    /// Register an action press directly (used by tests and scripted input)
    pub fn press(&mut self, action: Action) {
        self.pressed.insert(action);
    }

    /// Register an action release directly
    pub fn release(&mut self, action: Action) {
        self.pressed.remove(&action);
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn reset(&mut self) {
        self.pressed.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_nothing_pressed() {
        let input = InputState::new();
        assert!(!input.is_pressed(Action::MoveEast));
        assert!(!input.any_movement_pressed());
    }

    #[test]
    fn test_press_and_release() {
        let mut input = InputState::new();
        input.press(Action::MoveWest);
        assert!(input.is_pressed(Action::MoveWest));
        assert!(input.any_movement_pressed());

        input.release(Action::MoveWest);
        assert!(!input.is_pressed(Action::MoveWest));
    }

    #[test]
    fn test_multiple_actions_held() {
        let mut input = InputState::new();
        input.press(Action::MoveNorth);
        input.press(Action::MoveEast);
        assert!(input.is_pressed(Action::MoveNorth));
        assert!(input.is_pressed(Action::MoveEast));
    }

    #[test]
    fn test_repeated_press_is_idempotent() {
        let mut input = InputState::new();
        input.press(Action::MoveSouth);
        input.press(Action::MoveSouth);
        input.release(Action::MoveSouth);
        assert!(!input.is_pressed(Action::MoveSouth));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut input = InputState::new();
        input.press(Action::MoveNorth);
        input.press(Action::Quit);
        input.reset();
        assert!(!input.is_pressed(Action::MoveNorth));
        assert!(!input.is_pressed(Action::Quit));
    }

    #[test]
    fn test_quit_is_not_movement() {
        let mut input = InputState::new();
        input.press(Action::Quit);
        assert!(!input.any_movement_pressed());
    }
}
