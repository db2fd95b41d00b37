// Game action definitions and key bindings

use winit::keyboard::KeyCode;

/// The actions the client understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement, one per cardinal direction
    MoveEast,
    MoveNorth,
    MoveWest,
    MoveSouth,

    // Meta
    Quit,
}

impl Action {
    /// The four movement actions in their fixed evaluation order.
    ///
    /// The order is load-bearing: when several movement keys are held, the
    /// last one in this order wins the visible facing and animation.
    pub fn movement_order() -> [Action; 4] {
        [
            Action::MoveEast,
            Action::MoveNorth,
            Action::MoveWest,
            Action::MoveSouth,
        ]
    }
}

/// Default keyboard bindings: arrow keys and WASD both drive movement
pub fn default_bindings() -> Vec<(KeyCode, Action)> {
    vec![
        (KeyCode::ArrowRight, Action::MoveEast),
        (KeyCode::ArrowUp, Action::MoveNorth),
        (KeyCode::ArrowLeft, Action::MoveWest),
        (KeyCode::ArrowDown, Action::MoveSouth),
        (KeyCode::KeyD, Action::MoveEast),
        (KeyCode::KeyW, Action::MoveNorth),
        (KeyCode::KeyA, Action::MoveWest),
        (KeyCode::KeyS, Action::MoveSouth),
        (KeyCode::Escape, Action::Quit),
    ]
}
