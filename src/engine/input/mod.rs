// Keyboard input handling
//
// - `action`: game actions and the default key bindings
// - `state`: held-key state fed from winit events, queried once per tick

pub mod action;
pub mod state;

pub use action::{default_bindings, Action};
pub use state::InputState;
