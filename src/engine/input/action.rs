// Game action definitions and key bindings

use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Launch the player into a jump (ignored while airborne)
    Jump,

    /// Flip between running and stopped; the first press starts the session
    ToggleRun,

    /// Throw away the current world and start over (only while stopped)
    Restart,
}

/// Default keyboard bindings
pub fn default_bindings() -> Vec<(KeyCode, Action)> {
    vec![
        (KeyCode::ArrowUp, Action::Jump),
        (KeyCode::Escape, Action::ToggleRun),
        (KeyCode::Space, Action::Restart),
    ]
}
