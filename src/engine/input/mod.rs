// Input handling system
//
// Translates keyboard events into edge-triggered game actions.
//
// - `action`: defines game actions and the default key bindings
// - `manager`: processes winit events and tracks per-frame press state

pub mod action;
pub mod manager;

// Re-export commonly used types
pub use action::Action;
pub use manager::InputManager;
