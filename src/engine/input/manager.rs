// Input manager - turns winit keyboard events into edge-triggered actions

use super::action::{default_bindings, Action};
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Translates raw keyboard events into game actions
///
/// Presses are edge-triggered: key repeats are dropped, and `just_pressed`
/// state lasts until `update()` is called at the end of the frame. Keys
/// without a binding are a silent no-op.
pub struct InputManager {
    /// Key-to-action binding table
    bindings: Vec<(KeyCode, Action)>,

    /// Actions currently held down
    pressed: HashSet<Action>,

    /// Actions that were pressed since the last `update()`
    just_pressed: HashSet<Action>,
}

impl InputManager {
    /// Create an input manager with the default bindings
    pub fn new() -> Self {
        Self::with_bindings(default_bindings())
    }

    /// Create an input manager with a custom binding table
    pub fn with_bindings(bindings: Vec<(KeyCode, Action)>) -> Self {
        Self {
            bindings,
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return;
        };

        let Some(action) = self.lookup(key_code) else {
            return;
        };

        match event.state {
            ElementState::Pressed => {
                // Key repeats are not fresh presses
                if !event.repeat && self.pressed.insert(action) {
                    self.just_pressed.insert(action);
                }
            }
            ElementState::Released => {
                self.pressed.remove(&action);
            }
        }
    }

    /// Look up the action bound to a key, if any
    fn lookup(&self, key: KeyCode) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == key)
            .map(|(_, action)| *action)
    }

    /// Check if an action was pressed since the last frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action is currently held
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Clear per-frame state; call once after the frame has consumed input
    pub fn update(&mut self) {
        self.just_pressed.clear();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
