// Input manager - folds window events into per-tick key state

use std::collections::{HashMap, HashSet};

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

use super::action::{default_bindings, Action, InputSource};

/// Tracks which actions are held down, fed from winit keyboard events
///
/// The simulation is level-triggered: it only ever asks "is this action
/// held right now", once per tick, through a snapshot. Edge detection for
/// jump lives in the simulation's own `is_jumping` guard, not here.
pub struct InputManager {
    bindings: HashMap<InputSource, Action>,
    pressed: HashSet<Action>,
}

impl InputManager {
    /// Create an input manager with the default bindings
    pub fn new() -> Self {
        Self {
            bindings: default_bindings().into_iter().collect(),
            pressed: HashSet::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            let source = InputSource::key(key_code);
            if let Some(&action) = self.bindings.get(&source) {
                match event.state {
                    ElementState::Pressed => {
                        self.pressed.insert(action);
                    }
                    ElementState::Released => {
                        self.pressed.remove(&action);
                    }
                }
            }
        }
    }

    /// Check if an action is currently held
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Freeze the current key state for one tick of the simulation
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            pressed: self.pressed.clone(),
        }
    }

    /// Drop all held keys (e.g. when the window loses focus)
    pub fn reset(&mut self) {
        self.pressed.clear();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

/// The set of actions held during one tick
///
/// Immutable once taken; the simulation reads it during input handling and
/// never sees mid-tick key changes.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    pressed: HashSet<Action>,
}

impl InputSnapshot {
    /// Build a snapshot directly from a list of held actions
    pub fn from_actions<I: IntoIterator<Item = Action>>(actions: I) -> Self {
        Self {
            pressed: actions.into_iter().collect(),
        }
    }

    /// Check if an action was held this tick
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// True when no bound key was held this tick
    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty()
    }
}
