// Input handling system
//
// Translates winit keyboard events into the held-action set the simulation
// consumes once per tick:
//
// - `action`: game actions and the default key bindings
// - `manager`: event folding and the per-tick snapshot

pub mod action;
pub mod manager;

// Re-export commonly used types
pub use action::{Action, InputSource};
pub use manager::{InputManager, InputSnapshot};
