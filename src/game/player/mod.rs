// Player system
//
// Everything for the one controllable character:
// - Animation catalog, descriptors, and the playback cursor
// - Character data
// - Animation states
// - The per-tick simulation driving all of it

pub mod animation;
pub mod character;
pub mod simulation;
pub mod state;

// Re-export commonly used types
pub use animation::{AnimationCatalog, AnimationDescriptor, CatalogError, PlaybackCursor};
pub use character::Character;
pub use simulation::Simulation;
pub use state::AnimationState;
