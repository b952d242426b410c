// Player character data

use super::animation::PlaybackCursor;
use super::state::AnimationState;
use crate::game::config::GameConfig;

/// The single controllable character
///
/// Pure data: the simulation mutates it every tick and the renderer reads
/// the drawable frame derived from it. It owns no window or GPU resources.
#[derive(Debug, Clone)]
pub struct Character {
    /// Position of the sprite's top-left corner, in screen pixels
    pub x: f32,
    pub y: f32,
    /// Velocity in pixels per tick
    pub velx: f32,
    pub vely: f32,
    /// On-screen size in pixels
    pub width: u32,
    pub height: u32,
    /// True from the jump impulse until ground collision resolves it
    pub is_jumping: bool,
    /// False flips the sprite horizontally
    pub facing_right: bool,
    /// Active animation state
    pub state: AnimationState,
    /// Set during the input phase when a movement key applied this tick;
    /// read by the landing transition in the same tick
    pub moving: bool,
    /// Animation playback progress for the active state
    pub cursor: PlaybackCursor,
}

impl Character {
    /// Create the character at its configured spawn point
    pub fn spawn(config: &GameConfig) -> Self {
        Self {
            x: config.spawn_x,
            y: config.spawn_y,
            velx: 0.0,
            vely: 0.0,
            width: config.player_width,
            height: config.player_height,
            is_jumping: false,
            facing_right: true,
            state: AnimationState::Idle,
            moving: false,
            cursor: PlaybackCursor::default(),
        }
    }
}
