// Game configuration - fixed at startup, never re-read at runtime

/// All tunable constants for the game in one place
///
/// The simulation and the renderer both read from this; nothing mutates it
/// after startup.
#[derive(Debug, Clone)]
pub struct GameConfig {
    // Window
    /// Playfield width in pixels
    pub screen_width: u32,
    /// Playfield height in pixels
    pub screen_height: u32,

    // Physics
    /// Downward acceleration applied every tick (pixels/tick^2)
    pub gravity: f32,
    /// Instantaneous upward velocity applied on jump (negative = up)
    pub jump_force: f32,
    /// Horizontal distance moved per tick while a movement key is held
    pub player_speed: f32,
    /// Y coordinate of the walkable floor
    pub ground_y: f32,

    // Animation
    /// How long each animation frame stays on screen (milliseconds)
    pub frame_duration_ms: f64,
    /// Width of one sprite-sheet cell in sheet pixels
    pub cell_width: u32,
    /// Height of one sprite-sheet cell in sheet pixels
    pub cell_height: u32,
    /// Number of cell columns on the sheet
    pub sheet_columns: u32,
    /// Number of cell rows on the sheet
    pub sheet_rows: u32,

    // Player
    /// Spawn position (pixels)
    pub spawn_x: f32,
    pub spawn_y: f32,
    /// On-screen character size (pixels)
    pub player_width: u32,
    pub player_height: u32,

    // Assets
    /// Path to the sprite sheet, relative to the working directory
    pub sheet_path: &'static str,
}

/// The canonical configuration used by the shipped game
pub const DEFAULT_CONFIG: GameConfig = GameConfig {
    screen_width: 640,
    screen_height: 480,

    gravity: 0.5,
    jump_force: -12.0,
    player_speed: 5.0,
    ground_y: 400.0,

    frame_duration_ms: 150.0,
    cell_width: 50,
    cell_height: 37,
    sheet_columns: 7,
    sheet_rows: 11,

    spawn_x: 100.0,
    spawn_y: 100.0,
    player_width: 50,
    player_height: 50,

    sheet_path: "assets/adventurer-Sheet.png",
};

impl Default for GameConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

impl GameConfig {
    /// Largest x the character can occupy while staying on screen
    pub fn max_player_x(&self) -> f32 {
        (self.screen_width - self.player_width) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.screen_width, 640);
        assert_eq!(config.screen_height, 480);
        assert_eq!(config.gravity, 0.5);
        assert_eq!(config.jump_force, -12.0);
        assert_eq!(config.frame_duration_ms, 150.0);
    }

    #[test]
    fn test_max_player_x() {
        let config = GameConfig::default();
        assert_eq!(config.max_player_x(), 590.0);
    }
}
