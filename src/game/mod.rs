// Game layer: configuration and the player simulation

pub mod config;
pub mod player;

pub use config::GameConfig;

use crate::engine::input::InputSnapshot;
use crate::engine::renderer::SpriteFrame;
use player::{AnimationCatalog, Character, Simulation};

/// Top-level game state: one character driven by the simulation
pub struct Game {
    simulation: Simulation,
    character: Character,
}

impl Game {
    /// Create the game with a validated catalog
    pub fn new(config: GameConfig, catalog: AnimationCatalog) -> Self {
        let character = Character::spawn(&config);
        Self {
            simulation: Simulation::new(config, catalog),
            character,
        }
    }

    /// Run one tick: input rules, then physics and animation
    pub fn advance(&mut self, input: &InputSnapshot, delta_ms: f64) {
        self.simulation.handle_input(&mut self.character, input);
        self.simulation.update(&mut self.character, delta_ms);
    }

    /// Drawable frame for the current state
    pub fn current_frame(&self) -> SpriteFrame {
        self.simulation.current_frame(&self.character)
    }

    /// The configuration the game runs with
    pub fn config(&self) -> &GameConfig {
        self.simulation.config()
    }

    /// Read access to the character, mainly for tests and debug overlays
    pub fn character(&self) -> &Character {
        &self.character
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::Action;
    use player::AnimationState;

    #[test]
    fn test_game_ticks_end_to_end() {
        let mut game = Game::new(GameConfig::default(), AnimationCatalog::standard());

        let input = InputSnapshot::from_actions([Action::MoveRight]);
        game.advance(&input, 16.0);

        // Spawned in the air, so the character is falling, not running
        assert!(game.character().y < game.config().ground_y);

        // Let it settle on the ground, then run
        let none = InputSnapshot::default();
        for _ in 0..100 {
            game.advance(&none, 16.0);
        }
        assert_eq!(game.character().y, game.config().ground_y);

        game.advance(&input, 16.0);
        assert_eq!(game.character().state, AnimationState::Running);

        let frame = game.current_frame();
        assert_eq!(frame.dest.x, game.character().x);
        assert!(!frame.flip_horizontal);
    }
}
