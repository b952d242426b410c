// Per-tick character simulation: input rules, physics, animation advance

use super::animation::AnimationCatalog;
use super::character::Character;
use super::state::AnimationState;
use crate::core::math::Rect;
use crate::engine::input::{Action, InputSnapshot};
use crate::engine::renderer::SpriteFrame;
use crate::game::config::GameConfig;

/// Drives one character through a tick
///
/// Owns the configuration constants and the validated animation catalog;
/// the character itself is passed in, so tests can run many characters
/// against one simulation. Each tick is `handle_input` then `update`, with
/// `current_frame` read afterwards for drawing.
pub struct Simulation {
    config: GameConfig,
    catalog: AnimationCatalog,
}

impl Simulation {
    /// Create a simulation from validated configuration
    pub fn new(config: GameConfig, catalog: AnimationCatalog) -> Self {
        Self { config, catalog }
    }

    /// The configuration this simulation runs with
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Apply the tick's held keys to the character
    ///
    /// The rules run in a fixed order; later rules override the state
    /// conclusions of earlier ones within the same tick, and the
    /// `is_jumping` guards keep airborne state from being overwritten.
    pub fn handle_input(&self, character: &mut Character, input: &InputSnapshot) {
        character.moving = false;

        // Horizontal movement. The character must already be inside the
        // playfield to move; a blocked request also leaves facing and the
        // moving flag untouched.
        if input.is_pressed(Action::MoveRight) && character.x < self.config.max_player_x() {
            character.x += self.config.player_speed;
            character.facing_right = true;
            character.moving = true;
        }
        if input.is_pressed(Action::MoveLeft) && character.x > 0.0 {
            character.x -= self.config.player_speed;
            character.facing_right = false;
            character.moving = true;
        }

        if character.moving
            && !character.is_jumping
            && character.state != AnimationState::Crouching
        {
            Self::enter_state(character, AnimationState::Running);
        }

        // Jump: level-held key, but the is_jumping guard makes it fire once
        // per landing. Ignored mid-attack.
        if input.is_pressed(Action::Jump)
            && !character.is_jumping
            && character.state != AnimationState::Attacking
        {
            character.vely = self.config.jump_force;
            character.is_jumping = true;
            Self::enter_state(character, AnimationState::Jumping);
        }

        // Crouch and attack are re-asserted every tick their key is held.
        if input.is_pressed(Action::Crouch) && !character.is_jumping {
            Self::enter_state(character, AnimationState::Crouching);
        }

        if input.is_pressed(Action::Attack) && !character.is_jumping {
            Self::enter_state(character, AnimationState::Attacking);
        }

        // Idle fallback. Crouching and attacking persist here: an attack
        // runs to the end of its cycle, and crouch is only left through a
        // jump or an attack.
        if !character.moving
            && !character.is_jumping
            && character.state != AnimationState::Crouching
            && character.state != AnimationState::Attacking
        {
            Self::enter_state(character, AnimationState::Idle);
        }
    }

    /// Integrate physics, resolve ground collision, advance the animation
    ///
    /// Gravity and the velocity step are applied once per tick regardless
    /// of `delta_ms`; only the animation timer is time-scaled. Variable
    /// tick rates therefore change physics speed but not animation speed.
    /// That asymmetry is long-standing observed behavior and is kept.
    pub fn update(&self, character: &mut Character, delta_ms: f64) {
        character.vely += self.config.gravity;
        character.y += character.vely;

        if character.y >= self.config.ground_y {
            character.y = self.config.ground_y;
            character.vely = 0.0;
            character.is_jumping = false;

            if character.state == AnimationState::Jumping {
                let landed = if character.moving {
                    AnimationState::Running
                } else {
                    AnimationState::Idle
                };
                Self::enter_state(character, landed);
            }
        }

        let descriptor = self.catalog.descriptor(character.state);
        let wrapped = character.cursor.advance(
            delta_ms,
            self.config.frame_duration_ms,
            descriptor.frame_count,
        );

        // An attack expires when its animation completes one full cycle;
        // no other state auto-expires.
        if wrapped && character.state == AnimationState::Attacking {
            Self::enter_state(character, AnimationState::Idle);
        }
    }

    /// Drawable frame for the character's current state
    pub fn current_frame(&self, character: &Character) -> SpriteFrame {
        let descriptor = self.catalog.descriptor(character.state);
        let src = descriptor.frame_region(
            character.cursor.frame(),
            self.config.cell_width,
            self.config.cell_height,
        );
        let dest = Rect::new(
            character.x,
            character.y,
            character.width as f32,
            character.height as f32,
        );
        SpriteFrame {
            src,
            dest,
            flip_horizontal: !character.facing_right,
        }
    }

    /// Switch state, resetting the playback cursor only on a real change
    ///
    /// Re-asserting the current state (held crouch, held attack, continued
    /// running) must not rewind the animation.
    fn enter_state(character: &mut Character, state: AnimationState) {
        if character.state != state {
            character.state = state;
            character.cursor.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulation() -> Simulation {
        Simulation::new(GameConfig::default(), AnimationCatalog::standard())
    }

    fn grounded_character(sim: &Simulation) -> Character {
        let mut character = Character::spawn(sim.config());
        character.y = sim.config().ground_y;
        character
    }

    fn keys<const N: usize>(actions: [Action; N]) -> InputSnapshot {
        InputSnapshot::from_actions(actions)
    }

    fn tick(sim: &Simulation, character: &mut Character, input: &InputSnapshot, delta_ms: f64) {
        sim.handle_input(character, input);
        sim.update(character, delta_ms);
    }

    const FRAME_MS: f64 = 150.0;

    #[test]
    fn test_idle_when_no_keys_held() {
        let sim = simulation();
        let mut character = grounded_character(&sim);
        let none = keys([]);

        for _ in 0..100 {
            tick(&sim, &mut character, &none, 16.0);
            assert_eq!(character.state, AnimationState::Idle);
            assert!(character.cursor.frame() < 4);
        }
    }

    #[test]
    fn test_move_right_sets_running_and_facing() {
        let sim = simulation();
        let mut character = grounded_character(&sim);
        character.facing_right = false;

        tick(&sim, &mut character, &keys([Action::MoveRight]), 16.0);
        assert_eq!(character.state, AnimationState::Running);
        assert!(character.facing_right);
        assert_eq!(character.x, sim.config().spawn_x + sim.config().player_speed);
    }

    #[test]
    fn test_move_left_flips_facing() {
        let sim = simulation();
        let mut character = grounded_character(&sim);

        tick(&sim, &mut character, &keys([Action::MoveLeft]), 16.0);
        assert_eq!(character.state, AnimationState::Running);
        assert!(!character.facing_right);
        assert_eq!(character.x, sim.config().spawn_x - sim.config().player_speed);
    }

    #[test]
    fn test_left_bound_blocks_movement() {
        let sim = simulation();
        let mut character = grounded_character(&sim);
        character.x = 0.0;

        tick(&sim, &mut character, &keys([Action::MoveLeft]), 16.0);
        assert_eq!(character.x, 0.0);
        // The blocked request never set the moving flag, so the state
        // falls through to idle.
        assert_eq!(character.state, AnimationState::Idle);
    }

    #[test]
    fn test_right_bound_blocks_movement() {
        let sim = simulation();
        let mut character = grounded_character(&sim);
        character.x = sim.config().max_player_x();

        tick(&sim, &mut character, &keys([Action::MoveRight]), 16.0);
        assert_eq!(character.x, sim.config().max_player_x());
        assert_eq!(character.state, AnimationState::Idle);
    }

    #[test]
    fn test_jump_applies_impulse() {
        let sim = simulation();
        let mut character = grounded_character(&sim);

        sim.handle_input(&mut character, &keys([Action::Jump]));
        assert!(character.is_jumping);
        assert_eq!(character.state, AnimationState::Jumping);
        assert_eq!(character.vely, sim.config().jump_force);
        assert_eq!(character.cursor.frame(), 0);
    }

    #[test]
    fn test_no_double_jump() {
        let sim = simulation();
        let mut character = grounded_character(&sim);

        tick(&sim, &mut character, &keys([Action::Jump]), 16.0);
        let vely_after_first = character.vely;
        assert!(character.is_jumping);

        // Still airborne; a second jump request must not re-apply the impulse
        sim.handle_input(&mut character, &keys([Action::Jump]));
        assert_eq!(character.vely, vely_after_first);
    }

    #[test]
    fn test_jump_ignored_while_attacking() {
        let sim = simulation();
        let mut character = grounded_character(&sim);

        sim.handle_input(&mut character, &keys([Action::Attack]));
        assert_eq!(character.state, AnimationState::Attacking);

        sim.handle_input(&mut character, &keys([Action::Attack, Action::Jump]));
        assert_eq!(character.state, AnimationState::Attacking);
        assert!(!character.is_jumping);
        assert_eq!(character.vely, 0.0);
    }

    #[test]
    fn test_landing_while_moving_enters_running() {
        let sim = simulation();
        let mut character = grounded_character(&sim);
        character.state = AnimationState::Jumping;
        character.is_jumping = true;
        // One tick away from the ground, falling
        character.y = sim.config().ground_y - 1.0;
        character.vely = 5.0;

        tick(&sim, &mut character, &keys([Action::MoveRight]), 16.0);
        assert!(!character.is_jumping);
        assert_eq!(character.y, sim.config().ground_y);
        assert_eq!(character.vely, 0.0);
        assert_eq!(character.state, AnimationState::Running);
        assert_eq!(character.cursor.frame(), 0);
    }

    #[test]
    fn test_landing_without_moving_enters_idle() {
        let sim = simulation();
        let mut character = grounded_character(&sim);
        character.state = AnimationState::Jumping;
        character.is_jumping = true;
        character.y = sim.config().ground_y - 1.0;
        character.vely = 5.0;

        tick(&sim, &mut character, &keys([]), 16.0);
        assert!(!character.is_jumping);
        assert_eq!(character.state, AnimationState::Idle);
        assert_eq!(character.cursor.frame(), 0);
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let sim = simulation();
        let mut character = grounded_character(&sim);
        let none = keys([]);

        tick(&sim, &mut character, &keys([Action::Jump]), 16.0);
        assert!(character.y < sim.config().ground_y);

        let mut ticks = 0;
        while character.is_jumping {
            tick(&sim, &mut character, &none, 16.0);
            ticks += 1;
            assert!(ticks < 100, "character never landed");
        }
        assert_eq!(character.y, sim.config().ground_y);
        assert_eq!(character.state, AnimationState::Idle);
    }

    #[test]
    fn test_crouch_held_keeps_crouching() {
        let sim = simulation();
        let mut character = grounded_character(&sim);
        let crouch = keys([Action::Crouch]);

        for _ in 0..50 {
            tick(&sim, &mut character, &crouch, 16.0);
            assert_eq!(character.state, AnimationState::Crouching);
        }
    }

    #[test]
    fn test_crouch_reassertion_does_not_rewind_animation() {
        let sim = simulation();
        let mut character = grounded_character(&sim);
        let crouch = keys([Action::Crouch]);

        tick(&sim, &mut character, &crouch, FRAME_MS);
        let frame_after_advance = character.cursor.frame();
        assert_eq!(frame_after_advance, 1);

        tick(&sim, &mut character, &crouch, 0.0);
        assert_eq!(character.cursor.frame(), frame_after_advance);
    }

    #[test]
    fn test_crouch_persists_after_release() {
        let sim = simulation();
        let mut character = grounded_character(&sim);

        tick(&sim, &mut character, &keys([Action::Crouch]), 16.0);
        assert_eq!(character.state, AnimationState::Crouching);

        // No transition leaves crouch on key release alone; jump and
        // attack are the exits.
        tick(&sim, &mut character, &keys([]), 16.0);
        assert_eq!(character.state, AnimationState::Crouching);
    }

    #[test]
    fn test_jump_exits_crouch() {
        let sim = simulation();
        let mut character = grounded_character(&sim);

        tick(&sim, &mut character, &keys([Action::Crouch]), 16.0);
        sim.handle_input(&mut character, &keys([Action::Jump]));
        assert_eq!(character.state, AnimationState::Jumping);
        assert!(character.is_jumping);
    }

    #[test]
    fn test_attack_interrupts_crouch() {
        let sim = simulation();
        let mut character = grounded_character(&sim);

        tick(&sim, &mut character, &keys([Action::Crouch]), 16.0);
        sim.handle_input(&mut character, &keys([Action::Attack]));
        assert_eq!(character.state, AnimationState::Attacking);
        assert_eq!(character.cursor.frame(), 0);
    }

    #[test]
    fn test_attack_interrupts_running() {
        let sim = simulation();
        let mut character = grounded_character(&sim);

        tick(&sim, &mut character, &keys([Action::MoveRight]), 16.0);
        assert_eq!(character.state, AnimationState::Running);

        sim.handle_input(&mut character, &keys([Action::Attack]));
        assert_eq!(character.state, AnimationState::Attacking);
    }

    #[test]
    fn test_attack_expires_after_full_cycle() {
        let sim = simulation();
        let mut character = grounded_character(&sim);
        let none = keys([]);

        sim.handle_input(&mut character, &keys([Action::Attack]));
        assert_eq!(character.state, AnimationState::Attacking);

        // 12 attack frames: 11 advances reach the last frame
        for expected in 1..12 {
            sim.update(&mut character, FRAME_MS);
            assert_eq!(character.cursor.frame(), expected);
            assert_eq!(character.state, AnimationState::Attacking);
            sim.handle_input(&mut character, &none);
        }

        // The wrap back to frame 0 ends the attack
        sim.update(&mut character, FRAME_MS);
        assert_eq!(character.state, AnimationState::Idle);
        assert_eq!(character.cursor.frame(), 0);
    }

    #[test]
    fn test_attack_persists_after_key_release() {
        let sim = simulation();
        let mut character = grounded_character(&sim);

        tick(&sim, &mut character, &keys([Action::Attack]), 16.0);
        // Key released mid-animation; the attack keeps playing
        tick(&sim, &mut character, &keys([]), 16.0);
        assert_eq!(character.state, AnimationState::Attacking);
    }

    #[test]
    fn test_frame_advance_split_across_ticks() {
        let sim = simulation();
        let mut character = grounded_character(&sim);
        let none = keys([]);

        // 50 + 50 + 50 sums to exactly the threshold: one advance, on the
        // third tick
        tick(&sim, &mut character, &none, 50.0);
        tick(&sim, &mut character, &none, 50.0);
        assert_eq!(character.cursor.frame(), 0);
        tick(&sim, &mut character, &none, 50.0);
        assert_eq!(character.cursor.frame(), 1);
    }

    #[test]
    fn test_oversized_tick_advances_single_frame() {
        let sim = simulation();
        let mut character = grounded_character(&sim);

        tick(&sim, &mut character, &keys([]), FRAME_MS * 3.0);
        assert_eq!(character.cursor.frame(), 1);
    }

    #[test]
    fn test_frame_index_always_in_bounds() {
        let sim = simulation();
        let mut character = grounded_character(&sim);
        let catalog = AnimationCatalog::standard();

        // Exercise every transition path with a scripted input sequence
        let script = [
            keys([Action::MoveRight]),
            keys([Action::MoveRight, Action::Jump]),
            keys([]),
            keys([]),
            keys([Action::Crouch]),
            keys([Action::Attack]),
            keys([]),
            keys([Action::MoveLeft]),
            keys([Action::Jump]),
            keys([]),
        ];
        for (i, input) in script.iter().cycle().take(500).enumerate() {
            let delta = [16.0, 150.0, 90.0][i % 3];
            tick(&sim, &mut character, input, delta);
            let frame_count = catalog.descriptor(character.state).frame_count;
            assert!(
                character.cursor.frame() < frame_count,
                "frame {} out of bounds for {:?}",
                character.cursor.frame(),
                character.state
            );
        }
    }

    #[test]
    fn test_physics_is_per_tick_but_animation_is_time_scaled() {
        let sim = simulation();

        // Same number of ticks at very different delta times
        let mut fast = Character::spawn(sim.config());
        let mut slow = Character::spawn(sim.config());
        let none = keys([]);
        for _ in 0..5 {
            tick(&sim, &mut fast, &none, 8.0);
            tick(&sim, &mut slow, &none, 150.0);
        }

        // Vertical motion depends only on the tick count
        assert_eq!(fast.y, slow.y);
        assert_eq!(fast.vely, slow.vely);
        // Animation progress depends on accumulated time
        assert_eq!(fast.cursor.frame(), 0);
        assert_eq!(slow.cursor.frame(), 5 % 4);
    }

    #[test]
    fn test_current_frame_geometry_and_flip() {
        let sim = simulation();
        let mut character = grounded_character(&sim);

        tick(&sim, &mut character, &keys([Action::MoveLeft]), FRAME_MS);
        assert_eq!(character.state, AnimationState::Running);
        assert_eq!(character.cursor.frame(), 1);

        let frame = sim.current_frame(&character);
        // Running row 1, frame 1, 50x37 cells
        assert_eq!(frame.src, Rect::new(50.0, 37.0, 50.0, 37.0));
        assert_eq!(frame.dest.x, character.x);
        assert_eq!(frame.dest.y, character.y);
        assert_eq!(frame.dest.width, 50.0);
        assert_eq!(frame.dest.height, 50.0);
        assert!(frame.flip_horizontal);
    }

    #[test]
    fn test_gravity_accumulates_while_airborne() {
        let sim = simulation();
        let mut character = grounded_character(&sim);

        tick(&sim, &mut character, &keys([Action::Jump]), 16.0);
        let vely_first = character.vely;
        tick(&sim, &mut character, &keys([]), 16.0);
        assert_eq!(character.vely, vely_first + sim.config().gravity);
    }
}
