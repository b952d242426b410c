// Player animation states

/// The five mutually-exclusive modes the player can be in
///
/// Each state is both a physics mode (jumping suppresses grounded
/// transitions) and a rendering mode (each state owns one animation on the
/// sprite sheet). That dual role is intentional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationState {
    /// Standing still on ground
    Idle,
    /// Moving horizontally on ground
    Running,
    /// Airborne after a jump impulse
    Jumping,
    /// Holding crouch on ground
    Crouching,
    /// Playing the attack animation
    Attacking,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::Idle
    }
}

impl AnimationState {
    /// All states, in catalog order
    pub const ALL: [AnimationState; 5] = [
        Self::Idle,
        Self::Running,
        Self::Jumping,
        Self::Crouching,
        Self::Attacking,
    ];

    /// Index into the animation catalog
    pub fn catalog_index(&self) -> usize {
        match self {
            Self::Idle => 0,
            Self::Running => 1,
            Self::Jumping => 2,
            Self::Crouching => 3,
            Self::Attacking => 4,
        }
    }

    /// Human-readable name, used in logs and error messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Jumping => "jumping",
            Self::Crouching => "crouching",
            Self::Attacking => "attacking",
        }
    }
}
