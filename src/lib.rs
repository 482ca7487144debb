//! Maze Chase - a deterministic maze-chase simulation engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collision, pursuer AI, scoring)
//! - `highscores`: Top-5 leaderboard with a line-oriented ledger file
//!
//! Rendering, audio and window management are external collaborators: they
//! consume the read accessors on [`sim::GameState`] and the per-tick event
//! list, and never feed anything back except a [`sim::TickInput`].

pub mod highscores;
pub mod sim;

pub use highscores::HighScores;

use glam::Vec2;

/// Game configuration constants
///
/// Distances are in the normalized world space of `sim::map` (the maze
/// mapped into `[-1, 1]`), tuned for boards around 15-19 cells across.
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Componentwise tolerance for position equality
    pub const POSITION_EPSILON: f32 = 0.001;

    /// Collision radius for the player and pursuers (half-box extent)
    pub const ENTITY_RADIUS: f32 = 0.05;
    /// Collision radius for pellets and bonus pickups
    pub const PICKUP_RADIUS: f32 = 0.03;

    /// Lookahead distance for movement viability probes
    pub const MOVE_PROBE: f32 = 0.02;
    /// Lookahead step used when scoring AI direction candidates
    pub const AI_LOOKAHEAD: f32 = 0.1;
    /// How far ahead of the player predictive pursuers aim
    pub const PREDICT_DIST: f32 = 0.4;
    /// Manhattan distance from the rally point at which a pursuer counts
    /// as having left the spawn enclosure
    pub const DEN_EXIT_DIST: f32 = 0.15;

    /// Player movement speed (world units per second)
    pub const PLAYER_SPEED: f32 = 0.4;
    /// Pursuer base movement speed before level scaling
    pub const PURSUER_SPEED: f32 = 0.35;
    /// Per-level pursuer speed multiplier
    pub const LEVEL_SPEED_SCALE: f32 = 1.1;

    /// Starting lives
    pub const START_LIVES: u32 = 3;
    /// Invulnerability window after losing a life (seconds)
    pub const INVULN_SECS: f32 = 2.0;
    /// Minimum time between two processed life-losing contacts (seconds)
    pub const DEATH_COOLDOWN_SECS: f32 = 1.0;
    /// Frightened mode duration after a bonus pickup (seconds)
    pub const FRIGHT_SECS: f32 = 6.0;

    /// Probability that a random-lock pursuer re-rolls its heading at an
    /// intersection
    pub const RANDOM_LOCK_REROLL: f64 = 0.5;

    /// Points per pellet before the combo multiplier
    pub const PELLET_POINTS: u64 = 10;
    /// Points per bonus pickup (never combo-scaled)
    pub const BONUS_POINTS: u64 = 50;
    /// Points per captured pursuer
    pub const CAPTURE_POINTS: u64 = 200;
    /// Level-clear bonus per level number
    pub const LEVEL_CLEAR_POINTS: u64 = 100;

    /// Combo window: pellets within this many seconds of the last score x3
    pub const COMBO_FAST: f32 = 0.5;
    /// Combo window: pellets within this many seconds of the last score x2
    pub const COMBO_MED: f32 = 1.0;

    /// Maximum number of ledger entries
    pub const MAX_HIGH_SCORES: usize = 5;
}

/// Manhattan distance between two points
#[inline]
pub fn manhattan_distance(a: Vec2, b: Vec2) -> f32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Componentwise position equality with [`consts::POSITION_EPSILON`] tolerance
#[inline]
pub fn approx_eq(a: Vec2, b: Vec2) -> bool {
    (a.x - b.x).abs() <= consts::POSITION_EPSILON && (a.y - b.y).abs() <= consts::POSITION_EPSILON
}
