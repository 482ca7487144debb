//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - `dt` supplied by the caller, one tick per rendered frame
//! - Seeded RNG only, passed into the tick
//! - Stable entity iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod ai;
pub mod bounds;
pub mod collision;
pub mod direction;
pub mod map;
pub mod score;
pub mod state;
pub mod tick;

pub use ai::{ChasePolicy, PlayerSnapshot, choose_direction, viable_directions};
pub use bounds::Aabb;
pub use collision::{can_move, is_at_intersection, move_entity};
pub use direction::Dir;
pub use map::{EntityFactory, MapError, SimFactory, load_map, parse_map, parse_map_with};
pub use score::Score;
pub use state::{
    Bonus, GameEvent, GameState, Mode, Pellet, Player, Pursuer, PursuerKind, Wall,
};
pub use tick::{TickInput, tick};
