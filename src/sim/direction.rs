//! Cardinal movement directions
//!
//! "No direction" is `Option<Dir>::None` everywhere; a stopped entity has no
//! heading rather than a sentinel variant.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A cardinal movement direction (y-up world)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// Fixed enumeration order used for AI tie-breaking
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    /// Unit vector for this direction
    #[inline]
    pub fn vector(self) -> Vec2 {
        match self {
            Dir::Up => Vec2::new(0.0, 1.0),
            Dir::Down => Vec2::new(0.0, -1.0),
            Dir::Left => Vec2::new(-1.0, 0.0),
            Dir::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// The 180-degree reverse
    #[inline]
    pub fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }

    /// The two directions orthogonal to this one
    #[inline]
    pub fn perpendicular(self) -> [Dir; 2] {
        match self {
            Dir::Up | Dir::Down => [Dir::Left, Dir::Right],
            Dir::Left | Dir::Right => [Dir::Up, Dir::Down],
        }
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Dir::Left | Dir::Right)
    }
}
