//! Per-axis movement resolution against the static wall set
//!
//! The tricky part of the maze sim: displacement is resolved one axis at a
//! time, never as a full 2D move. That is what lets an entity slide flush
//! along a wall on one axis while being blocked on the perpendicular one.

use glam::Vec2;

use super::bounds::Aabb;
use super::direction::Dir;
use super::state::Wall;
use crate::consts::MOVE_PROBE;

fn overlaps_any(bounds: &Aabb, walls: &[Wall]) -> bool {
    walls.iter().any(|w| bounds.intersects(&w.bounds()))
}

/// Resolve one frame of movement and return the new position.
///
/// The candidate displacement is `dir * speed * dt`. Horizontal directions
/// only ever test and change X; vertical only Y. A component that would put
/// the entity box inside any wall is rejected wholesale (position reverted
/// on that axis). No movement test occurs without a heading.
pub fn move_entity(
    pos: Vec2,
    dir: Option<Dir>,
    speed: f32,
    radius: f32,
    dt: f32,
    walls: &[Wall],
) -> Vec2 {
    let Some(dir) = dir else {
        return pos;
    };

    let step = dir.vector() * speed * dt;
    let candidate = if dir.is_horizontal() {
        Vec2::new(pos.x + step.x, pos.y)
    } else {
        Vec2::new(pos.x, pos.y + step.y)
    };

    if overlaps_any(&Aabb::centered(candidate, radius), walls) {
        pos
    } else {
        candidate
    }
}

/// Probe a fixed short lookahead in `dir` and report whether the move is
/// collision-free. Gates player turns and feeds AI viability queries.
pub fn can_move(pos: Vec2, dir: Dir, radius: f32, walls: &[Wall]) -> bool {
    let probe = pos + dir.vector() * MOVE_PROBE;
    !overlaps_any(&Aabb::centered(probe, radius), walls)
}

/// A position counts as an intersection when the entity is free to choose:
/// no current heading at all, or at least one perpendicular direction is
/// walkable. This is the only gate on heading changes, for the player's
/// buffered turns and the pursuer AI alike.
pub fn is_at_intersection(pos: Vec2, current: Option<Dir>, radius: f32, walls: &[Wall]) -> bool {
    match current {
        None => true,
        Some(dir) => dir
            .perpendicular()
            .iter()
            .any(|&perp| can_move(pos, perp, radius, walls)),
    }
}
