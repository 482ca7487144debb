//! Pursuer direction-choice policies
//!
//! Pure functions over a player snapshot and the wall set; no pursuer holds
//! a reference back into the world. All scoring is Manhattan distance over a
//! short fixed lookahead step. That local greedy metric is deliberate
//! behavior, not a placeholder for pathfinding.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::direction::Dir;
use super::state::{Pursuer, PursuerKind, Wall};
use crate::consts::{AI_LOOKAHEAD, PREDICT_DIST, RANDOM_LOCK_REROLL};
use crate::manhattan_distance;

/// Read-only view of the player for AI queries
#[derive(Debug, Clone, Copy)]
pub struct PlayerSnapshot {
    pub pos: Vec2,
    pub dir: Option<Dir>,
}

/// How a pursuer picks its heading at intersections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChasePolicy {
    /// Head for the player's current position
    Direct,
    /// Head for a point ahead of the player's heading
    Predict,
    /// Predict, with a longer dormancy before engaging
    PredictDelayed,
    /// Keep a locked heading, re-rolled randomly at intersections
    RandomLock,
}

impl PursuerKind {
    pub fn policy(self) -> ChasePolicy {
        match self {
            PursuerKind::Hunter => ChasePolicy::Direct,
            PursuerKind::Scout => ChasePolicy::Predict,
            PursuerKind::Stalker => ChasePolicy::PredictDelayed,
            PursuerKind::Drifter => ChasePolicy::RandomLock,
        }
    }
}

/// The four cardinals filtered down to walkable ones. When more than one
/// candidate survives and `allow_reverse` is false, the reverse of the
/// current heading is removed; a dead end still allows turning back.
pub fn viable_directions(
    pos: Vec2,
    current: Option<Dir>,
    radius: f32,
    walls: &[Wall],
    allow_reverse: bool,
) -> Vec<Dir> {
    let mut dirs: Vec<Dir> = Dir::ALL
        .into_iter()
        .filter(|&d| collision::can_move(pos, d, radius, walls))
        .collect();

    if !allow_reverse
        && let Some(current) = current
        && dirs.len() > 1
    {
        dirs.retain(|&d| d != current.opposite());
    }
    dirs
}

/// Pick the viable direction whose lookahead step minimizes (or maximizes)
/// Manhattan distance to `target`. Ties resolve to the first direction in
/// [`Dir::ALL`] order.
fn best_by_distance(viable: &[Dir], from: Vec2, target: Vec2, maximize: bool) -> Option<Dir> {
    let mut best: Option<(Dir, f32)> = None;
    for &dir in viable {
        let probe = from + dir.vector() * AI_LOOKAHEAD;
        let dist = manhattan_distance(probe, target);
        let better = match best {
            None => true,
            Some((_, best_dist)) => {
                if maximize {
                    dist > best_dist
                } else {
                    dist < best_dist
                }
            }
        };
        if better {
            best = Some((dir, dist));
        }
    }
    best.map(|(dir, _)| dir)
}

/// Decide a new heading for a pursuer standing at an intersection.
///
/// Returns `None` to keep the current heading (random-lock hold, or no
/// viable direction at all). Frightened pursuers flee regardless of policy:
/// the same scoring, maximizing distance instead.
pub fn choose_direction(
    pursuer: &Pursuer,
    player: &PlayerSnapshot,
    walls: &[Wall],
    rng: &mut impl Rng,
) -> Option<Dir> {
    // Inside the den the reverse exclusion is waived so the pursuer can
    // back out of the enclosure
    let allow_reverse = !pursuer.exited_den;
    let viable = viable_directions(pursuer.pos, pursuer.dir, pursuer.radius, walls, allow_reverse);
    if viable.is_empty() {
        return None;
    }

    if pursuer.is_frightened() {
        return best_by_distance(&viable, pursuer.pos, player.pos, true);
    }

    match pursuer.kind.policy() {
        ChasePolicy::Direct => best_by_distance(&viable, pursuer.pos, player.pos, false),
        ChasePolicy::Predict | ChasePolicy::PredictDelayed => {
            let lead = player
                .dir
                .map(|d| d.vector() * PREDICT_DIST)
                .unwrap_or(Vec2::ZERO);
            best_by_distance(&viable, pursuer.pos, player.pos + lead, false)
        }
        ChasePolicy::RandomLock => {
            if rng.random_bool(RANDOM_LOCK_REROLL) {
                Some(viable[rng.random_range(0..viable.len())])
            } else {
                None
            }
        }
    }
}
