//! Event-driven score accumulator with a decaying combo window
//!
//! The combo multiplier rewards chains of quick pellet pickups; it never
//! applies to bonuses, captures or level-clear awards.

use serde::{Deserialize, Serialize};

use super::state::GameEvent;
use crate::consts::{COMBO_FAST, COMBO_MED};

/// Current score plus the combo clock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    /// Monotonically non-decreasing within a life
    pub points: u64,
    /// Seconds since the last pellet was collected
    pub since_pellet: f32,
}

impl Default for Score {
    fn default() -> Self {
        Self {
            points: 0,
            // Start outside every combo window
            since_pellet: COMBO_MED,
        }
    }
}

impl Score {
    /// Advance the combo clock by one frame
    pub fn advance(&mut self, dt: f32) {
        self.since_pellet += dt;
    }

    /// Step function of time since the last pellet: x3 under
    /// [`COMBO_FAST`], x2 under [`COMBO_MED`], x1 beyond. Both boundaries
    /// are exclusive (`<`, not `<=`).
    pub fn combo_multiplier(&self) -> u64 {
        if self.since_pellet < COMBO_FAST {
            3
        } else if self.since_pellet < COMBO_MED {
            2
        } else {
            1
        }
    }

    /// Accumulate one event. Pellet events reset the combo clock; their
    /// points were already scaled by the collector.
    pub fn apply(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::PelletEaten { points } => {
                self.points += points;
                self.since_pellet = 0.0;
            }
            GameEvent::BonusEaten { points }
            | GameEvent::PursuerCaptured { points }
            | GameEvent::LevelCleared { bonus: points, .. } => {
                self.points += points;
            }
            GameEvent::PlayerDied { .. } | GameEvent::DirectionChanged { .. } => {}
        }
    }
}
