//! Per-frame world update
//!
//! One `tick` call advances the whole simulation by `dt`. The clock and the
//! RNG are explicit parameters so runs are reproducible frame over frame.

use rand::Rng;

use super::ai::{self, PlayerSnapshot};
use super::collision;
use super::direction::Dir;
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Requested player heading; buffered until a legal turn
    pub desired_dir: Option<Dir>,
}

/// Advance the game state by one frame.
///
/// Order per frame: combo clock, player turn + movement, pursuer state
/// machines + AI + movement, entity-vs-entity collisions, terminal
/// conditions, then score settlement. After a game over the world freezes.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, rng: &mut impl Rng) {
    if state.is_game_over() {
        state.events.clear();
        return;
    }

    let mut events: Vec<GameEvent> = Vec::new();

    state.score.advance(dt);

    // Player: buffered turn, then per-axis movement
    if let Some(player) = state.player.as_mut() {
        player.tick_timers(dt);
        if let Some(dir) = input.desired_dir {
            player.queue_direction(dir);
        }
        if player.try_change_direction(&state.walls)
            && let Some(dir) = player.dir
        {
            events.push(GameEvent::DirectionChanged { dir });
        }
        player.pos = collision::move_entity(
            player.pos,
            player.dir,
            player.speed,
            player.radius,
            dt,
            &state.walls,
        );
    }

    // Pursuers: timers, heading choice at intersections, movement
    let snapshot = state.player.as_ref().map(|p| PlayerSnapshot {
        pos: p.pos,
        dir: p.dir,
    });
    let rally = state.rally_point;
    for pursuer in &mut state.pursuers {
        pursuer.advance(dt);
        if pursuer.is_dormant() {
            continue;
        }
        pursuer.note_den_exit(rally);
        if let Some(snapshot) = snapshot.as_ref()
            && collision::is_at_intersection(pursuer.pos, pursuer.dir, pursuer.radius, &state.walls)
            && let Some(dir) = ai::choose_direction(pursuer, snapshot, &state.walls, rng)
        {
            pursuer.dir = Some(dir);
        }
        pursuer.pos = collision::move_entity(
            pursuer.pos,
            pursuer.dir,
            pursuer.speed(),
            pursuer.radius,
            dt,
            &state.walls,
        );
    }

    // Entity-vs-entity collisions
    let mut life_lost = false;
    let mut contact_processed = false;
    if let Some(player) = state.player.as_mut() {
        let player_bounds = player.bounds();

        let multiplier = state.score.combo_multiplier();
        for pellet in &mut state.pellets {
            if !pellet.collected && player_bounds.intersects(&pellet.bounds()) {
                pellet.collected = true;
                events.push(GameEvent::PelletEaten {
                    points: PELLET_POINTS * multiplier,
                });
            }
        }

        let mut frighten_all = false;
        for bonus in &mut state.bonuses {
            if !bonus.collected && player_bounds.intersects(&bonus.bounds()) {
                bonus.collected = true;
                events.push(GameEvent::BonusEaten {
                    points: BONUS_POINTS,
                });
                frighten_all = true;
            }
        }
        if frighten_all {
            log::debug!(
                "bonus collected, frightening {} pursuers",
                state.pursuers.len()
            );
            for pursuer in &mut state.pursuers {
                pursuer.frighten();
            }
        }

        for pursuer in &mut state.pursuers {
            if pursuer.is_dormant() || !player_bounds.intersects(&pursuer.bounds()) {
                continue;
            }
            if pursuer.is_frightened() {
                pursuer.capture(rally);
                events.push(GameEvent::PursuerCaptured {
                    points: CAPTURE_POINTS,
                });
            } else if state.death_cooldown >= DEATH_COOLDOWN_SECS && player.lose_life() {
                events.push(GameEvent::PlayerDied {
                    lives_left: player.lives,
                });
                life_lost = true;
                contact_processed = true;
            }
        }
    }

    if contact_processed {
        state.death_cooldown = 0.0;
    } else {
        state.death_cooldown += dt;
    }
    if life_lost {
        state.reset_positions();
    }

    // Terminal conditions
    if !state.level_clear_emitted && state.is_level_complete() {
        state.level_clear_emitted = true;
        let bonus = LEVEL_CLEAR_POINTS * u64::from(state.level);
        events.push(GameEvent::LevelCleared {
            level: state.level,
            bonus,
        });
        log::info!("level {} cleared", state.level);
    }

    // Settle the score, then publish the events for external consumers
    for event in &events {
        state.score.apply(event);
    }
    state.events = events;
}
