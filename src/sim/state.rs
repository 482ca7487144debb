//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives here. All types are serializable
//! so a frontend can snapshot or persist a run.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Aabb;
use super::collision;
use super::direction::Dir;
use super::score::Score;
use crate::consts::*;
use crate::manhattan_distance;

/// A static maze wall cell. Never moves, speed is always zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub pos: Vec2,
    /// Half the cell size, so adjacent wall boxes tile seamlessly
    pub half_extent: f32,
}

impl Wall {
    pub fn new(pos: Vec2, half_extent: f32) -> Self {
        Self { pos, half_extent }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::centered(self.pos, self.half_extent)
    }
}

/// A small pickup worth [`PELLET_POINTS`], combo-scaled on collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pellet {
    pub pos: Vec2,
    /// Monotonic: false -> true, never back
    pub collected: bool,
}

impl Pellet {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            collected: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::centered(self.pos, PICKUP_RADIUS)
    }
}

/// A bonus pickup worth a flat [`BONUS_POINTS`]; collecting one frightens
/// every pursuer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bonus {
    pub pos: Vec2,
    pub collected: bool,
}

impl Bonus {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            collected: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::centered(self.pos, PICKUP_RADIUS)
    }
}

/// The player entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Original spawn position, restored on reset
    pub spawn: Vec2,
    pub speed: f32,
    pub radius: f32,
    /// Current heading; `None` before the first move
    pub dir: Option<Dir>,
    /// Buffered turn request from input; never drives movement directly
    pub next_dir: Option<Dir>,
    pub lives: u32,
    /// While positive, life loss is suppressed
    pub invuln_timer: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            spawn: pos,
            speed: PLAYER_SPEED,
            radius: ENTITY_RADIUS,
            dir: None,
            next_dir: None,
            lives: START_LIVES,
            invuln_timer: 0.0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::centered(self.pos, self.radius)
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_timer > 0.0
    }

    /// Buffer a turn request; it is applied by [`Self::try_change_direction`]
    pub fn queue_direction(&mut self, dir: Dir) {
        self.next_dir = Some(dir);
    }

    /// Apply the buffered turn request if the rules allow it this frame.
    ///
    /// A 180-degree reversal is always permitted; any other turn requires
    /// either no current heading or standing at an intersection, and in all
    /// cases the new direction must be immediately walkable. An unapplied
    /// request stays buffered for a later frame.
    ///
    /// Returns true when the heading actually changed.
    pub fn try_change_direction(&mut self, walls: &[Wall]) -> bool {
        let Some(next) = self.next_dir else {
            return false;
        };
        if self.dir == Some(next) {
            return false;
        }

        let allowed = match self.dir {
            None => true,
            Some(current) => {
                next == current.opposite()
                    || collision::is_at_intersection(self.pos, Some(current), self.radius, walls)
            }
        };

        if allowed && collision::can_move(self.pos, next, self.radius, walls) {
            self.dir = Some(next);
            return true;
        }
        false
    }

    /// Decrement lives and start the invulnerability window. A no-op while
    /// invulnerable, so one contact event cannot register twice.
    ///
    /// Returns true when a life was actually lost.
    pub fn lose_life(&mut self) -> bool {
        if self.is_invulnerable() {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.invuln_timer = INVULN_SECS;
        true
    }

    /// Restore position and heading to spawn. The invulnerability timer is
    /// intentionally kept: the death that triggered the reset just set it.
    pub fn reset(&mut self) {
        self.pos = self.spawn;
        self.dir = None;
        self.next_dir = None;
    }

    pub fn tick_timers(&mut self, dt: f32) {
        self.invuln_timer = (self.invuln_timer - dt).max(0.0);
    }
}

/// Pursuer identity. Selects the AI policy and the dormancy delay; gameplay
/// logic never branches on it otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PursuerKind {
    /// Chases the player's current position
    Hunter,
    /// Aims ahead of the player's heading
    Scout,
    /// Like Scout, but slower to leave the den
    Stalker,
    /// Re-rolls a random locked heading at intersections
    Drifter,
}

impl PursuerKind {
    /// Dormancy countdown before the pursuer activates (seconds)
    pub fn spawn_delay(self) -> f32 {
        match self {
            PursuerKind::Hunter => 0.0,
            PursuerKind::Scout => 1.5,
            PursuerKind::Stalker => 4.0,
            PursuerKind::Drifter => 2.5,
        }
    }
}

/// Pursuer lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Mode {
    /// Counting down the spawn delay; does not move, ignores AI
    Dormant { remaining: f32 },
    /// Normal speed, policy-driven
    Active,
    /// Half speed, timed, flees the player, capturable
    Frightened { remaining: f32 },
}

/// An AI-controlled chasing entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pursuer {
    pub kind: PursuerKind,
    pub pos: Vec2,
    pub dir: Option<Dir>,
    pub base_speed: f32,
    pub radius: f32,
    pub mode: Mode,
    /// Latched once the pursuer has moved a cell away from the rally point;
    /// until then the AI may pick its reverse direction so it cannot wedge
    /// inside the spawn enclosure
    pub exited_den: bool,
}

impl Pursuer {
    pub fn new(kind: PursuerKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            dir: None,
            base_speed: PURSUER_SPEED,
            radius: ENTITY_RADIUS,
            mode: Mode::Dormant {
                remaining: kind.spawn_delay(),
            },
            exited_den: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::centered(self.pos, self.radius)
    }

    pub fn is_dormant(&self) -> bool {
        matches!(self.mode, Mode::Dormant { .. })
    }

    pub fn is_frightened(&self) -> bool {
        matches!(self.mode, Mode::Frightened { .. })
    }

    /// Effective movement speed for the current mode
    pub fn speed(&self) -> f32 {
        match self.mode {
            Mode::Dormant { .. } => 0.0,
            Mode::Active => self.base_speed,
            Mode::Frightened { .. } => self.base_speed * 0.5,
        }
    }

    /// Advance the mode timers: Dormant expires into Active, Frightened
    /// expires back into Active.
    pub fn advance(&mut self, dt: f32) {
        match &mut self.mode {
            Mode::Dormant { remaining } => {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    log::debug!("pursuer {:?} activated", self.kind);
                    self.mode = Mode::Active;
                }
            }
            Mode::Frightened { remaining } => {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    self.mode = Mode::Active;
                }
            }
            Mode::Active => {}
        }
    }

    /// Enter (or refresh) Frightened mode. Entry reverses the current
    /// heading immediately; a refresh only restarts the timer. Dormant
    /// pursuers are unaffected.
    pub fn frighten(&mut self) {
        match self.mode {
            Mode::Active => {
                self.dir = self.dir.map(Dir::opposite);
                self.mode = Mode::Frightened {
                    remaining: FRIGHT_SECS,
                };
            }
            Mode::Frightened { .. } => {
                self.mode = Mode::Frightened {
                    remaining: FRIGHT_SECS,
                };
            }
            Mode::Dormant { .. } => {}
        }
    }

    /// Captured while Frightened: teleport back to the rally point and go
    /// straight back to Active. Scoring is the world's job.
    pub fn capture(&mut self, rally: Vec2) {
        self.pos = rally;
        self.dir = None;
        self.mode = Mode::Active;
        self.exited_den = false;
    }

    /// Send the pursuer back to the rally point, Dormant again
    pub fn reset(&mut self, rally: Vec2) {
        self.pos = rally;
        self.dir = None;
        self.mode = Mode::Dormant {
            remaining: self.kind.spawn_delay(),
        };
        self.exited_den = false;
    }

    /// Latch `exited_den` once far enough from the rally point
    pub fn note_den_exit(&mut self, rally: Vec2) {
        if !self.exited_den && manhattan_distance(self.pos, rally) > DEN_EXIT_DIST {
            self.exited_den = true;
        }
    }

    pub fn scale_speed(&mut self, factor: f32) {
        self.base_speed *= factor;
    }
}

/// Events pushed from mutators during a tick. The score component consumes
/// them at the end of the tick; rendering/audio collaborators drain the same
/// list afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Pellet collected; points already include the combo multiplier
    PelletEaten { points: u64 },
    BonusEaten { points: u64 },
    PursuerCaptured { points: u64 },
    PlayerDied { lives_left: u32 },
    LevelCleared { level: u32, bonus: u64 },
    DirectionChanged { dir: Dir },
}

/// Complete world state: exclusive owner of every entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current level number (1-based)
    pub level: u32,
    /// At most one player; absence is legal (map without a spawn marker)
    pub player: Option<Player>,
    pub pursuers: Vec<Pursuer>,
    pub pellets: Vec<Pellet>,
    pub bonuses: Vec<Bonus>,
    pub walls: Vec<Wall>,
    /// Mean of all pursuer spawn cells; world origin when there are none
    pub rally_point: Vec2,
    /// Seconds since the last processed life-losing contact
    pub death_cooldown: f32,
    pub score: Score,
    /// Latch so the level-clear bonus fires once per level
    pub level_clear_emitted: bool,
    /// Events emitted by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Map dimensions in cells (columns, rows)
    pub cols: usize,
    pub rows: usize,
}

impl GameState {
    /// True iff every pellet and every bonus has been collected
    pub fn is_level_complete(&self) -> bool {
        self.pellets.iter().all(|p| p.collected) && self.bonuses.iter().all(|b| b.collected)
    }

    /// True iff a player exists and is out of lives
    pub fn is_game_over(&self) -> bool {
        self.player.as_ref().is_some_and(|p| p.lives == 0)
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Advance to the next level: pursuers get faster, pickups are re-armed.
    /// The maze and entity positions are untouched.
    pub fn next_level(&mut self) {
        self.level += 1;
        for pursuer in &mut self.pursuers {
            pursuer.scale_speed(LEVEL_SPEED_SCALE);
        }
        for pellet in &mut self.pellets {
            pellet.collected = false;
        }
        for bonus in &mut self.bonuses {
            bonus.collected = false;
        }
        self.level_clear_emitted = false;
        log::info!("level {} started", self.level);
    }

    /// Restore the player to its spawn and every pursuer to the rally
    /// point, Dormant again. Used after a life loss and for explicit resets.
    pub fn reset_positions(&mut self) {
        if let Some(player) = self.player.as_mut() {
            player.reset();
        }
        let rally = self.rally_point;
        for pursuer in &mut self.pursuers {
            pursuer.reset(rally);
        }
        self.death_cooldown = 0.0;
    }

    /// Serialize the full state to JSON, for frontends that snapshot runs
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Restore a snapshot produced by [`Self::to_json`]
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lose_life_respects_invulnerability() {
        let mut player = Player::new(Vec2::ZERO);
        assert_eq!(player.lives, START_LIVES);

        assert!(player.lose_life());
        assert_eq!(player.lives, START_LIVES - 1);

        // Second loss inside the invulnerability window is suppressed
        assert!(!player.lose_life());
        assert_eq!(player.lives, START_LIVES - 1);

        player.tick_timers(INVULN_SECS + 0.1);
        assert!(player.lose_life());
        assert_eq!(player.lives, START_LIVES - 2);
    }

    #[test]
    fn test_player_reset_keeps_invulnerability() {
        let mut player = Player::new(Vec2::new(0.5, 0.5));
        player.pos = Vec2::ZERO;
        player.dir = Some(Dir::Left);
        player.lose_life();

        player.reset();
        assert_eq!(player.pos, player.spawn);
        assert_eq!(player.dir, None);
        assert!(player.is_invulnerable());
    }

    #[test]
    fn test_reversal_always_allowed() {
        // Tight horizontal corridor: walls above and below
        let walls = vec![
            Wall::new(Vec2::new(0.0, 0.12), 0.06),
            Wall::new(Vec2::new(0.0, -0.12), 0.06),
        ];
        let mut player = Player::new(Vec2::ZERO);
        player.dir = Some(Dir::Right);

        player.queue_direction(Dir::Left);
        assert!(player.try_change_direction(&walls));
        assert_eq!(player.dir, Some(Dir::Left));
    }

    #[test]
    fn test_perpendicular_turn_gated_by_intersection() {
        // Corridor: turning up is not possible, request stays buffered
        let walls = vec![
            Wall::new(Vec2::new(0.0, 0.12), 0.06),
            Wall::new(Vec2::new(0.0, -0.12), 0.06),
        ];
        let mut player = Player::new(Vec2::ZERO);
        player.dir = Some(Dir::Right);

        player.queue_direction(Dir::Up);
        assert!(!player.try_change_direction(&walls));
        assert_eq!(player.dir, Some(Dir::Right));
        assert_eq!(player.next_dir, Some(Dir::Up));

        // Open space: the same buffered request goes through
        assert!(player.try_change_direction(&[]));
        assert_eq!(player.dir, Some(Dir::Up));
    }

    #[test]
    fn test_first_move_needs_no_intersection() {
        let mut player = Player::new(Vec2::ZERO);
        player.queue_direction(Dir::Down);
        assert!(player.try_change_direction(&[]));
        assert_eq!(player.dir, Some(Dir::Down));
    }

    #[test]
    fn test_turn_into_wall_rejected() {
        // Wall directly above; reversal rule would allow Up from Down, but
        // the walkability check must still reject it
        let walls = vec![Wall::new(Vec2::new(0.0, 0.1), 0.05)];
        let mut player = Player::new(Vec2::ZERO);
        player.dir = Some(Dir::Down);

        player.queue_direction(Dir::Up);
        assert!(!player.try_change_direction(&walls));
        assert_eq!(player.dir, Some(Dir::Down));
    }

    #[test]
    fn test_dormant_counts_down_to_active() {
        let mut pursuer = Pursuer::new(PursuerKind::Scout, Vec2::ZERO);
        assert!(pursuer.is_dormant());
        assert_eq!(pursuer.speed(), 0.0);

        pursuer.advance(PursuerKind::Scout.spawn_delay() + 0.01);
        assert_eq!(pursuer.mode, Mode::Active);
        assert_eq!(pursuer.speed(), pursuer.base_speed);
    }

    #[test]
    fn test_frighten_reverses_and_halves_speed() {
        let mut pursuer = Pursuer::new(PursuerKind::Hunter, Vec2::ZERO);
        pursuer.mode = Mode::Active;
        pursuer.dir = Some(Dir::Right);

        pursuer.frighten();
        assert!(pursuer.is_frightened());
        assert_eq!(pursuer.dir, Some(Dir::Left));
        assert_eq!(pursuer.speed(), pursuer.base_speed * 0.5);
    }

    #[test]
    fn test_frighten_refresh_does_not_reverse_again() {
        let mut pursuer = Pursuer::new(PursuerKind::Hunter, Vec2::ZERO);
        pursuer.mode = Mode::Active;
        pursuer.dir = Some(Dir::Right);

        pursuer.frighten();
        pursuer.advance(FRIGHT_SECS / 2.0);
        pursuer.frighten();
        assert_eq!(pursuer.dir, Some(Dir::Left));
        assert_eq!(
            pursuer.mode,
            Mode::Frightened {
                remaining: FRIGHT_SECS
            }
        );
    }

    #[test]
    fn test_frighten_ignores_dormant() {
        let mut pursuer = Pursuer::new(PursuerKind::Stalker, Vec2::ZERO);
        pursuer.frighten();
        assert!(pursuer.is_dormant());
    }

    #[test]
    fn test_frightened_expires_to_active() {
        let mut pursuer = Pursuer::new(PursuerKind::Hunter, Vec2::ZERO);
        pursuer.mode = Mode::Active;
        pursuer.frighten();
        pursuer.advance(FRIGHT_SECS + 0.01);
        assert_eq!(pursuer.mode, Mode::Active);
    }

    #[test]
    fn test_capture_teleports_to_rally() {
        let rally = Vec2::new(0.3, 0.3);
        let mut pursuer = Pursuer::new(PursuerKind::Drifter, Vec2::ZERO);
        pursuer.mode = Mode::Active;
        pursuer.frighten();

        pursuer.capture(rally);
        assert_eq!(pursuer.pos, rally);
        assert_eq!(pursuer.mode, Mode::Active);
        assert!(!pursuer.exited_den);
    }

    #[test]
    fn test_state_snapshot_round_trip() {
        let state = GameState {
            level: 2,
            player: Some(Player::new(Vec2::new(0.1, -0.2))),
            pursuers: vec![Pursuer::new(PursuerKind::Drifter, Vec2::ZERO)],
            pellets: vec![Pellet::new(Vec2::new(0.3, 0.3))],
            bonuses: Vec::new(),
            walls: vec![Wall::new(Vec2::ZERO, 0.06)],
            rally_point: Vec2::new(0.5, 0.5),
            death_cooldown: 0.25,
            score: Score::default(),
            level_clear_emitted: false,
            events: Vec::new(),
            cols: 3,
            rows: 3,
        };

        let restored = GameState::from_json(&state.to_json().unwrap()).unwrap();
        assert_eq!(restored.level, state.level);
        assert_eq!(
            restored.player.as_ref().unwrap().pos,
            state.player.as_ref().unwrap().pos
        );
        assert_eq!(restored.pursuers[0].kind, state.pursuers[0].kind);
        assert_eq!(restored.death_cooldown, state.death_cooldown);
    }

    #[test]
    fn test_den_exit_latches() {
        let rally = Vec2::ZERO;
        let mut pursuer = Pursuer::new(PursuerKind::Hunter, rally);
        pursuer.note_den_exit(rally);
        assert!(!pursuer.exited_den);

        pursuer.pos = Vec2::new(DEN_EXIT_DIST + 0.01, 0.0);
        pursuer.note_den_exit(rally);
        assert!(pursuer.exited_den);
    }
}
