//! Text-grid map parsing and world construction
//!
//! One line per maze row. Recognized characters (case-insensitive):
//! `x` wall, space pellet, `p` player spawn (first one honored), `c` bonus
//! pickup, `h`/`s`/`t`/`d` pursuer spawns by kind. Anything else is empty
//! space. Lines shorter than the widest row simply end early; there are no
//! implicit trailing cells.

use std::fs;
use std::path::Path;

use glam::Vec2;
use thiserror::Error;

use super::score::Score;
use super::state::{Bonus, GameState, Pellet, Player, Pursuer, PursuerKind, Wall};

/// Errors from loading a maze
#[derive(Debug, Error)]
pub enum MapError {
    /// Missing or unreadable map file. Fatal: no partial world is produced.
    #[error("failed to read map file: {0}")]
    Io(#[from] std::io::Error),
    /// The file opened but held no cells
    #[error("map contains no rows")]
    Empty,
}

/// Constructs concrete entities during map parsing.
///
/// The parser never cares what an entity will look like on screen; a
/// frontend can substitute its own factory to tune entity parameters
/// without touching the grid scan. The simulation itself uses
/// [`SimFactory`].
pub trait EntityFactory {
    fn player(&self, pos: Vec2) -> Player {
        Player::new(pos)
    }

    fn pursuer(&self, kind: PursuerKind, pos: Vec2) -> Pursuer {
        Pursuer::new(kind, pos)
    }

    fn pellet(&self, pos: Vec2) -> Pellet {
        Pellet::new(pos)
    }

    fn bonus(&self, pos: Vec2) -> Bonus {
        Bonus::new(pos)
    }

    fn wall(&self, pos: Vec2, half_extent: f32) -> Wall {
        Wall::new(pos, half_extent)
    }
}

/// Default factory producing plain simulation entities
#[derive(Debug, Default)]
pub struct SimFactory;

impl EntityFactory for SimFactory {}

/// Parse a map with the default factory
pub fn parse_map(text: &str) -> Result<GameState, MapError> {
    parse_map_with(text, &SimFactory)
}

/// Read and parse a map file
pub fn load_map<P: AsRef<Path>>(path: P) -> Result<GameState, MapError> {
    let text = fs::read_to_string(path)?;
    parse_map(&text)
}

/// Parse a map, constructing entities through `factory`.
///
/// Grid cell `(row, col)` maps into `[-1, 1]` world space preserving the
/// maze's aspect ratio: the cell size is `2 / max(cols, rows)` on both
/// axes, row 0 along the top edge. The rally point is the mean of all
/// pursuer spawn cells, or the world origin when there are none.
pub fn parse_map_with<F: EntityFactory>(text: &str, factory: &F) -> Result<GameState, MapError> {
    let lines: Vec<&str> = text.lines().collect();
    let rows = lines.len();
    let cols = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    if rows == 0 || cols == 0 {
        return Err(MapError::Empty);
    }

    let cell = 2.0 / cols.max(rows) as f32;
    let center = |row: usize, col: usize| {
        Vec2::new(
            -1.0 + (col as f32 + 0.5) * cell,
            1.0 - (row as f32 + 0.5) * cell,
        )
    };

    let mut player: Option<Player> = None;
    let mut pursuers: Vec<Pursuer> = Vec::new();
    let mut pellets: Vec<Pellet> = Vec::new();
    let mut bonuses: Vec<Bonus> = Vec::new();
    let mut walls: Vec<Wall> = Vec::new();

    for (row, line) in lines.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            let pos = center(row, col);
            match ch.to_ascii_lowercase() {
                'x' => walls.push(factory.wall(pos, cell / 2.0)),
                ' ' => pellets.push(factory.pellet(pos)),
                'c' => bonuses.push(factory.bonus(pos)),
                'p' => {
                    // Only the first spawn marker is honored
                    if player.is_none() {
                        player = Some(factory.player(pos));
                    }
                }
                'h' => pursuers.push(factory.pursuer(PursuerKind::Hunter, pos)),
                's' => pursuers.push(factory.pursuer(PursuerKind::Scout, pos)),
                't' => pursuers.push(factory.pursuer(PursuerKind::Stalker, pos)),
                'd' => pursuers.push(factory.pursuer(PursuerKind::Drifter, pos)),
                _ => {}
            }
        }
    }

    // Mean of the discovered spawn cells; origin when there are none
    let rally_point = if pursuers.is_empty() {
        Vec2::ZERO
    } else {
        pursuers.iter().map(|p| p.pos).sum::<Vec2>() / pursuers.len() as f32
    };

    log::info!(
        "parsed {}x{} map: {} walls, {} pellets, {} bonuses, {} pursuers, player {}",
        cols,
        rows,
        walls.len(),
        pellets.len(),
        bonuses.len(),
        pursuers.len(),
        if player.is_some() { "present" } else { "absent" },
    );

    Ok(GameState {
        level: 1,
        player,
        pursuers,
        pellets,
        bonuses,
        walls,
        rally_point,
        death_cooldown: 0.0,
        score: Score::default(),
        level_clear_emitted: false,
        events: Vec::new(),
        cols,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approx_eq;

    #[test]
    fn test_player_between_walls() {
        // Player spawn flanked by walls atop a solid row: exactly one
        // player at row 0, col 1, and no pursuers
        let state = parse_map("xpx\nxxx").unwrap();

        assert_eq!(state.pursuers.len(), 0);
        assert_eq!(state.walls.len(), 5);
        let player = state.player.as_ref().unwrap();
        let cell = 2.0 / 3.0;
        assert!(approx_eq(
            player.pos,
            Vec2::new(0.0, 1.0 - 0.5 * cell)
        ));
    }

    #[test]
    fn test_empty_map_is_fatal() {
        assert!(matches!(parse_map(""), Err(MapError::Empty)));
        assert!(matches!(parse_map("\n"), Err(MapError::Empty)));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        assert!(matches!(
            load_map("no/such/map.txt"),
            Err(MapError::Io(_))
        ));
    }

    #[test]
    fn test_unrecognized_chars_are_empty_space() {
        let state = parse_map("x?!px").unwrap();
        assert_eq!(state.walls.len(), 2);
        assert_eq!(state.pellets.len(), 0);
        assert!(state.player.is_some());
    }

    #[test]
    fn test_spaces_become_pellets() {
        let state = parse_map("x  c x").unwrap();
        assert_eq!(state.pellets.len(), 3);
        assert_eq!(state.bonuses.len(), 1);
    }

    #[test]
    fn test_only_first_player_marker_honored() {
        let state = parse_map("p.p").unwrap();
        let player = state.player.as_ref().unwrap();
        let cell = 2.0 / 3.0;
        assert!(approx_eq(player.pos, Vec2::new(-1.0 + 0.5 * cell, 1.0 - 0.5 * cell)));
    }

    #[test]
    fn test_playerless_map_is_legal() {
        let state = parse_map("x x").unwrap();
        assert!(state.player.is_none());
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_pursuer_kinds_and_rally_point() {
        let state = parse_map("h.s\n...\nt.d").unwrap();
        assert_eq!(state.pursuers.len(), 4);
        assert_eq!(state.pursuers[0].kind, PursuerKind::Hunter);
        assert_eq!(state.pursuers[1].kind, PursuerKind::Scout);
        assert_eq!(state.pursuers[2].kind, PursuerKind::Stalker);
        assert_eq!(state.pursuers[3].kind, PursuerKind::Drifter);

        // Four symmetric corners average to the grid center
        let expected = (state.pursuers[0].pos
            + state.pursuers[1].pos
            + state.pursuers[2].pos
            + state.pursuers[3].pos)
            / 4.0;
        assert!(approx_eq(state.rally_point, expected));
        assert!(approx_eq(state.rally_point, Vec2::ZERO));
    }

    #[test]
    fn test_no_pursuers_rally_defaults_to_origin() {
        let state = parse_map("xpx").unwrap();
        assert_eq!(state.rally_point, Vec2::ZERO);
    }

    #[test]
    fn test_tall_map_preserves_aspect_ratio() {
        let state = parse_map("x\nx\nx\nx").unwrap();
        assert_eq!(state.dimensions(), (1, 4));
        // Cell size follows the larger dimension
        let cell = 0.5;
        assert!(approx_eq(
            state.walls[0].pos,
            Vec2::new(-1.0 + 0.5 * cell, 1.0 - 0.5 * cell)
        ));
        assert!((state.walls[0].half_extent - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_case_insensitive_markers() {
        let state = parse_map("XPH").unwrap();
        assert_eq!(state.walls.len(), 1);
        assert!(state.player.is_some());
        assert_eq!(state.pursuers.len(), 1);
    }
}
