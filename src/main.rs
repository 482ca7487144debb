//! Maze Chase entry point
//!
//! Headless demo driver: parses a board (a path from argv, or the built-in
//! one), runs the simulation for a fixed stretch of frames with a scripted
//! patrol input, and reports the outcome to the high score ledger.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use maze_chase::HighScores;
use maze_chase::consts::SIM_DT;
use maze_chase::sim::{self, Dir, GameEvent, TickInput};

const DEFAULT_BOARD: &str = "\
xxxxxxxxxxxxxxxxx
xc      x      cx
x xx xx x xx xx x
x               x
x xx x h s x xx x
x    x t d x    x
x xx xxxxxxx xx x
x               x
x xx xx x xx xx x
xc   p  x      cx
xxxxxxxxxxxxxxxxx";

const LEDGER_PATH: &str = "highscores.txt";
/// One minute of simulated play
const DEMO_FRAMES: u32 = 60 * 60;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut state = match std::env::args().nth(1) {
        Some(path) => sim::load_map(&path)?,
        None => sim::parse_map(DEFAULT_BOARD)?,
    };
    let mut rng = Pcg32::seed_from_u64(0xC0FFEE);

    // Scripted patrol: rotate the requested heading every two seconds and
    // let the buffered-turn rules decide when each switch actually lands
    let script = [
        Dir::Left,
        Dir::Up,
        Dir::Right,
        Dir::Up,
        Dir::Right,
        Dir::Down,
    ];

    for frame in 0..DEMO_FRAMES {
        let desired = script[(frame / 120) as usize % script.len()];
        let input = TickInput {
            desired_dir: Some(desired),
        };
        sim::tick(&mut state, &input, SIM_DT, &mut rng);

        for event in &state.events {
            match event {
                GameEvent::DirectionChanged { .. } => {}
                event => log::info!("frame {frame}: {event:?}"),
            }
        }

        if state.is_game_over() {
            log::info!("game over on frame {frame}");
            break;
        }
        if state.is_level_complete() {
            state.next_level();
        }
    }

    let score = state.score.points;
    println!("final score: {score} (level {})", state.level);

    let mut ledger = HighScores::load(LEDGER_PATH);
    if let Some(rank) = ledger.add_score("demo", score) {
        ledger.save(LEDGER_PATH)?;
        println!("new high score, rank {rank}");
    }

    Ok(())
}
