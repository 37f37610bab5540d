use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use avg_2048::display::{render_transition, render_verbose};
use avg_2048::engine::Game;
use avg_2048::search::{BruteForceParallel, SearchConfig};

#[derive(Debug, Parser)]
#[command(name = "avg-2048", about = "Brute-force 2048 auto-play runner")]
struct Args {
    /// Number of games to play (default: run until interrupted)
    #[arg(long)]
    games: Option<u64>,

    /// RNG seed for fully reproducible runs (default: entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Per-direction search: absolute spawn-count ceiling
    #[arg(long, default_value_t = 100)]
    move_budget: u32,

    /// Per-direction search: frontier expansion ceiling
    #[arg(long, default_value_t = 10_000)]
    node_budget: u64,

    /// Print every move as a before/after/after-spawn transition
    #[arg(long)]
    show_moves: bool,

    /// Suppress the status line
    #[arg(long)]
    quiet: bool,

    /// Write the final game of the run as a JSON snapshot
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut rng: StdRng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(rand::thread_rng()).context("seeding RNG")?,
    };
    let cfg = SearchConfig {
        move_budget: args.move_budget,
        node_budget: args.node_budget,
    };

    let pb = if args.quiet {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner} {elapsed_precise} | Games: {pos} | {msg}")?
                .tick_chars("⠁⠃⠇⠧⠷⠿⠻⠟⠯⠷⠧⠇⠃"),
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    };

    let mut top_score: u64 = 0;
    let mut games_played: u64 = 0;
    let mut last_game: Option<Game> = None;

    while args.games.map_or(true, |n| games_played < n) {
        let game = auto_play(&mut rng, cfg, args.show_moves);
        games_played += 1;
        top_score = top_score.max(game.score());
        if let Some(pb) = &pb {
            pb.set_position(games_played);
            pb.set_message(format!(
                "Top score: {} | last: {} (highest tile {})",
                top_score,
                game.score(),
                game.highest_tile()
            ));
        }
        last_game = Some(game);
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    if let Some(game) = &last_game {
        println!("Game over");
        print!("{}", render_verbose(game));
        println!("Top score: {}\nTotal games: {}", top_score, games_played);
        if let Some(path) = &args.out {
            avg_2048::snapshot::write_game_to_path(path, &game.export_data())
                .with_context(|| format!("writing snapshot to {}", path.display()))?;
        }
    }
    Ok(())
}

/// One full auto-play session: spawn, then repeatedly take the direction
/// with the best frontier average until the board is lost or no direction
/// changes it.
fn auto_play<R: Rng>(rng: &mut R, cfg: SearchConfig, show_moves: bool) -> Game {
    let mut policy = BruteForceParallel::with_config(cfg);
    let mut game = Game::start(rng);
    loop {
        let Some((direction, avg)) = policy.best_move_with_eval(&game, rng) else {
            break;
        };
        let before = *game.board();
        if !game.apply_move(direction) {
            break;
        }
        let after_move = *game.board();
        if game.is_lost() {
            break;
        }
        game.spawn_random_tile(rng);
        if show_moves {
            println!("Average score for that direction: {}", avg);
            print!(
                "{}",
                render_transition(&[before, after_move, *game.board()], direction)
            );
        }
        if game.is_lost() {
            break;
        }
    }
    game
}
