//! avg-2048: a 2048 game engine + brute-force average-score player
//!
//! This crate provides:
//! - A [`engine::Game`] session type: 4x4 grid, slide/merge moves, random
//!   tile spawns, literal full-board loss detection, diagnostic history
//! - A brute-force search policy (`search` module) that breadth-first
//!   expands continuations and picks the direction with the highest average
//!   frontier score, in single-threaded and parallel variants
//! - A JSON snapshot format for sessions (`snapshot` module)
//! - Observational board/transition rendering (`display` module)
//!
//! Quick start:
//! ```
//! use avg_2048::engine::Game;
//! use avg_2048::search::{BruteForceParallel, SearchConfig};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic session with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut game = Game::start(&mut rng);
//!
//! let mut policy = BruteForceParallel::with_config(SearchConfig {
//!     node_budget: 200,
//!     ..Default::default()
//! });
//! if let Some(dir) = policy.best_move(&game, &mut rng) {
//!     assert!(game.apply_move(dir));
//!     game.spawn_random_tile(&mut rng);
//! }
//! ```
//!
//! Randomness is always caller-injected (`rand::Rng`); binaries use
//! `thread_rng`, tests use seeded `StdRng` for exact reproduction.

pub mod display;
pub mod engine;
pub mod search;
pub mod snapshot;
