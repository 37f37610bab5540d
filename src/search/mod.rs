//! Brute-force frontier search for 2048.
//!
//! This module provides two policy implementations:
//! - [`BruteForce`]: evaluates the four directions one after another.
//! - [`BruteForceParallel`]: rayon-based evaluation of the four directions,
//!   which are independent pure computations over disjoint snapshot copies.
//!
//! Both variants score a direction by breadth-first expanding continuations
//! of the post-move board (spawn one tile, try all four moves, repeat) up to
//! a move/node budget, then taking the arithmetic mean of the cumulative
//! scores left on the frontier. The direction with the highest mean wins;
//! ties go to the first direction in {up, down, left, right} order.
//!
//! Quick start
//! ```
//! use avg_2048::engine::Game;
//! use avg_2048::search::{BruteForce, SearchConfig};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(123);
//! let game = Game::start(&mut rng);
//! let mut policy = BruteForce::with_config(SearchConfig { node_budget: 200, ..Default::default() });
//! assert!(policy.best_move(&game, &mut rng).is_some());
//! ```

mod frontier;
mod search_par;
mod search_seq;

pub use search_par::BruteForceParallel;
pub use search_seq::BruteForce;

use crate::engine::{Game, Move};
use rand::Rng;

/// Mean frontier score for taking `direction` from `game`, or `None` when
/// the move is a no-op on the current board. This is the scoring primitive
/// behind both policies; see the module docs for the expansion rules.
pub fn average_outcome_score<R: Rng + ?Sized>(
    game: &Game,
    direction: Move,
    cfg: &SearchConfig,
    rng: &mut R,
) -> Option<f64> {
    frontier::average_outcome_score(game, direction, cfg, rng).map(|o| o.mean_score)
}

/// Budgets bounding a single per-direction search.
///
/// - `move_budget`: stop expanding once the next snapshot to expand has
///   spawned this many tiles since the session began (an absolute count, not
///   a depth relative to the search root).
/// - `node_budget`: global cap on frontier expansions per direction.
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub move_budget: u32,
    pub node_budget: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { move_budget: 100, node_budget: 10_000 }
    }
}

/// Per-direction outcome at the root.
///
/// `avg_score` is the mean frontier score for taking `dir` from the current
/// board; `legal` is false when the move is a no-op, in which case the
/// direction is excluded from comparison and `avg_score` is meaningless.
#[derive(Debug, Clone, Copy)]
pub struct BranchEval {
    pub dir: crate::engine::Move,
    pub avg_score: f64,
    pub legal: bool,
}

/// Basic search stats for a single evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    pub nodes: u64,
    pub peak_nodes: u64,
}

/// First legal branch with the strictly highest average; earlier entries win
/// ties, matching the fixed direction order.
pub(crate) fn pick_best(branches: &[BranchEval; 4]) -> Option<BranchEval> {
    let mut best: Option<BranchEval> = None;
    for branch in branches.iter().filter(|b| b.legal) {
        match best {
            Some(current) if branch.avg_score <= current.avg_score => {}
            _ => best = Some(*branch),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Move;

    #[test]
    fn pick_best_prefers_first_on_tie() {
        let branches = [
            BranchEval { dir: Move::Up, avg_score: 10.0, legal: true },
            BranchEval { dir: Move::Down, avg_score: 10.0, legal: true },
            BranchEval { dir: Move::Left, avg_score: 4.0, legal: true },
            BranchEval { dir: Move::Right, avg_score: 12.0, legal: false },
        ];
        let best = pick_best(&branches).unwrap();
        assert_eq!(best.dir, Move::Up);
    }

    #[test]
    fn pick_best_skips_illegal_and_handles_all_illegal() {
        let branches = [
            BranchEval { dir: Move::Up, avg_score: 0.0, legal: false },
            BranchEval { dir: Move::Down, avg_score: 0.0, legal: false },
            BranchEval { dir: Move::Left, avg_score: 0.0, legal: false },
            BranchEval { dir: Move::Right, avg_score: 0.0, legal: false },
        ];
        assert!(pick_best(&branches).is_none());
    }
}
