use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::engine::{Game, Move};

use super::frontier::average_outcome_score;
use super::{pick_best, BranchEval, SearchConfig, SearchStats};

/// Rayon-parallel brute-force policy.
///
/// The four per-direction searches never share state (each works on its own
/// snapshot copies), so they run as independent rayon tasks. Each task gets
/// its own `StdRng` seeded from the caller's RNG, which keeps results
/// deterministic for a given master seed.
pub struct BruteForceParallel {
    cfg: SearchConfig,
    stats: SearchStats,
}

impl BruteForceParallel {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(cfg: SearchConfig) -> Self {
        Self { cfg, stats: SearchStats::default() }
    }

    /// Best direction for `game`, or `None` when every direction is a no-op.
    #[inline]
    pub fn best_move<R: Rng + ?Sized>(&mut self, game: &Game, rng: &mut R) -> Option<Move> {
        self.best_move_with_eval(game, rng).map(|(dir, _)| dir)
    }

    /// Best direction paired with its frontier average.
    pub fn best_move_with_eval<R: Rng + ?Sized>(
        &mut self,
        game: &Game,
        rng: &mut R,
    ) -> Option<(Move, f64)> {
        let branches = self.branch_evals(game, rng);
        pick_best(&branches).map(|b| (b.dir, b.avg_score))
    }

    /// Frontier average for each direction, computed in parallel. Output
    /// order is the fixed `[Up, Down, Left, Right]` regardless of task
    /// completion order.
    pub fn branch_evals<R: Rng + ?Sized>(&mut self, game: &Game, rng: &mut R) -> [BranchEval; 4] {
        let seeds: [u64; 4] = rng.gen();
        let cfg = self.cfg;
        let evals: Vec<(usize, BranchEval, u64)> = Move::ALL
            .par_iter()
            .enumerate()
            .map(|(i, &dir)| {
                let mut task_rng = StdRng::seed_from_u64(seeds[i]);
                match average_outcome_score(game, dir, &cfg, &mut task_rng) {
                    Some(outcome) => (
                        i,
                        BranchEval { dir, avg_score: outcome.mean_score, legal: true },
                        outcome.nodes,
                    ),
                    None => (i, BranchEval { dir, avg_score: 0.0, legal: false }, 0),
                }
            })
            .collect();
        let mut out = [
            BranchEval { dir: Move::Up, avg_score: 0.0, legal: false },
            BranchEval { dir: Move::Down, avg_score: 0.0, legal: false },
            BranchEval { dir: Move::Left, avg_score: 0.0, legal: false },
            BranchEval { dir: Move::Right, avg_score: 0.0, legal: false },
        ];
        let mut nodes = 0u64;
        for (i, branch, branch_nodes) in evals {
            out[i] = branch;
            nodes += branch_nodes;
        }
        self.stats.nodes = nodes;
        self.stats.peak_nodes = self.stats.peak_nodes.max(nodes);
        out
    }

    /// Statistics from the last call to [`Self::branch_evals`].
    #[inline]
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    /// Reset accumulated stats to zero.
    #[inline]
    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }
}

impl Default for BruteForceParallel {
    fn default() -> Self {
        Self::new()
    }
}
