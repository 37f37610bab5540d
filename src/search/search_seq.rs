use rand::Rng;

use crate::engine::{Game, Move};

use super::frontier::average_outcome_score;
use super::{pick_best, BranchEval, SearchConfig, SearchStats};

/// Single-threaded brute-force policy.
///
/// Evaluates the four directions in the fixed order {up, down, left, right}
/// and picks the first one attaining the highest frontier average.
pub struct BruteForce {
    cfg: SearchConfig,
    stats: SearchStats,
}

impl BruteForce {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(cfg: SearchConfig) -> Self {
        Self { cfg, stats: SearchStats::default() }
    }

    /// Best direction for `game`, or `None` when every direction is a no-op
    /// (the session has no legal continuation even if the board is not full).
    #[inline]
    pub fn best_move<R: Rng + ?Sized>(&mut self, game: &Game, rng: &mut R) -> Option<Move> {
        self.best_move_with_eval(game, rng).map(|(dir, _)| dir)
    }

    /// Best direction paired with its frontier average, for diagnostic
    /// reporting.
    ///
    /// ```
    /// use avg_2048::engine::Game;
    /// use avg_2048::search::{BruteForce, SearchConfig};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let game = Game::start(&mut rng);
    /// let mut policy = BruteForce::with_config(SearchConfig { node_budget: 100, ..Default::default() });
    /// let (_dir, avg) = policy.best_move_with_eval(&game, &mut rng).unwrap();
    /// assert!(avg >= 0.0);
    /// ```
    pub fn best_move_with_eval<R: Rng + ?Sized>(
        &mut self,
        game: &Game,
        rng: &mut R,
    ) -> Option<(Move, f64)> {
        let branches = self.branch_evals(game, rng);
        pick_best(&branches).map(|b| (b.dir, b.avg_score))
    }

    /// Frontier average for each direction, in the fixed order
    /// `[Up, Down, Left, Right]`; no-op directions are marked `legal=false`.
    pub fn branch_evals<R: Rng + ?Sized>(&mut self, game: &Game, rng: &mut R) -> [BranchEval; 4] {
        let mut nodes = 0u64;
        let mut out = [
            BranchEval { dir: Move::Up, avg_score: 0.0, legal: false },
            BranchEval { dir: Move::Down, avg_score: 0.0, legal: false },
            BranchEval { dir: Move::Left, avg_score: 0.0, legal: false },
            BranchEval { dir: Move::Right, avg_score: 0.0, legal: false },
        ];
        for (slot, dir) in out.iter_mut().zip(Move::ALL) {
            if let Some(outcome) = average_outcome_score(game, dir, &self.cfg, rng) {
                *slot = BranchEval { dir, avg_score: outcome.mean_score, legal: true };
                nodes += outcome.nodes;
            }
        }
        self.stats.nodes = nodes;
        self.stats.peak_nodes = self.stats.peak_nodes.max(nodes);
        out
    }

    /// Statistics from the last call to [`Self::branch_evals`] (directly or
    /// via the `best_move` helpers).
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

impl Default for BruteForce {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Grid;
    use crate::snapshot::GameData;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn game_with_board(board: Grid) -> Game {
        GameData { board, added_tiles_count: 0, score: 0, history: Vec::new() }.into_game()
    }

    #[test]
    fn single_legal_direction_is_chosen() {
        // Packed to the left edge, strictly decreasing down each column and
        // across each row: only a right move changes the board.
        let game = game_with_board([
            [1, 2, 4, 0],
            [2, 4, 8, 0],
            [4, 8, 16, 0],
            [8, 16, 32, 0],
        ]);
        let mut rng = StdRng::seed_from_u64(21);
        let mut policy = BruteForce::with_config(SearchConfig {
            move_budget: 10,
            node_budget: 200,
        });
        let branches = policy.branch_evals(&game, &mut rng);
        let legal: Vec<_> = branches.iter().filter(|b| b.legal).collect();
        assert_eq!(legal.len(), 1);
        assert_eq!(policy.best_move(&game, &mut rng), Some(Move::Right));
    }

    #[test]
    fn dead_position_yields_no_move() {
        // Full board, no equal neighbors: every direction is a no-op.
        let game = game_with_board([
            [1, 2, 4, 8],
            [16, 32, 64, 128],
            [1, 2, 4, 8],
            [16, 32, 64, 128],
        ]);
        let mut rng = StdRng::seed_from_u64(22);
        let mut policy = BruteForce::new();
        assert_eq!(policy.best_move(&game, &mut rng), None);
    }

    #[test]
    fn stats_update_per_evaluation() {
        let mut rng = StdRng::seed_from_u64(23);
        let game = Game::start(&mut rng);
        let mut policy = BruteForce::with_config(SearchConfig {
            move_budget: 10,
            node_budget: 100,
        });
        let _ = policy.branch_evals(&game, &mut rng);
        let stats = policy.last_stats();
        assert!(stats.nodes > 0);
        assert!(stats.peak_nodes >= stats.nodes);
        policy.reset_stats();
        assert_eq!(policy.last_stats().nodes, 0);
    }
}
