use std::collections::VecDeque;

use rand::Rng;

use crate::engine::{Game, Move, Status};

use super::SearchConfig;

/// Result of one per-direction search.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DirectionOutcome {
    pub mean_score: f64,
    pub nodes: u64,
}

/// Score `direction` from `game` by breadth-first expansion.
///
/// Returns `None` when the move is a no-op on the current board; the caller
/// excludes such directions from comparison. Otherwise the post-move snapshot
/// seeds a frontier that is expanded until it empties, the next snapshot has
/// reached the move budget, or the node budget is spent. Each expansion
/// spawns one random tile on the dequeued snapshot and re-enqueues every
/// still-playing board produced by the four moves. The result is the mean
/// cumulative score over whatever remains on the frontier; when the frontier
/// drains completely the starting snapshot's score is the only sample, so the
/// mean is always over a non-empty set.
pub(crate) fn average_outcome_score<R: Rng + ?Sized>(
    game: &Game,
    direction: Move,
    cfg: &SearchConfig,
    rng: &mut R,
) -> Option<DirectionOutcome> {
    let mut root = game.branch();
    if !root.apply_move(direction) {
        return None;
    }
    let root_score = root.score();

    let mut frontier: VecDeque<Game> = VecDeque::new();
    frontier.push_back(root);
    let mut expanded: u64 = 0;

    while expanded < cfg.node_budget {
        let Some(mut current) = frontier.pop_front() else {
            break;
        };
        if current.added_tiles_count() >= cfg.move_budget {
            // Keep the budget-hitting snapshot in the sample.
            frontier.push_front(current);
            break;
        }
        expanded += 1;
        current.spawn_random_tile(rng);
        for dir in Move::ALL {
            let mut child = current.branch();
            if child.apply_move(dir) && child.status() == Status::Playing {
                frontier.push_back(child);
            }
        }
    }

    let mean_score = if frontier.is_empty() {
        root_score as f64
    } else {
        let total: f64 = frontier.iter().map(|g| g.score() as f64).sum();
        total / frontier.len() as f64
    };
    Some(DirectionOutcome { mean_score, nodes: expanded })
}
