//! Text rendering for boards and move transitions.
//!
//! Purely observational: nothing here feeds back into engine state.

use std::fmt;

use crate::engine::{Game, Grid, Move, BOARD_COLS, BOARD_ROWS};

const CELL_WIDTH: usize = 6;

/// Framed board, one separator line between rows.
pub fn render_board(board: &Grid) -> String {
    let separator = "|".to_string() + &"-".repeat((CELL_WIDTH + 1) * BOARD_COLS) + "|";
    let mut out = String::new();
    for row in board.iter().take(BOARD_ROWS) {
        out.push_str(&separator);
        out.push('\n');
        out.push('|');
        for &cell in row.iter().take(BOARD_COLS) {
            if cell == 0 {
                out.push_str(&format!("{:>width$} ", "", width = CELL_WIDTH));
            } else {
                out.push_str(&format!("{:>width$} ", cell, width = CELL_WIDTH));
            }
        }
        out.push('|');
        out.push('\n');
    }
    out.push_str(&separator);
    out.push('\n');
    out
}

/// Board plus the session counters, for interactive and auto-play output.
pub fn render_verbose(game: &Game) -> String {
    format!(
        "{}Score: {}\nTotal tiles added: {}\n",
        render_board(game.board()),
        game.score(),
        game.added_tiles_count()
    )
}

/// A sequence of boards side by side under a direction header, one band per
/// grid row. Used to show before / after-move / after-spawn transitions.
pub fn render_transition(boards: &[Grid], direction: Move) -> String {
    let mut out = format!("Direction: {}\n", direction);
    for row in 0..BOARD_ROWS {
        for board in boards {
            out.push('|');
            for &cell in &board[row] {
                out.push_str(&format!("{:>4} ", cell));
            }
            out.push_str("|  ");
        }
        out.push('\n');
    }
    out
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(self.board()))
    }
}
