use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Board height in cells.
pub const BOARD_ROWS: usize = 4;
/// Board width in cells.
pub const BOARD_COLS: usize = 4;

/// Values a freshly spawned tile may take, chosen uniformly.
pub const NEW_TILE_OPTIONS: [u32; 2] = [1, 2];

/// The 4x4 grid of raw tile values; 0 marks an empty cell.
pub type Grid = [[u32; BOARD_COLS]; BOARD_ROWS];

/// A direction to slide/merge tiles. The set is closed; direction strings
/// from interactive callers go through [`Move::from_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All directions in the fixed evaluation order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Lowercase name, matching the wire/CLI form.
    pub fn as_str(self) -> &'static str {
        match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected direction word from an interactive caller. Not fatal; the
/// session continues unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid move direction: {0:?}")]
pub struct ParseMoveError(pub String);

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Move::Up),
            "down" => Ok(Move::Down),
            "left" => Ok(Move::Left),
            "right" => Ok(Move::Right),
            other => Err(ParseMoveError(other.to_string())),
        }
    }
}

/// Session status. `Lost` is terminal: no further moves are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Playing,
    Lost,
}

/// A cell coordinate, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

/// Append-only history entry. Score and spawn count are recorded as they
/// were when the event happened; the log is diagnostic only and never feeds
/// back into play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum MoveRecord {
    Spawn {
        pos: Pos,
        value: u32,
        score: u64,
        added_tiles_count: u32,
    },
    Move {
        direction: Move,
        score: u64,
        added_tiles_count: u32,
    },
}

/// A single 2048 session: the grid, cumulative score, spawn counter, status
/// and diagnostic history.
///
/// Tile values are the raw values of the variant this engine implements:
/// spawns are 1 or 2, and merging two `v` tiles produces a `2v` tile worth
/// `2v` points. All randomness flows through a caller-supplied [`Rng`], so a
/// seeded `StdRng` reproduces a session exactly.
///
/// ```
/// use avg_2048::engine::{Game, Move};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let mut game = Game::start(&mut rng);
/// if game.apply_move(Move::Left) {
///     game.spawn_random_tile(&mut rng);
/// }
/// assert!(game.history().len() >= 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    board: Grid,
    score: u64,
    added_tiles_count: u32,
    status: Status,
    history: Vec<MoveRecord>,
}

impl Game {
    /// An empty board with no spawned tile yet.
    pub fn new() -> Self {
        Game {
            board: [[0; BOARD_COLS]; BOARD_ROWS],
            score: 0,
            added_tiles_count: 0,
            status: Status::Playing,
            history: Vec::new(),
        }
    }

    /// A fresh session: empty board plus one random tile.
    pub fn start<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut game = Game::new();
        game.spawn_random_tile(rng);
        game
    }

    /// Rebuild a session from exported parts. Status is derived from cell
    /// occupancy since the export shape carries none.
    pub(crate) fn from_parts(
        board: Grid,
        score: u64,
        added_tiles_count: u32,
        history: Vec<MoveRecord>,
    ) -> Self {
        let status = if board.iter().flatten().all(|&cell| cell != 0) {
            Status::Lost
        } else {
            Status::Playing
        };
        Game { board, score, added_tiles_count, status, history }
    }

    pub fn board(&self) -> &Grid {
        &self.board
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn added_tiles_count(&self) -> u32 {
        self.added_tiles_count
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Largest tile value on the board (0 for an empty board).
    pub fn highest_tile(&self) -> u32 {
        self.board.iter().flatten().copied().max().unwrap_or(0)
    }

    /// True iff no cell holds 0.
    ///
    /// This is the literal full-board rule: a full board still counts as
    /// lost even when adjacent equal tiles could merge. Callers that want
    /// "no legal continuation" must additionally check that every direction
    /// is a no-op, which the search layer does.
    pub fn is_lost(&self) -> bool {
        self.board.iter().flatten().all(|&cell| cell != 0)
    }

    /// Coordinates of every cell currently holding `value`.
    ///
    /// `positions_of(0)` lists the empty cells available for spawning.
    pub fn positions_of(&self, value: u32) -> Vec<Pos> {
        let mut positions = Vec::new();
        for (row, cells) in self.board.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == value {
                    positions.push(Pos { row, col });
                }
            }
        }
        positions
    }

    /// Write `value` into a uniformly chosen empty cell, log the spawn,
    /// bump the spawn counter and recompute status.
    ///
    /// Precondition: at least one empty cell. Spawning onto a full board is
    /// a caller contract violation and panics; check [`Game::is_lost`] first.
    pub fn spawn_tile<R: Rng + ?Sized>(&mut self, rng: &mut R, value: u32) {
        let empties = self.positions_of(0);
        assert!(!empties.is_empty(), "spawn_tile on a full board; check is_lost() first");
        let pos = empties[rng.gen_range(0..empties.len())];
        self.board[pos.row][pos.col] = value;
        self.history.push(MoveRecord::Spawn {
            pos,
            value,
            score: self.score,
            added_tiles_count: self.added_tiles_count,
        });
        self.added_tiles_count += 1;
        self.refresh_status();
    }

    /// Spawn a tile whose value is drawn uniformly from [`NEW_TILE_OPTIONS`].
    pub fn spawn_random_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let value = NEW_TILE_OPTIONS[rng.gen_range(0..NEW_TILE_OPTIONS.len())];
        self.spawn_tile(rng, value);
    }

    /// Slide and merge every tile in `direction`. Returns whether any tile
    /// changed position or value; `false` on a lost session.
    ///
    /// Cells are processed starting from the far edge of the travel
    /// direction, so a tile is never blocked by an unprocessed one. A merge
    /// marks its destination for the rest of the move, which is what keeps a
    /// row like `[2,2,2,2]` at `[4,4,0,0]` after a left move instead of
    /// collapsing further.
    pub fn apply_move(&mut self, direction: Move) -> bool {
        if self.status == Status::Lost {
            return false;
        }
        self.history.push(MoveRecord::Move {
            direction,
            score: self.score,
            added_tiles_count: self.added_tiles_count,
        });
        let mut merged = [[false; BOARD_COLS]; BOARD_ROWS];
        let mut moved = false;
        for pos in traversal_order(direction) {
            if self.slide_tile(pos, direction, &mut merged) {
                moved = true;
            }
        }
        moved
    }

    /// Cheap copy for search branches: history is dropped, everything else
    /// is carried over. Branches never alias this game's storage.
    pub fn branch(&self) -> Game {
        Game {
            board: self.board,
            score: self.score,
            added_tiles_count: self.added_tiles_count,
            status: self.status,
            history: Vec::new(),
        }
    }

    fn refresh_status(&mut self) {
        if self.board.iter().flatten().all(|&cell| cell != 0) {
            self.status = Status::Lost;
        }
    }

    /// Move the tile at `from` as far as it can travel, merging at most once.
    fn slide_tile(
        &mut self,
        from: Pos,
        direction: Move,
        merged: &mut [[bool; BOARD_COLS]; BOARD_ROWS],
    ) -> bool {
        let value = self.board[from.row][from.col];
        if value == 0 {
            return false;
        }
        let mut dest = from;
        while let Some(next) = step(dest, direction) {
            let cell = self.board[next.row][next.col];
            if cell == 0 || (cell == value && !merged[next.row][next.col]) {
                dest = next;
            } else {
                break;
            }
        }
        if dest == from {
            return false;
        }
        if self.board[dest.row][dest.col] == value {
            let earned = value * 2;
            self.board[dest.row][dest.col] = earned;
            merged[dest.row][dest.col] = true;
            self.score += u64::from(earned);
        } else {
            self.board[dest.row][dest.col] = value;
        }
        self.board[from.row][from.col] = 0;
        true
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

/// All 16 cells ordered so that every cell's neighbors toward the travel
/// edge come first: up visits rows top-to-bottom, down bottom-up, left
/// columns left-to-right, right right-to-left.
fn traversal_order(direction: Move) -> Vec<Pos> {
    let mut order = Vec::with_capacity(BOARD_ROWS * BOARD_COLS);
    match direction {
        Move::Up => {
            for row in 0..BOARD_ROWS {
                for col in 0..BOARD_COLS {
                    order.push(Pos { row, col });
                }
            }
        }
        Move::Down => {
            for row in (0..BOARD_ROWS).rev() {
                for col in 0..BOARD_COLS {
                    order.push(Pos { row, col });
                }
            }
        }
        Move::Left => {
            for col in 0..BOARD_COLS {
                for row in 0..BOARD_ROWS {
                    order.push(Pos { row, col });
                }
            }
        }
        Move::Right => {
            for col in (0..BOARD_COLS).rev() {
                for row in 0..BOARD_ROWS {
                    order.push(Pos { row, col });
                }
            }
        }
    }
    order
}

/// One cell over in `direction`, or `None` at the board edge.
fn step(pos: Pos, direction: Move) -> Option<Pos> {
    let (row, col) = (pos.row as isize, pos.col as isize);
    let (row, col) = match direction {
        Move::Up => (row - 1, col),
        Move::Down => (row + 1, col),
        Move::Left => (row, col - 1),
        Move::Right => (row, col + 1),
    };
    if row < 0 || row >= BOARD_ROWS as isize || col < 0 || col >= BOARD_COLS as isize {
        return None;
    }
    Some(Pos { row: row as usize, col: col as usize })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn game_with_board(board: Grid) -> Game {
        Game::from_parts(board, 0, 0, Vec::new())
    }

    fn tile_sum(game: &Game) -> u64 {
        game.board().iter().flatten().map(|&v| u64::from(v)).sum()
    }

    #[test]
    fn parse_directions() {
        assert_eq!("up".parse::<Move>(), Ok(Move::Up));
        assert_eq!("right".parse::<Move>(), Ok(Move::Right));
        assert!("north".parse::<Move>().is_err());
        assert!("Left".parse::<Move>().is_err());
    }

    #[test]
    fn single_tile_slides_left() {
        // At column 0 already: nothing to do.
        let mut game = game_with_board([[1, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert!(!game.apply_move(Move::Left));
        assert_eq!(game.board()[0], [1, 0, 0, 0]);

        // At column 2: lands at column 0.
        let mut game = game_with_board([[0, 0, 1, 0], [0; 4], [0; 4], [0; 4]]);
        assert!(game.apply_move(Move::Left));
        assert_eq!(game.board()[0], [1, 0, 0, 0]);
    }

    #[test]
    fn pair_merges_right() {
        let mut game = game_with_board([[1, 1, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert!(game.apply_move(Move::Right));
        assert_eq!(game.board()[0], [0, 0, 0, 2]);
        assert_eq!(game.score(), 2);
    }

    #[test]
    fn no_double_merge_in_one_move() {
        let mut game = game_with_board([[2, 2, 2, 2], [0; 4], [0; 4], [0; 4]]);
        assert!(game.apply_move(Move::Left));
        assert_eq!(game.board()[0], [4, 4, 0, 0]);
        assert_eq!(game.score(), 8);
    }

    #[test]
    fn chain_merges_nearest_edge_first() {
        // Three equal tiles: the two nearest the destination edge merge.
        let mut game = game_with_board([[2, 2, 2, 0], [0; 4], [0; 4], [0; 4]]);
        assert!(game.apply_move(Move::Left));
        assert_eq!(game.board()[0], [4, 2, 0, 0]);
        assert_eq!(game.score(), 4);
    }

    #[test]
    fn merge_conserves_tile_sum_and_score_matches() {
        let mut game = game_with_board([
            [2, 2, 4, 4],
            [1, 0, 1, 0],
            [0, 0, 0, 0],
            [8, 8, 8, 8],
        ]);
        let sum_before = tile_sum(&game);
        assert!(game.apply_move(Move::Left));
        assert_eq!(tile_sum(&game), sum_before);
        // Merges: 2+2 -> 4, 4+4 -> 8, 1+1 -> 2, 8+8 -> 16 twice.
        assert_eq!(game.score(), 4 + 8 + 2 + 16 + 16);
        assert_eq!(game.board()[0], [4, 8, 0, 0]);
        assert_eq!(game.board()[1], [2, 0, 0, 0]);
        assert_eq!(game.board()[3], [16, 16, 0, 0]);
    }

    #[test]
    fn columns_move_with_same_rules() {
        let mut game = game_with_board([
            [2, 0, 0, 0],
            [2, 0, 0, 0],
            [2, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        assert!(game.apply_move(Move::Down));
        let col: Vec<u32> = (0..BOARD_ROWS).map(|r| game.board()[r][0]).collect();
        assert_eq!(col, vec![0, 0, 2, 4]);
        assert_eq!(game.score(), 4);
    }

    #[test]
    fn noop_move_leaves_board_identical() {
        let mut game = game_with_board([
            [0, 0, 0, 0],
            [1, 2, 4, 8],
            [2, 4, 8, 16],
            [0, 0, 0, 0],
        ]);
        assert!(game.apply_move(Move::Up));
        let after_first = *game.board();
        // Fully settled now: the second identical move must change nothing.
        assert!(!game.apply_move(Move::Up));
        assert_eq!(*game.board(), after_first);
    }

    #[test]
    fn spawn_targets_empty_cell() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut game = game_with_board([
            [1, 2, 4, 8],
            [2, 4, 8, 16],
            [4, 8, 16, 32],
            [8, 16, 32, 0],
        ]);
        let empties_before = game.positions_of(0);
        assert_eq!(empties_before.len(), 1);
        game.spawn_tile(&mut rng, 2);
        assert_eq!(game.positions_of(0).len(), 0);
        assert_eq!(game.board()[3][3], 2);
        assert_eq!(game.added_tiles_count(), 1);
        // That spawn filled the last cell.
        assert_eq!(game.status(), Status::Lost);
    }

    #[test]
    fn spawn_count_increases_occupancy_by_one() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut game = Game::new();
        for expected in 1..=16 {
            game.spawn_random_tile(&mut rng);
            let occupied = 16 - game.positions_of(0).len();
            assert_eq!(occupied, expected);
        }
        assert!(game.is_lost());
    }

    #[test]
    #[should_panic(expected = "spawn_tile on a full board")]
    fn spawn_on_full_board_panics() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut game = game_with_board([[2; 4]; 4]);
        game.spawn_tile(&mut rng, 1);
    }

    #[test]
    fn full_board_with_mergeable_tiles_still_lost() {
        // Literal occupancy rule: merges remaining do not matter.
        let game = game_with_board([[2; 4]; 4]);
        assert!(game.is_lost());
    }

    #[test]
    fn lost_session_rejects_moves() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut game = game_with_board([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 0],
        ]);
        game.spawn_tile(&mut rng, 1);
        assert_eq!(game.status(), Status::Lost);
        assert!(!game.apply_move(Move::Left));
    }

    #[test]
    fn positions_of_finds_matching_cells() {
        let game = game_with_board([
            [2, 0, 2, 0],
            [0, 4, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 2],
        ]);
        let twos = game.positions_of(2);
        assert_eq!(
            twos,
            vec![
                Pos { row: 0, col: 0 },
                Pos { row: 0, col: 2 },
                Pos { row: 3, col: 3 },
            ]
        );
        assert_eq!(game.positions_of(0).len(), 11);
    }

    #[test]
    fn history_records_events_in_order() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut game = Game::start(&mut rng);
        game.apply_move(Move::Left);
        assert_eq!(game.history().len(), 2);
        assert!(matches!(game.history()[0], MoveRecord::Spawn { added_tiles_count: 0, .. }));
        assert!(matches!(
            game.history()[1],
            MoveRecord::Move { direction: Move::Left, .. }
        ));
    }

    #[test]
    fn branch_drops_history_but_keeps_state() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut game = Game::start(&mut rng);
        game.apply_move(Move::Down);
        let branch = game.branch();
        assert_eq!(branch.board(), game.board());
        assert_eq!(branch.score(), game.score());
        assert_eq!(branch.added_tiles_count(), game.added_tiles_count());
        assert!(branch.history().is_empty());
    }

    #[test]
    fn seeded_sessions_reproduce() {
        let mut a = StdRng::seed_from_u64(1234);
        let mut b = StdRng::seed_from_u64(1234);
        let mut ga = Game::start(&mut a);
        let mut gb = Game::start(&mut b);
        for dir in [Move::Left, Move::Up, Move::Right, Move::Down] {
            if ga.apply_move(dir) {
                ga.spawn_random_tile(&mut a);
            }
            if gb.apply_move(dir) {
                gb.spawn_random_tile(&mut b);
            }
        }
        assert_eq!(ga, gb);
    }
}
