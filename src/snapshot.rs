//! Session snapshot export/import.
//!
//! The exported shape is `{board, added_tiles_count, score, history}` and
//! round-trips losslessly through JSON. History may be omitted on import
//! without affecting further play; status is not part of the shape and is
//! derived from cell occupancy on import.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::{Game, Grid, MoveRecord};

/// The structured snapshot record consumed and produced by persistence and
/// display collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameData {
    pub board: Grid,
    pub added_tiles_count: u32,
    pub score: u64,
    #[serde(default)]
    pub history: Vec<MoveRecord>,
}

impl GameData {
    /// Rebuild a playable session from this snapshot.
    pub fn into_game(self) -> Game {
        Game::from_parts(self.board, self.score, self.added_tiles_count, self.history)
    }
}

impl From<&Game> for GameData {
    fn from(game: &Game) -> Self {
        GameData {
            board: *game.board(),
            added_tiles_count: game.added_tiles_count(),
            score: game.score(),
            history: game.history().to_vec(),
        }
    }
}

impl Game {
    /// Export the session snapshot, history included.
    pub fn export_data(&self) -> GameData {
        GameData::from(self)
    }

    /// Import a snapshot, deriving status from board occupancy.
    pub fn from_data(data: GameData) -> Game {
        data.into_game()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn to_json_string(data: &GameData) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(data)?)
}

pub fn from_json_str(json: &str) -> Result<GameData, SnapshotError> {
    Ok(serde_json::from_str(json)?)
}

pub fn write_game_to_path<P: AsRef<Path>>(path: P, data: &GameData) -> Result<(), SnapshotError> {
    let json = to_json_string(data)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn read_game_from_path<P: AsRef<Path>>(path: P) -> Result<GameData, SnapshotError> {
    let json = fs::read_to_string(path)?;
    from_json_str(&json)
}
