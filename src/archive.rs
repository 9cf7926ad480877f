//! Finished-game storage.
//!
//! The engine's contract with a game store: a finished game is handed over
//! as `(user id, opponent label, result label, move list)`, and retrieval
//! returns a user's games newest first. The move list is opaque to the
//! store, here the notation-encoded strings the engine produces. The
//! archive lives in memory and round-trips through JSON so a host can
//! persist it wherever it likes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::MoveRecord;
use crate::notation::encode_moves;

/// Default number of games returned by a history query.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// One archived game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Monotonic insertion number; higher means more recent.
    pub sequence: u64,
    pub user_id: i64,
    pub opponent: String,
    pub result: String,
    /// Notation-encoded moves, oldest first.
    pub moves: Vec<String>,
}

/// Errors from loading or saving an archive.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("archive I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
}

/// An in-memory store of finished games.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GameArchive {
    games: Vec<GameRecord>,
    next_sequence: u64,
}

impl GameArchive {
    /// Creates an empty archive.
    pub fn new() -> Self {
        GameArchive {
            games: Vec::new(),
            next_sequence: 0,
        }
    }

    /// Number of archived games across all users.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Returns true if nothing has been archived.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Stores a finished game and returns its record.
    pub fn save_game(
        &mut self,
        user_id: i64,
        opponent: &str,
        result: &str,
        history: &[MoveRecord],
    ) -> &GameRecord {
        let record = GameRecord {
            sequence: self.next_sequence,
            user_id,
            opponent: opponent.to_string(),
            result: result.to_string(),
            moves: encode_moves(history),
        };
        self.next_sequence += 1;
        let idx = self.games.len();
        self.games.push(record);
        &self.games[idx]
    }

    /// Returns up to `limit` of the user's games, newest first.
    pub fn history(&self, user_id: i64, limit: usize) -> Vec<&GameRecord> {
        let mut games: Vec<&GameRecord> = self
            .games
            .iter()
            .filter(|g| g.user_id == user_id)
            .collect();
        games.sort_by(|a, b| b.sequence.cmp(&a.sequence));
        games.truncate(limit);
        games
    }

    /// Serializes the archive to JSON.
    pub fn to_json(&self) -> Result<String, ArchiveError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restores an archive from its JSON form.
    pub fn from_json(text: &str) -> Result<Self, ArchiveError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Loads an archive from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ArchiveError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Writes the archive to a JSON file.
    pub fn store(&self, path: &Path) -> Result<(), ArchiveError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
