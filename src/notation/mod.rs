//! Text notation for squares and moves.
//!
//! A square is a file letter and a rank number, `a1` through `k12`: files
//! `a`..`k` map to columns 0..10 and rank n maps to row n-1 in the
//! engine's own orientation (row 0 at the top). A move is two squares
//! joined by a dash, `g7-g8`. Finished games are stored as lists of these
//! move strings.

pub mod parser;

use crate::board::{MoveRecord, Position, COL_COUNT, ROW_COUNT};

/// Errors that can occur while parsing square or move notation.
#[derive(Debug, thiserror::Error)]
pub enum NotationError {
    #[error("empty square notation")]
    Empty,

    #[error("invalid file letter: '{0}'")]
    InvalidFile(char),

    #[error("invalid rank number: '{0}'")]
    InvalidRank(String),

    #[error("square off the board: '{0}'")]
    OutOfRange(String),

    #[error("expected '<from>-<to>', got '{0}'")]
    MissingSeparator(String),
}

/// Formats a position as square notation, e.g. `g7`.
pub fn format_square(pos: Position) -> String {
    let file = (b'a' + pos.col as u8) as char;
    format!("{}{}", file, pos.row + 1)
}

/// Parses square notation into a position.
pub fn parse_square(s: &str) -> Result<Position, NotationError> {
    let mut chars = s.chars();
    let file = chars.next().ok_or(NotationError::Empty)?;
    if !file.is_ascii_lowercase() {
        return Err(NotationError::InvalidFile(file));
    }
    let col = (file as u8 - b'a') as i32;

    let rank_str = chars.as_str();
    let rank: i32 = rank_str
        .parse()
        .map_err(|_| NotationError::InvalidRank(rank_str.to_string()))?;
    let row = rank - 1;

    if row < 0 || row >= ROW_COUNT || col >= COL_COUNT {
        return Err(NotationError::OutOfRange(s.to_string()));
    }
    Ok(Position::new(row, col))
}

/// Formats a move as `<from>-<to>`.
pub fn format_move(from: Position, to: Position) -> String {
    format!("{}-{}", format_square(from), format_square(to))
}

/// Parses `<from>-<to>` into a pair of positions.
pub fn parse_move(s: &str) -> Result<(Position, Position), NotationError> {
    let (from_str, to_str) = s
        .split_once('-')
        .ok_or_else(|| NotationError::MissingSeparator(s.to_string()))?;
    Ok((parse_square(from_str)?, parse_square(to_str)?))
}

/// Encodes a move history as the opaque list a game store keeps.
pub fn encode_moves(history: &[MoveRecord]) -> Vec<String> {
    history
        .iter()
        .map(|record| format_move(record.from, record.to))
        .collect()
}
