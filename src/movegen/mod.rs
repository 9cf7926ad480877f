//! Legal move generation.
//!
//! `movement` holds the per-type pseudo-legal generator; the `Board`
//! layers terrain and commander-safety filtering on top of it. This module
//! adds uniform random selection over a side's legal moves, for playouts
//! and fallback play.

pub mod movement;

use rand::Rng;

use crate::board::{Board, Position, Side};

pub use movement::{moves_from, threat_squares};

/// Picks one legal move for `side` uniformly at random.
///
/// Returns `None` when the side has no legal move (checkmate or
/// stalemate).
pub fn random_move(board: &Board, side: Side, rng: &mut impl Rng) -> Option<(Position, Position)> {
    let mut moves: Vec<(Position, Position)> = board
        .all_legal_moves(side)
        .into_iter()
        .flat_map(|(from, tos)| tos.into_iter().map(move |to| (from, to)))
        .collect();
    if moves.is_empty() {
        return None;
    }
    // HashMap iteration order is arbitrary; sort so equal seeds give equal picks.
    moves.sort_by_key(|&(from, to)| (from.row, from.col, to.row, to.col));
    let idx = rng.gen_range(0..moves.len());
    Some(moves[idx])
}
