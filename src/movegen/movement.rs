//! Pseudo-legal move generation per piece type.
//!
//! Produces geometric candidate squares before terrain entry and
//! commander-safety filtering, which stay with `Board`. Candidates onto
//! friendly-occupied squares survive only when a carry relationship exists
//! in either direction; candidates onto enemy-occupied squares are capture
//! candidates.

use crate::board::geometry::{Direction, Position, ALL_EIGHT, DIAGONAL, ORTHOGONAL};
use crate::board::piece::{Piece, PieceType, Side};
use crate::board::state::Board;

/// How a linear run treats occupied squares along the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Jump {
    /// Stop at the first occupant.
    None,
    /// Pass over friendly occupants; stop on the first enemy.
    OverFriendly,
    /// Pass over anything; every enemy square in range is capturable.
    OverAny,
}

/// Generates geometric candidate squares for `piece` standing at `from`.
///
/// With `include_passenger`, a carried unit contributes its own movement
/// profile from the same square (how a passenger reaches squares its
/// carrier cannot). Passenger profiles never recurse further.
pub fn moves_from(
    board: &Board,
    from: Position,
    piece: &Piece,
    include_passenger: bool,
) -> Vec<Position> {
    let mut moves = match piece.kind {
        PieceType::Commander => commander_moves(board, from, piece),
        PieceType::Infantry | PieceType::Engineer => {
            step_moves(board, from, &ORTHOGONAL, piece.side)
        }
        PieceType::Militia | PieceType::Rocket => {
            let mut m =
                linear_moves(board, from, &ORTHOGONAL, 2, piece.side, Jump::None, false);
            m.extend(step_moves(board, from, &DIAGONAL, piece.side));
            m
        }
        PieceType::Tank => {
            linear_moves(board, from, &ORTHOGONAL, 2, piece.side, Jump::None, false)
        }
        PieceType::Artillery => {
            linear_moves(board, from, &ALL_EIGHT, 3, piece.side, Jump::None, false)
        }
        PieceType::AntiAircraftGun => step_moves(board, from, &ALL_EIGHT, piece.side),
        PieceType::AirForce => {
            linear_moves(board, from, &ALL_EIGHT, 4, piece.side, Jump::OverAny, false)
        }
        PieceType::Navy => navy_moves(board, from, piece),
        PieceType::Headquarter => Vec::new(),
    };

    if include_passenger {
        if let Some(passenger) = &piece.passenger {
            moves.extend(moves_from(board, from, passenger, false));
        }
    }

    moves
}

/// Squares a piece threatens: identical to its pseudo-legal moves,
/// passenger profile included.
pub fn threat_squares(board: &Board, from: Position, piece: &Piece) -> Vec<Position> {
    moves_from(board, from, piece, true)
}

/// Commander: orthogonal slides to the board edge over empty squares, but
/// interaction (capture or merge) only at the immediately adjacent square.
fn commander_moves(board: &Board, from: Position, piece: &Piece) -> Vec<Position> {
    let mut moves = Vec::new();
    for dir in ORTHOGONAL {
        let mut step = 1;
        loop {
            let target = from + dir * step;
            if !board.is_inside(target) {
                break;
            }
            match board.piece_at(target) {
                None => moves.push(target),
                Some(occupant) => {
                    if step == 1
                        && (occupant.side != piece.side || occupant.can_carry(piece))
                    {
                        moves.push(target);
                    }
                    break;
                }
            }
            step += 1;
        }
    }
    moves
}

/// Navy: four squares north/south confined to sea, three east/west, one
/// diagonal step. Sails through friendly ships.
fn navy_moves(board: &Board, from: Position, piece: &Piece) -> Vec<Position> {
    let mut moves = linear_moves(
        board,
        from,
        &[Direction::NORTH, Direction::SOUTH],
        4,
        piece.side,
        Jump::OverFriendly,
        true,
    );
    moves.extend(linear_moves(
        board,
        from,
        &[Direction::EAST, Direction::WEST],
        3,
        piece.side,
        Jump::OverFriendly,
        false,
    ));
    moves.extend(step_moves(board, from, &DIAGONAL, piece.side));
    moves
}

/// Walks each direction up to `range`, collecting candidates until blocked.
fn linear_moves(
    board: &Board,
    from: Position,
    dirs: &[Direction],
    range: i32,
    side: Side,
    jump: Jump,
    sea_only: bool,
) -> Vec<Position> {
    let mut moves = Vec::new();
    for &dir in dirs {
        for step in 1..=range {
            let target = from + dir * step;
            if !board.is_inside(target) {
                break;
            }
            if sea_only && !board.is_sea(target) {
                break;
            }
            match board.piece_at(target) {
                None => moves.push(target),
                Some(occupant) => {
                    if occupant.side != side {
                        moves.push(target);
                        if jump != Jump::OverAny {
                            break;
                        }
                    } else {
                        if carry_relationship(board, from, occupant) {
                            moves.push(target);
                        }
                        if jump == Jump::None {
                            break;
                        }
                    }
                }
            }
        }
    }
    moves
}

/// Single-square moves in the given directions.
fn step_moves(board: &Board, from: Position, dirs: &[Direction], side: Side) -> Vec<Position> {
    let mut moves = Vec::new();
    for &dir in dirs {
        let target = from + dir;
        if !board.is_inside(target) {
            continue;
        }
        match board.piece_at(target) {
            None => moves.push(target),
            Some(occupant) if occupant.side != side => moves.push(target),
            Some(occupant) => {
                if carry_relationship(board, from, occupant) {
                    moves.push(target);
                }
            }
        }
    }
    moves
}

/// A friendly-occupied square stays a candidate when the stack at `from`
/// and the occupant can merge in either carry direction.
fn carry_relationship(board: &Board, from: Position, occupant: &Piece) -> bool {
    match board.piece_at(from) {
        Some(mover) => occupant.can_carry(mover) || mover.can_carry(occupant),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::state::Board;

    fn board_with(pieces: &[(Position, PieceType, Side)]) -> Board {
        let mut board = Board::new();
        for &(pos, kind, side) in pieces {
            board.place(pos, Piece::new(kind, side)).unwrap();
        }
        board
    }

    #[test]
    fn infantry_steps_orthogonally() {
        let board = board_with(&[(Position::new(8, 5), PieceType::Infantry, Side::Red)]);
        let piece = board.piece_at(Position::new(8, 5)).unwrap();
        let moves = moves_from(&board, Position::new(8, 5), piece, true);
        assert!(moves.contains(&Position::new(7, 5)));
        assert!(moves.contains(&Position::new(9, 5)));
        assert!(moves.contains(&Position::new(8, 4)));
        assert!(moves.contains(&Position::new(8, 6)));
        assert_eq!(moves.len(), 4);
    }

    #[test]
    fn tank_runs_two_and_stops_at_blockers() {
        let board = board_with(&[
            (Position::new(8, 5), PieceType::Tank, Side::Red),
            (Position::new(7, 5), PieceType::Artillery, Side::Red),
        ]);
        let piece = board.piece_at(Position::new(8, 5)).unwrap();
        let moves = moves_from(&board, Position::new(8, 5), piece, true);
        // Artillery cannot merge with a tank, so the whole northern run is cut.
        assert!(!moves.contains(&Position::new(7, 5)));
        assert!(!moves.contains(&Position::new(6, 5)));
        assert!(moves.contains(&Position::new(9, 5)));
        assert!(moves.contains(&Position::new(10, 5)));
        assert!(moves.contains(&Position::new(8, 4)));
        assert!(moves.contains(&Position::new(8, 7)));
    }

    #[test]
    fn militia_mixes_runs_and_diagonal_steps() {
        let board = board_with(&[(Position::new(8, 5), PieceType::Militia, Side::Red)]);
        let piece = board.piece_at(Position::new(8, 5)).unwrap();
        let moves = moves_from(&board, Position::new(8, 5), piece, true);
        assert!(moves.contains(&Position::new(6, 5)));
        assert!(moves.contains(&Position::new(7, 4)));
        assert!(moves.contains(&Position::new(9, 6)));
        // Two-square diagonals are out of the pattern.
        assert!(!moves.contains(&Position::new(6, 3)));
    }

    #[test]
    fn commander_slides_but_interacts_only_adjacent() {
        let board = board_with(&[
            (Position::new(8, 5), PieceType::Commander, Side::Red),
            (Position::new(8, 8), PieceType::Infantry, Side::Blue),
        ]);
        let piece = board.piece_at(Position::new(8, 5)).unwrap();
        let moves = moves_from(&board, Position::new(8, 5), piece, true);
        // Empty squares short of the blue infantry are reachable.
        assert!(moves.contains(&Position::new(8, 6)));
        assert!(moves.contains(&Position::new(8, 7)));
        // The infantry is three squares out: not capturable.
        assert!(!moves.contains(&Position::new(8, 8)));
        // No diagonals.
        assert!(!moves.contains(&Position::new(7, 4)));
        // Full southern run to the edge.
        assert!(moves.contains(&Position::new(11, 5)));
    }

    #[test]
    fn commander_captures_adjacent_enemy() {
        let board = board_with(&[
            (Position::new(8, 5), PieceType::Commander, Side::Red),
            (Position::new(8, 6), PieceType::Infantry, Side::Blue),
        ]);
        let piece = board.piece_at(Position::new(8, 5)).unwrap();
        let moves = moves_from(&board, Position::new(8, 5), piece, true);
        assert!(moves.contains(&Position::new(8, 6)));
        assert!(!moves.contains(&Position::new(8, 7)));
    }

    #[test]
    fn commander_merges_into_adjacent_headquarter() {
        let board = board_with(&[
            (Position::new(10, 5), PieceType::Commander, Side::Red),
            (Position::new(10, 6), PieceType::Headquarter, Side::Red),
        ]);
        let piece = board.piece_at(Position::new(10, 5)).unwrap();
        let moves = moves_from(&board, Position::new(10, 5), piece, true);
        assert!(moves.contains(&Position::new(10, 6)));
    }

    #[test]
    fn airforce_overflies_everything() {
        let board = board_with(&[
            (Position::new(4, 5), PieceType::AirForce, Side::Red),
            (Position::new(5, 5), PieceType::Infantry, Side::Red),
            (Position::new(6, 5), PieceType::Infantry, Side::Blue),
        ]);
        let piece = board.piece_at(Position::new(4, 5)).unwrap();
        let moves = moves_from(&board, Position::new(4, 5), piece, true);
        // Over the friendly infantry, capturing the enemy one, and beyond.
        assert!(moves.contains(&Position::new(6, 5)));
        assert!(moves.contains(&Position::new(7, 5)));
        assert!(moves.contains(&Position::new(8, 5)));
        // The friendly infantry square itself is a merge candidate.
        assert!(moves.contains(&Position::new(5, 5)));
    }

    #[test]
    fn navy_sails_through_friendly_ship() {
        let board = board_with(&[
            (Position::new(5, 0), PieceType::Navy, Side::Red),
            (Position::new(6, 0), PieceType::Navy, Side::Red),
        ]);
        let piece = board.piece_at(Position::new(5, 0)).unwrap();
        let moves = moves_from(&board, Position::new(5, 0), piece, true);
        assert!(moves.contains(&Position::new(7, 0)));
        assert!(moves.contains(&Position::new(8, 0)));
        // Two navies cannot merge, so the occupied square is no candidate.
        assert!(!moves.contains(&Position::new(6, 0)));
    }

    #[test]
    fn navy_stops_at_enemy_ship() {
        let board = board_with(&[
            (Position::new(5, 0), PieceType::Navy, Side::Red),
            (Position::new(7, 0), PieceType::Navy, Side::Blue),
        ]);
        let piece = board.piece_at(Position::new(5, 0)).unwrap();
        let moves = moves_from(&board, Position::new(5, 0), piece, true);
        assert!(moves.contains(&Position::new(6, 0)));
        assert!(moves.contains(&Position::new(7, 0)));
        assert!(!moves.contains(&Position::new(8, 0)));
    }

    #[test]
    fn navy_straight_runs_confined_to_sea_north_south() {
        let board = board_with(&[(Position::new(5, 1), PieceType::Navy, Side::Red)]);
        let piece = board.piece_at(Position::new(5, 1)).unwrap();
        let moves = moves_from(&board, Position::new(5, 1), piece, true);
        // Four squares north and south inside the sea column.
        for row in [1, 2, 3, 4, 6, 7, 8, 9] {
            assert!(moves.contains(&Position::new(row, 1)), "row {}", row);
        }
        assert!(!moves.contains(&Position::new(0, 1)));
        assert!(!moves.contains(&Position::new(10, 1)));
        // Eastward geometric reach leaves the sea; terrain filtering is
        // the board's call, so those squares still appear here.
        assert!(moves.contains(&Position::new(5, 2)));
        assert!(moves.contains(&Position::new(5, 4)));
    }

    #[test]
    fn headquarter_is_static() {
        let board = board_with(&[(Position::new(10, 5), PieceType::Headquarter, Side::Red)]);
        let piece = board.piece_at(Position::new(10, 5)).unwrap();
        assert!(moves_from(&board, Position::new(10, 5), piece, true).is_empty());
    }

    #[test]
    fn passenger_profile_extends_the_carrier() {
        let mut board = Board::new();
        let mut navy = Piece::new(PieceType::Navy, Side::Red);
        navy.passenger = Some(Box::new(Piece::new(PieceType::AirForce, Side::Red)));
        board.place(Position::new(5, 1), navy).unwrap();

        let piece = board.piece_at(Position::new(5, 1)).unwrap();
        let with = moves_from(&board, Position::new(5, 1), piece, true);
        let without = moves_from(&board, Position::new(5, 1), piece, false);

        // The air wing ranges four squares in all directions from the deck.
        assert!(with.contains(&Position::new(5, 5)));
        assert!(!without.contains(&Position::new(5, 5)));
        assert!(with.contains(&Position::new(1, 5)));
    }

    #[test]
    fn threat_squares_match_moves() {
        let board = board_with(&[(Position::new(8, 5), PieceType::Artillery, Side::Blue)]);
        let piece = board.piece_at(Position::new(8, 5)).unwrap();
        assert_eq!(
            threat_squares(&board, Position::new(8, 5), piece),
            moves_from(&board, Position::new(8, 5), piece, true)
        );
    }
}
