//! The board aggregate: piece placement, turn ownership, and legality.
//!
//! `Board` owns the placement map, the active player, and the move history,
//! and is the only mutation point. Legality is computed on demand: a move
//! is legal when it is geometrically possible, terrain-admissible, and does
//! not leave the mover's own commander threatened; the last check runs on
//! a cloned board.

use std::collections::{HashMap, HashSet};

use log::debug;

use super::geometry::Position;
use super::piece::{Piece, PieceType, Side};
use super::terrain;
use crate::movegen::movement;

/// Game status from one side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Normal,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    /// Returns the lowercase display name.
    pub const fn name(self) -> &'static str {
        match self {
            GameStatus::Normal => "normal",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
        }
    }
}

/// Errors from raw placement. Illegal moves are not errors; they are
/// reported through boolean returns.
#[derive(Debug, thiserror::Error)]
pub enum PlacementError {
    #[error("position {0} is outside the 12x11 board")]
    OutOfRange(Position),
}

/// One executed move.
///
/// Carries enough to reverse a plain relocation or capture exactly. Merges
/// and disembarkations record the mover and nothing of the carry
/// relationship they created or dissolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Position,
    pub to: Position,
    pub moved: PieceType,
    pub side: Side,
    pub captured: Option<Piece>,
    pub had_moved: bool,
}

/// The aggregate game state.
#[derive(Debug)]
pub struct Board {
    squares: HashMap<Position, Piece>,
    active: Side,
    history: Vec<MoveRecord>,
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Clone for Board {
    /// Deep copy of the position for simulation. The piece graph is
    /// duplicated; the history is not carried into the clone.
    fn clone(&self) -> Self {
        Board {
            squares: self.squares.clone(),
            active: self.active,
            history: Vec::new(),
        }
    }
}

impl Board {
    /// Creates an empty board with Red to move.
    pub fn new() -> Self {
        Board {
            squares: HashMap::new(),
            active: Side::Red,
            history: Vec::new(),
        }
    }

    /// Creates a board holding the standard starting position.
    pub fn initial() -> Self {
        let mut board = Board::new();
        board.reset_to_initial_position();
        board
    }

    /// The side to move.
    pub fn active_player(&self) -> Side {
        self.active
    }

    /// Overrides the side to move. Position-setup companion to `place`.
    pub fn set_active_player(&mut self, side: Side) {
        self.active = side;
    }

    /// The executed moves, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Returns true if the position lies on the board.
    pub fn is_inside(&self, pos: Position) -> bool {
        terrain::in_bounds(pos)
    }

    /// Returns true if the square is sea.
    pub fn is_sea(&self, pos: Position) -> bool {
        terrain::is_sea(pos)
    }

    /// Returns true if the square is river.
    pub fn is_river(&self, pos: Position) -> bool {
        terrain::is_river(pos)
    }

    /// Returns true if the square is a shallow ford.
    pub fn is_ford(&self, pos: Position) -> bool {
        terrain::is_ford(pos)
    }

    /// The piece standing at `pos`, if any.
    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        self.squares.get(&pos)
    }

    /// Iterates over all occupied squares.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, &Piece)> {
        self.squares.iter().map(|(&pos, piece)| (pos, piece))
    }

    /// Places a piece, replacing any occupant.
    pub fn place(&mut self, pos: Position, piece: Piece) -> Result<(), PlacementError> {
        if !self.is_inside(pos) {
            return Err(PlacementError::OutOfRange(pos));
        }
        self.squares.insert(pos, piece);
        Ok(())
    }

    /// Removes and returns the piece at `pos`, if any.
    pub fn remove(&mut self, pos: Position) -> Option<Piece> {
        self.squares.remove(&pos)
    }

    /// Clears the board and lays out the standard starting position:
    /// nineteen units per side.
    pub fn reset_to_initial_position(&mut self) {
        use PieceType::*;

        self.squares.clear();
        self.history.clear();
        self.active = Side::Red;

        // Layout coordinates are (file, rank) with rank 0 at the bottom
        // edge, matching the printed board; engine rows count from the top.
        let layout: [(i32, i32, PieceType, Side); 38] = [
            (6, 0, Commander, Side::Red),
            (1, 1, Navy, Side::Red),
            (4, 1, AirForce, Side::Red),
            (5, 1, Headquarter, Side::Red),
            (7, 1, Headquarter, Side::Red),
            (8, 1, AirForce, Side::Red),
            (3, 2, Artillery, Side::Red),
            (6, 2, Rocket, Side::Red),
            (9, 2, Artillery, Side::Red),
            (2, 3, Navy, Side::Red),
            (4, 3, AntiAircraftGun, Side::Red),
            (5, 3, Tank, Side::Red),
            (7, 3, Tank, Side::Red),
            (8, 3, AntiAircraftGun, Side::Red),
            (2, 4, Infantry, Side::Red),
            (3, 4, Engineer, Side::Red),
            (6, 4, Militia, Side::Red),
            (9, 4, Engineer, Side::Red),
            (10, 4, Infantry, Side::Red),
            (2, 7, Infantry, Side::Blue),
            (3, 7, Engineer, Side::Blue),
            (6, 7, Militia, Side::Blue),
            (9, 7, Engineer, Side::Blue),
            (10, 7, Infantry, Side::Blue),
            (2, 8, Navy, Side::Blue),
            (4, 8, AntiAircraftGun, Side::Blue),
            (5, 8, Tank, Side::Blue),
            (7, 8, Tank, Side::Blue),
            (8, 8, AntiAircraftGun, Side::Blue),
            (3, 9, Artillery, Side::Blue),
            (6, 9, Rocket, Side::Blue),
            (9, 9, Artillery, Side::Blue),
            (1, 10, Navy, Side::Blue),
            (4, 10, AirForce, Side::Blue),
            (5, 10, Headquarter, Side::Blue),
            (7, 10, Headquarter, Side::Blue),
            (8, 10, AirForce, Side::Blue),
            (6, 11, Commander, Side::Blue),
        ];
        for (file, rank, kind, side) in layout {
            let pos = Position::new(terrain::ROW_COUNT - 1 - rank, file);
            self.squares.insert(pos, Piece::new(kind, side));
        }
        debug!("board reset to the initial position");
    }

    /// Returns whether `piece` may come to rest on `pos`.
    ///
    /// Sea admits Navy, and AirForce landing on a friendly Navy. Navy is
    /// otherwise confined to sea and the shore column, unless it carries an
    /// AirForce passenger and is putting in at land so the wing can take
    /// off. The river bars Headquarter outright and heavy units off the
    /// fords.
    pub fn can_enter(&self, pos: Position, piece: &Piece) -> bool {
        if !self.is_inside(pos) {
            return false;
        }
        if piece.kind == PieceType::Navy {
            if self.is_sea(pos) || pos.col == terrain::SHORE_COLUMN {
                return true;
            }
            return matches!(&piece.passenger, Some(p) if p.kind == PieceType::AirForce);
        }
        if self.is_sea(pos) {
            return piece.kind == PieceType::AirForce
                && matches!(self.piece_at(pos),
                    Some(o) if o.side == piece.side && o.kind == PieceType::Navy);
        }
        if self.is_river(pos) {
            return match piece.kind {
                PieceType::Headquarter => false,
                kind if kind.is_heavy() => self.is_ford(pos),
                _ => true,
            };
        }
        true
    }

    /// Legal destinations for the piece at `from`: pseudo-legal candidates
    /// that are terrain-admissible and leave the own commander safe.
    pub fn legal_moves_from(&self, from: Position) -> Vec<Position> {
        let piece = match self.squares.get(&from) {
            Some(p) => p,
            None => return Vec::new(),
        };
        let mut seen = HashSet::new();
        movement::moves_from(self, from, piece, true)
            .into_iter()
            .filter(|&to| seen.insert(to))
            .filter(|&to| self.can_enter(to, piece) && self.is_commander_safe_after(from, to))
            .collect()
    }

    /// Legal moves for every piece of `side` that has at least one.
    pub fn all_legal_moves(&self, side: Side) -> HashMap<Position, Vec<Position>> {
        let mut map = HashMap::new();
        for (&pos, piece) in &self.squares {
            if piece.side != side {
                continue;
            }
            let moves = self.legal_moves_from(pos);
            if !moves.is_empty() {
                map.insert(pos, moves);
            }
        }
        map
    }

    /// Returns true if `side` has at least one legal move.
    pub fn has_any_legal_move(&self, side: Side) -> bool {
        self.squares.iter().any(|(&pos, piece)| {
            piece.side == side && !self.legal_moves_from(pos).is_empty()
        })
    }

    /// The square of `side`'s commander, if one is on the board.
    pub fn find_commander(&self, side: Side) -> Option<Position> {
        self.squares
            .iter()
            .find(|(_, p)| p.kind == PieceType::Commander && p.side == side)
            .map(|(&pos, _)| pos)
    }

    /// Every square threatened by `attacker`'s pieces, passenger profiles
    /// included. Terrain entry is deliberately not consulted here.
    pub fn threatened_squares(&self, attacker: Side) -> HashSet<Position> {
        let mut set = HashSet::new();
        for (&pos, piece) in &self.squares {
            if piece.side != attacker {
                continue;
            }
            set.extend(movement::threat_squares(self, pos, piece));
        }
        set
    }

    /// Returns true if `side`'s commander stands on a threatened square.
    /// A side with no commander on the board is never in check.
    pub fn is_in_check(&self, side: Side) -> bool {
        match self.find_commander(side) {
            Some(pos) => self.threatened_squares(side.opponent()).contains(&pos),
            None => false,
        }
    }

    /// Simulates the raw relocation `from -> to` on a cloned board and
    /// reports whether the mover's commander is left unthreatened. A side
    /// with no commander is vacuously safe.
    pub fn is_commander_safe_after(&self, from: Position, to: Position) -> bool {
        let mut probe = self.clone();
        let mover = match probe.squares.remove(&from) {
            Some(p) => p,
            None => return false,
        };
        let side = mover.side;
        probe.squares.remove(&to);
        probe.squares.insert(to, mover);

        let commander = match probe.find_commander(side) {
            Some(pos) => pos,
            None => return true,
        };
        !probe.threatened_squares(side.opponent()).contains(&commander)
    }

    /// Game status for `side`: checkmate when in check with no legal move,
    /// stalemate when out of check with no legal move, check otherwise
    /// while threatened.
    pub fn evaluate_status(&self, side: Side) -> GameStatus {
        let in_check = self.is_in_check(side);
        let has_move = self.has_any_legal_move(side);
        match (in_check, has_move) {
            (true, false) => GameStatus::Checkmate,
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check,
            (false, true) => GameStatus::Normal,
        }
    }

    /// Executes a move if legal and returns whether it happened.
    ///
    /// A destination inside the mover's own geometric reach moves the whole
    /// stack; one reachable only through a carried unit's profile
    /// disembarks the passenger and leaves the carrier in place. A friendly
    /// destination merges the two stacks in whichever carry direction the
    /// capability table allows.
    pub fn try_move(&mut self, from: Position, to: Position) -> bool {
        if from == to {
            return false;
        }
        let (side, has_passenger) = match self.squares.get(&from) {
            Some(p) => (p.side, p.passenger.is_some()),
            None => return false,
        };
        if side != self.active {
            return false;
        }
        if !self.legal_moves_from(from).contains(&to) {
            return false;
        }
        if !self.is_commander_safe_after(from, to) {
            return false;
        }

        let own_reach = match self.squares.get(&from) {
            Some(piece) => movement::moves_from(self, from, piece, false).contains(&to),
            None => return false,
        };
        let own_move = own_reach || !has_passenger;

        let record = match self.squares.get(&to).map(|p| p.side) {
            None => {
                if own_move {
                    self.relocate(from, to)
                } else {
                    self.disembark(from, to)
                }
            }
            Some(occupant_side) if occupant_side != side => {
                let captured = self.squares.remove(&to);
                let moved = if own_move {
                    self.relocate(from, to)
                } else {
                    self.disembark(from, to)
                };
                moved.map(|mut record| {
                    record.captured = captured;
                    record
                })
            }
            Some(_) => self.merge(from, to),
        };

        match record {
            Some(record) => {
                debug!(
                    "{} {} moved {} -> {}{}",
                    record.side.name(),
                    record.moved.name(),
                    record.from,
                    record.to,
                    if record.captured.is_some() { " (capture)" } else { "" },
                );
                self.history.push(record);
                self.active = self.active.opponent();
                true
            }
            None => false,
        }
    }

    /// Moves the whole stack at `from` to the empty square `to`.
    fn relocate(&mut self, from: Position, to: Position) -> Option<MoveRecord> {
        let mut piece = self.squares.remove(&from)?;
        let record = MoveRecord {
            from,
            to,
            moved: piece.kind,
            side: piece.side,
            captured: None,
            had_moved: piece.has_moved,
        };
        piece.has_moved = true;
        self.squares.insert(to, piece);
        Some(record)
    }

    /// Sets the passenger at `from` down on the empty square `to`,
    /// leaving the carrier where it stands.
    fn disembark(&mut self, from: Position, to: Position) -> Option<MoveRecord> {
        let passenger = self.squares.get_mut(&from)?.passenger.take()?;
        let mut passenger = *passenger;
        let record = MoveRecord {
            from,
            to,
            moved: passenger.kind,
            side: passenger.side,
            captured: None,
            had_moved: passenger.has_moved,
        };
        passenger.has_moved = true;
        self.squares.insert(to, passenger);
        Some(record)
    }

    /// Merges the mover at `from` with the friendly occupant of `to`,
    /// in whichever carry direction applies.
    fn merge(&mut self, from: Position, to: Position) -> Option<MoveRecord> {
        let (occupant_carries, mover_carries) = {
            let mover = self.squares.get(&from)?;
            let occupant = self.squares.get(&to)?;
            (occupant.can_carry(mover), mover.can_carry(occupant))
        };

        if occupant_carries {
            let mut mover = self.squares.remove(&from)?;
            let record = MoveRecord {
                from,
                to,
                moved: mover.kind,
                side: mover.side,
                captured: None,
                had_moved: mover.has_moved,
            };
            mover.has_moved = true;
            self.squares.get_mut(&to)?.passenger = Some(Box::new(mover));
            Some(record)
        } else if mover_carries {
            let occupant = self.squares.remove(&to)?;
            let mut mover = self.squares.remove(&from)?;
            let record = MoveRecord {
                from,
                to,
                moved: mover.kind,
                side: mover.side,
                captured: None,
                had_moved: mover.has_moved,
            };
            mover.has_moved = true;
            mover.passenger = Some(Box::new(occupant));
            self.squares.insert(to, mover);
            Some(record)
        } else {
            None
        }
    }

    /// Reverses the most recent move: the mover returns to its source
    /// square with its old movement flag, any captured piece reappears, and
    /// the turn passes back. Returns false on an empty history.
    ///
    /// Merges and disembarkations are not reconstructed: the record only
    /// captures the mover and any capture, so undoing such a move leaves
    /// the carry relationship as the move left it.
    pub fn undo_last_move(&mut self) -> bool {
        let record = match self.history.pop() {
            Some(r) => r,
            None => return false,
        };
        let mut piece = match self.squares.remove(&record.to) {
            Some(p) => p,
            None => return false,
        };
        piece.has_moved = record.had_moved;
        self.squares.insert(record.from, piece);
        if let Some(captured) = record.captured {
            self.squares.insert(record.to, captured);
        }
        self.active = self.active.opponent();
        debug!("undid move {} -> {}", record.from, record.to);
        true
    }
}
