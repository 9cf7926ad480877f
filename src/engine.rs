//! Session state management.
//!
//! Holds the live board and the game archive between protocol commands,
//! and writes responses for the main loop. The `go` command suggests a
//! uniformly random legal move; there is no search.

use std::io::Write;

use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::archive::{GameArchive, DEFAULT_HISTORY_LIMIT};
use crate::board::{Board, Piece, PieceType, PlacementError, Position, Side};
use crate::movegen::random_move;
use crate::notation::{format_move, format_square};

/// Holds the mutable state of a session between commands.
pub struct Engine {
    pub board: Board,
    pub archive: GameArchive,
    rng: SmallRng,
}

impl Engine {
    /// Creates a session with an empty board and an empty archive.
    pub fn new() -> Self {
        Engine {
            board: Board::new(),
            archive: GameArchive::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Handles the protocol handshake: writes id lines and `ctiok`.
    pub fn handle_cti<W: Write>(&self, out: &mut W) {
        writeln!(out, "id name cotulenh").unwrap();
        writeln!(out, "protocol_version 1").unwrap();
        writeln!(out, "ctiok").unwrap();
        out.flush().unwrap();
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) {
        writeln!(out, "readyok").unwrap();
        out.flush().unwrap();
    }

    /// Resets the board to the standard starting position.
    pub fn new_game(&mut self) {
        self.board = Board::initial();
        debug!("session reset to a new game");
    }

    /// Resets the board to an empty position.
    pub fn clear(&mut self) {
        self.board = Board::new();
        debug!("session cleared");
    }

    /// Puts a piece on a square.
    pub fn place(
        &mut self,
        side: Side,
        kind: PieceType,
        pos: Position,
    ) -> Result<(), PlacementError> {
        self.board.place(pos, Piece::new(kind, side))
    }

    /// Writes the legal destinations of the piece at `from`, sorted.
    pub fn handle_moves<W: Write>(&self, from: Position, out: &mut W) {
        let mut moves = self.board.legal_moves_from(from);
        moves.sort_by_key(|p| (p.row, p.col));
        let squares: Vec<String> = moves.into_iter().map(format_square).collect();
        writeln!(out, "legalmoves {}", squares.join(" ")).unwrap();
        out.flush().unwrap();
    }

    /// Attempts a move and reports `ok` or `illegal`.
    pub fn handle_move<W: Write>(&mut self, from: Position, to: Position, out: &mut W) {
        let verdict = if self.board.try_move(from, to) {
            "ok"
        } else {
            "illegal"
        };
        writeln!(out, "{} {}", verdict, format_move(from, to)).unwrap();
        out.flush().unwrap();
    }

    /// Takes back the last move if there is one.
    pub fn handle_undo<W: Write>(&mut self, out: &mut W) {
        if self.board.undo_last_move() {
            writeln!(out, "undone").unwrap();
        } else {
            writeln!(out, "nothing to undo").unwrap();
        }
        out.flush().unwrap();
    }

    /// Reports the game status of the side to move.
    pub fn handle_status<W: Write>(&self, out: &mut W) {
        let side = self.board.active_player();
        let status = self.board.evaluate_status(side);
        writeln!(out, "status {} {}", side.name(), status.name()).unwrap();
        out.flush().unwrap();
    }

    /// Reports whose turn it is.
    pub fn handle_turn<W: Write>(&self, out: &mut W) {
        writeln!(out, "turn {}", self.board.active_player().name()).unwrap();
        out.flush().unwrap();
    }

    /// Suggests a random legal move for the side to move.
    pub fn handle_go<W: Write>(&mut self, out: &mut W) {
        let side = self.board.active_player();
        match random_move(&self.board, side, &mut self.rng) {
            Some((from, to)) => writeln!(out, "bestmove {}", format_move(from, to)).unwrap(),
            None => writeln!(out, "bestmove none").unwrap(),
        }
        out.flush().unwrap();
    }

    /// Archives the current game's move list.
    pub fn handle_save<W: Write>(&mut self, user: i64, opponent: &str, result: &str, out: &mut W) {
        let record = self
            .archive
            .save_game(user, opponent, result, self.board.history());
        writeln!(out, "saved {} {}", record.sequence, record.moves.len()).unwrap();
        out.flush().unwrap();
    }

    /// Lists a user's archived games, newest first.
    pub fn handle_games<W: Write>(&self, user: i64, out: &mut W) {
        for game in self.archive.history(user, DEFAULT_HISTORY_LIMIT) {
            writeln!(
                out,
                "game {} {} {} {}",
                game.sequence,
                game.opponent,
                game.result,
                game.moves.len()
            )
            .unwrap();
        }
        writeln!(out, "gamesok").unwrap();
        out.flush().unwrap();
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}
