//! Session command parser.
//!
//! Parses incoming protocol commands from raw text into structured
//! `Command` variants that the session main loop can dispatch on.

use crate::board::{PieceType, Position, Side};

use super::parse_square;

/// A parsed host-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize the protocol handshake.
    Cti,

    /// Synchronization ping; the engine must reply `readyok`.
    IsReady,

    /// Reset to the standard starting position.
    NewGame,

    /// Reset to an empty board.
    Clear,

    /// Put a piece on a square: `place <side> <piece> <square>`.
    Place {
        side: Side,
        kind: PieceType,
        pos: Position,
    },

    /// List legal destinations: `moves <square>`.
    Moves { from: Position },

    /// Execute a move: `move <from> <to>`.
    Move { from: Position, to: Position },

    /// Take back the last move.
    Undo,

    /// Report the active player's game status.
    Status,

    /// Report whose turn it is.
    Turn,

    /// Suggest a random legal move for the active player.
    Go,

    /// Archive the current game: `save <user> <opponent> <result>`.
    Save {
        user: i64,
        opponent: String,
        result: String,
    },

    /// List a user's archived games, newest first: `games <user>`.
    Games { user: i64 },

    /// Terminate the session.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging to
/// stderr.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let first = *tokens.first()?;

    match first {
        "cti" => Some(Command::Cti),
        "isready" => Some(Command::IsReady),
        "newgame" => Some(Command::NewGame),
        "clear" => Some(Command::Clear),
        "undo" => Some(Command::Undo),
        "status" => Some(Command::Status),
        "turn" => Some(Command::Turn),
        "go" => Some(Command::Go),
        "quit" => Some(Command::Quit),

        "place" => parse_place(&tokens),
        "moves" => parse_moves(&tokens),
        "move" => parse_move_command(&tokens),
        "save" => parse_save(&tokens),
        "games" => parse_games(&tokens),

        other => {
            eprintln!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `place <side> <piece> <square>`.
fn parse_place(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 4 {
        eprintln!("malformed place: expected 'place <side> <piece> <square>'");
        return None;
    }
    let side = match Side::from_name(tokens[1]) {
        Some(s) => s,
        None => {
            eprintln!("unknown side: {}", tokens[1]);
            return None;
        }
    };
    let kind = match PieceType::from_name(tokens[2]) {
        Some(k) => k,
        None => {
            eprintln!("unknown piece: {}", tokens[2]);
            return None;
        }
    };
    let pos = match parse_square(tokens[3]) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            return None;
        }
    };
    Some(Command::Place { side, kind, pos })
}

/// Parses `moves <square>`.
fn parse_moves(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        eprintln!("malformed moves: expected 'moves <square>'");
        return None;
    }
    match parse_square(tokens[1]) {
        Ok(from) => Some(Command::Moves { from }),
        Err(e) => {
            eprintln!("{}", e);
            None
        }
    }
}

/// Parses `move <from> <to>`.
fn parse_move_command(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 3 {
        eprintln!("malformed move: expected 'move <from> <to>'");
        return None;
    }
    match (parse_square(tokens[1]), parse_square(tokens[2])) {
        (Ok(from), Ok(to)) => Some(Command::Move { from, to }),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("{}", e);
            None
        }
    }
}

/// Parses `save <user> <opponent> <result>`.
fn parse_save(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 4 {
        eprintln!("malformed save: expected 'save <user> <opponent> <result>'");
        return None;
    }
    let user: i64 = match tokens[1].parse() {
        Ok(u) => u,
        Err(_) => {
            eprintln!("invalid user id: {}", tokens[1]);
            return None;
        }
    };
    Some(Command::Save {
        user,
        opponent: tokens[2].to_string(),
        result: tokens[3].to_string(),
    })
}

/// Parses `games <user>`.
fn parse_games(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        eprintln!("malformed games: expected 'games <user>'");
        return None;
    }
    match tokens[1].parse() {
        Ok(user) => Some(Command::Games { user }),
        Err(_) => {
            eprintln!("invalid user id: {}", tokens[1]);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_commands() {
        assert_eq!(parse_command("cti"), Some(Command::Cti));
        assert_eq!(parse_command("isready"), Some(Command::IsReady));
        assert_eq!(parse_command("newgame"), Some(Command::NewGame));
        assert_eq!(parse_command("clear"), Some(Command::Clear));
        assert_eq!(parse_command("undo"), Some(Command::Undo));
        assert_eq!(parse_command("status"), Some(Command::Status));
        assert_eq!(parse_command("turn"), Some(Command::Turn));
        assert_eq!(parse_command("go"), Some(Command::Go));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
    }

    #[test]
    fn empty_and_unknown_lines() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command("frobnicate"), None);
    }

    #[test]
    fn place_command() {
        assert_eq!(
            parse_command("place red tank f5"),
            Some(Command::Place {
                side: Side::Red,
                kind: PieceType::Tank,
                pos: Position::new(4, 5),
            })
        );
        assert_eq!(parse_command("place red tank"), None);
        assert_eq!(parse_command("place green tank f5"), None);
        assert_eq!(parse_command("place red pawn f5"), None);
        assert_eq!(parse_command("place red tank z9"), None);
    }

    #[test]
    fn moves_command() {
        assert_eq!(
            parse_command("moves f5"),
            Some(Command::Moves { from: Position::new(4, 5) })
        );
        assert_eq!(parse_command("moves"), None);
    }

    #[test]
    fn move_command() {
        assert_eq!(
            parse_command("move f5 f6"),
            Some(Command::Move {
                from: Position::new(4, 5),
                to: Position::new(5, 5),
            })
        );
        assert_eq!(parse_command("move f5"), None);
        assert_eq!(parse_command("move f5 q1"), None);
    }

    #[test]
    fn save_and_games_commands() {
        assert_eq!(
            parse_command("save 7 garry win"),
            Some(Command::Save {
                user: 7,
                opponent: "garry".to_string(),
                result: "win".to_string(),
            })
        );
        assert_eq!(parse_command("save seven garry win"), None);
        assert_eq!(parse_command("games 7"), Some(Command::Games { user: 7 }));
        assert_eq!(parse_command("games"), None);
    }
}
