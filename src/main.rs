//! cotulenh -- a Cờ Tư Lệnh (Commander Chess) engine session.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Logging goes to stderr and is controlled through `RUST_LOG`.

use std::io::{self, BufRead};

use cotulenh::engine::Engine;
use cotulenh::notation::parser::{parse_command, Command};

/// Runs the main protocol loop, reading commands from stdin and writing
/// responses to stdout.
fn main() {
    env_logger::init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Cti => {
                engine.handle_cti(&mut out);
            }
            Command::IsReady => {
                engine.handle_isready(&mut out);
            }
            Command::NewGame => {
                engine.new_game();
            }
            Command::Clear => {
                engine.clear();
            }
            Command::Place { side, kind, pos } => {
                if let Err(e) = engine.place(side, kind, pos) {
                    eprintln!("{}", e);
                }
            }
            Command::Moves { from } => {
                engine.handle_moves(from, &mut out);
            }
            Command::Move { from, to } => {
                engine.handle_move(from, to, &mut out);
            }
            Command::Undo => {
                engine.handle_undo(&mut out);
            }
            Command::Status => {
                engine.handle_status(&mut out);
            }
            Command::Turn => {
                engine.handle_turn(&mut out);
            }
            Command::Go => {
                engine.handle_go(&mut out);
            }
            Command::Save {
                user,
                opponent,
                result,
            } => {
                engine.handle_save(user, &opponent, &result, &mut out);
            }
            Command::Games { user } => {
                engine.handle_games(user, &mut out);
            }
            Command::Quit => {
                break;
            }
        }
    }
}
