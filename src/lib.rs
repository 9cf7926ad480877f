//! Cotulenh engine library.
//!
//! Exposes the board representation, move generation, notation, archive,
//! and session modules for use by integration tests and the binary entry
//! point.

pub mod archive;
pub mod board;
pub mod engine;
pub mod movegen;
pub mod notation;
