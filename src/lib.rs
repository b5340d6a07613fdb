//! Mailbox Chess - engine core
//!
//! A chess engine core written in Rust with support for:
//! - Board layouts parsed from piece-placement strings
//! - Reversible move execution (apply/undo)
//! - Legal move generation including castling, en passant and promotion
//! - Static evaluation (material, piece-square tables, mobility)
//! - Fixed-depth minimax search with alpha-beta pruning

pub mod types;
pub mod bitboard;
pub mod error;
pub mod board;
pub mod move_generator;
pub mod perft;
pub mod evaluation;
pub mod search;
pub mod notation;
pub mod config;

pub use board::{Move, Position, STARTING_LAYOUT};
pub use config::{EngineConfig, MobilityMode};
pub use error::{EngineError, EngineResult, NotationError, ParseError};
pub use evaluation::evaluate;
pub use move_generator::MoveGenerator;
pub use search::{SearchEngine, SearchOutcome, MAX_DEPTH};
pub use types::{Color, Piece, PieceKind, Square};
