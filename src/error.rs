//! Error types for the engine core
//!
//! One enum per failure domain: layout parsing, move notation, and runtime
//! engine operations (missing king, bad depth, misuse of apply/undo).

use thiserror::Error;

use crate::types::{Color, Square};

/// Malformed board-layout string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A rank describes more than eight files
    #[error("rank {rank} overflows past 8 files")]
    TooManyFiles { rank: usize },

    /// A rank describes fewer than eight files
    #[error("rank {rank} covers only {files} files")]
    TooFewFiles { rank: usize, files: usize },

    /// Character is neither a piece letter, a digit 1-8, nor '/'
    #[error("unexpected layout char {0:?}")]
    UnknownPiece(char),

    #[error("expected 8 ranks, found {0}")]
    WrongRankCount(usize),
}

/// Malformed move string such as "e2-e4" or "h7-h8=Q"
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("move must be 5 or 7 characters long, got {0}")]
    BadLength(usize),

    #[error("move must contain '-' between the squares")]
    MissingSeparator,

    #[error("unexpected file char {0:?}")]
    BadFile(char),

    #[error("unexpected rank char {0:?}")]
    BadRank(char),

    #[error("unexpected promotion piece {0:?}")]
    BadPromotion(char),

    #[error("promotion suffix must start with '='")]
    MissingPromotionMarker,
}

/// Errors raised by position, move generation and search operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The side being queried has no king on the board
    #[error("no {0} king on the board")]
    NoKing(Color),

    #[error("search depth {depth} outside supported range 0..={max}")]
    InvalidDepth { depth: u32, max: u32 },

    /// Tried to apply a move whose origin square is empty
    #[error("no piece on origin square {0}")]
    EmptySquare(Square),

    /// Tried to undo a move that carries no apply snapshot
    #[error("move was never applied")]
    NotApplied,

    #[error("{0} has no legal moves")]
    NoLegalMoves(Color),

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Notation(#[from] NotationError),
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
