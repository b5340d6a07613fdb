//! Static position evaluation
//!
//! Scores are White-positive centipawns built from three terms:
//! - Material (kings carry none since they are never captured)
//! - Piece-square tables
//! - Mobility, from the per-color attacked-square counts

use crate::board::Position;
use crate::config::MobilityMode;
use crate::types::*;

/// Material value per piece kind, indexed by `PieceKind::index()`
pub const PIECE_VALUES: [i32; 6] = [
    100, // PAWN
    300, // KNIGHT
    300, // BISHOP
    500, // ROOK
    900, // QUEEN
    0,   // KING
];

// Tables are laid out in board order from White's point of view: the first
// row is rank 8, the last is rank 1. Black reads them through a mirrored
// square.

const PAWN_PST: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
    50,  50,  50,  50,  50,  50,  50,  50,
    10,  10,  20,  30,  30,  20,  10,  10,
     5,   5,  10,  25,  25,  10,   5,   5,
     0,   0,   0,  20,  20,   0,   0,   0,
     5,  -5, -10,   0,   0, -10,  -5,   5,
     5,  10,  10, -20, -20,  10,  10,   5,
     0,   0,   0,   0,   0,   0,   0,   0,
];

const KNIGHT_PST: [i32; 64] = [
   -50, -40, -30, -30, -30, -30, -40, -50,
   -40, -20,   0,   0,   0,   0, -20, -40,
   -30,   0,  10,  15,  15,  10,   0, -30,
   -30,   5,  15,  20,  20,  15,   5, -30,
   -30,   0,  15,  20,  20,  15,   0, -30,
   -30,   5,  10,  15,  15,  10,   5, -30,
   -40, -20,   0,   5,   5,   0, -20, -40,
   -50, -40, -30, -30, -30, -30, -40, -50,
];

const BISHOP_PST: [i32; 64] = [
   -20, -10, -10, -10, -10, -10, -10, -20,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -10,   0,   5,  10,  10,   5,   0, -10,
   -10,   5,   5,  10,  10,   5,   5, -10,
   -10,   0,  10,  10,  10,  10,   0, -10,
   -10,  10,  10,  10,  10,  10,  10, -10,
   -10,   5,   0,   0,   0,   0,   5, -10,
   -20, -10, -10, -10, -10, -10, -10, -20,
];

const ROOK_PST: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
     5,  10,  10,  10,  10,  10,  10,   5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
     0,   0,   0,   5,   5,   0,   0,   0,
];

const QUEEN_PST: [i32; 64] = [
   -20, -10, -10,  -5,  -5, -10, -10, -20,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -10,   0,   5,   5,   5,   5,   0, -10,
    -5,   0,   5,   5,   5,   5,   0,  -5,
     0,   0,   5,   5,   5,   5,   0,  -5,
   -10,   5,   5,   5,   5,   5,   0, -10,
   -10,   0,   5,   0,   0,   0,   0, -10,
   -20, -10, -10,  -5,  -5, -10, -10, -20,
];

/// Positional bonus for a piece standing on `sq`. Kings have no table.
#[inline]
pub fn piece_square_value(kind: PieceKind, color: Color, sq: Square) -> i32 {
    let idx = match color {
        Color::White => sq.index(),
        Color::Black => sq.mirrored().index(),
    };
    match kind {
        PieceKind::Pawn => PAWN_PST[idx],
        PieceKind::Knight => KNIGHT_PST[idx],
        PieceKind::Bishop => BISHOP_PST[idx],
        PieceKind::Rook => ROOK_PST[idx],
        PieceKind::Queen => QUEEN_PST[idx],
        PieceKind::King => 0,
    }
}

/// Evaluate the position with the default mobility mode
pub fn evaluate(position: &Position) -> i32 {
    evaluate_with(position, MobilityMode::default())
}

/// Evaluate the position from White's perspective.
///
/// Attack sets are recomputed from the board rather than read from the
/// position's caches, which search leaves stale between `apply` calls.
pub fn evaluate_with(position: &Position, mobility: MobilityMode) -> i32 {
    let white_mobility = position.attacked_by(Color::White).len() as i32;
    let black_mobility = position.attacked_by(Color::Black).len() as i32;

    let mut score = 0;

    for (sq, piece) in position.pieces() {
        if piece.kind == PieceKind::King {
            continue;
        }

        let mut value = PIECE_VALUES[piece.kind.index()]
            + piece_square_value(piece.kind, piece.color, sq);

        // Side totals counted again for every piece scanned
        if mobility == MobilityMode::PerOccupiedSquare {
            value += match piece.color {
                Color::White => white_mobility,
                Color::Black => black_mobility,
            };
        }

        match piece.color {
            Color::White => score += value,
            Color::Black => score -= value,
        }
    }

    if mobility == MobilityMode::PerSide {
        score += white_mobility - black_mobility;
    }

    score
}
