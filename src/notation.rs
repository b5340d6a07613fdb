//! Long algebraic move notation: `e2-e4`, `h7-h8=Q`.
//!
//! Parsing produces a bare `Move` (origin, target, promotion). Special-move
//! flags are unknown until it is matched against the legal moves with
//! `MoveGenerator::resolve`.

use crate::board::Move;
use crate::error::NotationError;
use crate::types::{Color, PieceKind, Square};

fn parse_square(file: char, rank: char) -> Result<Square, NotationError> {
    if !('a'..='h').contains(&file) {
        return Err(NotationError::BadFile(file));
    }
    if !('1'..='8').contains(&rank) {
        return Err(NotationError::BadRank(rank));
    }
    let row = b'8' - rank as u8;
    let col = file as u8 - b'a';
    Square::new(row, col).ok_or(NotationError::BadRank(rank))
}

/// Parse a move for `color`.
pub fn parse_move(text: &str, color: Color) -> Result<Move, NotationError> {
    let chars: Vec<char> = text.trim().chars().collect();

    if chars.len() != 5 && chars.len() != 7 {
        return Err(NotationError::BadLength(chars.len()));
    }
    if chars[2] != '-' {
        return Err(NotationError::MissingSeparator);
    }

    let from = parse_square(chars[0], chars[1])?;
    let to = parse_square(chars[3], chars[4])?;

    if chars.len() == 5 {
        return Ok(Move::new(from, to, color));
    }

    if chars[5] != '=' {
        return Err(NotationError::MissingPromotionMarker);
    }
    let kind = PieceKind::from_letter(chars[6])
        .filter(|kind| PieceKind::PROMOTIONS.contains(kind))
        .ok_or(NotationError::BadPromotion(chars[6]))?;

    Ok(Move::with_promotion(from, to, color, kind))
}

/// Inverse of `parse_move`
pub fn format_move(mv: &Move) -> String {
    mv.to_notation()
}
