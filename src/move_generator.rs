//! Move Generator Module
//!
//! Generates pseudo-legal moves per piece-movement rules, then filters them
//! down to legal moves by playing each one and checking whether the mover's
//! king is left attacked. Handles castling, en passant and promotion.
//!
//! Moves come out in board scan order (a8..h1); for a fixed position the
//! order is deterministic but carries no ordering heuristic.

use crate::board::{Move, Position};
use crate::error::{EngineError, EngineResult};
use crate::types::*;

/// File the king starts on
const KING_HOME_FILE: u8 = 4;

/// Move generator for chess positions
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    /// Create a new move generator
    pub fn new() -> Self {
        MoveGenerator
    }

    /// Generate all legal moves for `color`.
    ///
    /// Fails with `EngineError::NoKing` when `color` has no king on the board.
    /// The position is restored before returning, attacked-field caches
    /// included.
    pub fn legal_moves(&self, position: &mut Position, color: Color) -> EngineResult<Vec<Move>> {
        position.find_king(color)?;

        let pseudo_legal = self.pseudo_legal_moves(position, color);
        let attacked_before = position.attacked_by(color.opponent());
        let mut legal_moves = Vec::with_capacity(pseudo_legal.len());

        for mv in pseudo_legal {
            let mut probe = mv;
            let captured = position.apply(&mut probe)?;
            position.update_attacked_fields();

            let king_sq = position.find_king(color)?;
            let mut is_legal = !position.attacked_fields(color.opponent()).contains(king_sq);

            // Castling: the king may not start on or cross an attacked square
            if let Some(side) = mv.castling {
                is_legal = is_legal
                    && (0..=2)
                        .filter_map(|step| mv.from.offset(0, step * side.direction()))
                        .all(|sq| !attacked_before.contains(sq));
            }

            position.undo(&probe, captured)?;

            if is_legal {
                legal_moves.push(mv);
            }
        }

        position.update_attacked_fields();
        Ok(legal_moves)
    }

    /// Generate all pseudo-legal moves (may leave king in check)
    pub fn pseudo_legal_moves(&self, position: &Position, color: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);

        for (sq, piece) in position.pieces() {
            if piece.color != color {
                continue;
            }

            match piece.kind {
                PieceKind::Pawn => self.generate_pawn_moves(position, sq, color, &mut moves),
                PieceKind::Knight => self.generate_step_moves(position, sq, piece, &mut moves),
                PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                    self.generate_sliding_moves(position, sq, piece, &mut moves)
                }
                PieceKind::King => {
                    self.generate_step_moves(position, sq, piece, &mut moves);
                    self.generate_castling_moves(position, sq, piece, &mut moves);
                }
            }
        }

        moves
    }

    /// Push a pawn move, expanding it into one move per promotion choice
    /// when it lands on the last row.
    fn push_pawn_move(from: Square, to: Square, color: Color, moves: &mut Vec<Move>) {
        if to.row() == color.promotion_row() {
            for promo in PieceKind::PROMOTIONS {
                moves.push(Move::with_promotion(from, to, color, promo));
            }
        } else {
            moves.push(Move::new(from, to, color));
        }
    }

    /// Generate pawn moves from the given square
    fn generate_pawn_moves(&self, position: &Position, sq: Square, color: Color, moves: &mut Vec<Move>) {
        let direction = color.forward();

        // Single push, then double push from the starting row
        if let Some(one) = sq.offset(direction, 0) {
            if position.piece_at(one).is_none() {
                Self::push_pawn_move(sq, one, color, moves);

                if sq.row() == color.pawn_row() {
                    if let Some(two) = one.offset(direction, 0) {
                        if position.piece_at(two).is_none() {
                            moves.push(Move::double_move(sq, two, color));
                        }
                    }
                }
            }
        }

        // Captures
        for &(d_row, d_file) in PieceKind::Pawn.attack_offsets(color) {
            let Some(target) = sq.offset(d_row, d_file) else {
                continue;
            };

            match position.piece_at(target) {
                Some(victim) if victim.color != color => {
                    Self::push_pawn_move(sq, target, color, moves);
                }
                Some(_) => {}
                None => {
                    if position.en_passant_square() == Some(target)
                        && Self::has_en_passant_victim(position, target, color)
                    {
                        moves.push(Move::en_passant(sq, target, color));
                    }
                }
            }
        }
    }

    /// An en passant target is only capturable with an enemy pawn behind it
    fn has_en_passant_victim(position: &Position, target: Square, color: Color) -> bool {
        target
            .offset(-color.forward(), 0)
            .and_then(|sq| position.piece_at(sq))
            .is_some_and(|p| p.kind == PieceKind::Pawn && p.color != color)
    }

    /// Generate knight or king steps from the given square
    fn generate_step_moves(&self, position: &Position, sq: Square, piece: Piece, moves: &mut Vec<Move>) {
        for &(d_row, d_file) in piece.kind.attack_offsets(piece.color) {
            let Some(target) = sq.offset(d_row, d_file) else {
                continue;
            };
            match position.piece_at(target) {
                Some(other) if other.color == piece.color => {}
                _ => moves.push(Move::new(sq, target, piece.color)),
            }
        }
    }

    /// Generate moves for sliding pieces (bishop, rook, queen)
    fn generate_sliding_moves(&self, position: &Position, sq: Square, piece: Piece, moves: &mut Vec<Move>) {
        for &(d_row, d_file) in piece.kind.attack_offsets(piece.color) {
            let mut current = sq;
            while let Some(next) = current.offset(d_row, d_file) {
                match position.piece_at(next) {
                    None => moves.push(Move::new(sq, next, piece.color)),
                    Some(other) => {
                        if other.color != piece.color {
                            moves.push(Move::new(sq, next, piece.color));
                        }
                        break;
                    }
                }
                current = next;
            }
        }
    }

    /// Castling candidates. Attacked-square conditions are checked in
    /// `legal_moves`.
    fn generate_castling_moves(&self, position: &Position, sq: Square, king: Piece, moves: &mut Vec<Move>) {
        let color = king.color;
        let row = color.back_row();
        if king.has_moved || sq.row() != row || sq.file() != KING_HOME_FILE {
            return;
        }

        for side in CastlingSide::BOTH {
            if !position.castling_rights().has(color, side) {
                continue;
            }

            let rook_file = side.rook_file();
            let rook_ready = Square::new(row, rook_file)
                .and_then(|rook_sq| position.piece_at(rook_sq))
                .is_some_and(|p| p.kind == PieceKind::Rook && p.color == color && !p.has_moved);
            if !rook_ready {
                continue;
            }

            let (low, high) = if rook_file < KING_HOME_FILE {
                (rook_file, KING_HOME_FILE)
            } else {
                (KING_HOME_FILE, rook_file)
            };
            let path_clear = (low + 1..high)
                .filter_map(|file| Square::new(row, file))
                .all(|between| position.piece_at(between).is_none());
            if !path_clear {
                continue;
            }

            if let Some(target) = sq.offset(0, 2 * side.direction()) {
                moves.push(Move::castling(sq, target, color, side));
            }
        }
    }

    /// Check if `color`'s king is currently attacked
    pub fn is_in_check(&self, position: &Position, color: Color) -> EngineResult<bool> {
        let king_sq = position.find_king(color)?;
        Ok(position.attacked_by(color.opponent()).contains(king_sq))
    }

    /// Check if `color` is checkmated
    pub fn is_checkmate(&self, position: &mut Position, color: Color) -> EngineResult<bool> {
        if !self.is_in_check(position, color)? {
            return Ok(false);
        }
        Ok(self.legal_moves(position, color)?.is_empty())
    }

    /// Check if `color` is stalemated
    pub fn is_stalemate(&self, position: &mut Position, color: Color) -> EngineResult<bool> {
        if self.is_in_check(position, color)? {
            return Ok(false);
        }
        Ok(self.legal_moves(position, color)?.is_empty())
    }

    /// Find the legal move matching a bare move's origin, target and
    /// promotion, e.g. one parsed from notation. The returned move carries
    /// the generator's flags (castling, en passant, double move).
    pub fn resolve(&self, position: &mut Position, candidate: &Move) -> EngineResult<Move> {
        self.legal_moves(position, candidate.color)?
            .into_iter()
            .find(|mv| {
                mv.from == candidate.from && mv.to == candidate.to && mv.promotion == candidate.promotion
            })
            .ok_or_else(|| EngineError::IllegalMove(candidate.to_notation()))
    }
}
