//! Board Representation Module
//!
//! Mailbox position (one optional piece per square), en passant and castling
//! state, reversible move execution and attacked-square computation.
//!
//! Search mutates a single `Position` in place: every `apply` must be paired
//! with an `undo` of the same move and the piece `apply` returned. The move
//! carries the snapshot needed to restore the non-board state exactly.

use std::fmt;
use std::str::FromStr;

use crate::bitboard::SquareSet;
use crate::error::{EngineError, EngineResult, ParseError};
use crate::types::*;

/// Starting position layout
pub const STARTING_LAYOUT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// State stashed by `apply` so `undo` can restore it
#[derive(Clone, Copy, Debug, Default)]
struct Snapshot {
    en_passant_square: Option<Square>,
    castling_rights: CastlingRights,
    /// The piece as it stood on the origin square (a pawn for promotions)
    moved_piece: Option<Piece>,
}

/// Represents a chess move
///
/// Equality ignores the apply snapshot: two moves are equal when they
/// describe the same action.
#[derive(Clone, Copy, Debug)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub color: Color,
    pub promotion: Option<PieceKind>,
    pub castling: Option<CastlingSide>,
    pub en_passant: bool,
    pub double_move: bool,
    snapshot: Snapshot,
}

impl Move {
    /// Create a plain move
    pub fn new(from: Square, to: Square, color: Color) -> Self {
        Move {
            from,
            to,
            color,
            promotion: None,
            castling: None,
            en_passant: false,
            double_move: false,
            snapshot: Snapshot::default(),
        }
    }

    /// Create a promotion move
    pub fn with_promotion(from: Square, to: Square, color: Color, promotion: PieceKind) -> Self {
        Move { promotion: Some(promotion), ..Move::new(from, to, color) }
    }

    /// Create a castling move (king origin and target)
    pub fn castling(from: Square, to: Square, color: Color, side: CastlingSide) -> Self {
        Move { castling: Some(side), ..Move::new(from, to, color) }
    }

    /// Create an en passant capture
    pub fn en_passant(from: Square, to: Square, color: Color) -> Self {
        Move { en_passant: true, ..Move::new(from, to, color) }
    }

    /// Create a two-square pawn advance
    pub fn double_move(from: Square, to: Square, color: Color) -> Self {
        Move { double_move: true, ..Move::new(from, to, color) }
    }

    /// Whether `apply` has stashed a snapshot on this move
    pub fn is_applied(&self) -> bool {
        self.snapshot.moved_piece.is_some()
    }

    /// Convert move to notation (e.g. "e2-e4", "e7-e8=Q")
    pub fn to_notation(&self) -> String {
        let mut text = format!("{}-{}", self.from, self.to);
        if let Some(kind) = self.promotion {
            text.push('=');
            text.push(kind.letter().to_ascii_uppercase());
        }
        text
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.color == other.color
            && self.promotion == other.promotion
            && self.castling == other.castling
            && self.en_passant == other.en_passant
            && self.double_move == other.double_move
    }
}

impl Eq for Move {}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_notation())
    }
}

/// Chess position: board plus en passant and castling state
#[derive(Clone, Debug)]
pub struct Position {
    /// 64 squares in layout order (0=a8, 1=b8, ..., 63=h1)
    squares: [Option<Piece>; 64],
    en_passant_square: Option<Square>,
    castling_rights: CastlingRights,
    attacked_fields_white: SquareSet,
    attacked_fields_black: SquareSet,
}

impl Position {
    /// Create a position from a piece-placement layout such as
    /// `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`.
    ///
    /// Castling rights start fully available and there is no en passant
    /// square. Kings are not required; move generation reports their absence.
    pub fn from_layout(layout: &str) -> Result<Self, ParseError> {
        let ranks: Vec<&str> = layout.trim().split('/').collect();
        if ranks.len() != 8 {
            return Err(ParseError::WrongRankCount(ranks.len()));
        }

        let mut squares = [None; 64];
        for (row, rank_text) in ranks.iter().enumerate() {
            let rank = 8 - row;
            let mut file = 0usize;
            for c in rank_text.chars() {
                match c {
                    '1'..='9' => file += (c as u8 - b'0') as usize,
                    _ => {
                        let piece = Piece::from_char(c).ok_or(ParseError::UnknownPiece(c))?;
                        if file >= 8 {
                            return Err(ParseError::TooManyFiles { rank });
                        }
                        squares[row * 8 + file] = Some(piece);
                        file += 1;
                    }
                }
                if file > 8 {
                    return Err(ParseError::TooManyFiles { rank });
                }
            }
            if file < 8 {
                return Err(ParseError::TooFewFiles { rank, files: file });
            }
        }

        let mut position = Position {
            squares,
            en_passant_square: None,
            castling_rights: CastlingRights::ALL,
            attacked_fields_white: SquareSet::EMPTY,
            attacked_fields_black: SquareSet::EMPTY,
        };
        position.update_attacked_fields();
        log::debug!("parsed layout {layout}");
        Ok(position)
    }

    /// Generate the compressed placement string; inverse of `from_layout`.
    pub fn to_layout_string(&self) -> String {
        let mut layout = String::with_capacity(72);

        for row in 0..8 {
            let mut empty_count = 0;
            for file in 0..8 {
                match self.squares[row * 8 + file] {
                    None => empty_count += 1,
                    Some(piece) => {
                        if empty_count > 0 {
                            layout.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        layout.push(piece.to_char());
                    }
                }
            }
            if empty_count > 0 {
                layout.push_str(&empty_count.to_string());
            }
            if row < 7 {
                layout.push('/');
            }
        }

        layout
    }

    /// Replace the castling rights, e.g. when the caller knows more than the
    /// placement string can express.
    pub fn with_castling_rights(mut self, rights: CastlingRights) -> Self {
        self.castling_rights = rights;
        self
    }

    /// Set the en passant target square.
    pub fn with_en_passant(mut self, square: Option<Square>) -> Self {
        self.en_passant_square = square;
        self
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// All occupied squares in layout order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    #[inline]
    fn take(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    #[inline]
    fn put(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.index()] = piece;
    }

    /// Clear the castling right tied to a rook corner, if `sq` is one.
    fn clear_corner_right(&mut self, sq: Square) {
        for color in [Color::White, Color::Black] {
            if sq.row() != color.back_row() {
                continue;
            }
            for side in CastlingSide::BOTH {
                if sq.file() == side.rook_file() {
                    self.castling_rights.clear(color, side);
                }
            }
        }
    }

    /// Execute a move on the board and return the captured piece, if any.
    ///
    /// Stashes the previous en passant square, castling rights and the moved
    /// piece on `mv` for `undo`.
    pub fn apply(&mut self, mv: &mut Move) -> EngineResult<Option<Piece>> {
        let piece = self.piece_at(mv.from).ok_or(EngineError::EmptySquare(mv.from))?;

        mv.snapshot = Snapshot {
            en_passant_square: self.en_passant_square,
            castling_rights: self.castling_rights,
            moved_piece: Some(piece),
        };

        self.take(mv.from);
        let mut captured = self.take(mv.to);
        if captured.is_some() {
            self.clear_corner_right(mv.to);
        }

        let mut placed = piece;
        self.en_passant_square = None;

        match piece.kind {
            PieceKind::Pawn => {
                if mv.en_passant {
                    if let Some(victim_sq) = mv.to.offset(-piece.color.forward(), 0) {
                        captured = self.take(victim_sq);
                    }
                }
                if mv.double_move {
                    self.en_passant_square = mv.from.offset(piece.color.forward(), 0);
                }
                if let Some(kind) = mv.promotion {
                    placed = Piece::new(kind, piece.color);
                }
            }
            PieceKind::Rook => {
                if mv.from.row() == piece.color.back_row() {
                    for side in CastlingSide::BOTH {
                        if mv.from.file() == side.rook_file() {
                            self.castling_rights.clear(piece.color, side);
                        }
                    }
                }
                placed.has_moved = true;
            }
            PieceKind::King => {
                if let Some(side) = mv.castling {
                    let rook_from = Square::new(mv.from.row(), side.rook_file());
                    let rook_to = mv.to.offset(0, -side.direction());
                    if let (Some(rook_from), Some(rook_to)) = (rook_from, rook_to) {
                        if let Some(mut rook) = self.take(rook_from) {
                            rook.has_moved = true;
                            self.put(rook_to, Some(rook));
                        }
                    }
                }
                self.castling_rights.clear_color(piece.color);
                placed.has_moved = true;
            }
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Queen => {}
        }

        self.put(mv.to, Some(placed));
        Ok(captured)
    }

    /// Undo a move using the snapshot `apply` stored on it
    pub fn undo(&mut self, mv: &Move, captured: Option<Piece>) -> EngineResult<()> {
        let moved = mv.snapshot.moved_piece.ok_or(EngineError::NotApplied)?;

        self.take(mv.to);
        self.put(mv.from, Some(moved));

        if mv.en_passant {
            if let Some(victim_sq) = mv.to.offset(-moved.color.forward(), 0) {
                self.put(victim_sq, captured);
            }
        } else {
            self.put(mv.to, captured);
        }

        // Castling - move rook back
        if let Some(side) = mv.castling {
            let rook_from = Square::new(mv.from.row(), side.rook_file());
            let rook_to = mv.to.offset(0, -side.direction());
            if let (Some(rook_from), Some(rook_to)) = (rook_from, rook_to) {
                if let Some(mut rook) = self.take(rook_to) {
                    rook.has_moved = false;
                    self.put(rook_from, Some(rook));
                }
            }
        }

        self.en_passant_square = mv.snapshot.en_passant_square;
        self.castling_rights = mv.snapshot.castling_rights;
        Ok(())
    }

    /// Squares attacked by `color`'s pieces in the current board state.
    ///
    /// Stepping pieces contribute their in-bounds targets; sliders walk each
    /// direction up to and including the first occupied square.
    pub fn attacked_by(&self, color: Color) -> SquareSet {
        let mut attacked = SquareSet::EMPTY;

        for (sq, piece) in self.pieces() {
            if piece.color != color {
                continue;
            }
            for &(d_row, d_file) in piece.kind.attack_offsets(color) {
                if piece.kind.slides() {
                    let mut current = sq;
                    while let Some(next) = current.offset(d_row, d_file) {
                        attacked.insert(next);
                        if self.piece_at(next).is_some() {
                            break;
                        }
                        current = next;
                    }
                } else if let Some(target) = sq.offset(d_row, d_file) {
                    attacked.insert(target);
                }
            }
        }

        attacked
    }

    /// Recompute both attacked-field caches from scratch
    pub fn update_attacked_fields(&mut self) {
        self.attacked_fields_white = self.attacked_by(Color::White);
        self.attacked_fields_black = self.attacked_by(Color::Black);
    }

    /// Cached attacked fields as of the last `update_attacked_fields`
    #[inline]
    pub fn attacked_fields(&self, color: Color) -> SquareSet {
        match color {
            Color::White => self.attacked_fields_white,
            Color::Black => self.attacked_fields_black,
        }
    }

    /// Find the king's square for the specified color
    pub fn find_king(&self, color: Color) -> EngineResult<Square> {
        self.pieces()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.color == color)
            .map(|(sq, _)| sq)
            .ok_or(EngineError::NoKing(color))
    }

    /// Human-readable list of differences to `other`; empty when equal.
    pub fn diff(&self, other: &Position) -> Vec<String> {
        let mut diffs = Vec::new();

        for sq in Square::all() {
            let (mine, theirs) = (self.piece_at(sq), other.piece_at(sq));
            if mine != theirs {
                diffs.push(format!("square {sq}: {mine:?} vs {theirs:?}"));
            }
        }
        if self.en_passant_square != other.en_passant_square {
            diffs.push(format!(
                "en passant: {:?} vs {:?}",
                self.en_passant_square, other.en_passant_square
            ));
        }
        if self.castling_rights != other.castling_rights {
            diffs.push(format!(
                "castling rights: {} vs {}",
                self.castling_rights, other.castling_rights
            ));
        }

        diffs
    }

    /// Display the board as a string
    pub fn display(&self) -> String {
        let mut lines = Vec::new();
        lines.push("  +---+---+---+---+---+---+---+---+".to_string());

        for row in 0..8 {
            let mut line = format!("{} |", 8 - row);
            for file in 0..8 {
                match self.squares[row * 8 + file] {
                    None => line.push_str("   |"),
                    Some(piece) => line.push_str(&format!(" {} |", piece.to_char())),
                }
            }
            lines.push(line);
            lines.push("  +---+---+---+---+---+---+---+---+".to_string());
        }
        lines.push("    a   b   c   d   e   f   g   h".to_string());

        lines.join("\n")
    }
}

/// Positions compare board, en passant square and castling rights; the
/// attacked-field caches are derived state.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.squares == other.squares
            && self.en_passant_square == other.en_passant_square
            && self.castling_rights == other.castling_rights
    }
}

impl Eq for Position {}

impl FromStr for Position {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_layout(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn sq(name: &str) -> Square {
        Square::parse(name).expect("valid square")
    }

    fn position(layout: &str) -> Position {
        Position::from_layout(layout).expect("valid layout")
    }

    /// Apply then undo, asserting the position is restored exactly.
    fn assert_round_trip(layout: &str, mut mv: Move) -> Position {
        let mut pos = position(layout);
        let before = pos.clone();
        let captured = pos.apply(&mut mv).expect("apply");
        let after = pos.clone();
        pos.undo(&mv, captured).expect("undo");
        assert!(pos == before, "undo mismatch: {:?}", pos.diff(&before));
        after
    }

    #[test]
    fn parses_starting_layout() {
        let pos = position(STARTING_LAYOUT);
        assert_eq!(
            pos.piece_at(sq("e1")),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            pos.piece_at(sq("d8")),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
        assert_eq!(pos.piece_at(sq("e4")), None);
        assert_eq!(pos.castling_rights(), CastlingRights::ALL);
        assert_eq!(pos.en_passant_square(), None);
        assert_eq!(pos.pieces().count(), 32);
    }

    #[test_case("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"; "start")]
    #[test_case("8/8/8/8/8/8/8/8"; "empty")]
    #[test_case("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R"; "kiwipete")]
    #[test_case("4k3/8/8/3pP3/8/8/8/4K3"; "sparse")]
    fn layout_string_round_trips(layout: &str) {
        assert_eq!(position(layout).to_layout_string(), layout);
    }

    #[test_case("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP", ParseError::WrongRankCount(7); "seven ranks")]
    #[test_case("8/8/8/8/8/8/8/8/8", ParseError::WrongRankCount(9); "nine ranks")]
    #[test_case("", ParseError::WrongRankCount(1); "empty string")]
    #[test_case("9/8/8/8/8/8/8/8", ParseError::TooManyFiles { rank: 8 }; "digit overflow")]
    #[test_case("8/8/8/8/8/8/8/ppppppppp", ParseError::TooManyFiles { rank: 1 }; "letter overflow")]
    #[test_case("8/8/8/8/8/8/8/7k1", ParseError::TooManyFiles { rank: 1 }; "digit after full rank")]
    #[test_case("8/8/8/8/7/8/8/8", ParseError::TooFewFiles { rank: 4, files: 7 }; "short rank")]
    #[test_case("8/8/8/8/8/8/8/xxxxxxxx", ParseError::UnknownPiece('x'); "unknown letter")]
    #[test_case("8/8/8/8/8/8/8/0", ParseError::UnknownPiece('0'); "zero run")]
    fn rejects_malformed_layouts(layout: &str, expected: ParseError) {
        assert_eq!(Position::from_layout(layout), Err(expected));
    }

    #[test]
    fn quiet_move_relocates_piece() {
        let after = assert_round_trip(STARTING_LAYOUT, Move::new(sq("g1"), sq("f3"), Color::White));
        assert_eq!(after.piece_at(sq("g1")), None);
        assert_eq!(after.piece_at(sq("f3")).map(|p| p.kind), Some(PieceKind::Knight));
    }

    #[test]
    fn capture_returns_captured_piece() {
        let mut pos = position("4k3/8/8/3p4/4B3/8/8/4K3");
        let mut mv = Move::new(sq("e4"), sq("d5"), Color::White);
        let captured = pos.apply(&mut mv).unwrap();
        assert_eq!(captured, Some(Piece::new(PieceKind::Pawn, Color::Black)));
        assert_round_trip("4k3/8/8/3p4/4B3/8/8/4K3", Move::new(sq("e4"), sq("d5"), Color::White));
    }

    #[test]
    fn double_move_sets_en_passant_square_for_one_ply() {
        let mut pos = position(STARTING_LAYOUT);
        let mut push = Move::double_move(sq("e2"), sq("e4"), Color::White);
        pos.apply(&mut push).unwrap();
        assert_eq!(pos.en_passant_square(), Some(sq("e3")));

        let mut reply = Move::new(sq("g8"), sq("f6"), Color::Black);
        pos.apply(&mut reply).unwrap();
        assert_eq!(pos.en_passant_square(), None);

        let mut black_push = Move::double_move(sq("d7"), sq("d5"), Color::Black);
        pos.apply(&mut black_push).unwrap();
        assert_eq!(pos.en_passant_square(), Some(sq("d6")));
    }

    #[test]
    fn en_passant_removes_pawn_behind_target() {
        let layout = "4k3/8/8/3pP3/8/8/8/4K3";
        let mut pos = position(layout).with_en_passant(Some(sq("d6")));
        let before = pos.clone();
        let mut mv = Move::en_passant(sq("e5"), sq("d6"), Color::White);
        let captured = pos.apply(&mut mv).unwrap();
        assert_eq!(captured, Some(Piece::new(PieceKind::Pawn, Color::Black)));
        assert_eq!(pos.piece_at(sq("d5")), None);
        assert_eq!(pos.piece_at(sq("d6")).map(|p| p.kind), Some(PieceKind::Pawn));
        pos.undo(&mv, captured).unwrap();
        assert!(pos == before, "{:?}", pos.diff(&before));
    }

    #[test]
    fn black_en_passant_removes_white_pawn() {
        let mut pos = position("4k3/8/8/8/3Pp3/8/8/4K3").with_en_passant(Some(sq("d3")));
        let before = pos.clone();
        let mut mv = Move::en_passant(sq("e4"), sq("d3"), Color::Black);
        let captured = pos.apply(&mut mv).unwrap();
        assert_eq!(captured, Some(Piece::new(PieceKind::Pawn, Color::White)));
        assert_eq!(pos.piece_at(sq("d4")), None);
        pos.undo(&mv, captured).unwrap();
        assert!(pos == before, "{:?}", pos.diff(&before));
    }

    #[test]
    fn promotion_undo_restores_pawn() {
        let after = assert_round_trip(
            "8/4P3/8/8/8/8/8/k3K3",
            Move::with_promotion(sq("e7"), sq("e8"), Color::White, PieceKind::Knight),
        );
        assert_eq!(
            after.piece_at(sq("e8")),
            Some(Piece::new(PieceKind::Knight, Color::White))
        );
    }

    #[test]
    fn capture_promotion_round_trips() {
        assert_round_trip(
            "3r4/4P3/8/8/8/8/8/k3K3",
            Move::with_promotion(sq("e7"), sq("d8"), Color::White, PieceKind::Queen),
        );
    }

    #[test_case(Color::White, CastlingSide::Kingside, "e1", "g1", "h1", "f1"; "white short")]
    #[test_case(Color::White, CastlingSide::Queenside, "e1", "c1", "a1", "d1"; "white long")]
    #[test_case(Color::Black, CastlingSide::Kingside, "e8", "g8", "h8", "f8"; "black short")]
    #[test_case(Color::Black, CastlingSide::Queenside, "e8", "c8", "a8", "d8"; "black long")]
    fn castling_moves_king_and_rook_together(
        color: Color,
        side: CastlingSide,
        king_from: &str,
        king_to: &str,
        rook_from: &str,
        rook_to: &str,
    ) {
        let layout = "r3k2r/8/8/8/8/8/8/R3K2R";
        let after = assert_round_trip(layout, Move::castling(sq(king_from), sq(king_to), color, side));
        assert_eq!(after.piece_at(sq(king_to)).map(|p| p.kind), Some(PieceKind::King));
        assert_eq!(after.piece_at(sq(rook_to)).map(|p| p.kind), Some(PieceKind::Rook));
        assert_eq!(after.piece_at(sq(king_from)), None);
        assert_eq!(after.piece_at(sq(rook_from)), None);
        assert!(!after.castling_rights().has(color, CastlingSide::Kingside));
        assert!(!after.castling_rights().has(color, CastlingSide::Queenside));
        assert!(after.castling_rights().has(!color, CastlingSide::Kingside));
    }

    #[test]
    fn rook_move_clears_only_its_side() {
        let after = assert_round_trip(
            "r3k2r/8/8/8/8/8/8/R3K2R",
            Move::new(sq("h1"), sq("h4"), Color::White),
        );
        let rights = after.castling_rights();
        assert!(!rights.has(Color::White, CastlingSide::Kingside));
        assert!(rights.has(Color::White, CastlingSide::Queenside));
        assert!(after.piece_at(sq("h4")).is_some_and(|p| p.has_moved));
    }

    #[test]
    fn capturing_corner_rook_clears_its_right() {
        let after = assert_round_trip(
            "r3k2r/8/8/8/8/8/8/R3K2R",
            Move::new(sq("h1"), sq("h8"), Color::White),
        );
        let rights = after.castling_rights();
        assert!(!rights.has(Color::Black, CastlingSide::Kingside));
        assert!(rights.has(Color::Black, CastlingSide::Queenside));
    }

    #[test]
    fn king_move_clears_both_rights() {
        let after = assert_round_trip(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPP1PPP/RNBQKBNR",
            Move::new(sq("e1"), sq("e2"), Color::White),
        );
        assert!(!after.castling_rights().has(Color::White, CastlingSide::Kingside));
        assert!(!after.castling_rights().has(Color::White, CastlingSide::Queenside));
        assert!(after.castling_rights().has(Color::Black, CastlingSide::Queenside));
    }

    #[test]
    fn apply_from_empty_square_fails() {
        let mut pos = position(STARTING_LAYOUT);
        let mut mv = Move::new(sq("e4"), sq("e5"), Color::White);
        assert_eq!(pos.apply(&mut mv), Err(EngineError::EmptySquare(sq("e4"))));
        assert!(!mv.is_applied());
    }

    #[test]
    fn undo_without_apply_fails() {
        let mut pos = position(STARTING_LAYOUT);
        let mv = Move::new(sq("e2"), sq("e3"), Color::White);
        assert_eq!(pos.undo(&mv, None), Err(EngineError::NotApplied));
    }

    #[test]
    fn black_pawns_attack_downward() {
        let pos = position("8/8/8/3p4/8/8/8/8");
        let attacked: Vec<String> = pos.attacked_by(Color::Black).iter().map(|s| s.name()).collect();
        assert_eq!(attacked, ["c4", "e4"]);

        let pos = position("8/8/8/3P4/8/8/8/8");
        let attacked: Vec<String> = pos.attacked_by(Color::White).iter().map(|s| s.name()).collect();
        assert_eq!(attacked, ["c6", "e6"]);
    }

    #[test]
    fn sliders_include_blocking_square() {
        let pos = position("8/8/8/8/8/8/8/R2n4");
        let attacked = pos.attacked_by(Color::White);
        assert!(attacked.contains(sq("b1")));
        assert!(attacked.contains(sq("d1")));
        assert!(!attacked.contains(sq("e1")));
        assert!(attacked.contains(sq("a8")));
        assert_eq!(attacked.len(), 10);
    }

    #[test]
    fn update_attacked_fields_refreshes_cache() {
        let mut pos = position("4k3/8/8/8/8/8/8/R3K3");
        assert!(pos.attacked_fields(Color::White).contains(sq("a8")));
        let mut mv = Move::new(sq("a1"), sq("b1"), Color::White);
        pos.apply(&mut mv).unwrap();
        assert!(pos.attacked_fields(Color::White).contains(sq("a8")));
        pos.update_attacked_fields();
        assert!(!pos.attacked_fields(Color::White).contains(sq("a8")));
        assert!(pos.attacked_fields(Color::White).contains(sq("b8")));
    }

    #[test]
    fn find_king_reports_missing_king() {
        let pos = position("8/8/8/8/8/8/8/4K3");
        assert_eq!(pos.find_king(Color::White), Ok(sq("e1")));
        assert_eq!(pos.find_king(Color::Black), Err(EngineError::NoKing(Color::Black)));
    }

    #[test]
    fn diff_lists_changed_state() {
        let a = position(STARTING_LAYOUT);
        let mut b = a.clone();
        let mut mv = Move::double_move(sq("e2"), sq("e4"), Color::White);
        b.apply(&mut mv).unwrap();
        let diffs = a.diff(&b);
        assert_eq!(diffs.len(), 3, "{diffs:?}");
        assert!(diffs.iter().any(|d| d.starts_with("en passant")));
        assert!(a.diff(&a.clone()).is_empty());
    }

    #[test]
    fn notation_of_moves() {
        assert_eq!(Move::new(sq("e2"), sq("e4"), Color::White).to_notation(), "e2-e4");
        assert_eq!(
            Move::with_promotion(sq("h7"), sq("h8"), Color::White, PieceKind::Queen).to_string(),
            "h7-h8=Q"
        );
    }

    #[test]
    fn display_draws_labelled_grid() {
        let text = position(STARTING_LAYOUT).to_string();
        assert!(text.starts_with("  +---+"));
        assert!(text.contains("8 | r | n | b | q | k | b | n | r |"));
        assert!(text.ends_with("    a   b   c   d   e   f   g   h"));
    }
}
