//! Core type definitions and constants
//!
//! Colors, piece kinds, squares and castling rights. Squares are stored
//! row-major in the same order as the layout string: row 0 is the first
//! rank group (rank 8), row 7 is White's back rank.

use std::fmt;

/// File and rank names for move notation
pub const FILE_NAMES: &[u8; 8] = b"abcdefgh";
pub const RANK_NAMES: &[u8; 8] = b"12345678";

/// The two sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Index for array lookups: White=0, Black=1.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a pawn step. White advances toward row 0.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row of this color's pieces at the start of a game
    #[inline]
    pub const fn back_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    #[inline]
    pub const fn pawn_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row on which this color's pawns promote
    #[inline]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;
    fn not(self) -> Self {
        self.opponent()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, 1), (-2, -1), (-1, 2), (1, 2), (2, 1), (2, -1), (-1, -2), (1, -2),
];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, 1), (-1, -1), (1, 1), (1, -1)];
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];
const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0), (0, 1), (1, 0), (0, -1), (-1, 1), (-1, -1), (1, 1), (1, -1),
];
const WHITE_PAWN_ATTACKS: [(i8, i8); 2] = [(-1, 1), (-1, -1)];
const BLACK_PAWN_ATTACKS: [(i8, i8); 2] = [(1, 1), (1, -1)];

/// The six piece kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Promotion choices in generation order.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Index for array lookups: Pawn=0 .. King=5.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Sliding pieces repeat their offsets until blocked; the rest step once.
    #[inline]
    pub const fn slides(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    /// (row, file) deltas this kind attacks along. Pawns attack diagonally
    /// forward only, which depends on color.
    pub const fn attack_offsets(self, color: Color) -> &'static [(i8, i8)] {
        match self {
            PieceKind::Pawn => match color {
                Color::White => &WHITE_PAWN_ATTACKS,
                Color::Black => &BLACK_PAWN_ATTACKS,
            },
            PieceKind::Knight => &KNIGHT_OFFSETS,
            PieceKind::Bishop => &BISHOP_DIRECTIONS,
            PieceKind::Rook => &ROOK_DIRECTIONS,
            PieceKind::Queen | PieceKind::King => &QUEEN_DIRECTIONS,
        }
    }

    /// Lowercase placement letter
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Parse a placement letter, ignoring case.
    pub fn from_letter(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A piece on the board. `has_moved` is only tracked for rooks and kings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub has_moved: bool,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece { kind, color, has_moved: false }
    }

    /// Placement character: uppercase for White, lowercase for Black.
    pub fn to_char(self) -> char {
        let c = self.kind.letter();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_letter(c)?;
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        Some(Piece::new(kind, color))
    }
}

/// A board square, row-major from the top of the layout string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Build a square from row and file, both `0..8`.
    pub const fn new(row: u8, file: u8) -> Option<Square> {
        if row < 8 && file < 8 {
            Some(Square(row * 8 + file))
        } else {
            None
        }
    }

    pub const fn from_index(index: usize) -> Option<Square> {
        if index < 64 {
            Some(Square(index as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Chess rank, 1..=8
    #[inline]
    pub const fn rank(self) -> u8 {
        8 - self.row()
    }

    /// Step by a (row, file) delta, `None` when leaving the board.
    #[inline]
    pub fn offset(self, d_row: i8, d_file: i8) -> Option<Square> {
        let row = self.row() as i8 + d_row;
        let file = self.file() as i8 + d_file;
        if (0..8).contains(&row) && (0..8).contains(&file) {
            Some(Square((row * 8 + file) as u8))
        } else {
            None
        }
    }

    /// Same square seen from the other side of the board
    #[inline]
    pub const fn mirrored(self) -> Square {
        Square((7 - self.row()) * 8 + self.file())
    }

    /// Iterate all squares in layout order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }

    /// Algebraic name, e.g. "e4"
    pub fn name(self) -> String {
        format!(
            "{}{}",
            FILE_NAMES[self.file() as usize] as char,
            RANK_NAMES[self.rank() as usize - 1] as char
        )
    }

    /// Parse algebraic notation ("a1".."h8").
    pub fn parse(name: &str) -> Option<Square> {
        let mut chars = name.chars();
        let file = match chars.next()? {
            c @ 'a'..='h' => c as u8 - b'a',
            _ => return None,
        };
        let rank = match chars.next()? {
            c @ '1'..='8' => c as u8 - b'0',
            _ => return None,
        };
        if chars.next().is_some() {
            return None;
        }
        Square::new(8 - rank, file)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    Kingside,
    Queenside,
}

impl CastlingSide {
    pub const BOTH: [CastlingSide; 2] = [CastlingSide::Kingside, CastlingSide::Queenside];

    /// File of the rook that takes part in castling on this side
    #[inline]
    pub const fn rook_file(self) -> u8 {
        match self {
            CastlingSide::Kingside => 7,
            CastlingSide::Queenside => 0,
        }
    }

    /// File direction the king travels
    #[inline]
    pub const fn direction(self) -> i8 {
        match self {
            CastlingSide::Kingside => 1,
            CastlingSide::Queenside => -1,
        }
    }
}

/// Castling rights bitmasks
pub const CASTLE_WK: u8 = 1;
pub const CASTLE_WQ: u8 = 2;
pub const CASTLE_BK: u8 = 4;
pub const CASTLE_BQ: u8 = 8;

/// Per-color kingside/queenside castling permissions.
///
/// Rights only ever get cleared while playing; `undo` is the one place they
/// come back, by restoring a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights(CASTLE_WK | CASTLE_WQ | CASTLE_BK | CASTLE_BQ);
    pub const NONE: CastlingRights = CastlingRights(0);

    const fn mask(color: Color, side: CastlingSide) -> u8 {
        match (color, side) {
            (Color::White, CastlingSide::Kingside) => CASTLE_WK,
            (Color::White, CastlingSide::Queenside) => CASTLE_WQ,
            (Color::Black, CastlingSide::Kingside) => CASTLE_BK,
            (Color::Black, CastlingSide::Queenside) => CASTLE_BQ,
        }
    }

    #[inline]
    pub const fn has(self, color: Color, side: CastlingSide) -> bool {
        self.0 & Self::mask(color, side) != 0
    }

    #[inline]
    pub fn clear(&mut self, color: Color, side: CastlingSide) {
        self.0 &= !Self::mask(color, side);
    }

    pub fn clear_color(&mut self, color: Color) {
        self.clear(color, CastlingSide::Kingside);
        self.clear(color, CastlingSide::Queenside);
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        CastlingRights::ALL
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("-");
        }
        if self.0 & CASTLE_WK != 0 { f.write_str("K")?; }
        if self.0 & CASTLE_WQ != 0 { f.write_str("Q")?; }
        if self.0 & CASTLE_BK != 0 { f.write_str("k")?; }
        if self.0 & CASTLE_BQ != 0 { f.write_str("q")?; }
        Ok(())
    }
}
