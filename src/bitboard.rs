//! Square sets backed by a 64-bit bitboard
//!
//! Each bit represents one square in layout order (bit 0 = a8, bit 63 = h1).
//! Used for the per-color attacked-field caches.

use crate::types::Square;

/// Create a bitboard with a single bit set at the given square
#[inline]
pub const fn square_bb(sq: Square) -> u64 {
    1u64 << sq.index()
}

/// Extract and clear the least significant bit, returning its index
#[inline]
pub fn pop_lsb(bb: &mut u64) -> usize {
    let idx = bb.trailing_zeros() as usize;
    *bb &= *bb - 1;
    idx
}

/// A set of squares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SquareSet(u64);

impl SquareSet {
    pub const EMPTY: SquareSet = SquareSet(0);

    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        SquareSet(bits)
    }

    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn insert(&mut self, sq: Square) {
        self.0 |= square_bb(sq);
    }

    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        self.0 & square_bb(sq) != 0
    }

    /// Number of squares in the set
    #[inline]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> SquareSetIter {
        SquareSetIter(self.0)
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        for sq in iter {
            set.insert(sq);
        }
        set
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIter;

    fn into_iter(self) -> SquareSetIter {
        self.iter()
    }
}

/// Iterates squares in layout order.
pub struct SquareSetIter(u64);

impl Iterator for SquareSetIter {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        Square::from_index(pop_lsb(&mut self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent() {
        let e4 = Square::parse("e4").unwrap();
        let mut set = SquareSet::EMPTY;
        set.insert(e4);
        set.insert(e4);
        assert_eq!(set.len(), 1);
        assert!(set.contains(e4));
        assert!(!set.contains(Square::parse("e5").unwrap()));
    }

    #[test]
    fn iterates_in_layout_order() {
        let set: SquareSet = ["h1", "a8", "d5"]
            .iter()
            .map(|n| Square::parse(n).unwrap())
            .collect();
        let names: Vec<String> = set.iter().map(Square::name).collect();
        assert_eq!(names, ["a8", "d5", "h1"]);
    }
}
