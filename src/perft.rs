//! Perft: leaf-node counting over the legal move tree
//!
//! Exercises `legal_moves` together with `apply`/`undo` and compares against
//! published node counts.

use crate::board::{Move, Position};
use crate::error::EngineResult;
use crate::move_generator::MoveGenerator;
use crate::types::Color;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
    }
}

/// Count leaf nodes `depth` plies below `position`, `color` to move.
pub fn perft(position: &mut Position, depth: u32, color: Color) -> EngineResult<PerftCounts> {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return Ok(counts);
    }
    perft_recurse(&MoveGenerator::new(), position, depth, color, &mut counts)?;
    Ok(counts)
}

/// Per-root-move node counts, for locating movegen bugs
pub fn perft_divide(position: &mut Position, depth: u32, color: Color) -> EngineResult<Vec<(Move, u64)>> {
    let generator = MoveGenerator::new();
    let mut divide = Vec::new();

    for mut mv in generator.legal_moves(position, color)? {
        let captured = position.apply(&mut mv)?;
        let below = perft(position, depth.saturating_sub(1), color.opponent())?;
        position.undo(&mv, captured)?;
        divide.push((mv, below.nodes));
    }

    Ok(divide)
}

fn perft_recurse(
    generator: &MoveGenerator,
    position: &mut Position,
    depth: u32,
    color: Color,
    counts: &mut PerftCounts,
) -> EngineResult<()> {
    let moves = generator.legal_moves(position, color)?;

    if depth == 1 {
        for mv in &moves {
            let mut leaf = PerftCounts { nodes: 1, ..PerftCounts::default() };
            if mv.en_passant || position.piece_at(mv.to).is_some() {
                leaf.captures = 1;
            }
            if mv.en_passant {
                leaf.en_passant = 1;
            }
            if mv.castling.is_some() {
                leaf.castles = 1;
            }
            if mv.promotion.is_some() {
                leaf.promotions = 1;
            }
            counts.merge(leaf);
        }
        return Ok(());
    }

    for mut mv in moves {
        let captured = position.apply(&mut mv)?;
        perft_recurse(generator, position, depth - 1, color.opponent(), counts)?;
        position.undo(&mv, captured)?;
    }

    Ok(())
}
