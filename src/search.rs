//! Search Engine Module
//!
//! Fixed-depth minimax with alpha-beta pruning over a single mutable
//! position. Every node applies a move, recurses, and undoes it before
//! trying the next sibling, so no state leaks between branches.
//!
//! Scores are White-positive: White maximizes, Black minimizes.

use log::{debug, trace};

use crate::board::{Move, Position};
use crate::config::{check_depth, EngineConfig};
use crate::error::{EngineError, EngineResult};
use crate::evaluation::evaluate_with;
use crate::move_generator::MoveGenerator;
use crate::types::Color;

/// Deepest supported search, in plies
pub const MAX_DEPTH: u32 = 7;

/// Bound larger than any reachable evaluation
pub const INFINITY: i32 = 1_000_000;

/// Result of a root search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best_move: Move,
    /// Score of the position after `best_move`, White-positive
    pub score: i32,
    /// Nodes visited below the root
    pub nodes: u64,
}

#[derive(Debug, Default)]
pub struct SearchEngine {
    move_generator: MoveGenerator,
    config: EngineConfig,
    nodes_searched: u64,
}

impl SearchEngine {
    pub fn new(config: EngineConfig) -> Self {
        SearchEngine {
            move_generator: MoveGenerator::new(),
            config,
            nodes_searched: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Nodes visited by the most recent `find_best_move`
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    /// Static evaluation using the configured mobility mode
    pub fn evaluate(&self, position: &Position) -> i32 {
        evaluate_with(position, self.config.mobility)
    }

    /// Pick the best move for `color`, searching `depth` plies.
    ///
    /// Each root move is scored by searching the reply tree at `depth - 1`
    /// (depth 0 and 1 both score the position right after the move). Ties
    /// keep the first move generated. Fails with `InvalidDepth` outside
    /// `0..=MAX_DEPTH`, `NoKing` when `color` has no king and `NoLegalMoves`
    /// when there is nothing to play.
    pub fn find_best_move(
        &mut self,
        position: &mut Position,
        depth: u32,
        color: Color,
    ) -> EngineResult<SearchOutcome> {
        check_depth(depth)?;
        self.nodes_searched = 0;

        let maximizing = color == Color::White;
        let moves = self.move_generator.legal_moves(position, color)?;
        debug!("{} legal moves for {color} at depth {depth}", moves.len());

        let child_depth = depth.saturating_sub(1);
        let mut alpha = -INFINITY;
        let mut beta = INFINITY;
        let mut best: Option<(Move, i32)> = None;

        for mv in moves {
            let mut applied = mv;
            let captured = position.apply(&mut applied)?;
            let score = self.minimax(position, child_depth, !maximizing, color.opponent(), alpha, beta);
            position.undo(&applied, captured)?;
            let score = score?;

            debug!("root move {mv}: {score}");

            let improves = match best {
                None => true,
                Some((_, best_score)) if maximizing => score > best_score,
                Some((_, best_score)) => score < best_score,
            };
            if improves {
                best = Some((mv, score));
                if maximizing {
                    alpha = score;
                } else {
                    beta = score;
                }
            }
        }

        let (best_move, score) = best.ok_or(EngineError::NoLegalMoves(color))?;
        debug!(
            "best move {best_move} score {score} depth {depth} nodes {}",
            self.nodes_searched
        );

        Ok(SearchOutcome {
            best_move,
            score,
            nodes: self.nodes_searched,
        })
    }

    /// Minimax value of `position` with `color` to move.
    ///
    /// Leaves are depth 0, positions without legal moves (mate and stalemate
    /// alike) and positions where `color` has no king; all score statically.
    /// Returns the fail-soft value within the `alpha`/`beta` window.
    pub fn minimax(
        &mut self,
        position: &mut Position,
        depth: u32,
        maximizing: bool,
        color: Color,
        mut alpha: i32,
        mut beta: i32,
    ) -> EngineResult<i32> {
        self.nodes_searched += 1;

        if depth == 0 {
            return Ok(self.evaluate(position));
        }

        let moves = match self.move_generator.legal_moves(position, color) {
            Ok(moves) => moves,
            Err(EngineError::NoKing(missing)) => {
                trace!("no {missing} king, scoring leaf statically");
                return Ok(self.evaluate(position));
            }
            Err(err) => return Err(err),
        };

        if moves.is_empty() {
            return Ok(self.evaluate(position));
        }

        let mut value = if maximizing { -INFINITY } else { INFINITY };

        for mut mv in moves {
            let captured = position.apply(&mut mv)?;
            let score = self.minimax(position, depth - 1, !maximizing, color.opponent(), alpha, beta);
            position.undo(&mv, captured)?;
            let score = score?;

            if maximizing {
                value = value.max(score);
                alpha = alpha.max(value);
            } else {
                value = value.min(score);
                beta = beta.min(value);
            }

            if self.config.alpha_beta && beta <= alpha {
                trace!("cutoff after {mv} at depth {depth}");
                break;
            }
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::STARTING_LAYOUT;
    use crate::types::Square;

    fn position(layout: &str) -> Position {
        Position::from_layout(layout).expect("valid layout")
    }

    fn sq(name: &str) -> Square {
        Square::parse(name).expect("valid square")
    }

    #[test]
    fn rejects_depth_past_max() {
        let mut pos = position(STARTING_LAYOUT);
        let mut engine = SearchEngine::default();
        assert_eq!(
            engine.find_best_move(&mut pos, MAX_DEPTH + 1, Color::White),
            Err(EngineError::InvalidDepth { depth: 8, max: 7 })
        );
    }

    #[test]
    fn white_takes_hanging_queen() {
        let mut pos = position("4k3/8/8/3q4/8/8/8/3RK3");
        let outcome = SearchEngine::default()
            .find_best_move(&mut pos, 1, Color::White)
            .unwrap();
        assert_eq!(outcome.best_move.from, sq("d1"));
        assert_eq!(outcome.best_move.to, sq("d5"));
        assert!(outcome.score > 0);
    }

    #[test]
    fn black_takes_hanging_rook() {
        let mut pos = position("4k3/8/8/3r4/8/8/8/3QK3");
        let mut engine = SearchEngine::default();
        let outcome = engine.find_best_move(&mut pos, 2, Color::Black).unwrap();
        assert_eq!(outcome.best_move.to_notation(), "d5-d1");
    }

    #[test]
    fn search_leaves_position_unchanged() {
        let mut pos = position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R");
        let before = pos.clone();
        SearchEngine::default().find_best_move(&mut pos, 2, Color::White).unwrap();
        assert!(pos == before, "{:?}", pos.diff(&before));
    }

    #[test]
    fn stalemated_side_has_no_move() {
        let mut pos = position("7k/5Q2/6K1/8/8/8/8/8");
        assert_eq!(
            SearchEngine::default().find_best_move(&mut pos, 2, Color::Black),
            Err(EngineError::NoLegalMoves(Color::Black))
        );
    }

    #[test]
    fn missing_king_fails_at_root() {
        let mut pos = position("4k3/8/8/8/8/8/8/R7");
        assert_eq!(
            SearchEngine::default().find_best_move(&mut pos, 1, Color::White),
            Err(EngineError::NoKing(Color::White))
        );
    }

    #[test]
    fn missing_opponent_king_is_a_leaf() {
        let mut pos = position("8/8/8/8/8/8/8/R3K3");
        let outcome = SearchEngine::default()
            .find_best_move(&mut pos, 3, Color::White)
            .unwrap();
        assert_eq!(outcome.best_move.color, Color::White);
    }

    #[test]
    fn pruning_visits_no_more_nodes() {
        let layout = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R";
        let mut pos = position(layout);

        let mut pruned = SearchEngine::default();
        let a = pruned.find_best_move(&mut pos, 3, Color::White).unwrap();

        let mut full = SearchEngine::new(EngineConfig { alpha_beta: false, ..EngineConfig::default() });
        let b = full.find_best_move(&mut pos, 3, Color::White).unwrap();

        assert_eq!((a.best_move, a.score), (b.best_move, b.score));
        assert!(a.nodes <= b.nodes);
        assert_eq!(pruned.nodes_searched(), a.nodes);
    }

    #[test]
    fn node_counter_resets_per_search() {
        let mut pos = position(STARTING_LAYOUT);
        let mut engine = SearchEngine::default();
        let first = engine.find_best_move(&mut pos, 1, Color::White).unwrap();
        let second = engine.find_best_move(&mut pos, 1, Color::White).unwrap();
        assert_eq!(first.nodes, 20);
        assert_eq!(second.nodes, 20);
    }
}
