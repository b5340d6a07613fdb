//! Engine configuration
//!
//! Tunable search and evaluation knobs, range-checked before a search runs.

use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};
use crate::search::MAX_DEPTH;

/// How the evaluation counts attacked squares
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MobilityMode {
    /// Each scanned non-king piece adds its side's full attacked-square
    /// count, so the term grows with the number of pieces on the board.
    #[default]
    PerOccupiedSquare,
    /// Attacked-square counts are added once per side.
    PerSide,
}

impl FromStr for MobilityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "per-square" => Ok(MobilityMode::PerOccupiedSquare),
            "per-side" => Ok(MobilityMode::PerSide),
            other => Err(format!("unknown mobility mode '{other}' (expected per-square or per-side)")),
        }
    }
}

impl fmt::Display for MobilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MobilityMode::PerOccupiedSquare => f.write_str("per-square"),
            MobilityMode::PerSide => f.write_str("per-side"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Default search depth in plies
    pub depth: u32,
    pub mobility: MobilityMode,
    /// Cut off branches once `beta <= alpha`; `false` runs plain minimax
    pub alpha_beta: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            depth: 3,
            mobility: MobilityMode::default(),
            alpha_beta: true,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> EngineResult<()> {
        check_depth(self.depth)
    }
}

/// Reject depths outside `0..=MAX_DEPTH`
pub fn check_depth(depth: u32) -> EngineResult<()> {
    if depth > MAX_DEPTH {
        return Err(EngineError::InvalidDepth { depth, max: MAX_DEPTH });
    }
    Ok(())
}
