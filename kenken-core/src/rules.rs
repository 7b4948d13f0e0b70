#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cage operator taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CageOp {
    Sum,
    Difference,
    Product,
    Ratio,
}

impl CageOp {
    /// `Difference` and `Ratio` only admit a clean "max known vs. max
    /// missing" candidate split for two-cell cages; larger cages of either
    /// kind are rejected under the baseline ruleset even though the
    /// candidate engine (kenken-solver) handles them generally.
    pub fn is_two_cell_only(self) -> bool {
        matches!(self, CageOp::Difference | CageOp::Ratio)
    }
}

/// Validation policy for a puzzle, threaded explicitly through validation
/// and candidate derivation rather than held as global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ruleset {
    pub two_cell_only: bool,
    pub max_cage_size: u8,
}

impl Ruleset {
    pub const fn keen_baseline() -> Self {
        Self {
            two_cell_only: true,
            max_cage_size: 8,
        }
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::keen_baseline()
    }
}
