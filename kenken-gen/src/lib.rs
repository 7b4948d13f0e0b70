#![forbid(unsafe_code)]
//! Puzzle generation: a randomized Latin-square fill, cage primitives and
//! invariant-preserving mutators, and a bounded random-mutation hardening
//! loop that turns a bare solution grid into a uniquely-solvable puzzle.

pub mod cages;
pub mod error;
pub mod fill;
pub mod harden;
pub mod seed;

pub use crate::cages::Workspace;
pub use crate::error::GenError;
pub use crate::fill::generate_grid;
pub use crate::harden::{generate, harden_pass};
pub use crate::seed::rng_from_u64;
pub use kenken_core::rules::Ruleset;
pub use kenken_core::{CoreError, Puzzle};

/// The fourth external operation named by the core: an empty puzzle of the
/// given size, with no givens and no cages.
pub fn init_puzzle(n: u8) -> Result<Puzzle, CoreError> {
    Puzzle::new(n)
}
