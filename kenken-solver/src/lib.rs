#![forbid(unsafe_code)]
//! The cage candidate engine, row/column pruning, and the
//! uniqueness-classifying backtracking search for Calcudoku puzzles.
//!
//! [`solve`] is the single entry point: it validates the puzzle, runs the
//! most-constrained-cell-first search to completion or to a second
//! solution (whichever comes first), and reports a [`SolveOutcome`].

pub mod candidates;
pub mod error;
pub mod search;

pub use crate::candidates::cage_candidates;
pub use crate::error::SolveError;
pub use crate::search::{Solution, SolveOutcome, solve};
pub use kenken_core::Puzzle;
pub use kenken_core::rules::Ruleset;
