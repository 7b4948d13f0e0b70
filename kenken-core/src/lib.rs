#![forbid(unsafe_code)]
//! Data model and value-set algebra shared by the solver, generator, and
//! text-format crates: a fixed-capacity puzzle grid, a 52-slot cage table,
//! and the bitset arithmetic cage candidates are built from.

pub mod error;
pub mod puzzle;
pub mod rules;
pub mod valueset;

pub use crate::error::CoreError;
pub use crate::puzzle::{
    Cage, CellPos, GRID_CELLS, GRID_STRIDE, MAX_CAGE_CELLS, MAX_CAGES, MAX_N, Puzzle,
};
pub use crate::rules::{CageOp, Ruleset};
pub use crate::valueset::ValueSet;
