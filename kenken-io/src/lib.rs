#![forbid(unsafe_code)]
//! The plain-text puzzle format: a whitespace grid of decimal givens and
//! alphabetic cage labels, parsed into (and printed back from) a
//! [`kenken_core::Puzzle`].

pub mod error;
pub mod parser;
pub mod printer;

pub use crate::error::IoError;
pub use crate::parser::parse;
pub use crate::printer::{print, render_unicode};
