//! Spacing lengths for the gap between columns and between items.
//!
//! - [`tokenizer`]: logos lexer for `12px`, `1.5rem`, `5%`, ...
//! - [`value`]: [`Spacing`], its units, parsing and pixel resolution.

pub mod tokenizer;
pub mod value;

pub use value::{Spacing, SpacingContext, SpacingError, SpacingUnit};
