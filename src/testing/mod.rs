//! Headless testing: the [`Harness`] and snapshot helpers.
//!
//! Use the [`Harness`] to drive resize events, layout passes and height feedback without
//! a real host. Use [`layout_to_string`] and related helpers to capture output as plain
//! text for snapshot-style assertions.

pub mod harness;
pub mod snapshot;

pub use harness::Harness;
pub use snapshot::{layout_to_string, rendered_to_grid, rendered_to_string};
