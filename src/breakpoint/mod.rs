//! Breakpoints: named width thresholds and the parameters keyed by them.
//!
//! - [`BreakpointSet`]: caller-supplied name → width mapping.
//! - [`NormalizedBreakpoints`]: the same pairs sorted by width, widest first.
//! - [`ActiveBreakpoints`]: names whose width is at or below the current viewport width.
//! - [`Param`]: a value that is either a scalar or chosen per breakpoint.

pub mod normalized;
pub mod param;
pub mod set;

pub use normalized::{ActiveBreakpoints, Breakpoint, NormalizedBreakpoints};
pub use param::{BelowSmallest, Param};
pub use set::BreakpointSet;
