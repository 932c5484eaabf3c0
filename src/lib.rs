//! # masonry-columns
//!
//! Responsive masonry layout for Rust UI hosts: distributes an ordered list of items into a
//! breakpoint-driven number of columns, with optional height balancing driven by measured
//! item heights.
//!
//! The crate is host-agnostic. Items are opaque values; the host renders them, reports
//! measured heights back, and feeds viewport width changes through a [`viewport`] source.
//! A headless [`layout`] pass built on taffy is included for hosts (and tests) that do not
//! have their own renderer.
//!
//! ## Core Systems
//!
//! - **[`breakpoint`]**: Breakpoint sets, normalization, scalar-or-per-breakpoint parameters
//! - **[`masonry`]**: Column assignment, height table, and the [`Masonry`](masonry::Masonry) controller
//! - **[`viewport`]**: Width signal sources (synthetic, terminal, channel) and the resize adapter
//! - **[`reactive`]**: Signals, effects, memos (Leptos-style auto-tracking)
//! - **[`spacing`]**: CSS-like spacing lengths (`12px`, `1.5rem`, `5%`) and pixel resolution
//! - **[`layout`]**: Taffy-powered headless render pass producing item regions and heights
//! - **[`testing`]**: Headless harness and text snapshots
//! - **[`geometry`]**: Region primitive
//!
//! ## Example
//!
//! ```ignore
//! use masonry_columns::breakpoint::{BreakpointSet, Param};
//! use masonry_columns::masonry::{Masonry, MasonryConfig};
//!
//! let config = MasonryConfig::new()
//!     .with_breakpoints(BreakpointSet::standard())
//!     .with_columns(Param::per_breakpoint([("xs", 1), ("sm", 2), ("md", 3)]));
//! let mut masonry = Masonry::new(config, 1024);
//! masonry.set_items(vec!["a", "b", "c", "d"]);
//! let layout = masonry.layout();
//! assert_eq!(layout.columns.len(), 3);
//! ```

// Foundation
pub mod geometry;
pub mod spacing;

// Core
pub mod breakpoint;
pub mod masonry;

// Signals and reactivity
pub mod reactive;
pub mod viewport;

// Presentation
pub mod layout;

// Headless testing
pub mod testing;
