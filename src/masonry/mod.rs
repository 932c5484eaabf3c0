//! Column assignment and the controller that drives it.
//!
//! - [`config`]: [`MasonryConfig`] and [`Arrange`].
//! - [`heights`]: [`HeightTable`], generations and measure tickets.
//! - [`assign`]: round-robin and shortest-column-first distribution.
//! - [`controller`]: [`Masonry`]: resolution, invalidation, layout output.
//! - [`binding`]: keeps a [`Masonry`] in sync with a reactive viewport.

pub mod assign;
pub mod binding;
pub mod config;
pub mod controller;
pub mod heights;
pub mod output;

pub use assign::{assign, column_count, indices, Column, Placed};
pub use binding::MasonryBinding;
pub use config::{Arrange, MasonryConfig, DEFAULT_COLUMNS, DEFAULT_GAP};
pub use controller::Masonry;
pub use heights::{Generation, HeightTable, MeasureTicket, Measurement};
pub use output::{LayoutColumn, LayoutItem, MasonryLayout};
