//! Headless presentation: taffy-backed column layout producing item regions and heights.

pub mod engine;

pub use engine::{ColumnLayout, ItemExtent, LayoutError, RenderedItem, RenderedLayout};
