//! Render-ready output of a masonry pass.

use crate::spacing::Spacing;

use super::heights::{Generation, MeasureTicket};

/// One item as the host should render it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutItem<T> {
    /// Position in the input sequence, before any reversal.
    pub index: usize,
    pub item: T,
    /// Space above the item: zero for the first entry of a column, the gap otherwise.
    pub leading_gap: Spacing,
    /// Present this with the measured height.
    pub ticket: MeasureTicket,
}

/// One column as the host should render it.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutColumn<T> {
    /// Space to the left: zero for the first column, the gap otherwise.
    pub leading_gap: Spacing,
    pub items: Vec<LayoutItem<T>>,
}

/// The full result: columns in left-to-right order.
#[derive(Debug, Clone, PartialEq)]
pub struct MasonryLayout<T> {
    pub columns: Vec<LayoutColumn<T>>,
    /// The resolved gap.
    pub gap: Spacing,
    /// Viewport width the pass was computed for.
    pub width: u32,
    /// Height-table generation the tickets belong to.
    pub generation: Generation,
}

impl<T> MasonryLayout<T> {
    /// Original indices per column.
    pub fn indices(&self) -> Vec<Vec<usize>> {
        self.columns
            .iter()
            .map(|column| column.items.iter().map(|entry| entry.index).collect())
            .collect()
    }

    /// Every placed item, column by column.
    pub fn items(&self) -> impl Iterator<Item = &LayoutItem<T>> {
        self.columns.iter().flat_map(|column| column.items.iter())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
