//! The masonry controller.
//!
//! Holds configuration, the observed viewport, the items and the height table. Width and
//! breakpoint observations arrive through [`Masonry::apply_width`] and
//! [`Masonry::apply_active`] (or [`Masonry::set_viewport_width`] for both at once);
//! [`Masonry::layout`] then assigns items to columns with the current resolution.

use std::cell::Cell;

use crate::breakpoint::{ActiveBreakpoints, NormalizedBreakpoints};
use crate::spacing::Spacing;

use super::assign::{assign, column_count};
use super::config::{MasonryConfig, DEFAULT_COLUMNS, DEFAULT_GAP};
use super::heights::{HeightTable, MeasureTicket, Measurement};
use super::output::{LayoutColumn, LayoutItem, MasonryLayout};

/// Responsive multi-column layout state for items of type `T`.
#[derive(Debug)]
pub struct Masonry<T> {
    config: MasonryConfig,
    breakpoints: NormalizedBreakpoints,
    width: u32,
    active: ActiveBreakpoints,
    columns: usize,
    gap: Spacing,
    items: Vec<T>,
    heights: HeightTable,
    /// Height-table revision used by the last `layout` call.
    assigned_revision: Cell<Option<u64>>,
}

impl<T> Masonry<T> {
    /// Create a controller observing `width`, with no items.
    pub fn new(config: MasonryConfig, width: u32) -> Self {
        let breakpoints = config.normalized_breakpoints();
        let active = breakpoints.active(width);
        let mut masonry = Self {
            config,
            breakpoints,
            width,
            active,
            columns: 0,
            gap: DEFAULT_GAP,
            items: Vec::new(),
            heights: HeightTable::new(0),
            assigned_revision: Cell::new(None),
        };
        masonry.resolve();
        masonry
    }

    /// Replace the configuration. Clears the height table.
    pub fn set_config(&mut self, config: MasonryConfig) {
        self.breakpoints = config.normalized_breakpoints();
        self.config = config;
        self.active = self.breakpoints.active(self.width);
        self.resolve();
        self.invalidate("config changed");
    }

    /// Replace the item sequence. Clears the height table.
    pub fn set_items(&mut self, items: impl Into<Vec<T>>) {
        self.items = items.into();
        self.invalidate("items changed");
    }

    /// Observe a new width, deriving the active breakpoints from this controller's own
    /// breakpoint set. Returns whether anything changed.
    pub fn set_viewport_width(&mut self, width: u32) -> bool {
        let active = self.breakpoints.active(width);
        let active_changed = self.apply_active(active);
        let width_changed = self.apply_width(width);
        active_changed || width_changed
    }

    /// Observe a new active-breakpoint list. Re-resolves columns and gap; a changed
    /// column count clears the height table. Returns whether the list changed.
    pub fn apply_active(&mut self, active: ActiveBreakpoints) -> bool {
        if active == self.active {
            return false;
        }
        self.active = active;
        let (columns, gap) = (self.columns, self.gap);
        self.resolve();
        if self.columns != columns || self.gap != gap {
            tracing::debug!(
                target: "masonry_columns::masonry",
                active = %self.active,
                columns = self.columns,
                gap = %self.gap,
                "resolution changed"
            );
        }
        if self.columns != columns {
            self.invalidate("column count changed");
        }
        true
    }

    /// Observe a new raw width. Any change clears the height table.
    pub fn apply_width(&mut self, width: u32) -> bool {
        if width == self.width {
            return false;
        }
        self.width = width;
        self.invalidate("width changed");
        true
    }

    fn resolve(&mut self) {
        let policy = self.config.below_smallest;
        let columns = self.config.columns.resolve_observed(
            &self.active,
            &self.breakpoints,
            DEFAULT_COLUMNS,
            policy,
        );
        self.columns = column_count(columns);
        self.gap = self
            .config
            .gap
            .resolve_observed(&self.active, &self.breakpoints, DEFAULT_GAP, policy);
    }

    fn invalidate(&mut self, reason: &'static str) {
        let generation = self.heights.invalidate(self.items.len());
        tracing::debug!(
            target: "masonry_columns::masonry",
            reason,
            generation = generation.get(),
            "height table invalidated"
        );
    }

    /// Report a rendered item's height.
    pub fn record_height(&mut self, ticket: MeasureTicket, height: f32) -> Measurement {
        let outcome = self.heights.record(ticket, height);
        tracing::trace!(
            target: "masonry_columns::masonry",
            index = ticket.index,
            height,
            ?outcome,
            "height measured"
        );
        outcome
    }

    /// Whether balancing is on and measurements changed since the last [`layout`](Self::layout).
    pub fn needs_rearrange(&self) -> bool {
        self.config.is_balanced() && self.assigned_revision.get() != Some(self.heights.revision())
    }

    /// Assign the current items to columns.
    pub fn layout(&self) -> MasonryLayout<&T> {
        let assigned = assign(
            &self.items,
            self.columns,
            self.config.reverse,
            self.config.arrange,
            &self.heights,
        );
        self.assigned_revision.set(Some(self.heights.revision()));

        let columns = assigned
            .into_iter()
            .enumerate()
            .map(|(col, placed)| LayoutColumn {
                leading_gap: if col == 0 { Spacing::ZERO } else { self.gap },
                items: placed
                    .into_iter()
                    .enumerate()
                    .map(|(row, entry)| LayoutItem {
                        index: entry.index,
                        item: entry.item,
                        leading_gap: if row == 0 { Spacing::ZERO } else { self.gap },
                        ticket: self.heights.ticket(entry.index),
                    })
                    .collect(),
            })
            .collect();

        MasonryLayout {
            columns,
            gap: self.gap,
            width: self.width,
            generation: self.heights.generation(),
        }
    }

    /// Resolved column count.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Resolved gap.
    pub fn gap(&self) -> Spacing {
        self.gap
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn active(&self) -> &ActiveBreakpoints {
        &self.active
    }

    /// The normalized breakpoints of the current configuration.
    pub fn breakpoints(&self) -> &NormalizedBreakpoints {
        &self.breakpoints
    }

    pub fn config(&self) -> &MasonryConfig {
        &self.config
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn heights(&self) -> &HeightTable {
        &self.heights
    }
}
