//! The height table: measured item heights keyed by original index.
//!
//! Every placement hands out a [`MeasureTicket`] carrying the table's current
//! [`Generation`]. Invalidation clears the table and bumps the generation, so a
//! measurement taken against an older layout is recognised and dropped instead of
//! polluting the next balancing pass.

use std::collections::HashMap;

/// Identifies one lifetime of the height table, between two invalidations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Proof that an index was placed during a given generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeasureTicket {
    pub generation: Generation,
    pub index: usize,
}

/// Outcome of [`HeightTable::record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measurement {
    /// Stored; the value differs from what was there before.
    Recorded,
    /// Same value as already stored.
    Unchanged,
    /// The ticket predates the last invalidation.
    StaleGeneration,
    /// The index is outside the current item sequence.
    UnknownIndex,
    /// Negative or non-finite height.
    InvalidHeight,
}

impl Measurement {
    pub fn is_accepted(self) -> bool {
        matches!(self, Measurement::Recorded | Measurement::Unchanged)
    }
}

/// Last measured height per original index.
#[derive(Debug, Clone, Default)]
pub struct HeightTable {
    heights: HashMap<usize, f32>,
    generation: Generation,
    /// Bumped whenever the stored contents change.
    revision: u64,
    item_count: usize,
}

impl HeightTable {
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            ..Self::default()
        }
    }

    /// Drop every measurement and start a new generation for `item_count` items.
    pub fn invalidate(&mut self, item_count: usize) -> Generation {
        self.heights.clear();
        self.item_count = item_count;
        self.generation = Generation(self.generation.0 + 1);
        self.revision += 1;
        self.generation
    }

    /// Store a measured height if the ticket is still valid.
    pub fn record(&mut self, ticket: MeasureTicket, height: f32) -> Measurement {
        if ticket.generation != self.generation {
            return Measurement::StaleGeneration;
        }
        if ticket.index >= self.item_count {
            return Measurement::UnknownIndex;
        }
        if !height.is_finite() || height < 0.0 {
            return Measurement::InvalidHeight;
        }
        match self.heights.insert(ticket.index, height) {
            Some(previous) if previous == height => Measurement::Unchanged,
            _ => {
                self.revision += 1;
                Measurement::Recorded
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.heights.get(&index).copied()
    }

    /// Measured height, or 0 for unmeasured items.
    pub fn height_or_zero(&self, index: usize) -> f32 {
        self.get(index).unwrap_or(0.0)
    }

    /// A ticket for `index` in the current generation.
    pub fn ticket(&self, index: usize) -> MeasureTicket {
        MeasureTicket {
            generation: self.generation,
            index,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Number of measured items.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// `(index, height)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.heights.iter().map(|(&index, &height)| (index, height))
    }
}
