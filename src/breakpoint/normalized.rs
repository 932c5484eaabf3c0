//! Normalized (widest-first) breakpoints and the active subset for a width.

use std::fmt;

/// A single named threshold.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Breakpoint {
    pub name: String,
    pub width: u32,
}

impl Breakpoint {
    pub fn new(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            width,
        }
    }
}

// ---------------------------------------------------------------------------
// NormalizedBreakpoints
// ---------------------------------------------------------------------------

/// Breakpoints sorted by width, widest first.
///
/// Built by [`BreakpointSet::normalize`](super::BreakpointSet::normalize). Scanning
/// front to back visits breakpoints from the most to the least specific.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedBreakpoints {
    entries: Vec<Breakpoint>,
}

impl NormalizedBreakpoints {
    /// Wrap an already-sorted list. Callers guarantee descending width order.
    pub(crate) fn from_sorted(entries: Vec<Breakpoint>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].width >= w[1].width));
        Self { entries }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Breakpoint> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The narrowest breakpoint, if any.
    pub fn smallest(&self) -> Option<&Breakpoint> {
        self.entries.last()
    }

    /// Breakpoints whose width is at or below `width`, widest first.
    pub fn active(&self, width: u32) -> ActiveBreakpoints {
        ActiveBreakpoints(
            self.entries
                .iter()
                .filter(|bp| bp.width <= width)
                .map(|bp| bp.name.clone())
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a NormalizedBreakpoints {
    type Item = &'a Breakpoint;
    type IntoIter = std::slice::Iter<'a, Breakpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ---------------------------------------------------------------------------
// ActiveBreakpoints
// ---------------------------------------------------------------------------

/// Names of the breakpoints in effect at some width, widest first.
///
/// The first name is the "current" breakpoint. Two observations with equal active
/// lists resolve every parameter identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ActiveBreakpoints(Vec<String>);

impl ActiveBreakpoints {
    /// The widest breakpoint in effect.
    pub fn current(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when the viewport is narrower than every breakpoint.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ActiveBreakpoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}
