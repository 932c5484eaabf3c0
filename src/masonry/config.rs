//! Masonry configuration.

use crate::breakpoint::{BelowSmallest, BreakpointSet, NormalizedBreakpoints, Param};
use crate::spacing::Spacing;

/// Column count used when a per-breakpoint table has no match.
pub const DEFAULT_COLUMNS: i32 = 1;

/// Gap used when a per-breakpoint table has no match.
pub const DEFAULT_GAP: Spacing = Spacing::ZERO;

/// How items are distributed across columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Arrange {
    /// Item `i` goes to column `i mod C`.
    #[default]
    RoundRobin,
    /// Each item goes to the currently shortest column, using measured heights.
    ShortestColumn,
}

/// Configuration for a [`Masonry`](super::Masonry).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MasonryConfig {
    /// Named width thresholds. `None` behaves like an empty set.
    pub breakpoints: Option<BreakpointSet>,
    /// Column count; values below 1 produce no columns.
    pub columns: Param<i32>,
    /// Spacing between columns and between items in a column.
    pub gap: Param<Spacing>,
    /// Reverse the item order before assignment.
    pub reverse: bool,
    pub arrange: Arrange,
    pub below_smallest: BelowSmallest,
}

impl Default for MasonryConfig {
    fn default() -> Self {
        Self {
            breakpoints: None,
            columns: Param::Scalar(DEFAULT_COLUMNS),
            gap: Param::Scalar(DEFAULT_GAP),
            reverse: false,
            arrange: Arrange::RoundRobin,
            below_smallest: BelowSmallest::Default,
        }
    }
}

impl MasonryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the breakpoint set (builder).
    pub fn with_breakpoints(mut self, breakpoints: impl Into<BreakpointSet>) -> Self {
        self.breakpoints = Some(breakpoints.into());
        self
    }

    /// Set the column count, scalar or per breakpoint (builder).
    pub fn with_columns(mut self, columns: impl Into<Param<i32>>) -> Self {
        self.columns = columns.into();
        self
    }

    /// Set the gap, scalar or per breakpoint (builder).
    pub fn with_gap(mut self, gap: impl Into<Param<Spacing>>) -> Self {
        self.gap = gap.into();
        self
    }

    /// Set the reverse flag (builder).
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Set the arrangement mode (builder).
    pub fn with_arrange(mut self, arrange: Arrange) -> Self {
        self.arrange = arrange;
        self
    }

    /// Shorthand for `with_arrange(Arrange::ShortestColumn)`.
    pub fn balanced(self) -> Self {
        self.with_arrange(Arrange::ShortestColumn)
    }

    /// Set the below-smallest fallback policy (builder).
    pub fn with_below_smallest(mut self, policy: BelowSmallest) -> Self {
        self.below_smallest = policy;
        self
    }

    pub fn is_balanced(&self) -> bool {
        self.arrange == Arrange::ShortestColumn
    }

    /// The configured breakpoints, widest first.
    pub fn normalized_breakpoints(&self) -> NormalizedBreakpoints {
        self.breakpoints
            .as_ref()
            .map(BreakpointSet::normalize)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = MasonryConfig::new();
        assert_eq!(config.columns, Param::Scalar(1));
        assert_eq!(config.gap, Param::Scalar(Spacing::ZERO));
        assert!(!config.reverse);
        assert_eq!(config.arrange, Arrange::RoundRobin);
        assert_eq!(config.below_smallest, BelowSmallest::Default);
        assert!(config.normalized_breakpoints().is_empty());
    }

    #[test]
    fn builder_chain() {
        let config = MasonryConfig::new()
            .with_breakpoints([("sm", 600), ("lg", 1200)])
            .with_columns(Param::per_breakpoint([("sm", 2), ("lg", 4)]))
            .with_gap(Spacing::px(8.0))
            .with_reverse(true)
            .with_below_smallest(BelowSmallest::Smallest)
            .balanced();
        assert!(config.is_balanced());
        assert!(config.reverse);
        assert_eq!(config.gap, Param::Scalar(Spacing::px(8.0)));
        let names: Vec<_> = config
            .normalized_breakpoints()
            .iter()
            .map(|bp| bp.name.clone())
            .collect();
        assert_eq!(names, vec!["lg", "sm"]);
    }

    #[test]
    fn scalar_into_param() {
        let config = MasonryConfig::new().with_columns(3);
        assert_eq!(config.columns, Param::Scalar(3));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_from_json() {
        let json = r#"{
            "breakpoints": {"mobile": 0, "tablet": 900},
            "columns": {"mobile": 2, "tablet": 3},
            "gap": "1rem",
            "arrange": "shortest_column"
        }"#;
        let config: MasonryConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.columns.get("tablet"), Some(&3));
        assert_eq!(config.gap, Param::Scalar(Spacing::rem(1.0)));
        assert!(config.is_balanced());
        assert!(!config.reverse);
    }
}
