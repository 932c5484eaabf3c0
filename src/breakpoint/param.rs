//! Scalar-or-per-breakpoint parameters and their resolution.
//!
//! A [`Param`] is either a bare value that applies at every width, or a table keyed by
//! breakpoint name. Resolution walks the breakpoints widest first and takes the first one
//! that is both in effect (width at or below the viewport) and has an entry in the table.

use std::collections::HashMap;

use super::normalized::{ActiveBreakpoints, NormalizedBreakpoints};

/// What to return when the viewport is narrower than every breakpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum BelowSmallest {
    /// Use the caller's default value.
    #[default]
    Default,
    /// Use the entry of the narrowest breakpoint that has one.
    Smallest,
}

/// A value that is either fixed or chosen by the active breakpoint.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Param<T> {
    Scalar(T),
    PerBreakpoint(HashMap<String, T>),
}

impl<T> Param<T> {
    pub fn scalar(value: T) -> Self {
        Param::Scalar(value)
    }

    /// Build a per-breakpoint table from `(name, value)` pairs.
    pub fn per_breakpoint<K: Into<String>>(pairs: impl IntoIterator<Item = (K, T)>) -> Self {
        Param::PerBreakpoint(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Param::Scalar(_))
    }

    /// The entry for a breakpoint name. Scalars have no per-name entries.
    pub fn get(&self, name: &str) -> Option<&T> {
        match self {
            Param::Scalar(_) => None,
            Param::PerBreakpoint(map) => map.get(name),
        }
    }
}

impl<T: Clone> Param<T> {
    /// Resolve against the full breakpoint list at `width`.
    pub fn resolve(
        &self,
        breakpoints: &NormalizedBreakpoints,
        width: u32,
        default: T,
        policy: BelowSmallest,
    ) -> T {
        let map = match self {
            Param::Scalar(value) => return value.clone(),
            Param::PerBreakpoint(map) => map,
        };

        let in_effect = breakpoints.iter().filter(|bp| bp.width <= width);
        if let Some(value) = first_entry(map, in_effect.clone().map(|bp| bp.name.as_str())) {
            return value.clone();
        }

        let below_all = in_effect.count() == 0;
        fallback(map, breakpoints, below_all, default, policy)
    }

    /// Resolve against a list of breakpoints already known to be in effect.
    ///
    /// Equivalent to [`resolve`](Self::resolve) when `active` was computed from
    /// `breakpoints` at the same width.
    pub fn resolve_observed(
        &self,
        active: &ActiveBreakpoints,
        breakpoints: &NormalizedBreakpoints,
        default: T,
        policy: BelowSmallest,
    ) -> T {
        match self {
            Param::Scalar(value) => value.clone(),
            Param::PerBreakpoint(map) => match first_entry(map, active.iter()) {
                Some(value) => value.clone(),
                None => fallback(map, breakpoints, active.is_empty(), default, policy),
            },
        }
    }

    /// Resolve against an active list with the default fallback policy.
    pub fn resolve_active(&self, active: &ActiveBreakpoints, default: T) -> T {
        match self {
            Param::Scalar(value) => value.clone(),
            Param::PerBreakpoint(map) => first_entry(map, active.iter())
                .cloned()
                .unwrap_or(default),
        }
    }
}

impl<T> From<T> for Param<T> {
    fn from(value: T) -> Self {
        Param::Scalar(value)
    }
}

impl<T: Default> Default for Param<T> {
    fn default() -> Self {
        Param::Scalar(T::default())
    }
}

fn first_entry<'a, 'n, T>(
    map: &'a HashMap<String, T>,
    mut names: impl Iterator<Item = &'n str>,
) -> Option<&'a T> {
    names.find_map(|name| map.get(name))
}

fn fallback<T: Clone>(
    map: &HashMap<String, T>,
    breakpoints: &NormalizedBreakpoints,
    below_all: bool,
    default: T,
    policy: BelowSmallest,
) -> T {
    match policy {
        BelowSmallest::Smallest if below_all => {
            first_entry(map, breakpoints.iter().rev().map(|bp| bp.name.as_str()))
                .cloned()
                .unwrap_or(default)
        }
        _ => default,
    }
}
