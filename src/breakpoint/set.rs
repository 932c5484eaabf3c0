//! BreakpointSet: caller-supplied name → width thresholds.

use super::normalized::{Breakpoint, NormalizedBreakpoints};

/// A mapping from breakpoint name to the minimum viewport width at which it applies.
///
/// Keys are unique. Insertion order is kept so that breakpoints sharing a width
/// normalize into the same order every time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakpointSet {
    entries: Vec<(String, u32)>,
}

impl BreakpointSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The conventional five-step scale: `xs` 0, `sm` 600, `md` 960, `lg` 1280, `xl` 1920.
    pub fn standard() -> Self {
        Self::from_keys(["xs", "sm", "md", "lg", "xl"], [0, 600, 960, 1280, 1920])
    }

    /// Zip a list of names with a list of widths.
    ///
    /// Pairs are formed positionally; surplus names or widths are ignored.
    pub fn from_keys<K: Into<String>>(
        keys: impl IntoIterator<Item = K>,
        widths: impl IntoIterator<Item = u32>,
    ) -> Self {
        keys.into_iter().zip(widths).collect()
    }

    /// Add or replace a breakpoint (builder).
    pub fn with(mut self, name: impl Into<String>, width: u32) -> Self {
        self.insert(name, width);
        self
    }

    /// Insert a breakpoint, returning the previous width if the name existed.
    ///
    /// Replacing keeps the original insertion position.
    pub fn insert(&mut self, name: impl Into<String>, width: u32) -> Option<u32> {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, w)) => Some(std::mem::replace(w, width)),
            None => {
                self.entries.push((name, width));
                None
            }
        }
    }

    /// Remove a breakpoint by name.
    pub fn remove(&mut self, name: &str) -> Option<u32> {
        let pos = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(pos).1)
    }

    /// Width of the named breakpoint.
    pub fn get(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, w)| *w)
    }

    /// Number of breakpoints.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no breakpoints.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, width)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(n, w)| (n.as_str(), *w))
    }

    /// Sort into descending-width order.
    ///
    /// The sort is stable: breakpoints with equal widths stay in insertion order.
    pub fn normalize(&self) -> NormalizedBreakpoints {
        let mut sorted: Vec<Breakpoint> = self
            .entries
            .iter()
            .map(|(name, width)| Breakpoint::new(name.clone(), *width))
            .collect();
        sorted.sort_by(|a, b| b.width.cmp(&a.width));
        NormalizedBreakpoints::from_sorted(sorted)
    }
}

impl<K: Into<String>> FromIterator<(K, u32)> for BreakpointSet {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        let mut set = BreakpointSet::new();
        for (name, width) in iter {
            set.insert(name, width);
        }
        set
    }
}

impl<K: Into<String>, const N: usize> From<[(K, u32); N]> for BreakpointSet {
    fn from(pairs: [(K, u32); N]) -> Self {
        pairs.into_iter().collect()
    }
}

// ---------------------------------------------------------------------------
// serde: a JSON object, order preserved
// ---------------------------------------------------------------------------

#[cfg(feature = "serde")]
mod serde_impl {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::BreakpointSet;

    impl Serialize for BreakpointSet {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.entries.len()))?;
            for (name, width) in &self.entries {
                map.serialize_entry(name, width)?;
            }
            map.end()
        }
    }

    struct SetVisitor;

    impl<'de> Visitor<'de> for SetVisitor {
        type Value = BreakpointSet;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of breakpoint names to non-negative widths")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut set = BreakpointSet::new();
            while let Some((name, width)) = access.next_entry::<String, u32>()? {
                set.insert(name, width);
            }
            Ok(set)
        }
    }

    impl<'de> Deserialize<'de> for BreakpointSet {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(SetVisitor)
        }
    }
}
