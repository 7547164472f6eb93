//! Capability markers
//!
//! A capability marker says "this functionality is loadable at runtime".
//! The host hands a [`CapabilitySource`] to the evaluator instead of letting
//! it inspect the process itself, so absence can be simulated by wrapping a
//! source in [`FilteredCapabilities`].

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A named runtime capability.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Capability(String);

impl Capability {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Capability {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Query interface for capability presence.
pub trait CapabilitySource: Send + Sync {
    /// Whether the capability is available.
    fn is_present(&self, capability: &Capability) -> bool;

    /// Every capability this source reports as present.
    fn markers(&self) -> CapabilitySet;
}

/// Ordered set of present capabilities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet {
    markers: BTreeSet<Capability>,
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a marker, builder style.
    pub fn with(mut self, capability: impl Into<Capability>) -> Self {
        self.insert(capability);
        self
    }

    pub fn insert(&mut self, capability: impl Into<Capability>) -> bool {
        self.markers.insert(capability.into())
    }

    /// Copy of this set with the given markers removed.
    pub fn without<I, C>(&self, hidden: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Capability>,
    {
        let mut markers = self.markers.clone();
        for capability in hidden {
            markers.remove(&capability.into());
        }
        Self { markers }
    }

    pub fn contains(&self, capability: &Capability) -> bool {
        self.markers.contains(capability)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.markers.iter()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl<C: Into<Capability>> FromIterator<C> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self {
            markers: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl CapabilitySource for CapabilitySet {
    fn is_present(&self, capability: &Capability) -> bool {
        self.contains(capability)
    }

    fn markers(&self) -> CapabilitySet {
        self.clone()
    }
}

/// Wraps another source and hides a fixed set of markers.
pub struct FilteredCapabilities {
    inner: Arc<dyn CapabilitySource>,
    hidden: BTreeSet<Capability>,
}

impl FilteredCapabilities {
    pub fn new<I, C>(inner: Arc<dyn CapabilitySource>, hidden: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Capability>,
    {
        Self {
            inner,
            hidden: hidden.into_iter().map(Into::into).collect(),
        }
    }
}

impl CapabilitySource for FilteredCapabilities {
    fn is_present(&self, capability: &Capability) -> bool {
        !self.hidden.contains(capability) && self.inner.is_present(capability)
    }

    fn markers(&self) -> CapabilitySet {
        self.inner.markers().without(self.hidden.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_leaves_original_untouched() {
        let set: CapabilitySet = ["graph.driver", "health.status"].into_iter().collect();
        let filtered = set.without(["graph.driver"]);

        assert!(set.contains(&Capability::new("graph.driver")));
        assert!(!filtered.contains(&Capability::new("graph.driver")));
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_filtered_source_hides_markers() {
        let base: Arc<dyn CapabilitySource> =
            Arc::new(CapabilitySet::new().with("a").with("b"));
        let filtered = FilteredCapabilities::new(base, ["b"]);

        assert!(filtered.is_present(&"a".into()));
        assert!(!filtered.is_present(&"b".into()));
        assert_eq!(filtered.markers(), CapabilitySet::new().with("a"));
    }
}
