//! Immutable environment snapshot
//!
//! Conditions never look at the live registry. They see a snapshot captured
//! right before evaluation, which keeps evaluation pure: the same snapshot
//! always yields the same decision.

use std::collections::HashMap;

use actuate_registry::ComponentRegistry;
use actuate_types::{Capability, CapabilitySet, ComponentType, Properties};

use crate::environment::Environment;

/// Point-in-time view of capabilities, properties and registered components.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSnapshot {
    capabilities: CapabilitySet,
    properties: Properties,
    components: HashMap<ComponentType, Vec<String>>,
}

impl EnvironmentSnapshot {
    /// Capture the current state of an environment and registry.
    pub fn capture(environment: &Environment, registry: &dyn ComponentRegistry) -> Self {
        let components = registry
            .types()
            .into_iter()
            .map(|ty| (ty, registry.names_for(&ty)))
            .filter(|(_, names)| !names.is_empty())
            .collect();

        Self {
            capabilities: environment.capabilities().markers(),
            properties: environment.properties().clone(),
            components,
        }
    }

    pub fn builder() -> EnvironmentSnapshotBuilder {
        EnvironmentSnapshotBuilder::default()
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn has_capability(&self, capability: &Capability) -> bool {
        self.capabilities.contains(capability)
    }

    pub fn has_component(&self, ty: &ComponentType) -> bool {
        !self.candidates(ty).is_empty()
    }

    /// Names of components registered under `ty`.
    pub fn candidates(&self, ty: &ComponentType) -> &[String] {
        self.components.get(ty).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Types holding a component registered under `name`.
    pub fn types_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ComponentType> {
        self.components
            .iter()
            .filter(move |(_, names)| names.iter().any(|n| n == name))
            .map(|(ty, _)| ty)
    }
}

/// Builder for snapshots that do not come from a live registry.
#[derive(Debug, Default)]
pub struct EnvironmentSnapshotBuilder {
    snapshot: EnvironmentSnapshot,
}

impl EnvironmentSnapshotBuilder {
    pub fn capability(mut self, capability: impl Into<Capability>) -> Self {
        self.snapshot.capabilities.insert(capability);
        self
    }

    pub fn capabilities(mut self, capabilities: CapabilitySet) -> Self {
        self.snapshot.capabilities = capabilities;
        self
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.snapshot.properties.set(key, value);
        self
    }

    pub fn properties(mut self, properties: Properties) -> Self {
        self.snapshot.properties = properties;
        self
    }

    /// Record a named component of type `T`.
    pub fn component<T: ?Sized + 'static>(mut self, name: impl Into<String>) -> Self {
        self.snapshot
            .components
            .entry(ComponentType::of::<T>())
            .or_default()
            .push(name.into());
        self
    }

    pub fn build(self) -> EnvironmentSnapshot {
        self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actuate_registry::{ComponentRegistryExt, InMemoryComponentRegistry};
    use std::sync::Arc;

    #[test]
    fn test_capture_reflects_registry_and_environment() {
        let registry = InMemoryComponentRegistry::new();
        registry.register("driver", 1u32).unwrap();

        let mut properties = Properties::new();
        properties.set("management.health.graph.enabled", "false");
        let environment = Environment::new(
            Arc::new(CapabilitySet::new().with("graph.driver")),
            properties,
        );

        let snapshot = EnvironmentSnapshot::capture(&environment, &registry);

        assert!(snapshot.has_capability(&"graph.driver".into()));
        assert_eq!(
            snapshot.candidates(&ComponentType::of::<u32>()).to_vec(),
            vec!["driver".to_string()]
        );
        assert_eq!(
            snapshot.properties().get("management.health.graph.enabled"),
            Some("false")
        );
    }

    #[test]
    fn test_capture_is_detached_from_registry() {
        let registry = InMemoryComponentRegistry::new();
        let environment = Environment::new(Arc::new(CapabilitySet::new()), Properties::new());

        let before = EnvironmentSnapshot::capture(&environment, &registry);
        registry.register("later", 2u8).unwrap();

        assert!(!before.has_component(&ComponentType::of::<u8>()));
        assert_ne!(before, EnvironmentSnapshot::capture(&environment, &registry));
    }
}
