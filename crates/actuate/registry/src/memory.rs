//! In-memory component registry

use actuate_types::ComponentType;
use dashmap::DashMap;
use tracing::debug;

use crate::error::{RegistryError, Result};
use crate::registry::{ComponentRef, ComponentRegistry};

/// In-memory component registry
pub struct InMemoryComponentRegistry {
    components: DashMap<ComponentType, Vec<(String, ComponentRef)>>,
}

impl InMemoryComponentRegistry {
    pub fn new() -> Self {
        Self {
            components: DashMap::new(),
        }
    }
}

impl Default for InMemoryComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentRegistry for InMemoryComponentRegistry {
    fn has(&self, ty: &ComponentType) -> bool {
        self.components
            .get(ty)
            .map(|entries| !entries.is_empty())
            .unwrap_or(false)
    }

    fn names_for(&self, ty: &ComponentType) -> Vec<String> {
        self.components
            .get(ty)
            .map(|entries| entries.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default()
    }

    fn get(&self, ty: &ComponentType) -> Result<Option<ComponentRef>> {
        let Some(entries) = self.components.get(ty) else {
            return Ok(None);
        };
        match entries.as_slice() {
            [] => Ok(None),
            [(_, component)] => Ok(Some(component.clone())),
            many => Err(RegistryError::Ambiguous {
                ty: *ty,
                candidates: many.iter().map(|(name, _)| name.clone()).collect(),
            }),
        }
    }

    fn get_named(&self, ty: &ComponentType, name: &str) -> Option<ComponentRef> {
        self.components.get(ty).and_then(|entries| {
            entries
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, component)| component.clone())
        })
    }

    fn put(&self, ty: &ComponentType, name: &str, component: ComponentRef) -> Result<()> {
        let mut entries = self.components.entry(*ty).or_default();
        if entries.iter().any(|(n, _)| n == name) {
            return Err(RegistryError::DuplicateComponent {
                ty: *ty,
                name: name.to_string(),
            });
        }

        debug!(component = %name, ty = %ty, "Registering component");
        entries.push((name.to_string(), component));
        Ok(())
    }

    fn remove(&self, ty: &ComponentType, name: &str) -> Option<ComponentRef> {
        let mut entries = self.components.get_mut(ty)?;
        let idx = entries.iter().position(|(n, _)| n == name)?;
        Some(entries.remove(idx).1)
    }

    fn types(&self) -> Vec<ComponentType> {
        self.components
            .iter()
            .filter(|entry| !entry.value().is_empty())
            .map(|entry| *entry.key())
            .collect()
    }

    fn clear(&self) {
        self.components.clear();
    }

    fn len(&self) -> usize {
        self.components.iter().map(|entry| entry.value().len()).sum()
    }
}
