//! Component registry trait
//!
//! Components are stored type-erased as [`ComponentRef`] under a
//! [`ComponentType`] key and a name. A type key may hold several named
//! components; `get` only succeeds when the choice is unambiguous.

use std::any::Any;
use std::sync::Arc;

use actuate_types::ComponentType;

use crate::error::{RegistryError, Result};

/// Type-erased shared component instance.
pub type ComponentRef = Arc<dyn Any + Send + Sync>;

/// Registry of constructed components.
pub trait ComponentRegistry: Send + Sync {
    /// Whether at least one component is registered under `ty`.
    fn has(&self, ty: &ComponentType) -> bool;

    /// Names registered under `ty`, in registration order.
    fn names_for(&self, ty: &ComponentType) -> Vec<String>;

    /// The single component registered under `ty`.
    ///
    /// Returns `Ok(None)` when nothing is registered and
    /// [`RegistryError::Ambiguous`] when more than one candidate exists.
    fn get(&self, ty: &ComponentType) -> Result<Option<ComponentRef>>;

    /// The component registered under `ty` with the given name.
    fn get_named(&self, ty: &ComponentType, name: &str) -> Option<ComponentRef>;

    /// Register a component. A second put for the same type and name fails.
    fn put(&self, ty: &ComponentType, name: &str, component: ComponentRef) -> Result<()>;

    /// Remove a named component, returning it if present.
    fn remove(&self, ty: &ComponentType, name: &str) -> Option<ComponentRef>;

    /// Every registered type key.
    fn types(&self) -> Vec<ComponentType>;

    /// Drop every component.
    fn clear(&self);

    /// Number of `(type, name)` registrations.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named component exposed under one or more contract types.
///
/// ```
/// use std::sync::Arc;
/// use actuate_registry::ComponentDefinition;
///
/// trait Greeter: Send + Sync {}
/// struct English;
/// impl Greeter for English {}
///
/// let english = Arc::new(English);
/// let definition = ComponentDefinition::new("english", english.clone())
///     .expose_as::<Arc<dyn Greeter>>(english);
/// assert_eq!(definition.contracts().count(), 2);
/// ```
pub struct ComponentDefinition {
    name: String,
    entries: Vec<(ComponentType, ComponentRef)>,
}

impl ComponentDefinition {
    pub fn new<T: Any + Send + Sync>(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            entries: vec![(ComponentType::of::<T>(), Arc::new(value))],
        }
    }

    /// Also expose the component under the contract type `U`.
    pub fn expose_as<U: Any + Send + Sync>(mut self, value: U) -> Self {
        self.entries.push((ComponentType::of::<U>(), Arc::new(value)));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contracts(&self) -> impl Iterator<Item = &ComponentType> {
        self.entries.iter().map(|(ty, _)| ty)
    }
}

impl std::fmt::Debug for ComponentDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentDefinition")
            .field("name", &self.name)
            .field("contracts", &self.contracts().collect::<Vec<_>>())
            .finish()
    }
}

/// Typed helpers over any [`ComponentRegistry`].
pub trait ComponentRegistryExt: ComponentRegistry {
    /// Register `value` under its own type.
    fn register<T: Any + Send + Sync>(&self, name: &str, value: T) -> Result<()> {
        self.put(&ComponentType::of::<T>(), name, Arc::new(value))
    }

    /// Register every contract of a definition.
    ///
    /// Nothing is registered if any contract already holds the name.
    fn define(&self, definition: ComponentDefinition) -> Result<()> {
        for (ty, _) in &definition.entries {
            if self.get_named(ty, &definition.name).is_some() {
                return Err(RegistryError::DuplicateComponent {
                    ty: *ty,
                    name: definition.name.clone(),
                });
            }
        }
        for (ty, component) in definition.entries {
            self.put(&ty, &definition.name, component)?;
        }
        Ok(())
    }

    /// Resolve the single component of type `T`.
    fn resolve<T: Any + Clone>(&self) -> Result<Option<T>> {
        let ty = ComponentType::of::<T>();
        match self.get(&ty)? {
            None => Ok(None),
            Some(component) => {
                let name = self.names_for(&ty).into_iter().next().unwrap_or_default();
                downcast::<T>(&ty, &name, &component).map(Some)
            }
        }
    }

    /// Resolve a named component of type `T`.
    fn resolve_named<T: Any + Clone>(&self, name: &str) -> Result<Option<T>> {
        let ty = ComponentType::of::<T>();
        self.get_named(&ty, name)
            .map(|component| downcast::<T>(&ty, name, &component))
            .transpose()
    }

    /// Resolve every component of type `T` with its name.
    fn resolve_all<T: Any + Clone>(&self) -> Result<Vec<(String, T)>> {
        let ty = ComponentType::of::<T>();
        let mut resolved = Vec::new();
        for name in self.names_for(&ty) {
            if let Some(component) = self.get_named(&ty, &name) {
                let value = downcast::<T>(&ty, &name, &component)?;
                resolved.push((name, value));
            }
        }
        Ok(resolved)
    }
}

impl<R: ComponentRegistry + ?Sized> ComponentRegistryExt for R {}

/// Downcast a type-erased component to `T`.
pub fn downcast<T: Any + Clone>(
    ty: &ComponentType,
    name: &str,
    component: &ComponentRef,
) -> Result<T> {
    component
        .downcast_ref::<T>()
        .cloned()
        .ok_or_else(|| RegistryError::TypeMismatch {
            ty: *ty,
            name: name.to_string(),
            expected: std::any::type_name::<T>(),
        })
}
