//! Component type keys

use std::any::TypeId;
use std::hash::{Hash, Hasher};

/// Key identifying a component contract in the registry.
///
/// Two keys are equal when they were built from the same Rust type; the
/// name is carried for logging only.
#[derive(Debug, Clone, Copy)]
pub struct ComponentType {
    id: TypeId,
    name: &'static str,
}

impl ComponentType {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this key was built from `T`.
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for ComponentType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ComponentType {}

impl Hash for ComponentType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    trait Marker {}

    #[test]
    fn test_equality_follows_type() {
        assert_eq!(ComponentType::of::<String>(), ComponentType::of::<String>());
        assert_ne!(ComponentType::of::<String>(), ComponentType::of::<u32>());
        assert!(ComponentType::of::<Arc<dyn Marker>>().is::<Arc<dyn Marker>>());
    }
}
