//! Registration rules
//!
//! A [`RegistrationRule`] pairs a set of [`Condition`]s with the factory
//! that builds the component once they all hold. Rules are immutable and
//! cheap to clone; they are defined once when auto-configurations are built.

use std::any::Any;
use std::sync::Arc;

use actuate_registry::registry::downcast;
use actuate_registry::{ComponentDefinition, ComponentRef};
use actuate_types::{Capability, ComponentType};

use crate::condition::Condition;
use crate::error::{AutoConfigError, AutoConfigResult};

/// Builds a component from the resolved dependency, if the rule has one.
pub type ComponentFactory =
    Arc<dyn Fn(Option<ComponentRef>) -> AutoConfigResult<ComponentDefinition> + Send + Sync>;

/// Conditions plus construction for one optional component.
#[derive(Clone)]
pub struct RegistrationRule {
    name: String,
    conditions: Vec<Condition>,
    dependency: Option<ComponentType>,
    factory: ComponentFactory,
}

impl RegistrationRule {
    pub fn builder(name: impl Into<String>) -> RegistrationRuleBuilder {
        RegistrationRuleBuilder {
            name: name.into(),
            conditions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Type resolved from the registry and handed to the factory.
    pub fn dependency(&self) -> Option<&ComponentType> {
        self.dependency.as_ref()
    }

    pub fn factory(&self) -> &ComponentFactory {
        &self.factory
    }
}

impl std::fmt::Debug for RegistrationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationRule")
            .field("name", &self.name)
            .field("conditions", &self.conditions)
            .field("dependency", &self.dependency)
            .finish_non_exhaustive()
    }
}

/// Builder for [`RegistrationRule`].
pub struct RegistrationRuleBuilder {
    name: String,
    conditions: Vec<Condition>,
}

impl RegistrationRuleBuilder {
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn property_enabled(self, key: impl Into<String>, default: bool) -> Self {
        self.condition(Condition::property_enabled(key, default))
    }

    pub fn health_indicator_enabled(self, name: &str) -> Self {
        self.condition(Condition::health_indicator_enabled(name))
    }

    pub fn capability(self, capability: impl Into<Capability>) -> Self {
        self.condition(Condition::capability_present(capability))
    }

    /// Skip registration when a component of type `T` already exists.
    pub fn unless_present<T: ?Sized + 'static>(self) -> Self {
        self.condition(Condition::component_absent::<T>())
    }

    /// Skip registration when any component already uses `name`.
    pub fn unless_named(self, name: impl Into<String>) -> Self {
        self.condition(Condition::name_absent(name))
    }

    /// Finish with a factory that needs the single registered `D`.
    pub fn construct_with<D, F>(mut self, build: F) -> RegistrationRule
    where
        D: Any + Clone + Send + Sync,
        F: Fn(D) -> ComponentDefinition + Send + Sync + 'static,
    {
        let dependency = ComponentType::of::<D>();
        self.conditions.push(Condition::DependencyPresent(dependency));

        let rule = self.name.clone();
        let factory: ComponentFactory = Arc::new(move |resolved: Option<ComponentRef>| {
            let component = resolved.ok_or_else(|| AutoConfigError::DependencyUnavailable {
                rule: rule.clone(),
                dependency,
            })?;
            let value = downcast::<D>(&dependency, &rule, &component)?;
            Ok(build(value))
        });

        RegistrationRule {
            name: self.name,
            conditions: self.conditions,
            dependency: Some(dependency),
            factory,
        }
    }

    /// Finish with a factory that needs nothing from the registry.
    pub fn construct<F>(self, build: F) -> RegistrationRule
    where
        F: Fn() -> ComponentDefinition + Send + Sync + 'static,
    {
        RegistrationRule {
            name: self.name,
            conditions: self.conditions,
            dependency: None,
            factory: Arc::new(move |_| Ok(build())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construct_with_adds_dependency_condition() {
        let rule = RegistrationRule::builder("doubler")
            .capability("math")
            .construct_with(|n: u32| ComponentDefinition::new("doubled", n * 2));

        assert_eq!(rule.dependency(), Some(&ComponentType::of::<u32>()));
        assert_eq!(
            rule.conditions().last(),
            Some(&Condition::DependencyPresent(ComponentType::of::<u32>()))
        );
    }

    #[test]
    fn test_factory_rejects_missing_dependency() {
        let rule = RegistrationRule::builder("doubler")
            .construct_with(|n: u32| ComponentDefinition::new("doubled", n * 2));

        let err = (rule.factory())(None).unwrap_err();
        assert!(matches!(err, AutoConfigError::DependencyUnavailable { .. }));
    }

    #[test]
    fn test_factory_rejects_wrong_type() {
        let rule = RegistrationRule::builder("doubler")
            .construct_with(|n: u32| ComponentDefinition::new("doubled", n * 2));

        let wrong: ComponentRef = Arc::new(String::from("not a number"));
        let err = (rule.factory())(Some(wrong)).unwrap_err();
        assert!(matches!(err, AutoConfigError::Registry(_)));
    }
}
