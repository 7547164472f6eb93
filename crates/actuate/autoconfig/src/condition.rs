//! Registration conditions and their outcomes.
//!
//! A condition is a named predicate over an [`EnvironmentSnapshot`]. Every
//! evaluation produces a [`ConditionOutcome`] explaining why it matched or
//! not, so a [`ConditionReport`] can tell an operator exactly why an
//! optional component is missing.

use actuate_types::{Capability, ComponentType};

use crate::snapshot::EnvironmentSnapshot;

/// Property consulted when a health indicator has no explicit setting.
pub const HEALTH_DEFAULTS_ENABLED_KEY: &str = "management.health.defaults.enabled";

/// Property key enabling or disabling a named health indicator.
pub fn health_indicator_key(name: &str) -> String {
    format!("management.health.{}.enabled", name)
}

/// A single registration condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Boolean property must not be `false`.
    PropertyEnabled {
        key: String,
        fallback_key: Option<String>,
        default: bool,
    },

    /// Capability marker must be present.
    CapabilityPresent(Capability),

    /// No component of this type may be registered yet.
    ComponentAbsent(ComponentType),

    /// No component of any type may be registered under this name.
    NameAbsent(String),

    /// Exactly one component of this type must be registered.
    DependencyPresent(ComponentType),
}

impl Condition {
    pub fn property_enabled(key: impl Into<String>, default: bool) -> Self {
        Condition::PropertyEnabled {
            key: key.into(),
            fallback_key: None,
            default,
        }
    }

    /// `management.health.<name>.enabled`, falling back to
    /// `management.health.defaults.enabled`, then `true`.
    pub fn health_indicator_enabled(name: &str) -> Self {
        Condition::PropertyEnabled {
            key: health_indicator_key(name),
            fallback_key: Some(HEALTH_DEFAULTS_ENABLED_KEY.to_string()),
            default: true,
        }
    }

    pub fn capability_present(capability: impl Into<Capability>) -> Self {
        Condition::CapabilityPresent(capability.into())
    }

    pub fn component_absent<T: ?Sized + 'static>() -> Self {
        Condition::ComponentAbsent(ComponentType::of::<T>())
    }

    pub fn name_absent(name: impl Into<String>) -> Self {
        Condition::NameAbsent(name.into())
    }

    pub fn dependency_present<T: ?Sized + 'static>() -> Self {
        Condition::DependencyPresent(ComponentType::of::<T>())
    }

    /// Property conditions are opt-outs and are checked before anything else.
    pub fn is_property(&self) -> bool {
        matches!(self, Condition::PropertyEnabled { .. })
    }

    pub fn describe(&self) -> String {
        match self {
            Condition::PropertyEnabled { key, .. } => format!("property_enabled({})", key),
            Condition::CapabilityPresent(c) => format!("capability_present({})", c),
            Condition::ComponentAbsent(ty) => format!("component_absent({})", ty),
            Condition::NameAbsent(name) => format!("name_absent({})", name),
            Condition::DependencyPresent(ty) => format!("dependency_present({})", ty),
        }
    }

    /// Evaluate against a snapshot.
    pub fn evaluate(&self, snapshot: &EnvironmentSnapshot) -> ConditionOutcome {
        match self {
            Condition::PropertyEnabled {
                key,
                fallback_key,
                default,
            } => self.evaluate_property(snapshot, key, fallback_key.as_deref(), *default),
            Condition::CapabilityPresent(capability) => {
                if snapshot.has_capability(capability) {
                    self.matched(format!("found capability '{}'", capability))
                } else {
                    self.no_match(format!("did not find capability '{}'", capability))
                }
            }
            Condition::ComponentAbsent(ty) => {
                let existing = snapshot.candidates(ty);
                if existing.is_empty() {
                    self.matched(format!("no component of type {}", ty))
                } else {
                    self.no_match(format!(
                        "found existing component(s) of type {}: {}",
                        ty,
                        existing.join(", ")
                    ))
                }
            }
            Condition::NameAbsent(name) => {
                let taken: Vec<_> = snapshot.types_named(name).collect();
                if taken.is_empty() {
                    self.matched(format!("no component named '{}'", name))
                } else {
                    self.no_match(format!(
                        "found component '{}' of type {}",
                        name,
                        taken
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(", ")
                    ))
                }
            }
            Condition::DependencyPresent(ty) => {
                let candidates = snapshot.candidates(ty);
                match candidates {
                    [] => self.no_match(format!("no component of type {}", ty)),
                    [single] => self.matched(format!("found single component '{}'", single)),
                    many => self.misconfigured(format!(
                        "expected a single component of type {} but found {}: {}",
                        ty,
                        many.len(),
                        many.join(", ")
                    )),
                }
            }
        }
    }

    fn evaluate_property(
        &self,
        snapshot: &EnvironmentSnapshot,
        key: &str,
        fallback_key: Option<&str>,
        default: bool,
    ) -> ConditionOutcome {
        for candidate in std::iter::once(key).chain(fallback_key) {
            match snapshot.properties().get_bool(candidate) {
                Ok(Some(true)) => return self.matched(format!("{} is true", candidate)),
                Ok(Some(false)) => return self.no_match(format!("{} is false", candidate)),
                Ok(None) => continue,
                Err(e) => return self.misconfigured(e.to_string()),
            }
        }

        if default {
            self.matched(format!("{} not set, enabled by default", key))
        } else {
            self.no_match(format!("{} not set, disabled by default", key))
        }
    }

    fn matched(&self, message: String) -> ConditionOutcome {
        ConditionOutcome {
            condition: self.describe(),
            matched: true,
            misconfigured: false,
            message,
        }
    }

    fn no_match(&self, message: String) -> ConditionOutcome {
        ConditionOutcome {
            condition: self.describe(),
            matched: false,
            misconfigured: false,
            message,
        }
    }

    fn misconfigured(&self, message: String) -> ConditionOutcome {
        ConditionOutcome {
            misconfigured: true,
            ..self.no_match(message)
        }
    }
}

/// Outcome of evaluating one condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionOutcome {
    pub condition: String,
    pub matched: bool,
    /// The condition failed because of bad configuration (an unparseable
    /// property, ambiguous candidates) rather than a plain absence.
    pub misconfigured: bool,
    pub message: String,
}

impl std::fmt::Display for ConditionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verdict = if self.matched { "matched" } else { "did not match" };
        write!(f, "{} {}: {}", self.condition, verdict, self.message)
    }
}

/// Ordered outcomes for one rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionReport {
    outcomes: Vec<ConditionOutcome>,
}

impl ConditionReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: ConditionOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[ConditionOutcome] {
        &self.outcomes
    }

    /// True when every recorded outcome matched.
    pub fn matched(&self) -> bool {
        self.outcomes.iter().all(|o| o.matched)
    }

    /// Outcomes that did not match.
    pub fn failures(&self) -> impl Iterator<Item = &ConditionOutcome> {
        self.outcomes.iter().filter(|o| !o.matched)
    }

    /// Failures caused by bad configuration.
    pub fn misconfigurations(&self) -> impl Iterator<Item = &ConditionOutcome> {
        self.failures().filter(|o| o.misconfigured)
    }
}

impl std::fmt::Display for ConditionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for outcome in &self.outcomes {
            writeln!(f, "  - {}", outcome)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with(pairs: &[&str]) -> EnvironmentSnapshot {
        let mut builder = EnvironmentSnapshot::builder();
        for pair in pairs {
            let (k, v) = pair.split_once('=').unwrap();
            builder = builder.property(k, v);
        }
        builder.build()
    }

    #[test]
    fn test_health_indicator_key() {
        assert_eq!(health_indicator_key("graph"), "management.health.graph.enabled");
    }

    #[test]
    fn test_property_explicit_value_wins_over_fallback() {
        let condition = Condition::health_indicator_enabled("graph");
        let snapshot = snapshot_with(&[
            "management.health.graph.enabled=true",
            "management.health.defaults.enabled=false",
        ]);

        assert!(condition.evaluate(&snapshot).matched);
    }

    #[test]
    fn test_property_falls_back_to_defaults_key() {
        let condition = Condition::health_indicator_enabled("graph");
        let snapshot = snapshot_with(&["management.health.defaults.enabled=false"]);

        let outcome = condition.evaluate(&snapshot);
        assert!(!outcome.matched);
        assert!(outcome.message.contains("management.health.defaults.enabled"));
    }

    #[test]
    fn test_property_default_applies_when_unset() {
        let snapshot = snapshot_with(&[]);
        assert!(Condition::health_indicator_enabled("graph").evaluate(&snapshot).matched);
        assert!(!Condition::property_enabled("feature.x", false).evaluate(&snapshot).matched);
    }

    #[test]
    fn test_invalid_boolean_does_not_match() {
        let snapshot = snapshot_with(&["management.health.graph.enabled=maybe"]);
        let outcome = Condition::health_indicator_enabled("graph").evaluate(&snapshot);
        assert!(!outcome.matched);
        assert!(outcome.misconfigured);
        assert!(outcome.message.contains("maybe"));
    }

    #[test]
    fn test_host_boolean_spellings() {
        let condition = Condition::health_indicator_enabled("graph");
        for value in ["on", "yes", "1"] {
            let pair = format!("management.health.graph.enabled={}", value);
            let snapshot = snapshot_with(&[pair.as_str()]);
            assert!(condition.evaluate(&snapshot).matched, "value {:?}", value);
        }
        for value in ["off", "no", "0"] {
            let pair = format!("management.health.graph.enabled={}", value);
            let snapshot = snapshot_with(&[pair.as_str()]);
            let outcome = condition.evaluate(&snapshot);
            assert!(!outcome.matched, "value {:?}", value);
            assert!(!outcome.misconfigured);
        }
    }

    #[test]
    fn test_capability_present() {
        let snapshot = EnvironmentSnapshot::builder().capability("graph.driver").build();
        assert!(Condition::capability_present("graph.driver").evaluate(&snapshot).matched);
        assert!(!Condition::capability_present("other").evaluate(&snapshot).matched);
    }

    #[test]
    fn test_dependency_present_requires_single_candidate() {
        let condition = Condition::dependency_present::<u32>();

        let none = EnvironmentSnapshot::builder().build();
        assert!(!condition.evaluate(&none).matched);

        let one = EnvironmentSnapshot::builder().component::<u32>("a").build();
        assert!(condition.evaluate(&one).matched);

        let two = EnvironmentSnapshot::builder()
            .component::<u32>("a")
            .component::<u32>("b")
            .build();
        let outcome = condition.evaluate(&two);
        assert!(!outcome.matched);
        assert!(outcome.misconfigured);
        assert!(outcome.message.contains("found 2"));
    }

    #[test]
    fn test_name_absent_checks_every_type() {
        let condition = Condition::name_absent("graphHealthIndicator");
        assert!(condition.evaluate(&EnvironmentSnapshot::builder().build()).matched);

        let other_name = EnvironmentSnapshot::builder().component::<String>("custom").build();
        assert!(condition.evaluate(&other_name).matched);

        let taken = EnvironmentSnapshot::builder()
            .component::<u64>("graphHealthIndicator")
            .build();
        let outcome = condition.evaluate(&taken);
        assert!(!outcome.matched);
        assert!(!outcome.misconfigured);
        assert!(outcome.message.contains("u64"));
    }

    #[test]
    fn test_component_absent() {
        let condition = Condition::component_absent::<String>();
        assert!(condition.evaluate(&EnvironmentSnapshot::builder().build()).matched);

        let taken = EnvironmentSnapshot::builder().component::<String>("custom").build();
        let outcome = condition.evaluate(&taken);
        assert!(!outcome.matched);
        assert!(outcome.message.contains("custom"));
    }
}
