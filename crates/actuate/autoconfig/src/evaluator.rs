//! Conditional registration evaluator.
//!
//! Evaluation is split in two steps:
//!
//! 1. [`ConditionEvaluator::evaluate`] is a pure function of the snapshot and
//!    the rule. Property opt-outs are checked first and short-circuit; every
//!    other condition is evaluated and reported, and all must hold.
//! 2. [`ConditionEvaluator::apply`] performs the registration for a positive
//!    decision and logs why a negative one was skipped. A dependency that
//!    disappeared between the two steps is a fatal configuration error.

use actuate_registry::{ComponentRegistry, ComponentRegistryExt};
use actuate_types::ComponentType;
use tracing::{debug, info, instrument, warn};

use crate::condition::ConditionReport;
use crate::environment::Environment;
use crate::error::{AutoConfigError, AutoConfigResult};
use crate::rule::{ComponentFactory, RegistrationRule};
use crate::snapshot::EnvironmentSnapshot;

/// Outcome of evaluating a rule against a snapshot.
#[derive(Clone)]
pub struct Decision {
    rule: String,
    register: bool,
    report: ConditionReport,
    dependency: Option<ComponentType>,
    construction: Option<ComponentFactory>,
}

impl Decision {
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// Whether the component should be registered.
    pub fn register(&self) -> bool {
        self.register
    }

    pub fn report(&self) -> &ConditionReport {
        &self.report
    }

    /// The construction closure, only present for positive decisions.
    pub fn construction(&self) -> Option<&ComponentFactory> {
        self.construction.as_ref()
    }
}

impl PartialEq for Decision {
    fn eq(&self, other: &Self) -> bool {
        self.rule == other.rule
            && self.register == other.register
            && self.report == other.report
            && self.dependency == other.dependency
    }
}

impl std::fmt::Debug for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decision")
            .field("rule", &self.rule)
            .field("register", &self.register)
            .field("report", &self.report)
            .finish_non_exhaustive()
    }
}

/// What [`ConditionEvaluator::apply`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// Component registered under this name.
    Registered { name: String },

    /// Conditions did not hold, nothing registered.
    Skipped,
}

/// Evaluates registration rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Decide whether the rule's component should be registered.
    pub fn evaluate(&self, snapshot: &EnvironmentSnapshot, rule: &RegistrationRule) -> Decision {
        let mut report = ConditionReport::new();

        for condition in rule.conditions().iter().filter(|c| c.is_property()) {
            let outcome = condition.evaluate(snapshot);
            let opted_out = !outcome.matched;
            report.push(outcome);
            if opted_out {
                return self.decide(rule, false, report);
            }
        }

        for condition in rule.conditions().iter().filter(|c| !c.is_property()) {
            report.push(condition.evaluate(snapshot));
        }

        let register = report.matched();
        self.decide(rule, register, report)
    }

    /// Register the component for a positive decision.
    #[instrument(skip(self, decision, registry), fields(rule = decision.rule()))]
    pub fn apply(
        &self,
        decision: &Decision,
        registry: &dyn ComponentRegistry,
    ) -> AutoConfigResult<Applied> {
        let Some(construct) = decision.construction() else {
            for outcome in decision.report().misconfigurations() {
                warn!(outcome = %outcome, "Rule skipped because of misconfiguration");
            }
            for outcome in decision.report().failures().filter(|o| !o.misconfigured) {
                debug!(outcome = %outcome, "Condition did not match");
            }
            return Ok(Applied::Skipped);
        };

        let dependency = match decision.dependency {
            Some(ty) => {
                let component =
                    registry
                        .get(&ty)?
                        .ok_or_else(|| AutoConfigError::DependencyUnavailable {
                            rule: decision.rule.clone(),
                            dependency: ty,
                        })?;
                Some(component)
            }
            None => None,
        };

        let definition = construct(dependency)?;
        let name = definition.name().to_string();
        registry.define(definition)?;

        info!(component = %name, "Registered component");
        Ok(Applied::Registered { name })
    }

    /// Capture a snapshot, evaluate, and apply in one step.
    pub fn evaluate_and_apply(
        &self,
        environment: &Environment,
        rule: &RegistrationRule,
        registry: &dyn ComponentRegistry,
    ) -> AutoConfigResult<(Decision, Applied)> {
        let snapshot = EnvironmentSnapshot::capture(environment, registry);
        let decision = self.evaluate(&snapshot, rule);
        let applied = self.apply(&decision, registry)?;
        Ok((decision, applied))
    }

    fn decide(&self, rule: &RegistrationRule, register: bool, report: ConditionReport) -> Decision {
        Decision {
            rule: rule.name().to_string(),
            register,
            report,
            dependency: rule.dependency().copied(),
            construction: register.then(|| rule.factory().clone()),
        }
    }
}
