//! Application context and the auto-configuration runner.
//!
//! Startup runs on a single thread in three phases:
//!
//! 1. open a [`RegistryScope`]
//! 2. apply user configuration (components the application registers itself)
//! 3. apply auto-configurations in order, each rule against a fresh snapshot
//!
//! Any error aborts startup and tears the scope down.

use std::sync::Arc;

use actuate_registry::{ComponentRegistry, RegistryResult, RegistryScope};
use tracing::{debug, error, info, instrument};

use crate::autoconfiguration::AutoConfigurations;
use crate::condition::ConditionReport;
use crate::environment::Environment;
use crate::error::{AutoConfigError, AutoConfigResult};
use crate::evaluator::{Applied, ConditionEvaluator};
use crate::snapshot::EnvironmentSnapshot;

/// Registers application-supplied components before auto-configuration.
pub type UserConfigurationFn =
    Arc<dyn Fn(&dyn ComponentRegistry) -> RegistryResult<()> + Send + Sync>;

/// A named block of user configuration.
#[derive(Clone)]
pub struct UserConfiguration {
    name: String,
    configure: UserConfigurationFn,
}

impl UserConfiguration {
    pub fn new<F>(name: impl Into<String>, configure: F) -> Self
    where
        F: Fn(&dyn ComponentRegistry) -> RegistryResult<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            configure: Arc::new(configure),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for UserConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserConfiguration")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Outcome of one rule during startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEvaluation {
    pub configuration: String,
    pub rule: String,
    pub applied: Applied,
    pub report: ConditionReport,
}

/// Every rule decision taken while starting a context.
#[derive(Debug, Clone, Default)]
pub struct ConditionEvaluationReport {
    evaluations: Vec<RuleEvaluation>,
}

impl ConditionEvaluationReport {
    pub fn evaluations(&self) -> &[RuleEvaluation] {
        &self.evaluations
    }

    pub fn for_rule(&self, rule: &str) -> Option<&RuleEvaluation> {
        self.evaluations.iter().find(|e| e.rule == rule)
    }

    /// Rules whose component was registered.
    pub fn positive_matches(&self) -> impl Iterator<Item = &RuleEvaluation> {
        self.evaluations
            .iter()
            .filter(|e| matches!(e.applied, Applied::Registered { .. }))
    }

    /// Rules whose conditions did not hold.
    pub fn negative_matches(&self) -> impl Iterator<Item = &RuleEvaluation> {
        self.evaluations
            .iter()
            .filter(|e| e.applied == Applied::Skipped)
    }
}

impl std::fmt::Display for ConditionEvaluationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Positive matches:")?;
        for e in self.positive_matches() {
            write!(f, " {} ({}):\n{}", e.rule, e.configuration, e.report)?;
        }
        writeln!(f, "Negative matches:")?;
        for e in self.negative_matches() {
            write!(f, " {} ({}):\n{}", e.rule, e.configuration, e.report)?;
        }
        Ok(())
    }
}

/// A started application: environment, components and the decisions taken.
pub struct ApplicationContext {
    environment: Environment,
    registry: Arc<dyn ComponentRegistry>,
    scope: RegistryScope,
    report: ConditionEvaluationReport,
}

impl ApplicationContext {
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn registry(&self) -> &dyn ComponentRegistry {
        self.registry.as_ref()
    }

    pub fn report(&self) -> &ConditionEvaluationReport {
        &self.report
    }

    /// Shut down, releasing every component.
    pub fn close(self) {
        self.scope.close();
    }
}

impl std::fmt::Debug for ApplicationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationContext")
            .field("scope", &self.scope.name())
            .field("components", &self.registry.len())
            .finish_non_exhaustive()
    }
}

/// Applies user configuration and auto-configurations to a fresh registry.
#[derive(Debug, Clone, Default)]
pub struct AutoConfigurationRunner {
    configurations: AutoConfigurations,
    user_configurations: Vec<UserConfiguration>,
    evaluator: ConditionEvaluator,
}

impl AutoConfigurationRunner {
    pub fn new(configurations: AutoConfigurations) -> Self {
        Self {
            configurations,
            user_configurations: Vec::new(),
            evaluator: ConditionEvaluator::new(),
        }
    }

    pub fn with_user_configuration(mut self, configuration: UserConfiguration) -> Self {
        self.user_configurations.push(configuration);
        self
    }

    /// Start an application context.
    #[instrument(skip_all, fields(configurations = self.configurations.len()))]
    pub fn run(&self, environment: Environment) -> AutoConfigResult<ApplicationContext> {
        let scope = RegistryScope::open("application");
        let registry = scope.registry()?;

        match self.populate(&environment, registry.as_ref()) {
            Ok(report) => {
                info!(components = registry.len(), "Application context started");
                Ok(ApplicationContext {
                    environment,
                    registry,
                    scope,
                    report,
                })
            }
            Err(e) => {
                error!(error = %e, "Application context failed to start");
                Err(e)
            }
        }
    }

    fn populate(
        &self,
        environment: &Environment,
        registry: &dyn ComponentRegistry,
    ) -> AutoConfigResult<ConditionEvaluationReport> {
        for user in &self.user_configurations {
            debug!(configuration = %user.name, "Applying user configuration");
            (user.configure)(registry).map_err(|source| AutoConfigError::UserConfiguration {
                name: user.name.clone(),
                source,
            })?;
        }

        let mut report = ConditionEvaluationReport::default();
        for configuration in self.configurations.sorted()? {
            for rule in configuration.rules() {
                let snapshot = EnvironmentSnapshot::capture(environment, registry);
                let decision = self.evaluator.evaluate(&snapshot, rule);
                let applied = self.evaluator.apply(&decision, registry)?;
                report.evaluations.push(RuleEvaluation {
                    configuration: configuration.name().to_string(),
                    rule: rule.name().to_string(),
                    applied,
                    report: decision.report().clone(),
                });
            }
        }
        Ok(report)
    }
}
