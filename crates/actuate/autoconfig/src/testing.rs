//! Test harness for auto-configurations.
//!
//! [`ContextRunner`] starts a throwaway application context from a
//! declarative description (auto-configurations, user components,
//! properties, visible capabilities) and hands an [`AssertableContext`] to
//! the test. Assertion helpers panic with a readable message on failure.
//!
//! ```
//! use actuate_autoconfig::testing::ContextRunner;
//! use actuate_autoconfig::{AutoConfiguration, AutoConfigurations, RegistrationRule};
//! use actuate_registry::ComponentDefinition;
//!
//! let greeting = AutoConfiguration::new("greeting").rule(
//!     RegistrationRule::builder("greeting")
//!         .property_enabled("greeting.enabled", true)
//!         .construct(|| ComponentDefinition::new("greeting", String::from("hello"))),
//! );
//!
//! ContextRunner::new()
//!     .with_configuration(AutoConfigurations::of([greeting]))
//!     .with_property_values(["greeting.enabled=false"])
//!     .run(|ctx| {
//!         ctx.does_not_have_component::<String>();
//!     });
//! ```

use std::any::Any;
use std::sync::Arc;

use actuate_registry::{ComponentRegistry, ComponentRegistryExt, RegistryResult};
use actuate_types::{Capability, CapabilitySet, ComponentType, Properties};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::autoconfiguration::AutoConfigurations;
use crate::context::{
    ApplicationContext, AutoConfigurationRunner, ConditionEvaluationReport, UserConfiguration,
};
use crate::environment::Environment;
use crate::error::{AutoConfigError, AutoConfigResult};

/// Install a test-friendly tracing subscriber once per process.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer().without_time())
        .try_init();
}

/// Declarative builder for throwaway application contexts.
#[derive(Debug, Clone, Default)]
pub struct ContextRunner {
    configurations: AutoConfigurations,
    user_configurations: Vec<UserConfiguration>,
    property_values: Vec<String>,
    capabilities: CapabilitySet,
    hidden: Vec<Capability>,
}

impl ContextRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_configuration(mut self, configurations: AutoConfigurations) -> Self {
        self.configurations = self.configurations.merge(configurations);
        self
    }

    pub fn with_user_configuration<F>(mut self, name: &str, configure: F) -> Self
    where
        F: Fn(&dyn ComponentRegistry) -> RegistryResult<()> + Send + Sync + 'static,
    {
        self.user_configurations
            .push(UserConfiguration::new(name, configure));
        self
    }

    /// Register a single component before auto-configuration runs.
    pub fn with_component<T>(self, name: &str, value: T) -> Self
    where
        T: Any + Clone + Send + Sync,
    {
        let component_name = name.to_string();
        self.with_user_configuration(name, move |registry| {
            registry.register(&component_name, value.clone())
        })
    }

    /// Add `key=value` properties.
    pub fn with_property_values<I, S>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.property_values.extend(pairs.into_iter().map(Into::into));
        self
    }

    /// Make capability markers visible.
    pub fn with_capabilities<I, C>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Capability>,
    {
        for capability in capabilities {
            self.capabilities.insert(capability);
        }
        self
    }

    /// Hide capability markers, as if that functionality were not linked in.
    pub fn with_filtered_capabilities<I, C>(mut self, hidden: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Capability>,
    {
        self.hidden.extend(hidden.into_iter().map(Into::into));
        self
    }

    /// Start a context and hand it to `assertions`. The context is closed afterwards.
    pub fn run<F>(&self, assertions: F)
    where
        F: FnOnce(&AssertableContext),
    {
        let context = self.start();
        assertions(&context);
        context.close();
    }

    /// Start a context without closing it.
    pub fn start(&self) -> AssertableContext {
        init_test_tracing();
        AssertableContext {
            result: self.build_context(),
        }
    }

    fn build_context(&self) -> AutoConfigResult<ApplicationContext> {
        let properties = Properties::from_pairs(&self.property_values)?;
        let environment = Environment::new(Arc::new(self.capabilities.clone()), properties)
            .filtered(self.hidden.iter().cloned());

        let runner = self.user_configurations.iter().cloned().fold(
            AutoConfigurationRunner::new(self.configurations.clone()),
            AutoConfigurationRunner::with_user_configuration,
        );
        runner.run(environment)
    }
}

/// A started (or failed) context with assertion helpers.
pub struct AssertableContext {
    result: AutoConfigResult<ApplicationContext>,
}

impl AssertableContext {
    /// The started context. Panics if startup failed.
    pub fn context(&self) -> &ApplicationContext {
        match &self.result {
            Ok(context) => context,
            Err(e) => panic!("expected a started context but startup failed: {}", e),
        }
    }

    pub fn startup_failure(&self) -> Option<&AutoConfigError> {
        self.result.as_ref().err()
    }

    pub fn has_failed(&self) -> &Self {
        if self.result.is_ok() {
            panic!("expected startup to fail but it succeeded");
        }
        self
    }

    pub fn has_component<T: ?Sized + 'static>(&self) -> &Self {
        let ty = ComponentType::of::<T>();
        if !self.context().registry().has(&ty) {
            panic!("expected a component of type {}\n{}", ty, self.report());
        }
        self
    }

    pub fn has_single_component<T: ?Sized + 'static>(&self) -> &Self {
        let ty = ComponentType::of::<T>();
        let names = self.context().registry().names_for(&ty);
        if names.len() != 1 {
            panic!(
                "expected a single component of type {} but found {:?}\n{}",
                ty,
                names,
                self.report()
            );
        }
        self
    }

    pub fn does_not_have_component<T: ?Sized + 'static>(&self) -> &Self {
        let ty = ComponentType::of::<T>();
        let names = self.context().registry().names_for(&ty);
        if !names.is_empty() {
            panic!(
                "expected no component of type {} but found {:?}\n{}",
                ty,
                names,
                self.report()
            );
        }
        self
    }

    /// The single component of type `T`. Panics if absent or ambiguous.
    pub fn component<T: Any + Clone>(&self) -> T {
        match self.context().registry().resolve::<T>() {
            Ok(Some(value)) => value,
            Ok(None) => panic!(
                "no component of type {}\n{}",
                std::any::type_name::<T>(),
                self.report()
            ),
            Err(e) => panic!("{}", e),
        }
    }

    pub fn report(&self) -> &ConditionEvaluationReport {
        self.context().report()
    }

    fn close(self) {
        if let Ok(context) = self.result {
            context.close();
        }
    }
}
