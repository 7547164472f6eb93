//! # Actuate Autoconfig - Conditional Registration of Optional Components
//!
//! This crate decides, at application startup, whether optional components
//! should be constructed and registered into the shared component registry.
//!
//! ## Overview
//!
//! Each optional component is described by a [`RegistrationRule`]: a list of
//! [`Condition`]s plus a factory. Conditions are evaluated against an
//! immutable [`EnvironmentSnapshot`]:
//!
//! - **Property opt-out**: `management.health.<name>.enabled=false` always wins
//! - **Capability markers**: the functionality the component needs is linked in
//! - **Component absence**: the application did not register its own instance
//! - **Single dependency**: exactly one dependency candidate is registered
//!
//! Non-registration is a normal, silent outcome. The only failures are
//! contract violations discovered while constructing a matched component.
//!
//! ## Key Components
//!
//! - [`ConditionEvaluator`]: pure rule evaluation plus registration
//! - [`AutoConfiguration`]: named, ordered groups of rules
//! - [`AutoConfigurationRunner`]: starts an [`ApplicationContext`]
//! - `testing::ContextRunner`: declarative test harness (`test-utils` feature)
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use actuate_autoconfig::{
//!     AutoConfiguration, AutoConfigurationRunner, AutoConfigurations, Environment,
//!     RegistrationRule,
//! };
//! use actuate_registry::{ComponentDefinition, ComponentRegistryExt};
//! use actuate_types::{CapabilitySet, Properties};
//!
//! let banner = AutoConfiguration::new("banner").rule(
//!     RegistrationRule::builder("banner")
//!         .capability("terminal")
//!         .unless_present::<String>()
//!         .construct(|| ComponentDefinition::new("banner", String::from("actuate"))),
//! );
//!
//! let environment = Environment::new(
//!     Arc::new(CapabilitySet::new().with("terminal")),
//!     Properties::new(),
//! );
//! let context = AutoConfigurationRunner::new(AutoConfigurations::of([banner]))
//!     .run(environment)
//!     .unwrap();
//!
//! assert_eq!(
//!     context.registry().resolve::<String>().unwrap().as_deref(),
//!     Some("actuate")
//! );
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod autoconfiguration;
pub mod condition;
pub mod context;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod rule;
pub mod snapshot;
#[cfg(feature = "test-utils")]
pub mod testing;

// Re-export main types
pub use autoconfiguration::{AutoConfiguration, AutoConfigurations};
pub use condition::{
    health_indicator_key, Condition, ConditionOutcome, ConditionReport,
    HEALTH_DEFAULTS_ENABLED_KEY,
};
pub use context::{
    ApplicationContext, AutoConfigurationRunner, ConditionEvaluationReport, RuleEvaluation,
    UserConfiguration,
};
pub use environment::Environment;
pub use error::{AutoConfigError, AutoConfigResult};
pub use evaluator::{Applied, ConditionEvaluator, Decision};
pub use rule::{ComponentFactory, RegistrationRule, RegistrationRuleBuilder};
pub use snapshot::{EnvironmentSnapshot, EnvironmentSnapshotBuilder};
