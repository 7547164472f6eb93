//! # Actuate Health - Health Indicators and Aggregation
//!
//! A health indicator reports whether an external dependency is usable.
//! This crate defines the indicator contract, aggregates several indicators
//! into one status, and provides the generic `health-indicator`
//! auto-configuration that registers an always-up application indicator
//! when nothing more specific was registered.
//!
//! ## Capability Markers
//!
//! Linking this crate makes the health capabilities available; integration
//! crates require them before registering their own indicators. Hosts
//! collect them with [`capabilities`].

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod aggregate;
pub mod autoconfigure;
pub mod indicator;

use actuate_types::CapabilitySet;

// Re-export main types
pub use aggregate::{CompositeHealth, StatusAggregator};
pub use autoconfigure::{health_indicator_auto_configuration, HEALTH_AUTO_CONFIGURATION};
pub use indicator::{ApplicationHealthIndicator, HealthIndicator};

/// The health-indicator contract is available.
pub const HEALTH_INDICATOR: &str = "actuate.health.indicator";

/// Health status values are available.
pub const HEALTH_STATUS: &str = "actuate.health.status";

/// The generic health-indicator auto-configuration is available.
pub const HEALTH_INDICATOR_AUTOCONFIGURATION: &str = "actuate.health.autoconfigure";

/// Capability markers provided by this crate.
pub fn capabilities() -> CapabilitySet {
    CapabilitySet::new()
        .with(HEALTH_INDICATOR)
        .with(HEALTH_STATUS)
        .with(HEALTH_INDICATOR_AUTOCONFIGURATION)
}
