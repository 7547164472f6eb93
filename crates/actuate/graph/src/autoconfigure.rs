//! Graph health auto-configuration.
//!
//! Ordered before the generic `health-indicator` auto-configuration so that a
//! registered graph indicator suppresses the application fallback.

use std::sync::Arc;

use actuate_autoconfig::{AutoConfiguration, AutoConfigurations, RegistrationRule};
use actuate_health::{
    health_indicator_auto_configuration, HealthIndicator, HEALTH_AUTO_CONFIGURATION,
    HEALTH_INDICATOR, HEALTH_INDICATOR_AUTOCONFIGURATION, HEALTH_STATUS,
};
use actuate_registry::ComponentDefinition;
use tracing::debug;

use crate::driver::GraphDriver;
use crate::indicator::GraphHealthIndicator;
use crate::GRAPH_DRIVER;

/// Name of the graph auto-configuration, for `before`/`after` hints.
pub const GRAPH_HEALTH_AUTO_CONFIGURATION: &str = "graph-health";

/// Component name of the registered indicator.
pub const GRAPH_HEALTH_INDICATOR: &str = "graphHealthIndicator";

pub fn graph_health_auto_configuration() -> AutoConfiguration {
    AutoConfiguration::new(GRAPH_HEALTH_AUTO_CONFIGURATION)
        .before(HEALTH_AUTO_CONFIGURATION)
        .rule(
            RegistrationRule::builder("graph-health-indicator")
                .health_indicator_enabled("graph")
                .capability(HEALTH_INDICATOR)
                .capability(GRAPH_DRIVER)
                .capability(HEALTH_STATUS)
                .capability(HEALTH_INDICATOR_AUTOCONFIGURATION)
                .unless_present::<Arc<GraphHealthIndicator>>()
                .unless_named(GRAPH_HEALTH_INDICATOR)
                .construct_with(|driver: Arc<dyn GraphDriver>| {
                    debug!("Building graph health indicator");
                    let indicator = Arc::new(GraphHealthIndicator::new(driver));
                    ComponentDefinition::new(GRAPH_HEALTH_INDICATOR, indicator.clone())
                        .expose_as::<Arc<dyn HealthIndicator>>(indicator)
                }),
        )
}

/// The graph auto-configuration together with the generic one it precedes.
pub fn auto_configurations() -> AutoConfigurations {
    AutoConfigurations::of([
        health_indicator_auto_configuration(),
        graph_health_auto_configuration(),
    ])
}
