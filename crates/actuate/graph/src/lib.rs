//! # Actuate Graph - Graph Database Health
//!
//! Health indicator for a graph database driver, registered automatically
//! when it makes sense:
//!
//! - `management.health.graph.enabled` is not `false`
//! - the health-indicator, health-status, health auto-configuration and
//!   graph-driver capabilities exist
//! - exactly one `Arc<dyn GraphDriver>` is registered
//! - the application did not register its own [`GraphHealthIndicator`], nor
//!   any component named `graphHealthIndicator`
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use actuate_autoconfig::{AutoConfigurationRunner, Environment, UserConfiguration};
//! use actuate_graph::{GraphDriver, GraphHealthIndicator, DriverError, ServerSummary};
//! use actuate_registry::ComponentRegistryExt;
//! use actuate_types::Properties;
//!
//! struct LocalDriver;
//!
//! #[async_trait]
//! impl GraphDriver for LocalDriver {
//!     async fn verify_connectivity(&self) -> Result<ServerSummary, DriverError> {
//!         Ok(ServerSummary::new("5.20.0", "localhost:7687", "community"))
//!     }
//! }
//!
//! let driver: Arc<dyn GraphDriver> = Arc::new(LocalDriver);
//! let context = AutoConfigurationRunner::new(actuate_graph::auto_configurations())
//!     .with_user_configuration(UserConfiguration::new("driver", move |registry| {
//!         registry.register("driver", driver.clone())
//!     }))
//!     .run(Environment::new(
//!         Arc::new(actuate_graph::runtime_capabilities()),
//!         Properties::new(),
//!     ))
//!     .unwrap();
//!
//! assert!(context
//!     .registry()
//!     .resolve::<Arc<GraphHealthIndicator>>()
//!     .unwrap()
//!     .is_some());
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod autoconfigure;
pub mod driver;
pub mod indicator;

use actuate_types::CapabilitySet;

// Re-export main types
pub use autoconfigure::{
    auto_configurations, graph_health_auto_configuration, GRAPH_HEALTH_AUTO_CONFIGURATION,
    GRAPH_HEALTH_INDICATOR,
};
pub use driver::{DriverError, GraphDriver, ServerSummary};
pub use indicator::GraphHealthIndicator;

/// A graph database driver is available.
pub const GRAPH_DRIVER: &str = "graph.driver";

/// Capability markers provided by this crate.
pub fn capabilities() -> CapabilitySet {
    CapabilitySet::new().with(GRAPH_DRIVER)
}

/// Markers of this crate plus the health markers it builds on.
pub fn runtime_capabilities() -> CapabilitySet {
    actuate_health::capabilities()
        .iter()
        .chain(capabilities().iter())
        .cloned()
        .collect()
}
