//! Graph database health indicator.
//!
//! Reports `Up` with the answering server (`<version>@<address>`) and its
//! edition. An expired session is retried exactly once; any other failure
//! reports `Down` with the error text.

use std::sync::Arc;

use actuate_health::HealthIndicator;
use actuate_types::Health;
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::driver::{DriverError, GraphDriver, ServerSummary};

/// Health indicator backed by a [`GraphDriver`].
pub struct GraphHealthIndicator {
    driver: Arc<dyn GraphDriver>,
}

impl GraphHealthIndicator {
    pub fn new(driver: Arc<dyn GraphDriver>) -> Self {
        Self { driver }
    }

    async fn run_check(&self) -> Result<ServerSummary, DriverError> {
        match self.driver.verify_connectivity().await {
            Err(DriverError::SessionExpired) => {
                warn!("Graph session expired, retrying health check once");
                self.driver.verify_connectivity().await
            }
            other => other,
        }
    }
}

#[async_trait]
impl HealthIndicator for GraphHealthIndicator {
    fn name(&self) -> &str {
        "graph"
    }

    #[instrument(skip(self), fields(indicator = "graph"))]
    async fn check(&self) -> Health {
        match self.run_check().await {
            Ok(server) => {
                debug!(server = %server.address, "Graph health check succeeded");
                Health::up()
                    .with_detail("server", format!("{}@{}", server.version, server.address))
                    .with_detail("edition", server.edition)
            }
            Err(e) => {
                warn!(error = %e, "Graph health check failed");
                Health::down_with_error(e)
            }
        }
    }
}
