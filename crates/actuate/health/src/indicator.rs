//! Health indicator contract.

use actuate_types::Health;
use async_trait::async_trait;

/// A component that reports the health of one dependency.
///
/// Implementations never fail: problems are reported as a `Down` health
/// with details.
#[async_trait]
pub trait HealthIndicator: Send + Sync {
    /// Name under which the result is reported.
    fn name(&self) -> &str;

    /// Run the health check.
    async fn check(&self) -> Health;
}

/// Indicator reporting the application itself, always `Up`.
#[derive(Debug, Clone, Default)]
pub struct ApplicationHealthIndicator;

impl ApplicationHealthIndicator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HealthIndicator for ApplicationHealthIndicator {
    fn name(&self) -> &str {
        "application"
    }

    async fn check(&self) -> Health {
        Health::up()
    }
}
