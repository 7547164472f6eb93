//! Health aggregation.
//!
//! The overall status is the worst individual status:
//! `Down` > `OutOfService` > `Unknown` > `Up`. With no indicators at all the
//! overall status is `Unknown`.

use std::collections::BTreeMap;
use std::sync::Arc;

use actuate_registry::{ComponentRegistry, ComponentRegistryExt, RegistryResult};
use actuate_types::{HealthSnapshot, Status};
use futures::future::join_all;
use tracing::{debug, instrument};

use crate::indicator::HealthIndicator;

/// Folds individual statuses into one.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusAggregator;

impl StatusAggregator {
    pub fn aggregate<I>(&self, statuses: I) -> Status
    where
        I: IntoIterator<Item = Status>,
    {
        statuses
            .into_iter()
            .max_by_key(Status::severity)
            .unwrap_or(Status::Unknown)
    }
}

/// Every health indicator of an application, checked together.
#[derive(Clone, Default)]
pub struct CompositeHealth {
    indicators: Vec<(String, Arc<dyn HealthIndicator>)>,
    aggregator: StatusAggregator,
}

impl CompositeHealth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every `Arc<dyn HealthIndicator>` in the registry.
    pub fn from_registry(registry: &dyn ComponentRegistry) -> RegistryResult<Self> {
        let indicators = registry.resolve_all::<Arc<dyn HealthIndicator>>()?;
        Ok(Self {
            indicators: indicators
                .into_iter()
                .map(|(_, indicator)| (indicator.name().to_string(), indicator))
                .collect(),
            aggregator: StatusAggregator,
        })
    }

    pub fn add(mut self, indicator: Arc<dyn HealthIndicator>) -> Self {
        self.indicators
            .push((indicator.name().to_string(), indicator));
        self
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    /// Run every indicator and aggregate the results.
    #[instrument(skip(self), fields(indicators = self.indicators.len()))]
    pub async fn check(&self) -> HealthSnapshot {
        let results = join_all(self.indicators.iter().map(|(name, indicator)| async move {
            (name.clone(), indicator.check().await)
        }))
        .await;

        let components: BTreeMap<_, _> = results.into_iter().collect();
        let status = self
            .aggregator
            .aggregate(components.values().map(|h| h.status));

        debug!(status = %status, "Aggregated health");
        HealthSnapshot::new(status, components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::ApplicationHealthIndicator;
    use actuate_types::Health;
    use async_trait::async_trait;

    struct Fixed(&'static str, Status);

    #[async_trait]
    impl HealthIndicator for Fixed {
        fn name(&self) -> &str {
            self.0
        }

        async fn check(&self) -> Health {
            Health::new(self.1)
        }
    }

    #[test]
    fn test_worst_status_wins() {
        let aggregator = StatusAggregator;
        assert_eq!(aggregator.aggregate([]), Status::Unknown);
        assert_eq!(aggregator.aggregate([Status::Up, Status::Up]), Status::Up);
        assert_eq!(aggregator.aggregate([Status::Up, Status::Unknown]), Status::Unknown);
        assert_eq!(
            aggregator.aggregate([Status::OutOfService, Status::Down, Status::Up]),
            Status::Down
        );
    }

    #[tokio::test]
    async fn test_composite_check() {
        let composite = CompositeHealth::new()
            .add(Arc::new(ApplicationHealthIndicator))
            .add(Arc::new(Fixed("graph", Status::Down)));

        let snapshot = composite.check().await;

        assert_eq!(snapshot.status, Status::Down);
        assert_eq!(snapshot.components.len(), 2);
        assert_eq!(snapshot.components["application"].status, Status::Up);
        assert!(snapshot.to_json().unwrap().contains("\"status\":\"DOWN\""));
    }

    #[tokio::test]
    async fn test_empty_composite_is_unknown() {
        assert_eq!(CompositeHealth::new().check().await.status, Status::Unknown);
    }
}
