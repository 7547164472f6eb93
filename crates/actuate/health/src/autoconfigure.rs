//! Generic health-indicator auto-configuration.
//!
//! Registers an [`ApplicationHealthIndicator`] when the application has no
//! health indicator at all. Integration-specific auto-configurations order
//! themselves before this one so their indicators suppress the fallback.

use std::sync::Arc;

use actuate_autoconfig::{AutoConfiguration, RegistrationRule};
use actuate_registry::ComponentDefinition;

use crate::indicator::{ApplicationHealthIndicator, HealthIndicator};
use crate::HEALTH_INDICATOR;

/// Name other auto-configurations use in `before`/`after` hints.
pub const HEALTH_AUTO_CONFIGURATION: &str = "health-indicator";

pub fn health_indicator_auto_configuration() -> AutoConfiguration {
    AutoConfiguration::new(HEALTH_AUTO_CONFIGURATION).rule(
        RegistrationRule::builder("application-health-indicator")
            .capability(HEALTH_INDICATOR)
            .unless_present::<Arc<dyn HealthIndicator>>()
            .construct(|| {
                let indicator = Arc::new(ApplicationHealthIndicator::new());
                ComponentDefinition::new("applicationHealthIndicator", indicator.clone())
                    .expose_as::<Arc<dyn HealthIndicator>>(indicator)
            }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities;
    use actuate_autoconfig::testing::ContextRunner;
    use actuate_autoconfig::AutoConfigurations;
    use actuate_types::Health;
    use async_trait::async_trait;

    struct Custom;

    #[async_trait]
    impl HealthIndicator for Custom {
        fn name(&self) -> &str {
            "custom"
        }

        async fn check(&self) -> Health {
            Health::up()
        }
    }

    fn runner() -> ContextRunner {
        ContextRunner::new()
            .with_configuration(AutoConfigurations::of([health_indicator_auto_configuration()]))
            .with_capabilities(capabilities().iter().cloned())
    }

    #[test]
    fn test_registers_application_indicator_by_default() {
        runner().run(|ctx| {
            ctx.has_single_component::<Arc<ApplicationHealthIndicator>>()
                .has_single_component::<Arc<dyn HealthIndicator>>();
        });
    }

    #[test]
    fn test_backs_off_when_indicator_exists() {
        runner()
            .with_component::<Arc<dyn HealthIndicator>>("custom", Arc::new(Custom))
            .run(|ctx| {
                ctx.does_not_have_component::<Arc<ApplicationHealthIndicator>>();
            });
    }

    #[test]
    fn test_requires_health_indicator_capability() {
        runner()
            .with_filtered_capabilities([HEALTH_INDICATOR])
            .run(|ctx| {
                ctx.does_not_have_component::<Arc<dyn HealthIndicator>>();
            });
    }
}
