//! Context runner behaviour: ordering, user configuration, startup failures.

use actuate_autoconfig::testing::ContextRunner;
use actuate_autoconfig::{
    AutoConfigError, AutoConfiguration, AutoConfigurations, Condition, RegistrationRule,
};
use actuate_registry::{ComponentDefinition, ComponentRegistryExt, RegistryError};

#[derive(Debug, Clone, PartialEq)]
struct Endpoint(&'static str);

#[derive(Debug, Clone, PartialEq)]
struct Fallback;

fn endpoint_label() -> AutoConfiguration {
    AutoConfiguration::new("endpoint-label")
        .before("fallback")
        .rule(
            RegistrationRule::builder("endpoint-label")
                .property_enabled("endpoint.label.enabled", true)
                .capability("labels")
                .unless_present::<String>()
                .construct_with(|e: Endpoint| {
                    ComponentDefinition::new("endpointLabel", format!("endpoint {}", e.0))
                }),
        )
}

fn fallback() -> AutoConfiguration {
    AutoConfiguration::new("fallback").rule(
        RegistrationRule::builder("fallback")
            .unless_present::<String>()
            .construct(|| {
                ComponentDefinition::new("fallback", Fallback)
                    .expose_as::<String>("fallback".to_string())
            }),
    )
}

fn runner() -> ContextRunner {
    ContextRunner::new()
        .with_configuration(AutoConfigurations::of([fallback(), endpoint_label()]))
        .with_capabilities(["labels"])
}

#[test]
fn specific_configuration_runs_before_fallback() {
    runner()
        .with_component("endpoint", Endpoint("db:7687"))
        .run(|ctx| {
            ctx.has_single_component::<String>()
                .does_not_have_component::<Fallback>();
            assert_eq!(ctx.component::<String>(), "endpoint db:7687");
            assert_eq!(ctx.report().positive_matches().count(), 1);
        });
}

#[test]
fn fallback_registers_when_specific_is_disabled() {
    runner()
        .with_component("endpoint", Endpoint("db:7687"))
        .with_property_values(["endpoint.label.enabled=false"])
        .run(|ctx| {
            ctx.has_single_component::<Fallback>();
            let evaluation = ctx.report().for_rule("endpoint-label").unwrap();
            assert!(!evaluation.report.matched());
            assert!(evaluation.report.outcomes()[0].message.contains("is false"));
        });
}

#[test]
fn user_component_suppresses_auto_configuration() {
    runner()
        .with_component("endpoint", Endpoint("db:7687"))
        .with_component("custom", String::from("mine"))
        .run(|ctx| {
            assert_eq!(ctx.component::<String>(), "mine");
            ctx.does_not_have_component::<Fallback>();
        });
}

#[test]
fn filtered_capability_skips_registration() {
    runner()
        .with_component("endpoint", Endpoint("db:7687"))
        .with_filtered_capabilities(["labels"])
        .run(|ctx| {
            ctx.has_single_component::<Fallback>();
            let evaluation = ctx.report().for_rule("endpoint-label").unwrap();
            assert_eq!(evaluation.report.failures().count(), 1);
        });
}

#[test]
fn malformed_property_fails_startup() {
    runner()
        .with_property_values(["not-a-pair"])
        .run(|ctx| {
            ctx.has_failed();
            assert!(matches!(
                ctx.startup_failure(),
                Some(AutoConfigError::Property(_))
            ));
        });
}

#[test]
fn failing_user_configuration_fails_startup() {
    runner()
        .with_user_configuration("twice", |registry| {
            registry.register("dup", 1u8)?;
            registry.register("dup", 2u8)
        })
        .run(|ctx| {
            match ctx.startup_failure() {
                Some(AutoConfigError::UserConfiguration { name, source }) => {
                    assert_eq!(name, "twice");
                    assert!(matches!(source, RegistryError::DuplicateComponent { .. }));
                }
                other => panic!("unexpected outcome: {:?}", other),
            }
        });
}

#[test]
fn ordering_cycle_fails_startup() {
    let a = AutoConfiguration::new("a").before("b");
    let b = AutoConfiguration::new("b").before("a");

    ContextRunner::new()
        .with_configuration(AutoConfigurations::of([a, b]))
        .run(|ctx| {
            assert!(matches!(
                ctx.startup_failure(),
                Some(AutoConfigError::OrderingCycle(_))
            ));
        });
}

#[test]
fn condition_descriptions_name_their_subject() {
    let condition = Condition::health_indicator_enabled("graph");
    assert_eq!(
        condition.describe(),
        "property_enabled(management.health.graph.enabled)"
    );
}
