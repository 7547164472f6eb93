//! Property tests: evaluation is pure, explicit opt-out always wins, and a
//! rule registers only when every condition holds.

use actuate_autoconfig::{ConditionEvaluator, EnvironmentSnapshot, RegistrationRule};
use actuate_registry::ComponentDefinition;
use proptest::prelude::*;

#[derive(Clone)]
struct Driver;

const MARKERS: [&str; 3] = ["indicator", "driver", "status"];

fn rule() -> RegistrationRule {
    RegistrationRule::builder("indicator")
        .health_indicator_enabled("sample")
        .capability("indicator")
        .capability("driver")
        .capability("status")
        .construct_with(|_: Driver| ComponentDefinition::new("sampleIndicator", 1u8))
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// `None` leaves the property unset.
fn arb_enabled() -> impl Strategy<Value = Option<&'static str>> {
    prop_oneof![
        Just(None),
        Just(Some("true")),
        Just(Some("false")),
        Just(Some("FALSE")),
        Just(Some("True")),
        Just(Some("on")),
        Just(Some("off")),
        Just(Some("1")),
        Just(Some("no")),
    ]
}

fn arb_snapshot() -> impl Strategy<Value = EnvironmentSnapshot> {
    (
        arb_enabled(),
        prop::collection::vec(any::<bool>(), 3),
        0usize..3,
        any::<bool>(),
    )
        .prop_map(|(enabled, markers, drivers, unrelated)| {
            let mut builder = EnvironmentSnapshot::builder();
            if let Some(value) = enabled {
                builder = builder.property("management.health.sample.enabled", value);
            }
            for (marker, present) in MARKERS.iter().zip(markers) {
                if present {
                    builder = builder.capability(*marker);
                }
            }
            for i in 0..drivers {
                builder = builder.component::<Driver>(format!("driver{}", i));
            }
            if unrelated {
                builder = builder.component::<String>("unrelated");
            }
            builder.build()
        })
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn evaluation_is_idempotent(snapshot in arb_snapshot()) {
        let evaluator = ConditionEvaluator::new();
        let rule = rule();
        prop_assert_eq!(evaluator.evaluate(&snapshot, &rule), evaluator.evaluate(&snapshot, &rule));
    }

    #[test]
    fn explicit_opt_out_always_wins(snapshot in arb_snapshot()) {
        let disabled = snapshot
            .properties()
            .get_bool("management.health.sample.enabled")
            .unwrap()
            == Some(false);
        let decision = ConditionEvaluator::new().evaluate(&snapshot, &rule());
        if disabled {
            prop_assert!(!decision.register());
            prop_assert_eq!(decision.report().outcomes().len(), 1);
        }
    }

    #[test]
    fn registers_exactly_when_all_conditions_hold(snapshot in arb_snapshot()) {
        let enabled = snapshot
            .properties()
            .get_bool("management.health.sample.enabled")
            .unwrap()
            .unwrap_or(true);
        let markers = MARKERS.iter().all(|m| snapshot.has_capability(&(*m).into()));
        let single_driver = snapshot
            .candidates(&actuate_types::ComponentType::of::<Driver>())
            .len()
            == 1;

        let decision = ConditionEvaluator::new().evaluate(&snapshot, &rule());

        prop_assert_eq!(decision.register(), enabled && markers && single_driver);
        prop_assert_eq!(decision.construction().is_some(), decision.register());
    }
}
