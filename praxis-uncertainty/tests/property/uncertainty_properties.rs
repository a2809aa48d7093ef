use praxis_core::config::{QueryConfig, QueryStrategy};
use praxis_core::models::{Budget, State};
use praxis_core::UncertaintyMetrics;
use praxis_uncertainty::{half_split_reduction, ActiveQuerySelector};
use proptest::prelude::*;

fn arb_strategy() -> impl Strategy<Value = QueryStrategy> {
    prop_oneof![
        Just(QueryStrategy::UncertaintySampling),
        Just(QueryStrategy::InformationGain),
        Just(QueryStrategy::EpsilonGreedy),
        Just(QueryStrategy::ThompsonSampling),
        Just(QueryStrategy::Adaptive),
    ]
}

// ── Query budget ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn queries_never_exceed_budget(
        budget_max in 0u32..6,
        strategy in arb_strategy(),
        seed in any::<u64>(),
        samples in prop::collection::vec((0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0), 1..40),
    ) {
        let mut selector = ActiveQuerySelector::new(QueryConfig {
            strategy,
            seed,
            ..QueryConfig::default()
        });
        let mut budget = Budget::new(budget_max);
        let mut generated = 0u32;
        for (i, (e, a, c)) in samples.iter().enumerate() {
            let u = UncertaintyMetrics::from_components(*e, *a, *c);
            if let Some(q) = selector.maybe_query(&State::new(i as u32), &[], &u, &mut budget) {
                prop_assert!((0.0..=1.0).contains(&q.expected_benefit));
                generated += 1;
            }
        }
        prop_assert!(generated <= budget_max);
        prop_assert_eq!(budget.used(), generated);
    }
}

// ── Trend statistics ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn constant_sequence_has_no_reduction(value in 0.0f64..1.0, len in 0usize..30) {
        let values = vec![value; len];
        prop_assert!(half_split_reduction(&values).abs() < 1e-9);
    }
}
