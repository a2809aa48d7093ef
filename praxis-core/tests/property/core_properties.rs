use praxis_core::models::{Budget, EpisodeMetrics, EpisodeResult, StepRecord};
use praxis_core::{Action, TerminationReason, UncertaintyMetrics};
use proptest::prelude::*;

fn arb_reason() -> impl Strategy<Value = TerminationReason> {
    prop_oneof![
        Just(TerminationReason::MaxStepsReached),
        Just(TerminationReason::EnvironmentTerminal),
        Just(TerminationReason::CustomTermination),
        Just(TerminationReason::ActiveLearningTermination),
        Just(TerminationReason::Stopped),
        Just(TerminationReason::Error),
    ]
}

fn make_result(rewards: &[f64], reason: TerminationReason) -> EpisodeResult {
    let now = chrono::Utc::now();
    let steps = rewards
        .iter()
        .enumerate()
        .map(|(i, r)| StepRecord {
            step: i as u32,
            action: Action::wait(),
            reward: *r,
            uncertainty: UncertaintyMetrics::from_components(0.2, 0.1, 0.8),
            query_id: None,
            consultation_id: None,
            learning_opportunity: 0.5,
            used_fallback: false,
            success: Some(*r > 0.0),
        })
        .collect();
    EpisodeResult {
        episode_id: "ep".to_string(),
        episode_index: 0,
        steps,
        total_reward: rewards.iter().sum(),
        termination_reason: reason,
        metrics: EpisodeMetrics::default(),
        curriculum_level: 1,
        case_ids: vec![],
        started_at: now,
        finished_at: now,
    }
}

// ── Uncertainty invariants ───────────────────────────────────────────────

proptest! {
    #[test]
    fn confidence_always_in_unit_interval(
        epistemic in -1.0f64..2.0,
        aleatoric in -1.0f64..2.0,
        confidence in -5.0f64..5.0,
    ) {
        let m = UncertaintyMetrics::from_components(epistemic, aleatoric, confidence);
        prop_assert!((0.0..=1.0).contains(&m.confidence));
        prop_assert!((0.0..=1.0).contains(&m.information_gain));
    }

    #[test]
    fn total_matches_components(
        epistemic in 0.0f64..1.0,
        aleatoric in 0.0f64..1.0,
        confidence in 0.0f64..1.0,
    ) {
        let m = UncertaintyMetrics::from_components(epistemic, aleatoric, confidence);
        let expected = (m.epistemic.powi(2) + m.aleatoric.powi(2)).sqrt();
        prop_assert!((m.total - expected).abs() < 1e-9);
    }
}

// ── Budget invariants ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn budget_never_exceeds_max(max in 0u32..20, attempts in 0usize..50) {
        let mut budget = Budget::new(max);
        let granted = (0..attempts).filter(|_| budget.try_consume()).count() as u32;
        prop_assert!(granted <= max);
        prop_assert_eq!(budget.used(), granted);
        prop_assert!(budget.remaining() <= max);
        budget.reset();
        prop_assert_eq!(budget.remaining(), max);
    }
}

// ── Episode export round-trip ────────────────────────────────────────────

proptest! {
    #[test]
    fn episode_json_round_trip_preserves_aggregates(
        rewards in prop::collection::vec(-1.0f64..1.0, 0..30),
        reason in arb_reason(),
    ) {
        let original = make_result(&rewards, reason);
        let restored = EpisodeResult::from_json(&original.to_json().unwrap()).unwrap();
        prop_assert_eq!(restored.step_count(), original.step_count());
        prop_assert_eq!(restored.termination_reason, original.termination_reason);
        prop_assert!((restored.reward_sum() - original.reward_sum()).abs() < 1e-9);
        prop_assert!((restored.total_reward - original.total_reward).abs() < 1e-9);
    }
}
