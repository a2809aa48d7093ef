use chrono::Utc;
use praxis_core::models::{
    Action, EpisodeMetrics, EpisodeResult, StepRecord, TerminationReason, UncertaintyMetrics,
};
use praxis_orchestrator::metrics::{consistency, diminishing_returns, learning_opportunity, success_rate};
use praxis_orchestrator::EpisodeHistory;
use proptest::prelude::*;

fn step(index: u32, reward: f64, success: Option<bool>, opportunity: f64) -> StepRecord {
    StepRecord {
        step: index,
        action: Action::wait(),
        reward,
        uncertainty: UncertaintyMetrics::sentinel(),
        query_id: None,
        consultation_id: None,
        learning_opportunity: opportunity,
        used_fallback: false,
        success,
    }
}

fn steps_strategy() -> impl Strategy<Value = Vec<StepRecord>> {
    prop::collection::vec(
        (-1.0f64..=1.0, prop::option::of(any::<bool>()), 0.0f64..=1.0),
        0..40,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (reward, success, opp))| step(i as u32, reward, success, opp))
            .collect()
    })
}

fn result(index: u64) -> EpisodeResult {
    EpisodeResult {
        episode_id: format!("ep-{index}"),
        episode_index: index,
        steps: vec![],
        total_reward: 0.0,
        termination_reason: TerminationReason::EnvironmentTerminal,
        metrics: EpisodeMetrics::default(),
        curriculum_level: 1,
        case_ids: vec![],
        started_at: Utc::now(),
        finished_at: Utc::now(),
    }
}

// ── Step aggregates stay in range ────────────────────────────────────────

proptest! {
    #[test]
    fn opportunity_is_a_unit_score(
        epistemic in 0.0f64..3.0,
        aleatoric in 0.0f64..3.0,
        confidence in -1.0f64..2.0,
    ) {
        let u = UncertaintyMetrics::from_components(epistemic, aleatoric, confidence);
        let o = learning_opportunity(&u);
        prop_assert!((0.0..=1.0).contains(&o));
    }

    #[test]
    fn episode_rates_are_bounded(steps in steps_strategy()) {
        let rate = success_rate(&steps);
        let c = consistency(&steps);
        prop_assert!((0.0..=1.0).contains(&rate));
        prop_assert!((0.0..=1.0).contains(&c));
    }

    #[test]
    fn early_stop_needs_a_full_window(
        steps in steps_strategy(),
        window in 1usize..10,
        min in 0.0f64..=1.0,
    ) {
        if steps.len() < window {
            prop_assert!(!diminishing_returns(&steps, window, min));
        }
        // A floor of zero can never be undercut.
        prop_assert!(!diminishing_returns(&steps, window, 0.0));
    }
}

// ── History retention ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn history_keeps_the_newest_within_capacity(capacity in 1usize..20, pushes in 0u64..60) {
        let mut history = EpisodeHistory::new(capacity);
        for i in 0..pushes {
            history.push(result(i));
        }
        prop_assert_eq!(history.len(), (pushes as usize).min(capacity));
        if pushes > 0 {
            prop_assert_eq!(history.latest().map(|r| r.episode_index), Some(pushes - 1));
            let oldest = history.iter().next().map(|r| r.episode_index);
            prop_assert_eq!(oldest, Some(pushes.saturating_sub(capacity as u64)));
        }
    }
}
