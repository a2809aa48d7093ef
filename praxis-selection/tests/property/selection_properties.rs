use chrono::Utc;
use praxis_core::config::{CurriculumConfig, SelectionConfig};
use praxis_core::models::{ComplaintCategory, TrainingCase, VitalSigns};
use praxis_curriculum::CurriculumManager;
use praxis_selection::{CaseSelectionEngine, SelectionContext, SelectionStrategy};
use proptest::prelude::*;

fn arb_case() -> impl Strategy<Value = TrainingCase> {
    (
        0u32..100,
        1u8..=5,
        0usize..ComplaintCategory::ALL.len(),
        0usize..5,
        0.0f64..1.0,
    )
        .prop_map(|(age, acuity, category, comorbidities, spo2_drop)| TrainingCase {
            id: uuid::Uuid::new_v4().to_string(),
            age,
            acuity,
            chief_complaint: "generated".into(),
            complaint_category: ComplaintCategory::ALL[category],
            comorbidities: (0..comorbidities).map(|i| format!("cond-{i}")).collect(),
            vitals: VitalSigns {
                oxygen_saturation: 98.0 - 10.0 * spo2_drop,
                ..VitalSigns::default()
            },
            competencies: vec![ComplaintCategory::ALL[category].as_str().to_string()],
            expected_action: "admit".into(),
            created_at: Utc::now(),
        })
}

fn arb_strategy() -> impl Strategy<Value = SelectionStrategy> {
    prop::sample::select(SelectionStrategy::ALL.to_vec())
}

// ── Batch shape ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn batch_is_distinct_and_bounded(
        pool in prop::collection::vec(arb_case(), 1..40),
        strategy in arb_strategy(),
        target in 0usize..50,
        success in prop::option::of(0.0f64..=1.0),
    ) {
        let curriculum = CurriculumManager::new(CurriculumConfig::default());
        let mut engine = CaseSelectionEngine::with_strategy(
            SelectionConfig { min_selections_for_review: 0, ..SelectionConfig::default() },
            strategy,
        );
        let mut ctx = SelectionContext::new(&curriculum);
        ctx.recent_success_rate = success;
        let result = engine.select(&pool, &ctx, target).unwrap();

        prop_assert!(result.cases.len() <= target.min(pool.len()));
        let mut ids: Vec<_> = result.cases.iter().map(|c| c.id.clone()).collect();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), result.cases.len());
        prop_assert_eq!(result.difficulty_histogram.total(), result.cases.len());
        prop_assert!((0.0..=1.0).contains(&result.expected_benefit));
    }

    #[test]
    fn curriculum_batch_fills_when_pool_allows(
        pool in prop::collection::vec(arb_case(), 1..40),
        target in 1usize..20,
    ) {
        let curriculum = CurriculumManager::new(CurriculumConfig::default());
        let mut engine = CaseSelectionEngine::with_strategy(
            SelectionConfig::default(),
            SelectionStrategy::CurriculumProgressive,
        );
        let result = engine.select(&pool, &SelectionContext::new(&curriculum), target).unwrap();
        prop_assert_eq!(result.cases.len(), target.min(pool.len()));
    }
}
