use praxis_core::models::{AgeBucket, ComplaintCategory};
use praxis_core::traits::GenerationOptions;
use praxis_sim::environment::{disposition_reward, Disposition};
use praxis_sim::SyntheticCaseGenerator;
use proptest::prelude::*;

fn bucket() -> impl Strategy<Value = Option<AgeBucket>> {
    prop::option::of(prop::sample::select(vec![
        AgeBucket::Pediatric,
        AgeBucket::Adult,
        AgeBucket::Geriatric,
    ]))
}

fn category() -> impl Strategy<Value = Option<ComplaintCategory>> {
    prop::option::of(prop::sample::select(ComplaintCategory::ALL.to_vec()))
}

// ── Generated cases honour their options ────────────────────────────────

proptest! {
    #[test]
    fn cases_respect_generation_options(
        seed in any::<u64>(),
        low in 1u8..=5,
        span in 0u8..=4,
        age_bucket in bucket(),
        complaint_category in category(),
        max_comorbidities in prop::option::of(0usize..4),
    ) {
        let high = (low + span).min(5);
        let options = GenerationOptions {
            acuity_range: Some((low, high)),
            complaint_category,
            age_bucket,
            max_comorbidities,
        };
        let mut generator = SyntheticCaseGenerator::new(seed);
        for case in generator.generate_batch(5, &options).unwrap() {
            prop_assert!((low..=high).contains(&case.acuity));
            if let Some(c) = complaint_category {
                prop_assert_eq!(case.complaint_category, c);
            }
            if let Some(b) = age_bucket {
                prop_assert_eq!(case.age_bucket(), b);
            }
            if let Some(max) = max_comorbidities {
                prop_assert!(case.comorbidities.len() <= max);
            }
            prop_assert_eq!(
                case.expected_action.as_str(),
                Disposition::for_acuity(case.acuity).as_str()
            );
        }
    }

    #[test]
    fn rewards_peak_at_the_reference_disposition(
        chosen in prop::sample::select(Disposition::ALL.to_vec()),
        expected in prop::sample::select(Disposition::ALL.to_vec()),
    ) {
        let reward = disposition_reward(chosen, expected);
        prop_assert!(reward <= disposition_reward(expected, expected));
        prop_assert_eq!(reward == 1.0, chosen == expected);
    }
}
