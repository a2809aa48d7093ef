use praxis_core::config::CurriculumConfig;
use praxis_core::models::EpisodePerformance;
use praxis_curriculum::CurriculumManager;
use proptest::prelude::*;

// ── Level bounds and monotonicity ────────────────────────────────────────

proptest! {
    #[test]
    fn level_is_monotone_and_bounded(
        max_level in 1u32..8,
        episodes in prop::collection::vec((0.0f64..=1.0, 0.0f64..=1.0), 0..120),
    ) {
        let mut manager = CurriculumManager::new(CurriculumConfig {
            max_level,
            ..CurriculumConfig::default()
        });
        let mut previous = manager.level();
        for (success, consistency) in episodes {
            manager.record_episode(&EpisodePerformance::new(success, consistency));
            let change = manager.check_advancement();
            let level = manager.level();
            prop_assert!(level >= 1 && level <= max_level);
            prop_assert!(level >= previous);
            prop_assert!(level - previous <= 1);
            prop_assert_eq!(change.is_some(), level != previous);
            previous = level;
        }
    }

    #[test]
    fn regression_stays_within_bounds(
        episodes in prop::collection::vec((0.0f64..=1.0, 0.0f64..=1.0), 0..120),
    ) {
        let mut manager = CurriculumManager::new(CurriculumConfig {
            allow_regression: true,
            ..CurriculumConfig::default()
        });
        for (success, consistency) in episodes {
            manager.record_episode(&EpisodePerformance::new(success, consistency));
            manager.check_advancement();
            prop_assert!((1..=manager.max_level()).contains(&manager.level()));
        }
    }
}

// ── Complexity window ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn widened_range_contains_base_range(
        level in 1u32..=5,
        pool in prop::collection::vec(0.0f64..=1.0, 0..40),
        min_count in 0usize..50,
    ) {
        let manager = CurriculumManager::new(CurriculumConfig::default());
        let base = manager.complexity_range(level);
        let widened = manager.range_for_pool(level, &pool, min_count);
        prop_assert!(widened.min <= base.min && widened.max >= base.max);
        prop_assert!(widened.min >= 0.0 && widened.max <= 1.0);
        prop_assert!(widened.count_within(&pool) >= min_count.min(pool.len()) || widened.covers_axis());
    }
}
