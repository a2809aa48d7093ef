//! CurriculumManager: owns the level, the performance window and competency scores.

use praxis_core::config::CurriculumConfig;
use praxis_core::models::{
    AdaptationStrategy, EpisodePerformance, LearningCurriculum, LevelChange, LevelDirection,
};
use tracing::{debug, info};

use crate::competency::CompetencyTracker;
use crate::range::ComplexityRange;
use crate::window::PerformanceWindow;

/// Per-session curriculum.
///
/// The level only changes in `check_advancement`, called once per episode
/// boundary after `record_episode`. It never leaves `[1, max_level]`.
pub struct CurriculumManager {
    config: CurriculumConfig,
    curriculum: LearningCurriculum,
    window: PerformanceWindow,
    competencies: CompetencyTracker,
}

impl CurriculumManager {
    pub fn new(config: CurriculumConfig) -> Self {
        Self::with_strategy(config, AdaptationStrategy::PerformanceWindow)
    }

    pub fn with_strategy(config: CurriculumConfig, strategy: AdaptationStrategy) -> Self {
        let curriculum = LearningCurriculum::new(config.max_level, strategy);
        let window = PerformanceWindow::new(config.window_size);
        let competencies =
            CompetencyTracker::new(config.competency_ema_alpha, config.competency_prior);
        Self {
            config,
            curriculum,
            window,
            competencies,
        }
    }

    pub fn level(&self) -> u32 {
        self.curriculum.current_level
    }

    pub fn max_level(&self) -> u32 {
        self.curriculum.max_level
    }

    pub fn curriculum(&self) -> &LearningCurriculum {
        &self.curriculum
    }

    pub fn competencies(&self) -> &CompetencyTracker {
        &self.competencies
    }

    /// Competency tags below the configured struggling threshold, weakest first.
    pub fn struggling_competencies(&self) -> Vec<String> {
        self.competencies.struggling(self.config.competency_threshold)
    }

    /// Feed one finished episode into the window and the competency scores.
    pub fn record_episode(&mut self, performance: &EpisodePerformance) {
        self.window
            .push(performance.success_rate, performance.consistency);
        for (tag, success) in &performance.competency_outcomes {
            self.competencies.record(tag, *success);
        }

        let progress = &mut self.curriculum.progress;
        progress.total_episodes += 1;
        progress.episodes_at_level += 1;
        progress.window_success_rate = self.window.mean_success();
        progress.window_consistency = self.window.mean_consistency();
        progress.competency_scores = self.competencies.snapshot();

        debug!(
            level = self.curriculum.current_level,
            window_len = self.window.len(),
            window_success = progress.window_success_rate,
            window_consistency = progress.window_consistency,
            "curriculum episode recorded"
        );
    }

    /// Evaluate the window and change level at most once.
    ///
    /// Fires only on a full window; the window is cleared after a change so
    /// the next change needs a fresh window of evidence.
    pub fn check_advancement(&mut self) -> Option<LevelChange> {
        if self.curriculum.adaptation_strategy == AdaptationStrategy::Fixed
            || !self.window.is_full()
        {
            return None;
        }

        let success_rate = self.window.mean_success();
        let consistency = self.window.mean_consistency();
        let from = self.curriculum.current_level;

        let direction = if success_rate > self.config.advance_success_rate
            && consistency > self.config.advance_consistency
            && !self.curriculum.is_at_max()
        {
            LevelDirection::Advanced
        } else if self.config.allow_regression
            && success_rate < self.config.regression_success_rate
            && from > 1
        {
            LevelDirection::Regressed
        } else {
            return None;
        };

        let to = match direction {
            LevelDirection::Advanced => from + 1,
            LevelDirection::Regressed => from - 1,
        };
        self.curriculum.current_level = to;
        let progress = &mut self.curriculum.progress;
        progress.episodes_at_level = 0;
        match direction {
            LevelDirection::Advanced => progress.advancements += 1,
            LevelDirection::Regressed => progress.regressions += 1,
        }
        self.window.clear();

        info!(
            from,
            to,
            direction = ?direction,
            success_rate,
            consistency,
            "curriculum level changed"
        );

        Some(LevelChange {
            from,
            to,
            direction,
            success_rate,
            consistency,
        })
    }

    /// Complexity window for `level`: fixed width centred at `level / max_level`.
    pub fn complexity_range(&self, level: u32) -> ComplexityRange {
        let level = level.clamp(1, self.curriculum.max_level);
        let center = f64::from(level) / f64::from(self.curriculum.max_level);
        ComplexityRange::centered(center, self.config.complexity_window_width)
    }

    pub fn current_range(&self) -> ComplexityRange {
        self.complexity_range(self.curriculum.current_level)
    }

    /// Widen the level's window until `min_count` complexities fall inside or
    /// the whole axis is covered.
    pub fn range_for_pool(&self, level: u32, complexities: &[f64], min_count: usize) -> ComplexityRange {
        let mut range = self.complexity_range(level);
        let step = self.config.complexity_widen_step;
        while range.count_within(complexities) < min_count && !range.covers_axis() {
            range = range.widened(step);
        }
        range
    }
}
