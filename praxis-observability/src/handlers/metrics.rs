//! Folds training events into [`TrainingMetrics`].

use std::sync::Mutex;

use praxis_core::events::*;
use praxis_core::models::LevelDirection;

use crate::metrics::TrainingMetrics;

#[derive(Debug, Default)]
pub struct MetricsEventHandler {
    metrics: Mutex<TrainingMetrics>,
}

impl MetricsEventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the metrics gathered so far.
    pub fn snapshot(&self) -> TrainingMetrics {
        match self.metrics.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn with<F: FnOnce(&mut TrainingMetrics)>(&self, f: F) {
        match self.metrics.lock() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl TrainingEventHandler for MetricsEventHandler {
    fn on_episode_started(&self, _event: &EpisodeStartedEvent) {
        self.with(|m| m.episodes.record_started());
    }

    fn on_episode_completed(&self, event: &EpisodeCompletedEvent) {
        self.with(|m| {
            m.episodes.record_completed(
                event.termination_reason.as_str(),
                event.total_reward,
                event.steps,
            )
        });
    }

    fn on_episode_failed(&self, _event: &EpisodeFailedEvent) {
        self.with(|m| m.episodes.record_failed());
    }

    fn on_active_query_generated(&self, event: &ActiveQueryGeneratedEvent) {
        self.with(|m| m.learning.record_query(event.query.query_type.as_str()));
    }

    fn on_expert_consultation_requested(&self, _event: &ExpertConsultationRequestedEvent) {
        self.with(|m| m.learning.record_consultation_requested());
    }

    fn on_expert_consultation_resolved(&self, _event: &ExpertConsultationResolvedEvent) {
        self.with(|m| m.learning.record_consultation_resolved());
    }

    fn on_curriculum_advanced(&self, event: &CurriculumAdvancedEvent) {
        let advanced = event.change.direction == LevelDirection::Advanced;
        self.with(|m| m.learning.record_level_change(event.change.to, advanced));
    }

    fn on_strategy_changed(&self, event: &StrategyChangedEvent) {
        self.with(|m| m.learning.record_strategy_change(&event.to));
    }
}
