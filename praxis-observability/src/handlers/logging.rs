//! Writes every training event as a structured tracing event.

use praxis_core::events::*;
use praxis_core::models::LevelDirection;

use crate::tracing_setup::events;

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingEventHandler;

impl LoggingEventHandler {
    pub fn new() -> Self {
        Self
    }
}

impl TrainingEventHandler for LoggingEventHandler {
    fn on_episode_started(&self, event: &EpisodeStartedEvent) {
        events::episode_started(&event.episode_id, event.episode_index, event.curriculum_level);
    }

    fn on_episode_completed(&self, event: &EpisodeCompletedEvent) {
        events::episode_completed(
            &event.episode_id,
            event.termination_reason.as_str(),
            event.total_reward,
            event.steps,
        );
    }

    fn on_episode_failed(&self, event: &EpisodeFailedEvent) {
        events::episode_failed(&event.episode_id, &event.error);
    }

    fn on_active_query_generated(&self, event: &ActiveQueryGeneratedEvent) {
        events::query_generated(
            &event.query.id,
            event.query.query_type.as_str(),
            event.query.uncertainty.total,
            event.budget_remaining,
        );
    }

    fn on_expert_consultation_requested(&self, event: &ExpertConsultationRequestedEvent) {
        events::consultation_requested(&event.request_id, event.step, event.uncertainty_total);
    }

    fn on_expert_consultation_resolved(&self, event: &ExpertConsultationResolvedEvent) {
        events::consultation_resolved(&event.request_id, &event.recommendation, event.confidence);
    }

    fn on_curriculum_advanced(&self, event: &CurriculumAdvancedEvent) {
        let change = &event.change;
        let direction = match change.direction {
            LevelDirection::Advanced => "advanced",
            LevelDirection::Regressed => "regressed",
        };
        events::curriculum_changed(change.from, change.to, direction, change.success_rate);
    }

    fn on_strategy_changed(&self, event: &StrategyChangedEvent) {
        events::strategy_changed(&event.from, &event.to, &event.reason);
    }

    fn on_session_state_changed(&self, event: &SessionStateChangedEvent) {
        events::session_state_changed(&event.session_id, &event.state.to_string());
    }
}
