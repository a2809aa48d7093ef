//! TrainingEventHandler trait, all methods no-op by default.

use super::types::*;

/// Subscriber to a training session's event stream.
///
/// Handlers override only the events they care about. Dispatch is synchronous
/// and must stay cheap; anything slow belongs behind a queue.
pub trait TrainingEventHandler: Send + Sync {
    // ---- Episode lifecycle ----
    fn on_episode_started(&self, _event: &EpisodeStartedEvent) {}
    fn on_episode_completed(&self, _event: &EpisodeCompletedEvent) {}
    fn on_episode_failed(&self, _event: &EpisodeFailedEvent) {}

    // ---- Active learning ----
    fn on_active_query_generated(&self, _event: &ActiveQueryGeneratedEvent) {}
    fn on_expert_consultation_requested(&self, _event: &ExpertConsultationRequestedEvent) {}
    fn on_expert_consultation_resolved(&self, _event: &ExpertConsultationResolvedEvent) {}

    // ---- Adaptation ----
    fn on_curriculum_advanced(&self, _event: &CurriculumAdvancedEvent) {}
    fn on_strategy_changed(&self, _event: &StrategyChangedEvent) {}

    // ---- Session ----
    fn on_session_state_changed(&self, _event: &SessionStateChangedEvent) {}
}
