//! EventDispatcher: synchronous fan-out that never fails the caller.

use std::sync::Arc;

use super::handler::TrainingEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// A panicking handler is caught and logged; later handlers still receive the event.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn TrainingEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Arc<dyn TrainingEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    fn emit<F: Fn(&dyn TrainingEventHandler)>(&self, event: &'static str, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!(event, "event handler panicked; continuing");
            }
        }
    }

    /// Route an owned event to the matching handler method.
    pub fn dispatch(&self, event: &TrainingEvent) {
        match event {
            TrainingEvent::EpisodeStarted(e) => self.emit_episode_started(e),
            TrainingEvent::EpisodeCompleted(e) => self.emit_episode_completed(e),
            TrainingEvent::EpisodeFailed(e) => self.emit_episode_failed(e),
            TrainingEvent::ActiveQueryGenerated(e) => self.emit_active_query_generated(e),
            TrainingEvent::CurriculumAdvanced(e) => self.emit_curriculum_advanced(e),
            TrainingEvent::ExpertConsultationRequested(e) => {
                self.emit_expert_consultation_requested(e)
            }
            TrainingEvent::ExpertConsultationResolved(e) => {
                self.emit_expert_consultation_resolved(e)
            }
            TrainingEvent::StrategyChanged(e) => self.emit_strategy_changed(e),
            TrainingEvent::SessionStateChanged(e) => self.emit_session_state_changed(e),
        }
    }

    // ---- Episode lifecycle ----
    pub fn emit_episode_started(&self, event: &EpisodeStartedEvent) {
        self.emit("episode_started", |h| h.on_episode_started(event));
    }

    pub fn emit_episode_completed(&self, event: &EpisodeCompletedEvent) {
        self.emit("episode_completed", |h| h.on_episode_completed(event));
    }

    pub fn emit_episode_failed(&self, event: &EpisodeFailedEvent) {
        self.emit("episode_failed", |h| h.on_episode_failed(event));
    }

    // ---- Active learning ----
    pub fn emit_active_query_generated(&self, event: &ActiveQueryGeneratedEvent) {
        self.emit("active_query_generated", |h| h.on_active_query_generated(event));
    }

    pub fn emit_expert_consultation_requested(&self, event: &ExpertConsultationRequestedEvent) {
        self.emit("expert_consultation_requested", |h| {
            h.on_expert_consultation_requested(event)
        });
    }

    pub fn emit_expert_consultation_resolved(&self, event: &ExpertConsultationResolvedEvent) {
        self.emit("expert_consultation_resolved", |h| {
            h.on_expert_consultation_resolved(event)
        });
    }

    // ---- Adaptation ----
    pub fn emit_curriculum_advanced(&self, event: &CurriculumAdvancedEvent) {
        self.emit("curriculum_advanced", |h| h.on_curriculum_advanced(event));
    }

    pub fn emit_strategy_changed(&self, event: &StrategyChangedEvent) {
        self.emit("strategy_changed", |h| h.on_strategy_changed(event));
    }

    // ---- Session ----
    pub fn emit_session_state_changed(&self, event: &SessionStateChangedEvent) {
        self.emit("session_state_changed", |h| h.on_session_state_changed(event));
    }
}
