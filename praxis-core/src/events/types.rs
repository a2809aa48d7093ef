//! Event payloads emitted by a training session.

use serde::{Deserialize, Serialize};

use crate::models::{
    ActiveQuery, EpisodeMetrics, LevelChange, SessionState, TerminationReason,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeStartedEvent {
    pub session_id: String,
    pub episode_id: String,
    pub episode_index: u64,
    pub curriculum_level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeCompletedEvent {
    pub session_id: String,
    pub episode_id: String,
    pub episode_index: u64,
    pub termination_reason: TerminationReason,
    pub total_reward: f64,
    pub steps: usize,
    pub metrics: EpisodeMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeFailedEvent {
    pub session_id: String,
    pub episode_id: String,
    pub episode_index: u64,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveQueryGeneratedEvent {
    pub session_id: String,
    pub episode_id: String,
    pub query: ActiveQuery,
    pub budget_remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurriculumAdvancedEvent {
    pub session_id: String,
    pub change: LevelChange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpertConsultationRequestedEvent {
    pub session_id: String,
    pub episode_id: String,
    pub request_id: String,
    pub step: u32,
    pub uncertainty_total: f64,
    pub budget_remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpertConsultationResolvedEvent {
    pub session_id: String,
    pub request_id: String,
    pub recommendation: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyChangedEvent {
    pub session_id: String,
    pub from: String,
    pub to: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStateChangedEvent {
    pub session_id: String,
    pub state: SessionState,
}

/// Owned union of every event, for queue-based consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrainingEvent {
    EpisodeStarted(EpisodeStartedEvent),
    EpisodeCompleted(EpisodeCompletedEvent),
    EpisodeFailed(EpisodeFailedEvent),
    ActiveQueryGenerated(ActiveQueryGeneratedEvent),
    CurriculumAdvanced(CurriculumAdvancedEvent),
    ExpertConsultationRequested(ExpertConsultationRequestedEvent),
    ExpertConsultationResolved(ExpertConsultationResolvedEvent),
    StrategyChanged(StrategyChangedEvent),
    SessionStateChanged(SessionStateChangedEvent),
}

impl TrainingEvent {
    /// Stable wire name of the event.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EpisodeStarted(_) => "episode_started",
            Self::EpisodeCompleted(_) => "episode_completed",
            Self::EpisodeFailed(_) => "episode_failed",
            Self::ActiveQueryGenerated(_) => "active_query_generated",
            Self::CurriculumAdvanced(_) => "curriculum_advanced",
            Self::ExpertConsultationRequested(_) => "expert_consultation_requested",
            Self::ExpertConsultationResolved(_) => "expert_consultation_resolved",
            Self::StrategyChanged(_) => "strategy_changed",
            Self::SessionStateChanged(_) => "session_state_changed",
        }
    }
}
