use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::{Action, State};
use super::uncertainty::UncertaintyMetrics;

/// Lifecycle of a consultation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationStatus {
    Pending,
    Resolved,
    /// Never answered before the episode ended.
    Discarded,
}

/// What the expert sees alongside the question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationContext {
    pub state: State,
    pub candidate_actions: Vec<Action>,
    /// The agent's highest-confidence action at the time of asking.
    pub agent_preference: Option<Action>,
    pub topic: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationRequest {
    pub id: String,
    pub question: String,
    pub context: ConsultationContext,
    pub uncertainty: UncertaintyMetrics,
    pub step: u32,
    pub created_at: DateTime<Utc>,
    pub status: ConsultationStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationResponse {
    pub request_id: String,
    /// Name of the recommended action.
    pub recommendation: String,
    pub confidence: f64,
    pub feedback_text: String,
}
