//! Outcome types returned by episodes and training runs.

use praxis_consultation::ConsultationStats;
use praxis_core::errors::PraxisError;
use praxis_core::models::{EpisodeResult, LevelChange};
use praxis_uncertainty::QueryStats;
use serde::{Deserialize, Serialize};

/// An episode that ended in an environment or agent failure.
///
/// `result` holds the steps completed before the failure, with
/// `termination_reason = error`.
#[derive(Debug)]
pub struct EpisodeFailure {
    pub result: EpisodeResult,
    pub error: PraxisError,
}

impl std::fmt::Display for EpisodeFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "episode {} failed: {}", self.result.episode_id, self.error)
    }
}

impl std::error::Error for EpisodeFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl From<EpisodeFailure> for PraxisError {
    fn from(failure: EpisodeFailure) -> Self {
        failure.error
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedEpisode {
    pub episode_id: String,
    pub episode_index: u64,
    pub error: String,
}

/// Summary of a `train` run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub session_id: String,
    pub episodes_requested: u64,
    /// Episodes that ran, including failed and stopped ones.
    pub episodes_run: u64,
    pub failures: Vec<FailedEpisode>,
    /// The run ended early on a stop request.
    pub stopped: bool,
    pub total_reward: f64,
    pub mean_reward: f64,
    pub mean_success_rate: f64,
    pub final_level: u32,
    pub level_changes: Vec<LevelChange>,
    pub final_strategy: String,
    pub queries: QueryStats,
    pub consultations: ConsultationStats,
    pub profile_cache_hit_rate: f64,
}

impl TrainingReport {
    pub fn to_json(&self) -> Result<String, PraxisError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
