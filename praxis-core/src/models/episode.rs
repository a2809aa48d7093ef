use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::Action;
use super::uncertainty::UncertaintyMetrics;
use crate::errors::PraxisResult;

/// Why an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    MaxStepsReached,
    EnvironmentTerminal,
    /// A user-supplied termination rule fired.
    CustomTermination,
    /// Learning opportunity dried up (diminishing returns).
    ActiveLearningTermination,
    /// The session was stopped between steps.
    Stopped,
    Error,
}

impl TerminationReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MaxStepsReached => "max_steps_reached",
            Self::EnvironmentTerminal => "environment_terminal",
            Self::CustomTermination => "custom_termination",
            Self::ActiveLearningTermination => "active_learning_termination",
            Self::Stopped => "stopped",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of an episode, numbered from 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: u32,
    pub action: Action,
    pub reward: f64,
    pub uncertainty: UncertaintyMetrics,
    pub query_id: Option<String>,
    pub consultation_id: Option<String>,
    pub learning_opportunity: f64,
    /// The environment offered no actions and the loop waited instead.
    pub used_fallback: bool,
    pub success: Option<bool>,
}

/// Aggregates computed once when an episode ends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeMetrics {
    /// Cumulative information gain per step.
    pub learning_efficiency: f64,
    /// First-half minus second-half mean total uncertainty.
    pub uncertainty_reduction: f64,
    /// Least-squares slope of reward over steps.
    pub learning_velocity: f64,
    pub queries_used: u32,
    pub consultations_used: u32,
    pub success_rate: f64,
    pub consistency: f64,
    /// Curriculum completion (level / max level) when the episode ended.
    pub curriculum_progress: f64,
}

/// Append-only record of a finished episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeResult {
    pub episode_id: String,
    pub episode_index: u64,
    pub steps: Vec<StepRecord>,
    pub total_reward: f64,
    pub termination_reason: TerminationReason,
    pub metrics: EpisodeMetrics,
    pub curriculum_level: u32,
    pub case_ids: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl EpisodeResult {
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Sum of per-step rewards, recomputed from the step records.
    pub fn reward_sum(&self) -> f64 {
        self.steps.iter().map(|s| s.reward).sum()
    }

    pub fn to_json(&self) -> PraxisResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> PraxisResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn termination_reason_wire_names() {
        let json = serde_json::to_string(&TerminationReason::ActiveLearningTermination).unwrap();
        assert_eq!(json, "\"active_learning_termination\"");
        assert_eq!(TerminationReason::MaxStepsReached.to_string(), "max_steps_reached");
    }
}
