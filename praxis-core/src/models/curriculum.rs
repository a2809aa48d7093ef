use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How the curriculum level responds to evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdaptationStrategy {
    /// Advance on a rolling window of episode performance.
    PerformanceWindow,
    /// Never change level.
    Fixed,
}

/// Running totals describing curriculum progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressMetrics {
    pub episodes_at_level: u64,
    pub total_episodes: u64,
    pub advancements: u32,
    pub regressions: u32,
    pub window_success_rate: f64,
    pub window_consistency: f64,
    pub competency_scores: BTreeMap<String, f64>,
}

/// Per-session curriculum state. `current_level` stays within `[1, max_level]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningCurriculum {
    pub current_level: u32,
    pub max_level: u32,
    pub adaptation_strategy: AdaptationStrategy,
    pub progress: ProgressMetrics,
}

impl LearningCurriculum {
    pub fn new(max_level: u32, adaptation_strategy: AdaptationStrategy) -> Self {
        Self {
            current_level: 1,
            max_level: max_level.max(1),
            adaptation_strategy,
            progress: ProgressMetrics::default(),
        }
    }

    pub fn is_at_max(&self) -> bool {
        self.current_level >= self.max_level
    }

    /// Fraction of the curriculum completed, in (0, 1].
    pub fn completion(&self) -> f64 {
        f64::from(self.current_level) / f64::from(self.max_level)
    }
}

/// Performance summary the curriculum manager consumes at each episode boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodePerformance {
    pub success_rate: f64,
    pub consistency: f64,
    pub total_reward: f64,
    /// Competency tags exercised, each paired with whether the agent handled it.
    pub competency_outcomes: Vec<(String, bool)>,
}

impl EpisodePerformance {
    pub fn new(success_rate: f64, consistency: f64) -> Self {
        Self {
            success_rate,
            consistency,
            total_reward: 0.0,
            competency_outcomes: Vec::new(),
        }
    }
}

/// Direction of a level change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelDirection {
    Advanced,
    Regressed,
}

/// A single curriculum level transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelChange {
    pub from: u32,
    pub to: u32,
    pub direction: LevelDirection,
    pub success_rate: f64,
    pub consistency: f64,
}
