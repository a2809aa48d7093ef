use serde::{Deserialize, Serialize};

use super::defaults;

/// Episode loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Hard cap on steps per episode.
    pub max_steps: u32,
    /// Number of finished episodes kept in memory (oldest evicted first).
    pub history_capacity: usize,
    /// Trailing window used by the diminishing-returns early stop.
    pub opportunity_window: usize,
    /// Mean learning opportunity below which the episode stops early.
    pub min_learning_opportunity: f64,
    /// Enable the diminishing-returns early stop.
    pub early_stop_enabled: bool,
    /// Upper bound between re-checks while paused (milliseconds).
    pub pause_poll_interval_ms: u64,
    /// Cases selected per episode when a case pool is loaded.
    pub batch_size: usize,
    /// Act on the expert's recommendation instead of the agent's choice.
    pub adopt_expert_recommendation: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_steps: defaults::DEFAULT_MAX_STEPS,
            history_capacity: defaults::DEFAULT_HISTORY_CAPACITY,
            opportunity_window: defaults::DEFAULT_OPPORTUNITY_WINDOW,
            min_learning_opportunity: defaults::DEFAULT_MIN_LEARNING_OPPORTUNITY,
            early_stop_enabled: defaults::DEFAULT_EARLY_STOP_ENABLED,
            pause_poll_interval_ms: defaults::DEFAULT_PAUSE_POLL_INTERVAL_MS,
            batch_size: defaults::DEFAULT_BATCH_SIZE,
            adopt_expert_recommendation: defaults::DEFAULT_ADOPT_EXPERT_RECOMMENDATION,
        }
    }
}
