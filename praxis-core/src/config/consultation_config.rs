use serde::{Deserialize, Serialize};

use super::defaults;

/// Expert consultation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsultationConfig {
    /// Consultations allowed per episode.
    pub budget: u32,
    /// Initial total-uncertainty threshold for consulting.
    pub threshold: f64,
    /// Lower clamp for the adaptive threshold.
    pub min_threshold: f64,
    /// Upper clamp for the adaptive threshold.
    pub max_threshold: f64,
    /// Threshold nudge applied once at each episode end.
    pub threshold_step: f64,
    /// How long the loop waits for a response before leaving it pending.
    pub timeout_ms: u64,
}

impl Default for ConsultationConfig {
    fn default() -> Self {
        Self {
            budget: defaults::DEFAULT_CONSULTATION_BUDGET,
            threshold: defaults::DEFAULT_CONSULTATION_THRESHOLD,
            min_threshold: defaults::DEFAULT_CONSULTATION_MIN_THRESHOLD,
            max_threshold: defaults::DEFAULT_CONSULTATION_MAX_THRESHOLD,
            threshold_step: defaults::DEFAULT_CONSULTATION_THRESHOLD_STEP,
            timeout_ms: defaults::DEFAULT_CONSULTATION_TIMEOUT_MS,
        }
    }
}
