use serde::{Deserialize, Serialize};

use super::defaults;

/// Curriculum subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurriculumConfig {
    /// Highest difficulty level (levels run `1..=max_level`).
    pub max_level: u32,
    /// Episodes in the rolling evaluation window.
    pub window_size: usize,
    /// Mean success rate the window must exceed to advance.
    pub advance_success_rate: f64,
    /// Mean consistency the window must exceed to advance.
    pub advance_consistency: f64,
    /// Allow dropping a level after a full window of failures.
    pub allow_regression: bool,
    /// Mean success rate below which a level is dropped (if allowed).
    pub regression_success_rate: f64,
    /// Width of the complexity window on the normalized axis.
    pub complexity_window_width: f64,
    /// Symmetric widening applied per step when too few cases fit.
    pub complexity_widen_step: f64,
    /// Competency score below which a tag counts as struggling.
    pub competency_threshold: f64,
    /// EMA smoothing factor for competency scores.
    pub competency_ema_alpha: f64,
    /// Score assumed for a competency before any evidence.
    pub competency_prior: f64,
}

impl Default for CurriculumConfig {
    fn default() -> Self {
        Self {
            max_level: defaults::DEFAULT_MAX_LEVEL,
            window_size: defaults::DEFAULT_CURRICULUM_WINDOW,
            advance_success_rate: defaults::DEFAULT_ADVANCE_SUCCESS_RATE,
            advance_consistency: defaults::DEFAULT_ADVANCE_CONSISTENCY,
            allow_regression: defaults::DEFAULT_ALLOW_REGRESSION,
            regression_success_rate: defaults::DEFAULT_REGRESSION_SUCCESS_RATE,
            complexity_window_width: defaults::DEFAULT_COMPLEXITY_WINDOW_WIDTH,
            complexity_widen_step: defaults::DEFAULT_COMPLEXITY_WIDEN_STEP,
            competency_threshold: defaults::DEFAULT_COMPETENCY_THRESHOLD,
            competency_ema_alpha: defaults::DEFAULT_COMPETENCY_EMA_ALPHA,
            competency_prior: defaults::DEFAULT_COMPETENCY_PRIOR,
        }
    }
}
