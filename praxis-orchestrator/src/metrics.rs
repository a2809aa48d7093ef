//! Per-step learning opportunity and end-of-episode aggregates.

use praxis_core::models::{EpisodeMetrics, StepRecord, UncertaintyMetrics};
use praxis_uncertainty::{linear_slope, UncertaintyHistory};

const GAIN_WEIGHT: f64 = 0.6;
const EPISTEMIC_WEIGHT: f64 = 0.4;

/// How much a step could teach the agent, in `[0, 1]`.
pub fn learning_opportunity(uncertainty: &UncertaintyMetrics) -> f64 {
    (GAIN_WEIGHT * uncertainty.information_gain + EPISTEMIC_WEIGHT * uncertainty.epistemic)
        .clamp(0.0, 1.0)
}

/// Trailing `window` steps averaged below `min_opportunity`.
///
/// Never fires before `window` steps exist.
pub fn diminishing_returns(steps: &[StepRecord], window: usize, min_opportunity: f64) -> bool {
    if window == 0 || steps.len() < window {
        return false;
    }
    let tail = &steps[steps.len() - window..];
    let mean = tail.iter().map(|s| s.learning_opportunity).sum::<f64>() / window as f64;
    mean < min_opportunity
}

/// Fraction of resolved outcomes that succeeded.
///
/// Steps carrying an explicit outcome are used when present; otherwise a step
/// counts as a success when its reward is positive.
pub fn success_rate(steps: &[StepRecord]) -> f64 {
    let outcomes: Vec<bool> = steps.iter().filter_map(|s| s.success).collect();
    if !outcomes.is_empty() {
        return outcomes.iter().filter(|s| **s).count() as f64 / outcomes.len() as f64;
    }
    if steps.is_empty() {
        return 0.0;
    }
    steps.iter().filter(|s| s.reward > 0.0).count() as f64 / steps.len() as f64
}

/// `1 - stddev` of outcome rewards (all rewards when no step has an outcome),
/// clamped to `[0, 1]`.
pub fn consistency(steps: &[StepRecord]) -> f64 {
    let mut rewards: Vec<f64> = steps
        .iter()
        .filter(|s| s.success.is_some())
        .map(|s| s.reward)
        .collect();
    if rewards.is_empty() {
        rewards = steps.iter().map(|s| s.reward).collect();
    }
    if rewards.len() < 2 {
        return if rewards.is_empty() { 0.0 } else { 1.0 };
    }
    let n = rewards.len() as f64;
    let mean = rewards.iter().sum::<f64>() / n;
    let variance = rewards.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    (1.0 - variance.sqrt()).clamp(0.0, 1.0)
}

/// Aggregate a finished episode's steps.
pub fn summarize(
    steps: &[StepRecord],
    uncertainty: &UncertaintyHistory,
    consultations_used: u32,
    curriculum_progress: f64,
) -> EpisodeMetrics {
    let rewards: Vec<f64> = steps.iter().map(|s| s.reward).collect();
    let learning_efficiency = if steps.is_empty() {
        0.0
    } else {
        steps.iter().map(|s| s.uncertainty.information_gain).sum::<f64>() / steps.len() as f64
    };

    EpisodeMetrics {
        learning_efficiency,
        uncertainty_reduction: uncertainty.reduction(),
        learning_velocity: linear_slope(&rewards),
        queries_used: steps.iter().filter(|s| s.query_id.is_some()).count() as u32,
        consultations_used,
        success_rate: success_rate(steps),
        consistency: consistency(steps),
        curriculum_progress,
    }
}
