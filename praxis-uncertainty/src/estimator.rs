//! Uncertainty quantifier: a pure function of the agent snapshot and the candidate.

use praxis_core::config::UncertaintyConfig;
use praxis_core::models::{Action, State, UncertaintyMetrics};
use praxis_core::traits::Agent;
use serde::{Deserialize, Serialize};

/// An action paired with the agent's confidence in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAction {
    pub action: Action,
    pub confidence: f64,
}

/// Ask the agent for its confidence in every action, clamped to [0, 1].
pub fn score_actions(agent: &dyn Agent, state: &State, actions: &[Action]) -> Vec<ScoredAction> {
    actions
        .iter()
        .map(|action| ScoredAction {
            action: action.clone(),
            confidence: clamp_confidence(agent.confidence(state, action)),
        })
        .collect()
}

/// The highest-confidence entry; the first one wins ties.
pub fn best(scored: &[ScoredAction]) -> Option<&ScoredAction> {
    scored.iter().fold(None, |best: Option<&ScoredAction>, candidate| match best {
        Some(b) if b.confidence >= candidate.confidence => Some(b),
        _ => Some(candidate),
    })
}

fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Pluggable uncertainty model.
///
/// Implementations must be deterministic for a fixed agent snapshot and free of side effects.
pub trait UncertaintyEstimator: Send + Sync {
    fn estimate(
        &self,
        agent: &dyn Agent,
        state: &State,
        action: &Action,
        action_set: &[Action],
    ) -> UncertaintyMetrics;
}

/// Heuristic estimator built only from `Agent::confidence`.
///
/// Epistemic uncertainty is the missing confidence in the candidate; aleatoric
/// uncertainty grows as the agent's two best actions converge.
#[derive(Debug, Clone)]
pub struct ConfidenceSpreadEstimator {
    config: UncertaintyConfig,
}

impl ConfidenceSpreadEstimator {
    pub fn new(config: UncertaintyConfig) -> Self {
        Self { config }
    }

    /// Gap between the best and second-best confidence. A lone action has margin 1.
    fn margin(confidences: &mut [f64]) -> f64 {
        if confidences.len() < 2 {
            return 1.0;
        }
        confidences.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        (confidences[0] - confidences[1]).clamp(0.0, 1.0)
    }
}

impl Default for ConfidenceSpreadEstimator {
    fn default() -> Self {
        Self::new(UncertaintyConfig::default())
    }
}

impl UncertaintyEstimator for ConfidenceSpreadEstimator {
    fn estimate(
        &self,
        agent: &dyn Agent,
        state: &State,
        action: &Action,
        action_set: &[Action],
    ) -> UncertaintyMetrics {
        if action_set.is_empty() {
            return UncertaintyMetrics::sentinel();
        }

        let confidence = clamp_confidence(agent.confidence(state, action));
        let mut confidences: Vec<f64> = action_set
            .iter()
            .map(|a| clamp_confidence(agent.confidence(state, a)))
            .collect();
        let margin = Self::margin(&mut confidences);

        let epistemic = ((1.0 - confidence) * self.config.epistemic_weight).clamp(0.0, 1.0);
        let aleatoric = (self.config.aleatoric_scale * (1.0 - margin))
            .clamp(0.0, self.config.aleatoric_scale.max(0.0));

        UncertaintyMetrics::from_components(epistemic, aleatoric, confidence)
    }
}
