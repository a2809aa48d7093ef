use serde::{Deserialize, Serialize};

use super::defaults;

/// Uncertainty quantifier calibration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UncertaintyConfig {
    /// Multiplier on `1 - confidence` for the epistemic component.
    pub epistemic_weight: f64,
    /// Maximum aleatoric contribution (reached when the top two actions tie).
    pub aleatoric_scale: f64,
    /// Per-episode uncertainty samples kept for trend analysis.
    pub history_capacity: usize,
}

impl Default for UncertaintyConfig {
    fn default() -> Self {
        Self {
            epistemic_weight: defaults::DEFAULT_EPISTEMIC_WEIGHT,
            aleatoric_scale: defaults::DEFAULT_ALEATORIC_SCALE,
            history_capacity: defaults::DEFAULT_UNCERTAINTY_HISTORY,
        }
    }
}

/// How the active query selector tags and values a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStrategy {
    UncertaintySampling,
    InformationGain,
    EpsilonGreedy,
    ThompsonSampling,
    /// Pick per query from the triggers that fired.
    Adaptive,
}

/// Active query selector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Queries allowed per episode.
    pub budget: u32,
    /// Total uncertainty above which a query is considered.
    pub total_threshold: f64,
    /// Information gain above which a query is considered.
    pub information_gain_threshold: f64,
    pub strategy: QueryStrategy,
    /// Exploration probability for epsilon-greedy tagging.
    pub epsilon: f64,
    /// Half-width of the uniform perturbation used by Thompson-style queries.
    pub thompson_noise: f64,
    /// Queries retained for analytics.
    pub history_capacity: usize,
    /// Learning weight of a queried step is `1 + boost * expected_benefit`.
    pub weight_boost: f64,
    /// Seed for the selector's RNG.
    pub seed: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            budget: defaults::DEFAULT_QUERY_BUDGET,
            total_threshold: defaults::DEFAULT_QUERY_TOTAL_THRESHOLD,
            information_gain_threshold: defaults::DEFAULT_QUERY_INFO_GAIN_THRESHOLD,
            strategy: QueryStrategy::Adaptive,
            epsilon: defaults::DEFAULT_QUERY_EPSILON,
            thompson_noise: defaults::DEFAULT_THOMPSON_NOISE,
            history_capacity: defaults::DEFAULT_QUERY_HISTORY,
            weight_boost: defaults::DEFAULT_QUERY_WEIGHT_BOOST,
            seed: defaults::DEFAULT_QUERY_SEED,
        }
    }
}
