use serde::{Deserialize, Serialize};

use super::defaults;

/// Case selection engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Selections between strategy re-evaluations.
    pub reevaluation_interval: usize,
    /// Prior selections required before re-evaluation trusts its data.
    pub min_selections_for_review: usize,
    /// Average benefit below which the current strategy is replaced.
    pub min_expected_benefit: f64,
    /// Switch rate above which the engine holds its current strategy.
    pub max_adaptation_frequency: f64,
    /// Weight of the novelty bonus in uncertainty-focused selection.
    pub diversity_weight: f64,
    /// Buckets in the difficulty histogram.
    pub histogram_bins: usize,
    /// Selection records kept for effectiveness tracking.
    pub history_capacity: usize,
    /// Cached complexity profiles.
    pub profile_cache_capacity: u64,
    /// Success rate below which the hybrid strategy treats the agent as struggling.
    pub struggling_success_rate: f64,
    /// Success rate above which the hybrid strategy treats the agent as excelling.
    pub excelling_success_rate: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            reevaluation_interval: defaults::DEFAULT_REEVALUATION_INTERVAL,
            min_selections_for_review: defaults::DEFAULT_MIN_SELECTIONS_FOR_REVIEW,
            min_expected_benefit: defaults::DEFAULT_MIN_EXPECTED_BENEFIT,
            max_adaptation_frequency: defaults::DEFAULT_MAX_ADAPTATION_FREQUENCY,
            diversity_weight: defaults::DEFAULT_DIVERSITY_WEIGHT,
            histogram_bins: defaults::DEFAULT_HISTOGRAM_BINS,
            history_capacity: defaults::DEFAULT_SELECTION_HISTORY,
            profile_cache_capacity: defaults::DEFAULT_PROFILE_CACHE_CAPACITY,
            struggling_success_rate: defaults::DEFAULT_STRUGGLING_SUCCESS_RATE,
            excelling_success_rate: defaults::DEFAULT_EXCELLING_SUCCESS_RATE,
        }
    }
}
