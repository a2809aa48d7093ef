//! Session metrics registry.
//!
//! [`TrainingMetrics`] owns the per-concern collectors and is fed by
//! [`crate::MetricsEventHandler`] from the training event stream.

pub mod episode_metrics;
pub mod learning_metrics;

pub use episode_metrics::EpisodeMetricsCollector;
pub use learning_metrics::LearningMetrics;

/// Aggregated metrics for one training session.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct TrainingMetrics {
    pub episodes: EpisodeMetricsCollector,
    pub learning: LearningMetrics,
}

impl TrainingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all metrics.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
