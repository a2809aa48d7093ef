//! Selection output and effectiveness records.

use chrono::{DateTime, Utc};
use praxis_core::models::TrainingCase;
use serde::{Deserialize, Serialize};

use crate::strategies::SelectionStrategy;

/// Counts of selected cases per equal-width complexity bin on `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyHistogram {
    pub bins: Vec<usize>,
}

impl DifficultyHistogram {
    pub fn from_complexities(complexities: &[f64], bins: usize) -> Self {
        let n = bins.max(1);
        let mut counts = vec![0; n];
        for c in complexities {
            let bin = ((c.clamp(0.0, 1.0) * n as f64) as usize).min(n - 1);
            counts[bin] += 1;
        }
        Self { bins: counts }
    }

    pub fn total(&self) -> usize {
        self.bins.iter().sum()
    }
}

/// A batch of cases chosen by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionResult {
    /// Key for reporting the observed outcome back via `record_outcome`.
    pub selection_id: String,
    pub cases: Vec<TrainingCase>,
    /// Overall complexity of each case, parallel to `cases`.
    pub complexities: Vec<f64>,
    pub strategy: SelectionStrategy,
    pub rationale: String,
    pub expected_benefit: f64,
    pub difficulty_histogram: DifficultyHistogram,
}

/// What the engine remembers about a past selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRecord {
    pub selection_id: String,
    pub strategy: SelectionStrategy,
    pub expected_benefit: f64,
    /// Success rate observed after training on the batch.
    pub observed_success: Option<f64>,
    pub case_count: usize,
    pub selected_at: DateTime<Utc>,
}

impl SelectionRecord {
    /// Expected benefit blended evenly with the observed outcome, when known.
    pub fn effectiveness(&self) -> f64 {
        match self.observed_success {
            Some(observed) => 0.5 * self.expected_benefit + 0.5 * observed,
            None => self.expected_benefit,
        }
    }
}
