use serde::{Deserialize, Serialize};

use super::case::{AgeBucket, ComplaintCategory};

/// Which sub-score a complexity factor feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityDimension {
    Medical,
    Diagnostic,
    Resource,
    TimeUrgency,
}

/// A named contributor to one complexity dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityFactor {
    pub name: String,
    pub dimension: ComplexityDimension,
    pub contribution: f64,
}

/// Multi-factor difficulty of a training case. All scores lie in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityProfile {
    pub medical: f64,
    pub diagnostic: f64,
    pub resource: f64,
    pub time_urgency: f64,
    pub overall: f64,
    pub factors: Vec<ComplexityFactor>,
}

impl ComplexityProfile {
    /// Profile with a fixed overall score and matching sub-scores.
    pub fn uniform(overall: f64) -> Self {
        let overall = overall.clamp(0.0, 1.0);
        Self {
            medical: overall,
            diagnostic: overall,
            resource: overall,
            time_urgency: overall,
            overall,
            factors: Vec::new(),
        }
    }

    /// Factors feeding a single dimension.
    pub fn factors_for(&self, dimension: ComplexityDimension) -> impl Iterator<Item = &ComplexityFactor> {
        self.factors.iter().filter(move |f| f.dimension == dimension)
    }
}

/// Cache key for complexity profiles.
///
/// Distinct cases sharing a key share a profile; this is an accepted approximation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileKey {
    pub age_bucket: AgeBucket,
    pub acuity: u8,
    pub complaint_category: ComplaintCategory,
    pub comorbidity_count: usize,
}
