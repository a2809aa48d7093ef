//! Categorical case features used for diversity and novelty.

use std::collections::HashSet;

use praxis_core::models::{AgeBucket, ComplaintCategory, TrainingCase};

/// Number of independent feature axes.
pub const FEATURE_AXES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaseFeatures {
    pub age_bucket: AgeBucket,
    pub acuity: u8,
    pub complaint_category: ComplaintCategory,
    pub high_comorbidity: bool,
}

impl CaseFeatures {
    pub fn of(case: &TrainingCase) -> Self {
        Self {
            age_bucket: case.age_bucket(),
            acuity: case.acuity,
            complaint_category: case.complaint_category,
            high_comorbidity: case.has_high_comorbidity(),
        }
    }
}

/// Feature values already represented in a batch.
#[derive(Debug, Default, Clone)]
pub struct FeatureCoverage {
    age_buckets: HashSet<AgeBucket>,
    acuities: HashSet<u8>,
    categories: HashSet<ComplaintCategory>,
    comorbidity: HashSet<bool>,
}

impl FeatureCoverage {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many axes `features` would add a new value to, in `0..=FEATURE_AXES`.
    pub fn marginal_gain(&self, features: &CaseFeatures) -> usize {
        usize::from(!self.age_buckets.contains(&features.age_bucket))
            + usize::from(!self.acuities.contains(&features.acuity))
            + usize::from(!self.categories.contains(&features.complaint_category))
            + usize::from(!self.comorbidity.contains(&features.high_comorbidity))
    }

    /// Marginal gain normalised to `[0, 1]`.
    pub fn novelty(&self, features: &CaseFeatures) -> f64 {
        self.marginal_gain(features) as f64 / FEATURE_AXES as f64
    }

    pub fn add(&mut self, features: &CaseFeatures) {
        self.age_buckets.insert(features.age_bucket);
        self.acuities.insert(features.acuity);
        self.categories.insert(features.complaint_category);
        self.comorbidity.insert(features.high_comorbidity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(acuity: u8, category: ComplaintCategory) -> CaseFeatures {
        CaseFeatures {
            age_bucket: AgeBucket::Adult,
            acuity,
            complaint_category: category,
            high_comorbidity: false,
        }
    }

    #[test]
    fn gain_counts_new_axes() {
        let mut coverage = FeatureCoverage::new();
        let first = features(2, ComplaintCategory::Cardiac);
        assert_eq!(coverage.marginal_gain(&first), FEATURE_AXES);
        coverage.add(&first);
        assert_eq!(coverage.marginal_gain(&first), 0);
        assert_eq!(coverage.marginal_gain(&features(3, ComplaintCategory::Trauma)), 2);
        assert!((coverage.novelty(&features(3, ComplaintCategory::Cardiac)) - 0.25).abs() < 1e-12);
    }
}
