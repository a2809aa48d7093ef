//! Complexity analysis with cached profiles.

mod cache;
mod factors;

use std::sync::Arc;

use praxis_core::models::{ComplexityProfile, TrainingCase};
use rayon::prelude::*;

pub use cache::ProfileCache;
pub use factors::compute_profile;

/// Pools at least this large are profiled on the rayon pool.
const PARALLEL_THRESHOLD: usize = 64;

/// Computes and caches complexity profiles keyed by [`TrainingCase::profile_key`].
pub struct ComplexityAnalyzer {
    cache: ProfileCache,
}

impl ComplexityAnalyzer {
    pub fn new(cache_capacity: u64) -> Self {
        Self {
            cache: ProfileCache::new(cache_capacity),
        }
    }

    pub fn profile(&self, case: &TrainingCase) -> Arc<ComplexityProfile> {
        self.cache
            .get_or_compute(case.profile_key(), || compute_profile(case))
    }

    /// Profiles in pool order.
    pub fn profile_pool(&self, cases: &[TrainingCase]) -> Vec<Arc<ComplexityProfile>> {
        if cases.len() >= PARALLEL_THRESHOLD {
            cases.par_iter().map(|case| self.profile(case)).collect()
        } else {
            cases.iter().map(|case| self.profile(case)).collect()
        }
    }

    pub fn cache(&self) -> &ProfileCache {
        &self.cache
    }
}
