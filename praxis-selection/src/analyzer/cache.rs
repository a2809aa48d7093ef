//! Complexity profile cache using moka.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use moka::sync::Cache;
use praxis_core::models::{ComplexityProfile, ProfileKey};

/// Bounded profile cache with hit/miss accounting.
///
/// Keys are coarse case attributes, so distinct cases may share an entry.
pub struct ProfileCache {
    cache: Cache<ProfileKey, Arc<ComplexityProfile>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ProfileCache {
    pub fn new(max_entries: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(max_entries).build(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, key: &ProfileKey) -> Option<Arc<ComplexityProfile>> {
        let found = self.cache.get(key);
        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    pub fn insert(&self, key: ProfileKey, profile: Arc<ComplexityProfile>) {
        self.cache.insert(key, profile);
    }

    /// Look up `key`, computing and caching the profile on a miss.
    pub fn get_or_compute(
        &self,
        key: ProfileKey,
        compute: impl FnOnce() -> ComplexityProfile,
    ) -> Arc<ComplexityProfile> {
        if let Some(profile) = self.get(&key) {
            return profile;
        }
        let profile = Arc::new(compute());
        self.insert(key, Arc::clone(&profile));
        profile
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.hits() + self.misses();
        if total == 0 {
            0.0
        } else {
            self.hits() as f64 / total as f64
        }
    }

    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use praxis_core::models::{AgeBucket, ComplaintCategory};

    use super::*;

    fn key(acuity: u8) -> ProfileKey {
        ProfileKey {
            age_bucket: AgeBucket::Adult,
            acuity,
            complaint_category: ComplaintCategory::Cardiac,
            comorbidity_count: 0,
        }
    }

    #[test]
    fn second_lookup_hits() {
        let cache = ProfileCache::new(16);
        cache.get_or_compute(key(2), || ComplexityProfile::uniform(0.4));
        let profile = cache.get_or_compute(key(2), || ComplexityProfile::uniform(0.9));
        assert_eq!(profile.overall, 0.4);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 1);
        assert!((cache.hit_rate() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn invalidation_forces_recompute() {
        let cache = ProfileCache::new(16);
        cache.get_or_compute(key(3), || ComplexityProfile::uniform(0.2));
        cache.invalidate_all();
        let profile = cache.get_or_compute(key(3), || ComplexityProfile::uniform(0.7));
        assert_eq!(profile.overall, 0.7);
        assert_eq!(cache.misses(), 2);
    }
}
