//! Test fixture loader for Praxis golden datasets.
//!
//! Fixtures live next to this crate under `golden/`. Loaders panic on
//! missing or malformed files; they are only used from tests and benches.

use std::path::PathBuf;

use praxis_core::models::TrainingCase;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the fixture files.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

#[derive(Deserialize)]
struct CasePool {
    count: usize,
    cases: Vec<TrainingCase>,
}

/// The golden 20-case triage pool, spanning every acuity level and complaint family.
pub fn triage_pool() -> Vec<TrainingCase> {
    let pool: CasePool = load_fixture("golden/triage_pool.json");
    assert_eq!(pool.count, pool.cases.len(), "triage pool count mismatch");
    pool.cases
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn golden_pool_loads() {
        let pool = triage_pool();
        assert_eq!(pool.len(), 20);
        let acuities: BTreeSet<u8> = pool.iter().map(|c| c.acuity).collect();
        assert_eq!(acuities.len(), 5);
        let ids: BTreeSet<&str> = pool.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn fixture_paths_resolve() {
        assert!(fixture_exists("golden/triage_pool.json"));
        assert!(!fixture_exists("golden/missing.json"));
        let value = load_fixture_value("golden/triage_pool.json");
        assert_eq!(value["count"], 20);
        assert!(fixture_path("golden").is_dir());
    }
}
