//! Bounded FIFO of finished episodes with JSON export/import.

use std::collections::VecDeque;

use praxis_core::errors::PraxisResult;
use praxis_core::models::EpisodeResult;

/// Oldest results are evicted first once `capacity` is reached.
#[derive(Debug, Clone)]
pub struct EpisodeHistory {
    capacity: usize,
    entries: VecDeque<EpisodeResult>,
}

impl EpisodeHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: VecDeque::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, result: EpisodeResult) {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(result);
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &EpisodeResult> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&EpisodeResult> {
        self.entries.back()
    }

    pub fn get(&self, episode_id: &str) -> Option<&EpisodeResult> {
        self.entries.iter().find(|r| r.episode_id == episode_id)
    }

    /// Up to `n` most recent results, oldest first.
    pub fn recent(&self, n: usize) -> Vec<&EpisodeResult> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).collect()
    }

    /// Mean total reward over the retained results.
    pub fn mean_reward(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        self.entries.iter().map(|r| r.total_reward).sum::<f64>() / self.entries.len() as f64
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn export_json(&self) -> PraxisResult<String> {
        let entries: Vec<&EpisodeResult> = self.entries.iter().collect();
        Ok(serde_json::to_string(&entries)?)
    }

    /// Replace the history with exported results, keeping the newest that fit.
    /// Returns how many were kept.
    pub fn import_json(&mut self, json: &str) -> PraxisResult<usize> {
        let imported: Vec<EpisodeResult> = serde_json::from_str(json)?;
        self.entries.clear();
        for result in imported {
            self.push(result);
        }
        Ok(self.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use praxis_core::models::{EpisodeMetrics, TerminationReason};

    use super::*;

    fn result(index: u64) -> EpisodeResult {
        EpisodeResult {
            episode_id: format!("ep-{index}"),
            episode_index: index,
            steps: vec![],
            total_reward: index as f64,
            termination_reason: TerminationReason::MaxStepsReached,
            metrics: EpisodeMetrics::default(),
            curriculum_level: 1,
            case_ids: vec![],
            started_at: Utc::now(),
            finished_at: Utc::now(),
        }
    }

    #[test]
    fn evicts_oldest() {
        let mut history = EpisodeHistory::new(3);
        for i in 0..5 {
            history.push(result(i));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.iter().next().unwrap().episode_index, 2);
        assert_eq!(history.latest().unwrap().episode_index, 4);
        assert!(history.get("ep-0").is_none());
        let recent: Vec<u64> = history.recent(2).iter().map(|r| r.episode_index).collect();
        assert_eq!(recent, vec![3, 4]);
    }

    #[test]
    fn export_import_round_trip() {
        let mut history = EpisodeHistory::new(10);
        for i in 0..4 {
            history.push(result(i));
        }
        let json = history.export_json().unwrap();

        let mut small = EpisodeHistory::new(2);
        assert_eq!(small.import_json(&json).unwrap(), 2);
        assert_eq!(small.latest().unwrap().episode_id, "ep-3");
        assert!((small.mean_reward() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn import_rejects_garbage() {
        let mut history = EpisodeHistory::new(2);
        history.push(result(0));
        assert!(history.import_json("{not json").is_err());
        assert_eq!(history.len(), 1);
    }
}
