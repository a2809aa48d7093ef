//! Episode counts, termination reasons, rolling reward.

use std::collections::{BTreeMap, VecDeque};

use serde::Serialize;

/// Rewards kept for the rolling mean.
const REWARD_WINDOW: usize = 1_000;

#[derive(Debug, Clone, Default, Serialize)]
pub struct EpisodeMetricsCollector {
    pub started: u64,
    pub completed: u64,
    pub failed: u64,
    pub total_steps: u64,
    pub termination_reasons: BTreeMap<String, u64>,
    recent_rewards: VecDeque<f64>,
}

impl EpisodeMetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_started(&mut self) {
        self.started += 1;
    }

    pub fn record_completed(&mut self, reason: &str, total_reward: f64, steps: usize) {
        self.completed += 1;
        self.total_steps += steps as u64;
        *self
            .termination_reasons
            .entry(reason.to_string())
            .or_default() += 1;
        self.recent_rewards.push_back(total_reward);
        if self.recent_rewards.len() > REWARD_WINDOW {
            self.recent_rewards.pop_front();
        }
    }

    pub fn record_failed(&mut self) {
        self.failed += 1;
    }

    /// Episodes started but not yet completed or failed.
    pub fn in_flight(&self) -> u64 {
        self.started.saturating_sub(self.completed + self.failed)
    }

    /// Mean total reward over the most recent completed episodes.
    pub fn mean_reward(&self) -> f64 {
        if self.recent_rewards.is_empty() {
            return 0.0;
        }
        self.recent_rewards.iter().sum::<f64>() / self.recent_rewards.len() as f64
    }

    pub fn mean_steps(&self) -> f64 {
        if self.completed == 0 {
            return 0.0;
        }
        self.total_steps as f64 / self.completed as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reward_window_is_bounded() {
        let mut m = EpisodeMetricsCollector::new();
        for i in 0..(REWARD_WINDOW + 10) {
            m.record_started();
            m.record_completed("max_steps_reached", i as f64, 2);
        }
        assert_eq!(m.recent_rewards.len(), REWARD_WINDOW);
        assert_eq!(m.termination_reasons["max_steps_reached"], (REWARD_WINDOW + 10) as u64);
        assert_eq!(m.in_flight(), 0);
        assert!((m.mean_steps() - 2.0).abs() < 1e-12);
    }
}
