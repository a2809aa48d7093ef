//! Per-competency skill estimates.

use std::collections::BTreeMap;

/// Exponential moving average of success per competency tag.
///
/// Tags without evidence score at the configured prior.
#[derive(Debug, Clone)]
pub struct CompetencyTracker {
    alpha: f64,
    prior: f64,
    scores: BTreeMap<String, f64>,
    observations: BTreeMap<String, u64>,
}

impl CompetencyTracker {
    pub fn new(alpha: f64, prior: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            prior: prior.clamp(0.0, 1.0),
            scores: BTreeMap::new(),
            observations: BTreeMap::new(),
        }
    }

    pub fn record(&mut self, tag: &str, success: bool) {
        let outcome = if success { 1.0 } else { 0.0 };
        let score = self.scores.entry(tag.to_string()).or_insert(self.prior);
        *score = (1.0 - self.alpha) * *score + self.alpha * outcome;
        *self.observations.entry(tag.to_string()).or_insert(0) += 1;
    }

    pub fn score(&self, tag: &str) -> f64 {
        self.scores.get(tag).copied().unwrap_or(self.prior)
    }

    pub fn observations(&self, tag: &str) -> u64 {
        self.observations.get(tag).copied().unwrap_or(0)
    }

    /// Observed tags scoring below `threshold`, weakest first.
    pub fn struggling(&self, threshold: f64) -> Vec<String> {
        let mut weak: Vec<(&String, f64)> = self
            .scores
            .iter()
            .filter(|(_, s)| **s < threshold)
            .map(|(t, s)| (t, *s))
            .collect();
        weak.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        weak.into_iter().map(|(t, _)| t.clone()).collect()
    }

    pub fn snapshot(&self) -> BTreeMap<String, f64> {
        self.scores.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
