//! Queries, consultations, curriculum and strategy changes.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct LearningMetrics {
    pub queries: u64,
    pub query_types: BTreeMap<String, u64>,
    pub consultations_requested: u64,
    pub consultations_resolved: u64,
    pub advancements: u64,
    pub regressions: u64,
    pub highest_level: u32,
    pub strategy_changes: u64,
    pub current_strategy: Option<String>,
}

impl LearningMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_query(&mut self, query_type: &str) {
        self.queries += 1;
        *self.query_types.entry(query_type.to_string()).or_default() += 1;
    }

    pub fn record_consultation_requested(&mut self) {
        self.consultations_requested += 1;
    }

    pub fn record_consultation_resolved(&mut self) {
        self.consultations_resolved += 1;
    }

    pub fn record_level_change(&mut self, to: u32, advanced: bool) {
        if advanced {
            self.advancements += 1;
        } else {
            self.regressions += 1;
        }
        self.highest_level = self.highest_level.max(to);
    }

    pub fn record_strategy_change(&mut self, to: &str) {
        self.strategy_changes += 1;
        self.current_strategy = Some(to.to_string());
    }

    /// Fraction of consultation requests that got an answer.
    pub fn consultation_answer_rate(&self) -> f64 {
        if self.consultations_requested == 0 {
            return 0.0;
        }
        self.consultations_resolved as f64 / self.consultations_requested as f64
    }
}
