//! Budgeted active query selection.
//!
//! A query is generated only when total uncertainty or information gain
//! crosses its threshold AND the episode budget still has a unit left.
//! The strategy decides how the query is tagged, which action it targets,
//! and how its expected benefit is valued.

use std::collections::{BTreeMap, VecDeque};

use chrono::Utc;
use praxis_core::config::{QueryConfig, QueryStrategy};
use praxis_core::models::{ActiveQuery, Budget, QueryType, State, UncertaintyMetrics};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::estimator::{best, ScoredAction};

/// Aggregate statistics over the retained query history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryStats {
    /// Queries generated since construction, including evicted ones.
    pub total_generated: u64,
    pub retained: usize,
    pub by_type: BTreeMap<String, usize>,
    pub average_expected_benefit: f64,
}

/// Deterministic (seeded) active query selector with a bounded history.
pub struct ActiveQuerySelector {
    config: QueryConfig,
    rng: ChaCha8Rng,
    history: VecDeque<ActiveQuery>,
    total_generated: u64,
}

impl ActiveQuerySelector {
    pub fn new(config: QueryConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            config,
            rng,
            history: VecDeque::new(),
            total_generated: 0,
        }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Decide whether this step warrants a query.
    ///
    /// Returns `None` without touching the budget when no trigger fires, and
    /// `None` when the budget is exhausted. A returned query has already
    /// consumed one budget unit.
    pub fn maybe_query(
        &mut self,
        state: &State,
        candidates: &[ScoredAction],
        uncertainty: &UncertaintyMetrics,
        budget: &mut Budget,
    ) -> Option<ActiveQuery> {
        let total_fired = uncertainty.total > self.config.total_threshold;
        let gain_fired = uncertainty.information_gain > self.config.information_gain_threshold;
        if !total_fired && !gain_fired {
            return None;
        }
        if !budget.try_consume() {
            tracing::debug!(step = state.step, "query trigger fired but budget is exhausted");
            return None;
        }

        let query_type = self.pick_type(uncertainty, total_fired, gain_fired);
        let (target, expected_benefit) = self.value(query_type, candidates, uncertainty);

        let query = ActiveQuery {
            id: uuid::Uuid::new_v4().to_string(),
            query_type,
            uncertainty: *uncertainty,
            expected_benefit: expected_benefit.clamp(0.0, 1.0),
            step: state.step,
            target_action: target.map(|s| s.action.clone()),
            timestamp: Utc::now(),
        };
        self.record(query.clone());
        Some(query)
    }

    /// Weight applied to the experience of a step, boosted when it was queried.
    pub fn learning_weight(&self, query: Option<&ActiveQuery>) -> f64 {
        match query {
            Some(q) => 1.0 + self.config.weight_boost * q.expected_benefit,
            None => 1.0,
        }
    }

    /// Retained queries, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &ActiveQuery> {
        self.history.iter()
    }

    pub fn stats(&self) -> QueryStats {
        let mut by_type = BTreeMap::new();
        for q in &self.history {
            *by_type.entry(q.query_type.as_str().to_string()).or_insert(0) += 1;
        }
        let average_expected_benefit = if self.history.is_empty() {
            0.0
        } else {
            self.history.iter().map(|q| q.expected_benefit).sum::<f64>()
                / self.history.len() as f64
        };
        QueryStats {
            total_generated: self.total_generated,
            retained: self.history.len(),
            by_type,
            average_expected_benefit,
        }
    }

    fn pick_type(
        &mut self,
        uncertainty: &UncertaintyMetrics,
        total_fired: bool,
        gain_fired: bool,
    ) -> QueryType {
        match self.config.strategy {
            QueryStrategy::UncertaintySampling => QueryType::UncertaintySampling,
            QueryStrategy::InformationGain => QueryType::InformationGain,
            QueryStrategy::EpsilonGreedy => QueryType::EpsilonGreedy,
            QueryStrategy::ThompsonSampling => QueryType::ThompsonSampling,
            QueryStrategy::Adaptive => {
                if self.rng.gen::<f64>() < self.config.epsilon {
                    QueryType::EpsilonGreedy
                } else if gain_fired
                    && (!total_fired || uncertainty.information_gain >= uncertainty.total)
                {
                    QueryType::InformationGain
                } else {
                    QueryType::UncertaintySampling
                }
            }
        }
    }

    fn value<'a>(
        &mut self,
        query_type: QueryType,
        candidates: &'a [ScoredAction],
        uncertainty: &UncertaintyMetrics,
    ) -> (Option<&'a ScoredAction>, f64) {
        let total = uncertainty.total.min(1.0);
        match query_type {
            QueryType::UncertaintySampling => {
                // Target the candidate the agent is least sure about either way.
                let target = candidates.iter().min_by(|a, b| {
                    let da = (a.confidence - 0.5).abs();
                    let db = (b.confidence - 0.5).abs();
                    da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                });
                (target, total)
            }
            QueryType::InformationGain => {
                let target = candidates.iter().max_by(|a, b| {
                    gain(a.confidence)
                        .partial_cmp(&gain(b.confidence))
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                (target, uncertainty.information_gain)
            }
            QueryType::EpsilonGreedy => {
                let target = if candidates.is_empty() {
                    None
                } else {
                    candidates.get(self.rng.gen_range(0..candidates.len()))
                };
                (target, 0.5 * total)
            }
            QueryType::ThompsonSampling => {
                let noise = self.config.thompson_noise.abs();
                let mut sampled: Option<(&ScoredAction, f64)> = None;
                for candidate in candidates {
                    let draw = candidate.confidence + self.perturbation(noise);
                    if sampled.map_or(true, |(_, d)| draw > d) {
                        sampled = Some((candidate, draw));
                    }
                }
                let target = sampled.map(|(c, _)| c);
                // Disagreement with the greedy choice is worth more.
                let disagrees = match (target, best(candidates)) {
                    (Some(t), Some(g)) => t.action != g.action,
                    _ => false,
                };
                let benefit = if disagrees {
                    total
                } else {
                    total + self.perturbation(noise)
                };
                (target, benefit)
            }
        }
    }

    fn perturbation(&mut self, noise: f64) -> f64 {
        if noise == 0.0 {
            0.0
        } else {
            self.rng.gen_range(-noise..=noise)
        }
    }

    fn record(&mut self, query: ActiveQuery) {
        self.total_generated += 1;
        let capacity = self.config.history_capacity.max(1);
        while self.history.len() >= capacity {
            self.history.pop_front();
        }
        self.history.push_back(query);
    }
}

fn gain(confidence: f64) -> f64 {
    4.0 * confidence * (1.0 - confidence)
}
