//! CaseSelectionEngine: profiles the pool, runs the active strategy, and
//! periodically re-evaluates which strategy to use.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use chrono::Utc;
use praxis_core::config::SelectionConfig;
use praxis_core::errors::SelectionError;
use praxis_core::models::TrainingCase;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analyzer::ComplexityAnalyzer;
use crate::result::{DifficultyHistogram, SelectionRecord, SelectionResult};
use crate::strategies::{self, ProfiledPool, SelectionContext, SelectionStrategy};

/// Re-evaluation decisions kept for the adaptation-frequency check.
const ADAPTATION_WINDOW: usize = 10;

/// A strategy switch decided at re-evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyChange {
    pub from: SelectionStrategy,
    pub to: SelectionStrategy,
    pub reason: String,
}

pub struct CaseSelectionEngine {
    config: SelectionConfig,
    analyzer: ComplexityAnalyzer,
    current: SelectionStrategy,
    selections: u64,
    history: VecDeque<SelectionRecord>,
    /// One entry per re-evaluation: whether it switched strategy.
    adaptations: VecDeque<bool>,
    last_change: Option<StrategyChange>,
}

impl CaseSelectionEngine {
    pub fn new(config: SelectionConfig) -> Self {
        Self::with_strategy(config, SelectionStrategy::AdaptiveHybrid)
    }

    pub fn with_strategy(config: SelectionConfig, strategy: SelectionStrategy) -> Self {
        let analyzer = ComplexityAnalyzer::new(config.profile_cache_capacity);
        Self {
            config,
            analyzer,
            current: strategy,
            selections: 0,
            history: VecDeque::new(),
            adaptations: VecDeque::new(),
            last_change: None,
        }
    }

    pub fn current_strategy(&self) -> SelectionStrategy {
        self.current
    }

    pub fn analyzer(&self) -> &ComplexityAnalyzer {
        &self.analyzer
    }

    pub fn selection_count(&self) -> u64 {
        self.selections
    }

    pub fn history(&self) -> impl Iterator<Item = &SelectionRecord> {
        self.history.iter()
    }

    /// The switch made by the most recent `select`, if it triggered one.
    pub fn take_strategy_change(&mut self) -> Option<StrategyChange> {
        self.last_change.take()
    }

    /// Strategy the next selection will use. Until enough selections have
    /// been made to judge strategies, that is curriculum-progressive.
    pub fn effective_strategy(&self) -> SelectionStrategy {
        if self.history.len() < self.config.min_selections_for_review {
            SelectionStrategy::CurriculumProgressive
        } else {
            self.current
        }
    }

    /// Choose up to `target_count` cases from `pool`.
    pub fn select(
        &mut self,
        pool: &[TrainingCase],
        ctx: &SelectionContext<'_>,
        target_count: usize,
    ) -> Result<SelectionResult, SelectionError> {
        if pool.is_empty() {
            return Err(SelectionError::EmptyPool);
        }

        let strategy = self.effective_strategy();
        let profiled = ProfiledPool::new(pool, self.analyzer.profile_pool(pool));
        let count = target_count.min(pool.len());
        let pick = strategies::run(
            strategy,
            &profiled,
            ctx,
            &self.config,
            count,
            &BTreeSet::new(),
        );

        let complexities: Vec<f64> = pick.indices.iter().map(|i| profiled.complexity(*i)).collect();
        let cases: Vec<TrainingCase> = pick.indices.iter().map(|i| profiled.case(*i).clone()).collect();
        let result = SelectionResult {
            selection_id: uuid::Uuid::new_v4().to_string(),
            difficulty_histogram: DifficultyHistogram::from_complexities(
                &complexities,
                self.config.histogram_bins,
            ),
            cases,
            complexities,
            strategy,
            rationale: pick.rationale,
            expected_benefit: pick.benefit,
        };

        debug!(
            strategy = %strategy,
            selected = result.cases.len(),
            pool = pool.len(),
            expected_benefit = result.expected_benefit,
            cache_hit_rate = self.analyzer.cache().hit_rate(),
            "cases selected"
        );

        self.remember(SelectionRecord {
            selection_id: result.selection_id.clone(),
            strategy,
            expected_benefit: result.expected_benefit,
            observed_success: None,
            case_count: result.cases.len(),
            selected_at: Utc::now(),
        });
        self.selections += 1;
        if self.selections % self.config.reevaluation_interval.max(1) as u64 == 0 {
            self.last_change = self.reevaluate();
        }

        Ok(result)
    }

    /// Report the success rate observed after training on a selection.
    pub fn record_outcome(
        &mut self,
        selection_id: &str,
        success_rate: f64,
    ) -> Result<(), SelectionError> {
        let record = self
            .history
            .iter_mut()
            .find(|r| r.selection_id == selection_id)
            .ok_or_else(|| SelectionError::UnknownSelection {
                id: selection_id.to_string(),
            })?;
        record.observed_success = Some(success_rate.clamp(0.0, 1.0));
        Ok(())
    }

    /// Mean effectiveness per strategy over the retained history.
    pub fn effectiveness(&self) -> BTreeMap<SelectionStrategy, f64> {
        let mut sums: BTreeMap<SelectionStrategy, (f64, usize)> = BTreeMap::new();
        for record in &self.history {
            let entry = sums.entry(record.strategy).or_insert((0.0, 0));
            entry.0 += record.effectiveness();
            entry.1 += 1;
        }
        sums.into_iter()
            .map(|(s, (sum, n))| (s, sum / n as f64))
            .collect()
    }

    /// Share of recent re-evaluations that switched strategy.
    pub fn adaptation_frequency(&self) -> f64 {
        if self.adaptations.is_empty() {
            return 0.0;
        }
        self.adaptations.iter().filter(|s| **s).count() as f64 / self.adaptations.len() as f64
    }

    fn remember(&mut self, record: SelectionRecord) {
        let capacity = self.config.history_capacity.max(1);
        while self.history.len() >= capacity {
            self.history.pop_front();
        }
        self.history.push_back(record);
    }

    fn reevaluate(&mut self) -> Option<StrategyChange> {
        if self.history.len() < self.config.min_selections_for_review {
            return None;
        }

        let effectiveness = self.effectiveness();
        let current_score = effectiveness.get(&self.current).copied();
        let frequency = self.adaptation_frequency();

        let decision = if frequency > self.config.max_adaptation_frequency {
            debug!(
                frequency,
                strategy = %self.current,
                "holding strategy: adapting too often"
            );
            None
        } else if current_score.is_some_and(|s| s >= self.config.min_expected_benefit) {
            None
        } else {
            self.pick_replacement(&effectiveness, current_score)
        };

        self.adaptations.push_back(decision.is_some());
        while self.adaptations.len() > ADAPTATION_WINDOW {
            self.adaptations.pop_front();
        }

        if let Some(change) = &decision {
            info!(
                from = %change.from,
                to = %change.to,
                reason = %change.reason,
                "selection strategy changed"
            );
            self.current = change.to;
        }
        decision
    }

    /// Best-scoring other strategy, or the first untried one.
    fn pick_replacement(
        &self,
        effectiveness: &BTreeMap<SelectionStrategy, f64>,
        current_score: Option<f64>,
    ) -> Option<StrategyChange> {
        let floor = current_score.unwrap_or(0.0);
        let best = effectiveness
            .iter()
            .filter(|(s, score)| **s != self.current && **score > floor)
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal));

        let (to, reason) = match best {
            Some((strategy, score)) => (
                *strategy,
                format!(
                    "{} scored {:.2} against {:.2} for {}",
                    strategy, score, floor, self.current
                ),
            ),
            None => {
                let untried = SelectionStrategy::ALL
                    .into_iter()
                    .find(|s| *s != self.current && !effectiveness.contains_key(s))?;
                (
                    untried,
                    format!(
                        "{} below minimum benefit {:.2} ({:.2}); exploring {}",
                        self.current, self.config.min_expected_benefit, floor, untried
                    ),
                )
            }
        };

        Some(StrategyChange {
            from: self.current,
            to,
            reason,
        })
    }
}
