//! Case selection strategies.
//!
//! Each strategy picks indices from a profiled pool, skipping indices already
//! taken so the hybrid strategy can compose them.

pub mod competency;
pub mod curriculum;
pub mod diversity;
pub mod hybrid;
pub mod uncertainty;

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use praxis_core::config::SelectionConfig;
use praxis_core::models::{ComplexityProfile, TrainingCase};
use praxis_curriculum::CurriculumManager;
use serde::{Deserialize, Serialize};

use crate::scorer::CaseScorer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    CurriculumProgressive,
    UncertaintyFocused,
    DiversityMaximizing,
    CompetencyBased,
    AdaptiveHybrid,
}

impl SelectionStrategy {
    pub const ALL: [SelectionStrategy; 5] = [
        Self::CurriculumProgressive,
        Self::UncertaintyFocused,
        Self::DiversityMaximizing,
        Self::CompetencyBased,
        Self::AdaptiveHybrid,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CurriculumProgressive => "curriculum_progressive",
            Self::UncertaintyFocused => "uncertainty_focused",
            Self::DiversityMaximizing => "diversity_maximizing",
            Self::CompetencyBased => "competency_based",
            Self::AdaptiveHybrid => "adaptive_hybrid",
        }
    }
}

impl fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Learner state a strategy selects against.
pub struct SelectionContext<'a> {
    pub curriculum: &'a CurriculumManager,
    /// Success rate over recent episodes, if any have run.
    pub recent_success_rate: Option<f64>,
    /// Per-case uncertainty, when an agent snapshot is available.
    pub scorer: Option<&'a dyn CaseScorer>,
}

impl<'a> SelectionContext<'a> {
    pub fn new(curriculum: &'a CurriculumManager) -> Self {
        Self {
            curriculum,
            recent_success_rate: None,
            scorer: None,
        }
    }

    pub fn with_success_rate(mut self, rate: f64) -> Self {
        self.recent_success_rate = Some(rate.clamp(0.0, 1.0));
        self
    }

    pub fn with_scorer(mut self, scorer: &'a dyn CaseScorer) -> Self {
        self.scorer = Some(scorer);
        self
    }
}

/// Cases paired with their complexity profiles, in pool order.
pub struct ProfiledPool<'a> {
    cases: &'a [TrainingCase],
    profiles: Vec<Arc<ComplexityProfile>>,
}

impl<'a> ProfiledPool<'a> {
    pub fn new(cases: &'a [TrainingCase], profiles: Vec<Arc<ComplexityProfile>>) -> Self {
        debug_assert_eq!(cases.len(), profiles.len());
        Self { cases, profiles }
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn case(&self, index: usize) -> &'a TrainingCase {
        &self.cases[index]
    }

    pub fn profile(&self, index: usize) -> &ComplexityProfile {
        &self.profiles[index]
    }

    pub fn complexity(&self, index: usize) -> f64 {
        self.profiles[index].overall
    }

    /// Indices not in `taken`, ascending.
    pub fn available(&self, taken: &BTreeSet<usize>) -> Vec<usize> {
        (0..self.len()).filter(|i| !taken.contains(i)).collect()
    }
}

/// Indices chosen by one strategy with the mean per-case benefit it expects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrategyPick {
    pub indices: Vec<usize>,
    pub benefit: f64,
    pub rationale: String,
}

impl StrategyPick {
    pub(crate) fn from_scored(scored: Vec<(usize, f64)>, rationale: String) -> Self {
        let benefit = if scored.is_empty() {
            0.0
        } else {
            scored.iter().map(|(_, b)| b).sum::<f64>() / scored.len() as f64
        };
        Self {
            indices: scored.into_iter().map(|(i, _)| i).collect(),
            benefit: benefit.clamp(0.0, 1.0),
            rationale,
        }
    }
}

/// Run `strategy` for `count` cases not already in `taken`.
pub fn run(
    strategy: SelectionStrategy,
    pool: &ProfiledPool<'_>,
    ctx: &SelectionContext<'_>,
    config: &SelectionConfig,
    count: usize,
    taken: &BTreeSet<usize>,
) -> StrategyPick {
    if count == 0 {
        return StrategyPick::default();
    }
    match strategy {
        SelectionStrategy::CurriculumProgressive => curriculum::pick(pool, ctx, count, taken),
        SelectionStrategy::UncertaintyFocused => {
            uncertainty::pick(pool, ctx, config.diversity_weight, count, taken)
        }
        SelectionStrategy::DiversityMaximizing => diversity::pick(pool, ctx, count, taken),
        SelectionStrategy::CompetencyBased => competency::pick(pool, ctx, count, taken),
        SelectionStrategy::AdaptiveHybrid => hybrid::pick(pool, ctx, config, count, taken),
    }
}
