//! Uncertainty-focused: cases the agent is least sure about, kept varied.

use std::collections::BTreeSet;

use super::{ProfiledPool, SelectionContext, StrategyPick};
use crate::features::{CaseFeatures, FeatureCoverage};

/// Greedy pick on `(1 − w)·uncertainty + w·novelty`.
///
/// Without a scorer the diagnostic complexity stands in for uncertainty.
pub fn pick(
    pool: &ProfiledPool<'_>,
    ctx: &SelectionContext<'_>,
    diversity_weight: f64,
    count: usize,
    taken: &BTreeSet<usize>,
) -> StrategyPick {
    let w = diversity_weight.clamp(0.0, 1.0);
    let mut remaining: Vec<(usize, f64, CaseFeatures)> = pool
        .available(taken)
        .into_iter()
        .map(|i| {
            let score = match ctx.scorer {
                Some(scorer) => scorer.score(pool.case(i)),
                None => pool.profile(i).diagnostic,
            };
            (i, score, CaseFeatures::of(pool.case(i)))
        })
        .collect();

    let mut coverage = FeatureCoverage::new();
    let mut scored = Vec::with_capacity(count.min(remaining.len()));
    while scored.len() < count && !remaining.is_empty() {
        let mut best_pos = 0;
        let mut best_value = f64::NEG_INFINITY;
        for (pos, (_, score, features)) in remaining.iter().enumerate() {
            let value = (1.0 - w) * score + w * coverage.novelty(features);
            if value > best_value {
                best_value = value;
                best_pos = pos;
            }
        }
        let (index, score, features) = remaining.remove(best_pos);
        coverage.add(&features);
        scored.push((index, score));
    }

    let source = if ctx.scorer.is_some() {
        "agent uncertainty"
    } else {
        "diagnostic complexity (no agent snapshot)"
    };
    let rationale = format!(
        "highest {source} blended with novelty (weight {w:.2}) over {} candidates",
        pool.len() - taken.len().min(pool.len())
    );
    StrategyPick::from_scored(scored, rationale)
}
