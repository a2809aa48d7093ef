//! Diversity-maximizing: cover as many feature values as possible.

use std::collections::BTreeSet;

use super::{ProfiledPool, SelectionContext, StrategyPick};
use crate::features::{CaseFeatures, FeatureCoverage, FEATURE_AXES};

/// Greedy marginal gain over age bucket, acuity, complaint category and
/// comorbidity burden. Ties go to the case closest to the curriculum target.
pub fn pick(
    pool: &ProfiledPool<'_>,
    ctx: &SelectionContext<'_>,
    count: usize,
    taken: &BTreeSet<usize>,
) -> StrategyPick {
    let range = ctx.curriculum.current_range();
    let target = (range.min + range.max) / 2.0;

    let mut remaining: Vec<(usize, CaseFeatures)> = pool
        .available(taken)
        .into_iter()
        .map(|i| (i, CaseFeatures::of(pool.case(i))))
        .collect();

    let mut coverage = FeatureCoverage::new();
    let mut scored = Vec::with_capacity(count.min(remaining.len()));
    while scored.len() < count && !remaining.is_empty() {
        let mut best: Option<(usize, usize, f64)> = None;
        for (pos, (index, features)) in remaining.iter().enumerate() {
            let gain = coverage.marginal_gain(features);
            let distance = (pool.complexity(*index) - target).abs();
            let better = match best {
                None => true,
                Some((_, g, d)) => gain > g || (gain == g && distance < d),
            };
            if better {
                best = Some((pos, gain, distance));
            }
        }
        let Some((pos, gain, _)) = best else { break };
        let (index, features) = remaining.remove(pos);
        coverage.add(&features);
        scored.push((index, gain as f64 / FEATURE_AXES as f64));
    }

    let rationale = format!(
        "greedy feature coverage across {} candidates",
        pool.len() - taken.len().min(pool.len())
    );
    StrategyPick::from_scored(scored, rationale)
}
