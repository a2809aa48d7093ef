//! Curriculum-progressive: stay inside the level's complexity window.

use std::collections::{BTreeSet, VecDeque};

use super::{ProfiledPool, SelectionContext, StrategyPick};

const STRATA: usize = 4;

/// Filter by the (widened) curriculum window, then take cases round-robin
/// across complexity quartiles so the batch spans the window.
pub fn pick(
    pool: &ProfiledPool<'_>,
    ctx: &SelectionContext<'_>,
    count: usize,
    taken: &BTreeSet<usize>,
) -> StrategyPick {
    let available = pool.available(taken);
    let complexities: Vec<f64> = available.iter().map(|i| pool.complexity(*i)).collect();
    let level = ctx.curriculum.level();
    let base = ctx.curriculum.complexity_range(level);
    let range = ctx.curriculum.range_for_pool(level, &complexities, count);

    let mut in_range: Vec<usize> = available
        .into_iter()
        .filter(|i| range.contains(pool.complexity(*i)))
        .collect();
    in_range.sort_by(|a, b| {
        pool.complexity(*a)
            .partial_cmp(&pool.complexity(*b))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(b))
    });

    let candidates = in_range.len();
    let stratum_size = candidates.div_ceil(STRATA).max(1);
    let mut strata: Vec<VecDeque<usize>> = in_range
        .chunks(stratum_size)
        .map(|chunk| chunk.iter().copied().collect())
        .collect();

    let center = (base.min + base.max) / 2.0;
    let half_width = (base.width() / 2.0).max(f64::EPSILON);
    let mut scored = Vec::with_capacity(count.min(candidates));
    while scored.len() < count && strata.iter().any(|s| !s.is_empty()) {
        for stratum in strata.iter_mut() {
            if scored.len() == count {
                break;
            }
            if let Some(index) = stratum.pop_front() {
                let closeness = 1.0 - (pool.complexity(index) - center).abs() / half_width;
                scored.push((index, closeness.clamp(0.0, 1.0)));
            }
        }
    }

    let rationale = format!(
        "level {level}: window [{:.2}, {:.2}], searched [{:.2}, {:.2}], {candidates} candidates, quartile round-robin",
        base.min, base.max, range.min, range.max
    );
    StrategyPick::from_scored(scored, rationale)
}
