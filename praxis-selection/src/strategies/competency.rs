//! Competency-based: drill the skills the agent is weakest at.

use std::collections::BTreeSet;

use super::{ProfiledPool, SelectionContext, StrategyPick};

/// Rank cases by relevance to struggling competency tags and take the top N.
///
/// Relevance is the mean skill deficit `1 − score` over the struggling tags the
/// case exercises. With no struggling tags every tag the case carries counts.
pub fn pick(
    pool: &ProfiledPool<'_>,
    ctx: &SelectionContext<'_>,
    count: usize,
    taken: &BTreeSet<usize>,
) -> StrategyPick {
    let tracker = ctx.curriculum.competencies();
    let struggling = ctx.curriculum.struggling_competencies();

    let mut ranked: Vec<(usize, f64)> = pool
        .available(taken)
        .into_iter()
        .map(|i| {
            let tags = &pool.case(i).competencies;
            let relevance = if struggling.is_empty() {
                mean_deficit(tags.iter().map(|t| tracker.score(t)), tags.len())
            } else {
                let hits: Vec<f64> = tags
                    .iter()
                    .filter(|t| struggling.contains(t))
                    .map(|t| tracker.score(t))
                    .collect();
                hits.iter().map(|s| 1.0 - s).sum::<f64>() / struggling.len() as f64
            };
            (i, relevance.clamp(0.0, 1.0))
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    ranked.truncate(count);

    let rationale = if struggling.is_empty() {
        "no struggling competencies; ranked by overall skill deficit".to_string()
    } else {
        format!("targeting struggling competencies: {}", struggling.join(", "))
    };
    StrategyPick::from_scored(ranked, rationale)
}

fn mean_deficit(scores: impl Iterator<Item = f64>, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    scores.map(|s| 1.0 - s).sum::<f64>() / len as f64
}
