//! Adaptive hybrid: mix strategies by how the agent is doing.

use std::collections::BTreeSet;

use praxis_core::config::SelectionConfig;

use super::{run, ProfiledPool, SelectionContext, SelectionStrategy, StrategyPick};

/// Neutral success rate assumed before any episode has run.
const UNKNOWN_SUCCESS_RATE: f64 = 0.5;

/// `(primary, primary share, secondary, secondary share)` for a success rate.
pub fn mix(success_rate: f64, config: &SelectionConfig) -> (SelectionStrategy, f64, SelectionStrategy, f64) {
    if success_rate < config.struggling_success_rate {
        (
            SelectionStrategy::CurriculumProgressive,
            0.7,
            SelectionStrategy::CompetencyBased,
            0.3,
        )
    } else if success_rate > config.excelling_success_rate {
        (
            SelectionStrategy::UncertaintyFocused,
            0.6,
            SelectionStrategy::CurriculumProgressive,
            0.4,
        )
    } else {
        (
            SelectionStrategy::CompetencyBased,
            0.6,
            SelectionStrategy::CurriculumProgressive,
            0.4,
        )
    }
}

/// Split `count` between the mix's two strategies and top up with
/// diversity-maximizing when either falls short.
pub fn pick(
    pool: &ProfiledPool<'_>,
    ctx: &SelectionContext<'_>,
    config: &SelectionConfig,
    count: usize,
    taken: &BTreeSet<usize>,
) -> StrategyPick {
    let success = ctx.recent_success_rate.unwrap_or(UNKNOWN_SUCCESS_RATE);
    let (primary, primary_share, secondary, _) = mix(success, config);

    let primary_count = ((count as f64) * primary_share).round() as usize;
    let primary_count = primary_count.min(count);
    let secondary_count = count - primary_count;

    let mut taken = taken.clone();
    let mut parts: Vec<(StrategyPick, SelectionStrategy)> = Vec::new();

    let first = run(primary, pool, ctx, config, primary_count, &taken);
    taken.extend(first.indices.iter().copied());
    parts.push((first, primary));

    let second = run(secondary, pool, ctx, config, secondary_count, &taken);
    taken.extend(second.indices.iter().copied());
    parts.push((second, secondary));

    let chosen: usize = parts.iter().map(|(p, _)| p.indices.len()).sum();
    if chosen < count {
        let top_up = run(
            SelectionStrategy::DiversityMaximizing,
            pool,
            ctx,
            config,
            count - chosen,
            &taken,
        );
        parts.push((top_up, SelectionStrategy::DiversityMaximizing));
    }

    let total: usize = parts.iter().map(|(p, _)| p.indices.len()).sum();
    let benefit = if total == 0 {
        0.0
    } else {
        parts
            .iter()
            .map(|(p, _)| p.benefit * p.indices.len() as f64)
            .sum::<f64>()
            / total as f64
    };
    let rationale = format!(
        "success {success:.2}: {}",
        parts
            .iter()
            .filter(|(p, _)| !p.indices.is_empty())
            .map(|(p, s)| format!("{} x{}", s, p.indices.len()))
            .collect::<Vec<_>>()
            .join(" + ")
    );

    StrategyPick {
        indices: parts.into_iter().flat_map(|(p, _)| p.indices).collect(),
        benefit: benefit.clamp(0.0, 1.0),
        rationale,
    }
}
