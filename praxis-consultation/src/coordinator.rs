//! ConsultationCoordinator: budget, request lifecycle and adaptive threshold.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use praxis_core::config::ConsultationConfig;
use praxis_core::errors::ConsultationError;
use praxis_core::models::{
    Budget, ConsultationContext, ConsultationRequest, ConsultationResponse, ConsultationStatus,
    UncertaintyMetrics,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::gaps::KnowledgeGapTracker;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsultationStats {
    pub requested: u64,
    pub resolved: u64,
    pub discarded: u64,
    pub episodes: u64,
}

/// What `end_episode` did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeConsultationSummary {
    pub used: u32,
    /// Requests still pending at episode end, now discarded.
    pub discarded: Vec<String>,
    pub threshold_before: f64,
    pub threshold_after: f64,
}

/// Per-session consultation state.
///
/// One budget unit is consumed per submitted request and never refunded.
/// Pending requests do not carry over between episodes.
pub struct ConsultationCoordinator {
    config: ConsultationConfig,
    budget: Budget,
    threshold: f64,
    floor: f64,
    pending: HashMap<String, ConsultationRequest>,
    resolved: HashSet<String>,
    gaps: KnowledgeGapTracker,
    stats: ConsultationStats,
}

impl ConsultationCoordinator {
    /// `query_threshold` keeps the consultation threshold strictly harder
    /// than the active query threshold.
    pub fn new(config: ConsultationConfig, query_threshold: f64) -> Self {
        let floor = if config.min_threshold > query_threshold {
            config.min_threshold
        } else {
            query_threshold + config.threshold_step.abs().max(f64::EPSILON)
        };
        let ceiling = config.max_threshold.max(floor);
        let threshold = config.threshold.clamp(floor, ceiling);
        Self {
            budget: Budget::new(config.budget),
            threshold,
            floor,
            config,
            pending: HashMap::new(),
            resolved: HashSet::new(),
            gaps: KnowledgeGapTracker::new(),
            stats: ConsultationStats::default(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn budget(&self) -> Budget {
        self.budget
    }

    pub fn timeout_ms(&self) -> u64 {
        self.config.timeout_ms
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn knowledge_gaps(&self) -> &KnowledgeGapTracker {
        &self.gaps
    }

    pub fn stats(&self) -> ConsultationStats {
        self.stats
    }

    /// Reset the budget for a new episode.
    pub fn start_episode(&mut self) {
        self.budget.reset();
        self.resolved.clear();
    }

    /// Uncertainty is above the consultation threshold and budget remains.
    pub fn should_consult(&self, uncertainty: &UncertaintyMetrics) -> bool {
        uncertainty.total > self.threshold && !self.budget.is_exhausted()
    }

    /// Create a pending request, consuming one budget unit.
    pub fn submit(
        &mut self,
        question: impl Into<String>,
        context: ConsultationContext,
        uncertainty: UncertaintyMetrics,
        step: u32,
    ) -> Result<ConsultationRequest, ConsultationError> {
        if !self.budget.try_consume() {
            return Err(ConsultationError::BudgetExhausted {
                max: self.budget.max(),
            });
        }
        self.gaps.record(&context.topic);
        let request = ConsultationRequest {
            id: uuid::Uuid::new_v4().to_string(),
            question: question.into(),
            context,
            uncertainty,
            step,
            created_at: Utc::now(),
            status: ConsultationStatus::Pending,
        };
        self.stats.requested += 1;
        debug!(
            request_id = %request.id,
            step,
            topic = %request.context.topic,
            remaining = self.budget.remaining(),
            "consultation submitted"
        );
        self.pending.insert(request.id.clone(), request.clone());
        Ok(request)
    }

    /// Complete a pending request with its response. Each request resolves once.
    pub fn resolve(
        &mut self,
        response: &ConsultationResponse,
    ) -> Result<ConsultationRequest, ConsultationError> {
        let id = &response.request_id;
        if self.resolved.contains(id) {
            return Err(ConsultationError::AlreadyResolved { id: id.clone() });
        }
        let mut request = self
            .pending
            .remove(id)
            .ok_or_else(|| ConsultationError::UnknownRequest { id: id.clone() })?;
        request.status = ConsultationStatus::Resolved;
        self.resolved.insert(id.clone());
        self.gaps.mark_addressed(&request.context.topic);
        self.stats.resolved += 1;
        debug!(
            request_id = %id,
            recommendation = %response.recommendation,
            confidence = response.confidence,
            "consultation resolved"
        );
        Ok(request)
    }

    /// Nudge the threshold by the episode's reward and discard unanswered requests.
    ///
    /// The threshold only moves when at least one consultation was resolved
    /// this episode; there is nothing to calibrate otherwise.
    pub fn end_episode(&mut self, reward: f64) -> EpisodeConsultationSummary {
        let threshold_before = self.threshold;
        if !self.resolved.is_empty() {
            let step = self.config.threshold_step.abs();
            let ceiling = self.config.max_threshold.max(self.floor);
            let nudged = if reward > 0.0 {
                self.threshold + step
            } else {
                self.threshold - step
            };
            self.threshold = nudged.clamp(self.floor, ceiling);
        }

        let mut discarded: Vec<ConsultationRequest> = self.pending.drain().map(|(_, r)| r).collect();
        discarded.sort_by_key(|r| r.step);
        for request in &discarded {
            warn!(
                request_id = %request.id,
                step = request.step,
                topic = %request.context.topic,
                "consultation timed out; discarded at episode end"
            );
        }
        self.stats.discarded += discarded.len() as u64;
        self.stats.episodes += 1;

        let summary = EpisodeConsultationSummary {
            used: self.budget.used(),
            discarded: discarded.into_iter().map(|r| r.id).collect(),
            threshold_before,
            threshold_after: self.threshold,
        };
        info!(
            used = summary.used,
            discarded = summary.discarded.len(),
            threshold = self.threshold,
            "consultation episode closed"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use praxis_core::models::State;

    use super::*;

    fn context(topic: &str) -> ConsultationContext {
        ConsultationContext {
            state: State::new(0).with_tag(topic),
            candidate_actions: vec![],
            agent_preference: None,
            topic: topic.to_string(),
        }
    }

    fn response(id: &str) -> ConsultationResponse {
        ConsultationResponse {
            request_id: id.to_string(),
            recommendation: "admit".into(),
            confidence: 0.9,
            feedback_text: "admit for monitoring".into(),
        }
    }

    fn coordinator() -> ConsultationCoordinator {
        ConsultationCoordinator::new(ConsultationConfig::default(), 0.6)
    }

    #[test]
    fn budget_exhaustion_is_reported() {
        let mut c = coordinator();
        c.start_episode();
        let u = UncertaintyMetrics::sentinel();
        c.submit("q1", context("cardiac"), u, 0).unwrap();
        c.submit("q2", context("cardiac"), u, 1).unwrap();
        let err = c.submit("q3", context("cardiac"), u, 2).unwrap_err();
        assert_eq!(err, ConsultationError::BudgetExhausted { max: 2 });
        assert!(!c.should_consult(&u));
    }

    #[test]
    fn resolve_exactly_once() {
        let mut c = coordinator();
        c.start_episode();
        let request = c
            .submit("q", context("sepsis"), UncertaintyMetrics::sentinel(), 0)
            .unwrap();
        let resolved = c.resolve(&response(&request.id)).unwrap();
        assert_eq!(resolved.status, ConsultationStatus::Resolved);
        assert_eq!(
            c.resolve(&response(&request.id)).unwrap_err(),
            ConsultationError::AlreadyResolved { id: request.id.clone() }
        );
        assert!(matches!(
            c.resolve(&response("nope")),
            Err(ConsultationError::UnknownRequest { .. })
        ));
        assert!(!c.knowledge_gaps().get("sepsis").unwrap().is_open());
    }

    #[test]
    fn end_episode_discards_pending_and_resets_next_episode() {
        let mut c = coordinator();
        c.start_episode();
        let request = c
            .submit("q", context("trauma"), UncertaintyMetrics::sentinel(), 3)
            .unwrap();
        let summary = c.end_episode(1.0);
        assert_eq!(summary.discarded, vec![request.id.clone()]);
        assert_eq!(summary.used, 1);
        assert_eq!(c.pending_count(), 0);
        assert!(matches!(
            c.resolve(&response(&request.id)),
            Err(ConsultationError::UnknownRequest { .. })
        ));

        c.start_episode();
        assert_eq!(c.budget().remaining(), 2);
        assert_eq!(c.stats().discarded, 1);
    }

    /// One episode with a single answered consultation.
    fn consulted_episode(c: &mut ConsultationCoordinator, reward: f64) {
        c.start_episode();
        let request = c
            .submit("q", context("cardiac"), UncertaintyMetrics::sentinel(), 0)
            .unwrap();
        c.resolve(&response(&request.id)).unwrap();
        c.end_episode(reward);
    }

    #[test]
    fn threshold_follows_reward_within_bounds() {
        let mut c = coordinator();
        let start = c.threshold();
        consulted_episode(&mut c, 0.5);
        assert!((c.threshold() - (start + 0.02)).abs() < 1e-12);
        for _ in 0..100 {
            consulted_episode(&mut c, -1.0);
        }
        assert!((c.threshold() - 0.7).abs() < 1e-12);
        for _ in 0..100 {
            consulted_episode(&mut c, 1.0);
        }
        assert!((c.threshold() - 1.1).abs() < 1e-12);
    }

    #[test]
    fn threshold_holds_without_resolved_consultations() {
        let mut c = coordinator();
        let before = c.threshold();
        for _ in 0..3 {
            c.start_episode();
            let summary = c.end_episode(-1.0);
            assert_eq!(summary.threshold_after, summary.threshold_before);
        }
        assert_eq!(c.threshold(), before);

        c.start_episode();
        c.submit("q", context("stroke"), UncertaintyMetrics::sentinel(), 0)
            .unwrap();
        c.end_episode(-1.0);
        assert_eq!(c.threshold(), before);
        assert_eq!(c.stats().resolved, 0);
    }

    #[test]
    fn threshold_stays_above_query_threshold() {
        let config = ConsultationConfig {
            min_threshold: 0.5,
            threshold: 0.55,
            ..ConsultationConfig::default()
        };
        let mut c = ConsultationCoordinator::new(config, 0.6);
        for _ in 0..50 {
            consulted_episode(&mut c, -1.0);
        }
        assert!(c.threshold() > 0.6);
    }
}
