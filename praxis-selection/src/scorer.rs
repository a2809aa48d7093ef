//! Per-case uncertainty scoring used by the uncertainty-focused strategy.

use praxis_core::models::{Action, State, TrainingCase};
use praxis_core::traits::Agent;
use praxis_uncertainty::{best, score_actions, UncertaintyEstimator};

/// Scores how uncertain the agent is about a case, in `[0, 1]`.
pub trait CaseScorer {
    fn score(&self, case: &TrainingCase) -> f64;
}

impl<F> CaseScorer for F
where
    F: Fn(&TrainingCase) -> f64,
{
    fn score(&self, case: &TrainingCase) -> f64 {
        self(case).clamp(0.0, 1.0)
    }
}

/// Scores a case by the agent's uncertainty on its representative action,
/// the one the agent is most confident in from the case's initial state.
pub struct AgentCaseScorer<'a> {
    agent: &'a dyn Agent,
    estimator: &'a dyn UncertaintyEstimator,
    actions: &'a [Action],
}

impl<'a> AgentCaseScorer<'a> {
    pub fn new(
        agent: &'a dyn Agent,
        estimator: &'a dyn UncertaintyEstimator,
        actions: &'a [Action],
    ) -> Self {
        Self {
            agent,
            estimator,
            actions,
        }
    }
}

impl CaseScorer for AgentCaseScorer<'_> {
    fn score(&self, case: &TrainingCase) -> f64 {
        let state = State::from_case(case);
        let scored = score_actions(self.agent, &state, self.actions);
        let representative = best(&scored)
            .map(|s| s.action.clone())
            .unwrap_or_else(Action::wait);
        self.estimator
            .estimate(self.agent, &state, &representative, self.actions)
            .total
            .clamp(0.0, 1.0)
    }
}
