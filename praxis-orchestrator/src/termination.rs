//! Ready-made custom termination rules.

use praxis_core::models::{State, StepRecord};
use praxis_core::traits::TerminationRule;

/// Stops after `streak` consecutive steps with non-positive reward.
#[derive(Debug, Clone)]
pub struct RewardStreakRule {
    streak: usize,
}

impl RewardStreakRule {
    pub fn new(streak: usize) -> Self {
        Self {
            streak: streak.max(1),
        }
    }
}

impl TerminationRule for RewardStreakRule {
    fn name(&self) -> &str {
        "reward_streak"
    }

    fn should_terminate(&self, steps: &[StepRecord], _state: &State) -> bool {
        steps.len() >= self.streak
            && steps[steps.len() - self.streak..]
                .iter()
                .all(|s| s.reward <= 0.0)
    }
}

type Predicate = Box<dyn Fn(&[StepRecord], &State) -> bool + Send + Sync>;

/// Wraps a closure as a named rule.
pub struct FnTerminationRule {
    name: String,
    predicate: Predicate,
}

impl FnTerminationRule {
    pub fn new(
        name: impl Into<String>,
        predicate: impl Fn(&[StepRecord], &State) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            predicate: Box::new(predicate),
        }
    }
}

impl TerminationRule for FnTerminationRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn should_terminate(&self, steps: &[StepRecord], state: &State) -> bool {
        (self.predicate)(steps, state)
    }
}

#[cfg(test)]
mod tests {
    use praxis_core::models::{Action, UncertaintyMetrics};

    use super::*;

    fn step(reward: f64) -> StepRecord {
        StepRecord {
            step: 0,
            action: Action::wait(),
            reward,
            uncertainty: UncertaintyMetrics::sentinel(),
            query_id: None,
            consultation_id: None,
            learning_opportunity: 1.0,
            used_fallback: false,
            success: None,
        }
    }

    #[test]
    fn streak_counts_trailing_steps_only() {
        let rule = RewardStreakRule::new(2);
        let state = State::new(0);
        assert!(!rule.should_terminate(&[step(-1.0)], &state));
        assert!(rule.should_terminate(&[step(1.0), step(0.0), step(-1.0)], &state));
        assert!(!rule.should_terminate(&[step(-1.0), step(0.0), step(1.0)], &state));
    }

    #[test]
    fn closure_rule() {
        let rule = FnTerminationRule::new("three_steps", |steps, _| steps.len() >= 3);
        assert_eq!(rule.name(), "three_steps");
        let state = State::new(0);
        assert!(!rule.should_terminate(&[step(0.0)], &state));
        assert!(rule.should_terminate(&[step(0.0), step(0.0), step(0.0)], &state));
    }
}
