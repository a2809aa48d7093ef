use crate::models::{State, StepRecord};

/// Pluggable episode stop condition, checked after every step.
pub trait TerminationRule: Send + Sync {
    fn name(&self) -> &str;

    /// `steps` holds every record so far, the latest last.
    fn should_terminate(&self, steps: &[StepRecord], state: &State) -> bool;
}
