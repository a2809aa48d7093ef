use crate::errors::PraxisResult;
use crate::models::{Action, State, TrainingCase, Transition};

/// Simulated world the agent acts in.
///
/// The orchestrator only uses this contract; it never inspects environment internals.
pub trait Environment {
    /// Start a new episode and return the initial observation.
    async fn reset(&mut self) -> PraxisResult<State>;

    /// Actions available from `state`. May be empty.
    fn available_actions(&self, state: &State) -> PraxisResult<Vec<Action>>;

    /// Apply an action and advance the world by one step.
    async fn step(&mut self, action: &Action) -> PraxisResult<Transition>;

    /// Replace the cases the next episodes draw from. Case-agnostic environments ignore it.
    fn load_cases(&mut self, _cases: Vec<TrainingCase>) {}
}
