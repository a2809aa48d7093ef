use serde::{Deserialize, Serialize};

use super::query::ActiveQuery;
use super::state::{Action, State};
use super::uncertainty::UncertaintyMetrics;

/// One transition as handed to `Agent::update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub state: State,
    pub action: Action,
    pub reward: f64,
    pub next_state: State,
    pub done: bool,
    pub uncertainty: UncertaintyMetrics,
    /// Query raised at this step, if any.
    pub query: Option<ActiveQuery>,
    /// Action the expert recommended at this step, if consulted and answered.
    pub expert_recommendation: Option<String>,
    /// Scale for the agent's update; above 1.0 on queried steps.
    pub learning_weight: f64,
}
