use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::PraxisResult;
use crate::models::{Action, Experience, State};

/// Snapshot of an agent's training statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentStats {
    pub name: String,
    pub episodes: u64,
    pub updates: u64,
    pub average_reward: f64,
    /// Implementation-specific counters.
    pub extra: BTreeMap<String, f64>,
}

/// Decision-making policy under training.
///
/// Rule tables, learned networks, and narrative policies all plug in here; the
/// orchestrator treats every variant the same way.
pub trait Agent: Send {
    fn name(&self) -> &str;

    /// Choose one of `actions` (never called with an empty slice).
    fn select_action(&mut self, state: &State, actions: &[Action]) -> PraxisResult<Action>;

    /// Learn from one transition.
    fn update(&mut self, experience: &Experience) -> PraxisResult<()>;

    /// Confidence in `action` from `state`, expected in [0, 1].
    fn confidence(&self, state: &State, action: &Action) -> f64;

    fn start_episode(&mut self) {}

    /// Episode cleanup. Called on every exit path, including failures.
    fn end_episode(&mut self) {}

    fn stats(&self) -> AgentStats;
}
