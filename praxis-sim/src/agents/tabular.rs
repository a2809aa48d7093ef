//! Tabular Q-learning over a coarse triage state key.

use std::collections::HashMap;

use praxis_core::errors::{PraxisError, PraxisResult};
use praxis_core::models::{Action, Experience, State};
use praxis_core::traits::{Agent, AgentStats};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Pseudo-visits before a state-action estimate is fully trusted.
const VISIT_PRIOR: f64 = 3.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabularConfig {
    pub learning_rate: f64,
    pub discount: f64,
    pub epsilon: f64,
    pub epsilon_decay: f64,
    pub min_epsilon: f64,
    /// Pull towards an expert recommendation, as a fraction of the learning rate.
    pub imitation_rate: f64,
    /// Softmax temperature used for confidence.
    pub temperature: f64,
    pub seed: u64,
}

impl Default for TabularConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.2,
            discount: 0.9,
            epsilon: 0.3,
            epsilon_decay: 0.97,
            min_epsilon: 0.02,
            imitation_rate: 0.5,
            temperature: 0.5,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct QEntry {
    value: f64,
    visits: u64,
}

pub struct TabularAgent {
    config: TabularConfig,
    rng: ChaCha8Rng,
    epsilon: f64,
    table: HashMap<String, HashMap<String, QEntry>>,
    episodes: u64,
    updates: u64,
    reward_sum: f64,
}

impl TabularAgent {
    pub fn new(config: TabularConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            epsilon: config.epsilon.clamp(0.0, 1.0),
            config,
            table: HashMap::new(),
            episodes: 0,
            updates: 0,
            reward_sum: 0.0,
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Number of state-action pairs with an estimate.
    pub fn table_size(&self) -> usize {
        self.table.values().map(HashMap::len).sum()
    }

    pub fn value(&self, state: &State, action: &Action) -> Option<f64> {
        self.entry(state, action).map(|e| e.value)
    }

    fn entry(&self, state: &State, action: &Action) -> Option<QEntry> {
        self.table
            .get(&state_key(state))
            .and_then(|row| row.get(&action.name))
            .copied()
    }

    fn best_value(&self, state: &State) -> f64 {
        self.table
            .get(&state_key(state))
            .and_then(|row| row.values().map(|e| e.value).reduce(f64::max))
            .unwrap_or(0.0)
    }

    fn greedy(&self, state: &State, actions: &[Action]) -> Option<Action> {
        let row = self.table.get(&state_key(state));
        let value = |a: &Action| {
            row.and_then(|r| r.get(&a.name))
                .map_or(0.0, |e| e.value)
        };
        let mut best: Option<(&Action, f64)> = None;
        for action in actions {
            let v = value(action);
            if best.map_or(true, |(_, b)| v > b) {
                best = Some((action, v));
            }
        }
        best.map(|(a, _)| a.clone())
    }
}

impl Agent for TabularAgent {
    fn name(&self) -> &str {
        "tabular"
    }

    fn select_action(&mut self, state: &State, actions: &[Action]) -> PraxisResult<Action> {
        let explore = self.rng.gen::<f64>() < self.epsilon;
        let choice = if explore {
            actions.choose(&mut self.rng).cloned()
        } else {
            self.greedy(state, actions)
        };
        choice.ok_or_else(|| PraxisError::agent("no actions to choose from"))
    }

    fn update(&mut self, experience: &Experience) -> PraxisResult<()> {
        if !experience.reward.is_finite() {
            return Err(PraxisError::agent(format!(
                "non-finite reward {}",
                experience.reward
            )));
        }
        let future = if experience.done {
            0.0
        } else {
            self.best_value(&experience.next_state)
        };
        let target = experience.reward + self.config.discount * future;
        let step = (self.config.learning_rate * experience.learning_weight.max(0.0)).min(1.0);
        let imitation = self.config.learning_rate * self.config.imitation_rate;

        let row = self.table.entry(state_key(&experience.state)).or_default();
        let entry = row.entry(experience.action.name.clone()).or_default();
        entry.value += step * (target - entry.value);
        entry.visits += 1;

        if let Some(recommended) = &experience.expert_recommendation {
            let entry = row.entry(recommended.clone()).or_default();
            entry.value += imitation * (1.0 - entry.value);
            entry.visits += 1;
        }

        self.updates += 1;
        self.reward_sum += experience.reward;
        Ok(())
    }

    /// Softmax share of `action` among known actions, discounted while
    /// the estimate has few visits.
    fn confidence(&self, state: &State, action: &Action) -> f64 {
        let Some(row) = self.table.get(&state_key(state)) else {
            return 0.0;
        };
        let Some(entry) = row.get(&action.name) else {
            return 0.0;
        };
        let temperature = self.config.temperature.max(1e-6);
        let max = row.values().map(|e| e.value).fold(f64::NEG_INFINITY, f64::max);
        let norm: f64 = row
            .values()
            .map(|e| ((e.value - max) / temperature).exp())
            .sum();
        let share = ((entry.value - max) / temperature).exp() / norm;
        let visits = entry.visits as f64;
        (share * visits / (visits + VISIT_PRIOR)).clamp(0.0, 1.0)
    }

    fn end_episode(&mut self) {
        self.episodes += 1;
        self.epsilon = (self.epsilon * self.config.epsilon_decay).max(self.config.min_epsilon);
    }

    fn stats(&self) -> AgentStats {
        let mut stats = AgentStats {
            name: self.name().to_string(),
            episodes: self.episodes,
            updates: self.updates,
            average_reward: if self.updates == 0 {
                0.0
            } else {
                self.reward_sum / self.updates as f64
            },
            ..AgentStats::default()
        };
        stats.extra.insert("epsilon".into(), self.epsilon);
        stats.extra.insert("table_size".into(), self.table_size() as f64);
        stats
    }
}

/// `topic:acuity:abnormal`, with `?` while vitals are unassessed.
fn state_key(state: &State) -> String {
    let acuity = state
        .feature("acuity")
        .map_or(0, |a| (a * 5.0).round() as i64);
    let abnormal = match state.feature("abnormal_vitals") {
        Some(n) => (n as i64).min(3).to_string(),
        None => "?".to_string(),
    };
    format!("{}:{}:{}", state.topic(), acuity, abnormal)
}
