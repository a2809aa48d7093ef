use praxis_core::errors::{PraxisError, PraxisResult};
use praxis_core::models::{Action, Experience, State};
use praxis_core::traits::{Agent, AgentStats};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Uniform random policy. Useful as a baseline and in smoke tests.
pub struct RandomAgent {
    rng: ChaCha8Rng,
    episodes: u64,
    updates: u64,
    reward_sum: f64,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            episodes: 0,
            updates: 0,
            reward_sum: 0.0,
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn select_action(&mut self, _state: &State, actions: &[Action]) -> PraxisResult<Action> {
        actions
            .choose(&mut self.rng)
            .cloned()
            .ok_or_else(|| PraxisError::agent("no actions to choose from"))
    }

    fn update(&mut self, experience: &Experience) -> PraxisResult<()> {
        self.updates += 1;
        self.reward_sum += experience.reward;
        Ok(())
    }

    /// Knows nothing, so it is never confident.
    fn confidence(&self, _state: &State, _action: &Action) -> f64 {
        0.0
    }

    fn end_episode(&mut self) {
        self.episodes += 1;
    }

    fn stats(&self) -> AgentStats {
        AgentStats {
            name: self.name().to_string(),
            episodes: self.episodes,
            updates: self.updates,
            average_reward: if self.updates == 0 {
                0.0
            } else {
                self.reward_sum / self.updates as f64
            },
            ..AgentStats::default()
        }
    }
}
