//! TriageEnvironment: an episode walks a batch of cases one at a time.
//!
//! Each case can be assessed once (revealing its vitals) before the agent
//! commits to a disposition. A case left undecided for `max_case_steps`
//! steps counts as a miss and the next case is presented.

mod disposition;

pub use disposition::{disposition_reward, Disposition};

use praxis_core::errors::{PraxisError, PraxisResult};
use praxis_core::models::{Action, ActionKind, State, StepInfo, TrainingCase, Transition};
use praxis_core::traits::{Environment, GenerationOptions};
use tracing::debug;

use crate::generator::SyntheticCaseGenerator;

pub const ASSESS: &str = "assess";

const VITAL_FEATURES: [&str; 6] = [
    "heart_rate",
    "systolic_bp",
    "respiratory_rate",
    "oxygen_saturation",
    "temperature_c",
    "abnormal_vitals",
];

#[derive(Debug, Clone)]
pub struct TriageConfig {
    /// Steps a case may stay undecided before it counts as missed.
    pub max_case_steps: u32,
    /// Cases generated per episode when no batch was loaded.
    pub fallback_cases: usize,
    pub assessment_cost: f64,
    pub wait_penalty: f64,
    pub seed: u64,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            max_case_steps: 4,
            fallback_cases: 4,
            assessment_cost: 0.02,
            wait_penalty: 0.05,
            seed: 17,
        }
    }
}

pub struct TriageEnvironment {
    config: TriageConfig,
    generator: SyntheticCaseGenerator,
    loaded: Vec<TrainingCase>,
    cases: Vec<TrainingCase>,
    cursor: usize,
    case_steps: u32,
    assessed: bool,
    step: u32,
    episodes: u64,
}

impl TriageEnvironment {
    pub fn new(config: TriageConfig) -> Self {
        Self {
            generator: SyntheticCaseGenerator::new(config.seed),
            config,
            loaded: Vec::new(),
            cases: Vec::new(),
            cursor: 0,
            case_steps: 0,
            assessed: false,
            step: 0,
            episodes: 0,
        }
    }

    /// Case currently presented, if the episode is still running.
    pub fn current_case(&self) -> Option<&TrainingCase> {
        self.cases.get(self.cursor)
    }

    pub fn cases_in_episode(&self) -> usize {
        self.cases.len()
    }

    pub fn episodes(&self) -> u64 {
        self.episodes
    }

    fn observe(&self) -> State {
        let Some(case) = self.current_case() else {
            let mut state = State::new(self.step);
            state.tags.push("resolved".to_string());
            return state;
        };
        let mut state = State::from_case(case);
        state.step = self.step;
        if self.assessed {
            state.features.insert("assessed".to_string(), 1.0);
        } else {
            for feature in VITAL_FEATURES {
                state.features.remove(feature);
            }
        }
        state
    }

    fn next_case(&mut self) {
        self.cursor += 1;
        self.case_steps = 0;
        self.assessed = false;
    }

    fn is_done(&self) -> bool {
        self.cursor >= self.cases.len()
    }
}

impl Default for TriageEnvironment {
    fn default() -> Self {
        Self::new(TriageConfig::default())
    }
}

impl Environment for TriageEnvironment {
    async fn reset(&mut self) -> PraxisResult<State> {
        self.cases = if self.loaded.is_empty() {
            self.generator
                .generate_batch(self.config.fallback_cases.max(1), &GenerationOptions::default())?
        } else {
            self.loaded.clone()
        };
        self.cursor = 0;
        self.case_steps = 0;
        self.assessed = false;
        self.step = 0;
        self.episodes += 1;
        debug!(episode = self.episodes, cases = self.cases.len(), "triage episode reset");
        Ok(self.observe())
    }

    fn available_actions(&self, _state: &State) -> PraxisResult<Vec<Action>> {
        if self.is_done() {
            return Ok(Vec::new());
        }
        let mut actions = Vec::with_capacity(6);
        if !self.assessed {
            actions.push(Action::new(ASSESS, ActionKind::Assessment));
        }
        actions.extend(Disposition::ALL.into_iter().map(Disposition::action));
        Ok(actions)
    }

    async fn step(&mut self, action: &Action) -> PraxisResult<Transition> {
        let Some(case) = self.current_case() else {
            return Err(PraxisError::environment("step after every case was resolved"));
        };
        let expected = Disposition::parse(&case.expected_action).ok_or_else(|| {
            PraxisError::environment(format!(
                "case {} has unknown expected action {}",
                case.id, case.expected_action
            ))
        })?;
        let competencies = case.competencies.clone();

        self.step += 1;
        self.case_steps += 1;

        let (mut reward, mut success, mut resolved) = match action.kind {
            ActionKind::Disposition => {
                let chosen = Disposition::parse(&action.name).ok_or_else(|| {
                    PraxisError::environment(format!("unknown disposition {}", action.name))
                })?;
                let reward = disposition_reward(chosen, expected);
                (reward, Some(chosen == expected), true)
            }
            ActionKind::Assessment if !self.assessed => {
                self.assessed = true;
                (-self.config.assessment_cost, None, false)
            }
            _ => (-self.config.wait_penalty, None, false),
        };

        if !resolved && self.case_steps >= self.config.max_case_steps {
            reward -= 1.0;
            success = Some(false);
            resolved = true;
        }
        if resolved {
            self.next_case();
        }

        let done = self.is_done();
        Ok(Transition {
            state: self.observe(),
            reward,
            done,
            info: StepInfo {
                success,
                competencies: if success.is_some() { competencies } else { Vec::new() },
                message: None,
            },
        })
    }

    fn load_cases(&mut self, cases: Vec<TrainingCase>) {
        self.loaded = cases;
    }
}
