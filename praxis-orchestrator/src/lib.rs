//! # praxis-orchestrator
//!
//! The active-learning episode loop. Each step estimates uncertainty, may
//! raise a budgeted query or expert consultation, lets the agent act, and
//! feeds the outcome back into the agent, the curriculum and case selection.

#![allow(async_fn_in_trait)]

pub mod control;
pub mod engine;
mod episode;
pub mod history;
pub mod metrics;
pub mod report;
pub mod session;
pub mod termination;

pub use control::SessionControl;
pub use engine::{EpisodeOrchestrator, NoExpert};
pub use history::EpisodeHistory;
pub use report::{EpisodeFailure, TrainingReport};
pub use session::{SessionRegistry, SessionStatus};
pub use termination::{FnTerminationRule, RewardStreakRule};
