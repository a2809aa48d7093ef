//! # praxis-core
//!
//! Foundation crate for the Praxis active-learning trainer.
//! Defines all models, traits, errors, config, and the training event bus.
//! Every other crate in the workspace depends on this.

#![allow(async_fn_in_trait)]

pub mod config;
pub mod errors;
pub mod events;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::PraxisConfig;
pub use errors::{PraxisError, PraxisResult};
pub use models::{
    Action, ActionKind, ActiveQuery, Budget, EpisodeResult, Experience, State, TerminationReason,
    TrainingCase, Transition, UncertaintyMetrics,
};
