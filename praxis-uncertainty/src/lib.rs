//! # praxis-uncertainty
//!
//! Per-step uncertainty estimation and the budgeted active query selector.
//!
//! ## Estimate
//!
//! | Component | Source |
//! |-----------|--------|
//! | Epistemic | `1 − confidence` in the candidate action |
//! | Aleatoric | How close the agent's top two actions are |
//! | Information gain | `4·c·(1 − c)`, peaking at `c = 0.5` |
//!
//! An empty action set yields the maximal sentinel instead of an error.

pub mod estimator;
pub mod history;
pub mod query;

pub use estimator::{best, score_actions, ConfidenceSpreadEstimator, ScoredAction, UncertaintyEstimator};
pub use history::{half_split_reduction, linear_slope, UncertaintyHistory};
pub use query::{ActiveQuerySelector, QueryStats};
