//! # praxis-sim
//!
//! A small emergency-triage world for exercising the orchestrator end to end:
//! a case-walking environment, a seeded case generator and two reference
//! agents. The `praxis-train` binary wires them to the simulated expert.

#![allow(async_fn_in_trait)]

pub mod agents;
pub mod environment;
pub mod generator;

pub use agents::{RandomAgent, TabularAgent, TabularConfig};
pub use environment::{Disposition, TriageConfig, TriageEnvironment};
pub use generator::SyntheticCaseGenerator;
