//! Contracts between the orchestrator and its external collaborators.

mod agent;
mod case_generator;
mod consultation_channel;
mod environment;
mod termination;

pub use agent::{Agent, AgentStats};
pub use case_generator::{CaseGenerator, GenerationOptions};
pub use consultation_channel::ConsultationChannel;
pub use environment::Environment;
pub use termination::TerminationRule;
