//! Error types for every subsystem, aggregated by [`PraxisError`].

mod config_error;
mod consultation_error;
mod selection_error;

pub use config_error::ConfigError;
pub use consultation_error::ConsultationError;
pub use selection_error::SelectionError;

/// Root error type for the workspace.
#[derive(Debug, thiserror::Error)]
pub enum PraxisError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Consultation(#[from] ConsultationError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("environment failure: {reason}")]
    Environment { reason: String },

    #[error("agent failure: {reason}")]
    Agent { reason: String },

    #[error("case generation failed: {reason}")]
    Generation { reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl PraxisError {
    pub fn environment(reason: impl Into<String>) -> Self {
        Self::Environment {
            reason: reason.into(),
        }
    }

    pub fn agent(reason: impl Into<String>) -> Self {
        Self::Agent {
            reason: reason.into(),
        }
    }

    pub fn generation(reason: impl Into<String>) -> Self {
        Self::Generation {
            reason: reason.into(),
        }
    }
}

/// Convenience alias used across the workspace.
pub type PraxisResult<T> = Result<T, PraxisError>;
