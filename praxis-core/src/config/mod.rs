//! Configuration for every subsystem, loaded from TOML.

pub mod consultation_config;
pub mod curriculum_config;
pub mod defaults;
pub mod observability_config;
pub mod orchestrator_config;
pub mod selection_config;
pub mod uncertainty_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use consultation_config::ConsultationConfig;
pub use curriculum_config::CurriculumConfig;
pub use observability_config::ObservabilityConfig;
pub use orchestrator_config::OrchestratorConfig;
pub use selection_config::SelectionConfig;
pub use uncertainty_config::{QueryConfig, QueryStrategy, UncertaintyConfig};

use crate::errors::ConfigError;

/// Top-level configuration. Every section falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PraxisConfig {
    pub orchestrator: OrchestratorConfig,
    pub uncertainty: UncertaintyConfig,
    pub query: QueryConfig,
    pub curriculum: CurriculumConfig,
    pub selection: SelectionConfig,
    pub consultation: ConsultationConfig,
    pub observability: ObservabilityConfig,
}

impl PraxisConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Self::parse("<inline>", source)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let source = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: display.clone(),
            },
            _ => ConfigError::ParseError {
                path: display.clone(),
                message: e.to_string(),
            },
        })?;
        Self::parse(&display, &source)
    }

    fn parse(path: &str, source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::ParseError {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.curriculum;
        if c.max_level == 0 {
            return Err(invalid("curriculum.max_level", "must be at least 1"));
        }
        if c.window_size == 0 {
            return Err(invalid("curriculum.window_size", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&c.complexity_window_width) || c.complexity_window_width == 0.0 {
            return Err(invalid(
                "curriculum.complexity_window_width",
                "must be in (0, 1]",
            ));
        }
        if c.complexity_widen_step <= 0.0 {
            return Err(invalid("curriculum.complexity_widen_step", "must be positive"));
        }
        if !(0.0..=1.0).contains(&c.competency_ema_alpha) {
            return Err(invalid("curriculum.competency_ema_alpha", "must be in [0, 1]"));
        }

        let q = &self.query;
        if !(0.0..=1.0).contains(&q.epsilon) {
            return Err(invalid("query.epsilon", "must be in [0, 1]"));
        }

        let k = &self.consultation;
        if k.min_threshold > k.max_threshold {
            return Err(invalid(
                "consultation.min_threshold",
                "must not exceed consultation.max_threshold",
            ));
        }
        if !(k.min_threshold..=k.max_threshold).contains(&k.threshold) {
            return Err(invalid(
                "consultation.threshold",
                "must lie within [min_threshold, max_threshold]",
            ));
        }
        // Consulting is the rarer, costlier branch: it must sit strictly above querying.
        if k.min_threshold <= q.total_threshold {
            return Err(invalid(
                "consultation.min_threshold",
                "must be strictly greater than query.total_threshold",
            ));
        }

        let o = &self.orchestrator;
        if o.max_steps == 0 {
            return Err(invalid("orchestrator.max_steps", "must be at least 1"));
        }
        if o.history_capacity == 0 {
            return Err(invalid("orchestrator.history_capacity", "must be at least 1"));
        }
        if o.opportunity_window == 0 {
            return Err(invalid("orchestrator.opportunity_window", "must be at least 1"));
        }

        let s = &self.selection;
        if s.reevaluation_interval == 0 {
            return Err(invalid("selection.reevaluation_interval", "must be at least 1"));
        }
        if s.histogram_bins == 0 {
            return Err(invalid("selection.histogram_bins", "must be at least 1"));
        }
        if s.struggling_success_rate > s.excelling_success_rate {
            return Err(invalid(
                "selection.struggling_success_rate",
                "must not exceed selection.excelling_success_rate",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
