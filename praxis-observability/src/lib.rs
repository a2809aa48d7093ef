//! # praxis-observability
//!
//! Structured tracing with span definitions, training event handlers that log,
//! forward or aggregate the session's event stream, and session-level metrics.

pub mod handlers;
pub mod metrics;
pub mod tracing_setup;

pub use handlers::{ChannelEventHandler, LoggingEventHandler, MetricsEventHandler};
pub use metrics::TrainingMetrics;
