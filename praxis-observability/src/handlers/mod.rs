//! TrainingEventHandler implementations.

pub mod channel;
pub mod logging;
pub mod metrics;

pub use channel::ChannelEventHandler;
pub use logging::LoggingEventHandler;
pub use metrics::MetricsEventHandler;
