//! Span definitions per operation: training run, episode, step, selection, consultation.

/// Create a training run span.
#[macro_export]
macro_rules! training_span {
    ($session_id:expr, $episodes:expr) => {
        tracing::info_span!("praxis.training", session_id = %$session_id, episodes = $episodes)
    };
}

/// Create an episode span.
#[macro_export]
macro_rules! episode_span {
    ($episode_id:expr, $index:expr) => {
        tracing::info_span!("praxis.episode", episode_id = %$episode_id, index = $index)
    };
}

/// Create a step span.
#[macro_export]
macro_rules! step_span {
    ($step:expr) => {
        tracing::debug_span!("praxis.step", step = $step)
    };
}

/// Create a case selection span.
#[macro_export]
macro_rules! selection_span {
    ($pool_size:expr, $target:expr) => {
        tracing::info_span!("praxis.selection", pool_size = $pool_size, target = $target)
    };
}

/// Create a consultation span.
#[macro_export]
macro_rules! consultation_span {
    ($request_id:expr) => {
        tracing::info_span!("praxis.consultation", request_id = %$request_id)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const TRAINING: &str = "praxis.training";
    pub const EPISODE: &str = "praxis.episode";
    pub const STEP: &str = "praxis.step";
    pub const SELECTION: &str = "praxis.selection";
    pub const CONSULTATION: &str = "praxis.consultation";
}
