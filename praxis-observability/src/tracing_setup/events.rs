//! Structured log events for key training operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log an episode start.
pub fn episode_started(episode_id: &str, index: u64, level: u32) {
    tracing::info!(
        event = "episode_started",
        episode_id = %episode_id,
        index = index,
        level = level,
        "episode started"
    );
}

/// Log an episode completion.
pub fn episode_completed(episode_id: &str, reason: &str, total_reward: f64, steps: usize) {
    tracing::info!(
        event = "episode_completed",
        episode_id = %episode_id,
        reason = %reason,
        total_reward = total_reward,
        steps = steps,
        "episode completed"
    );
}

/// Log an episode that ended in an environment or agent failure.
pub fn episode_failed(episode_id: &str, error: &str) {
    tracing::error!(
        event = "episode_failed",
        episode_id = %episode_id,
        error = %error,
        "episode failed"
    );
}

/// Log an active query.
pub fn query_generated(query_id: &str, query_type: &str, uncertainty: f64, remaining: u32) {
    tracing::debug!(
        event = "query_generated",
        query_id = %query_id,
        query_type = %query_type,
        uncertainty = uncertainty,
        budget_remaining = remaining,
        "active query generated"
    );
}

/// Log an expert consultation request.
pub fn consultation_requested(request_id: &str, step: u32, uncertainty: f64) {
    tracing::info!(
        event = "consultation_requested",
        request_id = %request_id,
        step = step,
        uncertainty = uncertainty,
        "expert consultation requested"
    );
}

/// Log an expert consultation answer.
pub fn consultation_resolved(request_id: &str, recommendation: &str, confidence: f64) {
    tracing::info!(
        event = "consultation_resolved",
        request_id = %request_id,
        recommendation = %recommendation,
        confidence = confidence,
        "expert consultation resolved"
    );
}

/// Log a consultation that got no answer in time.
pub fn consultation_timeout(request_id: &str, waited_ms: u64) {
    tracing::warn!(
        event = "consultation_timeout",
        request_id = %request_id,
        waited_ms = waited_ms,
        "expert consultation timed out"
    );
}

/// Log a curriculum level change.
pub fn curriculum_changed(from: u32, to: u32, direction: &str, success_rate: f64) {
    tracing::info!(
        event = "curriculum_changed",
        from = from,
        to = to,
        direction = %direction,
        success_rate = success_rate,
        "curriculum level changed"
    );
}

/// Log a case selection strategy switch.
pub fn strategy_changed(from: &str, to: &str, reason: &str) {
    tracing::info!(
        event = "strategy_changed",
        from = %from,
        to = %to,
        reason = %reason,
        "selection strategy changed"
    );
}

/// Log a session run-state change.
pub fn session_state_changed(session_id: &str, state: &str) {
    tracing::info!(
        event = "session_state_changed",
        session_id = %session_id,
        state = %state,
        "session state changed"
    );
}
