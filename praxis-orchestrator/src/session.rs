//! SessionRegistry: concurrent lookup of independent training sessions via DashMap.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use praxis_core::models::SessionState;
use serde::{Deserialize, Serialize};

use crate::control::SessionControl;

/// Snapshot a session publishes after each episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub session_id: String,
    pub state: SessionState,
    pub episodes_run: u64,
    pub curriculum_level: u32,
    pub last_reward: Option<f64>,
    pub updated_at: DateTime<Utc>,
}

struct Entry {
    control: SessionControl,
    status: SessionStatus,
}

/// Holds only control handles and published snapshots; sessions share
/// nothing else.
pub struct SessionRegistry {
    sessions: Arc<DashMap<String, Entry>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }

    /// Track a session. Replaces an existing entry with the same id.
    pub fn register(&self, session_id: &str, control: SessionControl) {
        let status = SessionStatus {
            session_id: session_id.to_string(),
            state: control.state(),
            episodes_run: 0,
            curriculum_level: 1,
            last_reward: None,
            updated_at: Utc::now(),
        };
        self.sessions
            .insert(session_id.to_string(), Entry { control, status });
    }

    /// Store a newer snapshot. Returns false if the session is unknown.
    pub fn publish(&self, status: SessionStatus) -> bool {
        match self.sessions.get_mut(&status.session_id) {
            Some(mut entry) => {
                entry.status = status;
                true
            }
            None => false,
        }
    }

    pub fn status(&self, session_id: &str) -> Option<SessionStatus> {
        self.sessions.get(session_id).map(|e| {
            let mut status = e.status.clone();
            status.state = e.control.state();
            status
        })
    }

    pub fn control(&self, session_id: &str) -> Option<SessionControl> {
        self.sessions.get(session_id).map(|e| e.control.clone())
    }

    pub fn pause(&self, session_id: &str) -> bool {
        self.control(session_id).is_some_and(|c| c.pause())
    }

    pub fn resume(&self, session_id: &str) -> bool {
        self.control(session_id).is_some_and(|c| c.resume())
    }

    pub fn stop(&self, session_id: &str) -> bool {
        self.control(session_id).is_some_and(|c| c.stop())
    }

    /// Stop every registered session.
    pub fn stop_all(&self) -> usize {
        self.sessions
            .iter()
            .filter(|e| e.control.stop())
            .count()
    }

    pub fn remove(&self, session_id: &str) -> Option<SessionStatus> {
        self.sessions.remove(session_id).map(|(_, e)| e.status)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.iter().map(|r| r.key().clone()).collect()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_steers_sessions_independently() {
        let registry = SessionRegistry::new();
        let a = SessionControl::new();
        let b = SessionControl::new();
        registry.register("a", a.clone());
        registry.register("b", b.clone());

        assert!(registry.pause("a"));
        assert_eq!(a.state(), SessionState::Paused);
        assert_eq!(b.state(), SessionState::Running);
        assert_eq!(registry.status("a").unwrap().state, SessionState::Paused);
        assert!(!registry.pause("missing"));

        assert_eq!(registry.stop_all(), 2);
        assert!(b.is_stopped());
        assert_eq!(registry.session_count(), 2);
    }

    #[test]
    fn publish_requires_registration() {
        let registry = SessionRegistry::new();
        let status = SessionStatus {
            session_id: "x".into(),
            state: SessionState::Running,
            episodes_run: 3,
            curriculum_level: 2,
            last_reward: Some(1.5),
            updated_at: Utc::now(),
        };
        assert!(!registry.publish(status.clone()));
        registry.register("x", SessionControl::new());
        assert!(registry.publish(status));
        assert_eq!(registry.status("x").unwrap().episodes_run, 3);
        assert_eq!(registry.remove("x").unwrap().curriculum_level, 2);
        assert!(registry.session_ids().is_empty());
    }
}
