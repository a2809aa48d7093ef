//! SessionControl: pause/resume/stop signalling over a watch channel.

use std::sync::Arc;
use std::time::Duration;

use praxis_core::models::SessionState;
use tokio::sync::watch;

/// Cloneable handle that steers a running session.
///
/// The loop only reads the state at step boundaries. `Stopped` is final.
#[derive(Clone)]
pub struct SessionControl {
    sender: Arc<watch::Sender<SessionState>>,
}

impl SessionControl {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(SessionState::Running);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn state(&self) -> SessionState {
        *self.sender.borrow()
    }

    pub fn is_stopped(&self) -> bool {
        self.state() == SessionState::Stopped
    }

    /// Returns `false` unless the session was running.
    pub fn pause(&self) -> bool {
        self.transition(SessionState::Running, SessionState::Paused)
    }

    /// Returns `false` unless the session was paused.
    pub fn resume(&self) -> bool {
        self.transition(SessionState::Paused, SessionState::Running)
    }

    /// Returns `false` if the session was already stopped.
    pub fn stop(&self) -> bool {
        self.sender.send_if_modified(|state| {
            if *state == SessionState::Stopped {
                false
            } else {
                *state = SessionState::Stopped;
                true
            }
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.sender.subscribe()
    }

    /// Wait until the session is not paused and return the state it left in.
    ///
    /// Re-checks at least every `poll` even without a change notification.
    pub async fn wait_while_paused(&self, poll: Duration) -> SessionState {
        let mut receiver = self.sender.subscribe();
        loop {
            let state = *receiver.borrow_and_update();
            if state != SessionState::Paused {
                return state;
            }
            let _ = tokio::time::timeout(poll, receiver.changed()).await;
        }
    }

    fn transition(&self, from: SessionState, to: SessionState) -> bool {
        self.sender.send_if_modified(|state| {
            if *state == from {
                *state = to;
                true
            } else {
                false
            }
        })
    }
}

impl Default for SessionControl {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_are_guarded() {
        let control = SessionControl::new();
        assert!(!control.resume());
        assert!(control.pause());
        assert!(!control.pause());
        assert!(control.resume());
        assert!(control.stop());
        assert!(!control.stop());
        assert!(!control.pause());
        assert!(!control.resume());
        assert_eq!(control.state(), SessionState::Stopped);
    }

    #[test]
    fn clones_share_state() {
        let control = SessionControl::new();
        let handle = control.clone();
        handle.pause();
        assert_eq!(control.state(), SessionState::Paused);
    }

    #[tokio::test(start_paused = true)]
    async fn wait_returns_after_resume() {
        let control = SessionControl::new();
        control.pause();
        let handle = control.clone();
        let (state, _) = tokio::join!(
            control.wait_while_paused(Duration::from_millis(5)),
            async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                handle.resume();
            }
        );
        assert_eq!(state, SessionState::Running);
    }

    #[tokio::test]
    async fn wait_returns_immediately_when_running() {
        let control = SessionControl::new();
        let state = control.wait_while_paused(Duration::from_secs(60)).await;
        assert_eq!(state, SessionState::Running);
    }
}
