//! Forwards training events into a bounded tokio channel.

use std::sync::atomic::{AtomicU64, Ordering};

use praxis_core::events::*;
use tokio::sync::mpsc;

/// Queue adapter for slow consumers.
///
/// Sends never block a step: when the channel is full or the receiver is
/// gone the event is dropped and counted.
pub struct ChannelEventHandler {
    sender: mpsc::Sender<TrainingEvent>,
    forwarded: AtomicU64,
    dropped: AtomicU64,
}

impl ChannelEventHandler {
    /// Create the handler and the receiving end of its channel.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<TrainingEvent>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let handler = Self {
            sender,
            forwarded: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        };
        (handler, receiver)
    }

    pub fn forwarded(&self) -> u64 {
        self.forwarded.load(Ordering::Relaxed)
    }

    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn forward(&self, event: TrainingEvent) {
        match self.sender.try_send(event) {
            Ok(()) => {
                self.forwarded.fetch_add(1, Ordering::Relaxed);
            }
            Err(mpsc::error::TrySendError::Full(event)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(event = event.kind(), "event channel full; dropping");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

impl TrainingEventHandler for ChannelEventHandler {
    fn on_episode_started(&self, event: &EpisodeStartedEvent) {
        self.forward(TrainingEvent::EpisodeStarted(event.clone()));
    }

    fn on_episode_completed(&self, event: &EpisodeCompletedEvent) {
        self.forward(TrainingEvent::EpisodeCompleted(event.clone()));
    }

    fn on_episode_failed(&self, event: &EpisodeFailedEvent) {
        self.forward(TrainingEvent::EpisodeFailed(event.clone()));
    }

    fn on_active_query_generated(&self, event: &ActiveQueryGeneratedEvent) {
        self.forward(TrainingEvent::ActiveQueryGenerated(event.clone()));
    }

    fn on_expert_consultation_requested(&self, event: &ExpertConsultationRequestedEvent) {
        self.forward(TrainingEvent::ExpertConsultationRequested(event.clone()));
    }

    fn on_expert_consultation_resolved(&self, event: &ExpertConsultationResolvedEvent) {
        self.forward(TrainingEvent::ExpertConsultationResolved(event.clone()));
    }

    fn on_curriculum_advanced(&self, event: &CurriculumAdvancedEvent) {
        self.forward(TrainingEvent::CurriculumAdvanced(event.clone()));
    }

    fn on_strategy_changed(&self, event: &StrategyChangedEvent) {
        self.forward(TrainingEvent::StrategyChanged(event.clone()));
    }

    fn on_session_state_changed(&self, event: &SessionStateChangedEvent) {
        self.forward(TrainingEvent::SessionStateChanged(event.clone()));
    }
}
