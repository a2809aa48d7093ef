//! # praxis-consultation
//!
//! Expert consultation for the training loop.
//!
//! [`ConsultationCoordinator`] owns the per-episode budget, the request
//! lifecycle (submit, resolve once, discard at episode end) and the adaptive
//! threshold. Channels deliver requests to an expert: [`SimulatedExpert`]
//! answers from a seeded heuristic, [`QueuedConsultationChannel`] hands them
//! to whoever holds the matching [`ConsultationInbox`].

#![allow(async_fn_in_trait)]

pub mod channels;
pub mod coordinator;
pub mod gaps;

pub use channels::{
    consultation_queue, ConsultationInbox, PendingConsultation, QueuedConsultationChannel,
    SimulatedExpert,
};
pub use coordinator::{ConsultationCoordinator, ConsultationStats, EpisodeConsultationSummary};
pub use gaps::{KnowledgeGap, KnowledgeGapTracker};
