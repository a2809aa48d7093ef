//! Consultation channels.

mod queued;
mod simulated;

pub use queued::{consultation_queue, ConsultationInbox, PendingConsultation, QueuedConsultationChannel};
pub use simulated::SimulatedExpert;
