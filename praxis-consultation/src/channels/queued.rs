//! Consultation over a tokio queue, answered by a human or an external service.

use praxis_core::errors::{ConsultationError, PraxisResult};
use praxis_core::models::{ConsultationRequest, ConsultationResponse};
use praxis_core::traits::ConsultationChannel;
use tokio::sync::{mpsc, oneshot};

/// A request waiting for an answer on the inbox side.
pub struct PendingConsultation {
    request: ConsultationRequest,
    reply: oneshot::Sender<ConsultationResponse>,
}

impl PendingConsultation {
    pub fn request(&self) -> &ConsultationRequest {
        &self.request
    }

    /// Send the answer. Fails with `ChannelClosed` if the loop stopped waiting.
    pub fn answer(
        self,
        recommendation: impl Into<String>,
        confidence: f64,
        feedback_text: impl Into<String>,
    ) -> Result<(), ConsultationError> {
        let response = ConsultationResponse {
            request_id: self.request.id.clone(),
            recommendation: recommendation.into(),
            confidence: confidence.clamp(0.0, 1.0),
            feedback_text: feedback_text.into(),
        };
        self.reply
            .send(response)
            .map_err(|_| ConsultationError::ChannelClosed)
    }
}

/// Loop side: sends requests and awaits the reply.
pub struct QueuedConsultationChannel {
    tx: mpsc::Sender<PendingConsultation>,
}

/// Expert side: receives requests to answer.
pub struct ConsultationInbox {
    rx: mpsc::Receiver<PendingConsultation>,
}

impl ConsultationInbox {
    /// Next request, or `None` once the channel side is dropped.
    pub async fn recv(&mut self) -> Option<PendingConsultation> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<PendingConsultation> {
        self.rx.try_recv().ok()
    }
}

/// Bounded request queue between the training loop and an expert.
pub fn consultation_queue(capacity: usize) -> (QueuedConsultationChannel, ConsultationInbox) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (QueuedConsultationChannel { tx }, ConsultationInbox { rx })
}

impl ConsultationChannel for QueuedConsultationChannel {
    /// `Ok(None)` when the expert drops the request without answering;
    /// `ChannelClosed` when the inbox is gone.
    async fn consult(
        &mut self,
        request: &ConsultationRequest,
    ) -> PraxisResult<Option<ConsultationResponse>> {
        let (reply, answer) = oneshot::channel();
        self.tx
            .send(PendingConsultation {
                request: request.clone(),
                reply,
            })
            .await
            .map_err(|_| ConsultationError::ChannelClosed)?;
        Ok(answer.await.ok())
    }
}
