use crate::errors::PraxisResult;
use crate::models::{ConsultationRequest, ConsultationResponse};

/// Outbound path to an expert, simulated or human-backed.
pub trait ConsultationChannel {
    /// Submit a request and wait for the answer.
    ///
    /// `Ok(None)` means the expert did not answer; the request stays pending
    /// until the episode ends.
    async fn consult(
        &mut self,
        request: &ConsultationRequest,
    ) -> PraxisResult<Option<ConsultationResponse>>;
}
