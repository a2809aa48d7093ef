//! Seeded heuristic stand-in for a human expert.

use praxis_core::errors::PraxisResult;
use praxis_core::models::{ConsultationContext, ConsultationRequest, ConsultationResponse};
use praxis_core::traits::ConsultationChannel;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

type Policy = Box<dyn Fn(&ConsultationContext) -> Option<String> + Send + Sync>;

/// Default policy: disposition by normalised acuity (`acuity / 5`).
fn acuity_policy(context: &ConsultationContext) -> Option<String> {
    let acuity = (context.state.feature("acuity")? * 5.0).round() as u8;
    let name = match acuity {
        0 | 1 => "resuscitate",
        2 | 3 => "admit",
        4 => "observe",
        _ => "discharge",
    };
    Some(name.to_string())
}

/// Answers from a policy, right with probability `accuracy`, answering at all
/// with probability `response_rate`. Reproducible under a fixed seed.
pub struct SimulatedExpert {
    rng: ChaCha8Rng,
    accuracy: f64,
    response_rate: f64,
    policy: Policy,
}

impl SimulatedExpert {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            accuracy: 0.9,
            response_rate: 1.0,
            policy: Box::new(acuity_policy),
        }
    }

    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = accuracy.clamp(0.0, 1.0);
        self
    }

    pub fn with_response_rate(mut self, rate: f64) -> Self {
        self.response_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_policy(
        mut self,
        policy: impl Fn(&ConsultationContext) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.policy = Box::new(policy);
        self
    }

    fn recommend(&mut self, context: &ConsultationContext) -> Option<(String, bool)> {
        let candidates = &context.candidate_actions;
        let reference = (self.policy)(context).filter(|name| {
            candidates.is_empty() || candidates.iter().any(|a| &a.name == name)
        });

        if self.rng.gen::<f64>() < self.accuracy {
            if let Some(name) = reference {
                return Some((name, true));
            }
        }
        if candidates.is_empty() {
            return context
                .agent_preference
                .as_ref()
                .map(|a| (a.name.clone(), false));
        }
        let pick = &candidates[self.rng.gen_range(0..candidates.len())];
        Some((pick.name.clone(), false))
    }
}

impl ConsultationChannel for SimulatedExpert {
    async fn consult(
        &mut self,
        request: &ConsultationRequest,
    ) -> PraxisResult<Option<ConsultationResponse>> {
        if self.rng.gen::<f64>() >= self.response_rate {
            tracing::debug!(request_id = %request.id, "simulated expert did not answer");
            return Ok(None);
        }
        let Some((recommendation, confident)) = self.recommend(&request.context) else {
            return Ok(None);
        };
        let confidence = if confident {
            self.accuracy
        } else {
            (1.0 - self.accuracy).max(0.1)
        };
        let feedback_text = format!(
            "For a {} presentation, {} is the recommended next step.",
            request.context.topic, recommendation
        );
        Ok(Some(ConsultationResponse {
            request_id: request.id.clone(),
            recommendation,
            confidence,
            feedback_text,
        }))
    }
}
