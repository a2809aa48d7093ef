use serde::{Deserialize, Serialize};

use crate::errors::PraxisResult;
use crate::models::{AgeBucket, ComplaintCategory, TrainingCase};

/// Constraints on a generated case. Unset fields are sampled freely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Target acuity range, inclusive (ESI 1..=5).
    pub acuity_range: Option<(u8, u8)>,
    pub complaint_category: Option<ComplaintCategory>,
    pub age_bucket: Option<AgeBucket>,
    /// Upper bound on comorbidities.
    pub max_comorbidities: Option<usize>,
}

/// Produces synthetic training cases. Reproducible under a fixed seed.
pub trait CaseGenerator {
    async fn generate(&mut self, options: &GenerationOptions) -> PraxisResult<TrainingCase>;
}
