use serde::{Deserialize, Serialize};

/// Uncertainty estimate for one (state, action) candidate.
///
/// `total = sqrt(epistemic² + aleatoric²)`, `confidence ∈ [0, 1]` and
/// `information_gain = 4·c·(1 − c)`, which peaks at `c = 0.5`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UncertaintyMetrics {
    pub epistemic: f64,
    pub aleatoric: f64,
    pub total: f64,
    pub confidence: f64,
    pub information_gain: f64,
}

impl UncertaintyMetrics {
    pub const SENTINEL_EPISTEMIC: f64 = 1.0;
    pub const SENTINEL_ALEATORIC: f64 = 0.5;

    /// Build a consistent estimate from its independent components.
    pub fn from_components(epistemic: f64, aleatoric: f64, confidence: f64) -> Self {
        let epistemic = epistemic.max(0.0);
        let aleatoric = aleatoric.max(0.0);
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            epistemic,
            aleatoric,
            total: epistemic.hypot(aleatoric),
            confidence,
            information_gain: 4.0 * confidence * (1.0 - confidence),
        }
    }

    /// Maximal-uncertainty estimate returned when no actions are available.
    pub fn sentinel() -> Self {
        Self {
            epistemic: Self::SENTINEL_EPISTEMIC,
            aleatoric: Self::SENTINEL_ALEATORIC,
            total: Self::SENTINEL_EPISTEMIC.hypot(Self::SENTINEL_ALEATORIC),
            confidence: 0.0,
            information_gain: 1.0,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::sentinel()
    }
}
