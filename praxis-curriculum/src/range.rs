//! Complexity window on the normalized `[0, 1]` axis.

use serde::{Deserialize, Serialize};

/// Inclusive complexity interval, always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexityRange {
    pub min: f64,
    pub max: f64,
}

impl ComplexityRange {
    pub const FULL: Self = Self { min: 0.0, max: 1.0 };

    /// Window of `width` centred on `center`, clamped to the axis.
    pub fn centered(center: f64, width: f64) -> Self {
        let half = width.abs() / 2.0;
        Self {
            min: (center - half).clamp(0.0, 1.0),
            max: (center + half).clamp(0.0, 1.0),
        }
    }

    pub fn contains(&self, complexity: f64) -> bool {
        complexity >= self.min && complexity <= self.max
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn covers_axis(&self) -> bool {
        self.min <= 0.0 && self.max >= 1.0
    }

    /// Grow by `step` on both sides, clamped.
    pub fn widened(&self, step: f64) -> Self {
        Self {
            min: (self.min - step).max(0.0),
            max: (self.max + step).min(1.0),
        }
    }

    pub fn count_within(&self, complexities: &[f64]) -> usize {
        complexities.iter().filter(|c| self.contains(**c)).count()
    }
}
