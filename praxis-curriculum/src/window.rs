//! Rolling window of episode performance.

use std::collections::VecDeque;

/// Fixed-size FIFO of `(success_rate, consistency)` samples.
#[derive(Debug, Clone)]
pub struct PerformanceWindow {
    size: usize,
    samples: VecDeque<(f64, f64)>,
}

impl PerformanceWindow {
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            size,
            samples: VecDeque::with_capacity(size),
        }
    }

    pub fn push(&mut self, success_rate: f64, consistency: f64) {
        if self.samples.len() == self.size {
            self.samples.pop_front();
        }
        self.samples
            .push_back((success_rate.clamp(0.0, 1.0), consistency.clamp(0.0, 1.0)));
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() == self.size
    }

    pub fn mean_success(&self) -> f64 {
        self.mean_of(|(s, _)| s)
    }

    pub fn mean_consistency(&self) -> f64 {
        self.mean_of(|(_, c)| c)
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    fn mean_of(&self, pick: impl Fn((f64, f64)) -> f64) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().copied().map(pick).sum::<f64>() / self.samples.len() as f64
    }
}
