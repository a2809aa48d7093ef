//! Rolling uncertainty samples and the trend statistics derived from them.

use std::collections::VecDeque;

/// Mean of the first half minus mean of the second half.
///
/// Positive when values fell over the sequence. Fewer than two values yield 0.
pub fn half_split_reduction(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mid = values.len() / 2;
    mean(&values[..mid]) - mean(&values[mid..])
}

/// Least-squares slope of `values` against their index. Fewer than two values yield 0.
pub fn linear_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = mean(values);
    let (num, den) = values
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(num, den), (i, y)| {
            let dx = i as f64 - x_mean;
            (num + dx * (y - y_mean), den + dx * dx)
        });
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Bounded FIFO of total-uncertainty samples. Oldest samples are evicted first.
#[derive(Debug, Clone)]
pub struct UncertaintyHistory {
    capacity: usize,
    samples: VecDeque<f64>,
}

impl UncertaintyHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            samples: VecDeque::with_capacity(capacity.min(1024)),
        }
    }

    pub fn push(&mut self, total: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(total);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn mean(&self) -> f64 {
        let (a, b) = self.samples.as_slices();
        if a.is_empty() && b.is_empty() {
            return 0.0;
        }
        (a.iter().sum::<f64>() + b.iter().sum::<f64>()) / self.samples.len() as f64
    }

    /// See [`half_split_reduction`].
    pub fn reduction(&self) -> f64 {
        half_split_reduction(&self.to_vec())
    }

    /// See [`linear_slope`]. Negative when uncertainty is falling.
    pub fn trend(&self) -> f64 {
        linear_slope(&self.to_vec())
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }
}
