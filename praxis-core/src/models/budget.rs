use serde::{Deserialize, Serialize};

/// Per-episode allowance for a costly operation.
///
/// Units are consumed at creation time and never refunded; `reset` restores
/// the configured maximum at the start of each episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    max: u32,
    remaining: u32,
}

impl Budget {
    pub fn new(max: u32) -> Self {
        Self {
            max,
            remaining: max,
        }
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn used(&self) -> u32 {
        self.max - self.remaining
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Consume one unit. Returns false, and changes nothing, when exhausted.
    pub fn try_consume(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    pub fn reset(&mut self) {
        self.remaining = self.max;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_until_exhausted() {
        let mut budget = Budget::new(2);
        assert!(budget.try_consume());
        assert!(budget.try_consume());
        assert!(!budget.try_consume());
        assert!(budget.is_exhausted());
        assert_eq!(budget.used(), 2);
        budget.reset();
        assert_eq!(budget.remaining(), 2);
    }

    #[test]
    fn zero_budget_never_consumes() {
        let mut budget = Budget::new(0);
        for _ in 0..5 {
            assert!(!budget.try_consume());
        }
        assert_eq!(budget.used(), 0);
    }
}
