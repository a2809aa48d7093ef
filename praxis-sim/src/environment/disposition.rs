//! Triage dispositions ordered by severity, and how they are scored.

use praxis_core::models::{Action, ActionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Disposition {
    Resuscitate,
    Admit,
    Observe,
    Discharge,
}

impl Disposition {
    pub const ALL: [Disposition; 4] = [
        Self::Resuscitate,
        Self::Admit,
        Self::Observe,
        Self::Discharge,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Resuscitate => "resuscitate",
            Self::Admit => "admit",
            Self::Observe => "observe",
            Self::Discharge => "discharge",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == name)
    }

    /// Reference disposition for an ESI acuity level.
    pub fn for_acuity(acuity: u8) -> Self {
        match acuity {
            0 | 1 => Self::Resuscitate,
            2 | 3 => Self::Admit,
            4 => Self::Observe,
            _ => Self::Discharge,
        }
    }

    pub fn action(self) -> Action {
        Action::new(self.as_str(), ActionKind::Disposition)
    }

    fn rank(self) -> i32 {
        self as i32
    }

    /// Number of severity steps between two dispositions.
    pub fn distance(self, other: Disposition) -> u32 {
        self.rank().abs_diff(other.rank())
    }
}

/// Reward for choosing `chosen` when `expected` was right.
pub fn disposition_reward(chosen: Disposition, expected: Disposition) -> f64 {
    match chosen.distance(expected) {
        0 => 1.0,
        1 => -0.5,
        _ => -1.0,
    }
}
