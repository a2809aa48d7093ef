use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::Action;
use super::uncertainty::UncertaintyMetrics;

/// Strategy that produced an active query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    UncertaintySampling,
    InformationGain,
    EpsilonGreedy,
    ThompsonSampling,
}

impl QueryType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UncertaintySampling => "uncertainty_sampling",
            Self::InformationGain => "information_gain",
            Self::EpsilonGreedy => "epsilon_greedy",
            Self::ThompsonSampling => "thompson_sampling",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A budget-consuming request for extra information at an uncertain step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveQuery {
    pub id: String,
    pub query_type: QueryType,
    pub uncertainty: UncertaintyMetrics,
    pub expected_benefit: f64,
    pub step: u32,
    /// Action the query is about, when one was singled out.
    pub target_action: Option<Action>,
    pub timestamp: DateTime<Utc>,
}
