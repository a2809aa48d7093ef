use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::case::TrainingCase;

/// Observation handed to the agent at each step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub step: u32,
    pub case_id: Option<String>,
    pub features: BTreeMap<String, f64>,
    /// Topic tags (competencies, complaint category) used for knowledge-gap tracking.
    pub tags: Vec<String>,
}

impl State {
    pub fn new(step: u32) -> Self {
        Self {
            step,
            ..Default::default()
        }
    }

    /// Observation a fresh presentation of `case` would produce.
    pub fn from_case(case: &TrainingCase) -> Self {
        let mut features = BTreeMap::new();
        features.insert("age".to_string(), f64::from(case.age) / 100.0);
        features.insert("acuity".to_string(), f64::from(case.acuity) / 5.0);
        features.insert(
            "comorbidities".to_string(),
            case.comorbidities.len() as f64,
        );
        features.insert("heart_rate".to_string(), case.vitals.heart_rate);
        features.insert("systolic_bp".to_string(), case.vitals.systolic_bp);
        features.insert("respiratory_rate".to_string(), case.vitals.respiratory_rate);
        features.insert("oxygen_saturation".to_string(), case.vitals.oxygen_saturation);
        features.insert("temperature_c".to_string(), case.vitals.temperature_c);
        features.insert(
            "abnormal_vitals".to_string(),
            case.vitals.abnormal_count() as f64,
        );

        let mut tags = vec![case.complaint_category.as_str().to_string()];
        for tag in &case.competencies {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }

        Self {
            step: 0,
            case_id: Some(case.id.clone()),
            features,
            tags,
        }
    }

    pub fn with_feature(mut self, name: impl Into<String>, value: f64) -> Self {
        self.features.insert(name.into(), value);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn feature(&self, name: &str) -> Option<f64> {
        self.features.get(name).copied()
    }

    /// Primary topic of this state, `"general"` when untagged.
    pub fn topic(&self) -> &str {
        self.tags.first().map(String::as_str).unwrap_or("general")
    }
}

/// Broad family of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Assessment,
    Intervention,
    Disposition,
    Wait,
}

/// A discrete decision available to the agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    pub kind: ActionKind,
}

impl Action {
    pub const WAIT: &'static str = "wait";

    pub fn new(name: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// No-op used when the environment offers no actions.
    pub fn wait() -> Self {
        Self::new(Self::WAIT, ActionKind::Wait)
    }

    pub fn is_wait(&self) -> bool {
        self.kind == ActionKind::Wait
    }
}

/// Extra signals an environment may attach to a transition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Whether the step resolved its case correctly, when the environment knows.
    pub success: Option<bool>,
    /// Competency tags exercised by the step.
    pub competencies: Vec<String>,
    pub message: Option<String>,
}

/// Result of applying an action to the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub state: State,
    pub reward: f64,
    pub done: bool,
    pub info: StepInfo,
}
