use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::complexity::ProfileKey;

/// Broad complaint families used for categorical diversity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintCategory {
    Cardiac,
    Respiratory,
    Neurological,
    Trauma,
    Abdominal,
    Infectious,
    Psychiatric,
    Other,
}

impl ComplaintCategory {
    pub const ALL: [ComplaintCategory; 8] = [
        Self::Cardiac,
        Self::Respiratory,
        Self::Neurological,
        Self::Trauma,
        Self::Abdominal,
        Self::Infectious,
        Self::Psychiatric,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cardiac => "cardiac",
            Self::Respiratory => "respiratory",
            Self::Neurological => "neurological",
            Self::Trauma => "trauma",
            Self::Abdominal => "abdominal",
            Self::Infectious => "infectious",
            Self::Psychiatric => "psychiatric",
            Self::Other => "other",
        }
    }

    /// Complaints whose workup is diagnostically broad.
    pub fn is_diagnostically_broad(self) -> bool {
        matches!(self, Self::Neurological | Self::Abdominal | Self::Other)
    }
}

impl fmt::Display for ComplaintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Age band used in cache keys and diversity features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBucket {
    Pediatric,
    Adult,
    Geriatric,
}

impl AgeBucket {
    pub fn from_age(age: u32) -> Self {
        match age {
            0..=17 => Self::Pediatric,
            18..=64 => Self::Adult,
            _ => Self::Geriatric,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pediatric => "pediatric",
            Self::Adult => "adult",
            Self::Geriatric => "geriatric",
        }
    }
}

/// Presenting vital signs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalSigns {
    pub heart_rate: f64,
    pub systolic_bp: f64,
    pub respiratory_rate: f64,
    pub oxygen_saturation: f64,
    pub temperature_c: f64,
}

impl VitalSigns {
    /// Number of readings outside adult reference ranges.
    pub fn abnormal_count(&self) -> usize {
        [
            !(60.0..=100.0).contains(&self.heart_rate),
            !(90.0..=140.0).contains(&self.systolic_bp),
            !(12.0..=20.0).contains(&self.respiratory_rate),
            self.oxygen_saturation < 94.0,
            !(36.0..=38.0).contains(&self.temperature_c),
        ]
        .iter()
        .filter(|abnormal| **abnormal)
        .count()
    }
}

impl Default for VitalSigns {
    fn default() -> Self {
        Self {
            heart_rate: 80.0,
            systolic_bp: 120.0,
            respiratory_rate: 16.0,
            oxygen_saturation: 98.0,
            temperature_c: 37.0,
        }
    }
}

/// A synthetic patient presentation. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingCase {
    pub id: String,
    pub age: u32,
    /// Emergency Severity Index, 1 (resuscitation) to 5 (non-urgent).
    pub acuity: u8,
    pub chief_complaint: String,
    pub complaint_category: ComplaintCategory,
    pub comorbidities: Vec<String>,
    pub vitals: VitalSigns,
    /// Skill tags exercised by this case.
    pub competencies: Vec<String>,
    /// Name of the reference action the simulator rewards.
    pub expected_action: String,
    pub created_at: DateTime<Utc>,
}

impl TrainingCase {
    pub fn age_bucket(&self) -> AgeBucket {
        AgeBucket::from_age(self.age)
    }

    /// Two or more comorbidities.
    pub fn has_high_comorbidity(&self) -> bool {
        self.comorbidities.len() >= 2
    }

    /// Key under which this case's complexity profile is cached.
    pub fn profile_key(&self) -> ProfileKey {
        ProfileKey {
            age_bucket: self.age_bucket(),
            acuity: self.acuity,
            complaint_category: self.complaint_category,
            comorbidity_count: self.comorbidities.len(),
        }
    }
}
