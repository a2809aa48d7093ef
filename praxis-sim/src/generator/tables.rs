use praxis_core::models::{AgeBucket, ComplaintCategory};

pub(crate) const COMORBIDITIES: [&str; 8] = [
    "hypertension",
    "diabetes",
    "copd",
    "ckd",
    "heart_failure",
    "asthma",
    "anticoagulation",
    "immunosuppression",
];

pub(crate) fn complaints(category: ComplaintCategory) -> &'static [&'static str] {
    match category {
        ComplaintCategory::Cardiac => &["chest pain", "palpitations", "syncope"],
        ComplaintCategory::Respiratory => &["shortness of breath", "wheezing", "persistent cough"],
        ComplaintCategory::Neurological => &["sudden weakness", "severe headache", "seizure"],
        ComplaintCategory::Trauma => &["fall from ladder", "motor vehicle collision", "laceration"],
        ComplaintCategory::Abdominal => &["abdominal pain", "vomiting blood", "flank pain"],
        ComplaintCategory::Infectious => &["fever and chills", "cellulitis", "productive cough with fever"],
        ComplaintCategory::Psychiatric => &["suicidal ideation", "acute agitation", "panic attack"],
        ComplaintCategory::Other => &["dizziness", "rash", "generalised weakness"],
    }
}

/// Skill tag a complaint family exercises.
pub(crate) fn competency(category: ComplaintCategory) -> &'static str {
    match category {
        ComplaintCategory::Neurological => "stroke",
        ComplaintCategory::Infectious => "sepsis",
        ComplaintCategory::Psychiatric => "mental_health",
        other => other.as_str(),
    }
}

pub(crate) fn age_range(bucket: AgeBucket) -> (u32, u32) {
    match bucket {
        AgeBucket::Pediatric => (1, 17),
        AgeBucket::Adult => (18, 64),
        AgeBucket::Geriatric => (65, 95),
    }
}
