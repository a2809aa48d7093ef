//! Multi-factor complexity scoring for a single case.
//!
//! | Dimension | Driven by |
//! |-----------|-----------|
//! | Medical | comorbidities, abnormal vitals, age extremes |
//! | Diagnostic | broad complaint families, comorbidity interplay, atypical presentation by age |
//! | Resource | acuity, abnormal vitals |
//! | Time urgency | acuity |

use praxis_core::models::{
    AgeBucket, ComplexityDimension, ComplexityFactor, ComplexityProfile, TrainingCase,
};

const MEDICAL_WEIGHT: f64 = 0.35;
const DIAGNOSTIC_WEIGHT: f64 = 0.25;
const RESOURCE_WEIGHT: f64 = 0.15;
const URGENCY_WEIGHT: f64 = 0.25;

/// Urgency on `[0, 1]` from ESI acuity (1 → 1.0, 5 → 0.0).
fn acuity_urgency(acuity: u8) -> f64 {
    let acuity = acuity.clamp(1, 5);
    f64::from(5 - acuity) / 4.0
}

struct Accumulator {
    dimension: ComplexityDimension,
    total: f64,
    factors: Vec<ComplexityFactor>,
}

impl Accumulator {
    fn new(dimension: ComplexityDimension) -> Self {
        Self {
            dimension,
            total: 0.0,
            factors: Vec::new(),
        }
    }

    fn add(&mut self, name: &str, contribution: f64) {
        if contribution <= 0.0 {
            return;
        }
        self.total += contribution;
        self.factors.push(ComplexityFactor {
            name: name.to_string(),
            dimension: self.dimension,
            contribution,
        });
    }

    fn finish(self, into: &mut Vec<ComplexityFactor>) -> f64 {
        into.extend(self.factors);
        self.total.clamp(0.0, 1.0)
    }
}

/// Score one case on all four dimensions.
pub fn compute_profile(case: &TrainingCase) -> ComplexityProfile {
    let comorbidities = case.comorbidities.len() as f64;
    let abnormal = case.vitals.abnormal_count() as f64;
    let age_extreme = !matches!(case.age_bucket(), AgeBucket::Adult);
    let urgency = acuity_urgency(case.acuity);

    let mut factors = Vec::new();

    let mut medical = Accumulator::new(ComplexityDimension::Medical);
    medical.add("comorbidity_burden", (0.15 * comorbidities).min(0.6));
    medical.add("abnormal_vitals", (0.1 * abnormal).min(0.4));
    medical.add("age_extreme", if age_extreme { 0.1 } else { 0.0 });
    let medical = medical.finish(&mut factors);

    let mut diagnostic = Accumulator::new(ComplexityDimension::Diagnostic);
    diagnostic.add(
        "broad_differential",
        if case.complaint_category.is_diagnostically_broad() {
            0.5
        } else {
            0.2
        },
    );
    diagnostic.add("comorbidity_interplay", (0.1 * comorbidities).min(0.3));
    diagnostic.add("atypical_presentation", if age_extreme { 0.2 } else { 0.0 });
    let diagnostic = diagnostic.finish(&mut factors);

    let mut resource = Accumulator::new(ComplexityDimension::Resource);
    resource.add("acuity_resources", 0.7 * urgency);
    resource.add("monitoring_needs", (0.075 * abnormal).min(0.3));
    let resource = resource.finish(&mut factors);

    let mut time = Accumulator::new(ComplexityDimension::TimeUrgency);
    time.add("acuity_urgency", urgency);
    let time_urgency = time.finish(&mut factors);

    let overall = (MEDICAL_WEIGHT * medical
        + DIAGNOSTIC_WEIGHT * diagnostic
        + RESOURCE_WEIGHT * resource
        + URGENCY_WEIGHT * time_urgency)
        .clamp(0.0, 1.0);

    ComplexityProfile {
        medical,
        diagnostic,
        resource,
        time_urgency,
        overall,
        factors,
    }
}
