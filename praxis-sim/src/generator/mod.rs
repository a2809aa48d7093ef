//! Seeded synthetic triage cases.

mod tables;

use chrono::Utc;
use praxis_core::errors::{PraxisError, PraxisResult};
use praxis_core::models::{AgeBucket, ComplaintCategory, TrainingCase, VitalSigns};
use praxis_core::traits::{CaseGenerator, GenerationOptions};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::environment::Disposition;

const MAX_COMORBIDITIES: usize = 3;

/// Generates cases from a ChaCha8 stream. Two generators with the same seed
/// produce the same sequence for the same options.
pub struct SyntheticCaseGenerator {
    seed: u64,
    rng: ChaCha8Rng,
    generated: u64,
}

impl SyntheticCaseGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            generated: 0,
        }
    }

    pub fn generated(&self) -> u64 {
        self.generated
    }

    pub fn generate_case(&mut self, options: &GenerationOptions) -> PraxisResult<TrainingCase> {
        let (low, high) = options.acuity_range.unwrap_or((1, 5));
        if low == 0 || high > 5 || low > high {
            return Err(PraxisError::generation(format!(
                "acuity range {low}..={high} is outside ESI 1..=5"
            )));
        }

        let acuity = self.rng.gen_range(low..=high);
        let category = match options.complaint_category {
            Some(c) => c,
            None => *ComplaintCategory::ALL
                .choose(&mut self.rng)
                .unwrap_or(&ComplaintCategory::Other),
        };
        let bucket = match options.age_bucket {
            Some(b) => b,
            None => [AgeBucket::Pediatric, AgeBucket::Adult, AgeBucket::Geriatric]
                [self.rng.gen_range(0..3)],
        };
        let (min_age, max_age) = tables::age_range(bucket);
        let age = self.rng.gen_range(min_age..=max_age);

        let cap = match bucket {
            AgeBucket::Pediatric => 1,
            AgeBucket::Adult => 2,
            AgeBucket::Geriatric => MAX_COMORBIDITIES,
        };
        let cap = options.max_comorbidities.map_or(cap, |m| m.min(cap));
        let count = self.rng.gen_range(0..=cap);
        let comorbidities: Vec<String> = tables::COMORBIDITIES
            .choose_multiple(&mut self.rng, count)
            .map(|s| s.to_string())
            .collect();

        let complaint = tables::complaints(category)
            .choose(&mut self.rng)
            .copied()
            .unwrap_or("unspecified");
        let vitals = self.vitals(acuity, category);

        let mut competencies = vec![tables::competency(category).to_string()];
        if bucket != AgeBucket::Adult {
            competencies.push(bucket.as_str().to_string());
        }

        let id = self.case_id(acuity, age, complaint);
        self.generated += 1;
        debug!(case_id = %id, acuity, category = %category, age, "case generated");

        Ok(TrainingCase {
            id,
            age,
            acuity,
            chief_complaint: complaint.to_string(),
            complaint_category: category,
            comorbidities,
            vitals,
            competencies,
            expected_action: Disposition::for_acuity(acuity).as_str().to_string(),
            created_at: Utc::now(),
        })
    }

    pub fn generate_batch(
        &mut self,
        count: usize,
        options: &GenerationOptions,
    ) -> PraxisResult<Vec<TrainingCase>> {
        (0..count).map(|_| self.generate_case(options)).collect()
    }

    /// Vitals drift further from normal as acuity becomes more severe.
    fn vitals(&mut self, acuity: u8, category: ComplaintCategory) -> VitalSigns {
        let severity = f64::from(5 - acuity.min(5)) / 4.0;
        let mut jitter = |amplitude: f64| self.rng.gen_range(-amplitude..=amplitude);
        let fever = if category == ComplaintCategory::Infectious {
            2.0 * severity + 0.5
        } else {
            0.0
        };
        VitalSigns {
            heart_rate: (80.0 + 50.0 * severity + jitter(8.0)).round(),
            systolic_bp: (122.0 - 40.0 * severity + jitter(10.0)).round(),
            respiratory_rate: (16.0 + 12.0 * severity + jitter(2.0)).round(),
            oxygen_saturation: (98.0 - 10.0 * severity + jitter(1.0)).clamp(70.0, 100.0).round(),
            temperature_c: ((37.0 + fever + jitter(0.3)) * 10.0).round() / 10.0,
        }
    }

    fn case_id(&self, acuity: u8, age: u32, complaint: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.seed.to_le_bytes());
        hasher.update(&self.generated.to_le_bytes());
        hasher.update(&[acuity]);
        hasher.update(&age.to_le_bytes());
        hasher.update(complaint.as_bytes());
        let hex = hasher.finalize().to_hex();
        format!("case-{}", &hex[..16])
    }
}

impl CaseGenerator for SyntheticCaseGenerator {
    async fn generate(&mut self, options: &GenerationOptions) -> PraxisResult<TrainingCase> {
        self.generate_case(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_cases() {
        let options = GenerationOptions::default();
        let a = SyntheticCaseGenerator::new(11).generate_batch(5, &options).unwrap();
        let b = SyntheticCaseGenerator::new(11).generate_batch(5, &options).unwrap();
        let ids_a: Vec<_> = a.iter().map(|c| c.id.clone()).collect();
        let ids_b: Vec<_> = b.iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids_a, ids_b);
        assert_eq!(a[0].vitals, b[0].vitals);
    }

    #[test]
    fn invalid_acuity_range_is_rejected() {
        let mut generator = SyntheticCaseGenerator::new(1);
        for range in [(0, 3), (4, 2), (1, 6)] {
            let options = GenerationOptions {
                acuity_range: Some(range),
                ..Default::default()
            };
            assert!(matches!(
                generator.generate_case(&options),
                Err(PraxisError::Generation { .. })
            ));
        }
        assert_eq!(generator.generated(), 0);
    }

    #[test]
    fn severe_cases_look_sicker() {
        let mut generator = SyntheticCaseGenerator::new(5);
        let pin = |acuity| GenerationOptions {
            acuity_range: Some((acuity, acuity)),
            complaint_category: Some(ComplaintCategory::Cardiac),
            ..Default::default()
        };
        let critical = generator.generate_case(&pin(1)).unwrap();
        let minor = generator.generate_case(&pin(5)).unwrap();
        assert!(critical.vitals.abnormal_count() > minor.vitals.abnormal_count());
        assert_eq!(critical.expected_action, "resuscitate");
        assert_eq!(minor.expected_action, "discharge");
        assert!(critical.id.starts_with("case-") && critical.id.len() == 21);
    }
}
