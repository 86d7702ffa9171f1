//! Medical profile synthesis: age/BMI-driven conditions with implied
//! medications.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use personagen_core::sampling::{pick, sample_distinct, weighted_choice};
use personagen_core::{EmergencyContact, Gender, MedicalProfile};

use super::DomainGenerator;
use crate::variability::Variability;

const BLOOD_TYPES: &[(&str, f64)] = &[
    ("O+", 0.374),
    ("A+", 0.357),
    ("B+", 0.085),
    ("O-", 0.066),
    ("A-", 0.063),
    ("AB+", 0.034),
    ("B-", 0.015),
    ("AB-", 0.006),
];

/// (condition, base prevalence, per-decade-over-30 multiplier, medications).
const CONDITIONS: &[(&str, f64, f64, &[&str])] = &[
    ("Hypertension", 0.08, 1.8, &["Lisinopril", "Amlodipine", "Losartan"]),
    ("Type 2 Diabetes", 0.04, 1.7, &["Metformin", "Glipizide"]),
    ("High Cholesterol", 0.07, 1.7, &["Atorvastatin", "Rosuvastatin"]),
    ("Asthma", 0.08, 1.0, &["Albuterol", "Fluticasone"]),
    ("Anxiety", 0.12, 0.9, &["Sertraline", "Buspirone"]),
    ("Depression", 0.09, 0.95, &["Fluoxetine", "Escitalopram"]),
    ("Arthritis", 0.03, 2.0, &["Ibuprofen", "Celecoxib"]),
    ("GERD", 0.06, 1.3, &["Omeprazole", "Famotidine"]),
    ("Hypothyroidism", 0.03, 1.4, &["Levothyroxine"]),
    ("Migraine", 0.10, 0.85, &["Sumatriptan", "Topiramate"]),
];

const ALLERGIES: &[&str] = &[
    "Penicillin", "Peanuts", "Shellfish", "Latex", "Pollen", "Dust mites", "Pet dander", "Sulfa",
];

const IMMUNIZATIONS: &[&str] = &["Influenza", "Tdap", "COVID-19", "MMR", "Hepatitis B"];

const EMPLOYER_INSURERS: &[&str] = &[
    "Blue Cross Blue Shield",
    "UnitedHealthcare",
    "Aetna",
    "Cigna",
    "Kaiser Permanente",
];

pub struct MedicalInput<'a> {
    pub age: u32,
    pub gender: Gender,
    pub bmi: f64,
    pub employed: bool,
    pub today: NaiveDate,
    pub emergency_contact: &'a EmergencyContact,
}

pub struct MedicalGenerator;

impl MedicalGenerator {
    fn condition_probability(age: u32, bmi: f64, base: f64, decade_mult: f64) -> f64 {
        let decades_over_30 = (f64::from(age.saturating_sub(30))) / 10.0;
        let mut probability = base * decade_mult.powf(decades_over_30);
        // Elevated BMI pushes the metabolic conditions.
        if bmi > 30.0 {
            probability *= 1.4;
        }
        probability.min(0.85)
    }
}

impl DomainGenerator for MedicalGenerator {
    type Input<'a> = MedicalInput<'a>;
    type Profile = MedicalProfile;

    fn generate(
        &self,
        input: MedicalInput<'_>,
        vary: &Variability,
        rng: &mut ChaCha8Rng,
    ) -> MedicalProfile {
        let blood_type = weighted_choice(rng, BLOOD_TYPES)
            .copied()
            .unwrap_or("O+")
            .to_string();

        let mut conditions = Vec::new();
        let mut medications = Vec::new();
        for (condition, base, decade_mult, meds) in CONDITIONS {
            let probability =
                Self::condition_probability(input.age, input.bmi, *base, *decade_mult);
            if rng.random_bool(probability) {
                conditions.push((*condition).to_string());
                // Most diagnosed conditions carry one active prescription.
                if rng.random_bool(0.8) {
                    if let Some(med) = pick(rng, meds) {
                        medications.push((*med).to_string());
                    }
                }
            }
        }

        let allergies = if rng.random_bool(0.30) {
            let count = rng.random_range(1..=3);
            sample_distinct(rng, ALLERGIES, count)
                .into_iter()
                .map(|a| (*a).to_string())
                .collect()
        } else {
            Vec::new()
        };

        let immunization_count = if input.age >= 50 { 4 } else { 3 };
        let immunizations = sample_distinct(rng, IMMUNIZATIONS, immunization_count)
            .into_iter()
            .map(|i| (*i).to_string())
            .collect();

        let insurance = if input.employed {
            pick(rng, EMPLOYER_INSURERS).map(|i| (*i).to_string())
        } else if rng.random_bool(0.6) {
            Some(if input.age >= 65 { "Medicare" } else { "Medicaid" }.to_string())
        } else {
            None
        };
        let insurance_provider = insurance.and_then(|i| vary.make_missing(rng, i, false));

        // Older patients keep up with physicals more reliably.
        let physical_chance = if input.age >= 50 { 0.85 } else { 0.60 };
        let last_physical = if rng.random_bool(physical_chance) {
            Some(input.today - Duration::days(rng.random_range(30..1_095)))
        } else {
            None
        };

        let _ = input.gender; // parity input kept for future prevalence splits

        MedicalProfile {
            blood_type,
            conditions,
            medications,
            allergies,
            immunizations,
            insurance_provider,
            last_physical,
            emergency_contact: input.emergency_contact.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use personagen_config::DataQualityProfile;
    use rand::SeedableRng;

    fn clean() -> Variability {
        Variability::new(DataQualityProfile::clean())
    }

    fn contact() -> EmergencyContact {
        EmergencyContact {
            name: "Pat Doe".to_string(),
            relationship: "sibling".to_string(),
            phone: "555-111-2222".to_string(),
        }
    }

    fn profile(age: u32, bmi: f64, seed: u64) -> MedicalProfile {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let ec = contact();
        MedicalGenerator.generate(
            MedicalInput {
                age,
                gender: Gender::Other,
                bmi,
                employed: true,
                today: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                emergency_contact: &ec,
            },
            &clean(),
            &mut rng,
        )
    }

    #[test]
    fn older_people_have_more_conditions() {
        let mut young_total = 0;
        let mut old_total = 0;
        for seed in 0..200 {
            young_total += profile(25, 24.0, seed).conditions.len();
            old_total += profile(75, 24.0, seed + 10_000).conditions.len();
        }
        assert!(old_total > young_total, "old {old_total} young {young_total}");
    }

    #[test]
    fn medications_only_with_conditions() {
        for seed in 0..100 {
            let p = profile(60, 32.0, seed);
            if p.conditions.is_empty() {
                assert!(p.medications.is_empty());
            }
            assert!(p.medications.len() <= p.conditions.len());
        }
    }

    #[test]
    fn blood_type_comes_from_table() {
        let p = profile(40, 25.0, 1);
        assert!(BLOOD_TYPES.iter().any(|(bt, _)| *bt == p.blood_type));
    }

    #[test]
    fn employed_people_carry_commercial_insurance() {
        let mut insured = 0;
        for seed in 0..100 {
            if profile(40, 25.0, seed).insurance_provider.is_some() {
                insured += 1;
            }
        }
        assert!(insured > 90);
    }
}
