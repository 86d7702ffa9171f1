//! Education history: age-gated attainment levels shifted by income,
//! with graduation years consistent with the subject's age.

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use personagen_core::sampling::{pick, weighted_choice};
use personagen_core::{EducationEntry, EducationLevel, EducationProfile};

use super::DomainGenerator;
use crate::variability::Variability;

const HIGH_SCHOOLS: &[&str] = &[
    "Lincoln High School",
    "Washington High School",
    "Jefferson High School",
    "Roosevelt High School",
    "Central High School",
    "Riverside High School",
];

const COLLEGES: &[&str] = &[
    "State University",
    "City College",
    "Technical Institute",
    "Community College of the Valley",
    "Riverside University",
    "Northern State University",
    "Metropolitan University",
];

const GRAD_SCHOOLS: &[&str] = &[
    "State University Graduate School",
    "Metropolitan University",
    "National Institute of Technology",
    "Riverside University",
];

const FIELDS: &[&str] = &[
    "Business Administration",
    "Computer Science",
    "Nursing",
    "Psychology",
    "Mechanical Engineering",
    "Biology",
    "Education",
    "Accounting",
    "Communications",
    "Criminal Justice",
];

pub struct EducationInput {
    pub age: u32,
    pub annual_income: f64,
    pub today: NaiveDate,
}

pub struct EducationGenerator;

impl EducationGenerator {
    /// Attainment weights by age bracket; higher income shifts mass toward
    /// degrees.
    fn level_weights(age: u32, income: f64) -> Vec<(EducationLevel, f64)> {
        use EducationLevel::*;
        let mut weights: Vec<(EducationLevel, f64)> = if age < 18 {
            vec![(SomeHighSchool, 1.0)]
        } else if age < 22 {
            vec![(SomeHighSchool, 0.10), (HighSchool, 0.45), (SomeCollege, 0.45)]
        } else if age < 26 {
            vec![
                (HighSchool, 0.25),
                (SomeCollege, 0.25),
                (Associate, 0.12),
                (Bachelor, 0.35),
                (Master, 0.03),
            ]
        } else {
            vec![
                (SomeHighSchool, 0.06),
                (HighSchool, 0.26),
                (SomeCollege, 0.16),
                (Associate, 0.10),
                (Bachelor, 0.27),
                (Master, 0.11),
                (Doctorate, 0.02),
                (Professional, 0.02),
            ]
        };
        if income >= 100_000.0 {
            for (level, weight) in &mut weights {
                if *level >= Bachelor {
                    *weight *= 2.5;
                }
            }
        } else if income < 30_000.0 {
            for (level, weight) in &mut weights {
                if *level >= Bachelor {
                    *weight *= 0.5;
                }
            }
        }
        weights
    }

    fn gpa_for(level: EducationLevel, rng: &mut ChaCha8Rng) -> Option<f64> {
        use EducationLevel::*;
        let (low, high): (f64, f64) = match level {
            HighSchool => (2.0, 4.0),
            Associate | Bachelor => (2.3, 4.0),
            Master | Doctorate | Professional => (3.0, 4.0),
            _ => return None,
        };
        Some((rng.random_range(low..high) * 100.0).round() / 100.0)
    }
}

impl DomainGenerator for EducationGenerator {
    type Input<'a> = EducationInput;
    type Profile = EducationProfile;

    fn generate(
        &self,
        input: EducationInput,
        vary: &Variability,
        rng: &mut ChaCha8Rng,
    ) -> EducationProfile {
        use EducationLevel::*;

        let weights = Self::level_weights(input.age, input.annual_income);
        let highest_level = weighted_choice(rng, &weights)
            .copied()
            .unwrap_or(HighSchool);

        let current_year = input.today.year();
        let birth_year = current_year - input.age as i32;
        let mut entries = Vec::new();

        // High-school entry for everyone who got at least that far.
        if highest_level >= HighSchool && input.age >= 18 {
            let hs_year = birth_year + 18;
            let institution = pick(rng, HIGH_SCHOOLS).copied().unwrap_or("Central High School");
            entries.push(EducationEntry {
                institution: institution.to_string(),
                degree: "High School Diploma".to_string(),
                field_of_study: "General Studies".to_string(),
                graduation_year: Some(hs_year.min(current_year)),
                gpa: Self::gpa_for(HighSchool, rng),
            });
        }

        let field = pick(rng, FIELDS).copied().unwrap_or("Business Administration");

        if highest_level >= Associate {
            let (degree, years_after_hs) = match highest_level {
                Associate => ("Associate of Arts", 2),
                _ => ("Bachelor of Science", 4),
            };
            let grad_year = birth_year + 18 + years_after_hs;
            if grad_year <= current_year {
                let institution = pick(rng, COLLEGES).copied().unwrap_or("State University");
                entries.push(EducationEntry {
                    institution: institution.to_string(),
                    degree: degree.to_string(),
                    field_of_study: field.to_string(),
                    graduation_year: Some(grad_year),
                    gpa: Self::gpa_for(highest_level.min(Bachelor), rng),
                });
            }
        }

        if highest_level >= Master {
            let (degree, years_after_hs) = match highest_level {
                Master => ("Master of Science", rng.random_range(6..=8)),
                Doctorate => ("Doctor of Philosophy", rng.random_range(9..=12)),
                _ => ("Juris Doctor", rng.random_range(7..=9)),
            };
            let grad_year = birth_year + 18 + years_after_hs;
            if grad_year <= current_year {
                let institution = pick(rng, GRAD_SCHOOLS)
                    .copied()
                    .unwrap_or("State University Graduate School");
                entries.push(EducationEntry {
                    institution: institution.to_string(),
                    degree: degree.to_string(),
                    field_of_study: field.to_string(),
                    graduation_year: Some(grad_year),
                    gpa: Self::gpa_for(highest_level, rng),
                });
            }
        }

        // Occasional incomplete records: a missing graduation year.
        for entry in &mut entries {
            if let Some(year) = entry.graduation_year {
                entry.graduation_year = vary.make_missing(rng, year, false);
            }
        }

        EducationProfile {
            highest_level,
            entries,
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

    fn profile(age: u32, income: f64, seed: u64) -> EducationProfile {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        EducationGenerator.generate(
            EducationInput {
                age,
                annual_income: income,
                today: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            },
            &clean(),
            &mut rng,
        )
    }

    #[test]
    fn minors_have_no_degrees() {
        for seed in 0..50 {
            let p = profile(16, 0.0, seed);
            assert_eq!(p.highest_level, EducationLevel::SomeHighSchool);
            assert!(p.entries.is_empty());
        }
    }

    #[test]
    fn graduation_years_never_exceed_current_year() {
        for seed in 0..200 {
            for entry in profile(45, 80_000.0, seed).entries {
                if let Some(year) = entry.graduation_year {
                    assert!(year <= 2025, "future graduation {year}");
                }
            }
        }
    }

    #[test]
    fn entries_are_consistent_with_level() {
        for seed in 0..100 {
            let p = profile(50, 60_000.0, seed);
            if p.highest_level >= EducationLevel::Master {
                assert!(p.entries.len() >= 3);
            }
            if p.highest_level < EducationLevel::Associate {
                assert!(p.entries.len() <= 1);
            }
        }
    }

    #[test]
    fn high_income_skews_toward_degrees() {
        let mut low_degrees = 0;
        let mut high_degrees = 0;
        for seed in 0..300 {
            if profile(45, 20_000.0, seed).highest_level >= EducationLevel::Bachelor {
                low_degrees += 1;
            }
            if profile(45, 150_000.0, seed + 10_000).highest_level >= EducationLevel::Bachelor {
                high_degrees += 1;
            }
        }
        assert!(high_degrees > low_degrees, "high {high_degrees} low {low_degrees}");
    }
}
