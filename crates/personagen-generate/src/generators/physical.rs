//! Biometric synthesis: gender-specific Gaussian anthropometrics with
//! age-correlated vitals.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use personagen_core::sampling::{clamp_f64, weighted_choice};
use personagen_core::{Gender, PhysicalProfile};

use super::DomainGenerator;
use crate::variability::Variability;

const EYE_COLORS: &[(&str, f64)] = &[
    ("brown", 0.45),
    ("blue", 0.27),
    ("hazel", 0.18),
    ("green", 0.09),
    ("amber", 0.01),
];

const HAIR_COLORS: &[(&str, f64)] = &[
    ("black", 0.30),
    ("brown", 0.40),
    ("blonde", 0.18),
    ("red", 0.04),
    ("auburn", 0.08),
];

pub struct PhysicalInput {
    pub gender: Gender,
    pub age: u32,
}

pub struct PhysicalGenerator;

impl PhysicalGenerator {
    fn sample_normal(rng: &mut ChaCha8Rng, mean: f64, std_dev: f64) -> f64 {
        Normal::new(mean, std_dev)
            .map(|normal| normal.sample(rng))
            .unwrap_or(mean)
    }
}

impl DomainGenerator for PhysicalGenerator {
    type Input<'a> = PhysicalInput;
    type Profile = PhysicalProfile;

    fn generate(
        &self,
        input: PhysicalInput,
        vary: &Variability,
        rng: &mut ChaCha8Rng,
    ) -> PhysicalProfile {
        let (height_mean, height_std) = match input.gender {
            Gender::Female => (161.5, 6.4),
            Gender::Male => (175.3, 7.1),
            _ => (168.4, 8.5),
        };
        let height_cm = clamp_f64(
            Self::sample_normal(rng, height_mean, height_std),
            140.0,
            210.0,
        );

        // BMI drifts upward through middle age and eases after 65.
        let bmi_mean = match input.age {
            0..=24 => 24.0,
            25..=44 => 26.5,
            45..=64 => 28.0,
            _ => 27.0,
        };
        let bmi = clamp_f64(Self::sample_normal(rng, bmi_mean, 4.5), 15.0, 55.0);
        let height_m = height_cm / 100.0;
        let weight_kg = bmi * height_m * height_m;
        let weight_kg = clamp_f64(vary.add_noise_to_numeric(rng, weight_kg, 0.03), 35.0, 250.0);
        let bmi = weight_kg / (height_m * height_m);

        let eye_color = weighted_choice(rng, EYE_COLORS)
            .copied()
            .unwrap_or("brown")
            .to_string();
        let grey_chance = match input.age {
            0..=34 => 0.02,
            35..=49 => 0.20,
            50..=64 => 0.55,
            _ => 0.85,
        };
        let hair_color = if rng.random_bool(grey_chance) {
            if rng.random_bool(0.5) { "grey" } else { "white" }.to_string()
        } else {
            weighted_choice(rng, HAIR_COLORS)
                .copied()
                .unwrap_or("brown")
                .to_string()
        };

        let systolic = 108.0
            + f64::from(input.age.saturating_sub(20)) * 0.45
            + (bmi - 25.0).max(0.0) * 0.8
            + Self::sample_normal(rng, 0.0, 8.0);
        let diastolic = 70.0
            + f64::from(input.age.saturating_sub(20)) * 0.15
            + (bmi - 25.0).max(0.0) * 0.5
            + Self::sample_normal(rng, 0.0, 6.0);
        let heart_rate = 68.0 + (bmi - 25.0).max(0.0) * 0.6 + Self::sample_normal(rng, 0.0, 7.0);

        PhysicalProfile {
            height_cm: (height_cm * 10.0).round() / 10.0,
            weight_kg: (weight_kg * 10.0).round() / 10.0,
            bmi: (bmi * 10.0).round() / 10.0,
            eye_color,
            hair_color,
            blood_pressure_systolic: clamp_f64(systolic, 85.0, 200.0) as u16,
            blood_pressure_diastolic: clamp_f64(diastolic, 50.0, 130.0) as u16,
            resting_heart_rate: clamp_f64(heart_rate, 40.0, 120.0) as u16,
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

    #[test]
    fn bmi_matches_height_and_weight() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            let p = PhysicalGenerator.generate(
                PhysicalInput {
                    gender: Gender::Male,
                    age: 40,
                },
                &clean(),
                &mut rng,
            );
            let height_m = p.height_cm / 100.0;
            let expected = p.weight_kg / (height_m * height_m);
            assert!((p.bmi - expected).abs() < 0.2, "bmi {} vs {expected}", p.bmi);
        }
    }

    #[test]
    fn men_taller_than_women_on_average() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let vary = clean();
        let mut male = 0.0;
        let mut female = 0.0;
        for _ in 0..300 {
            male += PhysicalGenerator
                .generate(PhysicalInput { gender: Gender::Male, age: 35 }, &vary, &mut rng)
                .height_cm;
            female += PhysicalGenerator
                .generate(PhysicalInput { gender: Gender::Female, age: 35 }, &vary, &mut rng)
                .height_cm;
        }
        assert!(male / 300.0 > female / 300.0 + 8.0);
    }

    #[test]
    fn older_people_grey_more() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let vary = clean();
        let mut grey = 0;
        for _ in 0..200 {
            let p = PhysicalGenerator.generate(
                PhysicalInput { gender: Gender::Female, age: 78 },
                &vary,
                &mut rng,
            );
            if p.hair_color == "grey" || p.hair_color == "white" {
                grey += 1;
            }
        }
        assert!(grey > 140, "grey count {grey}");
    }
}
