//! Vehicle synthesis: ownership odds, make/model by income tier and
//! VIN/plate shaped identifiers.

use chrono::Datelike;
use chrono::NaiveDate;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use personagen_core::sampling::{pick, weighted_choice};
use personagen_core::{Vehicle, VehicleOwnership, VehicleProfile};

use super::DomainGenerator;
use crate::variability::Variability;

const ECONOMY: &[(&str, &str)] = &[
    ("Toyota", "Corolla"),
    ("Honda", "Civic"),
    ("Hyundai", "Elantra"),
    ("Kia", "Forte"),
    ("Nissan", "Sentra"),
];

const MID_RANGE: &[(&str, &str)] = &[
    ("Toyota", "Camry"),
    ("Honda", "Accord"),
    ("Ford", "F-150"),
    ("Chevrolet", "Equinox"),
    ("Subaru", "Outback"),
    ("Jeep", "Grand Cherokee"),
];

const LUXURY: &[(&str, &str)] = &[
    ("BMW", "3 Series"),
    ("Mercedes-Benz", "C-Class"),
    ("Audi", "A4"),
    ("Tesla", "Model 3"),
    ("Lexus", "RX 350"),
];

const COLORS: &[&str] = &["white", "black", "silver", "gray", "blue", "red", "green"];

/// VIN alphabet excludes I, O and Q.
const VIN_CHARS: &[u8] = b"ABCDEFGHJKLMNPRSTUVWXYZ0123456789";

pub struct VehicleInput<'a> {
    pub age: u32,
    pub annual_income: f64,
    pub state: Option<&'a str>,
    pub today: NaiveDate,
}

pub struct VehicleGenerator;

impl VehicleGenerator {
    fn vehicle_count(income: f64, rng: &mut ChaCha8Rng) -> u32 {
        let weights: &[(u32, f64)] = if income < 30_000.0 {
            &[(0, 0.40), (1, 0.55), (2, 0.05)]
        } else if income < 75_000.0 {
            &[(0, 0.10), (1, 0.60), (2, 0.30)]
        } else if income < 150_000.0 {
            &[(1, 0.40), (2, 0.45), (3, 0.15)]
        } else {
            &[(1, 0.20), (2, 0.45), (3, 0.25), (4, 0.10)]
        };
        weighted_choice(rng, weights).copied().unwrap_or(1)
    }

    fn model_pool(income: f64, rng: &mut ChaCha8Rng) -> &'static [(&'static str, &'static str)] {
        if income >= 120_000.0 && rng.random_bool(0.5) {
            LUXURY
        } else if income >= 55_000.0 {
            MID_RANGE
        } else {
            ECONOMY
        }
    }

    fn vin(rng: &mut ChaCha8Rng) -> String {
        (0..17)
            .map(|_| VIN_CHARS[rng.random_range(0..VIN_CHARS.len())] as char)
            .collect()
    }

    fn plate(rng: &mut ChaCha8Rng) -> String {
        let letters: String = (0..3)
            .map(|_| (b'A' + rng.random_range(0..26_u8)) as char)
            .collect();
        format!("{letters}-{:04}", rng.random_range(0..10_000))
    }

    fn license_number(state: &str, rng: &mut ChaCha8Rng) -> String {
        format!(
            "{}{:08}",
            state.chars().next().unwrap_or('X'),
            rng.random_range(0..100_000_000_u64)
        )
    }
}

impl DomainGenerator for VehicleGenerator {
    type Input<'a> = VehicleInput<'a>;
    type Profile = VehicleProfile;

    fn generate(
        &self,
        input: VehicleInput<'_>,
        vary: &Variability,
        rng: &mut ChaCha8Rng,
    ) -> VehicleProfile {
        let license_chance = if input.age < 18 { 0.55 } else { 0.90 };
        let has_license = input.age >= 16 && rng.random_bool(license_chance);
        let state = input.state.unwrap_or("CA");
        let license_number = if has_license {
            Some(Self::license_number(state, rng))
        } else {
            None
        };

        let count = if has_license && input.age >= 18 {
            Self::vehicle_count(input.annual_income, rng)
        } else {
            0
        };

        let current_year = input.today.year() as u16;
        let mut vehicles = Vec::new();
        for _ in 0..count {
            // Higher income skews toward newer model years.
            let max_age = if input.annual_income >= 100_000.0 { 8 } else { 18 };
            let vehicle_age = rng.random_range(0..=max_age);
            let year = current_year.saturating_sub(vehicle_age);
            let model_pool = Self::model_pool(input.annual_income, rng);
            let (make, model) = pick(rng, model_pool)
                .copied()
                .unwrap_or(("Toyota", "Corolla"));

            let base_value = match Self::model_pool(input.annual_income, rng) {
                pool if std::ptr::eq(pool, LUXURY) => rng.random_range(38_000.0..70_000.0),
                pool if std::ptr::eq(pool, MID_RANGE) => rng.random_range(24_000.0..45_000.0),
                _ => rng.random_range(16_000.0..28_000.0),
            };
            // Straight-line-ish depreciation, floored at scrap value.
            let value = (base_value * 0.88_f64.powi(i32::from(vehicle_age))).max(1_500.0);
            let value = vary.add_noise_to_numeric(rng, value, 0.05).max(500.0);

            let ownership = if vehicle_age <= 3 && rng.random_bool(0.15) {
                VehicleOwnership::Leased
            } else if vehicle_age <= 6 && rng.random_bool(0.55) {
                VehicleOwnership::Financed
            } else {
                VehicleOwnership::Owned
            };
            let monthly_payment = match ownership {
                VehicleOwnership::Owned => None,
                VehicleOwnership::Leased => Some((value * 0.012).round()),
                VehicleOwnership::Financed => Some((value / 60.0 * 1.08).round()),
            };

            vehicles.push(Vehicle {
                year,
                make: make.to_string(),
                model: model.to_string(),
                vin: Self::vin(rng),
                license_plate: Self::plate(rng),
                state: state.to_string(),
                color: pick(rng, COLORS).copied().unwrap_or("white").to_string(),
                ownership,
                estimated_value: value.round(),
                monthly_payment,
            });
        }

        VehicleProfile {
            vehicles,
            has_drivers_license: has_license,
            license_number,
        }
    }
}
