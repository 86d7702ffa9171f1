//! Credit and debt synthesis, plus the base-income formula that seeds the
//! rest of the composition.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use personagen_core::sampling::clamp_f64;
use personagen_core::FinancialProfile;

use super::employment::industry_by_name;
use super::DomainGenerator;
use crate::variability::Variability;

/// Real-world credit score buckets with population shares.
const SCORE_BUCKETS: &[(f64, f64, f64)] = &[
    (300.0, 579.0, 0.16),
    (580.0, 669.0, 0.21),
    (670.0, 739.0, 0.21),
    (740.0, 799.0, 0.25),
    (800.0, 850.0, 0.17),
];

/// Cost-of-living multipliers by state; off-table states are 1.0.
const STATE_COL: &[(&str, f64)] = &[
    ("CA", 1.35),
    ("NY", 1.30),
    ("WA", 1.20),
    ("CO", 1.10),
    ("IL", 1.05),
    ("TX", 1.00),
    ("FL", 0.95),
    ("PA", 0.95),
    ("GA", 0.95),
    ("OH", 0.90),
];

fn age_score_offset(age: u32) -> f64 {
    match age {
        0..=24 => -40.0,
        25..=34 => -15.0,
        35..=44 => 5.0,
        45..=54 => 15.0,
        55..=64 => 25.0,
        _ => 30.0,
    }
}

fn income_score_offset(income: f64) -> f64 {
    if income < 30_000.0 {
        -50.0
    } else if income < 50_000.0 {
        -20.0
    } else if income < 75_000.0 {
        0.0
    } else if income < 100_000.0 {
        20.0
    } else if income < 150_000.0 {
        40.0
    } else {
        60.0
    }
}

fn experience_multiplier(age: u32) -> f64 {
    match age {
        0..=24 => 0.60,
        25..=34 => 0.85,
        35..=44 => 1.10,
        45..=54 => 1.25,
        55..=64 => 1.20,
        _ => 1.00,
    }
}

fn dti_ceiling(score: u16) -> f64 {
    if score >= 750 {
        0.35
    } else if score >= 700 {
        0.40
    } else if score >= 650 {
        0.45
    } else if score >= 600 {
        0.55
    } else {
        0.65
    }
}

pub struct FinancialInput<'a> {
    pub age: u32,
    pub annual_income: f64,
    pub industry: Option<&'a str>,
    pub state: Option<&'a str>,
    pub employment_stable: bool,
}

pub struct FinancialGenerator;

impl FinancialGenerator {
    /// Base annual income from industry band, age experience and state
    /// cost of living. The composition engine calls this before the
    /// employment walk.
    pub fn generate_income(
        &self,
        rng: &mut ChaCha8Rng,
        age: u32,
        industry: &str,
        state: Option<&str>,
    ) -> f64 {
        let (band_min, band_max) = industry_by_name(industry)
            .map(|industry| industry.salary_band)
            .unwrap_or((30_000.0, 55_000.0));
        let base = rng.random_range(band_min..band_max);
        let col = state
            .and_then(|state| {
                STATE_COL
                    .iter()
                    .find(|(col_state, _)| *col_state == state)
                    .map(|(_, mult)| *mult)
            })
            .unwrap_or(1.0);
        (base * experience_multiplier(age) * col).round()
    }

    fn credit_score(&self, input: &FinancialInput<'_>, rng: &mut ChaCha8Rng) -> u16 {
        let stability = if input.employment_stable { 20.0 } else { -30.0 };
        let noise = Normal::new(0.0, 30.0)
            .map(|normal| normal.sample(rng))
            .unwrap_or(0.0);
        let raw = 650.0
            + age_score_offset(input.age)
            + income_score_offset(input.annual_income)
            + stability
            + noise;

        // Pull 30% of the way toward the nearest population-bucket midpoint
        // so the aggregate distribution resembles the published one.
        let midpoint = SCORE_BUCKETS
            .iter()
            .map(|(low, high, _)| (low + high) / 2.0)
            .min_by(|a, b| {
                (a - raw)
                    .abs()
                    .partial_cmp(&(b - raw).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(raw);
        let blended = 0.7 * raw + 0.3 * midpoint;
        clamp_f64(blended, 300.0, 850.0).round() as u16
    }
}

impl DomainGenerator for FinancialGenerator {
    type Input<'a> = FinancialInput<'a>;
    type Profile = FinancialProfile;

    fn generate(
        &self,
        input: FinancialInput<'_>,
        vary: &Variability,
        rng: &mut ChaCha8Rng,
    ) -> FinancialProfile {
        let score = self.credit_score(&input, rng);
        let income = input.annual_income.max(0.0);

        let ceiling = dti_ceiling(score);
        let dti = rng.random_range(0.0..ceiling);
        let total_target = dti * income;

        // Bernoulli-gated debt categories; shares normalize over the gates
        // that fired.
        let mut shares: Vec<(usize, f64)> = Vec::new();
        if input.age >= 25 && score >= 620 && rng.random_bool(0.40) {
            shares.push((0, 0.60));
        }
        if rng.random_bool(0.50) {
            shares.push((1, 0.15));
        }
        if input.age < 45 && rng.random_bool(0.35) {
            shares.push((2, 0.15));
        }
        if rng.random_bool(0.70) {
            shares.push((3, 0.07));
        }
        if rng.random_bool(0.30) {
            shares.push((4, 0.03));
        }
        let share_total: f64 = shares.iter().map(|(_, share)| share).sum();
        let mut debts = [0.0_f64; 5];
        if share_total > 0.0 {
            for (slot, share) in &shares {
                debts[*slot] = total_target * share / share_total;
            }
        }
        let [mortgage, auto, student, card, other] = debts;
        let total_debt = mortgage + auto + student + card + other;
        let dti = if income > 0.0 {
            clamp_f64(total_debt / income, 0.0, 10.0)
        } else {
            0.0
        };

        let utilization = if score >= 750 {
            rng.random_range(0.01..0.20)
        } else if score >= 700 {
            rng.random_range(0.05..0.30)
        } else if score >= 650 {
            rng.random_range(0.15..0.50)
        } else {
            rng.random_range(0.30..0.90)
        };
        let available_credit = if card > 0.0 {
            (card / utilization - card).max(0.0)
        } else {
            income * 0.2
        };

        let income = vary.add_noise_to_numeric(rng, income, 0.02).max(0.0);

        FinancialProfile {
            credit_score: score,
            annual_income: income,
            debt_to_income_ratio: dti,
            total_debt,
            mortgage_debt: mortgage,
            auto_debt: auto,
            student_debt: student,
            credit_card_debt: card,
            other_debt: other,
            credit_utilization: utilization,
            available_credit,
            bankruptcy_history: score < 580 && rng.random_bool(0.10),
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

    fn profile(age: u32, income: f64, seed: u64) -> FinancialProfile {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        FinancialGenerator.generate(
            FinancialInput {
                age,
                annual_income: income,
                industry: Some("Technology"),
                state: Some("CA"),
                employment_stable: true,
            },
            &clean(),
            &mut rng,
        )
    }

    #[test]
    fn credit_score_stays_in_bounds() {
        for seed in 0..300 {
            let p = profile(30, 60_000.0, seed);
            assert!((300..=850).contains(&p.credit_score));
            assert!((0.0..=10.0).contains(&p.debt_to_income_ratio));
            assert!((0.0..=1.0).contains(&p.credit_utilization));
        }
    }

    #[test]
    fn higher_income_scores_higher_on_average() {
        let mut low_sum = 0.0;
        let mut high_sum = 0.0;
        for seed in 0..200 {
            low_sum += f64::from(profile(40, 25_000.0, seed).credit_score);
            high_sum += f64::from(profile(40, 160_000.0, seed + 10_000).credit_score);
        }
        assert!(
            high_sum / 200.0 > low_sum / 200.0 + 30.0,
            "high {high_sum} low {low_sum}"
        );
    }

    #[test]
    fn debt_categories_sum_to_total() {
        for seed in 0..100 {
            let p = profile(45, 90_000.0, seed);
            let sum = p.mortgage_debt + p.auto_debt + p.student_debt + p.credit_card_debt
                + p.other_debt;
            assert!((sum - p.total_debt).abs() < 1e-6);
        }
    }

    #[test]
    fn income_scales_with_state_and_age() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let generator = FinancialGenerator;
        let mut ca_sum = 0.0;
        let mut oh_sum = 0.0;
        for _ in 0..200 {
            ca_sum += generator.generate_income(&mut rng, 40, "Technology", Some("CA"));
            oh_sum += generator.generate_income(&mut rng, 40, "Technology", Some("OH"));
        }
        assert!(ca_sum > oh_sum * 1.2);
    }

    #[test]
    fn unknown_industry_falls_back() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let income = FinancialGenerator.generate_income(&mut rng, 30, "Spelunking", None);
        assert!(income > 10_000.0 && income < 100_000.0);
    }
}
