//! Invariant checks and statistics over a batch of people.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::Utc;
use uuid::Uuid;

use personagen_core::{AddressType, Gender, Person};

use crate::errors::{EvalError, Result};
use crate::report::{
    BatchReport, GenderBreakdown, InvariantCounts, NumericSummary, REPORT_VERSION,
};

/// Oldest age the composition brackets can produce, plus calendar slack.
const MAX_PLAUSIBLE_AGE: u32 = 96;

fn check_invariants(people: &[Person]) -> InvariantCounts {
    let mut counts = InvariantCounts::default();
    let mut seen_ids: HashSet<Uuid> = HashSet::with_capacity(people.len());
    let today = Utc::now().date_naive();

    for person in people {
        if !person.addresses.is_empty() {
            let current = person
                .addresses
                .iter()
                .filter(|address| address.address_type == AddressType::Current)
                .count();
            if current != 1 {
                counts.current_address += 1;
            }
        }
        if person.phone_numbers.iter().filter(|p| p.is_primary).count() > 1 {
            counts.primary_phone += 1;
        }
        if person.email_addresses.iter().filter(|e| e.is_primary).count() > 1 {
            counts.primary_email += 1;
        }

        let current_jobs = person
            .employment_history
            .iter()
            .filter(|job| job.is_current)
            .count();
        let sorted = person
            .employment_history
            .windows(2)
            .all(|pair| pair[0].start_date >= pair[1].start_date);
        if current_jobs > 1 || !sorted {
            counts.employment += 1;
        }

        if let Some(financial) = &person.financial {
            if !(300..=850).contains(&financial.credit_score) {
                counts.credit_score_range += 1;
            }
            if !(0.0..=10.0).contains(&financial.debt_to_income_ratio)
                || !(0.0..=1.0).contains(&financial.credit_utilization)
            {
                counts.financial_ratio += 1;
            }
        }

        if person.date_of_birth >= today || person.age > MAX_PLAUSIBLE_AGE {
            counts.birth_date += 1;
        }
        if !seen_ids.insert(person.id) {
            counts.duplicate_id += 1;
        }
    }
    counts
}

/// Mean credit score of the upper income half minus the lower half.
fn income_credit_gap(people: &[Person]) -> Option<f64> {
    let mut pairs: Vec<(f64, f64)> = people
        .iter()
        .filter_map(|person| {
            person.financial.as_ref().map(|financial| {
                (financial.annual_income, f64::from(financial.credit_score))
            })
        })
        .collect();
    if pairs.len() < 4 {
        return None;
    }
    pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    let mid = pairs.len() / 2;
    let lower: f64 = pairs[..mid].iter().map(|(_, score)| score).sum::<f64>() / mid as f64;
    let upper: f64 =
        pairs[mid..].iter().map(|(_, score)| score).sum::<f64>() / (pairs.len() - mid) as f64;
    Some(upper - lower)
}

/// Evaluates a batch: structural invariants plus distribution summaries.
pub fn evaluate_batch(people: &[Person]) -> Result<BatchReport> {
    if people.is_empty() {
        return Err(EvalError::EmptyBatch);
    }

    let invariants = check_invariants(people);

    let mut gender = GenderBreakdown::default();
    for person in people {
        match person.gender {
            Gender::Male => gender.male += 1,
            Gender::Female => gender.female += 1,
            Gender::Other => gender.other += 1,
            Gender::Unknown => gender.unknown += 1,
        }
    }

    let ages: Vec<f64> = people.iter().map(|person| f64::from(person.age)).collect();
    let age = NumericSummary::from_values(&ages).unwrap_or(NumericSummary {
        min: 0.0,
        max: 0.0,
        mean: 0.0,
    });

    let scores: Vec<f64> = people
        .iter()
        .filter_map(|person| person.financial.as_ref())
        .map(|financial| f64::from(financial.credit_score))
        .collect();
    let incomes: Vec<f64> = people
        .iter()
        .filter_map(|person| person.financial.as_ref())
        .map(|financial| financial.annual_income)
        .collect();

    let missing_ssn = people.iter().filter(|person| person.ssn.is_none()).count();

    Ok(BatchReport {
        report_version: REPORT_VERSION.to_string(),
        generated_at: Utc::now(),
        record_count: people.len() as u64,
        invariants,
        gender,
        age,
        credit_score: NumericSummary::from_values(&scores),
        income: NumericSummary::from_values(&incomes),
        income_credit_gap: income_credit_gap(people),
        ssn_missing_rate: missing_ssn as f64 / people.len() as f64,
    })
}

/// Loads people from a JSON array export or an NDJSON stream, sniffed from
/// the first non-whitespace byte.
pub fn load_people(path: &Path) -> Result<Vec<Person>> {
    let text = fs::read_to_string(path)?;
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        Ok(serde_json::from_str(trimmed)?)
    } else {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| serde_json::from_str(line).map_err(EvalError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use personagen_core::{
        Address, AddressStyle, CulturalBackground, EducationLevel, EducationProfile,
        LifestyleCategory, MaritalStatus, PersonName, PhysicalProfile,
    };
    use personagen_core::{BigFive, DailyRoutine, LifestyleProfile};

    fn minimal_person(id_seed: u128, age: u32) -> Person {
        Person {
            id: Uuid::from_u128(id_seed),
            ssn: None,
            name: PersonName {
                first: "Test".to_string(),
                middle: None,
                last: "Person".to_string(),
                prefix: None,
                suffix: None,
                nickname: None,
                maiden_name: None,
            },
            date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            age,
            gender: if id_seed % 2 == 0 { Gender::Male } else { Gender::Female },
            marital_status: MaritalStatus::Single,
            cultural_background: CulturalBackground::Anglo,
            addresses: Vec::new(),
            phone_numbers: Vec::new(),
            email_addresses: Vec::new(),
            employment_history: Vec::new(),
            financial: None,
            medical: None,
            vehicles: None,
            education: EducationProfile {
                highest_level: EducationLevel::HighSchool,
                entries: Vec::new(),
            },
            online_presence: None,
            physical: PhysicalProfile {
                height_cm: 170.0,
                weight_kg: 70.0,
                bmi: 24.2,
                eye_color: "brown".to_string(),
                hair_color: "brown".to_string(),
                blood_pressure_systolic: 118,
                blood_pressure_diastolic: 76,
                resting_heart_rate: 66,
            },
            lifestyle: LifestyleProfile {
                category: LifestyleCategory::Suburban,
                big_five: BigFive {
                    openness: 5,
                    conscientiousness: 5,
                    extraversion: 5,
                    agreeableness: 5,
                    neuroticism: 5,
                },
                mbti: "ISTP".to_string(),
                hobbies: Vec::new(),
                favorite_foods: Vec::new(),
                core_values: Vec::new(),
                music_genres: Vec::new(),
                devices: Vec::new(),
                tech_adoption: "mainstream".to_string(),
                routine: DailyRoutine {
                    archetype: "Standard".to_string(),
                    wake_time: "07:00".to_string(),
                    bed_time: "23:00".to_string(),
                    productivity_peak: "midday".to_string(),
                },
                shopping_pattern: "Practical".to_string(),
                life_satisfaction: 6,
                stress_level: 5,
                work_life_balance: 6,
                future_goals: Vec::new(),
            },
            travel: None,
            banking: None,
            communication: None,
            legal: None,
        }
    }

    #[test]
    fn empty_batch_is_rejected() {
        assert!(matches!(evaluate_batch(&[]), Err(EvalError::EmptyBatch)));
    }

    #[test]
    fn duplicate_ids_are_counted() {
        let people = vec![minimal_person(1, 30), minimal_person(1, 40)];
        let report = evaluate_batch(&people).unwrap();
        assert_eq!(report.invariants.duplicate_id, 1);
        assert!(!report.invariants.is_clean());
    }

    #[test]
    fn missing_current_address_flagged() {
        let mut person = minimal_person(2, 30);
        person.addresses.push(Address {
            id: Uuid::from_u128(9),
            street_line1: "12 Main St".to_string(),
            street_line2: None,
            city: "Austin".to_string(),
            state: "TX".to_string(),
            zip_code: "78701".to_string(),
            address_type: AddressType::Previous,
            style: AddressStyle::Standard,
            effective_date: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
            end_date: Some(NaiveDate::from_ymd_opt(2018, 1, 1).unwrap()),
        });
        let report = evaluate_batch(&[person]).unwrap();
        assert_eq!(report.invariants.current_address, 1);
    }

    #[test]
    fn implausible_age_flagged() {
        let people = vec![minimal_person(3, 150)];
        let report = evaluate_batch(&people).unwrap();
        assert_eq!(report.invariants.birth_date, 1);
    }

    #[test]
    fn ssn_missing_rate_counts_nulls() {
        let mut with_ssn = minimal_person(4, 30);
        with_ssn.ssn = Some("123-45-6789".to_string());
        let people = vec![with_ssn, minimal_person(5, 35)];
        let report = evaluate_batch(&people).unwrap();
        assert_eq!(report.ssn_missing_rate, 0.5);
    }

    #[test]
    fn ndjson_and_array_loads_agree() {
        let people = vec![minimal_person(6, 25), minimal_person(7, 45)];
        let dir = std::env::temp_dir();
        let array_path = dir.join(format!("personagen-eval-{}.json", std::process::id()));
        let ndjson_path = dir.join(format!("personagen-eval-{}.ndjson", std::process::id()));
        fs::write(&array_path, serde_json::to_string_pretty(&people).unwrap()).unwrap();
        let lines: Vec<String> = people
            .iter()
            .map(|person| serde_json::to_string(person).unwrap())
            .collect();
        fs::write(&ndjson_path, lines.join("\n")).unwrap();

        let from_array = load_people(&array_path).unwrap();
        let from_ndjson = load_people(&ndjson_path).unwrap();
        assert_eq!(from_array, from_ndjson);
        assert_eq!(from_array, people);

        let _ = fs::remove_file(array_path);
        let _ = fs::remove_file(ndjson_path);
    }
}
