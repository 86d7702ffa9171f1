//! Employment history: a backward walk from today through tenure-bucketed
//! jobs with gaps, contract overlaps and discounted earlier salaries.

use chrono::{Datelike, Duration, NaiveDate};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use personagen_core::sampling::{pick, weighted_choice};
use personagen_core::Employment;

use super::DomainGenerator;
use crate::variability::Variability;

pub(crate) struct Industry {
    pub name: &'static str,
    /// Entry-level annual salary band.
    pub salary_band: (f64, f64),
    pub titles: [&'static [&'static str]; 3],
    /// Hiring-month weights, January first.
    pub hiring_months: [f64; 12],
}

const EVEN_MONTHS: [f64; 12] = [1.0; 12];
const RETAIL_MONTHS: [f64; 12] = [0.6, 0.6, 0.8, 0.8, 1.0, 1.0, 0.8, 1.0, 1.2, 1.4, 2.2, 2.0];
const EDUCATION_MONTHS: [f64; 12] = [1.0, 0.8, 0.8, 0.8, 1.0, 1.4, 1.8, 2.2, 1.4, 0.8, 0.6, 0.6];
const ACCOUNTING_MONTHS: [f64; 12] = [1.8, 1.4, 1.0, 0.8, 0.8, 1.0, 1.0, 1.0, 1.2, 1.2, 1.0, 1.4];

pub(crate) const INDUSTRIES: &[Industry] = &[
    Industry {
        name: "Technology",
        salary_band: (55_000.0, 95_000.0),
        titles: [
            &["Junior Developer", "QA Analyst", "IT Support Specialist"],
            &["Software Engineer", "Systems Analyst", "Product Manager"],
            &["Senior Engineer", "Engineering Manager", "Principal Architect"],
        ],
        hiring_months: EVEN_MONTHS,
    },
    Industry {
        name: "Healthcare",
        salary_band: (45_000.0, 80_000.0),
        titles: [
            &["Medical Assistant", "Patient Coordinator", "Lab Technician"],
            &["Registered Nurse", "Physical Therapist", "Radiology Tech"],
            &["Nurse Practitioner", "Clinical Director", "Physician"],
        ],
        hiring_months: EVEN_MONTHS,
    },
    Industry {
        name: "Finance",
        salary_band: (50_000.0, 90_000.0),
        titles: [
            &["Bank Teller", "Junior Analyst", "Loan Processor"],
            &["Financial Analyst", "Accountant", "Underwriter"],
            &["Portfolio Manager", "Controller", "Finance Director"],
        ],
        hiring_months: ACCOUNTING_MONTHS,
    },
    Industry {
        name: "Education",
        salary_band: (38_000.0, 60_000.0),
        titles: [
            &["Teaching Assistant", "Substitute Teacher", "Tutor"],
            &["Teacher", "School Counselor", "Librarian"],
            &["Principal", "Curriculum Director", "Professor"],
        ],
        hiring_months: EDUCATION_MONTHS,
    },
    Industry {
        name: "Retail",
        salary_band: (28_000.0, 45_000.0),
        titles: [
            &["Sales Associate", "Cashier", "Stock Clerk"],
            &["Store Supervisor", "Buyer", "Merchandiser"],
            &["Store Manager", "District Manager", "Regional Director"],
        ],
        hiring_months: RETAIL_MONTHS,
    },
    Industry {
        name: "Manufacturing",
        salary_band: (35_000.0, 60_000.0),
        titles: [
            &["Assembler", "Machine Operator", "Quality Inspector"],
            &["Production Supervisor", "Process Engineer", "Planner"],
            &["Plant Manager", "Operations Director", "VP Manufacturing"],
        ],
        hiring_months: EVEN_MONTHS,
    },
    Industry {
        name: "Construction",
        salary_band: (38_000.0, 65_000.0),
        titles: [
            &["Laborer", "Apprentice Electrician", "Carpenter Helper"],
            &["Electrician", "Site Supervisor", "Estimator"],
            &["Project Manager", "General Contractor", "Construction Director"],
        ],
        hiring_months: [0.6, 0.6, 1.0, 1.4, 1.6, 1.6, 1.4, 1.4, 1.2, 1.0, 0.6, 0.4],
    },
    Industry {
        name: "Hospitality",
        salary_band: (26_000.0, 42_000.0),
        titles: [
            &["Server", "Front Desk Agent", "Line Cook"],
            &["Restaurant Supervisor", "Event Coordinator", "Sous Chef"],
            &["General Manager", "Executive Chef", "Director of Operations"],
        ],
        hiring_months: [0.8, 0.8, 1.2, 1.4, 1.6, 1.4, 1.2, 1.0, 1.0, 1.0, 1.2, 1.2],
    },
];

pub(crate) fn industry_by_name(name: &str) -> Option<&'static Industry> {
    INDUSTRIES.iter().find(|industry| industry.name == name)
}

pub(crate) fn industry_names() -> Vec<&'static str> {
    INDUSTRIES.iter().map(|industry| industry.name).collect()
}

const EMPLOYER_PREFIXES: &[&str] = &[
    "Summit", "Evergreen", "Pinnacle", "Cascade", "Horizon", "Keystone", "Lakeside", "Northgate",
    "Redwood", "Sterling", "Harbor", "Granite",
];
const EMPLOYER_SUFFIXES: &[&str] = &[
    "Group", "Solutions", "Partners", "Industries", "Systems", "Associates", "Holdings", "Labs",
    "Services", "Works",
];

/// Tenure (min, max) years by age bucket.
fn tenure_bounds(age: u32) -> (f64, f64) {
    match age {
        0..=24 => (0.5, 2.0),
        25..=34 => (1.0, 4.0),
        35..=44 => (2.0, 6.0),
        45..=54 => (3.0, 8.0),
        _ => (4.0, 10.0),
    }
}

pub struct EmploymentInput<'a> {
    pub age: u32,
    pub industries: &'a [String],
    pub base_salary: f64,
    pub today: NaiveDate,
    pub max_jobs: u32,
}

pub struct EmploymentGenerator;

impl EmploymentGenerator {
    fn employer_name(rng: &mut ChaCha8Rng) -> String {
        let prefix = pick(rng, EMPLOYER_PREFIXES).copied().unwrap_or("Summit");
        let suffix = pick(rng, EMPLOYER_SUFFIXES).copied().unwrap_or("Group");
        format!("{prefix} {suffix}")
    }

    fn title_for(industry: &Industry, age: u32, rng: &mut ChaCha8Rng) -> String {
        let level = if age < 28 {
            0
        } else if age < 40 {
            1
        } else {
            2
        };
        pick(rng, industry.titles[level])
            .copied()
            .unwrap_or("Specialist")
            .to_string()
    }

    fn tenure_days(age: u32, rng: &mut ChaCha8Rng) -> i64 {
        let (min_years, max_years) = tenure_bounds(age);
        // Occasional outlier tenures on either side.
        let years = if rng.random_bool(0.12) {
            if rng.random_bool(0.5) {
                rng.random_range(0.1..0.5)
            } else {
                rng.random_range(max_years..max_years + 10.0)
            }
        } else {
            rng.random_range(min_years..max_years)
        };
        (years * 365.0) as i64
    }

    /// Shifts a start date to a hiring-weighted month within the same year.
    fn season_adjust(industry: &Industry, start: NaiveDate, rng: &mut ChaCha8Rng) -> NaiveDate {
        let weights: Vec<(u32, f64)> = industry
            .hiring_months
            .iter()
            .enumerate()
            .map(|(i, w)| (i as u32 + 1, *w))
            .collect();
        let month = weighted_choice(rng, &weights).copied().unwrap_or(start.month());
        NaiveDate::from_ymd_opt(start.year(), month, start.day().min(28)).unwrap_or(start)
    }
}

impl DomainGenerator for EmploymentGenerator {
    type Input<'a> = EmploymentInput<'a>;
    type Profile = Vec<Employment>;

    fn generate(
        &self,
        input: EmploymentInput<'_>,
        _vary: &Variability,
        rng: &mut ChaCha8Rng,
    ) -> Vec<Employment> {
        if input.age < 18 || input.industries.is_empty() || input.max_jobs == 0 {
            return Vec::new();
        }

        let working_years = (input.age - 18) as i64;
        let earliest = input.today - Duration::days(working_years * 365);
        let mut history = Vec::new();
        let mut salary = input.base_salary;
        let mut cursor = input.today;

        let currently_employed = rng.random_bool(0.85);
        if currently_employed {
            let industry_name = pick(rng, input.industries)
                .cloned()
                .unwrap_or_else(|| "Technology".to_string());
            let industry =
                industry_by_name(&industry_name).unwrap_or(&INDUSTRIES[0]);
            let start = input.today - Duration::days(Self::tenure_days(input.age, rng));
            let start = Self::season_adjust(industry, start.max(earliest), rng);
            history.push(Employment {
                employer: Self::employer_name(rng),
                job_title: Self::title_for(industry, input.age, rng),
                industry: industry.name.to_string(),
                start_date: start,
                end_date: None,
                is_current: true,
                annual_salary: salary,
                is_contract: false,
            });
            cursor = start;
        }

        while history.len() < input.max_jobs as usize && cursor > earliest {
            // Unemployment gap between jobs.
            let mut end = cursor - Duration::days(1);
            if rng.random_bool(0.15) {
                end -= Duration::days(rng.random_range(30..365));
            }
            if end <= earliest {
                break;
            }

            let industry_name = pick(rng, input.industries)
                .cloned()
                .unwrap_or_else(|| "Technology".to_string());
            let industry = industry_by_name(&industry_name).unwrap_or(&INDUSTRIES[0]);

            let mut start = end - Duration::days(Self::tenure_days(input.age, rng));
            if start < earliest {
                start = earliest;
            }
            let start = Self::season_adjust(industry, start, rng);
            if start >= end {
                break;
            }

            // Earlier jobs pay less than the one that followed.
            salary *= 1.0 - rng.random_range(0.05..0.25);
            let is_contract = rng.random_bool(0.10);
            let end = if is_contract {
                // Contract work may overlap the next job slightly.
                (end + Duration::days(rng.random_range(0..180))).min(input.today)
            } else {
                end
            };

            history.push(Employment {
                employer: Self::employer_name(rng),
                job_title: Self::title_for(industry, input.age, rng),
                industry: industry.name.to_string(),
                start_date: start,
                end_date: Some(end),
                is_current: false,
                annual_salary: salary,
                is_contract,
            });
            cursor = start;
        }

        history.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        history
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

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn industries() -> Vec<String> {
        vec!["Technology".to_string(), "Finance".to_string()]
    }

    #[test]
    fn minors_have_no_history() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let history = EmploymentGenerator.generate(
            EmploymentInput {
                age: 16,
                industries: &industries(),
                base_salary: 30_000.0,
                today: today(),
                max_jobs: 5,
            },
            &clean(),
            &mut rng,
        );
        assert!(history.is_empty());
    }

    #[test]
    fn at_most_one_current_and_sorted_descending() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..100 {
            let history = EmploymentGenerator.generate(
                EmploymentInput {
                    age: 45,
                    industries: &industries(),
                    base_salary: 90_000.0,
                    today: today(),
                    max_jobs: 5,
                },
                &clean(),
                &mut rng,
            );
            assert!(history.iter().filter(|job| job.is_current).count() <= 1);
            for pair in history.windows(2) {
                assert!(pair[0].start_date >= pair[1].start_date);
            }
        }
    }

    #[test]
    fn earlier_jobs_pay_less() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let history = EmploymentGenerator.generate(
            EmploymentInput {
                age: 50,
                industries: &industries(),
                base_salary: 100_000.0,
                today: today(),
                max_jobs: 5,
            },
            &clean(),
            &mut rng,
        );
        let non_current: Vec<_> = history.iter().filter(|job| !job.is_current).collect();
        for pair in non_current.windows(2) {
            assert!(pair[0].annual_salary > pair[1].annual_salary);
        }
    }

    #[test]
    fn respects_max_jobs() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..50 {
            let history = EmploymentGenerator.generate(
                EmploymentInput {
                    age: 60,
                    industries: &industries(),
                    base_salary: 80_000.0,
                    today: today(),
                    max_jobs: 3,
                },
                &clean(),
                &mut rng,
            );
            assert!(history.len() <= 3);
        }
    }
}
