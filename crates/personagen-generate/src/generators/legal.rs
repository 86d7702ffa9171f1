//! Legal footprint: court records weighted by demographics, occupation
//! driven compliance and licensing, and a composite risk score.

use chrono::{Datelike, Duration, NaiveDate};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use personagen_core::sampling::{pick, weighted_choice};
use personagen_core::{
    BusinessEntity, ComplianceRecord, IntellectualProperty, LegalProfile, LegalRecord,
    ProfessionalLicense, Severity,
};

use super::DomainGenerator;
use crate::variability::Variability;

/// (record type, weight, severity, financial impact range).
const RECORD_TYPES: &[(&str, f64, Severity, f64, f64)] = &[
    ("traffic_violation", 0.70, Severity::Low, 100.0, 800.0),
    ("civil_suit", 0.10, Severity::Medium, 1_000.0, 50_000.0),
    ("divorce", 0.08, Severity::Medium, 2_000.0, 30_000.0),
    ("criminal_misdemeanor", 0.05, Severity::High, 500.0, 10_000.0),
    ("bankruptcy", 0.03, Severity::High, 10_000.0, 150_000.0),
    ("property_dispute", 0.02, Severity::Medium, 1_000.0, 40_000.0),
    ("tax_lien", 0.02, Severity::High, 2_000.0, 80_000.0),
];

const STATUSES: &[(&str, f64)] = &[
    ("closed", 0.70),
    ("settled", 0.20),
    ("pending", 0.05),
    ("appealed", 0.03),
    ("dismissed", 0.02),
];

/// Occupation keyword to compliance area; the tax area applies to everyone.
const COMPLIANCE_BY_OCCUPATION: &[(&str, &str, &str)] = &[
    ("doctor", "healthcare", "HIPAA"),
    ("nurse", "healthcare", "HIPAA"),
    ("teacher", "education", "FERPA"),
    ("engineer", "safety", "OSHA"),
    ("accountant", "financial", "SOX"),
    ("analyst", "financial", "SOX"),
    ("driver", "transport", "DOT"),
    ("contractor", "safety", "OSHA"),
];

/// Occupation keyword to licensed profession.
const LICENSES_BY_OCCUPATION: &[(&str, &str)] = &[
    ("doctor", "Medical License"),
    ("nurse", "Nursing License"),
    ("teacher", "Teaching Certificate"),
    ("engineer", "Professional Engineer"),
    ("accountant", "CPA License"),
    ("electrician", "Electrician License"),
    ("attorney", "Bar Admission"),
    ("realtor", "Real Estate License"),
];

const BUSINESS_STATES: &[&str] = &["DE", "CA", "NY", "TX", "FL", "NV"];

const BUSINESS_NAMES: &[&str] = &[
    "Summit Consulting",
    "Blue Oak Ventures",
    "Clearwater Services",
    "Northgate Holdings",
    "Lakeside Solutions",
];

pub struct LegalInput<'a> {
    pub age: u32,
    pub annual_income: f64,
    pub occupation: Option<&'a str>,
    pub today: NaiveDate,
}

pub struct LegalGenerator;

impl LegalGenerator {
    fn record_probability(age: u32, income: f64) -> f64 {
        let mut probability: f64 = 0.30;
        if age < 25 {
            probability *= 0.6;
        } else if age > 60 {
            probability *= 0.8;
        }
        if income < 30_000.0 {
            probability *= 1.2;
        } else if income > 100_000.0 {
            probability *= 0.8;
        }
        probability.min(0.9)
    }

    fn case_number(year: i32, rng: &mut ChaCha8Rng) -> String {
        format!("{year}-{:06}", rng.random_range(0..1_000_000))
    }

    fn legal_records(&self, input: &LegalInput<'_>, rng: &mut ChaCha8Rng) -> Vec<LegalRecord> {
        if !rng.random_bool(Self::record_probability(input.age, input.annual_income)) {
            return Vec::new();
        }
        let count = weighted_choice(rng, &[(1_usize, 0.60), (2, 0.25), (3, 0.10), (4, 0.05)])
            .copied()
            .unwrap_or(1);
        let type_weights: Vec<(usize, f64)> = RECORD_TYPES
            .iter()
            .enumerate()
            .map(|(index, (_, weight, ..))| (index, *weight))
            .collect();
        (0..count)
            .map(|_| {
                let index = weighted_choice(rng, &type_weights).copied().unwrap_or(0);
                let (record_type, _, severity, impact_lo, impact_hi) = RECORD_TYPES[index];
                let filed = input.today - Duration::days(rng.random_range(90..3_650));
                let status = weighted_choice(rng, STATUSES).copied().unwrap_or("closed");
                let resolved = if status == "closed" || status == "settled" {
                    Some(filed + Duration::days(rng.random_range(30..720)))
                } else {
                    None
                };
                let outcome = resolved.map(|_| {
                    match status {
                        "settled" => "settlement reached",
                        _ => "case closed",
                    }
                    .to_string()
                });
                LegalRecord {
                    record_type: record_type.to_string(),
                    title: record_type.replace('_', " "),
                    case_number: Self::case_number(filed.year(), rng),
                    filed,
                    status: status.to_string(),
                    severity,
                    financial_impact: rng.random_range(impact_lo..impact_hi).round(),
                    resolved,
                    outcome,
                }
            })
            .collect()
    }

    fn compliance(&self, input: &LegalInput<'_>, rng: &mut ChaCha8Rng) -> Vec<ComplianceRecord> {
        let occupation = input.occupation.unwrap_or("").to_lowercase();
        let mut records = Vec::new();
        for (keyword, area, regulation) in COMPLIANCE_BY_OCCUPATION {
            if occupation.contains(keyword) {
                records.push(self.compliance_record(area, regulation, input.today, rng));
            }
        }
        // Everyone files taxes.
        records.push(self.compliance_record("tax", "IRS", input.today, rng));
        records
    }

    fn compliance_record(
        &self,
        area: &str,
        regulation: &str,
        today: NaiveDate,
        rng: &mut ChaCha8Rng,
    ) -> ComplianceRecord {
        let status = weighted_choice(
            rng,
            &[("compliant", 0.88), ("pending", 0.08), ("non_compliant", 0.04)],
        )
        .copied()
        .unwrap_or("compliant");
        ComplianceRecord {
            area: area.to_string(),
            regulation: regulation.to_string(),
            status: status.to_string(),
            last_audit: if rng.random_bool(0.5) {
                Some(today - Duration::days(rng.random_range(30..730)))
            } else {
                None
            },
            remediation_plan: if status == "non_compliant" {
                Some("corrective filing scheduled".to_string())
            } else {
                None
            },
        }
    }

    fn licenses(&self, input: &LegalInput<'_>, rng: &mut ChaCha8Rng) -> Vec<ProfessionalLicense> {
        let occupation = input.occupation.unwrap_or("").to_lowercase();
        LICENSES_BY_OCCUPATION
            .iter()
            .filter(|(keyword, _)| occupation.contains(keyword))
            .map(|(_, license_type)| {
                let status = weighted_choice(
                    rng,
                    &[("active", 0.95), ("expired", 0.03), ("suspended", 0.02)],
                )
                .copied()
                .unwrap_or("active");
                let issued = input.today - Duration::days(rng.random_range(365..7_300));
                ProfessionalLicense {
                    license_type: (*license_type).to_string(),
                    number: format!("L{:07}", rng.random_range(0..10_000_000)),
                    issued,
                    expires: input.today + Duration::days(rng.random_range(90..1_095)),
                    status: status.to_string(),
                    continuing_education_hours: if rng.random_bool(0.8) {
                        rng.random_range(10..=40)
                    } else {
                        0
                    },
                    disciplinary_action: rng.random_bool(0.05),
                }
            })
            .collect()
    }

    fn businesses(&self, input: &LegalInput<'_>, rng: &mut ChaCha8Rng) -> Vec<BusinessEntity> {
        let occupation = input.occupation.unwrap_or("").to_lowercase();
        let is_owner = occupation.contains("owner") || occupation.contains("founder");
        if !is_owner && !rng.random_bool(0.10) {
            return Vec::new();
        }
        let count = weighted_choice(rng, &[(1_usize, 0.80), (2, 0.15), (3, 0.05)])
            .copied()
            .unwrap_or(1);
        let entity_types = ["LLC", "S-Corp", "Sole Proprietorship"];
        (0..count)
            .map(|_| BusinessEntity {
                name: format!(
                    "{} {}",
                    pick(rng, BUSINESS_NAMES).copied().unwrap_or("Summit Consulting"),
                    pick(rng, &entity_types).copied().unwrap_or("LLC"),
                ),
                entity_type: pick(rng, &entity_types).copied().unwrap_or("LLC").to_string(),
                state: pick(rng, BUSINESS_STATES).copied().unwrap_or("DE").to_string(),
                tax_id: format!(
                    "{:02}-{:07}",
                    rng.random_range(10..100),
                    rng.random_range(0..10_000_000)
                ),
                active: rng.random_bool(0.9),
            })
            .collect()
    }

    fn intellectual_property(
        &self,
        input: &LegalInput<'_>,
        rng: &mut ChaCha8Rng,
    ) -> Vec<IntellectualProperty> {
        let occupation = input.occupation.unwrap_or("").to_lowercase();
        let mut chance = 0.05;
        if ["engineer", "developer", "artist", "designer"]
            .iter()
            .any(|keyword| occupation.contains(keyword))
        {
            chance = 0.30;
        } else if input.annual_income > 100_000.0 {
            chance = 0.15;
        }
        if !rng.random_bool(chance) {
            return Vec::new();
        }
        let kinds = ["patent", "trademark", "copyright"];
        let count = rng.random_range(1..=2);
        (0..count)
            .map(|_| {
                let kind = pick(rng, &kinds).copied().unwrap_or("copyright");
                let filed = input.today - Duration::days(rng.random_range(180..3_650));
                let granted = if rng.random_bool(0.70) {
                    Some(filed + Duration::days(rng.random_range(180..540)))
                } else {
                    None
                };
                IntellectualProperty {
                    kind: kind.to_string(),
                    title: format!("Filing {:05}", rng.random_range(0..100_000)),
                    filed,
                    granted,
                    expires: granted.map(|date| date + Duration::days(20 * 365)),
                }
            })
            .collect()
    }

    fn risk_score(
        records: &[LegalRecord],
        compliance: &[ComplianceRecord],
        background_check_clear: bool,
    ) -> u8 {
        let mut score = 10_u32;
        for record in records {
            score += match record.severity {
                Severity::High => 30,
                Severity::Medium => 15,
                Severity::Low => 5,
            };
        }
        for record in compliance {
            score += match record.status.as_str() {
                "non_compliant" => 20,
                "pending" => 10,
                _ => 0,
            };
        }
        if !background_check_clear {
            score += 40;
        }
        score.min(100) as u8
    }
}

impl DomainGenerator for LegalGenerator {
    type Input<'a> = LegalInput<'a>;
    type Profile = LegalProfile;

    fn generate(
        &self,
        input: LegalInput<'_>,
        _vary: &Variability,
        rng: &mut ChaCha8Rng,
    ) -> LegalProfile {
        let legal_records = self.legal_records(&input, rng);
        let compliance = self.compliance(&input, rng);
        let licenses = self.licenses(&input, rng);
        let businesses = self.businesses(&input, rng);
        let intellectual_property = self.intellectual_property(&input, rng);

        let background_check_clear = rng.random_bool(0.95);
        let occupation = input.occupation.unwrap_or("").to_lowercase();
        let security_clearance = if occupation.contains("government")
            || occupation.contains("defense")
            || rng.random_bool(0.05)
        {
            Some(
                pick(rng, &["confidential", "secret", "top_secret"])
                    .copied()
                    .unwrap_or("confidential")
                    .to_string(),
            )
        } else {
            None
        };

        let risk_score = Self::risk_score(&legal_records, &compliance, background_check_clear);

        LegalProfile {
            legal_records,
            compliance,
            licenses,
            businesses,
            intellectual_property,
            background_check_clear,
            security_clearance,
            risk_score,
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

    fn profile(age: u32, income: f64, occupation: Option<&str>, seed: u64) -> LegalProfile {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        LegalGenerator.generate(
            LegalInput {
                age,
                annual_income: income,
                occupation,
                today: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            },
            &clean(),
            &mut rng,
        )
    }

    #[test]
    fn tax_compliance_is_universal() {
        for seed in 0..50 {
            let p = profile(40, 60_000.0, None, seed);
            assert!(p.compliance.iter().any(|record| record.area == "tax"));
        }
    }

    #[test]
    fn nurses_carry_hipaa_and_a_license() {
        for seed in 0..50 {
            let p = profile(35, 75_000.0, Some("Registered Nurse"), seed);
            assert!(p.compliance.iter().any(|record| record.regulation == "HIPAA"));
            assert!(p
                .licenses
                .iter()
                .any(|license| license.license_type == "Nursing License"));
        }
    }

    #[test]
    fn case_numbers_match_filing_year() {
        for seed in 0..200 {
            for record in profile(45, 40_000.0, None, seed).legal_records {
                let year: i32 = record.case_number[..4].parse().unwrap();
                assert_eq!(year, record.filed.year());
            }
        }
    }

    #[test]
    fn risk_score_reflects_record_severity() {
        let records = vec![LegalRecord {
            record_type: "bankruptcy".to_string(),
            title: "bankruptcy".to_string(),
            case_number: "2020-000001".to_string(),
            filed: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            status: "closed".to_string(),
            severity: Severity::High,
            financial_impact: 50_000.0,
            resolved: None,
            outcome: None,
        }];
        assert_eq!(LegalGenerator::risk_score(&records, &[], true), 40);
        assert_eq!(LegalGenerator::risk_score(&records, &[], false), 80);
        assert_eq!(LegalGenerator::risk_score(&[], &[], true), 10);
    }

    #[test]
    fn risk_score_is_capped() {
        let record = LegalRecord {
            record_type: "tax_lien".to_string(),
            title: "tax lien".to_string(),
            case_number: "2019-000002".to_string(),
            filed: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
            status: "pending".to_string(),
            severity: Severity::High,
            financial_impact: 80_000.0,
            resolved: None,
            outcome: None,
        };
        let records = vec![record.clone(), record.clone(), record.clone(), record];
        assert_eq!(LegalGenerator::risk_score(&records, &[], false), 100);
    }

    #[test]
    fn engineers_file_more_ip() {
        let mut engineer_filings = 0;
        let mut baseline_filings = 0;
        for seed in 0..300 {
            if !profile(40, 80_000.0, Some("Software Engineer"), seed)
                .intellectual_property
                .is_empty()
            {
                engineer_filings += 1;
            }
            if !profile(40, 80_000.0, Some("Cashier"), seed + 10_000)
                .intellectual_property
                .is_empty()
            {
                baseline_filings += 1;
            }
        }
        assert!(
            engineer_filings > baseline_filings * 2,
            "engineer {engineer_filings} baseline {baseline_filings}"
        );
    }
}
