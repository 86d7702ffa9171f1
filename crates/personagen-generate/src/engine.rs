//! Person composition engine.
//!
//! Owns the seeded RNG and the variability engine, and sequences the domain
//! generators so downstream profiles see upstream outputs: the current
//! address feeds area codes and cost of living, the base salary feeds
//! employment and education, the credit score feeds banking.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};
use uuid::Uuid;

use personagen_config::GenerationConfig;
use personagen_core::sampling::{sample_distinct, weighted_choice};
use personagen_core::{
    ActivityLevel, Address, AddressType, EmergencyContact, Gender, MaritalStatus, Person,
};

use crate::generators::address::AddressInput;
use crate::generators::banking::BankingInput;
use crate::generators::communication::CommunicationInput;
use crate::generators::contact::ContactInput;
use crate::generators::education::EducationInput;
use crate::generators::employment::{industry_names, EmploymentInput};
use crate::generators::financial::FinancialInput;
use crate::generators::legal::LegalInput;
use crate::generators::lifestyle::LifestyleInput;
use crate::generators::medical::MedicalInput;
use crate::generators::name::NameInput;
use crate::generators::physical::PhysicalInput;
use crate::generators::social::SocialInput;
use crate::generators::travel::TravelInput;
use crate::generators::vehicle::VehicleInput;
use crate::generators::{
    AddressGenerator, BankingGenerator, CommunicationGenerator, ContactGenerator,
    DomainGenerator, EducationGenerator, EmploymentGenerator, FinancialGenerator, LegalGenerator,
    LifestyleGenerator, MedicalGenerator, NameGenerator, PhysicalGenerator, SocialGenerator,
    TravelGenerator, VehicleGenerator,
};
use crate::variability::{ValueKind, Variability};

/// Nine adult age brackets with population weights.
const AGE_BRACKETS: &[(u32, u32, f64)] = &[
    (18, 24, 0.09),
    (25, 29, 0.09),
    (30, 39, 0.18),
    (40, 49, 0.17),
    (50, 59, 0.16),
    (60, 69, 0.14),
    (70, 79, 0.10),
    (80, 84, 0.05),
    (85, 95, 0.02),
];

const GENDER_WEIGHTS: &[(Gender, f64)] = &[
    (Gender::Male, 0.495),
    (Gender::Female, 0.495),
    (Gender::Other, 0.005),
    (Gender::Unknown, 0.005),
];

/// Relationship kinds derivable from a base person.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipKind {
    Spouse,
    Child,
    Sibling,
    Roommate,
}

/// Single-threaded composition engine; one instance per worker partition.
pub struct PersonEngine {
    config: GenerationConfig,
    rng: ChaCha8Rng,
    vary: Variability,
    today: NaiveDate,
    name_gen: NameGenerator,
    address_gen: AddressGenerator,
    contact_gen: ContactGenerator,
    employment_gen: EmploymentGenerator,
    financial_gen: FinancialGenerator,
    physical_gen: PhysicalGenerator,
    medical_gen: MedicalGenerator,
    vehicle_gen: VehicleGenerator,
    education_gen: EducationGenerator,
    social_gen: SocialGenerator,
    lifestyle_gen: LifestyleGenerator,
    travel_gen: TravelGenerator,
    banking_gen: BankingGenerator,
    communication_gen: CommunicationGenerator,
    legal_gen: LegalGenerator,
}

impl PersonEngine {
    pub fn new(config: GenerationConfig) -> Self {
        let seed = config.seed;
        Self::with_seed(config, seed)
    }

    /// Engine seeded independently of the config's base seed; the batch
    /// driver uses `base_seed + worker_index` per partition.
    pub fn with_seed(config: GenerationConfig, seed: u64) -> Self {
        debug!(seed, "person engine initialized");
        Self {
            vary: Variability::new(config.data_quality),
            rng: ChaCha8Rng::seed_from_u64(seed),
            today: Utc::now().date_naive(),
            config,
            name_gen: NameGenerator,
            address_gen: AddressGenerator,
            contact_gen: ContactGenerator,
            employment_gen: EmploymentGenerator,
            financial_gen: FinancialGenerator,
            physical_gen: PhysicalGenerator,
            medical_gen: MedicalGenerator,
            vehicle_gen: VehicleGenerator,
            education_gen: EducationGenerator,
            social_gen: SocialGenerator,
            lifestyle_gen: LifestyleGenerator,
            travel_gen: TravelGenerator,
            banking_gen: BankingGenerator,
            communication_gen: CommunicationGenerator,
            legal_gen: LegalGenerator,
        }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    fn draw_age(&mut self) -> u32 {
        let weights: Vec<(usize, f64)> = AGE_BRACKETS
            .iter()
            .enumerate()
            .map(|(index, (_, _, weight))| (index, *weight))
            .collect();
        let index = weighted_choice(&mut self.rng, &weights).copied().unwrap_or(2);
        let (low, high, _) = AGE_BRACKETS[index];
        self.rng.random_range(low..=high)
    }

    fn birth_date_for(&mut self, age: u32) -> (NaiveDate, u32) {
        let days_low = i64::from(age) * 365 + i64::from(age) / 4 + 1;
        let days_high = i64::from(age + 1) * 365 + i64::from(age + 1) / 4 - 1;
        let date_of_birth = self.today - Duration::days(self.rng.random_range(days_low..days_high));
        // Recompute from the calendar so the stored age is exact.
        let mut exact = self.today.year() - date_of_birth.year();
        if (self.today.month(), self.today.day()) < (date_of_birth.month(), date_of_birth.day()) {
            exact -= 1;
        }
        (date_of_birth, exact.max(0) as u32)
    }

    fn draw_marital_status(&mut self, age: u32) -> MaritalStatus {
        use MaritalStatus::*;
        let weights: &[(MaritalStatus, f64)] = match age {
            0..=17 => return Single,
            18..=24 => &[(Single, 0.85), (Married, 0.08), (Partnership, 0.07)],
            25..=34 => &[(Single, 0.45), (Married, 0.40), (Partnership, 0.10), (Divorced, 0.05)],
            35..=54 => &[(Single, 0.18), (Married, 0.58), (Partnership, 0.08), (Divorced, 0.16)],
            55..=69 => &[
                (Single, 0.08),
                (Married, 0.60),
                (Divorced, 0.20),
                (Widowed, 0.10),
                (Partnership, 0.02),
            ],
            _ => &[(Single, 0.04), (Married, 0.42), (Divorced, 0.14), (Widowed, 0.40)],
        };
        weighted_choice(&mut self.rng, weights).copied().unwrap_or(Single)
    }

    fn generate_ssn(&mut self) -> Option<String> {
        let mut area = self.rng.random_range(100..900);
        if area == 666 {
            area = 667;
        }
        let ssn = format!(
            "{area:03}-{:02}-{:04}",
            self.rng.random_range(10..100),
            self.rng.random_range(0..10_000)
        );
        let ssn = self.vary.vary_format(&mut self.rng, &ssn, ValueKind::Ssn);
        self.vary.make_missing(&mut self.rng, ssn, false)
    }

    fn address_history(&mut self, age: u32) -> Vec<Address> {
        let limits = self.config.cardinality;
        let max = limits.addresses_max.max(limits.addresses_min).max(1);
        let count = if self.config.features.temporal_correlation {
            self.rng.random_range(limits.addresses_min.max(1)..=max)
        } else {
            1
        };
        // Young people have not had time for a deep address history.
        let count = if age < 22 { count.min(2) } else { count };

        let mut addresses = vec![self.address_gen.generate(
            AddressInput {
                address_type: AddressType::Current,
                today: self.today,
                previous_count: 0,
            },
            &self.vary,
            &mut self.rng,
        )];
        for previous in 0..count.saturating_sub(1) {
            addresses.push(self.address_gen.generate(
                AddressInput {
                    address_type: AddressType::Previous,
                    today: self.today,
                    previous_count: previous,
                },
                &self.vary,
                &mut self.rng,
            ));
        }
        addresses
    }

    fn pick_industries(&mut self) -> Vec<String> {
        let names = industry_names();
        let count = self.rng.random_range(1..=3);
        sample_distinct(&mut self.rng, &names, count)
            .into_iter()
            .map(|name| (*name).to_string())
            .collect()
    }

    fn emergency_contact(&mut self, last_name: &str) -> EmergencyContact {
        let firsts = ["Maria", "James", "Linda", "Robert", "Susan", "David"];
        let relationships = ["spouse", "parent", "sibling", "friend"];
        let first = firsts[self.rng.random_range(0..firsts.len())];
        let relationship = relationships[self.rng.random_range(0..relationships.len())];
        EmergencyContact {
            name: format!("{first} {last_name}"),
            relationship: relationship.to_string(),
            phone: format!(
                "{}-{:03}-{:04}",
                self.rng.random_range(200..990),
                self.rng.random_range(100..1_000),
                self.rng.random_range(0..10_000)
            ),
        }
    }

    /// One fully composed person with a freshly drawn age bracket.
    pub fn generate_person(&mut self) -> Person {
        let age = self.draw_age();
        self.generate_person_aged(age)
    }

    /// One person at a requested age; relationship derivation uses this to
    /// place relatives in the right life stage.
    pub fn generate_person_aged(&mut self, age: u32) -> Person {
        let (date_of_birth, age) = self.birth_date_for(age);
        let gender = weighted_choice(&mut self.rng, GENDER_WEIGHTS)
            .copied()
            .unwrap_or(Gender::Unknown);
        let marital_status = self.draw_marital_status(age);

        let name_bundle = self.name_gen.generate(
            NameInput {
                gender,
                birth_year: date_of_birth.year(),
                age,
                marital_status,
            },
            &self.vary,
            &mut self.rng,
        );
        let ssn = self.generate_ssn();

        let addresses = self.address_history(age);
        let state = addresses
            .iter()
            .find(|address| address.address_type == AddressType::Current)
            .map(|address| address.state.clone());

        let industries = self.pick_industries();
        let base_salary = if age >= 18 {
            self.financial_gen.generate_income(
                &mut self.rng,
                age,
                &industries[0],
                if self.config.features.geographic_correlation {
                    state.as_deref()
                } else {
                    None
                },
            )
        } else {
            0.0
        };
        let employment_history = if age >= 18 {
            let max_jobs = if self.config.features.temporal_correlation {
                self.config.cardinality.jobs_max
            } else {
                1
            };
            self.employment_gen.generate(
                EmploymentInput {
                    age,
                    industries: &industries,
                    base_salary,
                    today: self.today,
                    max_jobs,
                },
                &self.vary,
                &mut self.rng,
            )
        } else {
            Vec::new()
        };
        let current_job = employment_history.iter().find(|job| job.is_current);
        let employer = current_job.map(|job| job.employer.clone());
        let job_title = current_job.map(|job| job.job_title.clone());
        let current_industry = current_job.map(|job| job.industry.clone());
        let employment_stable = current_job.is_some();

        let limits = self.config.cardinality;
        let contact_bundle = self.contact_gen.generate(
            ContactInput {
                first_name: &name_bundle.name.first,
                last_name: &name_bundle.name.last,
                birth_year: date_of_birth.year(),
                state: if self.config.features.geographic_correlation {
                    state.as_deref()
                } else {
                    None
                },
                employer: employer.as_deref(),
                phone_count: self
                    .rng
                    .random_range(limits.phones_min.max(1)..=limits.phones_max.max(1)),
                email_count: self
                    .rng
                    .random_range(limits.emails_min.max(1)..=limits.emails_max.max(1)),
            },
            &self.vary,
            &mut self.rng,
        );

        let financial = if age >= 18 && self.config.features.financial_correlation {
            Some(self.financial_gen.generate(
                FinancialInput {
                    age,
                    annual_income: base_salary,
                    industry: current_industry.as_deref(),
                    state: state.as_deref(),
                    employment_stable,
                },
                &self.vary,
                &mut self.rng,
            ))
        } else {
            None
        };

        let physical = self
            .physical_gen
            .generate(PhysicalInput { gender, age }, &self.vary, &mut self.rng);

        let medical = if age >= 18 {
            let emergency = self.emergency_contact(&name_bundle.name.last);
            Some(self.medical_gen.generate(
                MedicalInput {
                    age,
                    gender,
                    bmi: physical.bmi,
                    employed: employment_stable,
                    today: self.today,
                    emergency_contact: &emergency,
                },
                &self.vary,
                &mut self.rng,
            ))
        } else {
            None
        };

        let education = self.education_gen.generate(
            EducationInput {
                age,
                annual_income: base_salary,
                today: self.today,
            },
            &self.vary,
            &mut self.rng,
        );

        let vehicles = if age >= 16 {
            Some(self.vehicle_gen.generate(
                VehicleInput {
                    age,
                    annual_income: base_salary,
                    state: state.as_deref(),
                    today: self.today,
                },
                &self.vary,
                &mut self.rng,
            ))
        } else {
            None
        };

        let primary_email = contact_bundle
            .emails
            .iter()
            .find(|email| email.is_primary)
            .map(|email| email.address.clone());
        let online_presence = if age >= 13 {
            Some(self.social_gen.generate(
                SocialInput {
                    age,
                    first_name: &name_bundle.name.first,
                    last_name: &name_bundle.name.last,
                    primary_email: primary_email.as_deref(),
                    today: self.today,
                },
                &self.vary,
                &mut self.rng,
            ))
        } else {
            None
        };

        let lifestyle = self.lifestyle_gen.generate(
            LifestyleInput {
                age,
                annual_income: base_salary,
                marital_status,
            },
            &self.vary,
            &mut self.rng,
        );

        let (travel, banking, communication, legal) = if age >= 18 {
            let travel = self.travel_gen.generate(
                TravelInput {
                    age,
                    annual_income: base_salary,
                    today: self.today,
                },
                &self.vary,
                &mut self.rng,
            );
            // Banking needs a credit score even when the financial profile
            // is toggled off.
            let credit_score = financial
                .as_ref()
                .map(|profile| profile.credit_score)
                .unwrap_or_else(|| self.rng.random_range(550..=800));
            let banking = self.banking_gen.generate(
                BankingInput {
                    age,
                    annual_income: base_salary,
                    credit_score,
                    lifestyle: lifestyle.category,
                    today: self.today,
                },
                &self.vary,
                &mut self.rng,
            );
            let activity = online_presence
                .as_ref()
                .map(|presence| presence.activity_level)
                .unwrap_or(ActivityLevel::Medium);
            let communication = self.communication_gen.generate(
                CommunicationInput {
                    age,
                    activity,
                    has_partner: matches!(
                        marital_status,
                        MaritalStatus::Married | MaritalStatus::Partnership
                    ),
                    today: self.today,
                },
                &self.vary,
                &mut self.rng,
            );
            let legal = self.legal_gen.generate(
                LegalInput {
                    age,
                    annual_income: base_salary,
                    occupation: job_title.as_deref(),
                    today: self.today,
                },
                &self.vary,
                &mut self.rng,
            );
            (Some(travel), Some(banking), Some(communication), Some(legal))
        } else {
            (None, None, None, None)
        };

        let person = Person {
            id: Uuid::from_u128(self.rng.random()),
            ssn,
            name: name_bundle.name,
            date_of_birth,
            age,
            gender,
            marital_status,
            cultural_background: name_bundle.cultural_background,
            addresses,
            phone_numbers: contact_bundle.phones,
            email_addresses: contact_bundle.emails,
            employment_history,
            financial,
            medical,
            vehicles,
            education,
            online_presence,
            physical,
            lifestyle,
            travel,
            banking,
            communication,
            legal,
        };
        debug!(person_id = %person.id, age = person.age, "person composed");
        person
    }

    /// Derives a relative from a base person: a fresh generation at a
    /// compatible age with surname and address overwritten per the
    /// relationship. Unmeetable preconditions fall back to an unrelated
    /// person.
    pub fn generate_related_person(&mut self, base: &Person, kind: RelationshipKind) -> Person {
        let target_age = match kind {
            RelationshipKind::Spouse => {
                let delta = self.rng.random_range(-5_i64..=5);
                (i64::from(base.age) + delta).max(18) as u32
            }
            RelationshipKind::Child => {
                if base.age < 19 {
                    return self.generate_person();
                }
                let gap = self.rng.random_range(18..=40).min(base.age - 1);
                base.age - gap
            }
            RelationshipKind::Sibling | RelationshipKind::Roommate => {
                let delta = self.rng.random_range(-10_i64..=10);
                (i64::from(base.age) + delta).max(18) as u32
            }
        };

        let mut relative = self.generate_person_aged(target_age);

        let share_surname = match kind {
            RelationshipKind::Spouse => self.rng.random_bool(0.70),
            RelationshipKind::Child | RelationshipKind::Sibling => true,
            RelationshipKind::Roommate => false,
        };
        if share_surname {
            relative.name.last = base.name.last.clone();
        }

        let share_address = match kind {
            RelationshipKind::Spouse | RelationshipKind::Roommate => true,
            RelationshipKind::Child => relative.age < 18 || self.rng.random_bool(0.3),
            RelationshipKind::Sibling => false,
        };
        if share_address {
            if let Some(shared) = base.current_address() {
                let mut shared = shared.clone();
                shared.id = Uuid::from_u128(self.rng.random());
                match relative
                    .addresses
                    .iter_mut()
                    .find(|address| address.address_type == AddressType::Current)
                {
                    Some(current) => *current = shared,
                    None => relative.addresses.insert(0, shared),
                }
            }
        }
        relative
    }

    /// Assembles family clusters: a head of household, a spouse with 70%
    /// probability, and 0-4 children when the head is over 25.
    pub fn create_family_clusters(&mut self, num_families: usize) -> Vec<Vec<Person>> {
        let mut clusters = Vec::with_capacity(num_families);
        for _ in 0..num_families {
            let head = self.generate_person();
            let mut family = vec![head];
            if self.config.features.relationships {
                if self.rng.random_bool(0.70) {
                    let spouse = self.generate_related_person(&family[0], RelationshipKind::Spouse);
                    family.push(spouse);
                }
                if family[0].age > 25 {
                    let child_count = weighted_choice(
                        &mut self.rng,
                        &[(0_usize, 0.20), (1, 0.30), (2, 0.35), (3, 0.10), (4, 0.05)],
                    )
                    .copied()
                    .unwrap_or(0);
                    for _ in 0..child_count {
                        let child =
                            self.generate_related_person(&family[0], RelationshipKind::Child);
                        family.push(child);
                    }
                }
            }
            clusters.push(family);
        }
        info!(
            families = clusters.len(),
            people = clusters.iter().map(Vec::len).sum::<usize>(),
            "family clusters assembled"
        );
        clusters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use personagen_config::DataQualityProfile;

    fn clean_config(seed: u64) -> GenerationConfig {
        GenerationConfig {
            seed,
            data_quality: DataQualityProfile::clean(),
            ..GenerationConfig::default()
        }
    }

    #[test]
    fn same_seed_is_bit_identical() {
        let mut first = PersonEngine::new(clean_config(7));
        let mut second = PersonEngine::new(clean_config(7));
        for _ in 0..10 {
            assert_eq!(first.generate_person(), second.generate_person());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut first = PersonEngine::new(clean_config(1));
        let mut second = PersonEngine::new(clean_config(2));
        assert_ne!(first.generate_person(), second.generate_person());
    }

    #[test]
    fn exactly_one_current_address() {
        let mut engine = PersonEngine::new(clean_config(11));
        for _ in 0..100 {
            let person = engine.generate_person();
            let current = person
                .addresses
                .iter()
                .filter(|address| address.address_type == AddressType::Current)
                .count();
            assert_eq!(current, 1);
        }
    }

    #[test]
    fn at_most_one_primary_phone_and_email() {
        let mut engine = PersonEngine::new(clean_config(13));
        for _ in 0..100 {
            let person = engine.generate_person();
            assert!(person.phone_numbers.iter().filter(|p| p.is_primary).count() <= 1);
            assert!(person.email_addresses.iter().filter(|e| e.is_primary).count() <= 1);
        }
    }

    #[test]
    fn employment_sorted_with_one_current() {
        let mut engine = PersonEngine::new(clean_config(17));
        for _ in 0..100 {
            let person = engine.generate_person();
            assert!(
                person
                    .employment_history
                    .iter()
                    .filter(|job| job.is_current)
                    .count()
                    <= 1
            );
            for pair in person.employment_history.windows(2) {
                assert!(pair[0].start_date >= pair[1].start_date);
            }
        }
    }

    #[test]
    fn minors_skip_adult_profiles() {
        let mut engine = PersonEngine::new(clean_config(19));
        let person = engine.generate_person_aged(15);
        assert!(person.age < 18);
        assert!(person.employment_history.is_empty());
        assert!(person.financial.is_none());
        assert!(person.medical.is_none());
        assert!(person.vehicles.is_none());
        assert!(person.banking.is_none());
        assert!(person.legal.is_none());
        // 13-15 still gets an online presence.
        assert!(person.online_presence.is_some());
    }

    #[test]
    fn under_thirteen_has_no_online_presence() {
        let mut engine = PersonEngine::new(clean_config(23));
        let person = engine.generate_person_aged(10);
        assert!(person.online_presence.is_none());
        assert!(person.vehicles.is_none());
    }

    #[test]
    fn birth_date_matches_age() {
        let mut engine = PersonEngine::new(clean_config(29));
        for _ in 0..200 {
            let person = engine.generate_person();
            assert!(person.date_of_birth < engine.today);
            assert!((18..=96).contains(&person.age));
        }
    }

    #[test]
    fn spouse_shares_surname_most_of_the_time() {
        let mut engine = PersonEngine::new(clean_config(31));
        let mut shared = 0;
        for _ in 0..100 {
            let base = engine.generate_person();
            let spouse = engine.generate_related_person(&base, RelationshipKind::Spouse);
            if spouse.name.last == base.name.last {
                shared += 1;
            }
            // One year of slack for calendar boundary effects.
            assert!(i64::from(spouse.age) - i64::from(base.age) <= 6 || spouse.age <= 19);
        }
        assert!((55..=85).contains(&shared), "shared {shared}");
    }

    #[test]
    fn children_are_at_least_eighteen_years_younger() {
        let mut engine = PersonEngine::new(clean_config(37));
        for _ in 0..50 {
            let base = engine.generate_person_aged(45);
            let child = engine.generate_related_person(&base, RelationshipKind::Child);
            assert!(child.age + 18 <= base.age + 1, "child {} base {}", child.age, base.age);
            assert_eq!(child.name.last, base.name.last);
        }
    }

    #[test]
    fn young_base_falls_back_to_unrelated_person() {
        let mut engine = PersonEngine::new(clean_config(41));
        let base = engine.generate_person_aged(18);
        // No panic, no impossible negative age.
        let other = engine.generate_related_person(&base, RelationshipKind::Child);
        assert!(other.age <= 96);
    }

    #[test]
    fn family_cluster_has_head_first() {
        let mut engine = PersonEngine::new(clean_config(43));
        let clusters = engine.create_family_clusters(5);
        assert_eq!(clusters.len(), 5);
        for family in &clusters {
            assert!(!family.is_empty());
            for child in family.iter().skip(1).filter(|member| member.age < 18) {
                assert_eq!(child.name.last, family[0].name.last);
            }
        }
    }

    #[test]
    fn relationships_toggle_disables_clusters() {
        let mut config = clean_config(47);
        config.features.relationships = false;
        let mut engine = PersonEngine::new(config);
        for family in engine.create_family_clusters(5) {
            assert_eq!(family.len(), 1);
        }
    }

    #[test]
    fn financial_toggle_removes_profile_but_not_banking() {
        let mut config = clean_config(53);
        config.features.financial_correlation = false;
        let mut engine = PersonEngine::new(config);
        let person = engine.generate_person_aged(40);
        assert!(person.financial.is_none());
        assert!(person.banking.is_some());
    }
}
