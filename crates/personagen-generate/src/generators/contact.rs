//! Phone and email synthesis keyed by state, age and employer.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use personagen_core::sampling::{pick, weighted_choice};
use personagen_core::{EmailAddress, EmailType, PhoneNumber, PhoneType};

use super::DomainGenerator;
use crate::variability::{ValueKind, Variability};

/// Area codes by state; anything off-table falls back to the national pool.
const AREA_CODES: &[(&str, &[&str])] = &[
    ("CA", &["213", "310", "415", "510", "619", "916"]),
    ("TX", &["214", "281", "512", "713", "817", "915"]),
    ("NY", &["212", "315", "516", "585", "716", "914"]),
    ("FL", &["305", "321", "407", "561", "813", "904"]),
    ("IL", &["217", "312", "618", "630", "708", "773"]),
    ("PA", &["215", "412", "570", "610", "717", "814"]),
    ("OH", &["216", "330", "419", "513", "614", "937"]),
    ("GA", &["229", "404", "478", "678", "706", "912"]),
    ("WA", &["206", "253", "360", "425", "509", "564"]),
    ("CO", &["303", "719", "720", "970", "983", "303"]),
];

const NATIONAL_AREA_CODES: &[&str] = &["202", "302", "402", "505", "605", "701", "802", "907"];

/// Personal email domains weighted per birth-year cohort.
const DOMAINS_OLDER: &[(&str, f64)] = &[
    ("aol.com", 0.30),
    ("yahoo.com", 0.25),
    ("hotmail.com", 0.20),
    ("gmail.com", 0.20),
    ("comcast.net", 0.05),
];
const DOMAINS_MIDDLE: &[(&str, f64)] = &[
    ("gmail.com", 0.40),
    ("yahoo.com", 0.25),
    ("hotmail.com", 0.20),
    ("outlook.com", 0.10),
    ("icloud.com", 0.05),
];
const DOMAINS_YOUNGER: &[(&str, f64)] = &[
    ("gmail.com", 0.55),
    ("icloud.com", 0.20),
    ("outlook.com", 0.15),
    ("yahoo.com", 0.10),
];

pub struct ContactInput<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub birth_year: i32,
    /// Current state, when an address exists.
    pub state: Option<&'a str>,
    /// Current employer, for work email domains.
    pub employer: Option<&'a str>,
    pub phone_count: u32,
    pub email_count: u32,
}

pub struct ContactBundle {
    pub phones: Vec<PhoneNumber>,
    pub emails: Vec<EmailAddress>,
}

pub struct ContactGenerator;

impl ContactGenerator {
    fn area_code(state: Option<&str>, rng: &mut ChaCha8Rng) -> &'static str {
        let pool = state
            .and_then(|state| {
                AREA_CODES
                    .iter()
                    .find(|(code_state, _)| *code_state == state)
                    .map(|(_, codes)| *codes)
            })
            .unwrap_or(NATIONAL_AREA_CODES);
        pick(rng, pool).copied().unwrap_or("202")
    }

    fn phone_number(state: Option<&str>, rng: &mut ChaCha8Rng) -> String {
        let area = Self::area_code(state, rng);
        format!(
            "{area}-{:03}-{:04}",
            rng.random_range(200..1_000),
            rng.random_range(0..10_000)
        )
    }

    fn domain_pool(birth_year: i32) -> &'static [(&'static str, f64)] {
        if birth_year < 1965 {
            DOMAINS_OLDER
        } else if birth_year < 1990 {
            DOMAINS_MIDDLE
        } else {
            DOMAINS_YOUNGER
        }
    }

    fn local_part(first: &str, last: &str, birth_year: i32, rng: &mut ChaCha8Rng) -> String {
        let first = first.to_lowercase();
        let last = last.to_lowercase();
        let first_initial = first.chars().next().unwrap_or('x');
        match rng.random_range(0..5_u8) {
            0 => format!("{first}.{last}"),
            1 => format!("{first}{last}"),
            2 => format!("{first_initial}{last}"),
            3 => format!("{first}.{last}{}", birth_year % 100),
            _ => format!("{first}{}", rng.random_range(1..1_000)),
        }
    }

    fn employer_domain(employer: &str) -> String {
        let slug: String = employer
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        if slug.is_empty() {
            "example.com".to_string()
        } else {
            format!("{slug}.com")
        }
    }
}

impl DomainGenerator for ContactGenerator {
    type Input<'a> = ContactInput<'a>;
    type Profile = ContactBundle;

    fn generate(
        &self,
        input: ContactInput<'_>,
        vary: &Variability,
        rng: &mut ChaCha8Rng,
    ) -> ContactBundle {
        let mut phones = Vec::new();
        for index in 0..input.phone_count {
            let phone_type = match index {
                0 => PhoneType::Mobile,
                1 => {
                    if rng.random_bool(0.6) {
                        PhoneType::Home
                    } else {
                        PhoneType::Work
                    }
                }
                _ => PhoneType::Work,
            };
            let mut number = Self::phone_number(input.state, rng);
            number = vary.vary_format(rng, &number, ValueKind::Phone);
            number = vary.create_outlier(rng, &number, ValueKind::Phone);
            phones.push(PhoneNumber {
                number,
                phone_type,
                is_primary: index == 0,
                can_receive_sms: phone_type == PhoneType::Mobile,
            });
        }

        let mut emails = Vec::new();
        for index in 0..input.email_count {
            let work = index > 0 && input.employer.is_some() && rng.random_bool(0.5);
            let (address, email_type) = if work {
                let domain = input
                    .employer
                    .map(Self::employer_domain)
                    .unwrap_or_else(|| "example.com".to_string());
                let local =
                    Self::local_part(input.first_name, input.last_name, input.birth_year, rng);
                (format!("{local}@{domain}"), EmailType::Work)
            } else {
                let domain = weighted_choice(rng, Self::domain_pool(input.birth_year))
                    .copied()
                    .unwrap_or("gmail.com");
                let local =
                    Self::local_part(input.first_name, input.last_name, input.birth_year, rng);
                (format!("{local}@{domain}"), EmailType::Personal)
            };
            let address = vary.create_outlier(rng, &address, ValueKind::Email);
            emails.push(EmailAddress {
                address,
                email_type,
                is_primary: index == 0,
                is_verified: rng.random_bool(0.8),
            });
        }

        ContactBundle { phones, emails }
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

    fn input(phone_count: u32, email_count: u32) -> ContactInput<'static> {
        ContactInput {
            first_name: "Jordan",
            last_name: "Miller",
            birth_year: 1988,
            state: Some("WA"),
            employer: Some("Evergreen Logistics"),
            phone_count,
            email_count,
        }
    }

    #[test]
    fn one_primary_phone_and_email() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let vary = clean();
        let bundle = ContactGenerator.generate(input(3, 3), &vary, &mut rng);
        assert_eq!(bundle.phones.iter().filter(|p| p.is_primary).count(), 1);
        assert_eq!(bundle.emails.iter().filter(|e| e.is_primary).count(), 1);
    }

    #[test]
    fn area_code_comes_from_state_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let vary = clean();
        let wa_codes = AREA_CODES
            .iter()
            .find(|(state, _)| *state == "WA")
            .map(|(_, codes)| *codes)
            .unwrap();
        for _ in 0..30 {
            let bundle = ContactGenerator.generate(input(1, 0), &vary, &mut rng);
            let area = &bundle.phones[0].number[..3];
            assert!(wa_codes.contains(&area), "area {area} not in WA pool");
        }
    }

    #[test]
    fn unknown_state_falls_back_to_national_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let vary = clean();
        let mut contact = input(1, 0);
        contact.state = None;
        let bundle = ContactGenerator.generate(contact, &vary, &mut rng);
        let area = &bundle.phones[0].number[..3];
        assert!(NATIONAL_AREA_CODES.contains(&area));
    }

    #[test]
    fn email_contains_name_material() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let vary = clean();
        let bundle = ContactGenerator.generate(input(0, 1), &vary, &mut rng);
        let address = &bundle.emails[0].address;
        assert!(address.contains('@'));
        assert!(
            address.contains("jordan") || address.contains("miller"),
            "unexpected local part: {address}"
        );
    }
}
