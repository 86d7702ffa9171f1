//! Address synthesis over a real city/state/zip-prefix table.
//!
//! The geography table is shared with the contact generator (area codes)
//! and travel generator (domestic destinations).

use chrono::{Duration, NaiveDate};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use personagen_core::sampling::{pick, weighted_choice};
use personagen_core::{Address, AddressStyle, AddressType};

use super::DomainGenerator;
use crate::variability::Variability;

/// City, zip prefix pairs per state.
pub(crate) const STATE_CITIES: &[(&str, &[(&str, &str)])] = &[
    ("CA", &[("Los Angeles", "900"), ("San Diego", "921"), ("San Jose", "951"), ("San Francisco", "941"), ("Sacramento", "958")]),
    ("TX", &[("Houston", "770"), ("San Antonio", "782"), ("Dallas", "752"), ("Austin", "787"), ("Fort Worth", "761")]),
    ("NY", &[("New York", "100"), ("Buffalo", "142"), ("Rochester", "146"), ("Syracuse", "132"), ("Albany", "122")]),
    ("FL", &[("Jacksonville", "322"), ("Miami", "331"), ("Tampa", "336"), ("Orlando", "328"), ("St. Petersburg", "337")]),
    ("IL", &[("Chicago", "606"), ("Aurora", "605"), ("Naperville", "605"), ("Joliet", "604"), ("Rockford", "611")]),
    ("PA", &[("Philadelphia", "191"), ("Pittsburgh", "152"), ("Allentown", "181"), ("Erie", "165"), ("Reading", "196")]),
    ("OH", &[("Columbus", "432"), ("Cleveland", "441"), ("Cincinnati", "452"), ("Toledo", "436"), ("Akron", "443")]),
    ("GA", &[("Atlanta", "303"), ("Augusta", "309"), ("Columbus", "319"), ("Savannah", "314"), ("Athens", "306")]),
    ("WA", &[("Seattle", "981"), ("Spokane", "992"), ("Tacoma", "984"), ("Vancouver", "986"), ("Bellevue", "980")]),
    ("CO", &[("Denver", "802"), ("Colorado Springs", "809"), ("Aurora", "800"), ("Fort Collins", "805"), ("Boulder", "803")]),
];

const STREET_NAMES: &[&str] = &[
    "Main", "Oak", "Maple", "Cedar", "Park", "Pine", "Elm", "Washington", "Lake", "Hill",
    "Sunset", "Jefferson", "Lincoln", "Madison", "Jackson", "Franklin", "River", "Highland",
    "Willow", "Meadow",
];

const STREET_TYPES: &[&str] = &["St", "Ave", "Dr", "Ln", "Rd", "Blvd", "Ct", "Way", "Pl", "Ter"];

const UNIT_PREFIXES: &[&str] = &["Apt", "Unit", "Suite", "#"];

const STYLE_WEIGHTS: &[(AddressStyle, f64)] = &[
    (AddressStyle::Standard, 0.85),
    (AddressStyle::PoBox, 0.08),
    (AddressStyle::RuralRoute, 0.04),
    (AddressStyle::Military, 0.03),
];

const MILITARY_STATES: &[&str] = &["AE", "AP", "AA"];

/// Uniform draw over the geography table: (state, city, zip prefix).
pub(crate) fn random_city(rng: &mut ChaCha8Rng) -> (&'static str, &'static str, &'static str) {
    let (state, cities) = &STATE_CITIES[rng.random_range(0..STATE_CITIES.len())];
    let (city, prefix) = cities[rng.random_range(0..cities.len())];
    (state, city, prefix)
}

pub(crate) fn all_states() -> Vec<&'static str> {
    STATE_CITIES.iter().map(|(state, _)| *state).collect()
}

pub struct AddressInput {
    pub address_type: AddressType,
    pub today: NaiveDate,
    /// How many previous addresses exist already; pushes older histories
    /// further back in time.
    pub previous_count: u32,
}

pub struct AddressGenerator;

impl AddressGenerator {
    fn zip_code(prefix: &str, rng: &mut ChaCha8Rng) -> String {
        let zip5 = format!("{prefix}{:02}", rng.random_range(0..100));
        if rng.random_bool(0.30) {
            format!("{zip5}-{:04}", rng.random_range(0..10_000))
        } else {
            zip5
        }
    }

    fn standard_lines(rng: &mut ChaCha8Rng) -> (String, Option<String>) {
        let number = rng.random_range(1..9_999);
        let name = pick(rng, STREET_NAMES).copied().unwrap_or("Main");
        let street_type = pick(rng, STREET_TYPES).copied().unwrap_or("St");
        let line1 = format!("{number} {name} {street_type}");
        let line2 = if rng.random_bool(0.25) {
            let prefix = pick(rng, UNIT_PREFIXES).copied().unwrap_or("Apt");
            Some(format!("{prefix} {}", rng.random_range(1..999)))
        } else {
            None
        };
        (line1, line2)
    }

    fn effective_window(
        address_type: AddressType,
        today: NaiveDate,
        previous_count: u32,
        rng: &mut ChaCha8Rng,
    ) -> (NaiveDate, Option<NaiveDate>) {
        match address_type {
            AddressType::Current => {
                let days_back = rng.random_range(30..=1825);
                (today - Duration::days(days_back), None)
            }
            AddressType::Previous => {
                // Each older entry starts further back so histories do not
                // pile onto the same window.
                let base_years = 2 + i64::from(previous_count) * 2;
                let years_back = rng.random_range(base_years..=base_years + 13);
                let start = today - Duration::days(years_back * 365 + rng.random_range(0..365));
                let duration_days = rng.random_range(180..=1825);
                let end = (start + Duration::days(duration_days)).min(today);
                (start, Some(end))
            }
        }
    }
}

impl DomainGenerator for AddressGenerator {
    type Input<'a> = AddressInput;
    type Profile = Address;

    fn generate(&self, input: AddressInput, vary: &Variability, rng: &mut ChaCha8Rng) -> Address {
        let style = weighted_choice(rng, STYLE_WEIGHTS)
            .copied()
            .unwrap_or(AddressStyle::Standard);

        let (line1, line2, city, state, zip_code) = match style {
            AddressStyle::Standard => {
                let (line1, line2) = Self::standard_lines(rng);
                let (state, city, prefix) = random_city(rng);
                (line1, line2, city.to_string(), state, Self::zip_code(prefix, rng))
            }
            AddressStyle::PoBox => {
                let (state, city, prefix) = random_city(rng);
                (
                    format!("PO Box {}", rng.random_range(1..99_999)),
                    None,
                    city.to_string(),
                    state,
                    Self::zip_code(prefix, rng),
                )
            }
            AddressStyle::RuralRoute => {
                let (state, city, prefix) = random_city(rng);
                (
                    format!(
                        "RR {} Box {}",
                        rng.random_range(1..20),
                        rng.random_range(1..999)
                    ),
                    None,
                    city.to_string(),
                    state,
                    Self::zip_code(prefix, rng),
                )
            }
            AddressStyle::Military => {
                let state = pick(rng, MILITARY_STATES).copied().unwrap_or("AE");
                (
                    format!(
                        "PSC {} Box {}",
                        rng.random_range(1..9_999),
                        rng.random_range(1..999)
                    ),
                    None,
                    "APO".to_string(),
                    state,
                    format!("09{:03}", rng.random_range(0..1_000)),
                )
            }
        };

        let (effective_date, end_date) =
            Self::effective_window(input.address_type, input.today, input.previous_count, rng);

        let line1 = vary.introduce_typo(rng, &line1);

        Address {
            id: Uuid::from_u128(rng.random()),
            street_line1: line1,
            street_line2: line2,
            city,
            state: state.to_string(),
            zip_code,
            address_type: input.address_type,
            style,
            effective_date,
            end_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use personagen_config::DataQualityProfile;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn clean() -> Variability {
        Variability::new(DataQualityProfile::clean())
    }

    #[test]
    fn current_address_is_open_ended() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let vary = clean();
        for _ in 0..50 {
            let address = AddressGenerator.generate(
                AddressInput {
                    address_type: AddressType::Current,
                    today: today(),
                    previous_count: 0,
                },
                &vary,
                &mut rng,
            );
            assert!(address.end_date.is_none());
            assert!(address.effective_date < today());
            assert!(address.effective_date >= today() - Duration::days(1825));
        }
    }

    #[test]
    fn previous_address_has_end_date_before_today() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let vary = clean();
        for count in 0..3 {
            let address = AddressGenerator.generate(
                AddressInput {
                    address_type: AddressType::Previous,
                    today: today(),
                    previous_count: count,
                },
                &vary,
                &mut rng,
            );
            let end = address.end_date.expect("previous addresses end");
            assert!(end <= today());
            assert!(address.effective_date < end);
        }
    }

    #[test]
    fn standard_style_dominates() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let vary = clean();
        let mut standard = 0;
        for _ in 0..400 {
            let address = AddressGenerator.generate(
                AddressInput {
                    address_type: AddressType::Current,
                    today: today(),
                    previous_count: 0,
                },
                &vary,
                &mut rng,
            );
            if address.style == AddressStyle::Standard {
                standard += 1;
            }
        }
        assert!(standard > 300, "standard count {standard}");
    }

    #[test]
    fn zip_starts_with_city_prefix() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let vary = clean();
        let address = AddressGenerator.generate(
            AddressInput {
                address_type: AddressType::Current,
                today: today(),
                previous_count: 0,
            },
            &vary,
            &mut rng,
        );
        if address.style != AddressStyle::Military {
            let cities = STATE_CITIES
                .iter()
                .find(|(state, _)| *state == address.state)
                .map(|(_, cities)| *cities)
                .expect("state in table");
            assert!(cities
                .iter()
                .any(|(city, prefix)| *city == address.city
                    && address.zip_code.starts_with(prefix)));
        }
    }
}
