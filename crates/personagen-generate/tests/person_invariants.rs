use personagen_config::{DataQualityProfile, GenerationConfig};
use personagen_core::{AddressType, Person};
use personagen_generate::PersonEngine;
use regex::Regex;

fn clean_sample(count: usize, seed: u64) -> Vec<Person> {
    let mut engine = PersonEngine::new(GenerationConfig {
        seed,
        data_quality: DataQualityProfile::clean(),
        ..GenerationConfig::default()
    });
    (0..count).map(|_| engine.generate_person()).collect()
}

#[test]
fn structural_invariants_hold_over_a_sample() {
    for person in clean_sample(200, 5) {
        assert!(!person.addresses.is_empty());
        let current = person
            .addresses
            .iter()
            .filter(|address| address.address_type == AddressType::Current)
            .count();
        assert_eq!(current, 1, "exactly one current address");

        assert!(person.phone_numbers.iter().filter(|p| p.is_primary).count() <= 1);
        assert!(person.email_addresses.iter().filter(|e| e.is_primary).count() <= 1);

        assert!(
            person
                .employment_history
                .iter()
                .filter(|job| job.is_current)
                .count()
                <= 1
        );
        for pair in person.employment_history.windows(2) {
            assert!(pair[0].start_date >= pair[1].start_date, "history sorted desc");
        }

        assert!((18..=96).contains(&person.age));
        if let Some(financial) = &person.financial {
            assert!((300..=850).contains(&financial.credit_score));
            assert!(financial.annual_income >= 0.0);
        }
    }
}

#[test]
fn clean_profile_emits_canonical_formats() {
    let ssn_re = Regex::new(r"^\d{3}-\d{2}-\d{4}$").unwrap();
    let phone_re = Regex::new(r"^\d{3}-\d{3}-\d{4}$").unwrap();
    let zip_re = Regex::new(r"^\d{5}$").unwrap();
    let email_re = Regex::new(r"^[^@\s]+@[^@\s]+\.[a-z]+$").unwrap();
    let vin_re = Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").unwrap();

    for person in clean_sample(150, 11) {
        if let Some(ssn) = &person.ssn {
            assert!(ssn_re.is_match(ssn), "ssn {ssn}");
        }
        for phone in &person.phone_numbers {
            assert!(phone_re.is_match(&phone.number), "phone {}", phone.number);
        }
        for address in &person.addresses {
            assert!(zip_re.is_match(&address.zip_code), "zip {}", address.zip_code);
        }
        for email in &person.email_addresses {
            assert!(email_re.is_match(&email.address), "email {}", email.address);
        }
        if let Some(vehicles) = &person.vehicles {
            for vehicle in &vehicles.vehicles {
                assert!(vin_re.is_match(&vehicle.vin), "vin {}", vehicle.vin);
            }
        }
    }
}

#[test]
fn minors_never_appear_in_plain_generation() {
    // Age brackets start at 18; only relationship derivation makes minors.
    let people = clean_sample(300, 23);
    for person in &people {
        assert!(person.age >= 18);
    }
    // A small unemployed share exists, but most adults carry a history.
    let employed = people
        .iter()
        .filter(|person| !person.employment_history.is_empty())
        .count();
    assert!(employed > 240, "employed {employed} of 300");
}

#[test]
fn missing_data_rate_drops_optional_fields_only() {
    let mut engine = PersonEngine::new(GenerationConfig {
        seed: 31,
        data_quality: DataQualityProfile {
            missing_data_rate: 0.5,
            ..DataQualityProfile::clean()
        },
        ..GenerationConfig::default()
    });
    let people: Vec<Person> = (0..200).map(|_| engine.generate_person()).collect();

    let missing_ssn = people.iter().filter(|person| person.ssn.is_none()).count();
    assert!(missing_ssn > 50, "missing rate should bite: {missing_ssn}");
    for person in &people {
        // Required identity fields never go missing.
        assert!(!person.name.first.is_empty());
        assert!(!person.name.last.is_empty());
    }
}
