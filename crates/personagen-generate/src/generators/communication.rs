//! Contact graph and ninety days of communication records, with an
//! aggregate pattern summary.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use personagen_core::sampling::{clamp_i64, pick, weighted_choice};
use personagen_core::{
    ActivityLevel, CommunicationPattern, CommunicationProfile, CommunicationRecord, ContactEntry,
    ContactRelationship,
};

use super::DomainGenerator;
use crate::variability::Variability;

const CONTACT_FIRST: &[&str] = &[
    "Alex", "Sam", "Jordan", "Taylor", "Casey", "Morgan", "Riley", "Jamie", "Drew", "Quinn",
    "Avery", "Dana", "Lee", "Pat", "Chris", "Robin", "Kim", "Terry", "Shawn", "Jesse",
];

const CONTACT_LAST: &[&str] = &[
    "Smith", "Johnson", "Brown", "Garcia", "Miller", "Davis", "Martinez", "Wilson", "Anderson",
    "Thomas", "Moore", "Jackson", "White", "Lopez", "Lee", "Clark", "Lewis", "Walker", "Hall",
    "Young",
];

const PLATFORMS: &[&str] = &["text", "phone", "whatsapp", "email", "instagram", "slack"];

/// (relationship, closeness base, frequency base).
const RELATIONSHIP_BASE: &[(ContactRelationship, i64, i64)] = &[
    (ContactRelationship::Partner, 10, 9),
    (ContactRelationship::Family, 7, 8),
    (ContactRelationship::Friend, 6, 6),
    (ContactRelationship::Coworker, 5, 7),
    (ContactRelationship::Professional, 4, 3),
    (ContactRelationship::Acquaintance, 2, 2),
];

pub struct CommunicationInput {
    pub age: u32,
    pub activity: ActivityLevel,
    pub has_partner: bool,
    pub today: NaiveDate,
}

pub struct CommunicationGenerator;

impl CommunicationGenerator {
    fn cluster_scale(activity: ActivityLevel) -> f64 {
        match activity {
            ActivityLevel::Low => 0.4,
            ActivityLevel::Medium => 1.0,
            ActivityLevel::High => 1.6,
            ActivityLevel::VeryHigh => 2.4,
        }
    }

    fn daily_volume(activity: ActivityLevel) -> u32 {
        match activity {
            ActivityLevel::Low => 15,
            ActivityLevel::Medium => 35,
            ActivityLevel::High => 60,
            ActivityLevel::VeryHigh => 100,
        }
    }

    fn age_multiplier(age: u32) -> f64 {
        if age < 25 {
            1.3
        } else if age > 60 {
            0.7
        } else {
            1.0
        }
    }

    fn bases_for(relationship: ContactRelationship) -> (i64, i64) {
        RELATIONSHIP_BASE
            .iter()
            .find(|(rel, ..)| *rel == relationship)
            .map(|(_, closeness, frequency)| (*closeness, *frequency))
            .unwrap_or((3, 3))
    }

    fn contact(
        relationship: ContactRelationship,
        rng: &mut ChaCha8Rng,
    ) -> ContactEntry {
        let (closeness_base, frequency_base) = Self::bases_for(relationship);
        let first = pick(rng, CONTACT_FIRST).copied().unwrap_or("Alex");
        let last = pick(rng, CONTACT_LAST).copied().unwrap_or("Smith");
        let platform = match relationship {
            ContactRelationship::Coworker | ContactRelationship::Professional => {
                if rng.random_bool(0.6) { "email" } else { "slack" }
            }
            _ => pick(rng, PLATFORMS).copied().unwrap_or("text"),
        };
        ContactEntry {
            name: format!("{first} {last}"),
            relationship,
            closeness: clamp_i64(closeness_base + rng.random_range(-2..=2), 1, 10) as u8,
            frequency: clamp_i64(frequency_base + rng.random_range(-2..=2), 1, 10) as u8,
            preferred_platform: platform.to_string(),
            is_emergency: false,
            is_blocked: false,
        }
    }

    fn contacts(&self, input: &CommunicationInput, rng: &mut ChaCha8Rng) -> Vec<ContactEntry> {
        let scale = Self::cluster_scale(input.activity)
            * if input.age < 25 {
                0.7
            } else if input.age > 60 {
                0.8
            } else {
                1.0
            };
        let scaled = |lo: u32, hi: u32, rng: &mut ChaCha8Rng| {
            let base = rng.random_range(lo..=hi);
            ((f64::from(base) * scale) as u32).max(1)
        };

        let mut contacts = Vec::new();
        if input.has_partner {
            contacts.push(Self::contact(ContactRelationship::Partner, rng));
        }
        let clusters = [
            (ContactRelationship::Family, 3_u32, 8_u32),
            (ContactRelationship::Coworker, 5, 15),
            (ContactRelationship::Friend, 8, 25),
            (ContactRelationship::Acquaintance, 10, 50),
            (ContactRelationship::Professional, 5, 20),
        ];
        for (relationship, lo, hi) in clusters {
            let count = scaled(lo, hi, rng);
            for _ in 0..count {
                contacts.push(Self::contact(relationship, rng));
            }
        }

        // Up to three emergency contacts from the closest family members.
        let mut emergency_slots = 3;
        let mut ranked: Vec<usize> = (0..contacts.len()).collect();
        ranked.sort_by_key(|&index| std::cmp::Reverse(contacts[index].closeness));
        for index in ranked {
            if emergency_slots == 0 {
                break;
            }
            if matches!(
                contacts[index].relationship,
                ContactRelationship::Partner | ContactRelationship::Family
            ) {
                contacts[index].is_emergency = true;
                emergency_slots -= 1;
            }
        }

        if rng.random_bool(0.30) {
            let blocked = rng.random_range(1..=5);
            let acquaintances: Vec<usize> = contacts
                .iter()
                .enumerate()
                .filter(|(_, contact)| {
                    contact.relationship == ContactRelationship::Acquaintance
                })
                .map(|(index, _)| index)
                .collect();
            for index in acquaintances.into_iter().take(blocked) {
                contacts[index].is_blocked = true;
            }
        }
        contacts
    }

    fn record_time(rng: &mut ChaCha8Rng) -> NaiveTime {
        // Business hours carry most of the traffic.
        let hour_weights: &[(u32, f64)] = &[
            (8, 0.08),
            (9, 0.10),
            (10, 0.09),
            (11, 0.08),
            (12, 0.10),
            (13, 0.07),
            (14, 0.07),
            (15, 0.07),
            (16, 0.07),
            (17, 0.08),
            (18, 0.07),
            (19, 0.05),
            (20, 0.04),
            (21, 0.02),
            (7, 0.01),
        ];
        let hour = weighted_choice(rng, hour_weights).copied().unwrap_or(12);
        NaiveTime::from_hms_opt(hour, rng.random_range(0..60), rng.random_range(0..60))
            .unwrap_or_default()
    }

    fn records(
        &self,
        input: &CommunicationInput,
        contacts: &[ContactEntry],
        rng: &mut ChaCha8Rng,
    ) -> Vec<CommunicationRecord> {
        if contacts.is_empty() {
            return Vec::new();
        }
        // Contact selection weighted by stated frequency.
        let weights: Vec<(usize, f64)> = contacts
            .iter()
            .enumerate()
            .filter(|(_, contact)| !contact.is_blocked)
            .map(|(index, contact)| (index, f64::from(contact.frequency)))
            .collect();
        if weights.is_empty() {
            return Vec::new();
        }

        let base_volume = f64::from(Self::daily_volume(input.activity))
            * Self::age_multiplier(input.age);
        let mut records = Vec::new();
        for days_back in 0..90 {
            let day = input.today - Duration::days(days_back);
            let weekend = matches!(day.weekday(), Weekday::Sat | Weekday::Sun);
            let volume = if weekend { base_volume * 0.8 } else { base_volume };
            let count = rng.random_range((volume * 0.6) as u32..=(volume * 1.2) as u32 + 1);
            for _ in 0..count {
                let contact_index = weighted_choice(rng, &weights).copied().unwrap_or(0);
                let contact = &contacts[contact_index];
                let kind = weighted_choice(
                    rng,
                    &[("text", 0.62), ("call", 0.18), ("email", 0.20)],
                )
                .copied()
                .unwrap_or("text");
                let direction = weighted_choice(
                    rng,
                    &[("outgoing", 0.60), ("incoming", 0.35), ("missed", 0.05)],
                )
                .copied()
                .unwrap_or("outgoing");
                let duration_seconds = if kind == "call" && direction != "missed" {
                    Some(rng.random_range(30..=u32::from(contact.closeness) * 60 * 3))
                } else {
                    None
                };
                let message_length = match kind {
                    "email" => Some(rng.random_range(50..=500)),
                    "text" => Some(rng.random_range(10..=200)),
                    _ => None,
                };
                let group_size = if kind == "text" && rng.random_bool(0.30) {
                    Some(rng.random_range(3..=8))
                } else {
                    None
                };
                records.push(CommunicationRecord {
                    timestamp: NaiveDateTime::new(day, Self::record_time(rng)),
                    contact_index,
                    kind: kind.to_string(),
                    direction: direction.to_string(),
                    platform: contact.preferred_platform.clone(),
                    duration_seconds,
                    message_length,
                    group_size,
                });
            }
        }
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records
    }

    fn pattern(records: &[CommunicationRecord]) -> CommunicationPattern {
        let days = 90.0;
        let messages = records
            .iter()
            .filter(|record| record.kind != "call")
            .count() as f64;
        let calls = records.iter().filter(|record| record.kind == "call").count() as f64;

        let mut hour_counts = [0_u32; 24];
        for record in records {
            use chrono::Timelike;
            hour_counts[record.timestamp.time().hour() as usize] += 1;
        }
        let mut ranked_hours: Vec<u8> = (0..24_u8).collect();
        ranked_hours.sort_by_key(|&hour| std::cmp::Reverse(hour_counts[hour as usize]));
        let preferred_hours: Vec<u8> = ranked_hours.into_iter().take(4).collect();

        let mut platform_counts: Vec<(String, u32)> = Vec::new();
        for record in records {
            match platform_counts
                .iter_mut()
                .find(|(platform, _)| *platform == record.platform)
            {
                Some((_, count)) => *count += 1,
                None => platform_counts.push((record.platform.clone(), 1)),
            }
        }
        platform_counts.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
        let top_platforms: Vec<String> = platform_counts
            .into_iter()
            .take(3)
            .map(|(platform, _)| platform)
            .collect();

        let avg_daily_messages = (messages / days * 10.0).round() / 10.0;
        let avg_daily_calls = (calls / days * 10.0).round() / 10.0;
        let style = if avg_daily_messages > 50.0 {
            "heavy messager"
        } else if avg_daily_calls > avg_daily_messages * 0.2 {
            "caller"
        } else if avg_daily_messages < 10.0 {
            "light"
        } else {
            "balanced"
        };

        CommunicationPattern {
            avg_daily_messages,
            avg_daily_calls,
            preferred_hours,
            top_platforms,
            style: style.to_string(),
        }
    }
}

impl DomainGenerator for CommunicationGenerator {
    type Input<'a> = CommunicationInput;
    type Profile = CommunicationProfile;

    fn generate(
        &self,
        input: CommunicationInput,
        _vary: &Variability,
        rng: &mut ChaCha8Rng,
    ) -> CommunicationProfile {
        let contacts = self.contacts(&input, rng);
        let records = self.records(&input, &contacts, rng);
        let pattern = Self::pattern(&records);

        let mean_closeness = if contacts.is_empty() {
            5.0
        } else {
            contacts
                .iter()
                .map(|contact| f64::from(contact.closeness))
                .sum::<f64>()
                / contacts.len() as f64
        };
        let success_rate = (0.9 + mean_closeness / 100.0).min(0.99);

        CommunicationProfile {
            contacts,
            records,
            pattern,
            success_rate: (success_rate * 1_000.0).round() / 1_000.0,
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

    fn profile(
        age: u32,
        activity: ActivityLevel,
        has_partner: bool,
        seed: u64,
    ) -> CommunicationProfile {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        CommunicationGenerator.generate(
            CommunicationInput {
                age,
                activity,
                has_partner,
                today: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            },
            &clean(),
            &mut rng,
        )
    }

    #[test]
    fn partner_is_first_and_closest() {
        for seed in 0..20 {
            let p = profile(35, ActivityLevel::Medium, true, seed);
            assert_eq!(p.contacts[0].relationship, ContactRelationship::Partner);
            assert!(p.contacts[0].closeness >= 8);
        }
    }

    #[test]
    fn at_most_three_emergency_contacts() {
        for seed in 0..50 {
            let p = profile(40, ActivityLevel::High, true, seed);
            let emergency = p.contacts.iter().filter(|c| c.is_emergency).count();
            assert!(emergency <= 3);
            assert!(p.contacts.iter().filter(|c| c.is_emergency).all(|c| {
                matches!(
                    c.relationship,
                    ContactRelationship::Partner | ContactRelationship::Family
                )
            }));
        }
    }

    #[test]
    fn blocked_contacts_never_appear_in_records() {
        for seed in 0..20 {
            let p = profile(30, ActivityLevel::Medium, false, seed);
            for record in &p.records {
                assert!(!p.contacts[record.contact_index].is_blocked);
            }
        }
    }

    #[test]
    fn calls_carry_durations_and_texts_lengths() {
        let p = profile(30, ActivityLevel::Medium, false, 5);
        for record in &p.records {
            match record.kind.as_str() {
                "call" => assert!(record.message_length.is_none()),
                "text" | "email" => {
                    assert!(record.duration_seconds.is_none());
                    assert!(record.message_length.is_some());
                }
                other => panic!("unexpected kind {other}"),
            }
        }
    }

    #[test]
    fn active_users_message_more() {
        let low = profile(35, ActivityLevel::Low, false, 11);
        let high = profile(35, ActivityLevel::VeryHigh, false, 11);
        assert!(high.pattern.avg_daily_messages > low.pattern.avg_daily_messages * 2.0);
    }

    #[test]
    fn records_are_sorted_newest_first() {
        let p = profile(35, ActivityLevel::Low, false, 7);
        for pair in p.records.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
    }
}
