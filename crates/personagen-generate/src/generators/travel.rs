//! Travel history: trip frequency from income and age, costed itineraries
//! and a recent location trail.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use personagen_core::sampling::{pick, sample_distinct, weighted_choice};
use personagen_core::{LocationVisit, TravelEntry, TravelFrequency, TravelProfile};

use super::DomainGenerator;
use crate::variability::Variability;

const DOMESTIC: &[(&str, &str)] = &[
    ("Orlando", "Florida"),
    ("Las Vegas", "Nevada"),
    ("New York", "New York"),
    ("Chicago", "Illinois"),
    ("Denver", "Colorado"),
    ("Nashville", "Tennessee"),
    ("San Diego", "California"),
    ("Seattle", "Washington"),
    ("New Orleans", "Louisiana"),
    ("Austin", "Texas"),
];

const INTERNATIONAL: &[(&str, &str)] = &[
    ("Cancun", "Mexico"),
    ("London", "United Kingdom"),
    ("Paris", "France"),
    ("Tokyo", "Japan"),
    ("Rome", "Italy"),
    ("Toronto", "Canada"),
    ("Barcelona", "Spain"),
    ("Amsterdam", "Netherlands"),
    ("Lisbon", "Portugal"),
    ("Bangkok", "Thailand"),
];

const COUNTRIES: &[&str] = &[
    "Mexico", "Canada", "United Kingdom", "France", "Italy", "Japan", "Spain", "Germany",
    "Thailand", "Portugal",
];

const LOYALTY_PROGRAMS: &[&str] = &[
    "SkyMiles",
    "MileagePlus",
    "AAdvantage",
    "Marriott Bonvoy",
    "Hilton Honors",
    "World of Hyatt",
];

const PURPOSES: &[(&str, f64)] = &[
    ("vacation", 0.55),
    ("family visit", 0.25),
    ("business", 0.15),
    ("event", 0.05),
];

const LOCATION_TYPES: &[(&str, &[&str])] = &[
    ("grocery", &["SuperMart", "FreshFoods", "Corner Grocer"]),
    ("restaurant", &["The Daily Grill", "Pasta House", "Taco Stand", "Noodle Bar"]),
    ("coffee", &["Bean There", "Morning Brew", "Roast House"]),
    ("gym", &["FitLife Gym", "Iron Works"]),
    ("retail", &["Mall Plaza", "Outlet Center", "BookNook"]),
    ("gas", &["QuickFuel", "Hwy 9 Station"]),
    ("park", &["Riverside Park", "Oak Hill Trail"]),
];

pub struct TravelInput {
    pub age: u32,
    pub annual_income: f64,
    pub today: NaiveDate,
}

pub struct TravelGenerator;

impl TravelGenerator {
    fn frequency(age: u32, income: f64, rng: &mut ChaCha8Rng) -> TravelFrequency {
        use TravelFrequency::*;
        let weights: &[(TravelFrequency, f64)] = if income > 100_000.0 && age < 65 {
            &[(Occasional, 0.15), (Moderate, 0.35), (Frequent, 0.50)]
        } else if income > 50_000.0 {
            &[(Rare, 0.10), (Occasional, 0.35), (Moderate, 0.40), (Frequent, 0.15)]
        } else {
            &[(Rare, 0.40), (Occasional, 0.40), (Moderate, 0.15), (Frequent, 0.05)]
        };
        weighted_choice(rng, weights).copied().unwrap_or(Occasional)
    }

    fn style(income: f64, rng: &mut ChaCha8Rng) -> &'static str {
        let weights: &[(&str, f64)] = if income > 150_000.0 {
            &[("luxury", 0.50), ("mid-range", 0.40), ("budget", 0.10)]
        } else if income > 60_000.0 {
            &[("luxury", 0.10), ("mid-range", 0.60), ("budget", 0.30)]
        } else {
            &[("mid-range", 0.25), ("budget", 0.55), ("backpacker", 0.20)]
        };
        weighted_choice(rng, weights).copied().unwrap_or("budget")
    }

    fn style_multiplier(style: &str) -> f64 {
        match style {
            "luxury" => 3.0,
            "mid-range" => 1.5,
            "budget" => 0.7,
            _ => 0.4,
        }
    }

    fn booking_reference(rng: &mut ChaCha8Rng) -> String {
        let letters: String = (0..2)
            .map(|_| (b'A' + rng.random_range(0..26_u8)) as char)
            .collect();
        format!("{letters}{:04}", rng.random_range(0..10_000))
    }

    fn companions(rng: &mut ChaCha8Rng) -> u8 {
        if rng.random_bool(0.40) {
            0
        } else {
            weighted_choice(rng, &[(1_u8, 0.50), (2, 0.30), (3, 0.15), (4, 0.05)])
                .copied()
                .unwrap_or(1)
        }
    }

    fn trip(
        &self,
        style: &str,
        international: bool,
        today: NaiveDate,
        rng: &mut ChaCha8Rng,
    ) -> TravelEntry {
        let (city, region) = if international {
            pick(rng, INTERNATIONAL).copied().unwrap_or(("Cancun", "Mexico"))
        } else {
            pick(rng, DOMESTIC).copied().unwrap_or(("Orlando", "Florida"))
        };
        let duration_days = rng.random_range(2..=14_u8);
        let departure = today - Duration::days(rng.random_range(14..730));

        let per_day = if international { 500.0 } else { 200.0 };
        let flight = if international { 400.0 } else { 200.0 };
        let base = per_day * f64::from(duration_days) + flight;
        let total_cost =
            (base * Self::style_multiplier(style) * rng.random_range(0.8..1.3)).round();

        let purpose = weighted_choice(rng, PURPOSES).copied().unwrap_or("vacation");
        let transport = if international || rng.random_bool(0.6) {
            "flight"
        } else {
            "car"
        };
        let accommodation = match style {
            "luxury" => "resort",
            "backpacker" => "hostel",
            _ if rng.random_bool(0.3) => "rental",
            _ => "hotel",
        };

        TravelEntry {
            destination_city: city.to_string(),
            destination_region: region.to_string(),
            international,
            purpose: purpose.to_string(),
            transport: transport.to_string(),
            accommodation: accommodation.to_string(),
            departure,
            duration_days,
            total_cost,
            booking_reference: Self::booking_reference(rng),
            companions: Self::companions(rng),
        }
    }

    fn location_history(today: NaiveDate, rng: &mut ChaCha8Rng) -> Vec<LocationVisit> {
        let count = rng.random_range(20..=50);
        let mut visits: Vec<LocationVisit> = (0..count)
            .map(|_| {
                let (location_type, names) = LOCATION_TYPES
                    [rng.random_range(0..LOCATION_TYPES.len())];
                let name = pick(rng, names).copied().unwrap_or("SuperMart");
                let day = today - Duration::days(rng.random_range(0..30));
                let time = NaiveTime::from_hms_opt(
                    rng.random_range(7..22),
                    rng.random_range(0..60),
                    0,
                )
                .unwrap_or_default();
                let duration_minutes = rng.random_range(10..180);
                let expense = match location_type {
                    "park" => 0.0,
                    "gas" => (rng.random_range(25.0..80.0_f64) * 100.0).round() / 100.0,
                    _ => (rng.random_range(4.0..120.0_f64) * 100.0).round() / 100.0,
                };
                LocationVisit {
                    location_type: location_type.to_string(),
                    name: name.to_string(),
                    visited_at: NaiveDateTime::new(day, time),
                    duration_minutes,
                    expense,
                }
            })
            .collect();
        visits.sort_by(|a, b| b.visited_at.cmp(&a.visited_at));
        visits
    }
}

impl DomainGenerator for TravelGenerator {
    type Input<'a> = TravelInput;
    type Profile = TravelProfile;

    fn generate(
        &self,
        input: TravelInput,
        _vary: &Variability,
        rng: &mut ChaCha8Rng,
    ) -> TravelProfile {
        use TravelFrequency::*;

        let frequency = Self::frequency(input.age, input.annual_income, rng);
        let style = Self::style(input.annual_income, rng);

        let total_trips = match frequency {
            Rare => rng.random_range(0..=3),
            Occasional => rng.random_range(2..=8),
            Moderate => rng.random_range(6..=20),
            Frequent => input.age.saturating_sub(15).max(5) + rng.random_range(0..=10),
        };

        let passport = input.annual_income > 50_000.0 && rng.random_bool(0.60);
        let countries_visited = if passport {
            let max_countries =
                ((input.annual_income / 30_000.0) as usize).clamp(1, 6);
            let count = rng.random_range(1..=max_countries);
            sample_distinct(rng, COUNTRIES, count)
                .into_iter()
                .map(|country| (*country).to_string())
                .collect()
        } else {
            Vec::new()
        };

        let loyalty_count = match frequency {
            Frequent => 3,
            Moderate => 2,
            Occasional => 1,
            Rare => 0,
        };
        let loyalty_programs = sample_distinct(rng, LOYALTY_PROGRAMS, loyalty_count)
            .into_iter()
            .map(|program| (*program).to_string())
            .collect();

        let recent_count = ((total_trips / 3).min(5)) as usize;
        let recent_trips = (0..recent_count)
            .map(|_| {
                let international = passport && rng.random_bool(0.30);
                self.trip(style, international, input.today, rng)
            })
            .collect();

        TravelProfile {
            frequency,
            style: style.to_string(),
            total_trips,
            passport,
            countries_visited,
            loyalty_programs,
            recent_trips,
            location_history: Self::location_history(input.today, rng),
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

    fn profile(age: u32, income: f64, seed: u64) -> TravelProfile {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        TravelGenerator.generate(
            TravelInput {
                age,
                annual_income: income,
                today: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            },
            &clean(),
            &mut rng,
        )
    }

    #[test]
    fn international_trips_require_passport() {
        for seed in 0..200 {
            let p = profile(40, 45_000.0, seed);
            if !p.passport {
                assert!(p.countries_visited.is_empty());
                assert!(p.recent_trips.iter().all(|t| !t.international));
            }
        }
    }

    #[test]
    fn location_history_is_sorted_newest_first() {
        for seed in 0..50 {
            let history = profile(35, 70_000.0, seed).location_history;
            assert!((20..=50).contains(&history.len()));
            for pair in history.windows(2) {
                assert!(pair[0].visited_at >= pair[1].visited_at);
            }
        }
    }

    #[test]
    fn high_earners_travel_more() {
        let mut low_trips = 0_u64;
        let mut high_trips = 0_u64;
        for seed in 0..200 {
            low_trips += u64::from(profile(40, 25_000.0, seed).total_trips);
            high_trips += u64::from(profile(40, 150_000.0, seed + 10_000).total_trips);
        }
        assert!(high_trips > low_trips * 2, "high {high_trips} low {low_trips}");
    }

    #[test]
    fn booking_references_are_two_letters_four_digits() {
        for seed in 0..100 {
            for trip in profile(45, 120_000.0, seed).recent_trips {
                let reference = trip.booking_reference.as_bytes();
                assert_eq!(reference.len(), 6);
                assert!(reference[..2].iter().all(u8::is_ascii_uppercase));
                assert!(reference[2..].iter().all(u8::is_ascii_digit));
            }
        }
    }

    #[test]
    fn luxury_trips_cost_more_than_budget() {
        let luxury = TravelGenerator.trip(
            "luxury",
            false,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            &mut ChaCha8Rng::seed_from_u64(9),
        );
        let budget = TravelGenerator.trip(
            "budget",
            false,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            &mut ChaCha8Rng::seed_from_u64(9),
        );
        assert!(luxury.total_cost > budget.total_cost);
    }
}
