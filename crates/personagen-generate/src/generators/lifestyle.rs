//! Lifestyle and personality: archetype from age and income, Big-Five
//! traits with an MBTI projection, habits and wellbeing scores.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use personagen_core::sampling::{clamp_i64, pick, sample_distinct, weighted_choice};
use personagen_core::{BigFive, DailyRoutine, LifestyleCategory, LifestyleProfile, MaritalStatus};

use super::DomainGenerator;
use crate::variability::Variability;

use LifestyleCategory::*;

const YOUNG_LOW: &[(LifestyleCategory, f64)] = &[
    (Urban, 0.40),
    (Minimalist, 0.25),
    (Bohemian, 0.20),
    (TechSavvy, 0.15),
];
const YOUNG_HIGH: &[(LifestyleCategory, f64)] = &[
    (Urban, 0.35),
    (TechSavvy, 0.30),
    (Modern, 0.20),
    (Luxury, 0.15),
];
const MID_LOW: &[(LifestyleCategory, f64)] = &[
    (Suburban, 0.35),
    (Traditional, 0.25),
    (Rural, 0.20),
    (Minimalist, 0.20),
];
const MID_HIGH: &[(LifestyleCategory, f64)] = &[
    (Suburban, 0.35),
    (Modern, 0.25),
    (Luxury, 0.20),
    (Outdoorsy, 0.20),
];
const OLDER_LOW: &[(LifestyleCategory, f64)] = &[
    (Traditional, 0.40),
    (Rural, 0.30),
    (Suburban, 0.20),
    (Minimalist, 0.10),
];
const OLDER_HIGH: &[(LifestyleCategory, f64)] = &[
    (Traditional, 0.35),
    (Suburban, 0.25),
    (Luxury, 0.25),
    (Outdoorsy, 0.15),
];

const HOBBIES: &[(LifestyleCategory, &[&str])] = &[
    (Minimalist, &["journaling", "yoga", "reading", "meditation"]),
    (Luxury, &["golf", "wine tasting", "sailing", "collecting art"]),
    (Outdoorsy, &["hiking", "camping", "fishing", "mountain biking", "kayaking"]),
    (Urban, &["concerts", "food tours", "cycling", "photography", "museums"]),
    (Suburban, &["gardening", "grilling", "book club", "home improvement"]),
    (Rural, &["hunting", "woodworking", "fishing", "horseback riding"]),
    (Bohemian, &["painting", "pottery", "live music", "thrifting", "poetry"]),
    (Traditional, &["cooking", "church activities", "bridge", "genealogy"]),
    (Modern, &["fitness classes", "podcasts", "travel", "cooking"]),
    (TechSavvy, &["gaming", "3d printing", "coding projects", "drones", "home automation"]),
];

const FOODS: &[(LifestyleCategory, &[&str])] = &[
    (Minimalist, &["salads", "rice bowls", "smoothies"]),
    (Luxury, &["sushi", "steak", "oysters", "fine pastry"]),
    (Outdoorsy, &["bbq", "trail mix", "chili"]),
    (Urban, &["ramen", "tacos", "brunch", "thai"]),
    (Suburban, &["pizza", "burgers", "pasta", "casseroles"]),
    (Rural, &["fried chicken", "biscuits", "stew"]),
    (Bohemian, &["falafel", "curry", "vegan bowls"]),
    (Traditional, &["meatloaf", "roast dinner", "apple pie"]),
    (Modern, &["poke", "mediterranean", "meal kits"]),
    (TechSavvy, &["energy drinks", "delivery pizza", "ramen", "meal replacement shakes"]),
];

const VALUES: &[(LifestyleCategory, &[&str])] = &[
    (Minimalist, &["simplicity", "sustainability", "mindfulness"]),
    (Luxury, &["achievement", "quality", "status"]),
    (Outdoorsy, &["adventure", "conservation", "health"]),
    (Urban, &["diversity", "culture", "ambition"]),
    (Suburban, &["family", "community", "stability"]),
    (Rural, &["self-reliance", "tradition", "land"]),
    (Bohemian, &["creativity", "freedom", "authenticity"]),
    (Traditional, &["faith", "family", "loyalty"]),
    (Modern, &["balance", "growth", "experiences"]),
    (TechSavvy, &["innovation", "efficiency", "knowledge"]),
];

/// (openness, conscientiousness, extraversion, agreeableness, neuroticism)
/// adjustments applied on top of the base of five.
const TRAIT_ADJUST: &[(LifestyleCategory, [i64; 5])] = &[
    (Minimalist, [1, 2, -1, 1, -1]),
    (Luxury, [0, 1, 2, -1, 0]),
    (Outdoorsy, [2, 1, 1, 1, -2]),
    (Urban, [2, 0, 2, 0, 1]),
    (Suburban, [-1, 1, 0, 2, 0]),
    (Rural, [-2, 1, -1, 1, -1]),
    (Bohemian, [3, -2, 1, 1, 1]),
    (Traditional, [-2, 2, 0, 2, 0]),
    (Modern, [1, 1, 1, 0, 0]),
    (TechSavvy, [3, 1, -2, -1, 1]),
];

const GOALS: &[&str] = &[
    "buy a home",
    "travel abroad",
    "get a promotion",
    "start a business",
    "pay off debt",
    "learn a language",
    "run a marathon",
    "write a book",
    "retire early",
    "spend more time with family",
    "go back to school",
    "volunteer regularly",
];

pub struct LifestyleInput {
    pub age: u32,
    pub annual_income: f64,
    pub marital_status: MaritalStatus,
}

pub struct LifestyleGenerator;

impl LifestyleGenerator {
    fn category(age: u32, income: f64, rng: &mut ChaCha8Rng) -> LifestyleCategory {
        let pool = if age < 31 {
            if income < 50_000.0 { YOUNG_LOW } else { YOUNG_HIGH }
        } else if age < 51 {
            if income < 75_000.0 { MID_LOW } else { MID_HIGH }
        } else if income < 75_000.0 {
            OLDER_LOW
        } else {
            OLDER_HIGH
        };
        weighted_choice(rng, pool).copied().unwrap_or(Suburban)
    }

    fn big_five(category: LifestyleCategory, rng: &mut ChaCha8Rng) -> BigFive {
        let adjust = TRAIT_ADJUST
            .iter()
            .find(|(cat, _)| *cat == category)
            .map(|(_, adj)| *adj)
            .unwrap_or([0; 5]);
        let mut traits = [0_u8; 5];
        for (slot, delta) in traits.iter_mut().zip(adjust) {
            *slot = clamp_i64(5 + delta + rng.random_range(-2..=2), 1, 10) as u8;
        }
        BigFive {
            openness: traits[0],
            conscientiousness: traits[1],
            extraversion: traits[2],
            agreeableness: traits[3],
            neuroticism: traits[4],
        }
    }

    fn mbti(big_five: &BigFive) -> String {
        let mut mbti = String::with_capacity(4);
        mbti.push(if big_five.extraversion > 5 { 'E' } else { 'I' });
        mbti.push(if big_five.openness > 5 { 'N' } else { 'S' });
        mbti.push(if big_five.agreeableness > 5 { 'F' } else { 'T' });
        mbti.push(if big_five.conscientiousness > 5 { 'J' } else { 'P' });
        mbti
    }

    fn for_category<'a>(
        table: &'a [(LifestyleCategory, &'a [&'a str])],
        category: LifestyleCategory,
    ) -> &'a [&'a str] {
        table
            .iter()
            .find(|(cat, _)| *cat == category)
            .map(|(_, items)| *items)
            .unwrap_or(&[])
    }

    fn music_genres(age: u32, rng: &mut ChaCha8Rng) -> Vec<String> {
        let pool: &[&str] = match age {
            0..=24 => &["hip hop", "pop", "edm", "indie", "k-pop"],
            25..=39 => &["indie", "pop", "hip hop", "rock", "r&b"],
            40..=54 => &["rock", "alternative", "country", "pop"],
            55..=69 => &["classic rock", "country", "jazz", "soul"],
            _ => &["oldies", "classical", "gospel", "big band"],
        };
        let count = rng.random_range(2..=3);
        sample_distinct(rng, pool, count)
            .into_iter()
            .map(|genre| (*genre).to_string())
            .collect()
    }

    fn devices_and_adoption(age: u32, rng: &mut ChaCha8Rng) -> (Vec<String>, String) {
        let (pool, adoption): (&[&str], &[(&str, f64)]) = match age {
            0..=34 => (
                &["smartphone", "laptop", "smartwatch", "tablet", "vr headset", "smart speaker"],
                &[("early adopter", 0.5), ("mainstream", 0.4), ("laggard", 0.1)],
            ),
            35..=59 => (
                &["smartphone", "laptop", "tablet", "smart tv", "smart speaker"],
                &[("early adopter", 0.2), ("mainstream", 0.6), ("laggard", 0.2)],
            ),
            _ => (
                &["smartphone", "tablet", "desktop", "smart tv"],
                &[("early adopter", 0.05), ("mainstream", 0.45), ("laggard", 0.5)],
            ),
        };
        let device_count = rng.random_range(2..=4);
        let devices = sample_distinct(rng, pool, device_count)
            .into_iter()
            .map(|device| (*device).to_string())
            .collect();
        let adoption = weighted_choice(rng, adoption)
            .copied()
            .unwrap_or("mainstream")
            .to_string();
        (devices, adoption)
    }

    fn routine(rng: &mut ChaCha8Rng) -> DailyRoutine {
        let archetypes = [
            ("Early Bird", "05:30", "21:30", "morning"),
            ("Standard", "07:00", "23:00", "midday"),
            ("Night Owl", "09:30", "01:30", "evening"),
        ];
        let (archetype, wake, bed, peak) = pick(rng, &archetypes)
            .copied()
            .unwrap_or(("Standard", "07:00", "23:00", "midday"));
        DailyRoutine {
            archetype: archetype.to_string(),
            wake_time: wake.to_string(),
            bed_time: bed.to_string(),
            productivity_peak: peak.to_string(),
        }
    }
}

impl DomainGenerator for LifestyleGenerator {
    type Input<'a> = LifestyleInput;
    type Profile = LifestyleProfile;

    fn generate(
        &self,
        input: LifestyleInput,
        _vary: &Variability,
        rng: &mut ChaCha8Rng,
    ) -> LifestyleProfile {
        let category = Self::category(input.age, input.annual_income, rng);
        let big_five = Self::big_five(category, rng);
        let mbti = Self::mbti(&big_five);

        let hobby_count = rng.random_range(2..=4);
        let hobbies = sample_distinct(rng, Self::for_category(HOBBIES, category), hobby_count)
            .into_iter()
            .map(|hobby| (*hobby).to_string())
            .collect();
        let food_count = rng.random_range(2..=3);
        let favorite_foods = sample_distinct(rng, Self::for_category(FOODS, category), food_count)
            .into_iter()
            .map(|food| (*food).to_string())
            .collect();
        let core_values = Self::for_category(VALUES, category)
            .iter()
            .map(|value| (*value).to_string())
            .collect();

        let music_genres = Self::music_genres(input.age, rng);
        let (devices, tech_adoption) = Self::devices_and_adoption(input.age, rng);
        let routine = Self::routine(rng);

        let shopping_patterns = ["Researcher", "Impulse Buyer", "Practical", "Brand Loyal"];
        let shopping_pattern = pick(rng, &shopping_patterns)
            .copied()
            .unwrap_or("Practical")
            .to_string();

        let mut satisfaction: i64 = 6;
        if input.annual_income > 100_000.0 {
            satisfaction += 1;
        } else if input.annual_income < 30_000.0 {
            satisfaction -= 1;
        }
        if matches!(
            input.marital_status,
            MaritalStatus::Married | MaritalStatus::Partnership
        ) {
            satisfaction += 1;
        }
        if matches!(category, Luxury | Outdoorsy) {
            satisfaction += 1;
        }
        let life_satisfaction = clamp_i64(satisfaction + rng.random_range(-2..=2), 1, 10) as u8;
        let stress_level =
            clamp_i64(11 - i64::from(life_satisfaction) + rng.random_range(-2..=2), 1, 10) as u8;
        let work_life_balance = clamp_i64(
            i64::from(life_satisfaction) + rng.random_range(-2..=2),
            1,
            10,
        ) as u8;

        let goal_count = rng.random_range(3..=6);
        let future_goals = sample_distinct(rng, GOALS, goal_count)
            .into_iter()
            .map(|goal| (*goal).to_string())
            .collect();

        LifestyleProfile {
            category,
            big_five,
            mbti,
            hobbies,
            favorite_foods,
            core_values,
            music_genres,
            devices,
            tech_adoption,
            routine,
            shopping_pattern,
            life_satisfaction,
            stress_level,
            work_life_balance,
            future_goals,
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

    fn profile(age: u32, income: f64, status: MaritalStatus, seed: u64) -> LifestyleProfile {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        LifestyleGenerator.generate(
            LifestyleInput {
                age,
                annual_income: income,
                marital_status: status,
            },
            &clean(),
            &mut rng,
        )
    }

    #[test]
    fn mbti_tracks_big_five() {
        for seed in 0..100 {
            let p = profile(35, 70_000.0, MaritalStatus::Single, seed);
            assert_eq!(p.mbti.len(), 4);
            let expected_first = if p.big_five.extraversion > 5 { 'E' } else { 'I' };
            assert!(p.mbti.starts_with(expected_first));
        }
    }

    #[test]
    fn young_low_income_category_pool() {
        for seed in 0..100 {
            let p = profile(24, 28_000.0, MaritalStatus::Single, seed);
            assert!(
                matches!(p.category, Urban | Minimalist | Bohemian | TechSavvy),
                "unexpected {:?}",
                p.category
            );
        }
    }

    #[test]
    fn scores_stay_on_scale() {
        for seed in 0..200 {
            let p = profile(45, 90_000.0, MaritalStatus::Married, seed);
            assert!((1..=10).contains(&p.life_satisfaction));
            assert!((1..=10).contains(&p.stress_level));
            assert!((1..=10).contains(&p.work_life_balance));
            for value in [
                p.big_five.openness,
                p.big_five.conscientiousness,
                p.big_five.extraversion,
                p.big_five.agreeableness,
                p.big_five.neuroticism,
            ] {
                assert!((1..=10).contains(&value));
            }
        }
    }

    #[test]
    fn stress_moves_against_satisfaction() {
        let mut sum = 0_i64;
        let mut count = 0_i64;
        for seed in 0..300 {
            let p = profile(40, 60_000.0, MaritalStatus::Single, seed);
            sum += i64::from(p.life_satisfaction) + i64::from(p.stress_level);
            count += 1;
        }
        let mean = sum as f64 / count as f64;
        // The pair should hover around 11 before jitter.
        assert!((9.0..13.0).contains(&mean), "mean {mean}");
    }

    #[test]
    fn hobbies_come_from_category_pool() {
        for seed in 0..50 {
            let p = profile(28, 40_000.0, MaritalStatus::Single, seed);
            let pool = LifestyleGenerator::for_category(HOBBIES, p.category);
            for hobby in &p.hobbies {
                assert!(pool.contains(&hobby.as_str()), "{hobby} not in pool");
            }
        }
    }
}
