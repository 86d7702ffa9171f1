//! Online presence: platform adoption by age cohort, follower counts by
//! activity level and a digital footprint summary.

use chrono::{Datelike, Duration, NaiveDate};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use personagen_core::sampling::{pick, sample_distinct, weighted_choice};
use personagen_core::{
    ActivityLevel, DigitalFootprint, OnlineAccount, OnlinePresence, SocialMediaAccount,
};

use super::DomainGenerator;
use crate::variability::Variability;

/// (platform, launch year, adoption probability) per age cohort.
const PLATFORMS_18_24: &[(&str, i32, f64)] = &[
    ("YouTube", 2005, 0.85),
    ("Instagram", 2010, 0.75),
    ("Snapchat", 2011, 0.70),
    ("TikTok", 2016, 0.65),
    ("Twitter", 2006, 0.40),
    ("Reddit", 2005, 0.35),
    ("Facebook", 2004, 0.30),
];

const PLATFORMS_25_34: &[(&str, i32, f64)] = &[
    ("YouTube", 2005, 0.80),
    ("Instagram", 2010, 0.65),
    ("Facebook", 2004, 0.60),
    ("TikTok", 2016, 0.40),
    ("Twitter", 2006, 0.40),
    ("LinkedIn", 2003, 0.45),
    ("Reddit", 2005, 0.30),
];

const PLATFORMS_35_49: &[(&str, i32, f64)] = &[
    ("Facebook", 2004, 0.70),
    ("YouTube", 2005, 0.70),
    ("Instagram", 2010, 0.45),
    ("LinkedIn", 2003, 0.45),
    ("Twitter", 2006, 0.30),
    ("Pinterest", 2010, 0.25),
];

const PLATFORMS_50_64: &[(&str, i32, f64)] = &[
    ("Facebook", 2004, 0.70),
    ("YouTube", 2005, 0.55),
    ("Instagram", 2010, 0.25),
    ("LinkedIn", 2003, 0.30),
    ("Pinterest", 2010, 0.20),
];

const PLATFORMS_65_UP: &[(&str, i32, f64)] = &[
    ("Facebook", 2004, 0.50),
    ("YouTube", 2005, 0.40),
    ("Instagram", 2010, 0.10),
];

/// Follower and post ranges per platform, scaled by activity level.
const FOLLOWER_BASE: &[(&str, u32, u32, u32, u32)] = &[
    // (platform, followers lo, followers hi, posts lo, posts hi)
    ("Instagram", 100, 1_500, 20, 800),
    ("TikTok", 50, 3_000, 10, 400),
    ("Twitter", 20, 800, 50, 5_000),
    ("Facebook", 80, 900, 30, 1_200),
    ("YouTube", 0, 300, 0, 100),
    ("Snapchat", 30, 400, 0, 0),
    ("LinkedIn", 50, 1_200, 5, 200),
    ("Reddit", 0, 150, 10, 2_000),
    ("Pinterest", 10, 500, 20, 1_500),
];

/// Median engagement rates per platform, in percent.
const ENGAGEMENT_BASE: &[(&str, f64)] = &[
    ("TikTok", 5.96),
    ("Instagram", 1.22),
    ("Facebook", 0.15),
    ("Twitter", 0.05),
    ("YouTube", 1.80),
    ("LinkedIn", 0.54),
    ("Pinterest", 0.30),
    ("Reddit", 0.80),
    ("Snapchat", 0.90),
];

const ACCOUNT_CATEGORIES: &[(&str, &[&str])] = &[
    ("streaming", &["Netflix", "Spotify", "Hulu", "Disney+"]),
    ("shopping", &["Amazon", "eBay", "Etsy", "Target"]),
    ("finance", &["PayPal", "Venmo", "Mint", "Robinhood"]),
    ("travel", &["Airbnb", "Expedia", "Uber", "Lyft"]),
    ("food", &["DoorDash", "Grubhub", "Instacart"]),
    ("fitness", &["Strava", "MyFitnessPal", "Peloton"]),
    ("gaming", &["Steam", "Xbox Live", "PlayStation Network"]),
    ("productivity", &["Dropbox", "Google Drive", "Notion"]),
    ("news", &["NYTimes", "Substack", "Medium"]),
    ("dating", &["Tinder", "Bumble", "Hinge"]),
];

pub struct SocialInput<'a> {
    pub age: u32,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub primary_email: Option<&'a str>,
    pub today: NaiveDate,
}

pub struct SocialGenerator;

impl SocialGenerator {
    fn platform_pool(age: u32) -> &'static [(&'static str, i32, f64)] {
        match age {
            0..=24 => PLATFORMS_18_24,
            25..=34 => PLATFORMS_25_34,
            35..=49 => PLATFORMS_35_49,
            50..=64 => PLATFORMS_50_64,
            _ => PLATFORMS_65_UP,
        }
    }

    fn activity_level(age: u32, rng: &mut ChaCha8Rng) -> ActivityLevel {
        let weights: &[(ActivityLevel, f64)] = match age {
            0..=24 => &[
                (ActivityLevel::Medium, 0.20),
                (ActivityLevel::High, 0.45),
                (ActivityLevel::VeryHigh, 0.35),
            ],
            25..=39 => &[
                (ActivityLevel::Low, 0.10),
                (ActivityLevel::Medium, 0.40),
                (ActivityLevel::High, 0.40),
                (ActivityLevel::VeryHigh, 0.10),
            ],
            40..=59 => &[
                (ActivityLevel::Low, 0.30),
                (ActivityLevel::Medium, 0.45),
                (ActivityLevel::High, 0.25),
            ],
            _ => &[(ActivityLevel::Low, 0.60), (ActivityLevel::Medium, 0.40)],
        };
        weighted_choice(rng, weights)
            .copied()
            .unwrap_or(ActivityLevel::Medium)
    }

    fn activity_multiplier(level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Low => 0.4,
            ActivityLevel::Medium => 1.0,
            ActivityLevel::High => 2.0,
            ActivityLevel::VeryHigh => 4.0,
        }
    }

    fn username(
        platform: &str,
        first: &str,
        last: &str,
        rng: &mut ChaCha8Rng,
    ) -> String {
        let first = first.to_lowercase().replace(' ', "");
        let last = last.to_lowercase().replace(' ', "");
        match platform {
            // Professional networks lean on real names.
            "LinkedIn" => format!("{first}-{last}-{:03}", rng.random_range(0..1_000)),
            "Reddit" => {
                let adjectives = ["quiet", "wandering", "electric", "cosmic", "salty"];
                let nouns = ["falcon", "noodle", "pixel", "otter", "cactus"];
                format!(
                    "{}_{}{}",
                    pick(rng, &adjectives).copied().unwrap_or("quiet"),
                    pick(rng, &nouns).copied().unwrap_or("falcon"),
                    rng.random_range(0..1_000)
                )
            }
            _ => match rng.random_range(0..4) {
                0 => format!("{first}.{last}"),
                1 => format!("{first}{last}{}", rng.random_range(1..100)),
                2 => format!("{first}_{}", rng.random_range(1_000..10_000)),
                _ => format!("the.real.{first}"),
            },
        }
    }

    fn engagement_rate(platform: &str, followers: u32, rng: &mut ChaCha8Rng) -> f64 {
        let base = ENGAGEMENT_BASE
            .iter()
            .find(|(name, _)| *name == platform)
            .map(|(_, rate)| *rate)
            .unwrap_or(1.0);
        // Small accounts engage disproportionately.
        let follower_mult = if followers < 100 {
            rng.random_range(1.5..4.0)
        } else if followers < 1_000 {
            rng.random_range(0.8..2.0)
        } else {
            rng.random_range(0.4..1.2)
        };
        ((base * follower_mult).min(20.0) * 100.0).round() / 100.0
    }

    fn online_account_count(level: ActivityLevel, rng: &mut ChaCha8Rng) -> usize {
        match level {
            ActivityLevel::Low => rng.random_range(3..=8),
            ActivityLevel::Medium => rng.random_range(8..=15),
            ActivityLevel::High => rng.random_range(15..=25),
            ActivityLevel::VeryHigh => rng.random_range(25..=40),
        }
    }
}

impl DomainGenerator for SocialGenerator {
    type Input<'a> = SocialInput<'a>;
    type Profile = OnlinePresence;

    fn generate(
        &self,
        input: SocialInput<'_>,
        vary: &Variability,
        rng: &mut ChaCha8Rng,
    ) -> OnlinePresence {
        let activity_level = Self::activity_level(input.age, rng);
        let activity_mult = Self::activity_multiplier(activity_level);
        let age_mult = if input.age < 25 {
            rng.random_range(1.2..2.0)
        } else if input.age > 50 {
            rng.random_range(0.5..0.8)
        } else {
            1.0
        };
        let current_year = input.today.year();

        let mut social_media = Vec::new();
        for (platform, launch_year, adoption) in Self::platform_pool(input.age) {
            if !rng.random_bool(*adoption) {
                continue;
            }
            let (_, f_lo, f_hi, p_lo, p_hi) = FOLLOWER_BASE
                .iter()
                .find(|(name, ..)| name == platform)
                .copied()
                .unwrap_or((platform, 50, 500, 10, 300));
            let followers =
                (f64::from(rng.random_range(f_lo..=f_hi)) * activity_mult * age_mult) as u32;
            let following = (f64::from(followers) * rng.random_range(0.5..2.5)) as u32;
            let posts = if p_hi > p_lo {
                (f64::from(rng.random_range(p_lo..=p_hi)) * activity_mult) as u32
            } else {
                0
            };

            // Account cannot predate the platform or the user turning 13.
            let thirteenth_year = current_year - input.age as i32 + 13;
            let earliest = (*launch_year).max(thirteenth_year);
            let max_age_years = (current_year - earliest).max(0) as i64;
            let account_created =
                input.today - Duration::days(rng.random_range(30..=(max_age_years * 365 + 31)));

            let is_private = match *platform {
                "Instagram" | "TikTok" if input.age < 25 => rng.random_bool(0.40),
                "Facebook" => rng.random_bool(0.60),
                _ => rng.random_bool(0.25),
            };

            let bio = if rng.random_bool(0.6) {
                let bios = [
                    "Living my best life",
                    "Coffee first",
                    "Dog parent",
                    "Travel | Food | Photos",
                    "Views my own",
                ];
                pick(rng, &bios).map(|b| (*b).to_string())
            } else {
                None
            };

            social_media.push(SocialMediaAccount {
                platform: (*platform).to_string(),
                username: Self::username(platform, input.first_name, input.last_name, rng),
                bio,
                followers,
                following,
                posts,
                engagement_rate: Self::engagement_rate(platform, followers, rng),
                account_created,
                is_private,
                is_verified: rng.random_bool(0.001),
            });
        }

        let account_count = Self::online_account_count(activity_level, rng);
        let mut online_accounts = Vec::new();
        let mut remaining = account_count;
        while remaining > 0 {
            for (category, services) in ACCOUNT_CATEGORIES {
                if remaining == 0 {
                    break;
                }
                if rng.random_bool(0.5) {
                    if let Some(service) = pick(rng, services) {
                        online_accounts.push(OnlineAccount {
                            service: (*service).to_string(),
                            category: (*category).to_string(),
                            username: Self::username(
                                category,
                                input.first_name,
                                input.last_name,
                                rng,
                            ),
                            created: input.today
                                - Duration::days(rng.random_range(30..3_650)),
                        });
                        remaining -= 1;
                    }
                }
            }
        }

        let primary_email_domain = input
            .primary_email
            .and_then(|email| email.split('@').nth(1))
            .unwrap_or(if input.age > 55 { "aol.com" } else { "gmail.com" })
            .to_string();
        let backup_domains = ["gmail.com", "outlook.com", "yahoo.com", "proton.me"];
        let backup_count = rng.random_range(0..=2);
        let backup_emails = sample_distinct(rng, &backup_domains, backup_count)
            .into_iter()
            .map(|domain| {
                format!(
                    "{}.{}@{domain}",
                    input.first_name.to_lowercase(),
                    rng.random_range(10..100)
                )
            })
            .collect();
        let masked_phone = if rng.random_bool(0.4) {
            Some(format!("***-***-{:04}", rng.random_range(0..10_000)))
        } else {
            None
        };
        let masked_phone = masked_phone.and_then(|phone| vary.make_missing(rng, phone, false));

        let tech_savviness = match input.age {
            0..=29 => rng.random_range(6..=10),
            30..=49 => rng.random_range(4..=9),
            50..=64 => rng.random_range(3..=7),
            _ => rng.random_range(1..=5),
        };

        OnlinePresence {
            social_media,
            online_accounts,
            digital_footprint: DigitalFootprint {
                primary_email_domain,
                backup_emails,
                masked_phone,
                data_breach_count: rng.random_range(0..=4),
            },
            activity_level,
            tech_savviness,
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

    fn presence(age: u32, seed: u64) -> OnlinePresence {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        SocialGenerator.generate(
            SocialInput {
                age,
                first_name: "Jordan",
                last_name: "Reyes",
                primary_email: Some("jordan.reyes@gmail.com"),
                today: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            },
            &clean(),
            &mut rng,
        )
    }

    #[test]
    fn accounts_never_predate_platform_launch() {
        for seed in 0..100 {
            for account in presence(40, seed).social_media {
                let launch = PLATFORMS_35_49
                    .iter()
                    .chain(PLATFORMS_25_34)
                    .find(|(name, ..)| *name == account.platform)
                    .map(|(_, year, _)| *year);
                if let Some(launch) = launch {
                    assert!(
                        account.account_created.year() >= launch,
                        "{} created {} before launch {launch}",
                        account.platform,
                        account.account_created
                    );
                }
            }
        }
    }

    #[test]
    fn young_users_are_more_active() {
        let mut young_followers = 0_u64;
        let mut old_followers = 0_u64;
        for seed in 0..150 {
            young_followers += presence(20, seed)
                .social_media
                .iter()
                .map(|a| u64::from(a.followers))
                .sum::<u64>();
            old_followers += presence(68, seed + 10_000)
                .social_media
                .iter()
                .map(|a| u64::from(a.followers))
                .sum::<u64>();
        }
        assert!(young_followers > old_followers);
    }

    #[test]
    fn engagement_rate_is_capped() {
        for seed in 0..100 {
            for account in presence(25, seed).social_media {
                assert!(account.engagement_rate <= 20.0);
                assert!(account.engagement_rate >= 0.0);
            }
        }
    }

    #[test]
    fn account_count_tracks_activity_level() {
        for seed in 0..100 {
            let p = presence(30, seed);
            let (lo, hi) = match p.activity_level {
                ActivityLevel::Low => (3, 8),
                ActivityLevel::Medium => (8, 15),
                ActivityLevel::High => (15, 25),
                ActivityLevel::VeryHigh => (25, 40),
            };
            assert!(
                (lo..=hi).contains(&p.online_accounts.len()),
                "{} accounts for {:?}",
                p.online_accounts.len(),
                p.activity_level
            );
        }
    }

    #[test]
    fn digital_footprint_uses_primary_email_domain() {
        let p = presence(30, 7);
        assert_eq!(p.digital_footprint.primary_email_domain, "gmail.com");
    }
}
