//! Data-quality noise injection shared by every domain generator.
//!
//! All operations are probability-gated by the run's [`DataQualityProfile`]
//! and none of them can fail; an unrecognized value kind passes the input
//! through unchanged.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use personagen_config::DataQualityProfile;
use personagen_core::sampling::pick;

/// Value categories with known alternate renderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Name,
    Phone,
    Date,
    Ssn,
    Age,
    Income,
    Email,
}

/// Common misspelling substitutions applied by [`Variability::introduce_typo`].
const MISSPELLINGS: &[(&str, &str)] = &[
    ("ie", "ei"),
    ("ei", "ie"),
    ("th", "ht"),
    ("er", "re"),
    ("on", "no"),
    ("an", "na"),
    ("ou", "uo"),
];

const AGE_OUTLIERS: &[&str] = &["0", "1", "120", "150", "200", "-5"];

const EMAIL_OUTLIERS: &[&str] = &[
    "not-an-email",
    "missing@",
    "@nodomain.com",
    "user@@double.com",
    "spaces in@email.com",
];

const PHONE_OUTLIERS: &[&str] = &["000-000-0000", "123", "999-999-999999", "n/a"];

/// Applies configured imperfection to otherwise-clean values.
#[derive(Debug, Clone)]
pub struct Variability {
    profile: DataQualityProfile,
}

impl Variability {
    pub fn new(profile: DataQualityProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &DataQualityProfile {
        &self.profile
    }

    /// Bernoulli draw with probability `rate`.
    pub fn should_apply(&self, rng: &mut ChaCha8Rng, rate: f64) -> bool {
        let rate = rate.clamp(0.0, 1.0);
        if rate <= 0.0 {
            return false;
        }
        rng.random_bool(rate)
    }

    /// Nulls a non-required value at the missing-data rate.
    pub fn make_missing<T>(&self, rng: &mut ChaCha8Rng, value: T, required: bool) -> Option<T> {
        if !required && self.should_apply(rng, self.profile.missing_data_rate) {
            None
        } else {
            Some(value)
        }
    }

    /// With probability `typo_rate`, applies exactly one typo: adjacent
    /// swap, deletion, doubling, misspelling substitution or a case flip.
    pub fn introduce_typo(&self, rng: &mut ChaCha8Rng, text: &str) -> String {
        if text.is_empty() || !self.should_apply(rng, self.profile.typo_rate) {
            return text.to_string();
        }

        let chars: Vec<char> = text.chars().collect();
        match rng.random_range(0..5_u8) {
            0 if chars.len() >= 2 => {
                let i = rng.random_range(0..chars.len() - 1);
                let mut out = chars.clone();
                out.swap(i, i + 1);
                out.into_iter().collect()
            }
            1 if chars.len() >= 2 => {
                let i = rng.random_range(0..chars.len());
                let mut out = chars.clone();
                out.remove(i);
                out.into_iter().collect()
            }
            2 => {
                let i = rng.random_range(0..chars.len());
                let mut out = chars.clone();
                out.insert(i, chars[i]);
                out.into_iter().collect()
            }
            3 => {
                for (from, to) in MISSPELLINGS {
                    if let Some(pos) = text.find(from) {
                        let mut out = text.to_string();
                        out.replace_range(pos..pos + from.len(), to);
                        return out;
                    }
                }
                text.to_string()
            }
            _ => {
                let i = rng.random_range(0..chars.len());
                let mut out = chars.clone();
                out[i] = if out[i].is_uppercase() {
                    out[i].to_ascii_lowercase()
                } else {
                    out[i].to_ascii_uppercase()
                };
                out.into_iter().collect()
            }
        }
    }

    /// With probability `inconsistency_rate`, re-renders the value in one
    /// of several equivalent formats for its kind.
    pub fn vary_format(&self, rng: &mut ChaCha8Rng, value: &str, kind: ValueKind) -> String {
        if !self.should_apply(rng, self.profile.inconsistency_rate) {
            return value.to_string();
        }
        match kind {
            ValueKind::Phone => vary_phone_format(rng, value),
            ValueKind::Name => vary_name_format(rng, value),
            ValueKind::Date => vary_date_format(rng, value),
            ValueKind::Ssn => vary_ssn_format(rng, value),
            _ => value.to_string(),
        }
    }

    /// With probability `outlier_rate`, replaces the value with a
    /// type-specific implausible one.
    pub fn create_outlier(&self, rng: &mut ChaCha8Rng, value: &str, kind: ValueKind) -> String {
        if !self.should_apply(rng, self.profile.outlier_rate) {
            return value.to_string();
        }
        match kind {
            ValueKind::Age => pick(rng, AGE_OUTLIERS)
                .map(|v| v.to_string())
                .unwrap_or_else(|| value.to_string()),
            ValueKind::Income => {
                if rng.random_bool(0.5) {
                    format!("{:.2}", rng.random_range(1_000_000.0..10_000_000.0))
                } else {
                    "0".to_string()
                }
            }
            ValueKind::Email => pick(rng, EMAIL_OUTLIERS)
                .map(|v| v.to_string())
                .unwrap_or_else(|| value.to_string()),
            ValueKind::Phone => pick(rng, PHONE_OUTLIERS)
                .map(|v| v.to_string())
                .unwrap_or_else(|| value.to_string()),
            _ => value.to_string(),
        }
    }

    /// With probability `inconsistency_rate`, adds uniform noise in
    /// plus/minus `pct * value`.
    pub fn add_noise_to_numeric(&self, rng: &mut ChaCha8Rng, value: f64, pct: f64) -> f64 {
        if !self.should_apply(rng, self.profile.inconsistency_rate) {
            return value;
        }
        let spread = value.abs() * pct;
        if spread <= 0.0 {
            return value;
        }
        value + rng.random_range(-spread..spread)
    }

    /// With probability `missing_data_rate`, truncates to a prefix.
    pub fn create_partial_value(&self, rng: &mut ChaCha8Rng, text: &str) -> String {
        if text.len() < 3 || !self.should_apply(rng, self.profile.missing_data_rate) {
            return text.to_string();
        }
        let chars: Vec<char> = text.chars().collect();
        let keep = (chars.len() * rng.random_range(30..70) / 100).max(1);
        chars[..keep].iter().collect()
    }

    /// With probability `duplicate_rate`, renders a near-duplicate string
    /// variant (whitespace, punctuation or case change).
    pub fn create_duplicate_variation(&self, rng: &mut ChaCha8Rng, text: &str) -> String {
        if text.is_empty() || !self.should_apply(rng, self.profile.duplicate_rate) {
            return text.to_string();
        }
        match rng.random_range(0..4_u8) {
            0 => format!("{text} "),
            1 => format!("{text}."),
            2 => text.to_uppercase(),
            _ => text.to_lowercase(),
        }
    }

    /// Compound growth over elapsed years, for values that drift with time.
    pub fn apply_temporal_drift(&self, rng: &mut ChaCha8Rng, value: f64, years: f64) -> f64 {
        if years <= 0.0 {
            return value;
        }
        let annual_rate: f64 = rng.random_range(0.01..0.04);
        value * (1.0 + annual_rate).powf(years)
    }
}

fn phone_digits(value: &str) -> Option<String> {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 10 { Some(digits) } else { None }
}

fn vary_phone_format(rng: &mut ChaCha8Rng, value: &str) -> String {
    let Some(digits) = phone_digits(value) else {
        return value.to_string();
    };
    let (area, mid, last) = (&digits[0..3], &digits[3..6], &digits[6..10]);
    match rng.random_range(0..5_u8) {
        0 => format!("({area}) {mid}-{last}"),
        1 => format!("{area}-{mid}-{last}"),
        2 => format!("{area}.{mid}.{last}"),
        3 => format!("+1{digits}"),
        _ => digits,
    }
}

fn vary_name_format(rng: &mut ChaCha8Rng, value: &str) -> String {
    let parts: Vec<&str> = value.split_whitespace().collect();
    match rng.random_range(0..4_u8) {
        0 if parts.len() >= 2 => format!("{}, {}", parts[parts.len() - 1], parts[0]),
        1 => value.to_uppercase(),
        2 => value.to_lowercase(),
        _ => value.to_string(),
    }
}

fn vary_date_format(rng: &mut ChaCha8Rng, value: &str) -> String {
    let Ok(date) = chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d") else {
        return value.to_string();
    };
    match rng.random_range(0..4_u8) {
        0 => date.format("%m/%d/%Y").to_string(),
        1 => date.format("%d-%m-%Y").to_string(),
        2 => date.format("%B %-d, %Y").to_string(),
        _ => value.to_string(),
    }
}

fn vary_ssn_format(rng: &mut ChaCha8Rng, value: &str) -> String {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 9 {
        return value.to_string();
    }
    match rng.random_range(0..3_u8) {
        0 => format!("{}-{}-{}", &digits[0..3], &digits[3..5], &digits[5..9]),
        1 => digits.clone(),
        _ => format!("{} {} {}", &digits[0..3], &digits[3..5], &digits[5..9]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use personagen_config::DataQualityProfile;
    use rand::SeedableRng;

    fn always() -> Variability {
        Variability::new(DataQualityProfile {
            missing_data_rate: 1.0,
            typo_rate: 1.0,
            duplicate_rate: 1.0,
            outlier_rate: 1.0,
            inconsistency_rate: 1.0,
        })
    }

    fn never() -> Variability {
        Variability::new(DataQualityProfile::clean())
    }

    #[test]
    fn clean_profile_is_identity() {
        let vary = never();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(vary.introduce_typo(&mut rng, "Jonathan"), "Jonathan");
        assert_eq!(
            vary.vary_format(&mut rng, "555-867-5309", ValueKind::Phone),
            "555-867-5309"
        );
        assert_eq!(vary.make_missing(&mut rng, 42, false), Some(42));
        assert_eq!(vary.add_noise_to_numeric(&mut rng, 100.0, 0.05), 100.0);
    }

    #[test]
    fn required_values_survive_missing() {
        let vary = always();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(vary.make_missing(&mut rng, "kept", true), Some("kept"));
        assert_eq!(vary.make_missing(&mut rng, "gone", false), None);
    }

    #[test]
    fn typo_changes_text() {
        let vary = always();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut changed = 0;
        for _ in 0..50 {
            if vary.introduce_typo(&mut rng, "Elizabeth") != "Elizabeth" {
                changed += 1;
            }
        }
        assert!(changed > 40, "typos applied {changed}/50 times");
    }

    #[test]
    fn phone_format_keeps_digits() {
        let vary = always();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..20 {
            let out = vary.vary_format(&mut rng, "(555) 867-5309", ValueKind::Phone);
            let digits: String = out.chars().filter(|c| c.is_ascii_digit()).collect();
            assert!(digits.ends_with("5558675309"));
        }
    }

    #[test]
    fn malformed_input_passes_through() {
        let vary = always();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(
            vary.vary_format(&mut rng, "not-a-phone", ValueKind::Phone),
            "not-a-phone"
        );
        assert_eq!(
            vary.vary_format(&mut rng, "not-a-date", ValueKind::Date),
            "not-a-date"
        );
    }

    #[test]
    fn age_outliers_come_from_fixed_set() {
        let vary = always();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..20 {
            let out = vary.create_outlier(&mut rng, "34", ValueKind::Age);
            assert!(AGE_OUTLIERS.contains(&out.as_str()));
        }
    }

    #[test]
    fn temporal_drift_grows_value() {
        let vary = never();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let grown = vary.apply_temporal_drift(&mut rng, 1000.0, 10.0);
        assert!(grown > 1000.0);
        assert!(grown < 2000.0);
    }
}
