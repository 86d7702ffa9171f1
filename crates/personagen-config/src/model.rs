use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Contract version for the config format.
pub const CONFIG_VERSION: &str = "0.1";

/// Data-quality noise rates, each a probability in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DataQualityProfile {
    /// Chance a non-required field is nulled.
    pub missing_data_rate: f64,
    /// Chance a text value receives one typo.
    pub typo_rate: f64,
    /// Chance a value is rendered as a near-duplicate variant.
    pub duplicate_rate: f64,
    /// Chance a value is replaced with a type-specific implausible one.
    pub outlier_rate: f64,
    /// Chance a value is re-rendered in an alternate equivalent format.
    pub inconsistency_rate: f64,
}

impl Default for DataQualityProfile {
    fn default() -> Self {
        Self {
            missing_data_rate: 0.05,
            typo_rate: 0.02,
            duplicate_rate: 0.01,
            outlier_rate: 0.01,
            inconsistency_rate: 0.03,
        }
    }
}

impl DataQualityProfile {
    /// A profile with every rate at zero, for clean deterministic output.
    pub fn clean() -> Self {
        Self {
            missing_data_rate: 0.0,
            typo_rate: 0.0,
            duplicate_rate: 0.0,
            outlier_rate: 0.0,
            inconsistency_rate: 0.0,
        }
    }

    pub fn rates(&self) -> [(&'static str, f64); 5] {
        [
            ("missing_data_rate", self.missing_data_rate),
            ("typo_rate", self.typo_rate),
            ("duplicate_rate", self.duplicate_rate),
            ("outlier_rate", self.outlier_rate),
            ("inconsistency_rate", self.inconsistency_rate),
        ]
    }
}

/// Correlation feature toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FeatureToggles {
    /// Enable relationship/family-cluster derivation.
    pub relationships: bool,
    /// Correlate dates across profiles (tenure chains, address history).
    pub temporal_correlation: bool,
    /// Weight industries and area codes by geography.
    pub geographic_correlation: bool,
    /// Generate the financial profile and feed credit score downstream.
    pub financial_correlation: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            relationships: true,
            temporal_correlation: true,
            geographic_correlation: true,
            financial_correlation: true,
        }
    }
}

/// Per-person collection bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CardinalityLimits {
    pub addresses_min: u32,
    pub addresses_max: u32,
    pub phones_min: u32,
    pub phones_max: u32,
    pub emails_min: u32,
    pub emails_max: u32,
    pub jobs_max: u32,
}

impl Default for CardinalityLimits {
    fn default() -> Self {
        Self {
            addresses_min: 1,
            addresses_max: 3,
            phones_min: 1,
            phones_max: 3,
            emails_min: 1,
            emails_max: 3,
            jobs_max: 5,
        }
    }
}

/// Immutable configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GenerationConfig {
    /// Contract version for the config format.
    pub config_version: String,
    /// Total people to generate.
    pub record_count: u64,
    /// Records per export batch.
    pub batch_size: u64,
    /// Logical partitions; partition `i` is seeded with `seed + i`.
    pub workers: u32,
    /// Base seed for reproducibility.
    pub seed: u64,
    pub data_quality: DataQualityProfile,
    pub features: FeatureToggles,
    pub cardinality: CardinalityLimits,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            config_version: CONFIG_VERSION.to_string(),
            record_count: 100,
            batch_size: 1000,
            workers: 1,
            seed: 42,
            data_quality: DataQualityProfile::default(),
            features: FeatureToggles::default(),
            cardinality: CardinalityLimits::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_json() {
        let config = GenerationConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: GenerationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: GenerationConfig = toml::from_str(
            r#"
            record_count = 500
            seed = 7

            [data_quality]
            typo_rate = 0.1
            "#,
        )
        .unwrap();
        assert_eq!(config.record_count, 500);
        assert_eq!(config.seed, 7);
        assert_eq!(config.data_quality.typo_rate, 0.1);
        assert_eq!(config.data_quality.missing_data_rate, 0.05);
        assert_eq!(config.workers, 1);
    }

    #[test]
    fn clean_profile_is_all_zero() {
        for (_, rate) in DataQualityProfile::clean().rates() {
            assert_eq!(rate, 0.0);
        }
    }
}
