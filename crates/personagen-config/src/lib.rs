//! Generation configuration: file loading, schema validation and the
//! validated-config contract consumed by the generation engine.

pub mod errors;
pub mod load;
pub mod model;
pub mod validate;

pub use errors::{ConfigError, IssueSeverity, Result, ValidationIssue, ValidationReport};
pub use load::{load_config, load_config_json, load_config_toml};
pub use model::{
    CardinalityLimits, DataQualityProfile, FeatureToggles, GenerationConfig, CONFIG_VERSION,
};
pub use validate::{config_schema_json, validate_config, validate_config_json, ValidatedConfig};
