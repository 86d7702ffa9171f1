use jsonschema::JSONSchema;
use schemars::schema_for;
use serde_json::Value;

use crate::errors::{ConfigError, Result, ValidationIssue, ValidationReport};
use crate::model::GenerationConfig;

/// Config that passed validation, with any non-fatal findings attached.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub config: GenerationConfig,
    pub warnings: Vec<ValidationIssue>,
}

/// JSON Schema for the config format, derived from the model.
pub fn config_schema_json() -> Result<Value> {
    let schema = schema_for!(GenerationConfig);
    serde_json::to_value(&schema).map_err(ConfigError::from)
}

/// Validates raw JSON input against the config schema.
pub fn validate_config_json(value: &Value) -> Result<ValidationReport> {
    let schema_value = config_schema_json()?;
    let compiled =
        JSONSchema::compile(&schema_value).map_err(|err| ConfigError::Schema(err.to_string()))?;

    let mut report = ValidationReport::default();
    if let Err(errors) = compiled.validate(value) {
        for error in errors {
            report.push_error(
                "schema_violation",
                error.instance_path.to_string(),
                error.to_string(),
                None,
            );
        }
    }
    Ok(report)
}

/// Semantic validation beyond the schema shape.
///
/// Returns the config plus warnings when valid, or the full report when any
/// error was found. The generation engine relies on this gate and does not
/// re-validate.
pub fn validate_config(
    config: &GenerationConfig,
) -> std::result::Result<ValidatedConfig, ValidationReport> {
    let mut report = ValidationReport::default();

    if config.record_count == 0 {
        report.push_error(
            "record_count_zero",
            "/record_count",
            "record_count must be at least 1",
            None,
        );
    }
    if config.batch_size == 0 {
        report.push_error(
            "batch_size_zero",
            "/batch_size",
            "batch_size must be at least 1",
            None,
        );
    }
    if config.workers == 0 {
        report.push_error("workers_zero", "/workers", "workers must be at least 1", None);
    } else if u64::from(config.workers) > config.record_count && config.record_count > 0 {
        report.push_warning(
            "workers_exceed_records",
            "/workers",
            format!(
                "{} workers for {} record(s); some partitions will be empty",
                config.workers, config.record_count
            ),
            Some("reduce workers or raise record_count".to_string()),
        );
    }

    for (name, rate) in config.data_quality.rates() {
        let path = format!("/data_quality/{name}");
        if !(0.0..=1.0).contains(&rate) || !rate.is_finite() {
            report.push_error(
                "rate_out_of_range",
                path,
                format!("{name} must be within [0, 1], got {rate}"),
                None,
            );
        } else if rate > 0.5 {
            report.push_warning(
                "rate_unusually_high",
                path,
                format!("{name} of {rate} will degrade most generated values"),
                None,
            );
        }
    }

    let pairs = [
        (
            "addresses",
            config.cardinality.addresses_min,
            config.cardinality.addresses_max,
        ),
        (
            "phones",
            config.cardinality.phones_min,
            config.cardinality.phones_max,
        ),
        (
            "emails",
            config.cardinality.emails_min,
            config.cardinality.emails_max,
        ),
    ];
    for (name, min, max) in pairs {
        if min > max {
            report.push_error(
                "cardinality_inverted",
                format!("/cardinality/{name}_min"),
                format!("{name}_min ({min}) exceeds {name}_max ({max})"),
                None,
            );
        }
    }

    if report.is_ok() {
        Ok(ValidatedConfig {
            config: config.clone(),
            warnings: report.warnings,
        })
    } else {
        Err(report)
    }
}
