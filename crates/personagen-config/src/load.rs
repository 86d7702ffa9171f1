use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::errors::{ConfigError, Result};
use crate::model::GenerationConfig;
use crate::validate::validate_config_json;

/// Loads a config file, dispatching on extension (`.toml`, `.json`).
pub fn load_config(path: &Path) -> Result<GenerationConfig> {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("toml") => load_config_toml(path),
        Some("json") => load_config_json(path),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

pub fn load_config_toml(path: &Path) -> Result<GenerationConfig> {
    let raw = fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

/// JSON configs are validated against the derived schema before
/// deserialization so failures carry instance paths.
pub fn load_config_json(path: &Path) -> Result<GenerationConfig> {
    let raw = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&raw)?;
    let report = validate_config_json(&value)?;
    if !report.is_ok() {
        return Err(ConfigError::Invalid(report));
    }
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("personagen-config-{}-{name}", std::process::id()))
    }

    #[test]
    fn loads_toml_config() {
        let path = temp_path("basic.toml");
        fs::write(&path, "record_count = 25\nseed = 3\n").unwrap();
        let config = load_config(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(config.record_count, 25);
        assert_eq!(config.seed, 3);
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = load_config(Path::new("config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn json_with_wrong_types_reports_schema_errors() {
        let path = temp_path("bad.json");
        fs::write(&path, r#"{"record_count": "many"}"#).unwrap();
        let err = load_config(&path).unwrap_err();
        fs::remove_file(&path).ok();
        match err {
            ConfigError::Invalid(report) => assert!(!report.errors.is_empty()),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }
}
