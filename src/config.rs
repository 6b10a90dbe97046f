//! Engine configuration, read from YAML
//!
//! ```yaml
//! media_folder: ../resources/photos/
//! max_ancestor_depth: 64
//! shadow_separator: "_"
//! output_dir: data
//! surname_rules:
//!   - sex: f
//!     forbidden_suffix: ий
//!     expected: а
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use crate::graph::Sex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A surname/sex consistency rule: a person of `sex` whose surname ends in
/// `forbidden_suffix` is reported, suggesting `expected` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurnameRule {
    pub sex: Sex,
    pub forbidden_suffix: String,
    pub expected: String,
}

impl SurnameRule {
    pub fn new(sex: Sex, forbidden_suffix: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            sex,
            forbidden_suffix: forbidden_suffix.into(),
            expected: expected.into(),
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineageConfig {
    /// Prefix joined to the bare file name of every media record
    pub media_folder: String,
    /// Generation cap for ancestor enumeration
    pub max_ancestor_depth: usize,
    /// Text between an id and the counter of a shadow id
    pub shadow_separator: String,
    /// Where the CLI writes projections
    pub output_dir: PathBuf,
    pub surname_rules: Vec<SurnameRule>,
}

impl Default for LineageConfig {
    fn default() -> Self {
        Self {
            media_folder: "../resources/photos/".to_string(),
            max_ancestor_depth: 64,
            shadow_separator: "_".to_string(),
            output_dir: PathBuf::from("data"),
            surname_rules: vec![
                SurnameRule::new(Sex::Female, "ий", "а"),
                SurnameRule::new(Sex::Male, "ська", "ий"),
            ],
        }
    }
}

impl LineageConfig {
    /// Parse and validate YAML text
    pub fn from_yaml(text: &str) -> ConfigResult<Self> {
        // An empty document deserializes to unit, not a map
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// Default config location (`<config dir>/lineage/config.yaml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lineage").join("config.yaml"))
    }

    /// Load the explicit path if given, else the default location if a file
    /// exists there, else built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.max_ancestor_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_ancestor_depth must be at least 1".to_string(),
            ));
        }
        if self.shadow_separator.is_empty() {
            return Err(ConfigError::Invalid(
                "shadow_separator must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_fields_take_defaults() {
        let config = LineageConfig::from_yaml("max_ancestor_depth: 8\n").unwrap();
        assert_eq!(config.max_ancestor_depth, 8);
        assert_eq!(config.shadow_separator, "_");
        assert_eq!(config.surname_rules.len(), 2);
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(LineageConfig::from_yaml("").unwrap(), LineageConfig::default());
    }

    #[test]
    fn surname_rules_parse_sex_codes() {
        let yaml = "surname_rules:\n  - sex: m\n    forbidden_suffix: ova\n    expected: ov\n";
        let config = LineageConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.surname_rules, vec![SurnameRule::new(Sex::Male, "ova", "ov")]);
    }

    #[test]
    fn zero_depth_is_rejected() {
        let err = LineageConfig::from_yaml("max_ancestor_depth: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn empty_separator_is_rejected() {
        let err = LineageConfig::from_yaml("shadow_separator: \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let err = LineageConfig::from_yaml("max_ancestor_depth: [oops\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "media_folder: photos/").unwrap();
        let config = LineageConfig::load(file.path()).unwrap();
        assert_eq!(config.media_folder, "photos/");
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = LineageConfig::load("/nonexistent/lineage.yaml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/lineage.yaml"));
    }

    #[test]
    fn resolve_prefers_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "output_dir: out").unwrap();
        let config = LineageConfig::resolve(Some(file.path())).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }
}
