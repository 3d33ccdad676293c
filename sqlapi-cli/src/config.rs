//! Whitelist configuration loaded from TOML.
//!
//! ```toml
//! columns = ["material", "weight"]
//! max_depth = 32
//! ```

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use sqlapi::{WhereValidator, is_valid_sql_identifier};
use std::path::Path;

/// Validator settings, from a config file and/or command-line flags.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Whitelisted column names.
    #[serde(default)]
    pub columns: Vec<String>,
    /// Maximum nesting depth; the library default when unset.
    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl Config {
    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse TOML config text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Apply command-line overrides: extra columns are appended, a depth
    /// flag replaces the configured one.
    #[must_use]
    pub fn with_overrides(mut self, columns: &[String], max_depth: Option<usize>) -> Self {
        self.columns.extend(columns.iter().cloned());
        if max_depth.is_some() {
            self.max_depth = max_depth;
        }
        self
    }

    /// Build the validator, rejecting names that are not plain SQL identifiers.
    pub fn validator(&self) -> Result<WhereValidator> {
        if let Some(bad) = self.columns.iter().find(|c| !is_valid_sql_identifier(c)) {
            bail!("Column {bad:?} is not a valid SQL identifier");
        }
        if self.columns.is_empty() {
            log::warn!("No columns whitelisted; every column reference will be rejected");
        }

        let names: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        let validator = WhereValidator::new().allow_columns(&names);
        Ok(match self.max_depth {
            Some(depth) => validator.max_depth(depth),
            None => validator,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml(
            r#"
            columns = ["material", "weight"]
            max_depth = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.columns, vec!["material", "weight"]);
        assert_eq!(config.max_depth, Some(8));
    }

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_toml("colums = [\"material\"]").is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config {
            columns: vec!["material".into()],
            max_depth: Some(4),
        }
        .with_overrides(&["weight".into()], None);
        assert_eq!(config.columns, vec!["material", "weight"]);
        assert_eq!(config.max_depth, Some(4));

        let config = config.with_overrides(&[], Some(10));
        assert_eq!(config.max_depth, Some(10));
    }

    #[test]
    fn test_validator_from_config() {
        let config = Config {
            columns: vec!["material".into(), "weight".into()],
            max_depth: Some(5),
        };
        let validator = config.validator().unwrap();
        assert_eq!(validator.allowed_columns.len(), 2);
        assert_eq!(validator.max_depth, Some(5));
    }

    #[test]
    fn test_validator_default_depth() {
        let config = Config {
            columns: vec!["material".into()],
            max_depth: None,
        };
        assert_eq!(
            config.validator().unwrap().max_depth,
            Some(sqlapi::DEFAULT_MAX_DEPTH)
        );
    }

    #[test]
    fn test_invalid_column_rejected() {
        let config = Config {
            columns: vec!["material".into(), "weight; DROP TABLE bikes".into()],
            max_depth: None,
        };
        let err = config.validator().unwrap_err();
        assert!(err.to_string().contains("not a valid SQL identifier"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/sqlapi.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
