//! Storage configuration.
//!
//! # Responsibility
//! - Describe where the two collection files live.
//! - Reject unusable paths before any store is opened.
//!
//! # Invariants
//! - A validated config has non-blank recipe and category paths.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const RECIPES_PATH_ENV: &str = "RECIPEBOOK_RECIPES_PATH";
pub const CATEGORIES_PATH_ENV: &str = "RECIPEBOOK_CATEGORIES_PATH";

/// Configuration failure. Always fatal at startup.
#[derive(Debug)]
pub enum ConfigError {
    /// Required path setting is absent or blank.
    MissingPath(&'static str),
    /// Config file exists but cannot be read.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Config file content is not valid TOML for the expected shape.
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// A setting has a value outside its domain.
    InvalidValue { key: &'static str, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPath(key) => write!(f, "`{key}` must be set to a non-empty path"),
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
            Self::InvalidValue { key, message } => write!(f, "invalid `{key}`: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::MissingPath(_) | Self::InvalidValue { .. } => None,
        }
    }
}

/// Locations of the recipe and category collection files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub recipes_path: String,
    #[serde(default)]
    pub categories_path: String,
}

impl StorageConfig {
    pub fn new(recipes_path: impl Into<String>, categories_path: impl Into<String>) -> Self {
        Self {
            recipes_path: recipes_path.into(),
            categories_path: categories_path.into(),
        }
    }

    /// Overrides paths from `RECIPEBOOK_RECIPES_PATH` / `RECIPEBOOK_CATEGORIES_PATH`.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Overrides paths from `lookup`, keyed by the environment variable names.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(RECIPES_PATH_ENV) {
            self.recipes_path = path;
        }
        if let Some(path) = lookup(CATEGORIES_PATH_ENV) {
            self.categories_path = path;
        }
    }

    /// # Errors
    /// - `MissingPath` naming the first blank setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recipes_path.trim().is_empty() {
            return Err(ConfigError::MissingPath("recipes_path"));
        }
        if self.categories_path.trim().is_empty() {
            return Err(ConfigError::MissingPath("categories_path"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, StorageConfig, CATEGORIES_PATH_ENV};

    #[test]
    fn validate_rejects_blank_paths() {
        let err = StorageConfig::new("  ", "categories.json")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingPath("recipes_path")));

        let err = StorageConfig::new("recipes.json", "")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingPath("categories_path")));
    }

    #[test]
    fn overrides_replace_only_given_paths() {
        let mut config = StorageConfig::new("a.json", "b.json");
        config.apply_env_with(|key| (key == CATEGORIES_PATH_ENV).then(|| "c.json".to_string()));
        assert_eq!(config, StorageConfig::new("a.json", "c.json"));
        config.validate().unwrap();
    }

    #[test]
    fn deserializes_from_toml_with_missing_keys() {
        let config: StorageConfig = toml::from_str(r#"recipes_path = "r.json""#).unwrap();
        assert_eq!(config.categories_path, "");
        assert!(config.validate().is_err());
    }
}
