//! Server process configuration.
//!
//! Loaded from a TOML file, then overridden by environment variables:
//!
//! ```toml
//! bind_addr = "127.0.0.1:5100"
//! log_level = "info"
//! log_dir = "/var/log/recipebook"
//!
//! [storage]
//! recipes_path = "data/recipes.json"
//! categories_path = "data/categories.json"
//! ```

use recipebook_core::{default_log_level, ConfigError, StorageConfig};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

pub const BIND_ADDR_ENV: &str = "RECIPEBOOK_BIND_ADDR";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub storage: StorageConfig,
    pub log_level: String,
    /// Absolute directory for rotating log files. Unset logs to stderr.
    pub log_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5100)),
            storage: StorageConfig::default(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl ServerConfig {
    /// Reads `path` (defaults when the file is absent), applies environment
    /// overrides and validates the result.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml(path, &text)?
        } else {
            Self::default()
        };
        config.apply_env_with(|key| std::env::var(key).ok())?;
        config.storage.validate()?;
        Ok(config)
    }

    pub fn from_toml(path: &Path, text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_env_with(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        self.storage.apply_env_with(&lookup);
        if let Some(value) = lookup(BIND_ADDR_ENV) {
            self.bind_addr = value.parse().map_err(|err| ConfigError::InvalidValue {
                key: "bind_addr",
                message: format!("`{value}`: {err}"),
            })?;
        }
        Ok(())
    }
}
