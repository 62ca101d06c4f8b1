//! Session configuration
//!
//! Where the game is saved, how the random source is seeded, and how
//! verbose logging is. Gameplay rules live in `core::constants` and are
//! not configurable.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::error::ConfigError;

/// Default save file, relative to the working directory
pub const DEFAULT_SAVE_PATH: &str = "hammurabi_save.json";

/// Default tracing filter directive
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Configuration for one interactive session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Snapshot file written each year and read at startup
    pub save_path: PathBuf,

    /// Seed for the random source
    ///
    /// `None` seeds from OS entropy. A fixed seed replays the same
    /// prices, harvests, rats and plagues for the same decisions.
    pub seed: Option<u64>,

    /// `tracing_subscriber::EnvFilter` directive, e.g. `"hammurabi=debug"`
    pub log_filter: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            seed: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl SessionConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file. Missing keys take their defaults.
    pub fn load_from_toml(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_toml(&content)
    }

    /// Parse a config from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.save_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("save_path must not be empty".into()));
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid("log_filter must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SessionConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.save_path, PathBuf::from(DEFAULT_SAVE_PATH));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = SessionConfig::parse_toml("seed = 42\n").unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
            save_path = "saves/babylon.json"
            seed = 7
            log_filter = "hammurabi=debug"
        "#;
        let config = SessionConfig::parse_toml(toml_str).unwrap();
        assert_eq!(config.save_path, PathBuf::from("saves/babylon.json"));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.log_filter, "hammurabi=debug");
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let err = SessionConfig::parse_toml("difficulty = \"hard\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_empty_save_path() {
        let err = SessionConfig::parse_toml("save_path = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SessionConfig::load_from_toml(Path::new("/nonexistent/hammurabi.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
