//! Configuration management for the emitter demo.
//!
//! Settings are loaded from a TOML file, with command-line overrides applied
//! on top. A missing file is created with defaults on first run.

use crate::cli::CliArgs;
use event_registry::{BroadcastConfig, OnceRemoval, RegistryConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Errors raised while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration loaded from TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration settings
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Settings shared by every registry the demo creates
    #[serde(default)]
    pub registry: RegistryConfig,
    /// Wildcard settings for the broadcast scenario
    #[serde(default)]
    pub broadcast: BroadcastConfig,
}

/// Logging system configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Whether to output logs in JSON format
    #[serde(default)]
    pub json_format: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// If the file doesn't exist, writes the default configuration to `path`
    /// and returns it.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            let default_config = AppConfig::default();
            std::fs::write(path, toml::to_string_pretty(&default_config)?)?;
            info!("Created default configuration file: {}", path.display());
            Ok(default_config)
        }
    }

    /// Applies command-line overrides on top of the file settings
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(level) = &args.log_level {
            self.logging.level = level.clone();
        }
        if args.json_logs {
            self.logging.json_format = true;
        }
        if let Some(wildcard) = &args.wildcard {
            self.broadcast.wildcard = wildcard.clone();
        }
        if args.literal_once_removal {
            self.broadcast.once_removal = OnceRemoval::WildcardName;
        }
    }

    /// Validates the configuration for consistency and correctness.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid log level: {}. Must be one of: {valid_levels:?}",
                &self.logging.level
            )));
        }

        if self.broadcast.wildcard.is_empty() {
            return Err(ConfigError::Invalid(
                "broadcast.wildcard cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();

        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json_format);
        assert!(config.registry.quiet_events.is_empty());
        assert_eq!(config.broadcast.wildcard, "*");
        assert_eq!(config.broadcast.once_removal, OnceRemoval::PerEvent);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_nonexistent_file_creates_it() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("emitter.toml");

        let config = AppConfig::load_from_file(&path).unwrap();

        assert_eq!(config, AppConfig::default());
        assert!(path.exists());

        let reloaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[logging]
level = "debug"

[registry]
quiet_events = ["tick"]

[broadcast]
once_removal = "wildcard_name"
"#
        )
        .unwrap();

        let config = AppConfig::load_from_file(file.path()).unwrap();

        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.json_format);
        assert_eq!(config.registry.quiet_events, vec!["tick".to_string()]);
        assert_eq!(config.broadcast.wildcard, "*");
        assert_eq!(config.broadcast.once_removal, OnceRemoval::WildcardName);
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[logging\nlevel = ").unwrap();

        let result = AppConfig::load_from_file(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_cli_overrides() {
        let args = CliArgs::try_parse_from([
            "emitter-demo",
            "--log-level",
            "trace",
            "--json-logs",
            "--wildcard",
            "all",
            "--literal-once-removal",
        ])
        .unwrap();

        let mut config = AppConfig::default();
        config.apply_cli_overrides(&args);

        assert_eq!(config.logging.level, "trace");
        assert!(config.logging.json_format);
        assert_eq!(config.broadcast.wildcard, "all");
        assert_eq!(config.broadcast.once_removal, OnceRemoval::WildcardName);
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());

        config.logging.level = "warn".to_string();
        config.broadcast.wildcard.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
