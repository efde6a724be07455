//! Configuration loading for the diplomacy engine.
//!
//! The canonical configuration lives in `concord-config.yaml` at the
//! project root. Every section and field is optional; anything left out
//! falls back to the defaults below.

use std::path::{Path, PathBuf};

use concord_diplomacy::DiplomacyConfig;
use serde::Deserialize;

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "CONCORD_CONFIG";

/// Environment variable overriding `engine.scenario_path`.
pub const SCENARIO_PATH_ENV: &str = "CONCORD_SCENARIO";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration, mirroring `concord-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Negotiation rules.
    #[serde(default)]
    pub diplomacy: DiplomacyConfig,

    /// Log level and output format.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Scenario replay and client sync settings.
    #[serde(default)]
    pub engine: ReplayConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `CONCORD_SCENARIO` overrides `engine.scenario_path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.engine.apply_env_overrides();
        Ok(config)
    }

    /// Where to look for the config file: `CONCORD_CONFIG` if set,
    /// otherwise `concord-config.yaml` in the working directory.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map_or_else(|| PathBuf::from("concord-config.yaml"), PathBuf::from)
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error). `RUST_LOG`
    /// takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Scenario replay and sync configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReplayConfig {
    /// Scenario file to replay.
    #[serde(default = "default_scenario_path")]
    pub scenario_path: PathBuf,

    /// Capacity of the change event channel feeding client sync.
    #[serde(default = "default_sync_channel_capacity")]
    pub sync_channel_capacity: usize,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            scenario_path: default_scenario_path(),
            sync_channel_capacity: default_sync_channel_capacity(),
        }
    }
}

impl ReplayConfig {
    fn apply_env_overrides(&mut self) {
        if let Some(path) = std::env::var_os(SCENARIO_PATH_ENV) {
            self.scenario_path = PathBuf::from(path);
        }
    }
}

fn default_log_level() -> String {
    String::from("info")
}

fn default_scenario_path() -> PathBuf {
    PathBuf::from("scenarios/peace-talks.yaml")
}

const fn default_sync_channel_capacity() -> usize {
    256
}

#[cfg(test)]
mod tests {
    use concord_types::DiplomaticStatus;

    use super::*;

    #[test]
    fn empty_yaml_uses_defaults() {
        let config = EngineConfig::parse("{}").ok();
        assert!(config.is_some());
        let config = config.unwrap_or_default();
        assert_eq!(config.diplomacy.initial_status, DiplomaticStatus::War);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.engine.sync_channel_capacity, 256);
    }

    #[test]
    fn sections_override_defaults() {
        let yaml = r"
diplomacy:
  initial_status: Peace
logging:
  level: debug
  format: json
engine:
  sync_channel_capacity: 16
";
        let config = EngineConfig::parse(yaml).ok();
        assert_eq!(
            config.as_ref().map(|c| c.diplomacy.initial_status),
            Some(DiplomaticStatus::Peace)
        );
        assert_eq!(config.as_ref().map(|c| c.logging.format), Some(LogFormat::Json));
        assert_eq!(
            config.as_ref().map(|c| c.logging.level.as_str()),
            Some("debug")
        );
        assert_eq!(
            config.as_ref().map(|c| c.engine.sync_channel_capacity),
            Some(16)
        );
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = EngineConfig::parse("logging: [not, a, map]");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = EngineConfig::from_file(Path::new("does/not/exist.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
