use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::jobs::JobsConfig;
use super::logging::LoggingConfig;
use super::reaper::ReaperSection;
use crate::settings::{normalize_whitelist_entry, StoredSettings};

const LOCAL_CONFIG_PATH: &str = "idle-reaper.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/idle-reaper/config.toml";

/// Main configuration structure for Idle Reaper
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Initial reaper policy and settings store location
    #[serde(default)]
    pub reaper: ReaperSection,

    /// Background job intervals
    #[serde(default)]
    pub jobs: JobsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. idle-reaper.toml in current directory
    /// 3. /etc/idle-reaper/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(minutes) = overrides.inactive_time {
            self.reaper.inactive_time = minutes;
        }
        if let Some(path) = overrides.settings_path {
            self.reaper.settings_path = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reaper.inactive_time == 0 {
            return Err(ConfigError::Validation(
                "reaper.inactive_time must be at least 1 minute".to_string(),
            ));
        }

        if self.reaper.settings_path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "reaper.settings_path cannot be empty".to_string(),
            ));
        }

        for entry in &self.reaper.whitelist {
            normalize_whitelist_entry(entry)
                .map_err(|e| ConfigError::Validation(format!("reaper.whitelist: {}", e)))?;
        }

        Ok(())
    }

    /// Settings used to seed an empty settings store.
    pub fn initial_settings(&self) -> StoredSettings {
        let whitelist = self
            .reaper
            .whitelist
            .iter()
            .filter_map(|entry| normalize_whitelist_entry(entry).ok())
            .collect();

        StoredSettings {
            inactive_time: Some(self.reaper.inactive_time),
            whitelist: Some(whitelist),
        }
    }

    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub inactive_time: Option<u32>,
    pub settings_path: Option<String>,
    pub log_level: Option<String>,
}
