//! Application configuration.
//!
//! Settings come from an optional TOML file; command-line flags override
//! them afterwards through the `with_*` setters.

use crate::games::tictactoe::Mode;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "tictactoe.toml";

/// Runtime configuration for the game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Mode shown first once the splash ends.
    #[serde(default)]
    start_mode: Mode,

    /// Whether to play the welcome splash on startup.
    #[serde(default = "default_show_welcome")]
    show_welcome: bool,

    /// Input poll interval per frame, in milliseconds.
    #[serde(default = "default_tick_ms")]
    tick_ms: u64,

    /// Where the TUI writes its log.
    #[serde(default = "default_log_file")]
    #[setters(into)]
    log_file: PathBuf,
}

fn default_show_welcome() -> bool {
    true
}

fn default_tick_ms() -> u64 {
    50
}

fn default_log_file() -> PathBuf {
    PathBuf::from("tictactoe_pro.log")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            start_mode: Mode::default(),
            show_welcome: default_show_welcome(),
            tick_ms: default_tick_ms(),
            log_file: default_log_file(),
        }
    }
}

impl AppConfig {
    const MAX_TICK_MS: u64 = 1_000;

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(start_mode = %config.start_mode, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Loads the file the user named, which must exist, or else the
    /// optional [`DEFAULT_CONFIG_FILE`].
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => Self::load_or_default(DEFAULT_CONFIG_FILE),
        }
    }

    /// Poll interval as a [`Duration`].
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 || self.tick_ms > Self::MAX_TICK_MS {
            return Err(ConfigError::new(format!(
                "tick_ms must be between 1 and {}, got {}",
                Self::MAX_TICK_MS,
                self.tick_ms
            )));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = AppConfig::from_toml("start_mode = \"pro\"\nshow_welcome = false\n").unwrap();
        assert_eq!(*config.start_mode(), Mode::Pro);
        assert!(!config.show_welcome());
        assert_eq!(*config.tick_ms(), 50);
    }

    #[test]
    fn test_rejects_bad_tick() {
        let err = AppConfig::from_toml("tick_ms = 0").unwrap_err();
        assert!(err.message.contains("tick_ms"));
        assert!(err.file.ends_with("config.rs"));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(AppConfig::from_toml("colour = \"red\"").is_err());
    }

    #[test]
    fn test_setters_override() {
        let config = AppConfig::default()
            .with_start_mode(Mode::Pro)
            .with_log_file("game.log");
        assert_eq!(*config.start_mode(), Mode::Pro);
        assert_eq!(config.log_file(), &PathBuf::from("game.log"));
    }
}
