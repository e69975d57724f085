// crates/nt-core/src/config.rs - Configuration System
//
// This module provides the configuration schema and loading mechanism for
// nt. Everything has a default, so running without a config file is the
// normal case.
//
// CONFIGURATION HIERARCHY (highest to lowest priority):
// 1. Command-line arguments (--db)
// 2. Environment variables (NT_DB, NT_LOG)
// 3. Config file (<config dir>/nt/config.toml)
// 4. Built-in defaults
//
// Steps 1 and 2 are resolved by clap in the CLI crate; this module covers
// the file and the defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid TOML syntax in {file}: {error}")]
    ParseError { file: String, error: String },

    #[error("Invalid configuration value: {0}")]
    ValidationError(String),

    #[error("I/O error reading config: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Complete configuration schema
///
/// Each section may be omitted from the file; missing sections and fields
/// fall back to their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NtConfig {
    /// Where and how the note database is opened
    #[serde(default)]
    pub storage: StorageConfig,

    /// How notes are shown by `list`, `view` and the browser
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Database file; `~/` is expanded. Unset means the per-user data dir.
    #[serde(default)]
    pub path: Option<String>,

    /// Upper bound on waiting for another process's database lock
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// chrono format for the date column of `nt list`
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// chrono format for timestamps in the browser list
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Insert a soft break after this many non-whitespace characters when
    /// wrapping note bodies. 0 disables.
    #[serde(default = "default_soft_break_width")]
    pub soft_break_width: usize,
}

impl StorageConfig {
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}

/// Configuration loading and management
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from the standard location
    ///
    /// A missing file is not an error. Invalid TOML or invalid values are.
    pub fn load_config() -> ConfigResult<NtConfig> {
        match Self::config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(NtConfig::default()),
        }
    }

    /// Load configuration from a specific file, defaults if it is absent
    pub fn load_from(path: &Path) -> ConfigResult<NtConfig> {
        let config = match Self::try_load_file(path)? {
            Some(config) => config,
            None => NtConfig::default(),
        };

        Self::validate_config(&config)?;
        Ok(config)
    }

    /// Standard config file location following the platform convention:
    /// - Linux: ~/.config/nt/config.toml
    /// - macOS: ~/Library/Application Support/nt/config.toml
    /// - Windows: %APPDATA%\nt\config.toml
    pub fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("nt").join("config.toml"))
    }

    /// Generate a default configuration file with comments
    pub fn generate_default_config() -> String {
        r#"# nt configuration file
#
# Lines starting with # are comments and are ignored.

[storage]
# Database file. Overridden by --db and NT_DB.
# path = "~/notes/notes.db"

# Milliseconds to wait for another nt process to release the database
lock_timeout_ms = 1000

[display]
# Date column of `nt list`
date_format = "%Y-%m-%d"

# Timestamps in the interactive browser
timestamp_format = "%d %b %H:%M"

# Break long words (URLs, tokens) every N characters when wrapping. 0 disables.
soft_break_width = 30
"#
        .to_string()
    }

    fn try_load_file(path: &Path) -> ConfigResult<Option<NtConfig>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;

        let config: NtConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: path.display().to_string(),
            error: e.to_string(),
        })?;

        Ok(Some(config))
    }

    /// Catch values that would only fail later, deep inside a command
    fn validate_config(config: &NtConfig) -> ConfigResult<()> {
        if config.storage.lock_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "storage.lock_timeout_ms must be greater than 0".to_string(),
            ));
        }

        if let Some(path) = &config.storage.path {
            if path.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "storage.path cannot be empty; remove it to use the default".to_string(),
                ));
            }
        }

        if config.display.date_format.is_empty() || config.display.timestamp_format.is_empty() {
            return Err(ConfigError::ValidationError(
                "display formats cannot be empty".to_string(),
            ));
        }

        if config.display.soft_break_width == 1 {
            return Err(ConfigError::ValidationError(
                "display.soft_break_width must be 0 (off) or at least 2".to_string(),
            ));
        }

        Ok(())
    }
}

fn default_lock_timeout_ms() -> u64 {
    1000
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}
fn default_timestamp_format() -> String {
    "%d %b %H:%M".to_string()
}
fn default_soft_break_width() -> usize {
    30
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            timestamp_format: default_timestamp_format(),
            soft_break_width: default_soft_break_width(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = NtConfig::default();
        assert!(ConfigManager::validate_config(&config).is_ok());
        assert_eq!(config.storage.lock_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let parsed: NtConfig = toml::from_str(&ConfigManager::generate_default_config()).unwrap();
        assert_eq!(parsed.storage.lock_timeout_ms, 1000);
        assert_eq!(parsed.display.date_format, "%Y-%m-%d");
        assert_eq!(parsed.display.soft_break_width, 30);
        assert!(parsed.storage.path.is_none());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\npath = \"~/n.db\"\n").unwrap();

        let config = ConfigManager::load_from(&path).unwrap();
        assert_eq!(config.storage.path.as_deref(), Some("~/n.db"));
        assert_eq!(config.storage.lock_timeout_ms, 1000);
        assert_eq!(config.display.timestamp_format, "%d %b %H:%M");
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = ConfigManager::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(config.storage.path.is_none());
    }

    #[test]
    fn test_invalid_toml_reports_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage\n").unwrap();

        let err = ConfigManager::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_validation_rules() {
        let mut config = NtConfig::default();
        config.storage.lock_timeout_ms = 0;
        assert!(ConfigManager::validate_config(&config).is_err());

        let mut config = NtConfig::default();
        config.display.soft_break_width = 1;
        assert!(ConfigManager::validate_config(&config).is_err());

        let mut config = NtConfig::default();
        config.display.soft_break_width = 0;
        assert!(ConfigManager::validate_config(&config).is_ok());

        let mut config = NtConfig::default();
        config.storage.path = Some("  ".to_string());
        assert!(ConfigManager::validate_config(&config).is_err());
    }
}
