//! Configuration management for modlog

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::logging::{Severity, DEFAULT_RETENTION_DAYS, LOGS_DIR};

/// Name of the config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "modlog.toml";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory that holds log files (default: `logs`, relative to the working directory)
    #[serde(default = "default_logs_dir")]
    pub logs_dir: PathBuf,

    /// Threshold for loggers built from this config (default: DEBUG)
    #[serde(default)]
    pub default_threshold: Severity,

    /// Age in days after which `prune` removes log files (default: 7)
    #[serde(default = "default_retention_days")]
    pub retention_days: u64,
}

fn default_logs_dir() -> PathBuf {
    PathBuf::from(LOGS_DIR)
}

fn default_retention_days() -> u64 {
    DEFAULT_RETENTION_DAYS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logs_dir: default_logs_dir(),
            default_threshold: Severity::default(),
            retention_days: default_retention_days(),
        }
    }
}

impl Config {
    /// Load configuration from the first config file found, or return default
    pub fn load() -> Result<Self> {
        match config_file_candidates().into_iter().find(|p| p.exists()) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}

/// Config file locations in lookup order
///
/// `./modlog.toml` first, then `modlog/config.toml` in the user config directory.
pub fn config_file_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("modlog").join("config.toml"));
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logs_dir, PathBuf::from("logs"));
        assert_eq!(config.default_threshold, Severity::Debug);
        assert_eq!(config.retention_days, 7);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            default_threshold: Severity::Normal,
            ..Config::default()
        };
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("default_threshold = \"NORMAL\""));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parsed: Config = toml::from_str("retention_days = 3").unwrap();
        assert_eq!(parsed.retention_days, 3);
        assert_eq!(parsed.logs_dir, PathBuf::from("logs"));
        assert_eq!(parsed.default_threshold, Severity::Debug);
    }

    #[test]
    fn test_unknown_threshold_rejected() {
        assert!(toml::from_str::<Config>("default_threshold = \"LOUD\"").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("modlog.toml");
        let config = Config {
            logs_dir: temp_dir.path().join("out"),
            default_threshold: Severity::Minimal,
            retention_days: 14,
        };

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_from_missing_file_errors() {
        let temp_dir = TempDir::new().unwrap();
        assert!(Config::load_from(&temp_dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_candidates_start_with_local_file() {
        let candidates = config_file_candidates();
        assert_eq!(candidates[0], PathBuf::from(LOCAL_CONFIG_FILE));
    }
}
