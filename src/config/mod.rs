//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Defaults for the `stats` and `analyze` commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Only count results from the last N days (0 = all)
    #[serde(default = "default_stats_max_days")]
    pub max_days: u32,

    /// Hide archetypes with fewer matches than this
    #[serde(default)]
    pub min_matches: u32,

    /// Show at most this many rows (0 = all)
    #[serde(default)]
    pub max_results: usize,
}

fn default_stats_max_days() -> u32 {
    14
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            max_days: default_stats_max_days(),
            min_matches: 0,
            max_results: 0,
        }
    }
}

/// Defaults for the `scores` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionConfig {
    #[serde(default = "default_competition_max_days")]
    pub max_days: u32,
}

fn default_competition_max_days() -> u32 {
    21
}

impl Default for CompetitionConfig {
    fn default() -> Self {
        Self {
            max_days: default_competition_max_days(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// TOML rule set to use instead of the bundled Pioneer rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules_path: Option<PathBuf>,

    #[serde(default)]
    pub stats: StatsConfig,

    #[serde(default)]
    pub competition: CompetitionConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            rules_path: None,
            stats: StatsConfig::default(),
            competition: CompetitionConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if the file exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            debug!("No config file at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Unknown log level '{}', expected one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.rules_path, None);
        assert_eq!(config.stats.max_days, 14);
        assert_eq!(config.competition.max_days, 21);
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());

        let mut config = AppConfig::default();
        config.log_level = "DEBUG".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_log_level() {
        let mut config = AppConfig::default();
        config.log_level = "loud".to_string();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            data_dir = "/var/lib/deck-meta"

            [stats]
            min_matches = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/deck-meta"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.stats.max_days, 14);
        assert_eq!(config.stats.min_matches, 20);
        assert_eq!(config.competition, CompetitionConfig::default());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        // Should be parseable
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.data_dir, parsed.data_dir);
        assert_eq!(config.stats, parsed.stats);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load_or_default(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_from_file_validates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        std::fs::write(&path, "log_level = \"warn\"\nrules_path = \"rules/modern.toml\"\n").unwrap();
        let config = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.rules_path, Some(PathBuf::from("rules/modern.toml")));

        std::fs::write(&path, "log_level = \"chatty\"\n").unwrap();
        assert!(AppConfig::from_file(&path).is_err());

        std::fs::write(&path, "log_level = [").unwrap();
        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::ParseError(_))
        ));
    }
}
