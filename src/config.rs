//! Application configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::patterns::RiskLevel;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scanner settings
    pub scanner: ScannerConfig,

    /// Pattern detection settings
    pub patterns: PatternConfig,

    /// Report settings
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Maximum concurrent target workers
    pub max_threads: usize,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Delay between page fetches within one crawl, in milliseconds
    pub request_delay_ms: u64,

    /// Maximum redirect depth
    pub max_redirects: usize,

    /// Maximum linked script/stylesheet assets fetched per page
    pub asset_scan_cap: usize,

    /// User agent string
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Matches shorter than this are discarded as noise
    pub min_match_length: usize,

    /// Risk tier assigned to detected JWTs (varies by issuer, so configurable)
    pub jwt_risk_level: RiskLevel,

    /// Confidence ceiling for findings extracted from linked script assets
    pub js_confidence_cap: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Secret values are truncated to this many chars in persisted reports
    pub value_truncate: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            max_threads: 3,
            request_timeout: 10,
            request_delay_ms: 500,
            max_redirects: 5,
            asset_scan_cap: 10,
            user_agent: format!("Credscope/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            min_match_length: 10,
            jwt_risk_level: RiskLevel::Medium,
            js_confidence_cap: 0.75,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { value_truncate: 100 }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.display().to_string(),
                    source: e,
                })?;

            let config: Config =
                toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

            tracing::info!("Loaded configuration from {:?}", config_path);
            Ok(config)
        } else {
            tracing::info!("No configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scanner.max_threads == 0 {
            return Err(ConfigError::ValidationError {
                field: "scanner.max_threads".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if self.scanner.request_timeout == 0 {
            return Err(ConfigError::ValidationError {
                field: "scanner.request_timeout".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.patterns.js_confidence_cap) {
            return Err(ConfigError::ValidationError {
                field: "patterns.js_confidence_cap".to_string(),
                reason: "must be between 0.0 and 1.0".to_string(),
            });
        }

        Ok(())
    }

    /// Get default configuration file path
    fn default_config_path() -> Result<PathBuf, ConfigError> {
        let dirs = directories::ProjectDirs::from("io", "credscope", "credscope")
            .ok_or(ConfigError::NoHomeDir)?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get data directory path (log files land here)
    pub fn data_dir() -> Result<PathBuf, ConfigError> {
        let dirs = directories::ProjectDirs::from("io", "credscope", "credscope")
            .ok_or(ConfigError::NoHomeDir)?;

        Ok(dirs.data_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.scanner.max_threads, 3);
        assert_eq!(config.scanner.request_timeout, 10);
        assert_eq!(config.scanner.request_delay_ms, 500);
        assert_eq!(config.scanner.asset_scan_cap, 10);
        assert_eq!(config.patterns.min_match_length, 10);
        assert_eq!(config.patterns.jwt_risk_level, RiskLevel::Medium);
        assert_eq!(config.report.value_truncate, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_threads() {
        let mut config = Config::default();
        config.scanner.max_threads = 0;

        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ValidationError { ref field, .. } if field == "scanner.max_threads"
        ));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[scanner]\nmax_threads = 8\n").unwrap();
        assert_eq!(config.scanner.max_threads, 8);
        assert_eq!(config.scanner.request_timeout, 10);
    }
}
