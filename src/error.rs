//! Custom error types for Credscope
//!
//! Typed errors per subsystem, with user-friendly messages at the
//! application boundary. One target's failure never crosses into another
//! target's result; the orchestrator only ever sees `CrawlError`.

use thiserror::Error;

/// Startup errors surfaced to the CLI user
///
/// Fetch and crawl failures never reach this type; they are absorbed
/// into per-target results by the orchestrator.
#[derive(Error, Debug)]
pub enum CredscopeError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Target-list loading errors
    #[error("Loader error: {0}")]
    Loader(#[from] LoaderError),
}

/// Configuration errors, fatal at startup
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {path}")]
    ReadError { path: String, source: std::io::Error },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration value: {field} - {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Could not determine a home directory")]
    NoHomeDir,
}

/// Target-list loader errors, fatal before any crawling starts
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read target list: {path}")]
    ReadError { path: String, source: std::io::Error },

    #[error("Failed to parse target list: {0}")]
    ParseError(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Unsupported target-list format: {0}")]
    UnsupportedFormat(String),

    #[error("Target list is empty")]
    Empty,
}

/// Single-page fetch errors, recovered locally by skipping the URL
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout after {0}s")]
    Timeout(u64),
}

/// Per-target crawl errors, recorded in the batch and never propagated
/// to sibling targets
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Seed URL unreachable: {url} ({reason})")]
    SeedUnreachable { url: String, reason: String },

    #[error("Invalid target URL: {0}")]
    InvalidTarget(String),
}

impl CredscopeError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            CredscopeError::Config(e) => format!("Configuration problem: {}", e.user_hint()),
            CredscopeError::Loader(e) => format!("Target list problem: {}", e.user_hint()),
        }
    }
}

/// Trait for providing user-friendly hints
pub trait UserHint {
    fn user_hint(&self) -> String;
}

impl UserHint for ConfigError {
    fn user_hint(&self) -> String {
        match self {
            ConfigError::ReadError { path, .. } => {
                format!("Could not read '{}'. Check if the file exists and you have read permissions.", path)
            }
            ConfigError::ParseError(_) => {
                "The configuration file has invalid syntax. Check for TOML formatting errors.".into()
            }
            ConfigError::ValidationError { field, reason } => {
                format!("Invalid value for '{}': {}", field, reason)
            }
            ConfigError::NoHomeDir => {
                "No home directory could be determined. Pass --config with an explicit path.".into()
            }
        }
    }
}

impl UserHint for LoaderError {
    fn user_hint(&self) -> String {
        match self {
            LoaderError::ReadError { path, .. } => {
                format!("Could not read '{}'. Check if the file exists.", path)
            }
            LoaderError::ParseError(reason) => {
                format!("The target list could not be parsed: {}", reason)
            }
            LoaderError::MissingColumn(col) => {
                format!("Required column '{}' is missing from the CSV header.", col)
            }
            LoaderError::UnsupportedFormat(ext) => {
                format!("'{}' files are not supported. Use .csv or .json.", ext)
            }
            LoaderError::Empty => "The target list contains no targets.".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_hint_names_column() {
        let err = LoaderError::MissingColumn("url".to_string());
        assert!(err.user_hint().contains("'url'"));
    }

    #[test]
    fn test_user_message_prefixes_subsystem() {
        let err = CredscopeError::Loader(LoaderError::Empty);
        assert!(err.user_message().starts_with("Target list problem"));
    }

    #[test]
    fn test_config_user_message_names_field() {
        let err = CredscopeError::Config(ConfigError::ValidationError {
            field: "scanner.max_threads".to_string(),
            reason: "must be greater than 0".to_string(),
        });
        let message = err.user_message();
        assert!(message.starts_with("Configuration problem"));
        assert!(message.contains("scanner.max_threads"));
    }
}
