//! Core error types for Jobwatch.
//!
//! This module defines the central error type shared by the library crates
//! and the configuration errors raised while loading `config.toml`.

use thiserror::Error;

/// Central error type for Jobwatch operations.
#[derive(Error, Debug)]
pub enum JobwatchError {
    /// Validation errors (invalid input, constraints)
    #[error("validation error: {0}")]
    Validation(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `JobwatchError`.
pub type Result<T> = std::result::Result<T, JobwatchError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = JobwatchError::Validation("bad slug".to_string());
        assert_eq!(err.to_string(), "validation error: bad slug");

        let err = ConfigError::InvalidValue {
            field: "scanning.max_attempts".to_string(),
            reason: "must be at least 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value for scanning.max_attempts: must be at least 1"
        );
    }
}
