//! Error types for the roster subsystem.

use thiserror::Error;

/// Errors that can occur in roster operations.
#[derive(Error, Debug)]
pub enum RosterError {
    /// Failed to read a roster file
    #[error("failed to load roster file {path}: {source}")]
    LoadError {
        /// Path to the roster file
        path: String,
        /// Underlying error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to parse roster TOML
    #[error("failed to parse roster TOML in {path}: {source}")]
    ParseError {
        /// Path to the roster file
        path: String,
        /// TOML parse error
        #[source]
        source: toml::de::Error,
    },

    /// Invalid company or tier definition (validation failed)
    #[error("invalid roster entry {name}: {reason}")]
    ValidationError {
        /// Company or tier name being validated
        name: String,
        /// Reason for validation failure
        reason: String,
    },

    /// Roster directory not found
    #[error("roster directory not found at {path}")]
    DirectoryNotFound {
        /// Expected directory path
        path: String,
    },

    /// I/O error while accessing roster files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;
