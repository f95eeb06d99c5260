//! Error types for the store subsystem.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing store files.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read a store file
    #[error("failed to read {path}: {source}")]
    Read {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a store file or create its directory
    #[error("failed to write {path}: {source}")]
    Write {
        /// File or directory being written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_path() {
        let err = StoreError::Write {
            path: PathBuf::from("/data/jobs_found.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to write /data/jobs_found.txt: denied");
    }
}
