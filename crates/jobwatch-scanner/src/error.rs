//! Error types for scraping.

use thiserror::Error;

/// Errors raised while fetching or parsing a vendor response.
///
/// All of these are company-scoped: the orchestrator logs them and moves on.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Connection-level failure after every retry was used
    #[error("request to {url} failed after {attempts} attempt(s): {source}")]
    Transport {
        /// Request URL
        url: String,
        /// Attempts made
        attempts: u32,
        /// Last transport error
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response; never retried
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// Request URL
        url: String,
        /// Response status code
        status: u16,
    },

    /// Response body did not have the expected shape
    #[error("failed to parse {vendor} response: {reason}")]
    Parse {
        /// Vendor whose response failed to parse
        vendor: &'static str,
        /// What was wrong
        reason: String,
    },

    /// Response body was not valid JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An endpoint template produced an unusable URL
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The offending URL
        url: String,
        /// Parser message
        reason: String,
    },

    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Persistence failed
    #[error("store error: {0}")]
    Store(#[from] jobwatch_store::StoreError),
}

/// Result type alias for scanner operations.
pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ScanError::HttpStatus {
            url: "https://api.greenhouse.io/v1/boards/stripe/jobs".to_string(),
            status: 503,
        };
        assert_eq!(
            err.to_string(),
            "HTTP 503 from https://api.greenhouse.io/v1/boards/stripe/jobs"
        );
    }

    #[test]
    fn test_parse_error_display() {
        let err = ScanError::Parse {
            vendor: "Lever",
            reason: "missing href".to_string(),
        };
        assert_eq!(err.to_string(), "failed to parse Lever response: missing href");
    }
}
