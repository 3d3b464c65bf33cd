//! Error types for secret retrieval operations.

use thiserror::Error;

/// Result type for secret retrieval operations.
pub type Result<T> = std::result::Result<T, SecretsError>;

/// Errors that can occur while retrieving secrets.
///
/// Individual fetch failures ([`SecretsError::FetchFailed`]) never escape the
/// retry loop. [`SecretsError::BackendUnavailable`] is the only error surfaced
/// from [`SecretClient::get_secret`](crate::client::SecretClient::get_secret):
/// a caller receiving it can assume no cached value exists for the key and
/// the backend stayed unreachable through every retry attempt.
#[derive(Error, Debug)]
pub enum SecretsError {
    /// Secret not found in the backend.
    #[error("Secret not found: {key}")]
    NotFound { key: String },

    /// A single remote fetch attempt failed. Recovered locally by retrying.
    #[error("Fetch failed: {message}")]
    FetchFailed { message: String },

    /// All retry attempts exhausted with no cached fallback available.
    #[error("backend unavailable after {attempts} retries: {source}")]
    BackendUnavailable {
        attempts: u32,
        #[source]
        source: Box<SecretsError>,
    },

    /// Invalid construction-time configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl SecretsError {
    /// Create a not found error.
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Create a fetch failed error.
    pub fn fetch_failed(message: impl Into<String>) -> Self {
        Self::FetchFailed { message: message.into() }
    }

    /// Wrap the last fetch error once every retry attempt has failed.
    pub fn backend_unavailable(attempts: u32, cause: SecretsError) -> Self {
        Self::BackendUnavailable { attempts, source: Box::new(cause) }
    }

    /// Create a config error.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_constructors() {
        let err = SecretsError::not_found("db_password");
        assert!(matches!(err, SecretsError::NotFound { .. }));
        assert_eq!(err.to_string(), "Secret not found: db_password");

        let err = SecretsError::fetch_failed("connection reset");
        assert!(matches!(err, SecretsError::FetchFailed { .. }));

        let err = SecretsError::config_error("ttl must be positive");
        assert!(matches!(err, SecretsError::ConfigError { .. }));
    }

    #[test]
    fn test_backend_unavailable_wraps_cause_with_attempt_count() {
        let cause = SecretsError::fetch_failed("connection refused");
        let err = SecretsError::backend_unavailable(3, cause);

        assert_eq!(
            err.to_string(),
            "backend unavailable after 3 retries: Fetch failed: connection refused"
        );
    }

    #[test]
    fn test_backend_unavailable_exposes_source() {
        use std::error::Error;

        let err = SecretsError::backend_unavailable(2, SecretsError::fetch_failed("timeout"));
        let source = err.source().expect("source should be set");
        assert!(source.to_string().contains("timeout"));
    }
}
