//! Client construction-time configuration.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Result, SecretsError};
use crate::retry::RetryPolicy;
use crate::types::SecretString;

/// Default freshness window for cached secrets.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Settings for a [`SecretClient`](crate::client::SecretClient).
///
/// Set once at construction, immutable thereafter. The address and token are
/// opaque to this crate: they describe the backend the fetcher talks to, and
/// the token is redacted in Debug output via [`SecretString`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base address.
    pub address: String,

    /// Authentication token for the backend.
    pub auth_token: SecretString,

    /// Freshness window: entries older than this trigger a re-fetch.
    pub ttl: Duration,

    /// Backoff schedule for remote fetches.
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            auth_token: SecretString::default(),
            ttl: DEFAULT_TTL,
            retry: RetryPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Creates a config with default retry behaviour.
    pub fn new(
        address: impl Into<String>,
        auth_token: impl Into<SecretString>,
        ttl: Duration,
    ) -> Self {
        Self { address: address.into(), auth_token: auth_token.into(), ttl, ..Self::default() }
    }

    /// Replace the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// # Environment Variables
    ///
    /// - `CACHETTE_ADDR`: backend base address
    /// - `CACHETTE_TOKEN`: authentication token
    /// - `CACHETTE_TTL_SECS`: freshness window in seconds (default: 300)
    /// - `CACHETTE_MAX_RETRIES`: fetch attempts (default: 3)
    /// - `CACHETTE_BASE_DELAY_MS`: base backoff delay (default: 100)
    /// - `CACHETTE_BACKOFF_MULTIPLIER`: backoff growth factor (default: 2.0)
    pub fn from_env() -> Result<Self> {
        let address = std::env::var("CACHETTE_ADDR").unwrap_or_default();
        let auth_token = std::env::var("CACHETTE_TOKEN").unwrap_or_default().into();

        let ttl = Duration::from_secs(parse_var("CACHETTE_TTL_SECS", DEFAULT_TTL.as_secs())?);
        let retry = RetryPolicy {
            max_attempts: parse_var("CACHETTE_MAX_RETRIES", RetryPolicy::default().max_attempts)?,
            base_delay: Duration::from_millis(parse_var(
                "CACHETTE_BASE_DELAY_MS",
                RetryPolicy::default().base_delay.as_millis() as u64,
            )?),
            multiplier: parse_var(
                "CACHETTE_BACKOFF_MULTIPLIER",
                RetryPolicy::default().multiplier,
            )?,
            ..RetryPolicy::default()
        };

        Ok(Self { address, auth_token, ttl, retry })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| SecretsError::config_error(format!("invalid {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}
