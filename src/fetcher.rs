//! Remote fetch seam and the development env-var fetcher.
//!
//! The backend transport (HTTP, mutual TLS, auth handshake) is not this
//! crate's concern: it is abstracted behind [`SecretFetcher`], and the
//! client composes retry, caching, and fallback around whatever
//! implementation it is handed.

use async_trait::async_trait;
use std::env;

use crate::error::{Result, SecretsError};
use crate::types::SecretString;

/// Value and backend revision returned by a successful remote fetch.
#[derive(Debug, Clone)]
pub struct FetchedSecret {
    /// The secret payload. Non-empty on success.
    pub value: SecretString,

    /// Backend revision that produced the value. Increases (not necessarily
    /// strictly) across revisions of the same key.
    pub version: u64,
}

/// The remote secret backend collaborator.
///
/// Implementations must be safe to call concurrently and repeatedly: the
/// client may issue duplicate fetches for the same key from racing tasks,
/// and the retry loop calls again after every failure. All errors are
/// treated uniformly for retry purposes; there is no special-casing by
/// error subtype.
#[async_trait]
pub trait SecretFetcher: Send + Sync {
    /// Fetch the current value and version for a key from the backend.
    async fn fetch(&self, key: &str) -> Result<FetchedSecret>;
}

/// Environment variable prefix for secrets.
const SECRET_PREFIX: &str = "CACHETTE_SECRET_";

/// Environment variable fetcher (development and testing only).
///
/// Reads secrets from `CACHETTE_SECRET_*` environment variables:
///
/// ```bash
/// export CACHETTE_SECRET_DB_PASSWORD="hunter2"
/// ```
///
/// Environment variables carry no revision, so the reported version is
/// always 0. Do not use in production: env vars are visible in process
/// listings and are neither encrypted nor audited.
#[derive(Debug, Clone, Default)]
pub struct EnvVarFetcher;

impl EnvVarFetcher {
    /// Creates a new environment variable fetcher.
    pub fn new() -> Self {
        Self
    }

    /// Converts a secret key to the environment variable name.
    fn key_to_env_var(key: &str) -> String {
        format!("{}{}", SECRET_PREFIX, key.to_uppercase())
    }
}

#[async_trait]
impl SecretFetcher for EnvVarFetcher {
    async fn fetch(&self, key: &str) -> Result<FetchedSecret> {
        let env_var = Self::key_to_env_var(key);

        match env::var(&env_var) {
            Ok(value) => Ok(FetchedSecret { value: value.into(), version: 0 }),
            Err(_) => Err(SecretsError::not_found(format!(
                "'{}' not set in environment (looking for {})",
                key, env_var
            ))),
        }
    }
}
