//! Freshness-aware secret client.
//!
//! Orchestrates cache lookups, retried remote fetches, cache population,
//! and stale fallback:
//!
//! 1. A cached entry younger than the freshness window is returned directly;
//!    the fetcher is not invoked.
//! 2. An absent or expired entry triggers the retrying fetch. Expiry never
//!    short-circuits to the stale value without attempting a refresh.
//! 3. A successful fetch replaces the cached entry wholesale and returns the
//!    fresh value.
//! 4. When every attempt fails, a previously cached entry (fresh or stale)
//!    is returned instead of the error; with nothing cached, the caller gets
//!    [`SecretsError::BackendUnavailable`].
//!
//! Per key the lifecycle is `Absent → Fresh → Stale → (re-fetch) → Fresh`,
//! with invalidation returning a key to `Absent`.
//!
//! # Example
//!
//! ```rust,ignore
//! use cachette::{ClientConfig, EnvVarFetcher, SecretClient};
//! use std::time::Duration;
//!
//! let config = ClientConfig::new(
//!     "https://vault.internal:8200",
//!     "s.token",
//!     Duration::from_secs(300),
//! );
//! let client = SecretClient::new(EnvVarFetcher::new(), config);
//!
//! // First call fetches from the backend, second is served from cache.
//! let secret = client.get_secret("db_password").await?;
//! let cached = client.get_secret("db_password").await?;
//! ```
//!
//! # Concurrency
//!
//! There is no single-flight deduplication: concurrent callers racing a
//! re-fetch for the same key may each invoke the fetcher, and the cache
//! converges to exactly one entry for that key.

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::cache::SecretCache;
use crate::config::ClientConfig;
use crate::error::{Result, SecretsError};
use crate::fetcher::{FetchedSecret, SecretFetcher};
use crate::types::{CacheStats, SecretEntry, SecretString};

/// Caching, retrying secret client.
///
/// Generic over the [`SecretFetcher`] collaborator that talks to the actual
/// backend. Cheap to share across tasks behind an `Arc`.
pub struct SecretClient<F: SecretFetcher> {
    fetcher: F,
    cache: SecretCache,
    config: ClientConfig,
}

impl<F: SecretFetcher> SecretClient<F> {
    /// Creates a client with an empty cache.
    pub fn new(fetcher: F, config: ClientConfig) -> Self {
        Self { fetcher, cache: SecretCache::new(), config }
    }

    /// The configuration this client was constructed with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Retrieve a secret, serving from cache while the entry is fresh.
    ///
    /// Returns the freshest value available: cached if within the freshness
    /// window, freshly fetched otherwise, and the stale cached value as a
    /// last resort when the backend stays unreachable through all retries.
    /// The caller gets no explicit signal distinguishing fresh from stale;
    /// the stale path is logged at warn level.
    ///
    /// # Errors
    ///
    /// [`SecretsError::BackendUnavailable`] when every fetch attempt failed
    /// and no cached entry exists for the key.
    pub async fn get_secret(&self, key: &str) -> Result<SecretString> {
        let cached = self.cache.get(key).await;

        if let Some(entry) = &cached {
            if !entry.is_expired(self.config.ttl) {
                return Ok(entry.value().clone());
            }
            debug!(key = %key, version = entry.version(), "Cached secret expired, re-fetching");
        }

        match self.fetch_with_retry(key).await {
            Ok(fetched) => {
                let FetchedSecret { value, version } = fetched;
                self.cache.insert(key, SecretEntry::new(value.clone(), version)).await;
                Ok(value)
            }
            Err(err) => match cached {
                // The expired entry read above still backs the fallback path.
                // Reusing it keeps fallback reads out of the hit/miss counters.
                Some(entry) => {
                    warn!(
                        key = %key,
                        error = %err,
                        "Backend unreachable, serving stale cached secret"
                    );
                    Ok(entry.value().clone())
                }
                None => Err(err),
            },
        }
    }

    /// Fetch with bounded retries, sleeping the policy's backoff delay
    /// between attempts.
    async fn fetch_with_retry(&self, key: &str) -> Result<FetchedSecret> {
        let policy = &self.config.retry;
        let mut last_err = SecretsError::fetch_failed("no fetch attempts were made");

        for attempt in 0..policy.max_attempts {
            match self.fetcher.fetch(key).await {
                Ok(fetched) => return Ok(fetched),
                Err(err) => {
                    warn!(
                        key = %key,
                        attempt = attempt + 1,
                        max_attempts = policy.max_attempts,
                        error = %err,
                        "Remote fetch attempt failed"
                    );
                    last_err = err;
                }
            }
            // No sleep after the final attempt.
            if attempt + 1 < policy.max_attempts {
                sleep(policy.delay_for_attempt(attempt)).await;
            }
        }

        Err(SecretsError::backend_unavailable(policy.max_attempts, last_err))
    }

    /// Force a fresh fetch for a key, bypassing the freshness check.
    ///
    /// Useful after a known rotation. The retry loop still applies, but
    /// there is no stale fallback: the caller explicitly asked for a fresh
    /// value, so a terminal fetch failure is returned as-is.
    pub async fn refresh_secret(&self, key: &str) -> Result<()> {
        let fetched = self.fetch_with_retry(key).await?;
        self.cache.insert(key, SecretEntry::new(fetched.value, fetched.version)).await;
        debug!(key = %key, "Refreshed secret in cache");
        Ok(())
    }

    /// Refresh every currently cached secret.
    pub async fn refresh_all(&self) -> Result<()> {
        let keys = self.cache.keys().await;

        let mut failed = 0usize;
        for key in &keys {
            if let Err(err) = self.refresh_secret(key).await {
                warn!(key = %key, error = %err, "Failed to refresh secret");
                failed += 1;
            }
        }

        if failed == 0 {
            debug!(count = keys.len(), "Refreshed all cached secrets");
            Ok(())
        } else {
            Err(SecretsError::fetch_failed(format!(
                "failed to refresh {} of {} secrets",
                failed,
                keys.len()
            )))
        }
    }

    /// Remove one key's entry from the cache. Other keys are unaffected.
    pub async fn invalidate(&self, key: &str) {
        self.cache.remove(key).await;
    }

    /// Discard the entire cache.
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    /// Current number of cached entries.
    pub async fn cache_size(&self) -> usize {
        self.cache.len().await
    }

    /// Hit/miss telemetry snapshot from the underlying cache.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}
