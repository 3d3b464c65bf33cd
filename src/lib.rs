//! # Cachette
//!
//! Client-side caching layer for remote secret backends. Cachette serves
//! repeated reads from an in-process cache bounded by a freshness window,
//! wraps backend calls in a configurable retry/backoff loop, and degrades to
//! a stale cached value when the backend is transiently unreachable, so
//! callers keep working through an outage instead of failing outright.
//!
//! ## Architecture
//!
//! ```text
//! caller → SecretClient → SecretCache (freshness-aware map + hit/miss stats)
//!                       → SecretFetcher (remote collaborator, retried)
//! ```
//!
//! The backend transport is not part of this crate: anything that can fetch
//! a `(value, version)` pair for a key implements [`SecretFetcher`] and
//! plugs into the client. [`EnvVarFetcher`] ships as a development backend.
//!
//! ## Example
//!
//! ```rust,ignore
//! use cachette::{ClientConfig, EnvVarFetcher, SecretClient};
//! use std::time::Duration;
//!
//! let config = ClientConfig::new(
//!     "https://vault.internal:8200",
//!     "s.vault-token",
//!     Duration::from_secs(300),
//! );
//! let client = SecretClient::new(EnvVarFetcher::new(), config);
//!
//! // First call fetches; calls within the freshness window hit the cache.
//! let secret = client.get_secret("db_password").await?;
//!
//! // Drop a key after a known rotation, or force a re-fetch outright.
//! client.invalidate("db_password").await;
//! client.refresh_secret("db_password").await?;
//! ```
//!
//! ## Security Considerations
//!
//! - Secret payloads travel as [`SecretString`]: redacted in Debug, Display,
//!   and serialization, zeroed on drop.
//! - Cached values live in memory only; nothing is persisted to disk.
//! - Secret values never appear in log output.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod retry;
pub mod types;

// Re-export main types
pub use cache::SecretCache;
pub use client::SecretClient;
pub use config::ClientConfig;
pub use error::{Result, SecretsError};
pub use fetcher::{EnvVarFetcher, FetchedSecret, SecretFetcher};
pub use retry::RetryPolicy;
pub use types::{CacheStats, SecretEntry, SecretString};
