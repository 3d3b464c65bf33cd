//! Shared secret-bearing types.
//!
//! Everything that carries a secret payload lives here, built around
//! [`SecretString`] so that values are never exposed through logging,
//! debugging, or serialization.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::{Duration, Instant};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string wrapper that redacts its contents in Debug, Display, and
/// serialization, and zeroes its memory on drop.
///
/// Debug output shows `SecretString([REDACTED])`, Display shows `[REDACTED]`,
/// and serialization emits `"[REDACTED]"` rather than the value.
/// Deserialization accepts real values (e.g. from config files). The payload
/// is only reachable through [`SecretString::expose_secret`] or
/// [`SecretString::into_inner`].
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
    /// Creates a new SecretString from a string value.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Exposes the underlying secret value.
    ///
    /// Only call this where the raw value is actually needed; never log or
    /// print the result.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Consumes the SecretString and returns the inner value.
    ///
    /// Prefer [`SecretString::expose_secret`] when a reference suffices.
    pub fn into_inner(mut self) -> String {
        std::mem::take(&mut self.0)
    }

    /// Returns the length of the secret without exposing the value.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Never serialize the actual secret value.
        serializer.serialize_str("[REDACTED]")
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(SecretString(value))
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretString([REDACTED])")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for SecretString {}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Default for SecretString {
    fn default() -> Self {
        Self::new("")
    }
}

/// One cached secret: payload, backend revision, and storage time.
///
/// Entries are immutable once constructed; a refresh replaces the entry
/// wholesale rather than mutating fields in place. There is no background
/// eviction. Freshness is evaluated lazily at read time via
/// [`SecretEntry::is_expired`].
#[derive(Debug, Clone)]
pub struct SecretEntry {
    value: SecretString,
    version: u64,
    cached_at: Instant,
}

impl SecretEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(value: SecretString, version: u64) -> Self {
        Self { value, version, cached_at: Instant::now() }
    }

    /// The secret payload.
    pub fn value(&self) -> &SecretString {
        &self.value
    }

    /// Backend revision that produced this value. Increases (not necessarily
    /// strictly) across revisions of the same key.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// When this entry was stored.
    pub fn cached_at(&self) -> Instant {
        self.cached_at
    }

    /// An entry is fresh while strictly younger than the freshness window.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.cached_at.elapsed() >= ttl
    }
}

/// Point-in-time cache telemetry snapshot.
///
/// Under concurrent mutation, `hits`, `misses`, and `size` may reflect
/// slightly different instants; the counters themselves only ever increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}
