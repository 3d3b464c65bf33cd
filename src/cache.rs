//! In-memory secret cache with hit/miss telemetry.
//!
//! Provides the storage half of the client: a concurrency-safe map from
//! secret key to [`SecretEntry`] that counts lookups. Presence alone
//! determines hit/miss here; deciding whether a present entry is still fresh
//! is the caller's job.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::types::{CacheStats, SecretEntry};

/// Thread-safe map from secret key to cached entry.
///
/// The map is guarded by an `RwLock`; the hit/miss counters are atomics
/// independent of that lock, so lookups only need the shared lock while the
/// counter totals stay free of lost updates. Counters are monotonically
/// increasing and reflect lookups through [`SecretCache::get`] only.
///
/// Entries are returned by clone: callers cannot mutate a live cached entry
/// through a returned value.
///
/// # Thread Safety
///
/// `Clone` shares the underlying storage and counters, so a cloned cache is
/// a handle onto the same state and can be moved freely across async tasks.
#[derive(Debug, Clone, Default)]
pub struct SecretCache {
    entries: Arc<RwLock<HashMap<String, SecretEntry>>>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl SecretCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an entry by key, recording a hit or miss.
    ///
    /// No freshness evaluation happens here: an expired entry is still a hit.
    pub async fn get(&self, key: &str) -> Option<SecretEntry> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, version = entry.version(), "Cache hit for secret");
                Some(entry.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, "Cache miss for secret");
                None
            }
        }
    }

    /// Insert or replace the entry for a key. Infallible.
    pub async fn insert(&self, key: impl Into<String>, entry: SecretEntry) {
        let key = key.into();
        let mut entries = self.entries.write().await;

        debug!(key = %key, version = entry.version(), "Caching secret");
        entries.insert(key, entry);
    }

    /// Remove the entry for a key. No-op if absent.
    pub async fn remove(&self, key: &str) {
        let mut entries = self.entries.write().await;

        debug!(key = %key, "Invalidating cached secret");
        entries.remove(key);
    }

    /// Discard all entries. Hit/miss counters are not reset.
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        debug!(count = entries.len(), "Clearing entire secret cache");
        entries.clear();
    }

    /// Point-in-time telemetry snapshot.
    ///
    /// `size` and the counters are read at slightly different instants, so
    /// they may not be mutually consistent under concurrent mutation.
    pub async fn stats(&self) -> CacheStats {
        let size = self.entries.read().await.len();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size,
        }
    }

    /// All keys currently cached.
    pub async fn keys(&self) -> Vec<String> {
        self.entries.read().await.keys().cloned().collect()
    }

    /// Number of entries in the cache.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Check if the cache is empty.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
