//! Timestamped collection cache
//!
//! Fetched collections are stored together with the wall-clock time they
//! were written. Readers decide freshness with a per-resource TTL, so a
//! fresh entry lets the dashboard render without waiting on the network.
//!
//! The cache is strictly best effort. A read that fails or cannot be decoded
//! is a miss, and a write that fails is logged and dropped.
//!
//! # Example
//!
//! ```rust
//! use tourmap_core::cache::{CacheStore, DESTINATIONS_KEY, DESTINATIONS_TTL_MS};
//! use tourmap_core::storage::MemoryStore;
//!
//! let cache = CacheStore::new(MemoryStore::new());
//! cache.write(DESTINATIONS_KEY, &vec!["Intramuros".to_string()]);
//!
//! let entry = cache.read::<Vec<String>>(DESTINATIONS_KEY).unwrap();
//! assert!(CacheStore::<MemoryStore>::is_fresh(&entry, DESTINATIONS_TTL_MS));
//! ```

use crate::error::{Error, Result};
use crate::storage::KeyValueStore;
use chrono::Utc;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Cache key for the destination collection.
pub const DESTINATIONS_KEY: &str = "cache:destinations";
/// Cache key for the category collection.
pub const CATEGORIES_KEY: &str = "cache:categories";

/// Destinations are considered fresh for two minutes.
pub const DESTINATIONS_TTL_MS: i64 = 120_000;
/// Categories change rarely; five minutes.
pub const CATEGORIES_TTL_MS: i64 = 300_000;

/// A cached value and the epoch milliseconds it was written at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// Cached payload
    pub data: T,
    /// Write time, milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl<T> CacheEntry<T> {
    /// Age of the entry relative to `now_ms`.
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms - self.timestamp
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Best-effort cache over any [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct CacheStore<S> {
    store: S,
}

impl<S: KeyValueStore> CacheStore<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Cached entry under `key`. Missing, unreadable and undecodable entries
    /// are all reported as `None`.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<CacheEntry<T>> {
        match self.try_read(key) {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(key, error = %err, "cache read treated as miss");
                None
            }
        }
    }

    /// Same as [`read`](Self::read) but surfaces the failure.
    pub fn try_read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<CacheEntry<T>>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| Error::cache_corruption(key).with_source(e))
    }

    /// Store `data` stamped with the current time. Failures are logged only.
    pub fn write<T: Serialize>(&self, key: &str, data: &T) {
        self.write_at(key, data, now_ms());
    }

    /// Store `data` stamped with `timestamp`. Failures are logged only.
    pub fn write_at<T: Serialize>(&self, key: &str, data: &T, timestamp: i64) {
        if let Err(err) = self.try_write_at(key, data, timestamp) {
            tracing::warn!(key, error = %err, "cache write dropped");
        }
    }

    fn try_write_at<T: Serialize>(&self, key: &str, data: &T, timestamp: i64) -> Result<()> {
        #[derive(Serialize)]
        struct Borrowed<'a, T> {
            data: &'a T,
            timestamp: i64,
        }

        let encoded = serde_json::to_string(&Borrowed { data, timestamp })?;
        self.store.set(key, &encoded)
    }

    /// Drop the entry under `key`.
    pub fn invalidate(&self, key: &str) {
        if let Err(err) = self.store.remove(key) {
            tracing::warn!(key, error = %err, "cache invalidation failed");
        }
    }

    /// True when `entry` was written less than `ttl_ms` ago.
    pub fn is_fresh<T>(entry: &CacheEntry<T>, ttl_ms: i64) -> bool {
        Self::is_fresh_at(entry, ttl_ms, now_ms())
    }

    /// Freshness against an explicit clock. The boundary is exclusive: an
    /// entry exactly `ttl_ms` old is stale.
    pub fn is_fresh_at<T>(entry: &CacheEntry<T>, ttl_ms: i64, now_ms: i64) -> bool {
        entry.age_ms(now_ms) < ttl_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    type Cache = CacheStore<MemoryStore>;

    #[test]
    fn test_write_then_read() {
        let cache = Cache::new(MemoryStore::new());
        cache.write_at(CATEGORIES_KEY, &vec![1, 2, 3], 1_000);

        let entry = cache.read::<Vec<i32>>(CATEGORIES_KEY).unwrap();
        assert_eq!(entry.data, vec![1, 2, 3]);
        assert_eq!(entry.timestamp, 1_000);
    }

    #[test]
    fn test_missing_key_is_miss() {
        let cache = Cache::new(MemoryStore::new());
        assert!(cache.read::<Vec<i32>>(DESTINATIONS_KEY).is_none());
    }

    #[test]
    fn test_corrupted_entry_is_miss() {
        let store = MemoryStore::new();
        store.set(DESTINATIONS_KEY, "{not json").unwrap();
        let cache = Cache::new(store);

        assert!(cache.read::<Vec<i32>>(DESTINATIONS_KEY).is_none());
        let err = cache.try_read::<Vec<i32>>(DESTINATIONS_KEY).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::CacheCorruption);
    }

    #[test]
    fn test_wrong_shape_is_miss() {
        let store = MemoryStore::new();
        store.set(DESTINATIONS_KEY, r#"{"data":"text","timestamp":5}"#).unwrap();
        let cache = Cache::new(store);
        assert!(cache.read::<Vec<i32>>(DESTINATIONS_KEY).is_none());
    }

    #[test]
    fn test_failed_write_is_swallowed() {
        let cache = Cache::new(MemoryStore::with_quota(8));
        cache.write(DESTINATIONS_KEY, &vec!["far too large for the quota"; 4]);
        assert!(cache.read::<Vec<String>>(DESTINATIONS_KEY).is_none());
    }

    #[test]
    fn test_freshness_boundary() {
        let entry = CacheEntry { data: (), timestamp: 10_000 };

        assert!(Cache::is_fresh_at(&entry, 120_000, 10_000));
        assert!(Cache::is_fresh_at(&entry, 120_000, 129_999));
        assert!(!Cache::is_fresh_at(&entry, 120_000, 130_000));
        assert!(!Cache::is_fresh_at(&entry, 120_000, 500_000));
    }

    #[test]
    fn test_recent_write_is_fresh() {
        let cache = Cache::new(MemoryStore::new());
        cache.write(DESTINATIONS_KEY, &"payload");
        let entry = cache.read::<String>(DESTINATIONS_KEY).unwrap();
        assert!(Cache::is_fresh(&entry, DESTINATIONS_TTL_MS));
    }

    #[test]
    fn test_invalidate() {
        let cache = Cache::new(MemoryStore::new());
        cache.write(CATEGORIES_KEY, &1);
        cache.invalidate(CATEGORIES_KEY);
        assert!(cache.read::<i32>(CATEGORIES_KEY).is_none());
    }
}
