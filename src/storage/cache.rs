// src/storage/cache.rs

//! Time-to-live result cache.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// A cached value and when it was stored.
#[derive(Debug)]
pub struct CacheEntry<T> {
    /// Shared, read-only value
    pub value: Arc<T>,
    /// Monotonic store time, used for freshness
    pub fetched_at: Instant,
    /// Wall-clock store time, for display
    pub fetched_at_utc: DateTime<Utc>,
}

impl<T> Clone for CacheEntry<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            fetched_at: self.fetched_at,
            fetched_at_utc: self.fetched_at_utc,
        }
    }
}

/// Holds at most one value, fresh for `ttl` after it was stored.
#[derive(Debug, Clone)]
pub struct TtlCache<T> {
    ttl: Duration,
    entry: Option<CacheEntry<T>>,
}

impl<T> TtlCache<T> {
    /// Create an empty cache.
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// Time a stored value stays fresh.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The value if it is still fresh at `now`.
    pub fn get_fresh(&self, now: Instant) -> Option<Arc<T>> {
        self.entry
            .as_ref()
            .filter(|entry| now.saturating_duration_since(entry.fetched_at) < self.ttl)
            .map(|entry| Arc::clone(&entry.value))
    }

    /// The last stored entry, fresh or not.
    pub fn entry(&self) -> Option<&CacheEntry<T>> {
        self.entry.as_ref()
    }

    /// Replace the cached value wholesale.
    pub fn store(&mut self, value: T, now: Instant) -> Arc<T> {
        let value = Arc::new(value);
        self.entry = Some(CacheEntry {
            value: Arc::clone(&value),
            fetched_at: now,
            fetched_at_utc: Utc::now(),
        });
        value
    }

    /// Drop the cached value.
    pub fn clear(&mut self) {
        self.entry = None;
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}
