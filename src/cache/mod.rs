// src/cache/mod.rs
//! In-memory response cache and in-flight request registry.
//!
//! The cache is a plain mapping from request key to (payload, fetch
//! instant). Entries older than the TTL are ignored on read and
//! overwritten by the next successful fetch; nothing is ever evicted.
//! The key space is bounded by the category set, so unbounded growth is
//! acceptable here.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Time source for cache freshness checks.
///
/// Injected so tests can drive TTL expiry with a manual clock instead of
/// sleeping through real time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Production clock backed by `Instant::now`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    payload: T,
    fetched_at: Instant,
}

/// TTL-bounded response cache keyed by request strings.
///
/// `get` returns a clone of the payload while the entry is fresher than
/// the TTL; `put` unconditionally overwrites. The cache itself cannot
/// fail. Access is safe from any task; at-most-one-fetch-per-key is the
/// job of [`FlightTable`], not this map.
pub struct ResponseCache<T> {
    entries: DashMap<String, CacheEntry<T>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<T: Clone> ResponseCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            clock,
        }
    }

    /// Returns the cached payload if the entry for `key` is fresher than
    /// the TTL. A stale entry stays in the map and is simply skipped.
    pub fn get(&self, key: &str) -> Option<T> {
        let entry = self.entries.get(key)?;
        let age = self.clock.now().saturating_duration_since(entry.fetched_at);
        if age < self.ttl {
            Some(entry.payload.clone())
        } else {
            None
        }
    }

    /// Stores `payload` under `key` with the current timestamp,
    /// overwriting any prior entry.
    pub fn put(&self, key: &str, payload: T) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                payload,
                fetched_at: self.clock.now(),
            },
        );
    }

    /// Number of entries in the map, fresh and stale alike.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-key mutual exclusion for fetches that are about to miss the cache.
///
/// Callers acquire the key's lock, re-check the cache, and only then hit
/// the network. A second trigger for the same key (prefetch timer racing
/// a user click) awaits the first fetch and lands on its cached result
/// instead of issuing a duplicate call.
#[derive(Default)]
pub struct FlightTable {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl FlightTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Awaits the per-key lock. The guard must be held across the
    /// check-cache / fetch / store sequence for that key.
    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}
