//! Prompt-keyed result cache with TTL expiry and LRU eviction.
//!
//! Entries are keyed by the exact prompt string (case-sensitive, no
//! normalization). An entry is valid while `now - inserted_at < ttl`;
//! expired entries are dropped lazily when their key is looked up. Once the
//! cache holds `capacity` entries, inserting a new key evicts the least
//! recently used one.

use std::time::Duration;

use indexmap::IndexMap;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Default time-to-live for cached results.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(120);

/// Default maximum entries before LRU eviction.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// A cached value and the instant it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub inserted_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() < ttl
    }
}

/// Bounded TTL cache keyed by prompt text.
///
/// Thread-safe; every operation takes the lock for a short, non-async
/// critical section. Two concurrent misses for the same key both compute a
/// value and the last insert wins.
#[derive(Debug)]
pub struct PromptCache<V> {
    /// Uses IndexMap to keep recency order: the first entry is the LRU one.
    entries: Mutex<IndexMap<String, CacheEntry<V>>>,
    ttl: Duration,
    capacity: usize,
}

impl<V: Clone> Default for PromptCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL)
    }
}

impl<V: Clone> PromptCache<V> {
    /// Create a cache holding at most `capacity` entries for `ttl` each.
    ///
    /// A capacity of zero disables caching.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(IndexMap::new()),
            ttl,
            capacity,
        }
    }

    /// Look up a fresh value, marking it as recently used.
    ///
    /// An expired entry is removed and reported as a miss.
    pub async fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().await;

        let entry = entries.shift_remove(key)?;
        if !entry.is_fresh(self.ttl) {
            return None;
        }

        let value = entry.value.clone();
        entries.insert(key.to_string(), entry);
        Some(value)
    }

    /// Store a value, replacing any previous entry for the key.
    pub async fn insert(&self, key: &str, value: V) {
        if self.capacity == 0 {
            return;
        }

        let mut entries = self.entries.lock().await;
        entries.shift_remove(key);
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );

        while entries.len() > self.capacity {
            entries.shift_remove_index(0);
        }
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Remove every entry.
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
