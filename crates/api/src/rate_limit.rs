//! Per-client token bucket.

use std::time::Duration;

use axum::http::HeaderMap;
use indexmap::IndexMap;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Client key used when no `x-forwarded-for` header is present.
pub const ANONYMOUS_CLIENT: &str = "anon";

#[derive(Debug, Clone, Copy)]
struct Bucket {
    tokens: u32,
    refilled_at: Instant,
}

/// Whole-token bucket per client key.
///
/// A bucket starts full. Whole `refill` intervals elapsed since the last
/// refill each add one token, up to `capacity`; the time left over from a
/// partial interval is dropped when a refill happens.
///
/// At most `max_clients` buckets are kept; the least recently seen client
/// is evicted first and starts with a full bucket if it comes back.
#[derive(Debug)]
pub struct RateLimiter {
    capacity: u32,
    refill: Duration,
    max_clients: usize,
    /// Buckets in least-recently-seen order (IndexMap preserves insertion order).
    buckets: Mutex<IndexMap<String, Bucket>>,
}

impl RateLimiter {
    pub fn new(capacity: u32, refill: Duration, max_clients: usize) -> Self {
        Self {
            capacity,
            refill,
            max_clients: max_clients.max(1),
            buckets: Mutex::new(IndexMap::new()),
        }
    }

    /// Take one token for `client`. Returns false when the bucket is empty.
    pub async fn allow(&self, client: &str) -> bool {
        let now = Instant::now();
        let mut buckets = self.buckets.lock().await;

        // Move to end (LRU behavior)
        let mut bucket = buckets.shift_remove(client).unwrap_or(Bucket {
            tokens: self.capacity,
            refilled_at: now,
        });

        if !self.refill.is_zero() {
            let earned = now.duration_since(bucket.refilled_at).as_nanos() / self.refill.as_nanos();
            if earned > 0 {
                let earned = u32::try_from(earned).unwrap_or(u32::MAX);
                bucket.tokens = bucket.tokens.saturating_add(earned).min(self.capacity);
                bucket.refilled_at = now;
            }
        }

        let allowed = bucket.tokens > 0;
        if allowed {
            bucket.tokens -= 1;
        }
        buckets.insert(client.to_string(), bucket);

        while buckets.len() > self.max_clients {
            buckets.shift_remove_index(0);
        }

        allowed
    }

    /// Number of clients currently tracked.
    pub async fn clients(&self) -> usize {
        self.buckets.lock().await.len()
    }
}

/// Client key: first `x-forwarded-for` entry, or [`ANONYMOUS_CLIENT`].
pub fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .unwrap_or(ANONYMOUS_CLIENT)
        .to_string()
}
