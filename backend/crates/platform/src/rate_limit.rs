//! Rate Limiting Infrastructure
//!
//! Common rate limiting abstractions plus the in-memory fixed-window
//! implementation used by the API handlers.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window. `0` disables limiting.
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    /// Whether this configuration limits anything at all
    pub fn is_enabled(&self) -> bool {
        self.max_requests > 0
    }
}

/// Rate limit check result
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    /// Seconds until the current window expires. Only meaningful on rejection;
    /// always at least 1 so it can be used verbatim as a `Retry-After` value.
    pub retry_after_secs: u64,
}

impl RateLimitResult {
    fn allow(remaining: u32) -> Self {
        Self {
            allowed: true,
            remaining,
            retry_after_secs: 0,
        }
    }

    fn reject(retry_after_secs: u64) -> Self {
        Self {
            allowed: false,
            remaining: 0,
            retry_after_secs,
        }
    }
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Check and increment the counter for `(scope, identity)`.
    ///
    /// `scope` partitions budgets by endpoint (e.g. `"chat"`), `identity`
    /// is the per-client key (usually an IP address).
    async fn check(&self, scope: &str, identity: &str, config: &RateLimitConfig)
    -> RateLimitResult;
}

/// Per-key fixed-window counter
#[derive(Debug, Clone, Copy)]
struct Bucket {
    window_start: Instant,
    count: u32,
}

/// In-memory rate limit store with fixed-window counters.
///
/// All buckets live in one mutex-guarded table keyed by `(scope, identity)`.
/// Memory is bounded: once the table exceeds `max_keys`, stale buckets
/// (older than twice the window) are swept before each check, and any
/// remaining excess is dropped arbitrarily. Eviction is best-effort memory
/// hygiene - a falsely evicted client merely gets one fresh window.
pub struct MemoryRateLimitStore {
    max_keys: usize,
    buckets: Mutex<HashMap<(String, String), Bucket>>,
}

impl MemoryRateLimitStore {
    pub fn new(max_keys: usize) -> Self {
        Self {
            max_keys,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// Current bucket population (mainly for tests and diagnostics)
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A poisoned lock only means a panic mid-check; the counter table is
    // still usable, so recover the guard instead of propagating.
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(String, String), Bucket>> {
        self.buckets.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn evict_locked(buckets: &mut HashMap<(String, String), Bucket>, max_keys: usize, window: Duration) {
        if buckets.len() <= max_keys {
            return;
        }

        // First pass: drop buckets stale for more than two windows
        let stale_after = window * 2;
        buckets.retain(|_, bucket| bucket.window_start.elapsed() < stale_after);

        // Still over the ceiling: drop an arbitrary excess
        if buckets.len() > max_keys {
            let excess = buckets.len() - max_keys;
            let victims: Vec<(String, String)> =
                buckets.keys().take(excess).cloned().collect();
            for key in victims {
                buckets.remove(&key);
            }
            tracing::debug!(evicted = excess, "Rate limit table over capacity, evicted excess buckets");
        }
    }
}

impl RateLimitStore for MemoryRateLimitStore {
    async fn check(
        &self,
        scope: &str,
        identity: &str,
        config: &RateLimitConfig,
    ) -> RateLimitResult {
        // Unlimited configuration: always allow, track nothing
        if !config.is_enabled() {
            return RateLimitResult::allow(u32::MAX);
        }

        let now = Instant::now();
        let mut buckets = self.lock();

        Self::evict_locked(&mut buckets, self.max_keys, config.window);

        let bucket = buckets
            .entry((scope.to_string(), identity.to_string()))
            .or_insert(Bucket {
                window_start: now,
                count: 0,
            });

        let elapsed = now.saturating_duration_since(bucket.window_start);
        if elapsed >= config.window {
            // Window expired - reset
            bucket.window_start = now;
            bucket.count = 0;
        }

        if bucket.count >= config.max_requests {
            let remaining_window = config.window.saturating_sub(elapsed);
            let retry_after = remaining_window.as_secs_f64().ceil() as u64;
            return RateLimitResult::reject(retry_after.max(1));
        }

        bucket.count += 1;
        RateLimitResult::allow(config.max_requests - bucket.count)
    }
}
