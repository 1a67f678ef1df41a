//! Single-slot TTL cache
//!
//! Memoizes exactly one upstream result. Deliberately not a generic
//! key-value cache: only one resource (the calendar feed) is memoized,
//! so one named slot is all the structure this needs.

use std::time::{Duration, Instant};
use tokio::sync::Mutex;

struct SlotEntry<T> {
    value: T,
    expires_at: Instant,
}

/// A single cached value with a time-to-live.
///
/// Readers get a clone while the entry is fresh. The slot itself never
/// fetches: callers check [`get`](TtlSlot::get), perform their fetch
/// unlocked on a miss, and [`store`](TtlSlot::store) on success. Two
/// near-simultaneous misses may both fetch; both writes are idempotent
/// replacements of the same slot.
pub struct TtlSlot<T> {
    ttl: Duration,
    slot: Mutex<Option<SlotEntry<T>>>,
}

impl<T: Clone> TtlSlot<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached value if present and not expired.
    pub async fn get(&self) -> Option<T> {
        let slot = self.slot.lock().await;
        match slot.as_ref() {
            Some(entry) if Instant::now() < entry.expires_at => Some(entry.value.clone()),
            _ => None,
        }
    }

    /// Replace the slot with a fresh value, stamped `now + ttl`.
    pub async fn store(&self, value: T) {
        let mut slot = self.slot.lock().await;
        *slot = Some(SlotEntry {
            value,
            expires_at: Instant::now() + self.ttl,
        });
    }

    /// Drop the cached value, if any.
    pub async fn clear(&self) {
        let mut slot = self.slot.lock().await;
        *slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_slot_misses() {
        let slot: TtlSlot<String> = TtlSlot::new(Duration::from_secs(60));
        assert!(slot.get().await.is_none());
    }

    #[tokio::test]
    async fn test_hit_within_ttl() {
        let slot = TtlSlot::new(Duration::from_secs(60));
        slot.store("payload".to_string()).await;
        assert_eq!(slot.get().await.as_deref(), Some("payload"));
        // Repeated reads keep hitting
        assert_eq!(slot.get().await.as_deref(), Some("payload"));
    }

    #[tokio::test]
    async fn test_expires_after_ttl() {
        let slot = TtlSlot::new(Duration::from_millis(20));
        slot.store("payload".to_string()).await;
        assert!(slot.get().await.is_some());

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(slot.get().await.is_none());
    }

    #[tokio::test]
    async fn test_store_replaces() {
        let slot = TtlSlot::new(Duration::from_secs(60));
        slot.store("old".to_string()).await;
        slot.store("new".to_string()).await;
        assert_eq!(slot.get().await.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_clear() {
        let slot = TtlSlot::new(Duration::from_secs(60));
        slot.store("payload".to_string()).await;
        slot.clear().await;
        assert!(slot.get().await.is_none());
    }
}
