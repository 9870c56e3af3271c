//! A small in-process cache with per-entry time-to-live.
//!
//! Backs the count caches of the listing read models. Entries are
//! dropped lazily on read and eagerly via [`MemoryCache::evict_expired`].

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

// =============================================================================
// MemoryCache
// =============================================================================

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// Thread-safe string-keyed cache with TTL expiry.
pub struct MemoryCache<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> MemoryCache<V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the live value for `key`, removing it when expired.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<V> {
        let expired = {
            let entries = self.entries.read().expect("cache lock poisoned");
            match entries.get(key) {
                None => return None,
                Some(entry) if Instant::now() < entry.expires_at => {
                    return Some(entry.value.clone());
                }
                Some(_) => true,
            }
        };
        if expired {
            self.entries
                .write()
                .expect("cache lock poisoned")
                .remove(key);
        }
        None
    }

    pub fn set(&self, key: impl Into<String>, value: V, time_to_live: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + time_to_live,
        };
        self.entries
            .write()
            .expect("cache lock poisoned")
            .insert(key.into(), entry);
    }

    pub fn remove(&self, key: &str) {
        self.entries
            .write()
            .expect("cache lock poisoned")
            .remove(key);
    }

    /// Drops every entry. Used as a coarse invalidation when the
    /// underlying table mutates.
    pub fn clear(&self) {
        self.entries.write().expect("cache lock poisoned").clear();
    }

    /// Drops all expired entries.
    pub fn evict_expired(&self) {
        let now = Instant::now();
        self.entries
            .write()
            .expect("cache lock poisoned")
            .retain(|_, entry| now < entry.expires_at);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().expect("cache lock poisoned").len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> Default for MemoryCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const LONG_TTL: Duration = Duration::from_secs(60);
    const SHORT_TTL: Duration = Duration::from_millis(1);

    #[rstest]
    fn set_then_get_returns_the_value() {
        let cache = MemoryCache::new();
        cache.set("total", 42u64, LONG_TTL);

        assert_eq!(cache.get("total"), Some(42));
    }

    #[rstest]
    fn get_missing_key_returns_none() {
        let cache: MemoryCache<u64> = MemoryCache::new();

        assert_eq!(cache.get("missing"), None);
    }

    #[rstest]
    fn expired_entries_are_dropped_on_read() {
        let cache = MemoryCache::new();
        cache.set("total", 42u64, SHORT_TTL);
        std::thread::sleep(Duration::from_millis(10));

        assert_eq!(cache.get("total"), None);
        assert!(cache.is_empty());
    }

    #[rstest]
    fn remove_deletes_the_entry() {
        let cache = MemoryCache::new();
        cache.set("total", 42u64, LONG_TTL);
        cache.remove("total");

        assert_eq!(cache.get("total"), None);
    }

    #[rstest]
    fn clear_deletes_everything() {
        let cache = MemoryCache::new();
        cache.set("a", 1u64, LONG_TTL);
        cache.set("b", 2u64, LONG_TTL);
        cache.clear();

        assert!(cache.is_empty());
    }

    #[rstest]
    fn evict_expired_keeps_live_entries() {
        let cache = MemoryCache::new();
        cache.set("stale", 1u64, SHORT_TTL);
        cache.set("live", 2u64, LONG_TTL);
        std::thread::sleep(Duration::from_millis(10));

        cache.evict_expired();

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("live"), Some(2));
    }
}
