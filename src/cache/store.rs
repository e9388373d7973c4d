//! Cache Store Module
//!
//! TTL cache engine: HashMap storage with lazy expiration and an optional
//! LRU-enforced entry bound.

use std::collections::HashMap;
use std::num::NonZeroUsize;

use serde::Serialize;
use tracing::{debug, trace};

use crate::cache::stats::Counters;
use crate::cache::lru::LruTracker;
use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock, DEFAULT_TTL_MS};

// == TTL Cache ==
/// In-memory key/value cache where every entry carries an absolute expiry.
///
/// Expiration is lazy: nothing runs in the background, and expired entries stay
/// in memory until a `get`, `stats` or `clear` touches them. Reads never return
/// an expired value.
///
/// The cache is unbounded unless built with [`TtlCache::with_max_entries`].
#[derive(Debug)]
pub struct TtlCache<V, C = SystemClock> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Access order, present only when bounded
    lru: Option<LruTracker>,
    /// Running hit/miss/removal counters
    counters: Counters,
    /// Time source
    clock: C,
    /// TTL applied by `set`
    default_ttl_ms: u64,
    /// Optional entry bound
    max_entries: Option<NonZeroUsize>,
}

impl<V> TtlCache<V, SystemClock> {
    // == Constructor ==
    /// Creates an unbounded cache on the system clock with the default TTL.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<V> Default for TtlCache<V, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, C: Clock> TtlCache<V, C> {
    /// Creates an unbounded cache reading time from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            lru: None,
            counters: Counters::default(),
            clock,
            default_ttl_ms: DEFAULT_TTL_MS,
            max_entries: None,
        }
    }

    /// Overrides the TTL used by [`TtlCache::set`].
    pub fn with_default_ttl(mut self, ttl_ms: u64) -> Self {
        self.default_ttl_ms = ttl_ms;
        self
    }

    /// Bounds the number of stored entries.
    ///
    /// When a new key arrives at capacity, expired entries are swept first and
    /// then least recently used entries are evicted.
    pub fn with_max_entries(mut self, max_entries: NonZeroUsize) -> Self {
        let mut lru = LruTracker::new();
        for key in self.entries.keys() {
            lru.touch(key);
        }
        self.lru = Some(lru);
        self.max_entries = Some(max_entries);
        self
    }

    pub fn default_ttl_ms(&self) -> u64 {
        self.default_ttl_ms
    }

    pub fn max_entries(&self) -> Option<NonZeroUsize> {
        self.max_entries
    }

    // == Set ==
    /// Stores `value` under `key` with the default TTL.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let ttl_ms = self.default_ttl_ms;
        self.set_with_ttl(key, value, ttl_ms);
    }

    /// Stores `value` under `key`, expiring `ttl_ms` from now.
    ///
    /// Overwrites any previous entry for the key, resetting its expiry. A TTL
    /// of zero stores an entry that no read will ever see.
    pub fn set_with_ttl(&mut self, key: impl Into<String>, value: V, ttl_ms: u64) {
        let key = key.into();

        if !self.entries.contains_key(&key) {
            self.make_room();
        }

        let entry = CacheEntry::new(value, self.clock.now_ms(), ttl_ms);
        if let Some(lru) = self.lru.as_mut() {
            lru.touch(&key);
        }
        self.entries.insert(key, entry);
    }

    // == Get ==
    /// Returns a clone of the live value stored under `key`.
    ///
    /// An entry found expired is removed before returning `None`.
    pub fn get(&mut self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.get_entry(key).map(|entry| entry.value)
    }

    /// Like [`TtlCache::get`], returning the whole entry with its timestamps.
    pub fn get_entry(&mut self, key: &str) -> Option<CacheEntry<V>>
    where
        V: Clone,
    {
        let now = self.clock.now_ms();

        match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => {
                let entry = entry.clone();
                self.counters.hits += 1;
                if let Some(lru) = self.lru.as_mut() {
                    lru.touch(key);
                }
                Some(entry)
            }
            Some(_) => {
                self.entries.remove(key);
                if let Some(lru) = self.lru.as_mut() {
                    lru.remove(key);
                }
                self.counters.expirations += 1;
                self.counters.misses += 1;
                trace!(key, "evicted expired entry on read");
                None
            }
            None => {
                self.counters.misses += 1;
                None
            }
        }
    }

    /// Returns the cached value for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with<F>(&mut self, key: &str, ttl_ms: u64, compute: F) -> V
    where
        V: Clone,
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(key) {
            return value;
        }

        let value = compute();
        self.set_with_ttl(key, value.clone(), ttl_ms);
        value
    }

    // == Delete ==
    /// Removes `key` unconditionally. Returns whether an entry was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        if let Some(lru) = self.lru.as_mut() {
            lru.remove(key);
        }
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Drops every entry, expired or not.
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Some(lru) = self.lru.as_mut() {
            lru.clear();
        }
    }

    // == Purge Expired ==
    /// Removes every expired entry and returns how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();

        let lru = &mut self.lru;
        self.entries.retain(|key, entry| {
            let live = !entry.is_expired_at(now);
            if !live {
                if let Some(lru) = lru.as_mut() {
                    lru.remove(key);
                }
            }
            live
        });

        let removed = before - self.entries.len();
        self.counters.expirations += removed as u64;
        removed
    }

    // == Stats ==
    /// Sweeps expired entries, then reports live count and approximate size.
    ///
    /// The size is the sum of each value's JSON encoding length. Values that
    /// fail to serialize count as zero bytes.
    pub fn stats(&mut self) -> CacheStats
    where
        V: Serialize,
    {
        self.purge_expired();

        let approximate_size_bytes = self
            .entries
            .values()
            .map(|entry| serde_json::to_vec(&entry.value).map_or(0, |bytes| bytes.len()))
            .sum();

        self.counters.snapshot(self.entries.len(), approximate_size_bytes)
    }

    // == Length ==
    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current time according to the cache's clock.
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    // == Capacity ==
    fn make_room(&mut self) {
        let Some(max) = self.max_entries else {
            return;
        };

        if self.entries.len() < max.get() {
            return;
        }

        self.purge_expired();

        while self.entries.len() >= max.get() {
            let Some(oldest) = self.lru.as_mut().and_then(LruTracker::evict_oldest) else {
                break;
            };
            self.entries.remove(&oldest);
            self.counters.evictions += 1;
            debug!(key = %oldest, "evicted least recently used entry");
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use std::sync::Arc;

    fn manual_cache<V>() -> (TtlCache<V, ManualClock>, ManualClock) {
        let clock = ManualClock::new(1_700_000_000_000);
        (TtlCache::with_clock(clock.clone()), clock)
    }

    #[test]
    fn test_store_new() {
        let store: TtlCache<String> = TtlCache::new();
        assert!(store.is_empty());
        assert_eq!(store.default_ttl_ms(), DEFAULT_TTL_MS);
        assert!(store.max_entries().is_none());
    }

    #[test]
    fn test_store_set_and_get() {
        let (mut store, _) = manual_cache();

        store.set("key1", "value1".to_string());

        assert_eq!(store.get("key1"), Some("value1".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let (mut store, _) = manual_cache::<String>();
        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_store_overwrite() {
        let (mut store, _) = manual_cache();

        store.set("key1", 1);
        store.set("key1", 2);

        assert_eq!(store.get("key1"), Some(2));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_default_ttl_expiration() {
        let (mut store, clock) = manual_cache();

        store.set("key1", "value1");
        clock.advance(DEFAULT_TTL_MS - 1);
        assert_eq!(store.get("key1"), Some("value1"));

        clock.advance(1);
        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_store_ttl_expiration_removes_entry() {
        let (mut store, clock) = manual_cache();

        store.set_with_ttl("key1", "value1", 1_000);
        clock.advance(1_001);

        assert_eq!(store.len(), 1, "expired entry stays until touched");
        assert_eq!(store.get("key1"), None);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_store_zero_ttl_never_visible() {
        let (mut store, _) = manual_cache();

        store.set_with_ttl("key1", "value1", 0);
        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_store_read_does_not_extend_expiry() {
        let (mut store, clock) = manual_cache();

        store.set_with_ttl("key1", "value1", 1_000);
        clock.advance(900);
        assert!(store.get("key1").is_some());

        clock.advance(200);
        assert!(store.get("key1").is_none());
    }

    #[test]
    fn test_store_overwrite_resets_expiry() {
        let (mut store, clock) = manual_cache();

        store.set_with_ttl("key1", "old", 1_000);
        clock.advance(900);
        store.set_with_ttl("key1", "new", 1_000);
        clock.advance(900);

        assert_eq!(store.get("key1"), Some("new"));
    }

    #[test]
    fn test_store_delete_is_idempotent() {
        let (mut store, _) = manual_cache();

        store.set("key1", "value1");
        assert!(store.delete("key1"));
        assert!(!store.delete("key1"));
        assert!(!store.delete("never_set"));
        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_store_clear_ignores_expiry() {
        let (mut store, clock) = manual_cache();

        store.set_with_ttl("live", 1, 10_000);
        store.set_with_ttl("stale", 2, 10);
        clock.advance(100);
        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.stats().count, 0);
    }

    #[test]
    fn test_store_stats_sweeps_expired() {
        let (mut store, clock) = manual_cache();

        store.set_with_ttl("short", "a", 1_000);
        store.set_with_ttl("long", "b", 10_000);
        clock.advance(1_500);

        assert_eq!(store.len(), 2);
        let stats = store.stats();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.expirations, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_stats_size_tracks_values() {
        let (mut store, _) = manual_cache();

        store.set("a", "xx".to_string());
        let small = store.stats().approximate_size_bytes;
        assert_eq!(small, 4); // "xx" with quotes

        store.set("b", "y".repeat(100));
        let large = store.stats().approximate_size_bytes;
        assert!(large > small);
    }

    #[test]
    fn test_store_hit_and_miss_counters() {
        let (mut store, clock) = manual_cache();

        store.set_with_ttl("key1", "value1", 1_000);
        store.get("key1");
        store.get("missing");
        clock.advance(2_000);
        store.get("key1");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.expirations, 1);
    }

    #[test]
    fn test_get_or_insert_with_memoizes() {
        let (mut store, clock) = manual_cache();
        let mut calls = 0;

        let first = store.get_or_insert_with("dashboard:stats", 300_000, || {
            calls += 1;
            Arc::new(vec![1, 2, 3])
        });
        clock.advance(60_000);
        let second = store.get_or_insert_with("dashboard:stats", 300_000, || {
            calls += 1;
            Arc::new(vec![9])
        });

        assert_eq!(calls, 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_get_or_insert_with_recomputes_after_expiry() {
        let (mut store, clock) = manual_cache();

        store.get_or_insert_with("k", 1_000, || 1);
        clock.advance(1_000);
        let value = store.get_or_insert_with("k", 1_000, || 2);

        assert_eq!(value, 2);
    }

    #[test]
    fn test_unbounded_store_keeps_no_access_order() {
        let (mut store, _) = manual_cache();

        for i in 0..1_000 {
            store.set(format!("key{}", i), i);
        }
        for i in 0..1_000 {
            assert_eq!(store.get(&format!("key{}", i)), Some(i));
        }

        assert_eq!(store.len(), 1_000);
        assert!(store.lru.is_none());
    }

    #[test]
    fn test_bounding_existing_store_tracks_present_keys() {
        let (mut store, _) = manual_cache();

        store.set("a", 1);
        store.set("b", 2);
        let mut store = store.with_max_entries(NonZeroUsize::new(2).unwrap());
        store.set("c", 3);

        assert_eq!(store.len(), 2);
        assert_eq!(store.lru.as_ref().map(LruTracker::len), Some(2));
        assert!(store.get("a").is_none() ^ store.get("b").is_none());
        assert_eq!(store.get("c"), Some(3));
    }

    #[test]
    fn test_get_entry_exposes_timestamps() {
        let (mut store, clock) = manual_cache();
        let inserted_at = store.now_ms();

        store.set_with_ttl("key1", "value1", 10_000);
        clock.advance(2_500);

        let entry = store.get_entry("key1").unwrap();
        assert_eq!(entry.value, "value1");
        assert_eq!(entry.created_at, inserted_at);
        assert_eq!(entry.ttl_remaining_ms(store.now_ms()), 7_500);
    }

    #[test]
    fn test_bounded_store_evicts_lru() {
        let (store, _) = manual_cache();
        let mut store = store.with_max_entries(NonZeroUsize::new(3).unwrap());

        store.set("key1", "value1");
        store.set("key2", "value2");
        store.set("key3", "value3");
        store.get("key1");
        store.set("key4", "value4");

        assert_eq!(store.len(), 3);
        assert!(store.get("key1").is_some());
        assert!(store.get("key2").is_none());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_bounded_store_prefers_expired_over_lru() {
        let (store, clock) = manual_cache();
        let mut store = store.with_max_entries(NonZeroUsize::new(2).unwrap());

        store.set_with_ttl("old_live", 1, 10_000);
        store.set_with_ttl("stale", 2, 10);
        clock.advance(100);
        store.set("new", 3);

        assert_eq!(store.get("old_live"), Some(1));
        assert_eq!(store.get("new"), Some(3));
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_bounded_store_overwrite_does_not_evict() {
        let (store, _) = manual_cache();
        let mut store = store.with_max_entries(NonZeroUsize::new(2).unwrap());

        store.set("a", 1);
        store.set("b", 2);
        store.set("a", 3);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("b"), Some(2));
    }
}
