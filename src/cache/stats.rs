//! Cache Statistics Module
//!
//! Live-entry snapshot plus running counters.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot returned by `TtlCache::stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of live (unexpired) entries
    pub count: usize,
    /// Approximate serialized size of all live values
    pub approximate_size_bytes: usize,
    /// Lookups that returned a value
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Entries removed because their TTL elapsed
    pub expirations: u64,
    /// Entries removed to respect the entry bound
    pub evictions: u64,
}

impl CacheStats {
    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Counters ==
/// Running counters kept by the store between snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Counters {
    pub hits: u64,
    pub misses: u64,
    pub expirations: u64,
    pub evictions: u64,
}

impl Counters {
    /// Builds a snapshot from the counters and the live-entry figures.
    pub fn snapshot(&self, count: usize, approximate_size_bytes: usize) -> CacheStats {
        CacheStats {
            count,
            approximate_size_bytes,
            hits: self.hits,
            misses: self.misses,
            expirations: self.expirations,
            evictions: self.evictions,
        }
    }
}
