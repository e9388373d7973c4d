//! Cache Module
//!
//! In-memory caching with lazy TTL expiration and an optional LRU entry bound.

mod clock;
mod entry;
mod lru;
mod stats;
mod store;


use std::sync::Arc;
use tokio::sync::Mutex;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::TtlCache;

// == Public Constants ==
/// TTL used by `TtlCache::set` when none is configured (five minutes)
pub const DEFAULT_TTL_MS: u64 = 300_000;

/// Cache of JSON values shared between request handlers.
///
/// A mutex rather than a read/write lock: reads and stats may evict, so every
/// operation needs exclusive access.
pub type SharedCache = Arc<Mutex<TtlCache<serde_json::Value>>>;
