//! Cache Module
//!
//! Time-bounded in-memory caching used by the read-through store decorator.

mod entry;
mod key;
mod stats;
mod ttl_cache;


// Re-export public types
pub use entry::CacheEntry;
pub use key::OverrideKey;
pub use stats::CacheStats;
pub use ttl_cache::TtlCache;

// == Public Constants ==
/// Default freshness window in seconds
pub const DEFAULT_TTL_SECONDS: u64 = 300;
