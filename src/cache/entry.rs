//! Cache Entry Module
//!
//! A cached value paired with the instant it was inserted.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A single cached record and its insertion time.
///
/// Entries carry no TTL of their own; the owning cache decides freshness
/// with one fixed duration for every entry.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The cached record
    pub value: V,
    /// When the record was read through from the store
    pub inserted_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry inserted at `now`.
    pub fn new(value: V, now: Instant) -> Self {
        Self {
            value,
            inserted_at: now,
        }
    }

    // == Age ==
    /// Time elapsed since insertion, saturating at zero.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.inserted_at)
    }

    // == Is Fresh ==
    /// Checks whether the entry may still be served.
    ///
    /// Boundary condition: the comparison is strict, so an entry whose age
    /// equals the TTL is already expired.
    pub fn is_fresh(&self, ttl: Duration, now: Instant) -> bool {
        self.age(now) < ttl
    }
}
