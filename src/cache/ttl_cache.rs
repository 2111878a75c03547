//! TTL Cache Module
//!
//! A HashMap of timestamped entries checked against a freshness window that
//! the owner passes in. Capacity is unbounded; only time and explicit
//! invalidation remove entries.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

// == TTL Cache ==
/// Key-value map whose entries are served only while younger than a TTL.
///
/// Every invalidation advances a generation counter and marks the key with
/// the new generation. A caller that reads [`TtlCache::generation`] before a
/// slow lookup passes it back to [`TtlCache::insert_if_current`], which
/// refuses the value only if that same key was invalidated in the meantime.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    generation: u64,
    invalidated_at: HashMap<K, u64>,
    stats: CacheStats,
}

impl<K, V> Default for TtlCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            generation: 0,
            invalidated_at: HashMap::new(),
            stats: CacheStats::new(),
        }
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Returns a clone of the cached value if it is younger than `ttl` at `now`.
    ///
    /// Expired entries are left in place; they are superseded by the next
    /// insert or dropped by [`TtlCache::purge_expired`].
    pub fn get<Q>(&mut self, key: &Q, ttl: Duration, now: Instant) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let fresh = self
            .entries
            .get(key)
            .filter(|entry| entry.is_fresh(ttl, now))
            .map(|entry| entry.value.clone());

        match fresh {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        fresh
    }

    // == Generation ==
    /// Number of invalidations performed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // == Insert ==
    /// Stores `value` under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: K, value: V, now: Instant) {
        self.entries.insert(key, CacheEntry::new(value, now));
        self.stats.set_total_entries(self.entries.len());
    }

    /// Stores `value` unless `key` was invalidated after `generation` was
    /// read. Returns whether the value was stored.
    ///
    /// Invalidations of other keys do not affect the outcome.
    pub fn insert_if_current(&mut self, key: K, value: V, generation: u64, now: Instant) -> bool {
        if self
            .invalidated_at
            .get(&key)
            .is_some_and(|&at| at > generation)
        {
            return false;
        }
        self.insert(key, value, now);
        true
    }

    // == Invalidate ==
    /// Drops the entry for `key` because the record was written.
    ///
    /// Always advances the generation and marks `key`, whether or not an
    /// entry existed.
    pub fn invalidate(&mut self, key: K) -> bool {
        self.generation += 1;
        self.stats.record_invalidation();
        let removed = self.remove(&key);
        self.invalidated_at.insert(key, self.generation);
        removed
    }

    /// Drops the per-key invalidation marks.
    ///
    /// Only safe while no caller holds a generation read before the latest
    /// invalidation; afterwards every earlier generation populates freely.
    pub fn forget_invalidations(&mut self) {
        self.invalidated_at.clear();
    }

    // == Remove ==
    /// Drops the entry for `key` without touching the generation.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.entries.remove(key).is_some();
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Purge Expired ==
    /// Removes all entries that are `ttl` old or older at `now`.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self, ttl: Duration, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_fresh(ttl, now));
        self.stats.set_total_entries(self.entries.len());
        before - self.entries.len()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }
}
