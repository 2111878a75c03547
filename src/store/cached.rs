//! Cached Store
//!
//! Read-through, write-invalidating TTL cache in front of another
//! [`FeatureConfigStore`]. Features and overrides live in two independent
//! caches, each behind its own lock, so traffic on one never waits on the
//! other.

use std::borrow::Borrow;
use std::fmt::Display;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::cache::{CacheStats, OverrideKey, TtlCache};
use crate::error::Result;
use crate::models::{Feature, FeatureOverride};
use crate::store::FeatureConfigStore;

/// Decorator that caches lookups of an inner store for a fixed TTL.
///
/// - A fresh entry (`age < ttl`) is returned without touching the inner store.
/// - A miss reads through and caches the record; absence is never cached.
/// - Every write goes to the inner store first, then drops the cached entry.
/// - Inner store errors are returned unchanged and never answered from cache.
pub struct CachedStore {
    inner: Arc<dyn FeatureConfigStore>,
    ttl: Duration,
    features: Mapping<String, Feature>,
    overrides: Mapping<OverrideKey, FeatureOverride>,
}

/// One cached mapping and the number of read-throughs waiting on the inner
/// store for it.
struct Mapping<K, V> {
    cache: Mutex<TtlCache<K, V>>,
    pending_fills: AtomicUsize,
}

impl<K, V> Mapping<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn new() -> Self {
        Self {
            cache: Mutex::new(TtlCache::new()),
            pending_fills: AtomicUsize::new(0),
        }
    }

    async fn invalidate(&self, key: K) {
        let mut cache = self.cache.lock().await;
        cache.invalidate(key);
        self.forget_if_idle(&mut cache);
    }

    /// Invalidation marks only matter to fills that started before them.
    /// Fills register under the cache lock, so a zero count seen under the
    /// same lock means none is outstanding.
    fn forget_if_idle(&self, cache: &mut TtlCache<K, V>) {
        if self.pending_fills.load(Ordering::SeqCst) == 0 {
            cache.forget_invalidations();
        }
    }
}

/// Counts a read-through as pending until dropped, including when the
/// caller's future is cancelled mid-fetch.
struct PendingFill<'a>(&'a AtomicUsize);

impl<'a> PendingFill<'a> {
    fn register(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for PendingFill<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl CachedStore {
    /// Wraps `inner` with a cache whose entries stay fresh for `ttl`.
    pub fn new(inner: Arc<dyn FeatureConfigStore>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            features: Mapping::new(),
            overrides: Mapping::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Statistics of the feature cache and the override cache.
    pub async fn stats(&self) -> (CacheStats, CacheStats) {
        let features = self.features.cache.lock().await.stats();
        let overrides = self.overrides.cache.lock().await.stats();
        (features, overrides)
    }

    /// Drops expired entries from both caches. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let features = self.features.cache.lock().await.purge_expired(self.ttl, now);
        let overrides = self.overrides.cache.lock().await.purge_expired(self.ttl, now);
        features + overrides
    }
}

/// Serves `key` from `mapping` when fresh, otherwise awaits `fetch`.
///
/// The lock is released while `fetch` runs. The fetched record is stored
/// unless this key was invalidated in the meantime, so a read that raced
/// with a write to the same key cannot leave the pre-write record behind.
async fn read_through<K, Q, V, Fut>(
    mapping: &Mapping<K, V>,
    ttl: Duration,
    kind: &'static str,
    key: &Q,
    fetch: Fut,
) -> Result<Option<V>>
where
    K: Eq + Hash + Borrow<Q>,
    Q: Hash + Eq + ToOwned<Owned = K> + Display + ?Sized,
    V: Clone,
    Fut: Future<Output = Result<Option<V>>>,
{
    let (generation, pending) = {
        let mut cache = mapping.cache.lock().await;
        if let Some(value) = cache.get(key, ttl, Instant::now()) {
            debug!(kind, %key, "cache hit");
            return Ok(Some(value));
        }
        (
            cache.generation(),
            PendingFill::register(&mapping.pending_fills),
        )
    };

    debug!(kind, %key, "cache miss, reading through");
    let fetched = fetch.await?;

    let mut cache = mapping.cache.lock().await;
    match &fetched {
        Some(value) => {
            let stored =
                cache.insert_if_current(key.to_owned(), value.clone(), generation, Instant::now());
            if !stored {
                debug!(kind, %key, "skipped populating after concurrent invalidation");
            }
        }
        None => {
            cache.remove(key);
        }
    }
    drop(pending);
    mapping.forget_if_idle(&mut cache);
    Ok(fetched)
}

#[async_trait]
impl FeatureConfigStore for CachedStore {
    async fn create_feature(&self, feature: Feature) -> Result<Feature> {
        let name = feature.feature_name.clone();
        let created = self.inner.create_feature(feature).await?;
        debug!(feature = %name, "invalidating feature cache");
        self.features.invalidate(name).await;
        Ok(created)
    }

    async fn get_feature(&self, feature_name: &str) -> Result<Option<Feature>> {
        read_through(
            &self.features,
            self.ttl,
            "feature",
            feature_name,
            self.inner.get_feature(feature_name),
        )
        .await
    }

    async fn create_override(
        &self,
        feature_name: &str,
        feature_override: FeatureOverride,
    ) -> Result<FeatureOverride> {
        let key = OverrideKey::new(feature_name, feature_override.user_id.as_str());
        let created = self
            .inner
            .create_override(feature_name, feature_override)
            .await?;
        debug!(%key, "invalidating override cache");
        self.overrides.invalidate(key).await;
        Ok(created)
    }

    async fn get_override(
        &self,
        feature_name: &str,
        user_id: &str,
    ) -> Result<Option<FeatureOverride>> {
        let key = OverrideKey::new(feature_name, user_id);
        read_through(
            &self.overrides,
            self.ttl,
            "override",
            &key,
            self.inner.get_override(feature_name, user_id),
        )
        .await
    }

    async fn delete_override(
        &self,
        feature_name: &str,
        user_id: &str,
    ) -> Result<Option<FeatureOverride>> {
        let deleted = self.inner.delete_override(feature_name, user_id).await?;
        let key = OverrideKey::new(feature_name, user_id);
        debug!(%key, found = deleted.is_some(), "invalidating override cache");
        self.overrides.invalidate(key).await;
        Ok(deleted)
    }
}
