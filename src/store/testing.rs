//! In-memory store that records how often it is read.

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::error::{FlagError, Result};
use crate::models::{Feature, FeatureOverride};
use crate::store::FeatureConfigStore;

#[derive(Default)]
pub struct CountingStore {
    features: Mutex<HashMap<String, Feature>>,
    overrides: Mutex<HashMap<(String, String), FeatureOverride>>,
    feature_reads: AtomicUsize,
    override_reads: AtomicUsize,
    failing: AtomicBool,
    yield_on_read: bool,
    gate: Option<Arc<Notify>>,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Yield to the scheduler inside every read so concurrent callers interleave.
    pub fn with_yield(mut self) -> Self {
        self.yield_on_read = true;
        self
    }

    /// Block every feature read, after the value is taken, until `gate` is notified.
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Writes a feature directly, bypassing any cache in front of this store.
    pub fn put_feature(&self, feature: Feature) {
        self.features
            .lock()
            .unwrap()
            .insert(feature.feature_name.clone(), feature);
    }

    pub fn put_override(&self, feature_override: FeatureOverride) {
        let key = (
            feature_override.feature_name.clone(),
            feature_override.user_id.clone(),
        );
        self.overrides.lock().unwrap().insert(key, feature_override);
    }

    pub fn remove_override(&self, feature_name: &str, user_id: &str) {
        self.overrides
            .lock()
            .unwrap()
            .remove(&(feature_name.to_string(), user_id.to_string()));
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn feature_reads(&self) -> usize {
        self.feature_reads.load(Ordering::SeqCst)
    }

    pub fn override_reads(&self) -> usize {
        self.override_reads.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(FlagError::Persistence(io::Error::other("disk unavailable")));
        }
        Ok(())
    }
}

#[async_trait]
impl FeatureConfigStore for CountingStore {
    async fn create_feature(&self, feature: Feature) -> Result<Feature> {
        self.check()?;
        self.put_feature(feature.clone());
        Ok(feature)
    }

    async fn get_feature(&self, feature_name: &str) -> Result<Option<Feature>> {
        self.feature_reads.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let found = self.features.lock().unwrap().get(feature_name).cloned();
        if self.yield_on_read {
            tokio::task::yield_now().await;
        }
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        Ok(found)
    }

    async fn create_override(
        &self,
        feature_name: &str,
        feature_override: FeatureOverride,
    ) -> Result<FeatureOverride> {
        self.check()?;
        let stored = FeatureOverride {
            feature_name: feature_name.to_string(),
            ..feature_override
        };
        self.put_override(stored.clone());
        Ok(stored)
    }

    async fn get_override(
        &self,
        feature_name: &str,
        user_id: &str,
    ) -> Result<Option<FeatureOverride>> {
        self.override_reads.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let key = (feature_name.to_string(), user_id.to_string());
        let found = self.overrides.lock().unwrap().get(&key).cloned();
        if self.yield_on_read {
            tokio::task::yield_now().await;
        }
        Ok(found)
    }

    async fn delete_override(
        &self,
        feature_name: &str,
        user_id: &str,
    ) -> Result<Option<FeatureOverride>> {
        self.check()?;
        let key = (feature_name.to_string(), user_id.to_string());
        Ok(self.overrides.lock().unwrap().remove(&key))
    }
}
