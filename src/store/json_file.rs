//! JSON File Store
//!
//! Keeps every feature and override in memory and rewrites a single JSON
//! document on each change.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::{Feature, FeatureOverride};
use crate::store::FeatureConfigStore;

/// On-disk layout: features by name, overrides by feature then user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct FeatureDocument {
    #[serde(default)]
    features: HashMap<String, Feature>,
    #[serde(default)]
    overrides: HashMap<String, HashMap<String, FeatureOverride>>,
}

/// File-backed feature store.
///
/// A change is applied to a copy of the document, written to disk, and only
/// then made visible, so a failed write leaves the store unchanged.
#[derive(Debug)]
pub struct JsonFileStore {
    data: RwLock<FeatureDocument>,
    file_path: PathBuf,
}

impl JsonFileStore {
    /// Opens the store at `path`.
    ///
    /// A missing file starts an empty store. An unreadable document is
    /// logged and replaced by an empty one on the next write.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let file_path = path.into();

        let document = match fs::read(&file_path).await {
            Ok(bytes) => match serde_json::from_slice::<FeatureDocument>(&bytes) {
                Ok(document) => document,
                Err(e) => {
                    warn!(path = %file_path.display(), error = %e, "ignoring unreadable feature file");
                    FeatureDocument::default()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %file_path.display(), "no feature file yet, starting empty");
                FeatureDocument::default()
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            path = %file_path.display(),
            features = document.features.len(),
            "feature store loaded"
        );

        Ok(Self {
            data: RwLock::new(document),
            file_path,
        })
    }

    /// Writes the document next to the target and renames it into place.
    async fn persist(&self, document: &FeatureDocument) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let bytes = serde_json::to_vec_pretty(document)?;
        let tmp_path = self.file_path.with_extension("json.tmp");
        fs::write(&tmp_path, bytes).await?;
        fs::rename(&tmp_path, &self.file_path).await?;
        Ok(())
    }

    /// Applies `f` to a copy of the document, persists it, then publishes it.
    ///
    /// When `f` returns `None` nothing changed: the copy is discarded and the
    /// file is left alone. The write lock is held throughout, so `f` sees the
    /// latest published document.
    async fn update<T, F>(&self, f: F) -> Result<Option<T>>
    where
        F: FnOnce(&mut FeatureDocument) -> Option<T>,
    {
        let mut current = self.data.write().await;
        let mut next = current.clone();
        let Some(out) = f(&mut next) else {
            return Ok(None);
        };
        self.persist(&next).await?;
        *current = next;
        Ok(Some(out))
    }
}

#[async_trait]
impl FeatureConfigStore for JsonFileStore {
    async fn create_feature(&self, feature: Feature) -> Result<Feature> {
        let stored = feature.clone();
        self.update(move |doc| {
            doc.features.insert(feature.feature_name.clone(), feature);
            Some(())
        })
        .await?;
        Ok(stored)
    }

    async fn get_feature(&self, feature_name: &str) -> Result<Option<Feature>> {
        let doc = self.data.read().await;
        Ok(doc.features.get(feature_name).cloned())
    }

    async fn create_override(
        &self,
        feature_name: &str,
        feature_override: FeatureOverride,
    ) -> Result<FeatureOverride> {
        let stored = feature_override.clone();
        self.update(move |doc| {
            doc.overrides
                .entry(feature_name.to_string())
                .or_default()
                .insert(feature_override.user_id.clone(), feature_override);
            Some(())
        })
        .await?;
        Ok(stored)
    }

    async fn get_override(
        &self,
        feature_name: &str,
        user_id: &str,
    ) -> Result<Option<FeatureOverride>> {
        let doc = self.data.read().await;
        Ok(doc
            .overrides
            .get(feature_name)
            .and_then(|users| users.get(user_id))
            .cloned())
    }

    async fn delete_override(
        &self,
        feature_name: &str,
        user_id: &str,
    ) -> Result<Option<FeatureOverride>> {
        self.update(|doc| {
            let users = doc.overrides.get_mut(feature_name)?;
            let removed = users.remove(user_id);
            if users.is_empty() {
                doc.overrides.remove(feature_name);
            }
            removed
        })
        .await
    }
}
