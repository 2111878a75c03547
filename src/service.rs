//! Feature Service
//!
//! Business rules on top of a [`FeatureConfigStore`]: input validation,
//! timestamp filling, the feature-must-exist policy for overrides, and the
//! default value returned to users without an override.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::error::{FlagError, Result};
use crate::models::{Feature, FeatureOverride};
use crate::store::FeatureConfigStore;

/// Application service for features and per-user overrides.
#[derive(Clone)]
pub struct FeatureService {
    store: Arc<dyn FeatureConfigStore>,
}

impl FeatureService {
    pub fn new(store: Arc<dyn FeatureConfigStore>) -> Self {
        Self { store }
    }

    /// Creates or replaces a feature, stamping it with the current time if
    /// the caller gave none.
    #[instrument(skip(self, feature), fields(name = %feature.feature_name))]
    pub async fn configure_feature(&self, mut feature: Feature) -> Result<Feature> {
        if let Some(msg) = feature.validate() {
            return Err(FlagError::InvalidRequest(msg));
        }
        feature.timestamp.get_or_insert_with(Utc::now);

        let stored = self.store.create_feature(feature).await?;
        info!(value = %stored.value, "feature configured");
        Ok(stored)
    }

    pub async fn get_feature(&self, feature_name: &str) -> Result<Feature> {
        self.store
            .get_feature(feature_name)
            .await?
            .ok_or_else(|| FlagError::FeatureNotFound(feature_name.to_string()))
    }

    /// Creates or replaces a user's override of an existing feature.
    ///
    /// The record's feature name is taken from `feature_name`, and any
    /// default marker sent by the caller is dropped before storing.
    #[instrument(skip(self, feature_override), fields(user_id = %feature_override.user_id))]
    pub async fn configure_feature_for_user(
        &self,
        feature_name: &str,
        mut feature_override: FeatureOverride,
    ) -> Result<FeatureOverride> {
        feature_override.feature_name = feature_name.to_string();
        feature_override.is_default = None;
        if let Some(msg) = feature_override.validate() {
            return Err(FlagError::InvalidRequest(msg));
        }

        self.get_feature(feature_name).await?;
        feature_override.timestamp.get_or_insert_with(Utc::now);

        let stored = self
            .store
            .create_override(feature_name, feature_override)
            .await?;
        info!(value = %stored.value, "override configured");
        Ok(stored)
    }

    /// Returns the value a user sees for a feature.
    ///
    /// A stored override comes back with `is_default == Some(false)`. When the
    /// user has none, the feature's own value is returned as an override with
    /// `is_default == Some(true)`; that record is never stored.
    pub async fn get_feature_for_user(
        &self,
        feature_name: &str,
        user_id: &str,
    ) -> Result<FeatureOverride> {
        if let Some(mut found) = self.store.get_override(feature_name, user_id).await? {
            found.is_default = Some(false);
            return Ok(found);
        }

        let feature = self.get_feature(feature_name).await?;
        debug!(feature = feature_name, user = user_id, "no override, using feature default");
        Ok(FeatureOverride::default_for(&feature, user_id))
    }

    /// Removes a user's override and returns it.
    #[instrument(skip(self))]
    pub async fn delete_feature_for_user(
        &self,
        feature_name: &str,
        user_id: &str,
    ) -> Result<FeatureOverride> {
        self.get_feature(feature_name).await?;

        let deleted = self
            .store
            .delete_override(feature_name, user_id)
            .await?
            .ok_or_else(|| FlagError::OverrideNotFound {
                feature_name: feature_name.to_string(),
                user_id: user_id.to_string(),
            })?;
        info!("override deleted");
        Ok(deleted)
    }
}
