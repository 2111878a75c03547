//! Storage abstraction shared by every backend and the cache decorator.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Feature, FeatureOverride};

/// Data access for features and per-user overrides.
///
/// Lookups return `Ok(None)` for records that do not exist; errors are
/// reserved for backend failures. Implementations can be file-backed,
/// database-backed, or decorators over another store.
#[async_trait]
pub trait FeatureConfigStore: Send + Sync {
    /// Creates or replaces a feature (last write wins).
    async fn create_feature(&self, feature: Feature) -> Result<Feature>;

    async fn get_feature(&self, feature_name: &str) -> Result<Option<Feature>>;

    /// Creates or replaces the override of `feature_override.user_id` for
    /// `feature_name`.
    async fn create_override(
        &self,
        feature_name: &str,
        feature_override: FeatureOverride,
    ) -> Result<FeatureOverride>;

    async fn get_override(&self, feature_name: &str, user_id: &str)
        -> Result<Option<FeatureOverride>>;

    /// Removes an override, returning it if it existed.
    async fn delete_override(
        &self,
        feature_name: &str,
        user_id: &str,
    ) -> Result<Option<FeatureOverride>>;
}
