//! Cache key for per-user overrides.

use std::fmt;

/// Natural key of a [`FeatureOverride`](crate::models::FeatureOverride).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OverrideKey {
    pub feature_name: String,
    pub user_id: String,
}

impl OverrideKey {
    pub fn new(feature_name: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            feature_name: feature_name.into(),
            user_id: user_id.into(),
        }
    }
}

impl fmt::Display for OverrideKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.feature_name, self.user_id)
    }
}
