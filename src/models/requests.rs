//! Request DTOs for the feature flag API
//!
//! Defines the structure of incoming HTTP request bodies.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::{Feature, FeatureOverride};

/// Request body for POST /feature
pub type ConfigureFeatureRequest = Feature;

/// Request body for POST /feature/:feature_name/user/:user_id
///
/// The feature name and user id come from the path.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigureOverrideRequest {
    /// The override value
    pub value: String,
    /// Optional reason for the override
    #[serde(default)]
    pub justification: Option<String>,
    /// Optional creation time, filled in by the service when absent
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ConfigureOverrideRequest {
    /// Combines the body with the path parameters into an override record.
    pub fn into_override(
        self,
        feature_name: impl Into<String>,
        user_id: impl Into<String>,
    ) -> FeatureOverride {
        FeatureOverride {
            justification: self.justification,
            timestamp: self.timestamp,
            ..FeatureOverride::new(feature_name, user_id, self.value)
        }
    }
}
