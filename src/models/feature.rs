//! Feature and override records
//!
//! These are the records persisted by the store and cached by the TTL layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Feature ==
/// A named, globally scoped flag with a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    /// Unique, immutable name of the flag
    pub feature_name: String,
    /// Flag value, opaque to the service
    pub value: String,
    /// Optional human description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_description: Option<String>,
    /// Creation time, filled in by the write path when absent
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Feature {
    /// Creates a feature with no description or timestamp.
    pub fn new(feature_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            feature_name: feature_name.into(),
            value: value.into(),
            feature_description: None,
            timestamp: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.feature_description = Some(description.into());
        self
    }

    /// Validates the record.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.feature_name.is_empty() {
            return Some("feature_name cannot be empty".to_string());
        }
        if self.value.is_empty() {
            return Some("value cannot be empty".to_string());
        }
        if matches!(&self.feature_description, Some(d) if d.is_empty()) {
            return Some("feature_description cannot be empty when present".to_string());
        }
        None
    }
}

// == Feature Override ==
/// A per-user replacement value for a feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureOverride {
    pub feature_name: String,
    pub user_id: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
    /// Set only on responses: `Some(true)` when the value is the feature's
    /// default rather than a stored override. Never persisted.
    #[serde(
        rename = "isDefault",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub is_default: Option<bool>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl FeatureOverride {
    /// Creates an override with no justification or timestamp.
    pub fn new(
        feature_name: impl Into<String>,
        user_id: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            feature_name: feature_name.into(),
            user_id: user_id.into(),
            value: value.into(),
            justification: None,
            is_default: None,
            timestamp: None,
        }
    }

    /// Builds the stand-in returned when a user has no override: the
    /// feature's own value, flagged as a default.
    pub fn default_for(feature: &Feature, user_id: impl Into<String>) -> Self {
        Self {
            is_default: Some(true),
            ..Self::new(feature.feature_name.clone(), user_id, feature.value.clone())
        }
    }

    /// Validates the record.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.feature_name.is_empty() {
            return Some("feature_name cannot be empty".to_string());
        }
        if self.user_id.is_empty() {
            return Some("user_id cannot be empty".to_string());
        }
        if self.value.is_empty() {
            return Some("value cannot be empty".to_string());
        }
        if matches!(&self.justification, Some(j) if j.is_empty()) {
            return Some("justification cannot be empty when present".to_string());
        }
        None
    }
}
