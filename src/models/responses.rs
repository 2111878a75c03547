//! Response DTOs for the feature flag API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::{Feature, FeatureOverride};

/// Response body for feature endpoints
#[derive(Debug, Clone, Serialize)]
pub struct FeatureResponse {
    /// Always "ok" on success
    pub status: &'static str,
    pub feature: Feature,
}

impl FeatureResponse {
    /// Creates a new FeatureResponse
    pub fn ok(feature: Feature) -> Self {
        Self {
            status: "ok",
            feature,
        }
    }
}

/// Response body for per-user endpoints
#[derive(Debug, Clone, Serialize)]
pub struct OverrideResponse {
    /// Always "ok" on success
    pub status: &'static str,
    #[serde(rename = "override")]
    pub feature_override: FeatureOverride,
}

impl OverrideResponse {
    /// Creates a new OverrideResponse
    pub fn ok(feature_override: FeatureOverride) -> Self {
        Self {
            status: "ok",
            feature_override,
        }
    }
}

/// Counters for one cache mapping
#[derive(Debug, Clone, Serialize)]
pub struct MappingStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub invalidations: u64,
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<&CacheStats> for MappingStatsResponse {
    fn from(stats: &CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            invalidations: stats.invalidations,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for GET /cache/stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// False when the service runs without the cache
    pub enabled: bool,
    pub ttl_seconds: Option<u64>,
    pub features: Option<MappingStatsResponse>,
    pub overrides: Option<MappingStatsResponse>,
}

impl StatsResponse {
    /// Creates a StatsResponse from both mappings' statistics
    pub fn new(ttl_seconds: u64, features: &CacheStats, overrides: &CacheStats) -> Self {
        Self {
            enabled: true,
            ttl_seconds: Some(ttl_seconds),
            features: Some(features.into()),
            overrides: Some(overrides.into()),
        }
    }

    /// Response used when caching is turned off
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ttl_seconds: None,
            features: None,
            overrides: None,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_response_serialize() {
        let resp = FeatureResponse::ok(Feature::new("dark_mode", "enabled"));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["feature"]["feature_name"], "dark_mode");
    }

    #[test]
    fn test_override_response_uses_override_key() {
        let resp = OverrideResponse::ok(FeatureOverride::new("dark_mode", "u1", "off"));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["override"]["user_id"], "u1");
        assert!(json.get("feature_override").is_none());
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let mut features = CacheStats::new();
        for _ in 0..4 {
            features.record_hit();
        }
        features.record_miss();
        let resp = StatsResponse::new(300, &features, &CacheStats::new());

        let feature_stats = resp.features.unwrap();
        assert!((feature_stats.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.overrides.unwrap().hit_rate, 0.0);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
