//! Records and request/response models for the feature flag service
//!
//! `feature` holds the persisted records; `requests` and `responses` are the
//! DTOs used for HTTP bodies.

pub mod feature;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use feature::{Feature, FeatureOverride};
pub use requests::{ConfigureFeatureRequest, ConfigureOverrideRequest};
pub use responses::{
    FeatureResponse, HealthResponse, MappingStatsResponse, OverrideResponse, StatsResponse,
};
