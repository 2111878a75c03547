//! API Handlers
//!
//! HTTP request handlers for each feature flag endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::config::Config;
use crate::error::Result;
use crate::models::{
    ConfigureFeatureRequest, ConfigureOverrideRequest, FeatureResponse, HealthResponse,
    OverrideResponse, StatsResponse,
};
use crate::service::FeatureService;
use crate::store::{CachedStore, FeatureConfigStore, JsonFileStore};

/// Application state shared across all handlers.
///
/// `cache` is set when reads go through a [`CachedStore`]; it is the same
/// instance the service writes through, kept separately for statistics.
#[derive(Clone)]
pub struct AppState {
    pub service: FeatureService,
    pub cache: Option<Arc<CachedStore>>,
}

impl AppState {
    /// Creates an AppState that talks to `store` directly, without caching.
    pub fn new(store: Arc<dyn FeatureConfigStore>) -> Self {
        Self {
            service: FeatureService::new(store),
            cache: None,
        }
    }

    /// Creates an AppState whose reads go through `cache`.
    pub fn cached(cache: Arc<CachedStore>) -> Self {
        Self {
            service: FeatureService::new(cache.clone()),
            cache: Some(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Opens the JSON store at `data_file` and wraps it in a cache when
    /// `cache_enabled` is set.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let store: Arc<dyn FeatureConfigStore> =
            Arc::new(JsonFileStore::open(config.data_file.clone()).await?);

        if config.cache_enabled {
            let cache = Arc::new(CachedStore::new(store, config.cache_ttl()));
            Ok(Self::cached(cache))
        } else {
            Ok(Self::new(store))
        }
    }
}

/// Handler for POST /feature
pub async fn configure_feature_handler(
    State(state): State<AppState>,
    Json(req): Json<ConfigureFeatureRequest>,
) -> Result<Json<FeatureResponse>> {
    let feature = state.service.configure_feature(req).await?;
    Ok(Json(FeatureResponse::ok(feature)))
}

/// Handler for GET /feature/:feature_name
pub async fn get_feature_handler(
    State(state): State<AppState>,
    Path(feature_name): Path<String>,
) -> Result<Json<FeatureResponse>> {
    let feature = state.service.get_feature(&feature_name).await?;
    Ok(Json(FeatureResponse::ok(feature)))
}

/// Handler for POST /feature/:feature_name/user/:user_id
pub async fn configure_override_handler(
    State(state): State<AppState>,
    Path((feature_name, user_id)): Path<(String, String)>,
    Json(req): Json<ConfigureOverrideRequest>,
) -> Result<Json<OverrideResponse>> {
    let feature_override = req.into_override(feature_name.as_str(), user_id);
    let stored = state
        .service
        .configure_feature_for_user(&feature_name, feature_override)
        .await?;
    Ok(Json(OverrideResponse::ok(stored)))
}

/// Handler for GET /feature/:feature_name/user/:user_id
///
/// Falls back to the feature's value when the user has no override.
pub async fn get_override_handler(
    State(state): State<AppState>,
    Path((feature_name, user_id)): Path<(String, String)>,
) -> Result<Json<OverrideResponse>> {
    let found = state
        .service
        .get_feature_for_user(&feature_name, &user_id)
        .await?;
    Ok(Json(OverrideResponse::ok(found)))
}

/// Handler for DELETE /feature/:feature_name/user/:user_id
pub async fn delete_override_handler(
    State(state): State<AppState>,
    Path((feature_name, user_id)): Path<(String, String)>,
) -> Result<Json<OverrideResponse>> {
    let deleted = state
        .service
        .delete_feature_for_user(&feature_name, &user_id)
        .await?;
    Ok(Json(OverrideResponse::ok(deleted)))
}

/// Handler for GET /cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    match &state.cache {
        Some(cache) => {
            let (features, overrides) = cache.stats().await;
            Json(StatsResponse::new(
                cache.ttl().as_secs(),
                &features,
                &overrides,
            ))
        }
        None => Json(StatsResponse::disabled()),
    }
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
