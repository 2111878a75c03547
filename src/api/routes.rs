//! API Routes
//!
//! Configures the Axum router with all feature flag endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    configure_feature_handler, configure_override_handler, delete_override_handler,
    get_feature_handler, get_override_handler, health_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /feature` - Create or replace a feature
/// - `GET /feature/:feature_name` - Fetch a feature
/// - `POST /feature/:feature_name/user/:user_id` - Create or replace a user override
/// - `GET /feature/:feature_name/user/:user_id` - Value for a user, override or default
/// - `DELETE /feature/:feature_name/user/:user_id` - Remove a user override
/// - `GET /cache/stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/feature", post(configure_feature_handler))
        .route("/feature/:feature_name", get(get_feature_handler))
        .route(
            "/feature/:feature_name/user/:user_id",
            post(configure_override_handler)
                .get(get_override_handler)
                .delete(delete_override_handler),
        )
        .route("/cache/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Feature;
    use crate::store::testing::CountingStore;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    async fn status_of(app: Router, method: Method, uri: &str, json: Option<&str>) -> StatusCode {
        let request = Request::builder().method(method).uri(uri);
        let request = match json {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        };
        app.oneshot(request.unwrap()).await.unwrap().status()
    }

    fn app_with(backend: Arc<CountingStore>) -> Router {
        create_router(AppState::new(backend))
    }

    #[tokio::test]
    async fn test_service_routes_respond() {
        let app = app_with(Arc::new(CountingStore::new()));

        assert_eq!(status_of(app.clone(), Method::GET, "/health", None).await, StatusCode::OK);
        assert_eq!(status_of(app, Method::GET, "/cache/stats", None).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_feature_routes() {
        let app = app_with(Arc::new(CountingStore::new()));

        let created = status_of(
            app.clone(),
            Method::POST,
            "/feature",
            Some(r#"{"feature_name":"dark_mode","value":"enabled"}"#),
        )
        .await;
        assert_eq!(created, StatusCode::OK);
        assert_eq!(status_of(app.clone(), Method::GET, "/feature/dark_mode", None).await, StatusCode::OK);
        assert_eq!(status_of(app, Method::GET, "/feature/other", None).await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_override_route_methods() {
        let backend = Arc::new(CountingStore::new());
        backend.put_feature(Feature::new("dark_mode", "enabled"));
        let app = app_with(backend);
        let uri = "/feature/dark_mode/user/u1";

        assert_eq!(
            status_of(app.clone(), Method::POST, uri, Some(r#"{"value":"disabled"}"#)).await,
            StatusCode::OK
        );
        assert_eq!(status_of(app.clone(), Method::GET, uri, None).await, StatusCode::OK);
        assert_eq!(status_of(app.clone(), Method::DELETE, uri, None).await, StatusCode::OK);
        assert_eq!(status_of(app, Method::PUT, uri, None).await, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_feature_route_rejects_delete() {
        let app = app_with(Arc::new(CountingStore::new()));
        let status = status_of(app, Method::DELETE, "/feature/dark_mode", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
