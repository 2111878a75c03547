//! API Module
//!
//! HTTP handlers and routing for the feature flag REST API.
//!
//! # Endpoints
//! - `POST /feature` - Create or replace a feature
//! - `GET /feature/:feature_name` - Fetch a feature
//! - `POST|GET|DELETE /feature/:feature_name/user/:user_id` - Per-user overrides
//! - `GET /cache/stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
