//! Error types for the feature flag service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Flag Error Enum ==
/// Unified error type for the feature flag service.
///
/// Absence at the data layer is `Option::None`, not an error. The not-found
/// variants are produced by the service layer when absence is a failure for
/// the caller.
#[derive(Error, Debug)]
pub enum FlagError {
    /// Feature does not exist
    #[error("Feature {0} not found")]
    FeatureNotFound(String),

    /// No override stored for this feature and user
    #[error("Override for feature {feature_name} and user {user_id} not found")]
    OverrideNotFound {
        feature_name: String,
        user_id: String,
    },

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid startup configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Backing file could not be read or written
    #[error("Persistence error: {0}")]
    Persistence(#[from] std::io::Error),

    /// Backing file contents could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FlagError {
    /// HTTP status used when this error reaches the API boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            FlagError::FeatureNotFound(_) | FlagError::OverrideNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            FlagError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            FlagError::InvalidConfig(_)
            | FlagError::Persistence(_)
            | FlagError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for FlagError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the feature flag service.
pub type Result<T> = std::result::Result<T, FlagError>;
