//! Dashboard error type.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Domain failures raised after the permission gate has passed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// Resource not found.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The resource is not in a state that allows the action.
    #[error("{0}")]
    Conflict(String),

    /// Validation error.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Internal server error.
    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation"),
            Self::Internal(detail) => {
                tracing::error!(detail = %detail, "Dashboard action failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
        };
        let body = serde_json::json!({"error": code, "message": self.to_string()});
        (status, Json(body)).into_response()
    }
}
