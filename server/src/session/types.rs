//! Session module types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use hl_common::{Permission, Role, SessionActor};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::store::Session;

/// Session error type.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No session token, or the token does not match a live session.
    #[error("Sign in required")]
    Unauthenticated,
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                serde_json::json!({"error": "unauthenticated", "message": "Sign in required"}),
            ),
        };
        (status, Json(body)).into_response()
    }
}

// Request types
#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SwitchRoleRequest {
    pub role: String,
}

/// Session description returned by the session endpoints.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub actor: SessionActor,
    pub role: Role,
    pub role_label: &'static str,
    pub permissions: Vec<Permission>,
    pub expires_at: DateTime<Utc>,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        let role = session.context.role();
        Self {
            session_id: session.id,
            actor: session.context.actor(),
            role,
            role_label: role.label(),
            permissions: session.context.permissions(),
            expires_at: session.expires_at,
        }
    }
}
