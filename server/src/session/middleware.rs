//! Session provider middleware.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use super::types::SessionError;
use super::SESSION_COOKIE;
use crate::api::AppState;

/// Session token from `Authorization: Bearer` or the session cookie.
pub fn session_token(headers: &HeaderMap) -> Option<Uuid> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(|t| Uuid::parse_str(t.trim()).ok());
    bearer.or_else(|| {
        CookieJar::from_headers(headers)
            .get(SESSION_COOKIE)
            .and_then(|c| Uuid::parse_str(c.value()).ok())
    })
}

/// Middleware that requires a live session and installs its
/// [`PermissionContext`](crate::permissions::PermissionContext).
#[tracing::instrument(skip(state, request, next))]
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, SessionError> {
    let token = session_token(request.headers()).ok_or(SessionError::Unauthenticated)?;
    let session = state
        .sessions
        .get(token)
        .ok_or(SessionError::Unauthenticated)?;

    request.extensions_mut().insert(session.context.clone());
    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}
