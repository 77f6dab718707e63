//! Session HTTP handlers.

use axum::{extract::State, http::StatusCode, Extension, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use super::bootstrap::resolve_role;
use super::store::Session;
use super::types::{CreateSessionRequest, SessionError, SessionResponse, SwitchRoleRequest};
use super::{ROLE_COOKIE, SESSION_COOKIE};
use crate::api::AppState;

fn cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Start a session.
///
/// `POST /api/session`
///
/// The role comes from the body, then the remembered role cookie, then the
/// configured default. Unrecognized tags fall back to the default silently.
#[tracing::instrument(skip(state, jar, body))]
pub async fn create_session(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Option<Json<CreateSessionRequest>>,
) -> (StatusCode, CookieJar, Json<SessionResponse>) {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let requested = body
        .role
        .or_else(|| jar.get(ROLE_COOKIE).map(|c| c.value().to_string()));
    let role = resolve_role(requested.as_deref(), state.config.default_role);

    let session = state.sessions.create(role);
    let jar = jar
        .add(cookie(SESSION_COOKIE, session.id.to_string()))
        .add(cookie(ROLE_COOKIE, role.as_str().to_string()));

    (StatusCode::CREATED, jar, Json(SessionResponse::from(&session)))
}

/// Describe the current session.
///
/// `GET /api/session`
pub async fn get_session(Extension(session): Extension<Session>) -> Json<SessionResponse> {
    Json(SessionResponse::from(&session))
}

/// Switch the session to another role.
///
/// `PUT /api/session/role`
#[tracing::instrument(skip(state, session, jar, body), fields(session_id = %session.id))]
pub async fn switch_role(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    jar: CookieJar,
    Json(body): Json<SwitchRoleRequest>,
) -> Result<(CookieJar, Json<SessionResponse>), SessionError> {
    let role = resolve_role(Some(&body.role), state.config.default_role);
    let updated = state
        .sessions
        .switch_role(session.id, role)
        .ok_or(SessionError::Unauthenticated)?;
    let jar = jar.add(cookie(ROLE_COOKIE, role.as_str().to_string()));
    Ok((jar, Json(SessionResponse::from(&updated))))
}

/// Sign out.
///
/// `DELETE /api/session`
#[tracing::instrument(skip(state, session, jar), fields(session_id = %session.id))]
pub async fn delete_session(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    jar: CookieJar,
) -> (StatusCode, CookieJar) {
    state.sessions.remove(session.id);
    tracing::info!(actor_id = %session.context.actor().id, "Admin session ended");
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (StatusCode::NO_CONTENT, jar)
}
