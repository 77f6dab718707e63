//! API Router and Application State
//!
//! Central routing configuration and shared state.

use std::sync::Arc;

use axum::{
    extract::State,
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    dashboard::{self, Dashboard},
    session::{self, SessionStore},
};

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,
    /// Live admin sessions
    pub sessions: SessionStore,
    /// Console data and its audit sink
    pub dashboard: Dashboard,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(config: Config, dashboard: Dashboard) -> Self {
        let sessions = SessionStore::new(config.session_ttl_secs);
        Self {
            config: Arc::new(config),
            sessions,
            dashboard,
        }
    }
}

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Everything below needs a live session; the layer installs the
    // permission context the handlers read.
    let protected_routes = Router::new()
        .route(
            "/api/session",
            get(session::handlers::get_session).delete(session::handlers::delete_session),
        )
        .route("/api/session/role", put(session::handlers::switch_role))
        .nest("/api", dashboard::router())
        .layer(from_fn_with_state(state.clone(), session::require_session));

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Session bootstrap
        .route("/api/session", post(session::handlers::create_session))
        .merge(protected_routes)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        // State
        .with_state(state)
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    /// Service status
    status: &'static str,
    /// Where audit records are delivered
    audit_transport: &'static str,
    /// Number of live admin sessions
    active_sessions: usize,
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        audit_transport: state.dashboard.audit().transport_name(),
        active_sessions: state.sessions.len(),
    })
}
