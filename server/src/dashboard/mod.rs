//! Dashboard Domain
//!
//! Mock console data (members, reports, payments, campaigns, admin team,
//! settings and analytics series) plus the gated operations over it.
//! Every mutating operation is re-checked against the caller's
//! [`PermissionContext`](crate::permissions::PermissionContext) and audited
//! only once it has actually changed something.

pub mod actions;
pub mod error;
pub mod handlers;
pub mod models;
pub mod seed;
pub mod views;

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tokio::sync::RwLock;

use crate::api::AppState;
use crate::audit::AuditLog;

pub use actions::ActionReceipt;
pub use error::DashboardError;
pub use models::*;

/// Console pages and actions. Must be mounted under the session layer.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::overview))
        .route("/users", get(handlers::list_members))
        .route(
            "/users/{id}",
            get(handlers::get_member)
                .patch(handlers::update_member)
                .delete(handlers::delete_member),
        )
        .route("/users/{id}/ban", post(handlers::ban_member))
        .route("/users/{id}/unban", post(handlers::unban_member))
        .route("/users/{id}/verify", post(handlers::verify_member))
        .route("/moderation", get(handlers::moderation_queue))
        .route("/moderation/{id}/resolve", post(handlers::resolve_report))
        .route("/moderation/{id}/dismiss", post(handlers::dismiss_report))
        .route("/moderation/{id}/remove-content", post(handlers::remove_content))
        .route("/analytics/engagement", get(handlers::engagement))
        .route("/analytics/revenue", get(handlers::revenue))
        .route("/payments", get(handlers::payments))
        .route("/payments/{id}/refund", post(handlers::refund_payment))
        .route("/ads", get(handlers::ads))
        .route("/ads/{id}/pause", post(handlers::pause_campaign))
        .route("/ads/{id}/resume", post(handlers::resume_campaign))
        .route("/roles", get(handlers::roles))
        .route("/roles/team/{id}", put(handlers::assign_team_role))
        .route(
            "/settings",
            get(handlers::settings).put(handlers::update_settings),
        )
        .route("/audit-log", get(handlers::audit_log))
}

/// Shared console state plus its audit sink.
#[derive(Debug, Clone)]
pub struct Dashboard {
    data: Arc<RwLock<DashboardData>>,
    audit: AuditLog,
}

impl Dashboard {
    /// Dashboard over the built-in mock data.
    #[must_use]
    pub fn seeded(audit: AuditLog) -> Self {
        Self::with_data(seed::dashboard_data(), audit)
    }

    #[must_use]
    pub fn with_data(data: DashboardData, audit: AuditLog) -> Self {
        Self {
            data: Arc::new(RwLock::new(data)),
            audit,
        }
    }

    /// The audit sink actions report to.
    #[must_use]
    pub const fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// Point-in-time copy of all data.
    pub async fn snapshot(&self) -> DashboardData {
        self.data.read().await.clone()
    }
}
