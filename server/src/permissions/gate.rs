//! Page and action gates.
//!
//! Pages that fail their check render an access-denied placeholder instead
//! of disappearing. Actions are re-checked at the handler: a denied action
//! never runs, so it can neither change state nor emit an audit record.

use std::future::Future;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hl_common::{Permission, Role};
use serde::Serialize;

use super::context::PermissionContext;

/// Neutral placeholder returned when a gate denies access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessDenied {
    /// Permission the gate required.
    pub required: Permission,
    /// Role the actor holds.
    pub role: Role,
}

impl AccessDenied {
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "The {} role does not have access to this ({})",
            self.role.label(),
            self.required.description().to_lowercase()
        )
    }
}

impl IntoResponse for AccessDenied {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": "access_denied",
            "message": self.message(),
            "required": self.required,
            "role": self.role,
        });
        (StatusCode::FORBIDDEN, Json(body)).into_response()
    }
}

/// Outcome of a gated page or action.
///
/// Denial is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gated<T> {
    Allowed(T),
    Denied(AccessDenied),
}

impl<T> Gated<T> {
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Gated<U> {
        match self {
            Self::Allowed(value) => Gated::Allowed(f(value)),
            Self::Denied(denied) => Gated::Denied(denied),
        }
    }

    pub fn into_result(self) -> Result<T, AccessDenied> {
        match self {
            Self::Allowed(value) => Ok(value),
            Self::Denied(denied) => Err(denied),
        }
    }
}

impl<T, E> Gated<Result<T, E>> {
    /// Lift a failure inside an allowed outcome out of the gate.
    pub fn transpose(self) -> Result<Gated<T>, E> {
        match self {
            Self::Allowed(result) => result.map(Gated::Allowed),
            Self::Denied(denied) => Ok(Gated::Denied(denied)),
        }
    }
}

impl<T: IntoResponse> IntoResponse for Gated<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Allowed(value) => value.into_response(),
            Self::Denied(denied) => denied.into_response(),
        }
    }
}

/// Enabled/disabled descriptor for one control on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Control {
    /// Control identifier, matching the audit action name.
    pub action: &'static str,
    pub permission: Permission,
    pub enabled: bool,
}

/// Describe a control for the current actor.
#[must_use]
pub fn control(ctx: &PermissionContext, action: &'static str, permission: Permission) -> Control {
    Control {
        action,
        permission,
        enabled: ctx.can(permission),
    }
}

/// Plain permission check.
pub fn check(ctx: &PermissionContext, permission: Permission) -> Result<(), AccessDenied> {
    if ctx.can(permission) {
        Ok(())
    } else {
        tracing::debug!(
            actor_id = %ctx.actor().id,
            role = %ctx.role(),
            required = %permission,
            "Permission denied"
        );
        Err(AccessDenied {
            required: permission,
            role: ctx.role(),
        })
    }
}

/// Render a page only when the actor holds `permission`.
pub fn guard_page<T>(
    ctx: &PermissionContext,
    permission: Permission,
    render: impl FnOnce() -> T,
) -> Gated<T> {
    match check(ctx, permission) {
        Ok(()) => Gated::Allowed(render()),
        Err(denied) => Gated::Denied(denied),
    }
}

/// Run an action only when the actor holds `permission`.
///
/// The action future is not even constructed on denial.
pub async fn guarded<T, F, Fut>(
    ctx: &PermissionContext,
    permission: Permission,
    action: F,
) -> Gated<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    match check(ctx, permission) {
        Ok(()) => Gated::Allowed(action().await),
        Err(denied) => {
            tracing::info!(
                actor_id = %ctx.actor().id,
                role = %ctx.role(),
                required = %permission,
                "Blocked gated action"
            );
            Gated::Denied(denied)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use hl_common::SessionActor;
    use uuid::Uuid;

    use super::*;

    fn ctx(role: Role) -> PermissionContext {
        PermissionContext::new(SessionActor::new(Uuid::now_v7(), role))
    }

    #[test]
    fn test_guard_page_renders_when_allowed() {
        let page = guard_page(&ctx(Role::AdManager), Permission::ViewAdsMetrics, || "ads");
        assert_eq!(page, Gated::Allowed("ads"));
    }

    #[test]
    fn test_guard_page_denied_skips_render() {
        let rendered = AtomicUsize::new(0);
        let page = guard_page(&ctx(Role::AdManager), Permission::ViewUsers, || {
            rendered.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(
            page,
            Gated::Denied(AccessDenied {
                required: Permission::ViewUsers,
                role: Role::AdManager,
            })
        );
        assert_eq!(rendered.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_guarded_never_runs_denied_action() {
        let runs = AtomicUsize::new(0);
        let outcome = guarded(&ctx(Role::AdManager), Permission::BanUsers, || async {
            runs.fetch_add(1, Ordering::SeqCst);
        })
        .await;
        assert!(!outcome.is_allowed());
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_guarded_runs_allowed_action() {
        let outcome = guarded(&ctx(Role::Moderator), Permission::BanUsers, || async { 7 }).await;
        assert_eq!(outcome.into_result(), Ok(7));
    }

    #[test]
    fn test_denied_for_every_missing_permission() {
        for role in Role::all() {
            let context = ctx(*role);
            for perm in Permission::all() {
                let expected = hl_common::permissions_for(*role).contains(perm);
                assert_eq!(check(&context, *perm).is_ok(), expected);
            }
        }
    }

    #[test]
    fn test_control_reflects_predicate() {
        let support = ctx(Role::Support);
        assert!(control(&support, "payments.refund", Permission::RefundPayments).enabled);
        assert!(!control(&support, "roles.assign", Permission::ManageRoles).enabled);
    }

    #[test]
    fn test_access_denied_response_is_forbidden() {
        let denied = AccessDenied {
            required: Permission::ManageRoles,
            role: Role::Support,
        };
        assert_eq!(denied.into_response().status(), StatusCode::FORBIDDEN);
        assert!(denied.message().contains("Support"));
    }

    #[test]
    fn test_gated_map_keeps_denial() {
        let denied = AccessDenied {
            required: Permission::ViewUsers,
            role: Role::AdManager,
        };
        let gated: Gated<u8> = Gated::Denied(denied);
        assert_eq!(gated.map(|v| v + 1), Gated::Denied(denied));
    }
}
