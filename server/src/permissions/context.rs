//! Session-scoped permission context.
//!
//! The context is built once from the session role and shared through
//! `Arc`. A role switch builds a new context instead of mutating this one.

use std::collections::HashSet;
use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::Extensions;
use hl_common::{permissions_for, Permission, Role, SessionActor};

/// Actor plus the permission set derived from their role.
#[derive(Debug, Clone)]
pub struct PermissionContext {
    inner: Arc<ContextInner>,
}

#[derive(Debug)]
struct ContextInner {
    actor: SessionActor,
    granted: HashSet<Permission>,
}

impl PermissionContext {
    /// Build the context for a session actor.
    #[must_use]
    pub fn new(actor: SessionActor) -> Self {
        let granted = permissions_for(actor.role).iter().copied().collect();
        Self {
            inner: Arc::new(ContextInner { actor, granted }),
        }
    }

    /// The session actor.
    #[must_use]
    pub fn actor(&self) -> SessionActor {
        self.inner.actor
    }

    /// The role this context was built from.
    #[must_use]
    pub fn role(&self) -> Role {
        self.inner.actor.role
    }

    /// Membership test over the role-derived set.
    #[must_use]
    pub fn can(&self, permission: Permission) -> bool {
        self.inner.granted.contains(&permission)
    }

    /// Granted permissions in registry order.
    #[must_use]
    pub fn permissions(&self) -> Vec<Permission> {
        Permission::all()
            .iter()
            .copied()
            .filter(|p| self.can(*p))
            .collect()
    }

    /// Fetch the context installed by the session layer.
    ///
    /// # Panics
    ///
    /// Panics when no context was installed. That only happens when a route
    /// is mounted outside `session::require_session`, which is a wiring bug.
    #[must_use]
    pub fn from_extensions(extensions: &Extensions) -> &Self {
        match extensions.get::<Self>() {
            Some(ctx) => ctx,
            None => panic!(
                "PermissionContext requested outside its provider: \
                 the route must be nested under the session::require_session layer"
            ),
        }
    }
}

/// Extractor for the request's [`PermissionContext`].
///
/// Shares the fail-fast contract of [`PermissionContext::from_extensions`].
#[derive(Debug, Clone)]
pub struct Permissions(pub PermissionContext);

impl<S> FromRequestParts<S> for Permissions
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(PermissionContext::from_extensions(&parts.extensions).clone()))
    }
}

impl std::ops::Deref for Permissions {
    type Target = PermissionContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn ctx(role: Role) -> PermissionContext {
        PermissionContext::new(SessionActor::new(Uuid::now_v7(), role))
    }

    #[test]
    fn test_owner_can_everything() {
        let owner = ctx(Role::Owner);
        for perm in Permission::all() {
            assert!(owner.can(*perm), "owner should hold {perm:?}");
        }
    }

    #[test]
    fn test_predicate_matches_grants_for_every_role() {
        for role in Role::all() {
            let context = ctx(*role);
            let granted = permissions_for(*role);
            for perm in Permission::all() {
                assert_eq!(context.can(*perm), granted.contains(perm), "{role:?}/{perm:?}");
            }
        }
    }

    #[test]
    fn test_ad_manager_scenario() {
        let context = ctx(Role::AdManager);
        assert!(context.can(Permission::ViewAdsMetrics));
        assert!(!context.can(Permission::BanUsers));
    }

    #[test]
    fn test_support_scenario() {
        let context = ctx(Role::Support);
        assert!(context.can(Permission::RefundPayments));
        assert!(!context.can(Permission::ManageRoles));
    }

    #[test]
    fn test_permissions_in_registry_order() {
        let context = ctx(Role::Moderator);
        let perms = context.permissions();
        assert_eq!(perms.first(), Some(&Permission::ViewDashboard));
        let positions: Vec<usize> = perms
            .iter()
            .map(|p| Permission::all().iter().position(|q| q == p).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_clone_shares_set() {
        let a = ctx(Role::Support);
        let b = a.clone();
        assert!(Arc::ptr_eq(&a.inner, &b.inner));
        assert_eq!(a.actor(), b.actor());
    }

    #[test]
    fn test_from_extensions_returns_installed_context() {
        let mut extensions = Extensions::new();
        let context = ctx(Role::Support);
        extensions.insert(context.clone());
        assert_eq!(PermissionContext::from_extensions(&extensions).actor(), context.actor());
    }

    #[test]
    #[should_panic(expected = "PermissionContext requested outside its provider")]
    fn test_from_extensions_without_provider_panics() {
        let extensions = Extensions::new();
        let _ = PermissionContext::from_extensions(&extensions);
    }
}
