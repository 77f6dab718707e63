//! Admin Sessions
//!
//! A session pairs an actor with the [`PermissionContext`] built for their
//! role. The [`require_session`] layer is the provider: it installs that
//! context into request extensions for every route nested under it.
//!
//! [`PermissionContext`]: crate::permissions::PermissionContext

pub mod bootstrap;
pub mod handlers;
pub mod middleware;
pub mod store;
pub mod types;

pub use bootstrap::resolve_role;
pub use middleware::require_session;
pub use store::{spawn_session_sweeper, Session, SessionStore};
pub use types::{SessionError, SessionResponse};

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "hl_admin_session";

/// Cookie remembering which role to resume as.
pub const ROLE_COOKIE: &str = "hl_admin_role";
