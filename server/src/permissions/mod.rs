//! Permission system types and utilities.
//!
//! A session's role is resolved into a [`PermissionContext`] once, installed
//! by the session layer, and consulted by page and action gates on every
//! request.

pub mod context;
pub mod gate;

pub use context::{PermissionContext, Permissions};
pub use gate::{check, control, guard_page, guarded, AccessDenied, Control, Gated};
pub use hl_common::{permissions_for, permissions_for_tag, Permission, Role, SessionActor};
