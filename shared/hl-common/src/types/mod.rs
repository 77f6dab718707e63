//! Shared Types

pub mod actor;
pub mod permission;
pub mod role;

pub use actor::SessionActor;
pub use permission::Permission;
pub use role::Role;
