//! Common error types.

use thiserror::Error;

/// Errors raised while parsing the admin vocabulary at a boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The tag is not one of the registered roles.
    #[error("Unknown admin role: {0:?}")]
    UnknownRole(String),

    /// The tag is not one of the registered permissions.
    #[error("Unknown permission: {0:?}")]
    UnknownPermission(String),
}

/// Result alias for vocabulary parsing.
pub type Result<T> = std::result::Result<T, Error>;
