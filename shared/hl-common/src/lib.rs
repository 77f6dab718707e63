//! Heartline Admin Common Library
//!
//! The closed role and permission vocabulary shared by every admin surface,
//! plus the static association between the two.

pub mod error;
pub mod grants;
pub mod types;

pub use error::{Error, Result};
pub use grants::{permissions_for, permissions_for_tag};
pub use types::*;
