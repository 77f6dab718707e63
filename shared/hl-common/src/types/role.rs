//! Admin roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A named bundle of permissions assigned to an admin for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Holds every permission, including role management.
    Owner,
    /// Runs the console day to day.
    Admin,
    /// Works the moderation queue.
    Moderator,
    /// Handles member tickets and refunds.
    Support,
    /// Runs ad campaigns and reads monetization numbers.
    AdManager,
}

impl Role {
    /// Role used when no valid role was supplied at session bootstrap.
    pub const DEFAULT: Self = Self::Admin;

    /// Wire tag for this role.
    ///
    /// ```
    /// use hl_common::Role;
    ///
    /// assert_eq!(Role::AdManager.as_str(), "AD_MANAGER");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "OWNER",
            Self::Admin => "ADMIN",
            Self::Moderator => "MODERATOR",
            Self::Support => "SUPPORT",
            Self::AdManager => "AD_MANAGER",
        }
    }

    /// Display label used by the console.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Owner => "Owner",
            Self::Admin => "Admin",
            Self::Moderator => "Moderator",
            Self::Support => "Support",
            Self::AdManager => "Ad Manager",
        }
    }

    /// Every registered role.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Owner,
            Self::Admin,
            Self::Moderator,
            Self::Support,
            Self::AdManager,
        ]
    }

    /// Whether `tag` is exactly one of the registered role tags.
    ///
    /// Matching is case-sensitive; anything unrecognized is simply invalid.
    #[must_use]
    pub fn is_valid(tag: &str) -> bool {
        Self::all().iter().any(|role| role.as_str() == tag)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| Error::UnknownRole(s.to_string()))
    }
}
