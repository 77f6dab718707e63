//! Console permissions.
//!
//! Each variant is a single grantable capability checked before a page is
//! shown or an action is performed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Fine-grained console permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Open the overview dashboard
    ViewDashboard,
    /// Browse member accounts
    ViewUsers,
    /// Edit member profile fields
    EditUsers,
    /// Ban and unban members
    BanUsers,
    /// Permanently delete member accounts
    DeleteUsers,
    /// Mark members as identity-verified
    VerifyUsers,
    /// Open the moderation queue
    ViewModeration,
    /// Take down reported content
    ModerateContent,
    /// Resolve or dismiss reports
    ResolveReports,
    /// Read engagement analytics
    ViewAnalytics,
    /// Read revenue analytics
    ViewRevenue,
    /// Browse payments
    ViewPayments,
    /// Refund payments
    RefundPayments,
    /// Read ad campaign metrics
    ViewAdsMetrics,
    /// Pause and resume ad campaigns
    ManageAds,
    /// Read the role matrix and admin team
    ViewRoles,
    /// Change admin team roles
    ManageRoles,
    /// Read console settings
    ViewSettings,
    /// Change console settings
    ManageSettings,
    /// Read the audit journal
    ViewAuditLog,
}

impl Permission {
    /// Wire tag for this permission.
    ///
    /// ```
    /// use hl_common::Permission;
    ///
    /// assert_eq!(Permission::ViewAdsMetrics.as_str(), "view_ads_metrics");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ViewDashboard => "view_dashboard",
            Self::ViewUsers => "view_users",
            Self::EditUsers => "edit_users",
            Self::BanUsers => "ban_users",
            Self::DeleteUsers => "delete_users",
            Self::VerifyUsers => "verify_users",
            Self::ViewModeration => "view_moderation",
            Self::ModerateContent => "moderate_content",
            Self::ResolveReports => "resolve_reports",
            Self::ViewAnalytics => "view_analytics",
            Self::ViewRevenue => "view_revenue",
            Self::ViewPayments => "view_payments",
            Self::RefundPayments => "refund_payments",
            Self::ViewAdsMetrics => "view_ads_metrics",
            Self::ManageAds => "manage_ads",
            Self::ViewRoles => "view_roles",
            Self::ManageRoles => "manage_roles",
            Self::ViewSettings => "view_settings",
            Self::ManageSettings => "manage_settings",
            Self::ViewAuditLog => "view_audit_log",
        }
    }

    /// Every registered permission.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::ViewDashboard,
            Self::ViewUsers,
            Self::EditUsers,
            Self::BanUsers,
            Self::DeleteUsers,
            Self::VerifyUsers,
            Self::ViewModeration,
            Self::ModerateContent,
            Self::ResolveReports,
            Self::ViewAnalytics,
            Self::ViewRevenue,
            Self::ViewPayments,
            Self::RefundPayments,
            Self::ViewAdsMetrics,
            Self::ManageAds,
            Self::ViewRoles,
            Self::ManageRoles,
            Self::ViewSettings,
            Self::ManageSettings,
            Self::ViewAuditLog,
        ]
    }

    /// Human-readable description for the role matrix page.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::ViewDashboard => "View the overview dashboard",
            Self::ViewUsers => "Browse member accounts",
            Self::EditUsers => "Edit member profiles",
            Self::BanUsers => "Ban and unban members",
            Self::DeleteUsers => "Delete member accounts",
            Self::VerifyUsers => "Verify member identities",
            Self::ViewModeration => "View the moderation queue",
            Self::ModerateContent => "Remove reported content",
            Self::ResolveReports => "Resolve or dismiss reports",
            Self::ViewAnalytics => "View engagement analytics",
            Self::ViewRevenue => "View revenue analytics",
            Self::ViewPayments => "View payments",
            Self::RefundPayments => "Refund payments",
            Self::ViewAdsMetrics => "View ad campaign metrics",
            Self::ManageAds => "Pause and resume ad campaigns",
            Self::ViewRoles => "View roles and the admin team",
            Self::ManageRoles => "Assign admin roles",
            Self::ViewSettings => "View console settings",
            Self::ManageSettings => "Change console settings",
            Self::ViewAuditLog => "View the audit log",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|perm| perm.as_str() == s)
            .ok_or_else(|| Error::UnknownPermission(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_registry_has_twenty_unique_tags() {
        let tags: HashSet<&str> = Permission::all().iter().map(|p| p.as_str()).collect();
        assert_eq!(Permission::all().len(), 20);
        assert_eq!(tags.len(), 20);
    }

    #[test]
    fn test_tags_are_snake_case() {
        for perm in Permission::all() {
            assert!(
                perm.as_str().chars().all(|c| c.is_ascii_lowercase() || c == '_'),
                "{perm:?} tag should be snake_case"
            );
        }
    }

    #[test]
    fn test_serde_matches_as_str() {
        for perm in Permission::all() {
            let json = serde_json::to_string(perm).unwrap();
            assert_eq!(json, format!("\"{}\"", perm.as_str()));
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("ban_users".parse::<Permission>().unwrap(), Permission::BanUsers);
        assert_eq!(
            "BAN_USERS".parse::<Permission>().unwrap_err(),
            Error::UnknownPermission("BAN_USERS".into())
        );
    }

    #[test]
    fn test_descriptions_are_not_empty() {
        for perm in Permission::all() {
            assert!(!perm.description().is_empty());
        }
    }
}
