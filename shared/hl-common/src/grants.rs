//! Role to permission association.
//!
//! Defined entirely at build time. Order inside each list carries no meaning.

use crate::types::{Permission, Role};

use crate::types::Permission::{
    BanUsers, DeleteUsers, EditUsers, ManageAds, ManageSettings, ModerateContent, RefundPayments,
    ResolveReports, VerifyUsers, ViewAdsMetrics, ViewAnalytics, ViewAuditLog, ViewDashboard,
    ViewModeration, ViewPayments, ViewRevenue, ViewRoles, ViewSettings, ViewUsers,
};

const ADMIN: &[Permission] = &[
    ViewDashboard,
    ViewUsers,
    EditUsers,
    BanUsers,
    DeleteUsers,
    VerifyUsers,
    ViewModeration,
    ModerateContent,
    ResolveReports,
    ViewAnalytics,
    ViewRevenue,
    ViewPayments,
    RefundPayments,
    ViewAdsMetrics,
    ManageAds,
    ViewRoles,
    ViewSettings,
    ManageSettings,
    ViewAuditLog,
];

const MODERATOR: &[Permission] = &[
    ViewDashboard,
    ViewUsers,
    BanUsers,
    VerifyUsers,
    ViewModeration,
    ModerateContent,
    ResolveReports,
];

const SUPPORT: &[Permission] = &[
    ViewDashboard,
    ViewUsers,
    EditUsers,
    VerifyUsers,
    ViewModeration,
    ViewPayments,
    RefundPayments,
];

const AD_MANAGER: &[Permission] = &[
    ViewDashboard,
    ViewAnalytics,
    ViewRevenue,
    ViewAdsMetrics,
    ManageAds,
];

/// Permissions held by `role`.
///
/// The owner always holds the whole registry.
#[must_use]
pub const fn permissions_for(role: Role) -> &'static [Permission] {
    match role {
        Role::Owner => Permission::all(),
        Role::Admin => ADMIN,
        Role::Moderator => MODERATOR,
        Role::Support => SUPPORT,
        Role::AdManager => AD_MANAGER,
    }
}

/// Permissions held by a free-form role tag.
///
/// Unrecognized tags hold nothing.
#[must_use]
pub fn permissions_for_tag(tag: &str) -> &'static [Permission] {
    match tag.parse::<Role>() {
        Ok(role) => permissions_for(role),
        Err(_) => &[],
    }
}
