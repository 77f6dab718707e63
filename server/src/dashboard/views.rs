//! Page payloads.
//!
//! Every page is wrapped in [`guard_page`]: an actor without the page
//! permission gets the access-denied placeholder, never a missing page.
//! Action buttons are described by [`Control`]s so the UI can show them
//! disabled instead of hiding them.

use hl_common::{permissions_for, Permission, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::actions::{
    ASSIGN_ROLE, BAN_MEMBER, DELETE_MEMBER, DISMISS_REPORT, EDIT_MEMBER, PAUSE_CAMPAIGN,
    REFUND_PAYMENT, REMOVE_CONTENT, RESOLVE_REPORT, RESUME_CAMPAIGN, UNBAN_MEMBER,
    UPDATE_SETTINGS, VERIFY_MEMBER,
};
use super::error::DashboardError;
use super::models::{
    AccountStatus, AdCampaign, CampaignStatus, DashboardData, EngagementPoint, Member, Payment,
    PaymentStatus, Report, ReportStatus, RevenuePoint, Settings, TeamMember,
};
use super::Dashboard;
use crate::audit::JournalEntry;
use crate::permissions::{check, control, guard_page, Control, Gated, PermissionContext};

/// Default and maximum audit page size.
pub const AUDIT_PAGE_DEFAULT: usize = 50;
pub const AUDIT_PAGE_MAX: usize = 500;

#[derive(Debug, Clone, Serialize)]
pub struct OverviewPage {
    pub total_members: usize,
    pub active_members: usize,
    pub banned_members: usize,
    pub verified_members: usize,
    pub premium_members: usize,
    pub open_reports: usize,
    pub daily_active_users: Option<u32>,
    pub revenue_last_month_cents: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MembersPage {
    pub members: Vec<Member>,
    pub total: usize,
    pub controls: Vec<Control>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberPage {
    pub member: Member,
    pub controls: Vec<Control>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModerationPage {
    pub reports: Vec<Report>,
    pub open_count: usize,
    pub controls: Vec<Control>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EngagementPage {
    pub series: Vec<EngagementPoint>,
    pub average_daily_active_users: u32,
    pub total_new_signups: u64,
    pub total_matches: u64,
    pub total_messages: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RevenuePage {
    pub months: Vec<RevenuePoint>,
    pub total_cents: i64,
    /// Month-over-month change of the latest month, in percent.
    pub latest_growth_percent: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentsPage {
    pub payments: Vec<Payment>,
    pub settled_cents: i64,
    pub refunded_cents: i64,
    pub controls: Vec<Control>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CampaignView {
    #[serde(flatten)]
    pub campaign: AdCampaign,
    pub ctr_percent: f64,
    pub conversion_percent: f64,
    pub cost_per_click_cents: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdsPage {
    pub campaigns: Vec<CampaignView>,
    pub active_count: usize,
    pub total_spend_cents: i64,
    pub controls: Vec<Control>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleView {
    pub role: Role,
    pub label: &'static str,
    pub permissions: &'static [Permission],
}

#[derive(Debug, Clone, Serialize)]
pub struct PermissionView {
    pub permission: Permission,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RolesPage {
    pub roles: Vec<RoleView>,
    pub permissions: Vec<PermissionView>,
    pub team: Vec<TeamMember>,
    pub controls: Vec<Control>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SettingsPage {
    pub settings: Settings,
    pub controls: Vec<Control>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditPage {
    pub entries: Vec<JournalEntry>,
    pub transport: &'static str,
}

/// `?status=` filter for the users page.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct MemberFilter {
    pub status: Option<AccountStatus>,
}

/// `?status=` filter for the moderation page.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ReportFilter {
    pub status: Option<ReportStatus>,
}

fn member_controls(ctx: &PermissionContext) -> Vec<Control> {
    vec![
        control(ctx, BAN_MEMBER, Permission::BanUsers),
        control(ctx, UNBAN_MEMBER, Permission::BanUsers),
        control(ctx, VERIFY_MEMBER, Permission::VerifyUsers),
        control(ctx, EDIT_MEMBER, Permission::EditUsers),
        control(ctx, DELETE_MEMBER, Permission::DeleteUsers),
    ]
}

/// Analytics and revenue figures are left out unless the caller could open
/// those pages.
fn overview(ctx: &PermissionContext, data: &DashboardData) -> OverviewPage {
    let count = |status: AccountStatus| data.members.iter().filter(|m| m.status == status).count();
    OverviewPage {
        total_members: data.members.len(),
        active_members: count(AccountStatus::Active),
        banned_members: count(AccountStatus::Banned),
        verified_members: data.members.iter().filter(|m| m.verified).count(),
        premium_members: data.members.iter().filter(|m| m.premium).count(),
        open_reports: data
            .reports
            .iter()
            .filter(|r| r.status == ReportStatus::Open)
            .count(),
        daily_active_users: ctx
            .can(Permission::ViewAnalytics)
            .then(|| data.engagement.last().map(|p| p.daily_active_users))
            .flatten(),
        revenue_last_month_cents: ctx
            .can(Permission::ViewRevenue)
            .then(|| data.revenue.last().map(RevenuePoint::total_cents))
            .flatten(),
    }
}

fn engagement(data: &DashboardData) -> EngagementPage {
    let series = data.engagement.clone();
    let sum = |f: fn(&EngagementPoint) -> u32| series.iter().map(|p| u64::from(f(p))).sum::<u64>();
    let days = series.len().max(1) as u64;
    let average = sum(|p| p.daily_active_users) / days;

    EngagementPage {
        average_daily_active_users: u32::try_from(average).unwrap_or(u32::MAX),
        total_new_signups: sum(|p| p.new_signups),
        total_matches: sum(|p| p.matches),
        total_messages: sum(|p| p.messages_sent),
        series,
    }
}

fn revenue(data: &DashboardData) -> RevenuePage {
    let months = data.revenue.clone();
    let latest_growth_percent = match months.as_slice() {
        [.., previous, latest] if previous.total_cents() > 0 => {
            let delta = (latest.total_cents() - previous.total_cents()) as f64;
            Some(delta / previous.total_cents() as f64 * 100.0)
        }
        _ => None,
    };
    RevenuePage {
        total_cents: months.iter().map(RevenuePoint::total_cents).sum(),
        latest_growth_percent,
        months,
    }
}

fn payments(ctx: &PermissionContext, data: &DashboardData) -> PaymentsPage {
    let total = |status: PaymentStatus| -> i64 {
        data.payments
            .iter()
            .filter(|p| p.status == status)
            .map(|p| p.amount_cents)
            .sum()
    };
    PaymentsPage {
        payments: data.payments.clone(),
        settled_cents: total(PaymentStatus::Settled),
        refunded_cents: total(PaymentStatus::Refunded),
        controls: vec![control(ctx, REFUND_PAYMENT, Permission::RefundPayments)],
    }
}

fn ads(ctx: &PermissionContext, data: &DashboardData) -> AdsPage {
    let campaigns: Vec<CampaignView> = data
        .campaigns
        .iter()
        .map(|c| CampaignView {
            ctr_percent: c.ctr_percent(),
            conversion_percent: c.conversion_percent(),
            cost_per_click_cents: c.cost_per_click_cents(),
            campaign: c.clone(),
        })
        .collect();
    AdsPage {
        active_count: data
            .campaigns
            .iter()
            .filter(|c| c.status == CampaignStatus::Active)
            .count(),
        total_spend_cents: data.campaigns.iter().map(|c| c.spend_cents).sum(),
        campaigns,
        controls: vec![
            control(ctx, PAUSE_CAMPAIGN, Permission::ManageAds),
            control(ctx, RESUME_CAMPAIGN, Permission::ManageAds),
        ],
    }
}

fn roles(ctx: &PermissionContext, data: &DashboardData) -> RolesPage {
    RolesPage {
        roles: Role::all()
            .iter()
            .map(|role| RoleView {
                role: *role,
                label: role.label(),
                permissions: permissions_for(*role),
            })
            .collect(),
        permissions: Permission::all()
            .iter()
            .map(|p| PermissionView {
                permission: *p,
                description: p.description(),
            })
            .collect(),
        team: data.team.clone(),
        controls: vec![control(ctx, ASSIGN_ROLE, Permission::ManageRoles)],
    }
}

impl Dashboard {
    /// Headline numbers.
    pub async fn overview_page(&self, ctx: &PermissionContext) -> Gated<OverviewPage> {
        let data = self.data.read().await;
        guard_page(ctx, Permission::ViewDashboard, || overview(ctx, &data))
    }

    pub async fn members_page(
        &self,
        ctx: &PermissionContext,
        filter: MemberFilter,
    ) -> Gated<MembersPage> {
        let data = self.data.read().await;
        guard_page(ctx, Permission::ViewUsers, || {
            let members: Vec<Member> = data
                .members
                .iter()
                .filter(|m| filter.status.is_none_or(|s| m.status == s))
                .cloned()
                .collect();
            MembersPage {
                total: members.len(),
                members,
                controls: member_controls(ctx),
            }
        })
    }

    /// One member. The page gate runs before the lookup.
    pub async fn member_page(
        &self,
        ctx: &PermissionContext,
        member_id: Uuid,
    ) -> Result<Gated<MemberPage>, DashboardError> {
        let data = self.data.read().await;
        guard_page(ctx, Permission::ViewUsers, || -> Result<MemberPage, DashboardError> {
            let member = data
                .members
                .iter()
                .find(|m| m.id == member_id)
                .cloned()
                .ok_or(DashboardError::NotFound("Member"))?;
            Ok(MemberPage {
                member,
                controls: member_controls(ctx),
            })
        })
        .transpose()
    }

    pub async fn moderation_page(
        &self,
        ctx: &PermissionContext,
        filter: ReportFilter,
    ) -> Gated<ModerationPage> {
        let data = self.data.read().await;
        guard_page(ctx, Permission::ViewModeration, || ModerationPage {
            reports: data
                .reports
                .iter()
                .filter(|r| filter.status.is_none_or(|s| r.status == s))
                .cloned()
                .collect(),
            open_count: data
                .reports
                .iter()
                .filter(|r| r.status == ReportStatus::Open)
                .count(),
            controls: vec![
                control(ctx, RESOLVE_REPORT, Permission::ResolveReports),
                control(ctx, DISMISS_REPORT, Permission::ResolveReports),
                control(ctx, REMOVE_CONTENT, Permission::ModerateContent),
                control(ctx, BAN_MEMBER, Permission::BanUsers),
            ],
        })
    }

    pub async fn engagement_page(&self, ctx: &PermissionContext) -> Gated<EngagementPage> {
        let data = self.data.read().await;
        guard_page(ctx, Permission::ViewAnalytics, || engagement(&data))
    }

    pub async fn revenue_page(&self, ctx: &PermissionContext) -> Gated<RevenuePage> {
        let data = self.data.read().await;
        guard_page(ctx, Permission::ViewRevenue, || revenue(&data))
    }

    pub async fn payments_page(&self, ctx: &PermissionContext) -> Gated<PaymentsPage> {
        let data = self.data.read().await;
        guard_page(ctx, Permission::ViewPayments, || payments(ctx, &data))
    }

    pub async fn ads_page(&self, ctx: &PermissionContext) -> Gated<AdsPage> {
        let data = self.data.read().await;
        guard_page(ctx, Permission::ViewAdsMetrics, || ads(ctx, &data))
    }

    /// Role matrix and the admin team.
    pub async fn roles_page(&self, ctx: &PermissionContext) -> Gated<RolesPage> {
        let data = self.data.read().await;
        guard_page(ctx, Permission::ViewRoles, || roles(ctx, &data))
    }

    pub async fn settings_page(&self, ctx: &PermissionContext) -> Gated<SettingsPage> {
        let data = self.data.read().await;
        guard_page(ctx, Permission::ViewSettings, || SettingsPage {
            settings: data.settings.clone(),
            controls: vec![control(ctx, UPDATE_SETTINGS, Permission::ManageSettings)],
        })
    }

    /// Recent audit records with their delivery state, newest first.
    pub async fn audit_page(
        &self,
        ctx: &PermissionContext,
        limit: Option<usize>,
    ) -> Gated<AuditPage> {
        if let Err(denied) = check(ctx, Permission::ViewAuditLog) {
            return Gated::Denied(denied);
        }
        let limit = limit.unwrap_or(AUDIT_PAGE_DEFAULT).clamp(1, AUDIT_PAGE_MAX);
        Gated::Allowed(AuditPage {
            entries: self.audit.recent(limit).await,
            transport: self.audit.transport_name(),
        })
    }
}
