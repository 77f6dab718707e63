//! Gated console actions.
//!
//! Each action runs through [`guarded`]: the permission is checked again
//! here even though the page already rendered the control as disabled. A
//! denied call touches neither the data nor the audit log. Domain checks
//! (not found, wrong state) run after the gate, and the audit record is
//! submitted only after the change is in place.

use hl_common::{Permission, Role, SessionActor};
use serde::Serialize;
use uuid::Uuid;

use super::error::DashboardError;
use super::models::{
    AccountStatus, AdCampaign, CampaignStatus, DashboardData, Member, MemberUpdate, Payment,
    PaymentStatus, Report, ReportStatus, Settings, SettingsUpdate, TeamMember,
};
use super::Dashboard;
use crate::audit::{AuditRecord, RequestOrigin};
use crate::permissions::{guarded, Gated, PermissionContext};

pub const BAN_MEMBER: &str = "users.ban";
pub const UNBAN_MEMBER: &str = "users.unban";
pub const VERIFY_MEMBER: &str = "users.verify";
pub const EDIT_MEMBER: &str = "users.edit";
pub const DELETE_MEMBER: &str = "users.delete";
pub const RESOLVE_REPORT: &str = "reports.resolve";
pub const DISMISS_REPORT: &str = "reports.dismiss";
pub const REMOVE_CONTENT: &str = "reports.remove_content";
pub const REFUND_PAYMENT: &str = "payments.refund";
pub const PAUSE_CAMPAIGN: &str = "ads.pause";
pub const RESUME_CAMPAIGN: &str = "ads.resume";
pub const ASSIGN_ROLE: &str = "roles.assign";
pub const UPDATE_SETTINGS: &str = "settings.update";

/// Result of a performed action.
#[derive(Debug, Clone, Serialize)]
pub struct ActionReceipt<T> {
    pub result: T,
    /// Record submitted to the audit log for this action.
    pub audit_record_id: Uuid,
}

type ActionResult<T> = Result<Gated<ActionReceipt<T>>, DashboardError>;

impl Dashboard {
    /// Gate, mutate, then audit.
    ///
    /// `mutate` returns the value to hand back plus the audit target. The
    /// change and its audit submission run as one spawned task, so dropping
    /// the caller's future cannot leave a committed change unaudited.
    async fn perform<T, F>(
        &self,
        ctx: &PermissionContext,
        origin: &RequestOrigin,
        permission: Permission,
        action: &'static str,
        mutate: F,
    ) -> ActionResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut DashboardData, SessionActor) -> Result<(T, String), DashboardError>
            + Send
            + 'static,
    {
        let dashboard = self.clone();
        let origin = origin.clone();
        let actor = ctx.actor();

        guarded(ctx, permission, move || async move {
            tokio::spawn(async move { dashboard.commit(action, actor, &origin, mutate).await })
                .await
                .map_err(|e| DashboardError::Internal(format!("action task failed: {e}")))?
        })
        .await
        .transpose()
    }

    async fn commit<T, F>(
        &self,
        action: &'static str,
        actor: SessionActor,
        origin: &RequestOrigin,
        mutate: F,
    ) -> Result<ActionReceipt<T>, DashboardError>
    where
        F: FnOnce(&mut DashboardData, SessionActor) -> Result<(T, String), DashboardError>,
    {
        let (result, target) = {
            let mut data = self.data.write().await;
            mutate(&mut data, actor)?
        };
        tracing::info!(
            action,
            actor_id = %actor.id,
            role = %actor.role,
            target = %target,
            "Console action performed"
        );

        let record = AuditRecord::new(action, actor, origin).with_target(target);
        let task = self.audit.submit(record).await;
        Ok(ActionReceipt {
            result,
            audit_record_id: task.record_id(),
        })
    }

    /// Ban a member.
    pub async fn ban_member(
        &self,
        ctx: &PermissionContext,
        origin: &RequestOrigin,
        member_id: Uuid,
        reason: Option<String>,
    ) -> ActionResult<Member> {
        self.perform(ctx, origin, Permission::BanUsers, BAN_MEMBER, move |data, _| {
            let member = find_member(data, member_id)?;
            if member.status == AccountStatus::Banned {
                return Err(DashboardError::Conflict("Member is already banned".into()));
            }
            member.status = AccountStatus::Banned;
            member.ban_reason = reason.filter(|r| !r.trim().is_empty());
            Ok((member.clone(), member_id.to_string()))
        })
        .await
    }

    /// Lift a member's ban.
    pub async fn unban_member(
        &self,
        ctx: &PermissionContext,
        origin: &RequestOrigin,
        member_id: Uuid,
    ) -> ActionResult<Member> {
        self.perform(ctx, origin, Permission::BanUsers, UNBAN_MEMBER, move |data, _| {
            let member = find_member(data, member_id)?;
            if member.status != AccountStatus::Banned {
                return Err(DashboardError::Conflict("Member is not banned".into()));
            }
            member.status = AccountStatus::Active;
            member.ban_reason = None;
            Ok((member.clone(), member_id.to_string()))
        })
        .await
    }

    /// Mark a member as identity-verified.
    pub async fn verify_member(
        &self,
        ctx: &PermissionContext,
        origin: &RequestOrigin,
        member_id: Uuid,
    ) -> ActionResult<Member> {
        self.perform(ctx, origin, Permission::VerifyUsers, VERIFY_MEMBER, move |data, _| {
            let member = find_member(data, member_id)?;
            if member.verified {
                return Err(DashboardError::Conflict("Member is already verified".into()));
            }
            member.verified = true;
            Ok((member.clone(), member_id.to_string()))
        })
        .await
    }

    /// Edit profile fields of a member.
    pub async fn update_member(
        &self,
        ctx: &PermissionContext,
        origin: &RequestOrigin,
        member_id: Uuid,
        update: MemberUpdate,
    ) -> ActionResult<Member> {
        self.perform(ctx, origin, Permission::EditUsers, EDIT_MEMBER, move |data, _| {
            validate_member_update(&update)?;
            let member = find_member(data, member_id)?;
            if let Some(name) = update.display_name {
                member.display_name = name.trim().to_string();
            }
            if let Some(email) = update.email {
                member.email = email.trim().to_string();
            }
            if let Some(city) = update.city {
                member.city = city.trim().to_string();
            }
            Ok((member.clone(), member_id.to_string()))
        })
        .await
    }

    /// Delete a member account.
    pub async fn delete_member(
        &self,
        ctx: &PermissionContext,
        origin: &RequestOrigin,
        member_id: Uuid,
    ) -> ActionResult<Member> {
        self.perform(ctx, origin, Permission::DeleteUsers, DELETE_MEMBER, move |data, _| {
            let idx = data
                .members
                .iter()
                .position(|m| m.id == member_id)
                .ok_or(DashboardError::NotFound("Member"))?;
            let removed = data.members.remove(idx);
            Ok((removed, member_id.to_string()))
        })
        .await
    }

    /// Close a report as actioned.
    pub async fn resolve_report(
        &self,
        ctx: &PermissionContext,
        origin: &RequestOrigin,
        report_id: Uuid,
        note: Option<String>,
    ) -> ActionResult<Report> {
        self.perform(ctx, origin, Permission::ResolveReports, RESOLVE_REPORT, move |data, actor| {
            close_report(data, report_id, ReportStatus::Resolved, actor, note)
        })
        .await
    }

    /// Close a report without action.
    pub async fn dismiss_report(
        &self,
        ctx: &PermissionContext,
        origin: &RequestOrigin,
        report_id: Uuid,
        note: Option<String>,
    ) -> ActionResult<Report> {
        self.perform(ctx, origin, Permission::ResolveReports, DISMISS_REPORT, move |data, actor| {
            close_report(data, report_id, ReportStatus::Dismissed, actor, note)
        })
        .await
    }

    /// Take down the content a report points at. The report stays in its
    /// current state.
    pub async fn remove_reported_content(
        &self,
        ctx: &PermissionContext,
        origin: &RequestOrigin,
        report_id: Uuid,
    ) -> ActionResult<Report> {
        self.perform(ctx, origin, Permission::ModerateContent, REMOVE_CONTENT, move |data, actor| {
            let report = find_report(data, report_id)?;
            if report.content_removed {
                return Err(DashboardError::Conflict("Content was already removed".into()));
            }
            report.content_removed = true;
            report.handled_by.get_or_insert(actor.id);
            Ok((report.clone(), report_id.to_string()))
        })
        .await
    }

    /// Refund a settled payment.
    pub async fn refund_payment(
        &self,
        ctx: &PermissionContext,
        origin: &RequestOrigin,
        payment_id: Uuid,
        reason: Option<String>,
    ) -> ActionResult<Payment> {
        self.perform(ctx, origin, Permission::RefundPayments, REFUND_PAYMENT, move |data, _| {
            let payment = data
                .payments
                .iter_mut()
                .find(|p| p.id == payment_id)
                .ok_or(DashboardError::NotFound("Payment"))?;
            if payment.status == PaymentStatus::Refunded {
                return Err(DashboardError::Conflict("Payment was already refunded".into()));
            }
            payment.status = PaymentStatus::Refunded;
            payment.refunded_at = Some(chrono::Utc::now());
            payment.refund_reason = reason.filter(|r| !r.trim().is_empty());
            Ok((payment.clone(), payment_id.to_string()))
        })
        .await
    }

    /// Pause a running campaign.
    pub async fn pause_campaign(
        &self,
        ctx: &PermissionContext,
        origin: &RequestOrigin,
        campaign_id: Uuid,
    ) -> ActionResult<AdCampaign> {
        self.perform(ctx, origin, Permission::ManageAds, PAUSE_CAMPAIGN, move |data, _| {
            set_campaign_status(data, campaign_id, CampaignStatus::Paused)
        })
        .await
    }

    /// Resume a paused campaign.
    pub async fn resume_campaign(
        &self,
        ctx: &PermissionContext,
        origin: &RequestOrigin,
        campaign_id: Uuid,
    ) -> ActionResult<AdCampaign> {
        self.perform(ctx, origin, Permission::ManageAds, RESUME_CAMPAIGN, move |data, _| {
            set_campaign_status(data, campaign_id, CampaignStatus::Active)
        })
        .await
    }

    /// Give an admin team member another role.
    pub async fn assign_team_role(
        &self,
        ctx: &PermissionContext,
        origin: &RequestOrigin,
        team_member_id: Uuid,
        role: Role,
    ) -> ActionResult<TeamMember> {
        self.perform(ctx, origin, Permission::ManageRoles, ASSIGN_ROLE, move |data, _| {
            let owners = data.team.iter().filter(|t| t.role == Role::Owner).count();
            let member = data
                .team
                .iter_mut()
                .find(|t| t.id == team_member_id)
                .ok_or(DashboardError::NotFound("Team member"))?;
            if member.role == role {
                return Err(DashboardError::Conflict(format!(
                    "{} already has the {} role",
                    member.name,
                    role.label()
                )));
            }
            if member.role == Role::Owner && owners == 1 {
                return Err(DashboardError::Validation(
                    "The last owner cannot be given another role".into(),
                ));
            }
            member.role = role;
            Ok((member.clone(), format!("{team_member_id}:{role}")))
        })
        .await
    }

    /// Change console settings.
    pub async fn update_settings(
        &self,
        ctx: &PermissionContext,
        origin: &RequestOrigin,
        update: SettingsUpdate,
    ) -> ActionResult<Settings> {
        self.perform(ctx, origin, Permission::ManageSettings, UPDATE_SETTINGS, move |data, _| {
            let changed = apply_settings(&mut data.settings, update)?;
            Ok((data.settings.clone(), changed.join(",")))
        })
        .await
    }
}

fn find_member(data: &mut DashboardData, id: Uuid) -> Result<&mut Member, DashboardError> {
    data.members
        .iter_mut()
        .find(|m| m.id == id)
        .ok_or(DashboardError::NotFound("Member"))
}

fn find_report(data: &mut DashboardData, id: Uuid) -> Result<&mut Report, DashboardError> {
    data.reports
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or(DashboardError::NotFound("Report"))
}

fn close_report(
    data: &mut DashboardData,
    report_id: Uuid,
    status: ReportStatus,
    actor: SessionActor,
    note: Option<String>,
) -> Result<(Report, String), DashboardError> {
    let report = find_report(data, report_id)?;
    if report.status != ReportStatus::Open {
        return Err(DashboardError::Conflict("Report is already closed".into()));
    }
    report.status = status;
    report.handled_by = Some(actor.id);
    report.resolution_note = note.filter(|n| !n.trim().is_empty());
    Ok((report.clone(), report_id.to_string()))
}

fn set_campaign_status(
    data: &mut DashboardData,
    campaign_id: Uuid,
    status: CampaignStatus,
) -> Result<(AdCampaign, String), DashboardError> {
    let campaign = data
        .campaigns
        .iter_mut()
        .find(|c| c.id == campaign_id)
        .ok_or(DashboardError::NotFound("Campaign"))?;
    if campaign.status == status {
        let state = match status {
            CampaignStatus::Active => "running",
            CampaignStatus::Paused => "paused",
        };
        return Err(DashboardError::Conflict(format!("Campaign is already {state}")));
    }
    campaign.status = status;
    Ok((campaign.clone(), campaign_id.to_string()))
}

fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    email
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        })
}

fn validate_member_update(update: &MemberUpdate) -> Result<(), DashboardError> {
    if update.display_name.is_none() && update.email.is_none() && update.city.is_none() {
        return Err(DashboardError::Validation("Nothing to update".into()));
    }
    if let Some(name) = &update.display_name {
        let len = name.trim().chars().count();
        if len == 0 || len > 50 {
            return Err(DashboardError::Validation(
                "Display name must be 1-50 characters".into(),
            ));
        }
    }
    if let Some(email) = &update.email {
        if !is_plausible_email(email) {
            return Err(DashboardError::Validation("Email address is invalid".into()));
        }
    }
    if let Some(city) = &update.city {
        if city.trim().is_empty() {
            return Err(DashboardError::Validation("City cannot be empty".into()));
        }
    }
    Ok(())
}

/// Validate and apply a settings update, returning the changed keys.
fn apply_settings(
    settings: &mut Settings,
    update: SettingsUpdate,
) -> Result<Vec<&'static str>, DashboardError> {
    if let Some(age) = update.minimum_age {
        if !(18..=99).contains(&age) {
            return Err(DashboardError::Validation(
                "Minimum age must be between 18 and 99".into(),
            ));
        }
    }
    if update.max_daily_likes == Some(0) {
        return Err(DashboardError::Validation(
            "Daily like limit must be positive".into(),
        ));
    }
    if update.auto_flag_threshold == Some(0) {
        return Err(DashboardError::Validation(
            "Auto-flag threshold must be positive".into(),
        ));
    }
    if let Some(email) = &update.support_email {
        if !is_plausible_email(email) {
            return Err(DashboardError::Validation(
                "Support email is invalid".into(),
            ));
        }
    }

    let mut changed = Vec::new();
    if let Some(v) = update.maintenance_mode {
        settings.maintenance_mode = v;
        changed.push("maintenance_mode");
    }
    if let Some(v) = update.new_signups_enabled {
        settings.new_signups_enabled = v;
        changed.push("new_signups_enabled");
    }
    if let Some(v) = update.minimum_age {
        settings.minimum_age = v;
        changed.push("minimum_age");
    }
    if let Some(v) = update.max_daily_likes {
        settings.max_daily_likes = v;
        changed.push("max_daily_likes");
    }
    if let Some(v) = update.auto_flag_threshold {
        settings.auto_flag_threshold = v;
        changed.push("auto_flag_threshold");
    }
    if let Some(v) = update.support_email {
        settings.support_email = v.trim().to_string();
        changed.push("support_email");
    }
    if changed.is_empty() {
        return Err(DashboardError::Validation("Nothing to update".into()));
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::audit::{AuditLog, LogTransport};
    use crate::config::Config;
    use crate::dashboard::seed::{campaign_id, member_id, payment_id, report_id, team_member_id};

    fn dashboard() -> Dashboard {
        let audit = AuditLog::new(Arc::new(LogTransport), Config::default_for_test().audit);
        Dashboard::seeded(audit)
    }

    fn ctx(role: Role) -> PermissionContext {
        PermissionContext::new(SessionActor::new(Uuid::now_v7(), role))
    }

    fn origin() -> RequestOrigin {
        RequestOrigin {
            ip: "127.0.0.1".into(),
            device: "unknown".into(),
        }
    }

    #[tokio::test]
    async fn test_denied_ban_changes_nothing_and_is_not_audited() {
        let dash = dashboard();
        let before = dash.snapshot().await.members;

        let outcome = dash
            .ban_member(&ctx(Role::AdManager), &origin(), member_id(1), None)
            .await
            .unwrap();

        assert!(!outcome.is_allowed());
        assert_eq!(dash.snapshot().await.members, before);
        assert!(dash.audit().recent(10).await.is_empty());
    }

    #[tokio::test]
    async fn test_denied_action_skips_domain_checks() {
        // Even an unknown id reports denial rather than not-found.
        let dash = dashboard();
        let outcome = dash
            .refund_payment(&ctx(Role::Moderator), &origin(), Uuid::nil(), None)
            .await
            .unwrap();
        assert!(matches!(outcome, Gated::Denied(d) if d.required == Permission::RefundPayments));
    }

    #[tokio::test]
    async fn test_ban_and_unban() {
        let dash = dashboard();
        let moderator = ctx(Role::Moderator);

        let banned = dash
            .ban_member(&moderator, &origin(), member_id(6), Some("Harassment".into()))
            .await
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(banned.result.status, AccountStatus::Banned);
        assert_eq!(banned.result.ban_reason.as_deref(), Some("Harassment"));

        let again = dash.ban_member(&moderator, &origin(), member_id(6), None).await;
        assert!(matches!(again, Err(DashboardError::Conflict(_))));

        let unbanned = dash
            .unban_member(&moderator, &origin(), member_id(6))
            .await
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(unbanned.result.status, AccountStatus::Active);
        assert!(unbanned.result.ban_reason.is_none());

        let journal = dash.audit().recent(10).await;
        let actions: Vec<&str> = journal.iter().map(|e| e.record.action.as_str()).collect();
        assert_eq!(actions, vec![UNBAN_MEMBER, BAN_MEMBER]);
        assert_eq!(journal[1].record.actor.role, Role::Moderator);
        assert_eq!(journal[1].record.target, Some(member_id(6).to_string()));
    }

    #[tokio::test]
    async fn test_failed_domain_check_is_not_audited() {
        let dash = dashboard();
        let result = dash.ban_member(&ctx(Role::Owner), &origin(), Uuid::nil(), None).await;
        assert_eq!(result.unwrap_err(), DashboardError::NotFound("Member"));
        assert!(dash.audit().recent(10).await.is_empty());
    }

    #[tokio::test]
    async fn test_abandoned_action_is_still_audited() {
        let dash = dashboard();
        let moderator = ctx(Role::Moderator);

        // Contend the journal, then give up on the request as a client
        // disconnect would.
        let held = dash.audit().journal().write().await;
        let outcome = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            dash.ban_member(&moderator, &origin(), member_id(6), None),
        )
        .await;
        assert!(outcome.is_err());
        drop(held);

        let mut journal = Vec::new();
        for _ in 0..100 {
            journal = dash.audit().recent(10).await;
            if !journal.is_empty() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert_eq!(journal.len(), 1);
        assert_eq!(journal[0].record.action, BAN_MEMBER);
        assert_eq!(journal[0].record.target, Some(member_id(6).to_string()));

        let members = dash.snapshot().await.members;
        let member = members.iter().find(|m| m.id == member_id(6)).unwrap();
        assert_eq!(member.status, AccountStatus::Banned);
    }

    #[tokio::test]
    async fn test_support_refund() {
        let dash = dashboard();
        let support = ctx(Role::Support);
        let receipt = dash
            .refund_payment(&support, &origin(), payment_id(1), Some("Accidental purchase".into()))
            .await
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(receipt.result.status, PaymentStatus::Refunded);
        assert!(receipt.result.refunded_at.is_some());

        let twice = dash.refund_payment(&support, &origin(), payment_id(1), None).await;
        assert!(matches!(twice, Err(DashboardError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_report_lifecycle() {
        let dash = dashboard();
        let moderator = ctx(Role::Moderator);

        let removed = dash
            .remove_reported_content(&moderator, &origin(), report_id(4))
            .await
            .unwrap()
            .into_result()
            .unwrap();
        assert!(removed.result.content_removed);
        assert_eq!(removed.result.status, ReportStatus::Open);

        let resolved = dash
            .resolve_report(&moderator, &origin(), report_id(4), Some("Photo removed".into()))
            .await
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(resolved.result.status, ReportStatus::Resolved);
        assert_eq!(resolved.result.handled_by, Some(moderator.actor().id));

        let dismiss = dash.dismiss_report(&moderator, &origin(), report_id(4), None).await;
        assert!(matches!(dismiss, Err(DashboardError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_campaign_pause_resume() {
        let dash = dashboard();
        let ads = ctx(Role::AdManager);

        let paused = dash
            .pause_campaign(&ads, &origin(), campaign_id(1))
            .await
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(paused.result.status, CampaignStatus::Paused);

        let again = dash.pause_campaign(&ads, &origin(), campaign_id(1)).await;
        assert!(matches!(again, Err(DashboardError::Conflict(_))));

        let resumed = dash.resume_campaign(&ads, &origin(), campaign_id(1)).await.unwrap();
        assert!(resumed.is_allowed());
    }

    #[tokio::test]
    async fn test_only_owner_assigns_roles() {
        let dash = dashboard();
        let denied = dash
            .assign_team_role(&ctx(Role::Admin), &origin(), team_member_id(5), Role::Moderator)
            .await
            .unwrap();
        assert!(!denied.is_allowed());

        let assigned = dash
            .assign_team_role(&ctx(Role::Owner), &origin(), team_member_id(5), Role::Moderator)
            .await
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(assigned.result.role, Role::Moderator);
    }

    #[tokio::test]
    async fn test_last_owner_is_protected() {
        let dash = dashboard();
        let result = dash
            .assign_team_role(&ctx(Role::Owner), &origin(), team_member_id(1), Role::Admin)
            .await;
        assert!(matches!(result, Err(DashboardError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_member_validation() {
        let dash = dashboard();
        let support = ctx(Role::Support);

        let empty = dash
            .update_member(&support, &origin(), member_id(2), MemberUpdate::default())
            .await;
        assert!(matches!(empty, Err(DashboardError::Validation(_))));

        let bad_email = MemberUpdate {
            email: Some("not-an-email".into()),
            ..MemberUpdate::default()
        };
        let result = dash.update_member(&support, &origin(), member_id(2), bad_email).await;
        assert!(matches!(result, Err(DashboardError::Validation(_))));

        let rename = MemberUpdate {
            display_name: Some("  Noah K.  ".into()),
            ..MemberUpdate::default()
        };
        let updated = dash
            .update_member(&support, &origin(), member_id(2), rename)
            .await
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(updated.result.display_name, "Noah K.");
    }

    #[tokio::test]
    async fn test_delete_member() {
        let dash = dashboard();
        let moderator = ctx(Role::Moderator);
        let denied = dash.delete_member(&moderator, &origin(), member_id(3)).await.unwrap();
        assert!(!denied.is_allowed());

        let admin = ctx(Role::Admin);
        dash.delete_member(&admin, &origin(), member_id(3)).await.unwrap();
        assert!(dash.snapshot().await.members.iter().all(|m| m.id != member_id(3)));
    }

    #[tokio::test]
    async fn test_settings_update() {
        let dash = dashboard();
        let admin = ctx(Role::Admin);

        let too_young = SettingsUpdate {
            minimum_age: Some(16),
            ..SettingsUpdate::default()
        };
        let result = dash.update_settings(&admin, &origin(), too_young).await;
        assert!(matches!(result, Err(DashboardError::Validation(_))));

        let update = SettingsUpdate {
            maintenance_mode: Some(true),
            max_daily_likes: Some(50),
            ..SettingsUpdate::default()
        };
        let receipt = dash
            .update_settings(&admin, &origin(), update)
            .await
            .unwrap()
            .into_result()
            .unwrap();
        assert!(receipt.result.maintenance_mode);
        assert_eq!(receipt.result.max_daily_likes, 50);

        let journal = dash.audit().recent(1).await;
        assert_eq!(journal[0].record.target.as_deref(), Some("maintenance_mode,max_daily_likes"));
    }

    #[test]
    fn test_email_plausibility() {
        assert!(is_plausible_email("a@b.co"));
        assert!(!is_plausible_email("@b.co"));
        assert!(!is_plausible_email("a@bco"));
        assert!(!is_plausible_email("a@.co"));
    }
}
