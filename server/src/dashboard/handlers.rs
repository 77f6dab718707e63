//! Dashboard HTTP handlers.
//!
//! Pages answer 403 with the access-denied placeholder when the gate
//! fails. Actions do the same, and only reach the domain checks (404, 409,
//! 422) once the gate has passed.

use axum::extract::{Path, Query, State};
use axum::Json;
use hl_common::Role;
use serde::Deserialize;
use uuid::Uuid;

use super::actions::ActionReceipt;
use super::error::DashboardError;
use super::models::{
    AdCampaign, Member, MemberUpdate, Payment, Report, Settings, SettingsUpdate, TeamMember,
};
use super::views::{
    AdsPage, AuditPage, EngagementPage, MemberFilter, MemberPage, MembersPage, ModerationPage,
    OverviewPage, PaymentsPage, ReportFilter, RevenuePage, RolesPage, SettingsPage,
};
use crate::api::AppState;
use crate::audit::RequestOrigin;
use crate::permissions::{Gated, Permissions};

type Page<T> = Gated<Json<T>>;
type Action<T> = Result<Gated<Json<ActionReceipt<T>>>, DashboardError>;

// Request types
#[derive(Debug, Default, Deserialize)]
pub struct ReasonRequest {
    pub reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NoteRequest {
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssignRoleRequest {
    pub role: Role,
}

#[derive(Debug, Default, Deserialize)]
pub struct AuditQuery {
    pub limit: Option<usize>,
}

// Pages

/// `GET /api/dashboard`
pub async fn overview(State(state): State<AppState>, ctx: Permissions) -> Page<OverviewPage> {
    state.dashboard.overview_page(&ctx).await.map(Json)
}

/// `GET /api/users`
pub async fn list_members(
    State(state): State<AppState>,
    ctx: Permissions,
    Query(filter): Query<MemberFilter>,
) -> Page<MembersPage> {
    state.dashboard.members_page(&ctx, filter).await.map(Json)
}

/// `GET /api/users/{id}`
pub async fn get_member(
    State(state): State<AppState>,
    ctx: Permissions,
    Path(id): Path<Uuid>,
) -> Result<Page<MemberPage>, DashboardError> {
    Ok(state.dashboard.member_page(&ctx, id).await?.map(Json))
}

/// `GET /api/moderation`
pub async fn moderation_queue(
    State(state): State<AppState>,
    ctx: Permissions,
    Query(filter): Query<ReportFilter>,
) -> Page<ModerationPage> {
    state.dashboard.moderation_page(&ctx, filter).await.map(Json)
}

/// `GET /api/analytics/engagement`
pub async fn engagement(State(state): State<AppState>, ctx: Permissions) -> Page<EngagementPage> {
    state.dashboard.engagement_page(&ctx).await.map(Json)
}

/// `GET /api/analytics/revenue`
pub async fn revenue(State(state): State<AppState>, ctx: Permissions) -> Page<RevenuePage> {
    state.dashboard.revenue_page(&ctx).await.map(Json)
}

/// `GET /api/payments`
pub async fn payments(State(state): State<AppState>, ctx: Permissions) -> Page<PaymentsPage> {
    state.dashboard.payments_page(&ctx).await.map(Json)
}

/// `GET /api/ads`
pub async fn ads(State(state): State<AppState>, ctx: Permissions) -> Page<AdsPage> {
    state.dashboard.ads_page(&ctx).await.map(Json)
}

/// `GET /api/roles`
pub async fn roles(State(state): State<AppState>, ctx: Permissions) -> Page<RolesPage> {
    state.dashboard.roles_page(&ctx).await.map(Json)
}

/// `GET /api/settings`
pub async fn settings(State(state): State<AppState>, ctx: Permissions) -> Page<SettingsPage> {
    state.dashboard.settings_page(&ctx).await.map(Json)
}

/// `GET /api/audit-log`
pub async fn audit_log(
    State(state): State<AppState>,
    ctx: Permissions,
    Query(query): Query<AuditQuery>,
) -> Page<AuditPage> {
    state.dashboard.audit_page(&ctx, query.limit).await.map(Json)
}

// Actions

/// `POST /api/users/{id}/ban`
#[tracing::instrument(skip(state, ctx, origin, body))]
pub async fn ban_member(
    State(state): State<AppState>,
    ctx: Permissions,
    origin: RequestOrigin,
    Path(id): Path<Uuid>,
    body: Option<Json<ReasonRequest>>,
) -> Action<Member> {
    let reason = body.and_then(|Json(b)| b.reason);
    Ok(state.dashboard.ban_member(&ctx, &origin, id, reason).await?.map(Json))
}

/// `POST /api/users/{id}/unban`
#[tracing::instrument(skip(state, ctx, origin))]
pub async fn unban_member(
    State(state): State<AppState>,
    ctx: Permissions,
    origin: RequestOrigin,
    Path(id): Path<Uuid>,
) -> Action<Member> {
    Ok(state.dashboard.unban_member(&ctx, &origin, id).await?.map(Json))
}

/// `POST /api/users/{id}/verify`
#[tracing::instrument(skip(state, ctx, origin))]
pub async fn verify_member(
    State(state): State<AppState>,
    ctx: Permissions,
    origin: RequestOrigin,
    Path(id): Path<Uuid>,
) -> Action<Member> {
    Ok(state.dashboard.verify_member(&ctx, &origin, id).await?.map(Json))
}

/// `PATCH /api/users/{id}`
#[tracing::instrument(skip(state, ctx, origin, body))]
pub async fn update_member(
    State(state): State<AppState>,
    ctx: Permissions,
    origin: RequestOrigin,
    Path(id): Path<Uuid>,
    Json(body): Json<MemberUpdate>,
) -> Action<Member> {
    Ok(state.dashboard.update_member(&ctx, &origin, id, body).await?.map(Json))
}

/// `DELETE /api/users/{id}`
#[tracing::instrument(skip(state, ctx, origin))]
pub async fn delete_member(
    State(state): State<AppState>,
    ctx: Permissions,
    origin: RequestOrigin,
    Path(id): Path<Uuid>,
) -> Action<Member> {
    Ok(state.dashboard.delete_member(&ctx, &origin, id).await?.map(Json))
}

/// `POST /api/moderation/{id}/resolve`
#[tracing::instrument(skip(state, ctx, origin, body))]
pub async fn resolve_report(
    State(state): State<AppState>,
    ctx: Permissions,
    origin: RequestOrigin,
    Path(id): Path<Uuid>,
    body: Option<Json<NoteRequest>>,
) -> Action<Report> {
    let note = body.and_then(|Json(b)| b.note);
    Ok(state.dashboard.resolve_report(&ctx, &origin, id, note).await?.map(Json))
}

/// `POST /api/moderation/{id}/dismiss`
#[tracing::instrument(skip(state, ctx, origin, body))]
pub async fn dismiss_report(
    State(state): State<AppState>,
    ctx: Permissions,
    origin: RequestOrigin,
    Path(id): Path<Uuid>,
    body: Option<Json<NoteRequest>>,
) -> Action<Report> {
    let note = body.and_then(|Json(b)| b.note);
    Ok(state.dashboard.dismiss_report(&ctx, &origin, id, note).await?.map(Json))
}

/// `POST /api/moderation/{id}/remove-content`
#[tracing::instrument(skip(state, ctx, origin))]
pub async fn remove_content(
    State(state): State<AppState>,
    ctx: Permissions,
    origin: RequestOrigin,
    Path(id): Path<Uuid>,
) -> Action<Report> {
    Ok(state
        .dashboard
        .remove_reported_content(&ctx, &origin, id)
        .await?
        .map(Json))
}

/// `POST /api/payments/{id}/refund`
#[tracing::instrument(skip(state, ctx, origin, body))]
pub async fn refund_payment(
    State(state): State<AppState>,
    ctx: Permissions,
    origin: RequestOrigin,
    Path(id): Path<Uuid>,
    body: Option<Json<ReasonRequest>>,
) -> Action<Payment> {
    let reason = body.and_then(|Json(b)| b.reason);
    Ok(state.dashboard.refund_payment(&ctx, &origin, id, reason).await?.map(Json))
}

/// `POST /api/ads/{id}/pause`
#[tracing::instrument(skip(state, ctx, origin))]
pub async fn pause_campaign(
    State(state): State<AppState>,
    ctx: Permissions,
    origin: RequestOrigin,
    Path(id): Path<Uuid>,
) -> Action<AdCampaign> {
    Ok(state.dashboard.pause_campaign(&ctx, &origin, id).await?.map(Json))
}

/// `POST /api/ads/{id}/resume`
#[tracing::instrument(skip(state, ctx, origin))]
pub async fn resume_campaign(
    State(state): State<AppState>,
    ctx: Permissions,
    origin: RequestOrigin,
    Path(id): Path<Uuid>,
) -> Action<AdCampaign> {
    Ok(state.dashboard.resume_campaign(&ctx, &origin, id).await?.map(Json))
}

/// `PUT /api/roles/team/{id}`
#[tracing::instrument(skip(state, ctx, origin, body))]
pub async fn assign_team_role(
    State(state): State<AppState>,
    ctx: Permissions,
    origin: RequestOrigin,
    Path(id): Path<Uuid>,
    Json(body): Json<AssignRoleRequest>,
) -> Action<TeamMember> {
    Ok(state
        .dashboard
        .assign_team_role(&ctx, &origin, id, body.role)
        .await?
        .map(Json))
}

/// `PUT /api/settings`
#[tracing::instrument(skip(state, ctx, origin, body))]
pub async fn update_settings(
    State(state): State<AppState>,
    ctx: Permissions,
    origin: RequestOrigin,
    Json(body): Json<SettingsUpdate>,
) -> Action<Settings> {
    Ok(state.dashboard.update_settings(&ctx, &origin, body).await?.map(Json))
}
