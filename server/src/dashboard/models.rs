//! Dashboard data model.

use chrono::{DateTime, NaiveDate, Utc};
use hl_common::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Member account state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Banned,
}

/// A member of the dating app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub age: u8,
    pub city: String,
    pub status: AccountStatus,
    pub verified: bool,
    pub premium: bool,
    pub reports_received: u32,
    pub ban_reason: Option<String>,
    pub joined_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportCategory {
    Harassment,
    FakeProfile,
    Spam,
    InappropriatePhotos,
    Scam,
    Underage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Open,
    Resolved,
    Dismissed,
}

/// Entry in the moderation queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub id: Uuid,
    pub reported_member_id: Uuid,
    pub reporter_member_id: Uuid,
    pub category: ReportCategory,
    pub details: String,
    pub status: ReportStatus,
    pub content_removed: bool,
    pub created_at: DateTime<Utc>,
    pub handled_by: Option<Uuid>,
    pub resolution_note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    PremiumMonthly,
    PremiumYearly,
    Boost,
    SuperLikes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Settled,
    Refunded,
}

/// In-app purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payment {
    pub id: Uuid,
    pub member_id: Uuid,
    pub product: Product,
    pub amount_cents: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub refunded_at: Option<DateTime<Utc>>,
    pub refund_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Active,
    Paused,
}

/// Ad campaign with raw counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdCampaign {
    pub id: Uuid,
    pub name: String,
    pub placement: String,
    pub status: CampaignStatus,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub spend_cents: i64,
}

impl AdCampaign {
    /// Click-through rate as a percentage.
    #[must_use]
    pub fn ctr_percent(&self) -> f64 {
        ratio(self.clicks, self.impressions) * 100.0
    }

    /// Conversions per click as a percentage.
    #[must_use]
    pub fn conversion_percent(&self) -> f64 {
        ratio(self.conversions, self.clicks) * 100.0
    }

    /// Average cost per click in cents.
    #[must_use]
    pub fn cost_per_click_cents(&self) -> Option<i64> {
        (self.clicks > 0).then(|| self.spend_cents / self.clicks as i64)
    }
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Member of the admin team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamMember {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Console-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub maintenance_mode: bool,
    pub new_signups_enabled: bool,
    pub minimum_age: u8,
    pub max_daily_likes: u32,
    pub auto_flag_threshold: u32,
    pub support_email: String,
}

/// Partial settings update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsUpdate {
    pub maintenance_mode: Option<bool>,
    pub new_signups_enabled: Option<bool>,
    pub minimum_age: Option<u8>,
    pub max_daily_likes: Option<u32>,
    pub auto_flag_threshold: Option<u32>,
    pub support_email: Option<String>,
}

/// Partial member profile update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberUpdate {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
}

/// One day of engagement numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngagementPoint {
    pub date: NaiveDate,
    pub daily_active_users: u32,
    pub new_signups: u32,
    pub matches: u32,
    pub messages_sent: u32,
}

/// One month of revenue, split by source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevenuePoint {
    pub month: String,
    pub subscriptions_cents: i64,
    pub boosts_cents: i64,
    pub ads_cents: i64,
}

impl RevenuePoint {
    #[must_use]
    pub const fn total_cents(&self) -> i64 {
        self.subscriptions_cents + self.boosts_cents + self.ads_cents
    }
}

/// Everything the console shows.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub members: Vec<Member>,
    pub reports: Vec<Report>,
    pub payments: Vec<Payment>,
    pub campaigns: Vec<AdCampaign>,
    pub team: Vec<TeamMember>,
    pub settings: Settings,
    pub engagement: Vec<EngagementPoint>,
    pub revenue: Vec<RevenuePoint>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            maintenance_mode: false,
            new_signups_enabled: true,
            minimum_age: 18,
            max_daily_likes: 100,
            auto_flag_threshold: 3,
            support_email: "support@heartline.app".into(),
        }
    }
}
