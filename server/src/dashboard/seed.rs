//! Built-in mock data.
//!
//! IDs are fixed so links between members, reports and payments stay stable.

use chrono::{DateTime, Duration, Utc};
use hl_common::Role;
use uuid::Uuid;

use super::models::{
    AccountStatus, AdCampaign, CampaignStatus, DashboardData, EngagementPoint, Member, Payment,
    PaymentStatus, Product, Report, ReportCategory, ReportStatus, RevenuePoint, Settings,
    TeamMember,
};

/// 2024-06-01T00:00:00Z
const SEED_NOW_SECS: i64 = 1_717_200_000;

fn seed_now() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(SEED_NOW_SECS)
}

fn days_ago(days: i64) -> DateTime<Utc> {
    seed_now() - Duration::days(days)
}

#[must_use]
pub const fn member_id(n: u16) -> Uuid {
    Uuid::from_u128(0x1000_0000 + n as u128)
}

#[must_use]
pub const fn report_id(n: u16) -> Uuid {
    Uuid::from_u128(0x2000_0000 + n as u128)
}

#[must_use]
pub const fn payment_id(n: u16) -> Uuid {
    Uuid::from_u128(0x3000_0000 + n as u128)
}

#[must_use]
pub const fn campaign_id(n: u16) -> Uuid {
    Uuid::from_u128(0x4000_0000 + n as u128)
}

#[must_use]
pub const fn team_member_id(n: u16) -> Uuid {
    Uuid::from_u128(0x5000_0000 + n as u128)
}

/// (name, city, age, verified, premium, reports received, banned reason)
const MEMBERS: &[(&str, &str, u8, bool, bool, u32, Option<&str>)] = &[
    ("Ava Martinez", "Austin", 27, true, true, 0, None),
    ("Noah Kim", "Seattle", 31, true, false, 1, None),
    ("Mia Johnson", "Chicago", 24, false, false, 0, None),
    ("Liam O'Brien", "Boston", 35, true, true, 0, None),
    ("Zoe Chen", "San Francisco", 29, true, true, 0, None),
    ("Ethan Brooks", "Denver", 33, false, false, 4, None),
    ("Isla Novak", "Portland", 26, true, false, 0, None),
    ("Lucas Silva", "Miami", 30, false, false, 6, Some("Repeated harassment reports")),
    ("Amara Okafor", "Atlanta", 28, true, true, 0, None),
    ("Jonas Weber", "New York", 38, false, false, 2, None),
    ("Priya Raman", "Houston", 25, true, false, 0, None),
    ("Caleb Turner", "Phoenix", 22, false, false, 3, None),
];

fn members() -> Vec<Member> {
    MEMBERS
        .iter()
        .enumerate()
        .map(|(i, (name, city, age, verified, premium, reports, ban))| {
            let n = i as u16 + 1;
            let handle = name
                .to_lowercase()
                .replace(['\'', ' '], ".");
            Member {
                id: member_id(n),
                display_name: (*name).to_string(),
                email: format!("{handle}@example.com"),
                age: *age,
                city: (*city).to_string(),
                status: if ban.is_some() {
                    AccountStatus::Banned
                } else {
                    AccountStatus::Active
                },
                verified: *verified,
                premium: *premium,
                reports_received: *reports,
                ban_reason: ban.map(str::to_string),
                joined_at: days_ago(400 - i64::from(n) * 25),
                last_active_at: days_ago(i64::from(n % 5)),
            }
        })
        .collect()
}

fn reports() -> Vec<Report> {
    let open = |n: u16, reported: u16, reporter: u16, category, details: &str, age: i64| Report {
        id: report_id(n),
        reported_member_id: member_id(reported),
        reporter_member_id: member_id(reporter),
        category,
        details: details.to_string(),
        status: ReportStatus::Open,
        content_removed: false,
        created_at: days_ago(age),
        handled_by: None,
        resolution_note: None,
    };

    let mut reports = vec![
        open(1, 6, 3, ReportCategory::Harassment, "Sent abusive messages after unmatch", 1),
        open(2, 10, 7, ReportCategory::FakeProfile, "Photos appear to be a celebrity", 2),
        open(3, 12, 11, ReportCategory::Spam, "Links to an external site in every chat", 2),
        open(4, 6, 9, ReportCategory::InappropriatePhotos, "Explicit photo in profile gallery", 3),
        open(5, 12, 1, ReportCategory::Scam, "Asked for gift cards", 4),
        open(6, 8, 5, ReportCategory::Harassment, "Threatening messages", 12),
    ];

    if let Some(closed) = reports.last_mut() {
        closed.status = ReportStatus::Resolved;
        closed.content_removed = true;
        closed.handled_by = Some(team_member_id(3));
        closed.resolution_note = Some("Member banned".into());
    }
    reports
}

fn payments() -> Vec<Payment> {
    let settled = |n: u16, member: u16, product, amount_cents: i64, age: i64| Payment {
        id: payment_id(n),
        member_id: member_id(member),
        product,
        amount_cents,
        currency: "USD".into(),
        status: PaymentStatus::Settled,
        created_at: days_ago(age),
        refunded_at: None,
        refund_reason: None,
    };

    let mut payments = vec![
        settled(1, 1, Product::PremiumMonthly, 1999, 3),
        settled(2, 4, Product::PremiumYearly, 11999, 8),
        settled(3, 5, Product::Boost, 499, 1),
        settled(4, 9, Product::PremiumMonthly, 1999, 15),
        settled(5, 2, Product::SuperLikes, 899, 6),
        settled(6, 7, Product::Boost, 499, 2),
        settled(7, 5, Product::PremiumMonthly, 1999, 33),
        settled(8, 11, Product::SuperLikes, 899, 20),
    ];

    if let Some(refunded) = payments.iter_mut().find(|p| p.id == payment_id(7)) {
        refunded.status = PaymentStatus::Refunded;
        refunded.refunded_at = Some(days_ago(30));
        refunded.refund_reason = Some("Duplicate charge".into());
    }
    payments
}

fn campaigns() -> Vec<AdCampaign> {
    use CampaignStatus::{Active, Paused};

    // (name, placement, status, impressions, clicks, conversions, spend_cents)
    let rows = [
        ("Summer Love", "discover_feed", Active, 182_400, 4_210, 388, 612_000),
        ("Premium Week", "match_screen", Active, 96_300, 2_870, 415, 344_500),
        ("City Singles Austin", "discover_feed", Paused, 41_200, 610, 37, 98_000),
        ("Boost Bundle", "profile_banner", Active, 120_800, 1_940, 260, 205_300),
        ("Win-back Lapsed", "push", Paused, 15_000, 0, 0, 0),
    ];

    rows.into_iter()
        .zip(1..)
        .map(
            |((name, placement, status, impressions, clicks, conversions, spend_cents), n)| {
                AdCampaign {
                    id: campaign_id(n),
                    name: name.to_string(),
                    placement: placement.to_string(),
                    status,
                    impressions,
                    clicks,
                    conversions,
                    spend_cents,
                }
            },
        )
        .collect()
}

fn team() -> Vec<TeamMember> {
    let member = |n: u16, name: &str, email: &str, role, last_login: Option<i64>| TeamMember {
        id: team_member_id(n),
        name: name.to_string(),
        email: email.to_string(),
        role,
        last_login_at: last_login.map(days_ago),
    };

    vec![
        member(1, "Dana Whitfield", "dana@heartline.app", Role::Owner, Some(0)),
        member(2, "Marcus Lee", "marcus@heartline.app", Role::Admin, Some(1)),
        member(3, "Sofia Alvarez", "sofia@heartline.app", Role::Moderator, Some(0)),
        member(4, "Tom Becker", "tom@heartline.app", Role::Moderator, Some(3)),
        member(5, "Hana Sato", "hana@heartline.app", Role::Support, Some(2)),
        member(6, "Riley Brooks", "riley@heartline.app", Role::AdManager, None),
    ]
}

fn engagement() -> Vec<EngagementPoint> {
    const DAU: [u32; 14] = [
        41_200, 42_050, 40_870, 43_300, 45_900, 48_200, 47_650, 43_900, 44_120, 43_480, 45_010,
        47_800, 50_240, 49_930,
    ];

    DAU.iter()
        .enumerate()
        .map(|(i, dau)| {
            let day = i as u32;
            EngagementPoint {
                date: days_ago(13 - i as i64).date_naive(),
                daily_active_users: *dau,
                new_signups: 1_150 + (day * 37) % 260,
                matches: dau / 6,
                messages_sent: dau * 9 + day * 113,
            }
        })
        .collect()
}

fn revenue() -> Vec<RevenuePoint> {
    [
        ("2023-12", 18_420_000, 2_110_000, 940_000),
        ("2024-01", 19_050_000, 2_340_000, 1_020_000),
        ("2024-02", 19_880_000, 2_580_000, 1_010_000),
        ("2024-03", 20_610_000, 2_460_000, 1_150_000),
        ("2024-04", 21_330_000, 2_790_000, 1_240_000),
        ("2024-05", 22_470_000, 3_050_000, 1_310_000),
    ]
    .into_iter()
    .map(|(month, subscriptions_cents, boosts_cents, ads_cents)| RevenuePoint {
        month: month.to_string(),
        subscriptions_cents,
        boosts_cents,
        ads_cents,
    })
    .collect()
}

/// The full mock data set.
#[must_use]
pub fn dashboard_data() -> DashboardData {
    DashboardData {
        members: members(),
        reports: reports(),
        payments: payments(),
        campaigns: campaigns(),
        team: team(),
        settings: Settings::default(),
        engagement: engagement(),
        revenue: revenue(),
    }
}
