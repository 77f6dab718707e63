//! Server Configuration
//!
//! Loads configuration from environment variables.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use hl_common::Role;

/// Default audit retry schedule in seconds (exponential-ish backoff).
const DEFAULT_RETRY_DELAYS_SECS: [u64; 5] = [1, 5, 30, 120, 600];

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080")
    pub bind_address: String,

    /// Trust `X-Forwarded-For` / `X-Real-IP` when recording audit IPs
    pub trust_proxy: bool,

    /// Role used when a session is bootstrapped without a valid role
    pub default_role: Role,

    /// Session lifetime in seconds (default: 28800 = 8 hours)
    pub session_ttl_secs: i64,

    /// Audit delivery settings
    pub audit: AuditConfig,
}

/// Audit sink configuration.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// External audit service URL. `None` selects the development log transport.
    pub endpoint: Option<String>,

    /// HMAC-SHA256 secret used to sign audit payloads (optional)
    pub signing_secret: Option<String>,

    /// Per-attempt HTTP timeout
    pub timeout: Duration,

    /// Total delivery attempts before a record is dead-lettered
    pub max_attempts: u32,

    /// Delay before each retry; the last entry is reused when attempts outrun it
    pub retry_delays: Vec<Duration>,
}

impl AuditConfig {
    /// Delay to wait after the given failed attempt (1-based).
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let idx = attempt.saturating_sub(1) as usize;
        self.retry_delays
            .get(idx)
            .or_else(|| self.retry_delays.last())
            .copied()
            .unwrap_or(Duration::ZERO)
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let default_role = env::var("DEFAULT_ROLE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Role::DEFAULT);

        let retry_delays = match env::var("AUDIT_RETRY_DELAYS_SECS") {
            Ok(raw) => parse_delays(&raw).context(
                "AUDIT_RETRY_DELAYS_SECS must be a comma-separated list of seconds",
            )?,
            Err(_) => DEFAULT_RETRY_DELAYS_SECS
                .iter()
                .map(|s| Duration::from_secs(*s))
                .collect(),
        };

        let max_attempts: u32 = env::var("AUDIT_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);
        anyhow::ensure!(max_attempts > 0, "AUDIT_MAX_ATTEMPTS must be at least 1");

        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            trust_proxy: env::var("TRUST_PROXY")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            default_role,
            session_ttl_secs: env::var("SESSION_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(28800), // 8 hours
            audit: AuditConfig {
                endpoint: env::var("AUDIT_ENDPOINT").ok().filter(|v| !v.is_empty()),
                signing_secret: env::var("AUDIT_SIGNING_SECRET")
                    .ok()
                    .filter(|v| !v.is_empty()),
                timeout: Duration::from_secs(
                    env::var("AUDIT_TIMEOUT_SECS")
                        .ok()
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(10),
                ),
                max_attempts,
                retry_delays,
            },
        })
    }

    /// Check if a real audit endpoint is configured.
    #[must_use]
    pub const fn has_audit_endpoint(&self) -> bool {
        self.audit.endpoint.is_some()
    }

    /// Create a default configuration for testing.
    ///
    /// Audit retries are immediate so delivery tests stay fast.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".into(),
            trust_proxy: false,
            default_role: Role::DEFAULT,
            session_ttl_secs: 3600,
            audit: AuditConfig {
                endpoint: None,
                signing_secret: None,
                timeout: Duration::from_secs(1),
                max_attempts: 3,
                retry_delays: vec![Duration::ZERO],
            },
        }
    }
}

fn parse_delays(raw: &str) -> Result<Vec<Duration>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u64>()
                .map(Duration::from_secs)
                .with_context(|| format!("invalid delay {s:?}"))
        })
        .collect()
}
