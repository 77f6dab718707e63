//! Audit Types

use chrono::{DateTime, SecondsFormat, Utc};
use hl_common::SessionActor;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;

use super::origin::RequestOrigin;

/// A privileged action taken by an admin.
///
/// Serialized as
/// `{id, action, actor: {id, role}, target?, ip, device, timestamp}` with an
/// RFC 3339 UTC timestamp. The `id` doubles as the idempotency key, so the
/// audit service can drop redelivered copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: Uuid,
    pub action: String,
    pub actor: SessionActor,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub target: Option<String>,
    pub ip: String,
    pub device: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl AuditRecord {
    /// Stamp a new record for `action` taken by `actor` now.
    #[must_use]
    pub fn new(action: impl Into<String>, actor: SessionActor, origin: &RequestOrigin) -> Self {
        Self {
            id: Uuid::now_v7(),
            action: action.into(),
            actor,
            target: None,
            ip: origin.ip.clone(),
            device: origin.device.clone(),
            timestamp: Utc::now(),
        }
    }

    /// Attach the identifier of the thing acted on.
    #[must_use]
    pub fn with_target(mut self, target: impl ToString) -> Self {
        self.target = Some(target.to_string());
        self
    }
}

/// Successful delivery of one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeliveryReceipt {
    pub record_id: Uuid,
    /// Attempts it took, including the successful one.
    pub attempts: u32,
}

/// Audit delivery errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditError {
    /// Network or server-side failure worth retrying.
    #[error("Audit transport failed: {0}")]
    Transport(String),

    /// The attempt timed out.
    #[error("Audit delivery timed out")]
    Timeout,

    /// The audit service refused the record; retrying will not help.
    #[error("Audit service rejected record with HTTP {status}")]
    Rejected { status: u16 },

    /// Record could not be encoded.
    #[error("Failed to encode audit record: {0}")]
    Encode(String),

    /// Transport could not be built from configuration.
    #[error("Invalid audit configuration: {0}")]
    Config(String),

    /// Every attempt failed.
    #[error("Audit delivery gave up after {attempts} attempts: {last_error}")]
    Exhausted { attempts: u32, last_error: String },

    /// The delivery task died before reporting.
    #[error("Audit delivery task failed: {0}")]
    Task(String),
}

impl AuditError {
    /// Whether another attempt could succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout)
    }
}

impl From<serde_json::Error> for AuditError {
    fn from(e: serde_json::Error) -> Self {
        Self::Encode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use hl_common::Role;

    use super::*;

    fn origin() -> RequestOrigin {
        RequestOrigin {
            ip: "203.0.113.7".into(),
            device: "Chrome on Mac OSX".into(),
        }
    }

    #[test]
    fn test_record_wire_shape() {
        let actor = SessionActor::new(Uuid::now_v7(), Role::Moderator);
        let record = AuditRecord::new("users.ban", actor, &origin()).with_target("u-42");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["action"], "users.ban");
        assert_eq!(json["actor"]["id"], actor.id.to_string());
        assert_eq!(json["actor"]["role"], "MODERATOR");
        assert_eq!(json["target"], "u-42");
        assert_eq!(json["ip"], "203.0.113.7");
        assert_eq!(json["device"], "Chrome on Mac OSX");

        let ts = json["timestamp"].as_str().unwrap();
        assert!(ts.ends_with('Z'), "timestamp {ts} should be UTC");
        assert!(DateTime::parse_from_rfc3339(ts).is_ok());
    }

    #[test]
    fn test_target_omitted_when_absent() {
        let actor = SessionActor::new(Uuid::now_v7(), Role::Owner);
        let json =
            serde_json::to_value(AuditRecord::new("settings.update", actor, &origin())).unwrap();
        assert!(json.get("target").is_none());
    }

    #[test]
    fn test_retryable_classification() {
        assert!(AuditError::Transport("reset".into()).is_retryable());
        assert!(AuditError::Timeout.is_retryable());
        assert!(!AuditError::Rejected { status: 400 }.is_retryable());
        assert!(!AuditError::Encode("bad".into()).is_retryable());
    }
}
