//! Audit transports.
//!
//! [`HttpTransport`] posts records to the external audit service.
//! [`LogTransport`] writes them to the tracing output for local development
//! only; nothing written there is durable.

use futures::future::BoxFuture;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use super::signing;
use super::types::{AuditError, AuditRecord};
use crate::config::AuditConfig;

/// Boxed future returned by [`AuditTransport::deliver`].
pub type DeliveryFuture<'a> = BoxFuture<'a, Result<(), AuditError>>;

/// One delivery attempt to an audit sink.
pub trait AuditTransport: Send + Sync + 'static {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Attempt to deliver `record` once.
    fn deliver<'a>(&'a self, record: &'a AuditRecord) -> DeliveryFuture<'a>;
}

/// Posts audit records as JSON to the audit service.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
    signing_secret: Option<String>,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, config: &AuditConfig) -> Result<Self, AuditError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AuditError::Config(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            signing_secret: config.signing_secret.clone(),
        })
    }
}

/// Map an HTTP status to a delivery outcome.
///
/// Timeouts, throttling and server errors are transient; any other
/// non-success status means the service refused the record.
pub(crate) fn classify_status(status: StatusCode) -> Result<(), AuditError> {
    if status.is_success() {
        Ok(())
    } else if status == StatusCode::REQUEST_TIMEOUT
        || status == StatusCode::TOO_MANY_REQUESTS
        || status.is_server_error()
    {
        Err(AuditError::Transport(format!("HTTP {}", status.as_u16())))
    } else {
        Err(AuditError::Rejected {
            status: status.as_u16(),
        })
    }
}

impl AuditTransport for HttpTransport {
    fn name(&self) -> &'static str {
        "http"
    }

    fn deliver<'a>(&'a self, record: &'a AuditRecord) -> DeliveryFuture<'a> {
        Box::pin(async move {
            let body = serde_json::to_vec(record)?;

            let mut request = self
                .client
                .post(&self.endpoint)
                .header(CONTENT_TYPE, "application/json")
                .header("Idempotency-Key", record.id.to_string())
                .header("X-Audit-Action", record.action.as_str());
            if let Some(secret) = &self.signing_secret {
                request =
                    request.header("X-Audit-Signature", signing::signature_header(secret, &body));
            }

            let response = request.body(body).send().await.map_err(|e| {
                if e.is_timeout() {
                    AuditError::Timeout
                } else {
                    AuditError::Transport(e.to_string())
                }
            })?;

            classify_status(response.status())
        })
    }
}

/// Writes audit records to the log. Development only.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTransport;

impl AuditTransport for LogTransport {
    fn name(&self) -> &'static str {
        "log"
    }

    fn deliver<'a>(&'a self, record: &'a AuditRecord) -> DeliveryFuture<'a> {
        Box::pin(async move {
            tracing::info!(
                target: "hl_admin::audit",
                record_id = %record.id,
                action = %record.action,
                actor_id = %record.actor.id,
                role = %record.actor.role,
                target_id = record.target.as_deref().unwrap_or(""),
                ip = %record.ip,
                device = %record.device,
                timestamp = %record.timestamp.to_rfc3339(),
                "Audit record (log transport, not durable)"
            );
            Ok(())
        })
    }
}
