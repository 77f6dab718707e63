//! Audit Delivery
//!
//! Retries one record against a transport with a fixed backoff schedule.
//! Transient failures are retried until `max_attempts`; a refusal from the
//! audit service ends delivery immediately.

use tracing::{debug, warn};

use super::transport::AuditTransport;
use super::types::{AuditError, AuditRecord, DeliveryReceipt};
use crate::config::AuditConfig;

/// Deliver `record`, retrying transient failures.
#[tracing::instrument(
    skip_all,
    fields(record_id = %record.id, action = %record.action, transport = transport.name())
)]
pub async fn deliver_with_retry(
    transport: &dyn AuditTransport,
    record: &AuditRecord,
    config: &AuditConfig,
) -> Result<DeliveryReceipt, AuditError> {
    let max_attempts = config.max_attempts.max(1);
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        match transport.deliver(record).await {
            Ok(()) => {
                debug!(attempt, "Audit record delivered");
                return Ok(DeliveryReceipt {
                    record_id: record.id,
                    attempts: attempt,
                });
            }
            Err(e) if !e.is_retryable() => {
                warn!(attempt, error = %e, "Audit record refused, not retrying");
                return Err(AuditError::Exhausted {
                    attempts: attempt,
                    last_error: e.to_string(),
                });
            }
            Err(e) if attempt >= max_attempts => {
                return Err(AuditError::Exhausted {
                    attempts: attempt,
                    last_error: e.to_string(),
                });
            }
            Err(e) => {
                let delay = config.delay_after(attempt);
                warn!(
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Audit delivery failed, retrying"
                );
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
