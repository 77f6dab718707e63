//! Audit log front end.
//!
//! Keeps a bounded in-memory journal of recent records for the audit page
//! and spawns one delivery task per submitted record.

use std::collections::VecDeque;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{error, info};
use uuid::Uuid;

use super::delivery::deliver_with_retry;
use super::transport::{AuditTransport, HttpTransport, LogTransport};
use super::types::{AuditError, AuditRecord, DeliveryReceipt};
use crate::config::AuditConfig;

/// Journal capacity; older entries are dropped first.
const JOURNAL_CAPACITY: usize = 500;

/// Delivery state of a journaled record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    Delivered { attempts: u32 },
    DeadLettered { attempts: u32, error: String },
}

/// One journaled record.
#[derive(Debug, Clone, Serialize)]
pub struct JournalEntry {
    pub record: AuditRecord,
    pub status: DeliveryStatus,
}

/// Handle to an in-flight delivery.
#[derive(Debug)]
pub struct AuditTask {
    record_id: Uuid,
    handle: JoinHandle<Result<DeliveryReceipt, AuditError>>,
}

impl AuditTask {
    #[must_use]
    pub const fn record_id(&self) -> Uuid {
        self.record_id
    }

    /// Wait for the delivery outcome.
    pub async fn wait(self) -> Result<DeliveryReceipt, AuditError> {
        self.handle
            .await
            .map_err(|e| AuditError::Task(e.to_string()))?
    }
}

/// Audit sink shared by all handlers.
#[derive(Clone)]
pub struct AuditLog {
    transport: Arc<dyn AuditTransport>,
    config: Arc<AuditConfig>,
    journal: Arc<RwLock<VecDeque<JournalEntry>>>,
}

impl std::fmt::Debug for AuditLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditLog")
            .field("transport", &self.transport.name())
            .field("max_attempts", &self.config.max_attempts)
            .finish_non_exhaustive()
    }
}

impl AuditLog {
    #[must_use]
    pub fn new(transport: Arc<dyn AuditTransport>, config: AuditConfig) -> Self {
        Self {
            transport,
            config: Arc::new(config),
            journal: Arc::new(RwLock::new(VecDeque::with_capacity(JOURNAL_CAPACITY))),
        }
    }

    /// Pick the transport from configuration.
    ///
    /// Without an endpoint, records only reach the log output.
    pub fn from_config(config: &AuditConfig) -> Result<Self, AuditError> {
        let transport: Arc<dyn AuditTransport> = match &config.endpoint {
            Some(endpoint) => {
                info!(endpoint = %endpoint, "Audit records will be posted to the audit service");
                Arc::new(HttpTransport::new(endpoint.clone(), config)?)
            }
            None => {
                tracing::warn!(
                    "AUDIT_ENDPOINT not set; audit records are only logged and are not durable"
                );
                Arc::new(LogTransport)
            }
        };
        Ok(Self::new(transport, config.clone()))
    }

    /// Name of the active transport.
    #[must_use]
    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    /// Journal `record` and start delivering it in the background.
    pub async fn submit(&self, record: AuditRecord) -> AuditTask {
        let record_id = record.id;
        {
            let mut journal = self.journal.write().await;
            if journal.len() == JOURNAL_CAPACITY {
                journal.pop_front();
            }
            journal.push_back(JournalEntry {
                record: record.clone(),
                status: DeliveryStatus::Pending,
            });
        }

        let transport = Arc::clone(&self.transport);
        let config = Arc::clone(&self.config);
        let journal = Arc::clone(&self.journal);

        let handle = tokio::spawn(async move {
            let result = deliver_with_retry(transport.as_ref(), &record, &config).await;
            let status = match &result {
                Ok(receipt) => DeliveryStatus::Delivered {
                    attempts: receipt.attempts,
                },
                Err(e) => {
                    error!(
                        record_id = %record.id,
                        action = %record.action,
                        actor_id = %record.actor.id,
                        error = %e,
                        "Audit record dead-lettered"
                    );
                    let attempts = match e {
                        AuditError::Exhausted { attempts, .. } => *attempts,
                        _ => 0,
                    };
                    DeliveryStatus::DeadLettered {
                        attempts,
                        error: e.to_string(),
                    }
                }
            };
            set_status(&journal, record.id, status).await;
            result
        });

        AuditTask { record_id, handle }
    }

    #[cfg(test)]
    pub(crate) fn journal(&self) -> &RwLock<VecDeque<JournalEntry>> {
        &self.journal
    }

    /// Most recent journal entries, newest first.
    pub async fn recent(&self, limit: usize) -> Vec<JournalEntry> {
        self.journal
            .read()
            .await
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }

    /// Entries that exhausted their delivery attempts.
    pub async fn dead_letters(&self) -> Vec<JournalEntry> {
        self.journal
            .read()
            .await
            .iter()
            .filter(|e| matches!(e.status, DeliveryStatus::DeadLettered { .. }))
            .cloned()
            .collect()
    }
}

async fn set_status(
    journal: &RwLock<VecDeque<JournalEntry>>,
    record_id: Uuid,
    status: DeliveryStatus,
) {
    let mut journal = journal.write().await;
    if let Some(entry) = journal.iter_mut().rev().find(|e| e.record.id == record_id) {
        entry.status = status;
    }
}
