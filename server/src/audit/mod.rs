//! Audit Trail
//!
//! Every gated mutating action produces an [`AuditRecord`] that is shipped to
//! the external audit service with at-least-once delivery:
//! - [`AuditLog::submit`] journals the record and spawns a delivery task.
//! - [`delivery::deliver_with_retry`] retries transient failures with backoff.
//! - Records that exhaust their attempts are dead-lettered in the journal.

pub mod delivery;
pub mod journal;
pub mod origin;
pub mod signing;
pub mod transport;
pub mod types;

pub use delivery::deliver_with_retry;
pub use journal::{AuditLog, AuditTask, DeliveryStatus, JournalEntry};
pub use origin::RequestOrigin;
pub use transport::{AuditTransport, DeliveryFuture, HttpTransport, LogTransport};
pub use types::{AuditError, AuditRecord, DeliveryReceipt};
