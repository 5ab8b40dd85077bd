//! Append-only audit log.
//!
//! Every successfully rendered dispatch produces exactly one immutable
//! record before the sink is invoked. Ids are store-assigned and strictly
//! increasing; timestamps are server-generated. Records are never updated
//! or deleted by the core; retention is an external concern.

mod backend;
mod factory;
mod memory_backend;
mod postgres_backend;
mod recorder;

pub use backend::{AuditBackend, AuditBackendError, AuditEntry, AuditRecord, AuditStatus};
pub use factory::create_audit_backend;
pub use memory_backend::MemoryAuditBackend;
pub use postgres_backend::PostgresAuditBackend;
pub use recorder::AuditRecorder;
