//! In-memory audit backend.
//!
//! Records live in a mutex-guarded vector and are lost on restart, so
//! this backend does not satisfy the durability contract for production
//! use. It exists for local development and as the substrate for the
//! test suite. The mutex serializes appends, which is what keeps ids
//! strictly increasing under concurrent dispatch.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::backend::{AuditBackend, AuditBackendError, AuditEntry, AuditRecord};

/// In-memory audit backend.
#[derive(Default)]
pub struct MemoryAuditBackend {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditBackend for MemoryAuditBackend {
    async fn append(&self, entry: AuditEntry) -> Result<AuditRecord, AuditBackendError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| AuditBackendError::Unavailable("audit log lock poisoned".into()))?;

        let record = AuditRecord {
            id: records.len() as i64 + 1,
            recipient_id: entry.recipient_id,
            template_name: entry.template_name,
            channel: entry.channel,
            message: entry.message,
            status: entry.status,
            created_at: Utc::now(),
        };

        records.push(record.clone());
        Ok(record)
    }

    async fn get(&self, id: i64) -> Result<Option<AuditRecord>, AuditBackendError> {
        let records = self
            .records
            .lock()
            .map_err(|_| AuditBackendError::Unavailable("audit log lock poisoned".into()))?;

        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn count(&self) -> Result<u64, AuditBackendError> {
        let records = self
            .records
            .lock()
            .map_err(|_| AuditBackendError::Unavailable("audit log lock poisoned".into()))?;

        Ok(records.len() as u64)
    }
}
