//! Backend trait for the append-only audit log.
//!
//! This module defines the abstraction layer for audit storage, allowing
//! different implementations (memory, PostgreSQL) to be used
//! interchangeably. Backends assign the record id and the timestamp; a
//! returned record is a durability guarantee.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::preference::Channel;

/// Errors that can occur during audit backend operations.
#[derive(Debug, Error)]
pub enum AuditBackendError {
    /// PostgreSQL operation failed
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// Backend is temporarily unavailable
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// Outcome classification stored with each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    Queued,
    Failed,
}

impl AuditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditStatus::Queued => "queued",
            AuditStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dispatch attempt not yet written to the log.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub recipient_id: String,
    pub template_name: String,
    pub channel: Channel,
    pub message: String,
    pub status: AuditStatus,
}

/// One immutable row of the audit log.
#[derive(Debug, Clone, Serialize)]
pub struct AuditRecord {
    /// Store-assigned, strictly increasing across all appends
    pub id: i64,
    pub recipient_id: String,
    pub template_name: String,
    pub channel: Channel,
    pub message: String,
    pub status: AuditStatus,
    /// Assigned at append time, never client-supplied
    pub created_at: DateTime<Utc>,
}

/// Storage abstraction for the audit log.
///
/// Appends are atomic: either the row is durably written and returned
/// with its id, or nothing is written and a fault is raised. Records are
/// never updated or deleted by the core.
#[async_trait]
pub trait AuditBackend: Send + Sync {
    /// Durably append one record and return it with its assigned id and
    /// timestamp.
    async fn append(&self, entry: AuditEntry) -> Result<AuditRecord, AuditBackendError>;

    /// Fetch a record by id.
    async fn get(&self, id: i64) -> Result<Option<AuditRecord>, AuditBackendError>;

    /// Total number of records in the log.
    async fn count(&self) -> Result<u64, AuditBackendError>;
}
