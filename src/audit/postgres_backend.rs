//! PostgreSQL-based audit backend.
//!
//! Table structure:
//! - `audit_log` - Append-only log; `id` is a BIGSERIAL primary key, so
//!   the database serializes id assignment across concurrent appends.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::preference::Channel;

use super::backend::{AuditBackend, AuditBackendError, AuditEntry, AuditRecord, AuditStatus};

/// PostgreSQL-based audit backend.
pub struct PostgresAuditBackend {
    pool: PgPool,
}

impl PostgresAuditBackend {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the audit table if it does not exist.
    pub async fn ensure_schema(pool: &PgPool) -> Result<(), AuditBackendError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS audit_log (
                id BIGSERIAL PRIMARY KEY,
                recipient_id TEXT NOT NULL,
                template_name TEXT NOT NULL,
                channel TEXT NOT NULL CHECK (channel IN ('SMS', 'Email')),
                message TEXT NOT NULL,
                status TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl AuditBackend for PostgresAuditBackend {
    async fn append(&self, entry: AuditEntry) -> Result<AuditRecord, AuditBackendError> {
        let row = sqlx::query(
            r#"
            INSERT INTO audit_log (recipient_id, template_name, channel, message, status, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING id, created_at
            "#,
        )
        .bind(&entry.recipient_id)
        .bind(&entry.template_name)
        .bind(entry.channel.as_str())
        .bind(&entry.message)
        .bind(entry.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = row.try_get("id")?;
        let created_at: DateTime<Utc> = row.try_get("created_at")?;

        Ok(AuditRecord {
            id,
            recipient_id: entry.recipient_id,
            template_name: entry.template_name,
            channel: entry.channel,
            message: entry.message,
            status: entry.status,
            created_at,
        })
    }

    async fn get(&self, id: i64) -> Result<Option<AuditRecord>, AuditBackendError> {
        let row = sqlx::query(
            r#"
            SELECT id, recipient_id, template_name, channel, message, status, created_at
            FROM audit_log
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let channel: String = row.try_get("channel")?;
        let channel = Channel::parse(&channel).ok_or_else(|| {
            AuditBackendError::Unavailable(format!("corrupt channel value in audit row {id}"))
        })?;

        let status: String = row.try_get("status")?;
        let status = match status.as_str() {
            "queued" => AuditStatus::Queued,
            "failed" => AuditStatus::Failed,
            other => {
                return Err(AuditBackendError::Unavailable(format!(
                    "corrupt status value '{other}' in audit row {id}"
                )))
            }
        };

        Ok(Some(AuditRecord {
            id: row.try_get("id")?,
            recipient_id: row.try_get("recipient_id")?,
            template_name: row.try_get("template_name")?,
            channel,
            message: row.try_get("message")?,
            status,
            created_at: row.try_get("created_at")?,
        }))
    }

    async fn count(&self) -> Result<u64, AuditBackendError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM audit_log")
            .fetch_one(&self.pool)
            .await?;

        let total: i64 = row.try_get("total")?;
        Ok(total as u64)
    }
}
