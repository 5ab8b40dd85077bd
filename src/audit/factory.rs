//! Audit backend factory

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::DatabaseConfig;

use super::backend::AuditBackend;
use super::memory_backend::MemoryAuditBackend;
use super::postgres_backend::PostgresAuditBackend;

/// Create an audit backend based on configuration.
///
/// - `"postgres"`: Returns a `PostgresAuditBackend` if a pool is provided
/// - `"memory"` (default): Returns a `MemoryAuditBackend`
pub fn create_audit_backend(
    settings: &DatabaseConfig,
    pool: Option<PgPool>,
) -> Arc<dyn AuditBackend> {
    match settings.backend.as_str() {
        "postgres" => {
            if let Some(pool) = pool {
                tracing::info!(backend = "postgres", "Creating PostgreSQL audit backend");
                return Arc::new(PostgresAuditBackend::new(pool));
            }
            tracing::warn!(
                "PostgreSQL backend requested but no pool provided, falling back to memory"
            );
            Arc::new(MemoryAuditBackend::new())
        }
        _ => {
            tracing::info!(backend = "memory", "Creating memory audit backend");
            Arc::new(MemoryAuditBackend::new())
        }
    }
}
