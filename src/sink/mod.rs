//! Outbound message sinks.
//!
//! A sink receives the full audit record after it has been durably
//! written and hands the rendered message to the delivery transport.
//! Sinks are best-effort: a sink failure never invalidates the audit
//! record already returned to the caller. Real gateway sinks are injected
//! externally; the built-in sink emits the record to the log, which is
//! the mock "send".

use async_trait::async_trait;
use thiserror::Error;

use crate::audit::AuditRecord;

/// Errors that can occur during sink delivery.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Sink unavailable: {0}")]
    Unavailable(String),

    #[error("Sink rejected message: {0}")]
    Rejected(String),
}

/// Downstream transport for rendered messages.
///
/// Implementations targeting real network gateways must bound delivery
/// with an explicit timeout; the built-in log sink is local and
/// synchronous so none is applied here.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn deliver(&self, record: &AuditRecord) -> Result<(), SinkError>;
}

/// Sink that emits the full record payload as a structured log line.
pub struct LogSink;

#[async_trait]
impl MessageSink for LogSink {
    async fn deliver(&self, record: &AuditRecord) -> Result<(), SinkError> {
        tracing::info!(
            target: "herald::sink",
            log_id = record.id,
            recipient_id = %record.recipient_id,
            template_name = %record.template_name,
            channel = %record.channel,
            message = %record.message,
            status = %record.status,
            created_at = %record.created_at.to_rfc3339(),
            "Message emitted"
        );
        Ok(())
    }
}
