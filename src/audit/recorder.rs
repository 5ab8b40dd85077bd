//! Audit recorder: durable append, then best-effort sink notification.

use std::sync::Arc;

use crate::sink::MessageSink;

use super::backend::{AuditBackend, AuditBackendError, AuditEntry, AuditRecord};

/// Writes dispatch attempts to the audit log and notifies the sink.
///
/// The sink is notified strictly after the record is durable. A sink
/// failure is logged and does not roll back or invalidate the record;
/// the written record is authoritative regardless of downstream delivery.
#[derive(Clone)]
pub struct AuditRecorder {
    backend: Arc<dyn AuditBackend>,
    sink: Arc<dyn MessageSink>,
}

impl AuditRecorder {
    pub fn new(backend: Arc<dyn AuditBackend>, sink: Arc<dyn MessageSink>) -> Self {
        Self { backend, sink }
    }

    /// Append one record and hand it to the sink.
    pub async fn record(&self, entry: AuditEntry) -> Result<AuditRecord, AuditBackendError> {
        let record = self.backend.append(entry).await?;

        tracing::debug!(
            log_id = record.id,
            recipient_id = %record.recipient_id,
            channel = %record.channel,
            "Audit record written"
        );

        if let Err(e) = self.sink.deliver(&record).await {
            tracing::warn!(
                log_id = record.id,
                error = %e,
                "Sink delivery failed; audit record stands"
            );
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::audit::{AuditStatus, MemoryAuditBackend};
    use crate::preference::Channel;
    use crate::sink::SinkError;

    struct CollectingSink {
        delivered: Mutex<Vec<AuditRecord>>,
    }

    #[async_trait]
    impl MessageSink for CollectingSink {
        async fn deliver(&self, record: &AuditRecord) -> Result<(), SinkError> {
            self.delivered.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    struct FailingSink;

    #[async_trait]
    impl MessageSink for FailingSink {
        async fn deliver(&self, _record: &AuditRecord) -> Result<(), SinkError> {
            Err(SinkError::Unavailable("gateway down".into()))
        }
    }

    fn entry() -> AuditEntry {
        AuditEntry {
            recipient_id: "user_1".into(),
            template_name: "welcome".into(),
            channel: Channel::Email,
            message: "Hi Ann, welcome to Acme!".into(),
            status: AuditStatus::Queued,
        }
    }

    #[tokio::test]
    async fn test_record_notifies_sink_with_full_payload() {
        let backend = Arc::new(MemoryAuditBackend::new());
        let sink = Arc::new(CollectingSink {
            delivered: Mutex::new(Vec::new()),
        });
        let recorder = AuditRecorder::new(backend, sink.clone());

        let record = recorder.record(entry()).await.unwrap();

        let delivered = sink.delivered.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].id, record.id);
        assert_eq!(delivered[0].message, "Hi Ann, welcome to Acme!");
    }

    #[tokio::test]
    async fn test_sink_failure_does_not_fail_record() {
        let backend = Arc::new(MemoryAuditBackend::new());
        let recorder = AuditRecorder::new(backend.clone(), Arc::new(FailingSink));

        let record = recorder.record(entry()).await.unwrap();

        // The record is durable even though the sink failed
        assert!(backend.get(record.id).await.unwrap().is_some());
    }
}
