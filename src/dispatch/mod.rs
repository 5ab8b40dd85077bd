//! Dispatch orchestrator.
//!
//! Composition root for one notification dispatch: validate the request
//! shape, resolve the recipient's channel, render the template, write the
//! audit record, notify the sink, and return the audit id. Terminal on
//! first failure; no retries. A failed validation or render writes no
//! audit record.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::audit::{AuditBackendError, AuditEntry, AuditRecorder, AuditStatus};
use crate::preference::PreferenceResolver;
use crate::template::{TemplateError, TemplateRegistry};

/// Errors a dispatch can surface. Validation, not-found, and render are
/// client faults; storage is a server fault and is never downgraded.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{field} {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },

    #[error("Unknown template_name '{0}'")]
    TemplateNotFound(String),

    #[error("Template render failed: {0}")]
    Render(#[source] TemplateError),

    #[error("Audit write failed: {0}")]
    Storage(#[from] AuditBackendError),
}

/// Raw request fields, taken from the inbound JSON body before any type
/// checking. Keeping them untyped here lets validation name the offending
/// field instead of surfacing a deserializer message.
#[derive(Debug)]
pub struct DispatchRequest {
    pub recipient_id: serde_json::Value,
    pub template_name: serde_json::Value,
    pub variable_data: serde_json::Value,
}

impl DispatchRequest {
    /// Pull the three dispatch fields out of a JSON payload. Missing
    /// fields become `Null` and fail validation later with their name.
    pub fn from_payload(mut payload: serde_json::Value) -> Self {
        let mut take = |field: &str| {
            payload
                .get_mut(field)
                .map(serde_json::Value::take)
                .unwrap_or(serde_json::Value::Null)
        };

        Self {
            recipient_id: take("recipient_id"),
            template_name: take("template_name"),
            variable_data: take("variable_data"),
        }
    }

    fn validate(
        self,
    ) -> Result<(String, String, serde_json::Map<String, serde_json::Value>), DispatchError> {
        let recipient_id = require_non_empty_string(self.recipient_id, "recipient_id")?;
        let template_name = require_non_empty_string(self.template_name, "template_name")?;

        let bindings = match self.variable_data {
            serde_json::Value::Object(map) => map,
            _ => {
                return Err(DispatchError::Validation {
                    field: "variable_data",
                    reason: "must be an object",
                })
            }
        };

        Ok((recipient_id, template_name, bindings))
    }
}

fn require_non_empty_string(
    value: serde_json::Value,
    field: &'static str,
) -> Result<String, DispatchError> {
    match value {
        serde_json::Value::String(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(DispatchError::Validation {
            field,
            reason: "must be a non-empty string",
        }),
    }
}

/// Successful dispatch result.
#[derive(Debug, Serialize)]
pub struct DispatchOutcome {
    pub status: AuditStatus,
    pub log_id: i64,
}

/// Runs the dispatch pipeline. One instance is built at startup and
/// shared across requests; all collaborators are injected explicitly.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<TemplateRegistry>,
    resolver: PreferenceResolver,
    recorder: AuditRecorder,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<TemplateRegistry>,
        resolver: PreferenceResolver,
        recorder: AuditRecorder,
    ) -> Self {
        Self {
            registry,
            resolver,
            recorder,
        }
    }

    /// Dispatch one notification.
    pub async fn dispatch(
        &self,
        request: DispatchRequest,
    ) -> Result<DispatchOutcome, DispatchError> {
        let (recipient_id, template_name, bindings) = request.validate()?;

        let channel = self.resolver.resolve(&recipient_id).await;

        let message = self
            .registry
            .render(&template_name, &bindings)
            .map_err(|e| match e {
                TemplateError::NotFound(name) => DispatchError::TemplateNotFound(name),
                other => DispatchError::Render(other),
            })?;

        let record = self
            .recorder
            .record(AuditEntry {
                recipient_id,
                template_name,
                channel,
                message,
                status: AuditStatus::Queued,
            })
            .await?;

        tracing::info!(
            log_id = record.id,
            recipient_id = %record.recipient_id,
            template_name = %record.template_name,
            channel = %record.channel,
            "Notification dispatched"
        );

        Ok(DispatchOutcome {
            status: record.status,
            log_id: record.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use super::*;
    use crate::audit::{AuditBackend, MemoryAuditBackend};
    use crate::preference::{Channel, MemoryPreferenceBackend};
    use crate::sink::LogSink;

    struct Harness {
        dispatcher: Dispatcher,
        audit: Arc<MemoryAuditBackend>,
    }

    fn harness() -> Harness {
        let definitions = HashMap::from([
            (
                "welcome".to_string(),
                "Hi {{ name }}, welcome to {{ product }}!".to_string(),
            ),
            (
                "reset_password".to_string(),
                "Hello {{ name }}, reset your password using this code: {{ code }}".to_string(),
            ),
        ]);
        let registry = Arc::new(TemplateRegistry::from_definitions(&definitions).unwrap());

        let preferences = Arc::new(MemoryPreferenceBackend::new());
        preferences.insert("user_1", Channel::Email);
        preferences.insert("user_2", Channel::Sms);

        let audit = Arc::new(MemoryAuditBackend::new());
        let recorder = AuditRecorder::new(audit.clone(), Arc::new(LogSink));

        Harness {
            dispatcher: Dispatcher::new(registry, PreferenceResolver::new(preferences), recorder),
            audit,
        }
    }

    fn request(payload: serde_json::Value) -> DispatchRequest {
        DispatchRequest::from_payload(payload)
    }

    #[tokio::test]
    async fn test_dispatch_known_recipient_email() {
        let h = harness();

        let outcome = h
            .dispatcher
            .dispatch(request(json!({
                "recipient_id": "user_1",
                "template_name": "welcome",
                "variable_data": {"name": "Ann", "product": "Acme"},
            })))
            .await
            .unwrap();

        assert_eq!(outcome.status, AuditStatus::Queued);

        let record = h.audit.get(outcome.log_id).await.unwrap().unwrap();
        assert_eq!(record.channel, Channel::Email);
        assert_eq!(record.message, "Hi Ann, welcome to Acme!");
    }

    #[tokio::test]
    async fn test_dispatch_known_recipient_sms() {
        let h = harness();

        let outcome = h
            .dispatcher
            .dispatch(request(json!({
                "recipient_id": "user_2",
                "template_name": "reset_password",
                "variable_data": {"name": "Bo", "code": "1234"},
            })))
            .await
            .unwrap();

        let record = h.audit.get(outcome.log_id).await.unwrap().unwrap();
        assert_eq!(record.channel, Channel::Sms);
        assert_eq!(
            record.message,
            "Hello Bo, reset your password using this code: 1234"
        );
    }

    #[tokio::test]
    async fn test_missing_variable_writes_no_audit_record() {
        let h = harness();

        let err = h
            .dispatcher
            .dispatch(request(json!({
                "recipient_id": "unknown_user",
                "template_name": "welcome",
                "variable_data": {"name": "X"},
            })))
            .await
            .unwrap_err();

        match err {
            DispatchError::Render(TemplateError::MissingVariable { variable, .. }) => {
                assert_eq!(variable, "product");
            }
            other => panic!("expected Render error, got {other:?}"),
        }
        assert_eq!(h.audit.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_template_writes_no_audit_record() {
        let h = harness();

        let err = h
            .dispatcher
            .dispatch(request(json!({
                "recipient_id": "user_1",
                "template_name": "nonexistent",
                "variable_data": {},
            })))
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::TemplateNotFound(name) if name == "nonexistent"));
        assert_eq!(h.audit.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_variable_data_must_be_object() {
        let h = harness();

        let err = h
            .dispatcher
            .dispatch(request(json!({
                "recipient_id": "user_1",
                "template_name": "welcome",
                "variable_data": ["not", "an", "object"],
            })))
            .await
            .unwrap_err();

        assert!(
            matches!(err, DispatchError::Validation { field, .. } if field == "variable_data")
        );
        assert_eq!(h.audit.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_recipient_id_must_be_non_empty() {
        let h = harness();

        for bad in [json!(""), json!("   "), json!(7), serde_json::Value::Null] {
            let err = h
                .dispatcher
                .dispatch(request(json!({
                    "recipient_id": bad,
                    "template_name": "welcome",
                    "variable_data": {},
                })))
                .await
                .unwrap_err();
            assert!(
                matches!(err, DispatchError::Validation { field, .. } if field == "recipient_id")
            );
        }
    }

    #[tokio::test]
    async fn test_missing_template_name_field() {
        let h = harness();

        let err = h
            .dispatcher
            .dispatch(request(json!({
                "recipient_id": "user_1",
                "variable_data": {},
            })))
            .await
            .unwrap_err();

        assert!(
            matches!(err, DispatchError::Validation { field, .. } if field == "template_name")
        );
    }
}
