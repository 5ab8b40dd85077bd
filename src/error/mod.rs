use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::dispatch::DispatchError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<DispatchError> for AppError {
    fn from(err: DispatchError) -> Self {
        match err {
            e @ DispatchError::Validation { .. } => AppError::Validation(e.to_string()),
            e @ DispatchError::TemplateNotFound(_) => AppError::NotFound(e.to_string()),
            e @ DispatchError::Render(_) => AppError::Render(e.to_string()),
            DispatchError::Storage(e) => AppError::Storage(e.to_string()),
        }
    }
}

/// Wire format for error responses: `{"error": "<message>"}`.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, client_message, log_message) = match &self {
            AppError::Config(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                "Configuration error".to_string(),
                e.to_string(),
            ),
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                msg.clone(),
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                msg.clone(),
                msg.clone(),
            ),
            AppError::Render(msg) => (
                StatusCode::BAD_REQUEST,
                "RENDER_ERROR",
                msg.clone(),
                msg.clone(),
            ),
            // Server fault: log the detail, keep the body generic. Never
            // downgraded to a client-error status.
            AppError::Storage(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR",
                "Audit storage failure".to_string(),
                msg.clone(),
            ),
        };

        // Always log the detailed error server-side
        tracing::error!(
            code = %code,
            status = %status.as_u16(),
            message = %log_message,
            "API error"
        );

        let body = ErrorResponse {
            error: client_message,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditBackendError;
    use crate::template::TemplateError;

    #[test]
    fn test_dispatch_error_mapping() {
        let validation: AppError = DispatchError::Validation {
            field: "recipient_id",
            reason: "must be a non-empty string",
        }
        .into();
        assert!(matches!(validation, AppError::Validation(_)));

        let not_found: AppError = DispatchError::TemplateNotFound("welcome".into()).into();
        assert!(matches!(not_found, AppError::NotFound(_)));

        let render: AppError = DispatchError::Render(TemplateError::MissingVariable {
            template: "welcome".into(),
            variable: "product".into(),
        })
        .into();
        assert!(matches!(render, AppError::Render(_)));

        let storage: AppError =
            DispatchError::Storage(AuditBackendError::Unavailable("down".into())).into();
        assert!(matches!(storage, AppError::Storage(_)));
    }

    #[test]
    fn test_validation_message_names_field() {
        let err: AppError = DispatchError::Validation {
            field: "variable_data",
            reason: "must be an object",
        }
        .into();
        assert!(err.to_string().contains("variable_data"));
    }
}
