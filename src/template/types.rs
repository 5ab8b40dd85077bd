//! Template types and error definitions

use thiserror::Error;

/// Template-specific error type
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template '{template}' is invalid: {reason}")]
    Invalid { template: String, reason: String },

    #[error("Template '{template}' references undefined variable '{variable}'")]
    MissingVariable { template: String, variable: String },
}

/// Result type for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;

/// One segment of a parsed template body.
///
/// Template bodies are tokenized once at load time. Rendering walks the
/// token sequence, so no template syntax is ever re-interpreted against
/// request-supplied input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text, emitted as-is
    Literal(String),
    /// A `{{ name }}` placeholder, filled from request bindings
    Variable(String),
}
