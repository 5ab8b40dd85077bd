//! Message template system.
//!
//! This module provides:
//! - An interpolation-only template language (`{{ name }}` placeholders)
//!   parsed once at load time
//! - An immutable registry populated at startup from settings
//! - Strict-undefined rendering: an unbound placeholder is an error, never
//!   a silent blank

mod parser;
mod registry;
mod types;

pub use registry::{CompiledTemplate, TemplateRegistry};
pub use types::{TemplateError, TemplateResult, Token};
