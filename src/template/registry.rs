//! Immutable template registry and rendering.

use std::collections::HashMap;

use super::parser::parse;
use super::types::{TemplateError, TemplateResult, Token};

/// A template whose body has been tokenized at load time.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    name: String,
    tokens: Vec<Token>,
}

impl CompiledTemplate {
    /// Compile a template body, rejecting anything beyond plain
    /// `{{ name }}` placeholders.
    pub fn compile(name: &str, body: &str) -> TemplateResult<Self> {
        Ok(Self {
            name: name.to_string(),
            tokens: parse(name, body)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template against the supplied bindings.
    ///
    /// Every placeholder must be bound or rendering fails naming the
    /// missing variable; a blank is never substituted silently. Bindings
    /// that no placeholder references are ignored.
    pub fn render(
        &self,
        bindings: &serde_json::Map<String, serde_json::Value>,
    ) -> TemplateResult<String> {
        let mut output = String::new();

        for token in &self.tokens {
            match token {
                Token::Literal(text) => output.push_str(text),
                Token::Variable(variable) => {
                    let value = bindings.get(variable).ok_or_else(|| {
                        TemplateError::MissingVariable {
                            template: self.name.clone(),
                            variable: variable.clone(),
                        }
                    })?;
                    output.push_str(&coerce_to_string(value));
                }
            }
        }

        Ok(output)
    }
}

fn coerce_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => "".to_string(),
        // For arrays and objects, use JSON representation
        _ => value.to_string(),
    }
}

/// Process-wide mapping from template name to compiled template.
///
/// Populated once at startup from settings; lookups are exact and
/// case-sensitive. The registry is never mutated at runtime.
pub struct TemplateRegistry {
    templates: HashMap<String, CompiledTemplate>,
}

impl TemplateRegistry {
    /// Build a registry from name -> body definitions.
    ///
    /// A body that fails to parse aborts registry construction; a bad
    /// template is a deployment fault, not something to detect per request.
    pub fn from_definitions(definitions: &HashMap<String, String>) -> TemplateResult<Self> {
        let mut templates = HashMap::with_capacity(definitions.len());

        for (name, body) in definitions {
            templates.insert(name.clone(), CompiledTemplate::compile(name, body)?);
        }

        Ok(Self { templates })
    }

    /// Look up a template by name.
    pub fn lookup(&self, name: &str) -> TemplateResult<&CompiledTemplate> {
        self.templates
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))
    }

    /// Resolve and render in one step.
    pub fn render(
        &self,
        name: &str,
        bindings: &serde_json::Map<String, serde_json::Value>,
    ) -> TemplateResult<String> {
        self.lookup(name)?.render(bindings)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
