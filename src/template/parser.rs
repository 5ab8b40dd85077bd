//! Template body parser.
//!
//! The template language is interpolation-only: literal text plus
//! `{{ name }}` placeholders. Anything else (control blocks, nested
//! braces, dotted or otherwise non-identifier names) is rejected at load
//! time so that the renderer can never be coaxed into evaluating
//! expressions from untrusted input.

use super::types::{TemplateError, TemplateResult, Token};

/// Parse a template body into an ordered token sequence.
pub fn parse(name: &str, body: &str) -> TemplateResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut rest = body;

    while !rest.is_empty() {
        if let Some(stripped) = rest.strip_prefix("{{") {
            let Some(close) = stripped.find("}}") else {
                return Err(invalid(name, "unclosed '{{' placeholder"));
            };

            let variable = stripped[..close].trim();
            validate_variable_name(name, variable)?;

            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(Token::Variable(variable.to_string()));
            rest = &stripped[close + 2..];
        } else if rest.starts_with("{%") || rest.starts_with("{#") {
            return Err(invalid(
                name,
                "control blocks and comments are not supported; only '{{ name }}' placeholders are allowed",
            ));
        } else {
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                literal.push(c);
            }
            rest = chars.as_str();
        }
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }

    Ok(tokens)
}

fn validate_variable_name(template: &str, variable: &str) -> TemplateResult<()> {
    if variable.is_empty() {
        return Err(invalid(template, "empty placeholder"));
    }

    if !variable
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(invalid(
            template,
            &format!("placeholder '{variable}' must be a plain identifier"),
        ));
    }

    Ok(())
}

fn invalid(template: &str, reason: &str) -> TemplateError {
    TemplateError::Invalid {
        template: template.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal_only() {
        let tokens = parse("plain", "no placeholders here").unwrap();
        assert_eq!(tokens, vec![Token::Literal("no placeholders here".into())]);
    }

    #[test]
    fn test_parse_interleaved() {
        let tokens = parse("welcome", "Hi {{ name }}, welcome to {{ product }}!").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Literal("Hi ".into()),
                Token::Variable("name".into()),
                Token::Literal(", welcome to ".into()),
                Token::Variable("product".into()),
                Token::Literal("!".into()),
            ]
        );
    }

    #[test]
    fn test_parse_placeholder_without_spaces() {
        let tokens = parse("t", "{{code}}").unwrap();
        assert_eq!(tokens, vec![Token::Variable("code".into())]);
    }

    #[test]
    fn test_parse_rejects_control_blocks() {
        let err = parse("t", "{% for x in xs %}{{ x }}{% endfor %}").unwrap_err();
        assert!(matches!(err, TemplateError::Invalid { .. }));
    }

    #[test]
    fn test_parse_rejects_comments() {
        assert!(parse("t", "before {# hidden #} after").is_err());
    }

    #[test]
    fn test_parse_rejects_unclosed_placeholder() {
        let err = parse("t", "Hi {{ name").unwrap_err();
        assert!(err.to_string().contains("unclosed"));
    }

    #[test]
    fn test_parse_rejects_empty_placeholder() {
        assert!(parse("t", "Hi {{ }}").is_err());
    }

    #[test]
    fn test_parse_rejects_expressions() {
        // Dotted access, calls, and filters must all fail identifier validation
        assert!(parse("t", "{{ user.name }}").is_err());
        assert!(parse("t", "{{ name|upper }}").is_err());
        assert!(parse("t", "{{ f() }}").is_err());
    }

    #[test]
    fn test_parse_keeps_lone_braces_literal() {
        let tokens = parse("t", "a } b { c }} d").unwrap();
        assert_eq!(tokens, vec![Token::Literal("a } b { c }} d".into())]);
    }
}
