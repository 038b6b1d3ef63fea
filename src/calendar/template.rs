//! Template expansion for calendar entry summaries.
//!
//! Supports `{{variable_name}}` syntax. Unknown variables and unclosed
//! delimiters are render errors; the caller decides how local the failure
//! is. `{{ name }}` with interior whitespace is not a variable reference
//! and passes through literally.

use std::collections::HashMap;

use thiserror::Error;

/// Failure while rendering a summary template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The template references a variable with no binding.
    #[error("unknown template variable: {0}")]
    UnknownVariable(String),
    /// A `{{` opener has no matching `}}`.
    #[error("unclosed template delimiter")]
    UnclosedDelimiter,
}

/// Expand `{{variable_name}}` patterns in a template string.
///
/// Every referenced variable must be present in `vars`. Braces that do not
/// form a well-formed whitespace-free reference (`{{}}`, `{{ name }}`,
/// single braces) are copied through verbatim, except that a `{{` without
/// any closing `}}` is an error.
#[allow(clippy::implicit_hasher)]
pub fn render_template(
    template: &str,
    vars: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let mut result = String::with_capacity(template.len());
    let bytes = template.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    while i < len {
        if i + 1 < len && bytes[i] == b'{' && bytes[i + 1] == b'{' {
            let Some(close) = template[i + 2..].find("}}") else {
                return Err(TemplateError::UnclosedDelimiter);
            };
            let name = &template[i + 2..i + 2 + close];
            if !name.is_empty() && !name.contains(char::is_whitespace) {
                let value = vars
                    .get(name)
                    .ok_or_else(|| TemplateError::UnknownVariable(name.to_string()))?;
                result.push_str(value);
                i += 2 + close + 2;
                continue;
            }
            // Whitespace or nothing between the braces: not a variable
            // reference, emit the opener and rescan after it.
            result.push_str("{{");
            i += 2;
        } else {
            let Some(ch) = template[i..].chars().next() else {
                break;
            };
            result.push(ch);
            i += ch.len_utf8();
        }
    }

    Ok(result)
}
