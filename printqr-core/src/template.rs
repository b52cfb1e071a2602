//! Minimal `{field}` string templating over the settings context.
//!
//! Supports `{path}` substitution and `{{`/`}}` escapes. Unknown fields and
//! unbalanced braces are errors, so bad templates can be rejected before
//! any prompting starts.

use crate::error::{CoreError, CoreResult};
use crate::settings::TemplateContext;

/// Renders a template against the context.
pub fn render(template: &str, context: &TemplateContext) -> CoreResult<String> {
    let mut output = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    output.push('{');
                    continue;
                }
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') => {
                            return Err(CoreError::Template(format!(
                                "unexpected '{{' inside field in '{template}'"
                            )));
                        }
                        Some(c) => field.push(c),
                        None => {
                            return Err(CoreError::Template(format!(
                                "unclosed '{{' in '{template}'"
                            )));
                        }
                    }
                }
                let value = context.get(field.as_str()).ok_or_else(|| {
                    CoreError::Template(format!("unknown field '{field}' in '{template}'"))
                })?;
                output.push_str(value);
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    output.push('}');
                } else {
                    return Err(CoreError::Template(format!(
                        "unmatched '}}' in '{template}'"
                    )));
                }
            }
            c => output.push(c),
        }
    }

    Ok(output)
}

/// Checks a template against the context without keeping the output.
pub fn validate(template: &str, context: &TemplateContext) -> CoreResult<()> {
    render(template, context).map(|_| ())
}
