//! Interpolated `${...}` templates with CEL expressions inside the delimiters

use cel_interpreter::Program;
use dmn_eval_core::{BoxError, ElExpression, ElProvider, VariableContext};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::error::{CelError, Result};

/// Piece of a parsed template
enum Segment {
    Literal(String),
    Expression { source: String, program: Program },
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Segment::Expression { source, .. } => f.debug_tuple("Expression").field(source).finish(),
        }
    }
}

/// Parsed template, reusable across evaluations
///
/// A template made of exactly one delimited expression evaluates to that
/// expression's value. Anything else evaluates to the concatenated text.
#[derive(Debug)]
pub struct TemplateExpression {
    segments: Vec<Segment>,
}

impl TemplateExpression {
    /// Parse template text into literal and expression segments
    pub fn parse(text: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut rest = 0;

        while let Some(start) = find_opening(text, rest) {
            if start > rest {
                segments.push(Segment::Literal(text[rest..start].to_string()));
            }

            let body_start = start + 2;
            let body_end = find_closing(text, body_start).ok_or_else(|| CelError::InvalidTemplate {
                offset: start,
                message: "unterminated expression".to_string(),
            })?;

            let source = text[body_start..body_end].trim();
            if source.is_empty() {
                return Err(CelError::InvalidTemplate {
                    offset: start,
                    message: "empty expression".to_string(),
                });
            }

            segments.push(Segment::Expression {
                source: source.to_string(),
                program: super::compile(source)?,
            });
            rest = body_end + 1;
        }

        if rest < text.len() {
            segments.push(Segment::Literal(text[rest..].to_string()));
        }

        Ok(Self { segments })
    }

    /// Source of every expression segment, in order
    pub fn expressions(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Expression { source, .. } => Some(source.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Evaluate against the variables
    pub fn evaluate(&self, context: &VariableContext) -> Result<Value> {
        if let [Segment::Expression { program, .. }] = self.segments.as_slice() {
            return super::execute(program, context.iter());
        }

        let mut rendered = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Expression { program, .. } => {
                    match super::execute(program, context.iter())? {
                        Value::Null => {}
                        Value::String(s) => rendered.push_str(&s),
                        other => rendered.push_str(&other.to_string()),
                    }
                }
            }
        }

        Ok(Value::String(rendered))
    }
}

impl ElExpression for TemplateExpression {
    fn get_value(&self, context: &VariableContext) -> std::result::Result<Value, BoxError> {
        Ok(self.evaluate(context)?)
    }
}

/// Provider parsing `${...}` / `#{...}` templates
#[derive(Debug, Default, Clone, Copy)]
pub struct CelElProvider;

impl CelElProvider {
    pub fn new() -> Self {
        Self
    }
}

impl ElProvider for CelElProvider {
    fn create_expression(&self, text: &str) -> std::result::Result<Arc<dyn ElExpression>, BoxError> {
        Ok(Arc::new(TemplateExpression::parse(text)?))
    }
}

/// Byte offset of the next `${` or `#{` at or after `from`
fn find_opening(text: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    (from..bytes.len().saturating_sub(1))
        .find(|&i| (bytes[i] == b'$' || bytes[i] == b'#') && bytes[i + 1] == b'{')
}

/// Byte offset of the `}` closing a body that starts at `from`
///
/// Nested braces and braces inside quoted strings do not close the body.
fn find_closing(text: &str, from: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (offset, c) in text[from..].char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => quote = Some(c),
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(from + offset);
                }
            }
            _ => {}
        }
    }

    None
}
