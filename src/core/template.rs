/// Text templates — parsing and rendering of `{placeholder}` strings.

use std::iter::Peekable;
use std::str::Chars;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template parse error: {0}")]
    Parse(String),
    #[error("unbound template variable: {0}")]
    UnboundVariable(String),
}

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TemplateSegment {
    /// Literal text, emitted as-is.
    Literal(String),
    /// Placeholder filled from the render bindings: `{name}`.
    Var(String),
}

/// A parsed template — a sequence of segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub segments: Vec<TemplateSegment>,
}

/// Values bound to template variables for a single render.
pub type Bindings<'a> = FxHashMap<&'a str, String>;

impl Template {
    /// Parse a template string into a sequence of segments.
    ///
    /// Syntax:
    /// - `{name}` → `Var`
    /// - `{{` / `}}` → literal `{` / `}`
    /// - Everything else → `Literal`
    pub fn parse(input: &str) -> Result<Template, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' | '}' if chars.peek() == Some(&c) => {
                    chars.next();
                    literal.push(c);
                }
                '}' => return Err(parse_error("unmatched closing brace")),
                '{' => {
                    let name = read_placeholder(&mut chars)?;
                    if !literal.is_empty() {
                        segments.push(TemplateSegment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(TemplateSegment::Var(name));
                }
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(TemplateSegment::Literal(literal));
        }

        Ok(Template { segments })
    }

    /// Parse `input` and reject any variable not listed in `allowed`.
    pub fn parse_checked(input: &str, allowed: &[&str]) -> Result<Template, TemplateError> {
        let template = Self::parse(input)?;
        template.check_variables(allowed)?;
        Ok(template)
    }

    /// Names of all variables referenced by this template, in order of appearance.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|seg| match seg {
            TemplateSegment::Var(name) => Some(name.as_str()),
            TemplateSegment::Literal(_) => None,
        })
    }

    /// Fail if the template references a variable outside `allowed`.
    pub fn check_variables(&self, allowed: &[&str]) -> Result<(), TemplateError> {
        match self.variables().find(|v| !allowed.contains(v)) {
            Some(unknown) => Err(TemplateError::UnboundVariable(unknown.to_string())),
            None => Ok(()),
        }
    }

    /// Render the template, substituting every `Var` from `bindings`.
    pub fn render(&self, bindings: &Bindings<'_>) -> Result<String, TemplateError> {
        let mut out = String::new();
        for seg in &self.segments {
            match seg {
                TemplateSegment::Literal(text) => out.push_str(text),
                TemplateSegment::Var(name) => {
                    let value = bindings
                        .get(name.as_str())
                        .ok_or_else(|| TemplateError::UnboundVariable(name.clone()))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }

    /// Render without failing: unbound variables are written back as `{name}`.
    ///
    /// Generators validate their templates up front with
    /// [`Template::check_variables`], so this only differs from
    /// [`Template::render`] for unchecked templates.
    pub fn render_lenient(&self, bindings: &Bindings<'_>) -> String {
        let mut out = String::new();
        for seg in &self.segments {
            match seg {
                TemplateSegment::Literal(text) => out.push_str(text),
                TemplateSegment::Var(name) => match bindings.get(name.as_str()) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                },
            }
        }
        out
    }
}

fn parse_error(message: &str) -> TemplateError {
    TemplateError::Parse(message.to_string())
}

/// Consume a placeholder body up to its closing brace; the opening brace is
/// already consumed. Surrounding whitespace is trimmed from the name.
fn read_placeholder(chars: &mut Peekable<Chars<'_>>) -> Result<String, TemplateError> {
    let mut name = String::new();
    loop {
        match chars.next() {
            Some('}') => break,
            Some('{') => return Err(parse_error("nested braces are not allowed")),
            Some(c) => name.push(c),
            None => return Err(parse_error("unclosed brace")),
        }
    }
    let name = name.trim();
    if name.is_empty() {
        return Err(parse_error("empty braces"));
    }
    Ok(name.to_string())
}
