//! Markup tags.
//!
//! Lowercase tags render to markup text. Capitalized tags are component
//! calls: the attributes become a lazy props dictionary, the rendered
//! children go under `contents`, and the named function is applied to it.

use std::rc::Rc;

use indexmap::IndexMap;
use quill_ir::{Expr, ExprKind, Position};

use super::expr::eval_ident;
use super::template::{matching_brace, parse_embedded_expr};
use crate::errors::{template_error, EvalError, EvalResult};
use crate::{Dict, Entry, Environment, Interpreter, Object};

/// An attribute value as written.
#[derive(Clone, Debug, PartialEq)]
enum AttrValue {
    /// `disabled`
    Bare,
    /// `class="a {b}"`, interpolated like a template.
    Quoted(String),
    /// `count={n + 1}`
    Code(String),
}

#[derive(Clone, Debug, PartialEq)]
struct Attribute {
    name: String,
    value: AttrValue,
}

impl Interpreter {
    /// `children` is `None` for a self-closing tag.
    pub(crate) fn eval_tag(
        &self,
        name: &str,
        attrs: &str,
        children: Option<&[Expr]>,
        pos: Position,
        env: &Environment,
    ) -> EvalResult {
        let attributes = parse_attributes(attrs)?;
        if name.starts_with(|c: char| c.is_ascii_uppercase()) {
            return self.call_component(name, attributes, children.unwrap_or_default(), pos, env);
        }

        let mut out = String::new();
        if !name.is_empty() {
            out.push('<');
            out.push_str(name);
            self.write_attributes(&mut out, &attributes, env)?;
            out.push_str(if children.is_some() { ">" } else { " />" });
        }
        for child in children.unwrap_or_default() {
            out.push_str(&self.render_child(child, env)?);
        }
        if children.is_some() && !name.is_empty() {
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        Ok(Object::String(out))
    }

    fn render_child(&self, child: &Expr, env: &Environment) -> Result<String, EvalError> {
        match &child.kind {
            ExprKind::Text(text) => Ok(text.clone()),
            _ => {
                let value = self.eval_expr(child, env)?;
                self.stringify(&value)
            }
        }
    }

    /// `true` renders the bare name, `false` and `null` drop the attribute.
    fn write_attributes(
        &self,
        out: &mut String,
        attributes: &[Attribute],
        env: &Environment,
    ) -> Result<(), EvalError> {
        for attr in attributes {
            let text = match &attr.value {
                AttrValue::Bare => None,
                AttrValue::Quoted(raw) => Some(self.render_template(raw, env)?),
                AttrValue::Code(source) => match self.eval_embedded(source, env)? {
                    Object::Boolean(true) => None,
                    Object::Boolean(false) | Object::Null => continue,
                    value => Some(self.stringify(&value)?),
                },
            };
            out.push(' ');
            out.push_str(&attr.name);
            if let Some(text) = text {
                out.push_str("=\"");
                out.push_str(&text.replace('"', "&quot;"));
                out.push('"');
            }
        }
        Ok(())
    }

    fn call_component(
        &self,
        name: &str,
        attributes: Vec<Attribute>,
        children: &[Expr],
        pos: Position,
        env: &Environment,
    ) -> EvalResult {
        let mut props = IndexMap::new();
        for attr in attributes {
            let entry = match attr.value {
                AttrValue::Bare => Entry::Value(Object::Boolean(true)),
                AttrValue::Quoted(raw) => {
                    Entry::Lazy(Rc::new(Expr::new(ExprKind::Template(raw), pos)))
                }
                AttrValue::Code(source) => Entry::Lazy(Rc::new(parse_embedded_expr(&source)?)),
            };
            props.insert(attr.name, entry);
        }
        let mut contents = children
            .iter()
            .map(|child| self.render_child(child, env).map(Object::String))
            .collect::<Result<Vec<_>, _>>()?;
        match contents.len() {
            0 => {}
            1 => {
                props.insert("contents".to_string(), Entry::Value(contents.remove(0)));
            }
            _ => {
                props.insert("contents".to_string(), Entry::Value(Object::Array(contents)));
            }
        }

        let component = eval_ident(name, env)?;
        tracing::debug!(component = name, "calling component");
        let props = Object::dict(Dict::new(props, env.clone()));
        self.apply_function(&component, vec![props])
    }
}

/// Split raw attribute text into attributes.
fn parse_attributes(raw: &str) -> Result<Vec<Attribute>, EvalError> {
    let mut attributes = Vec::new();
    let mut rest = raw.trim_start();
    while !rest.is_empty() {
        let name_len = rest
            .find(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or(rest.len());
        if name_len == 0 {
            return Err(template_error(format!("malformed attribute in `{raw}`")));
        }
        let name = rest[..name_len].to_string();
        rest = rest[name_len..].trim_start();

        let value = if let Some(after) = rest.strip_prefix('=') {
            let after = after.trim_start();
            let (value, consumed) = match after.chars().next() {
                Some(quote @ ('"' | '\'')) => {
                    let end = closing_quote(after, quote)
                        .ok_or_else(|| template_error(format!("unterminated value for `{name}`")))?;
                    (AttrValue::Quoted(after[1..end].to_string()), end + 1)
                }
                Some('{') => {
                    let end = matching_brace(after)
                        .ok_or_else(|| template_error(format!("unclosed `{{` in `{name}`")))?;
                    (AttrValue::Code(after[1..end].to_string()), end + 1)
                }
                _ => {
                    let end = after.find(char::is_whitespace).unwrap_or(after.len());
                    (AttrValue::Quoted(after[..end].to_string()), end)
                }
            };
            rest = &after[consumed..];
            value
        } else {
            AttrValue::Bare
        };
        attributes.push(Attribute { name, value });
        rest = rest.trim_start();
    }
    Ok(attributes)
}

/// Byte offset of the quote closing the one that starts `s`.
fn closing_quote(s: &str, quote: char) -> Option<usize> {
    let mut chars = s.char_indices().skip(1);
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            chars.next();
        } else if c == quote {
            return Some(i);
        }
    }
    None
}

#[cfg(test)]
mod tests;
