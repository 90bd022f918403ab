//! Dictionary reads and turning values into text.
//!
//! Two renderings exist. Output rendering (`stringify`) is what templates,
//! tag children and `print` produce: strings are raw, `null` is empty and
//! arrays concatenate. Inspection (`inspect`) is the literal-like form the
//! CLI shows for a program's value.

use std::rc::Rc;

use crate::errors::EvalError;
use crate::typed::{self, TypedKind};
use crate::{Dict, Entry, Interpreter, Object};

impl Interpreter {
    /// Read `key` from `dict`. Lazy entries are evaluated afresh, in a
    /// scope under the dictionary's own with `this` bound to `dict`, and
    /// count toward the call depth like a function call.
    pub fn dict_get(&self, dict: &Rc<Dict>, key: &str) -> Result<Option<Object>, EvalError> {
        match dict.entry(key) {
            None => Ok(None),
            Some(Entry::Value(value)) => Ok(Some(value)),
            Some(Entry::Lazy(expr)) => self.nested(|| {
                let scope = self.scopes.child_of(dict.env());
                scope.set("this", Object::Dict(Rc::clone(dict)));
                self.eval_expr(&expr, &scope)
                    .map(|value| Some(value.unwrap_return()))
            }),
        }
    }

    /// Every value of `dict`, evaluated, in key order.
    pub fn dict_values(&self, dict: &Rc<Dict>) -> Result<Vec<Object>, EvalError> {
        dict.keys()
            .iter()
            .map(|key| Ok(self.dict_get(dict, key)?.unwrap_or(Object::Null)))
            .collect()
    }

    /// Output rendering of `value`.
    pub fn stringify(&self, value: &Object) -> Result<String, EvalError> {
        let mut out = String::new();
        self.write_output(&mut out, value)?;
        Ok(out)
    }

    fn write_output(&self, out: &mut String, value: &Object) -> Result<(), EvalError> {
        match value {
            Object::String(s) => out.push_str(s),
            Object::Null => {}
            Object::Array(items) => {
                for item in items {
                    self.write_output(out, item)?;
                }
            }
            Object::Dict(dict) => match typed::canonical_text(dict) {
                Some(text) => out.push_str(&text),
                None => self.write_inspect(out, value, &mut Vec::new())?,
            },
            Object::ReturnValue(inner) => self.write_output(out, inner)?,
            other => self.write_inspect(out, other, &mut Vec::new())?,
        }
        Ok(())
    }

    /// Literal-like rendering of `value`.
    pub fn inspect(&self, value: &Object) -> Result<String, EvalError> {
        let mut out = String::new();
        self.write_inspect(&mut out, value, &mut Vec::new())?;
        Ok(out)
    }

    /// `seen` holds the dictionaries being rendered, so a dictionary that
    /// contains itself renders the inner occurrence as `{...}`.
    fn write_inspect(
        &self,
        out: &mut String,
        value: &Object,
        seen: &mut Vec<*const Dict>,
    ) -> Result<(), EvalError> {
        match value {
            Object::Integer(n) => out.push_str(&n.to_string()),
            Object::Float(x) => out.push_str(&format_float(*x)),
            Object::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
            Object::String(s) => write_quoted(out, s),
            Object::Null => out.push_str("null"),
            Object::ReturnValue(inner) => self.write_inspect(out, inner, seen)?,
            Object::Function(function) => out.push_str(&function.literal_text()),
            Object::Builtin(builtin) => {
                out.push_str("builtin ");
                out.push_str(builtin.name);
            }
            Object::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_inspect(out, item, seen)?;
                }
                out.push(']');
            }
            Object::Dict(dict) => {
                if let (Some(kind), Some(text)) = (dict.typed_kind(), typed::canonical_text(dict)) {
                    if kind != TypedKind::Regex {
                        out.push('@');
                    }
                    out.push_str(&text);
                    return Ok(());
                }
                let ptr = Rc::as_ptr(dict);
                if seen.contains(&ptr) {
                    out.push_str("{...}");
                    return Ok(());
                }
                seen.push(ptr);
                out.push('{');
                for (i, key) in dict.keys().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(key);
                    out.push_str(": ");
                    let entry = self.dict_get(dict, key)?.unwrap_or(Object::Null);
                    self.write_inspect(out, &entry, seen)?;
                }
                out.push('}');
                seen.pop();
            }
        }
        Ok(())
    }
}

/// Floats always show a fractional part so they read back as floats.
pub(crate) fn format_float(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 {
        format!("{x:.1}")
    } else {
        x.to_string()
    }
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
}
