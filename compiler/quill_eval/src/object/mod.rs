//! Runtime values.

mod dict;

use std::fmt;
use std::rc::Rc;

use quill_ir::FunctionLiteral;

pub use dict::{Dict, Entry};

use crate::builtins::Builtin;
use crate::typed::TypedKind;
use crate::Environment;

/// A value produced by evaluation.
///
/// Arrays and scalars are plain values. Functions and dictionaries are
/// shared handles: copies alias the same closure or dictionary.
#[derive(Clone)]
pub enum Object {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    Null,
    /// Unwinds a function body on `return`; never escapes a call.
    ReturnValue(Box<Object>),
    Function(Rc<Function>),
    Builtin(&'static Builtin),
    Array(Vec<Object>),
    Dict(Rc<Dict>),
}

/// A closure: parameters, body and the scope it was created in.
pub struct Function {
    pub literal: Rc<FunctionLiteral>,
    pub env: Environment,
}

impl Object {
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Object::String(s.into())
    }

    pub fn dict(dict: Dict) -> Self {
        Object::Dict(Rc::new(dict))
    }

    pub fn function(literal: Rc<FunctionLiteral>, env: Environment) -> Self {
        Object::Function(Rc::new(Function { literal, env }))
    }

    /// Name used in error messages and by `type()`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "integer",
            Object::Float(_) => "float",
            Object::Boolean(_) => "boolean",
            Object::String(_) => "string",
            Object::Null => "null",
            Object::ReturnValue(inner) => inner.type_name(),
            Object::Function(_) => "function",
            Object::Builtin(_) => "builtin",
            Object::Array(_) => "array",
            Object::Dict(dict) => dict.typed_kind().map_or("dictionary", TypedKind::name),
        }
    }

    /// `false`, `null`, zero, and empty strings, arrays and dictionaries
    /// are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Object::Boolean(b) => *b,
            Object::Null => false,
            Object::Integer(n) => *n != 0,
            Object::Float(x) => *x != 0.0,
            Object::String(s) => !s.is_empty(),
            Object::Array(items) => !items.is_empty(),
            Object::Dict(dict) => !dict.is_empty(),
            Object::ReturnValue(inner) => inner.is_truthy(),
            Object::Function(_) | Object::Builtin(_) => true,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }

    /// Strip a `ReturnValue` wrapper.
    pub fn unwrap_return(self) -> Object {
        match self {
            Object::ReturnValue(inner) => *inner,
            other => other,
        }
    }

    pub fn as_dict(&self) -> Option<&Rc<Dict>> {
        match self {
            Object::Dict(dict) => Some(dict),
            _ => None,
        }
    }
}

/// Value equality: structural for scalars and arrays, identity for
/// functions and dictionaries. Datetimes and durations compare by value.
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Integer(a), Object::Integer(b)) => a == b,
            (Object::Float(a), Object::Float(b)) => a == b,
            (Object::Integer(a), Object::Float(b)) | (Object::Float(b), Object::Integer(a)) => {
                promote(*a) == *b
            }
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::String(a), Object::String(b)) => a == b,
            (Object::Null, Object::Null) => true,
            (Object::Array(a), Object::Array(b)) => a == b,
            (Object::Dict(a), Object::Dict(b)) => {
                Rc::ptr_eq(a, b) || crate::typed::typed_equal(a, b).unwrap_or(false)
            }
            (Object::Function(a), Object::Function(b)) => Rc::ptr_eq(a, b),
            (Object::Builtin(a), Object::Builtin(b)) => a.name == b.name,
            (Object::ReturnValue(a), Object::ReturnValue(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(n) => write!(f, "Integer({n})"),
            Object::Float(x) => write!(f, "Float({x:?})"),
            Object::Boolean(b) => write!(f, "Boolean({b})"),
            Object::String(s) => write!(f, "String({s:?})"),
            Object::Null => f.write_str("Null"),
            Object::ReturnValue(inner) => write!(f, "ReturnValue({inner:?})"),
            Object::Function(func) => write!(f, "Function({})", func.literal_text()),
            Object::Builtin(builtin) => write!(f, "Builtin({})", builtin.name),
            Object::Array(items) => f.debug_list().entries(items).finish(),
            Object::Dict(dict) => write!(f, "{dict:?}"),
        }
    }
}

impl Function {
    /// Source rendering of the literal.
    pub fn literal_text(&self) -> String {
        quill_ir::Expr::new(
            quill_ir::ExprKind::Function(Rc::clone(&self.literal)),
            quill_ir::Position::START,
        )
        .to_string()
    }
}

/// Integer to float for mixed arithmetic.
#[inline]
#[expect(
    clippy::cast_precision_loss,
    reason = "mixed int/float arithmetic promotes to float"
)]
pub(crate) fn promote(n: i64) -> f64 {
    n as f64
}

impl From<i64> for Object {
    fn from(n: i64) -> Self {
        Object::Integer(n)
    }
}

impl From<f64> for Object {
    fn from(x: f64) -> Self {
        Object::Float(x)
    }
}

impl From<bool> for Object {
    fn from(b: bool) -> Self {
        Object::Boolean(b)
    }
}

impl From<&str> for Object {
    fn from(s: &str) -> Self {
        Object::String(s.to_string())
    }
}

impl From<String> for Object {
    fn from(s: String) -> Self {
        Object::String(s)
    }
}

impl From<Vec<Object>> for Object {
    fn from(items: Vec<Object>) -> Self {
        Object::Array(items)
    }
}

impl<T: Into<Object>> From<Option<T>> for Object {
    fn from(value: Option<T>) -> Self {
        value.map_or(Object::Null, Into::into)
    }
}

#[cfg(test)]
mod tests;
