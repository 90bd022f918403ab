//! Global builtin functions.
//!
//! A process-wide table built on first use. Identifier lookup falls back
//! to it when no scope binds the name, so programs may shadow builtins.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::errors::{invalid_literal, type_mismatch, wrong_arity, EvalError, EvalResult};
use crate::{typed, Interpreter, Object};

/// How many arguments a native callable takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    /// Inclusive bounds.
    Range(usize, usize),
    Variadic,
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::Range(min, max) => (min..=max).contains(&count),
            Arity::Variadic => true,
        }
    }

    pub fn check(self, name: &str, count: usize) -> Result<(), EvalError> {
        if self.accepts(count) {
            return Ok(());
        }
        let expected = match self {
            Arity::Exact(n) => n.to_string(),
            Arity::Range(min, max) => format!("{min} to {max}"),
            Arity::Variadic => "any number of".to_string(),
        };
        Err(wrong_arity(name, expected, count))
    }
}

pub type BuiltinFn = fn(&Interpreter, &[Object]) -> EvalResult;

pub struct Builtin {
    pub name: &'static str,
    pub arity: Arity,
    func: BuiltinFn,
}

impl Builtin {
    /// Arity-check `args` and run.
    pub fn call(&self, interp: &Interpreter, args: &[Object]) -> EvalResult {
        self.arity.check(self.name, args.len())?;
        (self.func)(interp, args)
    }
}

static REGISTRY: LazyLock<FxHashMap<&'static str, Builtin>> = LazyLock::new(|| {
    let table: [(&'static str, Arity, BuiltinFn); 14] = [
        ("len", Arity::Exact(1), len),
        ("map", Arity::Exact(2), map),
        ("keys", Arity::Exact(1), keys),
        ("values", Arity::Exact(1), values),
        ("type", Arity::Exact(1), type_of),
        ("str", Arity::Exact(1), to_str),
        ("int", Arity::Exact(1), to_int),
        ("float", Arity::Exact(1), to_float),
        ("print", Arity::Variadic, print),
        ("join", Arity::Range(1, 2), join),
        ("range", Arity::Range(1, 2), range),
        ("now", Arity::Exact(0), now),
        ("regex", Arity::Range(1, 2), regex),
        ("datetime", Arity::Exact(1), datetime),
    ];
    table
        .into_iter()
        .map(|(name, arity, func)| (name, Builtin { name, arity, func }))
        .collect()
});

pub fn lookup(name: &str) -> Option<&'static Builtin> {
    REGISTRY.get(name)
}

fn expect_str<'a>(name: &str, value: &'a Object) -> Result<&'a str, EvalError> {
    match value {
        Object::String(s) => Ok(s),
        other => Err(type_mismatch(format!(
            "`{name}` expects a string, got {}",
            other.type_name()
        ))),
    }
}

fn expect_int(name: &str, value: &Object) -> Result<i64, EvalError> {
    match value {
        Object::Integer(n) => Ok(*n),
        other => Err(type_mismatch(format!(
            "`{name}` expects an integer, got {}",
            other.type_name()
        ))),
    }
}

/// Length in characters, elements or entries.
pub(crate) fn length_of(value: &Object) -> Result<i64, EvalError> {
    let len = match value {
        Object::String(s) => s.chars().count(),
        Object::Array(items) => items.len(),
        Object::Dict(dict) => dict.len(),
        other => {
            return Err(type_mismatch(format!(
                "cannot take the length of {}",
                other.type_name()
            )))
        }
    };
    i64::try_from(len).map_err(|_| crate::errors::overflow())
}

fn len(_: &Interpreter, args: &[Object]) -> EvalResult {
    length_of(&args[0]).map(Object::Integer)
}

fn map(interp: &Interpreter, args: &[Object]) -> EvalResult {
    interp.map_iterable(&args[0], &args[1])
}

fn expect_dict<'a>(
    name: &str,
    value: &'a Object,
) -> Result<&'a std::rc::Rc<crate::Dict>, EvalError> {
    value.as_dict().ok_or_else(|| {
        type_mismatch(format!(
            "`{name}` expects a dictionary, got {}",
            value.type_name()
        ))
    })
}

fn keys(_: &Interpreter, args: &[Object]) -> EvalResult {
    let dict = expect_dict("keys", &args[0])?;
    Ok(Object::Array(dict.keys().into_iter().map(Object::String).collect()))
}

fn values(interp: &Interpreter, args: &[Object]) -> EvalResult {
    let dict = expect_dict("values", &args[0])?;
    interp.dict_values(dict).map(Object::Array)
}

fn type_of(_: &Interpreter, args: &[Object]) -> EvalResult {
    Ok(Object::from(args[0].type_name()))
}

fn to_str(interp: &Interpreter, args: &[Object]) -> EvalResult {
    interp.stringify(&args[0]).map(Object::String)
}

fn to_int(_: &Interpreter, args: &[Object]) -> EvalResult {
    match &args[0] {
        Object::Integer(n) => Ok(Object::Integer(*n)),
        Object::Float(x) => truncate(*x).map(Object::Integer).ok_or_else(crate::errors::overflow),
        Object::Boolean(b) => Ok(Object::Integer(i64::from(*b))),
        Object::String(s) => s
            .trim()
            .parse()
            .map(Object::Integer)
            .map_err(|e| invalid_literal("integer", s, e)),
        other => Err(type_mismatch(format!(
            "cannot convert {} to integer",
            other.type_name()
        ))),
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "magnitude checked before the cast"
)]
fn truncate(x: f64) -> Option<i64> {
    (x.is_finite() && x.abs() < 9.2e18).then(|| x.trunc() as i64)
}

fn to_float(_: &Interpreter, args: &[Object]) -> EvalResult {
    match &args[0] {
        Object::Integer(n) => Ok(Object::Float(crate::object::promote(*n))),
        Object::Float(x) => Ok(Object::Float(*x)),
        Object::String(s) => s
            .trim()
            .parse()
            .map(Object::Float)
            .map_err(|e| invalid_literal("float", s, e)),
        other => Err(type_mismatch(format!(
            "cannot convert {} to float",
            other.type_name()
        ))),
    }
}

/// Print the rendered arguments separated by spaces.
fn print(interp: &Interpreter, args: &[Object]) -> EvalResult {
    let parts = args
        .iter()
        .map(|arg| interp.stringify(arg))
        .collect::<Result<Vec<_>, _>>()?;
    interp.print_handler().print_line(&parts.join(" "));
    Ok(Object::Null)
}

pub(crate) fn join_items(
    interp: &Interpreter,
    items: &[Object],
    separator: &str,
) -> Result<String, EvalError> {
    let parts = items
        .iter()
        .map(|item| interp.stringify(item))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(parts.join(separator))
}

fn join(interp: &Interpreter, args: &[Object]) -> EvalResult {
    let Object::Array(items) = &args[0] else {
        return Err(type_mismatch(format!(
            "`join` expects an array, got {}",
            args[0].type_name()
        )));
    };
    let separator = match args.get(1) {
        Some(sep) => expect_str("join", sep)?,
        None => "",
    };
    join_items(interp, items, separator).map(Object::String)
}

/// `range(n)` is `0..n`, `range(a, b)` is `a..b`.
fn range(_: &Interpreter, args: &[Object]) -> EvalResult {
    let (start, end) = match args {
        [end] => (0, expect_int("range", end)?),
        [start, end, ..] => (expect_int("range", start)?, expect_int("range", end)?),
        [] => (0, 0),
    };
    Ok(Object::Array((start..end).map(Object::Integer).collect()))
}

fn now(_: &Interpreter, _: &[Object]) -> EvalResult {
    Ok(typed::now())
}

fn regex(_: &Interpreter, args: &[Object]) -> EvalResult {
    let pattern = expect_str("regex", &args[0])?;
    let flags = match args.get(1) {
        Some(flags) => expect_str("regex", flags)?,
        None => "",
    };
    typed::regex(pattern, flags)
}

fn datetime(_: &Interpreter, args: &[Object]) -> EvalResult {
    typed::datetime(expect_str("datetime", &args[0])?)
}

#[cfg(test)]
mod tests;
