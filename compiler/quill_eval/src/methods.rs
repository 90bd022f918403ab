//! Methods on strings, arrays and dictionaries.
//!
//! `receiver.name(args)` dispatches here unless the receiver is a
//! dictionary holding `name`, in which case the stored value is called.

use std::cmp::Ordering;

use crate::builtins::{join_items, length_of, Arity};
use crate::errors::{type_mismatch, unknown_method, EvalError, EvalResult};
use crate::{typed, Interpreter, Object};

type MethodFn = fn(&Interpreter, &Object, &[Object]) -> EvalResult;

pub struct Method {
    pub name: &'static str,
    pub arity: Arity,
    func: MethodFn,
}

const fn method(name: &'static str, arity: Arity, func: MethodFn) -> Method {
    Method { name, arity, func }
}

static STRING_METHODS: &[Method] = &[
    method("length", Arity::Exact(0), length),
    method("upper", Arity::Exact(0), upper),
    method("lower", Arity::Exact(0), lower),
    method("trim", Arity::Exact(0), trim),
    method("split", Arity::Range(0, 1), split),
    method("replace", Arity::Exact(2), replace),
    method("contains", Arity::Exact(1), str_contains),
    method("startsWith", Arity::Exact(1), starts_with),
    method("endsWith", Arity::Exact(1), ends_with),
];

static ARRAY_METHODS: &[Method] = &[
    method("length", Arity::Exact(0), length),
    method("map", Arity::Exact(1), array_map),
    method("filter", Arity::Exact(1), filter),
    method("join", Arity::Range(0, 1), array_join),
    method("reverse", Arity::Exact(0), reverse),
    method("sort", Arity::Exact(0), sort),
    method("contains", Arity::Exact(1), array_contains),
    method("first", Arity::Exact(0), first),
    method("last", Arity::Exact(0), last),
];

static DICT_METHODS: &[Method] = &[
    method("keys", Arity::Exact(0), dict_keys),
    method("values", Arity::Exact(0), dict_values),
    method("has", Arity::Exact(1), has),
    method("length", Arity::Exact(0), length),
];

fn table(receiver: &Object) -> &'static [Method] {
    match receiver {
        Object::String(_) => STRING_METHODS,
        Object::Array(_) => ARRAY_METHODS,
        Object::Dict(_) => DICT_METHODS,
        _ => &[],
    }
}

pub fn find(receiver: &Object, name: &str) -> Option<&'static Method> {
    table(receiver).iter().find(|m| m.name == name)
}

/// Call method `name` on `receiver`.
pub fn call(interp: &Interpreter, receiver: &Object, name: &str, args: &[Object]) -> EvalResult {
    let method = find(receiver, name).ok_or_else(|| unknown_method(receiver.type_name(), name))?;
    method.arity.check(method.name, args.len())?;
    (method.func)(interp, receiver, args)
}

fn string_arg<'a>(method: &str, args: &'a [Object], index: usize) -> Result<&'a str, EvalError> {
    match args.get(index) {
        Some(Object::String(s)) => Ok(s),
        Some(other) => Err(type_mismatch(format!(
            "`{method}` expects a string argument, got {}",
            other.type_name()
        ))),
        None => Ok(""),
    }
}

fn receiver_str(receiver: &Object) -> &str {
    match receiver {
        Object::String(s) => s,
        _ => "",
    }
}

fn receiver_items(receiver: &Object) -> &[Object] {
    match receiver {
        Object::Array(items) => items,
        _ => &[],
    }
}

fn length(_: &Interpreter, receiver: &Object, _: &[Object]) -> EvalResult {
    length_of(receiver).map(Object::Integer)
}

// Strings

fn upper(_: &Interpreter, receiver: &Object, _: &[Object]) -> EvalResult {
    Ok(Object::String(receiver_str(receiver).to_uppercase()))
}

fn lower(_: &Interpreter, receiver: &Object, _: &[Object]) -> EvalResult {
    Ok(Object::String(receiver_str(receiver).to_lowercase()))
}

fn trim(_: &Interpreter, receiver: &Object, _: &[Object]) -> EvalResult {
    Ok(Object::from(receiver_str(receiver).trim()))
}

/// Split on a string or regex separator; no argument splits on whitespace.
fn split(_: &Interpreter, receiver: &Object, args: &[Object]) -> EvalResult {
    let text = receiver_str(receiver);
    let parts: Vec<Object> = match args.first() {
        None => text.split_whitespace().map(Object::from).collect(),
        Some(separator) => match typed::regex_of(separator) {
            Some(compiled) => compiled?.0.split(text).map(Object::from).collect(),
            None => {
                let separator = string_arg("split", args, 0)?;
                if separator.is_empty() {
                    text.chars().map(|c| Object::String(c.to_string())).collect()
                } else {
                    text.split(separator).map(Object::from).collect()
                }
            }
        },
    };
    Ok(Object::Array(parts))
}

/// String patterns replace every occurrence; regexes replace the first
/// match unless they carry the `g` flag.
fn replace(_: &Interpreter, receiver: &Object, args: &[Object]) -> EvalResult {
    let text = receiver_str(receiver);
    let replacement = string_arg("replace", args, 1)?;
    let replaced = match typed::regex_of(&args[0]) {
        Some(compiled) => {
            let (re, global) = compiled?;
            if global {
                re.replace_all(text, replacement).into_owned()
            } else {
                re.replace(text, replacement).into_owned()
            }
        }
        None => text.replace(string_arg("replace", args, 0)?, replacement),
    };
    Ok(Object::String(replaced))
}

fn str_contains(_: &Interpreter, receiver: &Object, args: &[Object]) -> EvalResult {
    let needle = string_arg("contains", args, 0)?;
    Ok(Object::Boolean(receiver_str(receiver).contains(needle)))
}

fn starts_with(_: &Interpreter, receiver: &Object, args: &[Object]) -> EvalResult {
    let prefix = string_arg("startsWith", args, 0)?;
    Ok(Object::Boolean(receiver_str(receiver).starts_with(prefix)))
}

fn ends_with(_: &Interpreter, receiver: &Object, args: &[Object]) -> EvalResult {
    let suffix = string_arg("endsWith", args, 0)?;
    Ok(Object::Boolean(receiver_str(receiver).ends_with(suffix)))
}

// Arrays

fn array_map(interp: &Interpreter, receiver: &Object, args: &[Object]) -> EvalResult {
    interp.map_iterable(&args[0], receiver)
}

fn filter(interp: &Interpreter, receiver: &Object, args: &[Object]) -> EvalResult {
    let mut kept = Vec::new();
    for item in receiver_items(receiver) {
        if interp.apply_function(&args[0], vec![item.clone()])?.is_truthy() {
            kept.push(item.clone());
        }
    }
    Ok(Object::Array(kept))
}

fn array_join(interp: &Interpreter, receiver: &Object, args: &[Object]) -> EvalResult {
    let separator = string_arg("join", args, 0)?;
    join_items(interp, receiver_items(receiver), separator).map(Object::String)
}

fn reverse(_: &Interpreter, receiver: &Object, _: &[Object]) -> EvalResult {
    Ok(Object::Array(receiver_items(receiver).iter().rev().cloned().collect()))
}

fn compare(a: &Object, b: &Object) -> Option<Ordering> {
    match (a, b) {
        (Object::Integer(x), Object::Integer(y)) => Some(x.cmp(y)),
        (Object::String(x), Object::String(y)) => Some(x.cmp(y)),
        (Object::Float(x), Object::Float(y)) => x.partial_cmp(y),
        (Object::Integer(x), Object::Float(y)) => crate::object::promote(*x).partial_cmp(y),
        (Object::Float(x), Object::Integer(y)) => x.partial_cmp(&crate::object::promote(*y)),
        _ => None,
    }
}

/// Sort numbers or strings ascending.
fn sort(_: &Interpreter, receiver: &Object, _: &[Object]) -> EvalResult {
    let mut items = receiver_items(receiver).to_vec();
    let mut failure = None;
    items.sort_by(|a, b| {
        compare(a, b).unwrap_or_else(|| {
            failure.get_or_insert((a.type_name(), b.type_name()));
            Ordering::Equal
        })
    });
    match failure {
        Some((left, right)) => Err(type_mismatch(format!("cannot compare {left} with {right}"))),
        None => Ok(Object::Array(items)),
    }
}

fn array_contains(_: &Interpreter, receiver: &Object, args: &[Object]) -> EvalResult {
    Ok(Object::Boolean(receiver_items(receiver).contains(&args[0])))
}

fn first(_: &Interpreter, receiver: &Object, _: &[Object]) -> EvalResult {
    Ok(receiver_items(receiver).first().cloned().unwrap_or(Object::Null))
}

fn last(_: &Interpreter, receiver: &Object, _: &[Object]) -> EvalResult {
    Ok(receiver_items(receiver).last().cloned().unwrap_or(Object::Null))
}

// Dictionaries

fn dict_keys(_: &Interpreter, receiver: &Object, _: &[Object]) -> EvalResult {
    let keys = receiver.as_dict().map(|d| d.keys()).unwrap_or_default();
    Ok(Object::Array(keys.into_iter().map(Object::String).collect()))
}

fn dict_values(interp: &Interpreter, receiver: &Object, _: &[Object]) -> EvalResult {
    match receiver.as_dict() {
        Some(dict) => interp.dict_values(dict).map(Object::Array),
        None => Ok(Object::Array(Vec::new())),
    }
}

fn has(_: &Interpreter, receiver: &Object, args: &[Object]) -> EvalResult {
    let key = string_arg("has", args, 0)?;
    Ok(Object::Boolean(
        receiver.as_dict().is_some_and(|d| d.contains_key(key)),
    ))
}
