use pretty_assertions::assert_eq;
use quill_diagnostic::ErrorCode;

use super::*;
use crate::{buffer_handler, Dict, InterpreterBuilder};

fn interp() -> Interpreter {
    InterpreterBuilder::new().print_handler(buffer_handler()).build()
}

fn call(name: &str, args: &[Object]) -> EvalResult {
    let Some(builtin) = lookup(name) else {
        panic!("`{name}` is not registered");
    };
    builtin.call(&interp(), args)
}

fn error_code(name: &str, args: &[Object]) -> Option<ErrorCode> {
    call(name, args).err().map(|e| e.code())
}

#[test]
fn arity_bounds() {
    assert!(Arity::Exact(1).accepts(1));
    assert!(!Arity::Exact(1).accepts(2));
    assert!(Arity::Range(1, 2).accepts(2));
    assert!(!Arity::Range(1, 2).accepts(0));
    assert!(Arity::Variadic.accepts(0));
    assert_eq!(
        Arity::Range(1, 2).check("join", 3).err().map(|e| e.to_string()),
        Some("0:0: `join` expects 1 to 2 argument(s), got 3".to_string())
    );
}

#[test]
fn registry_contents() {
    let registered = [
        "datetime", "float", "int", "join", "keys", "len", "map", "now", "print", "range",
        "regex", "str", "type", "values",
    ];
    for name in registered {
        assert_eq!(lookup(name).map(|b| b.name), Some(name));
    }
    assert_eq!(REGISTRY.len(), registered.len());
    assert!(lookup("nope").is_none());
}

#[test]
fn len_counts_characters_elements_and_entries() {
    assert_eq!(call("len", &[Object::from("héllo")]), Ok(Object::Integer(5)));
    assert_eq!(
        call("len", &[Object::Array(vec![Object::Null; 3])]),
        Ok(Object::Integer(3))
    );
    let dict = Object::dict(Dict::from_values([("a", Object::Integer(1))]));
    assert_eq!(call("len", &[dict]), Ok(Object::Integer(1)));
    assert_eq!(error_code("len", &[Object::Integer(1)]), Some(ErrorCode::E2001));
    assert_eq!(error_code("len", &[]), Some(ErrorCode::E2007));
}

#[test]
fn range_forms() {
    let ints = |v: &[i64]| Object::Array(v.iter().copied().map(Object::Integer).collect());
    assert_eq!(call("range", &[Object::Integer(3)]), Ok(ints(&[0, 1, 2])));
    assert_eq!(
        call("range", &[Object::Integer(2), Object::Integer(4)]),
        Ok(ints(&[2, 3]))
    );
    assert_eq!(call("range", &[Object::Integer(-1)]), Ok(ints(&[])));
    assert_eq!(error_code("range", &[Object::from("3")]), Some(ErrorCode::E2001));
}

#[test]
fn conversions() {
    assert_eq!(call("int", &[Object::from(" 42 ")]), Ok(Object::Integer(42)));
    assert_eq!(call("int", &[Object::Float(-2.9)]), Ok(Object::Integer(-2)));
    assert_eq!(call("int", &[Object::Boolean(true)]), Ok(Object::Integer(1)));
    assert_eq!(error_code("int", &[Object::from("4x")]), Some(ErrorCode::E2010));
    assert_eq!(error_code("int", &[Object::Float(f64::NAN)]), Some(ErrorCode::E2012));
    assert_eq!(call("float", &[Object::Integer(2)]), Ok(Object::Float(2.0)));
    assert_eq!(call("float", &[Object::from("0.25")]), Ok(Object::Float(0.25)));
    assert_eq!(call("str", &[Object::Float(2.0)]), Ok(Object::from("2.0")));
    assert_eq!(call("str", &[Object::Null]), Ok(Object::from("")));
}

#[test]
fn type_names() {
    assert_eq!(call("type", &[Object::Integer(1)]), Ok(Object::from("integer")));
    assert_eq!(call("type", &[Object::Null]), Ok(Object::from("null")));
    let Some(len) = lookup("len") else {
        panic!("len is not registered");
    };
    assert_eq!(call("type", &[Object::Builtin(len)]), Ok(Object::from("builtin")));
    assert_eq!(call("type", &[typed::now()]), Ok(Object::from("datetime")));
}

#[test]
fn join_renders_items() {
    let items = Object::Array(vec![Object::Integer(1), Object::from("a"), Object::Null]);
    assert_eq!(call("join", &[items.clone()]), Ok(Object::from("1a")));
    assert_eq!(
        call("join", &[items, Object::from(", ")]),
        Ok(Object::from("1, a, "))
    );
}

#[test]
fn print_writes_to_handler() {
    let interp = interp();
    let Some(print) = lookup("print") else {
        panic!("print is not registered");
    };
    let result = print.call(
        &interp,
        &[Object::from("x"), Object::Integer(1), Object::Boolean(false)],
    );
    assert_eq!(result, Ok(Object::Null));
    assert_eq!(print.call(&interp, &[]), Ok(Object::Null));
    assert_eq!(interp.print_handler().output(), "x 1 false\n\n");
}

#[test]
fn constructors_for_typed_values() {
    assert_eq!(
        call("regex", &[Object::from("(")]).err().map(|e| e.code()),
        Some(ErrorCode::E2010)
    );
    let Ok(Object::Dict(dt)) = call("datetime", &[Object::from("2024-02-29")]) else {
        panic!("datetime did not produce a dictionary");
    };
    assert_eq!(dt.value("day"), Some(Object::Integer(29)));
    assert_eq!(error_code("datetime", &[Object::from("soon")]), Some(ErrorCode::E2010));
}
