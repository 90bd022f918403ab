use pretty_assertions::assert_eq;

use super::*;
use crate::typed;

#[test]
fn truthiness() {
    let falsy = [
        Object::Boolean(false),
        Object::Null,
        Object::Integer(0),
        Object::Float(0.0),
        Object::from(""),
        Object::Array(vec![]),
        Object::dict(Dict::from_values(Vec::<(&str, Object)>::new())),
    ];
    for value in &falsy {
        assert!(!value.is_truthy(), "{value:?} should be falsy");
    }
    let truthy = [
        Object::Boolean(true),
        Object::Integer(-1),
        Object::Float(0.1),
        Object::from("0"),
        Object::Array(vec![Object::Null]),
        Object::dict(Dict::from_values([("a", Object::Null)])),
    ];
    for value in &truthy {
        assert!(value.is_truthy(), "{value:?} should be truthy");
    }
}

#[test]
fn type_names() {
    assert_eq!(Object::Integer(1).type_name(), "integer");
    assert_eq!(Object::Float(1.0).type_name(), "float");
    assert_eq!(Object::from("s").type_name(), "string");
    assert_eq!(Object::Array(vec![]).type_name(), "array");
    assert_eq!(
        Object::dict(Dict::from_values([("a", Object::Integer(1))])).type_name(),
        "dictionary"
    );
    assert_eq!(typed::path("./a").type_name(), "path");
    assert_eq!(Object::ReturnValue(Box::new(Object::Null)).type_name(), "null");
}

#[test]
fn numeric_equality_crosses_int_and_float() {
    assert_eq!(Object::Integer(2), Object::Float(2.0));
    assert_eq!(Object::Float(2.0), Object::Integer(2));
    assert_ne!(Object::Integer(2), Object::Float(2.5));
    assert_ne!(Object::Integer(0), Object::Boolean(false));
    assert_ne!(Object::Null, Object::from(""));
}

#[test]
fn dictionaries_compare_by_identity() {
    let a = Object::dict(Dict::from_values([("k", Object::Integer(1))]));
    let b = Object::dict(Dict::from_values([("k", Object::Integer(1))]));
    assert_eq!(a, a.clone());
    assert_ne!(a, b);
}

#[test]
fn typed_values_compare_by_value() {
    let (Ok(a), Ok(b)) = (typed::duration("1h"), typed::duration("60m")) else {
        panic!("valid durations rejected");
    };
    assert_eq!(a, b);
    let (Ok(x), Ok(y)) = (
        typed::datetime("2024-01-01T12:00:00+02:00"),
        typed::datetime("2024-01-01T10:00:00Z"),
    ) else {
        panic!("valid datetimes rejected");
    };
    assert_eq!(x, y);
}

#[test]
fn unwrap_return_strips_one_layer() {
    let wrapped = Object::ReturnValue(Box::new(Object::Integer(3)));
    assert_eq!(wrapped.unwrap_return(), Object::Integer(3));
    assert_eq!(Object::Integer(3).unwrap_return(), Object::Integer(3));
}

#[test]
fn conversions_from_rust_values() {
    assert_eq!(Object::from(Some(3_i64)), Object::Integer(3));
    assert_eq!(Object::from(None::<i64>), Object::Null);
    assert_eq!(
        Object::from(vec![Object::from(true)]),
        Object::Array(vec![Object::Boolean(true)])
    );
    assert_eq!(Object::string("x"), Object::String("x".to_string()));
}

#[test]
fn dict_entries_keep_insertion_order() {
    let dict = Dict::from_values([("z", Object::Integer(1)), ("a", Object::Integer(2))]);
    dict.insert("m", Entry::Value(Object::Integer(3)));
    assert_eq!(dict.keys(), vec!["z", "a", "m"]);
    assert!(dict.remove("a"));
    assert!(!dict.remove("a"));
    assert_eq!(dict.keys(), vec!["z", "m"]);
    assert_eq!(dict.value("m"), Some(Object::Integer(3)));
}
