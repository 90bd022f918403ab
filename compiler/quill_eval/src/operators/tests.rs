use pretty_assertions::assert_eq;
use quill_diagnostic::ErrorCode;

use super::*;

fn code(result: EvalResult) -> Option<ErrorCode> {
    result.err().map(|e| e.code())
}

#[test]
fn integer_arithmetic() {
    let cases = [
        (InfixOp::Add, 7, 3, 10),
        (InfixOp::Sub, 7, 3, 4),
        (InfixOp::Mul, 7, 3, 21),
        (InfixOp::Div, 7, 3, 2),
        (InfixOp::Div, -7, 3, -2),
        (InfixOp::Mod, 7, 3, 1),
    ];
    for (op, a, b, expected) in cases {
        assert_eq!(
            evaluate_binary(op, &Object::Integer(a), &Object::Integer(b)),
            Ok(Object::Integer(expected)),
            "{a} {} {b}",
            op.as_symbol()
        );
    }
}

#[test]
fn integer_overflow_is_an_error() {
    let max = Object::Integer(i64::MAX);
    assert_eq!(
        code(evaluate_binary(InfixOp::Add, &max, &Object::Integer(1))),
        Some(ErrorCode::E2012)
    );
    assert_eq!(
        code(evaluate_binary(InfixOp::Div, &Object::Integer(i64::MIN), &Object::Integer(-1))),
        Some(ErrorCode::E2012)
    );
    assert_eq!(
        code(evaluate_prefix(PrefixOp::Neg, &Object::Integer(i64::MIN))),
        Some(ErrorCode::E2012)
    );
}

#[test]
fn division_by_zero() {
    let zero = Object::Integer(0);
    assert_eq!(
        code(evaluate_binary(InfixOp::Div, &Object::Integer(1), &zero)),
        Some(ErrorCode::E2003)
    );
    assert_eq!(
        code(evaluate_binary(InfixOp::Mod, &Object::Integer(1), &zero)),
        Some(ErrorCode::E2003)
    );
    assert_eq!(
        code(evaluate_binary(InfixOp::Div, &Object::Float(1.0), &Object::Float(0.0))),
        Some(ErrorCode::E2003)
    );
}

#[test]
fn mixed_numbers_promote() {
    assert_eq!(
        evaluate_binary(InfixOp::Add, &Object::Integer(1), &Object::Float(0.5)),
        Ok(Object::Float(1.5))
    );
    assert_eq!(
        evaluate_binary(InfixOp::Lt, &Object::Float(0.5), &Object::Integer(1)),
        Ok(Object::Boolean(true))
    );
}

#[test]
fn string_operators() {
    let a = Object::from("apple");
    let b = Object::from("banana");
    assert_eq!(evaluate_binary(InfixOp::Add, &a, &b), Ok(Object::from("applebanana")));
    assert_eq!(evaluate_binary(InfixOp::Lt, &a, &b), Ok(Object::Boolean(true)));
    assert_eq!(code(evaluate_binary(InfixOp::Mul, &a, &b)), Some(ErrorCode::E2005));
}

#[test]
fn equality_across_types() {
    assert_eq!(
        evaluate_binary(InfixOp::Eq, &Object::Integer(1), &Object::from("1")),
        Ok(Object::Boolean(false))
    );
    assert_eq!(
        evaluate_binary(InfixOp::NotEq, &Object::Null, &Object::Boolean(false)),
        Ok(Object::Boolean(true))
    );
}

#[test]
fn unsupported_operands() {
    let error = evaluate_binary(InfixOp::Sub, &Object::from("a"), &Object::Integer(1));
    assert_eq!(
        error.err().map(|e| e.to_string()),
        Some("0:0: unsupported operator: string - integer".to_string())
    );
    assert_eq!(
        code(evaluate_prefix(PrefixOp::Neg, &Object::from("a"))),
        Some(ErrorCode::E2005)
    );
}

#[test]
fn regex_match() {
    let text = Object::from("Hello");
    let Ok(re) = typed::regex("^h", "i") else {
        panic!("valid regex rejected");
    };
    assert_eq!(evaluate_binary(InfixOp::Match, &text, &re), Ok(Object::Boolean(true)));
    assert_eq!(evaluate_binary(InfixOp::NotMatch, &text, &re), Ok(Object::Boolean(false)));
    assert_eq!(
        evaluate_binary(InfixOp::Match, &text, &Object::from("l+")),
        Ok(Object::Boolean(true))
    );
    assert_eq!(
        code(evaluate_binary(InfixOp::Match, &Object::Integer(1), &re)),
        Some(ErrorCode::E2005)
    );
}

#[test]
fn logical_not() {
    assert_eq!(evaluate_prefix(PrefixOp::Not, &Object::Integer(0)), Ok(Object::Boolean(true)));
    assert_eq!(evaluate_prefix(PrefixOp::Not, &Object::from("x")), Ok(Object::Boolean(false)));
}

#[test]
fn negating_durations() {
    let Ok(duration) = typed::duration("90m") else {
        panic!("valid duration rejected");
    };
    assert_eq!(
        evaluate_prefix(PrefixOp::Neg, &duration),
        Ok(typed::duration_from(0, -5400))
    );
}
