//! Binary and prefix operators on values.
//!
//! `&&`, `||`, `,` and `++` need the interpreter and are evaluated there;
//! everything else is a pure function of the two operands.

use quill_ir::{InfixOp, PrefixOp};

use crate::errors::{
    division_by_zero, modulo_by_zero, overflow, unsupported_operator, unsupported_prefix,
    EvalResult,
};
use crate::object::promote;
use crate::{typed, Object};

/// Evaluate a binary operation using direct pattern matching.
pub fn evaluate_binary(op: InfixOp, left: &Object, right: &Object) -> EvalResult {
    match op {
        InfixOp::Eq => return Ok(Object::Boolean(left == right)),
        InfixOp::NotEq => return Ok(Object::Boolean(left != right)),
        InfixOp::Match | InfixOp::NotMatch => return eval_match(op, left, right),
        _ => {}
    }
    if let Some(result) = typed::binary(op, left, right) {
        return result;
    }
    match (left, right) {
        (Object::Integer(a), Object::Integer(b)) => eval_int_binary(op, *a, *b),
        (Object::Float(a), Object::Float(b)) => eval_float_binary(op, *a, *b),
        (Object::Integer(a), Object::Float(b)) => eval_float_binary(op, promote(*a), *b),
        (Object::Float(a), Object::Integer(b)) => eval_float_binary(op, *a, promote(*b)),
        (Object::String(a), Object::String(b)) => eval_string_binary(op, a, b),
        _ => Err(mismatch(op, left, right)),
    }
}

fn mismatch(op: InfixOp, left: &Object, right: &Object) -> crate::EvalError {
    unsupported_operator(op.as_symbol(), left.type_name(), right.type_name())
}

/// Integer arithmetic is checked; `/` truncates toward zero.
fn eval_int_binary(op: InfixOp, a: i64, b: i64) -> EvalResult {
    let checked = |value: Option<i64>| value.map(Object::Integer).ok_or_else(overflow);
    match op {
        InfixOp::Add => checked(a.checked_add(b)),
        InfixOp::Sub => checked(a.checked_sub(b)),
        InfixOp::Mul => checked(a.checked_mul(b)),
        InfixOp::Div if b == 0 => Err(division_by_zero()),
        InfixOp::Div => checked(a.checked_div(b)),
        InfixOp::Mod if b == 0 => Err(modulo_by_zero()),
        InfixOp::Mod => checked(a.checked_rem(b)),
        InfixOp::Lt => Ok(Object::Boolean(a < b)),
        InfixOp::LtEq => Ok(Object::Boolean(a <= b)),
        InfixOp::Gt => Ok(Object::Boolean(a > b)),
        InfixOp::GtEq => Ok(Object::Boolean(a >= b)),
        _ => Err(unsupported_operator(op.as_symbol(), "integer", "integer")),
    }
}

fn eval_float_binary(op: InfixOp, a: f64, b: f64) -> EvalResult {
    match op {
        InfixOp::Add => Ok(Object::Float(a + b)),
        InfixOp::Sub => Ok(Object::Float(a - b)),
        InfixOp::Mul => Ok(Object::Float(a * b)),
        InfixOp::Div if b == 0.0 => Err(division_by_zero()),
        InfixOp::Div => Ok(Object::Float(a / b)),
        InfixOp::Mod if b == 0.0 => Err(modulo_by_zero()),
        InfixOp::Mod => Ok(Object::Float(a % b)),
        InfixOp::Lt => Ok(Object::Boolean(a < b)),
        InfixOp::LtEq => Ok(Object::Boolean(a <= b)),
        InfixOp::Gt => Ok(Object::Boolean(a > b)),
        InfixOp::GtEq => Ok(Object::Boolean(a >= b)),
        _ => Err(unsupported_operator(op.as_symbol(), "float", "float")),
    }
}

fn eval_string_binary(op: InfixOp, a: &str, b: &str) -> EvalResult {
    match op {
        InfixOp::Add => Ok(Object::String(format!("{a}{b}"))),
        InfixOp::Lt => Ok(Object::Boolean(a < b)),
        InfixOp::LtEq => Ok(Object::Boolean(a <= b)),
        InfixOp::Gt => Ok(Object::Boolean(a > b)),
        InfixOp::GtEq => Ok(Object::Boolean(a >= b)),
        _ => Err(unsupported_operator(op.as_symbol(), "string", "string")),
    }
}

/// `text ~ /re/` and `text !~ /re/`. A string on the right is compiled
/// as a pattern without flags.
fn eval_match(op: InfixOp, left: &Object, right: &Object) -> EvalResult {
    let Object::String(text) = left else {
        return Err(mismatch(op, left, right));
    };
    let re = match (typed::regex_of(right), right) {
        (Some(compiled), _) => compiled?.0,
        (None, Object::String(pattern)) => typed::compile_regex(pattern, "")?,
        (None, _) => return Err(mismatch(op, left, right)),
    };
    let matched = re.is_match(text);
    Ok(Object::Boolean(if op == InfixOp::Match {
        matched
    } else {
        !matched
    }))
}

pub fn evaluate_prefix(op: PrefixOp, operand: &Object) -> EvalResult {
    match op {
        PrefixOp::Not => Ok(Object::Boolean(!operand.is_truthy())),
        PrefixOp::Neg => match operand {
            Object::Integer(n) => n.checked_neg().map(Object::Integer).ok_or_else(overflow),
            Object::Float(x) => Ok(Object::Float(-x)),
            other => typed::negate(other)
                .unwrap_or_else(|| Err(unsupported_prefix("-", other.type_name()))),
        },
    }
}

#[cfg(test)]
mod tests;
