//! Runtime errors.
//!
//! Every failing evaluation step returns an [`EvalError`]; `?` carries it
//! unchanged up to the program boundary. Errors are built without a
//! position and pick one up as they pass through [`EvalError::at`], so the
//! innermost expression that failed is the one reported.

use quill_diagnostic::{Diagnostic, ErrorCode};
use quill_ir::Position;

/// Result of evaluating anything.
pub type EvalResult = Result<crate::Object, EvalError>;

/// What went wrong.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("{0}")]
    TypeMismatch(String),

    #[error("identifier not found: {0}")]
    UnknownIdentifier(String),

    #[error("no method `{method}` on {type_name}")]
    UnknownMethod {
        type_name: &'static str,
        method: String,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("modulo by zero")]
    ModuloByZero,

    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("unsupported operator: {left} {op} {right}")]
    UnsupportedOperator {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("unsupported operator: {op}{operand}")]
    UnsupportedPrefix {
        op: &'static str,
        operand: &'static str,
    },

    #[error("{0} is not callable")]
    NotCallable(&'static str),

    #[error("`{name}` expects {expected} argument(s), got {found}")]
    Arity {
        name: String,
        expected: String,
        found: usize,
    },

    #[error("{0}")]
    Destructure(String),

    #[error("in template expression: {0}")]
    Template(String),

    #[error("invalid {kind} literal `{text}`: {reason}")]
    InvalidLiteral {
        kind: &'static str,
        text: String,
        reason: String,
    },

    #[error("maximum call depth of {0} exceeded")]
    RecursionLimit(usize),

    #[error("integer overflow")]
    Overflow,

    #[error("{0}")]
    Custom(String),
}

impl EvalErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            EvalErrorKind::TypeMismatch(_) => ErrorCode::E2001,
            EvalErrorKind::UnknownIdentifier(_) | EvalErrorKind::UnknownMethod { .. } => {
                ErrorCode::E2002
            }
            EvalErrorKind::DivisionByZero | EvalErrorKind::ModuloByZero => ErrorCode::E2003,
            EvalErrorKind::IndexOutOfRange { .. } => ErrorCode::E2004,
            EvalErrorKind::UnsupportedOperator { .. } | EvalErrorKind::UnsupportedPrefix { .. } => {
                ErrorCode::E2005
            }
            EvalErrorKind::NotCallable(_) => ErrorCode::E2006,
            EvalErrorKind::Arity { .. } => ErrorCode::E2007,
            EvalErrorKind::Destructure(_) => ErrorCode::E2008,
            EvalErrorKind::Template(_) => ErrorCode::E2009,
            EvalErrorKind::InvalidLiteral { .. } => ErrorCode::E2010,
            EvalErrorKind::RecursionLimit(_) => ErrorCode::E2011,
            EvalErrorKind::Overflow => ErrorCode::E2012,
            EvalErrorKind::Custom(_) => ErrorCode::E2013,
        }
    }
}

/// A runtime error with the 1-based position of the failing expression.
///
/// `line == 0` means no position has been attached yet.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{line}:{column}: {kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub line: u32,
    pub column: u32,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            line: 0,
            column: 0,
        }
    }

    /// Attach `pos` unless an inner expression already did.
    #[must_use]
    pub fn at(mut self, pos: Position) -> Self {
        if self.line == 0 {
            self.line = pos.line;
            self.column = pos.column;
        }
        self
    }

    #[inline]
    pub fn pos(&self) -> Position {
        Position::new(self.line, self.column)
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diagnostic = Diagnostic::error(self.code()).with_message(self.message());
        if self.line != 0 {
            diagnostic = diagnostic.with_label(self.pos(), self.code().title());
        }
        match &self.kind {
            EvalErrorKind::UnknownIdentifier(name) => {
                diagnostic.with_suggestion(format!("declare it first with `let {name} = ...`"))
            }
            EvalErrorKind::UnknownMethod { .. } => {
                diagnostic.with_note("a dictionary key holding a function is also callable")
            }
            EvalErrorKind::RecursionLimit(_) => diagnostic
                .with_note("function calls and lazy dictionary fields count toward the limit"),
            EvalErrorKind::Template(_) => {
                diagnostic.with_note("the position is that of the enclosing template literal")
            }
            _ => diagnostic,
        }
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

// Constructors

pub fn type_mismatch(message: impl Into<String>) -> EvalError {
    EvalErrorKind::TypeMismatch(message.into()).into()
}

pub fn unknown_identifier(name: &str) -> EvalError {
    EvalErrorKind::UnknownIdentifier(name.to_string()).into()
}

pub fn unknown_method(type_name: &'static str, method: &str) -> EvalError {
    EvalErrorKind::UnknownMethod {
        type_name,
        method: method.to_string(),
    }
    .into()
}

pub fn division_by_zero() -> EvalError {
    EvalErrorKind::DivisionByZero.into()
}

pub fn modulo_by_zero() -> EvalError {
    EvalErrorKind::ModuloByZero.into()
}

pub fn index_out_of_range(index: i64, len: usize) -> EvalError {
    EvalErrorKind::IndexOutOfRange { index, len }.into()
}

pub fn unsupported_operator(
    op: &'static str,
    left: &'static str,
    right: &'static str,
) -> EvalError {
    EvalErrorKind::UnsupportedOperator { op, left, right }.into()
}

pub fn unsupported_prefix(op: &'static str, operand: &'static str) -> EvalError {
    EvalErrorKind::UnsupportedPrefix { op, operand }.into()
}

pub fn not_callable(type_name: &'static str) -> EvalError {
    EvalErrorKind::NotCallable(type_name).into()
}

pub fn wrong_arity(name: &str, expected: impl Into<String>, found: usize) -> EvalError {
    EvalErrorKind::Arity {
        name: name.to_string(),
        expected: expected.into(),
        found,
    }
    .into()
}

pub fn destructure_mismatch(message: impl Into<String>) -> EvalError {
    EvalErrorKind::Destructure(message.into()).into()
}

pub fn template_error(message: impl Into<String>) -> EvalError {
    EvalErrorKind::Template(message.into()).into()
}

pub fn invalid_literal(kind: &'static str, text: &str, reason: impl ToString) -> EvalError {
    EvalErrorKind::InvalidLiteral {
        kind,
        text: text.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

pub fn recursion_limit(depth: usize) -> EvalError {
    EvalErrorKind::RecursionLimit(depth).into()
}

pub fn overflow() -> EvalError {
    EvalErrorKind::Overflow.into()
}

pub fn custom(message: impl Into<String>) -> EvalError {
    EvalErrorKind::Custom(message.into()).into()
}
