//! Quill evaluator.
//!
//! Runtime values ([`Object`]), lexical scopes ([`Environment`]) and the
//! tree-walking [`Interpreter`] that runs a parsed [`quill_ir::Program`].
//!
//! - [`builtins`]: the global function table
//! - [`methods`]: string, array and dictionary methods
//! - [`typed`]: datetime, duration, path, URL and regex values
//! - [`operators`]: pure binary and prefix operators
//! - [`print_handler`]: where `print` output goes
//!
//! Template interpolation and tag props re-enter `quill_lexer` and
//! `quill_parse` from inside evaluation.

pub mod builtins;
mod environment;
pub mod errors;
mod interpreter;
pub mod methods;
mod object;
pub mod operators;
pub mod print_handler;
pub mod typed;

pub use environment::Environment;
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Interpreter, InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use object::{Dict, Entry, Function, Object};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandler, SharedPrintHandler,
};
