//! Quill host layer.
//!
//! Glue between source text and the interpreter: lex, parse, evaluate, and
//! turn failures into diagnostics. The `quill` binary and embedders both go
//! through [`run_source`] and [`check_source`].
//!
//! # Debugging
//!
//! - `RUST_LOG=quill_eval=trace`: follow every function application.
//! - `RUST_LOG=quill_parse=debug`: see speculative parses being rolled back.
//! - `QUILL_LOG_TREE=1`: render spans as an indented tree instead of flat
//!   lines.

pub mod commands;

use std::sync::Once;

use quill_diagnostic::Diagnostic;
use quill_eval::{silent_handler, Environment, EvalError, InterpreterBuilder, Object};
use quill_ir::Program;
use quill_parse::ParseError;

pub use quill_eval::Interpreter;

/// Why a source could not be run.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("{} parse error(s), first at {}", .0.len(), first_parse_error(.0))]
    Parse(Vec<ParseError>),
    #[error("runtime error at {0}")]
    Runtime(EvalError),
}

fn first_parse_error(errors: &[ParseError]) -> String {
    errors.first().map_or_else(String::new, ToString::to_string)
}

impl Error {
    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Error::Parse(errors) => errors.iter().map(ParseError::to_diagnostic).collect(),
            Error::Runtime(error) => vec![error.to_diagnostic()],
        }
    }
}

impl From<EvalError> for Error {
    fn from(error: EvalError) -> Self {
        Error::Runtime(error)
    }
}

/// Lex and parse `source`, failing with every parse error found.
pub fn check_source(source: &str) -> Result<Program, Error> {
    let tokens = quill_lexer::lex(source);
    quill_parse::parse(&tokens).into_result().map_err(Error::Parse)
}

/// Parse `source` and evaluate it in `env`.
///
/// Bindings made at the top level land in `env`, so successive calls with
/// the same environment see each other's definitions.
pub fn run_source(
    source: &str,
    env: &Environment,
    interpreter: &Interpreter,
) -> Result<Object, Error> {
    let program = check_source(source)?;
    tracing::debug!(statements = program.statements.len(), "evaluating");
    Ok(interpreter.eval_program_in(&program, env)?)
}

/// Literal-like rendering of a value, e.g. `{a: 1, b: "x"}`.
///
/// Dictionary fields are evaluated to render them; output they print is
/// discarded, and a field that fails renders as its error.
pub fn render(value: &Object) -> String {
    let interpreter = InterpreterBuilder::new()
        .print_handler(silent_handler())
        .build();
    interpreter
        .inspect(value)
        .unwrap_or_else(|error| format!("<error: {error}>"))
}

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());
        if std::env::var("QUILL_LOG_TREE").is_ok_and(|v| v == "1") {
            registry
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .init();
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .init();
        }
    });
}
