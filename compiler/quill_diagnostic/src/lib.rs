//! Error reporting shared by the lexer, parser and evaluator.
//!
//! A [`Diagnostic`] carries a stable [`ErrorCode`], a message, source
//! labels and optional hints. Parse errors and runtime errors both lower
//! into it, and an emitter renders it against the program text.

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Hint, Label};
pub use emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
pub use error_code::{ErrorCode, Phase};
