//! Command handlers for the `quill` CLI.
//!
//! Each submodule implements one command. Shared helpers for reading
//! files and reporting diagnostics live here.

use std::io::IsTerminal;

use quill_diagnostic::{ColorMode, Diagnostic, DiagnosticEmitter, TerminalEmitter};

mod check;
mod debug;
mod eval;
mod run;

pub use check::check_files;
pub use debug::{lex_file, parse_file};
pub use eval::eval_expression;
pub use run::run_file;

/// `NO_COLOR` turns colors off; otherwise color when stderr is a terminal.
pub fn color_mode() -> ColorMode {
    if std::env::var_os("NO_COLOR").is_some() {
        ColorMode::Never
    } else {
        ColorMode::Auto
    }
}

/// Render `diagnostics` for `source` to stderr, followed by a summary.
pub(super) fn report(path: &str, source: &str, diagnostics: &[Diagnostic]) {
    let is_tty = std::io::stderr().is_terminal();
    let mut emitter =
        TerminalEmitter::stderr(color_mode(), is_tty).with_source(path, source);
    emitter.emit_all(diagnostics);
    emitter.emit_summary(diagnostics.len());
    emitter.flush();
}

/// Read a source file, exiting with a message if it can't be read.
pub(super) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("{}", read_error(path, &e));
            std::process::exit(1);
        }
    }
}

pub(super) fn read_error(path: &str, error: &std::io::Error) -> String {
    match error.kind() {
        std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        std::io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        std::io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
        _ => format!("error reading '{path}': {error}"),
    }
}
