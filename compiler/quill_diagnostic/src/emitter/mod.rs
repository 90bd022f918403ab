//! Rendering diagnostics for people.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// A sink for diagnostics. The CLI uses [`TerminalEmitter`]; embedders can
/// supply their own.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        diagnostics.iter().for_each(|diagnostic| self.emit(diagnostic));
    }

    fn flush(&mut self);

    /// Closing line after a batch; silent when nothing failed.
    fn emit_summary(&mut self, error_count: usize);
}
