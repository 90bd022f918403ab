//! Human-readable output for a terminal.
//!
//! With the program text attached, every label is followed by the source
//! line it points into and a caret under the column.

use std::io::{self, Write};

use crate::{Diagnostic, Hint, Label};

use super::DiagnosticEmitter;

/// Whether to emit ANSI color sequences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Clone, Copy)]
enum Style {
    Error,
    Secondary,
    Code,
    Note,
    Help,
}

impl Style {
    fn ansi(self) -> &'static str {
        match self {
            Style::Error => "\x1b[1;31m",
            Style::Secondary => "\x1b[1;34m",
            Style::Code => "\x1b[1m",
            Style::Note => "\x1b[1;36m",
            Style::Help => "\x1b[1;32m",
        }
    }

    fn for_label(label: &Label) -> Self {
        if label.is_primary {
            Style::Error
        } else {
            Style::Secondary
        }
    }
}

const RESET: &str = "\x1b[0m";

/// Writes diagnostics to any [`Write`], typically stderr.
///
/// Write failures are ignored; there is nowhere left to report them.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    file_name: Option<String>,
    source: Option<String>,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            file_name: None,
            source: None,
        }
    }

    /// Attach the program text so labels render with a snippet.
    #[must_use]
    pub fn with_source(mut self, file_name: impl Into<String>, source: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self.source = Some(source.into());
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.colors {
            format!("{}{text}{RESET}", style.ansi())
        } else {
            text.to_owned()
        }
    }

    fn line_text(&self, line: u32) -> Option<String> {
        let index = usize::try_from(line).ok()?.checked_sub(1)?;
        self.source.as_deref()?.lines().nth(index).map(str::to_owned)
    }

    fn location(&self, label: &Label) -> String {
        match &self.file_name {
            Some(name) => format!("{name}:{}", label.pos),
            None => label.pos.to_string(),
        }
    }

    fn write_label(&mut self, label: &Label) {
        let arrow = if label.is_primary { "-->" } else { "..." };
        let message = self.paint(&label.message, Style::for_label(label));
        let location = self.location(label);
        let _ = writeln!(self.writer, "  {arrow} {location}");

        let Some(text) = self.line_text(label.pos.line) else {
            let _ = writeln!(self.writer, "      {message}");
            return;
        };

        let line_no = label.pos.line.to_string();
        let blank = " ".repeat(line_no.len());
        // Copy tabs into the padding so the caret lands under the column.
        let padding: String = text
            .chars()
            .take(label.pos.column.saturating_sub(1) as usize)
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        let caret = self.paint("^", Style::for_label(label));
        let _ = writeln!(self.writer, " {blank} |");
        let _ = writeln!(self.writer, " {line_no} | {text}");
        let _ = writeln!(self.writer, " {blank} | {padding}{caret} {message}");
    }

    fn write_hint(&mut self, hint: &Hint) {
        let style = match hint {
            Hint::Note(_) => Style::Note,
            Hint::Help(_) => Style::Help,
        };
        let kind = self.paint(hint.kind(), style);
        let _ = writeln!(self.writer, "  = {kind}: {}", hint.text());
    }
}

impl TerminalEmitter<io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let phase = self.paint(&diagnostic.phase().to_string(), Style::Error);
        let code = self.paint(&format!("[{}]", diagnostic.code), Style::Code);
        let _ = writeln!(self.writer, "{phase}{code}: {}", diagnostic.message);
        for label in &diagnostic.labels {
            self.write_label(label);
        }
        for hint in &diagnostic.hints {
            self.write_hint(hint);
        }
        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize) {
        if error_count == 0 {
            return;
        }
        let plural = if error_count == 1 { "" } else { "s" };
        let counted = format!("{error_count} error{plural}");
        let summary = match &self.file_name {
            Some(name) => format!("{counted} in {name}"),
            None => counted,
        };
        let head = self.paint("error", Style::Error);
        let _ = writeln!(self.writer, "{head}: {summary}");
    }
}

#[cfg(test)]
mod tests;
