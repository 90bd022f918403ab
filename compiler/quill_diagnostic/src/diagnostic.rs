use std::fmt;

use quill_ir::Position;

use crate::error_code::Phase;
use crate::ErrorCode;

/// A message pinned to a source position.
///
/// The primary label marks where the error happened; secondary labels point
/// at related code such as the `(` an unclosed group started with.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub pos: Position,
    pub message: String,
    pub is_primary: bool,
}

impl Label {
    pub fn primary(pos: Position, message: impl Into<String>) -> Self {
        Label {
            pos,
            message: message.into(),
            is_primary: true,
        }
    }

    pub fn secondary(pos: Position, message: impl Into<String>) -> Self {
        Label {
            pos,
            message: message.into(),
            is_primary: false,
        }
    }
}

/// Trailing advice attached to a diagnostic, kept in the order added.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Hint {
    /// Background on why the error happened.
    Note(String),
    /// Something the author can change.
    Help(String),
}

impl Hint {
    pub fn kind(&self) -> &'static str {
        match self {
            Hint::Note(_) => "note",
            Hint::Help(_) => "help",
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Hint::Note(text) | Hint::Help(text) => text,
        }
    }
}

/// An error ready to be shown to the author of a Quill program.
///
/// Parse errors and runtime errors both lower into this one shape. Every
/// Quill diagnostic is an error; the [`Phase`] derived from the code tells
/// whether the program ran at all.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "a diagnostic does nothing until it is emitted"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    pub labels: Vec<Label>,
    pub hints: Vec<Hint>,
}

impl Diagnostic {
    /// A diagnostic whose message defaults to the code's title.
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            message: code.title().to_owned(),
            labels: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn with_message(self, message: impl Into<String>) -> Self {
        Diagnostic { message: message.into(), ..self }
    }

    pub fn with_label(mut self, pos: Position, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(pos, message));
        self
    }

    pub fn with_secondary_label(mut self, pos: Position, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(pos, message));
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.hints.push(Hint::Note(note.into()));
        self
    }

    pub fn with_suggestion(mut self, help: impl Into<String>) -> Self {
        self.hints.push(Hint::Help(help.into()));
        self
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.code.phase()
    }

    /// Where the error happened, if any label says so.
    pub fn primary_pos(&self) -> Option<Position> {
        self.labels.iter().find(|label| label.is_primary).map(|label| label.pos)
    }
}

/// Plain single-block form, used in logs and test output.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.phase(), self.code, self.message)?;
        for label in &self.labels {
            let arrow = if label.is_primary { "-->" } else { "..." };
            write!(f, "\n  {arrow} {}: {}", label.pos, label.message)?;
        }
        for hint in &self.hints {
            write!(f, "\n  = {}: {}", hint.kind(), hint.text())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
