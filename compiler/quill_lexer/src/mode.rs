//! Scanner modes.
//!
//! The scanner keeps a stack of modes instead of loose flags. Entering a
//! paired tag pushes a markup frame; `{` inside markup pushes a code frame
//! that pops again at its matching `}`. Raw text is a markup frame of its
//! own, so "raw text implies tag content" holds by construction.

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Ordinary expression tokens. `braces` counts `{` opened in this frame
    /// so the `}` that closes an embedded expression can be told apart.
    Code { braces: u32 },
    /// Between a paired tag's start and end: text, child tags, `{expr}`.
    Markup,
    /// Body of `<style>` / `<script>`: only `@{` and the closing tag are
    /// significant.
    RawText { tag: String },
}

/// Tags whose bodies are scanned as raw text.
pub(crate) fn is_raw_text_tag(name: &str) -> bool {
    name.eq_ignore_ascii_case("style") || name.eq_ignore_ascii_case("script")
}

#[derive(Debug)]
pub(crate) struct ModeStack {
    frames: Vec<Mode>,
}

impl ModeStack {
    pub(crate) fn new() -> Self {
        ModeStack {
            frames: vec![Mode::Code { braces: 0 }],
        }
    }

    pub(crate) fn current(&self) -> &Mode {
        // The root code frame is never popped.
        &self.frames[self.frames.len() - 1]
    }

    pub(crate) fn push(&mut self, mode: Mode) {
        self.frames.push(mode);
    }

    /// Pop one frame, keeping the root code frame.
    pub(crate) fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Number of open markup frames.
    pub(crate) fn tag_depth(&self) -> usize {
        self.frames
            .iter()
            .filter(|m| !matches!(m, Mode::Code { .. }))
            .count()
    }

    /// `{` in code: count it in the current frame.
    pub(crate) fn open_brace(&mut self) {
        if let Some(Mode::Code { braces }) = self.frames.last_mut() {
            *braces += 1;
        }
    }

    /// `}` in code. Returns true when it closes an embedded expression,
    /// in which case the frame is popped back to the enclosing markup.
    pub(crate) fn close_brace(&mut self) -> bool {
        let nested = self.frames.len() > 1;
        match self.frames.last_mut() {
            Some(Mode::Code { braces }) if *braces > 0 => {
                *braces -= 1;
                false
            }
            Some(Mode::Code { .. }) if nested => {
                self.frames.pop();
                true
            }
            _ => false,
        }
    }
}
