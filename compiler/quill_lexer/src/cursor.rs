//! Character cursor with line/column tracking.
//!
//! The cursor walks a `&str` one `char` at a time. Reads past the end
//! yield `'\0'`; use [`Cursor::is_eof`] to tell the end of input apart from
//! an interior NUL. The cursor is [`Copy`], so a scanner can snapshot it
//! before a speculative read and restore it afterwards.

use quill_ir::Position;

#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    source: &'a str,
    /// Byte offset of the current character.
    pos: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Cursor {
            source,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// The unread remainder of the source.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    /// Current character, `'\0'` at end of input.
    #[inline]
    pub fn current(&self) -> char {
        self.rest().chars().next().unwrap_or('\0')
    }

    /// Character after the current one.
    #[inline]
    pub fn peek(&self) -> char {
        self.peek_nth(1)
    }

    /// Character `n` positions ahead (`peek_nth(0)` is `current()`).
    pub fn peek_nth(&self, n: usize) -> char {
        self.rest().chars().nth(n).unwrap_or('\0')
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    #[inline]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Advance past one character, updating line and column.
    pub fn advance(&mut self) {
        let Some(c) = self.rest().chars().next() else {
            return;
        };
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Advance while `pred` holds for the current character.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.advance();
        }
    }

    /// Advance past `terminator`, or to end of input if it never appears.
    /// Returns whether the terminator was found.
    pub fn eat_through(&mut self, terminator: &str) -> bool {
        while !self.is_eof() {
            if self.starts_with(terminator) {
                self.advance_n(terminator.chars().count());
                return true;
            }
            self.advance();
        }
        false
    }

    /// Byte offset of the current character.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Source text from byte offset `start` to the current position.
    #[inline]
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.pos]
    }
}

#[cfg(test)]
mod tests;
