//! Parser snapshots for speculative parsing.
//!
//! The only speculative parse is the `a, b = ...` destructuring
//! assignment: the parser snapshots, tries the assignment form, and on
//! failure restores the snapshot and reparses the statement as an
//! expression. Everything else is decided by bounded lookahead.
//!
//! A snapshot captures the cursor position and the number of recorded
//! errors, so restoring also discards diagnostics emitted while
//! speculating.

use crate::Parser;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParserSnapshot {
    pub(crate) cursor_pos: usize,
    pub(crate) error_count: usize,
}

impl Parser<'_> {
    pub(crate) fn snapshot(&self) -> ParserSnapshot {
        ParserSnapshot {
            cursor_pos: self.cursor.position(),
            error_count: self.errors.len(),
        }
    }

    pub(crate) fn restore(&mut self, snapshot: ParserSnapshot) {
        self.cursor.set_position(snapshot.cursor_pos);
        self.errors.truncate(snapshot.error_count);
    }
}
