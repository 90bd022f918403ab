//! Pratt parser for Quill.
//!
//! Consumes a [`TokenList`] and produces a [`Program`]. Errors are
//! collected rather than thrown: after a failed statement the parser
//! resynchronizes at the next statement boundary and keeps going, so one
//! run reports as many problems as it can.

mod cursor;
mod error;
mod grammar;
mod snapshot;

pub use cursor::Cursor;
pub use error::ParseError;
pub use snapshot::ParserSnapshot;

use quill_ir::{Program, TokenList};

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    errors: Vec<ParseError>,
}

/// A parsed program together with every error found while parsing it.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseOutput {
    pub program: Program,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The program if parsing was clean, the errors otherwise.
    pub fn into_result(self) -> Result<Program, Vec<ParseError>> {
        if self.errors.is_empty() {
            Ok(self.program)
        } else {
            Err(self.errors)
        }
    }
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            errors: Vec::new(),
        }
    }

    /// Parse the whole token stream.
    pub fn parse_program(mut self) -> ParseOutput {
        let mut program = Program::default();
        while !self.cursor.is_at_end() {
            if self.cursor.eat(quill_ir::TokenKind::Semicolon) {
                continue;
            }
            let start = self.cursor.position();
            match self.parse_statement() {
                Ok(stmt) => program.statements.push(stmt),
                Err(error) => {
                    self.errors.push(error);
                    self.synchronize(start);
                }
            }
        }
        ParseOutput {
            program,
            errors: self.errors,
        }
    }
}

/// Parse tokens into a program.
pub fn parse(tokens: &TokenList) -> ParseOutput {
    Parser::new(tokens).parse_program()
}
