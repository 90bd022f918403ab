//! Statements, blocks and error recovery.

use quill_diagnostic::ErrorCode;
use quill_ir::{BindingTarget, Block, ExprKind, Stmt, StmtKind, TokenKind};
use tracing::{debug, trace};

use super::Precedence;
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse one statement and its optional trailing `;`.
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let token = self.cursor.current();
        trace!(kind = ?token.kind, pos = %token.pos(), "statement");
        let stmt = match token.kind {
            TokenKind::Let => self.parse_let()?,
            TokenKind::Return => self.parse_return()?,
            TokenKind::Delete => self.parse_delete()?,
            TokenKind::Ident if self.cursor.peek_kind() == TokenKind::Assign => {
                self.parse_simple_assignment()?
            }
            TokenKind::Ident if self.cursor.peek_kind() == TokenKind::Comma => {
                match self.try_destructuring_assignment() {
                    Some(stmt) => stmt?,
                    None => self.parse_expression_statement()?,
                }
            }
            TokenKind::LBrace => self.parse_brace_statement()?,
            TokenKind::LBracket
                if self.closes_before_assign(TokenKind::LBracket, TokenKind::RBracket) =>
            {
                let pos = token.pos();
                let pattern = self.parse_array_pattern()?;
                let value = self.parse_assigned_value()?;
                Stmt::new(
                    StmtKind::Assign {
                        target: BindingTarget::Array(pattern),
                        value,
                    },
                    pos,
                )
            }
            _ => self.parse_expression_statement()?,
        };
        self.cursor.eat(TokenKind::Semicolon);
        Ok(stmt)
    }

    /// `let a = v`, `let a, b = v`, `let [a, b] = v`, `let {a} = v`.
    fn parse_let(&mut self) -> Result<Stmt, ParseError> {
        let pos = self.cursor.advance().pos();
        let target = match self.cursor.current_kind() {
            TokenKind::LBracket => BindingTarget::Array(self.parse_array_pattern()?),
            TokenKind::LBrace => BindingTarget::Dict(self.parse_dict_pattern()?),
            _ => BindingTarget::Names(self.parse_name_list()?),
        };
        let value = self.parse_assigned_value()?;
        Ok(Stmt::new(StmtKind::Let { target, value }, pos))
    }

    /// `= expr`, where `expr` may be a comma list.
    fn parse_assigned_value(&mut self) -> Result<quill_ir::Expr, ParseError> {
        self.cursor.expect(TokenKind::Assign)?;
        self.parse_expression(Precedence::Lowest)
    }

    /// `a` or `a, b, c`.
    fn parse_name_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut names = vec![self.cursor.expect_ident()?];
        while self.cursor.eat(TokenKind::Comma) {
            names.push(self.cursor.expect_ident()?);
        }
        Ok(names)
    }

    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        let pos = self.cursor.advance().pos();
        let value = match self.cursor.current_kind() {
            TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof => None,
            _ => Some(self.parse_expression(Precedence::Lowest)?),
        };
        Ok(Stmt::new(StmtKind::Return(value), pos))
    }

    /// `delete d.key` / `delete d[key]`.
    fn parse_delete(&mut self) -> Result<Stmt, ParseError> {
        let pos = self.cursor.advance().pos();
        let target = self.parse_expression(Precedence::Comma)?;
        match target.kind {
            ExprKind::Dot { .. } | ExprKind::Index { .. } => {
                Ok(Stmt::new(StmtKind::Delete(target), pos))
            }
            _ => Err(ParseError::new(
                ErrorCode::E1007,
                format!("cannot delete `{target}`; expected `d.key` or `d[key]`"),
                target.pos,
            )),
        }
    }

    /// `name = value`.
    fn parse_simple_assignment(&mut self) -> Result<Stmt, ParseError> {
        let token = self.cursor.advance();
        let target = BindingTarget::Names(vec![token.literal.clone()]);
        let value = self.parse_assigned_value()?;
        Ok(Stmt::new(StmtKind::Assign { target, value }, token.pos()))
    }

    /// `a, b = value`, attempted speculatively.
    ///
    /// Returns `None` after rolling back when the tokens are not a name
    /// list followed by `=`; the caller then reparses them as an
    /// expression. Errors after the `=` are real and are returned.
    fn try_destructuring_assignment(&mut self) -> Option<Result<Stmt, ParseError>> {
        let snapshot = self.snapshot();
        let pos = self.cursor.current().pos();
        match self.parse_name_list() {
            Ok(names) if self.cursor.check(TokenKind::Assign) => {
                let value = self.parse_assigned_value();
                Some(value.map(|value| {
                    Stmt::new(
                        StmtKind::Assign {
                            target: BindingTarget::Names(names),
                            value,
                        },
                        pos,
                    )
                }))
            }
            _ => {
                debug!(%pos, "not a destructuring assignment; reparsing as expression");
                self.restore(snapshot);
                None
            }
        }
    }

    /// A statement starting with `{`: dictionary-destructuring assignment,
    /// dictionary literal expression, or block.
    fn parse_brace_statement(&mut self) -> Result<Stmt, ParseError> {
        let pos = self.cursor.current().pos();
        if self.closes_before_assign(TokenKind::LBrace, TokenKind::RBrace) {
            let pattern = self.parse_dict_pattern()?;
            let value = self.parse_assigned_value()?;
            return Ok(Stmt::new(
                StmtKind::Assign {
                    target: BindingTarget::Dict(pattern),
                    value,
                },
                pos,
            ));
        }
        let first = self.cursor.peek_kind();
        let second = self.cursor.peek_nth(2).kind;
        let is_dict_literal = first == TokenKind::RBrace
            || (matches!(first, TokenKind::Ident | TokenKind::Str) && second == TokenKind::Colon);
        if is_dict_literal {
            return self.parse_expression_statement();
        }
        let block = self.parse_block()?;
        Ok(Stmt::new(StmtKind::Block(block), pos))
    }

    /// Whether the bracket opened here closes right before an `=`.
    fn closes_before_assign(&self, open: TokenKind, close: TokenKind) -> bool {
        self.cursor
            .matching_close(open, close)
            .is_some_and(|end| self.cursor.kind_at(end + 1) == TokenKind::Assign)
    }

    fn parse_expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.parse_expression(Precedence::Lowest)?;
        if self.cursor.check(TokenKind::Assign) {
            return Err(ParseError::new(
                ErrorCode::E1007,
                format!("cannot assign to `{expr}`"),
                self.cursor.current().pos(),
            ));
        }
        let pos = expr.pos;
        Ok(Stmt::new(StmtKind::Expression(expr), pos))
    }

    /// `{ stmt* }`. Statement errors inside the block are recorded and the
    /// block continues after resynchronizing.
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let open = self.cursor.expect(TokenKind::LBrace)?;
        let mut block = Block {
            statements: Vec::new(),
            pos: open.pos(),
        };
        loop {
            match self.cursor.current_kind() {
                TokenKind::RBrace => {
                    self.cursor.advance();
                    return Ok(block);
                }
                TokenKind::Eof => {
                    return Err(ParseError::new(
                        ErrorCode::E1003,
                        "unclosed `{`; expected `}` before end of input",
                        open.pos(),
                    ));
                }
                TokenKind::Semicolon => {
                    self.cursor.advance();
                }
                _ => {
                    let start = self.cursor.position();
                    match self.parse_statement() {
                        Ok(stmt) => block.statements.push(stmt),
                        Err(error) => {
                            self.errors.push(error);
                            self.synchronize(start);
                        }
                    }
                }
            }
        }
    }

    /// Skip to the next statement boundary after an error in the statement
    /// that began at token index `start`.
    ///
    /// If the failed statement consumed nothing, one token is skipped so
    /// recovery makes progress. Stops before `}` (the enclosing block
    /// closes it) and before `let`, `return` and `delete`; consumes a `;`.
    pub(crate) fn synchronize(&mut self, start: usize) {
        if self.cursor.position() == start {
            self.cursor.advance();
        }
        loop {
            match self.cursor.current_kind() {
                TokenKind::Eof
                | TokenKind::RBrace
                | TokenKind::Let
                | TokenKind::Return
                | TokenKind::Delete => return,
                TokenKind::Semicolon => {
                    self.cursor.advance();
                    return;
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }
    }
}
