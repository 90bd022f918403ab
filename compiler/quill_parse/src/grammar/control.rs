//! `if`, function literals and `for`.

use std::rc::Rc;

use quill_ir::{Block, Expr, ExprKind, FunctionLiteral, Param, TokenKind};

use super::Precedence;
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `if (cond) consequence [else alternative]`; each branch is a block
    /// or a single expression, and `else if` chains.
    pub(crate) fn parse_if(&mut self) -> Result<Expr, ParseError> {
        let pos = self.cursor.advance().pos();
        self.cursor.expect(TokenKind::LParen)?;
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.cursor.expect(TokenKind::RParen)?;
        let consequence = self.parse_branch()?;
        let alternative = if self.cursor.eat(TokenKind::Else) {
            Some(self.parse_branch()?)
        } else {
            None
        };
        Ok(Expr::new(
            ExprKind::If {
                condition: Box::new(condition),
                consequence,
                alternative,
            },
            pos,
        ))
    }

    /// A block, or one expression wrapped as a block.
    fn parse_branch(&mut self) -> Result<Block, ParseError> {
        if self.cursor.check(TokenKind::LBrace) {
            self.parse_block()
        } else {
            Ok(Block::from_expr(self.parse_expression(Precedence::Lowest)?))
        }
    }

    /// `fn(params) { body }`.
    pub(crate) fn parse_function_literal(&mut self) -> Result<Expr, ParseError> {
        let pos = self.cursor.advance().pos();
        self.cursor.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        while !self.cursor.check(TokenKind::RParen) {
            params.push(self.parse_param()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;
        Ok(Expr::new(
            ExprKind::Function(Rc::new(FunctionLiteral { params, body })),
            pos,
        ))
    }

    /// `for (iterable) function` or the sugared `for (x in xs) body` /
    /// `for (k, v in d) body`, which becomes a function literal.
    ///
    /// The two forms are told apart by bounded lookahead, not backtracking.
    pub(crate) fn parse_for(&mut self) -> Result<Expr, ParseError> {
        let pos = self.cursor.advance().pos();
        self.cursor.expect(TokenKind::LParen)?;

        let binding_len = self.for_binding_len();
        if binding_len == 0 {
            let iterable = self.parse_expression(Precedence::Lowest)?;
            self.cursor.expect(TokenKind::RParen)?;
            let function = self.parse_expression(Precedence::Lowest)?;
            return Ok(Expr::new(
                ExprKind::For {
                    iterable: Box::new(iterable),
                    function: Box::new(function),
                },
                pos,
            ));
        }

        let mut params = vec![Param::Ident(self.cursor.expect_ident()?)];
        if binding_len == 2 {
            self.cursor.expect(TokenKind::Comma)?;
            params.push(Param::Ident(self.cursor.expect_ident()?));
        }
        self.cursor.expect(TokenKind::In)?;
        let iterable = self.parse_expression(Precedence::Lowest)?;
        self.cursor.expect(TokenKind::RParen)?;
        let body_pos = self.cursor.current().pos();
        let body = self.parse_branch()?;
        let function = Expr::new(
            ExprKind::Function(Rc::new(FunctionLiteral { params, body })),
            body_pos,
        );
        Ok(Expr::new(
            ExprKind::For {
                iterable: Box::new(iterable),
                function: Box::new(function),
            },
            pos,
        ))
    }

    /// Number of loop variables before `in` (1 or 2), or 0 for the
    /// `for (expr) fn` form.
    fn for_binding_len(&self) -> usize {
        let kind = |n| self.cursor.peek_nth(n).kind;
        match (kind(0), kind(1), kind(2), kind(3)) {
            (TokenKind::Ident, TokenKind::In, _, _) => 1,
            (TokenKind::Ident, TokenKind::Comma, TokenKind::Ident, TokenKind::In) => 2,
            _ => 0,
        }
    }
}
