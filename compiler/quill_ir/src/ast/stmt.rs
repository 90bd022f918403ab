//! Statements, blocks and programs.

use super::{BindingTarget, Expr};
use crate::Position;

/// A parsed source unit.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub pos: Position,
}

impl Stmt {
    #[inline]
    pub fn new(kind: StmtKind, pos: Position) -> Self {
        Stmt { kind, pos }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// `let target = value`; binds in the current scope.
    Let { target: BindingTarget, value: Expr },
    /// `target = value`; writes to the nearest scope defining each name.
    Assign { target: BindingTarget, value: Expr },
    Return(Option<Expr>),
    Expression(Expr),
    Block(Block),
    /// `delete d.key` / `delete d[key]`
    Delete(Expr),
}

/// A `{ ... }` statement sequence.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub pos: Position,
}

impl Block {
    /// Wrap a single expression as a one-statement block (`if (c) a else b`).
    pub fn from_expr(expr: Expr) -> Self {
        let pos = expr.pos;
        Block {
            statements: vec![Stmt::new(StmtKind::Expression(expr), pos)],
            pos,
        }
    }
}
