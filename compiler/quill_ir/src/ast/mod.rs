//! Syntax tree for Quill programs.
//!
//! Every node owns its children. The only shared pieces are function
//! literals and dictionary entry expressions, which sit behind `Rc` because
//! runtime closures and lazy dictionaries keep them alive after the tree
//! that produced them is dropped.

mod display;
mod operators;
mod patterns;
mod stmt;

use std::rc::Rc;

pub use operators::{InfixOp, PrefixOp};
pub use patterns::{ArrayPattern, BindingTarget, DictPattern, DictPatternKey, KeyBinding, Param};
pub use stmt::{Block, Program, Stmt, StmtKind};

use crate::Position;

/// An expression node with the position of its first token.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub pos: Position,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, pos: Position) -> Self {
        Expr { kind, pos }
    }
}

/// Expression variants.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Ident(String),
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,
    /// Backtick template, `{...}` spans expanded at evaluation time.
    Template(String),
    Regex {
        pattern: String,
        flags: String,
    },
    DateTime(String),
    Duration(String),
    Path(String),
    Url(String),
    Prefix {
        op: PrefixOp,
        operand: Box<Expr>,
    },
    Infix {
        op: InfixOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    If {
        condition: Box<Expr>,
        consequence: Block,
        alternative: Option<Block>,
    },
    Function(Rc<FunctionLiteral>),
    Call {
        function: Box<Expr>,
        args: Vec<Expr>,
    },
    Array(Vec<Expr>),
    /// Dictionary literal; values stay unevaluated until read.
    Dict(Vec<DictEntry>),
    Dot {
        object: Box<Expr>,
        property: String,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    Slice {
        object: Box<Expr>,
        start: Option<Box<Expr>>,
        end: Option<Box<Expr>>,
    },
    /// `for(iterable) function`; the `for(x in xs) {..}` form is
    /// desugared into a function literal by the parser.
    For {
        iterable: Box<Expr>,
        function: Box<Expr>,
    },
    /// `<name attrs />`; attributes are kept raw and interpolated on use.
    TagSingleton {
        name: String,
        attrs: String,
    },
    /// `<name attrs>children</name>`; `name` is empty for `<>...</>`.
    TagPair {
        name: String,
        attrs: String,
        children: Vec<Expr>,
    },
    /// Literal text between tags.
    Text(String),
}

/// A function literal: parameters and body.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionLiteral {
    pub params: Vec<Param>,
    pub body: Block,
}

/// One `key: value` pair of a dictionary literal.
#[derive(Clone, Debug, PartialEq)]
pub struct DictEntry {
    pub key: String,
    pub value: Rc<Expr>,
}

#[cfg(test)]
mod tests;
