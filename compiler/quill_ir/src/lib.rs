//! Quill IR - shared data model of the Quill pipeline.
//!
//! - [`Position`]: 1-based line/column source locations
//! - [`Token`], [`TokenKind`], [`TokenList`]: lexer output
//! - [`ast`]: the syntax tree produced by the parser and walked by the evaluator
//!
//! Nothing in this crate performs work; it only defines the types the
//! lexer, parser and evaluator exchange.

pub mod ast;
mod position;
mod token;

pub use ast::{
    ArrayPattern, BindingTarget, Block, DictEntry, DictPattern, DictPatternKey, Expr, ExprKind,
    FunctionLiteral, InfixOp, KeyBinding, Param, PrefixOp, Program, Stmt, StmtKind,
};
pub use position::Position;
pub use token::{Token, TokenKind, TokenList};
