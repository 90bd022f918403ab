//! Grammar rules, split by construct.
//!
//! - `stmt.rs`: statements, blocks and error recovery
//! - `expr.rs`: the Pratt loop, prefix and infix handlers
//! - `control.rs`: `if`, `fn` and `for`
//! - `patterns.rs`: parameter and destructuring patterns
//! - `tags.rs`: markup tags
//! - `precedence.rs`: binding powers

mod control;
mod expr;
mod patterns;
mod precedence;
mod stmt;
mod tags;

pub(crate) use precedence::Precedence;
