//! Tree-walking interpreter for Quill.
//!
//! Dispatch is one exhaustive `match` per node kind. Runtime errors travel
//! as `Err` and `?` propagates them; `return` travels as an
//! [`Object::ReturnValue`] that blocks pass upward untouched and function
//! application unwraps.
//!
//! - `expr`: expressions, indexing, `for`, calls
//! - `call`: function application and mapping
//! - `destructure`: `let`/assignment targets and parameter patterns
//! - `render`: dictionary reads and value stringification
//! - `template`: backtick templates and pipeline re-entry
//! - `tags`: markup rendering and component calls

mod builder;
mod call;
mod destructure;
mod expr;
mod render;
mod tags;
mod template;

pub use builder::InterpreterBuilder;
pub(crate) use destructure::BindMode;

use std::cell::Cell;

use quill_ir::{Block, Program, Stmt, StmtKind};

use crate::environment::ScopeTracker;
use crate::errors::{type_mismatch, EvalResult};
use crate::print_handler::SharedPrintHandler;
use crate::{Environment, Object};

/// Default limit on nested function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;

/// Evaluator state shared by one run.
///
/// Everything the evaluator mutates lives in environments, so evaluation
/// takes `&self`; only the call depth counter needs interior mutability.
///
/// The interpreter owns its global scope and every scope it creates.
/// Dropping it empties them, so functions and dictionaries that outlive
/// their interpreter no longer see the names they captured.
pub struct Interpreter {
    env: Environment,
    print_handler: SharedPrintHandler,
    max_call_depth: usize,
    call_depth: Cell<usize>,
    scopes: ScopeTracker,
}

impl Drop for Interpreter {
    fn drop(&mut self) {
        self.scopes.release();
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        InterpreterBuilder::new().build()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter::default()
    }

    /// The global scope programs run in by default.
    #[inline]
    pub fn env(&self) -> &Environment {
        &self.env
    }

    #[inline]
    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Run `program` in the global scope.
    pub fn eval_program(&self, program: &Program) -> EvalResult {
        self.eval_program_in(program, &self.env)
    }

    /// Run `program` in `env`. The value is that of the last statement; a
    /// top-level `return` ends the program with its value.
    pub fn eval_program_in(&self, program: &Program, env: &Environment) -> EvalResult {
        let mut result = Object::Null;
        for stmt in &program.statements {
            match self.eval_stmt(stmt, env)? {
                Object::ReturnValue(value) => return Ok(*value),
                value => result = value,
            }
        }
        Ok(result)
    }

    /// Statements of a block in `env`. A `ReturnValue` stops the block and
    /// is passed up still wrapped.
    pub(crate) fn eval_block(&self, block: &Block, env: &Environment) -> EvalResult {
        let mut result = Object::Null;
        for stmt in &block.statements {
            result = self.eval_stmt(stmt, env)?;
            if matches!(result, Object::ReturnValue(_)) {
                return Ok(result);
            }
        }
        Ok(result)
    }

    fn eval_stmt(&self, stmt: &Stmt, env: &Environment) -> EvalResult {
        tracing::trace!(line = stmt.pos.line, "statement");
        match &stmt.kind {
            StmtKind::Let { target, value } => {
                let value = self.eval_expr(value, env)?;
                self.bind_target(target, value, env, BindMode::Set)
                    .map_err(|e| e.at(stmt.pos))?;
                Ok(Object::Null)
            }
            StmtKind::Assign { target, value } => {
                let value = self.eval_expr(value, env)?;
                self.bind_target(target, value, env, BindMode::Update)
                    .map_err(|e| e.at(stmt.pos))?;
                Ok(Object::Null)
            }
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr, env)?,
                    None => Object::Null,
                };
                Ok(Object::ReturnValue(Box::new(value)))
            }
            StmtKind::Expression(expr) => self.eval_expr(expr, env),
            StmtKind::Block(block) => self.eval_block(block, &self.scopes.child_of(env)),
            StmtKind::Delete(target) => {
                self.eval_delete(target, env).map_err(|e| e.at(stmt.pos))?;
                Ok(Object::Null)
            }
        }
    }

    /// `delete d.key` / `delete d[key]`.
    fn eval_delete(
        &self,
        target: &quill_ir::Expr,
        env: &Environment,
    ) -> Result<(), crate::EvalError> {
        use quill_ir::ExprKind;

        let (object, key) = match &target.kind {
            ExprKind::Dot { object, property } => (self.eval_expr(object, env)?, property.clone()),
            ExprKind::Index { object, index } => {
                let object = self.eval_expr(object, env)?;
                let key = match self.eval_expr(index, env)? {
                    Object::String(key) => key,
                    Object::Integer(n) => n.to_string(),
                    other => {
                        return Err(type_mismatch(format!(
                            "dictionary keys are strings, got {}",
                            other.type_name()
                        )))
                    }
                };
                (object, key)
            }
            _ => return Err(type_mismatch("can only delete dictionary entries")),
        };
        match object {
            Object::Dict(dict) => {
                dict.remove(&key);
                Ok(())
            }
            other => Err(type_mismatch(format!(
                "cannot delete from {}",
                other.type_name()
            ))),
        }
    }
}
