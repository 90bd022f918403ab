//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use std::cell::Cell;

use super::{Interpreter, DEFAULT_MAX_CALL_DEPTH};
use crate::environment::ScopeTracker;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::Environment;

/// Builder for [`Interpreter`].
///
/// Defaults: stdout printing, a call depth limit of
/// [`DEFAULT_MAX_CALL_DEPTH`], and a fresh global scope.
#[derive(Default)]
pub struct InterpreterBuilder {
    env: Option<Environment>,
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: Option<usize>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder::default()
    }

    /// Set the global environment. The interpreter takes ownership of the
    /// scope and clears it when dropped.
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Set where `print` writes.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Set the maximum depth of nested function calls.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    pub fn build(self) -> Interpreter {
        let env = self.env.unwrap_or_default();
        let scopes = ScopeTracker::default();
        scopes.adopt(&env);
        Interpreter {
            env,
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            max_call_depth: self.max_call_depth.unwrap_or(DEFAULT_MAX_CALL_DEPTH),
            call_depth: Cell::new(0),
            scopes,
        }
    }
}
