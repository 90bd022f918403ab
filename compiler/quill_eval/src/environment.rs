//! Lexical scopes.
//!
//! A scope is shared by every closure created inside it and by every child
//! scope, so scopes are reference counted and mutated through a `RefCell`.
//! The evaluator is single-threaded; nothing here is `Send`.
//!
//! A closure or dictionary bound in a scope it captured is an `Rc` cycle.
//! Every such cycle runs through some scope's bindings, so the interpreter
//! records each scope it creates in a [`ScopeTracker`] and empties them all
//! when it is dropped. Scopes that nothing captured are freed as soon as
//! their call or block ends, as usual.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

use crate::Object;

#[derive(Default)]
struct Scope {
    bindings: FxHashMap<String, Object>,
    parent: Option<Environment>,
}

/// Handle to one scope in a chain.
#[derive(Clone, Default)]
pub struct Environment(Rc<RefCell<Scope>>);

impl Environment {
    /// A fresh root scope.
    pub fn new() -> Self {
        Environment::default()
    }

    /// A new child scope whose parent is `self`.
    #[must_use]
    pub fn enclosed(&self) -> Self {
        Environment(Rc::new(RefCell::new(Scope {
            bindings: FxHashMap::default(),
            parent: Some(self.clone()),
        })))
    }

    /// Look `name` up, innermost scope first.
    pub fn get(&self, name: &str) -> Option<Object> {
        let mut scope = self.clone();
        loop {
            let parent = {
                let inner = scope.0.borrow();
                if let Some(value) = inner.bindings.get(name) {
                    return Some(value.clone());
                }
                inner.parent.clone()
            };
            scope = parent?;
        }
    }

    /// Bind `name` in this scope, shadowing any outer binding.
    pub fn set(&self, name: impl Into<String>, value: Object) {
        self.0.borrow_mut().bindings.insert(name.into(), value);
    }

    /// Overwrite `name` in the nearest scope that defines it, or bind it
    /// here if no scope does.
    pub fn update(&self, name: &str, value: Object) {
        let mut scope = self.clone();
        loop {
            let parent = {
                let mut inner = scope.0.borrow_mut();
                if let Some(slot) = inner.bindings.get_mut(name) {
                    *slot = value;
                    return;
                }
                inner.parent.clone()
            };
            match parent {
                Some(parent) => scope = parent,
                None => break,
            }
        }
        self.set(name, value);
    }

    /// Names bound directly in this scope, sorted.
    pub fn local_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.borrow().bindings.keys().cloned().collect();
        names.sort();
        names
    }

    /// Drop every binding in this scope. Values released here may own
    /// other scopes, so they are dropped after the borrow ends.
    pub fn clear(&self) {
        let bindings = std::mem::take(&mut self.0.borrow_mut().bindings);
        drop(bindings);
    }

    fn downgrade(&self) -> Weak<RefCell<Scope>> {
        Rc::downgrade(&self.0)
    }
}

/// Weak references to every scope one interpreter owns.
///
/// Dead entries are pruned whenever the list doubles past its last live
/// size, so a long run of calls does not grow it without bound.
#[derive(Default)]
pub(crate) struct ScopeTracker {
    scopes: RefCell<Vec<Weak<RefCell<Scope>>>>,
    prune_at: Cell<usize>,
}

impl ScopeTracker {
    const MIN_PRUNE: usize = 64;

    /// Take ownership of `env`: it is cleared when the tracker releases.
    pub(crate) fn adopt(&self, env: &Environment) {
        let mut scopes = self.scopes.borrow_mut();
        scopes.push(env.downgrade());
        if scopes.len() >= self.prune_at.get().max(Self::MIN_PRUNE) {
            scopes.retain(|scope| scope.strong_count() > 0);
            self.prune_at.set(scopes.len() * 2);
        }
    }

    /// A new child of `parent`, owned by this tracker.
    pub(crate) fn child_of(&self, parent: &Environment) -> Environment {
        let child = parent.enclosed();
        self.adopt(&child);
        child
    }

    #[cfg(test)]
    pub(crate) fn live(&self) -> usize {
        self.scopes
            .borrow()
            .iter()
            .filter(|scope| scope.strong_count() > 0)
            .count()
    }

    /// Empty every live scope, breaking the cycles that keep them alive.
    pub(crate) fn release(&self) {
        let live: Vec<Environment> = self
            .scopes
            .take()
            .iter()
            .filter_map(Weak::upgrade)
            .map(Environment)
            .collect();
        for env in &live {
            env.clear();
        }
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("names", &self.local_names())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
