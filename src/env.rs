// ABOUTME: Lexical environments: hashtable bindings with a parent chain

use crate::symbol::Symbol;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A binding frame. Lookups walk the parent chain; definitions stay local.
/// Closures hold a strong `Rc` to their defining frame, which keeps the whole
/// chain up to the root alive for as long as the closure is reachable.
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<Symbol, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a root environment with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Creates a child environment chained to `parent`.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    /// Installs or replaces a binding in THIS frame only.
    ///
    /// If the value is a procedure that has not been named yet, it takes the
    /// binding's name; this happens once, the first binding wins.
    pub fn define(&self, name: Symbol, value: Value) {
        if let Value::Procedure(proc) = &value {
            proc.set_name(name.clone());
        }
        self.bindings.borrow_mut().insert(name, value);
    }

    /// Looks a symbol up in this frame and then the parent chain.
    pub fn get(&self, name: &Symbol) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }

        if let Some(ref parent) = self.parent {
            return parent.get(name);
        }

        None
    }

    /// Walks the parent chain to the root frame (the `eval` builtin always
    /// evaluates there, regardless of the caller's scope).
    pub fn root(self: &Rc<Self>) -> Rc<Environment> {
        let mut env = Rc::clone(self);
        while let Some(parent) = env.parent.clone() {
            env = parent;
        }
        env
    }

    /// A snapshot of the bindings of THIS frame, for the `env` builtin.
    pub fn local_bindings(&self) -> Vec<(Symbol, Value)> {
        self.bindings
            .borrow()
            .iter()
            .map(|(sym, value)| (sym.clone(), value.clone()))
            .collect()
    }
}
