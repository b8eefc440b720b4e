// ABOUTME: Process-wide symbol intern pool giving symbols pointer identity

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

thread_local! {
    /// The intern pool. Entries are never removed, so a symbol's identity is
    /// stable for the lifetime of the interpreter.
    static SYMBOL_TABLE: RefCell<HashMap<String, Symbol>> = RefCell::new(HashMap::new());
}

/// An interned symbol name. `intern` is the only constructor, so two symbols
/// with the same name always share the same allocation and equality is
/// pointer identity.
#[derive(Clone)]
pub struct Symbol(Rc<str>);

impl Symbol {
    /// Returns the unique symbol for `name`, creating it on first use.
    pub fn intern(name: &str) -> Symbol {
        SYMBOL_TABLE.with(|table| {
            let mut table = table.borrow_mut();
            if let Some(sym) = table.get(name) {
                sym.clone()
            } else {
                let sym = Symbol(Rc::from(name));
                table.insert(name.to_string(), sym.clone());
                sym
            }
        })
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Symbol) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // interning guarantees one allocation per name
        (Rc::as_ptr(&self.0) as *const u8 as usize).hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.name())
    }
}
