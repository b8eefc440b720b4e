//! Atom operations: atom, deref, atom-set!, swap!
//!
//! Atoms are the only first-class mutable value: a single slot that always
//! holds a valid value and is replaced as a whole.

use super::{def_builtin, expect_atom, expect_procedure};
use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::apply_procedure;
use crate::value::Value;
use std::cell::RefCell;
use std::rc::Rc;

pub fn builtin_atom(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::Atom(Rc::new(RefCell::new(args[0].clone()))))
}

pub fn builtin_deref(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let slot = expect_atom("deref", args, 0)?;
    let value = slot.borrow().clone();
    Ok(value)
}

/// (atom-set! a v) points the atom at v and returns v
pub fn builtin_atom_set(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let slot = expect_atom("atom-set!", args, 0)?;
    *slot.borrow_mut() = args[1].clone();
    Ok(args[1].clone())
}

/// (swap! a f extra ...) applies f to the atom's value followed by the extra
/// arguments, stores the result, and returns it. The slot is untouched if the
/// application fails.
pub fn builtin_swap(args: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    let slot = expect_atom("swap!", args, 0)?;
    let proc = expect_procedure("swap!", args, 1)?;

    let mut call_args = Vec::with_capacity(args.len() - 1);
    call_args.push(slot.borrow().clone());
    call_args.extend(args[2..].iter().cloned());

    let result = apply_procedure(&proc, &call_args, env)?;
    *slot.borrow_mut() = result.clone();
    Ok(result)
}

pub fn register(env: &Rc<Environment>) {
    def_builtin(env, "atom", 1, false, builtin_atom);
    def_builtin(env, "deref", 1, false, builtin_deref);
    def_builtin(env, "atom-set!", 2, false, builtin_atom_set);
    def_builtin(env, "swap!", 2, true, builtin_swap);
}
