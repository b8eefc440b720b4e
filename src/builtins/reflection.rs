//! Introspection hooks: arity, type, env, refc, addr
//!
//! `refc` and `addr` expose the host representation for debugging; their
//! output is implementation-defined.

use super::{def_builtin, expect_procedure};
use crate::env::Environment;
use crate::error::EvalError;
use crate::symbol::Symbol;
use crate::value::Value;
use std::rc::Rc;

/// (arity f) -> (mandatory-count variadic?)
pub fn builtin_arity(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let proc = expect_procedure("arity", args, 0)?;
    Ok(Value::list(vec![
        Value::Number(proc.argc() as i64),
        Value::bool(proc.is_variadic()),
    ]))
}

/// (type v) -> symbol naming the variant
pub fn builtin_type(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::Symbol(Symbol::intern(args[0].type_name())))
}

/// (env) -> list of (sym value) pairs bound in the enclosing frame
pub fn builtin_env(_args: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    let pairs = env
        .local_bindings()
        .into_iter()
        .map(|(sym, value)| Value::list(vec![Value::Symbol(sym), value]))
        .collect();
    Ok(Value::list(pairs))
}

/// Strong count of the argument's handle, minus the one held by the argument
/// vector itself. Immediate variants report 1.
pub fn builtin_refc(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let count = match &args[0] {
        Value::List(rc) => Rc::strong_count(rc),
        Value::String(rc) => Rc::strong_count(rc),
        Value::Procedure(rc) => Rc::strong_count(rc),
        Value::Atom(rc) => Rc::strong_count(rc),
        Value::Exception(rc) => Rc::strong_count(rc),
        Value::Symbol(_) | Value::Number(_) | Value::Nil | Value::True | Value::False => 2,
    };
    Ok(Value::Number(count as i64 - 1))
}

/// Address of the heap allocation behind the value, as a string.
pub fn builtin_addr(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let addr = match &args[0] {
        Value::List(rc) => format!("{:p}", Rc::as_ptr(rc)),
        Value::String(rc) => format!("{:p}", rc.as_ptr()),
        Value::Procedure(rc) => format!("{:p}", Rc::as_ptr(rc)),
        Value::Atom(rc) => format!("{:p}", Rc::as_ptr(rc)),
        Value::Exception(rc) => format!("{:p}", Rc::as_ptr(rc)),
        Value::Symbol(sym) => format!("{:p}", sym.name().as_ptr()),
        Value::Number(_) | Value::Nil | Value::True | Value::False => "#<inline>".to_string(),
    };
    Ok(Value::string(addr))
}

pub fn register(env: &Rc<Environment>) {
    def_builtin(env, "arity", 1, false, builtin_arity);
    def_builtin(env, "type", 1, false, builtin_type);
    def_builtin(env, "env", 0, false, builtin_env);
    def_builtin(env, "refc", 1, false, builtin_refc);
    def_builtin(env, "addr", 1, false, builtin_addr);
}
