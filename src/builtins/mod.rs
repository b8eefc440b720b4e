//! # Core builtins
//!
//! The primitive procedures bound in the root environment, organized by
//! category:
//!
//! - **[arithmetic]**: +, -, *, /, %, even? - Integer operations
//! - **[comparison]**: =, > - Structural and numeric comparison
//! - **[types]**: symbol, number?, symbol?, string?, true?, false?, list?,
//!   procedure?, builtin?, macro?, atom?, exn? - Type predicates and the
//!   symbol constructor
//! - **[lists]**: list, empty?, count, list-ref, list-rest, nth, rest,
//!   cons, concat - List construction and access
//! - **[atoms]**: atom, deref, atom-set!, swap! - Mutable cells
//! - **[exceptions]**: exn, exn-datum, throw - The throwable side of the world
//! - **[console]**: prn, pr-str, str, println - Printing
//! - **[meta]**: read-string, slurp, eval, apply, map - Metaprogramming and I/O
//! - **[reflection]**: arity, type, env, refc, addr - Introspection hooks
//!
//! Each category registers its own bindings; `register_builtins` wires up the
//! whole root environment, singletons included.

use crate::env::Environment;
use crate::error::EvalError;
use crate::symbol::Symbol;
use crate::value::{BuiltinFn, Procedure, Value};
use std::cell::RefCell;
use std::rc::Rc;

pub mod arithmetic;
pub mod atoms;
pub mod comparison;
pub mod console;
pub mod exceptions;
pub mod lists;
pub mod meta;
pub mod reflection;
pub mod types;

/// Register all built-in procedures and the singleton bindings in `env`
/// (normally the root environment).
pub fn register_builtins(env: &Rc<Environment>) {
    env.define(Symbol::intern("nil"), Value::Nil);
    env.define(Symbol::intern("true"), Value::True);
    env.define(Symbol::intern("false"), Value::False);

    arithmetic::register(env);
    comparison::register(env);
    types::register(env);
    lists::register(env);
    atoms::register(env);
    exceptions::register(env);
    console::register(env);
    meta::register(env);
    reflection::register(env);
}

/// Binds a primitive under `name` with its declared arity.
pub(crate) fn def_builtin(
    env: &Rc<Environment>,
    name: &str,
    argc: usize,
    variadic: bool,
    func: BuiltinFn,
) {
    let sym = Symbol::intern(name);
    env.define(
        sym.clone(),
        Value::Procedure(Rc::new(Procedure::builtin(sym, argc, variadic, func))),
    );
}

// ============================================================================
// Argument checking
//
// Type failures are thrown, so user code can recover with try*.
// ============================================================================

pub(crate) fn expect_number(src: &str, args: &[Value], idx: usize) -> Result<i64, EvalError> {
    match &args[idx] {
        Value::Number(n) => Ok(*n),
        other => Err(EvalError::bad_arg(src, idx, "NUMBER", other)),
    }
}

pub(crate) fn expect_string(src: &str, args: &[Value], idx: usize) -> Result<Rc<str>, EvalError> {
    match &args[idx] {
        Value::String(s) => Ok(Rc::clone(s)),
        other => Err(EvalError::bad_arg(src, idx, "STRING", other)),
    }
}

pub(crate) fn expect_list(
    src: &str,
    args: &[Value],
    idx: usize,
) -> Result<Rc<Vec<Value>>, EvalError> {
    match &args[idx] {
        Value::List(items) => Ok(Rc::clone(items)),
        other => Err(EvalError::bad_arg(src, idx, "LIST", other)),
    }
}

pub(crate) fn expect_procedure(
    src: &str,
    args: &[Value],
    idx: usize,
) -> Result<Rc<Procedure>, EvalError> {
    match &args[idx] {
        Value::Procedure(proc) => Ok(Rc::clone(proc)),
        other => Err(EvalError::bad_arg(src, idx, "PROCEDURE", other)),
    }
}

pub(crate) fn expect_atom(
    src: &str,
    args: &[Value],
    idx: usize,
) -> Result<Rc<RefCell<Value>>, EvalError> {
    match &args[idx] {
        Value::Atom(slot) => Ok(Rc::clone(slot)),
        other => Err(EvalError::bad_arg(src, idx, "ATOM", other)),
    }
}

pub(crate) fn expect_exception(
    src: &str,
    args: &[Value],
    idx: usize,
) -> Result<Rc<Value>, EvalError> {
    match &args[idx] {
        Value::Exception(payload) => Ok(Rc::clone(payload)),
        other => Err(EvalError::bad_arg(src, idx, "EXCEPTION", other)),
    }
}
