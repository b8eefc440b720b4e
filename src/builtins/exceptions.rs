//! Exception values: exn, exn-datum, throw
//!
//! `exn` wraps an arbitrary payload in a first-class exception value;
//! `throw` raises any value as a catchable exception.

use super::{def_builtin, expect_exception};
use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

pub fn builtin_exn(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::Exception(Rc::new(args[0].clone())))
}

pub fn builtin_exn_datum(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let payload = expect_exception("exn-datum", args, 0)?;
    Ok((*payload).clone())
}

pub fn builtin_throw(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Err(EvalError::Thrown(args[0].clone()))
}

pub fn register(env: &Rc<Environment>) {
    def_builtin(env, "exn", 1, false, builtin_exn);
    def_builtin(env, "exn-datum", 1, false, builtin_exn_datum);
    def_builtin(env, "throw", 1, false, builtin_throw);
}
