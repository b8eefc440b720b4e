//! Comparison operations: = and >
//!
//! `=` is the polymorphic structural equality of the language; `>` compares
//! two numbers. The remaining comparisons (<, <=, >=) are derived in the
//! prelude.

use super::{def_builtin, expect_number};
use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

pub fn builtin_eq(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::bool(args[0] == args[1]))
}

pub fn builtin_gt(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let a = expect_number(">", args, 0)?;
    let b = expect_number(">", args, 1)?;
    Ok(Value::bool(a > b))
}

pub fn register(env: &Rc<Environment>) {
    def_builtin(env, "=", 2, false, builtin_eq);
    def_builtin(env, ">", 2, false, builtin_gt);
}
