//! Arithmetic operations: +, -, *, /, %, even?
//!
//! Integer-only, host-native signed 64-bit semantics (wrapping on overflow).
//! The four basic operators take at least two numbers and fold left.

use super::{def_builtin, expect_number};
use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

fn fold_numbers(
    src: &str,
    args: &[Value],
    op: fn(i64, i64) -> i64,
) -> Result<Value, EvalError> {
    let mut acc = expect_number(src, args, 0)?;
    for idx in 1..args.len() {
        acc = op(acc, expect_number(src, args, idx)?);
    }
    Ok(Value::Number(acc))
}

pub fn builtin_add(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    fold_numbers("+", args, i64::wrapping_add)
}

pub fn builtin_sub(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    fold_numbers("-", args, i64::wrapping_sub)
}

pub fn builtin_mul(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    fold_numbers("*", args, i64::wrapping_mul)
}

pub fn builtin_div(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let mut acc = expect_number("/", args, 0)?;
    for idx in 1..args.len() {
        let divisor = expect_number("/", args, idx)?;
        if divisor == 0 {
            return Err(EvalError::throw_msg("/", "division by zero"));
        }
        acc = acc.wrapping_div(divisor);
    }
    Ok(Value::Number(acc))
}

pub fn builtin_mod(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let a = expect_number("%", args, 0)?;
    let b = expect_number("%", args, 1)?;
    if b == 0 {
        return Err(EvalError::throw_msg("%", "division by zero"));
    }
    Ok(Value::Number(a.wrapping_rem(b)))
}

pub fn builtin_even_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let n = expect_number("even?", args, 0)?;
    Ok(Value::bool(n % 2 == 0))
}

pub fn register(env: &Rc<Environment>) {
    def_builtin(env, "+", 2, true, builtin_add);
    def_builtin(env, "-", 2, true, builtin_sub);
    def_builtin(env, "*", 2, true, builtin_mul);
    def_builtin(env, "/", 2, true, builtin_div);
    def_builtin(env, "%", 2, false, builtin_mod);
    def_builtin(env, "even?", 1, false, builtin_even_p);
}
