//! List operations: list, empty?, count, list-ref, list-rest, nth, rest,
//! cons, concat
//!
//! Lists are immutable; every operation hands back a fresh list (or the
//! shared empty list). `nth`/`rest` are the generic spellings of
//! `list-ref`/`list-rest`.

use super::{def_builtin, expect_list, expect_number};
use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

pub fn builtin_list(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::list(args.to_vec()))
}

pub fn builtin_empty_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let list = expect_list("empty?", args, 0)?;
    Ok(Value::bool(list.is_empty()))
}

pub fn builtin_count(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let list = expect_list("count", args, 0)?;
    Ok(Value::Number(list.len() as i64))
}

fn ref_impl(src: &str, args: &[Value]) -> Result<Value, EvalError> {
    let list = expect_list(src, args, 0)?;
    let idx = expect_number(src, args, 1)?;

    if idx < 0 {
        return Err(EvalError::throw_msg(src, "expected non-negative index"));
    }
    let idx = idx as usize;
    if idx >= list.len() {
        return Err(EvalError::throw_msg(
            src,
            format!("index too large ({} >= {})", idx, list.len()),
        ));
    }
    Ok(list[idx].clone())
}

fn rest_impl(src: &str, args: &[Value]) -> Result<Value, EvalError> {
    let list = expect_list(src, args, 0)?;
    if list.is_empty() {
        return Err(EvalError::throw_msg(src, "received an empty list"));
    }
    Ok(Value::list(list[1..].to_vec()))
}

pub fn builtin_list_ref(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    ref_impl("list-ref", args)
}

pub fn builtin_list_rest(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    rest_impl("list-rest", args)
}

pub fn builtin_nth(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    ref_impl("nth", args)
}

pub fn builtin_rest(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    rest_impl("rest", args)
}

pub fn builtin_cons(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let tail = expect_list("cons", args, 1)?;

    let mut items = Vec::with_capacity(tail.len() + 1);
    items.push(args[0].clone());
    items.extend(tail.iter().cloned());
    Ok(Value::list(items))
}

pub fn builtin_concat(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let mut items = Vec::new();
    for idx in 0..args.len() {
        let list = expect_list("concat", args, idx)?;
        items.extend(list.iter().cloned());
    }
    Ok(Value::list(items))
}

pub fn register(env: &Rc<Environment>) {
    def_builtin(env, "list", 0, true, builtin_list);
    def_builtin(env, "empty?", 1, false, builtin_empty_p);
    def_builtin(env, "count", 1, false, builtin_count);
    def_builtin(env, "list-ref", 2, false, builtin_list_ref);
    def_builtin(env, "list-rest", 1, false, builtin_list_rest);
    def_builtin(env, "nth", 2, false, builtin_nth);
    def_builtin(env, "rest", 1, false, builtin_rest);
    def_builtin(env, "cons", 2, false, builtin_cons);
    def_builtin(env, "concat", 0, true, builtin_concat);
}
