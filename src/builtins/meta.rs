//! Metaprogramming and file I/O: read-string, slurp, eval, apply, map
//!
//! `eval` always evaluates in the root environment, whatever the caller's
//! scope; this is what makes the `load-file` bootstrap install its
//! definitions globally.

use super::{def_builtin, expect_list, expect_procedure, expect_string};
use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::apply_procedure;
use crate::reader::read_str;
use crate::value::Value;
use std::rc::Rc;

pub fn builtin_read_string(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let src = expect_string("read-string", args, 0)?;
    match read_str(&src)? {
        Some(form) => Ok(form),
        None => Err(EvalError::bad_syntax("read-string: no form in input")),
    }
}

pub fn builtin_slurp(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let path = expect_string("slurp", args, 0)?;
    std::fs::read_to_string(&*path)
        .map(Value::string)
        .map_err(|_| EvalError::throw_msg("slurp", format!("can't read file {}", path)))
}

pub fn builtin_eval(args: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    crate::eval::eval(args[0].clone(), env.root())
}

/// (apply f a b '(c d)) == (f a b c d)
pub fn builtin_apply(args: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    let proc = expect_procedure("apply", args, 0)?;
    let last = args.len() - 1;
    let list = expect_list("apply", args, last)?;

    let mut call_args = args[1..last].to_vec();
    call_args.extend(list.iter().cloned());
    apply_procedure(&proc, &call_args, env)
}

pub fn builtin_map(args: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    let proc = expect_procedure("map", args, 0)?;
    let list = expect_list("map", args, 1)?;

    let mut out = Vec::with_capacity(list.len());
    for item in list.iter() {
        out.push(apply_procedure(&proc, &[item.clone()], env)?);
    }
    Ok(Value::list(out))
}

pub fn register(env: &Rc<Environment>) {
    def_builtin(env, "read-string", 1, false, builtin_read_string);
    def_builtin(env, "slurp", 1, false, builtin_slurp);
    def_builtin(env, "eval", 1, false, builtin_eval);
    def_builtin(env, "apply", 2, true, builtin_apply);
    def_builtin(env, "map", 2, false, builtin_map);
}
