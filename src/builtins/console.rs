//! Printing builtins: prn, pr-str, str, println
//!
//! `prn`/`pr-str` use readable mode (strings re-escaped), `println`/`str`
//! display mode. The printing pair joins with spaces; `str` concatenates.

use super::def_builtin;
use crate::env::Environment;
use crate::error::EvalError;
use crate::printer::pr_seq;
use crate::value::Value;
use std::rc::Rc;

pub fn builtin_prn(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    if !args.is_empty() {
        println!("{}", pr_seq(args, true, " "));
    }
    Ok(Value::Nil)
}

pub fn builtin_pr_str(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::string(pr_seq(args, true, " ")))
}

pub fn builtin_str(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::string(pr_seq(args, false, "")))
}

pub fn builtin_println(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    if !args.is_empty() {
        println!("{}", pr_seq(args, false, " "));
    }
    Ok(Value::Nil)
}

pub fn register(env: &Rc<Environment>) {
    def_builtin(env, "prn", 0, true, builtin_prn);
    def_builtin(env, "pr-str", 0, true, builtin_pr_str);
    def_builtin(env, "str", 0, true, builtin_str);
    def_builtin(env, "println", 0, true, builtin_println);
}
