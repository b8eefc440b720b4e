// ABOUTME: The evaluator: special forms, macro expansion, application, TCO

use crate::env::Environment;
use crate::error::EvalError;
use crate::symbol::Symbol;
use crate::value::{ProcKind, Procedure, Value};
use std::rc::Rc;

/// Evaluates a form.
///
/// The body is a loop over a mutable `(form, env)` pair: tail positions (the
/// branches of `if`, the last expression of `do`, the body of `let*`, the
/// last body expression of a closure) rewrite the pair and continue instead
/// of recursing, so self-tail-recursive Lisp code runs in constant host
/// stack. Non-tail positions recurse normally.
pub fn eval(form: Value, env: Rc<Environment>) -> Result<Value, EvalError> {
    let mut form = form;
    let mut env = env;

    loop {
        // macros are expanded fully before dispatch considers the form
        form = macroexpand(form, &env)?;

        let items = match form {
            Value::Symbol(ref sym) => {
                return env.get(sym).ok_or_else(|| {
                    EvalError::Thrown(Value::string(format!(
                        "symbol binding '{}' not found",
                        sym.name()
                    )))
                });
            }
            Value::List(ref items) if !items.is_empty() => Rc::clone(items),
            // everything else, the empty list included, evaluates to itself
            other => return Ok(other),
        };

        if let Value::Symbol(head) = &items[0] {
            match head.name() {
                "def!" => return eval_def(&items[1..], &env),
                "defmacro!" => return eval_defmacro(&items[1..], &env),
                "lambda" => return eval_lambda(&items[1..], &env),
                "quote" => {
                    if items.len() != 2 {
                        return Err(EvalError::bad_syntax(format!(
                            "quote expects 1 argument, but {} were given",
                            items.len() - 1
                        )));
                    }
                    return Ok(items[1].clone());
                }
                "quasiquote" => {
                    if items.len() != 2 {
                        return Err(EvalError::bad_syntax(format!(
                            "quasiquote expects 1 argument, but {} were given",
                            items.len() - 1
                        )));
                    }
                    return eval_quasiquote(&items[1], &env);
                }
                "macroexpand" => {
                    if items.len() != 2 {
                        return Err(EvalError::bad_syntax(format!(
                            "macroexpand expects 1 argument, but {} were given",
                            items.len() - 1
                        )));
                    }
                    return macroexpand(items[1].clone(), &env);
                }
                "try*" => return eval_try(&items[1..], &env),
                "if" => {
                    if items.len() < 3 || items.len() > 4 {
                        return Err(EvalError::bad_syntax(format!(
                            "if expects 2 or 3 arguments, but {} were given",
                            items.len() - 1
                        )));
                    }
                    let cond = eval(items[1].clone(), Rc::clone(&env))?;
                    if cond.is_truthy() {
                        form = items[2].clone();
                    } else if items.len() == 4 {
                        form = items[3].clone();
                    } else {
                        return Ok(Value::Nil);
                    }
                    continue;
                }
                "do" => {
                    if items.len() < 2 {
                        return Err(EvalError::bad_syntax("do expects at least 1 argument"));
                    }
                    for expr in &items[1..items.len() - 1] {
                        eval(expr.clone(), Rc::clone(&env))?;
                    }
                    form = items[items.len() - 1].clone();
                    continue;
                }
                "let*" => {
                    let (child, body) = eval_let_bindings(&items[1..], &env)?;
                    env = child;
                    form = body;
                    continue;
                }
                _ => {}
            }
        }

        // procedure application: evaluate every element left to right
        let func = eval(items[0].clone(), Rc::clone(&env))?;
        let mut args = Vec::with_capacity(items.len() - 1);
        for item in &items[1..] {
            args.push(eval(item.clone(), Rc::clone(&env))?);
        }

        let proc = match func {
            Value::Procedure(proc) => proc,
            other => {
                return Err(EvalError::Thrown(Value::string(format!(
                    "application: expected a procedure, got {}",
                    other.type_name()
                ))));
            }
        };
        check_arity(&proc, args.len())?;

        match proc.kind() {
            ProcKind::Builtin { func, .. } => return func(&args, &env),
            ProcKind::Lambda {
                params,
                rest,
                body,
                env: captured,
            } => {
                let call_env = bind_params(params, rest.as_ref(), args, captured);
                for expr in &body[..body.len() - 1] {
                    eval(expr.clone(), Rc::clone(&call_env))?;
                }
                form = body[body.len() - 1].clone();
                env = call_env;
            }
        }
    }
}

/// Applies a procedure outside a tail position (macro expansion, `apply`,
/// `swap!`, `map`). The whole body runs on the host stack.
pub fn apply_procedure(
    proc: &Rc<Procedure>,
    args: &[Value],
    env: &Rc<Environment>,
) -> Result<Value, EvalError> {
    check_arity(proc, args.len())?;

    match proc.kind() {
        ProcKind::Builtin { func, .. } => func(args, env),
        ProcKind::Lambda {
            params,
            rest,
            body,
            env: captured,
        } => {
            let call_env = bind_params(params, rest.as_ref(), args.to_vec(), captured);
            let mut result = Value::Nil;
            for expr in body {
                result = eval(expr.clone(), Rc::clone(&call_env))?;
            }
            Ok(result)
        }
    }
}

fn check_arity(proc: &Procedure, given: usize) -> Result<(), EvalError> {
    let argc = proc.argc();
    if given < argc || (!proc.is_variadic() && given > argc) {
        return Err(EvalError::arity(
            &proc.name_for_errors(),
            argc,
            proc.is_variadic(),
            given,
        ));
    }
    Ok(())
}

/// A fresh frame per application, chained to the CAPTURED environment, not
/// the caller's. Mandatory parameters bind positionally; a rest parameter
/// collects whatever is left into a list. Arity has been checked by the
/// caller, so `args` holds at least `params.len()` values.
fn bind_params(
    params: &[Symbol],
    rest: Option<&Symbol>,
    mut args: Vec<Value>,
    captured: &Rc<Environment>,
) -> Rc<Environment> {
    let call_env = Environment::with_parent(Rc::clone(captured));

    let rest_args = args.split_off(params.len());
    for (param, arg) in params.iter().zip(args) {
        call_env.define(param.clone(), arg);
    }
    if let Some(rest_name) = rest {
        call_env.define(rest_name.clone(), Value::list(rest_args));
    }

    call_env
}

// ============================================================================
// Macro expansion
// ============================================================================

/// A form is a macro call if it is a list headed by a symbol that is bound in
/// `env` to a procedure with its macro flag set.
fn as_macro_call(form: &Value, env: &Rc<Environment>) -> Option<Rc<Procedure>> {
    let items = match form {
        Value::List(items) if !items.is_empty() => items,
        _ => return None,
    };
    let sym = match &items[0] {
        Value::Symbol(sym) => sym,
        _ => return None,
    };
    match env.get(sym) {
        Some(Value::Procedure(proc)) if proc.is_macro() => Some(proc),
        _ => None,
    }
}

/// Expands macro calls until the form is no longer one. The macro procedure
/// is applied to the UNEVALUATED rest of the form and its result replaces the
/// call site.
pub fn macroexpand(form: Value, env: &Rc<Environment>) -> Result<Value, EvalError> {
    let mut form = form;
    loop {
        let mac = match as_macro_call(&form, env) {
            Some(mac) => mac,
            None => return Ok(form),
        };
        let args = match &form {
            Value::List(items) => items[1..].to_vec(),
            _ => return Ok(form),
        };
        form = apply_procedure(&mac, &args, env)?;
    }
}

// ============================================================================
// Special forms
// ============================================================================

/// (def! sym expr): bind sym in the current environment, return the value
fn eval_def(args: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::bad_syntax(format!(
            "def! expects 2 arguments, but {} were given",
            args.len()
        )));
    }
    let sym = match &args[0] {
        Value::Symbol(sym) => sym.clone(),
        other => {
            return Err(EvalError::bad_syntax(format!(
                "def! expects a symbol as a 1st argument, but {} was given",
                other.type_name()
            )));
        }
    };

    let value = eval(args[1].clone(), Rc::clone(env))?;
    env.define(sym, value.clone());
    Ok(value)
}

/// (defmacro! sym lambda-expr): the 2nd argument must syntactically be a
/// (lambda ...) form; its value gets the macro flag before being bound
fn eval_defmacro(args: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::bad_syntax(format!(
            "defmacro! expects 2 arguments, but {} were given",
            args.len()
        )));
    }
    let sym = match &args[0] {
        Value::Symbol(sym) => sym.clone(),
        other => {
            return Err(EvalError::bad_syntax(format!(
                "defmacro!: 1st arg must be a symbol, but was {}",
                other.type_name()
            )));
        }
    };

    let is_lambda_form = match &args[1] {
        Value::List(items) => {
            matches!(items.first(), Some(Value::Symbol(head)) if head.name() == "lambda")
        }
        _ => false,
    };
    if !is_lambda_form {
        return Err(EvalError::bad_syntax(
            "defmacro!: 2nd arg must be a lambda expression",
        ));
    }

    let proc = match eval(args[1].clone(), Rc::clone(env))? {
        Value::Procedure(proc) => proc,
        _ => {
            return Err(EvalError::bad_syntax(
                "defmacro!: 2nd arg must evaluate to a procedure",
            ));
        }
    };
    proc.set_macro();
    env.define(sym, Value::Procedure(Rc::clone(&proc)));
    Ok(Value::Procedure(proc))
}

/// (lambda params body1 ... bodyk): capture the current environment
fn eval_lambda(args: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if args.len() < 2 {
        return Err(EvalError::bad_syntax("lambda: cannot have an empty body"));
    }

    let param_list = match &args[0] {
        Value::List(items) => items,
        _ => {
            return Err(EvalError::bad_syntax(
                "lambda: bad syntax at parameter declaration",
            ));
        }
    };

    let mut params = Vec::new();
    let mut rest = None;
    let mut i = 0;
    while i < param_list.len() {
        let sym = match &param_list[i] {
            Value::Symbol(sym) => sym,
            other => {
                return Err(EvalError::bad_syntax(format!(
                    "lambda: expected a list of symbols, but {} was found in the parameter list",
                    other.type_name()
                )));
            }
        };

        // '&' marks a variadic procedure: exactly one symbol must follow
        if sym.name() == "&" {
            if i + 2 != param_list.len() {
                return Err(EvalError::bad_syntax(
                    "lambda: 1 parameter expected after '&'",
                ));
            }
            match &param_list[i + 1] {
                Value::Symbol(rest_sym) => rest = Some(rest_sym.clone()),
                other => {
                    return Err(EvalError::bad_syntax(format!(
                        "lambda: expected a symbol after '&', but {} was found",
                        other.type_name()
                    )));
                }
            }
            break;
        }

        params.push(sym.clone());
        i += 1;
    }

    let body = args[1..].to_vec();
    Ok(Value::Procedure(Rc::new(Procedure::lambda(
        params,
        rest,
        body,
        Rc::clone(env),
    ))))
}

/// (let* ((sym expr) ...) body): installs the bindings in a child frame and
/// hands back (child, body) so the caller can tail-evaluate the body there.
/// Each binding expression is evaluated in the child frame, so later pairs
/// see earlier ones.
fn eval_let_bindings(
    args: &[Value],
    env: &Rc<Environment>,
) -> Result<(Rc<Environment>, Value), EvalError> {
    if args.len() != 2 {
        return Err(EvalError::bad_syntax(format!(
            "let* expects 2 arguments, but {} were given",
            args.len()
        )));
    }

    let bindings = match &args[0] {
        Value::List(items) if !items.is_empty() => items,
        Value::List(_) => {
            return Err(EvalError::bad_syntax(
                "let* expects a non-empty list of bindings",
            ));
        }
        other => {
            return Err(EvalError::bad_syntax(format!(
                "let* expects a list as a 1st argument, but {} was given",
                other.type_name()
            )));
        }
    };

    let let_env = Environment::with_parent(Rc::clone(env));
    for binding in bindings.iter() {
        let pair = match binding {
            Value::List(pair) if pair.len() == 2 => pair,
            other => {
                return Err(EvalError::bad_syntax(format!(
                    "let*: bad binding form: {}",
                    crate::printer::pr_str(other, true)
                )));
            }
        };
        let sym = match &pair[0] {
            Value::Symbol(sym) => sym.clone(),
            other => {
                return Err(EvalError::bad_syntax(format!(
                    "let*: expected a symbol to be bound, but was {}",
                    other.type_name()
                )));
            }
        };
        let value = eval(pair[1].clone(), Rc::clone(&let_env))?;
        let_env.define(sym, value);
    }

    Ok((let_env, args[1].clone()))
}

/// (try* expr (catch* sym handler)): only THROWN failures reach the handler;
/// static errors unwind past it
fn eval_try(args: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    const SHAPE: &str = "try* expects (catch* SYMBOL EXPR) as 2nd arg";

    if args.len() != 2 {
        return Err(EvalError::bad_syntax(format!(
            "try* expects 2 arguments, but {} were given",
            args.len()
        )));
    }

    let catch_list = match &args[1] {
        Value::List(items) if items.len() == 3 => items,
        _ => return Err(EvalError::bad_syntax(SHAPE)),
    };
    let catch_sym = match (&catch_list[0], &catch_list[1]) {
        (Value::Symbol(head), Value::Symbol(sym)) if head.name() == "catch*" => sym.clone(),
        _ => return Err(EvalError::bad_syntax(SHAPE)),
    };

    match eval(args[0].clone(), Rc::clone(env)) {
        Err(EvalError::Thrown(payload)) => {
            let catch_env = Environment::with_parent(Rc::clone(env));
            catch_env.define(catch_sym, payload);
            eval(catch_list[2].clone(), catch_env)
        }
        other => other,
    }
}

// ============================================================================
// Quasiquotation
// ============================================================================

fn is_splice_form(items: &[Value]) -> bool {
    matches!(items.first(), Some(Value::Symbol(sym)) if sym.name() == "splice-unquote")
}

/// Walks a quasiquoted form. Non-lists and the empty list pass through
/// unchanged; (unquote x) evaluates x; (splice-unquote x) elements evaluate x
/// and splice the resulting list into the enclosing output list.
fn eval_quasiquote(arg: &Value, env: &Rc<Environment>) -> Result<Value, EvalError> {
    let items = match arg {
        Value::List(items) if !items.is_empty() => items,
        _ => return Ok(arg.clone()),
    };

    if let Value::Symbol(sym) = &items[0] {
        if sym.name() == "unquote" {
            if items.len() != 2 {
                return Err(EvalError::bad_syntax(format!(
                    "unquote expects 1 argument, but {} were given",
                    items.len() - 1
                )));
            }
            return eval(items[1].clone(), Rc::clone(env));
        }
        // splice-unquote may only appear inside an enclosing list form
        if sym.name() == "splice-unquote" {
            return Err(EvalError::bad_syntax(
                "splice-unquote: illegal context within quasiquote (nothing to splice into)",
            ));
        }
    }

    let mut out = Vec::new();
    for item in items.iter() {
        match item {
            Value::List(inner) if is_splice_form(inner) => {
                if inner.len() != 2 {
                    return Err(EvalError::bad_syntax(format!(
                        "splice-unquote expects 1 argument, but {} were given",
                        inner.len() - 1
                    )));
                }
                match eval(inner[1].clone(), Rc::clone(env))? {
                    Value::List(spliced) => out.extend(spliced.iter().cloned()),
                    other => {
                        return Err(EvalError::bad_syntax(format!(
                            "splice-unquote: resulting value must be a list, but was {}",
                            other.type_name()
                        )));
                    }
                }
            }
            Value::List(_) => out.push(eval_quasiquote(item, env)?),
            _ => out.push(item.clone()),
        }
    }
    Ok(Value::list(out))
}
