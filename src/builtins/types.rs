//! Type predicates and the symbol constructor: number?, symbol?, string?,
//! true?, false?, list?, procedure?, builtin?, macro?, atom?, exn?, symbol
//!
//! Each predicate takes one argument and answers with the True/False
//! singletons. `symbol` turns a string into an interned symbol.

use super::{def_builtin, expect_procedure, expect_string};
use crate::env::Environment;
use crate::error::EvalError;
use crate::symbol::Symbol;
use crate::value::Value;
use std::rc::Rc;

/// (symbol "name") -> the interned symbol for that name
pub fn builtin_symbol(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let name = expect_string("symbol", args, 0)?;
    Ok(Value::Symbol(Symbol::intern(&name)))
}

pub fn builtin_number_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::bool(matches!(args[0], Value::Number(_))))
}

pub fn builtin_symbol_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::bool(matches!(args[0], Value::Symbol(_))))
}

pub fn builtin_string_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::bool(matches!(args[0], Value::String(_))))
}

pub fn builtin_true_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::bool(matches!(args[0], Value::True)))
}

pub fn builtin_false_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::bool(matches!(args[0], Value::False)))
}

pub fn builtin_list_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::bool(matches!(args[0], Value::List(_))))
}

pub fn builtin_procedure_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::bool(matches!(args[0], Value::Procedure(_))))
}

/// builtin? requires a procedure argument
pub fn builtin_builtin_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let proc = expect_procedure("builtin?", args, 0)?;
    Ok(Value::bool(proc.is_builtin()))
}

/// macro? answers false for anything that is not a procedure
pub fn builtin_macro_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::bool(
        matches!(&args[0], Value::Procedure(proc) if proc.is_macro()),
    ))
}

pub fn builtin_atom_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::bool(matches!(args[0], Value::Atom(_))))
}

pub fn builtin_exn_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::bool(matches!(args[0], Value::Exception(_))))
}

pub fn register(env: &Rc<Environment>) {
    def_builtin(env, "symbol", 1, false, builtin_symbol);
    def_builtin(env, "number?", 1, false, builtin_number_p);
    def_builtin(env, "symbol?", 1, false, builtin_symbol_p);
    def_builtin(env, "string?", 1, false, builtin_string_p);
    def_builtin(env, "true?", 1, false, builtin_true_p);
    def_builtin(env, "false?", 1, false, builtin_false_p);
    def_builtin(env, "list?", 1, false, builtin_list_p);
    def_builtin(env, "procedure?", 1, false, builtin_procedure_p);
    def_builtin(env, "builtin?", 1, false, builtin_builtin_p);
    def_builtin(env, "macro?", 1, false, builtin_macro_p);
    def_builtin(env, "atom?", 1, false, builtin_atom_p);
    def_builtin(env, "exn?", 1, false, builtin_exn_p);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;
    use crate::value::Procedure;
    use std::cell::RefCell;

    fn env() -> Rc<Environment> {
        Environment::new()
    }

    #[test]
    fn test_symbol_constructor_interns() {
        let root = env();
        let result = builtin_symbol(&[Value::string("abc")], &root).unwrap();
        assert_eq!(result, Value::Symbol(Symbol::intern("abc")));
        assert!(builtin_symbol(&[Value::Number(1)], &root).is_err());
    }

    #[test]
    fn test_simple_predicates() {
        assert_eq!(
            builtin_number_p(&[Value::Number(1)], &env()).unwrap(),
            Value::True
        );
        assert_eq!(
            builtin_number_p(&[Value::string("1")], &env()).unwrap(),
            Value::False
        );
        assert_eq!(
            builtin_symbol_p(&[Value::Symbol(Symbol::intern("s"))], &env()).unwrap(),
            Value::True
        );
        assert_eq!(
            builtin_list_p(&[Value::empty_list()], &env()).unwrap(),
            Value::True
        );
        assert_eq!(builtin_list_p(&[Value::Nil], &env()).unwrap(), Value::False);
        assert_eq!(builtin_true_p(&[Value::True], &env()).unwrap(), Value::True);
        assert_eq!(
            builtin_true_p(&[Value::Number(1)], &env()).unwrap(),
            Value::False
        );
        assert_eq!(
            builtin_false_p(&[Value::False], &env()).unwrap(),
            Value::True
        );
    }

    #[test]
    fn test_procedure_predicates() {
        let root = env();
        let lambda = Value::Procedure(Rc::new(Procedure::lambda(
            vec![],
            None,
            vec![Value::Nil],
            root.clone(),
        )));

        assert_eq!(
            builtin_procedure_p(&[lambda.clone()], &root).unwrap(),
            Value::True
        );
        assert_eq!(
            builtin_builtin_p(&[lambda.clone()], &root).unwrap(),
            Value::False
        );
        assert_eq!(builtin_macro_p(&[lambda.clone()], &root).unwrap(), Value::False);

        if let Value::Procedure(proc) = &lambda {
            proc.set_macro();
        }
        assert_eq!(builtin_macro_p(&[lambda], &root).unwrap(), Value::True);

        // macro? tolerates non-procedures, builtin? does not
        assert_eq!(builtin_macro_p(&[Value::Nil], &root).unwrap(), Value::False);
        assert!(builtin_builtin_p(&[Value::Nil], &root).is_err());
    }

    #[test]
    fn test_atom_and_exn_predicates() {
        let root = env();
        let atom = Value::Atom(Rc::new(RefCell::new(Value::Nil)));
        let exn = Value::Exception(Rc::new(Value::Number(1)));

        assert_eq!(builtin_atom_p(&[atom], &root).unwrap(), Value::True);
        assert_eq!(builtin_atom_p(&[Value::Nil], &root).unwrap(), Value::False);
        assert_eq!(builtin_exn_p(&[exn], &root).unwrap(), Value::True);
        assert_eq!(builtin_exn_p(&[Value::Nil], &root).unwrap(), Value::False);
    }
}
