// ABOUTME: The two failure channels of the evaluator: thrown vs static

use crate::printer::pr_str;
use crate::value::Value;
use thiserror::Error;

/// Every evaluator step returns `Result<Value, EvalError>`. The error side is
/// the exception channel of the language, split into the two disjoint kinds:
///
/// * `Thrown` carries a Lisp payload and is catchable by `try*`. Raised by
///   `(throw x)` and by builtins reporting recoverable runtime conditions
///   (bad argument types, out-of-range indices, unreadable files, arity
///   mismatches, unbound symbols).
/// * `Static` is a host-level diagnostic for syntax errors and malformed
///   special forms. It unwinds past every `try*` frame.
#[derive(Error, Debug, Clone)]
pub enum EvalError {
    #[error("exception: {}", pr_str(.0, true))]
    Thrown(Value),

    #[error("error: {0}")]
    Static(String),
}

impl EvalError {
    /// Throws a string payload prefixed with the reporting procedure's name.
    pub fn throw_msg(src: &str, message: impl AsRef<str>) -> EvalError {
        EvalError::Thrown(Value::string(format!("{}: {}", src, message.as_ref())))
    }

    /// Argument-type mismatch, thrown. `position` is zero-based.
    pub fn bad_arg(src: &str, position: usize, expected: &str, actual: &Value) -> EvalError {
        EvalError::throw_msg(
            src,
            format!(
                "bad arg no. {}: expected a {}, got {}",
                position + 1,
                expected,
                actual.type_name()
            ),
        )
    }

    /// Arity mismatch at application time, thrown.
    pub fn arity(src: &str, argc: usize, variadic: bool, given: usize) -> EvalError {
        let expected = if variadic {
            format!("at least {} argument{}", argc, plural(argc))
        } else {
            format!("{} argument{}", argc, plural(argc))
        };
        EvalError::throw_msg(src, format!("expected {}, but {} were given", expected, given))
    }

    /// Malformed source reaching the evaluator; never catchable.
    pub fn bad_syntax(message: impl AsRef<str>) -> EvalError {
        EvalError::Static(format!("bad syntax: {}", message.as_ref()))
    }

    pub fn is_thrown(&self) -> bool {
        matches!(self, EvalError::Thrown(_))
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
