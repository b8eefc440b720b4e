// ABOUTME: Constants for the REPL prompt, history and bootstrap

pub const PROMPT: &str = "user> ";
pub const HISTORY_FILE: &str = ".mal_history";
pub const DEFAULT_PRELUDE: &str = "lisp/core.lisp";

/// The `load-file` bootstrap, evaluated before the prelude. The closing paren
/// of the `do` sits on its own line in case a file ends with a comment that
/// has no trailing newline.
pub const LOAD_FILE_DEF: &str = r#"(def! load-file
  (lambda (path)
    (eval (read-string (str "(do " (slurp path) "\n)")))
    (println "loaded file" path) nil))"#;
