mod builtins;
mod config;
mod env;
mod error;
mod eval;
mod printer;
mod reader;
mod symbol;
mod value;

use builtins::register_builtins;
use clap::Parser;
use env::Environment;
use error::EvalError;
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use symbol::Symbol;
use value::Value;

/// A MAL-tradition Lisp interpreter
#[derive(Parser, Debug)]
#[command(name = "mal-lisp")]
#[command(version)]
#[command(about = "A MAL-tradition Lisp interpreter with TCO, macros, and a REPL")]
struct CliArgs {
    /// Script file to execute (optional - if not provided, starts REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,

    /// Prelude file evaluated at startup
    #[arg(long = "prelude", value_name = "PATH", default_value = config::DEFAULT_PRELUDE)]
    prelude: PathBuf,

    /// Skip loading the prelude
    #[arg(long = "no-prelude")]
    no_prelude: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let env = Environment::new();
    register_builtins(&env);

    // a broken bootstrap or prelude is fatal: exit non-zero before the REPL
    bootstrap(config::LOAD_FILE_DEF, &env)
        .map_err(|e| format!("failed to install load-file: {}", e))?;

    if !args.no_prelude {
        load_file(&args.prelude, &env).map_err(|e| {
            format!("failed to load prelude {}: {}", args.prelude.display(), e)
        })?;
    }

    if let Some(script) = args.script {
        load_file(&script, &env).map_err(|e| format!("{}: {}", script.display(), e))?;
        return Ok(());
    }

    repl(&env)
}

/// Read and evaluate one bootstrap form
fn bootstrap(src: &str, env: &Rc<Environment>) -> Result<Value, EvalError> {
    let form = reader::read_str(src)?
        .ok_or_else(|| EvalError::bad_syntax("empty bootstrap form"))?;
    eval::eval(form, Rc::clone(env))
}

/// Run a file through the `load-file` procedure installed by `bootstrap`
fn load_file(path: &Path, env: &Rc<Environment>) -> Result<Value, EvalError> {
    let call = Value::list(vec![
        Value::Symbol(Symbol::intern("load-file")),
        Value::string(path.to_string_lossy()),
    ]);
    eval::eval(call, Rc::clone(env))
}

/// The interactive loop: one form per non-empty line, history persisted
/// across sessions, EOF exits cleanly.
fn repl(env: &Rc<Environment>) -> Result<(), Box<dyn std::error::Error>> {
    let rl_config = Config::builder().auto_add_history(true).build();
    let mut rl = DefaultEditor::with_config(rl_config)
        .map_err(|e| format!("failed to initialize REPL: {}", e))?;
    let _ = rl.load_history(config::HISTORY_FILE);

    loop {
        match rl.readline(config::PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                rep(&line, env);
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(config::HISTORY_FILE);
    Ok(())
}

/// read -> eval -> print; failures of either channel keep the session alive
fn rep(line: &str, env: &Rc<Environment>) {
    match reader::read_str(line) {
        Ok(Some(form)) => match eval::eval(form, Rc::clone(env)) {
            Ok(value) => println!("{}", printer::pr_str(&value, true)),
            Err(err) => eprintln!("{}", err),
        },
        Ok(None) => {}
        Err(err) => eprintln!("{}", err),
    }
}
