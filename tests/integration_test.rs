// ABOUTME: End-to-end tests driving source text through reader, evaluator, printer

use mal_lisp::builtins::register_builtins;
use mal_lisp::env::Environment;
use mal_lisp::error::EvalError;
use mal_lisp::eval::eval;
use mal_lisp::printer::pr_str;
use mal_lisp::reader::read_str;
use mal_lisp::value::Value;
use std::rc::Rc;

/// Root environment with builtins, singletons, and the prelude loaded
fn setup() -> Rc<Environment> {
    let env = Environment::new();
    register_builtins(&env);

    let prelude = include_str!("../lisp/core.lisp");
    let wrapped = format!("(do {}\n)", prelude);
    let form = read_str(&wrapped)
        .expect("prelude must be readable")
        .expect("prelude must contain forms");
    eval(form, env.clone()).expect("prelude must load");

    env
}

fn run(env: &Rc<Environment>, src: &str) -> Result<Value, EvalError> {
    let form = read_str(src).expect("read error").expect("expected a form");
    eval(form, Rc::clone(env))
}

/// source -> printed result, readable mode (what the REPL would show)
fn print_of(env: &Rc<Environment>, src: &str) -> String {
    pr_str(&run(env, src).expect("eval error"), true)
}

// ============================================================================
// End-to-end sessions
// ============================================================================

#[test]
fn test_counting_down_in_tail_position() {
    let env = setup();
    run(&env, "(def! cnt (lambda (n) (if (= n 0) 'done (cnt (- n 1)))))").unwrap();
    assert_eq!(print_of(&env, "(cnt 100000)"), "done");
}

#[test]
fn test_tco_survives_depth_one_million() {
    let env = setup();
    run(&env, "(def! cnt (lambda (n) (if (= n 0) 'done (cnt (- n 1)))))").unwrap();
    assert_eq!(print_of(&env, "(cnt 1000000)"), "done");
}

#[test]
fn test_closure_remembers_its_argument() {
    let env = setup();
    run(&env, "(def! mk (lambda (x) (lambda () x)))").unwrap();
    assert_eq!(print_of(&env, "((mk 7))"), "7");
}

#[test]
fn test_apply_spreads_list_onto_variadic() {
    let env = setup();
    run(&env, "(def! l (lambda (& xs) xs))").unwrap();
    assert_eq!(print_of(&env, "(apply l 1 2 '(3 4))"), "(1 2 3 4)");
}

#[test]
fn test_quasiquote_splices_bound_list() {
    let env = setup();
    run(&env, "(def! lst '(b c))").unwrap();
    assert_eq!(print_of(&env, "`(a ~@lst d)"), "(a b c d)");
}

#[test]
fn test_user_macro_rewrites_call_site() {
    let env = setup();
    run(&env, "(defmacro! my-unless (lambda (c a b) (list 'if c b a)))").unwrap();
    assert_eq!(print_of(&env, "(my-unless false 'yes 'no)"), "yes");
}

#[test]
fn test_thrown_string_caught_and_formatted() {
    let env = setup();
    assert_eq!(
        print_of(&env, "(try* (throw \"boom\") (catch* e (str \"caught \" e)))"),
        "\"caught boom\""
    );
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn test_symbol_identity() {
    let env = setup();
    assert_eq!(print_of(&env, "(= 'a 'a)"), "true");
    assert_eq!(print_of(&env, "(= 'a 'b)"), "false");
    assert_eq!(print_of(&env, "(= (symbol \"a\") 'a)"), "true");
    assert_eq!(print_of(&env, "(symbol? 'a)"), "true");
    assert_eq!(print_of(&env, "(type 'a)"), "SYMBOL");
}

#[test]
fn test_singleton_uniqueness() {
    let env = setup();
    assert_eq!(print_of(&env, "(= nil nil)"), "true");
    assert_eq!(print_of(&env, "(= true true)"), "true");
    assert_eq!(print_of(&env, "(= false false)"), "true");
    assert_eq!(print_of(&env, "(= nil false)"), "false");
}

#[test]
fn test_empty_list_is_true_like() {
    let env = setup();
    assert_eq!(print_of(&env, "(if () 'a 'b)"), "a");
    assert_eq!(print_of(&env, "(empty? ())"), "true");
}

#[test]
fn test_read_print_round_trip() {
    let env = setup();
    for src in [
        "(1 2 (3 \"a\\nb\") nil true false sym)",
        "\"with \\\"quotes\\\" and \\\\slashes\"",
        "(a (b (c)))",
    ] {
        let quoted = format!("'{}", src);
        let printed = print_of(&env, &quoted);
        let reread = print_of(&env, &format!("'{}", printed));
        assert_eq!(printed, reread, "round-trip failed for {}", src);
    }
}

#[test]
fn test_equality_laws() {
    let env = setup();
    run(&env, "(def! a '(1 (2 3) \"s\"))").unwrap();
    run(&env, "(def! b '(1 (2 3) \"s\"))").unwrap();
    run(&env, "(def! c '(1 (2 3) \"s\"))").unwrap();
    // reflexive, symmetric, transitive
    assert_eq!(print_of(&env, "(= a a)"), "true");
    assert_eq!(print_of(&env, "(= a b)"), "true");
    assert_eq!(print_of(&env, "(= b a)"), "true");
    assert_eq!(print_of(&env, "(= b c)"), "true");
    assert_eq!(print_of(&env, "(= a c)"), "true");
}

#[test]
fn test_lexical_capture_after_outer_return() {
    let env = setup();
    assert_eq!(print_of(&env, "(((lambda (x) (lambda () x)) 10))"), "10");
}

#[test]
fn test_macroexpand_fixpoint() {
    let env = setup();
    run(&env, "(defmacro! m (lambda (x) (list '+ x 1)))").unwrap();
    assert_eq!(print_of(&env, "(macroexpand (m 5))"), "(+ 5 1)");
    // an already-expanded form is a fixpoint of the expansion loop
    assert_eq!(print_of(&env, "(macroexpand (+ 5 1))"), "(+ 5 1)");
}

#[test]
fn test_exception_scope() {
    let env = setup();
    // thrown exceptions are caught and the payload is bound
    assert_eq!(print_of(&env, "(try* (throw 42) (catch* e e))"), "42");

    // a thrown exception outside any try* propagates
    match run(&env, "(throw 1)") {
        Err(err) => assert!(err.is_thrown()),
        Ok(_) => panic!("uncaught throw must propagate"),
    }

    // a static error inside try* still propagates
    match run(&env, "(try* (if) (catch* e e))") {
        Err(err) => assert!(!err.is_thrown()),
        Ok(_) => panic!("static error must unwind past try*"),
    }
}

// ============================================================================
// Bootstrap and prelude
// ============================================================================

const LOAD_FILE_DEF: &str = r#"(def! load-file
  (lambda (path)
    (eval (read-string (str "(do " (slurp path) "\n)")))
    (println "loaded file" path) nil))"#;

#[test]
fn test_load_file_loads_the_prelude_from_disk() {
    // bare environment: no prelude yet
    let env = Environment::new();
    register_builtins(&env);
    assert!(run(&env, "(< 1 2)").is_err());

    run(&env, LOAD_FILE_DEF).unwrap();
    // cargo runs tests from the package root, where lisp/core.lisp lives
    run(&env, "(load-file \"lisp/core.lisp\")").unwrap();
    assert_eq!(print_of(&env, "(< 1 2)"), "true");
}

#[test]
fn test_load_file_of_missing_file_throws() {
    let env = Environment::new();
    register_builtins(&env);
    run(&env, LOAD_FILE_DEF).unwrap();

    match run(&env, "(load-file \"no/such/file.lisp\")") {
        Err(err) => assert!(err.is_thrown()),
        Ok(_) => panic!("missing file must fail"),
    }
}

#[test]
fn test_prelude_derived_procedures() {
    let env = setup();
    assert_eq!(print_of(&env, "(not false)"), "true");
    assert_eq!(print_of(&env, "(not ())"), "false");
    assert_eq!(print_of(&env, "(< 1 2)"), "true");
    assert_eq!(print_of(&env, "(<= 2 2)"), "true");
    assert_eq!(print_of(&env, "(>= 2 3)"), "false");
    assert_eq!(print_of(&env, "(zero? 0)"), "true");
    assert_eq!(print_of(&env, "(inc 41)"), "42");
    assert_eq!(print_of(&env, "(dec 43)"), "42");
    assert_eq!(print_of(&env, "(first '(1 2 3))"), "1");
    assert_eq!(print_of(&env, "(second '(1 2 3))"), "2");
    assert_eq!(print_of(&env, "(last '(1 2 3))"), "3");
}

#[test]
fn test_prelude_higher_order_procedures() {
    let env = setup();
    assert_eq!(print_of(&env, "(reduce + 0 '(1 2 3 4))"), "10");
    assert_eq!(print_of(&env, "(reverse '(1 2 3))"), "(3 2 1)");
    assert_eq!(print_of(&env, "(filter even? '(1 2 3 4))"), "(2 4)");
    assert_eq!(print_of(&env, "(map inc '(1 2 3))"), "(2 3 4)");
}

#[test]
fn test_prelude_macros() {
    let env = setup();
    assert_eq!(print_of(&env, "(when true 1 2 3)"), "3");
    assert_eq!(print_of(&env, "(when false 1 2 3)"), "nil");
    assert_eq!(print_of(&env, "(unless false 'ok)"), "ok");
    assert_eq!(print_of(&env, "(unless true 'ok)"), "nil");
}

// ============================================================================
// Assorted behaviour a REPL session relies on
// ============================================================================

#[test]
fn test_read_string_eval_round_trip() {
    let env = setup();
    assert_eq!(print_of(&env, "(eval (read-string \"(+ 1 2)\"))"), "3");
}

#[test]
fn test_atom_counter() {
    let env = setup();
    run(&env, "(def! counter (atom 0))").unwrap();
    run(&env, "(swap! counter inc)").unwrap();
    run(&env, "(swap! counter + 10)").unwrap();
    assert_eq!(print_of(&env, "(deref counter)"), "11");
    assert_eq!(print_of(&env, "counter"), "(atom 11)");
}

#[test]
fn test_exn_values_are_first_class() {
    let env = setup();
    run(&env, "(def! e (exn '(code 7)))").unwrap();
    assert_eq!(print_of(&env, "(exn? e)"), "true");
    assert_eq!(print_of(&env, "(exn-datum e)"), "(code 7)");
    assert_eq!(print_of(&env, "e"), "#<exn>");
    // exceptions compare by payload
    assert_eq!(print_of(&env, "(= e (exn '(code 7)))"), "true");
}

#[test]
fn test_env_builtin_reports_local_frame() {
    let env = setup();
    assert_eq!(print_of(&env, "(let* ((a 1)) (env))"), "((a 1))");
}

#[test]
fn test_arity_reflection() {
    let env = setup();
    assert_eq!(print_of(&env, "(arity +)"), "(2 true)");
    assert_eq!(print_of(&env, "(arity (lambda (a b) a))"), "(2 false)");
    assert_eq!(print_of(&env, "(arity (lambda (a & r) a))"), "(1 true)");
}

#[test]
fn test_procedure_naming_through_def() {
    let env = setup();
    run(&env, "(def! my-id (lambda (x) x))").unwrap();
    assert_eq!(print_of(&env, "my-id"), "#<procedure:my-id>");
    // first binding wins
    run(&env, "(def! alias my-id)").unwrap();
    assert_eq!(print_of(&env, "alias"), "#<procedure:my-id>");
}

#[test]
fn test_recursion_via_named_procedure_with_accumulator() {
    let env = setup();
    run(
        &env,
        "(def! sum (lambda (n acc) (if (zero? n) acc (sum (dec n) (+ acc n)))))",
    )
    .unwrap();
    assert_eq!(print_of(&env, "(sum 10000 0)"), "50005000");
}
