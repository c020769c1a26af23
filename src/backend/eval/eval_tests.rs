use super::*;
use crate::sexpr::parse;

fn run_in(program: &str, env: &mut Environment) -> EvalResult {
    let expr = parse(program).expect("test program should parse");
    eval(&expr, env, &InterruptFlag::new())
}

fn run(program: &str) -> EvalResult {
    run_in(program, &mut Environment::new())
}

fn numbers(values: &[f64]) -> Expression {
    Expression::list(values.iter().copied().map(Expression::number).collect())
}

#[test]
fn test_eval_number_leaf() {
    assert_eq!(run("(4)"), Ok(Expression::number(4.0)));
    assert_eq!(run("(-2.5)"), Ok(Expression::number(-2.5)));
}

#[test]
fn test_eval_string_leaf() {
    assert_eq!(run("(\"hello\")"), Ok(Expression::string("hello")));
}

#[test]
fn test_eval_unknown_symbol() {
    assert_eq!(
        run("(foo)"),
        Err(SemanticError::UnknownSymbol("foo".to_string()))
    );
}

#[test]
fn test_eval_procedure_name_as_leaf() {
    // A built-in name is not a value
    assert_eq!(
        run("(+)"),
        Err(SemanticError::UnknownSymbol("+".to_string()))
    );
}

#[test]
fn test_eval_nested() {
    assert_eq!(run("(+ (* 2 3) (- 10 4))"), Ok(Expression::number(12.0)));
}

#[test]
fn test_begin() {
    assert_eq!(run("(begin 1 2 3)"), Ok(Expression::number(3.0)));
    assert_eq!(run("(begin)"), Err(SemanticError::UnknownSymbol("begin".to_string())));
    assert_eq!(
        special_forms::eval_begin(&[], &mut Environment::new(), &InterruptFlag::new()),
        Err(SemanticError::EmptyBegin)
    );
}

#[test]
fn test_define_returns_value() {
    let mut env = Environment::new();
    assert_eq!(run_in("(define a (+ 1 2))", &mut env), Ok(Expression::number(3.0)));
    assert_eq!(run_in("(a)", &mut env), Ok(Expression::number(3.0)));
    assert_eq!(run_in("(+ a a)", &mut env), Ok(Expression::number(6.0)));
}

#[test]
fn test_define_twice_fails() {
    let mut env = Environment::new();
    run_in("(define a 1)", &mut env).unwrap();
    assert_eq!(
        run_in("(define a 2)", &mut env),
        Err(SemanticError::DuplicateBinding("a".to_string()))
    );
    assert_eq!(run_in("(a)", &mut env), Ok(Expression::number(1.0)));
}

#[test]
fn test_define_reserved_names() {
    assert_eq!(
        run("(define begin 1)"),
        Err(SemanticError::RedefineSpecialForm("begin".to_string()))
    );
    assert_eq!(
        run("(define define 1)"),
        Err(SemanticError::RedefineSpecialForm("define".to_string()))
    );
    assert_eq!(
        run("(define pi 3)"),
        Err(SemanticError::RedefineConstant("pi".to_string()))
    );
    assert_eq!(
        run("(define I 3)"),
        Err(SemanticError::RedefineConstant("I".to_string()))
    );
    assert_eq!(
        run("(define sqrt 3)"),
        Err(SemanticError::RedefineProcedure("sqrt".to_string()))
    );
}

#[test]
fn test_define_other_special_form_names() {
    // Only `define` and `begin` are reserved among the special forms
    let mut env = Environment::new();
    assert_eq!(run_in("(define map 3)", &mut env), Ok(Expression::number(3.0)));
    assert_eq!(run_in("(map)", &mut env), Ok(Expression::number(3.0)));
}

#[test]
fn test_define_bad_arguments() {
    assert!(matches!(
        run("(define 1 2)"),
        Err(SemanticError::InvalidArgument(_))
    ));
    assert!(matches!(
        run("(define (a b) 2)"),
        Err(SemanticError::InvalidArgument(_))
    ));
    assert!(matches!(
        run("(define a)"),
        Err(SemanticError::ArityMismatch(_))
    ));
}

#[test]
fn test_failed_define_leaves_no_binding() {
    let mut env = Environment::new();
    assert!(run_in("(define a (first (list)))", &mut env).is_err());
    assert!(!env.is_known(&Atom::symbol("a")));
}

#[test]
fn test_lambda_value() {
    let value = run("(lambda (x y) (+ x y))").unwrap();
    assert!(value.is_head_lambda());
    assert_eq!(value.tail().len(), 2);
    assert_eq!(
        value.tail()[0],
        Expression::list(vec![Expression::symbol("x"), Expression::symbol("y")])
    );
    assert_eq!(value.to_string(), "(((x) (y)) (+ (x) (y)))");
}

#[test]
fn test_lambda_call() {
    let mut env = Environment::new();
    run_in("(define add (lambda (x y) (+ x y)))", &mut env).unwrap();
    assert_eq!(run_in("(add 3 4)", &mut env), Ok(Expression::number(7.0)));
    assert!(matches!(
        run_in("(add 3)", &mut env),
        Err(SemanticError::ArityMismatch(_))
    ));
}

#[test]
fn test_lambda_parameters_shadow_globals() {
    let mut env = Environment::new();
    run_in("(define x 100)", &mut env).unwrap();
    run_in("(define inc (lambda (x) (+ x 1)))", &mut env).unwrap();
    assert_eq!(run_in("(inc 1)", &mut env), Ok(Expression::number(2.0)));
    // The caller's binding is untouched
    assert_eq!(run_in("(x)", &mut env), Ok(Expression::number(100.0)));
}

#[test]
fn test_lambda_dynamic_scoping() {
    let mut env = Environment::new();
    run_in("(define scale (lambda (v) (* v k)))", &mut env).unwrap();
    // `k` is resolved when `scale` runs, not when it is defined
    assert_eq!(
        run_in("(scale 2)", &mut env),
        Err(SemanticError::UnknownSymbol("k".to_string()))
    );
    run_in("(define k 10)", &mut env).unwrap();
    assert_eq!(run_in("(scale 2)", &mut env), Ok(Expression::number(20.0)));

    run_in("(define outer (lambda (k) (scale 3)))", &mut env).unwrap();
    assert_eq!(run_in("(outer 5)", &mut env), Ok(Expression::number(15.0)));
}

#[test]
fn test_lambda_definitions_stay_local() {
    let mut env = Environment::new();
    run_in("(define f (lambda (x) (define inner x)))", &mut env).unwrap();
    assert_eq!(run_in("(f 3)", &mut env), Ok(Expression::number(3.0)));
    assert!(!env.is_known(&Atom::symbol("inner")));
}

#[test]
fn test_lambda_errors() {
    assert!(matches!(
        run("(lambda (x))"),
        Err(SemanticError::ArityMismatch(_))
    ));
    assert!(matches!(
        run("(lambda (x 1) (+ x 1))"),
        Err(SemanticError::InvalidArgument(_))
    ));
    assert!(matches!(
        run("(lambda (sin) (+ sin 1))"),
        Err(SemanticError::InvalidArgument(_))
    ));
}

#[test]
fn test_call_non_procedure_value() {
    let mut env = Environment::new();
    run_in("(define a 1)", &mut env).unwrap();
    assert_eq!(run_in("(a 2)", &mut env), Err(SemanticError::NotAProcedure));
}

#[test]
fn test_apply() {
    assert_eq!(run("(apply + (list 1 2 3))"), Ok(Expression::number(6.0)));
    assert_eq!(run("(apply - (list 5))"), Ok(Expression::number(-5.0)));

    let mut env = Environment::new();
    run_in("(define add (lambda (x y) (+ x y)))", &mut env).unwrap();
    assert_eq!(
        run_in("(apply add (list 2 5))", &mut env),
        Ok(Expression::number(7.0))
    );
}

#[test]
fn test_apply_errors() {
    assert_eq!(run("(apply (+ 1 2) (list 1))"), Err(SemanticError::NotAProcedure));
    assert_eq!(run("(apply begin (list 1))"), Err(SemanticError::NotAProcedure));
    assert_eq!(run("(apply nothing (list 1))"), Err(SemanticError::NotAProcedure));
    assert!(matches!(
        run("(apply + 3)"),
        Err(SemanticError::InvalidArgument(_))
    ));
    assert!(matches!(
        run("(apply + (list 1) (list 2))"),
        Err(SemanticError::ArityMismatch(_))
    ));
    assert!(matches!(
        run("(apply / (list 1 2 3))"),
        Err(SemanticError::ArityMismatch(_))
    ));
}

#[test]
fn test_map() {
    assert_eq!(run("(map sqrt (list 1 4 9))"), Ok(numbers(&[1.0, 2.0, 3.0])));
    assert_eq!(run("(map - (list 1 2))"), Ok(numbers(&[-1.0, -2.0])));
    assert_eq!(run("(map sqrt (list))"), Ok(Expression::list(Vec::new())));

    let mut env = Environment::new();
    run_in("(define square (lambda (x) (* x x)))", &mut env).unwrap();
    assert_eq!(
        run_in("(map square (range 1 3 1))", &mut env),
        Ok(numbers(&[1.0, 4.0, 9.0]))
    );
}

#[test]
fn test_map_errors() {
    assert_eq!(run("(map 3 (list 1))"), Err(SemanticError::NotAProcedure));
    assert!(matches!(
        run("(map / (list 1 2))"),
        Err(SemanticError::ArityMismatch(_))
    ));
    assert!(matches!(
        run("(map sqrt 4)"),
        Err(SemanticError::InvalidArgument(_))
    ));
}

#[test]
fn test_set_and_get_property() {
    let mut env = Environment::new();
    run_in(
        "(define a (set-property \"note\" \"a number\" (+ 1 2)))",
        &mut env,
    )
    .unwrap();
    assert_eq!(run_in("(a)", &mut env), Ok(Expression::number(3.0)));
    assert_eq!(
        run_in("(get-property \"note\" a)", &mut env),
        Ok(Expression::string("a number"))
    );
    assert!(run_in("(get-property \"missing\" a)", &mut env)
        .unwrap()
        .is_none());
}

#[test]
fn test_set_property_overwrites() {
    let value = run("(set-property \"k\" 2 (set-property \"k\" 1 (list)))").unwrap();
    assert_eq!(value.get_property("k"), Expression::number(2.0));
}

#[test]
fn test_property_value_is_evaluated() {
    let value = run("(set-property \"size\" (+ 1 1) (list 0 0))").unwrap();
    assert_eq!(value.get_property("size"), Expression::number(2.0));
}

#[test]
fn test_property_errors() {
    assert!(matches!(
        run("(set-property 1 2 (list))"),
        Err(SemanticError::InvalidArgument(_))
    ));
    assert!(matches!(
        run("(set-property size 2 (list))"),
        Err(SemanticError::InvalidArgument(_))
    ));
    assert!(matches!(
        run("(get-property \"k\")"),
        Err(SemanticError::ArityMismatch(_))
    ));
    assert!(matches!(
        run("(set-property \"k\" 1)"),
        Err(SemanticError::ArityMismatch(_))
    ));
}

#[test]
fn test_equality_ignores_properties() {
    let tagged = run("(set-property \"k\" 1 (list 1 2))").unwrap();
    assert_eq!(tagged, numbers(&[1.0, 2.0]));
}

#[test]
fn test_raised_interrupt_stops_evaluation() {
    let interrupt = InterruptFlag::new();
    interrupt.raise();
    let expr = parse("(+ 1 2)").unwrap();
    assert_eq!(
        eval(&expr, &mut Environment::new(), &interrupt),
        Err(SemanticError::Interrupted)
    );
}

#[test]
fn test_discrete_plot_dispatch() {
    let plot = run("(discrete-plot (list (list 0 0) (list 1 1)) (list))").unwrap();
    assert!(plot.is_head_discrete());
    assert!(plot.tail().iter().any(Expression::is_point));
}

#[test]
fn test_special_form_table() {
    for name in SPECIAL_FORMS {
        assert!(is_special_form(name));
        assert!(!builtin::is_builtin(name));
    }
    assert!(!is_special_form("+"));
}
