#![allow(dead_code)]

/// Test utilities for plotscript integration tests
///
/// This module provides shared helpers for integration tests:
/// - Evaluating programs against a startup-loaded interpreter
/// - Running the `plotscript` binary and capturing its output
/// - Building expected expressions concisely
pub mod runner;

pub use runner::{run_cli, CliOutput};

use plotscript::backend::{
    Atom, Environment, Expression, Interpreter, SemanticError, STARTUP_PROGRAM,
};

/// Interpreter with the startup program already evaluated.
pub fn interpreter() -> Interpreter {
    let mut interp = Interpreter::new();
    interp
        .load_startup(STARTUP_PROGRAM)
        .expect("startup program should evaluate");
    interp
}

/// Environment a kernel worker starts from.
pub fn startup_environment() -> Environment {
    interpreter().into_environment()
}

/// Evaluate `program` in a fresh interpreter.
pub fn run(program: &str) -> Result<Expression, SemanticError> {
    interpreter().eval_str(program)
}

/// Evaluate `program` and render the result.
///
/// # Panics
/// Panics if evaluation fails.
pub fn run_display(program: &str) -> String {
    match run(program) {
        Ok(exp) => exp.to_string(),
        Err(e) => panic!("evaluating {} failed: {}", program, e),
    }
}

/// Evaluate several programs in order against one interpreter, returning the
/// last result.
pub fn run_all(programs: &[&str]) -> Result<Expression, SemanticError> {
    let mut interp = interpreter();
    let mut last = Ok(Expression::default());
    for program in programs {
        last = interp.eval_str(program);
    }
    last
}

pub fn number(value: f64) -> Expression {
    Expression::number(value)
}

pub fn complex(re: f64, im: f64) -> Expression {
    Expression::new(Atom::Complex(num_complex::Complex64::new(re, im)))
}

pub fn numbers(values: &[f64]) -> Expression {
    Expression::list(values.iter().copied().map(Expression::number).collect())
}
