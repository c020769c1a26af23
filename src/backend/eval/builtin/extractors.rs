//! Value extraction helpers for built-in procedures.
//!
//! Each helper reads a typed value out of an evaluated argument and turns a
//! kind mismatch into `InvalidArgument` naming the calling procedure.

use num_complex::Complex64;

use crate::backend::eval::SemanticError;
use crate::backend::models::{Atom, Expression};

fn friendly_kind(value: &Expression) -> &'static str {
    match value.head() {
        Atom::None => "None",
        Atom::Number(_) => "Number",
        Atom::Complex(_) => "Complex",
        Atom::Symbol(_) => "Symbol",
        Atom::String(_) => "String",
        Atom::List => "List",
        Atom::Lambda => "Procedure",
        Atom::Discrete => "Plot",
    }
}

fn mismatch(op: &str, expected: &str, value: &Expression) -> SemanticError {
    SemanticError::InvalidArgument(format!(
        "{} expected {}, got {}",
        op,
        expected,
        friendly_kind(value)
    ))
}

/// Extract a real number.
pub(super) fn extract_real(value: &Expression, op: &str) -> Result<f64, SemanticError> {
    match value.head() {
        Atom::Number(n) => Ok(*n),
        _ => Err(mismatch(op, "Number", value)),
    }
}

/// Extract a complex number.
pub(super) fn extract_complex(value: &Expression, op: &str) -> Result<Complex64, SemanticError> {
    match value.head() {
        Atom::Complex(c) => Ok(*c),
        _ => Err(mismatch(op, "Complex", value)),
    }
}

/// Extract a Number or Complex, widening a Number to the complex plane.
pub(super) fn extract_numeric(value: &Expression, op: &str) -> Result<Complex64, SemanticError> {
    match value.head() {
        Atom::Number(n) => Ok(Complex64::new(*n, 0.0)),
        Atom::Complex(c) => Ok(*c),
        _ => Err(mismatch(op, "Number or Complex", value)),
    }
}

/// Extract the items of a list.
pub(super) fn extract_list<'a>(
    value: &'a Expression,
    op: &str,
) -> Result<&'a [Expression], SemanticError> {
    if value.is_head_list() {
        Ok(value.tail())
    } else {
        Err(mismatch(op, "List", value))
    }
}

/// Wrap an arithmetic result, narrowing to a Number when no operand was complex.
pub(super) fn numeric_result(value: Complex64, complex: bool) -> Expression {
    if complex {
        Expression::new(Atom::Complex(value))
    } else {
        Expression::number(value.re)
    }
}

pub(super) fn any_complex(args: &[Expression]) -> bool {
    args.iter().any(Expression::is_head_complex)
}
