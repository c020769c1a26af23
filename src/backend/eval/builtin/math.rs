//! Elementary functions.
//!
//! Every function accepts a Number or a Complex and returns a Complex
//! whenever its argument is complex. `sqrt` also promotes a negative real.

use num_complex::Complex64;

use crate::backend::eval::SemanticError;
use crate::backend::models::{Atom, EvalResult, Expression};

use super::extractors::{extract_numeric, extract_real};

/// Square root. A negative real or any complex argument yields a Complex.
pub(crate) fn sqrt(args: &[Expression]) -> EvalResult {
    require_one_arg!("sqrt", args);

    match args[0].head() {
        Atom::Number(n) if *n >= 0.0 => Ok(Expression::number(n.sqrt())),
        _ => {
            let value = extract_numeric(&args[0], "sqrt")?;
            Ok(Expression::new(Atom::Complex(value.sqrt())))
        }
    }
}

/// Natural logarithm. A real argument must be positive; a complex argument
/// takes the principal branch.
pub(crate) fn ln(args: &[Expression]) -> EvalResult {
    require_one_arg!("ln", args);

    match args[0].head() {
        Atom::Complex(c) => Ok(Expression::new(Atom::Complex(c.ln()))),
        _ => {
            let value = extract_real(&args[0], "ln")?;
            if value <= 0.0 {
                return Err(SemanticError::DomainError(format!(
                    "ln of non-positive number {}",
                    args[0].head()
                )));
            }
            Ok(Expression::number(value.ln()))
        }
    }
}

fn unary(
    args: &[Expression],
    op: &str,
    real: fn(f64) -> f64,
    complex: fn(Complex64) -> Complex64,
) -> EvalResult {
    require_one_arg!(op, args);

    match args[0].head() {
        Atom::Number(n) => Ok(Expression::number(real(*n))),
        _ => {
            let value = extract_numeric(&args[0], op)?;
            Ok(Expression::new(Atom::Complex(complex(value))))
        }
    }
}

pub(crate) fn sin(args: &[Expression]) -> EvalResult {
    unary(args, "sin", f64::sin, Complex64::sin)
}

pub(crate) fn cos(args: &[Expression]) -> EvalResult {
    unary(args, "cos", f64::cos, Complex64::cos)
}

pub(crate) fn tan(args: &[Expression]) -> EvalResult {
    unary(args, "tan", f64::tan, Complex64::tan)
}
