//! Complex-number procedures: real, imag, mag, arg, conj, complex.

use num_complex::Complex64;

use crate::backend::models::{Atom, EvalResult, Expression};

use super::extractors::{extract_complex, extract_real};

fn unary_complex(args: &[Expression], op: &str) -> Result<Complex64, crate::backend::eval::SemanticError> {
    require_one_arg!(op, args);
    extract_complex(&args[0], op)
}

pub(crate) fn real(args: &[Expression]) -> EvalResult {
    let value = unary_complex(args, "real")?;
    Ok(Expression::number(value.re))
}

pub(crate) fn imag(args: &[Expression]) -> EvalResult {
    let value = unary_complex(args, "imag")?;
    Ok(Expression::number(value.im))
}

/// Magnitude (modulus).
pub(crate) fn mag(args: &[Expression]) -> EvalResult {
    let value = unary_complex(args, "mag")?;
    Ok(Expression::number(value.norm()))
}

/// Phase angle, returned as a Complex with zero imaginary part.
pub(crate) fn arg(args: &[Expression]) -> EvalResult {
    let value = unary_complex(args, "arg")?;
    Ok(Expression::new(Atom::Complex(Complex64::new(value.arg(), 0.0))))
}

pub(crate) fn conj(args: &[Expression]) -> EvalResult {
    let value = unary_complex(args, "conj")?;
    Ok(Expression::new(Atom::Complex(value.conj())))
}

/// Build a Complex from real and imaginary parts.
pub(crate) fn complex(args: &[Expression]) -> EvalResult {
    require_two_args!("complex", args);

    let re = extract_real(&args[0], "complex")?;
    let im = extract_real(&args[1], "complex")?;
    Ok(Expression::new(Atom::Complex(Complex64::new(re, im))))
}
