//! Arithmetic procedures over the Number / Complex tower.
//!
//! - Addition (+) and multiplication (*): any number of arguments
//! - Subtraction (-): binary, or unary negation
//! - Division (/) and power (^): binary
//!
//! A result is Complex iff at least one operand is Complex.

use num_complex::Complex64;

use crate::backend::eval::SemanticError;
use crate::backend::models::{EvalResult, Expression};

use super::extractors::{any_complex, extract_numeric, numeric_result};

pub(crate) fn add(args: &[Expression]) -> EvalResult {
    let mut sum = Complex64::new(0.0, 0.0);
    for arg in args {
        sum += extract_numeric(arg, "+")?;
    }
    Ok(numeric_result(sum, any_complex(args)))
}

pub(crate) fn mul(args: &[Expression]) -> EvalResult {
    let mut product = Complex64::new(1.0, 0.0);
    for arg in args {
        product *= extract_numeric(arg, "*")?;
    }
    Ok(numeric_result(product, any_complex(args)))
}

/// Negation with one argument, subtraction with two.
pub(crate) fn subneg(args: &[Expression]) -> EvalResult {
    let result = match args {
        [value] => -extract_numeric(value, "-")?,
        [a, b] => extract_numeric(a, "-")? - extract_numeric(b, "-")?,
        _ => {
            return Err(SemanticError::ArityMismatch(format!(
                "- (expected 1 or 2 arguments, got {})",
                args.len()
            )))
        }
    };
    Ok(numeric_result(result, any_complex(args)))
}

pub(crate) fn div(args: &[Expression]) -> EvalResult {
    require_two_args!("/", args);

    let a = extract_numeric(&args[0], "/")?;
    let b = extract_numeric(&args[1], "/")?;

    if any_complex(args) {
        Ok(numeric_result(a / b, true))
    } else {
        // Real division keeps IEEE semantics (x/0 is inf)
        Ok(Expression::number(a.re / b.re))
    }
}

pub(crate) fn pow(args: &[Expression]) -> EvalResult {
    require_two_args!("^", args);

    let base = extract_numeric(&args[0], "^")?;
    let exponent = extract_numeric(&args[1], "^")?;

    let result = match (args[0].is_head_complex(), args[1].is_head_complex()) {
        (false, false) => Complex64::new(base.re.powf(exponent.re), 0.0),
        (true, false) => base.powf(exponent.re),
        (_, true) => base.powc(exponent),
    };
    Ok(numeric_result(result, any_complex(args)))
}
