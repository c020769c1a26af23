//! Built-in procedures installed in every fresh environment.
//!
//! - Arithmetic: +, -, *, /, ^
//! - Math: sqrt, ln, sin, cos, tan
//! - Complex: real, imag, mag, arg, conj, complex
//! - Lists: list, first, rest, length, append, join, range
//!
//! Procedures receive their arguments already evaluated and never see the
//! environment.

mod arithmetic;
mod complex;
mod extractors;
mod list_ops;
mod math;


use crate::backend::environment::Procedure;

/// Name and implementation of every builtin procedure.
pub(crate) const PROCEDURES: &[(&str, Procedure)] = &[
    ("+", arithmetic::add),
    ("-", arithmetic::subneg),
    ("*", arithmetic::mul),
    ("/", arithmetic::div),
    ("^", arithmetic::pow),
    ("sqrt", math::sqrt),
    ("ln", math::ln),
    ("sin", math::sin),
    ("cos", math::cos),
    ("tan", math::tan),
    ("real", complex::real),
    ("imag", complex::imag),
    ("mag", complex::mag),
    ("arg", complex::arg),
    ("conj", complex::conj),
    ("complex", complex::complex),
    ("list", list_ops::list),
    ("first", list_ops::first),
    ("rest", list_ops::rest),
    ("length", list_ops::length),
    ("append", list_ops::append),
    ("join", list_ops::join),
    ("range", list_ops::range),
];

/// True if `name` is one of the builtin procedures.
pub fn is_builtin(name: &str) -> bool {
    PROCEDURES.iter().any(|(builtin, _)| *builtin == name)
}

/// Names of all built-in procedures, in table order.
pub fn names() -> impl Iterator<Item = &'static str> {
    PROCEDURES.iter().map(|(name, _)| *name)
}
