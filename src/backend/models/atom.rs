use std::fmt;
use std::sync::LazyLock;

use num_complex::Complex64;
use regex::Regex;

/// Decimal float literal accepted by the reader: optional sign, digits with an
/// optional fraction (or a bare fraction), optional exponent.
static NUMBER_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").expect("number literal regex is valid")
});

/// Largest difference at which two numbers still compare equal.
const TOLERANCE: f64 = f64::EPSILON * 2.0;

/// The value carried at every node of an expression tree.
///
/// `List`, `Lambda` and `Discrete` carry no payload; they tag the head of a
/// composite expression with its structural role and the children live in
/// the expression's tail.
#[derive(Debug, Clone, Default)]
pub enum Atom {
    #[default]
    None,
    Number(f64),
    Complex(Complex64),
    Symbol(String),
    /// Text of a quoted literal, without the surrounding quotes
    String(String),
    List,
    Lambda,
    Discrete,
}

impl Atom {
    /// Classify a lexeme. Returns `None` for tokens that start with a digit
    /// but are not a clean number (`1abc`); the parser treats that as a
    /// parse failure.
    pub fn from_token(token: &str) -> Option<Atom> {
        if NUMBER_LITERAL.is_match(token) {
            if let Ok(value) = token.parse::<f64>() {
                return Some(Atom::Number(value));
            }
        }

        let first = token.chars().next()?;
        if first == '"' {
            // An unterminated literal runs to end of input and is rejected
            let inner = token.get(1..)?.strip_suffix('"')?;
            Some(Atom::String(inner.to_string()))
        } else if !first.is_ascii_digit() {
            Some(Atom::Symbol(token.to_string()))
        } else {
            None
        }
    }

    pub fn symbol(name: impl Into<String>) -> Atom {
        Atom::Symbol(name.into())
    }

    pub fn string(text: impl Into<String>) -> Atom {
        Atom::String(text.into())
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Atom::None)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Atom::Number(_))
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Atom::Complex(_))
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Atom::Symbol(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Atom::String(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Atom::List)
    }

    pub fn is_lambda(&self) -> bool {
        matches!(self, Atom::Lambda)
    }

    pub fn is_discrete(&self) -> bool {
        matches!(self, Atom::Discrete)
    }

    /// Numeric value, or 0.0 for anything that is not a `Number`.
    pub fn as_number(&self) -> f64 {
        match self {
            Atom::Number(n) => *n,
            _ => 0.0,
        }
    }

    /// Complex value, or 0 for anything that is not a `Complex`.
    pub fn as_complex(&self) -> Complex64 {
        match self {
            Atom::Complex(c) => *c,
            _ => Complex64::new(0.0, 0.0),
        }
    }

    /// Symbol name, if this atom is a symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Atom::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// String literal text, if this atom is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Atom::String(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Atom::None, Atom::None) => true,
            (Atom::Number(a), Atom::Number(b)) => within_tolerance(*a, *b),
            (Atom::Complex(a), Atom::Complex(b)) => {
                within_tolerance(a.re, b.re) && within_tolerance(a.im, b.im)
            }
            (Atom::Symbol(a), Atom::Symbol(b)) => a == b,
            (Atom::String(a), Atom::String(b)) => a == b,
            (Atom::List, Atom::List) => true,
            (Atom::Lambda, Atom::Lambda) => true,
            (Atom::Discrete, Atom::Discrete) => true,
            _ => false,
        }
    }
}

fn within_tolerance(a: f64, b: f64) -> bool {
    let diff = (a - b).abs();
    !diff.is_nan() && diff <= TOLERANCE
}

impl From<f64> for Atom {
    fn from(value: f64) -> Self {
        Atom::Number(value)
    }
}

impl From<Complex64> for Atom {
    fn from(value: Complex64) -> Self {
        Atom::Complex(value)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Atom::Number(n) => write!(f, "{}", format_number(*n)),
            Atom::Complex(c) => write!(f, "({},{})", format_number(c.re), format_number(c.im)),
            Atom::Symbol(s) => write!(f, "{}", s),
            Atom::String(s) => write!(f, "\"{}\"", s),
            Atom::None | Atom::List | Atom::Lambda | Atom::Discrete => Ok(()),
        }
    }
}

/// Render a number the way C's `%g` does: six significant digits, trailing
/// zeros removed, exponent form outside `1e-4 ..< 1e6`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{:.5e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..6).contains(&exponent) {
        let decimals = (5 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value))
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    }
}

fn trim_fraction(text: &str) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text.to_string()
    }
}
