pub mod atom;
pub mod expression;

pub use atom::{format_number, Atom};
pub use expression::{Expression, OBJECT_NAME};

use crate::backend::eval::SemanticError;

/// Result of evaluating one expression.
pub type EvalResult = Result<Expression, SemanticError>;
