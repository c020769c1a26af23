// Eval function: recursive post-order evaluation with special-form dispatch
//
// eval(leaf, env)       = lookup(head) | head if self-evaluating
// eval((form ...), env) = special form handler
// eval((op a1 .. an))   = apply(op, [eval(a1) .. eval(an)])

#[macro_use]
mod macros;

mod application;
pub mod builtin;
mod discrete_plot;
mod errors;
mod properties;
mod special_forms;

#[cfg(test)]
mod eval_tests;

use tracing::trace;

use crate::backend::environment::Environment;
use crate::backend::interrupt::InterruptFlag;
use crate::backend::models::{Atom, EvalResult, Expression};

pub use application::apply;
pub use errors::{SemanticError, PARSE_FAILURE};

/// Names handled by the evaluator itself rather than by a procedure.
pub const SPECIAL_FORMS: &[&str] = &[
    "begin",
    "define",
    "lambda",
    "apply",
    "map",
    "set-property",
    "get-property",
    "discrete-plot",
];

pub fn is_special_form(name: &str) -> bool {
    SPECIAL_FORMS.contains(&name)
}

/// Evaluate `expr` against `env`.
///
/// Checks `interrupt` before doing any work so a raised flag unwinds the
/// whole evaluation as `SemanticError::Interrupted`.
pub fn eval(expr: &Expression, env: &mut Environment, interrupt: &InterruptFlag) -> EvalResult {
    if interrupt.is_raised() {
        return Err(SemanticError::Interrupted);
    }

    if expr.tail().is_empty() {
        return eval_leaf(expr.head(), env);
    }

    if let Some(name) = expr.head().as_symbol() {
        if is_special_form(name) {
            trace!(form = name, children = expr.tail().len(), "special form");
        }
        match name {
            "begin" => return special_forms::eval_begin(expr.tail(), env, interrupt),
            "define" => return special_forms::eval_define(expr.tail(), env, interrupt),
            "lambda" => return special_forms::eval_lambda(expr.tail(), env),
            "apply" => return special_forms::eval_apply(expr.tail(), env, interrupt),
            "map" => return special_forms::eval_map(expr.tail(), env, interrupt),
            "set-property" => return properties::eval_set_property(expr.tail(), env, interrupt),
            "get-property" => return properties::eval_get_property(expr.tail(), env, interrupt),
            "discrete-plot" => return discrete_plot::eval_discrete_plot(expr.tail(), env, interrupt),
            _ => {}
        }
    }

    let mut args = Vec::with_capacity(expr.tail().len());
    for child in expr.tail() {
        args.push(eval(child, env, interrupt)?);
    }
    apply(expr.head(), &args, env, interrupt)
}

fn eval_leaf(head: &Atom, env: &Environment) -> EvalResult {
    match head {
        Atom::Symbol(name) if name == "list" => Ok(Expression::list(Vec::new())),
        Atom::Symbol(name) => {
            if env.is_expression(head) {
                Ok(env.get_expression(head))
            } else {
                Err(SemanticError::UnknownSymbol(name.clone()))
            }
        }
        Atom::Number(_) | Atom::Complex(_) | Atom::String(_) => Ok(Expression::new(head.clone())),
        _ => Err(SemanticError::InvalidTerminal),
    }
}
