//! Core special forms: begin, define, lambda, apply, map.
//!
//! Handlers receive the unevaluated children of the form and decide
//! themselves which of them to evaluate.

use tracing::trace;

use crate::backend::environment::Environment;
use crate::backend::interrupt::InterruptFlag;
use crate::backend::models::{Atom, EvalResult, Expression};

use super::{apply, eval, is_special_form, SemanticError};

const CONSTANTS: &[&str] = &["e", "I", "pi"];

/// `(begin e1 .. en)`: evaluate in order, return the last result.
pub(super) fn eval_begin(
    items: &[Expression],
    env: &mut Environment,
    interrupt: &InterruptFlag,
) -> EvalResult {
    let mut result = None;
    for item in items {
        result = Some(eval(item, env, interrupt)?);
    }
    result.ok_or(SemanticError::EmptyBegin)
}

/// `(define name value)`: bind a new symbol and return its value.
pub(super) fn eval_define(
    items: &[Expression],
    env: &mut Environment,
    interrupt: &InterruptFlag,
) -> EvalResult {
    require_two_args!("define", items);

    let target = &items[0];
    let name = match target.head().as_symbol() {
        Some(name) if target.is_bare_symbol() => name,
        _ => {
            return Err(SemanticError::InvalidArgument(
                "first argument to define is not a symbol".to_string(),
            ))
        }
    };

    if name == "define" || name == "begin" {
        return Err(SemanticError::RedefineSpecialForm(name.to_string()));
    }
    if CONSTANTS.contains(&name) {
        return Err(SemanticError::RedefineConstant(name.to_string()));
    }
    if env.is_procedure(target.head()) {
        return Err(SemanticError::RedefineProcedure(name.to_string()));
    }

    let value = eval(&items[1], env, interrupt)?;
    env.add_expression(target.head(), value.clone())?;
    trace!(symbol = name, "defined");
    Ok(value)
}

/// `(lambda (p1 .. pn) body)`: build a procedure value without evaluating.
///
/// The parameter list parses as an expression whose head is the first
/// parameter, so head and tail are flattened into a `List` of symbols.
pub(super) fn eval_lambda(items: &[Expression], env: &Environment) -> EvalResult {
    require_two_args!("lambda", items);

    if env.is_expression(&Atom::symbol("lambda")) {
        return Err(SemanticError::InvalidArgument(
            "lambda has been bound as a symbol".to_string(),
        ));
    }

    let (params, body) = (&items[0], &items[1]);
    if !params.is_head_symbol() || !body.is_head_symbol() {
        return Err(SemanticError::InvalidArgument(
            "lambda parameters and body must begin with a symbol".to_string(),
        ));
    }
    if env.is_procedure(params.head()) {
        return Err(SemanticError::InvalidArgument(format!(
            "built-in procedure {} used as a lambda parameter",
            params.head()
        )));
    }

    let mut names = vec![Expression::new(params.head().clone())];
    for param in params.tail() {
        if !param.is_bare_symbol() {
            return Err(SemanticError::InvalidArgument(
                "lambda parameter is not a symbol".to_string(),
            ));
        }
        names.push(param.clone());
    }

    Ok(Expression::lambda(Expression::list(names), body.clone()))
}

/// Validate the operation and list arguments shared by `apply` and `map`.
fn procedure_and_list<'a>(
    form: &str,
    items: &'a [Expression],
    env: &mut Environment,
    interrupt: &InterruptFlag,
) -> Result<(&'a Atom, Expression), SemanticError> {
    require_two_args!(form, items);

    let op = &items[0];
    match op.head().as_symbol() {
        Some(name) if op.is_bare_symbol() && !is_special_form(name) => {}
        _ => return Err(SemanticError::NotAProcedure),
    }
    if !env.is_expression(op.head()) && !env.is_procedure(op.head()) {
        return Err(SemanticError::NotAProcedure);
    }

    let list = eval(&items[1], env, interrupt)?;
    if !list.is_head_list() {
        return Err(SemanticError::InvalidArgument(format!(
            "second argument to {} is not a list",
            form
        )));
    }
    Ok((op.head(), list))
}

/// `(apply op list)`: call `op` with the list elements as its arguments.
pub(super) fn eval_apply(
    items: &[Expression],
    env: &mut Environment,
    interrupt: &InterruptFlag,
) -> EvalResult {
    let (op, list) = procedure_and_list("apply", items, env, interrupt)?;
    apply(op, list.tail(), env, interrupt)
}

/// `(map op list)`: call `op` once per element, collecting a new list.
pub(super) fn eval_map(
    items: &[Expression],
    env: &mut Environment,
    interrupt: &InterruptFlag,
) -> EvalResult {
    let (op, list) = procedure_and_list("map", items, env, interrupt)?;

    let mut results = Vec::with_capacity(list.tail().len());
    for element in list.tail() {
        if interrupt.is_raised() {
            return Err(SemanticError::Interrupted);
        }
        results.push(apply(op, std::slice::from_ref(element), env, interrupt)?);
    }
    Ok(Expression::list(results))
}
