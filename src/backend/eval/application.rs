use crate::backend::environment::Environment;
use crate::backend::interrupt::InterruptFlag;
use crate::backend::models::{Atom, EvalResult, Expression};

use super::{eval, SemanticError};

/// Apply `op` to already evaluated `args`.
///
/// A name bound to a lambda value runs the body in a clone of the caller's
/// environment with each parameter shadowed and rebound to its argument.
/// Free variables in the body therefore resolve against the caller's
/// bindings at call time (dynamic scoping), not the definition site.
/// Otherwise `op` must name a builtin procedure.
pub fn apply(
    op: &Atom,
    args: &[Expression],
    env: &Environment,
    interrupt: &InterruptFlag,
) -> EvalResult {
    if env.is_expression(op) {
        let procedure = env.get_expression(op);
        return apply_lambda(&procedure, args, env, interrupt);
    }

    let name = op.as_symbol().ok_or(SemanticError::NotAProcedure)?;
    if !env.is_procedure(op) {
        return Err(SemanticError::UnknownProcedure(name.to_string()));
    }

    let procedure = env.get_procedure(op);
    procedure(args)
}

fn apply_lambda(
    procedure: &Expression,
    args: &[Expression],
    env: &Environment,
    interrupt: &InterruptFlag,
) -> EvalResult {
    let (params, body) = match procedure.tail() {
        [params, body] if procedure.is_head_lambda() => (params, body),
        _ => return Err(SemanticError::NotAProcedure),
    };

    if params.tail().len() != args.len() {
        return Err(SemanticError::ArityMismatch(format!(
            "procedure (expected {}, got {})",
            params.tail().len(),
            args.len()
        )));
    }

    let mut scope = env.clone();
    for (param, arg) in params.tail().iter().zip(args) {
        scope.shadow(param.head());
        scope.add_expression(param.head(), arg.clone())?;
    }
    eval(body, &mut scope, interrupt)
}
