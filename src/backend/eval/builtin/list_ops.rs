//! List procedures: list, first, rest, length, append, join, range.

use crate::backend::eval::SemanticError;
use crate::backend::models::{EvalResult, Expression};

use super::extractors::{extract_list, extract_real};

pub(crate) fn list(args: &[Expression]) -> EvalResult {
    Ok(Expression::list(args.to_vec()))
}

fn non_empty<'a>(args: &'a [Expression], op: &str) -> Result<&'a [Expression], SemanticError> {
    require_one_arg!(op, args);

    let items = extract_list(&args[0], op)?;
    if items.is_empty() {
        return Err(SemanticError::InvalidArgument(format!(
            "argument to {} is an empty list",
            op
        )));
    }
    Ok(items)
}

pub(crate) fn first(args: &[Expression]) -> EvalResult {
    let items = non_empty(args, "first")?;
    Ok(items[0].clone())
}

pub(crate) fn rest(args: &[Expression]) -> EvalResult {
    let items = non_empty(args, "rest")?;
    Ok(Expression::list(items[1..].to_vec()))
}

pub(crate) fn length(args: &[Expression]) -> EvalResult {
    require_one_arg!("length", args);

    let items = extract_list(&args[0], "length")?;
    Ok(Expression::number(items.len() as f64))
}

/// Append a single non-list value to the end of a list.
pub(crate) fn append(args: &[Expression]) -> EvalResult {
    require_two_args!("append", args);

    let items = extract_list(&args[0], "append")?;
    if args[1].is_head_list() {
        return Err(SemanticError::InvalidArgument(
            "second argument to append is a list, use join".to_string(),
        ));
    }

    let mut result = items.to_vec();
    result.push(args[1].clone());
    Ok(Expression::list(result))
}

pub(crate) fn join(args: &[Expression]) -> EvalResult {
    require_two_args!("join", args);

    let left = extract_list(&args[0], "join")?;
    let right = extract_list(&args[1], "join")?;
    Ok(Expression::list(left.iter().chain(right).cloned().collect()))
}

/// `(range start end step)`: `start, start+step, ...` up to and including `end`.
pub(crate) fn range(args: &[Expression]) -> EvalResult {
    require_three_args!("range", args);

    let start = extract_real(&args[0], "range")?;
    let end = extract_real(&args[1], "range")?;
    let step = extract_real(&args[2], "range")?;

    if !(step > 0.0) {
        return Err(SemanticError::InvalidArgument(
            "range step must be positive".to_string(),
        ));
    }
    if !(start < end) {
        return Err(SemanticError::InvalidArgument(
            "range start must be less than end".to_string(),
        ));
    }

    // Absorb rounding drift so a step that divides the span reaches `end`.
    let limit = end + step * 1e-9;
    let mut items = Vec::new();
    let mut index = 0.0;
    loop {
        let value = start + index * step;
        if value > limit {
            break;
        }
        items.push(Expression::number(value));
        index += 1.0;
    }
    Ok(Expression::list(items))
}
