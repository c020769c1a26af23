use crate::backend::environment::Environment;
use crate::backend::interrupt::InterruptFlag;
use crate::backend::models::{EvalResult, Expression};

use super::{eval, SemanticError};

/// Key of a property form. Must be a string literal, checked before any
/// argument is evaluated.
fn property_key<'a>(form: &str, key: &'a Expression) -> Result<&'a str, SemanticError> {
    match key.head().as_str() {
        Some(text) if key.tail().is_empty() => Ok(text),
        _ => Err(SemanticError::InvalidArgument(format!(
            "first argument to {} is not a string",
            form
        ))),
    }
}

/// `(set-property "key" value target)`: return `target` with `key` set.
pub(super) fn eval_set_property(
    items: &[Expression],
    env: &mut Environment,
    interrupt: &InterruptFlag,
) -> EvalResult {
    require_three_args!("set-property", items);

    let key = property_key("set-property", &items[0])?;
    let value = eval(&items[1], env, interrupt)?;
    let mut target = eval(&items[2], env, interrupt)?;
    target.set_property(key, value);
    Ok(target)
}

/// `(get-property "key" target)`: the stored value, or `None` if absent.
pub(super) fn eval_get_property(
    items: &[Expression],
    env: &mut Environment,
    interrupt: &InterruptFlag,
) -> EvalResult {
    require_two_args!("get-property", items);

    let key = property_key("get-property", &items[0])?;
    let target = eval(&items[1], env, interrupt)?;
    Ok(target.get_property(key))
}
