use std::collections::HashMap;
use std::f64::consts::{E, PI};

use num_complex::Complex64;

use super::eval::{builtin, SemanticError};
use super::models::{Atom, EvalResult, Expression};

/// Built-in procedure: receives already evaluated arguments.
pub type Procedure = fn(&[Expression]) -> EvalResult;

/// What a symbol is bound to.
#[derive(Clone)]
pub enum EnvEntry {
    Expression(Expression),
    Procedure(Procedure),
}

/// Symbol table mapping names to stored expressions or builtin procedures.
///
/// A binding is never overwritten once made; the only ways to drop one are
/// [`Environment::shadow`] (used on a cloned environment when binding lambda
/// parameters) and [`Environment::reset`].
#[derive(Clone)]
pub struct Environment {
    bindings: HashMap<String, EnvEntry>,
}

impl Environment {
    /// Environment holding the default constants and procedures.
    pub fn new() -> Self {
        let mut env = Environment {
            bindings: HashMap::new(),
        };
        env.reset();
        env
    }

    fn lookup(&self, sym: &Atom) -> Option<&EnvEntry> {
        sym.as_symbol().and_then(|name| self.bindings.get(name))
    }

    /// True if `sym` is a symbol bound to anything.
    pub fn is_known(&self, sym: &Atom) -> bool {
        self.lookup(sym).is_some()
    }

    pub fn is_expression(&self, sym: &Atom) -> bool {
        matches!(self.lookup(sym), Some(EnvEntry::Expression(_)))
    }

    pub fn is_procedure(&self, sym: &Atom) -> bool {
        matches!(self.lookup(sym), Some(EnvEntry::Procedure(_)))
    }

    /// Stored expression for `sym`, or a `None` expression on a miss.
    pub fn get_expression(&self, sym: &Atom) -> Expression {
        match self.lookup(sym) {
            Some(EnvEntry::Expression(exp)) => exp.clone(),
            _ => Expression::default(),
        }
    }

    /// Builtin bound to `sym`, or a procedure that yields a `None`
    /// expression on a miss.
    pub fn get_procedure(&self, sym: &Atom) -> Procedure {
        match self.lookup(sym) {
            Some(EnvEntry::Procedure(proc)) => *proc,
            _ => default_procedure,
        }
    }

    /// Bind `sym` to `exp`.
    pub fn add_expression(&mut self, sym: &Atom, exp: Expression) -> Result<(), SemanticError> {
        let name = sym.as_symbol().ok_or(SemanticError::NotASymbol)?;
        if self.bindings.contains_key(name) {
            return Err(SemanticError::DuplicateBinding(name.to_string()));
        }
        self.bindings
            .insert(name.to_string(), EnvEntry::Expression(exp));
        Ok(())
    }

    /// Remove any binding of `sym`.
    pub fn shadow(&mut self, sym: &Atom) {
        if let Some(name) = sym.as_symbol() {
            self.bindings.remove(name);
        }
    }

    /// Drop every binding and reinstall the defaults.
    pub fn reset(&mut self) {
        self.bindings.clear();

        self.add_constant("pi", Atom::Number(PI));
        self.add_constant("e", Atom::Number(E));
        self.add_constant("I", Atom::Complex(Complex64::new(0.0, 1.0)));
        self.add_constant("-I", Atom::Complex(Complex64::new(0.0, -1.0)));

        for (name, proc) in builtin::PROCEDURES {
            self.bindings
                .insert(name.to_string(), EnvEntry::Procedure(*proc));
        }
    }

    fn add_constant(&mut self, name: &str, value: Atom) {
        self.bindings
            .insert(name.to_string(), EnvEntry::Expression(Expression::new(value)));
    }

    /// Names of every bound symbol, sorted.
    pub fn symbols(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bindings.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

fn default_procedure(_args: &[Expression]) -> EvalResult {
    Ok(Expression::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> Atom {
        Atom::symbol(name)
    }

    #[test]
    fn test_constants_installed() {
        let env = Environment::new();
        assert!(env.is_expression(&sym("pi")));
        assert_eq!(env.get_expression(&sym("pi")), Expression::number(PI));
        assert_eq!(env.get_expression(&sym("e")), Expression::number(E));
        assert_eq!(
            env.get_expression(&sym("I")),
            Expression::new(Atom::Complex(Complex64::new(0.0, 1.0)))
        );
        assert_eq!(
            env.get_expression(&sym("-I")),
            Expression::new(Atom::Complex(Complex64::new(0.0, -1.0)))
        );
    }

    #[test]
    fn test_procedures_installed() {
        let env = Environment::new();
        for name in ["+", "-", "*", "/", "^", "sqrt", "ln", "sin", "list", "first", "range"] {
            assert!(env.is_procedure(&sym(name)), "{} should be a procedure", name);
            assert!(!env.is_expression(&sym(name)));
            assert!(env.is_known(&sym(name)));
        }
    }

    #[test]
    fn test_non_symbols_are_never_known() {
        let env = Environment::new();
        assert!(!env.is_known(&Atom::Number(1.0)));
        assert!(!env.is_procedure(&Atom::string("+")));
        assert!(env.get_expression(&Atom::Number(1.0)).is_none());
    }

    #[test]
    fn test_add_and_lookup() {
        let mut env = Environment::new();
        let hi = sym("hi");
        assert!(!env.is_known(&hi));
        env.add_expression(&hi, Expression::number(1.0)).unwrap();
        assert!(env.is_known(&hi));
        assert!(env.is_expression(&hi));
        assert!(!env.is_procedure(&hi));
        assert_eq!(env.get_expression(&hi), Expression::number(1.0));
    }

    #[test]
    fn test_add_rejects_non_symbol() {
        let mut env = Environment::new();
        let err = env
            .add_expression(&Atom::Number(1.0), Expression::number(1.0))
            .unwrap_err();
        assert_eq!(err, SemanticError::NotASymbol);
    }

    #[test]
    fn test_add_rejects_existing_name() {
        let mut env = Environment::new();
        env.add_expression(&sym("a"), Expression::number(1.0)).unwrap();
        let err = env
            .add_expression(&sym("a"), Expression::number(2.0))
            .unwrap_err();
        assert_eq!(err, SemanticError::DuplicateBinding("a".to_string()));
        assert_eq!(env.get_expression(&sym("a")), Expression::number(1.0));

        let err = env
            .add_expression(&sym("pi"), Expression::number(3.0))
            .unwrap_err();
        assert!(matches!(err, SemanticError::DuplicateBinding(_)));
    }

    #[test]
    fn test_missing_procedure_yields_none() {
        let env = Environment::new();
        let proc = env.get_procedure(&sym("no-such-proc"));
        assert!(proc(&[Expression::number(1.0)]).unwrap().is_none());
    }

    #[test]
    fn test_procedure_invocation() {
        let env = Environment::new();
        let add = env.get_procedure(&sym("+"));
        let result = add(&[Expression::number(1.0), Expression::number(2.0)]).unwrap();
        assert_eq!(result, Expression::number(3.0));
    }

    #[test]
    fn test_shadow_and_rebind() {
        let mut env = Environment::new();
        env.add_expression(&sym("x"), Expression::number(1.0)).unwrap();
        env.shadow(&sym("x"));
        assert!(!env.is_known(&sym("x")));
        env.add_expression(&sym("x"), Expression::number(2.0)).unwrap();
        assert_eq!(env.get_expression(&sym("x")), Expression::number(2.0));
    }

    #[test]
    fn test_clone_is_independent() {
        let env = Environment::new();
        let mut scoped = env.clone();
        scoped.add_expression(&sym("local"), Expression::number(1.0)).unwrap();
        assert!(scoped.is_known(&sym("local")));
        assert!(!env.is_known(&sym("local")));
    }

    #[test]
    fn test_reset_drops_user_bindings() {
        let mut env = Environment::new();
        let baseline = env.len();
        env.add_expression(&sym("a"), Expression::number(1.0)).unwrap();
        env.shadow(&sym("pi"));
        env.reset();
        assert!(!env.is_known(&sym("a")));
        assert!(env.is_known(&sym("pi")));
        assert_eq!(env.len(), baseline);
    }
}
