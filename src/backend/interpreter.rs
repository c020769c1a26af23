use tracing::debug;

use super::environment::Environment;
use super::eval::{eval, SemanticError};
use super::interrupt::InterruptFlag;
use super::models::{EvalResult, Expression};
use crate::sexpr;

/// Program evaluated into every fresh environment before user input.
pub const STARTUP_PROGRAM: &str = include_str!("../../startup.pls");

/// Parse-then-evaluate facade over one long-lived environment.
#[derive(Clone)]
pub struct Interpreter {
    env: Environment,
    interrupt: InterruptFlag,
    ast: Option<Expression>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_environment(Environment::new(), InterruptFlag::new())
    }

    /// Interpreter evaluating against `env`, polling `interrupt`.
    pub fn with_environment(env: Environment, interrupt: InterruptFlag) -> Self {
        Interpreter {
            env,
            interrupt,
            ast: None,
        }
    }

    /// Parse `program`, keeping the tree for [`Interpreter::evaluate`].
    /// A failed parse discards any previously parsed tree.
    pub fn parse_stream(&mut self, program: &str) -> Result<(), SemanticError> {
        self.ast = None;
        self.ast = Some(sexpr::parse(program)?);
        Ok(())
    }

    /// Evaluate the last parsed program. Definitions persist in the
    /// environment, also after an error.
    pub fn evaluate(&mut self) -> EvalResult {
        let ast = self.ast.as_ref().ok_or(SemanticError::Parse)?;
        debug!(program = %ast, "evaluating");
        eval(ast, &mut self.env, &self.interrupt)
    }

    /// Parse and evaluate `program` in one step.
    pub fn eval_str(&mut self, program: &str) -> EvalResult {
        self.parse_stream(program)?;
        self.evaluate()
    }

    /// Evaluate a startup program. Its result is discarded.
    pub fn load_startup(&mut self, program: &str) -> Result<(), SemanticError> {
        self.eval_str(program).map(|_| ())
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn into_environment(self) -> Environment {
        self.env
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
