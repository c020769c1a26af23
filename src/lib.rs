/// Plotscript - Interpreter Library
///
/// This library provides an interpreter for plotscript, a small prefix-notation
/// language for numeric computation and for building plot descriptions. Values
/// are numbers, complex numbers, symbols, strings, lists and procedures, and
/// any expression can carry named properties that renderers consume.
///
/// # Architecture
///
/// The pipeline consists of two stages and an optional concurrent front:
///
/// 1. **Lexical Analysis & S-expression Parsing** (`sexpr` module)
///    - Tokenizes input text into parentheses and atoms
///    - Builds an `Expression` tree; `;` starts a line comment
///
/// 2. **Backend Evaluation** (`backend` module)
///    - Evaluates expressions against an `Environment`
///    - Special forms: `begin`, `define`, `lambda`, `apply`, `map`,
///      `set-property`, `get-property`, `discrete-plot`
///    - Built-in arithmetic over reals and complex numbers, list procedures
///
/// 3. **Kernel** (`backend::kernel`)
///    - A worker thread serving evaluation requests over message queues,
///      controlled by the REPL (`repl` module)
///
/// # Example
///
/// ```rust
/// use plotscript::backend::*;
///
/// let mut interp = Interpreter::new();
/// interp.eval_str("(define square (lambda (x) (* x x)))").unwrap();
/// let result = interp.eval_str("(square 12)").unwrap();
/// assert_eq!(result.to_string(), "(144)");
/// ```
///
/// # Language Features
///
/// - **Definitions**: `(define name value)` binds a name once
/// - **Procedures**: `(lambda (x y) body)` with dynamic scoping
/// - **Higher order**: `(apply + (list 1 2))`, `(map sqrt (list 1 4 9))`
/// - **Properties**: `(set-property "size" 2 (list 0 0))`
/// - **Plotting**: `(discrete-plot data options)` lays out points, lines and
///   labels in a fixed 20 by 20 box

pub mod sexpr;
pub mod backend;
pub mod repl;

pub use sexpr::{parse, Lexer, Parser, Token};
pub use backend::{
    eval, Atom, Environment, Expression, Interpreter, InterruptFlag, Kernel, KernelError,
    SemanticError,
};
