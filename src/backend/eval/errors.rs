use std::fmt;

/// Fixed text reported for any program that fails to parse.
pub const PARSE_FAILURE: &str = "Invalid Expression. Could not parse.";

/// Failure raised while parsing or evaluating a program.
///
/// Every variant renders with an `Error: ` prefix so the text can be shown
/// to the user as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum SemanticError {
    Parse,
    UnknownSymbol(String),
    /// Leaf whose head is neither a symbol nor a self-evaluating literal
    InvalidTerminal,
    EmptyBegin,
    /// Wrong number of arguments; the payload names the operation
    ArityMismatch(String),
    /// Wrong kind of argument; the payload describes what was expected
    InvalidArgument(String),
    RedefineSpecialForm(String),
    RedefineConstant(String),
    RedefineProcedure(String),
    DuplicateBinding(String),
    NotASymbol,
    NotAProcedure,
    UnknownProcedure(String),
    /// Argument outside the mathematical domain of the operation
    DomainError(String),
    Interrupted,
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: ")?;
        match self {
            SemanticError::Parse => write!(f, "{}", PARSE_FAILURE),
            SemanticError::UnknownSymbol(name) => write!(f, "unknown symbol '{}'", name),
            SemanticError::InvalidTerminal => write!(f, "invalid type in terminal expression"),
            SemanticError::EmptyBegin => write!(f, "zero arguments to begin"),
            SemanticError::ArityMismatch(context) => {
                write!(f, "invalid number of arguments to {}", context)
            }
            SemanticError::InvalidArgument(context) => write!(f, "invalid argument: {}", context),
            SemanticError::RedefineSpecialForm(name) => {
                write!(f, "attempt to redefine special-form '{}'", name)
            }
            SemanticError::RedefineConstant(name) => {
                write!(f, "attempt to redefine constant '{}'", name)
            }
            SemanticError::RedefineProcedure(name) => {
                write!(f, "attempt to redefine built-in procedure '{}'", name)
            }
            SemanticError::DuplicateBinding(name) => {
                write!(f, "attempt to overwrite symbol '{}' in environment", name)
            }
            SemanticError::NotASymbol => write!(f, "attempt to add non-symbol to environment"),
            SemanticError::NotAProcedure => write!(f, "first argument is not a procedure"),
            SemanticError::UnknownProcedure(name) => write!(f, "symbol '{}' does not name a procedure", name),
            SemanticError::DomainError(context) => write!(f, "{}", context),
            SemanticError::Interrupted => write!(f, "interpreter kernel interrupted"),
        }
    }
}

impl std::error::Error for SemanticError {}
