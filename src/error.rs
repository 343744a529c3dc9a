use std::convert::Infallible;
use std::fmt;

use thiserror::Error;

use crate::functions::Arity;

pub type Result<T> = std::result::Result<T, ExprError>;

/// The closed set of failure kinds reported across the library boundary.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    UndefinedVariable,
    DivisionByZero,
    AllocationFailed,
    InvalidArgument,
    FunctionNotFound,
    NullArgument,
    DuplicateFunction,
    Unknown,
}

impl ErrorKind {
    /// Fixed human-readable message for display.
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::Syntax => "Syntax Error",
            ErrorKind::UndefinedVariable => "Undefined Variable",
            ErrorKind::DivisionByZero => "Division by Zero",
            ErrorKind::AllocationFailed => "Malloc Failed",
            ErrorKind::InvalidArgument => "Invalid Argument",
            ErrorKind::FunctionNotFound => "Function Not Found",
            ErrorKind::NullArgument => "Null Error",
            ErrorKind::DuplicateFunction => "Duplicate Function",
            ErrorKind::Unknown => "Unknown Error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("syntax error at position {position}: {reason}")]
    Syntax {
        position: usize,
        reason: &'static str,
    },

    #[error("function '{name}' expects {expected} arguments, got {actual}")]
    ArityMismatch {
        name: String,
        expected: Arity,
        actual: usize,
    },

    #[error("undefined variable '{0}'")]
    UndefinedVariable(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("allocation failed")]
    AllocationFailed,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("function '{0}' not found")]
    FunctionNotFound(String),

    #[error("duplicate function '{0}'")]
    DuplicateFunction(String),

    #[error("missing {0}")]
    NullArgument(&'static str),

    /// For registered functions whose failure fits no other kind.
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl ExprError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExprError::Syntax { .. } | ExprError::ArityMismatch { .. } => ErrorKind::Syntax,
            ExprError::UndefinedVariable(_) => ErrorKind::UndefinedVariable,
            ExprError::DivisionByZero => ErrorKind::DivisionByZero,
            ExprError::AllocationFailed => ErrorKind::AllocationFailed,
            ExprError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            ExprError::FunctionNotFound(_) => ErrorKind::FunctionNotFound,
            ExprError::DuplicateFunction(_) => ErrorKind::DuplicateFunction,
            ExprError::NullArgument(_) => ErrorKind::NullArgument,
            ExprError::Unknown(_) => ErrorKind::Unknown,
        }
    }

    pub(crate) fn syntax(position: usize, reason: &'static str) -> Self {
        ExprError::Syntax { position, reason }
    }
}

impl From<std::collections::TryReserveError> for ExprError {
    fn from(_: std::collections::TryReserveError) -> Self {
        ExprError::AllocationFailed
    }
}

impl From<Infallible> for ExprError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
