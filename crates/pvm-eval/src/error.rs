//! Reduction error types.

use thiserror::Error;

/// Failures while collapsing an arithmetic operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,

    /// The result does not fit in a 64-bit signed integer.
    #[error("integer overflow in '{op}'")]
    Overflow { op: &'static str },
}

/// Errors that end a reduction run. None of them are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A variable was looked up in an environment that does not bind it.
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),

    /// `step` was called on a node in normal form.
    #[error("cannot reduce irreducible node: {0}")]
    Irreducible(String),

    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),

    /// An operator or conditional received a literal of the wrong kind.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// The machine took more steps than its configured limit.
    #[error("step limit of {0} exceeded")]
    StepLimitExceeded(u64),
}

/// Result alias for reduction operations.
pub type EvalResult<T> = Result<T, EvalError>;
