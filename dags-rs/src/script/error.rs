//! Script error taxonomy.

use crate::store::StoreError;

/// Any failure raised while running or validating a script.
///
/// Errors propagate out of nested runs untouched; only the public
/// `run_script` entry point renders them as output text.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScriptError {
    /// Wrong parameter count.  `expected` is a count or a `N+` minimum.
    #[error("Incorrect number of parameters: {token}{expected}) - Found: {found}")]
    Arity { token: String, expected: String, found: usize },

    /// Invalid index or blank list/array name.
    #[error("{0}")]
    Range(String),

    /// Division by zero or 32-bit overflow.
    #[error("{0}")]
    Arithmetic(String),

    /// Value is not a valid integer or boolean.
    #[error("{0}")]
    Coercion(String),

    /// Unknown token, missing function or ambiguous function.
    #[error("{0}")]
    Resolution(String),

    /// Unbalanced control flow found while running.
    #[error("{0}")]
    Structural(String),

    /// The cursor ran off the end of the token stream.
    #[error("Unexpected end of script")]
    UnexpectedEnd,

    /// A script-shaped value was dequeued from the in-channel.
    #[error("Invalid value on InChannel: {0}")]
    InvalidInput(String),

    /// Recursion depth or jump budget exhausted.
    #[error("{0}")]
    LimitExceeded(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ScriptError {
    pub fn is_coercion(&self) -> bool {
        matches!(self, ScriptError::Coercion(_))
    }
}

/// Fail unless exactly `expected` parameters were supplied.
pub fn check_count(token: &str, params: &[String], expected: usize) -> Result<(), ScriptError> {
    if params.len() == expected {
        return Ok(());
    }
    Err(ScriptError::Arity {
        token: token.to_owned(),
        expected: expected.to_string(),
        found: params.len(),
    })
}

/// Fail unless at least `expected` parameters were supplied.
pub fn check_at_least(token: &str, params: &[String], expected: usize) -> Result<(), ScriptError> {
    if params.len() >= expected {
        return Ok(());
    }
    Err(ScriptError::Arity {
        token: token.to_owned(),
        expected: format!("{expected}+"),
        found: params.len(),
    })
}
