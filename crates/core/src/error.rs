//! Error types
//!
//! Evaluation errors never leave the reducer: every variant is shown to the
//! user as the same `Error` display. Store errors never leave the history
//! store: they are logged and the session continues.

use thiserror::Error;

/// Why an expression could not be evaluated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A numeral with more than one decimal point, e.g. `1.2.3`
    #[error("invalid decimal '{numeral}' at position {position}")]
    InvalidDecimal { numeral: String, position: usize },

    /// A divide operator directly followed by a zero numeral
    #[error("division by zero at position {position}")]
    DivideByZero { position: usize },

    /// Anything the parser cannot make sense of
    #[error("syntax error at position {position}: {message}")]
    Syntax { position: usize, message: String },

    /// Arithmetic overflowed to infinity or produced NaN
    #[error("result is not a finite number")]
    NonFinite,
}

impl EvalError {
    pub(crate) fn syntax(position: usize, message: impl Into<String>) -> Self {
        EvalError::Syntax {
            position,
            message: message.into(),
        }
    }
}

/// Failure reading or writing a session store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("session store holds malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
