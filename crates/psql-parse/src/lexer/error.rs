//! Lexer error type.

use thiserror::Error;

use super::Span;

/// A malformed token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at {span}")]
pub struct LexError {
    /// The error message.
    pub message: String,
    /// The location of the offending text.
    pub span: Span,
}

impl LexError {
    /// Creates a new lex error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}
