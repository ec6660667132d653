//! Crate-level error type.

use thiserror::Error;

use crate::lexer::{LexError, Span};
use crate::parser::ParseError;

/// Any failure of a parse call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input could not be split into tokens.
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    /// The tokens do not form a statement.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// Returns the location of the offending input.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Lex(e) => e.span,
            Self::Parse(e) => e.span,
        }
    }

    /// Returns the message without the location.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Lex(e) => &e.message,
            Self::Parse(e) => &e.message,
        }
    }
}

/// Result type used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Position;

    #[test]
    fn test_span_and_message() {
        let span = Span::new(Position::new(3, 1, 4), Position::new(4, 1, 5));
        let err: Error = LexError::new("Unterminated string", span).into();
        assert_eq!(err.span(), span);
        assert_eq!(err.message(), "Unterminated string");
        assert_eq!(err.to_string(), "lex error: Unterminated string at 1:4");

        let err: Error = ParseError::new("boom", span).into();
        assert!(matches!(err, Error::Parse(_)));
        assert_eq!(err.to_string(), "parse error: boom at 1:4");
    }
}
