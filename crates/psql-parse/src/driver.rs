//! Parse driver.
//!
//! A [`Driver`] owns a [`Lexer`] and reuses its buffer across calls. Every
//! call to [`Driver::parse`] resets the lexer, so the trees returned by
//! consecutive calls share nothing.

use tracing::debug;

use crate::ast::Statement;
use crate::error::Result;
use crate::lexer::Lexer;
use crate::parser::{Parser, ParserOptions};

/// Runs one parse per call over a reusable lexer.
#[derive(Debug)]
pub struct Driver {
    lexer: Lexer,
    options: ParserOptions,
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver {
    /// Creates a driver with default parser options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ParserOptions::default())
    }

    /// Creates a driver with the given parser options.
    #[must_use]
    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            lexer: Lexer::new(""),
            options,
        }
    }

    /// Returns the options used for every parse.
    #[must_use]
    pub const fn options(&self) -> ParserOptions {
        self.options
    }

    /// Parses `text` as exactly one statement.
    ///
    /// # Errors
    ///
    /// Returns the first lex or parse error in `text`. No partial tree is
    /// returned.
    pub fn parse(&mut self, text: &str) -> Result<Statement> {
        debug!(len = text.len(), "parsing statement");
        self.lexer.reset(text);

        let result = Parser::with_options(&mut self.lexer, self.options)
            .and_then(|mut parser| parser.parse_statement());
        match &result {
            Ok(statement) => debug!(kind = statement.kind(), "parsed statement"),
            Err(err) => debug!(%err, "parse failed"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expression, RelExpression};
    use crate::visit::structurally_equal;
    use crate::Error;

    #[test]
    fn test_driver_is_reusable() {
        let mut driver = Driver::new();
        let first = driver.parse("SELECT 1").unwrap();
        let second = driver.parse("SELECT 1").unwrap();
        assert!(structurally_equal(&first, &second));

        let other = driver.parse("SELECT 2").unwrap();
        assert!(!structurally_equal(&first, &other));
    }

    #[test]
    fn test_error_does_not_poison_driver() {
        let mut driver = Driver::new();
        assert!(matches!(driver.parse("SELECT"), Err(Error::Parse(_))));
        assert!(matches!(driver.parse("SELECT 'abc"), Err(Error::Lex(_))));

        let Statement::Select(select) = driver.parse("select a from t").unwrap() else {
            panic!("expected a SELECT statement");
        };
        let RelExpression::Select(body) = &select.query.body else {
            panic!("expected a plain SELECT body");
        };
        assert!(matches!(&body.targets[..], [Expression::Var(_)]));
    }

    #[test]
    fn test_spans_restart_per_parse() {
        let mut driver = Driver::new();
        driver.parse("SELECT a,\n  b FROM t").unwrap();
        let statement = driver.parse("DELETE FROM t").unwrap();
        assert_eq!(statement.span().start.line, 1);
        assert_eq!(statement.span().start.column, 1);
    }

    #[test]
    fn test_max_depth_option() {
        let mut driver = Driver::with_options(ParserOptions::default().with_max_depth(4));
        assert_eq!(driver.options().max_depth, 4);
        assert!(driver.parse("SELECT 1").is_ok());
        assert!(driver.parse("SELECT ((((((1))))))").is_ok());
        assert!(driver.parse("SELECT NOT NOT a").is_err());
    }
}
