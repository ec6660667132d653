//! # psql-parse
//!
//! A parser for a Postgres-flavored subset of SQL.
//!
//! This crate provides:
//! - A hand-written lexer and a recursive descent parser with Pratt
//!   expression parsing
//! - A typed AST for `CREATE TABLE`, `INSERT`, `DELETE` and queries, with a
//!   source span on every node
//! - A [`Visitor`](visit::Visitor) trait with default traversal, on top of
//!   which the canonical printer, structural equality and a validation pass
//!   are built
//!
//! ## Parsing
//!
//! ```rust
//! use psql_parse::ast::{RelExpression, Statement};
//!
//! let statement = psql_parse::parse("SELECT a FROM t WHERE b > 1").unwrap();
//! let Statement::Select(select) = &statement else { unreachable!() };
//! assert!(matches!(select.query.body, RelExpression::Select(_)));
//! ```
//!
//! ## Canonical Form
//!
//! Every statement prints as SQL that parses back to a structurally equal
//! tree:
//!
//! ```rust
//! use psql_parse::visit::structurally_equal;
//!
//! let statement = psql_parse::parse("select a+b*2 from t").unwrap();
//! let printed = statement.to_string();
//! assert_eq!(printed, "SELECT (a + (b * 2)) FROM t");
//!
//! let reparsed = psql_parse::parse(&printed).unwrap();
//! assert!(structurally_equal(&statement, &reparsed));
//! ```
//!
//! ## Reusing a Driver
//!
//! ```rust
//! use psql_parse::Driver;
//!
//! let mut driver = Driver::new();
//! for sql in ["SELECT 1", "DELETE FROM t", "CREATE TABLE boo (foo INT)"] {
//!     assert!(driver.parse(sql).is_ok());
//! }
//! assert!(driver.parse("SELECT").is_err());
//! ```

pub mod ast;
pub mod driver;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod visit;

pub use ast::Statement;
pub use driver::Driver;
pub use error::{Error, Result};
pub use lexer::{Lexer, Span, Token, TokenKind};
pub use parser::{ParseError, Parser, ParserOptions};

/// Parses `text` as exactly one statement with default options.
///
/// # Errors
///
/// Returns the first lex or parse error in `text`.
pub fn parse(text: &str) -> Result<Statement> {
    Driver::new().parse(text)
}
