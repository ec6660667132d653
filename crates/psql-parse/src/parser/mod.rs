//! SQL Parser
//!
//! A hand-written recursive descent parser with Pratt expression parsing.
//! Statements, queries, expressions and DDL are split over sibling modules
//! that all extend the one [`Parser`] type.

mod ddl;
mod error;
mod expression;
#[allow(clippy::module_inception)]
mod parser;
mod pratt;
mod query;

pub use error::ParseError;
pub use parser::{Parser, ParserOptions, DEFAULT_MAX_DEPTH};
