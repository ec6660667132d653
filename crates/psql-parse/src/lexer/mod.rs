//! SQL Lexer/Tokenizer
//!
//! This module provides a hand-written lexer for SQL that produces a stream
//! of tokens, each tagged with its line/column span.

mod error;
mod span;
mod token;
mod tokenizer;

pub use error::LexError;
pub use span::{Position, Span};
pub use token::{Keyword, StringKind, Token, TokenKind};
pub use tokenizer::Lexer;
