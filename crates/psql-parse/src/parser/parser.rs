//! SQL Parser implementation: token handling, statement dispatch, INSERT
//! and DELETE. Queries, expressions and DDL live in sibling modules.

use super::error::ParseError;
use crate::ast::{
    DeleteStatement, InsertSource, InsertStatement, Name, Overriding, QualifiedName,
    SelectStatement, SetQuantifier, Statement,
};
use crate::error::{Error, Result};
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};
use crate::visit;

/// Default limit on the depth of the tree a parse may build.
pub const DEFAULT_MAX_DEPTH: usize = 48;

/// Options controlling a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Deepest tree the parser will build before failing with a
    /// [`ParseError`]. Each query, relational expression and scalar
    /// expression counts as one level; parentheses do not. Recursion while
    /// parsing is separately capped at twice this value, which bounds
    /// redundant parentheses.
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserOptions {
    /// Sets the nesting-depth limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// SQL Parser.
///
/// Pulls tokens from a borrowed [`Lexer`] with one token of lookahead and
/// builds a single [`Statement`].
pub struct Parser<'l> {
    lexer: &'l mut Lexer,
    pub(super) current: Token,
    pub(super) previous: Token,
    peeked: Option<Token>,
    depth: usize,
    options: ParserOptions,
}

impl<'l> Parser<'l> {
    /// Creates a parser reading from `lexer` with default options.
    ///
    /// # Errors
    ///
    /// Returns a lex error if the first token is malformed.
    pub fn new(lexer: &'l mut Lexer) -> Result<Self> {
        Self::with_options(lexer, ParserOptions::default())
    }

    /// Creates a parser reading from `lexer`.
    ///
    /// # Errors
    ///
    /// Returns a lex error if the first token is malformed.
    pub fn with_options(lexer: &'l mut Lexer, options: ParserOptions) -> Result<Self> {
        let current = lexer.next_token()?;
        let origin = Span::new(current.span.start, current.span.start);
        Ok(Self {
            lexer,
            current,
            previous: Token::new(TokenKind::Eof, origin),
            peeked: None,
            depth: 0,
            options,
        })
    }

    /// Parses a single SQL statement spanning the whole input. One trailing
    /// semicolon is allowed.
    ///
    /// # Errors
    ///
    /// Returns the first lex or parse error encountered.
    pub fn parse_statement(&mut self) -> Result<Statement> {
        let statement = match &self.current.kind {
            TokenKind::Keyword(Keyword::Create) => {
                Statement::Create(self.parse_create_statement()?)
            }
            TokenKind::Keyword(Keyword::Insert) => {
                Statement::Insert(self.parse_insert_statement()?)
            }
            TokenKind::Keyword(Keyword::Delete) => {
                Statement::Delete(self.parse_delete_statement()?)
            }
            TokenKind::LeftParen => Statement::Select(self.parse_select_statement()?),
            _ if self.starts_query() => Statement::Select(self.parse_select_statement()?),
            _ => {
                return Err(self.unexpected(
                    "CREATE, INSERT, DELETE, SELECT, VALUES, TABLE, WITH or '('",
                ));
            }
        };

        self.eat(&TokenKind::Semicolon)?;
        if !self.current.is_eof() {
            return Err(self.unexpected("end of input"));
        }
        if let Some(span) = visit::first_node_beyond(&statement, self.options.max_depth) {
            return Err(self.depth_exceeded(span));
        }
        Ok(statement)
    }

    /// Parses a query used as a statement.
    fn parse_select_statement(&mut self) -> Result<SelectStatement> {
        let start = self.current.span;
        let query = self.parse_query()?;
        Ok(SelectStatement {
            query,
            span: self.span_from(start),
        })
    }

    /// Parses an INSERT statement.
    fn parse_insert_statement(&mut self) -> Result<InsertStatement> {
        let start = self.current.span;
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;
        let table = self.parse_qualified_name()?;

        // `(` starts a column list unless it opens a parenthesized query
        let columns = if self.check(&TokenKind::LeftParen) && is_identifier_kind(self.peek()?) {
            self.parse_parenthesized_identifiers()?
        } else {
            vec![]
        };

        let overriding = if self.eat_keyword(Keyword::Overriding)? {
            let overriding = if self.eat_keyword(Keyword::User)? {
                Overriding::UserValue
            } else {
                self.expect_keyword(Keyword::System)?;
                Overriding::SystemValue
            };
            self.expect_keyword(Keyword::Value)?;
            Some(overriding)
        } else {
            None
        };

        let source = if self.eat_keyword(Keyword::Default)? {
            self.expect_keyword(Keyword::Values)?;
            InsertSource::DefaultValues
        } else if self.starts_query() || self.check(&TokenKind::LeftParen) {
            InsertSource::Query(self.parse_query()?)
        } else {
            return Err(self.unexpected("DEFAULT VALUES, VALUES or a query"));
        };

        Ok(InsertStatement {
            table,
            columns,
            overriding,
            source,
            span: self.span_from(start),
        })
    }

    /// Parses a DELETE statement.
    fn parse_delete_statement(&mut self) -> Result<DeleteStatement> {
        let start = self.current.span;
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;
        let only = self.eat_keyword(Keyword::Only)?;
        let table = self.parse_qualified_name()?;

        let selection = if self.eat_keyword(Keyword::Where)? {
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        Ok(DeleteStatement {
            table,
            only,
            selection,
            span: self.span_from(start),
        })
    }

    // --- Names and lists ---

    /// Parses a dotted name such as `catalog.schema.table`.
    pub(super) fn parse_qualified_name(&mut self) -> Result<QualifiedName> {
        let mut parts = vec![self.expect_identifier()?];
        while self.eat(&TokenKind::Dot)? {
            parts.push(self.expect_identifier()?);
        }
        Ok(QualifiedName::from_parts(parts))
    }

    /// Parses `(a, b, ...)`.
    pub(super) fn parse_parenthesized_identifiers(&mut self) -> Result<Vec<Name>> {
        self.parse_parenthesized(|p| p.parse_comma_separated(Self::expect_identifier))
    }

    /// Parses one or more items separated by commas.
    pub(super) fn parse_comma_separated<T>(
        &mut self,
        mut parse: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let mut items = vec![parse(self)?];
        while self.eat(&TokenKind::Comma)? {
            items.push(parse(self)?);
        }
        Ok(items)
    }

    /// Parses `( inner )`.
    pub(super) fn parse_parenthesized<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.expect(&TokenKind::LeftParen)?;
        let inner = parse(self)?;
        self.expect(&TokenKind::RightParen)?;
        Ok(inner)
    }

    /// Parses ALL or DISTINCT if present.
    pub(super) fn parse_set_quantifier(&mut self) -> Result<Option<SetQuantifier>> {
        if self.eat_keyword(Keyword::All)? {
            Ok(Some(SetQuantifier::All))
        } else if self.eat_keyword(Keyword::Distinct)? {
            Ok(Some(SetQuantifier::Distinct))
        } else {
            Ok(None)
        }
    }

    // --- Nesting depth ---

    /// Enters one level of recursion.
    pub(super) fn enter(&mut self) -> Result<()> {
        if self.depth >= self.options.max_depth.saturating_mul(2) {
            return Err(self.depth_exceeded(self.current.span));
        }
        self.depth += 1;
        Ok(())
    }

    fn depth_exceeded(&self, span: Span) -> Error {
        ParseError::new(
            format!("nesting depth limit of {} exceeded", self.options.max_depth),
            span,
        )
        .into()
    }

    /// Leaves `levels` levels entered with [`Parser::enter`].
    pub(super) fn leave(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }

    /// Runs `parse` one nesting level deeper.
    pub(super) fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.enter()?;
        let result = parse(self);
        self.leave(1);
        result
    }

    // --- Helper methods ---

    /// Advances to the next token.
    pub(super) fn advance(&mut self) -> Result<()> {
        let next = match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        self.previous = std::mem::replace(&mut self.current, next);
        Ok(())
    }

    /// Returns the kind of the token after the current one.
    pub(super) fn peek(&mut self) -> Result<&TokenKind> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        Ok(&self.peeked.insert(token).kind)
    }

    /// Checks if the current token matches the given kind.
    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    pub(super) fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(&self.current.kind, TokenKind::Keyword(kw) if *kw == keyword)
    }

    /// Consumes the current token if it matches the given kind.
    pub(super) fn eat(&mut self, kind: &TokenKind) -> Result<bool> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consumes the current token if it is the given keyword.
    pub(super) fn eat_keyword(&mut self, keyword: Keyword) -> Result<bool> {
        if self.check_keyword(keyword) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Expects the current token to be the given kind.
    pub(super) fn expect(&mut self, kind: &TokenKind) -> Result<()> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.unexpected(kind.to_string()))
        }
    }

    /// Expects the current token to be the given keyword.
    pub(super) fn expect_keyword(&mut self, keyword: Keyword) -> Result<()> {
        if self.check_keyword(keyword) {
            self.advance()
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    /// Expects and returns an identifier. Unreserved keywords are accepted
    /// and folded to lower case like any unquoted identifier.
    pub(super) fn expect_identifier(&mut self) -> Result<Name> {
        let name = match &self.current.kind {
            TokenKind::Identifier(name) => name.clone(),
            TokenKind::Keyword(kw) if !kw.is_reserved() => kw.as_str().to_lowercase(),
            _ => return Err(self.unexpected("identifier")),
        };
        self.advance()?;
        Ok(name)
    }

    /// Returns true if the current token starts a query body or WITH clause.
    pub(super) fn starts_query(&self) -> bool {
        matches!(
            &self.current.kind,
            TokenKind::Keyword(Keyword::Select | Keyword::Values | Keyword::Table | Keyword::With)
        )
    }

    /// Returns true if the current token continues a query after its first
    /// operand: a set operator, ORDER BY, OFFSET or FETCH.
    pub(super) fn continues_query(&self) -> bool {
        matches!(
            &self.current.kind,
            TokenKind::Keyword(
                Keyword::Union
                    | Keyword::Intersect
                    | Keyword::Except
                    | Keyword::Order
                    | Keyword::Offset
                    | Keyword::Fetch
            )
        )
    }

    /// Returns the span from `start` to the end of the last consumed token.
    pub(super) fn span_from(&self, start: Span) -> Span {
        start.merge(self.previous.span)
    }

    /// Builds an "unexpected token" error at the current token.
    pub(super) fn unexpected(&self, expected: impl Into<String>) -> Error {
        ParseError::unexpected(expected, self.current.kind.clone(), self.current.span).into()
    }
}

/// Returns true for tokens usable as identifiers.
pub(super) const fn is_identifier_kind(kind: &TokenKind) -> bool {
    match kind {
        TokenKind::Identifier(_) => true,
        TokenKind::Keyword(kw) => !kw.is_reserved(),
        _ => false,
    }
}
