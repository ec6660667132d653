//! SQL statement AST types.

use super::common::{Name, QualifiedName};
use super::expression::Expression;
use super::query::Query;
use super::types::{ColumnDef, TableConstraint};
use crate::lexer::Span;

/// GLOBAL or LOCAL TEMPORARY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Temporary {
    Global,
    Local,
}

impl Temporary {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "GLOBAL TEMPORARY",
            Self::Local => "LOCAL TEMPORARY",
        }
    }
}

/// ON COMMIT policy of a temporary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum OnCommit {
    /// ON COMMIT DELETE ROWS
    Delete,
    /// ON COMMIT PRESERVE ROWS
    Preserve,
}

impl OnCommit {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Delete => "ON COMMIT DELETE ROWS",
            Self::Preserve => "ON COMMIT PRESERVE ROWS",
        }
    }
}

/// One element of the parenthesized CREATE TABLE body.
#[derive(Debug, Clone)]
pub enum TableElement {
    Column(ColumnDef),
    Constraint(TableConstraint),
}

/// A CREATE TABLE statement.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateStatement {
    pub name: QualifiedName,
    pub temporary: Option<Temporary>,
    pub on_commit: Option<OnCommit>,
    pub columns: Vec<ColumnDef>,
    pub constraints: Vec<TableConstraint>,
    pub span: Span,
}

impl CreateStatement {
    /// Builds the statement from its table elements, separating column
    /// definitions from table constraints. A temporary table without an
    /// explicit ON COMMIT gets ON COMMIT DELETE ROWS.
    #[must_use]
    pub fn new(
        name: QualifiedName,
        temporary: Option<Temporary>,
        on_commit: Option<OnCommit>,
        elements: Vec<TableElement>,
        span: Span,
    ) -> Self {
        let on_commit = match (temporary, on_commit) {
            (Some(_), None) => Some(OnCommit::Delete),
            (_, on_commit) => on_commit,
        };

        let mut columns = vec![];
        let mut constraints = vec![];
        for element in elements {
            match element {
                TableElement::Column(column) => columns.push(column),
                TableElement::Constraint(constraint) => constraints.push(constraint),
            }
        }

        Self {
            name,
            temporary,
            on_commit,
            columns,
            constraints,
            span,
        }
    }
}

/// OVERRIDING USER VALUE or OVERRIDING SYSTEM VALUE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Overriding {
    UserValue,
    SystemValue,
}

impl Overriding {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UserValue => "OVERRIDING USER VALUE",
            Self::SystemValue => "OVERRIDING SYSTEM VALUE",
        }
    }
}

/// Source of rows for INSERT.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum InsertSource {
    /// DEFAULT VALUES
    DefaultValues,
    /// A query, including a plain VALUES list.
    Query(Query),
}

/// An INSERT statement.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InsertStatement {
    pub table: QualifiedName,
    /// Explicit target columns, empty when absent.
    pub columns: Vec<Name>,
    pub overriding: Option<Overriding>,
    pub source: InsertSource,
    pub span: Span,
}

/// A DELETE statement.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeleteStatement {
    pub table: QualifiedName,
    /// DELETE FROM ONLY: exclude inheriting tables.
    pub only: bool,
    pub selection: Option<Expression>,
    pub span: Span,
}

/// A query used as a statement.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SelectStatement {
    pub query: Query,
    pub span: Span,
}

/// A SQL statement.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Statement {
    /// CREATE TABLE statement.
    Create(CreateStatement),
    /// INSERT statement.
    Insert(InsertStatement),
    /// DELETE statement.
    Delete(DeleteStatement),
    /// SELECT, VALUES, TABLE or WITH query.
    Select(SelectStatement),
}

impl Statement {
    /// Returns the source span of the statement.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Create(s) => s.span,
            Self::Insert(s) => s.span,
            Self::Delete(s) => s.span,
            Self::Select(s) => s.span,
        }
    }

    /// Returns the leading keyword of the statement.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Create(_) => "CREATE",
            Self::Insert(_) => "INSERT",
            Self::Delete(_) => "DELETE",
            Self::Select(_) => "SELECT",
        }
    }
}
