//! Abstract Syntax Tree (AST) types for SQL statements.
//!
//! Every node carries the [`Span`](crate::lexer::Span) it was parsed from.
//! Spans take no part in [structural equality](crate::visit::StructuralEq)
//! or in printing.

mod common;
mod expression;
mod query;
mod statement;
mod types;

pub use crate::lexer::StringKind;
pub use common::{is_plain_identifier, Name, QualifiedName, SetQuantifier};
pub use expression::{
    AggregateExpr, AggregateFunction, AliasExpr, Asterisk, BetweenPred, BinaryExpr, BinaryOp,
    BooleanLiteral, CollateExpr, Cube, ExistsPred, Expression, FloatLiteral, GroupingSet,
    GroupingSets, InPred, IntegerLiteral, IsExpr, LikePred, NullLiteral, NullOrder, NullPred,
    Rollup, RowExpr, RowSubquery, SortOrder, SortSpec, StringLiteral, TruthValue, UnaryExpr,
    UnaryOp, UniquePred, Var,
};
pub use query::{
    Cte, Fetch, FetchKind, FrameBound, FrameBoundKind, FrameExclusion, FrameUnit, GroupClause,
    JoinCondition, JoinExpr, JoinKind, Query, RelExpression, SelectExpr, SetOp, SetOperator,
    TableAlias, TableName, ValuesExpr, WindowDef, WindowFrame, WindowSpec, WithClause,
};
pub use statement::{
    CreateStatement, DeleteStatement, InsertSource, InsertStatement, OnCommit, Overriding,
    SelectStatement, Statement, TableElement, Temporary,
};
pub use types::{
    CharLength, CharUnit, ColumnConstraint, ColumnConstraintKind, ColumnDef, ColumnDefault,
    DataType, FieldDef, MatchOption, References, ReferentialAction, ReferentialTriggeredAction,
    TableConstraint, TableConstraintKind, UserSpec,
};
pub(crate) use common::write_ident;
