//! Relational expression AST types: FROM items, SELECT, set operations and
//! the `Query` wrapper.

use super::common::{Name, QualifiedName, SetQuantifier};
use super::expression::{Expression, SortSpec};
use crate::lexer::Span;

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum JoinKind {
    /// INNER JOIN (also CROSS JOIN, which has no condition).
    Inner,
    /// LEFT OUTER JOIN.
    Left,
    /// RIGHT OUTER JOIN.
    Right,
    /// FULL OUTER JOIN.
    Full,
}

impl JoinKind {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER",
            Self::Left => "LEFT OUTER",
            Self::Right => "RIGHT OUTER",
            Self::Full => "FULL OUTER",
        }
    }
}

/// The qualifier of a join: either `ON` or `USING`, never both.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum JoinCondition {
    /// ON expr
    On(Expression),
    /// USING (columns)
    Using(Vec<Name>),
}

/// A joined table.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct JoinExpr {
    pub kind: JoinKind,
    pub natural: bool,
    pub condition: Option<JoinCondition>,
    pub left: RelExpression,
    pub right: RelExpression,
    pub span: Span,
}

impl JoinExpr {
    /// Creates a join without NATURAL and without a condition.
    #[must_use]
    pub const fn new(kind: JoinKind, left: RelExpression, right: RelExpression, span: Span) -> Self {
        Self {
            kind,
            natural: false,
            condition: None,
            left,
            right,
            span,
        }
    }

    /// Marks the join NATURAL.
    pub fn set_natural(&mut self) {
        self.natural = true;
    }

    /// Attaches an ON or USING qualifier, replacing any previous one.
    pub fn set_condition(&mut self, condition: JoinCondition) {
        self.condition = Some(condition);
    }

    /// Returns true for a CROSS JOIN: an inner join with no qualifier.
    #[must_use]
    pub const fn is_cross(&self) -> bool {
        matches!(self.kind, JoinKind::Inner) && !self.natural && self.condition.is_none()
    }
}

/// A bare table reference.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableName {
    pub name: QualifiedName,
    pub span: Span,
}

/// `relation [AS] name [(columns)]`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableAlias {
    pub name: Name,
    /// Column renames, empty when absent.
    pub columns: Vec<Name>,
    pub relation: RelExpression,
    pub span: Span,
}

/// `GROUP BY [ALL|DISTINCT] groupings`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GroupClause {
    pub quantifier: Option<SetQuantifier>,
    /// Grouping constructs: grouping sets, GROUPING SETS, ROLLUP and CUBE.
    pub groupings: Vec<Expression>,
    pub span: Span,
}

/// Frame unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FrameUnit {
    Rows,
    Range,
    Groups,
}

impl FrameUnit {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rows => "ROWS",
            Self::Range => "RANGE",
            Self::Groups => "GROUPS",
        }
    }
}

/// Where a frame bound sits relative to the current row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FrameBoundKind {
    CurrentRow,
    Preceding,
    Following,
}

/// A frame bound. A PRECEDING or FOLLOWING bound without a value is
/// UNBOUNDED.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FrameBound {
    pub kind: FrameBoundKind,
    pub value: Option<Expression>,
    pub span: Span,
}

/// Frame exclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FrameExclusion {
    CurrentRow,
    Group,
    Ties,
    NoOthers,
}

impl FrameExclusion {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CurrentRow => "EXCLUDE CURRENT ROW",
            Self::Group => "EXCLUDE GROUP",
            Self::Ties => "EXCLUDE TIES",
            Self::NoOthers => "EXCLUDE NO OTHERS",
        }
    }
}

/// `ROWS|RANGE|GROUPS start` or `... BETWEEN start AND end`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WindowFrame {
    pub unit: FrameUnit,
    pub start: FrameBound,
    pub end: Option<FrameBound>,
    pub exclusion: Option<FrameExclusion>,
    pub span: Span,
}

/// The parenthesized body of a window definition.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WindowSpec {
    /// An existing window this one refines.
    pub existing: Option<Name>,
    pub partition_by: Vec<Expression>,
    pub order_by: Vec<SortSpec>,
    pub frame: Option<WindowFrame>,
    pub span: Span,
}

/// `name AS (spec)` in a WINDOW clause.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WindowDef {
    pub name: Name,
    pub spec: WindowSpec,
    pub span: Span,
}

/// A SELECT projection without ORDER BY/OFFSET/FETCH.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SelectExpr {
    pub quantifier: Option<SetQuantifier>,
    pub targets: Vec<Expression>,
    /// FROM items, combined as an implicit cross join.
    pub from: Vec<RelExpression>,
    pub selection: Option<Expression>,
    pub group_by: Option<GroupClause>,
    pub having: Option<Expression>,
    pub windows: Vec<WindowDef>,
    pub span: Span,
}

/// `VALUES row, row, ...`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValuesExpr {
    pub rows: Vec<Expression>,
    pub span: Span,
}

/// Set operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SetOperator {
    Union,
    Intersect,
    Except,
}

impl SetOperator {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
        }
    }
}

/// `left UNION|INTERSECT|EXCEPT [ALL|DISTINCT] right`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SetOp {
    pub op: SetOperator,
    pub quantifier: Option<SetQuantifier>,
    pub left: RelExpression,
    pub right: RelExpression,
    pub span: Span,
}

/// One named subquery of a WITH clause.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Cte {
    pub name: Name,
    pub columns: Vec<Name>,
    pub query: Query,
    pub span: Span,
}

/// `WITH [RECURSIVE] cte, ...`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WithClause {
    pub recursive: bool,
    pub ctes: Vec<Cte>,
    pub span: Span,
}

/// FIRST or NEXT; the two are synonyms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FetchKind {
    First,
    Next,
}

impl FetchKind {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "FIRST",
            Self::Next => "NEXT",
        }
    }
}

/// `FETCH FIRST|NEXT [count] [PERCENT] ROWS ONLY|WITH TIES`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Fetch {
    pub kind: FetchKind,
    pub count: Option<Expression>,
    pub percent: bool,
    pub with_ties: bool,
    pub span: Span,
}

/// A full query: the combined body plus WITH, ORDER BY, OFFSET and FETCH,
/// which apply to the outermost result.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Query {
    pub with: Option<WithClause>,
    pub body: RelExpression,
    pub order_by: Vec<SortSpec>,
    pub offset: Option<Expression>,
    pub fetch: Option<Fetch>,
    pub span: Span,
}

impl Query {
    /// Wraps a body without any of the optional clauses.
    #[must_use]
    pub const fn new(body: RelExpression, span: Span) -> Self {
        Self {
            with: None,
            body,
            order_by: Vec::new(),
            offset: None,
            fetch: None,
            span,
        }
    }

    /// Returns true if none of WITH, ORDER BY, OFFSET or FETCH is present.
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.with.is_none()
            && self.order_by.is_empty()
            && self.offset.is_none()
            && self.fetch.is_none()
    }
}

/// Relational expressions.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RelExpression {
    /// Joined table.
    Join(Box<JoinExpr>),
    /// Table reference.
    Table(Box<TableName>),
    /// Aliased relation.
    Alias(Box<TableAlias>),
    /// SELECT projection.
    Select(Box<SelectExpr>),
    /// VALUES list.
    Values(Box<ValuesExpr>),
    /// UNION, INTERSECT or EXCEPT.
    SetOp(Box<SetOp>),
    /// Nested query.
    Query(Box<Query>),
}

macro_rules! impl_from_rel {
    ($($node:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$node> for RelExpression {
                fn from(node: $node) -> Self {
                    Self::$variant(Box::new(node))
                }
            }
        )*
    };
}

impl_from_rel! {
    JoinExpr => Join,
    TableName => Table,
    TableAlias => Alias,
    SelectExpr => Select,
    ValuesExpr => Values,
    SetOp => SetOp,
    Query => Query,
}

impl RelExpression {
    /// Returns the source span of the relational expression.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Join(r) => r.span,
            Self::Table(r) => r.span,
            Self::Alias(r) => r.span,
            Self::Select(r) => r.span,
            Self::Values(r) => r.span,
            Self::SetOp(r) => r.span,
            Self::Query(r) => r.span,
        }
    }

    /// Returns true for the variants that produce rows on their own:
    /// SELECT, VALUES, set operations and nested queries.
    #[must_use]
    pub const fn is_query_like(&self) -> bool {
        matches!(
            self,
            Self::Select(_) | Self::Values(_) | Self::SetOp(_) | Self::Query(_)
        )
    }

    /// Creates a table reference without a source location.
    #[must_use]
    pub fn table(name: QualifiedName) -> Self {
        TableName {
            name,
            span: Span::default(),
        }
        .into()
    }
}
