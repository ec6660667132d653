//! Expression AST types.

use super::common::{Name, QualifiedName, SetQuantifier};
use super::query::{Query, RelExpression};
use crate::lexer::{Span, StringKind};

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BinaryOp {
    // Logical
    /// OR
    Or,
    /// AND
    And,

    // Arithmetic
    /// +
    Add,
    /// -
    Sub,
    /// *
    Mul,
    /// /
    Div,

    // Comparison
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// =
    Eq,
    /// <>
    NotEq,

    // String
    /// ||
    Concat,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Or => "OR",
            Self::And => "AND",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Concat => "||",
        }
    }

    /// Returns true for the non-chaining comparison operators.
    #[must_use]
    pub const fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq | Self::Eq | Self::NotEq
        )
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum UnaryOp {
    /// NOT
    Not,
    /// - (negation)
    Neg,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Not => "NOT",
            Self::Neg => "-",
        }
    }
}

/// TRUE, FALSE or UNKNOWN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TruthValue {
    /// TRUE
    True,
    /// FALSE
    False,
    /// UNKNOWN
    Unknown,
}

impl TruthValue {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Sort direction in a sort specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SortOrder {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortOrder {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Placement of NULLs in a sort specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NullOrder {
    /// Not specified.
    #[default]
    Default,
    /// NULLS FIRST
    First,
    /// NULLS LAST
    Last,
}

/// Aggregate functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AggregateFunction {
    Avg,
    Max,
    Min,
    Sum,
    Count,
    Every,
    Any,
    Some,
    StddevPop,
    StddevSamp,
    VarPop,
    VarSamp,
    Collect,
    Fusion,
    Intersection,
}

impl AggregateFunction {
    /// Returns the SQL function name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Avg => "AVG",
            Self::Max => "MAX",
            Self::Min => "MIN",
            Self::Sum => "SUM",
            Self::Count => "COUNT",
            Self::Every => "EVERY",
            Self::Any => "ANY",
            Self::Some => "SOME",
            Self::StddevPop => "STDDEV_POP",
            Self::StddevSamp => "STDDEV_SAMP",
            Self::VarPop => "VAR_POP",
            Self::VarSamp => "VAR_SAMP",
            Self::Collect => "COLLECT",
            Self::Fusion => "FUSION",
            Self::Intersection => "INTERSECTION",
        }
    }
}

/// `*` or `t.*`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Asterisk {
    /// The relation in front of `.*`, if any.
    pub qualifier: Option<QualifiedName>,
    pub span: Span,
}

/// An integer literal.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IntegerLiteral {
    pub value: i64,
    pub span: Span,
}

/// A floating-point literal.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FloatLiteral {
    pub value: f64,
    pub span: Span,
}

/// A string literal with its declared subtype.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StringLiteral {
    /// The unescaped contents between the quotes.
    pub value: String,
    pub kind: StringKind,
    pub span: Span,
}

/// The NULL value.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NullLiteral {
    pub span: Span,
}

/// TRUE, FALSE or UNKNOWN used as a value.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BooleanLiteral {
    pub value: TruthValue,
    pub span: Span,
}

/// A reference to a named column or variable.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Var {
    pub name: QualifiedName,
    pub span: Span,
}

/// `expr AS name` in a target list.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AliasExpr {
    pub name: Name,
    pub expr: Expression,
    pub span: Span,
}

/// A prefix operator application.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Expression,
    pub span: Span,
}

/// An infix operator application.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BinaryExpr {
    pub left: Expression,
    pub op: BinaryOp,
    pub right: Expression,
    pub span: Span,
}

/// `expr COLLATE collation`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CollateExpr {
    pub expr: Expression,
    pub collation: QualifiedName,
    pub span: Span,
}

/// `expr IS TRUE|FALSE|UNKNOWN`. The negated form is wrapped in NOT.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IsExpr {
    pub expr: Expression,
    pub value: TruthValue,
    pub span: Span,
}

/// `expr IS NULL`. The negated form is wrapped in NOT.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NullPred {
    pub expr: Expression,
    pub span: Span,
}

/// `expr BETWEEN [SYMMETRIC] low AND high`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BetweenPred {
    pub expr: Expression,
    pub low: Expression,
    pub high: Expression,
    pub symmetric: bool,
    pub span: Span,
}

/// `expr IN (...)`.
///
/// A parenthesized value list is held as a [`RelExpression::Values`]; a
/// subquery is held as a [`RelExpression::Query`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InPred {
    pub expr: Expression,
    pub rows: RelExpression,
    pub span: Span,
}

/// `expr LIKE pattern [ESCAPE escape]`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LikePred {
    pub expr: Expression,
    pub pattern: Expression,
    pub escape: Option<Expression>,
    pub span: Span,
}

/// `EXISTS (query)`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExistsPred {
    pub query: Query,
    pub span: Span,
}

/// `UNIQUE (query)`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UniquePred {
    pub query: Query,
    pub span: Span,
}

/// `ROW(a, b)` or `(a, b)`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RowExpr {
    pub values: Vec<Expression>,
    pub span: Span,
}

/// A parenthesized query used as a value.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RowSubquery {
    pub query: Query,
    pub span: Span,
}

/// `expr [ASC|DESC] [NULLS FIRST|LAST]`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SortSpec {
    pub expr: Expression,
    pub order: SortOrder,
    pub nulls: NullOrder,
    pub span: Span,
}

/// An ordinary grouping set: `a`, `(a, b)` or `()`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GroupingSet {
    pub columns: Vec<Expression>,
    pub span: Span,
}

/// `GROUPING SETS (...)`. Each element is itself a grouping construct.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GroupingSets {
    pub sets: Vec<Expression>,
    pub span: Span,
}

/// `ROLLUP (...)`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rollup {
    pub sets: Vec<GroupingSet>,
    pub span: Span,
}

/// `CUBE (...)`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Cube {
    pub sets: Vec<GroupingSet>,
    pub span: Span,
}

/// An aggregate function call, e.g. `COUNT(DISTINCT x) FILTER (WHERE y)`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AggregateExpr {
    pub func: AggregateFunction,
    pub quantifier: Option<SetQuantifier>,
    /// The argument; an [`Expression::Asterisk`] for `COUNT(*)`.
    pub argument: Expression,
    pub filter: Option<Expression>,
    pub span: Span,
}

/// SQL expressions.
///
/// Every variant owns its node through a `Box`, which keeps the enum two
/// words wide and gives the mutually recursive tree a finite size.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Expression {
    /// `*` or `t.*`.
    Asterisk(Box<Asterisk>),
    /// Integer literal.
    IntegerLiteral(Box<IntegerLiteral>),
    /// Float literal.
    FloatLiteral(Box<FloatLiteral>),
    /// String literal.
    StringLiteral(Box<StringLiteral>),
    /// TRUE, FALSE or UNKNOWN.
    BooleanLiteral(Box<BooleanLiteral>),
    /// NULL.
    Null(Box<NullLiteral>),
    /// Column reference.
    Var(Box<Var>),
    /// Aliased target-list entry.
    Alias(Box<AliasExpr>),
    /// NOT or negation.
    Unary(Box<UnaryExpr>),
    /// Binary operation.
    Binary(Box<BinaryExpr>),
    /// COLLATE.
    Collate(Box<CollateExpr>),
    /// IS TRUE/FALSE/UNKNOWN.
    Is(Box<IsExpr>),
    /// IS NULL.
    IsNull(Box<NullPred>),
    /// BETWEEN.
    Between(Box<BetweenPred>),
    /// IN.
    In(Box<InPred>),
    /// LIKE.
    Like(Box<LikePred>),
    /// EXISTS.
    Exists(Box<ExistsPred>),
    /// UNIQUE.
    Unique(Box<UniquePred>),
    /// Row constructor.
    Row(Box<RowExpr>),
    /// Row-producing subquery.
    RowSubquery(Box<RowSubquery>),
    /// Sort specification.
    SortSpec(Box<SortSpec>),
    /// Ordinary grouping set.
    GroupingSet(Box<GroupingSet>),
    /// GROUPING SETS.
    GroupingSets(Box<GroupingSets>),
    /// ROLLUP.
    Rollup(Box<Rollup>),
    /// CUBE.
    Cube(Box<Cube>),
    /// Aggregate function call.
    Aggregate(Box<AggregateExpr>),
}

macro_rules! impl_from_node {
    ($($node:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$node> for Expression {
                fn from(node: $node) -> Self {
                    Self::$variant(Box::new(node))
                }
            }
        )*
    };
}

impl_from_node! {
    Asterisk => Asterisk,
    IntegerLiteral => IntegerLiteral,
    FloatLiteral => FloatLiteral,
    StringLiteral => StringLiteral,
    BooleanLiteral => BooleanLiteral,
    NullLiteral => Null,
    Var => Var,
    AliasExpr => Alias,
    UnaryExpr => Unary,
    BinaryExpr => Binary,
    CollateExpr => Collate,
    IsExpr => Is,
    NullPred => IsNull,
    BetweenPred => Between,
    InPred => In,
    LikePred => Like,
    ExistsPred => Exists,
    UniquePred => Unique,
    RowExpr => Row,
    RowSubquery => RowSubquery,
    SortSpec => SortSpec,
    GroupingSet => GroupingSet,
    GroupingSets => GroupingSets,
    Rollup => Rollup,
    Cube => Cube,
    AggregateExpr => Aggregate,
}

impl Expression {
    /// Returns the source span of the expression.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Asterisk(e) => e.span,
            Self::IntegerLiteral(e) => e.span,
            Self::FloatLiteral(e) => e.span,
            Self::StringLiteral(e) => e.span,
            Self::BooleanLiteral(e) => e.span,
            Self::Null(e) => e.span,
            Self::Var(e) => e.span,
            Self::Alias(e) => e.span,
            Self::Unary(e) => e.span,
            Self::Binary(e) => e.span,
            Self::Collate(e) => e.span,
            Self::Is(e) => e.span,
            Self::IsNull(e) => e.span,
            Self::Between(e) => e.span,
            Self::In(e) => e.span,
            Self::Like(e) => e.span,
            Self::Exists(e) => e.span,
            Self::Unique(e) => e.span,
            Self::Row(e) => e.span,
            Self::RowSubquery(e) => e.span,
            Self::SortSpec(e) => e.span,
            Self::GroupingSet(e) => e.span,
            Self::GroupingSets(e) => e.span,
            Self::Rollup(e) => e.span,
            Self::Cube(e) => e.span,
            Self::Aggregate(e) => e.span,
        }
    }

    /// Returns true if this is a bare `*` or `t.*`.
    #[must_use]
    pub const fn is_asterisk(&self) -> bool {
        matches!(self, Self::Asterisk(_))
    }

    // Constructors without source locations, for building trees by hand.

    /// Creates an unqualified `*`.
    #[must_use]
    pub fn asterisk() -> Self {
        Asterisk {
            qualifier: None,
            span: Span::default(),
        }
        .into()
    }

    /// Creates an integer literal.
    #[must_use]
    pub fn integer(value: i64) -> Self {
        IntegerLiteral {
            value,
            span: Span::default(),
        }
        .into()
    }

    /// Creates a float literal.
    #[must_use]
    pub fn float(value: f64) -> Self {
        FloatLiteral {
            value,
            span: Span::default(),
        }
        .into()
    }

    /// Creates a character string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        StringLiteral {
            value: value.into(),
            kind: StringKind::Char,
            span: Span::default(),
        }
        .into()
    }

    /// Creates a boolean literal.
    #[must_use]
    pub fn boolean(value: TruthValue) -> Self {
        BooleanLiteral {
            value,
            span: Span::default(),
        }
        .into()
    }

    /// Creates a NULL literal.
    #[must_use]
    pub fn null() -> Self {
        NullLiteral {
            span: Span::default(),
        }
        .into()
    }

    /// Creates a reference to an unqualified column.
    #[must_use]
    pub fn var(name: impl Into<Name>) -> Self {
        Var {
            name: QualifiedName::new(name),
            span: Span::default(),
        }
        .into()
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(self, op: BinaryOp, right: Self) -> Self {
        BinaryExpr {
            left: self,
            op,
            right,
            span: Span::default(),
        }
        .into()
    }

    /// Wraps the expression in a unary operator.
    #[must_use]
    pub fn unary(op: UnaryOp, operand: Self) -> Self {
        UnaryExpr {
            op,
            operand,
            span: Span::default(),
        }
        .into()
    }

    /// Wraps the expression in an alias.
    #[must_use]
    pub fn alias(self, name: impl Into<Name>) -> Self {
        AliasExpr {
            name: name.into(),
            expr: self,
            span: Span::default(),
        }
        .into()
    }
}
