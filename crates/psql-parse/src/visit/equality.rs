//! Structural equality: two trees are equal when they have the same shape
//! and the same values, wherever they came from in the source.

use crate::ast::{
    AggregateExpr, AggregateFunction, AliasExpr, Asterisk, BetweenPred, BinaryExpr, BinaryOp,
    BooleanLiteral, CollateExpr, ColumnConstraint, ColumnConstraintKind, ColumnDef,
    ColumnDefault, CreateStatement, Cte, Cube, DataType, DeleteStatement, ExistsPred, Expression,
    Fetch, FetchKind, FloatLiteral, FrameBound, FrameBoundKind, FrameExclusion, FrameUnit,
    GroupClause, GroupingSet, GroupingSets, InPred, InsertSource, InsertStatement, IntegerLiteral,
    IsExpr, JoinCondition, JoinExpr, JoinKind, LikePred, MatchOption, NullLiteral, NullOrder,
    NullPred, OnCommit, Overriding, QualifiedName, Query, References, ReferentialTriggeredAction,
    RelExpression, Rollup, RowExpr, RowSubquery, SelectExpr, SelectStatement, SetOp,
    SetOperator, SetQuantifier, SortOrder, SortSpec, Statement, StringKind, StringLiteral,
    TableAlias, TableConstraint, TableConstraintKind, TableName, Temporary, TruthValue,
    UnaryExpr, UnaryOp, UniquePred, UserSpec, ValuesExpr, Var, WindowDef, WindowFrame,
    WindowSpec, WithClause,
};

/// Equality that ignores source locations.
pub trait StructuralEq {
    /// Returns true if `self` and `other` have the same shape and values.
    fn structurally_eq(&self, other: &Self) -> bool;
}

/// Compares two trees, ignoring source locations.
#[must_use]
pub fn structurally_equal<T: StructuralEq + ?Sized>(left: &T, right: &T) -> bool {
    left.structurally_eq(right)
}

impl<T: StructuralEq + ?Sized> StructuralEq for Box<T> {
    fn structurally_eq(&self, other: &Self) -> bool {
        (**self).structurally_eq(other)
    }
}

/// Two absent values are equal; an absent and a present value never are.
impl<T: StructuralEq> StructuralEq for Option<T> {
    fn structurally_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (None, None) => true,
            (Some(a), Some(b)) => a.structurally_eq(b),
            _ => false,
        }
    }
}

impl<T: StructuralEq> StructuralEq for [T] {
    fn structurally_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.structurally_eq(b))
    }
}

impl<T: StructuralEq> StructuralEq for Vec<T> {
    fn structurally_eq(&self, other: &Self) -> bool {
        self.as_slice().structurally_eq(other.as_slice())
    }
}

impl StructuralEq for f64 {
    fn structurally_eq(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}

macro_rules! impl_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl StructuralEq for $ty {
                fn structurally_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

impl_by_value! {
    bool, i64, u64, String, QualifiedName, DataType,
    SetQuantifier, StringKind, BinaryOp, UnaryOp, TruthValue, SortOrder, NullOrder,
    AggregateFunction, JoinKind, FrameUnit, FrameBoundKind, FrameExclusion, SetOperator,
    FetchKind, Temporary, OnCommit, Overriding, UserSpec, MatchOption, ReferentialTriggeredAction,
}

/// Compares the listed fields; `span` is never listed.
macro_rules! impl_by_fields {
    ($($ty:ident { $($field:ident),* $(,)? })*) => {
        $(
            impl StructuralEq for $ty {
                #[allow(unused_variables)]
                fn structurally_eq(&self, other: &Self) -> bool {
                    true $(&& self.$field.structurally_eq(&other.$field))*
                }
            }
        )*
    };
}

impl_by_fields! {
    Asterisk { qualifier }
    IntegerLiteral { value }
    FloatLiteral { value }
    StringLiteral { value, kind }
    BooleanLiteral { value }
    NullLiteral {}
    Var { name }
    AliasExpr { name, expr }
    UnaryExpr { op, operand }
    BinaryExpr { left, op, right }
    CollateExpr { expr, collation }
    IsExpr { expr, value }
    NullPred { expr }
    BetweenPred { expr, low, high, symmetric }
    InPred { expr, rows }
    LikePred { expr, pattern, escape }
    ExistsPred { query }
    UniquePred { query }
    RowExpr { values }
    RowSubquery { query }
    SortSpec { expr, order, nulls }
    GroupingSet { columns }
    GroupingSets { sets }
    Rollup { sets }
    Cube { sets }
    AggregateExpr { func, quantifier, argument, filter }

    JoinExpr { kind, natural, condition, left, right }
    TableName { name }
    TableAlias { name, columns, relation }
    GroupClause { quantifier, groupings }
    FrameBound { kind, value }
    WindowFrame { unit, start, end, exclusion }
    WindowSpec { existing, partition_by, order_by, frame }
    WindowDef { name, spec }
    SelectExpr { quantifier, targets, from, selection, group_by, having, windows }
    ValuesExpr { rows }
    SetOp { op, quantifier, left, right }
    Cte { name, columns, query }
    WithClause { recursive, ctes }
    Fetch { kind, count, percent, with_ties }
    Query { with, body, order_by, offset, fetch }

    References { table, columns, match_option, actions }
    ColumnConstraint { name, kind }
    ColumnDef { name, data_type, default, constraints, collation }
    TableConstraint { name, kind }
    CreateStatement { name, temporary, on_commit, columns, constraints }
    InsertStatement { table, columns, overriding, source }
    DeleteStatement { table, only, selection }
    SelectStatement { query }
}

/// Compares enums whose variants each wrap one value. Different variants
/// are never equal.
macro_rules! impl_by_variant {
    ($($ty:ident { $($variant:ident),* $(,)? })*) => {
        $(
            impl StructuralEq for $ty {
                fn structurally_eq(&self, other: &Self) -> bool {
                    match (self, other) {
                        $((Self::$variant(a), Self::$variant(b)) => a.structurally_eq(b),)*
                        _ => false,
                    }
                }
            }
        )*
    };
}

impl_by_variant! {
    Expression {
        Asterisk, IntegerLiteral, FloatLiteral, StringLiteral, BooleanLiteral, Null, Var, Alias,
        Unary, Binary, Collate, Is, IsNull, Between, In, Like, Exists, Unique, Row, RowSubquery,
        SortSpec, GroupingSet, GroupingSets, Rollup, Cube, Aggregate,
    }
    RelExpression { Join, Table, Alias, Select, Values, SetOp, Query }
    JoinCondition { On, Using }
    Statement { Create, Insert, Delete, Select }
}

impl StructuralEq for ColumnDefault {
    fn structurally_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::User(a), Self::User(b)) => a == b,
            (Self::Null, Self::Null) => true,
            (Self::Expression(a), Self::Expression(b)) => a.structurally_eq(b),
            _ => false,
        }
    }
}

impl StructuralEq for ColumnConstraintKind {
    fn structurally_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotNull, Self::NotNull)
            | (Self::Unique, Self::Unique)
            | (Self::PrimaryKey, Self::PrimaryKey) => true,
            (Self::References(a), Self::References(b)) => a.structurally_eq(b),
            _ => false,
        }
    }
}

impl StructuralEq for TableConstraintKind {
    fn structurally_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unique(a), Self::Unique(b)) | (Self::PrimaryKey(a), Self::PrimaryKey(b)) => {
                a == b
            }
            (
                Self::ForeignKey {
                    columns: a,
                    references: ra,
                },
                Self::ForeignKey {
                    columns: b,
                    references: rb,
                },
            ) => a == b && ra.structurally_eq(rb),
            _ => false,
        }
    }
}

impl StructuralEq for InsertSource {
    fn structurally_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::DefaultValues, Self::DefaultValues) => true,
            (Self::Query(a), Self::Query(b)) => a.structurally_eq(b),
            _ => false,
        }
    }
}
