//! SQL data types and CREATE TABLE elements.

use std::fmt;

use super::common::{write_ident, Name, QualifiedName};
use super::expression::Expression;
use crate::lexer::Span;

/// Unit of a character string length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CharUnit {
    Characters,
    Octets,
}

/// A character string length such as `10` or `10 OCTETS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CharLength {
    pub length: u64,
    pub unit: Option<CharUnit>,
}

impl fmt::Display for CharLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.length)?;
        match self.unit {
            Some(CharUnit::Characters) => f.write_str(" CHARACTERS"),
            Some(CharUnit::Octets) => f.write_str(" OCTETS"),
            None => Ok(()),
        }
    }
}

/// A named field of a ROW type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldDef {
    pub name: Name,
    pub data_type: DataType,
}

/// SQL data types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DataType {
    // Exact numeric
    /// NUMERIC with precision and scale.
    Numeric {
        precision: Option<u64>,
        scale: Option<u64>,
    },
    /// DECIMAL (or DEC) with precision and scale.
    Decimal {
        precision: Option<u64>,
        scale: Option<u64>,
    },
    /// SMALLINT.
    SmallInt,
    /// INTEGER (or INT).
    Integer,
    /// BIGINT.
    BigInt,

    // Approximate numeric
    /// FLOAT with optional binary precision.
    Float { precision: Option<u64> },
    /// REAL.
    Real,
    /// DOUBLE PRECISION.
    DoublePrecision,

    // Binary strings
    /// BINARY.
    Binary { length: Option<u64> },
    /// BINARY VARYING (or VARBINARY).
    VarBinary { length: Option<u64> },
    /// BINARY LARGE OBJECT (or BLOB).
    Blob { length: Option<u64> },

    // Character strings
    /// CHARACTER (or CHAR).
    Char(Option<CharLength>),
    /// CHARACTER VARYING (or VARCHAR).
    VarChar(Option<CharLength>),
    /// CHARACTER LARGE OBJECT (or CLOB).
    Clob(Option<CharLength>),
    /// NATIONAL CHARACTER (or NCHAR).
    NationalChar(Option<CharLength>),
    /// NATIONAL CHARACTER VARYING (or NCHAR VARYING).
    NationalVarChar(Option<CharLength>),
    /// NATIONAL CHARACTER LARGE OBJECT (or NCLOB).
    NationalClob(Option<CharLength>),

    /// BOOLEAN.
    Boolean,

    // Datetime
    /// DATE.
    Date,
    /// TIME; `with_time_zone` is `None` when neither WITH nor WITHOUT TIME ZONE was given.
    Time {
        precision: Option<u64>,
        with_time_zone: Option<bool>,
    },
    /// TIMESTAMP.
    Timestamp {
        precision: Option<u64>,
        with_time_zone: Option<bool>,
    },

    /// A user-defined type or domain.
    UserDefined(QualifiedName),

    // Constructed types
    /// ROW(field type, ...).
    Row(Vec<FieldDef>),
    /// REF(type) [SCOPE table].
    Ref {
        target: QualifiedName,
        scope: Option<QualifiedName>,
    },
    /// type ARRAY[n].
    Array {
        element: Box<DataType>,
        max_cardinality: Option<u64>,
    },
    /// type MULTISET.
    Multiset(Box<DataType>),
}

fn write_precision(f: &mut fmt::Formatter<'_>, name: &str, precision: Option<u64>) -> fmt::Result {
    f.write_str(name)?;
    match precision {
        Some(p) => write!(f, "({p})"),
        None => Ok(()),
    }
}

fn write_precision_scale(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    precision: Option<u64>,
    scale: Option<u64>,
) -> fmt::Result {
    f.write_str(name)?;
    match (precision, scale) {
        (Some(p), Some(s)) => write!(f, "({p}, {s})"),
        (Some(p), None) => write!(f, "({p})"),
        _ => Ok(()),
    }
}

fn write_char_length(f: &mut fmt::Formatter<'_>, name: &str, length: Option<CharLength>) -> fmt::Result {
    f.write_str(name)?;
    match length {
        Some(length) => write!(f, "({length})"),
        None => Ok(()),
    }
}

fn write_datetime(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    precision: Option<u64>,
    with_time_zone: Option<bool>,
) -> fmt::Result {
    write_precision(f, name, precision)?;
    match with_time_zone {
        Some(true) => f.write_str(" WITH TIME ZONE"),
        Some(false) => f.write_str(" WITHOUT TIME ZONE"),
        None => Ok(()),
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric { precision, scale } => {
                write_precision_scale(f, "NUMERIC", *precision, *scale)
            }
            Self::Decimal { precision, scale } => {
                write_precision_scale(f, "DECIMAL", *precision, *scale)
            }
            Self::SmallInt => f.write_str("SMALLINT"),
            Self::Integer => f.write_str("INTEGER"),
            Self::BigInt => f.write_str("BIGINT"),
            Self::Float { precision } => write_precision(f, "FLOAT", *precision),
            Self::Real => f.write_str("REAL"),
            Self::DoublePrecision => f.write_str("DOUBLE PRECISION"),
            Self::Binary { length } => write_precision(f, "BINARY", *length),
            Self::VarBinary { length } => write_precision(f, "BINARY VARYING", *length),
            Self::Blob { length } => write_precision(f, "BINARY LARGE OBJECT", *length),
            Self::Char(length) => write_char_length(f, "CHARACTER", *length),
            Self::VarChar(length) => write_char_length(f, "CHARACTER VARYING", *length),
            Self::Clob(length) => write_char_length(f, "CHARACTER LARGE OBJECT", *length),
            Self::NationalChar(length) => write_char_length(f, "NATIONAL CHARACTER", *length),
            Self::NationalVarChar(length) => {
                write_char_length(f, "NATIONAL CHARACTER VARYING", *length)
            }
            Self::NationalClob(length) => {
                write_char_length(f, "NATIONAL CHARACTER LARGE OBJECT", *length)
            }
            Self::Boolean => f.write_str("BOOLEAN"),
            Self::Date => f.write_str("DATE"),
            Self::Time {
                precision,
                with_time_zone,
            } => write_datetime(f, "TIME", *precision, *with_time_zone),
            Self::Timestamp {
                precision,
                with_time_zone,
            } => write_datetime(f, "TIMESTAMP", *precision, *with_time_zone),
            Self::UserDefined(name) => write!(f, "{name}"),
            Self::Row(fields) => {
                f.write_str("ROW(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_ident(f, &field.name)?;
                    write!(f, " {}", field.data_type)?;
                }
                f.write_str(")")
            }
            Self::Ref { target, scope } => {
                write!(f, "REF({target})")?;
                match scope {
                    Some(scope) => write!(f, " SCOPE {scope}"),
                    None => Ok(()),
                }
            }
            Self::Array {
                element,
                max_cardinality,
            } => {
                write!(f, "{element} ARRAY")?;
                match max_cardinality {
                    Some(n) => write!(f, "[{n}]"),
                    None => Ok(()),
                }
            }
            Self::Multiset(element) => write!(f, "{element} MULTISET"),
        }
    }
}

/// CURRENT_USER, SESSION_USER or SYSTEM_USER.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum UserSpec {
    CurrentUser,
    SessionUser,
    SystemUser,
}

impl UserSpec {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CurrentUser => "CURRENT_USER",
            Self::SessionUser => "SESSION_USER",
            Self::SystemUser => "SYSTEM_USER",
        }
    }
}

/// The DEFAULT clause of a column.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ColumnDefault {
    /// DEFAULT CURRENT_USER and friends.
    User(UserSpec),
    /// DEFAULT NULL.
    Null,
    /// Any other default value.
    Expression(Expression),
}

/// MATCH option of a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MatchOption {
    Full,
    Partial,
    /// MATCH SIMPLE, also used when no MATCH clause is given.
    #[default]
    Simple,
}

impl MatchOption {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "FULL",
            Self::Partial => "PARTIAL",
            Self::Simple => "SIMPLE",
        }
    }
}

/// Referential action of ON DELETE / ON UPDATE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ReferentialAction {
    Cascade,
    SetNull,
    SetDefault,
    Restrict,
    #[default]
    NoAction,
}

impl ReferentialAction {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
            Self::Restrict => "RESTRICT",
            Self::NoAction => "NO ACTION",
        }
    }
}

/// Both triggered actions of a foreign key; missing ones are NO ACTION.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReferentialTriggeredAction {
    pub on_delete: ReferentialAction,
    pub on_update: ReferentialAction,
}

/// `REFERENCES table [(columns)] [MATCH ...] [ON DELETE ...] [ON UPDATE ...]`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct References {
    pub table: QualifiedName,
    pub columns: Vec<Name>,
    pub match_option: MatchOption,
    pub actions: ReferentialTriggeredAction,
    pub span: Span,
}

/// The constraint part of a column constraint.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ColumnConstraintKind {
    NotNull,
    Unique,
    PrimaryKey,
    References(References),
}

/// `[CONSTRAINT name] constraint` attached to a column.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnConstraint {
    pub name: Option<QualifiedName>,
    pub kind: ColumnConstraintKind,
    pub span: Span,
}

/// A column definition for CREATE TABLE.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnDef {
    /// Column name.
    pub name: Name,
    /// Data type.
    pub data_type: DataType,
    /// DEFAULT clause.
    pub default: Option<ColumnDefault>,
    /// Column constraints in source order.
    pub constraints: Vec<ColumnConstraint>,
    /// COLLATE clause.
    pub collation: Option<QualifiedName>,
    pub span: Span,
}

impl ColumnDef {
    /// Creates a new column definition with no default, constraints or
    /// collation.
    #[must_use]
    pub fn new(name: impl Into<Name>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            default: None,
            constraints: vec![],
            collation: None,
            span: Span::default(),
        }
    }

    /// Returns true if the column carries a NOT NULL constraint.
    #[must_use]
    pub fn is_not_null(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| matches!(c.kind, ColumnConstraintKind::NotNull))
    }

    /// Returns true if the column carries a PRIMARY KEY constraint.
    #[must_use]
    pub fn is_primary_key(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| matches!(c.kind, ColumnConstraintKind::PrimaryKey))
    }
}

/// The constraint part of a table constraint.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TableConstraintKind {
    /// UNIQUE (columns)
    Unique(Vec<Name>),
    /// PRIMARY KEY (columns)
    PrimaryKey(Vec<Name>),
    /// FOREIGN KEY (columns) REFERENCES ...
    ForeignKey {
        columns: Vec<Name>,
        references: References,
    },
}

/// `[CONSTRAINT name] constraint` at table level.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableConstraint {
    pub name: Option<QualifiedName>,
    pub kind: TableConstraintKind,
    pub span: Span,
}
