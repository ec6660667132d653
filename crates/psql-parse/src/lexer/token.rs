//! Token types for the SQL lexer.

use std::fmt;

use super::Span;

macro_rules! define_keywords {
    (
        reserved { $($reserved:ident => $reserved_text:literal),* $(,)? }
        unreserved { $($unreserved:ident => $unreserved_text:literal),* $(,)? }
    ) => {
        /// SQL keywords.
        ///
        /// Reserved keywords can never be used as identifiers. Unreserved
        /// keywords only have special meaning in specific positions and are
        /// accepted as identifiers everywhere else.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        pub enum Keyword {
            $($reserved,)*
            $($unreserved,)*
        }

        impl Keyword {
            /// Attempts to parse a keyword from a string (case-insensitive).
            #[must_use]
            #[allow(clippy::should_implement_trait)]
            pub fn from_str(s: &str) -> Option<Self> {
                match s.to_ascii_uppercase().as_str() {
                    $($reserved_text => Some(Self::$reserved),)*
                    $($unreserved_text => Some(Self::$unreserved),)*
                    _ => None,
                }
            }

            /// Returns the SQL spelling of the keyword.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$reserved => $reserved_text,)*
                    $(Self::$unreserved => $unreserved_text,)*
                }
            }

            /// Returns true if the keyword can never be used as an identifier.
            #[must_use]
            pub const fn is_reserved(&self) -> bool {
                matches!(self, $(Self::$reserved)|*)
            }
        }
    };
}

define_keywords! {
    reserved {
        All => "ALL",
        And => "AND",
        As => "AS",
        Asc => "ASC",
        Asymmetric => "ASYMMETRIC",
        Between => "BETWEEN",
        By => "BY",
        Collate => "COLLATE",
        Constraint => "CONSTRAINT",
        Create => "CREATE",
        Cross => "CROSS",
        CurrentUser => "CURRENT_USER",
        Default => "DEFAULT",
        Delete => "DELETE",
        Desc => "DESC",
        Distinct => "DISTINCT",
        Escape => "ESCAPE",
        Except => "EXCEPT",
        Exists => "EXISTS",
        False => "FALSE",
        Fetch => "FETCH",
        Foreign => "FOREIGN",
        From => "FROM",
        Full => "FULL",
        Group => "GROUP",
        Having => "HAVING",
        In => "IN",
        Inner => "INNER",
        Insert => "INSERT",
        Intersect => "INTERSECT",
        Into => "INTO",
        Is => "IS",
        Join => "JOIN",
        Left => "LEFT",
        Like => "LIKE",
        Natural => "NATURAL",
        Not => "NOT",
        Null => "NULL",
        Offset => "OFFSET",
        On => "ON",
        Only => "ONLY",
        Or => "OR",
        Order => "ORDER",
        Outer => "OUTER",
        Primary => "PRIMARY",
        References => "REFERENCES",
        Right => "RIGHT",
        Row => "ROW",
        Select => "SELECT",
        SessionUser => "SESSION_USER",
        Symmetric => "SYMMETRIC",
        SystemUser => "SYSTEM_USER",
        Table => "TABLE",
        True => "TRUE",
        Union => "UNION",
        Unique => "UNIQUE",
        Unknown => "UNKNOWN",
        Using => "USING",
        Values => "VALUES",
        Where => "WHERE",
        Window => "WINDOW",
        With => "WITH",
    }
    unreserved {
        Action => "ACTION",
        Any => "ANY",
        Array => "ARRAY",
        Avg => "AVG",
        Bigint => "BIGINT",
        Binary => "BINARY",
        Blob => "BLOB",
        Boolean => "BOOLEAN",
        Cascade => "CASCADE",
        Char => "CHAR",
        Character => "CHARACTER",
        Characters => "CHARACTERS",
        Clob => "CLOB",
        Collect => "COLLECT",
        Commit => "COMMIT",
        Count => "COUNT",
        Cube => "CUBE",
        Current => "CURRENT",
        Date => "DATE",
        Dec => "DEC",
        Decimal => "DECIMAL",
        Double => "DOUBLE",
        Every => "EVERY",
        Exclude => "EXCLUDE",
        Filter => "FILTER",
        First => "FIRST",
        Float => "FLOAT",
        Following => "FOLLOWING",
        Fusion => "FUSION",
        Global => "GLOBAL",
        Grouping => "GROUPING",
        Groups => "GROUPS",
        Int => "INT",
        Integer => "INTEGER",
        Intersection => "INTERSECTION",
        Key => "KEY",
        Large => "LARGE",
        Last => "LAST",
        Local => "LOCAL",
        Match => "MATCH",
        Max => "MAX",
        Min => "MIN",
        Multiset => "MULTISET",
        National => "NATIONAL",
        Nchar => "NCHAR",
        Nclob => "NCLOB",
        Next => "NEXT",
        No => "NO",
        Nulls => "NULLS",
        Numeric => "NUMERIC",
        Object => "OBJECT",
        Octets => "OCTETS",
        Others => "OTHERS",
        Overriding => "OVERRIDING",
        Partial => "PARTIAL",
        Partition => "PARTITION",
        Percent => "PERCENT",
        Preceding => "PRECEDING",
        Precision => "PRECISION",
        Preserve => "PRESERVE",
        Range => "RANGE",
        Real => "REAL",
        Recursive => "RECURSIVE",
        Ref => "REF",
        Restrict => "RESTRICT",
        Rollup => "ROLLUP",
        Rows => "ROWS",
        Scope => "SCOPE",
        Set => "SET",
        Sets => "SETS",
        Simple => "SIMPLE",
        Smallint => "SMALLINT",
        Some => "SOME",
        StddevPop => "STDDEV_POP",
        StddevSamp => "STDDEV_SAMP",
        Sum => "SUM",
        System => "SYSTEM",
        Temp => "TEMP",
        Temporary => "TEMPORARY",
        Ties => "TIES",
        Time => "TIME",
        Timestamp => "TIMESTAMP",
        Unbounded => "UNBOUNDED",
        Update => "UPDATE",
        User => "USER",
        Value => "VALUE",
        VarPop => "VAR_POP",
        VarSamp => "VAR_SAMP",
        Varbinary => "VARBINARY",
        Varchar => "VARCHAR",
        Varying => "VARYING",
        Without => "WITHOUT",
        Zone => "ZONE",
    }
}

/// The declared subtype of a string literal, given by its prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum StringKind {
    /// `B'0101'`
    Bit,
    /// `'text'` or `E'escaped\ttext'`
    #[default]
    Char,
    /// `X'1F'`
    Hex,
    /// `N'text'`
    National,
}

impl StringKind {
    /// Returns the literal prefix for this kind.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Bit => "B",
            Self::Char => "",
            Self::Hex => "X",
            Self::National => "N",
        }
    }
}

/// Token kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Integer literal (e.g., 42)
    Integer(i64),
    /// Float literal (e.g., 3.14)
    Float(f64),
    /// String literal with its prefix kind (e.g., 'hello', X'1F')
    String { value: String, kind: StringKind },

    // Identifiers and keywords
    /// Identifier, folded to lower case unless it was quoted
    Identifier(String),
    /// SQL keyword
    Keyword(Keyword),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// =
    Eq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// ||
    Concat,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,

    /// End of input
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "integer {i}"),
            Self::Float(x) => write!(f, "float {x}"),
            Self::String { value, kind } => write!(f, "string {}'{value}'", kind.prefix()),
            Self::Identifier(name) => write!(f, "identifier \"{name}\""),
            Self::Keyword(kw) => write!(f, "keyword {}", kw.as_str()),
            Self::Plus => f.write_str("'+'"),
            Self::Minus => f.write_str("'-'"),
            Self::Star => f.write_str("'*'"),
            Self::Slash => f.write_str("'/'"),
            Self::Eq => f.write_str("'='"),
            Self::NotEq => f.write_str("'<>'"),
            Self::Lt => f.write_str("'<'"),
            Self::LtEq => f.write_str("'<='"),
            Self::Gt => f.write_str("'>'"),
            Self::GtEq => f.write_str("'>='"),
            Self::Concat => f.write_str("'||'"),
            Self::LeftParen => f.write_str("'('"),
            Self::RightParen => f.write_str("')'"),
            Self::LeftBracket => f.write_str("'['"),
            Self::RightBracket => f.write_str("']'"),
            Self::Comma => f.write_str("','"),
            Self::Semicolon => f.write_str("';'"),
            Self::Dot => f.write_str("'.'"),
            Self::Eof => f.write_str("end of input"),
        }
    }
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }
}
