//! Names and small enums shared across the AST.

use std::fmt;

use crate::lexer::Keyword;

/// An unqualified identifier.
pub type Name = String;

/// A dotted identifier path: optional schema/catalog parts plus a final name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QualifiedName {
    /// Leading parts, outermost first. Empty for an unqualified name.
    pub qualifier: Vec<Name>,
    /// The final part.
    pub name: Name,
}

impl QualifiedName {
    /// Creates an unqualified name.
    #[must_use]
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            qualifier: vec![],
            name: name.into(),
        }
    }

    /// Creates a name from its dotted parts. The last part becomes the name.
    #[must_use]
    pub fn from_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Name>,
    {
        let mut qualifier: Vec<Name> = parts.into_iter().map(Into::into).collect();
        let name = qualifier.pop().unwrap_or_default();
        Self { qualifier, name }
    }

    /// Returns true if the name has a schema or catalog prefix.
    #[must_use]
    pub fn is_qualified(&self) -> bool {
        !self.qualifier.is_empty()
    }

    /// Iterates over all parts, outermost first.
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        self.qualifier
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.name.as_str()))
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write_ident(f, part)?;
        }
        Ok(())
    }
}

/// ALL or DISTINCT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SetQuantifier {
    /// ALL
    All,
    /// DISTINCT
    Distinct,
}

impl SetQuantifier {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Distinct => "DISTINCT",
        }
    }
}

/// Returns true if `name` survives the lexer unquoted: a lower-case word
/// that is not a keyword.
#[must_use]
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_lowercase() || first == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '$')
        && Keyword::from_str(name).is_none()
}

/// Writes an identifier, double-quoting it when it would not lex back as
/// the same name.
pub(crate) fn write_ident(out: &mut impl fmt::Write, name: &str) -> fmt::Result {
    if is_plain_identifier(name) {
        out.write_str(name)
    } else {
        out.write_char('"')?;
        for c in name.chars() {
            if c == '"' {
                out.write_char('"')?;
            }
            out.write_char(c)?;
        }
        out.write_char('"')
    }
}
