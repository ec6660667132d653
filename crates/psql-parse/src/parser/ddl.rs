//! CREATE TABLE and the data-type grammar.

use super::parser::Parser;
use crate::ast::{
    CharLength, CharUnit, ColumnConstraint, ColumnConstraintKind, ColumnDef, ColumnDefault,
    CreateStatement, DataType, FieldDef, MatchOption, OnCommit, QualifiedName, ReferentialAction,
    ReferentialTriggeredAction, References, TableConstraint, TableConstraintKind, TableElement,
    Temporary, UserSpec,
};
use crate::error::Result;
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Parses a CREATE TABLE statement.
    pub(super) fn parse_create_statement(&mut self) -> Result<CreateStatement> {
        let start = self.current.span;
        self.expect_keyword(Keyword::Create)?;
        let temporary = self.parse_temporary()?;
        self.expect_keyword(Keyword::Table)?;
        let name = self.parse_qualified_name()?;

        let elements =
            self.parse_parenthesized(|p| p.parse_comma_separated(Self::parse_table_element))?;

        let on_commit = if self.eat_keyword(Keyword::On)? {
            self.expect_keyword(Keyword::Commit)?;
            let on_commit = if self.eat_keyword(Keyword::Delete)? {
                OnCommit::Delete
            } else if self.eat_keyword(Keyword::Preserve)? {
                OnCommit::Preserve
            } else {
                return Err(self.unexpected("DELETE or PRESERVE"));
            };
            self.expect_keyword(Keyword::Rows)?;
            Some(on_commit)
        } else {
            None
        };

        Ok(CreateStatement::new(
            name,
            temporary,
            on_commit,
            elements,
            self.span_from(start),
        ))
    }

    /// Parses `[GLOBAL | LOCAL] TEMPORARY`. TEMP is accepted as a synonym
    /// and a scope-less temporary table is local.
    fn parse_temporary(&mut self) -> Result<Option<Temporary>> {
        let scope = if self.eat_keyword(Keyword::Global)? {
            Some(Temporary::Global)
        } else if self.eat_keyword(Keyword::Local)? {
            Some(Temporary::Local)
        } else {
            None
        };

        if self.eat_keyword(Keyword::Temporary)? || self.eat_keyword(Keyword::Temp)? {
            Ok(Some(scope.unwrap_or(Temporary::Local)))
        } else if scope.is_some() {
            Err(self.unexpected("TEMPORARY"))
        } else {
            Ok(None)
        }
    }

    fn parse_table_element(&mut self) -> Result<TableElement> {
        match self.current.as_keyword() {
            Some(Keyword::Constraint | Keyword::Unique | Keyword::Primary | Keyword::Foreign) => {
                Ok(TableElement::Constraint(self.parse_table_constraint()?))
            }
            _ => Ok(TableElement::Column(self.parse_column_def()?)),
        }
    }

    /// Parses a column definition. DEFAULT, COLLATE and the column
    /// constraints may appear in any order after the type.
    fn parse_column_def(&mut self) -> Result<ColumnDef> {
        let start = self.current.span;
        let name = self.expect_identifier()?;
        let data_type = self.parse_data_type()?;
        let mut column = ColumnDef::new(name, data_type);

        loop {
            match self.current.as_keyword() {
                Some(Keyword::Default) => {
                    if column.default.is_some() {
                        return Err(self.unexpected("at most one DEFAULT clause"));
                    }
                    self.advance()?;
                    column.default = Some(self.parse_column_default()?);
                }
                Some(Keyword::Collate) => {
                    if column.collation.is_some() {
                        return Err(self.unexpected("at most one COLLATE clause"));
                    }
                    self.advance()?;
                    column.collation = Some(self.parse_qualified_name()?);
                }
                Some(
                    Keyword::Constraint
                    | Keyword::Not
                    | Keyword::Unique
                    | Keyword::Primary
                    | Keyword::References,
                ) => column.constraints.push(self.parse_column_constraint()?),
                _ => break,
            }
        }

        column.span = self.span_from(start);
        Ok(column)
    }

    fn parse_column_default(&mut self) -> Result<ColumnDefault> {
        let user = match self.current.as_keyword() {
            Some(Keyword::CurrentUser) => Some(UserSpec::CurrentUser),
            Some(Keyword::SessionUser) => Some(UserSpec::SessionUser),
            Some(Keyword::SystemUser) => Some(UserSpec::SystemUser),
            _ => None,
        };
        if let Some(user) = user {
            self.advance()?;
            return Ok(ColumnDefault::User(user));
        }

        // NULL on its own is the null default; NULL inside a larger
        // expression is an ordinary expression.
        if self.check_keyword(Keyword::Null) && !self.continues_default()? {
            self.advance()?;
            return Ok(ColumnDefault::Null);
        }

        Ok(ColumnDefault::Expression(self.parse_expression(0)?))
    }

    /// Returns true if the token after NULL extends it into an expression.
    fn continues_default(&mut self) -> Result<bool> {
        Ok(matches!(
            self.peek()?,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Concat
                | TokenKind::Eq
                | TokenKind::NotEq
                | TokenKind::Lt
                | TokenKind::LtEq
                | TokenKind::Gt
                | TokenKind::GtEq
                | TokenKind::Keyword(Keyword::Is | Keyword::Or | Keyword::And)
        ))
    }

    fn parse_constraint_name(&mut self) -> Result<Option<QualifiedName>> {
        if self.eat_keyword(Keyword::Constraint)? {
            Ok(Some(self.parse_qualified_name()?))
        } else {
            Ok(None)
        }
    }

    fn parse_column_constraint(&mut self) -> Result<ColumnConstraint> {
        let start = self.current.span;
        let name = self.parse_constraint_name()?;

        let kind = match self.current.as_keyword() {
            Some(Keyword::Not) => {
                self.advance()?;
                self.expect_keyword(Keyword::Null)?;
                ColumnConstraintKind::NotNull
            }
            Some(Keyword::Unique) => {
                self.advance()?;
                ColumnConstraintKind::Unique
            }
            Some(Keyword::Primary) => {
                self.advance()?;
                self.expect_keyword(Keyword::Key)?;
                ColumnConstraintKind::PrimaryKey
            }
            Some(Keyword::References) => {
                ColumnConstraintKind::References(self.parse_references()?)
            }
            _ => return Err(self.unexpected("NOT NULL, UNIQUE, PRIMARY KEY or REFERENCES")),
        };

        Ok(ColumnConstraint {
            name,
            kind,
            span: self.span_from(start),
        })
    }

    fn parse_table_constraint(&mut self) -> Result<TableConstraint> {
        let start = self.current.span;
        let name = self.parse_constraint_name()?;

        let kind = match self.current.as_keyword() {
            Some(Keyword::Unique) => {
                self.advance()?;
                TableConstraintKind::Unique(self.parse_parenthesized_identifiers()?)
            }
            Some(Keyword::Primary) => {
                self.advance()?;
                self.expect_keyword(Keyword::Key)?;
                TableConstraintKind::PrimaryKey(self.parse_parenthesized_identifiers()?)
            }
            Some(Keyword::Foreign) => {
                self.advance()?;
                self.expect_keyword(Keyword::Key)?;
                let columns = self.parse_parenthesized_identifiers()?;
                let references = self.parse_references()?;
                TableConstraintKind::ForeignKey {
                    columns,
                    references,
                }
            }
            _ => return Err(self.unexpected("UNIQUE, PRIMARY KEY or FOREIGN KEY")),
        };

        Ok(TableConstraint {
            name,
            kind,
            span: self.span_from(start),
        })
    }

    /// Parses `REFERENCES table [(cols)] [MATCH ...] [ON DELETE ...] [ON UPDATE ...]`.
    fn parse_references(&mut self) -> Result<References> {
        let start = self.current.span;
        self.expect_keyword(Keyword::References)?;
        let table = self.parse_qualified_name()?;
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_parenthesized_identifiers()?
        } else {
            vec![]
        };

        let match_option = if self.eat_keyword(Keyword::Match)? {
            let option = match self.current.as_keyword() {
                Some(Keyword::Full) => MatchOption::Full,
                Some(Keyword::Partial) => MatchOption::Partial,
                Some(Keyword::Simple) => MatchOption::Simple,
                _ => return Err(self.unexpected("FULL, PARTIAL or SIMPLE")),
            };
            self.advance()?;
            option
        } else {
            MatchOption::default()
        };

        let mut actions = ReferentialTriggeredAction::default();
        let (mut seen_delete, mut seen_update) = (false, false);
        while self.check_keyword(Keyword::On) {
            self.advance()?;
            if !seen_delete && self.eat_keyword(Keyword::Delete)? {
                seen_delete = true;
                actions.on_delete = self.parse_referential_action()?;
            } else if !seen_update && self.eat_keyword(Keyword::Update)? {
                seen_update = true;
                actions.on_update = self.parse_referential_action()?;
            } else {
                return Err(self.unexpected("DELETE or UPDATE"));
            }
        }

        Ok(References {
            table,
            columns,
            match_option,
            actions,
            span: self.span_from(start),
        })
    }

    fn parse_referential_action(&mut self) -> Result<ReferentialAction> {
        let action = match self.current.as_keyword() {
            Some(Keyword::Cascade) => ReferentialAction::Cascade,
            Some(Keyword::Restrict) => ReferentialAction::Restrict,
            Some(Keyword::Set) => {
                self.advance()?;
                match self.current.as_keyword() {
                    Some(Keyword::Null) => ReferentialAction::SetNull,
                    Some(Keyword::Default) => ReferentialAction::SetDefault,
                    _ => return Err(self.unexpected("NULL or DEFAULT")),
                }
            }
            Some(Keyword::No) => {
                self.advance()?;
                if !self.check_keyword(Keyword::Action) {
                    return Err(self.unexpected("ACTION"));
                }
                ReferentialAction::NoAction
            }
            _ => {
                return Err(
                    self.unexpected("CASCADE, SET NULL, SET DEFAULT, RESTRICT or NO ACTION")
                )
            }
        };
        self.advance()?;
        Ok(action)
    }

    // --- Data types ---

    /// Parses a data type, including any ARRAY and MULTISET suffixes.
    pub(super) fn parse_data_type(&mut self) -> Result<DataType> {
        let mut data_type = self.nested(Self::parse_base_type)?;
        let mut levels = 0;

        loop {
            if self.eat_keyword(Keyword::Array)? {
                let max_cardinality = if self.eat(&TokenKind::LeftBracket)? {
                    let n = self.expect_unsigned()?;
                    self.expect(&TokenKind::RightBracket)?;
                    Some(n)
                } else {
                    None
                };
                data_type = DataType::Array {
                    element: Box::new(data_type),
                    max_cardinality,
                };
            } else if self.eat_keyword(Keyword::Multiset)? {
                data_type = DataType::Multiset(Box::new(data_type));
            } else {
                break;
            }
            self.enter()?;
            levels += 1;
        }

        self.leave(levels);
        Ok(data_type)
    }

    fn parse_base_type(&mut self) -> Result<DataType> {
        let Some(keyword) = self.current.as_keyword() else {
            return Ok(DataType::UserDefined(self.parse_qualified_name()?));
        };

        let data_type = match keyword {
            Keyword::Numeric | Keyword::Decimal | Keyword::Dec => {
                self.advance()?;
                let (precision, scale) = self.parse_precision_scale()?;
                if keyword == Keyword::Numeric {
                    DataType::Numeric { precision, scale }
                } else {
                    DataType::Decimal { precision, scale }
                }
            }
            Keyword::Smallint => {
                self.advance()?;
                DataType::SmallInt
            }
            Keyword::Integer | Keyword::Int => {
                self.advance()?;
                DataType::Integer
            }
            Keyword::Bigint => {
                self.advance()?;
                DataType::BigInt
            }
            Keyword::Float => {
                self.advance()?;
                DataType::Float {
                    precision: self.parse_optional_length()?,
                }
            }
            Keyword::Real => {
                self.advance()?;
                DataType::Real
            }
            Keyword::Double => {
                self.advance()?;
                self.expect_keyword(Keyword::Precision)?;
                DataType::DoublePrecision
            }
            Keyword::Binary => {
                self.advance()?;
                if self.eat_keyword(Keyword::Varying)? {
                    DataType::VarBinary {
                        length: self.parse_optional_length()?,
                    }
                } else if self.eat_large_object()? {
                    DataType::Blob {
                        length: self.parse_optional_length()?,
                    }
                } else {
                    DataType::Binary {
                        length: self.parse_optional_length()?,
                    }
                }
            }
            Keyword::Varbinary => {
                self.advance()?;
                DataType::VarBinary {
                    length: self.parse_optional_length()?,
                }
            }
            Keyword::Blob => {
                self.advance()?;
                DataType::Blob {
                    length: self.parse_optional_length()?,
                }
            }
            Keyword::Char | Keyword::Character => {
                self.advance()?;
                self.parse_character_type(false)?
            }
            Keyword::Varchar => {
                self.advance()?;
                DataType::VarChar(self.parse_char_length()?)
            }
            Keyword::Clob => {
                self.advance()?;
                DataType::Clob(self.parse_char_length()?)
            }
            Keyword::National => {
                self.advance()?;
                if !self.eat_keyword(Keyword::Char)? {
                    self.expect_keyword(Keyword::Character)?;
                }
                self.parse_character_type(true)?
            }
            Keyword::Nchar => {
                self.advance()?;
                self.parse_character_type(true)?
            }
            Keyword::Nclob => {
                self.advance()?;
                DataType::NationalClob(self.parse_char_length()?)
            }
            Keyword::Boolean => {
                self.advance()?;
                DataType::Boolean
            }
            Keyword::Date => {
                self.advance()?;
                DataType::Date
            }
            Keyword::Time | Keyword::Timestamp => {
                self.advance()?;
                let precision = self.parse_optional_length()?;
                let with_time_zone = self.parse_time_zone()?;
                if keyword == Keyword::Time {
                    DataType::Time {
                        precision,
                        with_time_zone,
                    }
                } else {
                    DataType::Timestamp {
                        precision,
                        with_time_zone,
                    }
                }
            }
            Keyword::Row => {
                self.advance()?;
                let fields = self.parse_parenthesized(|p| {
                    p.parse_comma_separated(|p| {
                        let name = p.expect_identifier()?;
                        let data_type = p.parse_data_type()?;
                        Ok(FieldDef { name, data_type })
                    })
                })?;
                DataType::Row(fields)
            }
            Keyword::Ref => {
                self.advance()?;
                let target = self.parse_parenthesized(Self::parse_qualified_name)?;
                let scope = if self.eat_keyword(Keyword::Scope)? {
                    Some(self.parse_qualified_name()?)
                } else {
                    None
                };
                DataType::Ref { target, scope }
            }
            kw if !kw.is_reserved() => DataType::UserDefined(self.parse_qualified_name()?),
            _ => return Err(self.unexpected("data type")),
        };
        Ok(data_type)
    }

    /// Parses the rest of a CHARACTER type after its leading keyword(s).
    fn parse_character_type(&mut self, national: bool) -> Result<DataType> {
        let data_type = if self.eat_keyword(Keyword::Varying)? {
            let length = self.parse_char_length()?;
            if national {
                DataType::NationalVarChar(length)
            } else {
                DataType::VarChar(length)
            }
        } else if self.eat_large_object()? {
            let length = self.parse_char_length()?;
            if national {
                DataType::NationalClob(length)
            } else {
                DataType::Clob(length)
            }
        } else {
            let length = self.parse_char_length()?;
            if national {
                DataType::NationalChar(length)
            } else {
                DataType::Char(length)
            }
        };
        Ok(data_type)
    }

    /// Consumes `LARGE OBJECT` if present.
    fn eat_large_object(&mut self) -> Result<bool> {
        if self.eat_keyword(Keyword::Large)? {
            self.expect_keyword(Keyword::Object)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Parses `[(n [CHARACTERS | OCTETS])]`.
    fn parse_char_length(&mut self) -> Result<Option<CharLength>> {
        if !self.check(&TokenKind::LeftParen) {
            return Ok(None);
        }
        let length = self.parse_parenthesized(|p| {
            let length = p.expect_unsigned()?;
            let unit = if p.eat_keyword(Keyword::Characters)? {
                Some(CharUnit::Characters)
            } else if p.eat_keyword(Keyword::Octets)? {
                Some(CharUnit::Octets)
            } else {
                None
            };
            Ok(CharLength { length, unit })
        })?;
        Ok(Some(length))
    }

    /// Parses `[(n)]`.
    fn parse_optional_length(&mut self) -> Result<Option<u64>> {
        if self.check(&TokenKind::LeftParen) {
            Ok(Some(self.parse_parenthesized(Self::expect_unsigned)?))
        } else {
            Ok(None)
        }
    }

    /// Parses `[(p [, s])]`.
    fn parse_precision_scale(&mut self) -> Result<(Option<u64>, Option<u64>)> {
        if !self.check(&TokenKind::LeftParen) {
            return Ok((None, None));
        }
        self.parse_parenthesized(|p| {
            let precision = p.expect_unsigned()?;
            let scale = if p.eat(&TokenKind::Comma)? {
                Some(p.expect_unsigned()?)
            } else {
                None
            };
            Ok((Some(precision), scale))
        })
    }

    /// Parses `[WITH | WITHOUT TIME ZONE]`.
    fn parse_time_zone(&mut self) -> Result<Option<bool>> {
        let with = if self.eat_keyword(Keyword::With)? {
            true
        } else if self.eat_keyword(Keyword::Without)? {
            false
        } else {
            return Ok(None);
        };
        self.expect_keyword(Keyword::Time)?;
        self.expect_keyword(Keyword::Zone)?;
        Ok(Some(with))
    }

    /// Expects a non-negative integer literal.
    fn expect_unsigned(&mut self) -> Result<u64> {
        match self.current.kind {
            TokenKind::Integer(n) if n >= 0 => {
                self.advance()?;
                Ok(n.unsigned_abs())
            }
            _ => Err(self.unexpected("unsigned integer")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Statement;
    use crate::lexer::Lexer;

    fn parse_create(sql: &str) -> CreateStatement {
        try_parse_create(sql).unwrap()
    }

    fn try_parse_create(sql: &str) -> Result<CreateStatement> {
        let mut lexer = Lexer::new(sql);
        let mut parser = Parser::new(&mut lexer)?;
        match parser.parse_statement()? {
            Statement::Create(create) => Ok(create),
            other => panic!("Expected CREATE statement, got {other:?}"),
        }
    }

    fn column_type(sql_type: &str) -> DataType {
        let create = parse_create(&format!("CREATE TABLE t (c {sql_type})"));
        create.columns.into_iter().next().unwrap().data_type
    }

    #[test]
    fn test_simple_create() {
        let create = parse_create("create table boo ( foo INT )");
        assert_eq!(create.name, QualifiedName::new("boo"));
        assert_eq!(create.columns.len(), 1);
        assert_eq!(create.columns[0].name, "foo");
        assert_eq!(create.columns[0].data_type, DataType::Integer);
        assert!(create.temporary.is_none());
        assert!(create.on_commit.is_none());
    }

    #[test]
    fn test_temporary_defaults() {
        let create = parse_create("CREATE TEMPORARY TABLE t (a INT)");
        assert_eq!(create.temporary, Some(Temporary::Local));
        assert_eq!(create.on_commit, Some(OnCommit::Delete));

        let create = parse_create("CREATE GLOBAL TEMP TABLE t (a INT) ON COMMIT PRESERVE ROWS");
        assert_eq!(create.temporary, Some(Temporary::Global));
        assert_eq!(create.on_commit, Some(OnCommit::Preserve));

        assert!(try_parse_create("CREATE GLOBAL TABLE t (a INT)").is_err());
    }

    #[test]
    fn test_column_clauses_any_order() {
        let create = parse_create(
            "CREATE TABLE t (a VARCHAR(10) NOT NULL COLLATE \"C\" DEFAULT 'x' UNIQUE)",
        );
        let column = &create.columns[0];
        assert!(column.is_not_null());
        assert_eq!(column.constraints.len(), 2);
        assert_eq!(column.collation, Some(QualifiedName::new("C")));
        assert!(matches!(column.default, Some(ColumnDefault::Expression(_))));

        assert!(try_parse_create("CREATE TABLE t (a INT DEFAULT 1 DEFAULT 2)").is_err());
    }

    #[test]
    fn test_defaults() {
        let create = parse_create(
            "CREATE TABLE t (a INT DEFAULT NULL, b TEXT DEFAULT CURRENT_USER, c INT DEFAULT NULL + 1)",
        );
        assert!(matches!(create.columns[0].default, Some(ColumnDefault::Null)));
        assert!(matches!(
            create.columns[1].default,
            Some(ColumnDefault::User(UserSpec::CurrentUser))
        ));
        assert!(matches!(
            create.columns[2].default,
            Some(ColumnDefault::Expression(_))
        ));
    }

    #[test]
    fn test_references_actions_in_either_order() {
        let create = parse_create(
            "CREATE TABLE t (a INT CONSTRAINT fk REFERENCES s.u (id) MATCH FULL \
             ON UPDATE CASCADE ON DELETE SET NULL)",
        );
        let constraint = &create.columns[0].constraints[0];
        assert_eq!(constraint.name, Some(QualifiedName::new("fk")));
        let ColumnConstraintKind::References(references) = &constraint.kind else {
            panic!("Expected REFERENCES");
        };
        assert_eq!(references.table, QualifiedName::from_parts(["s", "u"]));
        assert_eq!(references.columns, ["id"]);
        assert_eq!(references.match_option, MatchOption::Full);
        assert_eq!(references.actions.on_delete, ReferentialAction::SetNull);
        assert_eq!(references.actions.on_update, ReferentialAction::Cascade);
    }

    #[test]
    fn test_references_defaults() {
        let create = parse_create("CREATE TABLE t (a INT REFERENCES u)");
        let ColumnConstraintKind::References(references) = &create.columns[0].constraints[0].kind
        else {
            panic!("Expected REFERENCES");
        };
        assert_eq!(references.match_option, MatchOption::Simple);
        assert_eq!(references.actions, ReferentialTriggeredAction::default());
        assert!(try_parse_create("CREATE TABLE t (a INT REFERENCES u ON DELETE CASCADE ON DELETE RESTRICT)").is_err());
    }

    #[test]
    fn test_table_constraints() {
        let create = parse_create(
            "CREATE TABLE t (a INT, b INT, PRIMARY KEY (a), CONSTRAINT u UNIQUE (a, b), \
             FOREIGN KEY (b) REFERENCES o (id) ON DELETE NO ACTION)",
        );
        assert_eq!(create.columns.len(), 2);
        assert_eq!(create.constraints.len(), 3);
        assert!(matches!(
            &create.constraints[0].kind,
            TableConstraintKind::PrimaryKey(cols) if cols == &["a"]
        ));
        assert_eq!(create.constraints[1].name, Some(QualifiedName::new("u")));
        assert!(matches!(
            create.constraints[2].kind,
            TableConstraintKind::ForeignKey { .. }
        ));
    }

    #[test]
    fn test_numeric_and_character_types() {
        assert_eq!(
            column_type("DEC(10, 2)"),
            DataType::Decimal {
                precision: Some(10),
                scale: Some(2)
            }
        );
        assert_eq!(column_type("DOUBLE PRECISION"), DataType::DoublePrecision);
        assert_eq!(
            column_type("CHARACTER VARYING(20 OCTETS)"),
            DataType::VarChar(Some(CharLength {
                length: 20,
                unit: Some(CharUnit::Octets)
            }))
        );
        assert_eq!(
            column_type("NATIONAL CHAR LARGE OBJECT"),
            DataType::NationalClob(None)
        );
        assert_eq!(
            column_type("NCHAR VARYING(5)"),
            DataType::NationalVarChar(Some(CharLength {
                length: 5,
                unit: None
            }))
        );
        assert_eq!(
            column_type("BINARY LARGE OBJECT(100)"),
            DataType::Blob { length: Some(100) }
        );
    }

    #[test]
    fn test_datetime_types() {
        assert_eq!(
            column_type("TIMESTAMP(3) WITH TIME ZONE"),
            DataType::Timestamp {
                precision: Some(3),
                with_time_zone: Some(true)
            }
        );
        assert_eq!(
            column_type("TIME WITHOUT TIME ZONE"),
            DataType::Time {
                precision: None,
                with_time_zone: Some(false)
            }
        );
    }

    #[test]
    fn test_constructed_types() {
        assert_eq!(
            column_type("INTEGER ARRAY[10] MULTISET"),
            DataType::Multiset(Box::new(DataType::Array {
                element: Box::new(DataType::Integer),
                max_cardinality: Some(10),
            }))
        );
        assert_eq!(
            column_type("ROW(x INT, y REAL)"),
            DataType::Row(vec![
                FieldDef {
                    name: "x".into(),
                    data_type: DataType::Integer
                },
                FieldDef {
                    name: "y".into(),
                    data_type: DataType::Real
                },
            ])
        );
        assert_eq!(
            column_type("REF(person) SCOPE people"),
            DataType::Ref {
                target: QualifiedName::new("person"),
                scope: Some(QualifiedName::new("people")),
            }
        );
        assert_eq!(
            column_type("my_schema.money"),
            DataType::UserDefined(QualifiedName::from_parts(["my_schema", "money"]))
        );
    }

    #[test]
    fn test_negative_length_rejected() {
        assert!(try_parse_create("CREATE TABLE t (a CHAR(-1))").is_err());
    }
}
