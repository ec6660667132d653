//! Tests for CREATE TABLE: temporary tables, columns, defaults, column and
//! table constraints, and data types.

mod common;
use common::*;

use psql_parse::ast::{
    CharLength, CharUnit, ColumnConstraintKind, ColumnDefault, DataType, Expression, MatchOption,
    OnCommit, QualifiedName, ReferentialAction, TableConstraintKind, Temporary, UserSpec,
};

fn column_type(ty: &str) -> DataType {
    let create = parse_create(&format!("CREATE TABLE t (c {ty})"));
    create.columns.into_iter().next().expect("one column").data_type
}

#[test]
fn create_single_integer_column() {
    let c = parse_create("create table boo ( foo INT )");
    assert_eq!(c.name.name, "boo");
    assert!(c.temporary.is_none());
    assert!(c.on_commit.is_none());
    assert_eq!(c.columns.len(), 1);
    assert_eq!(c.columns[0].name, "foo");
    assert_eq!(c.columns[0].data_type, DataType::Integer);
    assert!(c.constraints.is_empty());
    round_trip("create table boo ( foo INT )");
}

#[test]
fn create_temporary_defaults_on_commit_delete() {
    let c = parse_create("CREATE TEMPORARY TABLE t (a INT)");
    assert_eq!(c.temporary, Some(Temporary::Local));
    assert_eq!(c.on_commit, Some(OnCommit::Delete));
    round_trip("CREATE TEMPORARY TABLE t (a INT)");
}

#[test]
fn create_global_temporary_preserve_rows() {
    let c = parse_create("CREATE GLOBAL TEMPORARY TABLE t (a INT) ON COMMIT PRESERVE ROWS");
    assert_eq!(c.temporary, Some(Temporary::Global));
    assert_eq!(c.on_commit, Some(OnCommit::Preserve));
    round_trip("CREATE GLOBAL TEMPORARY TABLE t (a INT) ON COMMIT PRESERVE ROWS");
}

#[test]
fn create_local_temp_synonym() {
    let c = parse_create("CREATE LOCAL TEMP TABLE t (a INT)");
    assert_eq!(c.temporary, Some(Temporary::Local));
    assert_eq!(c.on_commit, Some(OnCommit::Delete));
}

#[test]
fn create_qualified_name() {
    let c = parse_create("CREATE TABLE app.users (id BIGINT)");
    assert_eq!(c.name, QualifiedName::from_parts(["app", "users"]));
}

#[test]
fn column_constraints() {
    let c = parse_create(
        "CREATE TABLE t (id INT PRIMARY KEY, email VARCHAR(255) NOT NULL UNIQUE, \
         owner INT CONSTRAINT fk REFERENCES other (id))",
    );
    assert!(c.columns[0].is_primary_key());
    assert!(c.columns[1].is_not_null());
    assert!(matches!(c.columns[1].constraints[1].kind, ColumnConstraintKind::Unique));
    let fk = &c.columns[2].constraints[0];
    assert_eq!(fk.name.as_ref().map(|n| n.name.as_str()), Some("fk"));
    assert!(matches!(fk.kind, ColumnConstraintKind::References(_)));
    round_trip(
        "CREATE TABLE t (id INT PRIMARY KEY, email VARCHAR(255) NOT NULL UNIQUE, \
         owner INT CONSTRAINT fk REFERENCES other (id))",
    );
}

#[test]
fn references_default_actions() {
    let c = parse_create("CREATE TABLE t (a INT REFERENCES u)");
    let ColumnConstraintKind::References(r) = &c.columns[0].constraints[0].kind else {
        panic!("expected REFERENCES");
    };
    assert_eq!(r.table.name, "u");
    assert!(r.columns.is_empty());
    assert_eq!(r.match_option, MatchOption::Simple);
    assert_eq!(r.actions.on_delete, ReferentialAction::NoAction);
    assert_eq!(r.actions.on_update, ReferentialAction::NoAction);
}

#[test]
fn references_match_and_actions_in_any_order() {
    let sql = "CREATE TABLE t (a INT REFERENCES u (id) MATCH FULL \
               ON UPDATE SET NULL ON DELETE CASCADE)";
    let c = parse_create(sql);
    let ColumnConstraintKind::References(r) = &c.columns[0].constraints[0].kind else {
        panic!("expected REFERENCES");
    };
    assert_eq!(r.match_option, MatchOption::Full);
    assert_eq!(r.actions.on_delete, ReferentialAction::Cascade);
    assert_eq!(r.actions.on_update, ReferentialAction::SetNull);
    round_trip(sql);
}

#[test]
fn references_all_actions() {
    for (action, expected) in [
        ("CASCADE", ReferentialAction::Cascade),
        ("SET NULL", ReferentialAction::SetNull),
        ("SET DEFAULT", ReferentialAction::SetDefault),
        ("RESTRICT", ReferentialAction::Restrict),
        ("NO ACTION", ReferentialAction::NoAction),
    ] {
        let c = parse_create(&format!("CREATE TABLE t (a INT REFERENCES u ON DELETE {action})"));
        let ColumnConstraintKind::References(r) = &c.columns[0].constraints[0].kind else {
            panic!("expected REFERENCES");
        };
        assert_eq!(r.actions.on_delete, expected, "{action}");
    }
}

#[test]
fn table_constraints() {
    let sql = "CREATE TABLE t (a INT, b INT, PRIMARY KEY (a), CONSTRAINT ub UNIQUE (a, b), \
               FOREIGN KEY (b) REFERENCES u (id) MATCH PARTIAL ON DELETE RESTRICT)";
    let c = parse_create(sql);
    assert_eq!(c.columns.len(), 2);
    assert_eq!(c.constraints.len(), 3);
    assert!(matches!(&c.constraints[0].kind, TableConstraintKind::PrimaryKey(cols) if cols == &["a"]));
    assert_eq!(c.constraints[1].name, Some(QualifiedName::new("ub")));
    assert!(matches!(&c.constraints[1].kind, TableConstraintKind::Unique(cols) if cols.len() == 2));
    let TableConstraintKind::ForeignKey {
        columns,
        references,
    } = &c.constraints[2].kind
    else {
        panic!("expected FOREIGN KEY");
    };
    assert_eq!(columns, &["b"]);
    assert_eq!(references.match_option, MatchOption::Partial);
    assert_eq!(references.actions.on_delete, ReferentialAction::Restrict);
    round_trip(sql);
}

#[test]
fn constraints_may_precede_columns() {
    let c = parse_create("CREATE TABLE t (UNIQUE (b), a INT, b INT)");
    assert_eq!(c.columns.len(), 2);
    assert_eq!(c.constraints.len(), 1);
}

#[test]
fn column_defaults() {
    let c = parse_create(
        "CREATE TABLE t (a INT DEFAULT 0, b VARCHAR(10) DEFAULT 'x', c INT DEFAULT NULL, \
         d VARCHAR(20) DEFAULT CURRENT_USER, e INT DEFAULT -1, f INT DEFAULT NULL + 1)",
    );
    let defaults: Vec<_> = c.columns.iter().map(|c| c.default.as_ref()).collect();
    assert!(matches!(defaults[0], Some(ColumnDefault::Expression(Expression::IntegerLiteral(_)))));
    assert!(matches!(defaults[1], Some(ColumnDefault::Expression(Expression::StringLiteral(_)))));
    assert!(matches!(defaults[2], Some(ColumnDefault::Null)));
    assert!(matches!(defaults[3], Some(ColumnDefault::User(UserSpec::CurrentUser))));
    assert!(matches!(defaults[4], Some(ColumnDefault::Expression(Expression::Unary(_)))));
    assert!(matches!(defaults[5], Some(ColumnDefault::Expression(Expression::Binary(_)))));
}

#[test]
fn column_defaults_round_trip() {
    round_trip("CREATE TABLE t (a INT DEFAULT NULL, b INT DEFAULT (NULL), c INT DEFAULT -1)");
    round_trip("CREATE TABLE t (u VARCHAR(10) DEFAULT SESSION_USER NOT NULL)");
}

#[test]
fn column_clauses_in_any_order() {
    let c = parse_create("CREATE TABLE t (a VARCHAR(5) NOT NULL COLLATE \"C\" DEFAULT 'x' UNIQUE)");
    let column = &c.columns[0];
    assert!(column.default.is_some());
    assert_eq!(column.collation, Some(QualifiedName::new("C")));
    assert_eq!(column.constraints.len(), 2);
    round_trip("CREATE TABLE t (a VARCHAR(5) NOT NULL COLLATE \"C\" DEFAULT 'x' UNIQUE)");
}

#[test]
fn numeric_types() {
    assert_eq!(column_type("INTEGER"), DataType::Integer);
    assert_eq!(column_type("SMALLINT"), DataType::SmallInt);
    assert_eq!(column_type("BIGINT"), DataType::BigInt);
    assert_eq!(column_type("REAL"), DataType::Real);
    assert_eq!(column_type("DOUBLE PRECISION"), DataType::DoublePrecision);
    assert_eq!(
        column_type("NUMERIC(10, 2)"),
        DataType::Numeric {
            precision: Some(10),
            scale: Some(2)
        }
    );
    assert_eq!(
        column_type("DEC(5)"),
        DataType::Decimal {
            precision: Some(5),
            scale: None
        }
    );
    assert_eq!(
        column_type("FLOAT(24)"),
        DataType::Float {
            precision: Some(24)
        }
    );
}

#[test]
fn character_types() {
    assert_eq!(column_type("CHAR"), DataType::Char(None));
    assert_eq!(
        column_type("VARCHAR(20)"),
        DataType::VarChar(Some(CharLength {
            length: 20,
            unit: None
        }))
    );
    assert_eq!(
        column_type("CHARACTER VARYING(8 OCTETS)"),
        DataType::VarChar(Some(CharLength {
            length: 8,
            unit: Some(CharUnit::Octets)
        }))
    );
    assert_eq!(column_type("CLOB"), DataType::Clob(None));
    assert_eq!(column_type("CHARACTER LARGE OBJECT"), DataType::Clob(None));
    assert_eq!(column_type("NCHAR(3)").to_string(), "NATIONAL CHARACTER(3)");
    assert_eq!(
        column_type("NATIONAL CHARACTER VARYING(3)").to_string(),
        "NATIONAL CHARACTER VARYING(3)"
    );
}

#[test]
fn binary_and_boolean_types() {
    assert_eq!(column_type("BLOB"), DataType::Blob { length: None });
    assert_eq!(
        column_type("VARBINARY(16)"),
        DataType::VarBinary { length: Some(16) }
    );
    assert_eq!(column_type("BOOLEAN"), DataType::Boolean);
}

#[test]
fn datetime_types() {
    assert_eq!(column_type("DATE"), DataType::Date);
    assert_eq!(
        column_type("TIME(3) WITHOUT TIME ZONE"),
        DataType::Time {
            precision: Some(3),
            with_time_zone: Some(false)
        }
    );
    assert_eq!(
        column_type("TIMESTAMP WITH TIME ZONE"),
        DataType::Timestamp {
            precision: None,
            with_time_zone: Some(true)
        }
    );
}

#[test]
fn constructed_types() {
    assert_eq!(
        column_type("INT ARRAY[3]"),
        DataType::Array {
            element: Box::new(DataType::Integer),
            max_cardinality: Some(3)
        }
    );
    assert_eq!(
        column_type("INT ARRAY MULTISET").to_string(),
        "INTEGER ARRAY MULTISET"
    );
    assert_eq!(column_type("ROW(x INT, y REAL)").to_string(), "ROW(x INTEGER, y REAL)");
    assert_eq!(
        column_type("REF(person) SCOPE people").to_string(),
        "REF(person) SCOPE people"
    );
    round_trip("CREATE TABLE t (a INT ARRAY[3] MULTISET, b ROW(x INT, y REAL))");
}

#[test]
fn user_defined_type() {
    assert_eq!(
        column_type("app.money"),
        DataType::UserDefined(QualifiedName::from_parts(["app", "money"]))
    );
    round_trip("CREATE TABLE t (a app.money)");
}
