#![allow(dead_code)]

use psql_parse::ast::{
    CreateStatement, DeleteStatement, Expression, InsertStatement, Query, RelExpression,
    SelectExpr, Statement,
};
use psql_parse::visit::{structurally_equal, StructuralEq};
use psql_parse::Error;

pub fn parse(sql: &str) -> Statement {
    psql_parse::parse(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"))
}

pub fn parse_err(sql: &str) -> Error {
    match psql_parse::parse(sql) {
        Ok(statement) => panic!("Expected parse error for: {sql}\nGot: {statement}"),
        Err(e) => e,
    }
}

pub fn parse_query(sql: &str) -> Query {
    match parse(sql) {
        Statement::Select(s) => s.query,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

/// Parses a query whose body is a single SELECT.
pub fn parse_select(sql: &str) -> SelectExpr {
    match parse_query(sql).body {
        RelExpression::Select(s) => *s,
        other => panic!("Expected a SELECT body, got {other:?}"),
    }
}

/// Parses `SELECT <expr>` and returns the one target.
pub fn parse_expr(expr: &str) -> Expression {
    let mut select = parse_select(&format!("SELECT {expr}"));
    assert_eq!(select.targets.len(), 1, "Expected one target in: {expr}");
    select.targets.remove(0)
}

pub fn parse_create(sql: &str) -> CreateStatement {
    match parse(sql) {
        Statement::Create(c) => c,
        other => panic!("Expected CREATE, got {other:?}"),
    }
}

pub fn parse_insert(sql: &str) -> InsertStatement {
    match parse(sql) {
        Statement::Insert(i) => i,
        other => panic!("Expected INSERT, got {other:?}"),
    }
}

pub fn parse_delete(sql: &str) -> DeleteStatement {
    match parse(sql) {
        Statement::Delete(d) => d,
        other => panic!("Expected DELETE, got {other:?}"),
    }
}

pub fn assert_structurally_eq<T: StructuralEq + std::fmt::Debug + ?Sized>(left: &T, right: &T) {
    assert!(
        structurally_equal(left, right),
        "Trees differ.\n  Left:  {left:?}\n  Right: {right:?}"
    );
}

/// Verifies that printing and re-parsing yields a structurally equal tree,
/// and that the printed form is a fixed point. Returns the printed form.
pub fn round_trip(sql: &str) -> String {
    let ast1 = parse(sql);
    let rendered1 = ast1.to_string();
    let ast2 = psql_parse::parse(&rendered1).unwrap_or_else(|e| {
        panic!("Printed form does not parse.\n  Input:   {sql}\n  Printed: {rendered1}\n  Error:   {e}")
    });
    assert!(
        structurally_equal(&ast1, &ast2),
        "Round-trip changed the tree.\n  Input:   {sql}\n  Printed: {rendered1}"
    );
    let rendered2 = ast2.to_string();
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
    rendered1
}
