//! Tests for query structure: target lists, set operations, VALUES, TABLE,
//! WITH, ORDER BY, OFFSET and FETCH.

mod common;
use common::*;

use psql_parse::ast::{
    Expression, FetchKind, NullOrder, RelExpression, SetOperator, SetQuantifier, SortOrder,
};

#[test]
fn select_integer_literal() {
    let s = parse_select("select 1");
    assert!(s.quantifier.is_none());
    assert!(s.from.is_empty());
    assert!(matches!(&s.targets[..], [Expression::IntegerLiteral(i)] if i.value == 1));
    round_trip("select 1");
}

#[test]
fn select_asterisk_only() {
    let s = parse_select("select *");
    assert!(s.quantifier.is_none());
    assert!(matches!(&s.targets[..], [Expression::Asterisk(a)] if a.qualifier.is_none()));
    round_trip("select *");
}

#[test]
fn select_distinct_and_all() {
    let s = parse_select("SELECT DISTINCT a FROM t");
    assert_eq!(s.quantifier, Some(SetQuantifier::Distinct));
    let s = parse_select("SELECT ALL a FROM t");
    assert_eq!(s.quantifier, Some(SetQuantifier::All));
    round_trip("SELECT DISTINCT a FROM t");
}

#[test]
fn select_target_aliases() {
    let s = parse_select("SELECT a AS x, b y, c FROM t");
    assert!(matches!(&s.targets[0], Expression::Alias(a) if a.name == "x"));
    assert!(matches!(&s.targets[1], Expression::Alias(a) if a.name == "y"));
    assert!(matches!(&s.targets[2], Expression::Var(_)));
    round_trip("SELECT a AS x, b y, c FROM t");
}

#[test]
fn select_qualified_column() {
    let s = parse_select("SELECT s.t.c FROM s.t");
    let Expression::Var(var) = &s.targets[0] else {
        panic!("expected a column reference");
    };
    assert_eq!(var.name.qualifier, ["s", "t"]);
    assert_eq!(var.name.name, "c");
}

#[test]
fn union_all() {
    let q = parse_query("select 1 UNION ALL select 2");
    let RelExpression::SetOp(set_op) = &q.body else {
        panic!("expected a set operation, got {:?}", q.body);
    };
    assert_eq!(set_op.op, SetOperator::Union);
    assert_eq!(set_op.quantifier, Some(SetQuantifier::All));
    for side in [&set_op.left, &set_op.right] {
        let RelExpression::Select(select) = side else {
            panic!("expected a SELECT operand");
        };
        assert_eq!(select.targets.len(), 1);
    }
    round_trip("select 1 UNION ALL select 2");
}

#[test]
fn intersect_binds_tighter_than_except() {
    let q = parse_query("SELECT 1 EXCEPT SELECT 2 INTERSECT SELECT 3");
    let RelExpression::SetOp(top) = &q.body else {
        panic!("expected a set operation");
    };
    assert_eq!(top.op, SetOperator::Except);
    assert!(matches!(&top.right, RelExpression::SetOp(r) if r.op == SetOperator::Intersect));
    round_trip("SELECT 1 EXCEPT SELECT 2 INTERSECT SELECT 3");
}

#[test]
fn union_distinct_chain_is_left_associative() {
    let q = parse_query("SELECT 1 UNION DISTINCT SELECT 2 UNION SELECT 3");
    let RelExpression::SetOp(top) = &q.body else {
        panic!("expected a set operation");
    };
    assert!(top.quantifier.is_none());
    let RelExpression::SetOp(left) = &top.left else {
        panic!("expected a nested set operation on the left");
    };
    assert_eq!(left.quantifier, Some(SetQuantifier::Distinct));
    round_trip("SELECT 1 UNION DISTINCT SELECT 2 UNION SELECT 3");
}

#[test]
fn parenthesized_operand_keeps_its_order_by() {
    let q = parse_query("(SELECT a FROM t ORDER BY a) UNION SELECT b FROM u");
    let RelExpression::SetOp(set_op) = &q.body else {
        panic!("expected a set operation");
    };
    assert!(matches!(&set_op.left, RelExpression::Query(inner) if inner.order_by.len() == 1));
    round_trip("(SELECT a FROM t ORDER BY a) UNION SELECT b FROM u");
}

#[test]
fn values_query() {
    let q = parse_query("VALUES (1, 'a'), (2, 'b')");
    let RelExpression::Values(values) = &q.body else {
        panic!("expected VALUES");
    };
    assert_eq!(values.rows.len(), 2);
    assert!(matches!(&values.rows[0], Expression::Row(r) if r.values.len() == 2));
    round_trip("VALUES (1, 'a'), (2, 'b')");
}

#[test]
fn table_query() {
    let q = parse_query("TABLE s.accounts");
    assert!(matches!(&q.body, RelExpression::Table(t) if t.name.to_string() == "s.accounts"));
    round_trip("TABLE s.accounts");
}

#[test]
fn with_recursive_cte() {
    let sql = "WITH RECURSIVE n(i) AS (VALUES 1 UNION ALL SELECT i + 1 FROM n) SELECT i FROM n";
    let q = parse_query(sql);
    let with = q.with.as_ref().expect("WITH clause");
    assert!(with.recursive);
    assert_eq!(with.ctes.len(), 1);
    assert_eq!(with.ctes[0].name, "n");
    assert_eq!(with.ctes[0].columns, ["i"]);
    assert!(matches!(with.ctes[0].query.body, RelExpression::SetOp(_)));
    round_trip(sql);
}

#[test]
fn with_multiple_ctes() {
    let sql = "WITH a AS (SELECT 1), b AS (SELECT 2) SELECT * FROM a, b";
    let q = parse_query(sql);
    assert_eq!(q.with.as_ref().map(|w| w.ctes.len()), Some(2));
    round_trip(sql);
}

#[test]
fn order_by_directions_and_nulls() {
    let q = parse_query("SELECT a FROM t ORDER BY a, b DESC NULLS FIRST, c ASC NULLS LAST");
    let specs: Vec<_> = q.order_by.iter().map(|s| (s.order, s.nulls)).collect();
    assert_eq!(
        specs,
        [
            (SortOrder::Asc, NullOrder::Default),
            (SortOrder::Desc, NullOrder::First),
            (SortOrder::Asc, NullOrder::Last),
        ]
    );
    round_trip("SELECT a FROM t ORDER BY a, b DESC NULLS FIRST, c ASC NULLS LAST");
}

#[test]
fn order_by_applies_to_whole_set_operation() {
    let q = parse_query("SELECT a FROM t UNION SELECT b FROM u ORDER BY 1");
    assert!(matches!(q.body, RelExpression::SetOp(_)));
    assert_eq!(q.order_by.len(), 1);
}

#[test]
fn offset_and_fetch() {
    let q = parse_query("SELECT a FROM t OFFSET 10 ROWS FETCH NEXT 5 ROWS ONLY");
    assert!(matches!(&q.offset, Some(Expression::IntegerLiteral(i)) if i.value == 10));
    let fetch = q.fetch.as_ref().expect("FETCH clause");
    assert_eq!(fetch.kind, FetchKind::Next);
    assert!(!fetch.percent);
    assert!(!fetch.with_ties);
    round_trip("SELECT a FROM t OFFSET 10 ROWS FETCH NEXT 5 ROWS ONLY");
}

#[test]
fn fetch_percent_with_ties() {
    let q = parse_query("SELECT a FROM t ORDER BY a FETCH FIRST 10 PERCENT ROWS WITH TIES");
    let fetch = q.fetch.as_ref().expect("FETCH clause");
    assert_eq!(fetch.kind, FetchKind::First);
    assert!(fetch.percent);
    assert!(fetch.with_ties);
    round_trip("SELECT a FROM t ORDER BY a FETCH FIRST 10 PERCENT ROWS WITH TIES");
}

#[test]
fn fetch_without_count() {
    let q = parse_query("SELECT a FROM t FETCH FIRST ROW ONLY");
    assert!(q.fetch.as_ref().is_some_and(|f| f.count.is_none()));
    round_trip("SELECT a FROM t FETCH FIRST ROW ONLY");
}

#[test]
fn parenthesized_statement() {
    let q = parse_query("((SELECT 1))");
    assert!(matches!(q.body, RelExpression::Select(_)));
}

#[test]
fn trailing_semicolon() {
    let s = parse_select("SELECT 1;");
    assert_eq!(s.targets.len(), 1);
}
