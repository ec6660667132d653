//! Tests for expressions: precedence, predicates, literals, aggregates and
//! row constructors.

mod common;
use common::*;

use psql_parse::ast::{
    AggregateFunction, BinaryOp, Expression, RelExpression, SetQuantifier, StringKind,
    TruthValue, UnaryOp,
};

fn binary(expr: &Expression) -> (&Expression, BinaryOp, &Expression) {
    match expr {
        Expression::Binary(b) => (&b.left, b.op, &b.right),
        other => panic!("expected a binary expression, got {other:?}"),
    }
}

#[test]
fn precedence_multiplication_over_addition() {
    let e = parse_expr("1 + 2 * 3");
    let (left, op, right) = binary(&e);
    assert_eq!(op, BinaryOp::Add);
    assert!(matches!(left, Expression::IntegerLiteral(_)));
    assert_eq!(binary(right).1, BinaryOp::Mul);
}

#[test]
fn precedence_and_over_or() {
    let e = parse_expr("a OR b AND c");
    let (_, op, right) = binary(&e);
    assert_eq!(op, BinaryOp::Or);
    assert_eq!(binary(right).1, BinaryOp::And);
}

#[test]
fn precedence_comparison_over_and() {
    let e = parse_expr("a = 1 AND b <> 2");
    let (left, op, right) = binary(&e);
    assert_eq!(op, BinaryOp::And);
    assert_eq!(binary(left).1, BinaryOp::Eq);
    assert_eq!(binary(right).1, BinaryOp::NotEq);
}

#[test]
fn precedence_concat_over_comparison() {
    let e = parse_expr("a || b = c");
    let (left, op, _) = binary(&e);
    assert_eq!(op, BinaryOp::Eq);
    assert_eq!(binary(left).1, BinaryOp::Concat);
}

#[test]
fn subtraction_is_left_associative() {
    let e = parse_expr("10 - 4 - 3");
    let (left, op, right) = binary(&e);
    assert_eq!(op, BinaryOp::Sub);
    assert_eq!(binary(left).1, BinaryOp::Sub);
    assert!(matches!(right, Expression::IntegerLiteral(i) if i.value == 3));
}

#[test]
fn not_binds_looser_than_comparison() {
    let e = parse_expr("NOT a = b");
    let Expression::Unary(u) = &e else {
        panic!("expected NOT");
    };
    assert_eq!(u.op, UnaryOp::Not);
    assert_eq!(binary(&u.operand).1, BinaryOp::Eq);
}

#[test]
fn unary_minus_binds_tighter_than_multiplication() {
    let e = parse_expr("-a * b");
    let (left, op, _) = binary(&e);
    assert_eq!(op, BinaryOp::Mul);
    assert!(matches!(left, Expression::Unary(u) if u.op == UnaryOp::Neg));
}

#[test]
fn collate_binds_tightest() {
    let e = parse_expr("a || b COLLATE \"C\"");
    let (_, op, right) = binary(&e);
    assert_eq!(op, BinaryOp::Concat);
    assert!(matches!(right, Expression::Collate(c) if c.collation.name == "C"));
    round_trip("SELECT a || b COLLATE \"C\"");
}

#[test]
fn comparison_operators() {
    for (sql, expected) in [
        ("a < b", BinaryOp::Lt),
        ("a <= b", BinaryOp::LtEq),
        ("a > b", BinaryOp::Gt),
        ("a >= b", BinaryOp::GtEq),
        ("a = b", BinaryOp::Eq),
        ("a <> b", BinaryOp::NotEq),
    ] {
        assert_eq!(binary(&parse_expr(sql)).1, expected, "{sql}");
    }
}

#[test]
fn between_not_symmetric() {
    let s = parse_select("select foo from bar where baz NOT BETWEEN SYMMETRIC 1 AND 2");
    let Some(Expression::Unary(not)) = &s.selection else {
        panic!("expected NOT around the predicate");
    };
    assert_eq!(not.op, UnaryOp::Not);
    let Expression::Between(between) = &not.operand else {
        panic!("expected BETWEEN");
    };
    assert!(between.symmetric);
    assert!(matches!(&between.expr, Expression::Var(v) if v.name.name == "baz"));
    assert!(matches!(&between.low, Expression::IntegerLiteral(i) if i.value == 1));
    assert!(matches!(&between.high, Expression::IntegerLiteral(i) if i.value == 2));
    round_trip("select foo from bar where baz NOT BETWEEN SYMMETRIC 1 AND 2");
}

#[test]
fn between_asymmetric_is_default() {
    let e = parse_expr("a BETWEEN ASYMMETRIC 1 AND 2");
    assert!(matches!(e, Expression::Between(b) if !b.symmetric));
}

#[test]
fn between_bounds_take_arithmetic() {
    let e = parse_expr("a BETWEEN b - 1 AND b + 1");
    let Expression::Between(between) = &e else {
        panic!("expected BETWEEN");
    };
    assert_eq!(binary(&between.low).1, BinaryOp::Sub);
    assert_eq!(binary(&between.high).1, BinaryOp::Add);
}

#[test]
fn in_value_list() {
    let e = parse_expr("a IN (1, 2, 3)");
    let Expression::In(pred) = &e else {
        panic!("expected IN");
    };
    assert!(matches!(&pred.rows, RelExpression::Values(v) if v.rows.len() == 3));
    round_trip("SELECT a IN (1, 2, 3)");
}

#[test]
fn in_subquery() {
    let e = parse_expr("a IN (SELECT b FROM t UNION SELECT c FROM u)");
    let Expression::In(pred) = &e else {
        panic!("expected IN");
    };
    let RelExpression::Query(query) = &pred.rows else {
        panic!("expected a subquery");
    };
    assert!(matches!(query.body, RelExpression::SetOp(_)));
    round_trip("SELECT a IN (SELECT b FROM t UNION SELECT c FROM u)");
}

#[test]
fn in_parenthesized_subquery_continues_as_query() {
    let e = parse_expr("x IN ((SELECT 1) UNION SELECT 2)");
    let Expression::In(pred) = &e else {
        panic!("expected IN");
    };
    let RelExpression::Query(query) = &pred.rows else {
        panic!("expected a subquery, got {:?}", pred.rows);
    };
    assert!(matches!(query.body, RelExpression::SetOp(_)));

    let e = parse_expr("x IN ((SELECT 1) ORDER BY 1)");
    let Expression::In(pred) = &e else {
        panic!("expected IN");
    };
    assert!(matches!(&pred.rows, RelExpression::Query(q) if !q.order_by.is_empty()));

    // a lone parenthesized subquery stays a one-value list
    let e = parse_expr("x IN ((SELECT 1))");
    let Expression::In(pred) = &e else {
        panic!("expected IN");
    };
    assert!(matches!(&pred.rows, RelExpression::Values(v) if v.rows.len() == 1));

    assert_eq!(
        round_trip("select x from t where x in ((select 1) union select 2)"),
        "SELECT x FROM t WHERE (x IN (SELECT 1 UNION SELECT 2))"
    );
}

#[test]
fn not_in_wraps_predicate() {
    let e = parse_expr("a NOT IN (1)");
    assert!(matches!(&e, Expression::Unary(u) if matches!(u.operand, Expression::In(_))));
}

#[test]
fn like_with_escape() {
    let e = parse_expr("name LIKE 'a!%%' ESCAPE '!'");
    let Expression::Like(like) = &e else {
        panic!("expected LIKE");
    };
    assert!(matches!(&like.pattern, Expression::StringLiteral(s) if s.value == "a!%%"));
    assert!(like.escape.is_some());
    round_trip("SELECT name NOT LIKE 'a!%%' ESCAPE '!'");
}

#[test]
fn is_null_and_is_not_null() {
    assert!(matches!(parse_expr("a IS NULL"), Expression::IsNull(_)));
    let e = parse_expr("a IS NOT NULL");
    assert!(matches!(&e, Expression::Unary(u) if matches!(u.operand, Expression::IsNull(_))));
    round_trip("SELECT a IS NOT NULL");
}

#[test]
fn is_truth_value() {
    let e = parse_expr("a IS UNKNOWN");
    assert!(matches!(&e, Expression::Is(is) if is.value == TruthValue::Unknown));
    let e = parse_expr("a IS NOT TRUE");
    let Expression::Unary(not) = &e else {
        panic!("expected NOT");
    };
    assert!(matches!(&not.operand, Expression::Is(is) if is.value == TruthValue::True));
    round_trip("SELECT a IS NOT FALSE");
}

#[test]
fn boolean_and_null_literals() {
    assert!(matches!(parse_expr("TRUE"), Expression::BooleanLiteral(b) if b.value == TruthValue::True));
    assert!(matches!(parse_expr("false"), Expression::BooleanLiteral(b) if b.value == TruthValue::False));
    assert!(matches!(parse_expr("NULL"), Expression::Null(_)));
}

#[test]
fn string_literal_kinds() {
    for (sql, kind, value) in [
        ("'plain'", StringKind::Char, "plain"),
        ("N'nat'", StringKind::National, "nat"),
        ("X'1F'", StringKind::Hex, "1F"),
        ("B'0101'", StringKind::Bit, "0101"),
    ] {
        let e = parse_expr(sql);
        let Expression::StringLiteral(s) = &e else {
            panic!("expected a string literal for {sql}");
        };
        assert_eq!(s.kind, kind, "{sql}");
        assert_eq!(s.value, value, "{sql}");
        round_trip(&format!("SELECT {sql}"));
    }
}

#[test]
fn string_literal_escaped_quote() {
    let e = parse_expr("'it''s'");
    assert!(matches!(&e, Expression::StringLiteral(s) if s.value == "it's"));
    round_trip("SELECT 'it''s'");
}

#[test]
fn numeric_literals() {
    assert!(matches!(parse_expr("42"), Expression::IntegerLiteral(i) if i.value == 42));
    assert!(matches!(parse_expr("1.5"), Expression::FloatLiteral(f) if f.value == 1.5));
    assert!(matches!(parse_expr("2e3"), Expression::FloatLiteral(f) if f.value == 2000.0));
    round_trip("SELECT 1.5, 2e3, .25");
}

#[test]
fn exists_and_unique_predicates() {
    assert!(matches!(
        parse_expr("EXISTS (SELECT 1 FROM t)"),
        Expression::Exists(_)
    ));
    assert!(matches!(
        parse_expr("UNIQUE (SELECT a FROM t)"),
        Expression::Unique(_)
    ));
    round_trip("SELECT a FROM t WHERE NOT EXISTS (SELECT 1 FROM u WHERE u.a = t.a)");
}

#[test]
fn row_constructors() {
    assert!(matches!(parse_expr("(1, 2)"), Expression::Row(r) if r.values.len() == 2));
    assert!(matches!(parse_expr("ROW(1)"), Expression::Row(r) if r.values.len() == 1));
    assert!(matches!(parse_expr("ROW()"), Expression::Row(r) if r.values.is_empty()));
    round_trip("SELECT (1, 2) = ROW(a, b)");
}

#[test]
fn parenthesized_expression_is_transparent() {
    let e = parse_expr("(a + b) * c");
    let (left, op, _) = binary(&e);
    assert_eq!(op, BinaryOp::Mul);
    assert_eq!(binary(left).1, BinaryOp::Add);
}

#[test]
fn scalar_subquery() {
    let e = parse_expr("(SELECT max(a) FROM t)");
    assert!(matches!(e, Expression::RowSubquery(_)));
    round_trip("SELECT (SELECT max(a) FROM t) + 1");
}

#[test]
fn aggregates() {
    for (sql, func) in [
        ("avg(a)", AggregateFunction::Avg),
        ("MAX(a)", AggregateFunction::Max),
        ("min(a)", AggregateFunction::Min),
        ("sum(a)", AggregateFunction::Sum),
        ("count(a)", AggregateFunction::Count),
        ("every(a)", AggregateFunction::Every),
        ("stddev_pop(a)", AggregateFunction::StddevPop),
        ("var_samp(a)", AggregateFunction::VarSamp),
        ("collect(a)", AggregateFunction::Collect),
        ("fusion(a)", AggregateFunction::Fusion),
        ("intersection(a)", AggregateFunction::Intersection),
    ] {
        assert!(
            matches!(parse_expr(sql), Expression::Aggregate(agg) if agg.func == func),
            "{sql}"
        );
    }
}

#[test]
fn count_asterisk() {
    let e = parse_expr("COUNT(*)");
    let Expression::Aggregate(agg) = &e else {
        panic!("expected an aggregate");
    };
    assert_eq!(agg.func, AggregateFunction::Count);
    assert!(agg.quantifier.is_none());
    assert!(agg.argument.is_asterisk());
    round_trip("SELECT COUNT(*)");
}

#[test]
fn aggregate_quantifier_and_filter() {
    let e = parse_expr("sum(DISTINCT a) FILTER (WHERE a > 0)");
    let Expression::Aggregate(agg) = &e else {
        panic!("expected an aggregate");
    };
    assert_eq!(agg.quantifier, Some(SetQuantifier::Distinct));
    assert!(agg.filter.is_some());
    round_trip("SELECT sum(DISTINCT a) FILTER (WHERE a > 0) FROM t");
}

#[test]
fn qualified_asterisk() {
    let e = parse_expr("t.*");
    assert!(matches!(&e, Expression::Asterisk(a) if a.qualifier.as_ref().is_some_and(|q| q.name == "t")));
    round_trip("SELECT t.* FROM t");
}

#[test]
fn quoted_identifiers_keep_case() {
    let e = parse_expr("\"MixedCase\"");
    assert!(matches!(&e, Expression::Var(v) if v.name.name == "MixedCase"));
    let e = parse_expr("Folded");
    assert!(matches!(&e, Expression::Var(v) if v.name.name == "folded"));
    round_trip("SELECT \"MixedCase\", \"select\", \"a b\"");
}
