//! Tree depth of a parsed statement.

use super::{walk_expression, walk_query, walk_rel_expression, walk_statement, Visitor};
use crate::ast::{Expression, Query, RelExpression, Statement};
use crate::lexer::Span;

/// Returns the span of the first node nested more than `limit` levels
/// deep, or `None` if the whole tree fits.
///
/// Queries, relational expressions and scalar expressions each count as
/// one level. Parentheses do not, so a statement and its canonical form
/// always have the same depth.
pub(crate) fn first_node_beyond(statement: &Statement, limit: usize) -> Option<Span> {
    let mut check = DepthCheck {
        limit,
        depth: 0,
        exceeded: None,
    };
    walk_statement(&mut check, statement);
    check.exceeded
}

struct DepthCheck {
    limit: usize,
    depth: usize,
    exceeded: Option<Span>,
}

impl DepthCheck {
    fn descend(&mut self, span: Span, walk: impl FnOnce(&mut Self)) {
        if self.exceeded.is_some() {
            return;
        }
        if self.depth >= self.limit {
            self.exceeded = Some(span);
            return;
        }
        self.depth += 1;
        walk(self);
        self.depth -= 1;
    }
}

impl<'ast> Visitor<'ast> for DepthCheck {
    fn visit_query(&mut self, query: &'ast Query) {
        self.descend(query.span, |v| walk_query(v, query));
    }

    fn visit_rel_expression(&mut self, rel: &'ast RelExpression) {
        self.descend(rel.span(), |v| walk_rel_expression(v, rel));
    }

    fn visit_expression(&mut self, expr: &'ast Expression) {
        self.descend(expr.span(), |v| walk_expression(v, expr));
    }
}
