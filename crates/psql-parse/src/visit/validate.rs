//! Post-parse checks for rules the grammar accepts but SQL forbids.

use std::fmt;

use tracing::trace;

use super::{walk_expression, Visitor};
use crate::ast::{AggregateFunction, Expression, SelectExpr, Statement};
use crate::lexer::Span;

/// The rule a [`Violation`] breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ViolationKind {
    /// `*` outside a target list and outside `COUNT(*)`.
    MisplacedAsterisk,
    /// `DISTINCT` or `ALL` in front of an asterisk argument, as in
    /// `COUNT(DISTINCT *)`.
    QuantifiedAsterisk,
}

impl ViolationKind {
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::MisplacedAsterisk => {
                "'*' is only allowed as a select target or as the argument of COUNT"
            }
            Self::QuantifiedAsterisk => "a quantifier has no meaning on a '*' argument",
        }
    }
}

/// A rule broken by a syntactically valid statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Violation {
    pub kind: ViolationKind,
    pub span: Span,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind.message(), self.span)
    }
}

/// Checks `statement` and returns every violation found, in source order.
#[must_use]
pub fn validate(statement: &Statement) -> Vec<Violation> {
    let mut validator = Validator::default();
    validator.visit_statement(statement);
    validator.violations
}

#[derive(Default)]
struct Validator {
    violations: Vec<Violation>,
    /// Set right before visiting an expression that may be `*`.
    asterisk_allowed: bool,
}

impl Validator {
    fn report(&mut self, kind: ViolationKind, span: Span) {
        trace!(?kind, %span, "validation violation");
        self.violations.push(Violation { kind, span });
    }
}

impl<'ast> Visitor<'ast> for Validator {
    fn visit_select(&mut self, select: &'ast SelectExpr) {
        for target in &select.targets {
            self.asterisk_allowed = true;
            self.visit_expression(target);
        }

        for rel in &select.from {
            self.visit_rel_expression(rel);
        }
        let groupings = select.group_by.iter().flat_map(|g| &g.groupings);
        let clauses = select.selection.iter().chain(groupings).chain(&select.having);
        for expr in clauses {
            self.visit_expression(expr);
        }
        for window in &select.windows {
            self.visit_window_spec(&window.spec);
        }
    }

    fn visit_expression(&mut self, expr: &'ast Expression) {
        let allowed = std::mem::take(&mut self.asterisk_allowed);

        match expr {
            Expression::Asterisk(asterisk) if !allowed => {
                self.report(ViolationKind::MisplacedAsterisk, asterisk.span);
            }
            Expression::Aggregate(aggregate) if aggregate.argument.is_asterisk() => {
                if aggregate.quantifier.is_some() {
                    self.report(ViolationKind::QuantifiedAsterisk, aggregate.span);
                }
                self.asterisk_allowed = aggregate.func == AggregateFunction::Count;
            }
            _ => {}
        }

        walk_expression(self, expr);
    }
}
