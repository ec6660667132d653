//! Expression grammar, driven by the binding powers in [`super::pratt`].

use super::error::ParseError;
use super::parser::Parser;
use super::pratt::{
    infix_binding_power, prefix_binding_power, token_to_binary_op, token_to_unary_op, COMPARISON,
};
use super::query::unwrap_bare;
use crate::ast::{
    AggregateExpr, AggregateFunction, Asterisk, BetweenPred, BinaryExpr, BooleanLiteral,
    CollateExpr, ExistsPred, Expression, FloatLiteral, InPred, IntegerLiteral, IsExpr, LikePred,
    NullLiteral, NullPred, QualifiedName, RelExpression, RowExpr, RowSubquery, StringLiteral,
    TruthValue, UnaryExpr, UnaryOp, UniquePred, ValuesExpr, Var,
};
use crate::error::Result;
use crate::lexer::{Keyword, Span, TokenKind};

impl Parser<'_> {
    /// Parses an expression using Pratt parsing. Only operators binding at
    /// least as tightly as `min_bp` are consumed.
    pub(super) fn parse_expression(&mut self, min_bp: u8) -> Result<Expression> {
        self.nested(|p| p.parse_operand(min_bp))
    }

    /// Parses the right operand of an operator whose link has already
    /// entered a level.
    fn parse_operand(&mut self, min_bp: u8) -> Result<Expression> {
        let start = self.current.span;
        let lhs = self.parse_prefix()?;
        self.parse_infix_operations(lhs, min_bp, start)
    }

    /// Applies infix and postfix operators to `lhs`.
    ///
    /// Operators of the comparison tier do not chain: once one has been
    /// applied, no further operator of that tier or above may follow at
    /// this level.
    pub(super) fn parse_infix_operations(
        &mut self,
        mut lhs: Expression,
        min_bp: u8,
        start: Span,
    ) -> Result<Expression> {
        let mut levels = 0;
        let mut after_comparison = false;

        while let Some((l_bp, r_bp)) = self.infix_power()? {
            if l_bp < min_bp {
                break;
            }
            if after_comparison && l_bp >= COMPARISON.0 {
                return Err(ParseError::new(
                    format!(
                        "{} cannot follow a comparison or predicate without parentheses",
                        self.current.kind
                    ),
                    self.current.span,
                )
                .into());
            }

            self.enter()?;
            levels += 1;
            lhs = self.parse_infix(lhs, r_bp, start)?;
            after_comparison = (l_bp, r_bp) == COMPARISON;
        }

        self.leave(levels);
        Ok(lhs)
    }

    /// Returns true if the current token applies an operator to a preceding
    /// expression.
    pub(super) fn continues_expression(&mut self) -> Result<bool> {
        Ok(self.infix_power()?.is_some())
    }

    /// Binding power of the current token in infix position. NOT counts
    /// only in front of BETWEEN, IN or LIKE.
    fn infix_power(&mut self) -> Result<Option<(u8, u8)>> {
        if self.check_keyword(Keyword::Not) {
            let negates_predicate = matches!(
                self.peek()?,
                TokenKind::Keyword(Keyword::Between | Keyword::In | Keyword::Like)
            );
            return Ok(negates_predicate.then_some(COMPARISON));
        }
        Ok(infix_binding_power(&self.current.kind))
    }

    /// Parses the operator at the current token and its right operand.
    fn parse_infix(&mut self, lhs: Expression, r_bp: u8, start: Span) -> Result<Expression> {
        match self.current.as_keyword() {
            Some(Keyword::Collate) => {
                self.advance()?;
                let collation = self.parse_qualified_name()?;
                Ok(CollateExpr {
                    expr: lhs,
                    collation,
                    span: self.span_from(start),
                }
                .into())
            }
            Some(Keyword::Is) => self.parse_is(lhs, start),
            Some(Keyword::Not) => {
                self.advance()?;
                let predicate = self.parse_predicate(lhs, start)?;
                Ok(self.negate(predicate, start))
            }
            Some(Keyword::Between | Keyword::In | Keyword::Like) => {
                self.parse_predicate(lhs, start)
            }
            _ => {
                let Some(op) = token_to_binary_op(&self.current.kind) else {
                    return Err(self.unexpected("operator"));
                };
                self.advance()?;
                let right = self.parse_operand(r_bp)?;
                Ok(BinaryExpr {
                    left: lhs,
                    op,
                    right,
                    span: self.span_from(start),
                }
                .into())
            }
        }
    }

    /// Parses `IS [NOT] NULL|TRUE|FALSE|UNKNOWN`.
    fn parse_is(&mut self, lhs: Expression, start: Span) -> Result<Expression> {
        self.expect_keyword(Keyword::Is)?;
        let negated = self.eat_keyword(Keyword::Not)?;

        let value = match self.current.as_keyword() {
            Some(Keyword::Null) => None,
            Some(Keyword::True) => Some(TruthValue::True),
            Some(Keyword::False) => Some(TruthValue::False),
            Some(Keyword::Unknown) => Some(TruthValue::Unknown),
            _ => return Err(self.unexpected("NULL, TRUE, FALSE or UNKNOWN")),
        };
        self.advance()?;

        let span = self.span_from(start);
        let test: Expression = match value {
            None => NullPred { expr: lhs, span }.into(),
            Some(value) => IsExpr {
                expr: lhs,
                value,
                span,
            }
            .into(),
        };
        Ok(if negated {
            self.negate(test, start)
        } else {
            test
        })
    }

    /// Parses BETWEEN, IN or LIKE applied to `lhs`.
    fn parse_predicate(&mut self, lhs: Expression, start: Span) -> Result<Expression> {
        // Operands bind tighter than the comparison tier
        let operand_bp = COMPARISON.1;

        match self.current.as_keyword() {
            Some(Keyword::Between) => {
                self.advance()?;
                let symmetric = if self.eat_keyword(Keyword::Symmetric)? {
                    true
                } else {
                    self.eat_keyword(Keyword::Asymmetric)?;
                    false
                };
                let low = self.parse_operand(operand_bp)?;
                self.expect_keyword(Keyword::And)?;
                let high = self.parse_operand(operand_bp)?;
                Ok(BetweenPred {
                    expr: lhs,
                    low,
                    high,
                    symmetric,
                    span: self.span_from(start),
                }
                .into())
            }
            Some(Keyword::In) => {
                self.advance()?;
                let rows_start = self.current.span;
                self.expect(&TokenKind::LeftParen)?;
                let rows: RelExpression = if self.starts_query() {
                    self.parse_query()?.into()
                } else {
                    let query_start = self.current.span;
                    let mut rows = self.parse_comma_separated(|p| p.parse_expression(0))?;
                    match rows.pop() {
                        // `x IN ((SELECT 1) UNION SELECT 2)`
                        Some(Expression::RowSubquery(sub))
                            if rows.is_empty() && self.continues_query() =>
                        {
                            let RowSubquery { query, .. } = *sub;
                            let body = self.parse_set_operations(unwrap_bare(query), 0)?;
                            self.parse_query_tail(None, body, query_start)?.into()
                        }
                        last => {
                            rows.extend(last);
                            ValuesExpr {
                                rows,
                                span: self.current.span.merge(rows_start),
                            }
                            .into()
                        }
                    }
                };
                self.expect(&TokenKind::RightParen)?;
                Ok(InPred {
                    expr: lhs,
                    rows,
                    span: self.span_from(start),
                }
                .into())
            }
            Some(Keyword::Like) => {
                self.advance()?;
                let pattern = self.parse_operand(operand_bp)?;
                let escape = if self.eat_keyword(Keyword::Escape)? {
                    Some(self.parse_operand(operand_bp)?)
                } else {
                    None
                };
                Ok(LikePred {
                    expr: lhs,
                    pattern,
                    escape,
                    span: self.span_from(start),
                }
                .into())
            }
            _ => Err(self.unexpected("BETWEEN, IN or LIKE")),
        }
    }

    /// Wraps `operand` in NOT.
    fn negate(&self, operand: Expression, start: Span) -> Expression {
        UnaryExpr {
            op: UnaryOp::Not,
            operand,
            span: self.span_from(start),
        }
        .into()
    }

    /// Parses a prefix expression.
    fn parse_prefix(&mut self) -> Result<Expression> {
        let start = self.current.span;
        let kind = &self.current.kind;
        let (Some(op), Some(bp)) = (token_to_unary_op(kind), prefix_binding_power(kind)) else {
            return self.parse_primary();
        };

        self.advance()?;
        let operand = self.parse_expression(bp)?;
        Ok(UnaryExpr {
            op,
            operand,
            span: self.span_from(start),
        }
        .into())
    }

    /// Parses a primary expression.
    fn parse_primary(&mut self) -> Result<Expression> {
        let start = self.current.span;

        let expr: Expression = match &self.current.kind {
            // Literals
            TokenKind::Integer(value) => {
                let value = *value;
                self.advance()?;
                IntegerLiteral { value, span: start }.into()
            }
            TokenKind::Float(value) => {
                let value = *value;
                self.advance()?;
                FloatLiteral { value, span: start }.into()
            }
            TokenKind::String { value, kind } => {
                let (value, kind) = (value.clone(), *kind);
                self.advance()?;
                StringLiteral {
                    value,
                    kind,
                    span: start,
                }
                .into()
            }

            // Wildcard
            TokenKind::Star => {
                self.advance()?;
                Asterisk {
                    qualifier: None,
                    span: start,
                }
                .into()
            }

            // Parenthesized expression, row constructor or subquery
            TokenKind::LeftParen => return self.parse_parenthesized_expression(),

            TokenKind::Keyword(keyword) => return self.parse_keyword_expression(*keyword),
            TokenKind::Identifier(_) => return self.parse_column_ref(),

            _ => return Err(self.unexpected("expression")),
        };
        Ok(expr)
    }

    /// Parses an expression that starts with a keyword.
    fn parse_keyword_expression(&mut self, keyword: Keyword) -> Result<Expression> {
        let start = self.current.span;

        let truth = match keyword {
            Keyword::True => Some(TruthValue::True),
            Keyword::False => Some(TruthValue::False),
            Keyword::Unknown => Some(TruthValue::Unknown),
            _ => None,
        };
        if let Some(value) = truth {
            self.advance()?;
            return Ok(BooleanLiteral { value, span: start }.into());
        }

        match keyword {
            Keyword::Null => {
                self.advance()?;
                Ok(NullLiteral { span: start }.into())
            }
            Keyword::Exists => {
                self.advance()?;
                let query = self.parse_parenthesized(Self::parse_query)?;
                Ok(ExistsPred {
                    query,
                    span: self.span_from(start),
                }
                .into())
            }
            Keyword::Unique => {
                self.advance()?;
                let query = self.parse_parenthesized(Self::parse_query)?;
                Ok(UniquePred {
                    query,
                    span: self.span_from(start),
                }
                .into())
            }
            Keyword::Row => {
                self.advance()?;
                let values = self.parse_parenthesized(|p| {
                    if p.check(&TokenKind::RightParen) {
                        Ok(vec![])
                    } else {
                        p.parse_comma_separated(|p| p.parse_expression(0))
                    }
                })?;
                Ok(RowExpr {
                    values,
                    span: self.span_from(start),
                }
                .into())
            }
            _ => {
                if let Some(func) = aggregate_function(keyword) {
                    if matches!(self.peek()?, TokenKind::LeftParen) {
                        return self.parse_aggregate(func);
                    }
                }
                if keyword.is_reserved() {
                    Err(self.unexpected("expression"))
                } else {
                    self.parse_column_ref()
                }
            }
        }
    }

    /// Parses `func([DISTINCT|ALL] argument) [FILTER (WHERE condition)]`.
    fn parse_aggregate(&mut self, func: AggregateFunction) -> Result<Expression> {
        let start = self.current.span;
        self.advance()?;

        let (quantifier, argument) = self.parse_parenthesized(|p| {
            let quantifier = p.parse_set_quantifier()?;
            let argument = p.parse_expression(0)?;
            Ok((quantifier, argument))
        })?;

        let filter = if self.check_keyword(Keyword::Filter)
            && matches!(self.peek()?, TokenKind::LeftParen)
        {
            self.advance()?;
            Some(self.parse_parenthesized(|p| {
                p.expect_keyword(Keyword::Where)?;
                p.parse_expression(0)
            })?)
        } else {
            None
        };

        Ok(AggregateExpr {
            func,
            quantifier,
            argument,
            filter,
            span: self.span_from(start),
        }
        .into())
    }

    /// Parses `a.b.c` or `a.b.*`.
    fn parse_column_ref(&mut self) -> Result<Expression> {
        let start = self.current.span;
        let mut parts = vec![self.expect_identifier()?];

        while self.eat(&TokenKind::Dot)? {
            if self.eat(&TokenKind::Star)? {
                return Ok(Asterisk {
                    qualifier: Some(QualifiedName::from_parts(parts)),
                    span: self.span_from(start),
                }
                .into());
            }
            parts.push(self.expect_identifier()?);
        }

        if self.check(&TokenKind::LeftParen) {
            return Err(ParseError::new(
                format!(
                    "Unsupported function call: {}; only aggregate functions may be called",
                    parts.join(".")
                ),
                self.current.span,
            )
            .into());
        }

        Ok(Var {
            name: QualifiedName::from_parts(parts),
            span: self.span_from(start),
        }
        .into())
    }

    /// Parses what follows `(` in expression position: a subquery, a row
    /// constructor or a parenthesized expression.
    fn parse_parenthesized_expression(&mut self) -> Result<Expression> {
        let start = self.current.span;
        self.expect(&TokenKind::LeftParen)?;

        if self.starts_query() {
            let query = self.parse_query()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(RowSubquery {
                query,
                span: self.span_from(start),
            }
            .into());
        }

        let first = self.parse_expression(0)?;
        let expr = match first {
            // `((SELECT 1) UNION SELECT 2)`
            Expression::RowSubquery(sub) if self.continues_query() => {
                let RowSubquery { query, .. } = *sub;
                let body = self.parse_set_operations(unwrap_bare(query), 0)?;
                let query = self.parse_query_tail(None, body, start)?;
                self.expect(&TokenKind::RightParen)?;
                RowSubquery {
                    query,
                    span: self.span_from(start),
                }
                .into()
            }
            first if self.check(&TokenKind::Comma) => {
                self.advance()?;
                let mut values = vec![first];
                values.extend(self.parse_comma_separated(|p| p.parse_expression(0))?);
                self.expect(&TokenKind::RightParen)?;
                RowExpr {
                    values,
                    span: self.span_from(start),
                }
                .into()
            }
            first => {
                self.expect(&TokenKind::RightParen)?;
                first
            }
        };
        Ok(expr)
    }
}

/// Maps an aggregate function keyword to its function.
const fn aggregate_function(keyword: Keyword) -> Option<AggregateFunction> {
    match keyword {
        Keyword::Avg => Some(AggregateFunction::Avg),
        Keyword::Max => Some(AggregateFunction::Max),
        Keyword::Min => Some(AggregateFunction::Min),
        Keyword::Sum => Some(AggregateFunction::Sum),
        Keyword::Count => Some(AggregateFunction::Count),
        Keyword::Every => Some(AggregateFunction::Every),
        Keyword::Any => Some(AggregateFunction::Any),
        Keyword::Some => Some(AggregateFunction::Some),
        Keyword::StddevPop => Some(AggregateFunction::StddevPop),
        Keyword::StddevSamp => Some(AggregateFunction::StddevSamp),
        Keyword::VarPop => Some(AggregateFunction::VarPop),
        Keyword::VarSamp => Some(AggregateFunction::VarSamp),
        Keyword::Collect => Some(AggregateFunction::Collect),
        Keyword::Fusion => Some(AggregateFunction::Fusion),
        Keyword::Intersection => Some(AggregateFunction::Intersection),
        _ => None,
    }
}
