//! Query grammar: WITH, set operations, SELECT and VALUES bodies, FROM
//! items and joins, GROUP BY, WINDOW, ORDER BY, OFFSET and FETCH.

use super::parser::Parser;
use super::pratt::set_op_binding_power;
use crate::ast::{
    AliasExpr, Cte, Cube, Expression, Fetch, FetchKind, FrameBound, FrameBoundKind, FrameExclusion,
    FrameUnit, GroupClause, GroupingSet, GroupingSets, JoinCondition, JoinExpr, JoinKind,
    NullOrder, Query, RelExpression, Rollup, SelectExpr, SetOp, SortOrder, SortSpec, TableAlias,
    TableName, ValuesExpr, WindowDef, WindowFrame, WindowSpec, WithClause,
};
use crate::error::Result;
use crate::lexer::{Keyword, Span, TokenKind};

impl Parser<'_> {
    /// Parses `[WITH ...] body [ORDER BY ...] [OFFSET ...] [FETCH ...]`.
    pub(super) fn parse_query(&mut self) -> Result<Query> {
        self.nested(|p| {
            let start = p.current.span;
            let with = if p.check_keyword(Keyword::With) {
                Some(p.parse_with_clause()?)
            } else {
                None
            };
            let first = p.parse_query_primary()?;
            let body = p.parse_set_operations(first, 0)?;
            p.parse_query_tail(with, body, start)
        })
    }

    /// Parses the clauses that apply to the outermost combined result.
    pub(super) fn parse_query_tail(
        &mut self,
        with: Option<WithClause>,
        body: RelExpression,
        start: Span,
    ) -> Result<Query> {
        let order_by = if self.eat_keyword(Keyword::Order)? {
            self.expect_keyword(Keyword::By)?;
            self.parse_comma_separated(Self::parse_sort_spec)?
        } else {
            vec![]
        };

        let offset = if self.eat_keyword(Keyword::Offset)? {
            let count = self.parse_expression(0)?;
            if !self.eat_keyword(Keyword::Row)? {
                self.eat_keyword(Keyword::Rows)?;
            }
            Some(count)
        } else {
            None
        };

        let fetch = if self.check_keyword(Keyword::Fetch) {
            Some(self.parse_fetch()?)
        } else {
            None
        };

        Ok(Query {
            with,
            body,
            order_by,
            offset,
            fetch,
            span: self.span_from(start),
        })
    }

    /// Combines `left` with following set operations whose binding power
    /// is at least `min_bp`.
    pub(super) fn parse_set_operations(
        &mut self,
        mut left: RelExpression,
        min_bp: u8,
    ) -> Result<RelExpression> {
        let mut levels = 0;
        while let Some((op, l_bp, r_bp)) = set_op_binding_power(&self.current.kind) {
            if l_bp < min_bp {
                break;
            }
            self.enter()?;
            levels += 1;
            self.advance()?;

            let quantifier = self.parse_set_quantifier()?;
            let first = self.parse_query_primary()?;
            let right = self.parse_set_operations(first, r_bp)?;
            let span = left.span().merge(self.previous.span);
            left = SetOp {
                op,
                quantifier,
                left,
                right,
                span,
            }
            .into();
        }
        self.leave(levels);
        Ok(left)
    }

    /// Parses one operand of a set operation.
    fn parse_query_primary(&mut self) -> Result<RelExpression> {
        let start = self.current.span;
        match &self.current.kind {
            TokenKind::Keyword(Keyword::Select) => Ok(self.parse_select_expr()?.into()),
            TokenKind::Keyword(Keyword::Values) => Ok(self.parse_values()?.into()),
            TokenKind::Keyword(Keyword::Table) => {
                self.advance()?;
                let name = self.parse_qualified_name()?;
                Ok(TableName {
                    name,
                    span: self.span_from(start),
                }
                .into())
            }
            TokenKind::LeftParen => {
                let query = self.parse_parenthesized(Self::parse_query)?;
                Ok(unwrap_bare(query))
            }
            _ => Err(self.unexpected("SELECT, VALUES, TABLE or '('")),
        }
    }

    /// Parses `WITH [RECURSIVE] name [(columns)] AS (query), ...`.
    fn parse_with_clause(&mut self) -> Result<WithClause> {
        let start = self.current.span;
        self.expect_keyword(Keyword::With)?;
        let recursive = self.eat_keyword(Keyword::Recursive)?;
        let ctes = self.parse_comma_separated(Self::parse_cte)?;
        Ok(WithClause {
            recursive,
            ctes,
            span: self.span_from(start),
        })
    }

    fn parse_cte(&mut self) -> Result<Cte> {
        let start = self.current.span;
        let name = self.expect_identifier()?;
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_parenthesized_identifiers()?
        } else {
            vec![]
        };
        self.expect_keyword(Keyword::As)?;
        let query = self.parse_parenthesized(Self::parse_query)?;
        Ok(Cte {
            name,
            columns,
            query,
            span: self.span_from(start),
        })
    }

    /// Parses a SELECT projection without ORDER BY/OFFSET/FETCH.
    fn parse_select_expr(&mut self) -> Result<SelectExpr> {
        let start = self.current.span;
        self.expect_keyword(Keyword::Select)?;

        let quantifier = self.parse_set_quantifier()?;
        let targets = self.parse_comma_separated(Self::parse_target)?;

        let from = if self.eat_keyword(Keyword::From)? {
            self.parse_comma_separated(Self::parse_table_reference)?
        } else {
            vec![]
        };

        let selection = if self.eat_keyword(Keyword::Where)? {
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        let group_by = if self.check_keyword(Keyword::Group) {
            Some(self.parse_group_clause()?)
        } else {
            None
        };

        let having = if self.eat_keyword(Keyword::Having)? {
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        let windows = if self.eat_keyword(Keyword::Window)? {
            self.parse_comma_separated(Self::parse_window_def)?
        } else {
            vec![]
        };

        Ok(SelectExpr {
            quantifier,
            targets,
            from,
            selection,
            group_by,
            having,
            windows,
            span: self.span_from(start),
        })
    }

    /// Parses one target-list entry with its optional alias.
    fn parse_target(&mut self) -> Result<Expression> {
        let start = self.current.span;
        let expr = self.parse_expression(0)?;

        // Check for alias (AS name or just name)
        let name = if self.eat_keyword(Keyword::As)? {
            self.expect_identifier()?
        } else if matches!(&self.current.kind, TokenKind::Identifier(_)) {
            self.expect_identifier()?
        } else {
            return Ok(expr);
        };

        Ok(AliasExpr {
            name,
            expr,
            span: self.span_from(start),
        }
        .into())
    }

    /// Parses `VALUES row, row, ...`.
    fn parse_values(&mut self) -> Result<ValuesExpr> {
        let start = self.current.span;
        self.expect_keyword(Keyword::Values)?;
        let rows = self.parse_comma_separated(|p| p.parse_expression(0))?;
        Ok(ValuesExpr {
            rows,
            span: self.span_from(start),
        })
    }

    /// Parses `expr [ASC|DESC] [NULLS FIRST|LAST]`.
    pub(super) fn parse_sort_spec(&mut self) -> Result<SortSpec> {
        let start = self.current.span;
        let expr = self.parse_expression(0)?;

        let order = if self.eat_keyword(Keyword::Desc)? {
            SortOrder::Desc
        } else {
            self.eat_keyword(Keyword::Asc)?;
            SortOrder::Asc
        };

        let nulls = if self.eat_keyword(Keyword::Nulls)? {
            if self.eat_keyword(Keyword::First)? {
                NullOrder::First
            } else {
                self.expect_keyword(Keyword::Last)?;
                NullOrder::Last
            }
        } else {
            NullOrder::Default
        };

        Ok(SortSpec {
            expr,
            order,
            nulls,
            span: self.span_from(start),
        })
    }

    /// Parses `FETCH FIRST|NEXT [count] [PERCENT] ROW|ROWS ONLY|WITH TIES`.
    fn parse_fetch(&mut self) -> Result<Fetch> {
        let start = self.current.span;
        self.expect_keyword(Keyword::Fetch)?;

        let kind = if self.eat_keyword(Keyword::First)? {
            FetchKind::First
        } else if self.eat_keyword(Keyword::Next)? {
            FetchKind::Next
        } else {
            return Err(self.unexpected("FIRST or NEXT"));
        };

        let count = if self.check_keyword(Keyword::Row) || self.check_keyword(Keyword::Rows) {
            None
        } else {
            Some(self.parse_expression(0)?)
        };
        let percent = self.eat_keyword(Keyword::Percent)?;

        if !self.eat_keyword(Keyword::Row)? {
            self.expect_keyword(Keyword::Rows)?;
        }

        let with_ties = if self.eat_keyword(Keyword::Only)? {
            false
        } else if self.eat_keyword(Keyword::With)? {
            self.expect_keyword(Keyword::Ties)?;
            true
        } else {
            return Err(self.unexpected("ONLY or WITH TIES"));
        };

        Ok(Fetch {
            kind,
            count,
            percent,
            with_ties,
            span: self.span_from(start),
        })
    }

    // --- FROM items ---

    /// Parses a FROM-list item with its joins.
    fn parse_table_reference(&mut self) -> Result<RelExpression> {
        let primary = self.parse_table_primary()?;
        self.parse_joins(primary)
    }

    /// Applies joins to `left` for as long as join keywords follow.
    fn parse_joins(&mut self, mut left: RelExpression) -> Result<RelExpression> {
        let mut levels = 0;
        while self.is_join_start() {
            self.enter()?;
            levels += 1;
            left = self.parse_join(left)?;
        }
        self.leave(levels);
        Ok(left)
    }

    /// Checks if current token starts a join.
    fn is_join_start(&self) -> bool {
        matches!(
            &self.current.kind,
            TokenKind::Keyword(
                Keyword::Join
                    | Keyword::Inner
                    | Keyword::Left
                    | Keyword::Right
                    | Keyword::Full
                    | Keyword::Cross
                    | Keyword::Natural
            )
        )
    }

    /// Parses one join whose left operand is `left`.
    fn parse_join(&mut self, left: RelExpression) -> Result<RelExpression> {
        let start = left.span();

        if self.eat_keyword(Keyword::Cross)? {
            self.expect_keyword(Keyword::Join)?;
            let right = self.parse_table_primary()?;
            let span = self.span_from(start);
            return Ok(JoinExpr::new(JoinKind::Inner, left, right, span).into());
        }

        let natural = self.eat_keyword(Keyword::Natural)?;
        let kind = self.parse_join_kind()?;
        let right = self.parse_table_primary()?;
        let right = if natural {
            right
        } else {
            // A join nested on the right claims the nearest ON/USING
            self.parse_joins(right)?
        };

        let mut join = JoinExpr::new(kind, left, right, start);
        if natural {
            join.set_natural();
        } else if self.eat_keyword(Keyword::On)? {
            join.set_condition(JoinCondition::On(self.parse_expression(0)?));
        } else if self.check_keyword(Keyword::Using) {
            self.advance()?;
            join.set_condition(JoinCondition::Using(
                self.parse_parenthesized_identifiers()?,
            ));
        } else {
            return Err(self.unexpected("ON or USING"));
        }
        join.span = self.span_from(start);
        Ok(join.into())
    }

    /// Parses `[INNER | LEFT [OUTER] | RIGHT [OUTER] | FULL [OUTER]] JOIN`.
    fn parse_join_kind(&mut self) -> Result<JoinKind> {
        let kind = match self.current.as_keyword() {
            Some(Keyword::Inner) => {
                self.advance()?;
                JoinKind::Inner
            }
            Some(keyword @ (Keyword::Left | Keyword::Right | Keyword::Full)) => {
                self.advance()?;
                self.eat_keyword(Keyword::Outer)?;
                match keyword {
                    Keyword::Left => JoinKind::Left,
                    Keyword::Right => JoinKind::Right,
                    _ => JoinKind::Full,
                }
            }
            _ => JoinKind::Inner,
        };
        self.expect_keyword(Keyword::Join)?;
        Ok(kind)
    }

    /// Parses a table name or a parenthesized FROM item, then its alias.
    fn parse_table_primary(&mut self) -> Result<RelExpression> {
        let start = self.current.span;
        let relation = if self.check(&TokenKind::LeftParen) {
            self.nested(Self::parse_parenthesized_table)?
        } else {
            let name = self.parse_qualified_name()?;
            TableName {
                name,
                span: self.span_from(start),
            }
            .into()
        };
        self.parse_table_alias(relation, start)
    }

    /// Parses `( query )`, `( joined table )` or `( (operand) UNION ... )`.
    fn parse_parenthesized_table(&mut self) -> Result<RelExpression> {
        let start = self.current.span;
        self.expect(&TokenKind::LeftParen)?;

        let relation = if self.starts_query() {
            self.parse_query()?.into()
        } else if self.check(&TokenKind::LeftParen) {
            let first = self.parse_table_primary()?;
            if self.continues_query() {
                if !first.is_query_like() {
                    return Err(self.unexpected("')' or a join"));
                }
                let body = match first {
                    RelExpression::Query(query) => unwrap_bare(*query),
                    other => other,
                };
                let body = self.parse_set_operations(body, 0)?;
                self.parse_query_tail(None, body, start)?.into()
            } else {
                self.parse_joins(first)?
            }
        } else {
            self.parse_table_reference()?
        };

        self.expect(&TokenKind::RightParen)?;
        Ok(relation)
    }

    /// Wraps `relation` in `[AS] name [(columns)]` if an alias follows.
    fn parse_table_alias(&mut self, relation: RelExpression, start: Span) -> Result<RelExpression> {
        let name = if self.eat_keyword(Keyword::As)? {
            self.expect_identifier()?
        } else if matches!(&self.current.kind, TokenKind::Identifier(_)) {
            self.expect_identifier()?
        } else {
            return Ok(relation);
        };

        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_parenthesized_identifiers()?
        } else {
            vec![]
        };

        Ok(TableAlias {
            name,
            columns,
            relation,
            span: self.span_from(start),
        }
        .into())
    }

    // --- GROUP BY ---

    /// Parses `GROUP BY [ALL|DISTINCT] element, ...`.
    fn parse_group_clause(&mut self) -> Result<GroupClause> {
        let start = self.current.span;
        self.expect_keyword(Keyword::Group)?;
        self.expect_keyword(Keyword::By)?;
        let quantifier = self.parse_set_quantifier()?;
        let groupings = self.parse_comma_separated(Self::parse_grouping_element)?;
        Ok(GroupClause {
            quantifier,
            groupings,
            span: self.span_from(start),
        })
    }

    /// Parses ROLLUP, CUBE, GROUPING SETS or an ordinary grouping set.
    fn parse_grouping_element(&mut self) -> Result<Expression> {
        let start = self.current.span;
        let keyword = self.current.as_keyword();

        match keyword {
            Some(Keyword::Rollup | Keyword::Cube)
                if matches!(self.peek()?, TokenKind::LeftParen) =>
            {
                self.advance()?;
                let sets = self.parse_parenthesized(|p| {
                    p.parse_comma_separated(Self::parse_ordinary_grouping_set)
                })?;
                let span = self.span_from(start);
                Ok(if keyword == Some(Keyword::Rollup) {
                    Rollup { sets, span }.into()
                } else {
                    Cube { sets, span }.into()
                })
            }
            Some(Keyword::Grouping)
                if matches!(self.peek()?, TokenKind::Keyword(Keyword::Sets)) =>
            {
                self.advance()?;
                self.advance()?;
                let sets = self.nested(|p| {
                    p.parse_parenthesized(|p| p.parse_comma_separated(Self::parse_grouping_element))
                })?;
                Ok(GroupingSets {
                    sets,
                    span: self.span_from(start),
                }
                .into())
            }
            _ => Ok(self.parse_ordinary_grouping_set()?.into()),
        }
    }

    /// Parses `()`, `(a, b, ...)` or a single grouping expression.
    fn parse_ordinary_grouping_set(&mut self) -> Result<GroupingSet> {
        let start = self.current.span;

        let parenthesized_list = self.check(&TokenKind::LeftParen)
            && !matches!(
                self.peek()?,
                TokenKind::Keyword(
                    Keyword::Select | Keyword::Values | Keyword::Table | Keyword::With
                )
            );
        if !parenthesized_list {
            let expr = self.parse_expression(0)?;
            return Ok(GroupingSet {
                columns: vec![expr],
                span: self.span_from(start),
            });
        }

        self.advance()?;
        let mut columns = if self.check(&TokenKind::RightParen) {
            vec![]
        } else {
            self.parse_comma_separated(|p| p.parse_expression(0))?
        };
        self.expect(&TokenKind::RightParen)?;

        // `(a + b) * 2` is one expression that merely starts with a parenthesis
        if columns.len() == 1 && self.continues_expression()? {
            if let Some(first) = columns.pop() {
                let expr = self.nested(|p| p.parse_infix_operations(first, 0, start))?;
                columns.push(expr);
            }
        }

        Ok(GroupingSet {
            columns,
            span: self.span_from(start),
        })
    }

    // --- WINDOW ---

    /// Parses `name AS (spec)`.
    fn parse_window_def(&mut self) -> Result<WindowDef> {
        let start = self.current.span;
        let name = self.expect_identifier()?;
        self.expect_keyword(Keyword::As)?;
        let spec = self.parse_window_spec()?;
        Ok(WindowDef {
            name,
            spec,
            span: self.span_from(start),
        })
    }

    /// Parses `([existing] [PARTITION BY ...] [ORDER BY ...] [frame])`.
    fn parse_window_spec(&mut self) -> Result<WindowSpec> {
        let start = self.current.span;
        self.expect(&TokenKind::LeftParen)?;

        let existing = if matches!(&self.current.kind, TokenKind::Identifier(_)) {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        let partition_by = if self.eat_keyword(Keyword::Partition)? {
            self.expect_keyword(Keyword::By)?;
            self.parse_comma_separated(|p| p.parse_expression(0))?
        } else {
            vec![]
        };

        let order_by = if self.eat_keyword(Keyword::Order)? {
            self.expect_keyword(Keyword::By)?;
            self.parse_comma_separated(Self::parse_sort_spec)?
        } else {
            vec![]
        };

        let frame = match self.current.as_keyword() {
            Some(Keyword::Rows | Keyword::Range | Keyword::Groups) => {
                Some(self.parse_window_frame()?)
            }
            _ => None,
        };

        self.expect(&TokenKind::RightParen)?;
        Ok(WindowSpec {
            existing,
            partition_by,
            order_by,
            frame,
            span: self.span_from(start),
        })
    }

    /// Parses `ROWS|RANGE|GROUPS [BETWEEN] bound [AND bound] [EXCLUDE ...]`.
    fn parse_window_frame(&mut self) -> Result<WindowFrame> {
        let start = self.current.span;
        let unit = match self.current.as_keyword() {
            Some(Keyword::Rows) => FrameUnit::Rows,
            Some(Keyword::Range) => FrameUnit::Range,
            Some(Keyword::Groups) => FrameUnit::Groups,
            _ => return Err(self.unexpected("ROWS, RANGE or GROUPS")),
        };
        self.advance()?;

        let (first, end) = if self.eat_keyword(Keyword::Between)? {
            let first = self.parse_frame_bound()?;
            self.expect_keyword(Keyword::And)?;
            (first, Some(self.parse_frame_bound()?))
        } else {
            (self.parse_frame_bound()?, None)
        };

        let exclusion = if self.eat_keyword(Keyword::Exclude)? {
            Some(self.parse_frame_exclusion()?)
        } else {
            None
        };

        Ok(WindowFrame {
            unit,
            start: first,
            end,
            exclusion,
            span: self.span_from(start),
        })
    }

    /// Parses `UNBOUNDED PRECEDING|FOLLOWING`, `CURRENT ROW` or
    /// `expr PRECEDING|FOLLOWING`.
    fn parse_frame_bound(&mut self) -> Result<FrameBound> {
        let start = self.current.span;

        let value = if self.eat_keyword(Keyword::Unbounded)? {
            None
        } else if self.check_keyword(Keyword::Current)
            && matches!(self.peek()?, TokenKind::Keyword(Keyword::Row))
        {
            self.advance()?;
            self.advance()?;
            return Ok(FrameBound {
                kind: FrameBoundKind::CurrentRow,
                value: None,
                span: self.span_from(start),
            });
        } else {
            Some(self.parse_expression(0)?)
        };

        let kind = if self.eat_keyword(Keyword::Preceding)? {
            FrameBoundKind::Preceding
        } else if self.eat_keyword(Keyword::Following)? {
            FrameBoundKind::Following
        } else {
            return Err(self.unexpected("PRECEDING or FOLLOWING"));
        };

        Ok(FrameBound {
            kind,
            value,
            span: self.span_from(start),
        })
    }

    /// Parses what follows EXCLUDE.
    fn parse_frame_exclusion(&mut self) -> Result<FrameExclusion> {
        let exclusion = match self.current.as_keyword() {
            Some(Keyword::Current) => {
                self.advance()?;
                self.expect_keyword(Keyword::Row)?;
                return Ok(FrameExclusion::CurrentRow);
            }
            Some(Keyword::Group) => FrameExclusion::Group,
            Some(Keyword::Ties) => FrameExclusion::Ties,
            Some(Keyword::No) => {
                self.advance()?;
                self.expect_keyword(Keyword::Others)?;
                return Ok(FrameExclusion::NoOthers);
            }
            _ => return Err(self.unexpected("CURRENT ROW, GROUP, TIES or NO OTHERS")),
        };
        self.advance()?;
        Ok(exclusion)
    }
}

/// Drops the `Query` wrapper of a parenthesized query that carries none of
/// WITH, ORDER BY, OFFSET or FETCH.
pub(super) fn unwrap_bare(query: Query) -> RelExpression {
    if query.is_bare() {
        query.body
    } else {
        query.into()
    }
}
