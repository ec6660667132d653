//! Canonical SQL printer.
//!
//! Every node has one fixed template. Operators and predicates are fully
//! parenthesized, so the output never depends on precedence and parses back
//! to a structurally equal tree.

use std::fmt;

use super::Visitor;
use crate::ast::{
    write_ident, ColumnConstraint, ColumnConstraintKind, ColumnDef, ColumnDefault,
    CreateStatement, Cte, DeleteStatement, Expression, FrameBound, FrameBoundKind, GroupingSet,
    InsertSource, InsertStatement, JoinCondition, JoinExpr, Name, NullOrder, OnCommit, Overriding,
    QualifiedName, Query, References, RelExpression, SelectExpr, SetOp, SortSpec, Statement,
    StringLiteral, TableConstraint, TableConstraintKind, TableName, Temporary, WindowSpec,
};

/// Renders nodes to canonical SQL text.
#[derive(Debug, Default)]
pub struct Printer {
    sql: String,
}

impl Printer {
    /// Creates an empty printer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the text printed so far.
    #[must_use]
    pub fn finish(self) -> String {
        self.sql
    }

    fn push(&mut self, text: &str) {
        self.sql.push_str(text);
    }

    fn ident(&mut self, name: &str) {
        // Writing to a String cannot fail
        let _ = write_ident(&mut self.sql, name);
    }

    fn display(&mut self, value: &impl fmt::Display) {
        use fmt::Write;
        let _ = write!(self.sql, "{value}");
    }

    fn idents(&mut self, names: &[Name]) {
        self.push("(");
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.ident(name);
        }
        self.push(")");
    }

    fn comma_separated<T>(&mut self, items: &[T], mut print: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            print(self, item);
        }
    }

    fn expressions(&mut self, exprs: &[Expression]) {
        self.comma_separated(exprs, |p, e| p.visit_expression(e));
    }

    fn sort_specs(&mut self, specs: &[SortSpec]) {
        self.comma_separated(specs, |p, s| p.visit_sort_spec(s));
    }

    /// Prints the body of a query. A set operation directly under its query
    /// needs no parentheses of its own.
    fn query_body(&mut self, rel: &RelExpression) {
        match rel {
            RelExpression::SetOp(set_op) => self.set_op(set_op),
            _ => self.set_operand(rel),
        }
    }

    fn set_op(&mut self, set_op: &SetOp) {
        self.set_operand(&set_op.left);
        self.push(" ");
        self.push(set_op.op.as_str());
        if let Some(quantifier) = set_op.quantifier {
            self.push(" ");
            self.push(quantifier.as_str());
        }
        self.push(" ");
        self.set_operand(&set_op.right);
    }

    /// Prints a query body or one side of a set operation.
    fn set_operand(&mut self, rel: &RelExpression) {
        match rel {
            RelExpression::Select(select) => self.visit_select(select),
            RelExpression::Values(values) => {
                self.push("VALUES ");
                self.expressions(&values.rows);
            }
            RelExpression::Table(table) => {
                self.push("TABLE ");
                self.display(&table.name);
            }
            RelExpression::SetOp(set_op) => {
                self.push("(");
                self.set_op(set_op);
                self.push(")");
            }
            RelExpression::Query(query) => self.subquery(query),
            RelExpression::Join(_) | RelExpression::Alias(_) => {
                self.push("(SELECT * FROM ");
                self.visit_rel_expression(rel);
                self.push(")");
            }
        }
    }

    fn subquery(&mut self, query: &Query) {
        self.push("(");
        self.visit_query(query);
        self.push(")");
    }

    fn grouping_set(&mut self, set: &GroupingSet) {
        match set.columns.as_slice() {
            [column] => self.visit_expression(column),
            columns => {
                self.push("(");
                self.expressions(columns);
                self.push(")");
            }
        }
    }

    fn grouping_sets(&mut self, keyword: &str, sets: &[GroupingSet]) {
        self.push(keyword);
        self.push(" (");
        self.comma_separated(sets, Self::grouping_set);
        self.push(")");
    }

    fn frame_bound(&mut self, bound: &FrameBound) {
        let direction = match bound.kind {
            FrameBoundKind::CurrentRow => {
                self.push("CURRENT ROW");
                return;
            }
            FrameBoundKind::Preceding => " PRECEDING",
            FrameBoundKind::Following => " FOLLOWING",
        };
        match &bound.value {
            Some(value) => self.visit_expression(value),
            None => self.push("UNBOUNDED"),
        }
        self.push(direction);
    }

    fn string_literal(&mut self, literal: &StringLiteral) {
        self.push(literal.kind.prefix());
        self.push("'");
        self.push(&literal.value.replace('\'', "''"));
        self.push("'");
    }

    fn references(&mut self, references: &References) {
        self.push("REFERENCES ");
        self.display(&references.table);
        if !references.columns.is_empty() {
            self.push(" ");
            self.idents(&references.columns);
        }
        self.push(" MATCH ");
        self.push(references.match_option.as_str());
        self.push(" ON DELETE ");
        self.push(references.actions.on_delete.as_str());
        self.push(" ON UPDATE ");
        self.push(references.actions.on_update.as_str());
    }

    fn constraint_name(&mut self, name: Option<&QualifiedName>) {
        if let Some(name) = name {
            self.push("CONSTRAINT ");
            self.display(name);
            self.push(" ");
        }
    }

    fn column_constraint(&mut self, constraint: &ColumnConstraint) {
        self.constraint_name(constraint.name.as_ref());
        match &constraint.kind {
            ColumnConstraintKind::NotNull => self.push("NOT NULL"),
            ColumnConstraintKind::Unique => self.push("UNIQUE"),
            ColumnConstraintKind::PrimaryKey => self.push("PRIMARY KEY"),
            ColumnConstraintKind::References(references) => self.references(references),
        }
    }

    fn table_constraint(&mut self, constraint: &TableConstraint) {
        self.constraint_name(constraint.name.as_ref());
        match &constraint.kind {
            TableConstraintKind::Unique(columns) => {
                self.push("UNIQUE ");
                self.idents(columns);
            }
            TableConstraintKind::PrimaryKey(columns) => {
                self.push("PRIMARY KEY ");
                self.idents(columns);
            }
            TableConstraintKind::ForeignKey {
                columns,
                references,
            } => {
                self.push("FOREIGN KEY ");
                self.idents(columns);
                self.push(" ");
                self.references(references);
            }
        }
    }
}

impl<'ast> Visitor<'ast> for Printer {
    fn visit_create(&mut self, create: &'ast CreateStatement) {
        self.push("CREATE ");
        match create.temporary {
            Some(Temporary::Global) => self.push("GLOBAL TEMPORARY "),
            Some(Temporary::Local) => self.push("LOCAL TEMPORARY "),
            None => {}
        }
        self.push("TABLE ");
        self.display(&create.name);
        self.push(" (");
        self.comma_separated(&create.columns, |p, c| p.visit_column_def(c));
        for constraint in &create.constraints {
            self.push(", ");
            self.table_constraint(constraint);
        }
        self.push(")");
        match create.on_commit {
            Some(OnCommit::Delete) => self.push(" ON COMMIT DELETE ROWS"),
            Some(OnCommit::Preserve) => self.push(" ON COMMIT PRESERVE ROWS"),
            None => {}
        }
    }

    fn visit_column_def(&mut self, column: &'ast ColumnDef) {
        self.ident(&column.name);
        self.push(" ");
        self.display(&column.data_type);
        if let Some(collation) = &column.collation {
            self.push(" COLLATE ");
            self.display(collation);
        }
        match &column.default {
            Some(ColumnDefault::User(user)) => {
                self.push(" DEFAULT ");
                self.push(user.as_str());
            }
            Some(ColumnDefault::Null) => self.push(" DEFAULT NULL"),
            // A bare NULL would read back as the null default
            Some(ColumnDefault::Expression(Expression::Null(_))) => self.push(" DEFAULT (NULL)"),
            Some(ColumnDefault::Expression(expr)) => {
                self.push(" DEFAULT ");
                self.visit_expression(expr);
            }
            None => {}
        }
        for constraint in &column.constraints {
            self.push(" ");
            self.column_constraint(constraint);
        }
    }

    fn visit_insert(&mut self, insert: &'ast InsertStatement) {
        self.push("INSERT INTO ");
        self.display(&insert.table);
        if !insert.columns.is_empty() {
            self.push(" ");
            self.idents(&insert.columns);
        }
        match insert.overriding {
            Some(Overriding::UserValue) => self.push(" OVERRIDING USER VALUE"),
            Some(Overriding::SystemValue) => self.push(" OVERRIDING SYSTEM VALUE"),
            None => {}
        }
        match &insert.source {
            InsertSource::DefaultValues => self.push(" DEFAULT VALUES"),
            InsertSource::Query(query) => {
                self.push(" ");
                self.visit_query(query);
            }
        }
    }

    fn visit_delete(&mut self, delete: &'ast DeleteStatement) {
        self.push("DELETE FROM ");
        if delete.only {
            self.push("ONLY ");
        }
        self.display(&delete.table);
        if let Some(selection) = &delete.selection {
            self.push(" WHERE ");
            self.visit_expression(selection);
        }
    }

    fn visit_query(&mut self, query: &'ast Query) {
        if let Some(with) = &query.with {
            self.push("WITH ");
            if with.recursive {
                self.push("RECURSIVE ");
            }
            self.comma_separated(&with.ctes, |p, cte| p.visit_cte(cte));
            self.push(" ");
        }
        self.query_body(&query.body);
        if !query.order_by.is_empty() {
            self.push(" ORDER BY ");
            self.sort_specs(&query.order_by);
        }
        if let Some(offset) = &query.offset {
            self.push(" OFFSET ");
            self.visit_expression(offset);
            self.push(" ROWS");
        }
        if let Some(fetch) = &query.fetch {
            self.push(" FETCH ");
            self.push(fetch.kind.as_str());
            if let Some(count) = &fetch.count {
                self.push(" ");
                self.visit_expression(count);
            }
            if fetch.percent {
                self.push(" PERCENT");
            }
            self.push(if fetch.with_ties {
                " ROWS WITH TIES"
            } else {
                " ROWS ONLY"
            });
        }
    }

    fn visit_cte(&mut self, cte: &'ast Cte) {
        self.ident(&cte.name);
        if !cte.columns.is_empty() {
            self.idents(&cte.columns);
        }
        self.push(" AS ");
        self.subquery(&cte.query);
    }

    /// Prints a FROM item.
    fn visit_rel_expression(&mut self, rel: &'ast RelExpression) {
        match rel {
            RelExpression::Join(join) => self.visit_join(join),
            RelExpression::Table(table) => self.visit_table_name(table),
            RelExpression::Alias(alias) => {
                if matches!(alias.relation, RelExpression::Alias(_)) {
                    self.push("(");
                    self.visit_rel_expression(&alias.relation);
                    self.push(")");
                } else {
                    self.visit_rel_expression(&alias.relation);
                }
                self.push(" AS ");
                self.ident(&alias.name);
                if !alias.columns.is_empty() {
                    self.idents(&alias.columns);
                }
            }
            RelExpression::Query(query) => self.subquery(query),
            RelExpression::SetOp(_) => self.set_operand(rel),
            RelExpression::Select(_) | RelExpression::Values(_) => {
                self.push("(");
                self.set_operand(rel);
                self.push(")");
            }
        }
    }

    fn visit_table_name(&mut self, table: &'ast TableName) {
        self.display(&table.name);
    }

    fn visit_join(&mut self, join: &'ast JoinExpr) {
        self.push("(");
        self.visit_rel_expression(&join.left);
        if join.is_cross() {
            self.push(" CROSS JOIN ");
        } else {
            self.push(" ");
            if join.natural {
                self.push("NATURAL ");
            }
            self.push(join.kind.as_str());
            self.push(" JOIN ");
        }
        self.visit_rel_expression(&join.right);
        match &join.condition {
            Some(JoinCondition::On(condition)) => {
                self.push(" ON ");
                self.visit_expression(condition);
            }
            Some(JoinCondition::Using(columns)) => {
                self.push(" USING ");
                self.idents(columns);
            }
            None => {}
        }
        self.push(")");
    }

    fn visit_select(&mut self, select: &'ast SelectExpr) {
        self.push("SELECT ");
        if let Some(quantifier) = select.quantifier {
            self.push(quantifier.as_str());
            self.push(" ");
        }
        self.expressions(&select.targets);
        if !select.from.is_empty() {
            self.push(" FROM ");
            self.comma_separated(&select.from, |p, r| p.visit_rel_expression(r));
        }
        if let Some(selection) = &select.selection {
            self.push(" WHERE ");
            self.visit_expression(selection);
        }
        if let Some(group_by) = &select.group_by {
            self.push(" GROUP BY ");
            if let Some(quantifier) = group_by.quantifier {
                self.push(quantifier.as_str());
                self.push(" ");
            }
            self.expressions(&group_by.groupings);
        }
        if let Some(having) = &select.having {
            self.push(" HAVING ");
            self.visit_expression(having);
        }
        if !select.windows.is_empty() {
            self.push(" WINDOW ");
            self.comma_separated(&select.windows, |p, w| {
                p.ident(&w.name);
                p.push(" AS ");
                p.visit_window_spec(&w.spec);
            });
        }
    }

    fn visit_window_spec(&mut self, spec: &'ast WindowSpec) {
        let mut clauses = 0;
        let mut clause = |p: &mut Self| {
            if clauses > 0 {
                p.push(" ");
            }
            clauses += 1;
        };

        self.push("(");
        if let Some(existing) = &spec.existing {
            clause(self);
            self.ident(existing);
        }
        if !spec.partition_by.is_empty() {
            clause(self);
            self.push("PARTITION BY ");
            self.expressions(&spec.partition_by);
        }
        if !spec.order_by.is_empty() {
            clause(self);
            self.push("ORDER BY ");
            self.sort_specs(&spec.order_by);
        }
        if let Some(frame) = &spec.frame {
            clause(self);
            self.push(frame.unit.as_str());
            self.push(" ");
            match &frame.end {
                Some(end) => {
                    self.push("BETWEEN ");
                    self.frame_bound(&frame.start);
                    self.push(" AND ");
                    self.frame_bound(end);
                }
                None => self.frame_bound(&frame.start),
            }
            if let Some(exclusion) = frame.exclusion {
                self.push(" ");
                self.push(exclusion.as_str());
            }
        }
        self.push(")");
    }

    fn visit_sort_spec(&mut self, spec: &'ast SortSpec) {
        self.visit_expression(&spec.expr);
        self.push(" ");
        self.push(spec.order.as_str());
        match spec.nulls {
            NullOrder::Default => {}
            NullOrder::First => self.push(" NULLS FIRST"),
            NullOrder::Last => self.push(" NULLS LAST"),
        }
    }

    fn visit_expression(&mut self, expr: &'ast Expression) {
        match expr {
            Expression::Asterisk(e) => {
                if let Some(qualifier) = &e.qualifier {
                    self.display(qualifier);
                    self.push(".");
                }
                self.push("*");
            }
            Expression::IntegerLiteral(e) => self.display(&e.value),
            // Debug keeps a fractional part or exponent, so the text lexes as a float
            Expression::FloatLiteral(e) => self.push(&format!("{:?}", e.value)),
            Expression::StringLiteral(e) => self.string_literal(e),
            Expression::BooleanLiteral(e) => self.push(e.value.as_str()),
            Expression::Null(_) => self.push("NULL"),
            Expression::Var(e) => self.display(&e.name),
            Expression::Alias(e) => {
                self.visit_expression(&e.expr);
                self.push(" AS ");
                self.ident(&e.name);
            }
            Expression::Unary(e) => {
                self.push("(");
                self.push(e.op.as_str());
                self.push(" ");
                self.visit_expression(&e.operand);
                self.push(")");
            }
            Expression::Binary(e) => {
                self.push("(");
                self.visit_expression(&e.left);
                self.push(" ");
                self.push(e.op.as_str());
                self.push(" ");
                self.visit_expression(&e.right);
                self.push(")");
            }
            Expression::Collate(e) => {
                self.push("(");
                self.visit_expression(&e.expr);
                self.push(" COLLATE ");
                self.display(&e.collation);
                self.push(")");
            }
            Expression::Is(e) => {
                self.push("(");
                self.visit_expression(&e.expr);
                self.push(" IS ");
                self.push(e.value.as_str());
                self.push(")");
            }
            Expression::IsNull(e) => {
                self.push("(");
                self.visit_expression(&e.expr);
                self.push(" IS NULL)");
            }
            Expression::Between(e) => {
                self.push("(");
                self.visit_expression(&e.expr);
                self.push(if e.symmetric {
                    " BETWEEN SYMMETRIC "
                } else {
                    " BETWEEN "
                });
                self.visit_expression(&e.low);
                self.push(" AND ");
                self.visit_expression(&e.high);
                self.push(")");
            }
            Expression::In(e) => {
                self.push("(");
                self.visit_expression(&e.expr);
                self.push(" IN (");
                match &e.rows {
                    RelExpression::Values(values) => self.expressions(&values.rows),
                    RelExpression::Query(query) => self.visit_query(query),
                    rows => self.query_body(rows),
                }
                self.push("))");
            }
            Expression::Like(e) => {
                self.push("(");
                self.visit_expression(&e.expr);
                self.push(" LIKE ");
                self.visit_expression(&e.pattern);
                if let Some(escape) = &e.escape {
                    self.push(" ESCAPE ");
                    self.visit_expression(escape);
                }
                self.push(")");
            }
            Expression::Exists(e) => {
                self.push("(EXISTS ");
                self.subquery(&e.query);
                self.push(")");
            }
            Expression::Unique(e) => {
                self.push("(UNIQUE ");
                self.subquery(&e.query);
                self.push(")");
            }
            Expression::Row(e) => {
                self.push("ROW(");
                self.expressions(&e.values);
                self.push(")");
            }
            Expression::RowSubquery(e) => self.subquery(&e.query),
            Expression::SortSpec(e) => self.visit_sort_spec(e),
            Expression::GroupingSet(e) => self.grouping_set(e),
            Expression::GroupingSets(e) => {
                self.push("GROUPING SETS (");
                self.expressions(&e.sets);
                self.push(")");
            }
            Expression::Rollup(e) => self.grouping_sets("ROLLUP", &e.sets),
            Expression::Cube(e) => self.grouping_sets("CUBE", &e.sets),
            Expression::Aggregate(e) => {
                self.push(e.func.as_str());
                self.push("(");
                if let Some(quantifier) = e.quantifier {
                    self.push(quantifier.as_str());
                    self.push(" ");
                }
                self.visit_expression(&e.argument);
                self.push(")");
                if let Some(filter) = &e.filter {
                    self.push(" FILTER (WHERE ");
                    self.visit_expression(filter);
                    self.push(")");
                }
            }
        }
    }
}

macro_rules! impl_display {
    ($($ty:ty => $visit:ident),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    let mut printer = Printer::new();
                    printer.$visit(self);
                    f.write_str(&printer.finish())
                }
            }
        )*
    };
}

impl_display! {
    Statement => visit_statement,
    Query => visit_query,
    RelExpression => visit_rel_expression,
    Expression => visit_expression,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn print(sql: &str) -> String {
        crate::parse(sql).unwrap().to_string()
    }

    #[test]
    fn test_operators_fully_parenthesized() {
        assert_eq!(print("select 1 + 2 * 3"), "SELECT (1 + (2 * 3))");
        assert_eq!(print("select -a"), "SELECT (- a)");
        assert_eq!(print("select not a or b"), "SELECT ((NOT a) OR b)");
    }

    #[test]
    fn test_predicates() {
        assert_eq!(
            print("select foo from bar where baz NOT BETWEEN SYMMETRIC 1 AND 2"),
            "SELECT foo FROM bar WHERE (NOT (baz BETWEEN SYMMETRIC 1 AND 2))"
        );
        assert_eq!(
            print("select a is not null, b in (1, 2), c like 'x%' escape '!'"),
            "SELECT (NOT (a IS NULL)), (b IN (1, 2)), (c LIKE 'x%' ESCAPE '!')"
        );
    }

    #[test]
    fn test_set_operations() {
        assert_eq!(
            print("select 1 UNION ALL select 2"),
            "SELECT 1 UNION ALL SELECT 2"
        );
        assert_eq!(
            print("select 1 union select 2 intersect select 3"),
            "SELECT 1 UNION (SELECT 2 INTERSECT SELECT 3)"
        );
        assert_eq!(
            print("(select 1 union select 2) order by 1 fetch first 2 rows only"),
            "SELECT 1 UNION SELECT 2 ORDER BY 1 ASC FETCH FIRST 2 ROWS ONLY"
        );
    }

    #[test]
    fn test_from_items() {
        assert_eq!(
            print("select foo from bar b(c,d)"),
            "SELECT foo FROM bar AS b(c, d)"
        );
        assert_eq!(
            print("select * from a natural left join b, c cross join d"),
            "SELECT * FROM (a NATURAL LEFT OUTER JOIN b), (c CROSS JOIN d)"
        );
        assert_eq!(
            print("select * from a join b using (id)"),
            "SELECT * FROM (a INNER JOIN b USING (id))"
        );
    }

    #[test]
    fn test_literals_and_identifiers() {
        assert_eq!(
            print("select 'it''s', x'1F', 1.5, 2e3, null, \"Mixed\", \"count\""),
            "SELECT 'it''s', X'1F', 1.5, 2000.0, NULL, \"Mixed\", \"count\""
        );
    }

    #[test]
    fn test_create_table() {
        assert_eq!(
            print("create temporary table boo (foo int not null, bar varchar(10) default 'x')"),
            "CREATE LOCAL TEMPORARY TABLE boo (foo INTEGER NOT NULL, \
             bar CHARACTER VARYING(10) DEFAULT 'x') ON COMMIT DELETE ROWS"
        );
    }

    #[test]
    fn test_window_and_grouping() {
        assert_eq!(
            print(
                "select count(*) filter (where a > 0) from t group by rollup (a, (b, c)) \
                 window w as (partition by a order by b desc nulls last \
                 rows between unbounded preceding and current row)"
            ),
            "SELECT COUNT(*) FILTER (WHERE (a > 0)) FROM t GROUP BY ROLLUP (a, (b, c)) \
             WINDOW w AS (PARTITION BY a ORDER BY b DESC NULLS LAST \
             ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)"
        );
    }

    #[test]
    fn test_insert_and_delete() {
        assert_eq!(
            print("insert into t (a, b) values (1, 2)"),
            "INSERT INTO t (a, b) VALUES ROW(1, 2)"
        );
        assert_eq!(
            print("delete from only t where a = 1"),
            "DELETE FROM ONLY t WHERE (a = 1)"
        );
    }
}
