//! Passes over the AST.
//!
//! [`Visitor`] has one method per node kind. Every method defaults to the
//! matching `walk_*` function, which visits the node's children and does
//! nothing else, so a pass overrides only the nodes it cares about:
//!
//! ```rust
//! use psql_parse::ast::Expression;
//! use psql_parse::visit::{walk_expression, Visitor};
//!
//! #[derive(Default)]
//! struct Columns(Vec<String>);
//!
//! impl<'ast> Visitor<'ast> for Columns {
//!     fn visit_expression(&mut self, expr: &'ast Expression) {
//!         if let Expression::Var(var) = expr {
//!             self.0.push(var.name.to_string());
//!         }
//!         walk_expression(self, expr);
//!     }
//! }
//!
//! let statement = psql_parse::parse("SELECT a + b FROM t WHERE c > 1").unwrap();
//! let mut columns = Columns::default();
//! columns.visit_statement(&statement);
//! assert_eq!(columns.0, ["a", "b", "c"]);
//! ```

mod depth;
mod equality;
mod printer;
mod validate;

pub(crate) use depth::first_node_beyond;
pub use equality::{structurally_equal, StructuralEq};
pub use printer::Printer;
pub use validate::{validate, Violation, ViolationKind};

use crate::ast::{
    ColumnDef, ColumnDefault, CreateStatement, Cte, DeleteStatement, Expression, InsertSource,
    InsertStatement, JoinCondition, JoinExpr, Query, RelExpression, SelectExpr, SortSpec,
    Statement, TableName, WindowSpec,
};

/// A read-only pass over the AST.
pub trait Visitor<'ast> {
    fn visit_statement(&mut self, statement: &'ast Statement) {
        walk_statement(self, statement);
    }

    fn visit_create(&mut self, create: &'ast CreateStatement) {
        walk_create(self, create);
    }

    fn visit_column_def(&mut self, column: &'ast ColumnDef) {
        walk_column_def(self, column);
    }

    fn visit_insert(&mut self, insert: &'ast InsertStatement) {
        walk_insert(self, insert);
    }

    fn visit_delete(&mut self, delete: &'ast DeleteStatement) {
        walk_delete(self, delete);
    }

    fn visit_query(&mut self, query: &'ast Query) {
        walk_query(self, query);
    }

    fn visit_cte(&mut self, cte: &'ast Cte) {
        walk_cte(self, cte);
    }

    fn visit_rel_expression(&mut self, rel: &'ast RelExpression) {
        walk_rel_expression(self, rel);
    }

    fn visit_table_name(&mut self, _table: &'ast TableName) {}

    fn visit_join(&mut self, join: &'ast JoinExpr) {
        walk_join(self, join);
    }

    fn visit_select(&mut self, select: &'ast SelectExpr) {
        walk_select(self, select);
    }

    fn visit_window_spec(&mut self, spec: &'ast WindowSpec) {
        walk_window_spec(self, spec);
    }

    fn visit_sort_spec(&mut self, spec: &'ast SortSpec) {
        walk_sort_spec(self, spec);
    }

    fn visit_expression(&mut self, expr: &'ast Expression) {
        walk_expression(self, expr);
    }
}

pub fn walk_statement<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, statement: &'ast Statement) {
    match statement {
        Statement::Create(create) => visitor.visit_create(create),
        Statement::Insert(insert) => visitor.visit_insert(insert),
        Statement::Delete(delete) => visitor.visit_delete(delete),
        Statement::Select(select) => visitor.visit_query(&select.query),
    }
}

pub fn walk_create<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, create: &'ast CreateStatement) {
    for column in &create.columns {
        visitor.visit_column_def(column);
    }
}

pub fn walk_column_def<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, column: &'ast ColumnDef) {
    if let Some(ColumnDefault::Expression(expr)) = &column.default {
        visitor.visit_expression(expr);
    }
}

pub fn walk_insert<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, insert: &'ast InsertStatement) {
    if let InsertSource::Query(query) = &insert.source {
        visitor.visit_query(query);
    }
}

pub fn walk_delete<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, delete: &'ast DeleteStatement) {
    if let Some(selection) = &delete.selection {
        visitor.visit_expression(selection);
    }
}

pub fn walk_query<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, query: &'ast Query) {
    if let Some(with) = &query.with {
        for cte in &with.ctes {
            visitor.visit_cte(cte);
        }
    }
    visitor.visit_rel_expression(&query.body);
    for spec in &query.order_by {
        visitor.visit_sort_spec(spec);
    }
    if let Some(offset) = &query.offset {
        visitor.visit_expression(offset);
    }
    if let Some(count) = query.fetch.as_ref().and_then(|f| f.count.as_ref()) {
        visitor.visit_expression(count);
    }
}

pub fn walk_cte<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, cte: &'ast Cte) {
    visitor.visit_query(&cte.query);
}

pub fn walk_rel_expression<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    rel: &'ast RelExpression,
) {
    match rel {
        RelExpression::Join(join) => visitor.visit_join(join),
        RelExpression::Table(table) => visitor.visit_table_name(table),
        RelExpression::Alias(alias) => visitor.visit_rel_expression(&alias.relation),
        RelExpression::Select(select) => visitor.visit_select(select),
        RelExpression::Values(values) => {
            for row in &values.rows {
                visitor.visit_expression(row);
            }
        }
        RelExpression::SetOp(set_op) => {
            visitor.visit_rel_expression(&set_op.left);
            visitor.visit_rel_expression(&set_op.right);
        }
        RelExpression::Query(query) => visitor.visit_query(query),
    }
}

pub fn walk_join<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, join: &'ast JoinExpr) {
    visitor.visit_rel_expression(&join.left);
    visitor.visit_rel_expression(&join.right);
    if let Some(JoinCondition::On(condition)) = &join.condition {
        visitor.visit_expression(condition);
    }
}

pub fn walk_select<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, select: &'ast SelectExpr) {
    for target in &select.targets {
        visitor.visit_expression(target);
    }
    for rel in &select.from {
        visitor.visit_rel_expression(rel);
    }
    if let Some(selection) = &select.selection {
        visitor.visit_expression(selection);
    }
    if let Some(group_by) = &select.group_by {
        for grouping in &group_by.groupings {
            visitor.visit_expression(grouping);
        }
    }
    if let Some(having) = &select.having {
        visitor.visit_expression(having);
    }
    for window in &select.windows {
        visitor.visit_window_spec(&window.spec);
    }
}

pub fn walk_window_spec<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, spec: &'ast WindowSpec) {
    for expr in &spec.partition_by {
        visitor.visit_expression(expr);
    }
    for sort in &spec.order_by {
        visitor.visit_sort_spec(sort);
    }
    if let Some(frame) = &spec.frame {
        let bounds = std::iter::once(&frame.start).chain(frame.end.as_ref());
        for value in bounds.filter_map(|b| b.value.as_ref()) {
            visitor.visit_expression(value);
        }
    }
}

pub fn walk_sort_spec<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, spec: &'ast SortSpec) {
    visitor.visit_expression(&spec.expr);
}

/// Visits the immediate children of `expr`.
pub fn walk_expression<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, expr: &'ast Expression) {
    match expr {
        Expression::Asterisk(_)
        | Expression::IntegerLiteral(_)
        | Expression::FloatLiteral(_)
        | Expression::StringLiteral(_)
        | Expression::BooleanLiteral(_)
        | Expression::Null(_)
        | Expression::Var(_) => {}
        Expression::Alias(e) => visitor.visit_expression(&e.expr),
        Expression::Unary(e) => visitor.visit_expression(&e.operand),
        Expression::Binary(e) => {
            visitor.visit_expression(&e.left);
            visitor.visit_expression(&e.right);
        }
        Expression::Collate(e) => visitor.visit_expression(&e.expr),
        Expression::Is(e) => visitor.visit_expression(&e.expr),
        Expression::IsNull(e) => visitor.visit_expression(&e.expr),
        Expression::Between(e) => {
            visitor.visit_expression(&e.expr);
            visitor.visit_expression(&e.low);
            visitor.visit_expression(&e.high);
        }
        Expression::In(e) => {
            visitor.visit_expression(&e.expr);
            visitor.visit_rel_expression(&e.rows);
        }
        Expression::Like(e) => {
            visitor.visit_expression(&e.expr);
            visitor.visit_expression(&e.pattern);
            if let Some(escape) = &e.escape {
                visitor.visit_expression(escape);
            }
        }
        Expression::Exists(e) => visitor.visit_query(&e.query),
        Expression::Unique(e) => visitor.visit_query(&e.query),
        Expression::Row(e) => {
            for value in &e.values {
                visitor.visit_expression(value);
            }
        }
        Expression::RowSubquery(e) => visitor.visit_query(&e.query),
        Expression::SortSpec(e) => visitor.visit_sort_spec(e),
        Expression::GroupingSet(e) => {
            for column in &e.columns {
                visitor.visit_expression(column);
            }
        }
        Expression::GroupingSets(e) => {
            for set in &e.sets {
                visitor.visit_expression(set);
            }
        }
        Expression::Rollup(e) => {
            for column in e.sets.iter().flat_map(|s| &s.columns) {
                visitor.visit_expression(column);
            }
        }
        Expression::Cube(e) => {
            for column in e.sets.iter().flat_map(|s| &s.columns) {
                visitor.visit_expression(column);
            }
        }
        Expression::Aggregate(e) => {
            visitor.visit_expression(&e.argument);
            if let Some(filter) = &e.filter {
                visitor.visit_expression(filter);
            }
        }
    }
}
