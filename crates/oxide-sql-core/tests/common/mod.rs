#![allow(dead_code)]

use oxide_sql_core::{Clause, GenericDialect, SqlValue, Statement};

/// Renders `clauses` in `order` with the portable dialect.
pub fn render(clauses: Vec<Clause>, order: &[&str]) -> (String, Vec<SqlValue>) {
    let dialect = GenericDialect::new();
    let mut stmt = Statement::new(&dialect);
    for clause in clauses {
        stmt.add_clause(clause);
    }
    stmt.build(order);
    stmt.into_parts()
}
