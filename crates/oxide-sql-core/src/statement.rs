//! Statement rendering.
//!
//! A [`Statement`] collects clauses, then renders the ones a caller asks for
//! into a single SQL string plus the ordered list of bound values. Output is
//! append-only: every fragment is written once, left to right.

use std::collections::HashMap;

use crate::builder::value::SqlValue;
use crate::clause::{Clause, Column};
use crate::dialect::Dialect;
use crate::schema::Schema;

/// A statement being rendered for one dialect.
pub struct Statement<'a> {
    dialect: &'a dyn Dialect,
    schema: Option<&'a Schema>,
    clauses: HashMap<&'static str, Clause>,
    sql: String,
    vars: Vec<SqlValue>,
    separator_pending: bool,
}

impl<'a> Statement<'a> {
    /// Creates an empty statement rendered by `dialect`.
    #[must_use]
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            dialect,
            schema: None,
            clauses: HashMap::new(),
            sql: String::new(),
            vars: Vec::new(),
            separator_pending: false,
        }
    }

    /// Attaches the schema of the table this statement targets.
    #[must_use]
    pub fn with_schema(mut self, schema: &'a Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Adds a clause, merging it with an existing clause of the same name.
    #[must_use]
    pub fn clause(mut self, clause: Clause) -> Self {
        self.add_clause(clause);
        self
    }

    /// Adds a clause, merging it with an existing clause of the same name.
    pub fn add_clause(&mut self, clause: Clause) {
        match self.clauses.get_mut(clause.name()) {
            Some(existing) => existing.merge(clause),
            None => {
                self.clauses.insert(clause.name(), clause);
            }
        }
    }

    /// Returns the clause stored under `name`.
    #[must_use]
    pub fn get_clause(&self, name: &str) -> Option<&Clause> {
        self.clauses.get(name)
    }

    /// Returns whether a clause is stored under `name`.
    #[must_use]
    pub fn has_clause(&self, name: &str) -> bool {
        self.clauses.contains_key(name)
    }

    /// Returns the dialect rendering this statement.
    #[must_use]
    pub fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    /// Returns the attached table schema.
    #[must_use]
    pub fn schema(&self) -> Option<&'a Schema> {
        self.schema
    }

    /// Renders the clauses named in `names`, in that order.
    ///
    /// Missing clauses are skipped. Rendered clauses are separated by one
    /// space; a clause whose builder writes nothing leaves no separator
    /// behind.
    pub fn build(&mut self, names: &[&str]) {
        for &name in names {
            let Some(clause) = self.clauses.get(name).cloned() else {
                continue;
            };
            self.separator_pending = !self.sql.is_empty();
            let dialect = self.dialect;
            match dialect.clause_builder(name) {
                Some(builder) => builder(&clause, self),
                None => clause.build(self),
            }
            self.separator_pending = false;
        }
    }

    fn flush_separator(&mut self) {
        if std::mem::take(&mut self.separator_pending) {
            self.sql.push(' ');
        }
    }

    /// Appends raw SQL.
    pub fn write_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.flush_separator();
        self.sql.push_str(s);
    }

    /// Appends a single character.
    pub fn write_char(&mut self, c: char) {
        self.flush_separator();
        self.sql.push(c);
    }

    /// Appends a column reference, quoting the table and column names.
    pub fn write_quoted(&mut self, column: &Column) {
        self.flush_separator();
        if let Some(ref table) = column.table {
            self.dialect.quote_to(&mut self.sql, table);
            self.sql.push('.');
        }
        self.dialect.quote_to(&mut self.sql, &column.name);
    }

    /// Appends a quoted identifier such as a table name.
    pub fn write_quoted_str(&mut self, identifier: &str) {
        self.flush_separator();
        self.dialect.quote_to(&mut self.sql, identifier);
    }

    /// Binds `value` and appends its placeholder.
    pub fn add_var(&mut self, value: SqlValue) {
        self.flush_separator();
        self.vars.push(value);
        self.dialect.bind_var_to(&mut self.sql, self.vars.len());
    }

    /// Returns the SQL rendered so far.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the values bound so far.
    #[must_use]
    pub fn vars(&self) -> &[SqlValue] {
        &self.vars
    }

    /// Returns the rendered SQL with bound values inlined, for logging.
    #[must_use]
    pub fn explain(&self) -> String {
        self.dialect.explain(&self.sql, &self.vars)
    }

    /// Consumes the statement and returns the SQL and bound values.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.vars)
    }
}

impl std::fmt::Debug for Statement<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Statement")
            .field("dialect", &self.dialect.name())
            .field("clauses", &self.clauses.keys().collect::<Vec<_>>())
            .field("sql", &self.sql)
            .field("vars", &self.vars)
            .finish()
    }
}
