//! Dialect-neutral statement clauses.
//!
//! A [`Statement`] holds at most one clause per name. Each clause knows a
//! portable rendering ([`Clause::build`]); a dialect can replace it for any
//! clause name through [`Dialect::clause_builder`](crate::dialect::Dialect::clause_builder).

mod expr;

pub use expr::{col, Column, Expr, EXCLUDED_TABLE};

use crate::builder::value::ToSqlValue;
use crate::statement::Statement;

/// Clause name of [`Insert`].
pub const INSERT: &str = "INSERT";
/// Clause name of [`Values`].
pub const VALUES: &str = "VALUES";
/// Clause name of [`OnConflict`].
pub const ON_CONFLICT: &str = "ON CONFLICT";
/// Clause name of [`Returning`].
pub const RETURNING: &str = "RETURNING";
/// Clause name of [`Update`].
pub const UPDATE: &str = "UPDATE";
/// Clause name of [`Set`].
pub const SET: &str = "SET";
/// Clause name of [`Delete`].
pub const DELETE: &str = "DELETE";
/// Clause name of [`FromTable`].
pub const FROM: &str = "FROM";
/// Clause name of [`Where`].
pub const WHERE: &str = "WHERE";

/// `column = value` inside `SET` or a conflict action.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Target column.
    pub column: Column,
    /// New value: a bound parameter, or a reference such as
    /// `excluded.column`.
    pub value: Expr,
}

impl Assignment {
    /// Assigns a bound value to `column`.
    #[must_use]
    pub fn new<T: ToSqlValue>(column: &str, value: T) -> Self {
        Self {
            column: col(column),
            value: Expr::value(value),
        }
    }

    /// Assigns an arbitrary expression to `column`.
    #[must_use]
    pub fn expr(column: &str, value: impl Into<Expr>) -> Self {
        Self {
            column: col(column),
            value: value.into(),
        }
    }

    /// Assigns the incoming row's value of the same column.
    #[must_use]
    pub fn from_excluded(column: &str) -> Self {
        Self {
            column: col(column),
            value: Column::excluded(column).into(),
        }
    }

    fn build(&self, stmt: &mut Statement<'_>) {
        stmt.write_quoted(&self.column);
        stmt.write_str(" = ");
        self.value.build(stmt);
    }
}

/// `INSERT INTO table`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insert {
    /// Target table.
    pub table: String,
}

/// Column list and rows of an insert.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Values {
    /// Inserted columns.
    pub columns: Vec<Column>,
    /// One entry per row, each as long as `columns`.
    pub rows: Vec<Vec<Expr>>,
}

impl Values {
    /// Creates a VALUES clause for `columns`.
    #[must_use]
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| col(c)).collect(),
            rows: vec![],
        }
    }

    /// Adds a row of bound values.
    #[must_use]
    pub fn row<T: ToSqlValue>(mut self, values: Vec<T>) -> Self {
        self.rows.push(values.into_iter().map(Expr::value).collect());
        self
    }
}

/// What to do when an insert collides with an existing row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OnConflict {
    /// Conflict target columns.
    pub columns: Vec<Column>,
    /// Restricts which conflicting rows the action applies to. Joined with
    /// `AND`; empty means no restriction.
    pub target_where: Vec<Expr>,
    /// Candidate assignments, in order.
    pub do_updates: Vec<Assignment>,
    /// Ignore the conflicting row instead of updating it.
    pub do_nothing: bool,
}

impl OnConflict {
    /// Creates an empty conflict specification.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the conflict target columns.
    #[must_use]
    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.columns = cols.iter().map(|c| col(c)).collect();
        self
    }

    /// Adds a filter on the conflicting rows.
    #[must_use]
    pub fn target_where(mut self, expr: Expr) -> Self {
        self.target_where.push(expr);
        self
    }

    /// Adds an assignment to the update action.
    #[must_use]
    pub fn do_update(mut self, assignment: Assignment) -> Self {
        self.do_updates.push(assignment);
        self
    }

    /// Updates each of `cols` from the incoming row.
    #[must_use]
    pub fn update_columns(mut self, cols: &[&str]) -> Self {
        self.do_updates
            .extend(cols.iter().map(|c| Assignment::from_excluded(c)));
        self
    }

    /// Sets the DO NOTHING action.
    #[must_use]
    pub fn do_nothing(mut self) -> Self {
        self.do_nothing = true;
        self
    }
}

/// Columns handed back from affected rows. Empty means every column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Returning {
    /// Returned columns.
    pub columns: Vec<Column>,
}

impl Returning {
    /// Returns every column.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Returns the named columns.
    #[must_use]
    pub fn columns(cols: &[&str]) -> Self {
        Self {
            columns: cols.iter().map(|c| col(c)).collect(),
        }
    }
}

/// `UPDATE table`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    /// Target table.
    pub table: String,
}

/// `SET a = x, b = y`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Set(pub Vec<Assignment>);

/// `DELETE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Delete;

/// `FROM table`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromTable {
    /// Source table.
    pub table: String,
}

/// `WHERE` with its conditions joined by `AND`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Where(pub Vec<Expr>);

/// One clause of a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// `INSERT INTO`.
    Insert(Insert),
    /// Column list and rows.
    Values(Values),
    /// Conflict resolution.
    OnConflict(OnConflict),
    /// `RETURNING`.
    Returning(Returning),
    /// `UPDATE`.
    Update(Update),
    /// `SET`.
    Set(Set),
    /// `DELETE`.
    Delete(Delete),
    /// `FROM`.
    From(FromTable),
    /// `WHERE`.
    Where(Where),
}

impl Clause {
    /// Returns the key this clause is stored and rendered under.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Insert(_) => INSERT,
            Self::Values(_) => VALUES,
            Self::OnConflict(_) => ON_CONFLICT,
            Self::Returning(_) => RETURNING,
            Self::Update(_) => UPDATE,
            Self::Set(_) => SET,
            Self::Delete(_) => DELETE,
            Self::From(_) => FROM,
            Self::Where(_) => WHERE,
        }
    }

    /// Folds `other` (a clause with the same name) into `self`.
    ///
    /// `WHERE` and `SET` accumulate; every other clause is replaced.
    pub fn merge(&mut self, other: Self) {
        match (self, other) {
            (Self::Where(current), Self::Where(more)) => current.0.extend(more.0),
            (Self::Set(current), Self::Set(more)) => current.0.extend(more.0),
            (current, other) => *current = other,
        }
    }

    /// Writes the portable rendering of this clause.
    pub fn build(&self, stmt: &mut Statement<'_>) {
        match self {
            Self::Insert(insert) => {
                stmt.write_str("INSERT INTO ");
                stmt.write_quoted_str(&insert.table);
            }
            Self::Values(values) => build_values(values, stmt),
            Self::OnConflict(on_conflict) => build_on_conflict(on_conflict, stmt),
            Self::Returning(returning) => {
                stmt.write_str("RETURNING ");
                write_column_list(&returning.columns, stmt);
            }
            Self::Update(update) => {
                stmt.write_str("UPDATE ");
                stmt.write_quoted_str(&update.table);
            }
            Self::Set(set) => {
                stmt.write_str("SET ");
                for (idx, assignment) in set.0.iter().enumerate() {
                    if idx > 0 {
                        stmt.write_str(", ");
                    }
                    assignment.build(stmt);
                }
            }
            Self::Delete(_) => stmt.write_str("DELETE"),
            Self::From(from) => {
                stmt.write_str("FROM ");
                stmt.write_quoted_str(&from.table);
            }
            Self::Where(conditions) => {
                if !conditions.0.is_empty() {
                    stmt.write_str("WHERE ");
                    Expr::build_conjunction(&conditions.0, stmt);
                }
            }
        }
    }
}

fn build_values(values: &Values, stmt: &mut Statement<'_>) {
    if values.columns.is_empty() {
        stmt.write_str("DEFAULT VALUES");
        return;
    }
    stmt.write_char('(');
    write_column_list(&values.columns, stmt);
    stmt.write_str(") VALUES ");
    for (row_idx, row) in values.rows.iter().enumerate() {
        if row_idx > 0 {
            stmt.write_str(", ");
        }
        stmt.write_char('(');
        for (idx, value) in row.iter().enumerate() {
            if idx > 0 {
                stmt.write_str(", ");
            }
            value.build(stmt);
        }
        stmt.write_char(')');
    }
}

fn build_on_conflict(on_conflict: &OnConflict, stmt: &mut Statement<'_>) {
    stmt.write_str("ON CONFLICT");
    if !on_conflict.columns.is_empty() {
        stmt.write_str(" (");
        write_column_list(&on_conflict.columns, stmt);
        stmt.write_char(')');
    }
    if !on_conflict.target_where.is_empty() {
        stmt.write_str(" WHERE ");
        Expr::build_conjunction(&on_conflict.target_where, stmt);
    }
    if on_conflict.do_nothing || on_conflict.do_updates.is_empty() {
        stmt.write_str(" DO NOTHING");
    } else {
        stmt.write_str(" DO UPDATE SET ");
        for (idx, assignment) in on_conflict.do_updates.iter().enumerate() {
            if idx > 0 {
                stmt.write_str(", ");
            }
            assignment.build(stmt);
        }
    }
}

/// Writes quoted `columns` separated by `, `, or `*` when empty.
fn write_column_list(columns: &[Column], stmt: &mut Statement<'_>) {
    if columns.is_empty() {
        stmt.write_char('*');
        return;
    }
    for (idx, column) in columns.iter().enumerate() {
        if idx > 0 {
            stmt.write_str(", ");
        }
        stmt.write_quoted(column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::GenericDialect;

    fn render(clause: Clause) -> String {
        let dialect = GenericDialect::new();
        let mut stmt = Statement::new(&dialect);
        clause.build(&mut stmt);
        stmt.sql().to_string()
    }

    #[test]
    fn test_values_multiple_rows() {
        let sql = render(Clause::Values(
            Values::new(&["name", "age"])
                .row(vec!["Alice".to_sql_value(), 30_i32.to_sql_value()])
                .row(vec!["Bob".to_sql_value(), 31_i32.to_sql_value()]),
        ));
        assert_eq!(sql, "(\"name\", \"age\") VALUES (?, ?), (?, ?)");
    }

    #[test]
    fn test_values_without_columns() {
        assert_eq!(render(Clause::Values(Values::default())), "DEFAULT VALUES");
    }

    #[test]
    fn test_portable_on_conflict_update() {
        let sql = render(Clause::OnConflict(
            OnConflict::new()
                .columns(&["id"])
                .update_columns(&["name", "email"]),
        ));
        assert_eq!(
            sql,
            "ON CONFLICT (\"id\") DO UPDATE SET \"name\" = \"excluded\".\"name\", \
             \"email\" = \"excluded\".\"email\""
        );
    }

    #[test]
    fn test_portable_on_conflict_nothing() {
        let sql = render(Clause::OnConflict(
            OnConflict::new().columns(&["id"]).do_nothing(),
        ));
        assert_eq!(sql, "ON CONFLICT (\"id\") DO NOTHING");
    }

    #[test]
    fn test_returning() {
        assert_eq!(render(Clause::Returning(Returning::all())), "RETURNING *");
        assert_eq!(
            render(Clause::Returning(Returning::columns(&["id", "name"]))),
            "RETURNING \"id\", \"name\""
        );
    }

    #[test]
    fn test_empty_where_renders_nothing() {
        assert_eq!(render(Clause::Where(Where::default())), "");
    }

    #[test]
    fn test_merge_accumulates_where() {
        let mut clause = Clause::Where(Where(vec![col("a").eq(1)]));
        clause.merge(Clause::Where(Where(vec![col("b").eq(2)])));
        assert!(matches!(&clause, Clause::Where(w) if w.0.len() == 2));

        let mut clause = Clause::Insert(Insert {
            table: String::from("a"),
        });
        clause.merge(Clause::Insert(Insert {
            table: String::from("b"),
        }));
        assert!(matches!(&clause, Clause::Insert(i) if i.table == "b"));
    }
}
