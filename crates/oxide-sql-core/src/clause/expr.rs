//! Column references and expressions used inside clauses.

use crate::builder::value::{SqlValue, ToSqlValue};
use crate::statement::Statement;

/// Table name of the pseudo-row holding the values proposed for insertion
/// when a conflict is resolved.
pub const EXCLUDED_TABLE: &str = "excluded";

/// Creates a column reference.
#[must_use]
pub fn col(name: &str) -> Column {
    Column {
        table: None,
        name: String::from(name),
    }
}

/// A column reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Optional table qualifier.
    pub table: Option<String>,
    /// Column name.
    pub name: String,
}

impl Column {
    /// Creates a qualified column reference.
    #[must_use]
    pub fn qualified(table: &str, name: &str) -> Self {
        Self {
            table: Some(String::from(table)),
            name: String::from(name),
        }
    }

    /// References `name` on the incoming row of an upsert.
    #[must_use]
    pub fn excluded(name: &str) -> Self {
        Self::qualified(EXCLUDED_TABLE, name)
    }

    /// Returns whether this column belongs to the incoming upsert row.
    #[must_use]
    pub fn is_excluded(&self) -> bool {
        self.table.as_deref() == Some(EXCLUDED_TABLE)
    }

    /// Creates an equality expression.
    #[must_use]
    pub fn eq<T: ToSqlValue>(self, value: T) -> Expr {
        Expr::binary(self.into(), "=", Expr::value(value))
    }

    /// Creates an inequality expression.
    #[must_use]
    pub fn not_eq<T: ToSqlValue>(self, value: T) -> Expr {
        Expr::binary(self.into(), "<>", Expr::value(value))
    }

    /// Creates a less-than expression.
    #[must_use]
    pub fn lt<T: ToSqlValue>(self, value: T) -> Expr {
        Expr::binary(self.into(), "<", Expr::value(value))
    }

    /// Creates a less-than-or-equal expression.
    #[must_use]
    pub fn lt_eq<T: ToSqlValue>(self, value: T) -> Expr {
        Expr::binary(self.into(), "<=", Expr::value(value))
    }

    /// Creates a greater-than expression.
    #[must_use]
    pub fn gt<T: ToSqlValue>(self, value: T) -> Expr {
        Expr::binary(self.into(), ">", Expr::value(value))
    }

    /// Creates a greater-than-or-equal expression.
    #[must_use]
    pub fn gt_eq<T: ToSqlValue>(self, value: T) -> Expr {
        Expr::binary(self.into(), ">=", Expr::value(value))
    }

    /// Creates a LIKE expression.
    #[must_use]
    pub fn like<T: ToSqlValue>(self, pattern: T) -> Expr {
        Expr::binary(self.into(), "LIKE", Expr::value(pattern))
    }

    /// Creates an IS NULL expression.
    #[must_use]
    pub fn is_null(self) -> Expr {
        Expr::Postfix {
            operand: Box::new(self.into()),
            op: "IS NULL",
        }
    }

    /// Creates an IS NOT NULL expression.
    #[must_use]
    pub fn is_not_null(self) -> Expr {
        Expr::Postfix {
            operand: Box::new(self.into()),
            op: "IS NOT NULL",
        }
    }
}

/// An expression rendered through a [`Statement`].
///
/// Columns are quoted by the statement's dialect and values become bound
/// parameters, so an expression never carries literal user input in its
/// SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Column reference.
    Column(Column),
    /// Bound parameter.
    Value(SqlValue),
    /// SQL emitted verbatim. Only for fragments without user input.
    Raw(String),
    /// `left op right`.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator keyword or symbol.
        op: &'static str,
        /// Right operand.
        right: Box<Expr>,
    },
    /// `operand op`, e.g. `IS NULL`.
    Postfix {
        /// Operand.
        operand: Box<Expr>,
        /// Postfix operator.
        op: &'static str,
    },
    /// Parenthesized expression.
    Paren(Box<Expr>),
    /// `NOT expr`.
    Not(Box<Expr>),
}

impl Expr {
    /// Creates a bound-parameter expression.
    #[must_use]
    pub fn value<T: ToSqlValue>(value: T) -> Self {
        Self::Value(value.to_sql_value())
    }

    /// Creates a raw SQL fragment.
    #[must_use]
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::Raw(sql.into())
    }

    fn binary(left: Self, op: &'static str, right: Self) -> Self {
        Self::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates an AND expression.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::binary(self, "AND", other)
    }

    /// Creates an OR expression.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::binary(self, "OR", other)
    }

    /// Wraps the expression in parentheses.
    #[must_use]
    pub fn paren(self) -> Self {
        Self::Paren(Box::new(self))
    }

    /// Negates the expression with NOT.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Writes the expression into `stmt`.
    pub fn build(&self, stmt: &mut Statement<'_>) {
        match self {
            Self::Column(column) => stmt.write_quoted(column),
            Self::Value(value) => stmt.add_var(value.clone()),
            Self::Raw(sql) => stmt.write_str(sql),
            Self::Binary { left, op, right } => {
                left.build(stmt);
                stmt.write_char(' ');
                stmt.write_str(op);
                stmt.write_char(' ');
                right.build(stmt);
            }
            Self::Postfix { operand, op } => {
                operand.build(stmt);
                stmt.write_char(' ');
                stmt.write_str(op);
            }
            Self::Paren(inner) => {
                stmt.write_char('(');
                inner.build(stmt);
                stmt.write_char(')');
            }
            Self::Not(inner) => {
                stmt.write_str("NOT ");
                inner.build(stmt);
            }
        }
    }

    /// Writes `exprs` joined by `AND`.
    ///
    /// A top-level `OR` is parenthesized so it keeps its meaning inside the
    /// conjunction.
    pub fn build_conjunction(exprs: &[Self], stmt: &mut Statement<'_>) {
        let wrap = exprs.len() > 1;
        for (idx, expr) in exprs.iter().enumerate() {
            if idx > 0 {
                stmt.write_str(" AND ");
            }
            if wrap && matches!(expr, Self::Binary { op: "OR", .. }) {
                stmt.write_char('(');
                expr.build(stmt);
                stmt.write_char(')');
            } else {
                expr.build(stmt);
            }
        }
    }
}

impl From<Column> for Expr {
    fn from(column: Column) -> Self {
        Self::Column(column)
    }
}

impl From<SqlValue> for Expr {
    fn from(value: SqlValue) -> Self {
        Self::Value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::GenericDialect;

    fn render(expr: &Expr) -> (String, Vec<SqlValue>) {
        let dialect = GenericDialect::new();
        let mut stmt = Statement::new(&dialect);
        expr.build(&mut stmt);
        stmt.into_parts()
    }

    #[test]
    fn test_column_eq() {
        let (sql, params) = render(&col("name").eq("Alice"));
        assert_eq!(sql, "\"name\" = ?");
        assert_eq!(params, vec![SqlValue::Text(String::from("Alice"))]);
    }

    #[test]
    fn test_is_null() {
        let (sql, params) = render(&col("deleted_at").is_null());
        assert_eq!(sql, "\"deleted_at\" IS NULL");
        assert!(params.is_empty());
    }

    #[test]
    fn test_and_or() {
        let expr = col("active")
            .eq(true)
            .and(col("age").gt(18).or(col("verified").eq(true)).paren());
        let (sql, params) = render(&expr);
        assert_eq!(sql, "\"active\" = ? AND (\"age\" > ? OR \"verified\" = ?)");
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_excluded_column() {
        let column = Column::excluded("name");
        assert!(column.is_excluded());
        assert!(!col("name").is_excluded());
        let (sql, _) = render(&column.into());
        assert_eq!(sql, "\"excluded\".\"name\"");
    }

    #[test]
    fn test_conjunction_wraps_or() {
        let dialect = GenericDialect::new();
        let mut stmt = Statement::new(&dialect);
        Expr::build_conjunction(
            &[col("a").eq(1), col("b").eq(2).or(col("c").eq(3))],
            &mut stmt,
        );
        assert_eq!(
            stmt.sql(),
            "\"a\" = ? AND (\"b\" = ? OR \"c\" = ?)"
        );
    }

    #[test]
    fn test_value_is_never_inlined() {
        let malicious = "'; DROP TABLE users; --";
        let (sql, params) = render(&col("name").eq(malicious));
        assert_eq!(sql, "\"name\" = ?");
        assert!(matches!(&params[0], SqlValue::Text(s) if s == malicious));
    }
}
