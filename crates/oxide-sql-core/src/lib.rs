//! # oxide-sql-core
//!
//! Dialect-neutral statement model shared by the `oxide-sql` dialects.
//!
//! This crate provides:
//! - [`Clause`]s describing a statement (`INSERT`, `VALUES`, `ON CONFLICT`,
//!   `RETURNING`, `UPDATE`, `SET`, `DELETE`, `FROM`, `WHERE`)
//! - [`Schema`] and [`Field`] metadata describing the target table
//! - the [`Dialect`] trait, through which a database decides quoting,
//!   placeholders, column types and clause rendering
//! - [`Statement`], which renders clauses into SQL text plus bound values
//!
//! ## Rendering a statement
//!
//! ```rust
//! use oxide_sql_core::clause::{self, Clause, Insert, Values};
//! use oxide_sql_core::{GenericDialect, Statement};
//!
//! let dialect = GenericDialect::new();
//! let mut stmt = Statement::new(&dialect)
//!     .clause(Clause::Insert(Insert { table: "users".into() }))
//!     .clause(Clause::Values(Values::new(&["name"]).row(vec!["Alice"])));
//! stmt.build(&[clause::INSERT, clause::VALUES]);
//!
//! assert_eq!(stmt.sql(), "INSERT INTO \"users\" (\"name\") VALUES (?)");
//! ```
//!
//! ## SQL Injection Prevention
//!
//! Values are always bound, never spliced into the SQL text:
//!
//! ```rust
//! use oxide_sql_core::clause::{self, col, Clause, Where};
//! use oxide_sql_core::{GenericDialect, SqlValue, Statement};
//!
//! let user_input = "'; DROP TABLE users; --";
//! let dialect = GenericDialect::new();
//! let mut stmt = Statement::new(&dialect)
//!     .clause(Clause::Where(Where(vec![col("name").eq(user_input)])));
//! stmt.build(&[clause::WHERE]);
//!
//! assert_eq!(stmt.sql(), "WHERE \"name\" = ?");
//! assert_eq!(stmt.vars(), &[SqlValue::Text(user_input.into())]);
//! ```

pub mod builder;
pub mod clause;
pub mod dialect;
pub mod explain;
pub mod schema;
pub mod statement;

pub use builder::{SqlValue, ToSqlValue};
pub use clause::{col, Assignment, Clause, Column, Expr, OnConflict, Returning};
pub use dialect::{ClauseBuilder, Dialect, GenericDialect};
pub use explain::explain_sql;
pub use schema::{DataType, Field, Schema};
pub use statement::Statement;
