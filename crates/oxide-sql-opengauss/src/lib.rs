//! # oxide-sql-opengauss
//!
//! openGauss dialect for `oxide-sql-core`.
//!
//! # How openGauss differs from other dialects
//!
//! - **Wire protocol**: openGauss speaks the PostgreSQL protocol, so
//!   sessions connect through `sqlx`'s Postgres driver and bound
//!   parameters are written `$1`, `$2`, ...
//! - **Upsert**: conflicts are resolved with
//!   `INSERT ... ON DUPLICATE KEY UPDATE col=value` or
//!   `ON DUPLICATE KEY UPDATE NOTHING`, not PostgreSQL's
//!   `ON CONFLICT`. Columns under a primary key, unique or unique-index
//!   constraint cannot be assigned there and are dropped from the list.
//! - **RETURNING**: supported on INSERT, UPDATE and DELETE, but not
//!   together with `ON DUPLICATE KEY UPDATE`. A statement carrying both
//!   renders only the conflict clause.
//! - **Identifier quoting**: double quotes, one pair per dot-separated
//!   segment. Already quoted or escaped names are accepted as-is.
//! - **Types**: no unsigned integers, so an unsigned column takes the
//!   next wider type. Auto-increment columns use `smallserial`, `serial`
//!   or `bigserial`.
//!
//! ## Example
//!
//! ```rust
//! use oxide_sql_core::clause::{self, Assignment, Clause, Insert, OnConflict, Values};
//! use oxide_sql_core::schema::{DataType, Field, Schema};
//! use oxide_sql_core::Statement;
//! use oxide_sql_opengauss::OpenGaussDialect;
//!
//! let schema = Schema::new("users")
//!     .field(Field::new("id", DataType::Int).size(64).primary_key())
//!     .field(Field::new("name", DataType::String).size(100));
//!
//! let dialect = OpenGaussDialect::default();
//! let mut stmt = Statement::new(&dialect)
//!     .with_schema(&schema)
//!     .clause(Clause::Insert(Insert { table: "users".into() }))
//!     .clause(Clause::Values(Values::new(&["id", "name"]).row(vec![
//!         oxide_sql_core::SqlValue::Int(1),
//!         oxide_sql_core::SqlValue::Text("Alice".into()),
//!     ])))
//!     .clause(Clause::OnConflict(
//!         OnConflict::new()
//!             .columns(&["id"])
//!             .do_update(Assignment::new("id", 1))
//!             .update_columns(&["name"]),
//!     ));
//! stmt.build(&[clause::INSERT, clause::VALUES, clause::ON_CONFLICT]);
//!
//! assert_eq!(
//!     stmt.sql(),
//!     "INSERT INTO \"users\" (\"id\", \"name\") VALUES ($1, $2) \
//!      ON DUPLICATE KEY UPDATE \"name\"=\"excluded\".\"name\""
//! );
//! ```

pub mod clauses;
pub mod config;
mod dialect;
pub mod dsn;
pub mod error;
pub mod quote;
pub mod session;
pub mod types;

pub use config::Config;
pub use dialect::{CallbackConfig, OpenGaussDialect};
pub use error::{Error, Result};
pub use session::Session;
