//! Session setup and savepoints.
//!
//! [`OpenGaussDialect::initialize`] turns a configuration into a
//! [`Session`]: a connection pool plus the dialect and its clause order.
//! The pool connects lazily, so setup performs no I/O and only fails on
//! bad configuration.

use std::sync::LazyLock;

use oxide_sql_core::schema::Schema;
use oxide_sql_core::{Dialect, Statement};
use regex::Regex;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgConnection, PgPool};
use tracing::{debug, info};

use crate::config::Config;
use crate::dialect::{CallbackConfig, OpenGaussDialect};
use crate::dsn;
use crate::error::{Error, Result};

/// Driver names served by this dialect.
pub const SUPPORTED_DRIVERS: [&str; 3] = ["opengauss", "postgres", "postgresql"];

/// Runtime parameter receiving the time zone found in a connection string.
const TIME_ZONE_PARAM: &str = "TimeZone";

static TIME_ZONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(time_zone|TimeZone)=(.*?)($|&| )").expect("Invalid time zone regex")
});

/// Returns the time zone embedded in `dsn` as `time_zone=` or `TimeZone=`.
#[must_use]
pub fn time_zone_of(dsn: &str) -> Option<&str> {
    TIME_ZONE
        .captures(dsn)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str())
        .filter(|tz| !tz.is_empty())
}

/// Builds the driver's connection options from `config`.
///
/// The connection string may be a URL or keyword/value pairs.
///
/// # Errors
///
/// Returns [`Error::MissingDsn`] for an empty connection string and
/// [`Error::InvalidDsn`] if it cannot be parsed.
pub fn connect_options(config: &Config) -> Result<PgConnectOptions> {
    if config.dsn.is_empty() {
        return Err(Error::MissingDsn);
    }
    let parsed = if dsn::is_url(&config.dsn) {
        config.dsn.parse::<PgConnectOptions>()
    } else {
        dsn::keyword_options(&config.dsn)
    };
    let mut options = parsed.map_err(|e| Error::invalid_dsn(&config.dsn, e))?;
    if let Some(tz) = time_zone_of(&config.dsn) {
        options = options.options([(TIME_ZONE_PARAM, tz)]);
    }
    if config.prefer_simple_protocol {
        options = options.statement_cache_capacity(0);
    }
    Ok(options)
}

impl OpenGaussDialect {
    /// Prepares a session: checks the driver, then reuses the configured
    /// pool or creates a lazily connecting one from the connection string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDriver`] for a driver other than
    /// [`SUPPORTED_DRIVERS`]. When a pool has to be created, returns the
    /// errors of [`connect_options`], and [`Error::Config`] if no Tokio
    /// runtime is running, since the pool spawns its maintenance task there.
    pub fn initialize(&self) -> Result<Session> {
        let config = self.config();
        let driver = config.driver();
        if !SUPPORTED_DRIVERS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(driver))
        {
            return Err(Error::UnsupportedDriver(driver.to_string()));
        }

        let pool = if let Some(pool) = &config.conn {
            debug!(driver = %driver, "Reusing existing connection pool");
            pool.clone()
        } else {
            let options = connect_options(config)?;
            if tokio::runtime::Handle::try_current().is_err() {
                return Err(Error::Config(String::from(
                    "session setup must run inside a Tokio runtime",
                )));
            }
            info!(
                driver = %driver,
                time_zone = ?time_zone_of(&config.dsn),
                simple_protocol = config.prefer_simple_protocol,
                "Opening openGauss connection pool"
            );
            PgPoolOptions::new().connect_lazy_with(options)
        };

        Ok(Session {
            dialect: self.clone(),
            pool,
            callbacks: self.callbacks(),
        })
    }
}

/// An initialized dialect bound to a connection pool.
#[derive(Debug, Clone)]
pub struct Session {
    dialect: OpenGaussDialect,
    pool: PgPool,
    callbacks: CallbackConfig,
}

impl Session {
    /// Returns the dialect.
    #[must_use]
    pub const fn dialect(&self) -> &OpenGaussDialect {
        &self.dialect
    }

    /// Returns the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Returns the clause order for each statement kind.
    #[must_use]
    pub const fn callbacks(&self) -> &CallbackConfig {
        &self.callbacks
    }

    /// Starts an insert into the table described by `schema`.
    #[must_use]
    pub fn create_statement<'a>(&'a self, schema: &'a Schema) -> Statement<'a> {
        Statement::new(&self.dialect).with_schema(schema)
    }

    /// Starts an update of the table described by `schema`.
    #[must_use]
    pub fn update_statement<'a>(&'a self, schema: &'a Schema) -> Statement<'a> {
        Statement::new(&self.dialect).with_schema(schema)
    }

    /// Starts a delete from the table described by `schema`.
    #[must_use]
    pub fn delete_statement<'a>(&'a self, schema: &'a Schema) -> Statement<'a> {
        Statement::new(&self.dialect).with_schema(schema)
    }

    /// Renders `stmt` as an insert.
    pub fn render_create(&self, stmt: &mut Statement<'_>) {
        self.render(stmt, &self.callbacks.create_clauses);
    }

    /// Renders `stmt` as an update.
    pub fn render_update(&self, stmt: &mut Statement<'_>) {
        self.render(stmt, &self.callbacks.update_clauses);
    }

    /// Renders `stmt` as a delete.
    pub fn render_delete(&self, stmt: &mut Statement<'_>) {
        self.render(stmt, &self.callbacks.delete_clauses);
    }

    fn render(&self, stmt: &mut Statement<'_>, clauses: &[&'static str]) {
        stmt.build(clauses);
        debug!(dialect = self.dialect.name(), sql = %stmt.explain(), "Rendered statement");
    }

    /// Creates savepoint `name` on `conn`.
    ///
    /// # Errors
    ///
    /// Returns the driver's error unchanged as [`Error::Database`].
    pub async fn save_point(&self, conn: &mut PgConnection, name: &str) -> Result<()> {
        let sql = OpenGaussDialect::save_point_sql(name);
        debug!(savepoint = %name, "Creating savepoint");
        sqlx::query(&sql).execute(&mut *conn).await?;
        Ok(())
    }

    /// Rolls `conn` back to savepoint `name`.
    ///
    /// # Errors
    ///
    /// Returns the driver's error unchanged as [`Error::Database`].
    pub async fn rollback_to(&self, conn: &mut PgConnection, name: &str) -> Result<()> {
        let sql = OpenGaussDialect::rollback_to_sql(name);
        debug!(savepoint = %name, "Rolling back to savepoint");
        sqlx::query(&sql).execute(&mut *conn).await?;
        Ok(())
    }

    /// Checks that the database answers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Database`] if no connection can be made or the query
    /// fails.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        info!("openGauss answered ping");
        Ok(())
    }
}
