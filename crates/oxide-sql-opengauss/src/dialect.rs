//! The openGauss dialect.

use std::sync::LazyLock;

use oxide_sql_core::clause::{self, Expr};
use oxide_sql_core::schema::Field;
use oxide_sql_core::{explain_sql, ClauseBuilder, Dialect, SqlValue};
use regex::Regex;

use crate::config::Config;
use crate::{clauses, quote, types};

/// Positional parameter marker, capturing the 1-based index.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\d+)").expect("Invalid placeholder regex"));

/// Clause order of each statement kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackConfig {
    /// Clauses rendered for an insert.
    pub create_clauses: Vec<&'static str>,
    /// Clauses rendered for an update.
    pub update_clauses: Vec<&'static str>,
    /// Clauses rendered for a delete.
    pub delete_clauses: Vec<&'static str>,
}

impl CallbackConfig {
    /// Builds the clause lists, leaving out `RETURNING` when
    /// `without_returning` is set.
    #[must_use]
    pub fn new(without_returning: bool) -> Self {
        let keep = |names: &[&'static str]| -> Vec<&'static str> {
            names
                .iter()
                .copied()
                .filter(|&name| !(without_returning && name == clause::RETURNING))
                .collect()
        };
        Self {
            create_clauses: keep(&[
                clause::INSERT,
                clause::VALUES,
                clause::ON_CONFLICT,
                clause::RETURNING,
            ]),
            update_clauses: keep(&[
                clause::UPDATE,
                clause::SET,
                clause::FROM,
                clause::WHERE,
                clause::RETURNING,
            ]),
            delete_clauses: keep(&[
                clause::DELETE,
                clause::FROM,
                clause::WHERE,
                clause::RETURNING,
            ]),
        }
    }
}

/// openGauss SQL dialect.
///
/// openGauss speaks the PostgreSQL wire protocol and mostly its SQL, with
/// its own conflict syntax: see [`clauses`](crate::clauses).
#[derive(Debug, Clone, Default)]
pub struct OpenGaussDialect {
    config: Config,
}

impl OpenGaussDialect {
    /// Creates a dialect connecting to `dsn` with default settings.
    #[must_use]
    pub fn open(dsn: impl Into<String>) -> Self {
        Self::new(Config::new(dsn))
    }

    /// Creates a dialect from `config`.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the clause order for each statement kind.
    #[must_use]
    pub fn callbacks(&self) -> CallbackConfig {
        CallbackConfig::new(self.config.without_returning)
    }

    /// Returns the statement creating savepoint `name`.
    #[must_use]
    pub fn save_point_sql(name: &str) -> String {
        format!("SAVEPOINT {name}")
    }

    /// Returns the statement rolling back to savepoint `name`.
    #[must_use]
    pub fn rollback_to_sql(name: &str) -> String {
        format!("ROLLBACK TO SAVEPOINT {name}")
    }

    /// Returns whether a column declared as `declared` matches the type the
    /// catalog reports as `reported`. Serial types match their base integer
    /// type.
    #[must_use]
    pub fn column_types_match(declared: &str, reported: &str) -> bool {
        let declared = declared.to_ascii_lowercase();
        types::serial_base_type(&declared)
            .unwrap_or(declared.as_str())
            .eq_ignore_ascii_case(reported)
    }
}

impl Dialect for OpenGaussDialect {
    fn name(&self) -> &'static str {
        "opengauss"
    }

    fn quote_to(&self, out: &mut String, identifier: &str) {
        quote::quote_to(out, identifier);
    }

    fn bind_var_to(&self, out: &mut String, position: usize) {
        out.push('$');
        out.push_str(&position.to_string());
    }

    fn data_type_of(&self, field: &Field) -> String {
        types::data_type_of(field)
    }

    fn default_value_of(&self, _field: &Field) -> Expr {
        Expr::raw("DEFAULT")
    }

    fn explain(&self, sql: &str, vars: &[SqlValue]) -> String {
        explain_sql(sql, Some(&*PLACEHOLDER), '\'', vars)
    }

    fn clause_builder(&self, name: &str) -> Option<ClauseBuilder> {
        clauses::clause_builder(name, self.config.without_returning)
    }
}
