//! SQL Dialect support.
//!
//! Different databases have slightly different SQL syntax. A [`Dialect`]
//! decides how identifiers are quoted, how bound parameters are written,
//! which physical type a field gets, and may take over the rendering of
//! any clause.

mod generic;

pub use generic::GenericDialect;

use crate::builder::value::SqlValue;
use crate::clause::{Clause, Expr};
use crate::explain::explain_sql;
use crate::schema::Field;
use crate::statement::Statement;

/// Renders one clause in place of [`Clause::build`].
pub type ClauseBuilder = fn(&Clause, &mut Statement<'_>);

/// Trait for SQL dialect-specific behavior.
///
/// Implementations hold no per-statement state, so one dialect value can
/// render statements from several threads at once.
pub trait Dialect: Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Appends `identifier`, quoted, to `out`.
    ///
    /// The default quotes every dot-separated segment with `"` and doubles
    /// embedded quotes.
    fn quote_to(&self, out: &mut String, identifier: &str) {
        for (idx, segment) in identifier.split('.').enumerate() {
            if idx > 0 {
                out.push('.');
            }
            out.push('"');
            out.push_str(&segment.replace('"', "\"\""));
            out.push('"');
        }
    }

    /// Appends the placeholder of the bound parameter at 1-based
    /// `position`.
    fn bind_var_to(&self, out: &mut String, _position: usize) {
        out.push('?');
    }

    /// Returns the physical column type for `field`.
    fn data_type_of(&self, field: &Field) -> String;

    /// Returns the expression used when a field takes its default value.
    fn default_value_of(&self, _field: &Field) -> Expr {
        Expr::raw("DEFAULT")
    }

    /// Inlines `vars` into `sql` for logging.
    fn explain(&self, sql: &str, vars: &[SqlValue]) -> String {
        explain_sql(sql, None, '\'', vars)
    }

    /// Returns the dialect's renderer for the clause called `name`, if it
    /// overrides the portable one.
    fn clause_builder(&self, _name: &str) -> Option<ClauseBuilder> {
        None
    }

    /// Quotes `identifier` into a new string.
    fn quote(&self, identifier: &str) -> String {
        let mut out = String::with_capacity(identifier.len() + 2);
        self.quote_to(&mut out, identifier);
        out
    }
}
