//! openGauss renderings of the conflict and returning clauses.
//!
//! openGauss resolves insert conflicts with
//! `ON DUPLICATE KEY UPDATE col=value, ...` or `ON DUPLICATE KEY UPDATE
//! NOTHING`. Columns covered by a uniqueness constraint cannot be assigned
//! there, so they are dropped from the update list.
//!
//! The driver cannot combine a conflict clause with `RETURNING`, so a
//! statement carrying both renders only the conflict clause.

use oxide_sql_core::clause::{self, Assignment, Clause, Expr, OnConflict, Returning};
use oxide_sql_core::schema::Schema;
use oxide_sql_core::{ClauseBuilder, Statement};

/// How a conflict is resolved once unassignable columns are filtered out.
#[derive(Debug, Clone, PartialEq)]
pub enum ConflictAction<'a> {
    /// Assign these columns on the existing row.
    Update(Vec<&'a Assignment>),
    /// Leave the existing row untouched.
    Nothing,
}

impl<'a> ConflictAction<'a> {
    /// Chooses the action for `on_conflict` given its `updatable`
    /// assignments.
    #[must_use]
    pub fn choose(on_conflict: &OnConflict, updatable: Vec<&'a Assignment>) -> Self {
        if on_conflict.do_nothing || updatable.is_empty() {
            Self::Nothing
        } else {
            Self::Update(updatable)
        }
    }
}

/// Returns the assignments of `assignments` that may appear in the update
/// list, in their original order.
///
/// Primary key, unique and unique-index columns are left out. Columns the
/// schema does not know about, or all columns when there is no schema, are
/// kept.
#[must_use]
pub fn updatable_assignments<'a>(
    schema: Option<&Schema>,
    assignments: &'a [Assignment],
) -> Vec<&'a Assignment> {
    assignments
        .iter()
        .filter(|assignment| {
            schema
                .and_then(|s| s.look_up_field(&assignment.column.name))
                .is_none_or(|field| !field.has_unique_constraint())
        })
        .collect()
}

/// Renders an [`OnConflict`] clause as `ON DUPLICATE KEY UPDATE`.
pub fn build_on_conflict(clause: &Clause, stmt: &mut Statement<'_>) {
    let Clause::OnConflict(on_conflict) = clause else {
        return clause.build(stmt);
    };

    stmt.write_str("ON DUPLICATE KEY UPDATE ");

    let updatable = updatable_assignments(stmt.schema(), &on_conflict.do_updates);
    match ConflictAction::choose(on_conflict, updatable) {
        ConflictAction::Update(assignments) => {
            for (idx, assignment) in assignments.into_iter().enumerate() {
                if idx > 0 {
                    stmt.write_char(',');
                }
                stmt.write_quoted(&assignment.column);
                stmt.write_char('=');
                match &assignment.value {
                    Expr::Column(column) if column.is_excluded() => stmt.write_quoted(column),
                    Expr::Value(value) => stmt.add_var(value.clone()),
                    other => other.build(stmt),
                }
            }
        }
        ConflictAction::Nothing => stmt.write_str("NOTHING"),
    }

    if !on_conflict.target_where.is_empty() {
        stmt.write_str(" WHERE ");
        Expr::build_conjunction(&on_conflict.target_where, stmt);
    }
}

/// Renders a [`Returning`] clause, or nothing when the statement also
/// resolves conflicts.
pub fn build_returning(clause: &Clause, stmt: &mut Statement<'_>) {
    let Clause::Returning(Returning { columns }) = clause else {
        return clause.build(stmt);
    };
    if stmt.has_clause(clause::ON_CONFLICT) {
        return;
    }

    stmt.write_str("RETURNING ");
    if columns.is_empty() {
        stmt.write_char('*');
        return;
    }
    for (idx, column) in columns.iter().enumerate() {
        if idx > 0 {
            stmt.write_char(',');
        }
        stmt.write_quoted(column);
    }
}

/// Renders nothing. Installed for `RETURNING` when returning is disabled.
pub fn skip_clause(_clause: &Clause, _stmt: &mut Statement<'_>) {}

/// Returns the openGauss override for the clause called `name`.
#[must_use]
pub fn clause_builder(name: &str, without_returning: bool) -> Option<ClauseBuilder> {
    match name {
        clause::ON_CONFLICT => Some(build_on_conflict),
        clause::RETURNING if without_returning => Some(skip_clause),
        clause::RETURNING => Some(build_returning),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use oxide_sql_core::clause::{col, Column};
    use oxide_sql_core::schema::{DataType, Field};

    use super::*;

    fn people() -> Schema {
        Schema::new("people")
            .field(Field::new("id", DataType::Int).primary_key())
            .field(Field::new("name", DataType::String).unique())
            .field(Field::new("handle", DataType::String).unique_index("idx_handle"))
            .field(Field::new("age", DataType::Int))
    }

    fn columns(assignments: &[&Assignment]) -> Vec<String> {
        assignments.iter().map(|a| a.column.name.clone()).collect()
    }

    #[test]
    fn test_filter_drops_unique_columns() {
        let schema = people();
        let assignments = vec![
            Assignment::new("id", 1),
            Assignment::new("name", "a"),
            Assignment::new("age", 30),
            Assignment::new("handle", "h"),
        ];
        let kept = updatable_assignments(Some(&schema), &assignments);
        assert_eq!(columns(&kept), vec!["age"]);
    }

    #[test]
    fn test_filter_keeps_unknown_columns() {
        let schema = people();
        let assignments = vec![Assignment::new("nickname", "x")];
        assert_eq!(updatable_assignments(Some(&schema), &assignments).len(), 1);
        assert_eq!(updatable_assignments(None, &assignments).len(), 1);
    }

    #[test]
    fn test_choose_update() {
        let assignments = vec![Assignment::new("age", 30)];
        let on_conflict = OnConflict::new();
        let action = ConflictAction::choose(&on_conflict, assignments.iter().collect());
        assert!(matches!(action, ConflictAction::Update(list) if list.len() == 1));
    }

    #[test]
    fn test_choose_nothing_when_empty() {
        let action = ConflictAction::choose(&OnConflict::new(), vec![]);
        assert_eq!(action, ConflictAction::Nothing);
    }

    #[test]
    fn test_choose_nothing_when_requested() {
        let assignments = vec![Assignment::new("age", 30)];
        let on_conflict = OnConflict::new().do_nothing();
        let action = ConflictAction::choose(&on_conflict, assignments.iter().collect());
        assert_eq!(action, ConflictAction::Nothing);
    }

    #[test]
    fn test_clause_builder_table() {
        assert!(clause_builder(clause::ON_CONFLICT, false).is_some());
        assert!(clause_builder(clause::RETURNING, false).is_some());
        assert!(clause_builder(clause::WHERE, false).is_none());
        assert!(clause_builder(clause::INSERT, true).is_none());
    }

    #[test]
    fn test_excluded_reference_is_recognised() {
        let assignment = Assignment::from_excluded("age");
        assert!(matches!(&assignment.value, Expr::Column(c) if c.is_excluded()));
        assert_eq!(assignment.column, col("age"));
        assert_ne!(Column::qualified("other", "age"), Column::excluded("age"));
    }
}
