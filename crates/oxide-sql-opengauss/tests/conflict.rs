mod common;

use common::{people, render_on_conflict};
use oxide_sql_core::clause::{col, Assignment, Clause, Column, Expr, OnConflict};
use oxide_sql_core::schema::Schema;
use oxide_sql_core::SqlValue;

#[test]
fn test_unique_assignment_is_dropped() {
    let (sql, vars) = render_on_conflict(
        &people(),
        vec![Clause::OnConflict(
            OnConflict::new()
                .do_update(Assignment::new("name", "a"))
                .do_update(Assignment::new("age", 30)),
        )],
    );
    assert_eq!(sql, "ON DUPLICATE KEY UPDATE \"age\"=$1");
    assert_eq!(vars, vec![SqlValue::Int(30)]);
}

#[test]
fn test_only_unique_assignments_fall_back_to_nothing() {
    let (sql, vars) = render_on_conflict(
        &people(),
        vec![Clause::OnConflict(
            OnConflict::new()
                .do_update(Assignment::new("name", "a"))
                .do_update(Assignment::new("id", 7))
                .do_update(Assignment::new("handle", "h")),
        )],
    );
    assert_eq!(sql, "ON DUPLICATE KEY UPDATE NOTHING");
    assert!(vars.is_empty());
}

#[test]
fn test_do_nothing_ignores_assignments() {
    let (sql, vars) = render_on_conflict(
        &people(),
        vec![Clause::OnConflict(
            OnConflict::new()
                .columns(&["id"])
                .do_update(Assignment::new("age", 30))
                .do_nothing(),
        )],
    );
    assert_eq!(sql, "ON DUPLICATE KEY UPDATE NOTHING");
    assert!(vars.is_empty());
}

#[test]
fn test_empty_assignment_list() {
    let (sql, _) = render_on_conflict(&people(), vec![Clause::OnConflict(OnConflict::new())]);
    assert_eq!(sql, "ON DUPLICATE KEY UPDATE NOTHING");
}

#[test]
fn test_excluded_reference_is_quoted() {
    let (sql, vars) = render_on_conflict(
        &people(),
        vec![Clause::OnConflict(
            OnConflict::new().update_columns(&["name", "age", "handle"]),
        )],
    );
    assert_eq!(sql, "ON DUPLICATE KEY UPDATE \"age\"=\"excluded\".\"age\"");
    assert!(vars.is_empty());
}

#[test]
fn test_assignments_keep_order_and_compact_separator() {
    let schema = Schema::new("counters");
    let (sql, vars) = render_on_conflict(
        &schema,
        vec![Clause::OnConflict(
            OnConflict::new()
                .do_update(Assignment::new("hits", 1))
                .do_update(Assignment::from_excluded("label"))
                .do_update(Assignment::expr("total", Expr::raw("total + 1")))
                .do_update(Assignment::expr("peer", Column::qualified("other", "peer"))),
        )],
    );
    assert_eq!(
        sql,
        "ON DUPLICATE KEY UPDATE \"hits\"=$1,\"label\"=\"excluded\".\"label\",\
         \"total\"=total + 1,\"peer\"=\"other\".\"peer\""
    );
    assert_eq!(vars, vec![SqlValue::Int(1)]);
}

#[test]
fn test_target_filter() {
    let (sql, vars) = render_on_conflict(
        &people(),
        vec![Clause::OnConflict(
            OnConflict::new()
                .update_columns(&["age"])
                .target_where(col("age").lt(100)),
        )],
    );
    assert_eq!(
        sql,
        "ON DUPLICATE KEY UPDATE \"age\"=\"excluded\".\"age\" WHERE \"age\" < $1"
    );
    assert_eq!(vars, vec![SqlValue::Int(100)]);
}

#[test]
fn test_target_filter_with_nothing() {
    let (sql, _) = render_on_conflict(
        &people(),
        vec![Clause::OnConflict(
            OnConflict::new()
                .do_nothing()
                .target_where(col("age").gt(1))
                .target_where(col("age").lt(2).or(col("age").is_null())),
        )],
    );
    assert_eq!(
        sql,
        "ON DUPLICATE KEY UPDATE NOTHING WHERE \"age\" > $1 AND (\"age\" < $2 OR \"age\" IS NULL)"
    );
}

#[test]
fn test_unknown_column_stays_updatable() {
    let (sql, _) = render_on_conflict(
        &people(),
        vec![Clause::OnConflict(
            OnConflict::new().do_update(Assignment::new("nickname", "z")),
        )],
    );
    assert_eq!(sql, "ON DUPLICATE KEY UPDATE \"nickname\"=$1");
}
