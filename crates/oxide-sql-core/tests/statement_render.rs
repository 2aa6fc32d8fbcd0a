mod common;

use common::render;
use oxide_sql_core::clause::{
    self, col, Assignment, Clause, Delete, FromTable, Insert, OnConflict, Returning, Set, Update,
    Values, Where,
};
use oxide_sql_core::SqlValue;

const CREATE: [&str; 4] = [clause::INSERT, clause::VALUES, clause::ON_CONFLICT, clause::RETURNING];
const UPDATE: [&str; 5] = [
    clause::UPDATE,
    clause::SET,
    clause::FROM,
    clause::WHERE,
    clause::RETURNING,
];
const DELETE: [&str; 4] = [clause::DELETE, clause::FROM, clause::WHERE, clause::RETURNING];

#[test]
fn test_portable_upsert() {
    let (sql, params) = render(
        vec![
            Clause::Insert(Insert {
                table: String::from("users"),
            }),
            Clause::Values(Values::new(&["id", "name"]).row(vec![
                SqlValue::Int(1),
                SqlValue::Text(String::from("Alice")),
            ])),
            Clause::OnConflict(OnConflict::new().columns(&["id"]).update_columns(&["name"])),
            Clause::Returning(Returning::all()),
        ],
        &CREATE,
    );
    assert_eq!(
        sql,
        "INSERT INTO \"users\" (\"id\", \"name\") VALUES (?, ?) \
         ON CONFLICT (\"id\") DO UPDATE SET \"name\" = \"excluded\".\"name\" RETURNING *"
    );
    assert_eq!(params.len(), 2);
}

#[test]
fn test_update_with_accumulated_set_and_where() {
    let (sql, params) = render(
        vec![
            Clause::Update(Update {
                table: String::from("users"),
            }),
            Clause::Set(Set(vec![Assignment::new("name", "Bob")])),
            Clause::Set(Set(vec![Assignment::new("age", 40)])),
            Clause::Where(Where(vec![col("id").eq(1)])),
            Clause::Where(Where(vec![col("deleted_at").is_null()])),
        ],
        &UPDATE,
    );
    assert_eq!(
        sql,
        "UPDATE \"users\" SET \"name\" = ?, \"age\" = ? WHERE \"id\" = ? AND \"deleted_at\" IS NULL"
    );
    assert_eq!(
        params,
        vec![
            SqlValue::Text(String::from("Bob")),
            SqlValue::Int(40),
            SqlValue::Int(1),
        ]
    );
}

#[test]
fn test_delete_without_where() {
    let (sql, params) = render(
        vec![
            Clause::Delete(Delete),
            Clause::From(FromTable {
                table: String::from("sessions"),
            }),
        ],
        &DELETE,
    );
    assert_eq!(sql, "DELETE FROM \"sessions\"");
    assert!(params.is_empty());
}

#[test]
fn test_missing_clauses_are_skipped() {
    let (sql, _) = render(
        vec![Clause::Returning(Returning::columns(&["id"]))],
        &CREATE,
    );
    assert_eq!(sql, "RETURNING \"id\"");
}
