#![allow(dead_code)]

use oxide_sql_core::clause::{self, Clause, FromTable, Insert, Update};
use oxide_sql_core::schema::{DataType, Field, Schema};
use oxide_sql_core::{SqlValue, Statement};
use oxide_sql_opengauss::{Config, OpenGaussDialect};

/// `people(id pk, name unique, handle unique-index, age)`.
pub fn people() -> Schema {
    Schema::new("people")
        .field(Field::new("id", DataType::Int).size(64).primary_key().auto_increment())
        .field(Field::new("name", DataType::String).size(100).unique())
        .field(Field::new("handle", DataType::String).unique_index("idx_people_handle"))
        .field(Field::new("age", DataType::Int).size(32))
}

pub fn dialect() -> OpenGaussDialect {
    OpenGaussDialect::default()
}

pub fn dialect_without_returning() -> OpenGaussDialect {
    OpenGaussDialect::new(Config::default().without_returning(true))
}

pub fn insert_into(table: &str) -> Clause {
    Clause::Insert(Insert {
        table: table.to_string(),
    })
}

pub fn update(table: &str) -> Clause {
    Clause::Update(Update {
        table: table.to_string(),
    })
}

pub fn from(table: &str) -> Clause {
    Clause::From(FromTable {
        table: table.to_string(),
    })
}

/// Renders `clauses` with the insert clause order.
pub fn render_create(
    dialect: &OpenGaussDialect,
    schema: &Schema,
    clauses: Vec<Clause>,
) -> (String, Vec<SqlValue>) {
    let mut stmt = Statement::new(dialect).with_schema(schema);
    for c in clauses {
        stmt.add_clause(c);
    }
    stmt.build(&dialect.callbacks().create_clauses);
    stmt.into_parts()
}

/// Renders only the conflict clause of a statement holding `clauses`.
pub fn render_on_conflict(schema: &Schema, clauses: Vec<Clause>) -> (String, Vec<SqlValue>) {
    let dialect = dialect();
    let mut stmt = Statement::new(&dialect).with_schema(schema);
    for c in clauses {
        stmt.add_clause(c);
    }
    stmt.build(&[clause::ON_CONFLICT]);
    stmt.into_parts()
}
