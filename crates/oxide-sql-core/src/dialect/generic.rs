//! Generic SQL dialect.

use super::Dialect;
use crate::schema::{DataType, Field};

/// A generic SQL dialect using ANSI SQL standards.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn data_type_of(&self, field: &Field) -> String {
        match &field.data_type {
            DataType::Bool => String::from("BOOLEAN"),
            DataType::Int | DataType::Uint if field.size > 0 && field.size <= 32 => {
                String::from("INTEGER")
            }
            DataType::Int | DataType::Uint => String::from("BIGINT"),
            DataType::Float if field.precision > 0 => {
                format!("DECIMAL({}, {})", field.precision, field.scale)
            }
            DataType::Float => String::from("DOUBLE PRECISION"),
            DataType::String if field.size > 0 => format!("VARCHAR({})", field.size),
            DataType::String => String::from("VARCHAR"),
            DataType::Time => String::from("TIMESTAMP"),
            DataType::Bytes => String::from("BLOB"),
            DataType::Custom(declared) => declared.clone(),
        }
    }
}
