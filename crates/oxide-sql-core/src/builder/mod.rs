//! Values bound to rendered statements.

pub mod value;

pub use value::{SqlValue, ToSqlValue};
