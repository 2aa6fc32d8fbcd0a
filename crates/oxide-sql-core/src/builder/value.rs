//! SQL values bound to statements.
//!
//! Values are never spliced into SQL text while a statement is rendered.
//! They are collected in order and referenced through the dialect's
//! placeholder. The only place a value becomes literal text is
//! [`SqlValue::to_sql_inline`], which exists for human-readable logging.

use chrono::{DateTime, Utc};

/// A SQL value that can be bound to a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
    /// Point in time, stored in UTC.
    Timestamp(DateTime<Utc>),
}

impl SqlValue {
    /// Renders the value as a SQL literal, using `escaper` as the string
    /// delimiter.
    ///
    /// Embedded delimiters are doubled. This is meant for logging bound
    /// statements, never for building SQL that is sent to a server.
    #[must_use]
    pub fn to_sql_inline(&self, escaper: char) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Bool(true) => String::from("true"),
            Self::Bool(false) => String::from("false"),
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => quote_literal(s, escaper),
            Self::Blob(b) => {
                let hex: String = b.iter().map(|byte| format!("{byte:02x}")).collect();
                quote_literal(&format!("\\x{hex}"), escaper)
            }
            Self::Timestamp(t) => {
                quote_literal(&t.format("%Y-%m-%d %H:%M:%S%.3f").to_string(), escaper)
            }
        }
    }

    /// Returns `true` for [`SqlValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

fn quote_literal(s: &str, escaper: char) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push(escaper);
    for c in s.chars() {
        if c == escaper {
            out.push(escaper);
        }
        out.push(c);
    }
    out.push(escaper);
    out
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

macro_rules! impl_to_sql_int {
    ($($ty:ty),+) => {
        $(
            impl ToSqlValue for $ty {
                fn to_sql_value(self) -> SqlValue {
                    SqlValue::Int(i64::from(self))
                }
            }
        )+
    };
}

impl_to_sql_int!(i8, i16, i32, i64, u8, u16, u32);

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for f32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(f64::from(self))
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl ToSqlValue for Vec<u8> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self)
    }
}

impl ToSqlValue for &[u8] {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self.to_vec())
    }
}

impl ToSqlValue for DateTime<Utc> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Timestamp(self)
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(v) => v.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}
