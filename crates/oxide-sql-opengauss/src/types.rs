//! Column type mapping.

use oxide_sql_core::schema::{DataType, Field};

/// Integer storage classes, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntWidth {
    Small,
    Regular,
    Big,
}

impl IntWidth {
    /// Picks the narrowest class that holds `bits`. An unsigned value needs
    /// one more bit, since openGauss has no unsigned integers.
    const fn of(bits: u32, unsigned: bool) -> Self {
        let bits = if unsigned { bits.saturating_add(1) } else { bits };
        if bits <= 16 {
            Self::Small
        } else if bits <= 32 {
            Self::Regular
        } else {
            Self::Big
        }
    }

    const fn integer(self) -> &'static str {
        match self {
            Self::Small => "smallint",
            Self::Regular => "integer",
            Self::Big => "bigint",
        }
    }

    const fn serial(self) -> &'static str {
        match self {
            Self::Small => "smallserial",
            Self::Regular => "serial",
            Self::Big => "bigserial",
        }
    }
}

/// Returns the openGauss column type for `field`.
#[must_use]
pub fn data_type_of(field: &Field) -> String {
    match &field.data_type {
        DataType::Bool => String::from("boolean"),
        DataType::Int | DataType::Uint => {
            let width = IntWidth::of(field.size, field.unsigned);
            if field.auto_increment {
                width.serial().to_string()
            } else {
                width.integer().to_string()
            }
        }
        DataType::Float => match (field.precision, field.scale) {
            (0, _) => String::from("decimal"),
            (p, 0) => format!("numeric({p})"),
            (p, s) => format!("numeric({p}, {s})"),
        },
        DataType::String if field.size > 0 => format!("varchar({})", field.size),
        DataType::String => String::from("text"),
        DataType::Time if field.precision > 0 => format!("timestamptz({})", field.precision),
        DataType::Time => String::from("timestamptz"),
        DataType::Bytes => String::from("bytea"),
        DataType::Custom(declared) => custom_type_of(field, declared),
    }
}

/// Keeps a user-declared type, unless the column auto-increments and the
/// declaration is not already a serial type.
fn custom_type_of(field: &Field, declared: &str) -> String {
    if field.auto_increment && !declared.to_ascii_lowercase().contains("serial") {
        IntWidth::of(field.size, field.unsigned)
            .serial()
            .to_string()
    } else {
        declared.to_string()
    }
}

/// Returns the integer type a serial pseudo-type is stored as.
///
/// The catalog reports `serial` columns as `integer` and so on; hosts use
/// this to compare a declared type with the one read back.
#[must_use]
pub fn serial_base_type(declared: &str) -> Option<&'static str> {
    match declared {
        "smallserial" => Some("smallint"),
        "serial" => Some("integer"),
        "bigserial" => Some("bigint"),
        _ => None,
    }
}
