//! Table and field metadata.
//!
//! A [`Schema`] describes the columns of one table as the host declared
//! them. Dialects read it to choose column types and to decide which
//! columns may be touched by a conflict action.

use std::collections::HashMap;

/// Tag marking a field as part of a unique index.
pub const UNIQUE_INDEX_TAG: &str = "UNIQUEINDEX";

/// Logical type of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    /// Boolean.
    Bool,
    /// Signed integer.
    Int,
    /// Unsigned integer.
    Uint,
    /// Floating point or fixed-point number.
    Float,
    /// Character data.
    String,
    /// Date and time.
    Time,
    /// Binary data.
    Bytes,
    /// Type declared verbatim by the user, e.g. `uuid` or `serial`.
    Custom(String),
}

/// Metadata of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Name on the host side.
    pub name: String,
    /// Column name in the database.
    pub db_name: String,
    /// Logical type.
    pub data_type: DataType,
    /// Whether the backing value is unsigned, even when `data_type` is a
    /// custom declaration.
    pub unsigned: bool,
    /// Bit width for integers, maximum length for strings. Zero when not
    /// declared.
    pub size: u32,
    /// Numeric or fractional-seconds precision. Zero when not declared.
    pub precision: u32,
    /// Numeric scale. Zero when not declared.
    pub scale: u32,
    /// Whether the database generates the value.
    pub auto_increment: bool,
    /// Whether the column is (part of) the primary key.
    pub primary_key: bool,
    /// Whether the column carries a unique constraint.
    pub unique: bool,
    /// Extra settings keyed by upper-case tag name.
    pub tag_settings: HashMap<String, String>,
}

impl Field {
    /// Creates a field whose database name equals `name`.
    #[must_use]
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: String::from(name),
            db_name: String::from(name),
            unsigned: data_type == DataType::Uint,
            data_type,
            size: 0,
            precision: 0,
            scale: 0,
            auto_increment: false,
            primary_key: false,
            unique: false,
            tag_settings: HashMap::new(),
        }
    }

    /// Sets the database column name.
    #[must_use]
    pub fn db_name(mut self, db_name: &str) -> Self {
        self.db_name = String::from(db_name);
        self
    }

    /// Sets the size (bit width or maximum length).
    #[must_use]
    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Sets the precision.
    #[must_use]
    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Sets the scale.
    #[must_use]
    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Marks the backing value as unsigned.
    #[must_use]
    pub fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }

    /// Marks the column as auto-incrementing.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Marks the column as primary key.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Marks the column as unique.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Adds a tag setting. The key is stored upper-cased.
    #[must_use]
    pub fn tag(mut self, key: &str, value: &str) -> Self {
        self.tag_settings
            .insert(key.to_ascii_uppercase(), String::from(value));
        self
    }

    /// Places the column in the unique index `index`.
    #[must_use]
    pub fn unique_index(self, index: &str) -> Self {
        self.tag(UNIQUE_INDEX_TAG, index)
    }

    /// Returns whether any uniqueness constraint covers this column: primary
    /// key, unique flag, or a unique-index tag.
    #[must_use]
    pub fn has_unique_constraint(&self) -> bool {
        self.primary_key || self.unique || self.tag_settings.contains_key(UNIQUE_INDEX_TAG)
    }
}

/// Metadata of one table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    /// Table name.
    pub table: String,
    /// Columns, in declaration order.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Creates an empty schema for `table`.
    #[must_use]
    pub fn new(table: &str) -> Self {
        Self {
            table: String::from(table),
            fields: vec![],
        }
    }

    /// Adds a field.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Finds a field by database name, then by host name.
    #[must_use]
    pub fn look_up_field(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|f| f.db_name == name)
            .or_else(|| self.fields.iter().find(|f| f.name == name))
    }
}
