//! Schema metadata records produced by the resolvers.
//!
//! Every record is a plain value: constructed fresh per resolver call,
//! never shared, and compared by value.

use serde::{Deserialize, Serialize};

/// Column metadata, one field of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, trailing padding trimmed.
    pub name: String,

    /// Name of the domain the column derives from. Empty for the
    /// auto-generated `RDB$` domains backing inline column types.
    pub domain: String,

    /// Decoded SQL type name (e.g. "VARCHAR", "NUMERIC").
    pub sql_type: String,

    /// Catalog subtype, when the catalog returned one.
    pub sql_subtype: Option<i16>,

    /// Raw base type code as stored in `RDB$FIELD_TYPE`.
    pub type_code: i16,

    /// Storage length in bytes.
    pub length: i16,

    /// Numeric precision.
    pub precision: Option<i16>,

    /// Catalog scale, verbatim. Scaled numerics carry a negative value.
    pub scale: i16,

    /// Default expression without the `DEFAULT` keyword.
    pub default: Option<String>,

    /// Whether the column accepts NULL. `None` when neither the column nor
    /// its domain declares a null flag.
    pub nullable: Option<bool>,
}

impl Column {
    /// Length in characters for CHAR/VARCHAR columns, given the byte width
    /// of the connection character set.
    ///
    /// Returns `None` for non-character types or a zero width.
    pub fn char_length(&self, bytes_per_char: u8) -> Option<i16> {
        if bytes_per_char == 0 {
            return None;
        }
        match self.sql_type.as_str() {
            "CHAR" | "VARCHAR" => Some(self.length / bytes_per_char as i16),
            _ => None,
        }
    }

    /// Check if the column was declared through a named domain.
    pub fn has_domain(&self) -> bool {
        !self.domain.is_empty()
    }
}

/// Index metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Index name.
    pub name: String,

    /// Owning table name.
    pub table_name: String,

    /// Whether the index is unique. `None` when the catalog flag is null.
    pub unique: Option<bool>,

    /// Whether the index is sorted descending. `None` when the catalog
    /// index type is null.
    pub descending: Option<bool>,

    /// Indexed column names in segment order.
    pub columns: Vec<String>,
}

/// Full description of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name.
    pub name: String,

    /// Column definitions in declared field order.
    pub columns: Vec<Column>,

    /// Primary key column names.
    pub primary_key: Vec<String>,

    /// All indexes on the table, including the one backing the primary key.
    pub indexes: Vec<Index>,
}

impl TableSchema {
    /// Check if the table has a primary key.
    pub fn has_pk(&self) -> bool {
        !self.primary_key.is_empty()
    }

    /// Find a column by exact name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}
