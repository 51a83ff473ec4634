//! Catalog value and row types.
//!
//! The system tables only ever hand back small integers, fixed-width
//! identifiers and text blobs, so the value model is deliberately narrow.
//! Rows are positional: every resolver knows the projection it issued and
//! reads columns by index through the shape-checked accessors on
//! [`CatalogRow`].

use crate::error::{CatalogError, Result};

/// A single value returned by (or bound into) a catalog query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogValue {
    /// SQL NULL.
    Null,

    /// Any integer column (SMALLINT, INTEGER, BIGINT).
    Int(i64),

    /// CHAR/VARCHAR column or a text BLOB already decoded by the driver.
    Text(String),

    /// Raw BLOB content (e.g. `RDB$DEFAULT_SOURCE` from drivers that do not
    /// decode text blobs).
    Bytes(Vec<u8>),
}

impl CatalogValue {
    /// Check if this value is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, CatalogValue::Null)
    }

    /// Short type label used in shape-mismatch errors.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogValue::Null => "null",
            CatalogValue::Int(_) => "integer",
            CatalogValue::Text(_) => "text",
            CatalogValue::Bytes(_) => "bytes",
        }
    }
}

impl From<i64> for CatalogValue {
    fn from(v: i64) -> Self {
        CatalogValue::Int(v)
    }
}

impl From<i32> for CatalogValue {
    fn from(v: i32) -> Self {
        CatalogValue::Int(v as i64)
    }
}

impl From<i16> for CatalogValue {
    fn from(v: i16) -> Self {
        CatalogValue::Int(v as i64)
    }
}

impl From<String> for CatalogValue {
    fn from(v: String) -> Self {
        CatalogValue::Text(v)
    }
}

impl From<&str> for CatalogValue {
    fn from(v: &str) -> Self {
        CatalogValue::Text(v.to_string())
    }
}

impl<T: Into<CatalogValue>> From<Option<T>> for CatalogValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(CatalogValue::Null, Into::into)
    }
}

/// One result row, addressed by column position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogRow {
    values: Vec<CatalogValue>,
}

impl CatalogRow {
    /// Create a row from its values in projection order.
    pub fn new(values: Vec<CatalogValue>) -> Self {
        Self { values }
    }

    /// Number of columns in the row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw access to a column value.
    pub fn get(&self, idx: usize) -> Result<&CatalogValue> {
        self.values.get(idx).ok_or_else(|| {
            shape_error(format!(
                "row has {} columns, column {} requested",
                self.values.len(),
                idx
            ))
        })
    }

    /// Read a non-null text column.
    pub fn text(&self, idx: usize) -> Result<String> {
        self.optional_text(idx)?
            .ok_or_else(|| shape_error(format!("column {} is null, expected text", idx)))
    }

    /// Read a nullable text column. Byte blobs must be valid UTF-8.
    pub fn optional_text(&self, idx: usize) -> Result<Option<String>> {
        match self.get(idx)? {
            CatalogValue::Null => Ok(None),
            CatalogValue::Text(s) => Ok(Some(s.clone())),
            CatalogValue::Bytes(b) => std::str::from_utf8(b)
                .map(|s| Some(s.to_string()))
                .map_err(|_| {
                    shape_error(format!(
                        "column {} holds a blob that is not valid UTF-8",
                        idx
                    ))
                }),
            other => Err(mismatch(idx, "text", other)),
        }
    }

    /// Read a nullable integer column.
    pub fn optional_int(&self, idx: usize) -> Result<Option<i64>> {
        match self.get(idx)? {
            CatalogValue::Null => Ok(None),
            CatalogValue::Int(v) => Ok(Some(*v)),
            other => Err(mismatch(idx, "integer", other)),
        }
    }

    /// Read a non-null SMALLINT column.
    pub fn small_int(&self, idx: usize) -> Result<i16> {
        self.optional_small_int(idx)?
            .ok_or_else(|| shape_error(format!("column {} is null, expected smallint", idx)))
    }

    /// Read a nullable SMALLINT column, rejecting values outside `i16`.
    pub fn optional_small_int(&self, idx: usize) -> Result<Option<i16>> {
        match self.optional_int(idx)? {
            None => Ok(None),
            Some(v) => i16::try_from(v).map(Some).map_err(|_| {
                shape_error(format!("column {} value {} does not fit a smallint", idx, v))
            }),
        }
    }
}

impl From<Vec<CatalogValue>> for CatalogRow {
    fn from(values: Vec<CatalogValue>) -> Self {
        Self::new(values)
    }
}

fn mismatch(idx: usize, expected: &str, got: &CatalogValue) -> CatalogError {
    shape_error(format!(
        "column {} expected {}, got {}",
        idx,
        expected,
        got.kind()
    ))
}

fn shape_error(message: String) -> CatalogError {
    CatalogError::query("row shape", message)
}
