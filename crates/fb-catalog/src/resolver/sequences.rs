//! Sequence (generator) stepping.

use tracing::debug;

use crate::core::identifier::sequence_reference;
use crate::core::{CatalogConnection, CatalogValue};
use crate::error::{CatalogError, Result};

/// Build the statement that steps `name`. The name is spliced into the SQL
/// text since the engine does not accept it as a parameter.
pub(crate) fn next_value_sql(name: &str) -> Result<String> {
    Ok(format!(
        "SELECT NEXT VALUE FOR {} FROM RDB$DATABASE",
        sequence_reference(name)?
    ))
}

/// Advance the sequence `name` and return its new value.
pub async fn next_value(conn: &dyn CatalogConnection, name: &str) -> Result<i64> {
    let sql = next_value_sql(name)?;
    match conn.query_scalar(&sql, &[]).await? {
        CatalogValue::Int(v) => {
            debug!("Sequence {} advanced to {}", name, v);
            Ok(v)
        }
        other => Err(CatalogError::query(
            format!("next value for {}", name),
            format!("expected integer, got {}", other.kind()),
        )),
    }
}
