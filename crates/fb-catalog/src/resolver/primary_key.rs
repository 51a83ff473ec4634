//! Primary key resolution.

use tracing::debug;

use crate::core::identifier::trim_padding;
use crate::core::traits::drain_rows;
use crate::core::{CatalogConnection, CatalogValue};
use crate::error::Result;

pub(crate) const PRIMARY_KEY_SQL: &str = r#"
SELECT S.RDB$FIELD_NAME
FROM RDB$INDICES I
    JOIN RDB$INDEX_SEGMENTS S ON I.RDB$INDEX_NAME = S.RDB$INDEX_NAME
    LEFT JOIN RDB$RELATION_CONSTRAINTS C ON I.RDB$INDEX_NAME = C.RDB$INDEX_NAME
WHERE I.RDB$RELATION_NAME = ? AND C.RDB$CONSTRAINT_TYPE = 'PRIMARY KEY'
ORDER BY RDB$FIELD_POSITION
"#;

/// Columns of the primary key of `table`, in key order.
///
/// Empty when the table has no primary key (or does not exist).
pub async fn resolve(conn: &dyn CatalogConnection, table: &str) -> Result<Vec<String>> {
    let cursor = conn
        .query(PRIMARY_KEY_SQL, &[CatalogValue::from(table)])
        .await?;
    let columns = drain_rows(cursor, |row| Ok(trim_padding(&row.text(0)?).to_string())).await?;

    debug!("Loaded {} primary key columns for {}", columns.len(), table);
    Ok(columns)
}
