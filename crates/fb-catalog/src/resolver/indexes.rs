//! Index resolution.
//!
//! Indexes are assembled in two phases: every header row is read and the
//! header cursor released, then the segments of each index are fetched one
//! index at a time. Records are only returned once all of them are complete.

use tracing::{debug, warn};

use crate::core::identifier::trim_padding;
use crate::core::traits::drain_rows;
use crate::core::{CatalogConnection, CatalogRow, CatalogValue, Index};
use crate::error::{CatalogError, Result};

pub(crate) const INDEX_HEADERS_SQL: &str = r#"
SELECT RDB$INDICES.RDB$RELATION_NAME, RDB$INDICES.RDB$INDEX_NAME, RDB$INDICES.RDB$UNIQUE_FLAG, RDB$INDICES.RDB$INDEX_TYPE
FROM RDB$INDICES
JOIN RDB$RELATIONS ON RDB$INDICES.RDB$RELATION_NAME = RDB$RELATIONS.RDB$RELATION_NAME
WHERE (RDB$RELATIONS.RDB$SYSTEM_FLAG <> 1 OR RDB$RELATIONS.RDB$SYSTEM_FLAG IS NULL)
"#;

pub(crate) const TABLE_INDEX_HEADERS_SQL: &str = r#"
SELECT RDB$INDICES.RDB$RELATION_NAME, RDB$INDICES.RDB$INDEX_NAME, RDB$INDICES.RDB$UNIQUE_FLAG, RDB$INDICES.RDB$INDEX_TYPE
FROM RDB$INDICES
JOIN RDB$RELATIONS ON RDB$INDICES.RDB$RELATION_NAME = RDB$RELATIONS.RDB$RELATION_NAME
WHERE (RDB$RELATIONS.RDB$SYSTEM_FLAG <> 1 OR RDB$RELATIONS.RDB$SYSTEM_FLAG IS NULL)
AND RDB$INDICES.RDB$RELATION_NAME = ?
"#;

pub(crate) const INDEX_SEGMENTS_SQL: &str = r#"
SELECT RDB$FIELD_NAME
FROM RDB$INDEX_SEGMENTS
WHERE RDB$INDEX_SEGMENTS.RDB$INDEX_NAME = ?
ORDER BY RDB$INDEX_SEGMENTS.RDB$FIELD_POSITION
"#;

/// An index header before its segments are attached.
struct IndexHeader {
    table_name: String,
    name: String,
    unique: Option<bool>,
    descending: Option<bool>,
}

/// Load every index on every user table.
pub async fn resolve_all(conn: &dyn CatalogConnection) -> Result<Vec<Index>> {
    let cursor = conn.query(INDEX_HEADERS_SQL, &[]).await?;
    let headers = drain_rows(cursor, header_from_row).await?;

    let indexes = attach_segments(conn, headers).await?;
    debug!("Loaded {} indexes", indexes.len());
    Ok(indexes)
}

/// Load the indexes defined on `table`.
pub async fn resolve_for_table(conn: &dyn CatalogConnection, table: &str) -> Result<Vec<Index>> {
    let cursor = conn
        .query(TABLE_INDEX_HEADERS_SQL, &[CatalogValue::from(table)])
        .await?;
    let headers = drain_rows(cursor, header_from_row).await?;

    let indexes = attach_segments(conn, headers).await?;
    debug!("Loaded {} indexes for {}", indexes.len(), table);
    Ok(indexes)
}

/// Ordered column names of the index `index_name`.
///
/// An unknown index yields an empty list.
pub async fn index_column_names(
    conn: &dyn CatalogConnection,
    index_name: &str,
) -> Result<Vec<String>> {
    let cursor = conn
        .query(INDEX_SEGMENTS_SQL, &[CatalogValue::from(index_name)])
        .await?;
    drain_rows(cursor, |row| Ok(trim_padding(&row.text(0)?).to_string())).await
}

async fn attach_segments(
    conn: &dyn CatalogConnection,
    headers: Vec<IndexHeader>,
) -> Result<Vec<Index>> {
    let mut indexes = Vec::with_capacity(headers.len());
    for header in headers {
        let columns = index_column_names(conn, &header.name).await?;
        if columns.is_empty() {
            warn!(
                "Index {} on {} has no segments",
                header.name, header.table_name
            );
            return Err(CatalogError::DataConsistency(format!(
                "index {} on table {} has no segments",
                header.name, header.table_name
            )));
        }
        indexes.push(Index {
            name: header.name,
            table_name: header.table_name,
            unique: header.unique,
            descending: header.descending,
            columns,
        });
    }
    Ok(indexes)
}

fn header_from_row(row: CatalogRow) -> Result<IndexHeader> {
    Ok(IndexHeader {
        table_name: trim_padding(&row.text(0)?).to_string(),
        name: trim_padding(&row.text(1)?).to_string(),
        unique: row.optional_int(2)?.map(|flag| flag == 1),
        descending: row.optional_int(3)?.map(|kind| kind == 1),
    })
}
