//! Object name listings.
//!
//! Every listing returns trimmed names ordered by name.

use tracing::debug;

use crate::core::identifier::trim_padding;
use crate::core::traits::drain_rows;
use crate::core::CatalogConnection;
use crate::error::Result;

pub(crate) const TABLE_NAMES_SQL: &str = r#"
SELECT RDB$RELATION_NAME
FROM RDB$RELATIONS
WHERE (RDB$SYSTEM_FLAG <> 1 OR RDB$SYSTEM_FLAG IS NULL) AND RDB$VIEW_BLR IS NULL
ORDER BY RDB$RELATION_NAME
"#;

pub(crate) const VIEW_NAMES_SQL: &str = r#"
SELECT RDB$RELATION_NAME
FROM RDB$RELATIONS
WHERE (RDB$SYSTEM_FLAG <> 1 OR RDB$SYSTEM_FLAG IS NULL) AND NOT RDB$VIEW_BLR IS NULL AND RDB$FLAGS = 1
ORDER BY RDB$RELATION_NAME
"#;

pub(crate) const PROCEDURE_NAMES_SQL: &str = r#"
SELECT RDB$PROCEDURE_NAME
FROM RDB$PROCEDURES
ORDER BY RDB$PROCEDURE_NAME
"#;

pub(crate) const ROLE_NAMES_SQL: &str = r#"
SELECT RDB$ROLE_NAME
FROM RDB$ROLES
WHERE RDB$SYSTEM_FLAG = 0
ORDER BY RDB$ROLE_NAME
"#;

pub(crate) const TRIGGER_NAMES_SQL: &str = r#"
SELECT RDB$TRIGGER_NAME
FROM RDB$TRIGGERS
WHERE RDB$SYSTEM_FLAG = 0
ORDER BY RDB$TRIGGER_NAME
"#;

pub(crate) const SEQUENCE_NAMES_SQL: &str = r#"
SELECT RDB$GENERATOR_NAME
FROM RDB$GENERATORS
WHERE (RDB$SYSTEM_FLAG IS NULL OR RDB$SYSTEM_FLAG <> 1)
ORDER BY RDB$GENERATOR_NAME
"#;

/// User tables (views excluded).
pub async fn table_names(conn: &dyn CatalogConnection) -> Result<Vec<String>> {
    query_names(conn, TABLE_NAMES_SQL, "tables").await
}

/// User views.
pub async fn view_names(conn: &dyn CatalogConnection) -> Result<Vec<String>> {
    query_names(conn, VIEW_NAMES_SQL, "views").await
}

/// Stored procedures.
pub async fn procedure_names(conn: &dyn CatalogConnection) -> Result<Vec<String>> {
    query_names(conn, PROCEDURE_NAMES_SQL, "procedures").await
}

/// User-defined roles.
pub async fn role_names(conn: &dyn CatalogConnection) -> Result<Vec<String>> {
    query_names(conn, ROLE_NAMES_SQL, "roles").await
}

/// User-defined triggers.
pub async fn trigger_names(conn: &dyn CatalogConnection) -> Result<Vec<String>> {
    query_names(conn, TRIGGER_NAMES_SQL, "triggers").await
}

/// User sequences (generators).
pub async fn sequence_names(conn: &dyn CatalogConnection) -> Result<Vec<String>> {
    query_names(conn, SEQUENCE_NAMES_SQL, "sequences").await
}

async fn query_names(conn: &dyn CatalogConnection, sql: &str, kind: &str) -> Result<Vec<String>> {
    let cursor = conn.query(sql, &[]).await?;
    let names = drain_rows(cursor, |row| Ok(trim_padding(&row.text(0)?).to_string())).await?;

    debug!("Loaded {} {}", names.len(), kind);
    Ok(names)
}
