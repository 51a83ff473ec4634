//! Column metadata resolution.
//!
//! A column's type lives in its domain (`RDB$FIELDS`), while its default and
//! null flag may be declared either on the column itself
//! (`RDB$RELATION_FIELDS`) or on the domain. The column-level value wins;
//! the query resolves that precedence with one `COALESCE` per field.

use tracing::debug;

use crate::core::identifier::{is_system_name, trim_padding};
use crate::core::traits::drain_rows;
use crate::core::{CatalogConnection, CatalogRow, CatalogValue, Column};
use crate::error::Result;
use crate::typemap;

pub(crate) const COLUMNS_SQL: &str = r#"
SELECT r.rdb$field_name, r.rdb$field_source, f.rdb$field_type, f.rdb$field_sub_type,
    f.rdb$field_length, f.rdb$field_precision, f.rdb$field_scale,
    COALESCE(r.rdb$default_source, f.rdb$default_source) rdb$default_source,
    COALESCE(r.rdb$null_flag, f.rdb$null_flag) rdb$null_flag
FROM rdb$relation_fields r
JOIN rdb$fields f ON r.rdb$field_source = f.rdb$field_name
WHERE r.rdb$relation_name = ?
ORDER BY r.rdb$field_position
"#;

/// Load the columns of `table` in declaration order.
///
/// An unknown table yields an empty list.
pub async fn resolve(conn: &dyn CatalogConnection, table: &str) -> Result<Vec<Column>> {
    let cursor = conn
        .query(COLUMNS_SQL, &[CatalogValue::from(table)])
        .await?;
    let columns = drain_rows(cursor, column_from_row).await?;

    debug!("Loaded {} columns for {}", columns.len(), table);
    Ok(columns)
}

/// Load only the column names of `table`, in declaration order.
pub async fn column_names(conn: &dyn CatalogConnection, table: &str) -> Result<Vec<String>> {
    let columns = resolve(conn, table).await?;
    Ok(columns.into_iter().map(|c| c.name).collect())
}

fn column_from_row(row: CatalogRow) -> Result<Column> {
    let name = trim_padding(&row.text(0)?).to_string();

    let source = row.text(1)?;
    let source = trim_padding(&source);
    let domain = if is_system_name(source) {
        String::new()
    } else {
        source.to_string()
    };

    let type_code = row.small_int(2)?;
    let sql_subtype = row.optional_small_int(3)?;
    let sql_type = typemap::decode(type_code, sql_subtype.unwrap_or(0));

    Ok(Column {
        name,
        domain,
        sql_type,
        sql_subtype,
        type_code,
        length: row.small_int(4)?,
        precision: row.optional_small_int(5)?,
        scale: row.optional_small_int(6)?.unwrap_or(0),
        default: row.optional_text(7)?.map(|s| strip_default_keyword(&s)),
        nullable: row.optional_int(8)?.map(|flag| flag != 1),
    })
}

/// Strip the `DEFAULT` keyword the catalog stores in front of the
/// expression, along with the whitespace around it.
fn strip_default_keyword(source: &str) -> String {
    const KEYWORD: &str = "DEFAULT";

    let s = source.trim_start();
    let rest = match s.get(..KEYWORD.len()) {
        Some(head) if head.eq_ignore_ascii_case(KEYWORD) => &s[KEYWORD.len()..],
        _ => return s.to_string(),
    };
    match rest.chars().next() {
        None => String::new(),
        Some(c) if c.is_whitespace() => rest.trim_start().to_string(),
        // DEFAULTS, DEFAULT_VALUE, ...: an identifier, not the keyword
        Some(_) => s.to_string(),
    }
}
