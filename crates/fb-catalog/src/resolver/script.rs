//! Multi-statement script execution.
//!
//! Statements are split on `;` with no awareness of string literals,
//! comments or `SET TERM`. Procedural bodies must be executed one statement
//! at a time.

use tracing::{debug, info};

use crate::core::CatalogConnection;
use crate::error::Result;

/// Split `script` into its non-blank statements.
pub fn split_statements(script: &str) -> Vec<&str> {
    script
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Execute each statement of `script` in order, stopping at the first
/// failure. Returns the number of statements executed.
pub async fn exec_script(conn: &dyn CatalogConnection, script: &str) -> Result<usize> {
    let statements = split_statements(script);
    for (i, statement) in statements.iter().enumerate() {
        debug!("Executing statement {}/{}", i + 1, statements.len());
        conn.execute(statement).await?;
    }

    info!("Executed {} statements", statements.len());
    Ok(statements.len())
}
