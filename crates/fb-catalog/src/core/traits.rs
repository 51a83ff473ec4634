//! The connection capability the catalog core is written against.
//!
//! - [`CatalogConnection`]: parameterized queries, single-scalar queries and
//!   plain statement execution
//! - [`RowCursor`]: a server-side result cursor, iterated row by row
//!
//! The core never opens connections itself. Drivers implement these traits
//! and hand an `Arc<dyn CatalogConnection>` to [`Catalog`](crate::Catalog).

use async_trait::async_trait;
use tracing::warn;

use crate::error::Result;

use super::value::{CatalogRow, CatalogValue};

/// A connection able to run catalog queries.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. The core issues every query of one
/// resolver call sequentially and expects no other statement to be run on
/// the same connection until that call returns.
///
/// # Errors
///
/// Transport failures should be reported as
/// [`CatalogError::Connection`](crate::CatalogError::Connection); rejected
/// statements as [`CatalogError::Query`](crate::CatalogError::Query). The
/// core propagates both unchanged.
#[async_trait]
pub trait CatalogConnection: Send + Sync {
    /// Run a parameterized query and return a cursor over its rows.
    async fn query(&self, sql: &str, params: &[CatalogValue]) -> Result<Box<dyn RowCursor>>;

    /// Run a parameterized query expected to return exactly one row with one
    /// column.
    async fn query_scalar(&self, sql: &str, params: &[CatalogValue]) -> Result<CatalogValue>;

    /// Execute a statement that returns no rows. Returns the affected row
    /// count where the driver reports one.
    async fn execute(&self, sql: &str) -> Result<u64>;
}

/// An open result cursor.
///
/// Cursors hold server-side resources; callers must call [`close`] once
/// they are done, whether or not iteration succeeded.
///
/// [`close`]: RowCursor::close
#[async_trait]
pub trait RowCursor: Send {
    /// Fetch the next row, or `None` once the result set is exhausted.
    async fn next_row(&mut self) -> Result<Option<CatalogRow>>;

    /// Release the cursor. Must be safe to call after exhaustion.
    async fn close(&mut self) -> Result<()>;
}

/// Drain a cursor, decoding every row, and release it on every exit path.
///
/// A decode or fetch error closes the cursor before the error is returned;
/// a close failure on that path is logged and the original error wins.
pub(crate) async fn drain_rows<T, F>(mut cursor: Box<dyn RowCursor>, mut decode: F) -> Result<Vec<T>>
where
    T: Send,
    F: FnMut(CatalogRow) -> Result<T> + Send,
{
    let mut out = Vec::new();
    loop {
        let step = match cursor.next_row().await {
            Ok(Some(row)) => decode(row).map(Some),
            Ok(None) => Ok(None),
            Err(e) => Err(e),
        };
        match step {
            Ok(Some(item)) => out.push(item),
            Ok(None) => break,
            Err(e) => {
                if let Err(close_err) = cursor.close().await {
                    warn!("Failed to close catalog cursor after error: {}", close_err);
                }
                return Err(e);
            }
        }
    }
    cursor.close().await?;
    Ok(out)
}
