//! Catalog composition root.
//!
//! [`Catalog`] owns a connection handle and exposes every introspection
//! operation as an async method. Each call is a fresh read; nothing is
//! cached between calls.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::core::{CatalogConnection, Column, Index, TableSchema};
use crate::error::Result;
use crate::resolver::{columns, indexes, names, primary_key, script, sequences};

/// Read-only view of a database's system catalog.
///
/// # Example
///
/// ```rust,ignore
/// let catalog = Catalog::new(conn);
/// for table in catalog.table_names().await? {
///     let schema = catalog.describe_table(&table).await?;
///     println!("{}: {} columns", schema.name, schema.columns.len());
/// }
/// ```
#[derive(Clone)]
pub struct Catalog {
    conn: Arc<dyn CatalogConnection>,
}

impl Catalog {
    /// Create a catalog over an established connection.
    pub fn new(conn: Arc<dyn CatalogConnection>) -> Self {
        Self { conn }
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Arc<dyn CatalogConnection> {
        &self.conn
    }

    /// Column metadata of `table` in declaration order.
    pub async fn columns(&self, table: &str) -> Result<Vec<Column>> {
        columns::resolve(self.conn.as_ref(), table).await
    }

    /// Column names of `table` in declaration order.
    pub async fn column_names(&self, table: &str) -> Result<Vec<String>> {
        columns::column_names(self.conn.as_ref(), table).await
    }

    /// Every index on every user table.
    pub async fn indexes(&self) -> Result<Vec<Index>> {
        indexes::resolve_all(self.conn.as_ref()).await
    }

    /// Indexes defined on `table`.
    pub async fn indexes_on_table(&self, table: &str) -> Result<Vec<Index>> {
        indexes::resolve_for_table(self.conn.as_ref(), table).await
    }

    /// Ordered column names of one index.
    pub async fn index_column_names(&self, index_name: &str) -> Result<Vec<String>> {
        indexes::index_column_names(self.conn.as_ref(), index_name).await
    }

    /// Primary key columns of `table`; empty when it has none.
    pub async fn primary_key(&self, table: &str) -> Result<Vec<String>> {
        primary_key::resolve(self.conn.as_ref(), table).await
    }

    pub async fn table_names(&self) -> Result<Vec<String>> {
        names::table_names(self.conn.as_ref()).await
    }

    pub async fn view_names(&self) -> Result<Vec<String>> {
        names::view_names(self.conn.as_ref()).await
    }

    pub async fn procedure_names(&self) -> Result<Vec<String>> {
        names::procedure_names(self.conn.as_ref()).await
    }

    pub async fn role_names(&self) -> Result<Vec<String>> {
        names::role_names(self.conn.as_ref()).await
    }

    pub async fn trigger_names(&self) -> Result<Vec<String>> {
        names::trigger_names(self.conn.as_ref()).await
    }

    pub async fn sequence_names(&self) -> Result<Vec<String>> {
        names::sequence_names(self.conn.as_ref()).await
    }

    /// Advance a sequence and return its new value.
    pub async fn next_sequence_value(&self, name: &str) -> Result<i64> {
        sequences::next_value(self.conn.as_ref(), name).await
    }

    /// Execute a `;`-separated script, statement by statement.
    ///
    /// See [`script::split_statements`] for the splitting rules.
    pub async fn exec_script(&self, script: &str) -> Result<usize> {
        script::exec_script(self.conn.as_ref(), script).await
    }

    /// Columns, primary key and indexes of one table.
    ///
    /// An unknown table yields an empty description.
    #[instrument(level = "debug", skip(self))]
    pub async fn describe_table(&self, table: &str) -> Result<TableSchema> {
        let columns = self.columns(table).await?;
        let primary_key = self.primary_key(table).await?;
        let indexes = self.indexes_on_table(table).await?;

        debug!(
            "Described {}: {} columns, {} pk columns, {} indexes",
            table,
            columns.len(),
            primary_key.len(),
            indexes.len()
        );

        Ok(TableSchema {
            name: table.to_string(),
            columns,
            primary_key,
            indexes,
        })
    }
}
