//! Core abstractions for catalog introspection.
//!
//! - [`schema`]: Column, index and table records
//! - [`value`]: Catalog values and positional rows
//! - [`traits`]: The connection capability the resolvers run against
//! - [`identifier`]: Padding, system-name and quoting rules for identifiers

pub mod identifier;
pub mod schema;
pub mod traits;
pub mod value;

pub use schema::{Column, Index, TableSchema};
pub use traits::{CatalogConnection, RowCursor};
pub use value::{CatalogRow, CatalogValue};
