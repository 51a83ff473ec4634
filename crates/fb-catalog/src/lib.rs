//! # fb-catalog
//!
//! Read-only introspection of a Firebird database's system catalog.
//!
//! This library reads the `RDB$` system tables through a caller-supplied
//! connection and returns portable metadata records:
//!
//! - **Columns** with decoded SQL types, reconciling column-level and
//!   domain-level defaults and null flags
//! - **Indexes** with their ordered segments
//! - **Primary keys**, table/view/procedure/role/trigger/sequence names
//! - **Type decoding** of the engine's internal `(type, subtype)` codes
//!
//! The crate ships no driver. Implement [`CatalogConnection`] over the
//! transport of your choice and hand it to [`Catalog`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fb_catalog::Catalog;
//!
//! let catalog = Catalog::new(Arc::new(my_connection));
//! for column in catalog.columns("EMPLOYEE").await? {
//!     println!("{} {}", column.name, column.sql_type);
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod core;
pub mod error;
pub mod resolver;
pub mod typemap;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenient access
pub use crate::catalog::Catalog;
pub use crate::config::{Config, ConnectionConfig};
pub use crate::core::{
    CatalogConnection, CatalogRow, CatalogValue, Column, Index, RowCursor, TableSchema,
};
pub use crate::error::{CatalogError, Result};
pub use crate::typemap::decode;
