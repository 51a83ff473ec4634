//! Catalog resolvers.
//!
//! Each resolver issues its queries sequentially against a borrowed
//! [`CatalogConnection`](crate::core::CatalogConnection), drains every cursor
//! it opens and returns fully-built records. Nothing is cached between calls.
//!
//! - [`columns`]: field and domain metadata of one table
//! - [`indexes`]: index headers and their ordered segments
//! - [`primary_key`]: columns of a table's PRIMARY KEY
//! - [`names`]: plain object name listings
//! - [`sequences`]: sequence stepping
//! - [`script`]: naive multi-statement execution

pub mod columns;
pub mod indexes;
pub mod names;
pub mod primary_key;
pub mod script;
pub mod sequences;
