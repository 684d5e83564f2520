//! Catalog abstraction over site, template and page records.
//!
//! The build pipeline never owns persistence: it reads records through the
//! [`Catalog`] trait and performs exactly one conditional write, claiming a
//! site's unique class prefix. [`MemoryCatalog`] is the in-memory backend
//! used by tests and by the CLI's bundle loader.

mod catalog;
mod memory;

pub use catalog::{Catalog, CatalogError, CatalogErrorKind};
pub use memory::MemoryCatalog;
