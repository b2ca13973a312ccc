//! Catalog query interface and the in-memory implementation.

mod memory;
mod traits;

pub use memory::{CatalogBuilder, MemoryCatalog};
pub use traits::TaxonomyCatalog;
