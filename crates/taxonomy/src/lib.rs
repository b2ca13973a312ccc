//! Taxonomy catalog for fact documents.
//!
//! This crate holds the read-only side of a reporting taxonomy: concept
//! metadata, the concept names and relationships allowed by each entrypoint,
//! the unit registry and the enumerated-type member lists.
//!
//! Consumers depend only on the [`TaxonomyCatalog`] trait. [`MemoryCatalog`]
//! is the bundled implementation, built in code or loaded from a JSON catalog
//! file.
//!
//! # Core Types
//!
//! - [`ConceptDetails`] - Metadata for one named concept
//! - [`Relationship`] - A `from → to` arc with its role and order
//! - [`Unit`] - Unit registry entry (currency or physical measure)
//! - [`TaxonomyCatalog`] - Query interface consumed by documents

pub mod catalog;
pub mod errors;
pub mod models;

pub use catalog::{CatalogBuilder, MemoryCatalog, TaxonomyCatalog};
pub use errors::{CatalogError, Result};
pub use models::{
    ConceptDetails, EntrypointDefinition, PeriodType, Relationship, RelationshipRole,
    SubstitutionGroup, Unit,
};
