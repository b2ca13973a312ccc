//! oblib Core - dimensional fact documents governed by a solar taxonomy.
//!
//! A [`Document`] is opened for one taxonomy entrypoint. Facts are written
//! against concepts, inside contexts that the entrypoint's tables constrain,
//! and are validated against each concept's datatype and unit rules. The
//! [`DocumentCodec`] reads and writes documents as XBRL XML or xBRL-JSON and
//! infers the entrypoint of an input document from its facts.
//!
//! Taxonomy metadata comes from any `oblib_taxonomy::TaxonomyCatalog`.

pub mod codec;
pub mod concepts;
pub mod constants;
pub mod context;
pub mod document;
pub mod errors;
pub mod tables;
pub mod utils;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use codec::{infer_entrypoint, DocumentCodec, FileFormat};
pub use concepts::{Concept, ConceptGraph, ConceptKind};
pub use context::{Context, ContextBuilder, Duration, Period};
pub use document::{Accuracy, Document, DocumentConfig, Fact, FactOptions, FactValue};
pub use tables::{Table, TableRegistry};
pub use validation::{UnitRequirement, ValueType, ValueValidator};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
pub use errors::{FactIssue, NotFoundError, ValidationErrors};
