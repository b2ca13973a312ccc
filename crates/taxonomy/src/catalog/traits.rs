//! Query interface consumed by documents and codecs.

use crate::models::{ConceptDetails, Relationship, Unit};

/// Read-only view of a taxonomy.
///
/// A catalog is built once and shared by any number of documents, so every
/// method takes `&self` and implementations must be `Send + Sync`.
pub trait TaxonomyCatalog: Send + Sync {
    fn has_entrypoint(&self, name: &str) -> bool;

    /// All entrypoint names, sorted.
    fn entrypoint_names(&self) -> Vec<String>;

    /// Concept names allowed in an entrypoint, `None` for unknown entrypoints.
    fn entrypoint_concepts(&self, entrypoint: &str) -> Option<&[String]>;

    /// Definition arcs of an entrypoint, `None` for unknown entrypoints.
    fn entrypoint_relationships(&self, entrypoint: &str) -> Option<&[Relationship]>;

    fn concept_details(&self, name: &str) -> Option<&ConceptDetails>;

    /// Looks a unit up by id first, then by name.
    fn unit(&self, id_or_name: &str) -> Option<&Unit>;

    /// Allowed values of an enumerated item type.
    fn enumerated_values(&self, type_name: &str) -> Option<&[String]>;

    /// Concept names of an entrypoint paired with their metadata.
    ///
    /// Names without catalog metadata are left out.
    fn entrypoint_concept_details(&self, entrypoint: &str) -> Vec<&ConceptDetails> {
        self.entrypoint_concepts(entrypoint)
            .unwrap_or_default()
            .iter()
            .filter_map(|name| self.concept_details(name))
            .collect()
    }
}
