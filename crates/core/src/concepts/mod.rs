//! Concepts of one entrypoint and the parent/child tree between them.

mod concept_graph;
mod concept_model;

pub use concept_graph::ConceptGraph;
pub use concept_model::{Concept, ConceptKind};
