//! Taxonomy models
//!
//! - `concept` - Concept metadata (ConceptDetails, PeriodType, SubstitutionGroup)
//! - `relationship` - Arcs between concepts (Relationship, RelationshipRole)
//! - `unit` - Unit registry entries (Unit)
//! - `entrypoint` - Concept subset and arcs of one entrypoint (EntrypointDefinition)

mod concept;
mod entrypoint;
mod relationship;
mod unit;

pub use concept::{ConceptDetails, PeriodType, SubstitutionGroup};
pub use entrypoint::EntrypointDefinition;
pub use relationship::{Relationship, RelationshipRole};
pub use unit::Unit;
