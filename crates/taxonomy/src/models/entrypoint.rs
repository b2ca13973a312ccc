use serde::{Deserialize, Serialize};

use super::Relationship;

/// Concept subset and definition arcs of one entrypoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrypointDefinition {
    #[serde(default)]
    pub concepts: Vec<String>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}
