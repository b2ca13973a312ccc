use serde::{Deserialize, Serialize};

/// Arc role of a definition relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipRole {
    /// Parent → child within a domain or line-item tree
    DomainMember,
    /// Table → axis
    HypercubeDimension,
    /// Line items → table
    All,
    /// Axis → domain
    DimensionDomain,
}

/// A directed arc between two concepts of one entrypoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub role: RelationshipRole,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub order: f64,
}

impl Relationship {
    pub fn new(
        role: RelationshipRole,
        from: impl Into<String>,
        to: impl Into<String>,
        order: f64,
    ) -> Self {
        Self {
            role,
            from: from.into(),
            to: to.into(),
            order,
        }
    }
}
