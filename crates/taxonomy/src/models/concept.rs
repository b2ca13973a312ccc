use serde::{Deserialize, Serialize};

/// Period kind a concept's facts must be reported for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Instant,
    Duration,
}

impl PeriodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::Instant => "instant",
            PeriodType::Duration => "duration",
        }
    }
}

/// Substitution group of a concept.
///
/// Only `Dimension` changes how a document treats the concept (it becomes an
/// axis); hypercubes are recognized through their relationships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SubstitutionGroup {
    #[default]
    #[serde(alias = "xbrli:item")]
    Item,
    #[serde(alias = "xbrldt:dimensionItem", alias = "dimensionItem")]
    Dimension,
    #[serde(alias = "xbrldt:hypercubeItem", alias = "hypercubeItem")]
    Hypercube,
}

/// Metadata the taxonomy declares for a single concept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptDetails {
    /// Prefixed name, e.g. `solar:DeviceCost`
    pub name: String,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub nillable: bool,
    pub period_type: PeriodType,
    /// Declared item type, e.g. `xbrli:monetaryItemType`
    pub type_name: String,
    #[serde(default)]
    pub substitution_group: SubstitutionGroup,
    /// Typed-dimension domain reference, e.g. `#solar_ProductIdentifierDomain`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typed_domain_ref: Option<String>,
}

impl ConceptDetails {
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        period_type: PeriodType,
    ) -> Self {
        Self {
            name: name.into(),
            is_abstract: false,
            nillable: false,
            period_type,
            type_name: type_name.into(),
            substitution_group: SubstitutionGroup::Item,
            typed_domain_ref: None,
        }
    }

    pub fn is_dimension(&self) -> bool {
        self.substitution_group == SubstitutionGroup::Dimension
    }

    /// The typed domain as a prefixed concept name.
    ///
    /// `#solar_ProductIdentifierDomain` becomes `solar:ProductIdentifierDomain`.
    pub fn typed_domain_name(&self) -> Option<String> {
        let reference = self.typed_domain_ref.as_deref()?;
        let fragment = reference.rsplit('#').next().unwrap_or(reference);
        if fragment.is_empty() {
            return None;
        }
        Some(match fragment.split_once('_') {
            Some((prefix, local)) if !prefix.is_empty() && !local.is_empty() => {
                format!("{}:{}", prefix, local)
            }
            _ => fragment.to_string(),
        })
    }
}
