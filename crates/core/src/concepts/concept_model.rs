//! Concept model: shared metadata plus a plain-or-axis payload.

use oblib_taxonomy::{ConceptDetails, PeriodType};

use crate::utils::name_utils::qualify;
use crate::validation::ValueType;

/// Plain concept or axis (dimension).
#[derive(Debug, Clone, PartialEq)]
pub enum ConceptKind {
    Plain,
    /// `members` empty means the axis accepts any value.
    Axis {
        domain: Option<String>,
        members: Vec<String>,
    },
}

/// A concept as seen by a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Concept {
    details: ConceptDetails,
    value_type: ValueType,
    kind: ConceptKind,
    parent: Option<String>,
    children: Vec<String>,
}

impl Concept {
    pub fn plain(details: ConceptDetails, value_type: ValueType) -> Self {
        Self {
            details,
            value_type,
            kind: ConceptKind::Plain,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn axis(
        details: ConceptDetails,
        value_type: ValueType,
        domain: Option<String>,
        members: Vec<String>,
    ) -> Self {
        Self {
            details,
            value_type,
            kind: ConceptKind::Axis { domain, members },
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn details(&self) -> &ConceptDetails {
        &self.details
    }

    pub fn is_abstract(&self) -> bool {
        self.details.is_abstract
    }

    pub fn nillable(&self) -> bool {
        self.details.nillable
    }

    pub fn period_type(&self) -> PeriodType {
        self.details.period_type
    }

    pub fn type_name(&self) -> &str {
        &self.details.type_name
    }

    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    pub fn kind(&self) -> &ConceptKind {
        &self.kind
    }

    pub fn is_axis(&self) -> bool {
        matches!(self.kind, ConceptKind::Axis { .. })
    }

    pub fn domain(&self) -> Option<&str> {
        match &self.kind {
            ConceptKind::Axis { domain, .. } => domain.as_deref(),
            ConceptKind::Plain => None,
        }
    }

    pub fn members(&self) -> &[String] {
        match &self.kind {
            ConceptKind::Axis { members, .. } => members,
            ConceptKind::Plain => &[],
        }
    }

    /// Axis restricted to an enumerated member list.
    pub fn has_closed_domain(&self) -> bool {
        !self.members().is_empty()
    }

    /// Axis that every context of its table must supply.
    pub fn is_required_axis(&self) -> bool {
        self.domain().is_some()
    }

    /// Whether `value` is acceptable for this axis.
    pub fn accepts_axis_value(&self, value: &str) -> bool {
        !self.has_closed_domain() || self.canonical_member(value).is_some()
    }

    /// The declared domain member `value` names, written with or without the
    /// default prefix.
    pub fn canonical_member(&self, value: &str) -> Option<&str> {
        let qualified = qualify(value);
        self.members()
            .iter()
            .find(|member| member.as_str() == value || **member == qualified)
            .map(String::as_str)
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn children(&self) -> &[String] {
        &self.children
    }

    pub(crate) fn set_parent(&mut self, parent: String) {
        self.parent = Some(parent);
    }

    pub(crate) fn add_child(&mut self, child: String) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    pub(crate) fn set_axis_domain(&mut self, domain: Option<String>, members: Vec<String>) {
        if self.is_axis() {
            self.kind = ConceptKind::Axis { domain, members };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oblib_taxonomy::SubstitutionGroup;

    fn axis_details(name: &str) -> ConceptDetails {
        let mut details = ConceptDetails::new(name, "xbrli:stringItemType", PeriodType::Duration);
        details.substitution_group = SubstitutionGroup::Dimension;
        details.is_abstract = true;
        details
    }

    #[test]
    fn test_open_axis_accepts_anything() {
        let axis = Concept::axis(
            axis_details("solar:ProductIdentifierAxis"),
            ValueType::String,
            Some("solar:ProductIdentifierDomain".to_string()),
            Vec::new(),
        );
        assert!(axis.is_required_axis());
        assert!(!axis.has_closed_domain());
        assert!(axis.accepts_axis_value("anything"));
    }

    #[test]
    fn test_closed_axis_accepts_members_only() {
        let axis = Concept::axis(
            axis_details("solar:InverterPowerLevelPercentAxis"),
            ValueType::String,
            Some("solar:InverterPowerLevelPercentDomain".to_string()),
            vec!["solar:InverterPowerLevel50PercentMember".to_string()],
        );
        assert!(axis.accepts_axis_value("solar:InverterPowerLevel50PercentMember"));
        assert!(axis.accepts_axis_value("InverterPowerLevel50PercentMember"));
        assert!(!axis.accepts_axis_value("solar:InverterPowerLevel75PercentMember"));

        assert_eq!(
            axis.canonical_member("InverterPowerLevel50PercentMember"),
            Some("solar:InverterPowerLevel50PercentMember")
        );
        assert_eq!(axis.canonical_member("InverterPowerLevel75PercentMember"), None);
    }

    #[test]
    fn test_axis_without_domain_is_optional() {
        let axis = Concept::axis(
            axis_details("solar:TestConditionAxis"),
            ValueType::String,
            None,
            Vec::new(),
        );
        assert!(!axis.is_required_axis());
    }

    #[test]
    fn test_plain_concept_has_no_domain() {
        let concept = Concept::plain(
            ConceptDetails::new("solar:DeviceCost", "xbrli:monetaryItemType", PeriodType::Instant),
            ValueType::Monetary,
        );
        assert!(!concept.is_axis());
        assert!(concept.domain().is_none());
        assert!(concept.members().is_empty());
    }
}
