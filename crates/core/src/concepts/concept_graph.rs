//! Per-entrypoint projection of the catalog into concepts and their tree.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use log::{debug, warn};
use oblib_taxonomy::{Relationship, RelationshipRole, TaxonomyCatalog};

use super::Concept;
use crate::errors::{NotFoundError, Result};
use crate::utils::name_utils::is_duplicate_name;
use crate::validation::ValueType;

/// Concepts allowed by one entrypoint, keyed by prefixed name.
#[derive(Debug, Clone)]
pub struct ConceptGraph {
    entrypoint: String,
    concepts: BTreeMap<String, Concept>,
}

impl ConceptGraph {
    pub fn build(catalog: &dyn TaxonomyCatalog, entrypoint: &str) -> Result<Self> {
        let names = catalog
            .entrypoint_concepts(entrypoint)
            .ok_or_else(|| NotFoundError::Entrypoint(entrypoint.to_string()))?;
        let relationships = catalog
            .entrypoint_relationships(entrypoint)
            .unwrap_or_default();

        let mut concepts = BTreeMap::new();
        for name in names {
            if is_duplicate_name(name) {
                continue;
            }
            let Some(details) = catalog.concept_details(name) else {
                warn!("Concept '{}' of entrypoint '{}' has no metadata", name, entrypoint);
                continue;
            };
            let value_type = ValueType::resolve(&details.type_name, catalog);
            let concept = if details.is_dimension() {
                Concept::axis(details.clone(), value_type, None, Vec::new())
            } else {
                Concept::plain(details.clone(), value_type)
            };
            concepts.insert(name.clone(), concept);
        }

        let mut graph = Self {
            entrypoint: entrypoint.to_string(),
            concepts,
        };
        graph.link_parents(relationships);
        graph.resolve_axis_domains(relationships);

        debug!(
            "Concept graph for '{}': {} concepts, {} axes",
            entrypoint,
            graph.concepts.len(),
            graph.concepts.values().filter(|c| c.is_axis()).count()
        );
        Ok(graph)
    }

    fn link_parents(&mut self, relationships: &[Relationship]) {
        for rel in sorted_by_order(relationships, RelationshipRole::DomainMember) {
            if is_duplicate_name(&rel.from) || is_duplicate_name(&rel.to) {
                continue;
            }
            if !self.concepts.contains_key(&rel.from) || !self.concepts.contains_key(&rel.to) {
                continue;
            }
            let Some(child) = self.concepts.get_mut(&rel.to) else {
                continue;
            };
            match child.parent() {
                None => child.set_parent(rel.from.clone()),
                Some(existing) if existing == rel.from => {}
                Some(existing) => {
                    warn!(
                        "Concept '{}' already has parent '{}', ignoring '{}'",
                        rel.to, existing, rel.from
                    );
                    continue;
                }
            }
            if let Some(parent) = self.concepts.get_mut(&rel.from) {
                parent.add_child(rel.to.clone());
            }
        }
    }

    fn resolve_axis_domains(&mut self, relationships: &[Relationship]) {
        let domain_of: HashMap<&str, &str> = relationships
            .iter()
            .filter(|rel| rel.role == RelationshipRole::DimensionDomain)
            .filter(|rel| !is_duplicate_name(&rel.from) && !is_duplicate_name(&rel.to))
            .map(|rel| (rel.from.as_str(), rel.to.as_str()))
            .collect();

        let mut members_of: HashMap<&str, Vec<&str>> = HashMap::new();
        for rel in sorted_by_order(relationships, RelationshipRole::DomainMember) {
            if is_duplicate_name(&rel.from) || is_duplicate_name(&rel.to) {
                continue;
            }
            members_of
                .entry(rel.from.as_str())
                .or_default()
                .push(rel.to.as_str());
        }

        for concept in self.concepts.values_mut().filter(|c| c.is_axis()) {
            let domain = domain_of
                .get(concept.name())
                .map(|domain| domain.to_string())
                .or_else(|| concept.details().typed_domain_name());
            let members = domain
                .as_deref()
                .map(|domain| descendants(&members_of, domain))
                .unwrap_or_default();
            concept.set_axis_domain(domain, members);
        }
    }

    pub fn entrypoint(&self) -> &str {
        &self.entrypoint
    }

    pub fn get(&self, name: &str) -> Option<&Concept> {
        self.concepts.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.concepts.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.values()
    }

    /// A concept can hold facts when it is in this entrypoint and not abstract.
    pub fn is_writable(&self, name: &str) -> bool {
        self.concepts
            .get(name)
            .is_some_and(|concept| !concept.is_abstract())
    }

    /// Parent chain from the direct parent up to the root.
    pub fn ancestors(&self, name: &str) -> Vec<&str> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.concepts.get(name).and_then(Concept::parent);
        while let Some(parent) = current {
            if !seen.insert(parent) {
                break;
            }
            chain.push(parent);
            current = self.concepts.get(parent).and_then(Concept::parent);
        }
        chain
    }
}

fn sorted_by_order(
    relationships: &[Relationship],
    role: RelationshipRole,
) -> Vec<&Relationship> {
    let mut selected: Vec<&Relationship> =
        relationships.iter().filter(|rel| rel.role == role).collect();
    selected.sort_by(|a, b| a.order.total_cmp(&b.order));
    selected
}

/// Breadth-first descendants of `root`, excluding `root` itself.
fn descendants(members_of: &HashMap<&str, Vec<&str>>, root: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut seen: HashSet<&str> = HashSet::from([root]);
    let mut queue: VecDeque<&str> = VecDeque::from([root]);
    while let Some(current) = queue.pop_front() {
        for &member in members_of.get(current).into_iter().flatten() {
            if seen.insert(member) {
                result.push(member.to_string());
                queue.push_back(member);
            }
        }
    }
    result
}
