//! Derives the tables of an entrypoint from its definition arcs.

use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};
use oblib_taxonomy::{Relationship, RelationshipRole};

use super::Table;
use crate::concepts::ConceptGraph;
use crate::constants::{LINE_ITEM_MARKER, NON_TABLE_CONCEPTS};
use crate::utils::name_utils::is_duplicate_name;

/// Every table of one entrypoint, including the axis-less placeholder that
/// holds line items outside any hypercube.
#[derive(Debug, Clone)]
pub struct TableRegistry {
    tables: BTreeMap<String, Table>,
    /// line-item concept → table name
    table_by_line_item: HashMap<String, String>,
}

impl TableRegistry {
    pub fn build(graph: &ConceptGraph, relationships: &[Relationship]) -> Self {
        let mut tables: BTreeMap<String, Table> = BTreeMap::new();
        let mut table_by_line_item = HashMap::new();

        for rel in relationships
            .iter()
            .filter(|rel| rel.role == RelationshipRole::HypercubeDimension)
        {
            if is_duplicate_name(&rel.from) || is_duplicate_name(&rel.to) {
                continue;
            }
            let Some(axis) = graph.get(&rel.to).filter(|concept| concept.is_axis()) else {
                warn!("Table '{}' refers to unknown axis '{}'", rel.from, rel.to);
                continue;
            };
            tables
                .entry(rel.from.clone())
                .or_insert_with(|| Table::new(rel.from.clone(), Vec::new(), Vec::new()))
                .add_axis(axis.clone());
        }

        for rel in relationships
            .iter()
            .filter(|rel| rel.role == RelationshipRole::All)
        {
            if is_duplicate_name(&rel.from) || is_duplicate_name(&rel.to) {
                continue;
            }
            let table = tables
                .entry(rel.to.clone())
                .or_insert_with(|| Table::new(rel.to.clone(), Vec::new(), Vec::new()));
            table.add_line_item(rel.from.clone());
            table_by_line_item.insert(rel.from.clone(), rel.to.clone());
        }

        tables.insert(
            NON_TABLE_CONCEPTS.to_string(),
            Table::new(NON_TABLE_CONCEPTS, Vec::new(), Vec::new()),
        );

        debug!(
            "Table registry for '{}': {} tables",
            graph.entrypoint(),
            tables.len() - 1
        );

        Self {
            tables,
            table_by_line_item,
        }
    }

    /// Name of the table a concept's facts belong to.
    ///
    /// The first ancestor that is a registered line-item root decides; every
    /// other concept lands in the placeholder table.
    pub fn table_name_for_concept(&self, graph: &ConceptGraph, concept: &str) -> &str {
        graph
            .ancestors(concept)
            .into_iter()
            .filter(|ancestor| ancestor.contains(LINE_ITEM_MARKER))
            .find_map(|ancestor| self.table_by_line_item.get(ancestor))
            .map_or(NON_TABLE_CONCEPTS, String::as_str)
    }

    pub fn get_table_for_concept(&self, graph: &ConceptGraph, concept: &str) -> &Table {
        let name = self.table_name_for_concept(graph, concept);
        &self.tables[name]
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub(crate) fn table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.get_mut(name)
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// Hypercube tables, without the placeholder.
    pub fn hypercubes(&self) -> impl Iterator<Item = &Table> {
        self.tables
            .values()
            .filter(|table| table.name() != NON_TABLE_CONCEPTS)
    }
}
