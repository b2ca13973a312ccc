//! In-memory catalog, built in code or loaded from a JSON catalog file.
//!
//! The JSON layout mirrors the models:
//!
//! ```json
//! {
//!   "concepts": [{ "name": "solar:DeviceCost", "periodType": "instant",
//!                  "typeName": "xbrli:monetaryItemType" }],
//!   "entrypoints": { "CutSheet": { "concepts": ["solar:DeviceCost"], "relationships": [] } },
//!   "units": [{ "id": "USD", "name": "US Dollar", "nsPrefix": "iso4217",
//!               "itemType": "monetaryItemType" }],
//!   "enumerations": { "solar-types:deviceItemType": ["ModuleMember"] }
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use log::debug;
use serde::Deserialize;

use super::TaxonomyCatalog;
use crate::errors::{CatalogError, Result};
use crate::models::{ConceptDetails, EntrypointDefinition, Relationship, Unit};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFile {
    #[serde(default)]
    concepts: Vec<ConceptDetails>,
    #[serde(default)]
    entrypoints: BTreeMap<String, EntrypointDefinition>,
    #[serde(default)]
    units: Vec<Unit>,
    #[serde(default)]
    enumerations: HashMap<String, Vec<String>>,
}

/// Catalog held entirely in memory with lookup indexes built once.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    concepts: HashMap<String, ConceptDetails>,
    entrypoints: BTreeMap<String, EntrypointDefinition>,
    units: Vec<Unit>,
    /// unit id → index into `units`
    unit_by_id: HashMap<String, usize>,
    /// lowercase unit name → index into `units`
    unit_by_name: HashMap<String, usize>,
    enumerations: HashMap<String, Vec<String>>,
}

impl MemoryCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Parses a catalog from its JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    /// Reads and parses a JSON catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        debug!("Loading taxonomy catalog from {}", path.as_ref().display());
        Self::from_json_str(&json)
    }

    fn from_file(file: CatalogFile) -> Result<Self> {
        let mut concepts = HashMap::with_capacity(file.concepts.len());
        for details in file.concepts {
            if concepts.contains_key(&details.name) {
                return Err(CatalogError::Invalid(format!(
                    "Concept '{}' is declared more than once",
                    details.name
                )));
            }
            concepts.insert(details.name.clone(), details);
        }

        let mut unit_by_id = HashMap::new();
        let mut unit_by_name = HashMap::new();
        for (index, unit) in file.units.iter().enumerate() {
            if unit_by_id.insert(unit.id.clone(), index).is_some() {
                return Err(CatalogError::Invalid(format!(
                    "Unit '{}' is declared more than once",
                    unit.id
                )));
            }
            unit_by_name.entry(unit.name.to_lowercase()).or_insert(index);
        }

        debug!(
            "Catalog ready: {} concepts, {} entrypoints, {} units, {} enumerations",
            concepts.len(),
            file.entrypoints.len(),
            file.units.len(),
            file.enumerations.len()
        );

        Ok(Self {
            concepts,
            entrypoints: file.entrypoints,
            units: file.units,
            unit_by_id,
            unit_by_name,
            enumerations: file.enumerations,
        })
    }

    pub fn concept_count(&self) -> usize {
        self.concepts.len()
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }
}

impl TaxonomyCatalog for MemoryCatalog {
    fn has_entrypoint(&self, name: &str) -> bool {
        self.entrypoints.contains_key(name)
    }

    fn entrypoint_names(&self) -> Vec<String> {
        self.entrypoints.keys().cloned().collect()
    }

    fn entrypoint_concepts(&self, entrypoint: &str) -> Option<&[String]> {
        self.entrypoints
            .get(entrypoint)
            .map(|definition| definition.concepts.as_slice())
    }

    fn entrypoint_relationships(&self, entrypoint: &str) -> Option<&[Relationship]> {
        self.entrypoints
            .get(entrypoint)
            .map(|definition| definition.relationships.as_slice())
    }

    fn concept_details(&self, name: &str) -> Option<&ConceptDetails> {
        self.concepts.get(name)
    }

    fn unit(&self, id_or_name: &str) -> Option<&Unit> {
        self.unit_by_id
            .get(id_or_name)
            .or_else(|| self.unit_by_name.get(&id_or_name.to_lowercase()))
            .map(|&index| &self.units[index])
    }

    fn enumerated_values(&self, type_name: &str) -> Option<&[String]> {
        self.enumerations.get(type_name).map(Vec::as_slice)
    }
}

/// Incremental construction of a [`MemoryCatalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    file: CatalogFile,
}

impl CatalogBuilder {
    pub fn concept(mut self, details: ConceptDetails) -> Self {
        self.file.concepts.push(details);
        self
    }

    pub fn entrypoint(
        mut self,
        name: impl Into<String>,
        concepts: Vec<String>,
        relationships: Vec<Relationship>,
    ) -> Self {
        self.file.entrypoints.insert(
            name.into(),
            EntrypointDefinition {
                concepts,
                relationships,
            },
        );
        self
    }

    pub fn unit(mut self, unit: Unit) -> Self {
        self.file.units.push(unit);
        self
    }

    pub fn enumeration(mut self, type_name: impl Into<String>, values: Vec<String>) -> Self {
        self.file.enumerations.insert(type_name.into(), values);
        self
    }

    pub fn build(self) -> Result<MemoryCatalog> {
        MemoryCatalog::from_file(self.file)
    }
}
