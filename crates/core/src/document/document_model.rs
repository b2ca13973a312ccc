//! The fact document: concept universe, tables and fact store of one
//! entrypoint.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use log::debug;
use oblib_taxonomy::{TaxonomyCatalog, Unit};
use uuid::Uuid;

use super::{Accuracy, DocumentConfig, Fact, FactOptions, FactValue};
use crate::concepts::{Concept, ConceptGraph};
use crate::context::{Context, ContextBuilder};
use crate::errors::{Error, NotFoundError, Result};
use crate::tables::{Table, TableRegistry};
use crate::utils::name_utils::{local_name, prefix_of, qualify};
use crate::validation::{UnitRequirement, ValueValidator};

/// table name → context id → concept name → fact
type FactStore = BTreeMap<String, BTreeMap<String, BTreeMap<String, Fact>>>;

/// Facts of one entrypoint, validated against its taxonomy on every write.
pub struct Document {
    entrypoint: String,
    catalog: Arc<dyn TaxonomyCatalog>,
    config: DocumentConfig,
    graph: ConceptGraph,
    tables: TableRegistry,
    facts: FactStore,
    default_context: ContextBuilder,
    validator: ValueValidator,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("entrypoint", &self.entrypoint)
            .field("config", &self.config)
            .field("facts", &self.fact_count())
            .field("default_context", &self.default_context)
            .finish_non_exhaustive()
    }
}

impl Document {
    pub fn new(catalog: Arc<dyn TaxonomyCatalog>, entrypoint: &str) -> Result<Self> {
        Self::with_config(catalog, entrypoint, DocumentConfig::default())
    }

    pub fn with_config(
        catalog: Arc<dyn TaxonomyCatalog>,
        entrypoint: &str,
        config: DocumentConfig,
    ) -> Result<Self> {
        if !catalog.has_entrypoint(entrypoint) {
            return Err(NotFoundError::Entrypoint(entrypoint.to_string()).into());
        }
        let graph = ConceptGraph::build(catalog.as_ref(), entrypoint)?;
        let relationships = catalog
            .entrypoint_relationships(entrypoint)
            .unwrap_or_default();
        let tables = TableRegistry::build(&graph, relationships);

        debug!("Created document for entrypoint '{}'", entrypoint);
        Ok(Self {
            entrypoint: entrypoint.to_string(),
            catalog,
            config,
            graph,
            tables,
            facts: BTreeMap::new(),
            default_context: ContextBuilder::default(),
            validator: ValueValidator::new(),
        })
    }

    pub fn entrypoint(&self) -> &str {
        &self.entrypoint
    }

    pub fn catalog(&self) -> &Arc<dyn TaxonomyCatalog> {
        &self.catalog
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    pub fn concept_graph(&self) -> &ConceptGraph {
        &self.graph
    }

    pub fn table_registry(&self) -> &TableRegistry {
        &self.tables
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.tables()
    }

    // =========================================================================
    // Default context
    // =========================================================================

    /// Layers `overrides` onto the default context used to fill whatever a
    /// `set` call leaves unspecified. Earlier defaults are kept unless
    /// `overrides` replaces them.
    pub fn set_default_context(&mut self, overrides: impl Into<ContextBuilder>) {
        self.default_context.merge(overrides.into());
    }

    pub fn default_context(&self) -> &ContextBuilder {
        &self.default_context
    }

    // =========================================================================
    // Facts
    // =========================================================================

    /// Validates and stores a fact, overwriting any fact of the same concept
    /// in an equal context.
    pub fn set(
        &mut self,
        concept: &str,
        value: impl Into<FactValue>,
        context: impl Into<ContextBuilder>,
        options: FactOptions,
    ) -> Result<&Fact> {
        let name = qualify(concept);
        let concept = self.writable_concept(&name)?;

        let table_name = self
            .tables
            .table_name_for_concept(&self.graph, &name)
            .to_string();
        let table = self
            .tables
            .table(&table_name)
            .ok_or_else(|| Error::Context(format!("Table '{}' is not registered", table_name)))?;
        let context = context
            .into()
            .with_defaults(&self.default_context, |axis| table.axis(axis).is_some())
            .build()?;
        table.is_valid_context(&context)?;
        if context.period().period_type() != concept.period_type() {
            return Err(Error::Context(format!(
                "'{}' requires a period of type '{}', got '{}'",
                name,
                concept.period_type().as_str(),
                context.period()
            )));
        }

        let accuracy = Accuracy::from_parts(options.decimals, options.precision)?;
        let (unit, value) = if self.config.trusted_input {
            let unit = options.unit.as_deref().map(|unit| match self.find_unit(unit) {
                Some(found) => found.id.clone(),
                None => local_name(unit).to_string(),
            });
            (unit, value.into())
        } else {
            if accuracy.is_some() && !concept.value_type().is_numeric() {
                return Err(Error::Type(format!(
                    "'{}' is not numeric and takes neither decimals nor precision",
                    name
                )));
            }
            let unit = self.check_unit(concept, options.unit.as_deref())?;
            let value = self.validator.validate_value(concept, value.into())?;
            (unit, value)
        };

        let context = self
            .tables
            .table_mut(&table_name)
            .ok_or_else(|| Error::Context(format!("Table '{}' is not registered", table_name)))?
            .store_context(context);
        let context_id = context.id().unwrap_or_default().to_string();
        let fact = Fact {
            id: options.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            concept: name.clone(),
            context,
            unit,
            value,
            accuracy,
        };

        let slot = self
            .facts
            .entry(table_name)
            .or_default()
            .entry(context_id)
            .or_default();
        Ok(match slot.entry(name) {
            Entry::Occupied(mut entry) => {
                entry.insert(fact);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(fact),
        })
    }

    /// The fact stored for `concept` in the context equal to `context`.
    pub fn get(&self, concept: &str, context: &Context) -> Option<&Fact> {
        let name = qualify(concept);
        let table_name = self.tables.table_name_for_concept(&self.graph, &name);
        let stored = self.tables.table(table_name)?.find_context(context)?;
        self.facts
            .get(table_name)?
            .get(stored.id()?)?
            .get(&name)
    }

    /// Every stored fact, grouped by table and context.
    pub fn facts(&self) -> impl Iterator<Item = &Fact> {
        self.facts
            .values()
            .flat_map(|contexts| contexts.values())
            .flat_map(|facts| facts.values())
    }

    pub fn fact_count(&self) -> usize {
        self.facts().count()
    }

    /// Every stored context, table by table in id order.
    pub fn contexts(&self) -> impl Iterator<Item = &Context> {
        self.tables.tables().flat_map(|table| table.contexts())
    }

    // =========================================================================
    // Taxonomy queries
    // =========================================================================

    /// Names of the concepts that can hold facts in this document.
    pub fn writable_concepts(&self) -> Vec<&str> {
        self.graph
            .iter()
            .filter(|concept| !concept.is_abstract())
            .map(Concept::name)
            .collect()
    }

    /// Axes a context must supply for facts of `concept`.
    pub fn required_axes(&self, concept: &str) -> Vec<&str> {
        let name = qualify(concept);
        self.tables
            .get_table_for_concept(&self.graph, &name)
            .required_axes()
            .map(Concept::name)
            .collect()
    }

    /// Domain members of a closed axis; `None` for open or unknown axes.
    pub fn valid_axis_values(&self, axis: &str) -> Option<&[String]> {
        self.graph
            .get(&qualify(axis))
            .filter(|concept| concept.has_closed_domain())
            .map(Concept::members)
    }

    /// Unit registry entry by id, name or measure text. A measure only
    /// matches a unit of the same namespace prefix.
    pub fn find_unit(&self, unit: &str) -> Option<&Unit> {
        self.catalog.unit(unit).or_else(|| {
            let prefix = prefix_of(unit)?;
            self.catalog
                .unit(local_name(unit))
                .filter(|found| found.ns_prefix == prefix)
        })
    }

    fn writable_concept(&self, name: &str) -> Result<&Concept> {
        match self.graph.get(name) {
            None => Err(Error::Concept(format!(
                "'{}' is not part of entrypoint '{}'",
                name, self.entrypoint
            ))),
            Some(concept) if concept.is_abstract() => Err(Error::Concept(format!(
                "'{}' is abstract and cannot hold a value",
                name
            ))),
            Some(concept) => Ok(concept),
        }
    }

    /// Checks a unit against the concept's unit rule and returns its id.
    fn check_unit(&self, concept: &Concept, unit: Option<&str>) -> Result<Option<String>> {
        let requirement = concept.value_type().unit_requirement();
        let Some(unit) = unit else {
            return match requirement {
                UnitRequirement::Currency | UnitRequirement::Measure(_) => Err(Error::Unit(
                    format!("'{}' requires a unit", concept.name()),
                )),
                UnitRequirement::None | UnitRequirement::Optional => Ok(None),
            };
        };

        if requirement == UnitRequirement::None {
            return Err(Error::Unit(format!(
                "'{}' does not take a unit, got '{}'",
                concept.name(),
                unit
            )));
        }

        let found = self
            .find_unit(unit)
            .ok_or_else(|| NotFoundError::Unit(unit.to_string()))?;
        match requirement {
            UnitRequirement::Currency if !found.is_currency() => Err(Error::Unit(format!(
                "'{}' requires a currency unit, got '{}'",
                concept.name(),
                found.id
            ))),
            UnitRequirement::Measure(item_type) if found.item_type != item_type => {
                Err(Error::Unit(format!(
                    "'{}' requires a unit of type '{}', got '{}' ({})",
                    concept.name(),
                    item_type,
                    found.id,
                    found.item_type
                )))
            }
            _ => Ok(Some(found.id.clone())),
        }
    }
}
