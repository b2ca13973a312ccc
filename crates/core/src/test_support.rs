//! Shared fixtures for unit tests.

use std::sync::Arc;

use oblib_taxonomy::{MemoryCatalog, TaxonomyCatalog};

const FIXTURE_CATALOG: &str = include_str!("../tests/fixtures/catalog.json");

/// Catalog with the `CutSheet`, `MonthlyOperatingReport` and `All` entrypoints.
pub fn fixture_catalog() -> Arc<dyn TaxonomyCatalog> {
    Arc::new(MemoryCatalog::from_json_str(FIXTURE_CATALOG).unwrap())
}
