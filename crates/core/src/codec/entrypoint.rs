//! Picks the entrypoint a set of fact concepts belongs to.

use std::collections::{BTreeSet, HashSet};

use log::debug;
use oblib_taxonomy::TaxonomyCatalog;

use crate::constants::ALL_ENTRYPOINT;
use crate::errors::{NotFoundError, Result};
use crate::utils::name_utils::qualify;

/// Infers the entrypoint of a document from its fact concepts.
///
/// Every entrypoint except the catch-all sharing at least one concept is a
/// candidate. A single candidate wins outright; otherwise the only candidate
/// that allows every concept wins.
pub fn infer_entrypoint<I, S>(catalog: &dyn TaxonomyCatalog, concepts: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let concepts: BTreeSet<String> = concepts
        .into_iter()
        .map(|name| qualify(name.as_ref()))
        .collect();

    let mut candidates: Vec<(String, HashSet<&str>)> = Vec::new();
    for name in catalog.entrypoint_names() {
        if name == ALL_ENTRYPOINT {
            continue;
        }
        let allowed: HashSet<&str> = catalog
            .entrypoint_concepts(&name)
            .unwrap_or_default()
            .iter()
            .map(String::as_str)
            .collect();
        if concepts.iter().any(|concept| allowed.contains(concept.as_str())) {
            candidates.push((name, allowed));
        }
    }

    match candidates.len() {
        0 => Err(NotFoundError::NoEntrypoint.into()),
        1 => Ok(candidates.remove(0).0),
        _ => {
            let mut covering: Vec<String> = candidates
                .iter()
                .filter(|(_, allowed)| {
                    concepts
                        .iter()
                        .all(|concept| allowed.contains(concept.as_str()))
                })
                .map(|(name, _)| name.clone())
                .collect();
            match covering.len() {
                1 => {
                    let only = covering.remove(0);
                    debug!("Inferred entrypoint '{}' from {} concepts", only, concepts.len());
                    Ok(only)
                }
                0 => Err(NotFoundError::AmbiguousEntrypoint(
                    candidates.into_iter().map(|(name, _)| name).collect(),
                )
                .into()),
                _ => Err(NotFoundError::AmbiguousEntrypoint(covering).into()),
            }
        }
    }
}
