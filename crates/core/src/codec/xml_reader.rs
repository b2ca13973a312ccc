//! Reads XBRL instance documents into wire facts.
//!
//! The first pass indexes contexts and units by id, the second turns every
//! remaining element into a fact.

use std::collections::HashMap;

use log::debug;

use super::wire_model::{parse_accuracy, WireDocument, WireFact};
use super::xml_tree::XmlElement;
use crate::context::ContextBuilder;
use crate::document::{FactOptions, FactValue};
use crate::errors::{Error, Result};
use crate::utils::time_utils::parse_timestamp;

/// Elements of the root that are never facts.
const NON_FACT_ELEMENTS: [&str; 6] = [
    "context",
    "unit",
    "schemaRef",
    "roleRef",
    "arcroleRef",
    "footnoteLink",
];

/// Parses an XML document. Malformed XML fails the whole read; malformed
/// contexts and facts are recorded against the facts that use them.
pub(crate) fn read_xml(xml: &str) -> Result<WireDocument> {
    let root = XmlElement::parse(xml)?;
    if root.local_name() != "xbrl" {
        return Err(Error::Parse(format!(
            "Root element must be xbrli:xbrl, got '{}'",
            root.name
        )));
    }

    let mut contexts: HashMap<&str, std::result::Result<ContextBuilder, String>> =
        HashMap::new();
    for element in root.children_named("context") {
        let Some(id) = element.attribute("id") else {
            continue;
        };
        contexts.insert(id, read_context(element).map_err(|e| e.to_string()));
    }

    // `None` marks a compound (divide) unit.
    let units: HashMap<&str, Option<&str>> = root
        .children_named("unit")
        .filter_map(|element| {
            let id = element.attribute("id")?;
            let measure = match (element.child("measure"), element.child("divide")) {
                (_, Some(_)) => None,
                (Some(measure), None) => Some(measure.text()),
                (None, None) => Some(id),
            };
            Some((id, measure))
        })
        .collect();

    let mut document = WireDocument::default();
    for element in root
        .children
        .iter()
        .filter(|element| !NON_FACT_ELEMENTS.contains(&element.local_name()))
    {
        let id = element.attribute("id");
        match read_fact(element, &contexts, &units) {
            Ok(fact) => document.facts.push(fact),
            Err(err) => document.reject(id, err),
        }
    }
    debug!(
        "Read {} XML facts ({} contexts, {} units), {} rejected",
        document.facts.len(),
        contexts.len(),
        units.len(),
        document.issues.len()
    );
    Ok(document)
}

fn read_context(element: &XmlElement) -> Result<ContextBuilder> {
    let mut context = ContextBuilder::default();

    if let Some(entity) = element.child("entity") {
        if let Some(identifier) = entity.child("identifier") {
            if !identifier.text().is_empty() {
                context = context.entity(identifier.text());
            }
        }
        if let Some(segment) = entity.child("segment") {
            context = read_members(context, segment)?;
        }
    }
    if let Some(scenario) = element.child("scenario") {
        context = read_members(context, scenario)?;
    }

    let period = element
        .child("period")
        .ok_or_else(|| Error::Context("Context has no period".to_string()))?;
    if let Some(instant) = period.child("instant") {
        context = context.instant(parse_timestamp(instant.text())?);
    } else if period.child("forever").is_some() {
        context = context.forever();
    } else {
        match (period.child("startDate"), period.child("endDate")) {
            (Some(start), Some(end)) => {
                context = context.duration(
                    parse_timestamp(start.text())?,
                    parse_timestamp(end.text())?,
                );
            }
            _ => {
                return Err(Error::Context(
                    "Period needs an instant, forever, or startDate and endDate".to_string(),
                ))
            }
        }
    }
    Ok(context)
}

/// Adds explicit and typed dimension members to `context`.
fn read_members(mut context: ContextBuilder, container: &XmlElement) -> Result<ContextBuilder> {
    for member in &container.children {
        let value = match member.local_name() {
            "explicitMember" => member.text().to_string(),
            "typedMember" => member
                .children
                .first()
                .map_or_else(|| member.text(), XmlElement::text)
                .to_string(),
            _ => continue,
        };
        let dimension = member
            .attribute("dimension")
            .ok_or_else(|| Error::Context(format!("{} has no dimension", member.name)))?;
        context = context.axis(dimension, value);
    }
    Ok(context)
}

fn read_fact(
    element: &XmlElement,
    contexts: &HashMap<&str, std::result::Result<ContextBuilder, String>>,
    units: &HashMap<&str, Option<&str>>,
) -> Result<WireFact> {
    let context_ref = element.attribute("contextRef").ok_or_else(|| {
        Error::Context(format!("Fact '{}' has no contextRef", element.name))
    })?;
    let context = match contexts.get(context_ref) {
        Some(Ok(context)) => context.clone(),
        Some(Err(message)) => {
            return Err(Error::Context(format!(
                "Context '{}' is invalid: {}",
                context_ref, message
            )))
        }
        None => {
            return Err(Error::Context(format!(
                "Context '{}' is not defined",
                context_ref
            )))
        }
    };

    let unit = element
        .attribute("unitRef")
        .map(|unit_ref| match units.get(unit_ref) {
            Some(Some(measure)) => Ok(measure.to_string()),
            Some(None) => Err(Error::Unit(format!(
                "Unit '{}' is a divide unit; compound units are not supported",
                unit_ref
            ))),
            None => Err(Error::Unit(format!("Unit '{}' is not defined", unit_ref))),
        })
        .transpose()?;

    let nil = element
        .attribute("xsi:nil")
        .is_some_and(|nil| nil == "true" || nil == "1");
    let value = if nil {
        FactValue::Null
    } else {
        FactValue::Text(element.text().to_string())
    };

    Ok(WireFact {
        concept: element.name.clone(),
        value,
        context,
        options: FactOptions {
            unit,
            decimals: parse_accuracy("decimals", element.attribute("decimals"))?,
            precision: parse_accuracy("precision", element.attribute("precision"))?,
            id: element.attribute("id").map(str::to_string),
        },
    })
}
