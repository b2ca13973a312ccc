//! Reads xBRL-JSON envelopes into wire facts.

use log::debug;
use serde_json::{Map, Value as JsonValue};

use super::wire_model::{parse_accuracy, WireDocument, WireFact};
use crate::context::{ContextBuilder, Period};
use crate::document::{FactOptions, FactValue};
use crate::errors::{Error, Result};
use crate::utils::name_utils::is_axis_name;

const ENVELOPE_FIELDS: [&str; 4] = ["documentType", "prefixes", "dtsReferences", "facts"];

/// Parses a JSON document. A malformed envelope fails the whole read;
/// malformed facts are recorded and skipped.
pub(crate) fn read_json(json: &str) -> Result<WireDocument> {
    let root: JsonValue = serde_json::from_str(json)?;
    let envelope = root
        .as_object()
        .ok_or_else(|| Error::Parse("JSON document must be an object".to_string()))?;
    if let Some(missing) = ENVELOPE_FIELDS
        .iter()
        .find(|field| !envelope.contains_key(**field))
    {
        return Err(Error::Parse(format!("JSON document is missing '{}'", missing)));
    }
    let facts = envelope["facts"]
        .as_object()
        .ok_or_else(|| Error::Parse("'facts' must be an object keyed by fact id".to_string()))?;

    let mut document = WireDocument::default();
    for (id, body) in facts {
        match read_fact(id, body) {
            Ok(fact) => document.facts.push(fact),
            Err(err) => document.reject(Some(id.as_str()), err),
        }
    }
    debug!(
        "Read {} JSON facts, {} rejected",
        document.facts.len(),
        document.issues.len()
    );
    Ok(document)
}

fn read_fact(id: &str, body: &JsonValue) -> Result<WireFact> {
    let value = body
        .get("value")
        .ok_or_else(|| Error::Parse("Fact has no 'value'".to_string()))?;
    let aspects = body
        .get("aspects")
        .and_then(JsonValue::as_object)
        .ok_or_else(|| Error::Parse("Fact has no 'aspects' object".to_string()))?;

    let concept = aspect_text(aspects, "concept")?
        .ok_or_else(|| Error::Concept("Fact has no concept aspect".to_string()))?;

    let mut context = ContextBuilder::default();
    if let Some(entity) = aspect_text(aspects, "entity")? {
        context = context.entity(entity);
    }
    context = match aspect_text(aspects, "period")? {
        Some(period) => context.period(Period::parse(&period)?),
        None => context.forever(),
    };
    for (key, axis_value) in aspects {
        if key.starts_with("xbrl:") || !is_axis_name(key) {
            continue;
        }
        let axis_value = match axis_value {
            JsonValue::String(text) => text.clone(),
            other => other.to_string(),
        };
        context = context.axis(key, axis_value);
    }

    let options = FactOptions {
        unit: aspect_text(aspects, "unit")?,
        decimals: aspect_number(aspects, "decimals")?,
        precision: aspect_number(aspects, "precision")?,
        id: Some(id.to_string()),
    };

    Ok(WireFact {
        concept,
        value: FactValue::from_json(value)?,
        context,
        options,
    })
}

/// Aspect by `xbrl:`-prefixed or bare name.
fn aspect<'a>(aspects: &'a Map<String, JsonValue>, name: &str) -> Option<&'a JsonValue> {
    aspects
        .get(&format!("xbrl:{}", name))
        .or_else(|| aspects.get(name))
        .filter(|value| !value.is_null())
}

fn aspect_text(aspects: &Map<String, JsonValue>, name: &str) -> Result<Option<String>> {
    match aspect(aspects, name) {
        None => Ok(None),
        Some(JsonValue::String(text)) => Ok(Some(text.clone())),
        Some(other) => Err(Error::Parse(format!(
            "Aspect '{}' must be a string, got {}",
            name, other
        ))),
    }
}

fn aspect_number(aspects: &Map<String, JsonValue>, name: &str) -> Result<Option<i32>> {
    match aspect(aspects, name) {
        None => Ok(None),
        Some(JsonValue::String(text)) => parse_accuracy(name, Some(text.as_str())),
        Some(JsonValue::Number(number)) => number
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| Error::Type(format!("'{}' is not a valid {} value", number, name))),
        Some(other) => Err(Error::Type(format!(
            "'{}' is not a valid {} value",
            other, name
        ))),
    }
}
