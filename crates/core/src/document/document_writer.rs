//! XML and JSON emitters for [`Document`].

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use serde_json::{json, Map, Value as JsonValue};

use super::{Document, Fact};
use crate::concepts::Concept;
use crate::constants::{AXIS_SUFFIX, FIXED_NAMESPACES, JSON_DOCUMENT_TYPE, OPTIONAL_NAMESPACES};
use crate::context::{Context, Duration, Period};
use crate::errors::Result;
use crate::utils::name_utils::prefix_of;
use crate::utils::time_utils::format_timestamp;

impl Document {
    /// Serializes the document as an XBRL instance.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut xml = String::new();

        writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        write!(xml, "<xbrli:xbrl")?;
        for (prefix, uri) in self.namespaces() {
            write!(xml, "\n    xmlns:{}=\"{}\"", prefix, xml_escape(uri))?;
        }
        writeln!(xml, ">")?;
        writeln!(
            xml,
            r#"  <link:schemaRef xlink:type="simple" xlink:href="{}"/>"#,
            xml_escape(&self.config().schema_href)
        )?;

        for context in self.contexts() {
            self.write_xml_context(&mut xml, context)?;
        }

        for unit_id in self.used_units() {
            let measure = self
                .find_unit(unit_id)
                .map_or_else(|| unit_id.to_string(), |unit| unit.measure());
            writeln!(xml, r#"  <xbrli:unit id="{}">"#, xml_escape(unit_id))?;
            writeln!(xml, "    <xbrli:measure>{}</xbrli:measure>", xml_escape(&measure))?;
            writeln!(xml, "  </xbrli:unit>")?;
        }

        for fact in self.facts() {
            write_xml_fact(&mut xml, fact)?;
        }

        writeln!(xml, "</xbrli:xbrl>")?;
        Ok(xml)
    }

    fn write_xml_context(&self, xml: &mut String, context: &Context) -> Result<()> {
        writeln!(
            xml,
            r#"  <xbrli:context id="{}">"#,
            xml_escape(context.id().unwrap_or_default())
        )?;
        writeln!(xml, "    <xbrli:entity>")?;
        writeln!(
            xml,
            r#"      <xbrli:identifier scheme="{}">{}</xbrli:identifier>"#,
            xml_escape(&self.config().entity_scheme),
            xml_escape(context.entity().unwrap_or_default())
        )?;
        if !context.axes().is_empty() {
            writeln!(xml, "      <xbrli:segment>")?;
            for (axis, value) in context.axes() {
                let concept = self.concept_graph().get(axis);
                if concept.is_some_and(Concept::has_closed_domain) {
                    writeln!(
                        xml,
                        r#"        <xbrldi:explicitMember dimension="{}">{}</xbrldi:explicitMember>"#,
                        xml_escape(axis),
                        xml_escape(value)
                    )?;
                } else {
                    let domain = typed_domain_element(axis, concept);
                    writeln!(
                        xml,
                        r#"        <xbrldi:typedMember dimension="{}"><{}>{}</{}></xbrldi:typedMember>"#,
                        xml_escape(axis),
                        domain,
                        xml_escape(value),
                        domain
                    )?;
                }
            }
            writeln!(xml, "      </xbrli:segment>")?;
        }
        writeln!(xml, "    </xbrli:entity>")?;

        writeln!(xml, "    <xbrli:period>")?;
        match context.period() {
            Period::Instant(instant) => writeln!(
                xml,
                "      <xbrli:instant>{}</xbrli:instant>",
                format_timestamp(instant)
            )?,
            Period::Duration(Duration::Forever) => writeln!(xml, "      <xbrli:forever/>")?,
            Period::Duration(Duration::Range { start, end }) => {
                writeln!(
                    xml,
                    "      <xbrli:startDate>{}</xbrli:startDate>",
                    format_timestamp(start)
                )?;
                writeln!(
                    xml,
                    "      <xbrli:endDate>{}</xbrli:endDate>",
                    format_timestamp(end)
                )?;
            }
        }
        writeln!(xml, "    </xbrli:period>")?;
        writeln!(xml, "  </xbrli:context>")?;
        Ok(())
    }

    /// Serializes the document as an xBRL-JSON value.
    pub fn to_json_value(&self) -> JsonValue {
        let prefixes: Map<String, JsonValue> = self
            .namespaces()
            .into_iter()
            .map(|(prefix, uri)| (prefix.to_string(), JsonValue::from(uri)))
            .collect();

        let facts: Map<String, JsonValue> = self
            .facts()
            .map(|fact| {
                let body = json!({
                    "value": fact.value().to_json(),
                    "aspects": self.json_aspects(fact),
                });
                (fact.id().to_string(), body)
            })
            .collect();

        json!({
            "documentType": JSON_DOCUMENT_TYPE,
            "prefixes": prefixes,
            "dtsReferences": [{ "type": "schema", "href": self.config().schema_href.as_str() }],
            "facts": facts,
        })
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_json_value())?)
    }

    fn json_aspects(&self, fact: &Fact) -> Map<String, JsonValue> {
        let context = fact.context();
        let mut aspects = Map::new();
        aspects.insert("xbrl:concept".to_string(), fact.concept().into());
        if let Some(entity) = context.entity() {
            aspects.insert("xbrl:entity".to_string(), entity.into());
        }
        if !context.period().is_forever() {
            aspects.insert("xbrl:period".to_string(), context.period().to_string().into());
        }
        if let Some(unit_id) = fact.unit() {
            let measure = self
                .find_unit(unit_id)
                .map_or_else(|| unit_id.to_string(), |unit| unit.measure());
            aspects.insert("xbrl:unit".to_string(), measure.into());
        }
        if let Some(decimals) = fact.decimals() {
            aspects.insert("xbrl:decimals".to_string(), decimals.into());
        }
        if let Some(precision) = fact.precision() {
            aspects.insert("xbrl:precision".to_string(), precision.into());
        }
        for (axis, value) in context.axes() {
            aspects.insert(axis.clone(), value.as_str().into());
        }
        aspects
    }

    /// Ids of the units referenced by at least one fact.
    fn used_units(&self) -> BTreeSet<&str> {
        self.facts().filter_map(Fact::unit).collect()
    }

    /// Fixed namespaces plus the optional ones a fact, axis or unit uses.
    fn namespaces(&self) -> BTreeMap<&'static str, &'static str> {
        let mut used: BTreeSet<String> = BTreeSet::new();
        for fact in self.facts() {
            used.extend(prefix_of(fact.concept()).map(str::to_string));
            used.extend(
                fact.context()
                    .axes()
                    .keys()
                    .filter_map(|axis| prefix_of(axis).map(str::to_string)),
            );
        }
        for unit_id in self.used_units() {
            if let Some(unit) = self.find_unit(unit_id) {
                used.insert(unit.ns_prefix.clone());
            }
        }

        FIXED_NAMESPACES
            .iter()
            .chain(
                OPTIONAL_NAMESPACES
                    .iter()
                    .filter(|(prefix, _)| used.contains(*prefix)),
            )
            .copied()
            .collect()
    }
}

fn write_xml_fact(xml: &mut String, fact: &Fact) -> Result<()> {
    write!(
        xml,
        r#"  <{} contextRef="{}" id="{}""#,
        fact.concept(),
        xml_escape(fact.context().id().unwrap_or_default()),
        xml_escape(fact.id())
    )?;
    if let Some(unit) = fact.unit() {
        write!(xml, r#" unitRef="{}""#, xml_escape(unit))?;
    }
    if let Some(decimals) = fact.decimals() {
        write!(xml, r#" decimals="{}""#, decimals)?;
    }
    if let Some(precision) = fact.precision() {
        write!(xml, r#" precision="{}""#, precision)?;
    }
    if fact.value().is_null() {
        writeln!(xml, r#" xsi:nil="true"/>"#)?;
    } else {
        writeln!(
            xml,
            ">{}</{}>",
            xml_escape(&fact.value().to_string()),
            fact.concept()
        )?;
    }
    Ok(())
}

/// Element wrapping a typed member value: the axis domain, or the axis name
/// with `Axis` replaced by `Domain` when no domain is known.
fn typed_domain_element(axis: &str, concept: Option<&Concept>) -> String {
    concept
        .and_then(Concept::domain)
        .map(str::to_string)
        .unwrap_or_else(|| match axis.strip_suffix(AXIS_SUFFIX) {
            Some(stem) => format!("{}Domain", stem),
            None => format!("{}Domain", axis),
        })
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
