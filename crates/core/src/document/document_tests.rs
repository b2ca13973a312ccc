//! Tests for document writes, reads, defaults and emitters.

#[cfg(test)]
mod tests {
    use crate::context::{Context, ContextBuilder};
    use crate::document::{Document, DocumentConfig, FactOptions, FactValue};
    use crate::errors::{Error, NotFoundError};
    use crate::test_support::fixture_catalog;
    use crate::utils::time_utils::start_of_day;
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal_macros::dec;

    fn day(year: i32, month: u32, day: u32) -> NaiveDateTime {
        start_of_day(NaiveDate::from_ymd_opt(year, month, day).unwrap())
    }

    fn cut_sheet() -> Document {
        Document::new(fixture_catalog(), "CutSheet").unwrap()
    }

    fn report() -> Document {
        Document::new(fixture_catalog(), "MonthlyOperatingReport").unwrap()
    }

    fn product_context(product: &str) -> ContextBuilder {
        Context::builder()
            .instant(day(2024, 1, 1))
            .axis("ProductIdentifierAxis", product)
    }

    fn efficiency_context(level: &str) -> ContextBuilder {
        Context::builder()
            .duration(day(2024, 1, 1), day(2024, 12, 31))
            .axis("ProductIdentifierAxis", "P1")
            .axis("InverterPowerLevelPercentAxis", level)
    }

    fn monthly() -> ContextBuilder {
        Context::builder().duration(day(2024, 3, 1), day(2024, 3, 31))
    }

    // ==================== Construction ====================

    #[test]
    fn test_unknown_entrypoint() {
        let result = Document::new(fixture_catalog(), "Nope");
        assert!(matches!(
            result,
            Err(Error::NotFound(NotFoundError::Entrypoint(name))) if name == "Nope"
        ));
    }

    #[test]
    fn test_placeholder_table_exists_before_any_write() {
        let doc = report();
        let names: Vec<&str> = doc.tables().map(|table| table.name()).collect();
        assert_eq!(names, vec!["NonTableConcepts"]);
    }

    // ==================== Set and get ====================

    #[test]
    fn test_set_then_get_device_cost() {
        let mut doc = cut_sheet();
        doc.set(
            "DeviceCost",
            100,
            product_context("P1"),
            FactOptions::unit("USD"),
        )
        .unwrap();

        let context = product_context("P1").build().unwrap();
        let fact = doc.get("DeviceCost", &context).unwrap();
        assert_eq!(fact.value(), &FactValue::Integer(100));
        assert_eq!(fact.unit(), Some("USD"));
        assert_eq!(fact.concept(), "solar:DeviceCost");
        assert_eq!(fact.context().id(), Some("CutSheetDetailsTable_0"));
        assert_eq!(fact.decimals(), None);
        assert_eq!(fact.precision(), None);
    }

    #[test]
    fn test_get_returns_decimals_and_id() {
        let mut doc = cut_sheet();
        doc.set(
            "solar:DeviceCost",
            "$1,250.75",
            product_context("P1"),
            FactOptions::unit("USD").with_decimals(2).with_id("cost-1"),
        )
        .unwrap();

        let fact = doc
            .get("solar:DeviceCost", &product_context("P1").build().unwrap())
            .unwrap();
        assert_eq!(fact.value(), &FactValue::Decimal(dec!(1250.75)));
        assert_eq!(fact.decimals(), Some(2));
        assert_eq!(fact.id(), "cost-1");
    }

    #[test]
    fn test_get_misses_for_other_context() {
        let mut doc = cut_sheet();
        doc.set("DeviceCost", 100, product_context("P1"), FactOptions::unit("USD"))
            .unwrap();
        let other = product_context("P2").build().unwrap();
        assert!(doc.get("DeviceCost", &other).is_none());
    }

    #[test]
    fn test_repeat_write_overwrites() {
        let mut doc = cut_sheet();
        doc.set("DeviceCost", 100, product_context("P1"), FactOptions::unit("USD"))
            .unwrap();
        doc.set("DeviceCost", 200, product_context("P1"), FactOptions::unit("USD"))
            .unwrap();

        assert_eq!(doc.fact_count(), 1);
        assert_eq!(doc.contexts().count(), 1);
        let fact = doc
            .get("DeviceCost", &product_context("P1").build().unwrap())
            .unwrap();
        assert_eq!(fact.value(), &FactValue::Integer(200));
    }

    #[test]
    fn test_bare_and_prefixed_members_share_one_context() {
        let mut doc = cut_sheet();
        let concept = "InverterEfficiencyAtVmaxPercent";
        doc.set(
            concept,
            "96.5",
            efficiency_context("InverterPowerLevel50PercentMember"),
            FactOptions::default(),
        )
        .unwrap();
        doc.set(
            concept,
            "97",
            efficiency_context("solar:InverterPowerLevel50PercentMember"),
            FactOptions::default(),
        )
        .unwrap();

        assert_eq!(doc.fact_count(), 1);
        assert_eq!(doc.contexts().count(), 1);
        let bare = efficiency_context("InverterPowerLevel50PercentMember")
            .build()
            .unwrap();
        let fact = doc.get(concept, &bare).unwrap();
        assert_eq!(fact.value(), &FactValue::Decimal(dec!(97)));
        assert_eq!(
            fact.context().axis_value("InverterPowerLevelPercentAxis"),
            Some("solar:InverterPowerLevel50PercentMember")
        );

        let xml = doc.to_xml_string().unwrap();
        assert!(xml.contains(r#"<xbrldi:explicitMember dimension="solar:InverterPowerLevelPercentAxis">solar:InverterPowerLevel50PercentMember</xbrldi:explicitMember>"#));
    }

    #[test]
    fn test_distinct_contexts_get_increasing_ids() {
        let mut doc = cut_sheet();
        for product in ["P1", "P2", "P3"] {
            doc.set("DeviceCost", 1, product_context(product), FactOptions::unit("USD"))
                .unwrap();
        }
        let ids: Vec<&str> = doc.contexts().filter_map(Context::id).collect();
        assert_eq!(
            ids,
            vec![
                "CutSheetDetailsTable_0",
                "CutSheetDetailsTable_1",
                "CutSheetDetailsTable_2"
            ]
        );
    }

    // ==================== Concept and context errors ====================

    #[test]
    fn test_unknown_and_abstract_concepts() {
        let mut doc = cut_sheet();
        let unknown = doc.set("SiteNumberOfModules", 3, monthly(), FactOptions::default());
        assert!(matches!(unknown, Err(Error::Concept(_))));

        let abstract_concept = doc.set(
            "CutSheetDetailsLineItems",
            "x",
            monthly(),
            FactOptions::default(),
        );
        assert!(matches!(abstract_concept, Err(Error::Concept(_))));
    }

    #[test]
    fn test_period_kind_must_match_concept() {
        let mut doc = cut_sheet();
        let duration = Context::builder()
            .duration(day(2024, 1, 1), day(2024, 2, 1))
            .axis("ProductIdentifierAxis", "P1");
        let result = doc.set("DeviceCost", 100, duration, FactOptions::unit("USD"));
        assert!(matches!(result, Err(Error::Context(_))));

        let result = doc.set(
            "ModuleNameplateCapacity",
            300,
            product_context("P1"),
            FactOptions::unit("kW"),
        );
        assert!(matches!(result, Err(Error::Context(_))));
    }

    #[test]
    fn test_missing_period_is_rejected() {
        let mut doc = report();
        let result = doc.set(
            "PreparerOfMonthlyOperatingReport",
            "Jane",
            ContextBuilder::default(),
            FactOptions::default(),
        );
        assert!(matches!(result, Err(Error::Context(_))));
    }

    #[test]
    fn test_closed_axis_rules() {
        let mut doc = cut_sheet();
        let concept = "InverterEfficiencyAtVmaxPercent";

        let missing = Context::builder()
            .duration(day(2024, 1, 1), day(2024, 12, 31))
            .axis("ProductIdentifierAxis", "P1");
        assert!(matches!(
            doc.set(concept, 97, missing, FactOptions::default()),
            Err(Error::Context(message)) if message.contains("Missing required axis")
        ));

        assert!(matches!(
            doc.set(concept, 97, efficiency_context("InverterPowerLevel75PercentMember"), FactOptions::default()),
            Err(Error::Context(message)) if message.contains("not in the domain")
        ));

        let undeclared = efficiency_context("InverterPowerLevel50PercentMember")
            .axis("TestConditionAxis", "STC");
        assert!(matches!(
            doc.set(concept, 97, undeclared, FactOptions::default()),
            Err(Error::Context(message)) if message.contains("Unexpected axis")
        ));

        doc.set(
            concept,
            "96.5",
            efficiency_context("solar:InverterPowerLevel50PercentMember"),
            FactOptions::default(),
        )
        .unwrap();
        assert_eq!(doc.fact_count(), 1);
    }

    #[test]
    fn test_optional_open_axis() {
        let mut doc = cut_sheet();
        doc.set("DeviceCost", 10, product_context("P1"), FactOptions::unit("USD"))
            .unwrap();
        doc.set(
            "DeviceCost",
            12,
            product_context("P1").axis("TestConditionAxis", "STC"),
            FactOptions::unit("USD"),
        )
        .unwrap();
        assert_eq!(doc.fact_count(), 2);
    }

    #[test]
    fn test_non_table_concepts_take_no_axes() {
        let mut doc = report();
        let result = doc.set(
            "PreparerOfMonthlyOperatingReport",
            "Jane",
            monthly().axis("ProductIdentifierAxis", "P1"),
            FactOptions::default(),
        );
        assert!(matches!(result, Err(Error::Context(_))));
    }

    // ==================== Units ====================

    #[test]
    fn test_monetary_units() {
        let mut doc = cut_sheet();
        let missing = doc.set("DeviceCost", 1, product_context("P1"), FactOptions::default());
        assert!(matches!(missing, Err(Error::Unit(_))));

        let wrong = doc.set("DeviceCost", 1, product_context("P1"), FactOptions::unit("kW"));
        assert!(matches!(wrong, Err(Error::Unit(_))));

        let unknown = doc.set("DeviceCost", 1, product_context("P1"), FactOptions::unit("XYZ"));
        assert!(matches!(
            unknown,
            Err(Error::NotFound(NotFoundError::Unit(unit))) if unit == "XYZ"
        ));

        let fact = doc
            .set("DeviceCost", 1, product_context("P1"), FactOptions::unit("iso4217:EUR"))
            .unwrap();
        assert_eq!(fact.unit(), Some("EUR"));

        let fact = doc
            .set("DeviceCost", 1, product_context("P2"), FactOptions::unit("US Dollar"))
            .unwrap();
        assert_eq!(fact.unit(), Some("USD"));
    }

    #[test]
    fn test_unit_measure_prefix_must_match() {
        let mut doc = cut_sheet();
        assert_eq!(doc.find_unit("iso4217:USD").map(|unit| unit.id.as_str()), Some("USD"));
        assert!(doc.find_unit("units:USD").is_none());
        assert!(doc.find_unit("foo:USD").is_none());

        let result = doc.set("DeviceCost", 1, product_context("P1"), FactOptions::unit("units:USD"));
        assert!(matches!(
            result,
            Err(Error::NotFound(NotFoundError::Unit(unit))) if unit == "units:USD"
        ));
    }

    #[test]
    fn test_measure_units_must_match_item_type() {
        let mut doc = cut_sheet();
        let context = || {
            Context::builder()
                .duration(day(2024, 1, 1), day(2024, 12, 31))
                .axis("ProductIdentifierAxis", "P1")
        };
        doc.set("ModuleNameplateCapacity", 300, context(), FactOptions::unit("kW"))
            .unwrap();
        let wrong = doc.set("ModuleNameplateCapacity", 300, context(), FactOptions::unit("kWh"));
        assert!(matches!(wrong, Err(Error::Unit(_))));
    }

    #[test]
    fn test_unitless_types_reject_units() {
        let mut doc = report();
        let result = doc.set(
            "MonthlyOperatingReportAvailabilityOfDocument",
            true,
            monthly(),
            FactOptions::unit("USD"),
        );
        assert!(matches!(result, Err(Error::Unit(_))));

        let at = Context::builder().instant(day(2024, 3, 31));
        doc.set("SiteNumberOfModules", 1200, at.clone(), FactOptions::unit("pure"))
            .unwrap();
        doc.set("SiteNumberOfModules", 1200, at, FactOptions::default())
            .unwrap();
    }

    // ==================== Values and accuracy ====================

    #[test]
    fn test_invalid_value_is_a_type_error() {
        let mut doc = report();
        let result = doc.set(
            "MonthlyOperatingReportEffectiveDate",
            "31/03/2024",
            monthly(),
            FactOptions::default(),
        );
        assert!(matches!(result, Err(Error::Type(_))));
    }

    #[test]
    fn test_decimals_and_precision_are_exclusive() {
        let mut doc = cut_sheet();
        let both = FactOptions::unit("USD").with_decimals(2).with_precision(4);
        let result = doc.set("DeviceCost", 100, product_context("P1"), both);
        assert!(matches!(result, Err(Error::Type(_))));
        assert_eq!(doc.fact_count(), 0);
    }

    #[test]
    fn test_accuracy_needs_a_numeric_concept() {
        let mut doc = report();
        let result = doc.set(
            "PreparerOfMonthlyOperatingReport",
            "Jane",
            monthly(),
            FactOptions::default().with_decimals(0),
        );
        assert!(matches!(result, Err(Error::Type(_))));
    }

    #[test]
    fn test_trusted_input_skips_value_and_unit_checks_only() {
        let mut doc =
            Document::with_config(fixture_catalog(), "CutSheet", DocumentConfig::trusted())
                .unwrap();
        let fact = doc
            .set("DeviceCost", "lots", product_context("P1"), FactOptions::unit("iso4217:XYZ"))
            .unwrap();
        assert_eq!(fact.value(), &FactValue::Text("lots".to_string()));
        assert_eq!(fact.unit(), Some("XYZ"));

        let no_axis = Context::builder().instant(day(2024, 1, 1));
        let result = doc.set("DeviceCost", "lots", no_axis, FactOptions::default());
        assert!(matches!(result, Err(Error::Context(_))));
    }

    // ==================== Default context ====================

    #[test]
    fn test_default_context_merges_additively() {
        let mut doc = cut_sheet();
        doc.set_default_context(Context::builder().entity("JUPITER"));
        doc.set_default_context(Context::builder().instant(day(2024, 1, 1)));
        doc.set_default_context(Context::builder().axis("ProductIdentifierAxis", "P1"));

        let defaults = doc.default_context();
        assert_eq!(defaults.entity_value(), Some("JUPITER"));
        assert!(defaults.has_period());

        doc.set("DeviceCost", 5, ContextBuilder::default(), FactOptions::unit("USD"))
            .unwrap();
        let expected = Context::builder()
            .entity("JUPITER")
            .instant(day(2024, 1, 1))
            .axis("ProductIdentifierAxis", "P1")
            .build()
            .unwrap();
        assert!(doc.get("DeviceCost", &expected).is_some());
    }

    #[test]
    fn test_default_axes_only_reach_tables_that_declare_them() {
        let mut doc = cut_sheet();
        doc.set_default_context(
            Context::builder()
                .entity("JUPITER")
                .axis("ProductIdentifierAxis", "P1"),
        );

        let lei = doc
            .set(
                "dei:LegalEntityIdentifier",
                "5493001KJTIIGC8Y1R12",
                Context::builder().duration(day(2024, 1, 1), day(2024, 12, 31)),
                FactOptions::default(),
            )
            .unwrap();
        assert_eq!(lei.context().entity(), Some("JUPITER"));
        assert!(lei.context().axes().is_empty());

        let cost = doc
            .set(
                "DeviceCost",
                5,
                Context::builder().instant(day(2024, 1, 1)),
                FactOptions::unit("USD"),
            )
            .unwrap();
        assert_eq!(cost.context().axis_value("ProductIdentifierAxis"), Some("P1"));
    }

    #[test]
    fn test_caller_context_wins_over_defaults() {
        let mut doc = cut_sheet();
        doc.set_default_context(
            Context::builder()
                .entity("JUPITER")
                .axis("ProductIdentifierAxis", "P1"),
        );
        let fact = doc
            .set(
                "DeviceCost",
                5,
                product_context("P9").entity("SATURN"),
                FactOptions::unit("USD"),
            )
            .unwrap();
        assert_eq!(fact.context().entity(), Some("SATURN"));
        assert_eq!(
            fact.context().axis_value("solar:ProductIdentifierAxis"),
            Some("P9")
        );
    }

    // ==================== Taxonomy queries ====================

    #[test]
    fn test_taxonomy_queries() {
        let doc = cut_sheet();
        let writable = doc.writable_concepts();
        assert!(writable.contains(&"solar:DeviceCost"));
        assert!(!writable.contains(&"solar:CutSheetDetailsTable"));

        assert_eq!(doc.required_axes("DeviceCost"), vec!["solar:ProductIdentifierAxis"]);
        assert_eq!(
            doc.valid_axis_values("InverterPowerLevelPercentAxis").map(<[String]>::len),
            Some(3)
        );
        assert!(doc.valid_axis_values("ProductIdentifierAxis").is_none());
    }

    // ==================== Emitters ====================

    fn populated() -> Document {
        let mut doc = cut_sheet();
        doc.set_default_context(Context::builder().entity("JUPITER"));
        doc.set(
            "DeviceCost",
            100,
            product_context("P1"),
            FactOptions::unit("USD").with_decimals(2).with_id("cost"),
        )
        .unwrap();
        doc.set(
            "InverterEfficiencyAtVmaxPercent",
            "97.5",
            efficiency_context("solar:InverterPowerLevel50PercentMember"),
            FactOptions::default().with_id("eff"),
        )
        .unwrap();
        doc.set(
            "Type",
            "ModuleMember",
            Context::builder().forever().axis("ProductIdentifierAxis", "P1"),
            FactOptions::default().with_id("type"),
        )
        .unwrap();
        doc
    }

    #[test]
    fn test_xml_output() {
        let xml = populated().to_xml_string().unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"xmlns:xbrli="http://www.xbrl.org/2003/instance""#));
        assert!(!xml.contains("xmlns:dei="));
        assert!(xml.contains(r#"<xbrli:context id="CutSheetDetailsTable_0">"#));
        assert!(xml.contains(r#"<xbrli:identifier scheme="http://xbrl.org/entity/identification/scheme">JUPITER</xbrli:identifier>"#));
        assert!(xml.contains(r#"<xbrldi:typedMember dimension="solar:ProductIdentifierAxis"><solar:ProductIdentifierDomain>P1</solar:ProductIdentifierDomain></xbrldi:typedMember>"#));
        assert!(xml.contains(r#"<xbrldi:explicitMember dimension="solar:InverterPowerLevelPercentAxis">solar:InverterPowerLevel50PercentMember</xbrldi:explicitMember>"#));
        assert!(xml.contains("<xbrli:instant>2024-01-01T00:00:00</xbrli:instant>"));
        assert!(xml.contains("<xbrli:forever/>"));
        assert!(xml.contains("<xbrli:measure>iso4217:USD</xbrli:measure>"));
        assert!(xml.contains(r#"<solar:DeviceCost contextRef="CutSheetDetailsTable_0" id="cost" unitRef="USD" decimals="2">100</solar:DeviceCost>"#));
        assert!(xml.contains(r#"id="eff">97.5</solar:InverterEfficiencyAtVmaxPercent>"#));
        assert_eq!(xml.matches("<xbrli:unit ").count(), 1);
    }

    #[test]
    fn test_xml_null_and_optional_namespace() {
        let mut doc = Document::new(fixture_catalog(), "MonthlyOperatingReport").unwrap();
        doc.set(
            "PreparerOfMonthlyOperatingReport",
            FactValue::Null,
            monthly(),
            FactOptions::default().with_id("prep"),
        )
        .unwrap();
        doc.set("dei:LegalEntityIdentifier", "5493001KJTIIGC8Y1R12", monthly(), FactOptions::default())
            .unwrap();

        let xml = doc.to_xml_string().unwrap();
        assert!(xml.contains(r#"id="prep" xsi:nil="true"/>"#));
        assert!(xml.contains(r#"xmlns:dei="http://xbrl.sec.gov/dei/2014-01-31""#));
        assert!(xml.contains("<xbrli:startDate>2024-03-01T00:00:00</xbrli:startDate>"));
    }

    #[test]
    fn test_json_output() {
        let json = populated().to_json_value();

        assert_eq!(
            json["documentType"],
            "http://www.xbrl.org/WGWD/YYYY-MM-DD/xbrl-json"
        );
        assert_eq!(json["dtsReferences"][0]["type"], "schema");
        assert!(json["prefixes"]["solar"].is_string());

        let cost = &json["facts"]["cost"];
        assert_eq!(cost["value"], "100");
        assert_eq!(cost["aspects"]["xbrl:concept"], "solar:DeviceCost");
        assert_eq!(cost["aspects"]["xbrl:entity"], "JUPITER");
        assert_eq!(cost["aspects"]["xbrl:period"], "2024-01-01T00:00:00");
        assert_eq!(cost["aspects"]["xbrl:unit"], "iso4217:USD");
        assert_eq!(cost["aspects"]["xbrl:decimals"], 2);
        assert_eq!(cost["aspects"]["solar:ProductIdentifierAxis"], "P1");

        let eff = &json["facts"]["eff"]["aspects"];
        assert_eq!(eff["xbrl:period"], "2024-01-01T00:00:00/2024-12-31T00:00:00");
        assert!(eff.get("xbrl:decimals").is_none());
        assert!(eff.get("xbrl:precision").is_none());
        assert!(eff.get("xbrl:unit").is_none());

        assert!(json["facts"]["type"]["aspects"].get("xbrl:period").is_none());
    }

    #[test]
    fn test_json_keeps_boolean_and_null_literals() {
        let mut doc = report();
        doc.set(
            "MonthlyOperatingReportAvailabilityOfDocument",
            "1",
            monthly(),
            FactOptions::default().with_id("available"),
        )
        .unwrap();
        doc.set(
            "PreparerOfMonthlyOperatingReport",
            FactValue::Null,
            monthly(),
            FactOptions::default().with_id("prep"),
        )
        .unwrap();

        let json = doc.to_json_value();
        assert_eq!(json["facts"]["available"]["value"], true);
        assert!(json["facts"]["prep"]["value"].is_null());
    }
}
