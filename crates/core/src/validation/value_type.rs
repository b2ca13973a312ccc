//! Closed set of value datatypes, resolved once per concept from the
//! taxonomy's declared type name.

use oblib_taxonomy::TaxonomyCatalog;

use crate::utils::name_utils::{local_name, prefix_of};

/// Validation strategy for a concept's values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    Boolean,
    Integer,
    String,
    Decimal,
    Monetary,
    Percent,
    Date,
    DateTime,
    Uuid,
    /// Physical quantity; holds the item type its unit must measure,
    /// e.g. `powerItemType`.
    Measure(String),
    /// Enumerated type with the catalog's allowed values.
    Enumerated(Vec<String>),
    /// Declared type with no validation strategy.
    Unsupported(String),
}

/// Unit rule implied by a value type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitRequirement {
    /// No unit may be given.
    None,
    /// A unit may be given and must then resolve.
    Optional,
    /// A currency unit is required.
    Currency,
    /// A unit measuring this item type is required.
    Measure(String),
}

impl ValueType {
    /// Maps a declared type name such as `xbrli:monetaryItemType` to its
    /// strategy. Types with no dedicated strategy fall back to the catalog's
    /// enumerated values.
    pub fn resolve(type_name: &str, catalog: &dyn TaxonomyCatalog) -> Self {
        let local = local_name(type_name);
        match local {
            "booleanItemType" => return ValueType::Boolean,
            "integerItemType"
            | "nonNegativeIntegerItemType"
            | "positiveIntegerItemType"
            | "intItemType"
            | "longItemType"
            | "shortItemType" => return ValueType::Integer,
            "stringItemType" | "normalizedStringItemType" | "tokenItemType"
            | "anyURIItemType" | "languageItemType" => return ValueType::String,
            "decimalItemType" | "floatItemType" | "doubleItemType" | "pureItemType" => {
                return ValueType::Decimal
            }
            "monetaryItemType" | "perShareItemType" => return ValueType::Monetary,
            "percentItemType" => return ValueType::Percent,
            "dateItemType" => return ValueType::Date,
            "dateTimeItemType" => return ValueType::DateTime,
            "UUIDItemType" | "uuidItemType" => return ValueType::Uuid,
            _ => {}
        }

        if matches!(prefix_of(type_name), Some("num-us") | Some("num")) {
            return ValueType::Measure(local.to_string());
        }

        match catalog.enumerated_values(type_name) {
            Some(values) => ValueType::Enumerated(values.to_vec()),
            None => ValueType::Unsupported(type_name.to_string()),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ValueType::Integer
                | ValueType::Decimal
                | ValueType::Monetary
                | ValueType::Percent
                | ValueType::Measure(_)
        )
    }

    pub fn unit_requirement(&self) -> UnitRequirement {
        match self {
            ValueType::Monetary => UnitRequirement::Currency,
            ValueType::Measure(item_type) => UnitRequirement::Measure(item_type.clone()),
            ValueType::Integer | ValueType::Decimal | ValueType::Percent => {
                UnitRequirement::Optional
            }
            _ => UnitRequirement::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oblib_taxonomy::MemoryCatalog;

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::builder()
            .enumeration(
                "solar-types:deviceItemType",
                vec!["ModuleMember".to_string(), "InverterMember".to_string()],
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_resolve_dedicated_types() {
        let catalog = catalog();
        assert_eq!(ValueType::resolve("xbrli:booleanItemType", &catalog), ValueType::Boolean);
        assert_eq!(ValueType::resolve("xbrli:integerItemType", &catalog), ValueType::Integer);
        assert_eq!(ValueType::resolve("xbrli:monetaryItemType", &catalog), ValueType::Monetary);
        assert_eq!(ValueType::resolve("num:percentItemType", &catalog), ValueType::Percent);
        assert_eq!(ValueType::resolve("xbrli:dateItemType", &catalog), ValueType::Date);
        assert_eq!(ValueType::resolve("solar-types:UUIDItemType", &catalog), ValueType::Uuid);
    }

    #[test]
    fn test_resolve_measure_types() {
        let catalog = catalog();
        assert_eq!(
            ValueType::resolve("num-us:powerItemType", &catalog),
            ValueType::Measure("powerItemType".to_string())
        );
    }

    #[test]
    fn test_resolve_enumerated_fallback() {
        let catalog = catalog();
        assert_eq!(
            ValueType::resolve("solar-types:deviceItemType", &catalog),
            ValueType::Enumerated(vec!["ModuleMember".to_string(), "InverterMember".to_string()])
        );
        assert_eq!(
            ValueType::resolve("solar-types:unknownItemType", &catalog),
            ValueType::Unsupported("solar-types:unknownItemType".to_string())
        );
    }

    #[test]
    fn test_unit_requirements() {
        assert_eq!(ValueType::Monetary.unit_requirement(), UnitRequirement::Currency);
        assert_eq!(
            ValueType::Measure("energyItemType".to_string()).unit_requirement(),
            UnitRequirement::Measure("energyItemType".to_string())
        );
        assert_eq!(ValueType::Integer.unit_requirement(), UnitRequirement::Optional);
        assert_eq!(ValueType::Boolean.unit_requirement(), UnitRequirement::None);
        assert_eq!(
            ValueType::Enumerated(Vec::new()).unit_requirement(),
            UnitRequirement::None
        );
    }
}
