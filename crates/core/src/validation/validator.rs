//! Fact value validation.
//!
//! Each [`ValueType`] maps to one strategy that returns the (possibly
//! coerced) value together with every problem found:
//! - boolean: native booleans, or `true/false/1/0` in any case
//! - integer: native ints and integer-valued numbers or strings (`"3.0"`)
//! - string: anything with a text form
//! - decimal, monetary, percent, measure: numbers or numeric strings
//!   (monetary strips `$` and `,`); percent has no range check
//! - date: `YYYY-MM-DD`; dateTime: `YYYY-MM-DDTHH:MM:SS`
//! - uuid and enumerated types: pattern and membership checks

use chrono::{NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::ValueType;
use crate::concepts::Concept;
use crate::constants::{DATE_FORMAT, IDENTIFIER_MARKER, LEGAL_ENTITY_IDENTIFIER, TIMESTAMP_FORMAT};
use crate::document::fact_model::parse_decimal;
use crate::document::FactValue;
use crate::errors::{Error, Result};

lazy_static! {
    static ref UUID_PATTERN: Regex = Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$"
    )
    .expect("UUID pattern must compile");
    static ref DATE_PATTERN: Regex =
        Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern must compile");
    static ref DATE_TIME_PATTERN: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}$")
        .expect("dateTime pattern must compile");
}

/// Result of validating one value.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    pub value: FactValue,
    pub errors: Vec<String>,
}

impl ValidationOutcome {
    fn ok(value: FactValue) -> Self {
        Self {
            value,
            errors: Vec::new(),
        }
    }

    fn fail(value: FactValue, message: impl Into<String>) -> Self {
        Self {
            value,
            errors: vec![message.into()],
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validates and coerces fact values against their concept's datatype.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueValidator;

impl ValueValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validates `value` for `concept`, collecting every problem.
    pub fn validate(&self, concept: &Concept, value: FactValue) -> ValidationOutcome {
        if value.is_null() {
            return if concept.nillable() {
                ValidationOutcome::ok(value)
            } else {
                ValidationOutcome::fail(
                    value,
                    format!("'{}' is not nillable and requires a value", concept.name()),
                )
            };
        }

        let mut outcome = match concept.value_type() {
            ValueType::Boolean => validate_boolean(value),
            ValueType::Integer => validate_integer(value),
            ValueType::String => validate_string(value),
            ValueType::Decimal | ValueType::Percent | ValueType::Measure(_) => {
                validate_decimal(value)
            }
            ValueType::Monetary => validate_monetary(value),
            ValueType::Date => validate_date(value),
            ValueType::DateTime => validate_date_time(value),
            ValueType::Uuid => validate_uuid(value),
            ValueType::Enumerated(allowed) => validate_enumerated(value, allowed),
            ValueType::Unsupported(type_name) => ValidationOutcome::fail(
                value,
                format!("No validation is available for type '{}'", type_name),
            ),
        };

        if is_identifier_concept(concept) && !UUID_PATTERN.is_match(&outcome.value.to_string()) {
            outcome.errors.push(format!(
                "'{}' of '{}' is not a valid UUID identifier",
                outcome.value,
                concept.name()
            ));
        }

        outcome
    }

    /// Like [`validate`](Self::validate) but folds the problems into one
    /// type error.
    pub fn validate_value(&self, concept: &Concept, value: FactValue) -> Result<FactValue> {
        let outcome = self.validate(concept, value);
        if outcome.is_valid() {
            Ok(outcome.value)
        } else {
            Err(Error::Type(format!(
                "{}: {}",
                concept.name(),
                outcome.errors.join("; ")
            )))
        }
    }
}

fn is_identifier_concept(concept: &Concept) -> bool {
    !concept.is_axis()
        && concept.name().contains(IDENTIFIER_MARKER)
        && concept.name() != LEGAL_ENTITY_IDENTIFIER
        && matches!(
            concept.value_type(),
            ValueType::String | ValueType::Uuid
        )
}

fn validate_boolean(value: FactValue) -> ValidationOutcome {
    let parsed = match &value {
        FactValue::Boolean(b) => Some(*b),
        FactValue::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    };
    match parsed {
        Some(b) => ValidationOutcome::ok(FactValue::Boolean(b)),
        None => {
            let message = format!("'{}' is not a boolean", value);
            ValidationOutcome::fail(value, message)
        }
    }
}

fn whole_number(d: Decimal) -> Option<i64> {
    if d.fract().is_zero() {
        d.to_i64()
    } else {
        None
    }
}

fn validate_integer(value: FactValue) -> ValidationOutcome {
    let parsed = match &value {
        FactValue::Integer(i) => Some(*i),
        FactValue::Decimal(d) => whole_number(*d),
        FactValue::Text(text) => text
            .trim()
            .parse::<i64>()
            .ok()
            .or_else(|| parse_decimal(text).and_then(whole_number)),
        _ => None,
    };
    match parsed {
        Some(i) => ValidationOutcome::ok(FactValue::Integer(i)),
        None => {
            let message = format!("'{}' is not an integer", value);
            ValidationOutcome::fail(value, message)
        }
    }
}

fn validate_string(value: FactValue) -> ValidationOutcome {
    match value {
        FactValue::Text(_) => ValidationOutcome::ok(value),
        other => ValidationOutcome::ok(FactValue::Text(other.to_string())),
    }
}

/// Shared numeric check; `clean` prepares numeric-looking text for parsing.
fn validate_number(value: FactValue, kind: &str, clean: fn(&str) -> String) -> ValidationOutcome {
    if matches!(value, FactValue::Integer(_) | FactValue::Decimal(_)) {
        return ValidationOutcome::ok(value);
    }
    let parsed = match &value {
        FactValue::Text(text) => parse_decimal(&clean(text)),
        _ => None,
    };
    match parsed {
        Some(d) => ValidationOutcome::ok(FactValue::Decimal(d)),
        None => {
            let message = format!("'{}' is not {}", value, kind);
            ValidationOutcome::fail(value, message)
        }
    }
}

fn validate_decimal(value: FactValue) -> ValidationOutcome {
    validate_number(value, "a decimal number", str::to_string)
}

fn validate_monetary(value: FactValue) -> ValidationOutcome {
    validate_number(value, "a monetary amount", |text| {
        text.chars().filter(|c| *c != '$' && *c != ',').collect()
    })
}

fn validate_date(value: FactValue) -> ValidationOutcome {
    let valid = match &value {
        FactValue::Text(text) => {
            DATE_PATTERN.is_match(text) && NaiveDate::parse_from_str(text, DATE_FORMAT).is_ok()
        }
        _ => false,
    };
    if valid {
        ValidationOutcome::ok(value)
    } else {
        let message = format!("'{}' is not a date in YYYY-MM-DD format", value);
        ValidationOutcome::fail(value, message)
    }
}

fn validate_date_time(value: FactValue) -> ValidationOutcome {
    let valid = match &value {
        FactValue::Text(text) => {
            DATE_TIME_PATTERN.is_match(text)
                && NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).is_ok()
        }
        _ => false,
    };
    if valid {
        ValidationOutcome::ok(value)
    } else {
        let message = format!("'{}' is not a dateTime in YYYY-MM-DDTHH:MM:SS format", value);
        ValidationOutcome::fail(value, message)
    }
}

fn validate_uuid(value: FactValue) -> ValidationOutcome {
    if matches!(&value, FactValue::Text(text) if UUID_PATTERN.is_match(text)) {
        ValidationOutcome::ok(value)
    } else {
        let message = format!("'{}' is not a UUID", value);
        ValidationOutcome::fail(value, message)
    }
}

fn validate_enumerated(value: FactValue, allowed: &[String]) -> ValidationOutcome {
    let text = value.to_string();
    if allowed.iter().any(|candidate| *candidate == text) {
        ValidationOutcome::ok(FactValue::Text(text))
    } else {
        ValidationOutcome::fail(
            value,
            format!("'{}' is not one of: {}", text, allowed.join(", ")),
        )
    }
}
