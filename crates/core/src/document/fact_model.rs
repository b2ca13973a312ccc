//! Fact and fact value models.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;

use crate::context::Context;
use crate::errors::{Error, Result};

/// A fact's value before or after validation.
#[derive(Debug, Clone, PartialEq)]
pub enum FactValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Decimal(Decimal),
    Text(String),
}

impl FactValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FactValue::Null)
    }

    /// JSON form: booleans and null stay literals, everything else is a string.
    pub fn to_json(&self) -> JsonValue {
        match self {
            FactValue::Null => JsonValue::Null,
            FactValue::Boolean(b) => JsonValue::Bool(*b),
            other => JsonValue::String(other.to_string()),
        }
    }

    /// Reads a JSON `value`; numbers become integers when they fit, decimals
    /// otherwise.
    pub fn from_json(value: &JsonValue) -> Result<Self> {
        match value {
            JsonValue::Null => Ok(FactValue::Null),
            JsonValue::Bool(b) => Ok(FactValue::Boolean(*b)),
            JsonValue::String(s) => Ok(FactValue::Text(s.clone())),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Ok(FactValue::Integer(i)),
                None => parse_decimal(&n.to_string())
                    .map(FactValue::Decimal)
                    .ok_or_else(|| Error::Type(format!("'{}' is not a valid number", n))),
            },
            JsonValue::Array(_) | JsonValue::Object(_) => Err(Error::Type(
                "Fact values must be scalars, not arrays or objects".to_string(),
            )),
        }
    }
}

/// Parses plain or scientific decimal notation.
pub(crate) fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    text.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(text).ok())
}

impl fmt::Display for FactValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactValue::Null => Ok(()),
            FactValue::Boolean(b) => write!(f, "{}", b),
            FactValue::Integer(i) => write!(f, "{}", i),
            FactValue::Decimal(d) => write!(f, "{}", d),
            FactValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for FactValue {
    fn from(value: bool) -> Self {
        FactValue::Boolean(value)
    }
}

impl From<i64> for FactValue {
    fn from(value: i64) -> Self {
        FactValue::Integer(value)
    }
}

impl From<i32> for FactValue {
    fn from(value: i32) -> Self {
        FactValue::Integer(value.into())
    }
}

impl From<u32> for FactValue {
    fn from(value: u32) -> Self {
        FactValue::Integer(value.into())
    }
}

impl From<Decimal> for FactValue {
    fn from(value: Decimal) -> Self {
        FactValue::Decimal(value)
    }
}

impl From<&str> for FactValue {
    fn from(value: &str) -> Self {
        FactValue::Text(value.to_string())
    }
}

impl From<String> for FactValue {
    fn from(value: String) -> Self {
        FactValue::Text(value)
    }
}

impl From<NaiveDate> for FactValue {
    fn from(value: NaiveDate) -> Self {
        FactValue::Text(value.format("%Y-%m-%d").to_string())
    }
}

impl<T: Into<FactValue>> From<Option<T>> for FactValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FactValue::Null, Into::into)
    }
}

/// Numeric accuracy: decimals or precision, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accuracy {
    Decimals(i32),
    Precision(i32),
}

impl Accuracy {
    /// Combines the two optional attributes, rejecting both at once.
    pub fn from_parts(decimals: Option<i32>, precision: Option<i32>) -> Result<Option<Self>> {
        match (decimals, precision) {
            (Some(_), Some(_)) => Err(Error::Type(
                "A fact cannot have both decimals and precision".to_string(),
            )),
            (Some(d), None) => Ok(Some(Accuracy::Decimals(d))),
            (None, Some(p)) => Ok(Some(Accuracy::Precision(p))),
            (None, None) => Ok(None),
        }
    }

    pub fn decimals(&self) -> Option<i32> {
        match self {
            Accuracy::Decimals(d) => Some(*d),
            Accuracy::Precision(_) => None,
        }
    }

    pub fn precision(&self) -> Option<i32> {
        match self {
            Accuracy::Precision(p) => Some(*p),
            Accuracy::Decimals(_) => None,
        }
    }
}

/// Optional arguments of `Document::set`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactOptions {
    /// Unit id, name or measure (`USD`, `US Dollar`, `iso4217:USD`)
    pub unit: Option<String>,
    pub decimals: Option<i32>,
    pub precision: Option<i32>,
    /// Fact id; a random UUID is generated when absent
    pub id: Option<String>,
}

impl FactOptions {
    pub fn unit(unit: impl Into<String>) -> Self {
        Self {
            unit: Some(unit.into()),
            ..Self::default()
        }
    }

    pub fn with_decimals(mut self, decimals: i32) -> Self {
        self.decimals = Some(decimals);
        self
    }

    pub fn with_precision(mut self, precision: i32) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// A value for a concept within a stored context.
#[derive(Debug, Clone, PartialEq)]
pub struct Fact {
    pub(crate) id: String,
    pub(crate) concept: String,
    pub(crate) context: Context,
    pub(crate) unit: Option<String>,
    pub(crate) value: FactValue,
    pub(crate) accuracy: Option<Accuracy>,
}

impl Fact {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn concept(&self) -> &str {
        &self.concept
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    pub fn value(&self) -> &FactValue {
        &self.value
    }

    pub fn accuracy(&self) -> Option<Accuracy> {
        self.accuracy
    }

    pub fn decimals(&self) -> Option<i32> {
        self.accuracy.and_then(|a| a.decimals())
    }

    pub fn precision(&self) -> Option<i32> {
        self.accuracy.and_then(|a| a.precision())
    }
}
